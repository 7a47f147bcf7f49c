use super::Abs;

/// An axis-aligned rectangle in a y-up coordinate system.
///
/// `x` is the left edge and `y` the bottom edge.
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Rect {
    pub x: Abs,
    pub y: Abs,
    pub width: Abs,
    pub height: Abs,
}

impl Rect {
    /// Create a new rectangle from its bottom-left corner and extent.
    pub const fn new(x: Abs, y: Abs, width: Abs, height: Abs) -> Self {
        Self { x, y, width, height }
    }

    /// A zero-sized rectangle anchored at the given top-left point.
    pub fn from_top_left(x: Abs, top: Abs) -> Self {
        Self::new(x, top, Abs::zero(), Abs::zero())
    }

    /// The left edge.
    pub fn left(&self) -> Abs {
        self.x
    }

    /// The right edge.
    pub fn right(&self) -> Abs {
        self.x + self.width
    }

    /// The bottom edge.
    pub fn bottom(&self) -> Abs {
        self.y
    }

    /// The top edge.
    pub fn top(&self) -> Abs {
        self.y + self.height
    }

    /// Move the rectangle by the given offsets.
    pub fn move_by(&mut self, dx: Abs, dy: Abs) {
        self.x += dx;
        self.y += dy;
    }

    /// Move the rectangle to the right.
    pub fn move_right(&mut self, dx: Abs) {
        self.x += dx;
    }

    /// Move the rectangle upwards.
    pub fn move_up(&mut self, dy: Abs) {
        self.y += dy;
    }

    /// Shrink the rectangle from the top, keeping the bottom edge in place.
    pub fn decrease_height(&mut self, dy: Abs) {
        self.height -= dy;
    }

    /// Shrink the rectangle from the left, keeping the right edge in place.
    pub fn shrink_left(&mut self, dx: Abs) {
        self.x += dx;
        self.width -= dx;
    }

    /// Whether the vertical extent of this rectangle overlaps the band
    /// `bottom..top`.
    pub fn overlaps_band(&self, bottom: Abs, top: Abs) -> bool {
        self.bottom() < top && self.top() > bottom
    }
}
