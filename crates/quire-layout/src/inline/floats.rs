use smallvec::SmallVec;

use crate::config::FloatSide;
use crate::geom::{Abs, Rect};
use crate::item::ContentItem;

/// The area a placed float occupies.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct FloatArea {
    /// The occupied rectangle.
    pub rect: Rect,
    /// The side the float attaches to.
    pub side: FloatSide,
}

/// The floats placed so far in the current column.
///
/// The registry is owned by the caller. A line reads it on entry to narrow
/// its area and appends the floats it places, so the next line sees them.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct FloatRegistry {
    areas: Vec<FloatArea>,
}

impl FloatRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether no float was placed yet.
    pub fn is_empty(&self) -> bool {
        self.areas.is_empty()
    }

    /// The number of placed floats.
    pub fn len(&self) -> usize {
        self.areas.len()
    }

    /// The placed floats in placement order.
    pub fn areas(&self) -> &[FloatArea] {
        &self.areas
    }

    /// Record a placed float.
    pub fn push(&mut self, area: FloatArea) {
        self.areas.push(area);
    }

    /// Find the widest room at the top of `area` that is at least `width`
    /// wide and not covered by a float.
    ///
    /// When the floats at the top leave too little room, the top moves down
    /// past the float that ends highest, until there is room or the area is
    /// used up.
    pub fn find_room(&self, area: Rect, width: Abs) -> Option<Rect> {
        let mut room = area;
        loop {
            let top = room.top();
            let blocking: SmallVec<[&FloatArea; 4]> = self
                .areas
                .iter()
                .filter(|float| float.rect.bottom() < top && float.rect.top() >= top)
                .collect();

            let mut left = room.left();
            let mut right = room.right();
            for float in &blocking {
                match float.side {
                    FloatSide::Left => left.set_max(float.rect.right()),
                    FloatSide::Right => right.set_min(float.rect.left()),
                }
            }

            let available = right - left;
            if available > Abs::zero() && !available.approx_empty() && available.fits(width)
            {
                return Some(Rect::new(left, room.y, available, room.height));
            }

            let next = blocking.iter().map(|float| float.rect.bottom()).max()?;
            if next <= room.y {
                return None;
            }
            room.height = next - room.y;
        }
    }

    /// Narrow a line's area to the room the floats leave at its top.
    ///
    /// If the floats leave no room at all, the area collapses to zero width.
    pub fn adjust_line_area(&self, layout_box: &mut Rect) {
        if self.areas.is_empty() {
            return;
        }
        match self.find_room(*layout_box, Abs::zero()) {
            Some(room) => *layout_box = room,
            None => layout_box.width = Abs::zero(),
        }
    }
}

/// Make room on the line for a float that was just placed beside it.
///
/// Only floats that cover the top edge of the line affect it. A left float
/// pushes the line's start, and everything already placed on the line, to
/// its right edge.
pub fn adjust_line_on_float_placed(
    layout_box: &mut Rect,
    occupied: &mut Rect,
    placed: &mut [ContentItem],
    float: &FloatArea,
) {
    let rect = float.rect;
    if rect.bottom() >= layout_box.top() || rect.top() < layout_box.top() {
        return;
    }

    let width = rect.width;
    match float.side {
        FloatSide::Left => {
            layout_box.shrink_left(width);
            occupied.move_right(width);
            for item in placed.iter_mut().filter(|item| !item.is_floating()) {
                item.move_by(width, Abs::zero());
            }
        }
        FloatSide::Right => layout_box.width -= width,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::Leaf;
    use crate::item::MeasureContext;

    fn area() -> Rect {
        Rect::new(Abs::zero(), Abs::zero(), Abs::pt(300.0), Abs::pt(100.0))
    }

    fn float(side: FloatSide, x: f64, width: f64, bottom: f64) -> FloatArea {
        FloatArea {
            rect: Rect::new(Abs::pt(x), Abs::pt(bottom), Abs::pt(width), Abs::pt(100.0 - bottom)),
            side,
        }
    }

    #[test]
    fn test_line_area_narrows_beside_floats() {
        let mut floats = FloatRegistry::new();
        floats.push(float(FloatSide::Left, 0.0, 50.0, 60.0));
        floats.push(float(FloatSide::Right, 260.0, 40.0, 80.0));

        let mut layout_box = area();
        floats.adjust_line_area(&mut layout_box);
        assert_eq!(layout_box.left(), Abs::pt(50.0));
        assert_eq!(layout_box.right(), Abs::pt(260.0));
        assert_eq!(layout_box.top(), Abs::pt(100.0));
    }

    #[test]
    fn test_room_moves_below_blocking_floats() {
        let mut floats = FloatRegistry::new();
        floats.push(float(FloatSide::Left, 0.0, 200.0, 60.0));

        let room = floats.find_room(area(), Abs::pt(150.0)).unwrap();
        assert_eq!(room.top(), Abs::pt(60.0));
        assert_eq!(room.width, Abs::pt(300.0));
        assert!(floats.find_room(area(), Abs::pt(400.0)).is_none());
    }

    #[test]
    fn test_left_float_shifts_placed_content() {
        let mut layout_box = area();
        let mut occupied = Rect::from_top_left(Abs::zero(), Abs::pt(100.0));
        let mut leaf = ContentItem::Leaf(Leaf::new(Abs::pt(10.0), Abs::pt(10.0)));
        leaf.layout(&MeasureContext::new(area()));

        let mut placed = [leaf];
        let area = float(FloatSide::Left, 0.0, 50.0, 40.0);
        adjust_line_on_float_placed(&mut layout_box, &mut occupied, &mut placed, &area);

        assert_eq!(layout_box.left(), Abs::pt(50.0));
        assert_eq!(layout_box.width, Abs::pt(250.0));
        assert_eq!(occupied.x, Abs::pt(50.0));
        assert_eq!(placed[0].occupied().unwrap().x, Abs::pt(50.0));
    }
}
