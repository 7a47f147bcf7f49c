use super::{ContentItem, ItemLayout, MeasureContext};
use crate::config::{FloatSide, Props};
use crate::geom::{Abs, Length, Rect};
use crate::inline::{FloatArea, FloatRegistry, MinMaxWidth};

/// A box that floats to one side of the lines it is placed on.
#[derive(Debug, Clone, PartialEq)]
pub struct FloatBox {
    /// The box's configuration.
    pub props: Props,
    /// The side the box floats to.
    pub side: FloatSide,
    /// The natural width.
    pub natural_width: Abs,
    /// The natural height.
    pub natural_height: Abs,
    /// Whether the box may be split vertically when it does not fit.
    pub splittable: bool,
    pub(super) occupied: Option<Rect>,
}

impl FloatBox {
    /// Create a floating box of the given natural size.
    pub fn new(side: FloatSide, width: Abs, height: Abs) -> Self {
        Self {
            props: Props::default(),
            side,
            natural_width: width,
            natural_height: height,
            splittable: false,
            occupied: None,
        }
    }

    /// Attach a configuration.
    pub fn with_props(mut self, props: Props) -> Self {
        self.props = props;
        self
    }

    /// Allow the box to split vertically.
    pub fn splittable(mut self) -> Self {
        self.splittable = true;
        self
    }

    /// The width the box is laid out at when its width is absolute.
    pub fn width(&self) -> Abs {
        match self.props.width {
            Some(Length::Abs(width)) => width,
            _ => self.natural_width,
        }
    }

    /// The height the box is laid out at.
    pub fn height(&self) -> Abs {
        self.natural_height.max(self.props.min_height.unwrap_or_default())
    }

    /// Place the box beside the floats already in the registry and record it
    /// there.
    ///
    /// The context's area is the full area of the line, without any
    /// adjustment for floats.
    pub fn place(&mut self, ctx: &MeasureContext, floats: &mut FloatRegistry) -> ItemLayout {
        let forced = self.props.forced_placement;
        let width = self
            .props
            .width
            .and_then(|width| width.resolve(ctx.area.width))
            .unwrap_or(self.natural_width);
        let height = self.height();

        let room = match floats.find_room(ctx.area, width) {
            Some(room) => room,
            None if forced => ctx.area,
            None => {
                self.occupied = None;
                return ItemLayout::nothing(ContentItem::Float(self.clone()));
            }
        };

        let x = match self.side {
            FloatSide::Left => room.left(),
            FloatSide::Right => room.right() - width,
        };

        let placed_height = if ctx.clipped_height || forced || room.height.fits(height) {
            height
        } else if self.splittable && !room.height.approx_empty() {
            room.height
        } else {
            self.occupied = None;
            return ItemLayout::nothing(ContentItem::Float(self.clone()));
        };

        let rect = Rect::new(x, room.top() - placed_height, width, placed_height);
        self.occupied = Some(rect);
        floats.push(FloatArea { rect, side: self.side });

        let min_max = MinMaxWidth::fixed(width);
        if placed_height == height {
            return ItemLayout::full(rect, min_max, Abs::zero(), Abs::zero());
        }

        let placed = Self {
            natural_height: placed_height,
            props: Props { min_height: None, ..self.props.clone() },
            occupied: Some(rect),
            ..self.clone()
        };
        let rest = Self {
            natural_height: height - placed_height,
            props: Props { min_height: None, ..self.props.clone() },
            occupied: None,
            ..self.clone()
        };
        ItemLayout::partial(
            rect,
            ContentItem::Float(placed),
            ContentItem::Float(rest),
            min_max,
            Abs::zero(),
            Abs::zero(),
        )
    }
}
