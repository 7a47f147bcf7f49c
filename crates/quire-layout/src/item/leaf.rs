use super::{ContentItem, ItemLayout, MeasureContext};
use crate::config::Props;
use crate::geom::{Abs, Length, Rect};
use crate::inline::MinMaxWidth;

/// An atomic inline element such as an image. It sits on the baseline.
#[derive(Debug, Clone, PartialEq)]
pub struct Leaf {
    /// The element's configuration.
    pub props: Props,
    /// The natural width.
    pub natural_width: Abs,
    /// The natural height.
    pub natural_height: Abs,
    pub(super) occupied: Option<Rect>,
}

impl Leaf {
    /// Create a leaf of the given natural size.
    pub fn new(width: Abs, height: Abs) -> Self {
        Self {
            props: Props::default(),
            natural_width: width,
            natural_height: height,
            occupied: None,
        }
    }

    /// Attach a configuration.
    pub fn with_props(mut self, props: Props) -> Self {
        self.props = props;
        self
    }

    /// The width the leaf is laid out at when its width is absolute.
    pub fn width(&self) -> Abs {
        match self.props.width {
            Some(Length::Abs(width)) => width,
            _ => self.natural_width,
        }
    }

    /// The height the leaf is laid out at.
    pub fn height(&self) -> Abs {
        self.natural_height.max(self.props.min_height.unwrap_or_default())
    }

    /// Place the leaf if it fits.
    pub fn layout(&mut self, ctx: &MeasureContext) -> ItemLayout {
        let area = ctx.area;
        let forced = self.props.forced_placement;
        let width = self
            .props
            .width
            .and_then(|width| width.resolve(area.width))
            .unwrap_or(self.natural_width);
        let height = self.height();

        let fits = (area.width.fits(width) || !ctx.overflow_x.is_fit())
            && ctx.fits_height(height);
        if !fits && !forced {
            self.occupied = None;
            return ItemLayout::nothing(ContentItem::Leaf(self.clone()));
        }

        let rect = Rect::new(area.x, area.top() - height, width, height);
        self.occupied = Some(rect);
        ItemLayout::full(rect, MinMaxWidth::fixed(width), height, Abs::zero())
    }
}
