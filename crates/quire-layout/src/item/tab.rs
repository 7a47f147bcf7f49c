use super::{ItemLayout, MeasureContext};
use crate::config::Props;
use crate::geom::{Abs, Length, Rect};
use crate::inline::MinMaxWidth;

/// A tab. The line decides its width from the tab stops.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TabItem {
    /// The tab's configuration. The line writes the resolved width here.
    pub props: Props,
    /// The glyph that fills the tab when drawn, taken from the stop.
    pub leader: Option<char>,
    pub(super) occupied: Option<Rect>,
}

impl TabItem {
    /// Create an unresolved tab.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the resolved geometry of the tab.
    pub fn configure(&mut self, width: Abs, min_height: Abs, leader: Option<char>) {
        self.props.width = Some(Length::Abs(width));
        self.props.min_height = Some(min_height);
        self.leader = leader;
    }

    /// The resolved width.
    pub fn width(&self) -> Abs {
        match self.props.width {
            Some(Length::Abs(width)) => width,
            _ => Abs::zero(),
        }
    }

    /// Place the tab at its resolved width.
    pub fn layout(&mut self, ctx: &MeasureContext) -> ItemLayout {
        let width = self.width();
        let height = self.props.min_height.unwrap_or_default();
        let rect = Rect::new(ctx.area.x, ctx.area.top() - height, width, height);
        self.occupied = Some(rect);
        ItemLayout::full(rect, MinMaxWidth::fixed(width), Abs::zero(), Abs::zero())
    }
}
