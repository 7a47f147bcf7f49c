use super::{ContentItem, ItemLayout, MeasureContext};
use crate::config::Props;
use crate::geom::{Abs, Length, Rect};
use crate::inline::MinMaxWidth;

/// A block that flows inline, such as an inline table.
///
/// Its content is a stack of rows. When the rows do not all fit vertically,
/// the block splits between rows.
#[derive(Debug, Clone, PartialEq)]
pub struct InlineBlock {
    /// The block's configuration.
    pub props: Props,
    /// The narrowest the block's content can be laid out at.
    pub min_width: Abs,
    /// The width the block's content wants.
    pub max_width: Abs,
    /// The heights of the rows, top to bottom.
    pub rows: Vec<Abs>,
    /// The height of the block's last baseline above its bottom, if it has
    /// one.
    pub baseline: Option<Abs>,
    pub(super) occupied: Option<Rect>,
}

impl InlineBlock {
    /// Create a block with the given width bounds and rows.
    pub fn new(min_width: Abs, max_width: Abs, rows: Vec<Abs>) -> Self {
        Self {
            props: Props::default(),
            min_width,
            max_width,
            rows,
            baseline: None,
            occupied: None,
        }
    }

    /// Attach a configuration.
    pub fn with_props(mut self, props: Props) -> Self {
        self.props = props;
        self
    }

    /// Attach a baseline.
    pub fn with_baseline(mut self, baseline: Abs) -> Self {
        self.baseline = Some(baseline);
        self
    }

    /// The total height of the rows, at least the minimum height.
    pub fn height(&self) -> Abs {
        let rows: Abs = self.rows.iter().sum();
        rows.max(self.props.min_height.unwrap_or_default())
    }

    /// The width bounds of the block.
    pub fn min_max_width(&self) -> MinMaxWidth {
        match self.props.width {
            Some(Length::Abs(width)) => MinMaxWidth::fixed(width),
            _ => MinMaxWidth::new(self.min_width, self.max_width),
        }
    }

    /// Lay out as many rows as fit into the area.
    pub fn layout(&mut self, ctx: &MeasureContext) -> ItemLayout {
        let area = ctx.area;
        let forced = self.props.forced_placement;
        let width = match self.props.width.and_then(|width| width.resolve(area.width)) {
            Some(width) => width,
            None => area.width.min(self.max_width),
        };

        let fits_width = width.fits(self.min_width);
        if !fits_width && !forced && ctx.overflow_x.is_fit() {
            self.occupied = None;
            return ItemLayout::nothing(ContentItem::Block(self.clone()));
        }

        // Content that cannot shrink further sticks out unless it is clipped.
        let width = if fits_width || ctx.overflow_x.is_fit() {
            width
        } else {
            width.max(self.min_width)
        };

        let mut height = Abs::zero();
        let mut count = 0;
        for &row in &self.rows {
            if !ctx.fits_height(height + row) {
                break;
            }
            height += row;
            count += 1;
        }

        if count == self.rows.len() || forced {
            let height = self.height();
            let rect = Rect::new(area.x, area.top() - height, width, height);
            self.occupied = Some(rect);
            let (ascent, descent) = self.vertical_metrics(height, self.baseline);
            return ItemLayout::full(rect, self.min_max_width(), ascent, descent);
        }

        if count == 0 {
            self.occupied = None;
            return ItemLayout::nothing(ContentItem::Block(self.clone()));
        }

        let rect = Rect::new(area.x, area.top() - height, width, height);
        self.occupied = Some(rect);

        // The baseline belongs to the last row, which is not placed here.
        let placed = Self {
            rows: self.rows[..count].to_vec(),
            baseline: None,
            occupied: Some(rect),
            ..self.clone()
        };
        let rest = Self {
            rows: self.rows[count..].to_vec(),
            occupied: None,
            ..self.clone()
        };

        let (ascent, descent) = self.vertical_metrics(height, None);
        ItemLayout::partial(
            rect,
            ContentItem::Block(placed),
            ContentItem::Block(rest),
            self.min_max_width(),
            ascent,
            descent,
        )
    }

    /// Whether the block has no rows left.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn vertical_metrics(&self, height: Abs, baseline: Option<Abs>) -> (Abs, Abs) {
        match baseline {
            Some(baseline) => (height - baseline, -baseline),
            None => (height, Abs::zero()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::LayoutStatus;

    fn ctx(width: f64, height: f64) -> MeasureContext {
        MeasureContext::new(Rect::new(Abs::zero(), Abs::zero(), Abs::pt(width), Abs::pt(height)))
    }

    fn block() -> InlineBlock {
        InlineBlock::new(Abs::pt(40.0), Abs::pt(80.0), vec![Abs::pt(10.0); 3])
    }

    #[test]
    fn test_block_takes_its_max_width() {
        let mut block = block().with_baseline(Abs::pt(4.0));
        let result = block.layout(&ctx(200.0, 100.0));
        assert_eq!(result.status, LayoutStatus::Full);
        assert_eq!(result.width(), Abs::pt(80.0));
        assert_eq!(result.ascent, Abs::pt(26.0));
        assert_eq!(result.descent, Abs::pt(-4.0));
    }

    #[test]
    fn test_block_too_narrow() {
        let result = block().layout(&ctx(30.0, 100.0));
        assert_eq!(result.status, LayoutStatus::Nothing);

        let mut forced = block();
        forced.props.forced_placement = true;
        let result = forced.layout(&ctx(30.0, 100.0));
        assert_eq!(result.status, LayoutStatus::Full);
        assert_eq!(result.width(), Abs::pt(30.0));
    }

    #[test]
    fn test_block_splits_between_rows() {
        let result = block().layout(&ctx(200.0, 25.0));
        assert_eq!(result.status, LayoutStatus::Partial);
        assert_eq!(result.occupied.unwrap().height, Abs::pt(20.0));
        let Some(ContentItem::Block(rest)) = result.overflow else { panic!() };
        assert_eq!(rest.rows, [Abs::pt(10.0)]);
    }

    #[test]
    fn test_block_relative_width() {
        let mut block = block();
        block.props.width = Some(Length::Relative(0.3));
        let result = block.layout(&ctx(200.0, 100.0));
        assert_eq!(result.width(), Abs::pt(60.0));
    }
}
