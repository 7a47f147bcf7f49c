//! Layout of inline content into lines.

mod bidi;
mod floats;
mod line;
mod linebreak;
mod metrics;
mod sequence;
mod tab;
mod width;

pub use self::bidi::{BidiLevels, UnicodeBidiLevels, reorder_line};
pub use self::floats::{FloatArea, FloatRegistry, adjust_line_on_float_placed};
pub use self::line::LineBox;
pub use self::metrics::LineMetrics;
pub use self::tab::{TabAlign, TabStop, TabStops, default_tab_width, hanging_tab_width};
pub use self::width::{MIN_MAX_EPS, MinMaxWidth, WidthPolicy, WidthTracker};

use self::linebreak::Layouter;
use crate::config::{BaseDirection, LineConfig};
use crate::engine::Engine;
use crate::geom::{Abs, Rect};
use crate::item::{ContentItem, LayoutStatus};
use crate::shaping::Shaper;

/// The extent used for "unbounded" areas when measuring a line's widths.
const UNBOUNDED: Abs = Abs::pt(1e6);

/// Inline content that is laid out one line at a time.
///
/// Laying out a line consumes as much of its content as fits. Whatever does
/// not fit comes back as a new `Line` that continues where this one stopped.
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    /// The content in logical order.
    pub children: Vec<ContentItem>,
    /// The configuration shared by all lines of a paragraph.
    pub config: LineConfig,
    /// The bidi embedding levels of the text glyphs, one per glyph in order.
    /// Carried over from the line this one continues, or computed on the
    /// first layout.
    pub levels: Option<Vec<u8>>,
}

/// Where a line is laid out.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct LineRegion {
    /// The full area available to the line.
    pub area: Rect,
    /// Whether the area's height was already clipped by an ancestor.
    pub clipped_height: bool,
    /// The indent of the first line of a paragraph.
    pub text_indent: Abs,
    /// Whether the line is the first thing in the outermost area, where
    /// content has to be placed somehow to make progress.
    pub first_on_root_area: bool,
    /// Whether an earlier line already deferred a float to the next page.
    pub float_overflowed_to_next_page: bool,
}

impl LineRegion {
    /// A region with the given area and no special conditions.
    pub fn new(area: Rect) -> Self {
        Self {
            area,
            clipped_height: false,
            text_indent: Abs::zero(),
            first_on_root_area: false,
            float_overflowed_to_next_page: false,
        }
    }

    /// Indent the line's start.
    pub fn with_indent(mut self, indent: Abs) -> Self {
        self.text_indent = indent;
        self
    }
}

/// The outcome of laying out one line.
#[derive(Debug, Clone, PartialEq)]
pub struct LineLayoutResult {
    /// How much of the line's content was placed.
    pub status: LayoutStatus,
    /// The area the placed content occupies. `None` if nothing was placed.
    pub occupied: Option<Rect>,
    /// The laid out line. `None` if nothing was placed.
    pub line: Option<LineBox>,
    /// The content that continues on the next line.
    pub overflow: Option<Line>,
    /// The index of the child that stopped the line.
    pub cause_of_nothing: Option<usize>,
    /// Whether a hard line break ended the line.
    pub split_forced_by_newline: bool,
    /// Floats that did not fit and move to the next page.
    pub floats_to_next_page: Vec<ContentItem>,
    /// Whether a float moved to the next page, which keeps later floats of
    /// the page from being placed.
    pub float_overflowed_to_next_page: bool,
    /// The width bounds of the line's content.
    pub min_max: MinMaxWidth,
}

impl LineLayoutResult {
    /// Whether the whole line was placed.
    pub fn is_full(&self) -> bool {
        self.status == LayoutStatus::Full
    }
}

impl Line {
    /// Create a line from content in logical order.
    pub fn new(children: Vec<ContentItem>, config: LineConfig) -> Self {
        Self { children, config, levels: None }
    }

    /// Lay out as much of the line as fits into the region.
    ///
    /// Floats placed on the line are recorded in `floats`. Calling this
    /// again with the same region and registry yields the same result.
    #[tracing::instrument(skip_all, fields(children = self.children.len()))]
    pub fn layout(
        &mut self,
        engine: &mut Engine,
        region: &LineRegion,
        floats: &mut FloatRegistry,
    ) -> LineLayoutResult {
        let trimmed = self.prepare(engine.shaper);
        let base = self.base_direction().filter(|&dir| dir != BaseDirection::NoBidi);
        if let Some(base) = base {
            self.update_levels(engine, base, trimmed);
        }

        let levels = base.and(self.levels.as_deref());
        Layouter::new(engine, self, levels, region, floats).run()
    }

    /// The narrowest and widest the line's content could be laid out at.
    pub fn min_max_width(&self, engine: &mut Engine) -> MinMaxWidth {
        let mut line = self.clone();
        let region = LineRegion::new(Rect::new(Abs::zero(), Abs::zero(), UNBOUNDED, UNBOUNDED));
        line.layout(engine, &region, &mut FloatRegistry::new()).min_max
    }

    /// The direction the line is reordered in: the configured one, or the
    /// one of the last text run that declares a direction.
    pub fn base_direction(&self) -> Option<BaseDirection> {
        self.config.base_direction.or_else(|| {
            self.children
                .iter()
                .rev()
                .filter_map(ContentItem::as_text)
                .find_map(|run| run.props.base_direction)
        })
    }

    /// The number of text glyphs on the line.
    fn glyph_count(&self) -> usize {
        self.children.iter().filter_map(ContentItem::as_text).map(|run| run.len()).sum()
    }

    /// Shape the text and drop whitespace at the line's start.
    ///
    /// Returns the number of dropped glyphs.
    fn prepare(&mut self, shaper: &dyn Shaper) -> usize {
        for run in self.children.iter_mut().filter_map(ContentItem::as_text_mut) {
            run.shape(shaper);
        }

        let mut trimmed = 0;
        for child in self.children.iter_mut().filter(|child| !child.is_floating()) {
            let Some(run) = child.as_text_mut() else { break };
            trimmed += run.trim_first();
            if !run.is_empty() {
                break;
            }
        }
        trimmed
    }

    /// Bring the embedding levels in sync with the line's glyphs.
    fn update_levels(&mut self, engine: &Engine, base: BaseDirection, trimmed: usize) {
        if let Some(levels) = &mut self.levels {
            levels.drain(..trimmed.min(levels.len()));
        }

        let count = self.glyph_count();
        if self.levels.as_ref().is_some_and(|levels| levels.len() == count) {
            return;
        }

        let text: String = self
            .children
            .iter()
            .filter_map(ContentItem::as_text)
            .flat_map(|run| run.glyphs().iter().map(|glyph| glyph.c))
            .collect();
        self.levels = Some(engine.bidi.levels(&text, base));
    }
}
