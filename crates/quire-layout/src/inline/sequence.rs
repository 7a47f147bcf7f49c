//! Wrapping of consecutive text runs as one unit.
//!
//! A line may only break inside a run or between two runs where the text
//! allows it. When the run that overflows has no such opportunity, the line
//! looks back through the runs it already placed for the last one that does.

use super::{LineMetrics, WidthTracker};
use crate::geom::Abs;
use crate::item::{ContentItem, ItemLayout, LayoutStatus};

/// The layouts of a sequence of adjacent text runs of one class.
///
/// Runs with special-script glyphs and plain runs are tracked in separate
/// sequences, since their break opportunities come from different places.
#[derive(Debug, Clone)]
pub(super) struct TextSequence {
    special: bool,
    start: usize,
    results: Vec<ItemLayout>,
    metrics: Vec<LineMetrics>,
}

/// A run to break the line at, found by looking back.
#[derive(Debug, Clone)]
pub(super) struct Fitting {
    /// The index of the run.
    pub index: usize,
    /// The layout to use for it.
    pub result: ItemLayout,
}

impl TextSequence {
    /// An empty sequence of the given class.
    pub fn new(special: bool) -> Self {
        Self { special, start: 0, results: Vec::new(), metrics: Vec::new() }
    }

    /// Whether the item belongs into this sequence.
    pub fn accepts(&self, item: &ContentItem) -> bool {
        item.as_text()
            .is_some_and(|run| run.contains_special_script() == self.special)
    }

    /// The index of the sequence's first run, if the sequence is not empty.
    pub fn start(&self) -> Option<usize> {
        (!self.results.is_empty()).then_some(self.start)
    }

    /// End the sequence if the item does not continue it.
    ///
    /// Returns whether a sequence ended.
    pub fn end_unless_continued(&mut self, item: Option<&ContentItem>) -> bool {
        if item.is_some_and(|item| self.accepts(item)) || self.results.is_empty() {
            return false;
        }
        self.results.clear();
        self.metrics.clear();
        true
    }

    /// Record the layout of the run at `pos` together with the line's metrics
    /// before it was placed. A repeated layout replaces the earlier one.
    pub fn record(
        &mut self,
        pos: usize,
        item: &ContentItem,
        result: &ItemLayout,
        metrics: LineMetrics,
    ) {
        if !self.accepts(item) {
            return;
        }
        if self.results.is_empty() {
            self.start = pos;
        }
        let offset = pos - self.start;
        if offset < self.results.len() {
            self.results.truncate(offset);
            self.metrics.truncate(offset);
        }
        self.results.push(result.clone());
        self.metrics.push(metrics);
    }

    /// The total width of the recorded layouts in `from..to`.
    pub fn width_between(&self, from: usize, to: usize) -> Abs {
        self.results[from - self.start..to - self.start]
            .iter()
            .map(ItemLayout::width)
            .sum()
    }

    /// The line's metrics before the run at `pos` was placed.
    pub fn metrics_before(&self, pos: usize) -> Option<LineMetrics> {
        self.metrics.get(pos.checked_sub(self.start)?).copied()
    }

    /// Find the last run of the sequence, up to and including `pos`, after
    /// which the line may break.
    ///
    /// The run at `pos` qualifies if it broke at one of its own
    /// opportunities. An earlier run qualifies if the line may break right
    /// after it, or if it has an opportunity inside.
    ///
    /// When no run qualifies but other content precedes the sequence, the
    /// whole sequence moves to the next line.
    pub fn find_last_fitting(
        &self,
        children: &[ContentItem],
        pos: usize,
        current: &ItemLayout,
        placed_before: bool,
    ) -> Option<Fitting> {
        let start = self.start()?;
        if current.status == LayoutStatus::Partial && !current.word_split {
            return Some(Fitting { index: pos, result: current.clone() });
        }

        for index in (start..pos).rev() {
            let Some(run) = children[index].as_text() else { continue };
            let next_starts_with_space = children
                .get(index + 1)
                .and_then(ContentItem::as_text)
                .is_some_and(|next| next.starts_with_whitespace());

            if run.ends_with_break() || next_starts_with_space {
                let result = self.results[index - start].clone();
                return Some(Fitting { index, result });
            }

            if let Some(result) = run.split_at_last_break() {
                return Some(Fitting { index, result });
            }
        }

        placed_before.then(|| Fitting {
            index: start,
            result: ItemLayout::nothing(children[start].clone()),
        })
    }
}

/// Tracks words that span several runs, so that the line's minimum width
/// accounts for them as a whole.
#[derive(Debug, Default, Copy, Clone)]
pub(super) struct SequenceMinWidth {
    glue: Abs,
}

impl SequenceMinWidth {
    /// Account for a placed run.
    pub fn update(&mut self, item: &ContentItem, tracker: &mut WidthTracker) {
        let Some(run) = item.as_text() else { return };
        let words = run.words();
        if words.has_break {
            tracker.update_min(self.glue + words.leading);
            self.glue = words.trailing;
        } else {
            self.glue += words.leading;
        }
    }

    /// Account for the end of the sequence.
    pub fn finish(&mut self, tracker: &mut WidthTracker) {
        if !self.glue.approx_empty() {
            tracker.update_min(self.glue);
        }
        self.glue = Abs::zero();
    }
}
