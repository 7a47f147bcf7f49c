use super::LineMetrics;
use crate::config::Leading;
use crate::geom::{Abs, Rect};
use crate::item::{ContentItem, TextRun};

/// A laid out line.
#[derive(Debug, Clone, PartialEq)]
pub struct LineBox {
    /// The placed children in visual order.
    pub children: Vec<ContentItem>,
    /// The area the line occupies.
    pub occupied: Rect,
    /// The line's vertical metrics.
    pub metrics: LineMetrics,
    /// The embedding levels of the line's glyphs, if the line is
    /// bidirectional.
    pub levels: Option<Vec<u8>>,
    /// How justification distributes free space.
    pub spacing_ratio: f64,
    /// The font size of the line, used as the leading fallback.
    pub font_size: Abs,
}

impl LineBox {
    /// The baseline of the line.
    pub fn y_line(&self) -> Abs {
        self.occupied.y - self.metrics.max_descent
    }

    /// The ascent of the tallest child.
    pub fn max_ascent(&self) -> Abs {
        self.metrics.max_ascent
    }

    /// The descent of the deepest child.
    pub fn max_descent(&self) -> Abs {
        self.metrics.max_descent
    }

    /// Stretch the line to the given width by spacing out its text.
    ///
    /// Free space is split between word and character spacing by the
    /// line's spacing ratio. A line without non-floating children is left
    /// alone.
    pub fn justify(&mut self, width: Abs) {
        let Some(last) = self.children.iter().rposition(|c| !c.is_floating()) else {
            return;
        };

        let last_right = self.children[last].occupied().map_or(self.occupied.x, |r| r.right());
        let free = self.occupied.x + width - last_right;
        let ratio = self.spacing_ratio;
        let spaces = self.number_of_spaces() as f64;
        let chars = self.base_characters_count() as f64;

        let mut factor = free.to_pt() / (ratio * spaces + (1.0 - ratio) * (chars - 1.0));
        if !factor.is_finite() {
            factor = 0.0;
        }
        let word_spacing = Abs::pt(ratio * factor);
        let char_spacing = Abs::pt((1.0 - ratio) * factor);

        let mut right = self.occupied.x;
        for (i, child) in self.children.iter_mut().enumerate() {
            if child.is_floating() {
                continue;
            }

            let x = child.occupied().map_or(right, |rect| rect.x);
            child.move_by(right - x, Abs::zero());

            if let ContentItem::Text(run) = child {
                run.set_justification(char_spacing, word_spacing);
                let len = if i == last { run.len().saturating_sub(1) } else { run.len() };
                let growth =
                    char_spacing * len as f64 + word_spacing * run.number_of_spaces() as f64;
                child.set_width(child.width() + growth);
            }

            right += child.width();
        }

        self.occupied.width = width;
    }

    /// Drop trailing whitespace of the last non-floating child.
    pub fn trim_last(&mut self) {
        let last = self.children.iter_mut().rev().find(|child| !child.is_floating());
        if let Some(ContentItem::Text(run)) = last {
            let trimmed = run.trim_last();
            self.occupied.width -= trimmed;
        }
    }

    /// Move every child vertically so that it sits on the line's baseline.
    pub fn adjust_children_y_line(&mut self) {
        let baseline = self.occupied.top() - self.metrics.max_ascent;
        for child in self.children.iter_mut().filter(|child| !child.is_floating()) {
            let Some(rect) = child.occupied() else { continue };
            let dy = baseline - (rect.bottom() + child.baseline_offset());
            child.move_by(Abs::zero(), dy);
        }
    }

    /// Shift the line's content up, shrinking its area from the top.
    pub fn apply_leading(&mut self, dy: Abs) {
        self.occupied.move_up(dy);
        self.occupied.decrease_height(dy);
        for child in self.children.iter_mut().filter(|child| !child.is_floating()) {
            child.move_by(Abs::zero(), dy);
        }
    }

    /// The distance to the next line's baseline under the given leading.
    pub fn leading_value(&self, leading: Leading) -> Abs {
        self.metrics
            .leading_value(leading, self.font_size, self.contains_image())
    }

    /// The space the leading adds above the line.
    pub fn top_leading_indent(&self, leading: Leading) -> Abs {
        self.metrics.top_leading_indent(
            leading,
            self.occupied.height,
            self.font_size,
            self.contains_image(),
        )
    }

    /// The space the leading adds below the line.
    pub fn bottom_leading_indent(&self, leading: Leading) -> Abs {
        self.metrics.bottom_leading_indent(
            leading,
            self.occupied.height,
            self.font_size,
            self.contains_image(),
        )
    }

    /// The number of space glyphs on the line.
    pub fn number_of_spaces(&self) -> usize {
        self.text_runs().map(|run| run.number_of_spaces()).sum()
    }

    /// The number of non-mark glyphs on the line.
    pub fn base_characters_count(&self) -> usize {
        self.text_runs().map(|run| run.base_characters_count()).sum()
    }

    /// The number of glyphs on the line.
    pub fn length(&self) -> usize {
        self.text_runs().map(|run| run.len()).sum()
    }

    /// Whether the line holds an atomic element.
    pub fn contains_image(&self) -> bool {
        self.children.iter().any(|child| matches!(child, ContentItem::Leaf(_)))
    }

    fn text_runs(&self) -> impl Iterator<Item = &TextRun> {
        self.children
            .iter()
            .filter(|child| !child.is_floating())
            .filter_map(ContentItem::as_text)
    }
}
