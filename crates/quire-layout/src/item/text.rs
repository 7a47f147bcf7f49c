use std::ops::Range;

use ecow::{EcoString, EcoVec};
use quire_utils::SliceExt;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::{
    ContentItem, ItemLayout, MeasureContext, is_combining_mark, is_special_script,
    is_split_point,
};
use crate::config::Props;
use crate::geom::{Abs, Rect};
use crate::inline::MinMaxWidth;
use crate::shaping::{Glyph, Shaper};

/// The style of a text run.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct TextStyle {
    /// The font size.
    pub font_size: Abs,
    /// Extra space after every glyph.
    pub character_spacing: Abs,
    /// Extra space after every space glyph.
    pub word_spacing: Abs,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            font_size: Abs::pt(12.0),
            character_spacing: Abs::zero(),
            word_spacing: Abs::zero(),
        }
    }
}

/// A run of text in a single style.
///
/// The run is shaped once; afterwards, splitting and trimming only narrow the
/// range of glyphs it covers.
#[derive(Debug, Clone, PartialEq)]
pub struct TextRun {
    /// The text of the run.
    pub text: EcoString,
    /// The style the run is shaped and spaced with.
    pub style: TextStyle,
    /// The run's configuration.
    pub props: Props,
    glyphs: EcoVec<Glyph>,
    range: Range<usize>,
    shaped: bool,
    ascent: Abs,
    descent: Abs,
    cluster_breaks: Option<EcoVec<usize>>,
    justification: Option<(Abs, Abs)>,
    reversed: SmallVec<[(usize, usize); 2]>,
    occupied: Option<Rect>,
}

impl TextRun {
    /// Create an unshaped run.
    pub fn new(text: impl Into<EcoString>, style: TextStyle) -> Self {
        Self {
            text: text.into(),
            style,
            props: Props::default(),
            glyphs: EcoVec::new(),
            range: 0..0,
            shaped: false,
            ascent: Abs::zero(),
            descent: Abs::zero(),
            cluster_breaks: None,
            justification: None,
            reversed: SmallVec::new(),
            occupied: None,
        }
    }

    /// Attach a configuration.
    pub fn with_props(mut self, props: Props) -> Self {
        self.props = props;
        self
    }

    /// Shape the run if that did not happen yet.
    pub fn shape(&mut self, shaper: &dyn Shaper) {
        if self.shaped {
            return;
        }

        let shaped = shaper.shape(&self.text, &self.style);
        self.range = 0..shaped.glyphs.len();
        self.glyphs = shaped.glyphs.into_iter().collect();
        self.ascent = shaped.ascent;
        self.descent = shaped.descent;
        self.cluster_breaks = shaped.cluster_breaks.map(|breaks| breaks.into_iter().collect());
        self.shaped = true;
    }

    /// Whether the run was shaped.
    pub fn is_shaped(&self) -> bool {
        self.shaped
    }

    /// The glyphs the run currently covers.
    pub fn glyphs(&self) -> &[Glyph] {
        &self.glyphs[self.range.clone()]
    }

    /// The number of glyphs the run covers.
    pub fn len(&self) -> usize {
        self.range.len()
    }

    /// Whether the run covers no glyphs.
    pub fn is_empty(&self) -> bool {
        self.range.is_empty()
    }

    /// The ascent of the run's font.
    pub fn ascent(&self) -> Abs {
        self.ascent
    }

    /// The signed descent of the run's font.
    pub fn descent(&self) -> Abs {
        self.descent
    }

    /// The rectangle the run occupied in its last layout.
    pub fn occupied(&self) -> Option<Rect> {
        self.occupied
    }

    pub(super) fn occupied_mut(&mut self) -> &mut Option<Rect> {
        &mut self.occupied
    }

    /// Whether the run contains glyphs of a script without word separators.
    pub fn contains_special_script(&self) -> bool {
        if self.shaped {
            self.glyphs().iter().any(|g| is_special_script(g.c))
        } else {
            self.text.chars().any(is_special_script)
        }
    }

    /// The ranges of glyphs, relative to [`glyphs`](Self::glyphs), that a
    /// renderer draws in reverse order.
    pub fn reversed_ranges(&self) -> &[(usize, usize)] {
        &self.reversed
    }

    /// The advance of a glyph including character and word spacing.
    fn advance_of(&self, glyph: &Glyph) -> Abs {
        let (char_extra, word_extra) = self.justification.unwrap_or_default();
        let mut advance = glyph.advance + self.style.character_spacing + char_extra;
        if glyph.is_space() {
            advance += self.style.word_spacing + word_extra;
        }
        advance
    }

    /// The width of the glyphs the run covers.
    pub fn natural_width(&self) -> Abs {
        self.glyphs().iter().map(|g| self.advance_of(g)).sum()
    }

    /// Whether a line may break between the glyphs at `index` and
    /// `index + 1`, where `index` is an absolute glyph index.
    fn can_break_after(&self, index: usize) -> bool {
        match &self.cluster_breaks {
            Some(breaks) => {
                self.glyphs[index].is_whitespace() || breaks.contains(&(index + 1))
            }
            None => is_split_point(&self.glyphs, index),
        }
    }

    /// Whether the last glyph of the run allows a break after it.
    pub fn ends_with_break(&self) -> bool {
        !self.is_empty() && self.can_break_after(self.range.end - 1)
    }

    /// Whether the run begins with whitespace, so that a line may break right
    /// before it.
    pub fn starts_with_whitespace(&self) -> bool {
        self.glyphs().first().is_some_and(Glyph::is_whitespace)
    }

    /// Measure the run and place as much of it as fits into the area.
    pub fn layout(&mut self, ctx: &MeasureContext) -> ItemLayout {
        let area = ctx.area;
        let forced = self.props.forced_placement;
        let height = self.ascent - self.descent;

        if !forced && !self.is_empty() && !ctx.fits_height(height) {
            self.occupied = None;
            return ItemLayout::nothing(ContentItem::Text(self.clone()));
        }

        let mut width = Abs::zero();
        let mut last_break = None;
        let mut stop = Stop::End;
        for index in self.range.clone() {
            let glyph = self.glyphs[index];
            if glyph.is_newline() {
                stop = Stop::Newline(index + 1);
                break;
            }

            let advance = self.advance_of(&glyph);
            if !area.width.fits(width + advance) {
                stop = Stop::Overflow(index);
                break;
            }

            width += advance;
            if self.can_break_after(index) {
                last_break = Some(index + 1);
            }
        }

        let start = self.range.start;
        let end = self.range.end;
        match (stop, last_break) {
            (Stop::End, _) => self.place(area, start..end, false, false),
            (Stop::Newline(at), _) => self.place(area, start..at, false, true),
            (Stop::Overflow(at), _) if at > start && self.glyphs[at].is_whitespace() => {
                self.place(area, start..at, false, false)
            }
            (Stop::Overflow(_), Some(at)) => self.place(area, start..at, false, false),
            (Stop::Overflow(at), None) if !ctx.overflow_x.is_fit() => {
                // The word overflows until its end.
                let mut word_end = at;
                while word_end < end && !self.glyphs[word_end].is_newline() {
                    word_end += 1;
                    if self.can_break_after(word_end - 1) {
                        break;
                    }
                }
                self.place(area, start..word_end, false, false)
            }
            (Stop::Overflow(at), None) if at > start => {
                self.place(area, start..at, true, false)
            }
            (Stop::Overflow(_), None) if forced => {
                self.place(area, start..start + 1, true, false)
            }
            (Stop::Overflow(_), None) => {
                self.occupied = None;
                ItemLayout::nothing(ContentItem::Text(self.clone()))
            }
        }
    }

    /// Place the glyphs in `range` at the left of `area` and split off the
    /// rest.
    fn place(
        &mut self,
        area: Rect,
        range: Range<usize>,
        word_split: bool,
        forced_newline: bool,
    ) -> ItemLayout {
        let end = self.range.end;
        let mut placed = self.slice(range.clone());
        let height = self.ascent - self.descent;
        let rect = Rect::new(
            area.x,
            area.top() - height,
            placed.natural_width(),
            height,
        );
        placed.occupied = Some(rect);
        self.occupied = Some(rect);

        let min_max = placed.min_max_width();
        let mut result = if range.end >= end {
            ItemLayout::full(rect, min_max, self.ascent, self.descent)
        } else {
            let rest = self.slice(range.end..end);
            ItemLayout::partial(
                rect,
                ContentItem::Text(placed),
                ContentItem::Text(rest),
                min_max,
                self.ascent,
                self.descent,
            )
        };
        result.word_split = word_split;
        result.forced_newline = forced_newline;
        result
    }

    /// Split the run at its last break opportunity before its end, keeping
    /// the position it was placed at.
    ///
    /// Returns `None` if the run was not placed or has no inner break
    /// opportunity.
    pub fn split_at_last_break(&self) -> Option<ItemLayout> {
        let rect = self.occupied?;
        let start = self.range.start;
        let at = (start..self.range.end.saturating_sub(1))
            .rev()
            .find(|&index| self.can_break_after(index))?
            + 1;

        let mut placed = self.slice(start..at);
        let mut rest = self.slice(at..self.range.end);
        rest.occupied = None;
        let placed_rect = Rect { width: placed.natural_width(), ..rect };
        placed.occupied = Some(placed_rect);

        let min_max = placed.min_max_width();
        Some(ItemLayout::partial(
            placed_rect,
            ContentItem::Text(placed),
            ContentItem::Text(rest),
            min_max,
            self.ascent,
            self.descent,
        ))
    }

    /// A copy of the run that covers the given absolute glyph range.
    fn slice(&self, range: Range<usize>) -> Self {
        Self {
            range,
            reversed: SmallVec::new(),
            occupied: None,
            ..self.clone()
        }
    }

    /// A copy of the run that covers exactly the given glyphs, for visual
    /// reordering.
    pub fn with_glyphs(&self, glyphs: Vec<Glyph>, reversed: Vec<(usize, usize)>) -> Self {
        Self {
            range: 0..glyphs.len(),
            glyphs: glyphs.into_iter().collect(),
            cluster_breaks: None,
            reversed: reversed.into_iter().collect(),
            ..self.clone()
        }
    }

    /// Drop leading whitespace. Hard line breaks are kept.
    ///
    /// Returns the number of dropped glyphs.
    pub fn trim_first(&mut self) -> usize {
        let glyphs = self.glyphs();
        let kept = glyphs.trim_start_matches(|g| g.is_whitespace() && !g.is_newline());
        let trimmed = glyphs.len() - kept.len();
        self.range.start += trimmed;
        trimmed
    }

    /// Drop trailing whitespace. Hard line breaks are kept.
    ///
    /// Returns the width of the dropped glyphs.
    pub fn trim_last(&mut self) -> Abs {
        let glyphs = self.glyphs();
        let kept = glyphs.trim_end_matches(|g| g.is_whitespace() && !g.is_newline());
        let trimmed: Abs = glyphs[kept.len()..].iter().map(|g| self.advance_of(g)).sum();
        let count = glyphs.len() - kept.len();
        self.range.end -= count;
        if let Some(rect) = &mut self.occupied {
            rect.width -= trimmed;
        }
        trimmed
    }

    /// The number of space glyphs.
    pub fn number_of_spaces(&self) -> usize {
        self.glyphs().iter().filter(|g| g.is_space()).count()
    }

    /// The number of glyphs that are not combining marks.
    pub fn base_characters_count(&self) -> usize {
        self.glyphs().iter().filter(|g| !is_combining_mark(g.c)).count()
    }

    /// The offset from the start of the run to the first occurrence of the
    /// anchor character, if any.
    pub fn tab_anchor_position(&self, anchor: char) -> Option<Abs> {
        let mut offset = Abs::zero();
        for glyph in self.glyphs() {
            if glyph.c == anchor {
                return Some(offset);
            }
            offset += self.advance_of(glyph);
        }
        None
    }

    /// Distribute justification spacing over the run.
    pub fn set_justification(&mut self, character_spacing: Abs, word_spacing: Abs) {
        self.justification = Some((character_spacing, word_spacing));
    }

    /// The spacing set by the last justification, if any.
    pub fn justification(&self) -> Option<(Abs, Abs)> {
        self.justification
    }

    /// Remove spacing added by an earlier justification.
    pub fn clear_justification(&mut self) {
        self.justification = None;
    }

    /// The widest unbreakable piece and the full width of the run.
    pub fn min_max_width(&self) -> MinMaxWidth {
        let words = self.words();
        MinMaxWidth::new(words.widest, self.natural_width())
    }

    /// How the run's width divides into unbreakable pieces.
    pub fn words(&self) -> Words {
        let mut words = Words::default();
        let mut current = Abs::zero();
        for index in self.range.clone() {
            let glyph = &self.glyphs[index];
            if !glyph.is_whitespace() {
                current += self.advance_of(glyph);
            }
            if self.can_break_after(index) || glyph.is_newline() {
                if !words.has_break {
                    words.leading = current;
                }
                words.has_break = true;
                words.widest.set_max(current);
                current = Abs::zero();
            }
        }
        words.widest.set_max(current);
        if words.has_break {
            words.trailing = current;
        } else {
            words.leading = current;
        }
        words
    }
}

/// The unbreakable pieces of a text run.
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct Words {
    /// The widest piece.
    pub widest: Abs,
    /// The piece before the first break opportunity, or the whole run.
    pub leading: Abs,
    /// The piece after the last break opportunity.
    pub trailing: Abs,
    /// Whether the run has any break opportunity.
    pub has_break: bool,
}

/// Why measuring a run stopped.
enum Stop {
    End,
    Newline(usize),
    Overflow(usize),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Overflow;
    use crate::item::LayoutStatus;
    use crate::shaping::MonospaceShaper;

    fn run(text: &str) -> TextRun {
        let style = TextStyle { font_size: Abs::pt(10.0), ..TextStyle::default() };
        let mut run = TextRun::new(text, style);
        run.shape(&MonospaceShaper::new(1.0));
        run
    }

    fn ctx(width: f64) -> MeasureContext {
        MeasureContext::new(Rect::new(Abs::zero(), Abs::zero(), Abs::pt(width), Abs::pt(100.0)))
    }

    fn text_of(item: &Option<ContentItem>) -> String {
        let run = item.as_ref().and_then(ContentItem::as_text).unwrap();
        run.glyphs().iter().map(|g| g.c).collect()
    }

    #[test]
    fn test_text_fits() {
        let mut text = run("hello");
        let result = text.layout(&ctx(60.0));
        assert_eq!(result.status, LayoutStatus::Full);
        assert_eq!(result.width(), Abs::pt(50.0));
        assert_eq!(result.ascent, Abs::pt(8.0));
        assert_eq!(result.occupied.unwrap().top(), Abs::pt(100.0));
    }

    #[test]
    fn test_text_breaks_after_space() {
        let mut text = run("the cat sat");
        let result = text.layout(&ctx(65.0));
        assert_eq!(result.status, LayoutStatus::Partial);
        assert!(!result.word_split);
        assert_eq!(text_of(&result.split), "the ");
        assert_eq!(text_of(&result.overflow), "cat sat");
    }

    #[test]
    fn test_text_breaks_before_overflowing_space() {
        let mut text = run("abc def");
        let result = text.layout(&ctx(30.0));
        assert_eq!(text_of(&result.split), "abc");
        assert_eq!(text_of(&result.overflow), " def");
    }

    #[test]
    fn test_text_splits_word_when_fitting() {
        let mut text = run("abcdef");
        let result = text.layout(&ctx(35.0));
        assert_eq!(result.status, LayoutStatus::Partial);
        assert!(result.word_split);
        assert_eq!(text_of(&result.split), "abc");
    }

    #[test]
    fn test_text_overflows_visibly() {
        let mut text = run("abcdef gh");
        let mut ctx = ctx(35.0);
        ctx.overflow_x = Overflow::Visible;
        let result = text.layout(&ctx);
        assert!(!result.word_split);
        assert_eq!(text_of(&result.split), "abcdef ");
        assert_eq!(result.width(), Abs::pt(70.0));
    }

    #[test]
    fn test_text_nothing_fits() {
        let mut text = run("abc");
        let result = text.layout(&ctx(5.0));
        assert_eq!(result.status, LayoutStatus::Nothing);
        assert!(result.overflow.is_some());
    }

    #[test]
    fn test_text_newline() {
        let mut text = run("ab\ncd");
        let result = text.layout(&ctx(100.0));
        assert_eq!(result.status, LayoutStatus::Partial);
        assert!(result.forced_newline);
        assert_eq!(text_of(&result.split), "ab\n");
        assert_eq!(result.width(), Abs::pt(20.0));
        assert_eq!(text_of(&result.overflow), "cd");
    }

    #[test]
    fn test_text_trim() {
        let mut text = run("  ab  ");
        assert_eq!(text.trim_first(), 2);
        text.layout(&ctx(100.0));
        assert_eq!(text.trim_last(), Abs::pt(20.0));
        assert_eq!(text.occupied().unwrap().width, Abs::pt(20.0));
        assert_eq!(text.len(), 2);
    }

    #[test]
    fn test_text_split_at_last_break() {
        let mut text = run("ab cd ef");
        text.layout(&ctx(100.0));
        let result = text.split_at_last_break().unwrap();
        assert_eq!(text_of(&result.split), "ab cd ");
        assert_eq!(text_of(&result.overflow), "ef");
        assert!(run("abc").split_at_last_break().is_none());
    }

    #[test]
    fn test_text_words() {
        let words = run("ab cdef g").words();
        assert_eq!(words.widest, Abs::pt(40.0));
        assert_eq!(words.leading, Abs::pt(20.0));
        assert_eq!(words.trailing, Abs::pt(10.0));
        assert!(words.has_break);
        assert!(!run("abc").words().has_break);
    }

    #[test]
    fn test_text_anchor_and_counts() {
        let text = run("12.50 x");
        assert_eq!(text.tab_anchor_position('.'), Some(Abs::pt(20.0)));
        assert_eq!(text.tab_anchor_position(','), None);
        assert_eq!(text.number_of_spaces(), 1);
        assert_eq!(run("e\u{301}").base_characters_count(), 1);
    }

    #[test]
    fn test_text_special_script_breaks_at_clusters() {
        let mut text = run("\u{0e01}\u{0e34}\u{0e21}\u{0e32}");
        assert!(text.contains_special_script());
        // Clusters: [0, 1], [2], [3]; each base glyph is 10pt wide.
        let result = text.layout(&ctx(15.0));
        assert_eq!(result.status, LayoutStatus::Partial);
        assert!(!result.word_split);
        assert_eq!(result.split.as_ref().and_then(ContentItem::as_text).unwrap().len(), 2);
    }
}
