//! The shaping collaborator.
//!
//! The layouter never looks at font data. Everything it needs to know about
//! a run of text (advances, vertical metrics and, for scripts without
//! visible word boundaries, the cluster boundaries at which it may break) is
//! produced by a [`Shaper`].

use unicode_segmentation::UnicodeSegmentation;

use crate::geom::Abs;
use crate::item::{TextStyle, is_combining_mark, is_special_script};

/// Turns text into glyphs with advances and metrics.
pub trait Shaper {
    /// Shape a piece of text.
    ///
    /// Implementations must produce exactly one glyph per `char` of `text`,
    /// in logical order, so that glyph indices and char indices coincide.
    fn shape(&self, text: &str, style: &TextStyle) -> ShapedRun;
}

/// The output of a [`Shaper`].
#[derive(Debug, Clone, PartialEq)]
pub struct ShapedRun {
    /// The glyphs in logical order.
    pub glyphs: Vec<Glyph>,
    /// The distance from the baseline to the top of the run.
    pub ascent: Abs,
    /// The signed distance from the baseline to the bottom of the run
    /// (negative below the baseline).
    pub descent: Abs,
    /// Glyph indices before which a break is permitted. Only present for runs
    /// that contain special-script glyphs.
    pub cluster_breaks: Option<Vec<usize>>,
}

/// A single shaped glyph.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Glyph {
    /// The character the glyph was shaped from.
    pub c: char,
    /// The horizontal advance.
    pub advance: Abs,
}

impl Glyph {
    /// Whether this glyph is a space that may stretch during justification.
    pub fn is_space(&self) -> bool {
        self.c == ' '
    }

    /// Whether this glyph is whitespace that is trimmed at line edges.
    pub fn is_whitespace(&self) -> bool {
        self.c.is_whitespace()
    }

    /// Whether this glyph is a hard line break.
    pub fn is_newline(&self) -> bool {
        matches!(self.c, '\n' | '\u{2028}' | '\u{2029}')
    }
}

/// A shaper that advances every glyph by the same fraction of the font size.
///
/// Line breaks and combining marks do not advance. Ascent and descent are
/// `0.8em` and `-0.2em`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct MonospaceShaper {
    /// The advance of every glyph, in em.
    pub advance: f64,
}

impl MonospaceShaper {
    /// Create a shaper with the given per-glyph advance in em.
    pub fn new(advance: f64) -> Self {
        Self { advance }
    }
}

impl Default for MonospaceShaper {
    fn default() -> Self {
        Self::new(0.5)
    }
}

impl Shaper for MonospaceShaper {
    fn shape(&self, text: &str, style: &TextStyle) -> ShapedRun {
        let advance = style.font_size * self.advance;
        let glyphs = text
            .chars()
            .map(|c| {
                let glyph = Glyph { c, advance: Abs::zero() };
                if glyph.is_newline() || is_combining_mark(c) {
                    glyph
                } else {
                    Glyph { c, advance }
                }
            })
            .collect();

        ShapedRun {
            glyphs,
            ascent: style.font_size * 0.8,
            descent: style.font_size * -0.2,
            cluster_breaks: text
                .chars()
                .any(is_special_script)
                .then(|| grapheme_starts(text)),
        }
    }
}

/// The char indices at which grapheme clusters start, excluding the first.
pub fn grapheme_starts(text: &str) -> Vec<usize> {
    let mut starts = Vec::new();
    let mut index = 0;
    for grapheme in text.graphemes(true) {
        if index > 0 {
            starts.push(index);
        }
        index += grapheme.chars().count();
    }
    starts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_monospace_advances() {
        let style = TextStyle { font_size: Abs::pt(10.0), ..TextStyle::default() };
        let run = MonospaceShaper::new(1.0).shape("ab\n", &style);
        let advances: Vec<_> = run.glyphs.iter().map(|g| g.advance).collect();
        assert_eq!(advances, [Abs::pt(10.0), Abs::pt(10.0), Abs::zero()]);
        assert_eq!(run.ascent, Abs::pt(8.0));
        assert_eq!(run.descent, Abs::pt(-2.0));
        assert_eq!(run.cluster_breaks, None);
    }

    #[test]
    fn test_special_script_clusters() {
        // Thai: the vowel sign U+0E34 joins the first cluster.
        let style = TextStyle::default();
        let run = MonospaceShaper::default().shape("\u{0E01}\u{0E34}\u{0E21}", &style);
        assert_eq!(run.cluster_breaks, Some(vec![2]));
    }
}
