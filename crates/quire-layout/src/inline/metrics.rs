use crate::config::{Leading, LeadingKind, Strut};
use crate::geom::Abs;

/// The extreme ascents and descents of a line.
///
/// Descents are signed and grow downwards, so the "maximum" descent is the
/// smallest value.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct LineMetrics {
    /// The ascent over all children.
    pub max_ascent: Abs,
    /// The descent over all children.
    pub max_descent: Abs,
    /// The ascent over text children only.
    pub max_text_ascent: Abs,
    /// The descent over text children only.
    pub max_text_descent: Abs,
    /// The ascent over non-text children.
    pub max_block_ascent: Abs,
    /// The descent over non-text children.
    pub max_block_descent: Abs,
}

impl LineMetrics {
    /// Metrics of a line that holds nothing yet.
    ///
    /// A strut, if given, is the floor of the line's ascent and descent.
    pub fn new(strut: Option<Strut>) -> Self {
        let (ascent, descent) = strut.map_or((Abs::zero(), Abs::zero()), |strut| {
            (strut.ascent, strut.descent)
        });
        Self {
            max_ascent: ascent,
            max_descent: descent,
            max_text_ascent: Abs::zero(),
            max_text_descent: Abs::zero(),
            max_block_ascent: Abs::pt(-1e20),
            max_block_descent: Abs::pt(1e20),
        }
    }

    /// Account for a placed child.
    pub fn update(&mut self, ascent: Abs, descent: Abs, is_text: bool) {
        self.max_ascent.set_max(ascent);
        self.max_descent.set_min(descent);
        if is_text {
            self.max_text_ascent.set_max(ascent);
            self.max_text_descent.set_min(descent);
        } else {
            self.max_block_ascent.set_max(ascent);
            self.max_block_descent.set_min(descent);
        }
    }

    /// The height of the line.
    pub fn height(&self) -> Abs {
        self.max_ascent - self.max_descent
    }

    /// The height of the non-text children.
    fn block_height(&self) -> Abs {
        self.max_block_ascent - self.max_block_descent
    }

    /// The text ascent and descent that multiplied leading scales.
    ///
    /// A line without text metrics but with content falls back to the line's
    /// font size, unless it contains an image. The bottom indent does not
    /// require content for the fallback.
    fn text_metrics(&self, font_size: Abs, contains_image: bool, top: bool) -> (Abs, Abs) {
        let no_text = self.max_text_ascent == Abs::zero() && self.max_text_descent == Abs::zero();
        let has_content = !(self.max_ascent.abs() + self.max_descent.abs()).approx_empty();
        if no_text && (has_content || !top) && !contains_image {
            (font_size * 0.8, font_size * -0.2)
        } else {
            (self.max_text_ascent, self.max_text_descent)
        }
    }

    /// The distance between this line's baseline and the next one's.
    pub fn leading_value(&self, leading: Leading, font_size: Abs, contains_image: bool) -> Abs {
        match leading.kind {
            LeadingKind::Fixed => Abs::pt(leading.value).max(self.block_height()),
            LeadingKind::Multiplied => {
                self.top_leading_indent(leading, self.height(), font_size, contains_image)
                    + self.bottom_leading_indent(
                        leading,
                        self.height(),
                        font_size,
                        contains_image,
                    )
            }
        }
    }

    /// The space added above a line of the given occupied height.
    pub fn top_leading_indent(
        &self,
        leading: Leading,
        occupied_height: Abs,
        font_size: Abs,
        contains_image: bool,
    ) -> Abs {
        match leading.kind {
            LeadingKind::Fixed => {
                (Abs::pt(leading.value).max(self.block_height()) - occupied_height) / 2.0
            }
            LeadingKind::Multiplied => {
                let (ascent, descent) = self.text_metrics(font_size, contains_image, true);
                let extra = (ascent - descent) * (leading.value - 1.0) / 2.0;
                (ascent + extra).max(self.max_block_ascent) - self.max_ascent
            }
        }
    }

    /// The space added below a line of the given occupied height.
    pub fn bottom_leading_indent(
        &self,
        leading: Leading,
        occupied_height: Abs,
        font_size: Abs,
        contains_image: bool,
    ) -> Abs {
        match leading.kind {
            LeadingKind::Fixed => {
                (Abs::pt(leading.value).max(self.block_height()) - occupied_height) / 2.0
            }
            LeadingKind::Multiplied => {
                let (ascent, descent) = self.text_metrics(font_size, contains_image, false);
                let extra = (ascent - descent) * (leading.value - 1.0) / 2.0;
                (-descent + extra).max(-self.max_block_descent) + self.max_descent
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text_line() -> LineMetrics {
        let mut metrics = LineMetrics::new(None);
        metrics.update(Abs::pt(8.0), Abs::pt(-2.0), true);
        metrics
    }

    #[test]
    fn test_metrics_track_extremes() {
        let mut metrics = text_line();
        metrics.update(Abs::pt(30.0), Abs::zero(), false);
        assert_eq!(metrics.max_ascent, Abs::pt(30.0));
        assert_eq!(metrics.max_descent, Abs::pt(-2.0));
        assert_eq!(metrics.max_text_ascent, Abs::pt(8.0));
        assert_eq!(metrics.height(), Abs::pt(32.0));
    }

    #[test]
    fn test_fixed_leading() {
        let metrics = text_line();
        let leading = Leading::fixed(14.0).unwrap();
        assert_eq!(metrics.leading_value(leading, Abs::pt(10.0), false), Abs::pt(14.0));
        let top = metrics.top_leading_indent(leading, Abs::pt(10.0), Abs::pt(10.0), false);
        assert_eq!(top, Abs::pt(2.0));
    }

    #[test]
    fn test_multiplied_leading() {
        let metrics = text_line();
        let leading = Leading::multiplied(1.5).unwrap();
        // Each side grows by a quarter of the text height.
        let value = metrics.leading_value(leading, Abs::pt(10.0), false);
        assert!(value.approx_eq(Abs::pt(5.0)));
    }

    #[test]
    fn test_multiplied_leading_falls_back_to_font_size() {
        let mut metrics = LineMetrics::new(None);
        metrics.update(Abs::pt(20.0), Abs::zero(), false);
        let leading = Leading::multiplied(1.0).unwrap();
        let top = metrics.top_leading_indent(leading, metrics.height(), Abs::pt(10.0), false);
        // The block is taller than the 8pt fallback ascent.
        assert_eq!(top, Abs::zero());
        let bottom =
            metrics.bottom_leading_indent(leading, metrics.height(), Abs::pt(10.0), false);
        assert!(bottom.approx_eq(Abs::pt(2.0)));
    }
}
