//! Configuration of lines and content items.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::diag::{Hint, HintedStrResult, HintedString, StrResult, bail, eco_format};
use crate::geom::{Abs, Length};
use crate::inline::TabStops;

/// Configuration of a whole line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct LineConfig {
    /// The explicit tab stops of the line.
    pub tab_stops: TabStops,
    /// The interval of the implicit tab stops used when no explicit stop lies
    /// beyond the cursor.
    pub tab_default: Abs,
    /// How justification distributes free space: `1.0` puts everything into
    /// word spacing, `0.0` everything into character spacing.
    pub spacing_ratio: f64,
    /// Whether the line may never break between or inside its items.
    pub no_soft_wrap: bool,
    /// The base direction for bidi reordering. Without one, the last text run
    /// that carries a direction decides; without any, no reordering happens.
    pub base_direction: Option<BaseDirection>,
    /// How text breaking and vertical metrics behave.
    pub rendering_mode: RenderingMode,
    /// What happens to content wider than the line.
    pub overflow_x: Overflow,
    /// Whether content that does not fit is placed anyway.
    pub forced_placement: bool,
    /// The font size of the line itself, used as the leading fallback.
    pub font_size: Abs,
    /// The leading used when the caller spaces consecutive lines.
    pub leading: Option<Leading>,
    /// The line's own font metrics. In browser-compatible mode they seed the
    /// line's ascent and descent.
    pub strut: Option<Strut>,
}

impl LineConfig {
    /// Parse a line configuration from a TOML document.
    pub fn from_toml(src: &str) -> HintedStrResult<Self> {
        let config: Self = toml::from_str(src)
            .map_err(|err| {
                eco_format!("failed to parse line configuration ({})", err.message())
            })
            .hint("keys are kebab-case, for example `tab-default`")?;
        if let Some(leading) = config.leading {
            Leading::new(leading.kind, leading.value)?;
        }
        Ok(config)
    }

    /// The rendering mode of an item with the given properties.
    pub fn rendering_mode_of(&self, props: &Props) -> RenderingMode {
        props.rendering_mode.unwrap_or(self.rendering_mode)
    }
}

impl Default for LineConfig {
    fn default() -> Self {
        Self {
            tab_stops: TabStops::default(),
            tab_default: Abs::pt(50.0),
            spacing_ratio: 0.75,
            no_soft_wrap: false,
            base_direction: None,
            rendering_mode: RenderingMode::Legacy,
            overflow_x: Overflow::Fit,
            forced_placement: false,
            font_size: Abs::pt(12.0),
            leading: None,
            strut: None,
        }
    }
}

/// Configuration of a single content item.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Props {
    /// A fixed or relative width overriding the item's natural width.
    pub width: Option<Length>,
    /// The minimum height of the item.
    pub min_height: Option<Abs>,
    /// Overrides the line's rendering mode for this item.
    pub rendering_mode: Option<RenderingMode>,
    /// Whether the item is placed even if it does not fit.
    pub forced_placement: bool,
    /// The character an anchor tab aligns on. Set by the layouter while an
    /// anchor tab is pending.
    pub tab_anchor: Option<char>,
    /// The base direction this item asks for.
    pub base_direction: Option<BaseDirection>,
}

/// How text breaking and vertical metrics behave.
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RenderingMode {
    /// Words that do not fit are moved whole to the next line if they would
    /// fit there.
    #[default]
    Legacy,
    /// Text runs wrap like in a browser: a run sequence breaks at its last
    /// legal boundary and line metrics start from the line's strut.
    Browser,
}

/// What happens to content wider than the line.
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Overflow {
    /// Content must fit; text is split mid-word if necessary.
    #[default]
    Fit,
    /// Content may stick out of the line.
    Visible,
    /// Content may stick out of the line but is clipped when drawn.
    Hidden,
}

impl Overflow {
    /// Whether content must fit into the line.
    pub fn is_fit(self) -> bool {
        self == Self::Fit
    }
}

/// The base direction used for bidi reordering.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BaseDirection {
    /// Bidi processing is disabled.
    NoBidi,
    /// The direction is detected from the first strong character.
    DefaultBidi,
    /// Left to right.
    LeftToRight,
    /// Right to left.
    RightToLeft,
}

impl BaseDirection {
    /// The paragraph embedding level to start from, if fixed.
    pub fn level(self) -> Option<u8> {
        match self {
            Self::NoBidi | Self::DefaultBidi => None,
            Self::LeftToRight => Some(0),
            Self::RightToLeft => Some(1),
        }
    }
}

/// The side of the line a floating box attaches to.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FloatSide {
    /// The start side.
    Left,
    /// The end side.
    Right,
}

/// The vertical metrics of a line's own font.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Strut {
    /// The ascent above the baseline.
    pub ascent: Abs,
    /// The signed descent (negative below the baseline).
    pub descent: Abs,
}

/// How consecutive lines are spaced.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Leading {
    /// How `value` is interpreted.
    pub kind: LeadingKind,
    /// Points for fixed leading, a factor for multiplied leading.
    pub value: f64,
}

impl Leading {
    /// Create a leading, rejecting values that cannot place a line.
    pub fn new(kind: LeadingKind, value: f64) -> StrResult<Self> {
        if !value.is_finite() {
            bail!("leading value must be finite, found {}", value);
        }
        Ok(Self { kind, value })
    }

    /// A fixed leading of the given number of points.
    pub fn fixed(value: f64) -> StrResult<Self> {
        Self::new(LeadingKind::Fixed, value)
    }

    /// A leading of the given multiple of the line's text height.
    pub fn multiplied(value: f64) -> StrResult<Self> {
        Self::new(LeadingKind::Multiplied, value)
    }
}

/// How a [`Leading`] value is interpreted.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LeadingKind {
    /// An absolute distance between baselines.
    Fixed,
    /// A factor applied to the line's text height.
    Multiplied,
}

impl FromStr for LeadingKind {
    type Err = HintedString;

    fn from_str(s: &str) -> HintedStrResult<Self> {
        match s {
            "fixed" => Ok(Self::Fixed),
            "multiplied" => Ok(Self::Multiplied),
            _ => bail!(
                "unknown leading type `{}`", s;
                hint: "use `fixed` or `multiplied`"
            ),
        }
    }
}

/// Temporarily overrides a value inside `target` while `f` runs.
///
/// The previous value is put back once `f` returns, whatever path it took to
/// get there.
pub fn scoped<I, T, R>(
    target: &mut I,
    slot: fn(&mut I) -> &mut T,
    value: T,
    f: impl FnOnce(&mut I) -> R,
) -> R {
    let saved = std::mem::replace(slot(target), value);
    let output = f(target);
    *slot(target) = saved;
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inline::{TabAlign, TabStop};

    #[test]
    fn test_line_config_from_toml() {
        let config = LineConfig::from_toml(
            r#"
            tab-default = 36.0
            spacing-ratio = 0.5
            rendering-mode = "browser"
            base-direction = "right-to-left"
            leading = { kind = "multiplied", value = 1.5 }

            [[tab-stops]]
            position = 100.0
            align = "center"
            leader = "."
            "#,
        )
        .unwrap();

        assert_eq!(config.tab_default, Abs::pt(36.0));
        assert_eq!(config.rendering_mode, RenderingMode::Browser);
        assert_eq!(config.base_direction, Some(BaseDirection::RightToLeft));
        assert_eq!(config.leading, Some(Leading::multiplied(1.5).unwrap()));
        assert_eq!(
            config.tab_stops.next_after(Abs::zero()),
            Some(&TabStop {
                position: Abs::pt(100.0),
                align: TabAlign::Center,
                leader: Some('.'),
                anchor: None,
            })
        );
        assert_eq!(config.overflow_x, Overflow::Fit);
    }

    #[test]
    fn test_unknown_leading_type_is_fatal() {
        let err = LineConfig::from_toml("leading = { kind = \"double\", value = 2.0 }")
            .unwrap_err();
        assert!(err.message().starts_with("failed to parse line configuration"));
        assert_eq!(err.hints().len(), 1);
        let err = "double".parse::<LeadingKind>().unwrap_err();
        assert_eq!(err.message(), "unknown leading type `double`");
        assert_eq!(err.hints(), ["use `fixed` or `multiplied`"]);
        assert!(Leading::fixed(f64::INFINITY).is_err());
    }

    #[test]
    fn test_props_relative_width() {
        let props: Props = toml::from_str("width = \"50%\"\nforced-placement = true").unwrap();
        assert_eq!(props.width, Some(Length::Relative(0.5)));
        assert!(props.forced_placement);
    }

    #[test]
    fn test_scoped_restores() {
        let mut props = Props { width: Some(Length::Relative(0.5)), ..Props::default() };
        let seen = scoped(
            &mut props,
            |p| &mut p.width,
            Some(Length::Abs(Abs::pt(40.0))),
            |p| p.width,
        );
        assert_eq!(seen, Some(Length::Abs(Abs::pt(40.0))));
        assert_eq!(props.width, Some(Length::Relative(0.5)));
    }
}
