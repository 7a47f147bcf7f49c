use std::fmt::{self, Debug, Formatter};

use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};

use super::Abs;

/// A length that is either absolute or relative to the line's full width.
#[derive(Copy, Clone, PartialEq)]
pub enum Length {
    /// A fixed length.
    Abs(Abs),
    /// A fraction of the containing line's full constraint width, where `1.0`
    /// is 100%.
    Relative(f64),
}

impl Length {
    /// Resolve the length against the full width of the containing line.
    ///
    /// Returns `None` for relative values that cannot be resolved to a
    /// positive width.
    pub fn resolve(self, full: Abs) -> Option<Abs> {
        match self {
            Self::Abs(abs) => Some(abs),
            Self::Relative(ratio) if ratio.is_finite() && ratio >= 0.0 => {
                let resolved = full * ratio;
                (resolved > Abs::zero()).then_some(resolved)
            }
            Self::Relative(_) => None,
        }
    }

    /// Whether this is a relative length that can never resolve: a negative
    /// or non-finite percentage.
    pub fn is_malformed(self) -> bool {
        matches!(self, Self::Relative(ratio) if !ratio.is_finite() || ratio < 0.0)
    }
}

impl From<Abs> for Length {
    fn from(abs: Abs) -> Self {
        Self::Abs(abs)
    }
}

impl Debug for Length {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Self::Abs(abs) => abs.fmt(f),
            Self::Relative(ratio) => write!(f, "{}%", ratio * 100.0),
        }
    }
}

impl Serialize for Length {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Abs(abs) => abs.serialize(serializer),
            Self::Relative(ratio) => {
                serializer.serialize_str(&format!("{}%", ratio * 100.0))
            }
        }
    }
}

impl<'de> Deserialize<'de> for Length {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct LengthVisitor;

        impl Visitor<'_> for LengthVisitor {
            type Value = Length;

            fn expecting(&self, f: &mut Formatter) -> fmt::Result {
                f.write_str("a number of points or a percentage like \"50%\"")
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> Result<Length, E> {
                Ok(Length::Abs(Abs::pt(v)))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Length, E> {
                Ok(Length::Abs(Abs::pt(v as f64)))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Length, E> {
                Ok(Length::Abs(Abs::pt(v as f64)))
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Length, E> {
                let Some(number) = v.trim().strip_suffix('%') else {
                    return Err(E::invalid_value(de::Unexpected::Str(v), &self));
                };
                number
                    .trim()
                    .parse::<f64>()
                    .map(|percent| Length::Relative(percent / 100.0))
                    .map_err(|_| E::invalid_value(de::Unexpected::Str(v), &self))
            }
        }

        deserializer.deserialize_any(LengthVisitor)
    }
}
