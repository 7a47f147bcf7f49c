use std::fmt::{self, Debug, Formatter};
use std::ops::Div;

use quire_utils::Scalar;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A length in points.
///
/// Arithmetic never produces NaN: anything undefined comes out as zero.
#[derive(Default, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Abs(Scalar);

quire_utils::scalar_newtype_ops!(Abs);

impl Abs {
    /// Tolerance for [`fits`](Self::fits) and the `approx_*` checks.
    pub const EPS: f64 = 1e-4;

    pub const fn zero() -> Self {
        Self(Scalar::ZERO)
    }

    pub const fn pt(pt: f64) -> Self {
        Self(Scalar::new(pt))
    }

    pub const fn to_pt(self) -> f64 {
        self.0.get()
    }

    pub fn abs(self) -> Self {
        Self::pt(self.to_pt().abs())
    }

    pub fn min(self, other: Self) -> Self {
        Self(self.0.min(other.0))
    }

    pub fn max(self, other: Self) -> Self {
        Self(self.0.max(other.0))
    }

    /// Lower `self` to `other` if that is smaller.
    pub fn set_min(&mut self, other: Self) {
        self.0 = self.0.min(other.0);
    }

    /// Raise `self` to `other` if that is larger.
    pub fn set_max(&mut self, other: Self) {
        self.0 = self.0.max(other.0);
    }

    /// Whether something `other` wide fits into `self`, up to [`EPS`](Self::EPS).
    pub fn fits(self, other: Self) -> bool {
        self.to_pt() + Self::EPS >= other.to_pt()
    }

    /// Whether the two lengths differ by less than [`EPS`](Self::EPS).
    pub fn approx_eq(self, other: Self) -> bool {
        self == other || (self - other).to_pt().abs() < Self::EPS
    }

    /// Whether nothing of positive size is left.
    pub fn approx_empty(self) -> bool {
        self.to_pt() <= Self::EPS
    }
}

impl Debug for Abs {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{:?}pt", self.to_pt())
    }
}

/// The ratio of two lengths.
impl Div for Abs {
    type Output = f64;

    fn div(self, other: Self) -> f64 {
        self.to_pt() / other.to_pt()
    }
}

impl Serialize for Abs {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_pt().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Abs {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        f64::deserialize(deserializer).map(Self::pt)
    }
}
