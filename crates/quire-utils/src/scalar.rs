use std::cmp::Ordering;
use std::fmt::{self, Debug, Formatter};
use std::hash::{Hash, Hasher};
use std::iter::Sum;
use std::ops::{Add, AddAssign, Div, Mul, Neg, Rem, Sub, SubAssign};

/// An `f64` that can be compared, ordered and hashed.
///
/// A NaN is replaced by zero whenever a scalar is built, including from the
/// result of arithmetic, so the total order never has to deal with one.
#[derive(Default, Copy, Clone)]
pub struct Scalar(f64);

impl Scalar {
    pub const ZERO: Self = Self(0.0);
    pub const ONE: Self = Self(1.0);
    pub const INFINITY: Self = Self(f64::INFINITY);

    /// Wrap a float, turning NaN into zero.
    pub const fn new(x: f64) -> Self {
        if x.is_nan() { Self::ZERO } else { Self(x) }
    }

    /// The wrapped float.
    pub const fn get(self) -> f64 {
        self.0
    }
}

impl Debug for Scalar {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        Debug::fmt(&self.0, f)
    }
}

impl PartialEq for Scalar {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Scalar {}

impl PartialEq<f64> for Scalar {
    fn eq(&self, other: &f64) -> bool {
        *self == Self::new(*other)
    }
}

impl PartialOrd for Scalar {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Scalar {
    fn cmp(&self, other: &Self) -> Ordering {
        // Neither side is NaN, so only the two zeros need care: they are equal.
        self.0.partial_cmp(&other.0).unwrap_or(Ordering::Equal)
    }
}

impl Hash for Scalar {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // Adding zero turns `-0.0` into `0.0`.
        (self.0 + 0.0).to_bits().hash(state);
    }
}

impl From<f64> for Scalar {
    fn from(x: f64) -> Self {
        Self::new(x)
    }
}

impl From<Scalar> for f64 {
    fn from(scalar: Scalar) -> Self {
        scalar.get()
    }
}

impl Neg for Scalar {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.0)
    }
}

/// Implement a binary operator and its assigning form for anything that
/// converts into a scalar.
macro_rules! scalar_op {
    ($op:ident::$f:ident, $assign:ident::$assign_f:ident, $sym:tt) => {
        impl<T: Into<Scalar>> $op<T> for Scalar {
            type Output = Self;

            fn $f(self, other: T) -> Self {
                Self::new(self.0 $sym other.into().0)
            }
        }

        impl<T: Into<Scalar>> $assign<T> for Scalar {
            fn $assign_f(&mut self, other: T) {
                *self = $op::$f(*self, other);
            }
        }
    };

    ($op:ident::$f:ident, $sym:tt) => {
        impl<T: Into<Scalar>> $op<T> for Scalar {
            type Output = Self;

            fn $f(self, other: T) -> Self {
                Self::new(self.0 $sym other.into().0)
            }
        }
    };
}

scalar_op!(Add::add, AddAssign::add_assign, +);
scalar_op!(Sub::sub, SubAssign::sub_assign, -);
scalar_op!(Mul::mul, *);
scalar_op!(Div::div, /);
scalar_op!(Rem::rem, %);

impl Sum for Scalar {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Self> for Scalar {
    fn sum<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
        iter.copied().sum()
    }
}
