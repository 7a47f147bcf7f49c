/// Give a newtype over [`Scalar`](crate::Scalar) the arithmetic of a length.
///
/// Lengths add and subtract with each other, scale by `f64`, take remainders
/// and sum. Every result goes back through `Scalar`, so NaN stays out.
#[macro_export]
macro_rules! scalar_newtype_ops {
    ($ty:ident) => {
        impl std::ops::Neg for $ty {
            type Output = Self;

            fn neg(self) -> Self {
                Self(-self.0)
            }
        }

        impl std::ops::Add for $ty {
            type Output = Self;

            fn add(self, other: Self) -> Self {
                Self(self.0 + other.0)
            }
        }

        impl std::ops::Sub for $ty {
            type Output = Self;

            fn sub(self, other: Self) -> Self {
                Self(self.0 - other.0)
            }
        }

        impl std::ops::Rem for $ty {
            type Output = Self;

            fn rem(self, other: Self) -> Self {
                Self(self.0 % other.0)
            }
        }

        impl std::ops::Mul<f64> for $ty {
            type Output = Self;

            fn mul(self, factor: f64) -> Self {
                Self(self.0 * factor)
            }
        }

        impl std::ops::Div<f64> for $ty {
            type Output = Self;

            fn div(self, divisor: f64) -> Self {
                Self(self.0 / divisor)
            }
        }

        impl std::ops::AddAssign for $ty {
            fn add_assign(&mut self, other: Self) {
                self.0 += other.0;
            }
        }

        impl std::ops::SubAssign for $ty {
            fn sub_assign(&mut self, other: Self) {
                self.0 -= other.0;
            }
        }

        impl std::ops::MulAssign<f64> for $ty {
            fn mul_assign(&mut self, factor: f64) {
                *self = *self * factor;
            }
        }

        impl std::ops::DivAssign<f64> for $ty {
            fn div_assign(&mut self, divisor: f64) {
                *self = *self / divisor;
            }
        }

        impl std::iter::Sum for $ty {
            fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
                Self(iter.map(|v| v.0).sum())
            }
        }

        impl<'a> std::iter::Sum<&'a $ty> for $ty {
            fn sum<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
                iter.copied().sum()
            }
        }
    };
}
