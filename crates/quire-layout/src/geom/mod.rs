//! Geometrical primitives.

mod abs;
mod length;
mod rect;

pub use self::abs::Abs;
pub use self::length::Length;
pub use self::rect::Rect;
