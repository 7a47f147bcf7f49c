//! Quire's inline layout engine.
//!
//! A [`Line`] holds inline content (text runs, tabs, fixed-size leaves,
//! inline blocks and floats) in logical order. [`Line::layout`] fits as much
//! of it as possible into a [`LineRegion`], and returns the placed
//! [`LineBox`](inline::LineBox) together with the content that continues on
//! the next line.

pub mod config;
pub mod diag;
pub mod engine;
pub mod geom;
pub mod inline;
pub mod item;
pub mod shaping;

pub use self::engine::Engine;
pub use self::inline::{Line, LineLayoutResult, LineRegion};
