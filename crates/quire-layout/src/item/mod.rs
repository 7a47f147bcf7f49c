//! The content a line is built from.

mod block;
mod float;
mod leaf;
mod split;
mod tab;
mod text;

pub use self::block::InlineBlock;
pub use self::float::FloatBox;
pub use self::leaf::Leaf;
pub use self::split::{is_combining_mark, is_special_script, is_split_point};
pub use self::tab::TabItem;
pub use self::text::{TextRun, TextStyle};

use crate::config::{Overflow, Props};
use crate::geom::{Abs, Rect};
use crate::inline::{FloatRegistry, MinMaxWidth};

/// A piece of inline content.
#[derive(Debug, Clone, PartialEq)]
pub enum ContentItem {
    /// A run of text in a single style.
    Text(TextRun),
    /// A tab whose width is decided by the line.
    Tab(TabItem),
    /// A block that flows inline, like an inline table.
    Block(InlineBlock),
    /// A box that floats to one side of the line.
    Float(FloatBox),
    /// An atomic element such as an image.
    Leaf(Leaf),
}

/// The kind of a [`ContentItem`], for the places where layout branches on it.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ItemKind {
    Text,
    Tab,
    Block,
    Float,
    Leaf,
}

impl ContentItem {
    /// The kind of this item.
    pub fn kind(&self) -> ItemKind {
        match self {
            Self::Text(_) => ItemKind::Text,
            Self::Tab(_) => ItemKind::Tab,
            Self::Block(_) => ItemKind::Block,
            Self::Float(_) => ItemKind::Float,
            Self::Leaf(_) => ItemKind::Leaf,
        }
    }

    /// The item's configuration.
    pub fn props(&self) -> &Props {
        match self {
            Self::Text(run) => &run.props,
            Self::Tab(tab) => &tab.props,
            Self::Block(block) => &block.props,
            Self::Float(float) => &float.props,
            Self::Leaf(leaf) => &leaf.props,
        }
    }

    /// The item's configuration, mutably.
    pub fn props_mut(&mut self) -> &mut Props {
        match self {
            Self::Text(run) => &mut run.props,
            Self::Tab(tab) => &mut tab.props,
            Self::Block(block) => &mut block.props,
            Self::Float(float) => &mut float.props,
            Self::Leaf(leaf) => &mut leaf.props,
        }
    }

    /// Measure and place the item inside the context's area.
    ///
    /// A floating box placed this way ignores other floats; the layouter
    /// places floats through [`FloatBox::place`] instead.
    pub fn layout(&mut self, ctx: &MeasureContext) -> ItemLayout {
        match self {
            Self::Text(run) => run.layout(ctx),
            Self::Tab(tab) => tab.layout(ctx),
            Self::Block(block) => block.layout(ctx),
            Self::Float(float) => float.place(ctx, &mut FloatRegistry::new()),
            Self::Leaf(leaf) => leaf.layout(ctx),
        }
    }

    /// The rectangle the item occupied in its last layout.
    pub fn occupied(&self) -> Option<Rect> {
        match self {
            Self::Text(run) => run.occupied(),
            Self::Tab(tab) => tab.occupied,
            Self::Block(block) => block.occupied,
            Self::Float(float) => float.occupied,
            Self::Leaf(leaf) => leaf.occupied,
        }
    }

    /// The rectangle the item occupied in its last layout, mutably.
    fn occupied_mut(&mut self) -> &mut Option<Rect> {
        match self {
            Self::Text(run) => run.occupied_mut(),
            Self::Tab(tab) => &mut tab.occupied,
            Self::Block(block) => &mut block.occupied,
            Self::Float(float) => &mut float.occupied,
            Self::Leaf(leaf) => &mut leaf.occupied,
        }
    }

    /// The width the item occupied in its last layout.
    pub fn width(&self) -> Abs {
        self.occupied().map_or(Abs::zero(), |rect| rect.width)
    }

    /// Change the width of the placed item, keeping its left edge.
    pub fn set_width(&mut self, width: Abs) {
        if let Some(rect) = self.occupied_mut() {
            rect.width = width;
        }
    }

    /// Move the placed item.
    pub fn move_by(&mut self, dx: Abs, dy: Abs) {
        if let Some(rect) = self.occupied_mut() {
            rect.move_by(dx, dy);
        }
    }

    /// The narrowest and widest the item could be laid out at.
    pub fn min_max_width(&self) -> MinMaxWidth {
        match self {
            Self::Text(run) => run.min_max_width(),
            Self::Tab(tab) => MinMaxWidth::fixed(tab.width()),
            Self::Block(block) => block.min_max_width(),
            Self::Float(float) => MinMaxWidth::fixed(float.width()),
            Self::Leaf(leaf) => MinMaxWidth::fixed(leaf.width()),
        }
    }

    /// The distance from the bottom of the occupied rectangle up to the
    /// baseline the item sits on.
    pub fn baseline_offset(&self) -> Abs {
        match self {
            Self::Text(run) => -run.descent(),
            Self::Block(block) => block.baseline.unwrap_or_default(),
            Self::Tab(_) | Self::Float(_) | Self::Leaf(_) => Abs::zero(),
        }
    }

    /// The text run, if this is one.
    pub fn as_text(&self) -> Option<&TextRun> {
        match self {
            Self::Text(run) => Some(run),
            _ => None,
        }
    }

    /// The text run, mutably, if this is one.
    pub fn as_text_mut(&mut self) -> Option<&mut TextRun> {
        match self {
            Self::Text(run) => Some(run),
            _ => None,
        }
    }

    /// Whether the item floats beside the line.
    pub fn is_floating(&self) -> bool {
        matches!(self, Self::Float(_))
    }

    /// Whether the item is a text run containing special-script glyphs.
    pub fn is_special_text(&self) -> bool {
        self.as_text().is_some_and(TextRun::contains_special_script)
    }
}

impl From<TextRun> for ContentItem {
    fn from(run: TextRun) -> Self {
        Self::Text(run)
    }
}

impl From<TabItem> for ContentItem {
    fn from(tab: TabItem) -> Self {
        Self::Tab(tab)
    }
}

impl From<InlineBlock> for ContentItem {
    fn from(block: InlineBlock) -> Self {
        Self::Block(block)
    }
}

impl From<FloatBox> for ContentItem {
    fn from(float: FloatBox) -> Self {
        Self::Float(float)
    }
}

impl From<Leaf> for ContentItem {
    fn from(leaf: Leaf) -> Self {
        Self::Leaf(leaf)
    }
}

/// The region an item is measured in.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct MeasureContext {
    /// The area available to the item. Its left edge is where the item
    /// starts.
    pub area: Rect,
    /// Whether the area's height was already clipped by an ancestor, in which
    /// case items never fail for lack of height.
    pub clipped_height: bool,
    /// How content wider than the area is treated.
    pub overflow_x: Overflow,
}

impl MeasureContext {
    /// A context that lets items overflow nothing.
    pub fn new(area: Rect) -> Self {
        Self { area, clipped_height: false, overflow_x: Overflow::Fit }
    }

    /// Whether content of the given height fits the area.
    pub fn fits_height(&self, height: Abs) -> bool {
        self.clipped_height || self.area.height.fits(height)
    }
}

/// Whether an item fit into the area it was measured in.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum LayoutStatus {
    /// Everything was placed.
    Full,
    /// A part was placed, the rest overflows.
    Partial,
    /// Nothing was placed.
    Nothing,
}

/// The outcome of measuring a single item.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemLayout {
    /// Whether the item fit.
    pub status: LayoutStatus,
    /// The placed area. `None` if nothing was placed.
    pub occupied: Option<Rect>,
    /// The placed part of a partially placed item.
    pub split: Option<ContentItem>,
    /// What did not fit.
    pub overflow: Option<ContentItem>,
    /// The width bounds of the placed content.
    pub min_max: MinMaxWidth,
    /// The ascent of the placed content above its baseline.
    pub ascent: Abs,
    /// The signed descent of the placed content below its baseline.
    pub descent: Abs,
    /// Whether a word was broken in the middle to make it fit.
    pub word_split: bool,
    /// Whether the item ended at a hard line break.
    pub forced_newline: bool,
}

impl ItemLayout {
    /// A fully placed item.
    pub fn full(occupied: Rect, min_max: MinMaxWidth, ascent: Abs, descent: Abs) -> Self {
        Self {
            status: LayoutStatus::Full,
            occupied: Some(occupied),
            split: None,
            overflow: None,
            min_max,
            ascent,
            descent,
            word_split: false,
            forced_newline: false,
        }
    }

    /// A partially placed item.
    pub fn partial(
        occupied: Rect,
        split: ContentItem,
        overflow: ContentItem,
        min_max: MinMaxWidth,
        ascent: Abs,
        descent: Abs,
    ) -> Self {
        Self {
            status: LayoutStatus::Partial,
            split: Some(split),
            overflow: Some(overflow),
            ..Self::full(occupied, min_max, ascent, descent)
        }
    }

    /// An item of which nothing could be placed.
    pub fn nothing(overflow: ContentItem) -> Self {
        Self {
            status: LayoutStatus::Nothing,
            occupied: None,
            split: None,
            min_max: overflow.min_max_width(),
            overflow: Some(overflow),
            ascent: Abs::zero(),
            descent: Abs::zero(),
            word_split: false,
            forced_newline: false,
        }
    }

    /// The placed width.
    pub fn width(&self) -> Abs {
        self.occupied.map_or(Abs::zero(), |rect| rect.width)
    }

    /// Whether everything was placed.
    pub fn is_full(&self) -> bool {
        self.status == LayoutStatus::Full
    }
}
