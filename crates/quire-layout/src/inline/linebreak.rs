//! Filling a single line with content.
//!
//! The [`Layouter`] walks the children of a line in logical order, measures
//! each in the space left on the line, and stops at the first child that
//! does not fit or ends in a hard line break. Tabs, floats and inline blocks
//! need special treatment along the way, and runs of text may move the
//! break back to an earlier opportunity.

use super::sequence::{SequenceMinWidth, TextSequence};
use super::tab::HangingTab;
use super::{
    FloatArea, FloatRegistry, Line, LineBox, LineLayoutResult, LineMetrics, LineRegion,
    MIN_MAX_EPS, MinMaxWidth, TabAlign, WidthTracker, adjust_line_on_float_placed,
    default_tab_width, hanging_tab_width, reorder_line,
};
use crate::config::{self, FloatSide, LineConfig, Overflow, RenderingMode};
use crate::diag::warning;
use crate::engine::Engine;
use crate::geom::{Abs, Length, Rect};
use crate::item::{ContentItem, ItemKind, ItemLayout, LayoutStatus, MeasureContext};

/// The child the line stopped at.
struct Stop {
    pos: usize,
    result: ItemLayout,
    force_overflow: bool,
    newline: bool,
}

/// The state of a line while it is being filled.
pub(super) struct Layouter<'a, 'e> {
    engine: &'a mut Engine<'e>,
    floats: &'a mut FloatRegistry,
    config: &'a LineConfig,
    region: &'a LineRegion,
    /// The children as they were handed in.
    input: &'a [ContentItem],
    /// The embedding levels of the input's glyphs, if the line is reordered.
    levels: Option<&'a [u8]>,
    /// A working copy of the children that records their placement.
    children: Vec<ContentItem>,
    /// The area left to the line's content after floats and indent.
    layout_box: Rect,
    /// The area the placed content covers.
    occupied: Rect,
    /// The width consumed so far.
    cur_width: Abs,
    metrics: LineMetrics,
    widths: WidthTracker,
    /// The overflow behavior currently in effect.
    overflow_x: Overflow,
    /// Whether `overflow_x` was switched to fit for the rest of the line.
    overflow_forced: bool,
    anything_placed: bool,
    floats_placed_before_line: bool,
    floats_placed_in_line: bool,
    float_overflowed_to_next_page: bool,
    /// Indices of floats deferred to the next line.
    floats_to_next_line: Vec<usize>,
    /// Floats that continue on the next page, with the part that stays on
    /// this line, if any.
    next_page_splits: Vec<(usize, Option<ContentItem>)>,
    floats_to_next_page: Vec<ContentItem>,
    hanging: Option<HangingTab>,
    plain: TextSequence,
    special: TextSequence,
    sequence_min: SequenceMinWidth,
    /// Whether a text sequence without break opportunity is being retried
    /// with the line's own overflow behavior.
    overflow_processing: bool,
    /// The child that is measured again in the next step.
    relayout: Option<usize>,
}

impl<'a, 'e> Layouter<'a, 'e> {
    pub fn new(
        engine: &'a mut Engine<'e>,
        line: &'a Line,
        levels: Option<&'a [u8]>,
        region: &'a LineRegion,
        floats: &'a mut FloatRegistry,
    ) -> Self {
        let config = &line.config;
        let mut layout_box = region.area;
        floats.adjust_line_area(&mut layout_box);
        let floats_placed_before_line = layout_box.width < region.area.width
            || layout_box.height < region.area.height;
        let overflow_x = if floats_placed_before_line { Overflow::Fit } else { config.overflow_x };

        if !region.text_indent.approx_empty() {
            layout_box.shrink_left(region.text_indent);
        }

        let browser = config.rendering_mode == RenderingMode::Browser
            && line
                .children
                .iter()
                .any(|child| config.rendering_mode_of(child.props()) == RenderingMode::Browser);
        let strut = if browser { config.strut } else { None };

        Self {
            engine,
            floats,
            config,
            region,
            input: &line.children,
            levels,
            children: line.children.clone(),
            occupied: Rect::from_top_left(layout_box.x, layout_box.top()),
            layout_box,
            cur_width: Abs::zero(),
            metrics: LineMetrics::new(strut),
            widths: WidthTracker::for_line(config.no_soft_wrap),
            overflow_x,
            overflow_forced: floats_placed_before_line,
            anything_placed: false,
            floats_placed_before_line,
            floats_placed_in_line: false,
            float_overflowed_to_next_page: region.float_overflowed_to_next_page,
            floats_to_next_line: Vec::new(),
            next_page_splits: Vec::new(),
            floats_to_next_page: Vec::new(),
            hanging: None,
            plain: TextSequence::new(false),
            special: TextSequence::new(true),
            sequence_min: SequenceMinWidth::default(),
            overflow_processing: false,
            relayout: None,
        }
    }

    /// Fill the line.
    pub fn run(mut self) -> LineLayoutResult {
        let count = self.children.len();
        let mut pos = 0;
        let mut stop = None;

        while pos < count {
            let mut bbox = self.bbox();
            let kind = self.children[pos].kind();

            let ended_plain = self.plain.end_unless_continued(Some(&self.children[pos]));
            let ended_special = self.special.end_unless_continued(Some(&self.children[pos]));
            if ended_plain || ended_special {
                self.finish_sequence();
            }

            match kind {
                ItemKind::Text => {
                    if let Some(run) = self.children[pos].as_text_mut() {
                        run.clear_justification();
                    }
                }
                ItemKind::Tab => {
                    if let Some(pending) = self.hanging.take() {
                        let width = self.lay_out_tab(pending.index, bbox);
                        self.cur_width += width;
                        self.widths.update_max(width);
                        bbox = self.bbox();
                    }

                    self.hanging = self.configure_tab(pos);
                    if pos + 1 == count {
                        self.hanging = None;
                    }
                    if self.hanging.is_some() {
                        pos += 1;
                        continue;
                    }
                }
                _ => {}
            }

            if let Some(hanging) = self.hanging
                && hanging.stop.align == TabAlign::Anchor
                && let Some(run) = self.children[pos].as_text_mut()
            {
                run.props.tab_anchor = hanging.stop.anchor;
            }

            let width = self.resolve_width(pos);
            let replaced = matches!(width, Some(Some(_)));

            if kind == ItemKind::Float {
                let stops_line = self.place_float(pos, width, replaced);
                pos += 1;
                if stops_line {
                    break;
                }
                continue;
            }

            let mut block_bounds = None;
            let mut fitted = None;
            if kind == ItemKind::Block && !replaced {
                let (result, bounds) = self.fit_block(pos, &mut bbox);
                fitted = result;
                block_bounds = Some(bounds);
            }

            let mut result = match fitted {
                Some(result) => result,
                None => {
                    self.prepare_overflow(pos, kind);
                    let ctx = self.measure_context(bbox, kind);
                    let result = self.measure(pos, &ctx, width);
                    let before = self.metrics;
                    self.plain.record(pos, &self.children[pos], &result, before);
                    self.special.record(pos, &self.children[pos], &result, before);
                    result
                }
            };
            if let Some(bounds) = block_bounds {
                result.min_max = bounds;
            }
            tracing::trace!(pos, ?kind, status = ?result.status, width = ?result.width());

            let mut min_child =
                if replaced { Abs::zero() } else { result.min_max.min_width() };
            let mut max_child = result.min_max.max_width();

            let newline = result.forced_newline;
            let mut should_break = result.status != LayoutStatus::Full || newline;
            let mut force_overflow = false;

            if should_break && kind == ItemKind::Text {
                let child = &self.children[pos];
                let special = child.is_special_text();
                let browser =
                    self.config.rendering_mode_of(child.props()) == RenderingMode::Browser;

                if result.word_split && !browser && !special {
                    force_overflow = self.avoid_word_split(pos);
                } else if (special || browser) && !newline && !self.overflow_processing {
                    let sequence = if special { &self.special } else { &self.plain };
                    let start = sequence.start().unwrap_or(pos);
                    let placed_before = self.floats_placed_before_line
                        || self.floats_placed_in_line
                        || self.children[..start]
                            .iter()
                            .any(|child| !child.is_floating() && child.occupied().is_some());

                    match sequence.find_last_fitting(&self.children, pos, &result, placed_before)
                    {
                        Some(fitting) => {
                            self.cur_width -= sequence.width_between(fitting.index, pos);
                            if let Some(metrics) = sequence.metrics_before(fitting.index) {
                                self.metrics = metrics;
                            }
                            tracing::debug!(from = pos, to = fitting.index, "moving line break back");
                            pos = fitting.index;
                            result = fitting.result;
                            min_child = result.min_max.min_width();
                            max_child = result.min_max.max_width();
                        }
                        None => {
                            tracing::debug!(pos, "retrying text without break opportunity");
                            self.overflow_processing = true;
                            self.relayout = Some(pos);
                            should_break = false;
                        }
                    }
                }
            }

            if self.relayout != Some(pos) {
                let kind = self.children[pos].kind();
                if !force_overflow && result.status != LayoutStatus::Nothing {
                    self.metrics.update(result.ascent, result.descent, kind == ItemKind::Text);
                }

                let indent =
                    if self.anything_placed { Abs::zero() } else { self.region.text_indent };
                let at_end = pos + 1 == count;
                let next_is_tab =
                    self.children.get(pos + 1).is_some_and(|next| next.kind() == ItemKind::Tab);

                match self.hanging {
                    Some(hanging) if hanging.resolves(should_break, at_end, next_is_tab) => {
                        let tab_width = self.resolve_hanging(hanging, pos, &mut result);
                        self.widths.update_min(min_child + indent);
                        self.widths.update_max(tab_width + max_child + indent);
                        self.hanging = None;
                    }
                    Some(_) => {}
                    None => {
                        self.cur_width += result.width();
                        self.widths.update_min(min_child + indent);
                        self.widths.update_max(max_child + indent);
                    }
                }

                if !force_overflow {
                    let height = self.metrics.height();
                    self.occupied = Rect::new(
                        self.layout_box.x,
                        self.layout_box.top() - height,
                        self.cur_width,
                        height,
                    );
                }

                if !self.config.no_soft_wrap && result.status != LayoutStatus::Nothing {
                    let piece = result.split.as_ref().unwrap_or(&self.children[pos]);
                    self.sequence_min.update(piece, &mut self.widths);
                }
            }

            if should_break {
                stop = Some(Stop { pos, result, force_overflow, newline });
                break;
            }

            if self.relayout == Some(pos) {
                self.relayout = None;
            } else {
                self.anything_placed = true;
                pos += 1;
            }
        }

        self.plain.end_unless_continued(None);
        self.special.end_unless_continued(None);
        self.finish_sequence();
        self.finish(stop, pos)
    }

    /// The area available to the next child.
    fn bbox(&self) -> Rect {
        Rect::new(
            self.layout_box.x + self.cur_width,
            self.layout_box.y,
            self.layout_box.width - self.cur_width,
            self.layout_box.height,
        )
    }

    fn context(&self, area: Rect) -> MeasureContext {
        MeasureContext {
            area,
            clipped_height: self.region.clipped_height,
            overflow_x: self.overflow_x,
        }
    }

    /// The context for measuring a non-floating child.
    fn measure_context(&self, area: Rect, kind: ItemKind) -> MeasureContext {
        let mut ctx = self.context(area);
        if self.overflow_processing && kind == ItemKind::Text {
            ctx.overflow_x = self.config.overflow_x;
        }
        ctx
    }

    /// Switch the rest of the line to fitting content into the line.
    fn force_fit(&mut self) {
        if !self.overflow_forced {
            self.overflow_forced = true;
            self.overflow_x = Overflow::Fit;
        }
    }

    /// Only the first child of a line may overflow it, unless it is text
    /// that has its own break rules.
    fn prepare_overflow(&mut self, pos: usize, kind: ItemKind) {
        let child = &self.children[pos];
        let special = child.is_special_text();
        let browser_text = kind == ItemKind::Text
            && !special
            && self.config.rendering_mode_of(child.props()) == RenderingMode::Browser;
        if !self.overflow_processing && (pos > 0 || special || browser_text) {
            self.force_fit();
        }
    }

    fn finish_sequence(&mut self) {
        if !self.config.no_soft_wrap {
            self.sequence_min.finish(&mut self.widths);
        }
    }

    /// Resolve a relative width against the line's full width.
    ///
    /// Returns the width to use while the child is measured, or `None` to
    /// leave the child's width alone.
    fn resolve_width(&mut self, pos: usize) -> Option<Option<Length>> {
        let width = self.children[pos].props().width?;
        if width.is_malformed() {
            self.engine.warn(warning!(
                "width {:?} cannot be resolved, using the natural width", width;
                hint: "relative widths must be finite and not negative"
            ));
            return Some(None);
        }

        match width {
            Length::Relative(_) => {
                width.resolve(self.region.area.width).map(|abs| Some(Length::Abs(abs)))
            }
            Length::Abs(_) => None,
        }
    }

    /// Measure a non-floating child, with its width temporarily replaced if
    /// requested.
    fn measure(
        &mut self,
        pos: usize,
        ctx: &MeasureContext,
        width: Option<Option<Length>>,
    ) -> ItemLayout {
        let child = &mut self.children[pos];
        match width {
            Some(width) => config::scoped(
                child,
                |item| &mut item.props_mut().width,
                width,
                |item| item.layout(ctx),
            ),
            None => child.layout(ctx),
        }
    }

    /// Set up the tab at `pos` for the next stop after the cursor.
    ///
    /// Returns the tab if its width depends on the content after it.
    fn configure_tab(&mut self, pos: usize) -> Option<HangingTab> {
        let cursor = self.cur_width;
        let min_height = self.metrics.height();
        let stop = self.config.tab_stops.next_after(cursor).copied();
        let remaining = self.layout_box.width - cursor;
        let ContentItem::Tab(tab) = &mut self.children[pos] else { return None };

        match stop {
            None => {
                let width = default_tab_width(cursor, self.config.tab_default, remaining);
                tab.configure(width, min_height, None);
                None
            }
            Some(stop) => {
                let width = if stop.align == TabAlign::Left {
                    (stop.position - cursor).min(remaining.max(Abs::zero()))
                } else {
                    stop.position - cursor
                };
                tab.configure(width, min_height, stop.leader);
                (stop.align != TabAlign::Left).then_some(HangingTab { index: pos, stop })
            }
        }
    }

    /// Place a tab at its configured width. Returns the width.
    fn lay_out_tab(&mut self, index: usize, area: Rect) -> Abs {
        let ctx = self.context(area);
        self.children[index].layout(&ctx).width()
    }

    /// Give a hanging tab its final width now that the content it aligns is
    /// measured, and move that content behind it.
    ///
    /// Returns the tab's width.
    fn resolve_hanging(&mut self, hanging: HangingTab, pos: usize, result: &mut ItemLayout) -> Abs {
        let first = hanging.index + 1;
        let mut widths: Vec<Abs> =
            (first..pos).map(|index| self.children[index].width()).collect();
        widths.push(result.width());
        let following: Abs = widths.iter().sum();

        let mut anchor = Abs::zero();
        if hanging.stop.align == TabAlign::Anchor {
            for (index, width) in (first..=pos).zip(&widths) {
                let item = match &result.split {
                    Some(split) if index == pos => split,
                    _ => &self.children[index],
                };
                let position = item.as_text().and_then(|run| {
                    run.props.tab_anchor.and_then(|anchor| run.tab_anchor_position(anchor))
                });
                if let Some(position) = position {
                    anchor += position;
                    break;
                }
                anchor += *width;
            }
        }

        let tab_width =
            hanging_tab_width(&hanging.stop, self.layout_box, self.cur_width, following, anchor);
        let min_height = self.metrics.height();
        if let ContentItem::Tab(tab) = &mut self.children[hanging.index] {
            tab.configure(tab_width, min_height, hanging.stop.leader);
        }
        let area = self.bbox();
        self.lay_out_tab(hanging.index, area);

        let mut offset = tab_width;
        for (index, width) in (first..pos).zip(&widths) {
            self.children[index].move_by(offset, Abs::zero());
            offset += *width;
        }
        self.children[pos].move_by(offset, Abs::zero());
        if let Some(split) = &mut result.split {
            split.move_by(offset, Abs::zero());
        }

        let advance = tab_width + following;
        let position = hanging.stop.position;
        if hanging.stop.align == TabAlign::Right && self.cur_width + advance < position {
            self.cur_width = position;
        } else {
            self.cur_width += advance;
        }

        tracing::debug!(index = hanging.index, width = ?tab_width, "resolved hanging tab");
        tab_width
    }

    /// Decide whether a word that was split to fit should rather move to the
    /// next line whole.
    ///
    /// That is the case if the word fits the full line without splitting.
    fn avoid_word_split(&mut self, pos: usize) -> bool {
        let mut probe = self.children[pos].clone();
        let ctx = MeasureContext {
            area: self.layout_box,
            clipped_height: self.region.clipped_height,
            overflow_x: self.config.overflow_x,
        };
        let avoid = !probe.layout(&ctx).word_split;
        if avoid {
            tracing::debug!(pos, "moving split word to the next line");
        }
        avoid
    }

    /// Size an inline block to the space left on the line.
    ///
    /// Returns a result if the block has to move to the next line without
    /// being measured, and the block's width bounds.
    fn fit_block(&mut self, pos: usize, bbox: &mut Rect) -> (Option<ItemLayout>, MinMaxWidth) {
        let bounds = self.children[pos].min_max_width();
        let with_eps = MinMaxWidth {
            children_min_width: bounds.children_min_width + MIN_MAX_EPS,
            children_max_width: bounds.children_max_width + MIN_MAX_EPS,
            ..bounds
        };

        let full = self.region.area.width - self.region.text_indent;
        if !self.config.no_soft_wrap
            && bounds.max_width() > bbox.width + MIN_MAX_EPS
            && !bbox.width.approx_eq(full)
        {
            return (Some(ItemLayout::nothing(self.input[pos].clone())), with_eps);
        }

        let mut width = (bounds.max_width() + MIN_MAX_EPS).min(full);
        if !self.overflow_x.is_fit() {
            width.set_max(bounds.min_width() + MIN_MAX_EPS);
        }
        bbox.width = width;

        if bounds.min_width() > width {
            self.engine.warn(warning!("inline block element will be clipped"));
            self.children[pos].props_mut().forced_placement = true;
        }
        (None, with_eps)
    }

    /// Place a float beside the line, or defer it.
    ///
    /// Returns whether the line has to stop because the float cannot be
    /// placed anywhere on this page.
    fn place_float(&mut self, pos: usize, width: Option<Option<Length>>, replaced: bool) -> bool {
        let bounds = self.children[pos].min_max_width();
        let bbox = self.bbox();
        if pos > 0 {
            self.force_fit();
        }

        let attempt = !self.float_overflowed_to_next_page
            && self.floats_to_next_line.is_empty()
            && (!self.anything_placed || bounds.max_width() <= bbox.width);

        let result = if attempt {
            let ctx = self.context(self.region.area);
            let floats = &mut *self.floats;
            let mut place = |item: &mut ContentItem| match item {
                ContentItem::Float(float) => float.place(&ctx, floats),
                other => other.layout(&ctx),
            };
            Some(match width {
                Some(width) => config::scoped(
                    &mut self.children[pos],
                    |item| &mut item.props_mut().width,
                    width,
                    place,
                ),
                None => place(&mut self.children[pos]),
            })
        } else {
            None
        };

        let (min, max) = match &result {
            Some(result) => (
                if replaced { Abs::zero() } else { result.min_max.min_width() },
                result.min_max.max_width(),
            ),
            None => (bounds.min_width(), bounds.max_width()),
        };
        self.widths.update_min(min + MIN_MAX_EPS);
        self.widths.update_max(max + MIN_MAX_EPS);

        let side = match &self.children[pos] {
            ContentItem::Float(float) => float.side,
            _ => FloatSide::Left,
        };

        match result {
            None if !self.float_overflowed_to_next_page => {
                tracing::debug!(pos, "deferring float to the next line");
                self.floats_to_next_line.push(pos);
                false
            }
            Some(result)
                if !self.float_overflowed_to_next_page
                    && result.status != LayoutStatus::Nothing =>
            {
                self.floats_placed_in_line = true;
                let rect = if result.status == LayoutStatus::Partial {
                    let rect = result.split.as_ref().and_then(ContentItem::occupied);
                    self.next_page_splits.push((pos, result.split));
                    self.floats_to_next_page.extend(result.overflow);
                    rect
                } else {
                    self.children[pos].occupied()
                };
                if let Some(rect) = rect {
                    adjust_line_on_float_placed(
                        &mut self.layout_box,
                        &mut self.occupied,
                        &mut self.children[..pos],
                        &FloatArea { rect, side },
                    );
                }
                false
            }
            result => {
                tracing::debug!(pos, "deferring float to the next page");
                self.next_page_splits.push((pos, None));
                self.floats_to_next_page.push(self.input[pos].clone());
                self.float_overflowed_to_next_page = true;
                !self.anything_placed
                    && result.is_some_and(|result| result.status == LayoutStatus::Nothing)
                    && self.floats.is_empty()
                    && self.region.first_on_root_area
            }
        }
    }

    /// The children placed before `end`, with deferred floats left out and
    /// floats split across pages replaced by the part that stays.
    fn split_children(&self, end: usize) -> Vec<ContentItem> {
        (0..end)
            .filter(|index| !self.floats_to_next_line.contains(index))
            .filter_map(|index| {
                match self.next_page_splits.iter().find(|(split, _)| *split == index) {
                    Some((_, piece)) => piece.clone(),
                    None => Some(self.children[index].clone()),
                }
            })
            .collect()
    }

    /// The floats deferred to the next line.
    fn deferred_floats(&self) -> Vec<ContentItem> {
        self.floats_to_next_line.iter().map(|&index| self.input[index].clone()).collect()
    }

    /// Assemble the result of the line.
    fn finish(mut self, stop: Option<Stop>, pos: usize) -> LineLayoutResult {
        let mut floats_to_next_page = std::mem::take(&mut self.floats_to_next_page);
        let (status, mut split, overflow, cause, newline) = match stop {
            Some(stop) => {
                let mut split = self.split_children(stop.pos);
                let mut overflow = self.deferred_floats();
                let is_block = self.children[stop.pos].kind() == ItemKind::Block;
                let status = stop.result.status;

                if stop.force_overflow || status == LayoutStatus::Nothing {
                    overflow.push(self.input[stop.pos].clone());
                } else {
                    let forced = self.config.forced_placement;
                    let first_on_root = is_block && self.region.first_on_root_area;
                    if status == LayoutStatus::Full
                        || !is_block
                        || forced
                        || first_on_root
                    {
                        let placed = stop.result.split.clone();
                        split.push(placed.unwrap_or_else(|| self.children[stop.pos].clone()));
                        self.anything_placed = true;
                    }

                    if let Some(rest) = stop.result.overflow {
                        if is_block && !forced && !first_on_root {
                            overflow.push(self.input[stop.pos].clone());
                        } else if matches!(&rest, ContentItem::Block(block) if block.is_empty())
                        {
                            self.engine.warn(warning!("inline block element will be clipped"));
                        } else {
                            overflow.push(rest);
                        }
                    }
                }
                overflow.extend(self.input[stop.pos + 1..].iter().cloned());

                let status = if overflow.is_empty() && floats_to_next_page.is_empty() {
                    LayoutStatus::Full
                } else if self.anything_placed || self.floats_placed_in_line {
                    LayoutStatus::Partial
                } else {
                    LayoutStatus::Nothing
                };
                (status, split, overflow, Some(stop.pos), stop.newline)
            }
            None => {
                let deferred =
                    !self.floats_to_next_line.is_empty() || !floats_to_next_page.is_empty();
                if !deferred {
                    (LayoutStatus::Full, self.split_children(pos), Vec::new(), None, false)
                } else if self.anything_placed || self.floats_placed_in_line {
                    let overflow = self.deferred_floats();
                    (LayoutStatus::Partial, self.split_children(pos), overflow, None, false)
                } else {
                    let cause = self
                        .floats_to_next_line
                        .first()
                        .or_else(|| self.next_page_splits.first().map(|(index, _)| index))
                        .copied();
                    floats_to_next_page.clear();
                    (LayoutStatus::Nothing, Vec::new(), self.input.to_vec(), cause, false)
                }
            }
        };

        let mut line_levels = None;
        let mut overflow_levels = None;
        if let Some(levels) = self.levels {
            if status == LayoutStatus::Nothing {
                overflow_levels = Some(levels.to_vec());
            } else {
                let count: usize =
                    split.iter().filter_map(ContentItem::as_text).map(|run| run.len()).sum();
                let count = count.min(levels.len());
                if let Some(reordered) = reorder_line(&split, &levels[..count], self.occupied.x) {
                    split = reordered;
                }
                line_levels = Some(levels[..count].to_vec());
                if !overflow.is_empty() && count < levels.len() {
                    overflow_levels = Some(levels[count..].to_vec());
                }
            }
        }

        let placed = status != LayoutStatus::Nothing;
        let line = placed.then(|| {
            let mut line = LineBox {
                children: split,
                occupied: self.occupied,
                metrics: self.metrics,
                levels: line_levels,
                spacing_ratio: self.config.spacing_ratio,
                font_size: self.config.font_size,
            };
            if self.anything_placed || self.floats_placed_in_line {
                line.adjust_children_y_line();
                line.trim_last();
            }
            line
        });

        let overflow = (!overflow.is_empty()).then(|| Line {
            children: overflow,
            config: self.config.clone(),
            levels: overflow_levels,
        });

        tracing::debug!(?status, width = ?self.cur_width, "laid out line");
        LineLayoutResult {
            status,
            occupied: line.as_ref().map(|line| line.occupied),
            line,
            overflow,
            cause_of_nothing: cause,
            split_forced_by_newline: newline,
            floats_to_next_page,
            float_overflowed_to_next_page: self.float_overflowed_to_next_page,
            min_max: self.widths.bounds(),
        }
    }
}
