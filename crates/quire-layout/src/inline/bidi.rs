//! Visual reordering of bidirectional lines.

use quire_utils::SliceExt;
use unicode_bidi::{BidiInfo, Level};

use crate::config::BaseDirection;
use crate::geom::Abs;
use crate::item::{ContentItem, TextRun};
use crate::shaping::Glyph;

/// Computes bidi embedding levels.
pub trait BidiLevels {
    /// The embedding level of every `char` of `text`.
    fn levels(&self, text: &str, base: BaseDirection) -> Vec<u8>;
}

/// Embedding levels from the Unicode Bidirectional Algorithm.
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq, Hash)]
pub struct UnicodeBidiLevels;

impl BidiLevels for UnicodeBidiLevels {
    fn levels(&self, text: &str, base: BaseDirection) -> Vec<u8> {
        let level = base.level().and_then(|level| Level::new(level).ok());
        let info = BidiInfo::new(text, level);
        text.char_indices().map(|(i, _)| info.levels[i].number()).collect()
    }
}

/// A glyph of the line together with the child it belongs to.
#[derive(Debug, Copy, Clone)]
struct LineGlyph {
    glyph: Glyph,
    owner: usize,
}

/// Reorder the children of a laid out line into visual order.
///
/// Text runs are regrouped so that every child holds glyphs in visual order,
/// with spans a renderer draws reversed recorded on the run. Other children
/// follow the last non-empty run they came after, or lead the line if no
/// such run precedes them. Empty runs are dropped. Everything from the first hard line break on stays in logical
/// order.
///
/// The reordered children are placed one after another from `left`. Returns
/// `None` if the line is already in visual order.
pub fn reorder_line(
    children: &[ContentItem],
    levels: &[u8],
    left: Abs,
) -> Option<Vec<ContentItem>> {
    let mut glyphs = Vec::new();
    let mut insert_after = vec![Vec::new(); children.len()];
    let mut starters = Vec::new();
    let mut last_text = None;
    let mut tail = None;

    'children: for (i, child) in children.iter().enumerate() {
        match child {
            ContentItem::Text(run) => {
                for (j, &glyph) in run.glyphs().iter().enumerate() {
                    if glyph.is_newline() {
                        tail = Some((i, j));
                        break 'children;
                    }
                    glyphs.push(LineGlyph { glyph, owner: i });
                }
                // A run without glyphs never shows up in the visual order,
                // so nothing can follow it there.
                if !run.is_empty() {
                    last_text = Some(i);
                }
            }
            _ => match last_text {
                Some(text) => insert_after[text].push(i),
                None => starters.push(i),
            },
        }
    }

    let line_levels: Vec<Level> = (0..glyphs.len())
        .map(|i| levels.get(i).and_then(|&level| Level::new(level).ok()))
        .map(|level| level.unwrap_or_else(Level::ltr))
        .collect();
    let order = BidiInfo::reorder_visual(&line_levels);
    if order.iter().enumerate().all(|(visual, &logical)| visual == logical) {
        return None;
    }

    let mut output: Vec<ContentItem> =
        starters.iter().map(|&i| children[i].clone()).collect();
    let mut threaded = vec![false; children.len()];

    for (owner, group) in order.group_by_key(|&logical| glyphs[logical].owner) {
        let ContentItem::Text(run) = &children[owner] else { continue };

        let mut visual = Vec::with_capacity(group.len());
        let mut reversed = Vec::new();
        let mut span_start = None;
        for (q, &logical) in group.iter().enumerate() {
            let glyph = glyphs[logical].glyph;
            let continues = group.get(q + 1).is_some_and(|&next| {
                logical == next + 1
                    && !glyph.is_whitespace()
                    && !glyphs[next].glyph.is_whitespace()
            });
            if continues {
                span_start.get_or_insert(q);
            } else if let Some(start) = span_start.take() {
                reversed.push((start, q));
            }

            let level = line_levels[logical];
            visual.push(if level.is_rtl() { mirror(glyph) } else { glyph });
        }

        output.push(ContentItem::Text(run.with_glyphs(visual, reversed)));
        if !threaded[owner] {
            threaded[owner] = true;
            output.extend(insert_after[owner].iter().map(|&i| children[i].clone()));
        }
    }

    if let Some((owner, at)) = tail {
        if let ContentItem::Text(run) = &children[owner] {
            let rest = run.glyphs()[at..].to_vec();
            output.push(ContentItem::Text(run.with_glyphs(rest, vec![])));
        }
        output.extend(children[owner + 1..].iter().cloned());
    }

    let mut x = left;
    for child in output.iter_mut().filter(|child| !child.is_floating()) {
        if let Some(width) = child.as_text().map(TextRun::natural_width) {
            child.set_width(width);
        }
        let dx = x - child.occupied().map_or(x, |rect| rect.x);
        child.move_by(dx, Abs::zero());
        x += child.width();
    }

    Some(output)
}

/// The mirrored form of a glyph drawn right to left.
fn mirror(glyph: Glyph) -> Glyph {
    let c = match glyph.c {
        '(' => ')',
        ')' => '(',
        '[' => ']',
        ']' => '[',
        '{' => '}',
        '}' => '{',
        '<' => '>',
        '>' => '<',
        '«' => '»',
        '»' => '«',
        '‹' => '›',
        '›' => '‹',
        c => c,
    };
    Glyph { c, ..glyph }
}
