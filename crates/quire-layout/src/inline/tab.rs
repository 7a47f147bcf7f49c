use serde::{Deserialize, Serialize};

use crate::geom::{Abs, Rect};

/// How content after a tab aligns to its stop.
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TabAlign {
    /// The following content starts at the stop.
    #[default]
    Left,
    /// The following content ends at the stop.
    Right,
    /// The following content is centered on the stop.
    Center,
    /// The anchor character of the following text sits at the stop.
    Anchor,
}

/// A tab stop.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct TabStop {
    /// The distance of the stop from the start of the line.
    pub position: Abs,
    /// How the following content aligns.
    #[serde(default)]
    pub align: TabAlign,
    /// The glyph that fills the space before the stop.
    #[serde(default)]
    pub leader: Option<char>,
    /// The character an anchor stop aligns on.
    #[serde(default)]
    pub anchor: Option<char>,
}

impl TabStop {
    /// A stop without leader.
    pub fn new(position: Abs, align: TabAlign) -> Self {
        Self { position, align, leader: None, anchor: None }
    }

    /// A stop that aligns the given character of the following text.
    pub fn anchored(position: Abs, anchor: char) -> Self {
        Self { anchor: Some(anchor), ..Self::new(position, TabAlign::Anchor) }
    }

    /// Attach a leader glyph.
    pub fn with_leader(mut self, leader: char) -> Self {
        self.leader = Some(leader);
        self
    }
}

/// The tab stops of a line, ordered by position.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<TabStop>", into = "Vec<TabStop>")]
pub struct TabStops(Vec<TabStop>);

impl TabStops {
    /// The first stop strictly after the given position.
    pub fn next_after(&self, position: Abs) -> Option<&TabStop> {
        let index = self.0.partition_point(|stop| stop.position <= position);
        self.0.get(index)
    }

    /// The stops in order.
    pub fn iter(&self) -> std::slice::Iter<'_, TabStop> {
        self.0.iter()
    }

    /// Whether there are no explicit stops.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<TabStop>> for TabStops {
    fn from(mut stops: Vec<TabStop>) -> Self {
        stops.sort_by_key(|stop| stop.position);
        Self(stops)
    }
}

impl From<TabStops> for Vec<TabStop> {
    fn from(stops: TabStops) -> Self {
        stops.0
    }
}

impl FromIterator<TabStop> for TabStops {
    fn from_iter<I: IntoIterator<Item = TabStop>>(iter: I) -> Self {
        iter.into_iter().collect::<Vec<_>>().into()
    }
}

/// The width of a tab that found no stop beyond the cursor: it runs to the
/// next multiple of the default interval, but never past the line's end.
pub fn default_tab_width(cursor: Abs, interval: Abs, remaining: Abs) -> Abs {
    if interval <= Abs::zero() {
        return Abs::zero();
    }
    (interval - cursor % interval).min(remaining.max(Abs::zero()))
}

/// The width of a tab once the content it aligns is known.
///
/// `following` is the width of the aligned content and `anchor` the offset of
/// the anchor character inside it. The tab never gets negative and never
/// pushes the aligned content past the end of the line.
pub fn hanging_tab_width(
    stop: &TabStop,
    layout_box: Rect,
    cursor: Abs,
    following: Abs,
    anchor: Abs,
) -> Abs {
    let free = stop.position - cursor;
    let width = match stop.align {
        TabAlign::Left => free,
        TabAlign::Right => free - following,
        TabAlign::Center => free - following / 2.0,
        TabAlign::Anchor => free - anchor,
    };

    let width = width.max(Abs::zero());
    if cursor + width + following > layout_box.width {
        (layout_box.width - cursor - following).max(Abs::zero())
    } else {
        width
    }
}

/// A tab whose width waits for the content after it.
#[derive(Debug, Copy, Clone, PartialEq)]
pub(super) struct HangingTab {
    /// The index of the tab item in the line.
    pub index: usize,
    /// The stop the tab resolves against.
    pub stop: TabStop,
}

impl HangingTab {
    /// Whether the content measured so far completes what this tab aligns.
    ///
    /// That is the case when the line stops, when the line's content runs
    /// out, or when another tab follows.
    pub fn resolves(&self, should_break: bool, at_end: bool, next_is_tab: bool) -> bool {
        should_break || at_end || next_is_tab
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(width: f64) -> Rect {
        Rect::new(Abs::zero(), Abs::zero(), Abs::pt(width), Abs::pt(20.0))
    }

    #[test]
    fn test_stops_are_sorted() {
        let stops: TabStops = [
            TabStop::new(Abs::pt(200.0), TabAlign::Right),
            TabStop::new(Abs::pt(50.0), TabAlign::Left),
        ]
        .into_iter()
        .collect();

        assert_eq!(stops.next_after(Abs::zero()).unwrap().position, Abs::pt(50.0));
        assert_eq!(stops.next_after(Abs::pt(50.0)).unwrap().position, Abs::pt(200.0));
        assert!(stops.next_after(Abs::pt(200.0)).is_none());
    }

    #[test]
    fn test_hanging_tab_alignments() {
        let at = |align| TabStop::new(Abs::pt(100.0), align);
        let width = |align, anchor| {
            hanging_tab_width(&at(align), line(200.0), Abs::pt(10.0), Abs::pt(20.0), anchor)
        };

        assert_eq!(width(TabAlign::Right, Abs::zero()), Abs::pt(70.0));
        assert_eq!(width(TabAlign::Center, Abs::zero()), Abs::pt(80.0));
        assert_eq!(width(TabAlign::Anchor, Abs::pt(5.0)), Abs::pt(85.0));
    }

    #[test]
    fn test_hanging_tab_is_clamped() {
        let stop = TabStop::new(Abs::pt(100.0), TabAlign::Left);
        let width = hanging_tab_width(&stop, line(90.0), Abs::pt(10.0), Abs::pt(20.0), Abs::zero());
        assert_eq!(width, Abs::pt(60.0));

        let stop = TabStop::new(Abs::pt(20.0), TabAlign::Right);
        let width = hanging_tab_width(&stop, line(200.0), Abs::pt(10.0), Abs::pt(30.0), Abs::zero());
        assert_eq!(width, Abs::zero());
    }

    #[test]
    fn test_default_tab_runs_to_next_interval() {
        let width = default_tab_width(Abs::pt(30.0), Abs::pt(50.0), Abs::pt(500.0));
        assert_eq!(width, Abs::pt(20.0));
        let width = default_tab_width(Abs::pt(30.0), Abs::pt(50.0), Abs::pt(5.0));
        assert_eq!(width, Abs::pt(5.0));
    }
}
