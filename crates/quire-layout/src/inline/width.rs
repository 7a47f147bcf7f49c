use crate::geom::Abs;

/// The padding added to inline-block and float widths so that a width
/// computed here and the same width computed by the item compare stably.
pub const MIN_MAX_EPS: Abs = Abs::pt(0.001);

/// The narrowest and widest a piece of content could be laid out at.
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct MinMaxWidth {
    /// The accumulated minimum width of the children.
    pub children_min_width: Abs,
    /// The accumulated maximum width of the children.
    pub children_max_width: Abs,
    /// Extra width added to both bounds, e.g. an indent.
    pub additional_width: Abs,
}

impl MinMaxWidth {
    /// Create bounds from a minimum and a maximum width.
    pub fn new(min: Abs, max: Abs) -> Self {
        Self {
            children_min_width: min,
            children_max_width: max,
            additional_width: Abs::zero(),
        }
    }

    /// Bounds of content that has exactly one possible width.
    pub fn fixed(width: Abs) -> Self {
        Self::new(width, width)
    }

    /// The maximum width.
    pub fn max_width(&self) -> Abs {
        self.children_max_width + self.additional_width
    }

    /// The minimum width. Never exceeds the maximum width.
    pub fn min_width(&self) -> Abs {
        (self.children_min_width + self.additional_width).min(self.max_width())
    }
}

/// How child widths combine into the line's bounds.
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq, Hash)]
pub enum WidthPolicy {
    /// The line never wraps: both bounds are sums of the children.
    Sum,
    /// The line may wrap anywhere between children: the minimum is the widest
    /// child minimum, the maximum is the sum of the children.
    #[default]
    MaxSum,
}

/// Accumulates a line's [`MinMaxWidth`] child by child.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct WidthTracker {
    policy: WidthPolicy,
    bounds: MinMaxWidth,
}

impl WidthTracker {
    /// Create an empty tracker.
    pub fn new(policy: WidthPolicy) -> Self {
        Self { policy, bounds: MinMaxWidth::default() }
    }

    /// The tracker for a line with the given no-soft-wrap setting.
    pub fn for_line(no_soft_wrap: bool) -> Self {
        Self::new(if no_soft_wrap { WidthPolicy::Sum } else { WidthPolicy::MaxSum })
    }

    /// The policy in use.
    pub fn policy(&self) -> WidthPolicy {
        self.policy
    }

    /// Account for a child's minimum width.
    pub fn update_min(&mut self, width: Abs) {
        match self.policy {
            WidthPolicy::Sum => self.bounds.children_min_width += width,
            WidthPolicy::MaxSum => self.bounds.children_min_width.set_max(width),
        }
    }

    /// Account for a child's maximum width.
    pub fn update_max(&mut self, width: Abs) {
        self.bounds.children_max_width += width;
    }

    /// The accumulated bounds.
    pub fn bounds(&self) -> MinMaxWidth {
        self.bounds
    }
}
