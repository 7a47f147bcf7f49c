//! The context threaded through line layout.

use ecow::EcoVec;
use rustc_hash::FxHashSet;

use crate::diag::LayoutDiagnostic;
use crate::inline::BidiLevels;
use crate::shaping::Shaper;

/// Holds the collaborators and the diagnostic sink of a layout.
pub struct Engine<'a> {
    /// Shapes text runs.
    pub shaper: &'a dyn Shaper,
    /// Computes embedding levels of bidirectional lines.
    pub bidi: &'a dyn BidiLevels,
    /// Collects warnings.
    pub sink: Sink,
}

impl<'a> Engine<'a> {
    /// Create an engine with an empty sink.
    pub fn new(shaper: &'a dyn Shaper, bidi: &'a dyn BidiLevels) -> Self {
        Self { shaper, bidi, sink: Sink::new() }
    }

    /// Report a recoverable problem.
    pub fn warn(&mut self, warning: LayoutDiagnostic) {
        tracing::warn!(warning = %warning.message, "layout warning");
        self.sink.warn(warning);
    }
}

/// A push-only sink for warnings.
#[derive(Debug, Default, Clone)]
pub struct Sink {
    /// Warnings emitted during layout.
    warnings: EcoVec<LayoutDiagnostic>,
    /// Hashes of all warnings' messages for deduplication.
    warnings_set: FxHashSet<u128>,
}

impl Sink {
    /// Create a new empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a warning unless an identical one was already reported.
    pub fn warn(&mut self, warning: LayoutDiagnostic) {
        let hash = quire_utils::hash128(&(&warning.message, &warning.hints));
        if self.warnings_set.insert(hash) {
            self.warnings.push(warning);
        }
    }

    /// The warnings reported so far.
    pub fn warnings(&self) -> &[LayoutDiagnostic] {
        &self.warnings
    }

    /// Take the stored warnings.
    pub fn take_warnings(&mut self) -> EcoVec<LayoutDiagnostic> {
        self.warnings_set.clear();
        std::mem::take(&mut self.warnings)
    }
}
