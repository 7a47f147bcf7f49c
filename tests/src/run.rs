use std::fmt::Write;

use quire_layout::engine::Engine;
use quire_layout::geom::Abs;
use quire_layout::inline::{FloatRegistry, LineBox, LineLayoutResult, UnicodeBidiLevels};
use quire_layout::item::{ContentItem, LayoutStatus};
use quire_layout::shaping::MonospaceShaper;

use crate::collect::{Expect, Test};
use crate::logger::TestResult;

/// Every glyph advances by one em.
const SHAPER: MonospaceShaper = MonospaceShaper { advance: 1.0 };

/// Runs a single test.
pub fn run(test: &Test) -> TestResult {
    Runner::new(test).run()
}

/// Write a line to a log sink, defaulting to the test's error log.
macro_rules! log {
    (into: $sink:expr, $($tts:tt)*) => {{
        writeln!($sink, $($tts)*).unwrap();
    }};
    ($runner:expr, $($tts:tt)*) => {{
        writeln!(&mut $runner.result.errors, $($tts)*).unwrap();
    }};
}

/// Runs a single test.
struct Runner<'a> {
    test: &'a Test,
    result: TestResult,
}

impl<'a> Runner<'a> {
    fn new(test: &'a Test) -> Self {
        Self {
            test,
            result: TestResult { errors: String::new(), infos: String::new() },
        }
    }

    fn run(mut self) -> TestResult {
        let test = self.test;
        let case = &test.case;
        let mut line = case.line();
        let region = case.region();
        let mut engine = Engine::new(&SHAPER, &UnicodeBidiLevels);

        let output = line.layout(&mut engine, &region, &mut FloatRegistry::new());
        let warnings = engine.sink.take_warnings();
        for warning in &warnings {
            log!(into: self.result.infos, "warning: {}", warning.message);
        }

        // Laying out the same line again must not change anything.
        let again = line.layout(&mut engine, &region, &mut FloatRegistry::new());
        if again != output {
            log!(self, "layout is not repeatable");
            log!(self, "  first:  {:?}", output.status);
            log!(self, "  second: {:?}", again.status);
        }

        self.check_invariants(&output);
        self.check_expect(&case.expect, &output, warnings.len());

        if case.expect.min_width.is_some() || case.expect.max_width.is_some() {
            let bounds = line.min_max_width(&mut engine);
            check_abs(&mut self, "min width", case.expect.min_width, bounds.min_width());
            check_abs(&mut self, "max width", case.expect.max_width, bounds.max_width());
        }

        self.result
    }

    /// Checks what holds for every line, whatever the test expects.
    fn check_invariants(&mut self, output: &LineLayoutResult) {
        match (&output.line, output.status) {
            (None, LayoutStatus::Nothing) => {}
            (Some(_), LayoutStatus::Nothing) => log!(self, "line placed with status nothing"),
            (None, status) => log!(self, "no line placed with status {status:?}"),
            (Some(line), LayoutStatus::Full) => {
                let total: Abs = flowing(line).map(ContentItem::width).sum();
                if !total.approx_eq(line.occupied.width) {
                    log!(
                        self,
                        "children are {total:?} wide, but the line occupies {:?}",
                        line.occupied.width
                    );
                }
                if output.overflow.is_some() {
                    log!(self, "full line has overflow");
                }
            }
            (Some(_), LayoutStatus::Partial) => {}
        }

        if let Some(line) = &output.line {
            for child in flowing(line) {
                let width = child.width().to_pt();
                if !width.is_finite() || width < 0.0 {
                    log!(self, "child has invalid width {width}");
                }
            }
        }
    }

    fn check_expect(&mut self, expect: &Expect, output: &LineLayoutResult, warnings: usize) {
        if let Some(status) = expect.status {
            let status = LayoutStatus::from(status);
            if output.status != status {
                log!(self, "expected status {status:?}, got {:?}", output.status);
            }
        }

        if let Some(texts) = &expect.texts {
            let found: Vec<String> = output.line.iter().flat_map(texts_of).collect();
            if &found != texts {
                log!(self, "expected texts {texts:?}, got {found:?}");
            }
        }

        let width = output.occupied.map(|rect| rect.width);
        match (expect.width, width) {
            (Some(expected), Some(width)) => check_abs(self, "width", Some(expected), width),
            (Some(expected), None) => log!(self, "expected width {expected}, but nothing was placed"),
            _ => {}
        }

        if let Some(xs) = &expect.xs {
            let found: Vec<f64> = output
                .line
                .iter()
                .flat_map(flowing)
                .map(|child| child.occupied().map_or(f64::NAN, |rect| rect.x.to_pt()))
                .collect();
            let matches = found.len() == xs.len()
                && found.iter().zip(xs).all(|(a, b)| Abs::pt(*a).approx_eq(Abs::pt(*b)));
            if !matches {
                log!(self, "expected children at {xs:?}, got {found:?}");
            }
        }

        if let Some(count) = expect.overflow {
            let found = output.overflow.as_ref().map_or(0, |line| line.children.len());
            if found != count {
                log!(self, "expected {count} overflowing children, got {found}");
            }
        }

        if expect.cause.is_some() && expect.cause != output.cause_of_nothing {
            log!(
                self,
                "expected the line to stop at {:?}, got {:?}",
                expect.cause,
                output.cause_of_nothing
            );
        }

        if let Some(newline) = expect.newline
            && newline != output.split_forced_by_newline
        {
            log!(self, "expected split forced by newline to be {newline}");
        }

        if let Some(count) = expect.warnings
            && count != warnings
        {
            log!(self, "expected {count} warnings, got {warnings}");
        }

        if let Some(count) = expect.floats_to_next_page {
            let found = output.floats_to_next_page.len();
            if found != count {
                log!(self, "expected {count} floats on the next page, got {found}");
            }
        }
    }
}

/// Compare a measured length with the expected number of points.
fn check_abs(runner: &mut Runner, what: &str, expected: Option<f64>, found: Abs) {
    if let Some(expected) = expected
        && !found.approx_eq(Abs::pt(expected))
    {
        log!(runner, "expected {what} {expected}, got {found:?}");
    }
}

/// The children of a line that take part in its flow.
fn flowing(line: &LineBox) -> impl Iterator<Item = &ContentItem> {
    line.children.iter().filter(|child| !child.is_floating())
}

/// The glyphs of a line's text children.
fn texts_of(line: &LineBox) -> Vec<String> {
    line.children
        .iter()
        .filter_map(ContentItem::as_text)
        .map(|run| run.glyphs().iter().map(|glyph| glyph.c).collect())
        .collect()
}
