use std::io::Write;

use crate::collect::Test;

/// What a scenario reported.
pub struct TestResult {
    /// Failed checks, one per line. Empty when the scenario passed.
    pub errors: String,
    /// Notes worth showing either way, such as layout warnings.
    pub infos: String,
}

/// Tallies scenario outcomes and prints them as they arrive.
pub struct Logger {
    selected: usize,
    skipped: usize,
    passed: usize,
    failed: Vec<String>,
}

impl Logger {
    pub fn new(selected: usize, skipped: usize) -> Self {
        Self { selected, skipped, passed: 0, failed: vec![] }
    }

    /// Record a finished scenario. A panic counts as a failure.
    pub fn record(&mut self, test: &Test, result: std::thread::Result<TestResult>) {
        let mut out = std::io::stderr().lock();
        let Ok(result) = result else {
            let _ = writeln!(out, "❌ {test} panicked");
            self.failed.push(test.to_string());
            return;
        };

        let failed = !result.errors.is_empty();
        if failed {
            let _ = writeln!(out, "❌ {test}");
            self.failed.push(test.to_string());
        } else {
            self.passed += 1;
            if crate::ARGS.verbose || !result.infos.is_empty() {
                let _ = writeln!(out, "✅ {test}");
            }
        }

        for line in result.errors.lines().chain(result.infos.lines()) {
            let _ = writeln!(out, "  {line}");
        }
    }

    /// Print the tally and return whether every scenario passed.
    pub fn finish(self) -> bool {
        let failed = self.failed.len();
        debug_assert_eq!(self.selected, self.passed + failed);

        if failed > 0 {
            eprintln!();
            eprintln!("failed:");
            for name in &self.failed {
                eprintln!("  {name}");
            }
        }

        eprintln!("{} passed, {failed} failed, {} skipped", self.passed, self.skipped);
        failed == 0
    }
}
