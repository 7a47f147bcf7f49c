//! Quire's test runner.

mod args;
mod collect;
mod logger;
mod run;

use std::process::ExitCode;
use std::sync::LazyLock;

use clap::Parser;
use parking_lot::Mutex;
use rayon::iter::{IntoParallelRefIterator, ParallelIterator};

use crate::args::CliArguments;
use crate::logger::Logger;

/// The parsed command line arguments.
static ARGS: LazyLock<CliArguments> = LazyLock::new(CliArguments::parse);

fn main() -> ExitCode {
    // Cargo starts us in the `tests` directory; suite paths are relative to
    // the workspace root.
    if let Err(err) = std::env::set_current_dir("..") {
        eprintln!("cannot enter the workspace root: {err}");
        return ExitCode::FAILURE;
    }

    if let Some(threads) = ARGS.num_threads
        && let Err(err) = rayon::ThreadPoolBuilder::new().num_threads(threads).build_global()
    {
        eprintln!("cannot set up {threads} threads: {err}");
        return ExitCode::FAILURE;
    }

    let (tests, skipped) = match collect::collect() {
        Ok(collected) => collected,
        Err(errors) => {
            eprintln!("the suite has {} broken file(s)", errors.len());
            for error in errors {
                eprintln!("  {error}");
            }
            return ExitCode::FAILURE;
        }
    };

    if ARGS.list {
        tests.iter().for_each(|test| println!("{test}"));
        eprintln!("{} selected, {skipped} skipped", tests.len());
        return ExitCode::SUCCESS;
    }

    if tests.is_empty() {
        eprintln!("no scenario matches");
        return ExitCode::SUCCESS;
    }

    let logger = Mutex::new(Logger::new(tests.len(), skipped));
    tests.par_iter().for_each(|test| {
        let result = std::panic::catch_unwind(|| run::run(test));
        logger.lock().record(test, result);
    });

    if logger.into_inner().finish() { ExitCode::SUCCESS } else { ExitCode::FAILURE }
}
