use std::path::PathBuf;

use clap::Parser;
use regex::Regex;

/// Runs the line layout scenarios in the suite directory.
#[derive(Debug, Clone, Parser)]
#[command(bin_name = "cargo test --workspace --test tests --")]
#[clap(name = "quire-test", author)]
pub struct CliArguments {
    /// Run only scenarios whose name matches one of these patterns.
    #[arg(value_parser = Regex::new)]
    pub pattern: Vec<Regex>,
    /// Treat patterns as exact scenario names.
    #[arg(short, long)]
    pub exact: bool,
    /// Print the selected scenarios and exit.
    #[arg(long)]
    pub list: bool,
    /// Also report scenarios that pass.
    #[arg(short, long)]
    pub verbose: bool,
    /// Size of the thread pool. Defaults to one thread per core.
    #[arg(short = 'j', long)]
    pub num_threads: Option<usize>,
    /// Directory with the suite files, relative to the workspace root.
    #[arg(long, env = "QUIRE_SUITE", default_value = "tests/suite")]
    pub suite: PathBuf,
}
