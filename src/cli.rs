/// CLI argument definitions for the `cpd` command.
///
/// A single command with its arguments and long help text, using the
/// `clap` derive macros.
use std::path::PathBuf;

use clap::Parser;

const LONG_ABOUT: &str = "\
Detect copied and pasted code within and across files.

Every file is split into statements (non-blank, non-comment lines), and a
sliding window of consecutive statements forms the comparison blocks. Files
sharing a run of identical blocks are reported as duplications, including a
file duplicating itself.

Reported duplications are maximal: a shorter duplication fully covered by a
longer one at the same locations is suppressed. Duplications smaller than
the language's minimum size (in statements) are ignored; use --min-tokens
to override the per-language minimum.

Analysis of a single file is abandoned with a warning if it exceeds the
time budget (--timeout); the rest of the run is unaffected.";

#[derive(Parser)]
#[command(
    name = "cpd",
    version,
    about = "Copy-paste detector for source code",
    long_about = LONG_ABOUT
)]
pub struct Cli {
    /// Directory or file to analyze (default: current directory)
    pub path: Option<PathBuf>,

    /// Show detailed report with duplication locations
    #[arg(short, long)]
    pub report: bool,

    /// Show all duplications (default: top 20)
    #[arg(long)]
    pub show_all: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Statements per comparison block
    #[arg(long, default_value = "10")]
    pub block_size: usize,

    /// Minimum duplication size in statements (default: per language)
    #[arg(long)]
    pub min_tokens: Option<usize>,

    /// Time budget per file in seconds
    #[arg(long, default_value = "300")]
    pub timeout: u64,

    /// Include test files and directories in analysis (excluded by default)
    #[arg(long)]
    pub include_tests: bool,

    /// Exclude paths matching a glob (relative to the scan root; repeatable)
    #[arg(long, value_name = "GLOB")]
    pub exclude: Vec<String>,
}
