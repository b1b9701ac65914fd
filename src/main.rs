mod cli;
mod clones;
mod executor;
mod lang;
mod statements;
mod walk;

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use cli::Cli;
use executor::Options;

fn main() {
    let cli = Cli::parse();

    if cli.block_size == 0 {
        eprintln!("error: --block-size must be at least 1");
        std::process::exit(1);
    }

    let opts = Options {
        root: cli.path.unwrap_or_else(|| PathBuf::from(".")),
        block_size: cli.block_size,
        min_tokens: cli.min_tokens,
        timeout: Duration::from_secs(cli.timeout),
        include_tests: cli.include_tests,
        excludes: cli.exclude,
        report: cli.report,
        show_all: cli.show_all,
        json: cli.json,
    };

    if let Err(err) = executor::run(&opts) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
