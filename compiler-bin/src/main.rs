use std::process::ExitCode;

use clap::Parser;
use tsc_adapter::cli;

fn main() -> ExitCode {
    let config = cli::Config::parse();
    tsc_adapter::run(config)
}
