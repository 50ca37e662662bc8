//! `sobel` CLI entrypoint.
//!
//! Thin wrapper over the `cli` module: parse args, set up logging, run the
//! pipeline and map failures to exit code 1. For programmatic use, prefer
//! the `sobel-core` library API.

use std::process::ExitCode;

use clap::Parser;

mod cli;

fn main() -> ExitCode {
    let args = match cli::CliArgs::try_parse() {
        Ok(args) => args,
        Err(err) => return cli::report_parse_error(err),
    };
    cli::init_logger(args.verbose);

    match cli::run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
