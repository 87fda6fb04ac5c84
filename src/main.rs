//! dupelink - duplicate file finder
//!
//! Entry point for the dupelink CLI application.

use clap::Parser;
use dupelink::{
    cli::{normalize_args, Cli},
    error::ExitCode,
};

fn main() {
    // Parse command-line arguments, accepting Go-style single-dash flags
    let cli = match Cli::try_parse_from(normalize_args(std::env::args_os())) {
        Ok(cli) => cli,
        Err(err) => {
            // --help and --version are reported through the error path too
            let exit_code = if err.use_stderr() {
                ExitCode::UsageError
            } else {
                ExitCode::Success
            };
            let _ = err.print();
            std::process::exit(exit_code.as_i32());
        }
    };

    // Run the application logic
    match dupelink::run_app(cli) {
        Ok(code) => std::process::exit(code.as_i32()),
        Err(err) => {
            let exit_code = ExitCode::GeneralError;
            eprintln!("[{}] Error: {:#}", exit_code.code_prefix(), err);
            std::process::exit(exit_code.as_i32());
        }
    }
}
