//! Binary entrypoint for the `bytekit` CLI.

use std::process::ExitCode;

fn main() -> ExitCode {
    match bytekit_cli::run(std::env::args()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}
