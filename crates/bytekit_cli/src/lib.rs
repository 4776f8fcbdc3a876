//! Library entrypoint for the `bytekit` CLI.

pub mod cli;
pub mod commands;

use std::io;

use clap::Parser;
use clap::error::ErrorKind;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

/// Parse `args`, install logging and run the selected command on stdio.
pub fn run<I, T>(args: I) -> Result<(), String>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let cli = match cli::Cli::try_parse_from(args) {
        Ok(v) => v,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            print!("{err}");
            return Ok(());
        }
        Err(err) => return Err(err.to_string()),
    };
    init_tracing(cli.verbose);

    let mut reader = io::stdin().lock();
    let mut writer = io::stdout().lock();
    commands::dispatch(&cli.command, &mut reader, &mut writer)
}

fn init_tracing(if_verbose: bool) {
    let level = if if_verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::WARN
    };
    let env_filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::run;

    #[test]
    fn run_errors_on_unknown_subcommand() {
        let result = run(["bytekit", "unknown"]);
        assert!(result.is_err());
    }

    #[test]
    fn run_prints_help_without_error() {
        let result = run(["bytekit", "--help"]);
        assert!(result.is_ok());
    }
}
