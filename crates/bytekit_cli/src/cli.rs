//! CLI argument definitions.

use std::path::PathBuf;

use bytekit_io_fs::{EnumPatternMode, N_BUFFER_SIZE_DEFAULT};
use clap::{Parser, Subcommand, ValueEnum};

/// Top-level CLI parser for `bytekit`.
#[derive(Debug, Parser)]
#[command(name = "bytekit", version, about = "Timed file copies and filtered listings")]
pub struct Cli {
    /// Emit debug logs (overridden by `RUST_LOG`).
    #[arg(short, long, global = true)]
    pub verbose: bool,
    /// The command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported top-level subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Copy one file and report bytes and elapsed time.
    Copy {
        /// File to read.
        source: PathBuf,
        /// File to create or overwrite.
        destination: PathBuf,
        /// Chunk size in bytes; 0 copies byte by byte.
        #[arg(short, long, default_value_t = N_BUFFER_SIZE_DEFAULT)]
        buffer_size: usize,
        /// Apply source permissions, timestamps and xattrs to the copy.
        #[arg(long)]
        preserve_metadata: bool,
    },
    /// Copy the same file unbuffered and buffered and compare timings.
    Bench {
        /// File to read.
        source: PathBuf,
        /// File to create or overwrite.
        destination: PathBuf,
        /// Chunk size in bytes for the buffered run.
        #[arg(short, long, default_value_t = N_BUFFER_SIZE_DEFAULT)]
        buffer_size: usize,
    },
    /// List directory entries, optionally filtered.
    List {
        /// Directory to list.
        #[arg(default_value = ".")]
        dir: PathBuf,
        /// Keep names ending with this suffix (repeatable).
        #[arg(short, long = "suffix")]
        suffixes: Vec<String>,
        /// Compare suffixes case-insensitively.
        #[arg(short, long)]
        ignore_case: bool,
        /// Keep names matching this pattern (repeatable).
        #[arg(short, long = "pattern", conflicts_with = "suffixes")]
        patterns: Vec<String>,
        /// How `--pattern` values are interpreted.
        #[arg(long, value_enum, default_value_t = ArgPatternMode::Glob)]
        pattern_mode: ArgPatternMode,
    },
    /// Print path and metadata facts.
    Inspect {
        /// Path to inspect.
        path: PathBuf,
    },
    /// Wait for a start token, then read an integer code from stdin.
    Prompt {
        /// Line that ends the first prompt loop.
        #[arg(long, default_value = "start")]
        token: String,
        /// Give up after this many malformed codes.
        #[arg(long)]
        attempts: Option<u32>,
    },
}

/// CLI spelling of [`EnumPatternMode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ArgPatternMode {
    /// Shell-like wildcards.
    Glob,
    /// Regular expressions.
    Regex,
    /// Substring match.
    Literal,
}

impl From<ArgPatternMode> for EnumPatternMode {
    fn from(value: ArgPatternMode) -> Self {
        match value {
            ArgPatternMode::Glob => Self::Glob,
            ArgPatternMode::Regex => Self::Regex,
            ArgPatternMode::Literal => Self::Literal,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::{ArgPatternMode, Cli, Command};
    use clap::Parser;

    #[test]
    fn parses_copy_with_defaults() {
        let cli = Cli::parse_from(["bytekit", "copy", "a.jpg", "b.jpg"]);
        match cli.command {
            Command::Copy {
                source,
                destination,
                buffer_size,
                preserve_metadata,
            } => {
                assert_eq!(source, PathBuf::from("a.jpg"));
                assert_eq!(destination, PathBuf::from("b.jpg"));
                assert_eq!(buffer_size, 4000);
                assert!(!preserve_metadata);
            }
            other => panic!("unexpected command: {other:?}"),
        }
        assert!(!cli.verbose);
    }

    #[test]
    fn parses_list_with_repeated_suffixes() {
        let cli = Cli::parse_from(["bytekit", "list", "-s", ".txt", "-s", ".JPG", "-i", "-v"]);
        assert!(cli.verbose);
        match cli.command {
            Command::List {
                dir,
                suffixes,
                ignore_case,
                patterns,
                pattern_mode,
            } => {
                assert_eq!(dir, PathBuf::from("."));
                assert_eq!(suffixes, vec![".txt", ".JPG"]);
                assert!(ignore_case);
                assert!(patterns.is_empty());
                assert_eq!(pattern_mode, ArgPatternMode::Glob);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn rejects_suffix_and_pattern_together() {
        let res = Cli::try_parse_from(["bytekit", "list", "-s", ".txt", "-p", "*.rs"]);
        assert!(res.is_err());
    }

    #[test]
    fn parses_prompt_defaults() {
        let cli = Cli::parse_from(["bytekit", "prompt"]);
        assert!(matches!(
            cli.command,
            Command::Prompt { ref token, attempts: None } if token == "start"
        ));
    }
}
