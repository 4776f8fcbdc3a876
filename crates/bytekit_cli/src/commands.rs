//! Subcommand execution.

use std::io::{BufRead, Write};
use std::path::Path;

use bytekit_io_fs::{
    EntryFilter, PatternEntryFilter, SpecCopyRequest, SpecEntryFilter, SuffixEntryFilter,
    copy_file, inspect_path, list_dir, prompt_integer, wait_for_token,
};

use crate::cli::Command;

/// Run one parsed command, reading from `reader` and printing to `writer`.
pub fn dispatch<R, W>(command: &Command, reader: &mut R, writer: &mut W) -> Result<(), String>
where
    R: BufRead,
    W: Write,
{
    match command {
        Command::Copy {
            source,
            destination,
            buffer_size,
            preserve_metadata,
        } => {
            let spec_request = SpecCopyRequest::new(source, destination)
                .with_buffer_size(*buffer_size)
                .with_preserve_metadata(*preserve_metadata);
            let report_copy = copy_file(&spec_request).map_err(|e| e.to_string())?;
            writeln!(writer, "{report_copy}").map_err(|e| e.to_string())
        }
        Command::Bench {
            source,
            destination,
            buffer_size,
        } => run_bench(source, destination, *buffer_size, writer),
        Command::List {
            dir,
            suffixes,
            ignore_case,
            patterns,
            pattern_mode,
        } => {
            let filter: Option<Box<dyn EntryFilter>> = if !suffixes.is_empty() {
                Some(Box::new(SuffixEntryFilter::new(
                    SpecEntryFilter::from_suffixes(suffixes.iter().cloned(), !ignore_case),
                )))
            } else if !patterns.is_empty() {
                let filter = PatternEntryFilter::from_patterns(patterns, (*pattern_mode).into())
                    .map_err(|e| e.to_string())?;
                Some(Box::new(filter))
            } else {
                None
            };

            let l_names = list_dir(dir, filter.as_deref()).map_err(|e| e.to_string())?;
            for c_name in l_names {
                writeln!(writer, "{c_name}").map_err(|e| e.to_string())?;
            }
            Ok(())
        }
        Command::Inspect { path } => {
            writeln!(writer, "{}", inspect_path(path)).map_err(|e| e.to_string())
        }
        Command::Prompt { token, attempts } => {
            wait_for_token(reader, writer, token).map_err(|e| e.to_string())?;
            writeln!(writer, "Correct!!").map_err(|e| e.to_string())?;
            let n_code = prompt_integer(reader, writer, "Now, enter the start code: ", *attempts)
                .map_err(|e| e.to_string())?;
            writeln!(writer, "Thanks. You entered code: {n_code}").map_err(|e| e.to_string())
        }
    }
}

fn run_bench<W: Write>(
    path_source: &Path,
    path_destination: &Path,
    n_buffer_size: usize,
    writer: &mut W,
) -> Result<(), String> {
    if n_buffer_size == 0 {
        return Err(
            "bench needs --buffer-size >= 1 (the unbuffered run is always included)".to_string(),
        );
    }
    let spec_info = inspect_path(path_source);
    if let Some(n_len) = spec_info.n_len {
        writeln!(writer, "File size is {n_len} bytes").map_err(|e| e.to_string())?;
    }

    for (c_label, n_size) in [
        ("[NO_BUFFER]".to_string(), 0),
        (format!("[BUFFER={n_buffer_size}]"), n_buffer_size),
    ] {
        let spec_request =
            SpecCopyRequest::new(path_source, path_destination).with_buffer_size(n_size);
        let report_copy = copy_file(&spec_request).map_err(|e| e.to_string())?;
        writeln!(writer, "{}", report_copy.format(&c_label)).map_err(|e| e.to_string())?;
    }
    Ok(())
}
