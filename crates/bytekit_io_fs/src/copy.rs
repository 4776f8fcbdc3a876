//! Timed single-file copy and batched copy orchestration.

use std::fs::{self, File};
use std::io::{self, Read, Write};
use std::path::Path;
use std::time::Instant;

use rayon::ThreadPoolBuilder;
use rayon::prelude::*;

use crate::report::{ReportCopyBatch, ReportCopyBatchBuilder, ReportCopyFile};
use crate::spec::{CopyFileError, SpecCopyRequest};
use crate::util::{
    apply_source_metadata, calculate_worker_limit, duration_to_nanos, map_open_destination_error,
    map_open_source_error,
};

/// Upper bound on the chunk buffer allocated by one copy.
pub const N_CHUNK_SIZE_MAX: usize = 8 * 1024 * 1024;

/// Transfer-loop failure before paths are attached.
#[derive(Debug)]
enum TransferError {
    Read { n_bytes_copied: u64, error: io::Error },
    Write { n_bytes_copied: u64, error: io::Error },
}

/// Copy `path_source` to `path_destination` and time the transfer.
///
/// The source is opened first, so a missing source never creates the
/// destination. The destination is created or truncated. With
/// `n_buffer_size == 0` every byte is read and written with its own call on
/// the raw file handles; otherwise bytes move in chunks of at most
/// `n_buffer_size`, writing exactly what each read returned. The chunk
/// buffer is also bounded by the source length and [`N_CHUNK_SIZE_MAX`].
///
/// Elapsed time covers only the transfer loop (open/close excluded) and
/// comes from [`Instant`].
///
/// On failure the returned [`CopyFileError`] carries the number of bytes that
/// reached the destination before the error. Both handles are dropped before
/// this function returns on every path.
pub fn copy_file(spec_request: &SpecCopyRequest) -> Result<ReportCopyFile, CopyFileError> {
    let path_src = spec_request.path_source.as_path();
    let path_dst = spec_request.path_destination.as_path();

    let mut file_src = File::open(path_src).map_err(|e| map_open_source_error(path_src, e))?;
    let meta_src = file_src
        .metadata()
        .map_err(|e| map_open_source_error(path_src, e))?;
    if meta_src.is_dir() {
        return Err(CopyFileError::ReadFailure {
            path: path_src.to_path_buf(),
            n_bytes_copied: 0,
            message: "Source is a directory".to_string(),
        });
    }
    if is_same_file(&meta_src, path_src, path_dst) {
        return Err(CopyFileError::WriteFailure {
            path: path_dst.to_path_buf(),
            n_bytes_copied: 0,
            message: format!(
                "Source and destination are the same file: {}",
                path_src.display()
            ),
        });
    }

    let mut file_dst =
        File::create(path_dst).map_err(|e| map_open_destination_error(path_dst, e))?;

    let n_chunk_size = derive_chunk_size(spec_request.n_buffer_size, meta_src.len());
    let t_start = Instant::now();
    let res_transfer = transfer_bytes(&mut file_src, &mut file_dst, n_chunk_size);
    let n_elapsed_nanos = duration_to_nanos(t_start.elapsed());
    drop(file_src);
    drop(file_dst);

    let n_bytes_copied = match res_transfer {
        Ok(n) => n,
        Err(TransferError::Read {
            n_bytes_copied,
            error,
        }) => {
            tracing::warn!(
                path = %path_src.display(),
                n_bytes_copied,
                "Copy aborted by read error: {error}"
            );
            return Err(CopyFileError::ReadFailure {
                path: path_src.to_path_buf(),
                n_bytes_copied,
                message: error.to_string(),
            });
        }
        Err(TransferError::Write {
            n_bytes_copied,
            error,
        }) => {
            tracing::warn!(
                path = %path_dst.display(),
                n_bytes_copied,
                "Copy aborted by write error: {error}"
            );
            return Err(CopyFileError::WriteFailure {
                path: path_dst.to_path_buf(),
                n_bytes_copied,
                message: error.to_string(),
            });
        }
    };

    if spec_request.if_preserve_metadata
        && let Err(e) = apply_source_metadata(path_src, path_dst)
    {
        return Err(CopyFileError::MetadataFailed {
            path: path_dst.to_path_buf(),
            n_bytes_copied,
            message: e.to_string(),
        });
    }

    let report_copy = ReportCopyFile {
        n_bytes_copied,
        n_elapsed_nanos,
    };
    tracing::debug!(
        source = %path_src.display(),
        destination = %path_dst.display(),
        n_buffer_size = spec_request.n_buffer_size,
        "{report_copy}"
    );
    Ok(report_copy)
}

/// Run independent copies, serially or on a rayon pool.
///
/// Results keep the order of `l_requests`. A failing request never stops the
/// others. When the thread pool cannot be built the batch runs serially and
/// a warning is recorded.
pub fn copy_files(
    l_requests: Vec<SpecCopyRequest>,
    num_workers_max: Option<usize>,
) -> ReportCopyBatch {
    let mut builder_batch_report = ReportCopyBatchBuilder::default();
    if l_requests.is_empty() {
        return builder_batch_report.build();
    }

    let n_workers_max = calculate_worker_limit(num_workers_max);
    let run_one = |spec_request: SpecCopyRequest| {
        let res_copy = copy_file(&spec_request);
        (spec_request.path_destination, res_copy)
    };

    let l_results = if n_workers_max <= 1 || l_requests.len() == 1 {
        l_requests.into_iter().map(run_one).collect::<Vec<_>>()
    } else {
        match ThreadPoolBuilder::new().num_threads(n_workers_max).build() {
            Ok(thread_pool) => {
                thread_pool.install(|| l_requests.into_par_iter().map(run_one).collect::<Vec<_>>())
            }
            Err(e) => {
                builder_batch_report.add_warning(format!(
                    "Failed to initialize thread pool (workers={n_workers_max}); fallback to serial copy. ({e})"
                ));
                l_requests.into_iter().map(run_one).collect::<Vec<_>>()
            }
        }
    };

    for (path_dst, res_copy) in l_results {
        builder_batch_report.add_result(path_dst, res_copy);
    }
    let report_batch = builder_batch_report.build();
    tracing::debug!("{report_batch}");
    report_batch
}

/// Same underlying file, hard links included.
fn is_same_file(meta_src: &fs::Metadata, path_src: &Path, path_dst: &Path) -> bool {
    let Ok(meta_dst) = fs::metadata(path_dst) else {
        return false;
    };
    #[cfg(unix)]
    {
        use std::os::unix::fs::MetadataExt;
        let _ = path_src;
        (meta_src.dev(), meta_src.ino()) == (meta_dst.dev(), meta_dst.ino())
    }
    #[cfg(not(unix))]
    {
        let _ = (meta_src, meta_dst);
        let Ok(path_dst_resolved) = fs::canonicalize(path_dst) else {
            return false;
        };
        fs::canonicalize(path_src).is_ok_and(|p: std::path::PathBuf| p == path_dst_resolved)
    }
}

/// Chunk size actually allocated: never above the requested size, the
/// source length or [`N_CHUNK_SIZE_MAX`]. `0` stays `0` (byte-at-a-time).
fn derive_chunk_size(n_buffer_size: usize, n_len_src: u64) -> usize {
    if n_buffer_size == 0 {
        return 0;
    }
    let n_len_src = usize::try_from(n_len_src.max(1)).unwrap_or(usize::MAX);
    n_buffer_size.min(n_len_src).min(N_CHUNK_SIZE_MAX)
}

fn transfer_bytes<R, W>(
    reader: &mut R,
    writer: &mut W,
    n_buffer_size: usize,
) -> Result<u64, TransferError>
where
    R: Read,
    W: Write,
{
    let mut buf = vec![0u8; n_buffer_size.clamp(1, N_CHUNK_SIZE_MAX)];
    let mut n_bytes_copied: u64 = 0;

    loop {
        let n_read = match reader.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(error) => {
                return Err(TransferError::Read {
                    n_bytes_copied,
                    error,
                });
            }
        };
        write_counted(writer, &buf[..n_read], &mut n_bytes_copied)
            .map_err(|error| TransferError::Write {
                n_bytes_copied,
                error,
            })?;
    }

    writer.flush().map_err(|error| TransferError::Write {
        n_bytes_copied,
        error,
    })?;
    Ok(n_bytes_copied)
}

/// `write_all` that keeps `n_bytes_copied` exact across partial writes.
fn write_counted<W: Write>(
    writer: &mut W,
    mut chunk: &[u8],
    n_bytes_copied: &mut u64,
) -> Result<(), io::Error> {
    while !chunk.is_empty() {
        match writer.write(chunk) {
            Ok(0) => {
                return Err(io::Error::new(
                    io::ErrorKind::WriteZero,
                    "destination accepted no more bytes",
                ));
            }
            Ok(n) => {
                *n_bytes_copied += n as u64;
                chunk = &chunk[n..];
            }
            Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
            Err(e) => return Err(e),
        }
    }
    Ok(())
}
