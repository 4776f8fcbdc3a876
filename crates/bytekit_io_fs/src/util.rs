use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::spec::CopyFileError;

////////////////////////////////////////////////////////////////////////////////
// #region ErrorMapping

pub(crate) fn map_open_source_error(path_source: &Path, e: io::Error) -> CopyFileError {
    match e.kind() {
        io::ErrorKind::NotFound => CopyFileError::NotFound {
            path: path_source.to_path_buf(),
        },
        io::ErrorKind::PermissionDenied => CopyFileError::PermissionDenied {
            path: path_source.to_path_buf(),
            message: e.to_string(),
        },
        _ => CopyFileError::ReadFailure {
            path: path_source.to_path_buf(),
            n_bytes_copied: 0,
            message: e.to_string(),
        },
    }
}

pub(crate) fn map_open_destination_error(path_destination: &Path, e: io::Error) -> CopyFileError {
    match e.kind() {
        io::ErrorKind::PermissionDenied => CopyFileError::PermissionDenied {
            path: path_destination.to_path_buf(),
            message: e.to_string(),
        },
        _ => CopyFileError::WriteFailure {
            path: path_destination.to_path_buf(),
            n_bytes_copied: 0,
            message: e.to_string(),
        },
    }
}

pub(crate) fn duration_to_nanos(duration: Duration) -> u64 {
    u64::try_from(duration.as_nanos()).unwrap_or(u64::MAX)
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region Metadata

/// Apply permissions, access/modify times and (Linux) xattrs of the source.
pub(crate) fn apply_source_metadata(
    path_file_src: &Path,
    path_file_dst: &Path,
) -> Result<(), io::Error> {
    use filetime::{FileTime, set_file_times};

    let stat_src = fs::metadata(path_file_src)?;
    fs::set_permissions(path_file_dst, stat_src.permissions())?;

    let file_time_access = FileTime::from_last_access_time(&stat_src);
    let file_time_modify = FileTime::from_last_modification_time(&stat_src);
    set_file_times(path_file_dst, file_time_access, file_time_modify)?;

    #[cfg(target_os = "linux")]
    copy_xattrs_linux(path_file_src, path_file_dst);
    Ok(())
}

#[cfg(target_os = "linux")]
fn copy_xattrs_linux(path_file_src: &Path, path_file_dst: &Path) {
    let iter_xattr_names = match xattr::list(path_file_src) {
        Ok(v) => v,
        Err(e) => {
            tracing::debug!(path = %path_file_src.display(), "xattr listing unavailable: {e}");
            return;
        }
    };

    for name in iter_xattr_names {
        let Some(raw_value) = xattr::get(path_file_src, &name).ok().flatten() else {
            continue;
        };
        if let Err(e) = xattr::set(path_file_dst, &name, &raw_value) {
            tracing::warn!(
                path = %path_file_dst.display(),
                "Failed to copy xattr {}: {e}",
                name.to_string_lossy()
            );
        }
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region PathUtilities

pub(crate) fn absolutize_path(path: &Path) -> Option<PathBuf> {
    if path.is_absolute() {
        return Some(path.to_path_buf());
    }
    std::env::current_dir().ok().map(|cwd| cwd.join(path))
}

pub(crate) fn calculate_worker_limit(num_workers_max: Option<usize>) -> usize {
    let n_cpu = std::thread::available_parallelism()
        .map(|v| v.get())
        .unwrap_or(1);

    match num_workers_max {
        Some(n) => n.clamp(1, n_cpu),
        None => n_cpu.clamp(1, 8),
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region TestSupport

#[cfg(test)]
pub(crate) struct TestDir {
    path: PathBuf,
}

#[cfg(test)]
impl TestDir {
    pub(crate) fn new() -> Self {
        use std::sync::atomic::{AtomicU64, Ordering};
        use std::time::{SystemTime, UNIX_EPOCH};

        static N_SEQ: AtomicU64 = AtomicU64::new(0);
        let n = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock")
            .as_nanos();
        let n_seq = N_SEQ.fetch_add(1, Ordering::Relaxed);
        let path = std::env::temp_dir().join(format!(
            "bytekit_fs_test_{}_{n}_{n_seq}",
            std::process::id()
        ));
        fs::create_dir_all(&path).expect("create test dir");
        Self { path }
    }

    pub(crate) fn path(&self) -> &Path {
        &self.path
    }

    pub(crate) fn write_bytes(&self, name: &str, raw: &[u8]) -> PathBuf {
        let path = self.path.join(name);
        fs::write(&path, raw).expect("write test file");
        path
    }
}

#[cfg(test)]
impl Drop for TestDir {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.path);
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use std::io;
    use std::path::Path;
    use std::time::Duration;

    use super::{
        calculate_worker_limit, duration_to_nanos, map_open_destination_error,
        map_open_source_error,
    };
    use crate::spec::EnumCopyErrorKind;

    #[test]
    fn open_errors_are_classified_by_kind() {
        let path = Path::new("x");
        let e = map_open_source_error(path, io::Error::from(io::ErrorKind::NotFound));
        assert_eq!(e.kind(), EnumCopyErrorKind::NotFound);
        let e = map_open_source_error(path, io::Error::from(io::ErrorKind::PermissionDenied));
        assert_eq!(e.kind(), EnumCopyErrorKind::PermissionDenied);
        let e = map_open_destination_error(path, io::Error::from(io::ErrorKind::NotFound));
        assert_eq!(e.kind(), EnumCopyErrorKind::WriteFailure);
        assert_eq!(e.bytes_copied(), 0);
    }

    #[test]
    fn worker_limit_is_at_least_one() {
        assert_eq!(calculate_worker_limit(Some(0)), 1);
        assert!(calculate_worker_limit(None) >= 1);
        assert!(calculate_worker_limit(None) <= 8);
    }

    #[test]
    fn duration_nanos_saturates() {
        assert_eq!(duration_to_nanos(Duration::from_nanos(42)), 42);
        assert_eq!(duration_to_nanos(Duration::MAX), u64::MAX);
    }
}
