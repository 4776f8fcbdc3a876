//! Path and metadata inspection with explicit optional results.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use filetime::FileTime;

use crate::util::absolutize_path;

/// Facts about one path. Anything the filesystem could not answer is `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecPathInfo {
    /// Path as given.
    pub path: PathBuf,
    /// Path joined onto the working directory when relative.
    pub path_absolute: Option<PathBuf>,
    /// Fully resolved path; `None` when the path does not exist.
    pub path_canonical: Option<PathBuf>,
    /// Lexical parent of the given path.
    pub path_parent: Option<PathBuf>,
    /// Path resolves to an existing entry.
    pub if_exists: bool,
    /// Path resolves to a regular file.
    pub if_is_file: bool,
    /// Path resolves to a directory.
    pub if_is_dir: bool,
    /// Size in bytes.
    pub n_len: Option<u64>,
    /// Last modification time, seconds since the Unix epoch.
    pub n_modified_unix_secs: Option<i64>,
}

impl SpecPathInfo {
    /// Human-readable one-line summary.
    pub fn format(&self, prefix: &str) -> String {
        fn show_path(path: Option<&PathBuf>) -> String {
            path.map_or_else(|| "-".to_string(), |p| p.display().to_string())
        }
        fn show_num<T: fmt::Display>(value: Option<T>) -> String {
            value.map_or_else(|| "-".to_string(), |v| v.to_string())
        }

        format!(
            "{prefix} path={} absolute={} canonical={} parent={} exists={} file={} dir={} len={} modified={}",
            self.path.display(),
            show_path(self.path_absolute.as_ref()),
            show_path(self.path_canonical.as_ref()),
            show_path(self.path_parent.as_ref()),
            self.if_exists,
            self.if_is_file,
            self.if_is_dir,
            show_num(self.n_len),
            show_num(self.n_modified_unix_secs),
        )
    }
}

impl fmt::Display for SpecPathInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format("[PATH]"))
    }
}

/// Collect [`SpecPathInfo`] for `path`. Never fails.
pub fn inspect_path<P>(path: P) -> SpecPathInfo
where
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let meta_path = match fs::metadata(path) {
        Ok(v) => Some(v),
        Err(e) => {
            tracing::debug!(path = %path.display(), "metadata unavailable: {e}");
            None
        }
    };

    SpecPathInfo {
        path: path.to_path_buf(),
        path_absolute: absolutize_path(path),
        path_canonical: fs::canonicalize(path).ok(),
        path_parent: path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(Path::to_path_buf),
        if_exists: meta_path.is_some(),
        if_is_file: meta_path.as_ref().is_some_and(|m| m.is_file()),
        if_is_dir: meta_path.as_ref().is_some_and(|m| m.is_dir()),
        n_len: meta_path.as_ref().map(|m| m.len()),
        n_modified_unix_secs: meta_path
            .as_ref()
            .map(|m| FileTime::from_last_modification_time(m).unix_seconds()),
    }
}
