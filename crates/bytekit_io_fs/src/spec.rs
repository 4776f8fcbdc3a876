//! Request/filter models and top-level error types.

use std::collections::BTreeSet;
use std::fmt;
use std::path::{Path, PathBuf};

/// Buffer size used when a caller does not pick one.
pub const N_BUFFER_SIZE_DEFAULT: usize = 4000;

////////////////////////////////////////////////////////////////////////////////
// #region EnumsInit

/// Pattern matching mode for [`crate::filter::PatternEntryFilter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnumPatternMode {
    /// Shell-like wildcards (`*`, `?`, character classes).
    Glob,
    /// Regular expression pattern.
    Regex,
    /// Substring match.
    Literal,
}

/// Coarse classification of a [`CopyFileError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnumCopyErrorKind {
    /// Source does not exist.
    NotFound,
    /// Source or destination is not accessible.
    PermissionDenied,
    /// Source could not be read.
    ReadFailure,
    /// Destination could not be created or stopped accepting bytes.
    WriteFailure,
    /// Bytes were copied but metadata could not be applied.
    MetadataFailed,
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region StructsInit

/// Input for one [`crate::copy::copy_file`] call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecCopyRequest {
    /// File to read from.
    pub path_source: PathBuf,
    /// File to create or truncate.
    pub path_destination: PathBuf,
    /// Chunk size in bytes; `0` copies one byte at a time with no buffering.
    pub n_buffer_size: usize,
    /// Apply permissions, timestamps and xattrs of the source after copying.
    pub if_preserve_metadata: bool,
}

impl SpecCopyRequest {
    /// Request with the default buffer size and no metadata preservation.
    pub fn new<P, Q>(path_source: P, path_destination: Q) -> Self
    where
        P: AsRef<Path>,
        Q: AsRef<Path>,
    {
        Self {
            path_source: path_source.as_ref().to_path_buf(),
            path_destination: path_destination.as_ref().to_path_buf(),
            n_buffer_size: N_BUFFER_SIZE_DEFAULT,
            if_preserve_metadata: false,
        }
    }

    /// Same request with another buffer size.
    pub fn with_buffer_size(mut self, n_buffer_size: usize) -> Self {
        self.n_buffer_size = n_buffer_size;
        self
    }

    /// Same request with metadata preservation toggled.
    pub fn with_preserve_metadata(mut self, if_preserve_metadata: bool) -> Self {
        self.if_preserve_metadata = if_preserve_metadata;
        self
    }
}

/// Suffix filter configuration for [`crate::filter::SuffixEntryFilter`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecEntryFilter {
    /// Accepted name endings, e.g. `.txt`.
    pub suffixes: BTreeSet<String>,
    /// Compare suffixes byte-for-byte when `true`, lowercased otherwise.
    pub if_case_sensitive: bool,
}

impl Default for SpecEntryFilter {
    fn default() -> Self {
        Self {
            suffixes: BTreeSet::new(),
            if_case_sensitive: true,
        }
    }
}

impl SpecEntryFilter {
    /// Build from any iterable of suffixes.
    pub fn from_suffixes<I, S>(suffixes: I, if_case_sensitive: bool) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            suffixes: suffixes.into_iter().map(Into::into).collect(),
            if_case_sensitive,
        }
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region Errors

/// Failure of a single file copy.
///
/// [`CopyFileError::bytes_copied`] is the number of bytes already written to
/// the destination; open-stage failures report `0`.
#[derive(Debug)]
pub enum CopyFileError {
    /// Source file does not exist. Nothing was written.
    NotFound {
        /// Missing path.
        path: PathBuf,
    },
    /// Source or destination could not be opened due to permissions.
    PermissionDenied {
        /// Inaccessible path.
        path: PathBuf,
        /// Underlying IO error text.
        message: String,
    },
    /// Reading the source failed.
    ReadFailure {
        /// Source path.
        path: PathBuf,
        /// Bytes written before the failure.
        n_bytes_copied: u64,
        /// Underlying IO error text.
        message: String,
    },
    /// Destination could not be created or rejected further bytes.
    WriteFailure {
        /// Destination path.
        path: PathBuf,
        /// Bytes written before the failure.
        n_bytes_copied: u64,
        /// Underlying IO error text.
        message: String,
    },
    /// All bytes were copied, applying source metadata failed.
    MetadataFailed {
        /// Destination path.
        path: PathBuf,
        /// Bytes written (the whole source).
        n_bytes_copied: u64,
        /// Underlying IO error text.
        message: String,
    },
}

impl CopyFileError {
    /// Classification without payload.
    pub fn kind(&self) -> EnumCopyErrorKind {
        match self {
            Self::NotFound { .. } => EnumCopyErrorKind::NotFound,
            Self::PermissionDenied { .. } => EnumCopyErrorKind::PermissionDenied,
            Self::ReadFailure { .. } => EnumCopyErrorKind::ReadFailure,
            Self::WriteFailure { .. } => EnumCopyErrorKind::WriteFailure,
            Self::MetadataFailed { .. } => EnumCopyErrorKind::MetadataFailed,
        }
    }

    /// Bytes successfully written before the error.
    pub fn bytes_copied(&self) -> u64 {
        match self {
            Self::NotFound { .. } | Self::PermissionDenied { .. } => 0,
            Self::ReadFailure { n_bytes_copied, .. }
            | Self::WriteFailure { n_bytes_copied, .. }
            | Self::MetadataFailed { n_bytes_copied, .. } => *n_bytes_copied,
        }
    }

    /// Path the error refers to.
    pub fn path(&self) -> &Path {
        match self {
            Self::NotFound { path }
            | Self::PermissionDenied { path, .. }
            | Self::ReadFailure { path, .. }
            | Self::WriteFailure { path, .. }
            | Self::MetadataFailed { path, .. } => path,
        }
    }
}

impl fmt::Display for CopyFileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound { path } => write!(f, "Source not found: {}", path.display()),
            Self::PermissionDenied { path, message } => {
                write!(f, "Permission denied: {} ({message})", path.display())
            }
            Self::ReadFailure {
                path,
                n_bytes_copied,
                message,
            } => write!(
                f,
                "Failed to read {} after {n_bytes_copied} bytes: {message}",
                path.display()
            ),
            Self::WriteFailure {
                path,
                n_bytes_copied,
                message,
            } => write!(
                f,
                "Failed to write {} after {n_bytes_copied} bytes: {message}",
                path.display()
            ),
            Self::MetadataFailed { path, message, .. } => {
                write!(f, "Failed to apply metadata to {}: {message}", path.display())
            }
        }
    }
}

impl std::error::Error for CopyFileError {}

/// Directory listing failures.
#[derive(Debug)]
pub enum ListDirError {
    /// Path is missing or not a directory.
    NotDirectory(PathBuf),
    /// Directory exists but could not be read.
    ReadFailed {
        /// Directory path.
        path: PathBuf,
        /// Underlying IO error text.
        message: String,
    },
}

impl fmt::Display for ListDirError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotDirectory(path) => write!(f, "Not a directory: {}", path.display()),
            Self::ReadFailed { path, message } => {
                write!(f, "Failed to read directory {}: {message}", path.display())
            }
        }
    }
}

impl std::error::Error for ListDirError {}

/// Filter construction failures.
#[derive(Debug)]
pub enum FilterBuildError {
    /// Glob or regex pattern did not compile.
    InvalidPattern(String),
}

impl fmt::Display for FilterBuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidPattern(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for FilterBuildError {}

/// Console input failures. All of them are recoverable by re-prompting.
#[derive(Debug)]
pub enum ConsoleError {
    /// Token could not be parsed as the requested type.
    InputFormat {
        /// Raw text that failed to parse.
        input: String,
    },
    /// Input ended before the expected value arrived.
    UnexpectedEof,
    /// Underlying reader/writer failed.
    Io(String),
}

impl fmt::Display for ConsoleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InputFormat { input } => write!(f, "Not an integer: `{input}`"),
            Self::UnexpectedEof => write!(f, "Input ended unexpectedly"),
            Self::Io(msg) => write!(f, "Console IO failed: {msg}"),
        }
    }
}

impl std::error::Error for ConsoleError {}

impl From<std::io::Error> for ConsoleError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e.to_string())
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
