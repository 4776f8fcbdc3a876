//! `bytekit_io_fs` v1:
//! Rust-side file I/O kernel.
//!
//! Modules:
//! - `copy`    : timed single-file copy and batched copies
//! - `filter`  : directory-entry name predicates
//! - `listing` : filtered directory listing
//! - `inspect` : path/metadata inspection
//! - `console` : line/token reading with termination token
//! - `spec`    : requests/options/errors
//! - `report`  : run-time report models
//! - `util`    : shared helper functions

pub mod console;
pub mod copy;
pub mod filter;
pub mod inspect;
pub mod listing;
pub mod report;
pub mod spec;
mod util;

pub use console::{prompt_integer, read_integer, split_tokens, wait_for_token};
pub use copy::{N_CHUNK_SIZE_MAX, copy_file, copy_files};
pub use filter::{EntryFilter, PatternEntryFilter, SuffixEntryFilter};
pub use inspect::{SpecPathInfo, inspect_path};
pub use listing::list_dir;
pub use report::{ReportCopyBatch, ReportCopyBatchBuilder, ReportCopyFile};
pub use spec::{
    ConsoleError, CopyFileError, EnumCopyErrorKind, EnumPatternMode, FilterBuildError,
    ListDirError, N_BUFFER_SIZE_DEFAULT, SpecCopyRequest, SpecEntryFilter,
};
