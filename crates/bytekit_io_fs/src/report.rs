//! Copy report models and mutable batch report builder.

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

use crate::spec::CopyFileError;

/// Outcome of one successful `copy_file` run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ReportCopyFile {
    /// Exact number of bytes written to the destination.
    pub n_bytes_copied: u64,
    /// Time spent in the transfer loop, monotonic clock.
    pub n_elapsed_nanos: u64,
}

impl ReportCopyFile {
    /// Elapsed time in milliseconds with sub-millisecond precision.
    pub fn elapsed_millis(&self) -> f64 {
        self.n_elapsed_nanos as f64 / 1_000_000.0
    }

    /// Machine-readable counters.
    pub fn to_dict(&self) -> BTreeMap<String, u64> {
        let mut dict_counts = BTreeMap::new();
        dict_counts.insert("n_bytes_copied".to_string(), self.n_bytes_copied);
        dict_counts.insert("n_elapsed_nanos".to_string(), self.n_elapsed_nanos);
        dict_counts
    }

    /// Human-readable one-line summary.
    pub fn format(&self, prefix: &str) -> String {
        format!(
            "{prefix} bytes={} elapsed_ms={:.3}",
            self.n_bytes_copied,
            self.elapsed_millis()
        )
    }
}

impl fmt::Display for ReportCopyFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format("[COPY]"))
    }
}

/// Aggregate outcome of one `copy_files` run.
#[derive(Debug, Default)]
pub struct ReportCopyBatch {
    /// Number of requests that completed.
    pub cnt_copied: u64,
    /// Number of requests that failed.
    pub cnt_failed: u64,
    /// Sum of bytes written, failed partial copies included.
    pub n_bytes_total: u64,
    /// Per-request outcome, in request order.
    pub results: Vec<(PathBuf, Result<ReportCopyFile, CopyFileError>)>,
    /// Non-fatal warnings collected during the run.
    pub warnings: Vec<String>,
}

impl ReportCopyBatch {
    /// Number of failed requests.
    pub fn error_count(&self) -> usize {
        self.results.iter().filter(|(_, res)| res.is_err()).count()
    }

    /// Number of collected warnings.
    pub fn warning_count(&self) -> usize {
        self.warnings.len()
    }

    /// Machine-readable counters.
    pub fn to_dict(&self) -> BTreeMap<String, u64> {
        let mut dict_counts = BTreeMap::new();
        dict_counts.insert("cnt_copied".to_string(), self.cnt_copied);
        dict_counts.insert("cnt_failed".to_string(), self.cnt_failed);
        dict_counts.insert("n_bytes_total".to_string(), self.n_bytes_total);
        dict_counts.insert("cnt_warnings".to_string(), self.warning_count() as u64);
        dict_counts
    }

    /// Human-readable one-line summary.
    pub fn format(&self, prefix: &str) -> String {
        let dict_counts = self.to_dict();
        format!(
            "{prefix} copied={} failed={} bytes={} warnings={}",
            dict_counts["cnt_copied"],
            dict_counts["cnt_failed"],
            dict_counts["n_bytes_total"],
            dict_counts["cnt_warnings"]
        )
    }
}

impl fmt::Display for ReportCopyBatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format("[BATCH]"))
    }
}

/// Mutable accumulator for batch statistics.
#[derive(Debug, Default)]
pub struct ReportCopyBatchBuilder {
    /// See [`ReportCopyBatch::cnt_copied`].
    pub cnt_copied: u64,
    /// See [`ReportCopyBatch::cnt_failed`].
    pub cnt_failed: u64,
    /// See [`ReportCopyBatch::n_bytes_total`].
    pub n_bytes_total: u64,
    /// See [`ReportCopyBatch::results`].
    pub results: Vec<(PathBuf, Result<ReportCopyFile, CopyFileError>)>,
    /// See [`ReportCopyBatch::warnings`].
    pub warnings: Vec<String>,
}

impl ReportCopyBatchBuilder {
    /// Record one request outcome and update counters.
    pub fn add_result(
        &mut self,
        path_destination: PathBuf,
        res_copy: Result<ReportCopyFile, CopyFileError>,
    ) {
        match &res_copy {
            Ok(report) => {
                self.cnt_copied += 1;
                self.n_bytes_total += report.n_bytes_copied;
            }
            Err(e) => {
                self.cnt_failed += 1;
                self.n_bytes_total += e.bytes_copied();
            }
        }
        self.results.push((path_destination, res_copy));
    }

    /// Add warning message.
    pub fn add_warning(&mut self, warning: String) {
        self.warnings.push(warning);
    }

    /// Finalize builder into immutable report.
    pub fn build(self) -> ReportCopyBatch {
        ReportCopyBatch {
            cnt_copied: self.cnt_copied,
            cnt_failed: self.cnt_failed,
            n_bytes_total: self.n_bytes_total,
            results: self.results,
            warnings: self.warnings,
        }
    }
}
