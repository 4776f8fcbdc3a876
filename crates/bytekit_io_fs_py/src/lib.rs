use std::collections::BTreeMap;

use bytekit_io_fs::{
    CopyFileError, EntryFilter, ListDirError, N_BUFFER_SIZE_DEFAULT, ReportCopyFile,
    SpecCopyRequest, SpecEntryFilter, SpecPathInfo, SuffixEntryFilter, copy_file, inspect_path,
    list_dir,
};
use pyo3::exceptions::{
    PyFileNotFoundError, PyNotADirectoryError, PyOSError, PyPermissionError,
};
use pyo3::prelude::*;

const N_BRIDGE_ABI_VERSION: u64 = 1;
const C_BRIDGE_CONTRACT_VERSION: &str = "bytekit.fs.copy_file.v1";
const C_BRIDGE_TRANSPORT: &str = "rust_native";

#[pyclass(name = "ReportCopyFile")]
#[derive(Debug, Clone)]
struct PyReportCopyFile {
    #[pyo3(get)]
    n_bytes_copied: u64,
    #[pyo3(get)]
    n_elapsed_nanos: u64,
}

impl From<ReportCopyFile> for PyReportCopyFile {
    fn from(report_copy: ReportCopyFile) -> Self {
        Self {
            n_bytes_copied: report_copy.n_bytes_copied,
            n_elapsed_nanos: report_copy.n_elapsed_nanos,
        }
    }
}

impl PyReportCopyFile {
    fn to_report(&self) -> ReportCopyFile {
        ReportCopyFile {
            n_bytes_copied: self.n_bytes_copied,
            n_elapsed_nanos: self.n_elapsed_nanos,
        }
    }
}

#[pymethods]
impl PyReportCopyFile {
    #[getter]
    fn elapsed_millis(&self) -> f64 {
        self.to_report().elapsed_millis()
    }

    fn to_dict(&self) -> BTreeMap<String, u64> {
        self.to_report().to_dict()
    }

    #[pyo3(signature = (prefix = "[COPY]"))]
    fn format(&self, prefix: &str) -> String {
        self.to_report().format(prefix)
    }

    fn __str__(&self) -> String {
        self.to_report().to_string()
    }
}

#[pyclass(name = "PathInfo")]
#[derive(Debug, Clone)]
struct PyPathInfo {
    #[pyo3(get)]
    path: String,
    #[pyo3(get)]
    path_absolute: Option<String>,
    #[pyo3(get)]
    path_canonical: Option<String>,
    #[pyo3(get)]
    path_parent: Option<String>,
    #[pyo3(get)]
    if_exists: bool,
    #[pyo3(get)]
    if_is_file: bool,
    #[pyo3(get)]
    if_is_dir: bool,
    #[pyo3(get)]
    n_len: Option<u64>,
    #[pyo3(get)]
    n_modified_unix_secs: Option<i64>,
    c_summary: String,
}

impl From<SpecPathInfo> for PyPathInfo {
    fn from(spec_info: SpecPathInfo) -> Self {
        let to_text = |p: Option<std::path::PathBuf>| p.map(|v| v.to_string_lossy().to_string());
        let c_summary = spec_info.to_string();
        Self {
            path: spec_info.path.to_string_lossy().to_string(),
            path_absolute: to_text(spec_info.path_absolute),
            path_canonical: to_text(spec_info.path_canonical),
            path_parent: to_text(spec_info.path_parent),
            if_exists: spec_info.if_exists,
            if_is_file: spec_info.if_is_file,
            if_is_dir: spec_info.if_is_dir,
            n_len: spec_info.n_len,
            n_modified_unix_secs: spec_info.n_modified_unix_secs,
            c_summary,
        }
    }
}

#[pymethods]
impl PyPathInfo {
    fn __str__(&self) -> String {
        self.c_summary.clone()
    }
}

fn map_copy_file_error(exception: CopyFileError) -> PyErr {
    let message = exception.to_string();
    match exception {
        CopyFileError::NotFound { .. } => PyFileNotFoundError::new_err(message),
        CopyFileError::PermissionDenied { .. } => PyPermissionError::new_err(message),
        CopyFileError::ReadFailure { .. }
        | CopyFileError::WriteFailure { .. }
        | CopyFileError::MetadataFailed { .. } => PyOSError::new_err(message),
    }
}

fn map_list_dir_error(exception: ListDirError) -> PyErr {
    let message = exception.to_string();
    match exception {
        ListDirError::NotDirectory(_) => PyNotADirectoryError::new_err(message),
        ListDirError::ReadFailed { .. } => PyOSError::new_err(message),
    }
}

#[pyfunction(name = "copy_file")]
#[pyo3(signature = (
    path_source,
    path_destination,
    buffer_size = N_BUFFER_SIZE_DEFAULT,
    preserve_metadata = false
))]
fn copy_file_py(
    py: Python<'_>,
    path_source: String,
    path_destination: String,
    buffer_size: usize,
    preserve_metadata: bool,
) -> PyResult<PyReportCopyFile> {
    let spec_request = SpecCopyRequest::new(path_source, path_destination)
        .with_buffer_size(buffer_size)
        .with_preserve_metadata(preserve_metadata);

    let report_copy = py.allow_threads(|| copy_file(&spec_request));
    let report_copy = report_copy.map_err(map_copy_file_error)?;
    Ok(PyReportCopyFile::from(report_copy))
}

#[pyfunction(name = "list_dir")]
#[pyo3(signature = (path_dir, suffixes = None, case_sensitive = true))]
fn list_dir_py(
    py: Python<'_>,
    path_dir: String,
    suffixes: Option<Vec<String>>,
    case_sensitive: bool,
) -> PyResult<Vec<String>> {
    let filter = suffixes.map(|l_suffixes| {
        SuffixEntryFilter::new(SpecEntryFilter::from_suffixes(l_suffixes, case_sensitive))
    });

    let l_names = py.allow_threads(|| {
        list_dir(
            &path_dir,
            filter.as_ref().map(|f| f as &dyn EntryFilter),
        )
    });
    l_names.map_err(map_list_dir_error)
}

#[pyfunction(name = "inspect_path")]
fn inspect_path_py(py: Python<'_>, path: String) -> PyPathInfo {
    PyPathInfo::from(py.allow_threads(|| inspect_path(&path)))
}

#[pymodule]
fn _bytekit_io_fs_rs(module: &Bound<'_, PyModule>) -> PyResult<()> {
    module.add_class::<PyReportCopyFile>()?;
    module.add_class::<PyPathInfo>()?;
    module.add_function(wrap_pyfunction!(copy_file_py, module)?)?;
    module.add_function(wrap_pyfunction!(list_dir_py, module)?)?;
    module.add_function(wrap_pyfunction!(inspect_path_py, module)?)?;
    module.add("__bridge_abi__", N_BRIDGE_ABI_VERSION)?;
    module.add("__bridge_contract__", C_BRIDGE_CONTRACT_VERSION)?;
    module.add("__bridge_transport__", C_BRIDGE_TRANSPORT)?;
    Ok(())
}
