//! Directory listing through an optional [`EntryFilter`].

use std::fs;
use std::path::Path;

use crate::filter::EntryFilter;
use crate::spec::ListDirError;

/// List entry names of `path_dir`, sorted by name.
///
/// Files and subdirectories are both listed (non-recursive). With `filter`
/// set, only names it accepts are kept. Entries that fail to read are
/// skipped with a warning instead of aborting the listing.
pub fn list_dir<P>(path_dir: P, filter: Option<&dyn EntryFilter>) -> Result<Vec<String>, ListDirError>
where
    P: AsRef<Path>,
{
    let path_dir = path_dir.as_ref();
    if !path_dir.is_dir() {
        return Err(ListDirError::NotDirectory(path_dir.to_path_buf()));
    }

    let iter_entries = fs::read_dir(path_dir).map_err(|e| ListDirError::ReadFailed {
        path: path_dir.to_path_buf(),
        message: e.to_string(),
    })?;

    let mut l_names = Vec::new();
    for entry_res in iter_entries {
        let entry = match entry_res {
            Ok(v) => v,
            Err(e) => {
                tracing::warn!(
                    "Failed to read directory entry under {} ({e})",
                    path_dir.display()
                );
                continue;
            }
        };
        let c_name = entry.file_name().to_string_lossy().to_string();
        if filter.is_none_or(|f| f.accept(&c_name)) {
            l_names.push(c_name);
        }
    }

    l_names.sort();
    Ok(l_names)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::list_dir;
    use crate::filter::{EntryFilter, SuffixEntryFilter};
    use crate::spec::{ListDirError, SpecEntryFilter};
    use crate::util::TestDir;

    fn seed_dir(test_dir: &TestDir) {
        test_dir.write_bytes("notes.txt", b"n");
        test_dir.write_bytes("walden.JPG", b"w");
        test_dir.write_bytes("walden.jpg", b"w");
        test_dir.write_bytes("build.rs", b"b");
        fs::create_dir_all(test_dir.path().join("sub.txt")).expect("mkdir");
    }

    #[test]
    fn list_dir_unfiltered_is_sorted() {
        let test_dir = TestDir::new();
        seed_dir(&test_dir);

        let l_names = list_dir(test_dir.path(), None).expect("list");
        assert_eq!(
            l_names,
            vec!["build.rs", "notes.txt", "sub.txt", "walden.JPG", "walden.jpg"]
        );
    }

    #[test]
    fn list_dir_with_suffix_filter() {
        let test_dir = TestDir::new();
        seed_dir(&test_dir);

        let filter = SuffixEntryFilter::new(SpecEntryFilter::from_suffixes([".txt", ".JPG"], true));
        let l_names = list_dir(test_dir.path(), Some(&filter)).expect("list");
        assert_eq!(l_names, vec!["notes.txt", "sub.txt", "walden.JPG"]);

        let filter = SuffixEntryFilter::new(SpecEntryFilter::from_suffixes([".jpg"], false));
        let l_names = list_dir(test_dir.path(), Some(&filter as &dyn EntryFilter)).expect("list");
        assert_eq!(l_names, vec!["walden.JPG", "walden.jpg"]);
    }

    #[test]
    fn list_dir_empty_filter_lists_nothing() {
        let test_dir = TestDir::new();
        seed_dir(&test_dir);

        let filter = SuffixEntryFilter::new(SpecEntryFilter::default());
        assert!(list_dir(test_dir.path(), Some(&filter)).expect("list").is_empty());
    }

    #[test]
    fn list_dir_rejects_file_path() {
        let test_dir = TestDir::new();
        let path_file = test_dir.write_bytes("plain.txt", b"x");

        let res = list_dir(&path_file, None);
        assert!(matches!(res, Err(ListDirError::NotDirectory(_))));
    }
}
