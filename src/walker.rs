use crate::error::Result;
use crate::github::{ContentEntry, EntryType, RepositoryApi};
use crate::model::FileRecord;
use indicatif::{ProgressBar, ProgressStyle};
use std::collections::VecDeque;
use tracing::{debug, info};

/// Number of `\n` bytes in `data`.
pub fn count_lines(data: &[u8]) -> u64 {
    data.iter().filter(|&&b| b == b'\n').count() as u64
}

/// Breadth-first walk of the whole file tree, one record per non-directory entry.
pub fn walk_repository(api: &dyn RepositoryApi, show_progress: bool) -> Result<Vec<FileRecord>> {
    let pb = if show_progress {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        pb.set_message("Walking repository tree...");
        pb
    } else {
        ProgressBar::hidden()
    };

    let mut queue: VecDeque<ContentEntry> = api.list_directory("")?.into();
    let mut records = Vec::new();

    while let Some(entry) = queue.pop_front() {
        if entry.is_dir() {
            debug!("Descending into {}", entry.path);
            queue.extend(api.list_directory(&entry.path)?);
            continue;
        }

        // submodules point at another repository and carry no content
        let line_count = if entry.entry_type == EntryType::Submodule {
            0
        } else {
            count_lines(&api.file_content(&entry.path)?)
        };

        records.push(FileRecord::new(entry.path, entry.name, line_count));
        pb.set_message(format!("Walked {} files", records.len()));
        pb.tick();
    }

    pb.finish_and_clear();
    info!("Walked {} files", records.len());
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::InsightsError;
    use crate::model::{ContributorStat, Extension};
    use chrono::{DateTime, Utc};
    use std::cell::RefCell;
    use std::collections::HashMap;

    #[derive(Default)]
    struct FakeTree {
        dirs: HashMap<String, Vec<ContentEntry>>,
        files: HashMap<String, Vec<u8>>,
        fetched: RefCell<Vec<String>>,
    }

    fn entry(path: &str, entry_type: EntryType) -> ContentEntry {
        ContentEntry {
            name: path.rsplit('/').next().unwrap().to_string(),
            path: path.to_string(),
            entry_type,
        }
    }

    impl RepositoryApi for FakeTree {
        fn list_directory(&self, path: &str) -> Result<Vec<ContentEntry>> {
            self.dirs
                .get(path)
                .cloned()
                .ok_or_else(|| InsightsError::api(404, path, "Not Found"))
        }

        fn file_content(&self, path: &str) -> Result<Vec<u8>> {
            self.fetched.borrow_mut().push(path.to_string());
            self.files
                .get(path)
                .cloned()
                .ok_or_else(|| InsightsError::api(404, path, "Not Found"))
        }

        fn commit_dates(&self) -> Result<Vec<DateTime<Utc>>> {
            Ok(Vec::new())
        }

        fn contributor_stats(&self) -> Result<Vec<ContributorStat>> {
            Ok(Vec::new())
        }
    }

    #[test]
    fn counts_newline_bytes_only() {
        assert_eq!(count_lines(b""), 0);
        assert_eq!(count_lines(b"no newline"), 0);
        assert_eq!(count_lines(b"a\nb\n"), 2);
        assert_eq!(count_lines(b"a\r\nb"), 1);
        assert_eq!(count_lines(&[0, 159, b'\n', 255]), 1);
    }

    #[test]
    fn walks_nested_directories_breadth_first() {
        let mut tree = FakeTree::default();
        tree.dirs.insert(
            String::new(),
            vec![entry("src", EntryType::Dir), entry("README", EntryType::File)],
        );
        tree.dirs.insert(
            "src".into(),
            vec![entry("src/lib.rs", EntryType::File), entry("src/deep", EntryType::Dir)],
        );
        tree.dirs
            .insert("src/deep".into(), vec![entry("src/deep/mod.rs", EntryType::File)]);
        tree.files.insert("README".into(), b"one\ntwo\nthree\n".to_vec());
        tree.files.insert("src/lib.rs".into(), b"fn main() {}\n".to_vec());
        tree.files.insert("src/deep/mod.rs".into(), Vec::new());

        let records = walk_repository(&tree, false).unwrap();
        let paths: Vec<_> = records.iter().map(|r| r.path.as_str()).collect();
        assert_eq!(paths, ["README", "src/lib.rs", "src/deep/mod.rs"]);
        assert_eq!(records[0].line_count, 3);
        assert_eq!(records[0].extension, Extension::None);
        assert_eq!(records[1].name, "lib.rs");
        assert_eq!(records[1].extension.label(), ".rs");
        assert_eq!(records[2].line_count, 0);
    }

    #[test]
    fn submodules_are_recorded_without_fetching() {
        let mut tree = FakeTree::default();
        tree.dirs
            .insert(String::new(), vec![entry("vendor-lib", EntryType::Submodule)]);

        let records = walk_repository(&tree, false).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].line_count, 0);
        assert!(tree.fetched.borrow().is_empty());
    }

    #[test]
    fn symlinks_and_unknown_entries_count_as_files() {
        let mut tree = FakeTree::default();
        tree.dirs.insert(
            String::new(),
            vec![
                entry("latest.md", EntryType::Symlink),
                entry("odd-entry", EntryType::Other),
            ],
        );
        tree.files.insert("latest.md".into(), b"# notes\n\nsee above\n".to_vec());
        tree.files.insert("odd-entry".into(), Vec::new());

        let records = walk_repository(&tree, false).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].line_count, 3);
        assert_eq!(records[0].extension.label(), ".md");
        assert_eq!(records[1].line_count, 0);
        assert_eq!(*tree.fetched.borrow(), ["latest.md", "odd-entry"]);
    }

    #[test]
    fn fetch_failure_propagates() {
        let mut tree = FakeTree::default();
        tree.dirs
            .insert(String::new(), vec![entry("missing.txt", EntryType::File)]);

        let err = walk_repository(&tree, false).unwrap_err();
        assert!(matches!(err, InsightsError::Api { status: 404, .. }));
    }
}
