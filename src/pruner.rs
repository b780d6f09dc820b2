//! Removal of directories left empty after organizing.
//!
//! The walk is depth-first and post-order: every child is pruned before its parent
//! is re-listed, so a chain of nested empty directories collapses in one pass.
//! The directory the walk starts from is never removed itself.

use crate::file_organizer::{OrganizeError, read_entry};
use crate::output::{Event, Reporter};
use std::fs;
use std::path::{Path, PathBuf};

/// Outcome of one prune pass.
#[derive(Debug, Default)]
pub struct PruneReport {
    /// Directories removed (in dry-run: directories that would have been removed).
    pub removed: Vec<PathBuf>,
    /// Listing and deletion failures. None of them stop the pass.
    pub failures: Vec<OrganizeError>,
}

impl PruneReport {
    /// Returns true if every branch could be visited and every removal succeeded.
    pub fn is_complete_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Recursively deletes every empty sub-directory of `dir`.
///
/// In dry-run mode nothing is removed, so a parent whose children would have been
/// deleted still lists those children and is left out of the report.
///
/// # Examples
///
/// ```no_run
/// use fidy::output::ConsoleReporter;
/// use fidy::pruner::prune_empty;
/// use std::path::Path;
///
/// let report = prune_empty(Path::new("/path/to/downloads"), false, &mut ConsoleReporter);
/// println!("Removed {} directories", report.removed.len());
/// ```
pub fn prune_empty(dir: &Path, dry_run: bool, reporter: &mut dyn Reporter) -> PruneReport {
    let mut report = PruneReport::default();
    prune_children(dir, dry_run, reporter, &mut report);
    report
}

fn prune_children(
    dir: &Path,
    dry_run: bool,
    reporter: &mut dyn Reporter,
    report: &mut PruneReport,
) {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            record_failure(
                report,
                reporter,
                OrganizeError::SubdirectoryAccess {
                    path: dir.to_path_buf(),
                    source: e,
                },
            );
            return;
        }
    };

    for entry in entries {
        let (entry, file_type) = match read_entry(dir, entry) {
            Ok(read) => read,
            Err(e) => {
                record_failure(report, reporter, e);
                continue;
            }
        };
        if !file_type.is_dir() {
            continue;
        }

        let sub_dir = entry.path();
        prune_children(&sub_dir, dry_run, reporter, report);

        let is_empty = match fs::read_dir(&sub_dir) {
            Ok(mut remaining) => remaining.next().is_none(),
            Err(e) => {
                record_failure(
                    report,
                    reporter,
                    OrganizeError::SubdirectoryAccess {
                        path: sub_dir,
                        source: e,
                    },
                );
                continue;
            }
        };
        if !is_empty {
            continue;
        }

        reporter.report(Event::DeletingEmptyDirectory(sub_dir.clone()));
        if dry_run {
            report.removed.push(sub_dir);
            continue;
        }

        match fs::remove_dir(&sub_dir) {
            Ok(()) => report.removed.push(sub_dir),
            Err(e) => record_failure(
                report,
                reporter,
                OrganizeError::Delete {
                    path: sub_dir,
                    source: e,
                },
            ),
        }
    }
}

fn record_failure(report: &mut PruneReport, reporter: &mut dyn Reporter, error: OrganizeError) {
    reporter.report(Event::Failure(error.to_string()));
    report.failures.push(error);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::RecordingReporter;
    use tempfile::TempDir;

    #[test]
    fn test_removes_empty_keeps_non_empty() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let base = temp_dir.path();
        fs::create_dir(base.join("txt")).expect("Failed to create directory");
        fs::create_dir(base.join("jpg")).expect("Failed to create directory");
        fs::write(base.join("jpg/b.jpg"), "x").expect("Failed to write file");

        let mut reporter = RecordingReporter::new();
        let report = prune_empty(base, false, &mut reporter);

        assert!(report.is_complete_success());
        assert_eq!(report.removed, vec![base.join("txt")]);
        assert!(!base.join("txt").exists());
        assert!(base.join("jpg/b.jpg").is_file());
        assert_eq!(
            reporter.events(),
            &[Event::DeletingEmptyDirectory(base.join("txt"))]
        );
    }

    #[test]
    fn test_nested_empty_chain_collapses() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let base = temp_dir.path();
        fs::create_dir_all(base.join("a/b/c")).expect("Failed to create directories");

        let mut reporter = RecordingReporter::new();
        let report = prune_empty(base, false, &mut reporter);

        assert_eq!(
            report.removed,
            vec![base.join("a/b/c"), base.join("a/b"), base.join("a")]
        );
        assert!(!base.join("a").exists());
        assert!(base.exists());
    }

    #[test]
    fn test_dry_run_removes_nothing() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let base = temp_dir.path();
        fs::create_dir_all(base.join("a/b")).expect("Failed to create directories");

        let mut reporter = RecordingReporter::new();
        let report = prune_empty(base, true, &mut reporter);

        // Only the leaf is reported: "a" still lists "b" because nothing was deleted.
        assert_eq!(report.removed, vec![base.join("a/b")]);
        assert!(base.join("a/b").is_dir());
    }

    #[test]
    fn test_directory_with_files_is_kept() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let base = temp_dir.path();
        fs::create_dir_all(base.join("keep/empty")).expect("Failed to create directories");
        fs::write(base.join("keep/file.txt"), "x").expect("Failed to write file");

        let report = prune_empty(base, false, &mut RecordingReporter::new());

        assert_eq!(report.removed, vec![base.join("keep/empty")]);
        assert!(base.join("keep/file.txt").is_file());
    }

    #[test]
    fn test_unreadable_root_is_reported() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let missing = temp_dir.path().join("missing");

        let mut reporter = RecordingReporter::new();
        let report = prune_empty(&missing, false, &mut reporter);

        assert!(report.removed.is_empty());
        assert_eq!(report.failures.len(), 1);
        assert!(matches!(
            report.failures[0],
            OrganizeError::SubdirectoryAccess { .. }
        ));
        assert_eq!(reporter.failure_count(), 1);
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinked_directories_are_not_followed() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let base = temp_dir.path();
        let outside = TempDir::new().expect("Failed to create temp directory");
        fs::create_dir(outside.path().join("empty")).expect("Failed to create directory");
        std::os::unix::fs::symlink(outside.path(), base.join("link"))
            .expect("Failed to create symlink");

        let mut reporter = RecordingReporter::new();
        let report = prune_empty(base, false, &mut reporter);

        assert!(report.is_complete_success());
        assert!(report.removed.is_empty());
        assert!(outside.path().join("empty").is_dir());
    }
}
