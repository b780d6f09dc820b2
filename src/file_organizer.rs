/// File organization by extension.
///
/// This module moves the top-level files of a directory into sub-directories named
/// after their extensions (`dir/report.pdf` -> `dir/pdf/report.pdf`). Only the
/// listing of the target directory itself is fatal; every per-entry failure is
/// reported and the pass moves on to the next entry.
use crate::extension_filter::{ExtensionFilter, os_extension_of};
use crate::output::{Event, Reporter};
use std::collections::{BTreeMap, HashSet};
use std::fs::{self, DirEntry, FileType};
use std::path::{Path, PathBuf};

/// Errors that can occur while organizing or pruning a directory.
#[derive(Debug)]
pub enum OrganizeError {
    /// The target directory could not be listed. Aborts the whole run.
    DirectoryAccess {
        path: PathBuf,
        source: std::io::Error,
    },
    /// A sub-directory could not be listed during cleanup. Only that branch is
    /// skipped.
    SubdirectoryAccess {
        path: PathBuf,
        source: std::io::Error,
    },
    /// A listing entry (or its file type) could not be read.
    EntryRead {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Failed to create an extension directory.
    DirectoryCreate {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Failed to move a file to its extension directory.
    Move {
        source: PathBuf,
        destination: PathBuf,
        source_error: std::io::Error,
    },
    /// Failed to remove an empty directory.
    Delete {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl std::fmt::Display for OrganizeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DirectoryAccess { path, source } => {
                write!(f, "Error reading directory {}: {}", path.display(), source)
            }
            Self::SubdirectoryAccess { path, source } => {
                write!(f, "Error reading subdirectory {}: {}", path.display(), source)
            }
            Self::EntryRead { path, source } => {
                write!(f, "Error reading entry in {}: {}", path.display(), source)
            }
            Self::DirectoryCreate { path, source } => {
                write!(
                    f,
                    "Failed to create directory {}: {}",
                    path.display(),
                    source
                )
            }
            Self::Move {
                source,
                destination,
                source_error,
            } => {
                write!(
                    f,
                    "Failed to move {} to {}: {}",
                    source.display(),
                    destination.display(),
                    source_error
                )
            }
            Self::Delete { path, source } => {
                write!(
                    f,
                    "Error deleting directory {}: {}",
                    path.display(),
                    source
                )
            }
        }
    }
}

impl std::error::Error for OrganizeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::DirectoryAccess { source, .. }
            | Self::SubdirectoryAccess { source, .. }
            | Self::EntryRead { source, .. }
            | Self::DirectoryCreate { source, .. }
            | Self::Delete { source, .. } => Some(source),
            Self::Move { source_error, .. } => Some(source_error),
        }
    }
}

/// Result type for file organization operations.
pub type OrganizeResult<T> = Result<T, OrganizeError>;

/// Mode flags for one organize run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OrganizeOptions {
    /// Report every directory creation and move while still performing them.
    pub verbose: bool,
    /// Report what would happen and leave the filesystem untouched.
    pub dry_run: bool,
}

impl OrganizeOptions {
    fn reports_actions(&self) -> bool {
        self.verbose || self.dry_run
    }
}

/// Outcome of one organize run.
#[derive(Debug, Default)]
pub struct OrganizeReport {
    /// Moves attempted (in dry-run: moves that would have been attempted).
    pub attempted: usize,
    /// Moves that actually succeeded. Always zero in dry-run.
    pub moved: usize,
    /// Extension directories created (in dry-run: that would have been created).
    pub created_dirs: Vec<PathBuf>,
    /// Attempted moves grouped by extension.
    pub by_extension: BTreeMap<String, usize>,
    /// Non-fatal failures, in the order they happened.
    pub failures: Vec<OrganizeError>,
}

impl OrganizeReport {
    /// Returns true if no entry failed.
    pub fn is_complete_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Organizes files by moving them into extension sub-directories.
pub struct FileOrganizer;

impl FileOrganizer {
    /// Moves every top-level file of `target_dir` into `target_dir/<extension>/`.
    ///
    /// Entries are processed in listing order. Directories, files without an
    /// extension and files rejected by `filter` stay where they are. Each extension
    /// directory is created at most once per run.
    ///
    /// # Errors
    ///
    /// Returns `OrganizeError::DirectoryAccess` if `target_dir` cannot be listed; in
    /// that case no entry has been touched. Every other failure ends up in
    /// [`OrganizeReport::failures`] and is also sent to `reporter`.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use fidy::extension_filter::ExtensionFilter;
    /// use fidy::file_organizer::{FileOrganizer, OrganizeOptions};
    /// use fidy::output::ConsoleReporter;
    /// use std::path::Path;
    ///
    /// let report = FileOrganizer::organize(
    ///     Path::new("/path/to/downloads"),
    ///     &ExtensionFilter::from_lists("", "part"),
    ///     OrganizeOptions { verbose: true, dry_run: false },
    ///     &mut ConsoleReporter,
    /// );
    ///
    /// match report {
    ///     Ok(report) => println!("Moved {} files", report.moved),
    ///     Err(e) => eprintln!("Organization failed: {}", e),
    /// }
    /// ```
    pub fn organize(
        target_dir: &Path,
        filter: &ExtensionFilter,
        options: OrganizeOptions,
        reporter: &mut dyn Reporter,
    ) -> OrganizeResult<OrganizeReport> {
        let entries = fs::read_dir(target_dir).map_err(|e| OrganizeError::DirectoryAccess {
            path: target_dir.to_path_buf(),
            source: e,
        })?;

        let mut report = OrganizeReport::default();
        let mut created_dirs: HashSet<PathBuf> = HashSet::new();

        for entry in entries {
            let (entry, file_type) = match read_entry(target_dir, entry) {
                Ok(read) => read,
                Err(e) => {
                    record_failure(&mut report, reporter, e);
                    continue;
                }
            };
            if file_type.is_dir() {
                continue;
            }

            let file_name = entry.file_name();
            let Some(extension) = os_extension_of(&file_name) else {
                continue;
            };
            if !filter.allows_os(extension) {
                continue;
            }

            let extension_dir = target_dir.join(extension);
            if !created_dirs.contains(&extension_dir) && !extension_dir.exists() {
                if options.reports_actions() {
                    reporter.report(Event::CreatingDirectory(extension_dir.clone()));
                }
                if !options.dry_run
                    && let Err(e) = fs::create_dir(&extension_dir)
                {
                    record_failure(
                        &mut report,
                        reporter,
                        OrganizeError::DirectoryCreate {
                            path: extension_dir.clone(),
                            source: e,
                        },
                    );
                } else {
                    report.created_dirs.push(extension_dir.clone());
                }
                created_dirs.insert(extension_dir.clone());
            }

            let source = target_dir.join(&file_name);
            let destination = extension_dir.join(&file_name);
            if options.reports_actions() {
                reporter.report(Event::MovingFile {
                    source: source.clone(),
                    destination: destination.clone(),
                });
            }

            report.attempted += 1;
            *report
                .by_extension
                .entry(extension.to_string_lossy().into_owned())
                .or_insert(0) += 1;

            if !options.dry_run {
                match fs::rename(&source, &destination) {
                    Ok(()) => report.moved += 1,
                    Err(e) => record_failure(
                        &mut report,
                        reporter,
                        OrganizeError::Move {
                            source,
                            destination,
                            source_error: e,
                        },
                    ),
                }
            }
        }

        Ok(report)
    }
}

/// Unwraps one listing entry of `dir` together with its file type.
///
/// The file type is read without following symbolic links.
pub(crate) fn read_entry(
    dir: &Path,
    entry: std::io::Result<DirEntry>,
) -> OrganizeResult<(DirEntry, FileType)> {
    let entry = entry.map_err(|e| OrganizeError::EntryRead {
        path: dir.to_path_buf(),
        source: e,
    })?;
    let file_type = entry.file_type().map_err(|e| OrganizeError::EntryRead {
        path: entry.path(),
        source: e,
    })?;
    Ok((entry, file_type))
}

fn record_failure(report: &mut OrganizeReport, reporter: &mut dyn Reporter, error: OrganizeError) {
    reporter.report(Event::Failure(error.to_string()));
    report.failures.push(error);
}
