//! Output formatting and styling module.
//!
//! Provides a centralized interface for all CLI output, including colored output
//! and formatted tables. The organizer and pruner never print directly: they emit
//! [`Event`]s to a [`Reporter`], and the CLI decides how those events look.

use colored::*;
use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

/// Something worth telling the user about during an organize or prune pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// A target sub-directory is about to be created.
    CreatingDirectory(PathBuf),
    /// A file is about to be moved into its extension directory.
    MovingFile { source: PathBuf, destination: PathBuf },
    /// An empty directory is about to be removed.
    DeletingEmptyDirectory(PathBuf),
    /// A non-fatal failure; the pass carries on with the next entry.
    Failure(String),
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Event::CreatingDirectory(path) => write!(f, "Creating directory {}", path.display()),
            Event::MovingFile {
                source,
                destination,
            } => write!(
                f,
                "Moving file: {} -> {}",
                source.display(),
                destination.display()
            ),
            Event::DeletingEmptyDirectory(path) => {
                write!(f, "Deleting empty directory: {}", path.display())
            }
            Event::Failure(message) => write!(f, "{}", message),
        }
    }
}

/// Receives events from the organizer and the pruner.
pub trait Reporter {
    fn report(&mut self, event: Event);
}

/// Prints every event to the terminal through [`OutputFormatter`].
#[derive(Debug, Default)]
pub struct ConsoleReporter;

impl Reporter for ConsoleReporter {
    fn report(&mut self, event: Event) {
        match &event {
            Event::CreatingDirectory(_) => OutputFormatter::header(&event.to_string()),
            Event::MovingFile { .. } => OutputFormatter::plain(&event.to_string()),
            Event::DeletingEmptyDirectory(_) => OutputFormatter::warning(&event.to_string()),
            Event::Failure(message) => OutputFormatter::error(message),
        }
    }
}

/// Keeps every event in memory, in the order it was reported.
#[derive(Debug, Default)]
pub struct RecordingReporter {
    events: Vec<Event>,
}

impl RecordingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// All events reported so far.
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Events rendered the way the console would show them.
    pub fn lines(&self) -> Vec<String> {
        self.events.iter().map(ToString::to_string).collect()
    }

    /// Number of failure events.
    pub fn failure_count(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, Event::Failure(_)))
            .count()
    }
}

impl Reporter for RecordingReporter {
    fn report(&mut self, event: Event) {
        self.events.push(event);
    }
}

/// Manages all CLI output with consistent styling and formatting.
///
/// This struct provides methods for:
/// - Success messages (green with ✓)
/// - Error messages (red with ✗)
/// - Warning messages (yellow with ⚠)
/// - Info messages (cyan)
/// - Summary tables with per-extension statistics
pub struct OutputFormatter;

impl OutputFormatter {
    /// Prints a success message in green with a checkmark.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use fidy::output::OutputFormatter;
    /// OutputFormatter::success("Files organized by extension in ~/Downloads");
    /// ```
    pub fn success(message: &str) {
        println!("{} {}", "✓".green(), message);
    }

    /// Prints an error message in red with an X mark.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use fidy::output::OutputFormatter;
    /// OutputFormatter::error("Failed to move file");
    /// ```
    pub fn error(message: &str) {
        eprintln!("{} {}", "✗".red(), message);
    }

    /// Prints a warning message in yellow with a warning symbol.
    pub fn warning(message: &str) {
        println!("{} {}", "⚠".yellow(), message);
    }

    /// Prints an info message in cyan.
    pub fn info(message: &str) {
        println!("{}", message.cyan());
    }

    /// Prints a regular message without styling.
    pub fn plain(message: &str) {
        println!("{}", message);
    }

    /// Prints a section header.
    pub fn header(header: &str) {
        println!("\n{}", header.bold());
    }

    /// Prints a summary table with file counts by extension.
    ///
    /// # Arguments
    ///
    /// * `extension_counts` - Map of extension directory names to file counts
    /// * `total_files` - Total number of files organized
    ///
    /// # Example
    ///
    /// ```no_run
    /// use fidy::output::OutputFormatter;
    /// use std::collections::BTreeMap;
    ///
    /// let mut counts = BTreeMap::new();
    /// counts.insert("pdf".to_string(), 15);
    /// counts.insert("jpg".to_string(), 8);
    /// OutputFormatter::summary_table(&counts, 23);
    /// ```
    pub fn summary_table(extension_counts: &BTreeMap<String, usize>, total_files: usize) {
        Self::header("SUMMARY");

        let max_ext_len = extension_counts
            .keys()
            .map(|name| name.len())
            .max()
            .unwrap_or(0)
            .max(9); // At least "Extension" width

        println!(
            "{:<width$} | {}",
            "Extension".bold(),
            "Files".bold(),
            width = max_ext_len
        );
        println!("{}", "-".repeat(max_ext_len + 10));

        for (extension, count) in extension_counts {
            println!(
                "{:<width$} | {} {}",
                extension,
                count.to_string().green(),
                plural_files(*count),
                width = max_ext_len
            );
        }

        println!("{}", "-".repeat(max_ext_len + 10));
        println!(
            "{:<width$} | {} {}",
            "Total".bold(),
            total_files.to_string().green().bold(),
            plural_files(total_files),
            width = max_ext_len
        );
    }

    /// Prints a dry-run notice message.
    pub fn dry_run_notice(message: &str) {
        println!("{}", format!("[DRY RUN] {}", message).yellow());
    }
}

fn plural_files(count: usize) -> &'static str {
    if count == 1 { "file" } else { "files" }
}
