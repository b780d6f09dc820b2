//! fidy - A file organizer for the command line
//!
//! This library groups the files of a directory into sub-directories named after
//! their extensions, filters them by include/exclude extension lists, simulates
//! runs without touching the disk, prunes directories left empty afterwards, and
//! persists the user's display name in a small JSON configuration file.

pub mod cli;
pub mod config;
pub mod extension_filter;
pub mod file_organizer;
pub mod output;
pub mod pruner;

pub use config::{Config, ConfigError, ConfigStore, JsonConfigStore, MemoryConfigStore};
pub use extension_filter::{ExtensionFilter, extension_of, os_extension_of};
pub use file_organizer::{FileOrganizer, OrganizeError, OrganizeOptions, OrganizeReport};
pub use output::{ConsoleReporter, Event, OutputFormatter, RecordingReporter, Reporter};
pub use pruner::{PruneReport, prune_empty};

pub use cli::{Args, CliError, run};
