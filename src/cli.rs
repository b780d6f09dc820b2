//! Command-line interface module for fidy.
//!
//! This module handles all CLI-related functionality including:
//! - Flag parsing, with Go-style single-dash long flags (`-dir .`)
//! - Greetings and the persisted display name
//! - Organization and empty-directory cleanup orchestration
//! - Help output

use crate::config::{Config, ConfigStore};
use crate::extension_filter::ExtensionFilter;
use crate::file_organizer::{FileOrganizer, OrganizeError, OrganizeOptions, OrganizeReport};
use crate::output::{OutputFormatter, Reporter};
use crate::pruner::{PruneReport, prune_empty};
use clap::Parser;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Long flags that may also be spelled with a single dash.
const LONG_FLAGS: &[&str] = &[
    "name",
    "dir",
    "include",
    "exclude",
    "verbose",
    "dryrun",
    "dry-run",
    "cleanAll",
    "clean-all",
    "help",
    "version",
];

const BANNER: &str = r"
     ________   _______     _______      ___     ___
    / ______/  /__  __/    / _____ \    /  /    /  /
   / /____       / /      / /    / /   /  /____/  /
  / _____/      / /      / /    / /   /___   ____/
 / /         __/ /__    / /____/ /       /  /
/_/         /______/   /________/       /__/";

/// Command-line flags.
#[derive(Debug, Clone, Default, Parser)]
#[command(
    name = "fidy",
    version,
    about = "Organize files into sub-directories named after their extensions",
    disable_help_flag = true
)]
pub struct Args {
    /// Set your name to personalize fidy's greetings
    #[arg(long, value_name = "NAME")]
    pub name: Option<String>,

    /// Directory to organize (use '.' for the current directory)
    #[arg(
        long,
        value_name = "PATH",
        value_parser = clap::builder::TypedValueParser::map(clap::builder::OsStringValueParser::new(), PathBuf::from)
    )]
    pub dir: Option<PathBuf>,

    /// Comma-separated list of extensions to include
    #[arg(long, value_name = "EXTS")]
    pub include: Option<String>,

    /// Comma-separated list of extensions to exclude
    #[arg(long, value_name = "EXTS")]
    pub exclude: Option<String>,

    /// Enable verbose output
    #[arg(long)]
    pub verbose: bool,

    /// Simulate the file organization without doing any actual changes
    #[arg(long = "dryrun", visible_alias = "dry-run")]
    pub dry_run: bool,

    /// Delete all empty folders and sub-folders after organizing files
    #[arg(long = "cleanAll", visible_alias = "clean-all", requires = "dir")]
    pub clean_all: bool,

    /// Show information about fidy
    #[arg(short = 'h', long)]
    pub help: bool,
}

impl Args {
    /// Parses flags from an argument list, program name first.
    ///
    /// Single-dash long flags are accepted alongside the double-dash form.
    ///
    /// # Errors
    ///
    /// Returns clap's error for unknown flags or missing values.
    pub fn try_parse_normalized<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        Self::try_parse_from(normalize_args(args))
    }

    /// True when no flag at all was given.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.dir.is_none()
            && self.include.is_none()
            && self.exclude.is_none()
            && !self.verbose
            && !self.dry_run
            && !self.clean_all
            && !self.help
    }

    fn extension_filter(&self) -> ExtensionFilter {
        ExtensionFilter::from_lists(
            self.include.as_deref().unwrap_or_default(),
            self.exclude.as_deref().unwrap_or_default(),
        )
    }

    fn organize_options(&self) -> OrganizeOptions {
        OrganizeOptions {
            verbose: self.verbose,
            dry_run: self.dry_run,
        }
    }
}

/// Rewrites `-flag` and `-flag=value` to `--flag` / `--flag=value` for known long
/// flags. Everything after a bare `--` is left untouched.
pub fn normalize_args<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut passthrough = false;
    args.into_iter()
        .map(Into::into)
        .map(|arg: OsString| {
            if passthrough {
                return arg;
            }
            let Some(text) = arg.to_str() else {
                return arg;
            };
            if text == "--" {
                passthrough = true;
                return arg;
            }
            match text.strip_prefix('-') {
                Some(rest) if !rest.starts_with('-') => {
                    let flag = rest.split_once('=').map_or(rest, |(flag, _)| flag);
                    if LONG_FLAGS.contains(&flag) {
                        OsString::from(format!("-{}", text))
                    } else {
                        arg
                    }
                }
                _ => arg,
            }
        })
        .collect()
}

/// Errors that end a run with a non-zero exit status.
#[derive(Debug)]
pub enum CliError {
    /// The target directory could not be organized at all.
    Organize(OrganizeError),
}

impl CliError {
    /// Process exit status for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            CliError::Organize(_) => 1,
        }
    }
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Organize(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Organize(e) => Some(e),
        }
    }
}

impl From<OrganizeError> for CliError {
    fn from(e: OrganizeError) -> Self {
        CliError::Organize(e)
    }
}

/// What a run did, for callers that want more than the console output.
#[derive(Debug, Default)]
pub struct RunOutcome {
    /// The help text was printed and nothing else happened.
    pub help_shown: bool,
    /// The configuration after this run (including a newly set name).
    pub config: Config,
    /// Result of the organize pass, if `-dir` was given.
    pub organize: Option<OrganizeReport>,
    /// Result of the cleanup pass, if `-cleanAll` was given.
    pub prune: Option<PruneReport>,
}

/// Runs fidy with parsed flags.
///
/// `store` holds the persisted display name; `reporter` receives every per-entry
/// event of the organize and cleanup passes.
///
/// # Errors
///
/// Returns `CliError::Organize` when the target directory cannot be listed.
///
/// # Examples
///
/// ```no_run
/// use fidy::cli::{Args, run};
/// use fidy::config::JsonConfigStore;
/// use fidy::output::ConsoleReporter;
///
/// let args = Args::try_parse_normalized(["fidy", "-dir", ".", "-dryrun"]).unwrap();
/// let store = JsonConfigStore::at_default_location().unwrap();
/// if let Err(e) = run(&args, &store, &mut ConsoleReporter) {
///     eprintln!("{}", e);
/// }
/// ```
pub fn run(
    args: &Args,
    store: &dyn ConfigStore,
    reporter: &mut dyn Reporter,
) -> Result<RunOutcome, CliError> {
    if args.help {
        OutputFormatter::plain(&help_text());
        return Ok(RunOutcome {
            help_shown: true,
            ..RunOutcome::default()
        });
    }

    let mut outcome = RunOutcome {
        config: load_config(store),
        ..RunOutcome::default()
    };

    if let Some(name) = args.name.as_deref().map(str::trim).filter(|n| !n.is_empty()) {
        outcome.config.name = name.to_string();
        match store.save(&outcome.config) {
            Ok(()) => OutputFormatter::success(&format!("Name updated! Nice to meet you {}", name)),
            Err(e) => OutputFormatter::error(&format!("Error saving config: {}", e)),
        }
    }

    if args.is_empty() {
        OutputFormatter::info(&greeting(&outcome.config));
    }

    // An empty `-dir ""` means "no directory", not the current one.
    if let Some(dir) = args.dir.as_deref().filter(|d| !d.as_os_str().is_empty()) {
        let filter = args.extension_filter();
        outcome.organize = Some(organize(dir, &filter, args.organize_options(), reporter)?);

        if args.clean_all {
            outcome.prune = Some(clean(dir, args.dry_run, reporter));
        }
    }

    Ok(outcome)
}

/// The greeting shown when fidy is run without any flag.
pub fn greeting(config: &Config) -> String {
    match config.display_name() {
        Some(name) => format!("Hey, I am Fidy. Nice to see you, {}!", name),
        None => "Hey, I am Fidy. You can let me know your name by using 'fidy -name YOUR_NAME' for our future conversations!".to_string(),
    }
}

/// The banner and usage text printed by `-help`.
pub fn help_text() -> String {
    let usage = [
        "  -help           : Show information about Fidy.",
        "  -name <name>    : Set your name to personalize Fidy's greetings.",
        "  -dir <path>     : Specify the directory to organize. Use 'fidy -dir .' for current directory.",
        "  -include <exts> : Comma-separated list of extensions to include.",
        "  -exclude <exts> : Comma-separated list of extensions to exclude.",
        "  -verbose        : Enable verbose output.",
        "  -dryrun         : Simulate the file organization without doing any actual changes.",
        "  -cleanAll       : Delete all the empty folders and sub-folders in the specified directory after organizing files.",
    ];

    format!(
        "{}\n\n---------- The File Organizer CLI Tool ----------\n\n\
         Fidy helps you organize your files by sorting them into directories based on their extensions.\n\n\
         Usage:\n\n{}\n\n\
         Flags may also be written with two dashes, e.g. '--dir .'.\n",
        BANNER,
        usage.join("\n")
    )
}

fn load_config(store: &dyn ConfigStore) -> Config {
    match store.load() {
        Ok(config) => config,
        Err(e) => {
            OutputFormatter::warning(&format!("Error loading config: {}", e));
            Config::default()
        }
    }
}

fn organize(
    dir: &Path,
    filter: &ExtensionFilter,
    options: OrganizeOptions,
    reporter: &mut dyn Reporter,
) -> Result<OrganizeReport, CliError> {
    if options.dry_run {
        OutputFormatter::dry_run_notice(&format!("Simulating organization of {}", dir.display()));
    }

    let report = FileOrganizer::organize(dir, filter, options, reporter)?;

    if options.dry_run {
        OutputFormatter::dry_run_notice(&format!(
            "{} file(s) would be organized by extension in {}. No files were modified.",
            report.attempted,
            dir.display()
        ));
    } else {
        OutputFormatter::success(&format!("Files organized by extension in {}", dir.display()));
    }

    if report.attempted > 0 {
        OutputFormatter::summary_table(&report.by_extension, report.attempted);
    }

    if !report.is_complete_success() {
        OutputFormatter::warning(&format!(
            "{} file(s) could not be organized. Please review errors above.",
            report.failures.len()
        ));
    }

    Ok(report)
}

fn clean(dir: &Path, dry_run: bool, reporter: &mut dyn Reporter) -> PruneReport {
    let report = prune_empty(dir, dry_run, reporter);

    if report.removed.is_empty() {
        OutputFormatter::info("No empty directories found.");
    } else if dry_run {
        OutputFormatter::dry_run_notice(&format!(
            "{} empty directories would be deleted.",
            report.removed.len()
        ));
    } else {
        OutputFormatter::success(&format!(
            "Deleted {} empty directories.",
            report.removed.len()
        ));
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Args {
        Args::try_parse_normalized(args.iter().copied()).expect("arguments should parse")
    }

    #[test]
    fn test_normalize_single_dash_flags() {
        let normalized = normalize_args(["fidy", "-dir", ".", "-exclude=jpg", "-verbose"]);
        assert_eq!(
            normalized,
            vec![
                OsString::from("fidy"),
                OsString::from("--dir"),
                OsString::from("."),
                OsString::from("--exclude=jpg"),
                OsString::from("--verbose"),
            ]
        );
    }

    #[test]
    fn test_normalize_leaves_values_and_unknown_flags() {
        let normalized = normalize_args(["fidy", "--dir", "-x", "--", "-verbose"]);
        assert_eq!(
            normalized,
            vec![
                OsString::from("fidy"),
                OsString::from("--dir"),
                OsString::from("-x"),
                OsString::from("--"),
                OsString::from("-verbose"),
            ]
        );
    }

    #[test]
    fn test_parse_go_style_flags() {
        let args = parse(&[
            "fidy", "-dir", "downloads", "-include", "txt,md", "-exclude", "md", "-dryrun",
            "-cleanAll",
        ]);

        assert_eq!(args.dir, Some(PathBuf::from("downloads")));
        assert_eq!(args.include.as_deref(), Some("txt,md"));
        assert_eq!(args.exclude.as_deref(), Some("md"));
        assert!(args.extension_filter().allows("txt"));
        assert!(!args.extension_filter().allows("md"));
        assert!(args.dry_run);
        assert!(args.clean_all);
        assert!(!args.verbose);
    }

    #[test]
    fn test_parse_gnu_style_aliases() {
        let args = parse(&["fidy", "--dir=.", "--dry-run", "--clean-all", "--verbose"]);
        assert!(args.dry_run);
        assert!(args.clean_all);
        assert!(args.verbose);
    }

    #[test]
    fn test_clean_all_requires_dir() {
        let result = Args::try_parse_normalized(["fidy", "-cleanAll"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_unknown_flag_is_rejected() {
        let result = Args::try_parse_normalized(["fidy", "-recursive"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_no_flags_is_empty() {
        assert!(parse(&["fidy"]).is_empty());
        assert!(!parse(&["fidy", "-verbose"]).is_empty());
    }

    #[test]
    fn test_greeting_with_and_without_name() {
        let anonymous = greeting(&Config::default());
        assert!(anonymous.contains("fidy -name YOUR_NAME"));

        let named = greeting(&Config {
            name: "Ada".to_string(),
        });
        assert_eq!(named, "Hey, I am Fidy. Nice to see you, Ada!");
    }

    #[test]
    fn test_help_text_lists_every_flag() {
        let help = help_text();
        for flag in [
            "-help", "-name", "-dir", "-include", "-exclude", "-verbose", "-dryrun", "-cleanAll",
        ] {
            assert!(help.contains(flag), "help text should mention {}", flag);
        }
    }

    #[test]
    fn test_cli_error_exit_code() {
        let error = CliError::from(OrganizeError::DirectoryAccess {
            path: PathBuf::from("missing"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        });
        assert_eq!(error.exit_code(), 1);
        assert!(error.to_string().contains("missing"));
    }
}
