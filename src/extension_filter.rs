//! Extension extraction and include/exclude filtering.
//!
//! Files are classified purely by the text after the last `.` in their name.
//! Filtering is driven by two comma-separated lists given on the command line:
//!
//! - Exclude: any extension listed here is never moved.
//! - Include: when non-empty, only extensions listed here are moved.
//!
//! Exclude always wins over include, and an empty include list allows every
//! extension.
//!
//! # Examples
//!
//! ```
//! use fidy::extension_filter::{ExtensionFilter, extension_of};
//!
//! let filter = ExtensionFilter::from_lists("txt,jpg", "jpg");
//! assert!(filter.allows("txt"));
//! assert!(!filter.allows("jpg"));
//! assert!(!filter.allows("pdf"));
//!
//! assert_eq!(extension_of("notes.txt"), Some("txt"));
//! assert_eq!(extension_of("README"), None);
//! ```

use std::collections::HashSet;
use std::ffi::OsStr;

/// Returns the extension of a file name: the text after its final `.`.
///
/// Returns `None` when the name has no `.` or nothing follows the last one.
/// A leading dot counts, so `.bashrc` has the extension `bashrc`.
pub fn extension_of(file_name: &str) -> Option<&str> {
    match file_name.rsplit_once('.') {
        Some((_, ext)) if !ext.is_empty() => Some(ext),
        _ => None,
    }
}

/// Same as [`extension_of`], on a raw file name that may not be valid UTF-8.
///
/// The bytes after the last `.` are returned untouched, so `a.\xff` and `b.\xfe`
/// get two distinct extensions.
pub fn os_extension_of(file_name: &OsStr) -> Option<&OsStr> {
    let bytes = file_name.as_encoded_bytes();
    let dot = bytes.iter().rposition(|&b| b == b'.')?;
    let ext = &bytes[dot + 1..];
    if ext.is_empty() {
        return None;
    }
    // SAFETY: `ext` is split off right after an ASCII `.` and runs to the end of
    // a valid `OsStr`, which is a permitted boundary for encoded bytes.
    Some(unsafe { OsStr::from_encoded_bytes_unchecked(ext) })
}

/// Include and exclude extension sets for one organize run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtensionFilter {
    include: HashSet<String>,
    exclude: HashSet<String>,
}

impl ExtensionFilter {
    /// Creates a filter that allows every extension.
    pub fn allow_all() -> Self {
        Self::default()
    }

    /// Builds a filter from comma-separated include and exclude lists.
    ///
    /// Items are trimmed, a leading `.` is dropped (`.txt` means `txt`) and empty
    /// items are ignored, so `""` and `" , "` both produce an empty set.
    pub fn from_lists(include: &str, exclude: &str) -> Self {
        Self {
            include: parse_list(include),
            exclude: parse_list(exclude),
        }
    }

    /// Checks whether files with this extension should be moved.
    ///
    /// Checks are performed in this order:
    /// 1. Exclude set - if matched, reject
    /// 2. Include set - if non-empty and not matched, reject
    /// 3. Default: allow
    pub fn allows(&self, extension: &str) -> bool {
        if self.exclude.contains(extension) {
            return false;
        }

        self.include.is_empty() || self.include.contains(extension)
    }

    /// Same as [`allows`](Self::allows) for an extension that may not be UTF-8.
    ///
    /// Such an extension can never appear in either list, so it is only allowed
    /// when there is no include list.
    pub fn allows_os(&self, extension: &OsStr) -> bool {
        match extension.to_str() {
            Some(extension) => self.allows(extension),
            None => self.include.is_empty(),
        }
    }
}

fn parse_list(list: &str) -> HashSet<String> {
    list.split(',').filter_map(normalize).collect()
}

fn normalize(item: &str) -> Option<String> {
    let trimmed = item.trim();
    let trimmed = trimmed.strip_prefix('.').unwrap_or(trimmed);
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
