//! Filtering Policy Module
//!
//! Decides which parts of an unpacked source package are useless for code
//! search and must be stripped before indexing. The policy is three
//! membership sets loaded once at startup from comma-separated flag values:
//!
//! - **directory names**: matching directories are deleted recursively and
//!   never descended into (e.g. `.git`, `po`).
//! - **file names**: matching files are deleted (e.g. `COPYING`, `depcomp`).
//! - **suffixes**: files whose extension matches are deleted (e.g. `txt`,
//!   `html` — documentation formats, not code).
//!
//! The sets are immutable after construction and shared read-only across all
//! pipeline workers behind an `Arc`, so lookups need no synchronization.


use std::collections::HashSet;

/// Immutable ignore sets applied while walking an unpacked package tree.
#[derive(Debug, Default)]
pub struct FilterPolicy {
    dirnames: HashSet<String>,
    filenames: HashSet<String>,
    suffixes: HashSet<String>,
}

impl FilterPolicy {
    /// Builds the policy from three comma-separated lists. Empty entries
    /// (from trailing commas or an empty flag value) are dropped.
    pub fn from_lists(dirnames: &str, filenames: &str, suffixes: &str) -> Self {
        Self {
            dirnames: parse_list(dirnames),
            filenames: parse_list(filenames),
            suffixes: parse_list(suffixes),
        }
    }

    /// True if a directory with this name must be removed entirely.
    pub fn ignores_dirname(&self, name: &str) -> bool {
        self.dirnames.contains(name)
    }

    /// True if a file with this exact name must be removed.
    pub fn ignores_filename(&self, name: &str) -> bool {
        self.filenames.contains(name)
    }

    /// True if the file name's extension (the part after the final dot) is
    /// in the ignored-suffix set. A name without a dot never matches, so a
    /// configured suffix `txt` removes `README.txt` but not a file named
    /// `txt`.
    pub fn ignores_suffix(&self, name: &str) -> bool {
        match name.rsplit_once('.') {
            Some((stem, ext)) if !stem.is_empty() => self.suffixes.contains(ext),
            _ => false,
        }
    }
}

fn parse_list(list: &str) -> HashSet<String> {
    list.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(str::to_string)
        .collect()
}
