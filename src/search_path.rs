//! Ordered list of directories consulted when looking things up by name.
//!
//! `AbsPath::register_to_search_path` takes a `&mut SearchPath`, so the side
//! effect is explicit at the call site. Callers that want one shared,
//! process-wide list can use [`SearchPath::global`].

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use once_cell::sync::Lazy;

use crate::fs_op::error::{FsOpError, Result};

static GLOBAL: Lazy<Mutex<SearchPath>> = Lazy::new(|| Mutex::new(SearchPath::new()));

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchPath {
    dirs: Vec<PathBuf>,
}

impl SearchPath {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_entries<I, P>(entries: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            dirs: entries.into_iter().map(Into::into).collect(),
        }
    }

    /// Split an environment variable such as `PATH` into a list. An unset
    /// variable gives an empty list.
    pub fn from_env(var: &str) -> Self {
        match std::env::var_os(var) {
            Some(value) => Self::from_entries(std::env::split_paths(&value)),
            None => Self::new(),
        }
    }

    /// The shared process-wide list. It starts empty. Lock poisoning is
    /// ignored since the list has no invariants a panic could break.
    pub fn global() -> MutexGuard<'static, SearchPath> {
        GLOBAL.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Insert `dir` before position `index`; past-the-end indices append.
    /// Duplicates are kept.
    pub fn insert(&mut self, index: usize, dir: impl Into<PathBuf>) {
        let index = index.min(self.dirs.len());
        self.dirs.insert(index, dir.into());
    }

    pub fn push(&mut self, dir: impl Into<PathBuf>) {
        self.dirs.push(dir.into());
    }

    pub fn entries(&self) -> &[PathBuf] {
        &self.dirs
    }

    pub fn iter(&self) -> impl Iterator<Item = &Path> {
        self.dirs.iter().map(PathBuf::as_path)
    }

    pub fn len(&self) -> usize {
        self.dirs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dirs.is_empty()
    }

    pub fn contains(&self, dir: impl AsRef<Path>) -> bool {
        self.count(dir) > 0
    }

    /// How many times `dir` appears.
    pub fn count(&self, dir: impl AsRef<Path>) -> usize {
        let dir = dir.as_ref();
        self.dirs.iter().filter(|d| d.as_path() == dir).count()
    }

    /// Join the entries with the platform separator, ready for an
    /// environment variable. Fails if an entry contains the separator.
    pub fn to_env_value(&self) -> Result<OsString> {
        std::env::join_paths(&self.dirs).map_err(|e| FsOpError::Message(e.to_string()))
    }
}

impl<'a> IntoIterator for &'a SearchPath {
    type Item = &'a PathBuf;
    type IntoIter = std::slice::Iter<'a, PathBuf>;

    fn into_iter(self) -> Self::IntoIter {
        self.dirs.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_clamps_out_of_range_index() {
        let mut sp = SearchPath::from_entries(["/a", "/b"]);
        sp.insert(0, "/front");
        sp.insert(99, "/back");
        assert_eq!(sp.entries(), &[
            PathBuf::from("/front"),
            PathBuf::from("/a"),
            PathBuf::from("/b"),
            PathBuf::from("/back"),
        ]);
    }

    #[test]
    fn duplicates_are_kept() {
        let mut sp = SearchPath::new();
        sp.insert(0, "/x");
        sp.insert(0, "/x");
        assert_eq!(sp.count("/x"), 2);
        assert_eq!(sp.len(), 2);
    }

    #[test]
    fn env_value_splits_back_to_the_same_entries() {
        let sp = SearchPath::from_entries(["/usr/local/bin", "/opt/tools"]);
        let joined = sp.to_env_value().unwrap();
        let again = SearchPath::from_entries(std::env::split_paths(&joined));
        assert_eq!(again, sp);
    }

    #[cfg(unix)]
    #[test]
    fn entry_with_separator_cannot_be_joined() {
        let sp = SearchPath::from_entries(["/a:b"]);
        assert!(matches!(sp.to_env_value(), Err(FsOpError::Message(_))));
    }

    #[test]
    fn unset_env_var_is_empty() {
        assert!(SearchPath::from_env("EZPATHS_TEST_SURELY_UNSET_VAR").is_empty());
    }
}
