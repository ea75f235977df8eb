//! Per-commit record of which paths are directories.
//!
//! Knowledge only comes from listings the facade has already fetched, so the
//! model never shrinks and answers from what it has seen. Once a commit has
//! been filled at least once, membership is closed-world: an unseen path is
//! reported as not a directory.

use std::collections::{HashMap, HashSet};

use crate::models::ListingEntry;

#[derive(Debug, Default)]
pub struct TreeModel {
    /// commit -> known directory paths ("" is the root)
    trees: HashMap<String, HashSet<String>>,
}

impl TreeModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the directories found in a listing of `commit`.
    pub fn fill<'a, I>(&mut self, commit: &str, entries: I)
    where
        I: IntoIterator<Item = &'a ListingEntry>,
    {
        let known = self
            .trees
            .entry(commit.to_string())
            .or_insert_with(|| HashSet::from([String::new()]));

        for entry in entries {
            if entry.kind.is_tree() && !known.contains(&entry.path) {
                known.insert(entry.path.clone());
            }
        }
    }

    /// `None` when nothing is known about `commit` yet.
    pub fn lookup(&self, commit: &str, path: &str) -> Option<bool> {
        self.trees.get(commit).map(|known| known.contains(path))
    }

    pub fn knows(&self, commit: &str) -> bool {
        self.trees.contains_key(commit)
    }

    /// Number of directories known for `commit`, root included.
    pub fn directory_count(&self, commit: &str) -> usize {
        self.trees.get(commit).map_or(0, HashSet::len)
    }
}
