use crate::error::{GitError, Result};
use crate::git::repository::GitRepository;
use crate::models::ListingEntry;

/// Type name `cat-file -t` prints for directories.
const TREE_TYPE: &str = "tree";

impl GitRepository {
    /// Names of the immediate children of `path` at `commit`.
    ///
    /// Every listing is also recorded in the tree model so that later
    /// `is_directory` calls for this commit are answered locally.
    pub fn directory_contents(&mut self, commit: &str, path: &str) -> Result<Vec<String>> {
        let entries = self.list_directory(commit, path).inspect_err(|e| {
            tracing::error!("directory_contents error: {}", e);
        })?;

        self.trees.fill(commit, &entries);

        Ok(entries.iter().map(|e| e.name().to_string()).collect())
    }

    fn list_directory(&mut self, commit: &str, path: &str) -> Result<Vec<ListingEntry>> {
        let path = path.trim_end_matches('/');
        let output = if path.is_empty() {
            self.commands.output(&["ls-tree", "-z", commit])?
        } else {
            let dir = format!("{}/", path);
            self.commands.output(&["ls-tree", "-z", commit, &dir])?
        };

        Ok(output.split('\0').filter_map(ListingEntry::parse).collect())
    }

    /// Whether `path` is a directory at `commit`.
    ///
    /// Once any listing of `commit` has been seen only listed directories
    /// count. Before that a single object-type query decides.
    pub fn is_directory(&mut self, commit: &str, path: &str) -> Result<bool> {
        let path = path.trim_end_matches('/');
        if let Some(known) = self.trees.lookup(commit, path) {
            return Ok(known);
        }

        let object = format!("{}:{}", commit, path);
        match self.commands.output(&["cat-file", "-t", &object]) {
            Ok(kind) => Ok(kind.trim() == TREE_TYPE),
            Err(e) if e.is_fatal() => Err(e),
            Err(_) => Ok(false),
        }
    }

    /// Raw content of the object at `path` in `commit`. Not cached.
    pub fn file_contents(&mut self, commit: &str, path: &str) -> Result<Vec<u8>> {
        let object = format!("{}:{}", commit, path);
        self.commands.fetch(&["show", &object])
    }

    /// Byte length of `file_contents`, read once per `(commit, path)`.
    ///
    /// An unreadable object is an error rather than a size of 0; the failure
    /// is remembered like a size would be.
    pub fn file_size(&mut self, commit: &str, path: &str) -> Result<u64> {
        let key = (commit.to_string(), path.to_string());
        let outcome = match self.sizes.get(&key) {
            Some(outcome) => outcome.clone(),
            None => {
                let outcome = match self.file_contents(commit, path) {
                    Ok(contents) => Ok(contents.len() as u64),
                    Err(e) if e.is_fatal() => return Err(e),
                    Err(e) => Err(e.to_string()),
                };
                self.sizes.insert(key, outcome.clone());
                outcome
            }
        };

        outcome.map_err(|reason| GitError::ContentUnavailable {
            commit: commit.to_string(),
            path: path.to_string(),
            reason,
        })
    }
}
