//! Object listing DTOs.
//!
//! - `ListingEntry`: one `<mode> <type> <hash>\t<path>` record from `ls-tree`
//! - `ObjectKind`: the `<type>` column

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjectKind {
    Blob,
    Tree,
    /// Submodule gitlink
    Commit,
    Other,
}

impl ObjectKind {
    pub fn from_type_name(name: &str) -> Self {
        match name {
            "blob" => ObjectKind::Blob,
            "tree" => ObjectKind::Tree,
            "commit" => ObjectKind::Commit,
            _ => ObjectKind::Other,
        }
    }

    pub fn is_tree(&self) -> bool {
        *self == ObjectKind::Tree
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingEntry {
    pub mode: String,
    pub kind: ObjectKind,
    pub hash: String,
    /// Path relative to the repository root
    pub path: String,
}

impl ListingEntry {
    /// Parse a single listing record. Returns `None` for blank or malformed input.
    pub fn parse(record: &str) -> Option<Self> {
        let (meta, path) = record.split_once('\t')?;
        let mut fields = meta.split(' ');
        let mode = fields.next()?;
        let kind = fields.next()?;
        let hash = fields.next()?;

        Some(Self {
            mode: mode.to_string(),
            kind: ObjectKind::from_type_name(kind),
            hash: hash.to_string(),
            path: path.to_string(),
        })
    }

    /// Last path component.
    pub fn name(&self) -> &str {
        self.path.rsplit('/').next().unwrap_or(&self.path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_tree_record() {
        let entry = ListingEntry::parse("040000 tree 4b825dc642cb6eb9a060e54bf8d69288fbee4904\tsrc/git").unwrap();
        assert_eq!(entry.mode, "040000");
        assert!(entry.kind.is_tree());
        assert_eq!(entry.path, "src/git");
        assert_eq!(entry.name(), "git");
    }

    #[test]
    fn keeps_spaces_in_paths() {
        let entry = ListingEntry::parse("100644 blob e69de29bb2d1d6434b8b29ae775ad8c2e48c5391\tdocs/read me.txt").unwrap();
        assert_eq!(entry.kind, ObjectKind::Blob);
        assert_eq!(entry.name(), "read me.txt");
    }

    #[test]
    fn submodules_are_commits() {
        let entry = ListingEntry::parse("160000 commit 0123456789abcdef0123456789abcdef01234567\tvendor/lib").unwrap();
        assert_eq!(entry.kind, ObjectKind::Commit);
        assert!(!entry.kind.is_tree());
    }

    #[test]
    fn rejects_malformed_records() {
        assert!(ListingEntry::parse("").is_none());
        assert!(ListingEntry::parse("100644 blob abc").is_none());
        assert!(ListingEntry::parse("100644\tfile").is_none());
    }
}
