use serde::{Deserialize, Serialize};

/// A branch or tag as reported by `for-each-ref`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefEntry {
    /// Object the ref points at (the tag object for annotated tags)
    pub commit: String,
    /// Full ref name, e.g. `refs/heads/master`
    pub name: String,
}

impl RefEntry {
    /// Parse a `<hash> <refname>` line.
    pub fn parse(line: &str) -> Option<Self> {
        let (commit, name) = line.trim().split_once(' ')?;
        if commit.is_empty() || name.is_empty() {
            return None;
        }
        Some(Self {
            commit: commit.to_string(),
            name: name.to_string(),
        })
    }

    /// Ref name without its `refs/heads/` or `refs/tags/` prefix.
    pub fn short_name(&self) -> &str {
        self.name
            .strip_prefix("refs/heads/")
            .or_else(|| self.name.strip_prefix("refs/tags/"))
            .unwrap_or(&self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_for_each_ref_line() {
        let entry = RefEntry::parse("8b1e2f refs/heads/feature/x\n").unwrap();
        assert_eq!(entry.commit, "8b1e2f");
        assert_eq!(entry.name, "refs/heads/feature/x");
        assert_eq!(entry.short_name(), "feature/x");
    }

    #[test]
    fn rejects_malformed_lines() {
        assert!(RefEntry::parse("").is_none());
        assert!(RefEntry::parse("8b1e2f").is_none());
    }
}
