//! Throwaway repositories with exact commit timestamps.

#![allow(dead_code)]

use chrono::NaiveDateTime;
use git2::build::TreeUpdateBuilder;
use git2::{FileMode, Oid, Repository, Signature, Time};
use tempfile::TempDir;

use gitcache::{GitRepository, RepoOptions};

pub struct Fixture {
    pub dir: TempDir,
    pub repo: Repository,
}

impl Fixture {
    pub fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let repo = Repository::init(dir.path().join("repo")).unwrap();
        Self { dir, repo }
    }

    pub fn repo_path(&self) -> std::path::PathBuf {
        self.dir.path().join("repo")
    }

    pub fn error_log(&self) -> std::path::PathBuf {
        self.dir.path().join("giterr.log")
    }

    pub fn error_log_contents(&self) -> String {
        std::fs::read_to_string(self.error_log()).unwrap()
    }

    pub fn options(&self) -> RepoOptions {
        RepoOptions::default().with_error_log(self.error_log())
    }

    pub fn open(&self) -> GitRepository {
        GitRepository::open(self.repo_path(), self.options()).unwrap()
    }

    /// Commit `files` on top of `parents` (the first parent's tree is the
    /// base) at `when` (`YYYY-MM-DDTHH:MM:SS`, UTC), moving `refname`.
    pub fn commit_with_parents(
        &self,
        refname: &str,
        files: &[(&str, &str)],
        when: &str,
        parents: &[Oid],
    ) -> Oid {
        let secs = NaiveDateTime::parse_from_str(when, "%Y-%m-%dT%H:%M:%S")
            .unwrap()
            .and_utc()
            .timestamp();
        let sig = Signature::new("Fixture", "fixture@example.com", &Time::new(secs, 0)).unwrap();

        let base = match parents.first() {
            Some(parent) => self.repo.find_commit(*parent).unwrap().tree().unwrap(),
            None => {
                let empty = self.repo.treebuilder(None).unwrap().write().unwrap();
                self.repo.find_tree(empty).unwrap()
            }
        };

        let mut update = TreeUpdateBuilder::new();
        for (path, contents) in files {
            let blob = self.repo.blob(contents.as_bytes()).unwrap();
            update.upsert(*path, blob, FileMode::Blob);
        }
        let tree_id = update.create_updated(&self.repo, &base).unwrap();
        let tree = self.repo.find_tree(tree_id).unwrap();

        let parent_commits: Vec<_> = parents.iter().map(|p| self.repo.find_commit(*p).unwrap()).collect();
        let parent_refs: Vec<_> = parent_commits.iter().collect();

        // Write the commit detached, then point the ref at it, so merges and
        // orphans don't trip over the ref's current value.
        let oid = self
            .repo
            .commit(None, &sig, &sig, &format!("commit at {}", when), &tree, &parent_refs)
            .unwrap();
        self.repo.reference(refname, oid, true, "fixture").unwrap();
        oid
    }

    /// Commit on top of the current tip of `branch`.
    pub fn commit_on(&self, branch: &str, files: &[(&str, &str)], when: &str) -> Oid {
        let refname = format!("refs/heads/{}", branch);
        let parents: Vec<Oid> = self
            .repo
            .refname_to_id(&refname)
            .map(|oid| vec![oid])
            .unwrap_or_default();
        self.commit_with_parents(&refname, files, when, &parents)
    }

    pub fn commit(&self, files: &[(&str, &str)], when: &str) -> Oid {
        self.commit_on("master", files, when)
    }

    pub fn tag(&self, name: &str, target: Oid) {
        self.repo
            .reference(&format!("refs/tags/{}", name), target, false, "fixture")
            .unwrap();
    }

    pub fn branch(&self, name: &str, target: Oid) {
        self.repo
            .reference(&format!("refs/heads/{}", name), target, false, "fixture")
            .unwrap();
    }
}
