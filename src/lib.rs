//! Caching facade over git history and object-tree queries.
//!
//! `GitRepository` answers "which branches and tags exist", "which commits
//! happened on a day", "what is in this directory at this commit" and "how big
//! is this file at this commit", running `git` once per distinct question.

pub mod error;
pub mod git;
pub mod models;

pub use error::{GitError, Result};
pub use git::{GitRepository, RepoOptions};
