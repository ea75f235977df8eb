//! Git access: the command cache, the tree model and the repository facade.
//!
//! - `cache`: memoized `git` invocations and the shared error log
//! - `tree_model`: per-commit directory knowledge
//! - `repository`: `GitRepository` construction, year range, refs
//! - `history`: day-bucketed commits, ref resolution, commit log
//! - `tree`: directory listings, file contents and sizes

pub mod cache;
pub mod history;
pub mod repository;
pub mod tree;
pub mod tree_model;

pub use cache::{CacheStats, CachedResult, CommandCache, CommandKey, ErrorSink, Mode};
pub use repository::{GitRepository, RepoOptions};
pub use tree_model::TreeModel;
