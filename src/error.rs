//! Crate error type.
//!
//! `GitError` covers every failure a facade operation can report:
//! - `Spawn` → git could not be launched at all (the only fatal kind)
//! - `CommandFailed` → git ran and exited non-zero for a content query
//! - `YearRange` → construction could not derive the active years
//! - the rest → bad input or missing objects

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum GitError {
    #[error("Repository not found: {0}")]
    RepoNotFound(String),

    #[error("Cannot open error log {path}: {source}")]
    ErrorLog {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot launch {command}: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Error calling {command}: {message}")]
    CommandFailed { command: String, message: String },

    #[error("Cannot determine year range: {0}")]
    YearRange(String),

    #[error("Invalid date: {year:04}-{month:02}-{day:02}")]
    InvalidDate { year: i32, month: u32, day: u32 },

    #[error("Ref not found: {0}")]
    RefNotFound(String),

    #[error("Content unavailable for {commit}:{path}: {reason}")]
    ContentUnavailable {
        commit: String,
        path: String,
        reason: String,
    },
}

impl GitError {
    /// True when git itself is unusable, as opposed to a single query failing.
    pub fn is_fatal(&self) -> bool {
        matches!(self, GitError::Spawn { .. })
    }
}

pub type Result<T> = std::result::Result<T, GitError>;
