use chrono::{Duration, NaiveDate, NaiveDateTime};

use crate::error::{GitError, Result};
use crate::git::repository::GitRepository;

/// git accepts this and reads it as UTC.
const GIT_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S +0000";

/// Inclusive `--after`/`--before` bounds covering the day before `date`.
///
/// git's date limits are inclusive and second-granular, so the half-open
/// window `[date - 1 day, date)` ends one second before midnight.
pub fn day_window(date: NaiveDate) -> (String, String) {
    let end = date.and_time(chrono::NaiveTime::MIN);
    let start: NaiveDateTime = end - Duration::days(1);
    let last = end - Duration::seconds(1);
    (
        start.format(GIT_DATE_FORMAT).to_string(),
        last.format(GIT_DATE_FORMAT).to_string(),
    )
}

impl GitRepository {
    /// Commits on the primary branch in the 24 hours before `year-month-day`,
    /// newest first.
    pub fn commits(&mut self, year: i32, month: u32, day: u32) -> Result<Vec<String>> {
        let date = NaiveDate::from_ymd_opt(year, month, day).ok_or(GitError::InvalidDate {
            year,
            month,
            day,
        })?;
        let (after, before) = day_window(date);
        let branch = self.primary_branch.clone();

        let output = self.commands.output(&[
            "log",
            "--after",
            &after,
            "--before",
            &before,
            "--pretty=%H",
            &branch,
        ])?;

        Ok(output
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect())
    }

    pub fn last_commit_of_branch(&mut self, branch: &str) -> Result<String> {
        self.resolve(branch).inspect_err(|e| {
            tracing::error!("last commit of branch error: {}", e);
        })
    }

    pub fn commit_of_tag(&mut self, tag: &str) -> Result<String> {
        self.resolve(tag).inspect_err(|e| {
            tracing::error!("commit of tag error: {}", e);
        })
    }

    fn resolve(&mut self, name: &str) -> Result<String> {
        let output = self.commands.output(&["rev-list", "-n", "1", name, "--"])?;
        let commit = output.trim();
        if commit.is_empty() {
            return Err(GitError::RefNotFound(name.to_string()));
        }
        Ok(commit.to_string())
    }

    /// Full `git log` text starting at `commit`. Not cached.
    pub fn commit_log(&mut self, commit: &str) -> Result<String> {
        let output = self.commands.fetch(&["log", commit]).inspect_err(|e| {
            tracing::error!("commit_log error: {}", e);
        })?;
        Ok(String::from_utf8_lossy(&output).into_owned())
    }

    // Commit-graph navigation is not supported; these always answer empty.

    pub fn commit_parents(&self, _commit: &str) -> Vec<String> {
        Vec::new()
    }

    pub fn commit_descendants(&self, _commit: &str) -> Vec<String> {
        Vec::new()
    }

    pub fn commit_names(&self, _commit: &str) -> Vec<String> {
        Vec::new()
    }
}
