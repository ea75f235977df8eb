use std::collections::HashMap;
use std::path::{Path, PathBuf};

use git2::Repository;

use crate::error::{GitError, Result};
use crate::git::cache::{CacheStats, CommandCache, ErrorSink};
use crate::git::tree_model::TreeModel;
use crate::models::{RefEntry, YearRange};

/// Construction-time settings for a `GitRepository`.
#[derive(Debug, Clone)]
pub struct RepoOptions {
    /// Memoize query results for the lifetime of the facade
    pub caching: bool,
    /// Created or truncated on open; receives git's stderr and failure messages
    pub error_log: PathBuf,
    /// Branch used for year range and day queries
    pub primary_branch: String,
    pub git_binary: PathBuf,
}

impl Default for RepoOptions {
    fn default() -> Self {
        Self {
            caching: true,
            error_log: PathBuf::from("giterr.log"),
            primary_branch: "master".to_string(),
            git_binary: PathBuf::from("git"),
        }
    }
}

impl RepoOptions {
    pub fn with_caching(mut self, caching: bool) -> Self {
        self.caching = caching;
        self
    }

    pub fn with_error_log<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.error_log = path.into();
        self
    }

    pub fn with_primary_branch<S: Into<String>>(mut self, branch: S) -> Self {
        self.primary_branch = branch.into();
        self
    }

    pub fn with_git_binary<P: Into<PathBuf>>(mut self, binary: P) -> Self {
        self.git_binary = binary.into();
        self
    }
}

/// Caching facade over git queries for one repository.
pub struct GitRepository {
    pub path: String,
    pub(crate) git_dir: PathBuf,
    pub(crate) primary_branch: String,
    pub(crate) commands: CommandCache,
    pub(crate) trees: TreeModel,
    /// (commit, path) -> size, or the reason the content could not be read
    pub(crate) sizes: HashMap<(String, String), std::result::Result<u64, String>>,
    years: YearRange,
}

impl GitRepository {
    pub fn open<P: AsRef<Path>>(path: P, options: RepoOptions) -> Result<Self> {
        let path_str = path.as_ref().to_string_lossy().to_string();
        let git_dir = Repository::discover(&path)
            .map_err(|_| GitError::RepoNotFound(path_str.clone()))?
            .path()
            .to_path_buf();

        let sink = ErrorSink::open(&options.error_log)?;
        let mut commands = CommandCache::new(options.git_binary, git_dir.clone(), options.caching, sink);
        let years = compute_year_range(&mut commands, &options.primary_branch)?;

        tracing::info!(
            "Opened {} (git dir {}, years {}-{}, caching {})",
            path_str,
            git_dir.display(),
            years.first,
            years.last,
            options.caching
        );

        Ok(Self {
            path: path_str,
            git_dir,
            primary_branch: options.primary_branch,
            commands,
            trees: TreeModel::new(),
            sizes: HashMap::new(),
            years,
        })
    }

    /// Years with commits on the primary branch, fixed at construction.
    pub fn years(&self) -> YearRange {
        self.years
    }

    pub fn git_dir(&self) -> &Path {
        &self.git_dir
    }

    pub fn primary_branch(&self) -> &str {
        &self.primary_branch
    }

    pub fn caching(&self) -> bool {
        self.commands.caching()
    }

    pub fn error_log(&self) -> &Path {
        self.commands.error_log()
    }

    pub fn stats(&self) -> CacheStats {
        self.commands.stats()
    }

    /// Local branches as `(commit, refs/heads/<name>)`.
    pub fn branches(&mut self) -> Result<Vec<RefEntry>> {
        self.list_refs("refs/heads/").inspect_err(|e| {
            tracing::error!("branches error: {}", e);
        })
    }

    /// Tags as `(object, refs/tags/<name>)`.
    pub fn tags(&mut self) -> Result<Vec<RefEntry>> {
        self.list_refs("refs/tags/").inspect_err(|e| {
            tracing::error!("tags error: {}", e);
        })
    }

    fn list_refs(&mut self, prefix: &str) -> Result<Vec<RefEntry>> {
        let output = self
            .commands
            .output(&["for-each-ref", "--format=%(objectname) %(refname)", prefix])?;
        Ok(output.lines().filter_map(RefEntry::parse).collect())
    }
}

fn compute_year_range(commands: &mut CommandCache, branch: &str) -> Result<YearRange> {
    let first = commands
        .output(&["log", "--max-parents=0", "--date=format:%Y", "--pretty=%ad", branch])
        .map_err(|e| year_range_error(e, "root commits"))?;
    let first = parse_years(&first)
        .into_iter()
        .min()
        .ok_or_else(|| GitError::YearRange(format!("no root commits on {}", branch)))?;

    let last = commands
        .output(&["log", "-n", "1", "--date=format:%Y", "--pretty=%ad", branch])
        .map_err(|e| year_range_error(e, "latest commit"))?;
    let last = parse_years(&last)
        .into_iter()
        .next()
        .ok_or_else(|| GitError::YearRange(format!("no commits on {}", branch)))?;

    YearRange::new(first, last)
        .ok_or_else(|| GitError::YearRange(format!("first year {} is after last year {}", first, last)))
}

fn year_range_error(err: GitError, what: &str) -> GitError {
    if err.is_fatal() {
        err
    } else {
        GitError::YearRange(format!("{}: {}", what, err))
    }
}

fn parse_years(output: &str) -> Vec<i32> {
    output
        .lines()
        .filter_map(|line| line.trim().parse().ok())
        .collect()
}
