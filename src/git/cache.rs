//! Memoizing git command runner.
//!
//! Every query the facade makes goes through `CommandCache::execute`:
//! - Key: the argument list joined with spaces, plus the invocation `Mode`
//! - Content mode: stdout text, or `Failed` with a message on non-zero exit
//! - Success mode: whether git exited zero, never logged
//!
//! Results live for the lifetime of the cache; nothing is invalidated.
//! git's own stderr is redirected into the shared error log.

use std::collections::HashMap;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};

use crate::error::{GitError, Result};

/// How the caller wants a command's outcome reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Return stdout as text
    Content,
    /// Return only whether git exited zero
    Success,
}

/// Cache key: canonical command line plus mode.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CommandKey {
    pub command: String,
    pub mode: Mode,
}

impl CommandKey {
    pub fn new(args: &[&str], mode: Mode) -> Self {
        Self {
            command: args.join(" "),
            mode,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CachedResult {
    Output(String),
    Success(bool),
    /// Content query exited non-zero; holds the reported message
    Failed(String),
}

impl CachedResult {
    /// Text payload, or the failure as an error.
    pub fn into_output(self, command: &str) -> Result<String> {
        match self {
            CachedResult::Output(text) => Ok(text),
            CachedResult::Failed(message) => Err(GitError::CommandFailed {
                command: command.to_string(),
                message,
            }),
            CachedResult::Success(_) => Ok(String::new()),
        }
    }

    pub fn is_success(&self) -> bool {
        match self {
            CachedResult::Output(_) => true,
            CachedResult::Success(ok) => *ok,
            CachedResult::Failed(_) => false,
        }
    }
}

/// Write-only log shared by every git invocation of one facade.
#[derive(Debug)]
pub struct ErrorSink {
    file: File,
    path: PathBuf,
}

impl ErrorSink {
    /// Create or truncate the log at `path`.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&path)
            .map_err(|source| GitError::ErrorLog {
                path: path.clone(),
                source,
            })?;

        Ok(Self { file, path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Report a failure on stderr and in the log.
    pub fn report(&mut self, message: &str) {
        eprintln!("{}", message);
        if let Err(e) = writeln!(self.file, "{}", message) {
            tracing::warn!("Failed to write error log {}: {}", self.path.display(), e);
        }
    }

    /// A handle git can write its own diagnostics into.
    fn stderr(&self) -> Stdio {
        match self.file.try_clone() {
            Ok(file) => Stdio::from(file),
            Err(e) => {
                tracing::warn!("Cannot share error log with git: {}", e);
                Stdio::null()
            }
        }
    }
}

struct Invocation {
    status: ExitStatus,
    stdout: Vec<u8>,
}

pub struct CommandCache {
    git_binary: PathBuf,
    git_dir: PathBuf,
    caching: bool,
    entries: HashMap<CommandKey, CachedResult>,
    sink: ErrorSink,
    hits: usize,
    invocations: usize,
}

impl CommandCache {
    pub fn new(git_binary: PathBuf, git_dir: PathBuf, caching: bool, sink: ErrorSink) -> Self {
        Self {
            git_binary,
            git_dir,
            caching,
            entries: HashMap::new(),
            sink,
            hits: 0,
            invocations: 0,
        }
    }

    pub fn caching(&self) -> bool {
        self.caching
    }

    pub fn error_log(&self) -> &Path {
        self.sink.path()
    }

    /// Run `args` against the repository, or return the memoized result.
    ///
    /// `Err` is only returned when git cannot be launched; a non-zero exit is
    /// a `CachedResult`.
    pub fn execute(&mut self, args: &[&str], mode: Mode) -> Result<CachedResult> {
        let key = CommandKey::new(args, mode);
        if let Some(cached) = self.entries.get(&key) {
            self.hits += 1;
            tracing::debug!("Cache hit ({:?}): {}", mode, key.command);
            return Ok(cached.clone());
        }

        let invocation = self.invoke(args)?;
        let result = match mode {
            Mode::Success => CachedResult::Success(invocation.status.success()),
            Mode::Content if invocation.status.success() => {
                CachedResult::Output(String::from_utf8_lossy(&invocation.stdout).into_owned())
            }
            Mode::Content => {
                let message = self.report_failure(args, invocation.status);
                CachedResult::Failed(message)
            }
        };

        if self.caching {
            self.entries.insert(key, result.clone());
        }
        Ok(result)
    }

    /// Content-mode `execute`, with failures turned into `GitError::CommandFailed`.
    pub fn output(&mut self, args: &[&str]) -> Result<String> {
        let result = self.execute(args, Mode::Content)?;
        result.into_output(&self.command_line(args))
    }

    /// Run `args` without consulting or filling the cache and return raw stdout.
    pub fn fetch(&mut self, args: &[&str]) -> Result<Vec<u8>> {
        let invocation = self.invoke(args)?;
        if invocation.status.success() {
            return Ok(invocation.stdout);
        }

        let message = self.report_failure(args, invocation.status);
        Err(GitError::CommandFailed {
            command: self.command_line(args),
            message,
        })
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            entries: self.entries.len(),
            hits: self.hits,
            invocations: self.invocations,
        }
    }

    fn invoke(&mut self, args: &[&str]) -> Result<Invocation> {
        tracing::debug!("Running: {}", self.command_line(args));
        self.invocations += 1;

        let output = Command::new(&self.git_binary)
            .arg("--git-dir")
            .arg(&self.git_dir)
            .args(args)
            .stdin(Stdio::null())
            .stderr(self.sink.stderr())
            .output()
            .map_err(|source| GitError::Spawn {
                command: self.command_line(args),
                source,
            })?;

        Ok(Invocation {
            status: output.status,
            stdout: output.stdout,
        })
    }

    fn report_failure(&mut self, args: &[&str], status: ExitStatus) -> String {
        let command = self.command_line(args);
        let cause = status.to_string();
        self.sink.report(&format!("Error calling {}: {}", command, cause));
        cause
    }

    fn command_line(&self, args: &[&str]) -> String {
        format!(
            "{} --git-dir {} {}",
            self.git_binary.display(),
            self.git_dir.display(),
            args.join(" ")
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheStats {
    /// Stored results
    pub entries: usize,
    /// Calls answered from the cache
    pub hits: usize,
    /// Times git was actually launched
    pub invocations: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_is_literal_join_of_args() {
        let key = CommandKey::new(&["log", "-n", "1"], Mode::Content);
        assert_eq!(key.command, "log -n 1");
        assert_eq!(key, CommandKey::new(&["log", "-n", "1"], Mode::Content));
        assert_ne!(key, CommandKey::new(&["log", "-n1"], Mode::Content));
    }

    #[test]
    fn key_separates_modes() {
        let args = ["cat-file", "-e", "HEAD"];
        assert_ne!(
            CommandKey::new(&args, Mode::Content),
            CommandKey::new(&args, Mode::Success)
        );
    }

    #[test]
    fn failed_result_becomes_command_error() {
        let err = CachedResult::Failed("exit status: 128".to_string())
            .into_output("git log")
            .unwrap_err();
        assert!(matches!(err, GitError::CommandFailed { ref message, .. } if message == "exit status: 128"));
    }

    #[test]
    fn negative_boolean_is_not_a_failure() {
        let negative = CachedResult::Success(false);
        let failed = CachedResult::Failed("exit status: 1".to_string());
        assert_ne!(negative, failed);
        assert!(!negative.is_success());
        assert!(CachedResult::Output(String::new()).is_success());
    }

    #[test]
    fn sink_truncates_existing_log() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("giterr.log");
        std::fs::write(&path, "stale").unwrap();

        let mut sink = ErrorSink::open(&path).unwrap();
        sink.report("Error calling git log: exit status: 128");

        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, "Error calling git log: exit status: 128\n");
    }

    #[test]
    fn missing_binary_is_fatal() {
        let dir = tempfile::TempDir::new().unwrap();
        let sink = ErrorSink::open(dir.path().join("giterr.log")).unwrap();
        let mut cache = CommandCache::new(
            dir.path().join("no-such-git"),
            dir.path().to_path_buf(),
            true,
            sink,
        );

        let err = cache.execute(&["status"], Mode::Content).unwrap_err();
        assert!(err.is_fatal());
        assert_eq!(cache.stats().entries, 0);
    }
}
