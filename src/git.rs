//! Git repository operations.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use chrono::{DateTime, FixedOffset};
use tokio::process::Command;

/// The operations history synthesis needs from a version-control system.
#[allow(async_fn_in_trait)]
pub trait VersionControl {
    /// Stage a single file for the next commit.
    async fn stage_file(&self, path: &Path) -> Result<(), Error>;

    /// Commit what is staged, with author and committer dates set to
    /// `timestamp`. Returns the short hash of the new commit.
    async fn commit(
        &self,
        message: &str,
        timestamp: &DateTime<FixedOffset>,
    ) -> Result<String, Error>;

    /// Push the current branch to its upstream.
    async fn push(&self) -> Result<(), Error>;
}

/// A git repository handle that provides common operations.
#[derive(Debug, Clone)]
pub struct Git {
    root: PathBuf,
}

impl Git {
    /// Find the repository enclosing `dir`.
    pub async fn discover(dir: &Path) -> Result<Self, Error> {
        let output = Command::new("git")
            .args(["rev-parse", "--show-toplevel"])
            .current_dir(dir)
            .output()
            .await
            .map_err(|e| Error::Exec(format!("git rev-parse: {e}")))?;

        if !output.status.success() {
            return Err(Error::NotARepo(dir.display().to_string()));
        }

        let root = String::from_utf8_lossy(&output.stdout).trim().to_string();
        Ok(Self {
            root: PathBuf::from(root),
        })
    }

    /// Get the repository root path.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Get the short hash of HEAD.
    pub async fn head_short(&self) -> Result<String, Error> {
        let hash = self.run_output(&["rev-parse", "HEAD"], &[]).await?;
        let hash = hash.trim();
        Ok(hash[..8.min(hash.len())].to_string())
    }

    // -------------------------------------------------------------------------
    // Internal helpers
    // -------------------------------------------------------------------------

    /// Run a git command in the repository root and capture its stdout.
    async fn run_output<S: AsRef<OsStr>>(
        &self,
        args: &[S],
        envs: &[(&str, &str)],
    ) -> Result<String, Error> {
        let output = Command::new("git")
            .args(args)
            .envs(envs.iter().copied())
            .current_dir(&self.root)
            .output()
            .await
            .map_err(|e| Error::Exec(format!("git {}: {e}", describe(args))))?;

        if output.status.success() {
            Ok(String::from_utf8_lossy(&output.stdout).to_string())
        } else {
            let stderr = String::from_utf8_lossy(&output.stderr);
            Err(Error::Failed(format!("git {}: {}", describe(args), stderr.trim())))
        }
    }
}

impl VersionControl for Git {
    async fn stage_file(&self, path: &Path) -> Result<(), Error> {
        let args = [OsStr::new("add"), OsStr::new("--"), path.as_os_str()];
        self.run_output(&args, &[])
            .await
            .map_err(|e| Error::Staging {
                path: path.display().to_string(),
                detail: e.to_string(),
            })?;
        Ok(())
    }

    async fn commit(
        &self,
        message: &str,
        timestamp: &DateTime<FixedOffset>,
    ) -> Result<String, Error> {
        let date = timestamp.to_rfc3339();
        let args = [
            "commit",
            "--allow-empty",
            "-m",
            message,
            "--date",
            date.as_str(),
        ];
        let summary = self
            .run_output(&args, &[("GIT_COMMITTER_DATE", date.as_str())])
            .await
            .map_err(|e| Error::Commit {
                detail: e.to_string(),
            })?;

        match commit_hash(&summary) {
            Some(hash) => Ok(hash),
            None => self.head_short().await.map_err(|e| Error::Commit {
                detail: format!("commit created but its hash could not be read: {e}"),
            }),
        }
    }

    async fn push(&self) -> Result<(), Error> {
        self.run_output(&["push"], &[])
            .await
            .map_err(|e| Error::Push {
                detail: e.to_string(),
            })?;
        Ok(())
    }
}

/// Abbreviated hash from the `[branch abc1234] subject` line `git commit`
/// prints.
fn commit_hash(summary: &str) -> Option<String> {
    let line = summary.lines().find(|l| l.starts_with('['))?;
    let inside = &line[1..line.find(']')?];
    inside
        .split_whitespace()
        .last()
        .filter(|h| h.chars().all(|c| c.is_ascii_hexdigit()))
        .map(str::to_string)
}

fn describe<S: AsRef<OsStr>>(args: &[S]) -> String {
    args.iter()
        .map(|a| a.as_ref().to_string_lossy())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Errors from git operations.
#[derive(Debug, Clone, thiserror::Error)]
pub enum Error {
    #[error("failed to execute: {0}")]
    Exec(String),

    #[error("not a git repository (searched from '{0}')")]
    NotARepo(String),

    #[error("failed to stage '{path}': {detail}")]
    Staging { path: String, detail: String },

    #[error("failed to commit: {detail}")]
    Commit { detail: String },

    #[error("failed to push: {detail}")]
    Push { detail: String },

    #[error("{0}")]
    Failed(String),
}
