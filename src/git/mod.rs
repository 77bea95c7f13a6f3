//! Git access by shelling out to the system `git` binary.
//!
//! Using the real binary inherits the user's config, hooks and signing
//! setup, which matters most for `git commit`.

pub mod status;

use std::path::{Path, PathBuf};
use std::process::Command;

use git2::Repository;
use tracing::debug;

use crate::error::GitError;

pub use status::{ChangeKind, FileStatus, parse_name_status};

/// Operations the commit workflow needs from version control.
pub trait GitBackend {
    /// Staged diff, optionally restricted to `paths` with rename/copy
    /// detection. Errors with [`GitError::NothingStaged`] when empty.
    fn staged_diff(&self, paths: Option<&[String]>) -> Result<String, GitError>;

    /// Staged files with their change status.
    fn staged_files(&self) -> Result<Vec<FileStatus>, GitError>;

    /// Run `git <args>` with inherited stdio. Used for `git commit`.
    fn commit(&self, args: &[String]) -> Result<(), GitError>;
}

/// [`GitBackend`] backed by the `git` executable.
#[derive(Debug, Clone)]
pub struct GitCli {
    workdir: PathBuf,
}

impl GitCli {
    /// Locate the repository containing the current directory.
    ///
    /// Fails if `git` is not installed, the directory is not inside a
    /// repository, or the repository is bare.
    pub fn discover() -> Result<Self, GitError> {
        if which::which("git").is_err() {
            return Err(GitError::NotInstalled);
        }

        let repo = Repository::discover(".").map_err(GitError::NotARepository)?;
        let workdir = repo.workdir().ok_or(GitError::BareRepository)?;
        Ok(Self::at(workdir))
    }

    /// Use an explicit work tree.
    pub fn at(workdir: impl AsRef<Path>) -> Self {
        Self {
            workdir: workdir.as_ref().to_path_buf(),
        }
    }

    pub fn workdir(&self) -> &Path {
        &self.workdir
    }

    /// Run a git command and capture stdout.
    fn output(&self, args: &[&str], operation: &str) -> Result<String, GitError> {
        debug!("git {}", args.join(" "));

        let output = Command::new("git")
            .args(args)
            .current_dir(&self.workdir)
            .output()
            .map_err(|source| GitError::SpawnFailed {
                operation: operation.to_string(),
                source,
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(GitError::CommandFailed {
                operation: operation.to_string(),
                stderr: stderr.trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl GitBackend for GitCli {
    fn staged_diff(&self, paths: Option<&[String]>) -> Result<String, GitError> {
        let mut args = vec!["diff", "--cached", "--no-color", "--no-ext-diff"];
        if let Some(paths) = paths {
            args.extend(["--find-renames", "--find-copies", "--"]);
            args.extend(paths.iter().map(String::as_str));
        }

        let diff = self.output(&args, "diff --cached")?;
        if diff.trim().is_empty() {
            return Err(GitError::NothingStaged);
        }
        Ok(diff)
    }

    fn staged_files(&self) -> Result<Vec<FileStatus>, GitError> {
        let output = self.output(
            &[
                "diff",
                "--cached",
                "--name-status",
                "--find-renames",
                "--find-copies",
                "-z",
            ],
            "diff --name-status",
        )?;
        parse_name_status(&output)
    }

    fn commit(&self, args: &[String]) -> Result<(), GitError> {
        debug!("git {:?}", args);

        let status = Command::new("git")
            .args(args)
            .current_dir(&self.workdir)
            .status()
            .map_err(|source| GitError::SpawnFailed {
                operation: "commit".to_string(),
                source,
            })?;

        if !status.success() {
            return Err(GitError::CommitFailed {
                code: status.code(),
            });
        }
        Ok(())
    }
}
