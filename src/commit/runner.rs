//! `git commit` invocation for an accepted message.

use std::collections::HashSet;

use crate::commit::message::CommitMessage;
use crate::error::GitError;
use crate::git::{ChangeKind, FileStatus, GitBackend};

/// Paths to restrict a scoped commit to.
///
/// Each file's current path followed by its pre-rename path, deduplicated,
/// in first-seen order. Committing the source path of a rename is what
/// records the deletion side of it. Copy sources are left out: git reports
/// a modified copy source as its own entry, possibly in another scope.
pub fn commit_paths(files: &[FileStatus]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut paths = Vec::new();

    let candidates = files.iter().flat_map(|f| {
        let source = match f.status {
            ChangeKind::Renamed => f.old_file.as_ref(),
            _ => None,
        };
        std::iter::once(&f.file).chain(source)
    });
    for path in candidates {
        if seen.insert(path.as_str()) {
            paths.push(path.clone());
        }
    }

    paths
}

/// Arguments for `git commit`.
///
/// Exactly one `-m <title>`; a second `-m <body>` only when the trimmed body
/// is non-empty; `-- <paths>` when `paths` is given.
pub fn build_commit_args(message: &CommitMessage, paths: Option<&[String]>) -> Vec<String> {
    let mut args = vec!["commit".to_string(), "-m".to_string(), message.title.clone()];

    if message.has_body() {
        args.push("-m".to_string());
        args.push(message.body.trim().to_string());
    }

    if let Some(paths) = paths {
        args.push("--".to_string());
        args.extend(paths.iter().cloned());
    }

    args
}

/// Render arguments as a copy-pasteable shell command.
pub fn display_command(args: &[String]) -> String {
    shlex::try_join(std::iter::once("git").chain(args.iter().map(String::as_str)))
        .unwrap_or_else(|_| format!("git {}", args.join(" ")))
}

/// Commit `message`, restricted to `files` when given.
pub fn run_commit<G: GitBackend + ?Sized>(
    git: &G,
    message: &CommitMessage,
    files: Option<&[FileStatus]>,
) -> Result<(), GitError> {
    let paths = files.map(commit_paths);
    let args = build_commit_args(message, paths.as_deref());
    git.commit(&args)
}
