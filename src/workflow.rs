//! The diff → generate → review → commit pipeline.

use tracing::{debug, info};

use crate::commit::{
    CommitMessage, ScopeContext, build_commit_args, commit_paths, display_command,
    generate_commit_message, run_commit,
};
use crate::error::{GitError, RunError};
use crate::git::{FileStatus, GitBackend};
use crate::llm::CompletionClient;
use crate::review::{Prompter, Reviewer};
use crate::scope::group_by_scope;

/// How a run ended when no error occurred.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// Every proposal was accepted. In dry-run mode nothing was committed
    /// and `commits` counts the commands printed instead.
    Completed { commits: usize },
    /// The user declined a proposal; `commits` were made before that.
    Cancelled { commits: usize },
}

impl RunOutcome {
    pub fn commits(&self) -> usize {
        match self {
            RunOutcome::Completed { commits } | RunOutcome::Cancelled { commits } => *commits,
        }
    }
}

/// Drives one invocation of the tool.
pub struct Workflow<'a, G: ?Sized, C: ?Sized, P> {
    git: &'a G,
    client: &'a C,
    reviewer: Reviewer<P>,
    dry_run: bool,
}

impl<'a, G, C, P> Workflow<'a, G, C, P>
where
    G: GitBackend + ?Sized,
    C: CompletionClient + ?Sized,
    P: Prompter,
{
    pub fn new(git: &'a G, client: &'a C, reviewer: Reviewer<P>) -> Self {
        Self {
            git,
            client,
            reviewer,
            dry_run: false,
        }
    }

    /// Print the `git commit` command instead of running it.
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// One commit for everything staged.
    pub async fn run_single(&mut self) -> Result<RunOutcome, RunError> {
        let diff = self.git.staged_diff(None)?;
        let message = generate_commit_message(self.client, &diff, None).await?;

        match self.reviewer.review(message)? {
            Some(accepted) => {
                self.commit(&accepted, None)?;
                Ok(RunOutcome::Completed { commits: 1 })
            }
            None => Ok(RunOutcome::Cancelled { commits: 0 }),
        }
    }

    /// One commit per scope, root first.
    ///
    /// Stops at the first cancellation or error. Commits already made are
    /// kept.
    pub async fn run_scoped(&mut self, scope_dirs: &[String]) -> Result<RunOutcome, RunError> {
        let files = self.git.staged_files()?;
        if files.is_empty() {
            return Err(GitError::NothingStaged.into());
        }

        let groups = group_by_scope(&files, scope_dirs);
        info!("Committing {} scope(s): {:?}", groups.len(), groups.scopes());

        let mut commits = 0;
        for (scope, files) in groups.iter() {
            println!();
            println!("==> {} ({} file(s))", scope, files.len());
            for file in files {
                println!("    {}", file.describe());
            }

            let paths = commit_paths(files);
            let diff = self.git.staged_diff(Some(&paths))?;
            let message = generate_commit_message(
                self.client,
                &diff,
                Some(ScopeContext { name: scope, files }),
            )
            .await?;

            match self.reviewer.review(message)? {
                Some(accepted) => {
                    self.commit(&accepted, Some(files))?;
                    commits += 1;
                }
                None => {
                    debug!("Stopping at scope {} after {} commit(s)", scope, commits);
                    return Ok(RunOutcome::Cancelled { commits });
                }
            }
        }

        Ok(RunOutcome::Completed { commits })
    }

    fn commit(&self, message: &CommitMessage, files: Option<&[FileStatus]>) -> Result<(), RunError> {
        if self.dry_run {
            let paths = files.map(commit_paths);
            let args = build_commit_args(message, paths.as_deref());
            println!("Dry run, would run: {}", display_command(&args));
            return Ok(());
        }

        run_commit(self.git, message, files)?;
        Ok(())
    }
}
