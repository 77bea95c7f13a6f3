//! aicommit - drafts Conventional Commits messages from the staged diff.
//!
//! # Overview
//!
//! aicommit sends `git diff --cached` to an OpenAI-compatible chat endpoint,
//! shows the proposed title and body for review, and runs `git commit` with
//! the accepted message. In scoped mode the staged files are split by
//! monorepo scope (`apps/<name>`, `libs/<name>`, everything else `root`) and
//! each scope is committed separately.

pub mod commit;
pub mod config;
pub mod error;
pub mod git;
pub mod llm;
pub mod review;
pub mod scope;
pub mod workflow;

// Re-export commonly used types
pub use commit::{CommitMessage, ParsedReply};
pub use config::Config;
pub use error::{
    ConfigError, EditorError, GenerationError, GitError, LlmError, ReviewError, RunError,
};
pub use git::{ChangeKind, FileStatus, GitBackend, GitCli};
pub use llm::{CompletionClient, OpenAiClient};
pub use review::{EditMode, Prompter, Reviewer, TerminalPrompter};
pub use scope::{ROOT_SCOPE, ScopeGroups, group_by_scope};
pub use workflow::{RunOutcome, Workflow};
