//! AI-generated commit messages and the commit they end up in.

pub mod message;
pub mod prompt;
pub mod runner;

pub use message::{CommitMessage, ParsedReply, generate_commit_message, parse_reply};
pub use prompt::{COMMIT_INSTRUCTION, ScopeContext, build_commit_prompt};
pub use runner::{build_commit_args, commit_paths, display_command, run_commit};
