//! Error types for aicommit modules using thiserror.

use thiserror::Error;

/// Errors from loading configuration out of the environment.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("OPENAI_API_KEY is not set. Export it or add it to a .env file in the repository")]
    MissingApiKey,
}

/// Errors from git operations.
#[derive(Error, Debug)]
pub enum GitError {
    #[error("git executable not found on PATH")]
    NotInstalled,

    #[error("Not a git repository: {0}")]
    NotARepository(#[source] git2::Error),

    #[error("Repository has no working tree (bare repository)")]
    BareRepository,

    #[error("Failed to run git {operation}: {source}")]
    SpawnFailed {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("git {operation} failed: {stderr}")]
    CommandFailed { operation: String, stderr: String },

    #[error("No staged changes. Stage files with 'git add' first")]
    NothingStaged,

    #[error("Unexpected output from git diff --name-status: {0}")]
    MalformedStatus(String),

    #[error("git commit exited with {}", code.map_or("unknown status".to_string(), |c| format!("code {c}")))]
    CommitFailed { code: Option<i32> },
}

/// Errors from the chat-completion endpoint.
#[derive(Error, Debug)]
pub enum LlmError {
    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("Completion request failed: {0}")]
    Request(#[source] reqwest::Error),

    #[error("Completion endpoint returned {status}: {body}")]
    Api { status: u16, body: String },

    #[error("Completion endpoint returned an unreadable response: {0}")]
    InvalidResponse(String),

    #[error("Completion endpoint returned no content")]
    EmptyResponse,
}

/// Errors from commit message generation.
#[derive(Error, Debug)]
pub enum GenerationError {
    #[error(transparent)]
    Llm(#[from] LlmError),

    #[error("Model reply did not contain a commit title")]
    EmptyTitle,
}

/// Errors from editing a message in an external editor.
///
/// The reviewer treats every variant as a cancelled edit rather than a
/// fatal error.
#[derive(Error, Debug)]
pub enum EditorError {
    #[error("Editor command '{0}' could not be parsed")]
    InvalidCommand(String),

    #[error("Failed to prepare temporary message file: {0}")]
    TempFile(#[source] std::io::Error),

    #[error("Failed to start editor '{editor}': {source}")]
    SpawnFailed {
        editor: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Editor exited with {}", code.map_or("unknown status".to_string(), |c| format!("code {c}")))]
    NonZeroExit { code: Option<i32> },

    #[error("Failed to read edited message: {0}")]
    ReadFailed(#[source] std::io::Error),

    #[error("Edited message has an empty title")]
    EmptyTitle,
}

/// Errors from the interactive review prompt.
#[derive(Error, Debug)]
pub enum ReviewError {
    #[error("Failed to read answer from terminal: {0}")]
    Prompt(#[source] std::io::Error),
}

/// Any error that ends a run. Maps onto the process exit status.
#[derive(Error, Debug)]
pub enum RunError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Git(#[from] GitError),

    #[error("Failed to generate commit message: {0}")]
    Generation(#[from] GenerationError),

    #[error(transparent)]
    Review(#[from] ReviewError),
}

impl RunError {
    /// Exit status for this error: the commit subprocess's own status when
    /// `git commit` failed, 1 otherwise.
    pub fn exit_code(&self) -> i32 {
        match self {
            RunError::Git(GitError::CommitFailed { code: Some(code) }) if *code != 0 => *code,
            _ => 1,
        }
    }
}
