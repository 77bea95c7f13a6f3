//! Interactive review of a proposed commit message.
//!
//! The user answers one prompt: `y` accepts, `n` cancels, `e` edits. Editing
//! is either inline (two line prompts) or in an external editor.

pub mod editor;

use std::fmt;
use std::io;

use clap::ValueEnum;
use dialoguer::Input;
use tracing::warn;

use crate::commit::CommitMessage;
use crate::error::ReviewError;

pub use editor::{edit_in_editor, parse_edited};

/// Source of answers to line prompts.
///
/// This abstraction allows scripting the review in tests.
pub trait Prompter {
    /// Show `prompt` and return the line the user typed (may be empty).
    fn ask(&mut self, prompt: &str) -> io::Result<String>;
}

/// [`Prompter`] reading from the terminal via dialoguer.
#[derive(Debug, Default)]
pub struct TerminalPrompter;

impl Prompter for TerminalPrompter {
    fn ask(&mut self, prompt: &str) -> io::Result<String> {
        Input::<String>::new()
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()
            .map_err(io::Error::other)
    }
}

/// What the user chose at the review prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewAction {
    Accept,
    Edit,
    Cancel,
}

impl ReviewAction {
    /// Parse an answer; `None` for anything unrecognised.
    pub fn parse(answer: &str) -> Option<Self> {
        match answer.trim().to_lowercase().as_str() {
            "y" | "yes" => Some(ReviewAction::Accept),
            "e" | "edit" => Some(ReviewAction::Edit),
            "n" | "no" => Some(ReviewAction::Cancel),
            _ => None,
        }
    }
}

/// How an `e` answer edits the message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum EditMode {
    /// Prompt for a new title and body on the command line.
    Inline,
    /// Open the message in `$GIT_EDITOR` / `$EDITOR`.
    Editor,
}

impl fmt::Display for EditMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EditMode::Inline => write!(f, "inline"),
            EditMode::Editor => write!(f, "editor"),
        }
    }
}

/// Runs the accept/edit/cancel prompt.
pub struct Reviewer<P> {
    prompter: P,
    mode: EditMode,
    editor: String,
}

impl<P: Prompter> Reviewer<P> {
    pub fn new(prompter: P, mode: EditMode, editor: impl Into<String>) -> Self {
        Self {
            prompter,
            mode,
            editor: editor.into(),
        }
    }

    pub fn mode(&self) -> EditMode {
        self.mode
    }

    /// Show `proposal` and ask what to do with it.
    ///
    /// Returns the message to commit, or `None` if the user cancelled or an
    /// editor session failed.
    pub fn review(&mut self, proposal: CommitMessage) -> Result<Option<CommitMessage>, ReviewError> {
        print_proposal(&proposal);

        loop {
            let answer = self
                .prompter
                .ask("Commit with this message? [y]es / [e]dit / [n]o")
                .map_err(ReviewError::Prompt)?;

            match ReviewAction::parse(&answer) {
                Some(ReviewAction::Accept) => return Ok(Some(proposal)),
                Some(ReviewAction::Cancel) => return Ok(None),
                Some(ReviewAction::Edit) => return self.edit(proposal),
                None => println!("Please answer y, e or n."),
            }
        }
    }

    fn edit(&mut self, proposal: CommitMessage) -> Result<Option<CommitMessage>, ReviewError> {
        match self.mode {
            EditMode::Inline => inline_edit(&mut self.prompter, proposal).map(Some),
            EditMode::Editor => match edit_in_editor(&self.editor, &proposal) {
                Ok(edited) => Ok(Some(edited)),
                Err(e) => {
                    warn!("Editor session failed: {}", e);
                    eprintln!("Edit cancelled: {}", e);
                    Ok(None)
                }
            },
        }
    }
}

/// Prompt for a new title and body; blank answers keep the current value.
pub fn inline_edit<P: Prompter + ?Sized>(
    prompter: &mut P,
    proposal: CommitMessage,
) -> Result<CommitMessage, ReviewError> {
    let title = prompter
        .ask(&format!("Title [{}]", proposal.title))
        .map_err(ReviewError::Prompt)?;
    let body = prompter
        .ask("Body (leave blank to keep)")
        .map_err(ReviewError::Prompt)?;

    let title = match title.trim() {
        "" => proposal.title,
        new => new.to_string(),
    };
    let body = match body.trim() {
        "" => proposal.body,
        new => new.to_string(),
    };

    Ok(CommitMessage { title, body })
}

fn print_proposal(message: &CommitMessage) {
    println!();
    println!("Proposed commit message:");
    println!("─────────────────────────────────────");
    println!("{}", message.title);
    if message.has_body() {
        println!();
        println!("{}", message.body.trim());
    }
    println!("─────────────────────────────────────");
}
