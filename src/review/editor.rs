//! Editing a proposed message in the user's text editor.

use std::fs;
use std::io::Write;
use std::process::Command;

use tracing::debug;

use crate::commit::CommitMessage;
use crate::error::EditorError;

/// Appended below the message in the temporary file.
const EDIT_HINT: &str = "\n\
# Write the commit title on the first line and the body below it.\n\
# Lines starting with '#' are ignored. An empty title cancels the edit.\n";

/// Open `message` in `editor` and read back the result.
///
/// `editor` is a command line such as `vim` or `code --wait`; the temporary
/// file path is appended as the last argument. The editor inherits the
/// terminal and is waited on.
pub fn edit_in_editor(editor: &str, message: &CommitMessage) -> Result<CommitMessage, EditorError> {
    let words = shlex::split(editor)
        .filter(|w| !w.is_empty())
        .ok_or_else(|| EditorError::InvalidCommand(editor.to_string()))?;
    let (program, args) = words
        .split_first()
        .ok_or_else(|| EditorError::InvalidCommand(editor.to_string()))?;

    let mut file = tempfile::Builder::new()
        .prefix("COMMIT_EDITMSG-")
        .suffix(".txt")
        .tempfile()
        .map_err(EditorError::TempFile)?;
    file.write_all(message.format().as_bytes())
        .and_then(|_| file.write_all(b"\n"))
        .and_then(|_| file.write_all(EDIT_HINT.as_bytes()))
        .and_then(|_| file.flush())
        .map_err(EditorError::TempFile)?;

    // Close our handle so editors that replace the file (or lock it) work;
    // the path is still removed on drop.
    let path = file.into_temp_path();
    debug!("Launching editor {:?} on {}", words, path.display());

    let status = Command::new(program)
        .args(args)
        .arg(&path)
        .status()
        .map_err(|source| EditorError::SpawnFailed {
            editor: editor.to_string(),
            source,
        })?;

    if !status.success() {
        return Err(EditorError::NonZeroExit {
            code: status.code(),
        });
    }

    let edited = fs::read_to_string(&path).map_err(EditorError::ReadFailed)?;
    parse_edited(&edited).ok_or(EditorError::EmptyTitle)
}

/// Read an edited file: comment lines dropped, first line is the title.
pub fn parse_edited(text: &str) -> Option<CommitMessage> {
    let kept = text
        .lines()
        .filter(|line| !line.starts_with('#'))
        .collect::<Vec<_>>()
        .join("\n");
    CommitMessage::from_text(&kept)
}
