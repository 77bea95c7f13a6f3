//! Staged file statuses parsed from `git diff --name-status -z`.

use std::fmt;

use tracing::warn;

use crate::error::GitError;

/// Kind of change recorded for a staged file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    Added,
    Modified,
    Deleted,
    Renamed,
    Copied,
}

impl ChangeKind {
    /// Map a `--name-status` letter (similarity score already stripped).
    fn from_letter(letter: char) -> Option<Self> {
        match letter {
            'A' => Some(ChangeKind::Added),
            'M' | 'T' => Some(ChangeKind::Modified),
            'D' => Some(ChangeKind::Deleted),
            'R' => Some(ChangeKind::Renamed),
            'C' => Some(ChangeKind::Copied),
            _ => None,
        }
    }

    /// Whether git reports a source path alongside the target path.
    pub fn has_source(&self) -> bool {
        matches!(self, ChangeKind::Renamed | ChangeKind::Copied)
    }
}

impl fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChangeKind::Added => write!(f, "Added"),
            ChangeKind::Modified => write!(f, "Modified"),
            ChangeKind::Deleted => write!(f, "Deleted"),
            ChangeKind::Renamed => write!(f, "Renamed"),
            ChangeKind::Copied => write!(f, "Copied"),
        }
    }
}

/// A staged file and how it changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileStatus {
    pub status: ChangeKind,
    pub file: String,
    /// Pre-rename (or copy source) path. Only set for renames and copies.
    pub old_file: Option<String>,
}

impl FileStatus {
    pub fn new(status: ChangeKind, file: impl Into<String>) -> Self {
        Self {
            status,
            file: file.into(),
            old_file: None,
        }
    }

    pub fn moved(status: ChangeKind, old_file: impl Into<String>, file: impl Into<String>) -> Self {
        Self {
            status,
            file: file.into(),
            old_file: Some(old_file.into()),
        }
    }

    /// Human-readable line used in prompts, e.g. `src/a.rs -> src/b.rs (Renamed)`.
    pub fn describe(&self) -> String {
        match &self.old_file {
            Some(old) => format!("{} -> {} ({})", old, self.file, self.status),
            None => format!("{} ({})", self.file, self.status),
        }
    }
}

/// Parse NUL-separated `git diff --name-status -z` output.
///
/// Renames and copies carry a similarity score (`R100`, `C075`) and two
/// paths, source first. Entries with letters outside the supported set
/// (e.g. `U` for unmerged) are skipped with a warning.
pub fn parse_name_status(output: &str) -> Result<Vec<FileStatus>, GitError> {
    let mut tokens = output.split('\0').filter(|t| !t.is_empty());
    let mut files = Vec::new();

    while let Some(code) = tokens.next() {
        let letter = code
            .chars()
            .next()
            .ok_or_else(|| GitError::MalformedStatus(code.to_string()))?;

        let Some(status) = ChangeKind::from_letter(letter) else {
            // Still consume the path so the stream stays aligned.
            let path = tokens.next().unwrap_or_default();
            warn!("Skipping '{}' with unsupported status '{}'", path, code);
            continue;
        };

        if status.has_source() {
            let old = tokens
                .next()
                .ok_or_else(|| GitError::MalformedStatus(format!("{code} without source path")))?;
            let new = tokens
                .next()
                .ok_or_else(|| GitError::MalformedStatus(format!("{code} without target path")))?;
            files.push(FileStatus::moved(status, old, new));
        } else {
            let path = tokens
                .next()
                .ok_or_else(|| GitError::MalformedStatus(format!("{code} without path")))?;
            files.push(FileStatus::new(status, path));
        }
    }

    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_change_kind_display() {
        assert_eq!(ChangeKind::Added.to_string(), "Added");
        assert_eq!(ChangeKind::Modified.to_string(), "Modified");
        assert_eq!(ChangeKind::Deleted.to_string(), "Deleted");
        assert_eq!(ChangeKind::Renamed.to_string(), "Renamed");
        assert_eq!(ChangeKind::Copied.to_string(), "Copied");
    }

    #[test]
    fn test_parse_simple_statuses() {
        let out = "A\0apps/web/new.ts\0M\0README.md\0D\0libs/core/old.rs\0";
        let files = parse_name_status(out).unwrap();
        assert_eq!(
            files,
            vec![
                FileStatus::new(ChangeKind::Added, "apps/web/new.ts"),
                FileStatus::new(ChangeKind::Modified, "README.md"),
                FileStatus::new(ChangeKind::Deleted, "libs/core/old.rs"),
            ]
        );
    }

    #[test]
    fn test_parse_rename_and_copy_keep_source_path() {
        let out = "R100\0apps/a/x.ts\0apps/b/x.ts\0C075\0base.json\0apps/a/base.json\0";
        let files = parse_name_status(out).unwrap();
        assert_eq!(files.len(), 2);
        assert_eq!(files[0].status, ChangeKind::Renamed);
        assert_eq!(files[0].file, "apps/b/x.ts");
        assert_eq!(files[0].old_file.as_deref(), Some("apps/a/x.ts"));
        assert_eq!(files[1].status, ChangeKind::Copied);
        assert_eq!(files[1].old_file.as_deref(), Some("base.json"));
    }

    #[test]
    fn test_parse_type_change_is_modified() {
        let files = parse_name_status("T\0link\0").unwrap();
        assert_eq!(files, vec![FileStatus::new(ChangeKind::Modified, "link")]);
    }

    #[test]
    fn test_parse_skips_unmerged_entries() {
        let files = parse_name_status("U\0conflict.txt\0M\0ok.txt\0").unwrap();
        assert_eq!(files, vec![FileStatus::new(ChangeKind::Modified, "ok.txt")]);
    }

    #[test]
    fn test_parse_paths_with_spaces_and_tabs() {
        let files = parse_name_status("M\0dir/my file\twith tab.txt\0").unwrap();
        assert_eq!(files[0].file, "dir/my file\twith tab.txt");
    }

    #[test]
    fn test_parse_empty_output() {
        assert!(parse_name_status("").unwrap().is_empty());
    }

    #[test]
    fn test_parse_truncated_rename_is_malformed() {
        let result = parse_name_status("R090\0only-one-path\0");
        assert!(matches!(result, Err(GitError::MalformedStatus(_))));
    }

    #[test]
    fn test_describe() {
        assert_eq!(
            FileStatus::new(ChangeKind::Added, "a.rs").describe(),
            "a.rs (Added)"
        );
        assert_eq!(
            FileStatus::moved(ChangeKind::Renamed, "a.rs", "b.rs").describe(),
            "a.rs -> b.rs (Renamed)"
        );
    }
}
