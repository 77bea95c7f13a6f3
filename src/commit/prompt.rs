//! Prompt construction for AI-generated commit messages.

use std::sync::LazyLock;

use regex_lite::Regex;

use crate::git::FileStatus;
use crate::scope::ROOT_SCOPE;

/// Maximum characters of diff text sent to the model.
pub const MAX_DIFF_LENGTH: usize = 30_000;

/// Fixed instruction sent as the system message.
pub const COMMIT_INSTRUCTION: &str = r#"You write git commit messages following the Conventional Commits specification.

## Title
- Exactly one line: `type(scope): description` or `type: description`
- Type: one of feat, fix, docs, style, refactor, perf, test, build, ci, chore
- Description: imperative mood ("add", "fix", "remove"), lowercase after the colon, no period at the end
- At most 72 characters

## Body
- At most three lines, each starting with "- "
- Explain what changed and why; do not repeat the title
- Use an empty string when the title says it all

## Output Format
Respond with ONLY a JSON object (no markdown, no explanation):
{"title": "type(scope): description", "body": "- first point\n- second point"}"#;

static ANSI_ESCAPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\x1b\[[0-9;?]*[ -/]*[@-~]").expect("ANSI escape pattern is valid")
});

/// Scope information included in scoped runs.
#[derive(Debug, Clone, Copy)]
pub struct ScopeContext<'a> {
    pub name: &'a str,
    pub files: &'a [FileStatus],
}

/// Build the user message: optional scope and file list, then the diff.
pub fn build_commit_prompt(diff: &str, scope: Option<ScopeContext<'_>>) -> String {
    let (sanitized, truncated) = sanitize_diff(diff, MAX_DIFF_LENGTH);
    let mut prompt = String::new();

    if let Some(scope) = scope {
        if scope.name == ROOT_SCOPE {
            prompt.push_str(
                "These changes are outside any app or library. Pick a scope from the files, or omit it.\n\n",
            );
        } else {
            prompt.push_str(&format!(
                "These changes all belong to `{}`. Use `{}` as the commit scope.\n\n",
                scope.name, scope.name
            ));
        }

        prompt.push_str(&format!("## Changed Files ({})\n", scope.files.len()));
        for file in scope.files {
            prompt.push_str(&format!("- {}\n", file.describe()));
        }
        prompt.push('\n');
    }

    prompt.push_str("## Diff\n```diff\n");
    prompt.push_str(&sanitized);
    if !sanitized.ends_with('\n') {
        prompt.push('\n');
    }
    prompt.push_str("```");

    if truncated {
        prompt.push_str("\n\nNote: The diff was truncated due to size. Focus on the visible changes.");
    }

    prompt
}

/// Strip terminal noise from diff text and cap its length.
///
/// Removes ANSI escape sequences and control characters other than newline
/// and tab, then keeps at most `max_len` characters. Returns the text and
/// whether it was truncated.
pub fn sanitize_diff(text: &str, max_len: usize) -> (String, bool) {
    let without_ansi = ANSI_ESCAPE.replace_all(text, "");
    let mut result: String = without_ansi
        .chars()
        .filter(|c| !c.is_control() || *c == '\n' || *c == '\t')
        .collect();

    let cut = result.char_indices().nth(max_len).map(|(end, _)| end);
    match cut {
        Some(end) => {
            result.truncate(end);
            (result, true)
        }
        None => (result, false),
    }
}
