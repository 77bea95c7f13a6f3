//! Commit messages: parsing model replies and generating proposals.

use std::fmt;

use serde::Deserialize;
use tracing::{debug, warn};

use crate::commit::prompt::{COMMIT_INSTRUCTION, ScopeContext, build_commit_prompt};
use crate::error::GenerationError;
use crate::llm::{CompletionClient, find_json_object};

/// A commit title and body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitMessage {
    pub title: String,
    /// Free-form, possibly multi-line, possibly empty.
    pub body: String,
}

impl CommitMessage {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
        }
    }

    /// Whether the body has any non-whitespace content.
    pub fn has_body(&self) -> bool {
        !self.body.trim().is_empty()
    }

    /// Split text into a title (first line) and body (the rest), trimmed.
    ///
    /// Returns `None` when the first line is blank.
    pub fn from_text(text: &str) -> Option<Self> {
        let (first, rest) = text.split_once('\n').unwrap_or((text, ""));
        let title = first.trim();
        if title.is_empty() {
            return None;
        }
        Some(Self::new(title, rest.trim()))
    }

    /// Git-style rendering: title, blank line, body.
    pub fn format(&self) -> String {
        if self.has_body() {
            format!("{}\n\n{}", self.title, self.body.trim())
        } else {
            self.title.clone()
        }
    }
}

impl fmt::Display for CommitMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format())
    }
}

/// How a model reply was turned into a [`CommitMessage`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedReply {
    /// The reply contained a JSON object with `title`/`body` fields.
    Structured(CommitMessage),
    /// No JSON object was found; first line is the title, the rest the body.
    BestEffort(CommitMessage),
}

impl ParsedReply {
    pub fn message(&self) -> &CommitMessage {
        match self {
            ParsedReply::Structured(m) | ParsedReply::BestEffort(m) => m,
        }
    }

    pub fn into_message(self) -> CommitMessage {
        match self {
            ParsedReply::Structured(m) | ParsedReply::BestEffort(m) => m,
        }
    }

    pub fn is_structured(&self) -> bool {
        matches!(self, ParsedReply::Structured(_))
    }
}

#[derive(Deserialize)]
struct ReplyFields {
    title: Option<String>,
    body: Option<String>,
}

/// Parse a model reply.
///
/// A JSON object with a `title` key (bare, fenced, or embedded in prose)
/// yields [`ParsedReply::Structured`]. Anything else, including prose that
/// merely contains an object such as `{}`, falls back to a line split,
/// ignoring surrounding code fences. An empty title is always an error.
pub fn parse_reply(reply: &str) -> Result<ParsedReply, GenerationError> {
    if let Some(json) = find_json_object(reply)
        && let Ok(ReplyFields {
            title: Some(title),
            body,
        }) = serde_json::from_str::<ReplyFields>(json)
    {
        let title = title
            .lines()
            .find(|l| !l.trim().is_empty())
            .map(str::trim)
            .unwrap_or_default();
        if title.is_empty() {
            return Err(GenerationError::EmptyTitle);
        }
        let body = body.unwrap_or_default();
        return Ok(ParsedReply::Structured(CommitMessage::new(
            title,
            body.trim(),
        )));
    }

    let unfenced: String = reply
        .lines()
        .filter(|l| !l.trim_start().starts_with("```"))
        .collect::<Vec<_>>()
        .join("\n");

    CommitMessage::from_text(unfenced.trim())
        .map(ParsedReply::BestEffort)
        .ok_or(GenerationError::EmptyTitle)
}

/// Ask the model for a commit message describing `diff`.
///
/// `scope` adds the scope name and file list to the prompt. The request is
/// made once; any failure is returned to the caller.
pub async fn generate_commit_message<C: CompletionClient + ?Sized>(
    client: &C,
    diff: &str,
    scope: Option<ScopeContext<'_>>,
) -> Result<CommitMessage, GenerationError> {
    let prompt = build_commit_prompt(diff, scope);
    debug!("Commit prompt length: {} chars", prompt.len());

    let reply = client.complete(COMMIT_INSTRUCTION, &prompt).await?;
    let parsed = parse_reply(&reply)?;

    if !parsed.is_structured() {
        warn!("Model reply was not JSON, using first line as the title");
        debug!("Raw reply: {}", reply);
    }

    Ok(parsed.into_message())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LlmError;
    use crate::git::{ChangeKind, FileStatus};
    use crate::llm::MockCompletionClient;

    #[test]
    fn test_parse_json_reply() {
        let parsed = parse_reply(r#"{"title":"feat: x","body":"- y"}"#).unwrap();
        assert_eq!(
            parsed,
            ParsedReply::Structured(CommitMessage::new("feat: x", "- y"))
        );
    }

    #[test]
    fn test_parse_plain_text_falls_back_to_line_split() {
        let parsed = parse_reply("feat: x\n- y").unwrap();
        assert_eq!(
            parsed,
            ParsedReply::BestEffort(CommitMessage::new("feat: x", "- y"))
        );
    }

    #[test]
    fn test_parse_json_without_body() {
        let parsed = parse_reply(r#"{"title": "fix: typo"}"#).unwrap();
        assert_eq!(parsed.message(), &CommitMessage::new("fix: typo", ""));
        assert!(parsed.is_structured());
    }

    #[test]
    fn test_parse_fenced_json() {
        let reply = "```json\n{\"title\": \"docs: update readme\", \"body\": \"- a\\n- b\"}\n```";
        let parsed = parse_reply(reply).unwrap();
        assert_eq!(
            parsed.into_message(),
            CommitMessage::new("docs: update readme", "- a\n- b")
        );
    }

    #[test]
    fn test_parse_fenced_plain_text() {
        let parsed = parse_reply("```\nchore: bump deps\n\n- update serde\n```").unwrap();
        assert_eq!(
            parsed,
            ParsedReply::BestEffort(CommitMessage::new("chore: bump deps", "- update serde"))
        );
    }

    #[test]
    fn test_prose_with_untitled_object_falls_back_to_line_split() {
        let parsed = parse_reply("refactor: replace {} with Default::default()\n- simplify").unwrap();
        assert_eq!(
            parsed,
            ParsedReply::BestEffort(CommitMessage::new(
                "refactor: replace {} with Default::default()",
                "- simplify"
            ))
        );

        let parsed = parse_reply(r#"fix: accept {"a":1} payloads"#).unwrap();
        assert_eq!(parsed.message().title, r#"fix: accept {"a":1} payloads"#);
        assert!(!parsed.is_structured());
    }

    #[test]
    fn test_parse_multiline_json_title_keeps_first_line() {
        let parsed = parse_reply(r#"{"title": "feat: a\nextra", "body": ""}"#).unwrap();
        assert_eq!(parsed.message().title, "feat: a");
    }

    #[test]
    fn test_empty_title_is_an_error() {
        for reply in [
            r#"{"title": "", "body": "- y"}"#,
            r#"{"title": "   "}"#,
            "",
            "   \n  \n",
            "```\n```",
        ] {
            assert!(
                matches!(parse_reply(reply), Err(GenerationError::EmptyTitle)),
                "expected EmptyTitle for {reply:?}"
            );
        }
    }

    #[test]
    fn test_from_text() {
        assert_eq!(
            CommitMessage::from_text("feat: a\n\nbody line 1\nbody line 2\n"),
            Some(CommitMessage::new("feat: a", "body line 1\nbody line 2"))
        );
        assert_eq!(CommitMessage::from_text("  \nbody"), None);
        assert_eq!(
            CommitMessage::from_text("fix: b"),
            Some(CommitMessage::new("fix: b", ""))
        );
    }

    #[test]
    fn test_format() {
        assert_eq!(CommitMessage::new("feat: a", "").format(), "feat: a");
        assert_eq!(CommitMessage::new("feat: a", "  ").format(), "feat: a");
        assert_eq!(
            CommitMessage::new("feat: a", "- b\n").format(),
            "feat: a\n\n- b"
        );
    }

    #[tokio::test]
    async fn test_generate_sends_instruction_and_diff() {
        let mut client = MockCompletionClient::new();
        client
            .expect_complete()
            .withf(|instruction, content| {
                instruction.contains("Conventional Commits") && content.contains("+hello")
            })
            .times(1)
            .returning(|_, _| Ok(r#"{"title": "feat: greet", "body": "- say hello"}"#.to_string()));

        let message = generate_commit_message(&client, "+hello\n", None)
            .await
            .unwrap();
        assert_eq!(message, CommitMessage::new("feat: greet", "- say hello"));
    }

    #[tokio::test]
    async fn test_generate_includes_scope_files() {
        let files = vec![FileStatus::new(ChangeKind::Added, "apps/web/x.ts")];
        let mut client = MockCompletionClient::new();
        client
            .expect_complete()
            .withf(|_, content| content.contains("apps/web/x.ts (Added)"))
            .times(1)
            .returning(|_, _| Ok("feat(web): add x".to_string()));

        let message = generate_commit_message(
            &client,
            "+x\n",
            Some(ScopeContext {
                name: "web",
                files: &files,
            }),
        )
        .await
        .unwrap();
        assert_eq!(message.title, "feat(web): add x");
        assert!(message.body.is_empty());
    }

    #[tokio::test]
    async fn test_generate_is_not_retried() {
        let mut client = MockCompletionClient::new();
        client
            .expect_complete()
            .times(1)
            .returning(|_, _| Err(LlmError::EmptyResponse));

        let result = generate_commit_message(&client, "+x\n", None).await;
        assert!(matches!(
            result,
            Err(GenerationError::Llm(LlmError::EmptyResponse))
        ));
    }

    #[tokio::test]
    async fn test_generate_rejects_empty_title() {
        let mut client = MockCompletionClient::new();
        client
            .expect_complete()
            .times(1)
            .returning(|_, _| Ok(r#"{"title": " ", "body": "- y"}"#.to_string()));

        let result = generate_commit_message(&client, "+x\n", None).await;
        assert!(matches!(result, Err(GenerationError::EmptyTitle)));
    }
}
