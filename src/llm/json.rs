//! Locating a JSON object inside a model reply.
//!
//! Models asked for "only JSON" still wrap it in Markdown fences or add a
//! sentence before it. These helpers find the object without guessing at
//! the surrounding prose.

/// Return the first valid JSON object in `reply`, if any.
///
/// A ` ```json ` (or bare ` ``` `) fenced block is preferred. Otherwise each
/// `{` is tried in turn and the balanced span starting there is accepted if
/// it parses.
pub fn find_json_object(reply: &str) -> Option<&str> {
    let text = fenced_block(reply).unwrap_or(reply).trim();

    for (start, _) in text.match_indices('{') {
        let Some(candidate) = balanced_span(&text[start..]) else {
            continue;
        };
        if serde_json::from_str::<serde_json::Value>(candidate)
            .is_ok_and(|v| v.is_object())
        {
            return Some(candidate);
        }
    }

    None
}

/// Contents of the first Markdown code fence, if it holds an object.
fn fenced_block(text: &str) -> Option<&str> {
    let open = text.find("```")?;
    let after_ticks = &text[open + 3..];
    // Skip an info string such as `json` on the opening line.
    let body = match after_ticks.split_once('\n') {
        Some((info, rest)) if info.trim().chars().all(|c| c.is_ascii_alphanumeric()) => rest,
        _ => after_ticks,
    };
    let close = body.find("```")?;
    let inner = body[..close].trim();
    inner.starts_with('{').then_some(inner)
}

/// The prefix of `text` from its leading `{` to the matching `}`.
///
/// Braces inside JSON string literals (including escaped quotes) are ignored.
fn balanced_span(text: &str) -> Option<&str> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (idx, ch) in text.char_indices() {
        if in_string {
            match ch {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }

        match ch {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return Some(&text[..=idx]);
                }
            }
            _ => {}
        }
    }

    None
}
