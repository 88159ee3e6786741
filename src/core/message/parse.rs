//! Parser for the bracket placeholder grammar of translated messages.
//!
//! `See [1:our [2:Help] page] for details.` splits into fragments tagged with
//! the placeholder block they belong to; `0` is the top level.

use std::sync::LazyLock;

use regex::Regex;

use crate::core::error::{I18nError, Result};

static BRACKET_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:\[(\d+):)|\]").unwrap());

/// Parse a translated message into `(order, text)` fragments.
///
/// A fragment is emitted when it has text, or when it belongs to a nested
/// block: `[1:]` yields an explicit empty fragment for block 1 so replay
/// still emits the element.
///
/// Unbalanced brackets are reported as [`I18nError::MalformedMessage`].
pub fn parse_msg(message: &str) -> Result<Vec<(usize, String)>> {
    let mut parts = Vec::new();
    let mut stack = vec![0];
    let mut rest = message;

    while let Some(caps) = BRACKET_REGEX.captures(rest) {
        let Some(mat) = caps.get(0) else { break };
        let Some(&current) = stack.last() else { break };

        if mat.start() > 0 || current != 0 {
            parts.push((current, rest[..mat.start()].to_string()));
        }

        match caps.get(1) {
            Some(order) => {
                let order = order.as_str().parse::<usize>().map_err(|e| malformed(message, e))?;
                stack.push(order);
            }
            None => {
                stack.pop();
                if stack.is_empty() {
                    return Err(malformed(message, "unexpected `]` at top level"));
                }
            }
        }

        rest = &rest[mat.end()..];
    }

    if stack.len() > 1 {
        return Err(malformed(
            message,
            format!("{} unclosed placeholder block(s)", stack.len() - 1),
        ));
    }

    if !rest.is_empty() {
        parts.push((0, rest.to_string()));
    }

    Ok(parts)
}

fn malformed(message: &str, reason: impl ToString) -> I18nError {
    I18nError::MalformedMessage {
        message: message.to_string(),
        reason: reason.to_string(),
    }
}
