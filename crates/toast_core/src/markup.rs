//! Markup policy for caller-supplied icon content.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
/// How `svg` icon content reaches the icon node.
pub enum MarkupPolicy {
    /// Inject the caller's markup verbatim. The caller is trusted; nothing is sanitized.
    #[default]
    Trusted,
    /// HTML-escape the content first so it renders as text.
    Escaped,
}

impl MarkupPolicy {
    /// Applies the policy to raw icon content.
    pub fn apply(self, raw: &str) -> String {
        match self {
            Self::Trusted => raw.to_string(),
            Self::Escaped => escape_markup(raw),
        }
    }
}

/// Escapes the five HTML-significant characters.
pub fn escape_markup(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}
