use std::sync::LazyLock;

use regex::Regex;

static PROJECT_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)^\[(\w+)\]\s*(\S.*)").expect("project prefix is a valid regex")
});

/// Splits a leading `[TAG]` prefix off a message.
///
/// Returns the tag and the text after the bracket and its trailing
/// whitespace, or `None` and the untouched input when there is no prefix.
pub fn extract_project_tag(text: &str) -> (Option<String>, String) {
    match PROJECT_PREFIX.captures(text) {
        Some(captures) => (
            Some(captures[1].to_string()),
            captures[2].to_string(),
        ),
        None => (None, text.to_string()),
    }
}

pub fn resolve_project_key(tag: Option<String>, default_key: &str) -> String {
    tag.unwrap_or_else(|| default_key.to_string())
}
