use std::sync::OnceLock;

use chrono::{DateTime, Local};
use regex::Regex;

pub const TRUNCATE_SEPARATOR: &str = "\n\n[...]\n\n";
pub const EXCERPT_MAX_CHARS: usize = 160;

const MIN_TRUNCATED_BODY: usize = 40;
const FALLBACK_TOPIC_CHARS: usize = 50;
const FALLBACK_TITLE: &str = "AI Generated Post";

fn wrapping_quotes() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#"^["']|["']$"#).expect("valid regex"))
}

/// Keep the head and tail of `content` within `max_chars` characters.
///
/// The head gets 60% of the room left after the separator. Limits below
/// the separator plus 40 characters are raised to that floor.
pub fn smart_truncate(content: &str, max_chars: usize) -> String {
    let length = content.chars().count();
    if length <= max_chars {
        return content.to_string();
    }

    let separator_len = TRUNCATE_SEPARATOR.chars().count();
    let max_chars = max_chars.max(separator_len + MIN_TRUNCATED_BODY);

    let available = max_chars - separator_len;
    let head_len = available * 6 / 10;
    let tail_len = available - head_len;

    let head: String = content.chars().take(head_len).collect();
    let tail: String = content
        .chars()
        .skip(length.saturating_sub(tail_len))
        .collect();

    format!("{head}{TRUNCATE_SEPARATOR}{tail}")
}

/// First `max_chars` characters of `text`.
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}

/// Trim, then drop one leading and one trailing quote character.
pub fn strip_wrapping_quotes(text: &str) -> String {
    wrapping_quotes().replace_all(text.trim(), "").into_owned()
}

/// Title used when the AI title is unusable.
pub fn fallback_title(topic: Option<&str>, now: DateTime<Local>) -> String {
    let mut title = String::from(FALLBACK_TITLE);

    if let Some(topic) = topic.filter(|t| !t.is_empty()) {
        title.push_str(": ");
        title.push_str(&truncate_chars(topic, FALLBACK_TOPIC_CHARS));
        if topic.chars().count() > FALLBACK_TOPIC_CHARS {
            title.push_str("...");
        }
    }

    format!("{} - {}", title, now.format("%Y-%m-%d %H:%M:%S"))
}
