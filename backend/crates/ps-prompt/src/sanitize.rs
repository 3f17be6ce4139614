//! Plain-text cleanup for values supplied by the AI backend.

use std::sync::OnceLock;

use regex::Regex;

static SCRIPT_STYLE_RE: OnceLock<Regex> = OnceLock::new();
static TAG_RE: OnceLock<Regex> = OnceLock::new();
static WHITESPACE_RE: OnceLock<Regex> = OnceLock::new();

fn script_style_regex() -> &'static Regex {
    SCRIPT_STYLE_RE.get_or_init(|| {
        Regex::new(r"(?is)<(?:script|style)\b[^>]*>.*?</(?:script|style)\s*>").expect("valid regex")
    })
}

fn tag_regex() -> &'static Regex {
    TAG_RE.get_or_init(|| Regex::new(r"<[^>]*>").expect("valid regex"))
}

fn whitespace_regex() -> &'static Regex {
    WHITESPACE_RE.get_or_init(|| Regex::new(r"\s+").expect("valid regex"))
}

/// Remove HTML tags, dropping `<script>`/`<style>` bodies entirely.
pub fn strip_tags(input: &str) -> String {
    let without_scripts = script_style_regex().replace_all(input, "");
    tag_regex().replace_all(&without_scripts, "").into_owned()
}

/// Single-line plain text: tags stripped, whitespace runs collapsed, trimmed.
pub fn sanitize_text(input: &str) -> String {
    let stripped = strip_tags(input);
    whitespace_regex()
        .replace_all(&stripped, " ")
        .trim()
        .to_string()
}

/// Multi-line plain text: tags stripped, line breaks kept, trimmed.
pub fn sanitize_multiline(input: &str) -> String {
    strip_tags(input).trim().to_string()
}
