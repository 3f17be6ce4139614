//! `{{name}}` placeholder expansion.
//!
//! System variables are computed from the clock, the site identity and the
//! topic. Any other placeholder is an AI variable whose value is requested
//! from the AI backend as a JSON object and substituted later.
//!
//! Substitution is a single pass over the template: replacement text is
//! never rescanned, so a value that itself contains `{{...}}` stays literal.

use crate::error::{TemplateError, TemplateResult};
use crate::sanitize::{sanitize_multiline, sanitize_text};

use std::collections::{HashMap, HashSet};
use std::sync::OnceLock;

use chrono::{DateTime, Local};
use log::warn;
use rand::Rng;
use regex::{Captures, Regex};
use serde_json::Value;

/// Built-in variable names, in the order they are computed.
pub const SYSTEM_VARIABLES: [&str; 10] = [
    "date",
    "year",
    "month",
    "day",
    "time",
    "site_name",
    "site_description",
    "random_number",
    "topic",
    "title",
];

const RANDOM_NUMBER_MIN: u32 = 1;
const RANDOM_NUMBER_MAX: u32 = 1000;

/// Extra variables contributed at resolution time. Receives the topic and
/// returns `(name, value)` pairs; a name that already exists is overridden.
pub type VariableHook = Box<dyn Fn(Option<&str>) -> Vec<(String, String)> + Send + Sync>;

/// Values for AI variables, keyed by variable name.
pub type AiValues = HashMap<String, String>;

static TOKEN_RE: OnceLock<Regex> = OnceLock::new();
static FENCE_OPEN_RE: OnceLock<Regex> = OnceLock::new();
static FENCE_CLOSE_RE: OnceLock<Regex> = OnceLock::new();

fn token_regex() -> &'static Regex {
    TOKEN_RE.get_or_init(|| Regex::new(r"\{\{([^{}]+)\}\}").expect("valid regex"))
}

fn fence_open_regex() -> &'static Regex {
    FENCE_OPEN_RE.get_or_init(|| Regex::new(r"(?i)^```(?:json)?\s*").expect("valid regex"))
}

fn fence_close_regex() -> &'static Regex {
    FENCE_CLOSE_RE.get_or_init(|| Regex::new(r"\s*```$").expect("valid regex"))
}

/// A resolved snapshot of variable values.
///
/// Taking one snapshot and applying it to several strings keeps values such
/// as `random_number` consistent across them.
#[derive(Debug, Clone, Default)]
pub struct VariableSet {
    entries: Vec<(String, String)>,
}

impl VariableSet {
    fn upsert(&mut self, name: String, value: String) {
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn names(&self) -> Vec<String> {
        self.entries.iter().map(|(n, _)| n.clone()).collect()
    }

    pub fn entries(&self) -> &[(String, String)] {
        &self.entries
    }

    /// Replace every known placeholder in one pass; unknown ones are kept.
    pub fn apply(&self, template: &str) -> String {
        replace_tokens(template, |name| self.get(name).map(str::to_string))
    }
}

pub struct VariableResolver {
    site_name: String,
    site_description: String,
    hooks: Vec<VariableHook>,
    fixed_now: Option<DateTime<Local>>,
}

impl VariableResolver {
    pub fn new(site_name: impl Into<String>, site_description: impl Into<String>) -> Self {
        Self {
            site_name: site_name.into(),
            site_description: site_description.into(),
            hooks: Vec::new(),
            fixed_now: None,
        }
    }

    /// Register a hook; hooks run in registration order after the built-ins.
    pub fn with_hook(mut self, hook: VariableHook) -> Self {
        self.hooks.push(hook);
        self
    }

    /// Pin the clock used for date and time variables.
    pub fn at_time(mut self, now: DateTime<Local>) -> Self {
        self.fixed_now = Some(now);
        self
    }

    fn now(&self) -> DateTime<Local> {
        self.fixed_now.unwrap_or_else(Local::now)
    }

    pub fn get_variables(&self, topic: Option<&str>) -> VariableSet {
        let now = self.now();
        let topic_value = topic.unwrap_or_default().to_string();
        let random_number = rand::rng().random_range(RANDOM_NUMBER_MIN..=RANDOM_NUMBER_MAX);

        let mut set = VariableSet::default();
        let builtins = [
            now.format("%B %-d, %Y").to_string(),
            now.format("%Y").to_string(),
            now.format("%B").to_string(),
            now.format("%A").to_string(),
            now.format("%H:%M").to_string(),
            self.site_name.clone(),
            self.site_description.clone(),
            random_number.to_string(),
            topic_value.clone(),
            topic_value,
        ];
        for (name, value) in SYSTEM_VARIABLES.iter().zip(builtins) {
            set.upsert((*name).to_string(), value);
        }

        for hook in &self.hooks {
            for (name, value) in hook(topic) {
                set.upsert(name, value);
            }
        }

        set
    }

    /// Names of every system variable, including hook-provided ones.
    pub fn variable_names(&self) -> Vec<String> {
        self.get_variables(None).names()
    }

    pub fn process(&self, template: &str, topic: Option<&str>) -> String {
        self.get_variables(topic).apply(template)
    }

    /// Placeholder names that are not system variables, deduplicated, in
    /// order of first appearance.
    pub fn extract_ai_variables(&self, template: &str) -> Vec<String> {
        let system: HashSet<String> = self.variable_names().into_iter().collect();
        let mut seen = HashSet::new();

        token_regex()
            .captures_iter(template)
            .map(|caps| caps[1].trim().to_string())
            .filter(|name| !system.contains(name))
            .filter(|name| seen.insert(name.clone()))
            .collect()
    }

    pub fn has_ai_variables(&self, template: &str) -> bool {
        !self.extract_ai_variables(template).is_empty()
    }

    /// Prompt asking the AI backend for a JSON object with one value per
    /// name. Empty when there is nothing to resolve.
    pub fn build_ai_variables_prompt(&self, names: &[String], context: &str) -> String {
        if names.is_empty() {
            return String::new();
        }

        let list = names.join(", ");

        format!(
            "Based on the following content context, provide creative and appropriate values for these variables: {list}\n\n\
             Content Context:\n{context}\n\n\
             IMPORTANT: Respond ONLY with a JSON object containing the variable names as keys and their values. \
             Do not include any explanation or extra text. \
             Example format: {{\"VariableName1\": \"Value1\", \"VariableName2\": \"Value2\"}}\n\n\
             Provide values that are specific, relevant, and would make sense in the context of the content. \
             For comparison articles, ensure the values are distinct from each other."
        )
    }

    /// Read AI variable values from a backend response.
    ///
    /// Markdown code fences are ignored. Anything that is not a JSON object
    /// yields no values; keys outside `expected` and null values are dropped.
    /// Arrays and objects are kept as their JSON text. Every value is reduced
    /// to single-line plain text.
    pub fn parse_ai_variables_response(&self, response: &str, expected: &[String]) -> AiValues {
        let trimmed = response.trim();
        let unfenced = fence_open_regex().replace(trimmed, "");
        let unfenced = fence_close_regex().replace(&unfenced, "");

        let decoded = match serde_json::from_str::<Value>(unfenced.trim()) {
            Ok(Value::Object(map)) => map,
            Ok(_) => {
                warn!("AI variables response is not a JSON object");
                return AiValues::new();
            }
            Err(e) => {
                warn!("AI variables response is not valid JSON: {}", e);
                return AiValues::new();
            }
        };

        expected
            .iter()
            .filter_map(|name| {
                let raw = match decoded.get(name)? {
                    Value::Null => return None,
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                };
                Some((name.clone(), sanitize_text(&raw)))
            })
            .collect()
    }

    /// Substitute AI values and system variables in one pass.
    ///
    /// AI values win over system variables of the same name. Inserted text is
    /// not rescanned, so an AI value that looks like `{{date}}` stays literal.
    pub fn process_with_ai_variables(
        &self,
        template: &str,
        topic: Option<&str>,
        ai_values: &AiValues,
    ) -> String {
        let system = self.get_variables(topic);

        replace_tokens(template, |name| {
            ai_values
                .get(name)
                .map(|value| sanitize_multiline(value))
                .or_else(|| system.get(name).map(str::to_string))
        })
    }

    pub fn validate_template(&self, template: &str, allow_ai_variables: bool) -> TemplateResult<()> {
        let open = template.matches("{{").count();
        let close = template.matches("}}").count();

        if open != close {
            return Err(TemplateError::unclosed_braces(open, close));
        }

        if allow_ai_variables {
            return Ok(());
        }

        let available = self.variable_names();
        for caps in token_regex().captures_iter(template) {
            let name = caps[1].trim();
            if !available.iter().any(|v| v == name) {
                return Err(TemplateError::invalid_variable(name, &available));
            }
        }

        Ok(())
    }
}

fn replace_tokens<F>(template: &str, lookup: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    token_regex()
        .replace_all(template, |caps: &Captures| {
            lookup(caps[1].trim()).unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}
