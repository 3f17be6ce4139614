use crate::error::{CompositionError, CompositionResult};
use crate::variable_resolver::VariableResolver;

use ps_core::{ArticleStructure, PromptSection};

use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

use regex::{Captures, Regex};

static SECTION_TOKEN_RE: OnceLock<Regex> = OnceLock::new();

fn section_token_regex() -> &'static Regex {
    SECTION_TOKEN_RE.get_or_init(|| Regex::new(r"\{\{section:([^{}]+)\}\}").expect("valid regex"))
}

/// Builds a prompt from an article structure.
pub trait StructureComposer: Send + Sync {
    fn build_prompt(&self, structure_id: i64, topic: Option<&str>) -> CompositionResult<String>;
}

/// Composer over a preloaded catalog of structures and sections.
pub struct CatalogStructureComposer {
    structures: Vec<ArticleStructure>,
    sections: HashMap<String, PromptSection>,
    resolver: Arc<VariableResolver>,
}

impl CatalogStructureComposer {
    pub fn new(
        structures: Vec<ArticleStructure>,
        sections: Vec<PromptSection>,
        resolver: Arc<VariableResolver>,
    ) -> Self {
        let sections = sections
            .into_iter()
            .map(|s| (s.section_key.clone(), s))
            .collect();

        Self {
            structures,
            sections,
            resolver,
        }
    }

    pub fn empty(resolver: Arc<VariableResolver>) -> Self {
        Self::new(Vec::new(), Vec::new(), resolver)
    }

    /// The structure flagged as default, else the first active one.
    pub fn default_structure(&self) -> CompositionResult<&ArticleStructure> {
        self.structures
            .iter()
            .find(|s| s.is_default)
            .or_else(|| self.structures.iter().find(|s| s.is_active))
            .ok_or_else(|| CompositionError::no_structures())
    }

    fn section_content(&self, key: &str) -> CompositionResult<&str> {
        self.sections
            .get(key)
            .filter(|s| s.is_active)
            .map(|s| s.content.as_str())
            .ok_or_else(|| CompositionError::section_missing(key))
    }
}

impl StructureComposer for CatalogStructureComposer {
    fn build_prompt(&self, structure_id: i64, topic: Option<&str>) -> CompositionResult<String> {
        let structure = self
            .structures
            .iter()
            .find(|s| s.id == structure_id)
            .ok_or_else(|| CompositionError::not_found(structure_id))?;

        if !structure.is_active {
            return Err(CompositionError::inactive(structure_id));
        }

        let data = structure
            .parse_data()
            .map_err(|e| CompositionError::invalid_data(structure_id, e.to_string()))?;

        let variables = self.resolver.get_variables(topic);

        let mut contents = HashMap::with_capacity(data.sections.len());
        for key in &data.sections {
            let content = self.section_content(key)?;
            contents.insert(key.as_str(), variables.apply(content));
        }

        // Section tokens survive the variable pass untouched, so expanding
        // them afterwards keeps section text out of the rescan.
        let skeleton = variables.apply(&data.prompt_template);
        let prompt = section_token_regex().replace_all(&skeleton, |caps: &Captures| {
            contents
                .get(caps[1].trim())
                .cloned()
                .unwrap_or_else(|| caps[0].to_string())
        });

        Ok(prompt.into_owned())
    }
}
