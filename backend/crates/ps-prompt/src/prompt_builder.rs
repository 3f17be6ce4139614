use crate::generation_request::{ContextKind, GenerationContext, GenerationRequest};
use crate::structure_composer::StructureComposer;
use crate::variable_resolver::{AiValues, VariableResolver};

use ps_core::{Template, Voice};

use std::sync::Arc;

use log::warn;

const OUTPUT_INSTRUCTIONS: &str = "Output the response for use as a WordPress post with HTML tags, \
     using <h2> for section titles, <pre> tags for code samples. \
     Be sure to end the post with a concise summary.";

const TITLE_PREAMBLE: &str = "Generate a title for a blog post, based on the content below. \
     Respond with ONLY the most relevant title, nothing else. Here are your instructions:\n\n";

const EXCERPT_PREAMBLE: &str = "Write an excerpt for an article. Must be between 40 and 60 words. \
     Write naturally as a human would. Output only the excerpt, no formatting.\n\n";

const EXCERPT_CLOSING: &str = "Create a compelling excerpt that captures the essence of the article \
     while considering the context.";

/// Post-processing step applied to a finished prompt.
pub type PromptFilter = Box<dyn Fn(String) -> String + Send + Sync>;

/// Ordered filters per prompt kind, applied after the prompt is built.
#[derive(Default)]
pub struct PromptFilters {
    pub content: Vec<PromptFilter>,
    pub context: Vec<PromptFilter>,
    pub title: Vec<PromptFilter>,
    pub excerpt: Vec<PromptFilter>,
    pub image: Vec<PromptFilter>,
}

fn apply_filters(filters: &[PromptFilter], prompt: String) -> String {
    filters.iter().fold(prompt, |acc, filter| filter(acc))
}

pub struct PromptBuilder {
    resolver: Arc<VariableResolver>,
    composer: Arc<dyn StructureComposer>,
    filters: PromptFilters,
}

impl PromptBuilder {
    pub fn new(resolver: Arc<VariableResolver>, composer: Arc<dyn StructureComposer>) -> Self {
        Self {
            resolver,
            composer,
            filters: PromptFilters::default(),
        }
    }

    pub fn with_filters(mut self, filters: PromptFilters) -> Self {
        self.filters = filters;
        self
    }

    pub fn resolver(&self) -> &VariableResolver {
        &self.resolver
    }

    pub fn build_content_prompt(&self, request: &GenerationRequest) -> String {
        let prompt = match request {
            GenerationRequest::Template {
                template,
                topic,
                voice,
            } => self.template_content_prompt(template, topic.as_deref(), voice.as_ref()),
            GenerationRequest::Context(context) => self.context_content_prompt(context),
        };

        apply_filters(&self.filters.content, prompt)
    }

    fn template_content_prompt(
        &self,
        template: &Template,
        topic: Option<&str>,
        voice: Option<&Voice>,
    ) -> String {
        let prompt = match template.article_structure_id {
            Some(structure_id) => self.compose_or_fallback(
                structure_id,
                topic,
                &template.prompt_template,
            ),
            None => self.resolver.process(&template.prompt_template, topic),
        };

        self.prepend_voice(prompt, voice, topic)
    }

    fn context_content_prompt(&self, context: &GenerationContext) -> String {
        let topic = context.topic();

        let prompt = match (context.article_structure_id(), topic) {
            (Some(structure_id), Some(_)) => {
                self.compose_or_fallback(structure_id, topic, context.content_prompt())
            }
            (None, Some(_)) => self.resolver.process(context.content_prompt(), topic),
            (_, None) => context.content_prompt().to_string(),
        };

        match context.kind() {
            ContextKind::Template => self.prepend_voice(prompt, context.voice(), topic),
            ContextKind::Topic => prompt,
        }
    }

    fn compose_or_fallback(&self, structure_id: i64, topic: Option<&str>, base: &str) -> String {
        self.composer
            .build_prompt(structure_id, topic)
            .unwrap_or_else(|e| {
                warn!(
                    "Article structure {} unavailable, using base prompt: {}",
                    structure_id, e
                );
                self.resolver.process(base, topic)
            })
    }

    fn prepend_voice(&self, prompt: String, voice: Option<&Voice>, topic: Option<&str>) -> String {
        match voice.and_then(Voice::content_instructions) {
            Some(instructions) => format!(
                "{}\n\n{}",
                self.resolver.process(instructions, topic),
                prompt
            ),
            None => prompt,
        }
    }

    /// Auxiliary instructions sent alongside the content prompt.
    pub fn build_content_context(&self, request: &GenerationRequest) -> String {
        let topic = request.topic();
        let mut parts = Vec::with_capacity(2);

        if let Some(instructions) = request.voice().and_then(Voice::content_instructions) {
            parts.push(self.resolver.process(instructions, topic));
        }
        parts.push(OUTPUT_INSTRUCTIONS.to_string());

        let context = parts
            .iter()
            .map(|p| p.trim())
            .filter(|p| !p.is_empty())
            .collect::<Vec<_>>()
            .join("\n\n");

        apply_filters(&self.filters.context, context)
    }

    /// Title prompt grounded on the generated content.
    pub fn build_title_prompt(&self, request: &GenerationRequest, content: &str) -> String {
        self.build_title_prompt_with_ai_values(request, content, &AiValues::new())
    }

    /// Raw title instructions: the voice's title prompt, else the request's.
    pub fn title_instructions<'a>(&self, request: &'a GenerationRequest) -> Option<&'a str> {
        request
            .voice()
            .and_then(Voice::title_prompt)
            .or_else(|| request.title_prompt().filter(|p| !p.is_empty()))
    }

    /// Same as [`Self::build_title_prompt`], with resolved AI variables
    /// substituted into the instructions.
    pub fn build_title_prompt_with_ai_values(
        &self,
        request: &GenerationRequest,
        content: &str,
        ai_values: &AiValues,
    ) -> String {
        let topic = request.topic();

        let instructions = self
            .title_instructions(request)
            .map(|raw| self.resolver.process_with_ai_variables(raw, topic, ai_values))
            .filter(|processed| !processed.is_empty());

        let mut prompt = String::from(TITLE_PREAMBLE);
        if let Some(instructions) = instructions {
            prompt.push_str(&instructions);
            prompt.push_str("\n\n");
        }
        prompt.push_str("Here is the content:\n\n");
        prompt.push_str(content);

        apply_filters(&self.filters.title, prompt)
    }

    pub fn build_excerpt_prompt(
        &self,
        title: &str,
        content: &str,
        voice: Option<&Voice>,
        topic: Option<&str>,
    ) -> String {
        let mut prompt = String::from(EXCERPT_PREAMBLE);

        if let Some(instructions) = voice.and_then(Voice::excerpt_instructions) {
            prompt.push_str(&self.resolver.process(instructions, topic));
            prompt.push_str("\n\n");
        }

        prompt.push_str(&format!("ARTICLE TITLE:\n{title}\n\n"));
        prompt.push_str(&format!("ARTICLE BODY:\n{content}\n\n"));
        prompt.push_str(EXCERPT_CLOSING);

        apply_filters(&self.filters.excerpt, prompt)
    }

    /// Featured image prompt with variables resolved; empty when the
    /// request carries no image prompt.
    pub fn build_image_prompt(&self, request: &GenerationRequest) -> String {
        match request.image_prompt().map(str::trim).filter(|p| !p.is_empty()) {
            Some(raw) => apply_filters(
                &self.filters.image,
                self.resolver.process(raw, request.topic()),
            ),
            None => String::new(),
        }
    }
}
