use crate::text::{fallback_title, smart_truncate, strip_wrapping_quotes, truncate_chars};
use crate::{EXCERPT_MAX_CHARS, EngineError, EngineResult};

use ps_config::Config;
use ps_core::{
    AiBackend, AiResult, GenerationOptions, HistoryMetadata, HistoryStore, LogType, NewPost,
    PostStore, Voice,
};
use ps_history::{
    CompletionResult, ExternalError, GenerationSession, HistoryContainer, HistoryError,
    HistoryResult, POST_GENERATION, TemplateSnapshot,
};
use ps_prompt::{AiValues, GenerationRequest, PromptBuilder, TemplateResult};

use std::sync::Arc;

use chrono::Local;
use log::{debug, info, warn};
use serde::Serialize;
use serde_json::{Map, json};

pub const AI_VARIABLES_MAX_TOKENS: u32 = 200;
pub const TITLE_MAX_TOKENS: u32 = 100;
pub const EXCERPT_MAX_TOKENS: u32 = 150;

const AI_VARIABLES_CONTENT_CHARS: usize = 2000;
const EXCERPT_SOURCE_CHARS: usize = 6000;
const DEFAULT_CREATION_METHOD: &str = "scheduled";

const COMPONENT_CONTENT: &str = "content";
const COMPONENT_AI_VARIABLES: &str = "ai_variables";
const COMPONENT_TITLE: &str = "title";
const COMPONENT_EXCERPT: &str = "excerpt";
const COMPONENT_FEATURED_IMAGE: &str = "featured_image";
const COMPONENT_TEMPLATE: &str = "template";

/// Which backend endpoint an audited call goes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AiCall {
    Text,
    Image,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GeneratorSettings {
    /// Base options for every AI call; per-component calls override `max_tokens`
    pub options: GenerationOptions,
    /// Used when the request leaves post_status empty
    pub default_post_status: String,
    pub default_post_author: Option<i64>,
    pub creation_method: String,
    /// Append a `session_metadata` entry once the run completes
    pub record_session_metadata: bool,
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        Self::from(&Config::default())
    }
}

impl From<&Config> for GeneratorSettings {
    fn from(config: &Config) -> Self {
        Self {
            options: GenerationOptions {
                model: config.ai.model().map(str::to_string),
                max_tokens: Some(config.ai.max_tokens),
                temperature: Some(config.ai.temperature),
                context: None,
            },
            default_post_status: config.generation.default_post_status.clone(),
            default_post_author: config.generation.default_post_author,
            creation_method: String::from(DEFAULT_CREATION_METHOD),
            record_session_metadata: true,
        }
    }
}

/// What a successful run produced.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerationOutcome {
    pub post_id: i64,
    pub title: String,
    pub excerpt: String,
    pub content: String,
    pub featured_image: Option<String>,
    /// None when the history container could not be persisted
    pub history_id: Option<i64>,
}

/// Runs one post generation end to end.
///
/// A malformed template, a content failure or a post store failure aborts
/// the run; title, excerpt, AI variable and featured image failures degrade
/// to fallbacks.
pub struct Generator {
    ai: Arc<dyn AiBackend>,
    posts: Arc<dyn PostStore>,
    history: Arc<dyn HistoryStore>,
    builder: PromptBuilder,
    settings: GeneratorSettings,
}

impl Generator {
    pub fn new(
        ai: Arc<dyn AiBackend>,
        posts: Arc<dyn PostStore>,
        history: Arc<dyn HistoryStore>,
        builder: PromptBuilder,
    ) -> Self {
        Self {
            ai,
            posts,
            history,
            builder,
            settings: GeneratorSettings::default(),
        }
    }

    pub fn with_settings(mut self, settings: GeneratorSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn settings(&self) -> &GeneratorSettings {
        &self.settings
    }

    pub async fn generate(&self, request: &GenerationRequest) -> EngineResult<GenerationOutcome> {
        let mut container = HistoryContainer::open(
            Arc::clone(&self.history),
            POST_GENERATION,
            self.history_metadata(request),
        )
        .await
        .with_session(template_snapshot(request), request.voice().cloned());

        info!(
            "Starting post generation (history {:?}, template {:?}, topic {:?})",
            container.id(),
            request.template_id(),
            request.topic()
        );

        if let Err(e) = self.validate_request(request) {
            warn!("Rejecting generation request: {}", e);
            let mut data = Map::new();
            data.insert("component".to_string(), json!(COMPONENT_TEMPLATE));
            data.insert("error_code".to_string(), json!(e.kind()));
            note(
                container
                    .complete_failure(&format!("Template validation failed: {}", e), data)
                    .await,
                "complete history",
            );
            return Err(EngineError::from(e));
        }

        let content = self.generate_content(&mut container, request).await?;
        let ai_values = self
            .resolve_ai_variables(&mut container, request, &content)
            .await;
        let title = self
            .generate_title(&mut container, request, &content, &ai_values)
            .await;
        let excerpt = self
            .generate_excerpt(&mut container, request, &title, &content)
            .await;

        let featured_image = self.generate_featured_image(&mut container, request).await;

        let mut post = self.new_post(request, &title, &content, &excerpt);
        post.featured_image = featured_image.clone();
        let post_id = match self.posts.create_post(&post).await {
            Ok(id) => id,
            Err(e) => {
                let message = format!("Failed to store generated post: {}", e);
                let mut data = Map::new();
                data.insert("generated_title".to_string(), json!(title));
                data.insert("generated_content".to_string(), json!(content));
                note(
                    container.complete_failure(&message, data).await,
                    "complete history",
                );
                return Err(EngineError::from(e));
            }
        };

        let completion = CompletionResult {
            post_id: Some(post_id),
            generated_title: Some(title.clone()),
            generated_content: Some(content.clone()),
            featured_image: featured_image.clone(),
        };
        note(
            container.complete_success(completion).await,
            "complete history",
        );

        if self.settings.record_session_metadata {
            record_session_metadata(&mut container).await;
        }

        info!(
            "Generated post {} \"{}\" (history {:?})",
            post_id,
            title,
            container.id()
        );

        Ok(GenerationOutcome {
            post_id,
            title,
            excerpt,
            content,
            featured_image,
            history_id: container.id(),
        })
    }

    /// Every prompt text sent for this request must have balanced variable
    /// braces. AI variables are allowed anywhere.
    fn validate_request(&self, request: &GenerationRequest) -> TemplateResult<()> {
        let resolver = self.builder.resolver();
        let voice = request.voice();
        let image_prompt = request
            .image_prompt()
            .filter(|_| request.generate_featured_image());

        [
            Some(request.base_prompt()),
            request.title_prompt(),
            voice.and_then(Voice::title_prompt),
            voice.and_then(Voice::content_instructions),
            voice.and_then(Voice::excerpt_instructions),
            image_prompt,
        ]
        .into_iter()
        .flatten()
        .try_for_each(|text| resolver.validate_template(text, true))
    }

    async fn generate_content(
        &self,
        container: &mut HistoryContainer,
        request: &GenerationRequest,
    ) -> EngineResult<String> {
        let prompt = self.builder.build_content_prompt(request);
        let context = self.builder.build_content_context(request);

        let mut options = self.settings.options.clone();
        if !context.is_empty() {
            options = options.with_context(context);
        }

        match self
            .call_ai(container, COMPONENT_CONTENT, &prompt, &options)
            .await
        {
            Ok(content) => Ok(content),
            Err(e) => {
                let message = format!("Content generation failed: {}", e.message());
                let mut data = Map::new();
                data.insert("component".to_string(), json!(COMPONENT_CONTENT));
                data.insert("error_code".to_string(), json!(e.code()));
                note(
                    container.complete_failure(&message, data).await,
                    "complete history",
                );
                Err(EngineError::ai(COMPONENT_CONTENT, e))
            }
        }
    }

    /// Values for the AI variables named in the title instructions.
    async fn resolve_ai_variables(
        &self,
        container: &mut HistoryContainer,
        request: &GenerationRequest,
        content: &str,
    ) -> AiValues {
        let resolver = self.builder.resolver();
        let names = match self.builder.title_instructions(request) {
            Some(raw) => resolver.extract_ai_variables(raw),
            None => Vec::new(),
        };
        if names.is_empty() {
            return AiValues::new();
        }

        let context = format!(
            "Content Prompt: {}\n\nGenerated Article Content:\n{}",
            request.base_prompt(),
            smart_truncate(content, AI_VARIABLES_CONTENT_CHARS)
        );
        let prompt = resolver.build_ai_variables_prompt(&names, &context);
        let options = self
            .settings
            .options
            .clone()
            .with_max_tokens(AI_VARIABLES_MAX_TOKENS);

        let values = match self
            .call_ai(container, COMPONENT_AI_VARIABLES, &prompt, &options)
            .await
        {
            Ok(response) => resolver.parse_ai_variables_response(&response, &names),
            Err(_) => AiValues::new(),
        };

        if values.is_empty() {
            warn!("AI variables {:?} could not be resolved", names);
            let mut context = Map::new();
            context.insert("component".to_string(), json!(COMPONENT_AI_VARIABLES));
            context.insert("variables".to_string(), json!(names));
            note(
                container
                    .record(
                        LogType::Warning,
                        "AI variables could not be resolved",
                        None,
                        None,
                        context,
                    )
                    .await,
                "record warning",
            );
        }

        values
    }

    async fn generate_title(
        &self,
        container: &mut HistoryContainer,
        request: &GenerationRequest,
        content: &str,
        ai_values: &AiValues,
    ) -> String {
        let prompt = self
            .builder
            .build_title_prompt_with_ai_values(request, content, ai_values);
        let options = self
            .settings
            .options
            .clone()
            .with_max_tokens(TITLE_MAX_TOKENS);

        let title = match self
            .call_ai(container, COMPONENT_TITLE, &prompt, &options)
            .await
        {
            Ok(raw) => strip_wrapping_quotes(&raw),
            Err(_) => String::new(),
        };

        let unresolved = title.contains("{{") && title.contains("}}");
        if !title.is_empty() && !unresolved {
            return title;
        }

        let fallback = fallback_title(request.topic(), Local::now());
        warn!("Using fallback title \"{}\"", fallback);

        if unresolved {
            let mut context = Map::new();
            context.insert("component".to_string(), json!(COMPONENT_TITLE));
            context.insert("generated_title".to_string(), json!(title));
            note(
                container
                    .record(
                        LogType::Warning,
                        "Generated title contains unresolved variables",
                        None,
                        None,
                        context,
                    )
                    .await,
                "record warning",
            );
        }

        fallback
    }

    async fn generate_excerpt(
        &self,
        container: &mut HistoryContainer,
        request: &GenerationRequest,
        title: &str,
        content: &str,
    ) -> String {
        let source = truncate_chars(content, EXCERPT_SOURCE_CHARS);
        let prompt =
            self.builder
                .build_excerpt_prompt(title, &source, request.voice(), request.topic());
        let options = self
            .settings
            .options
            .clone()
            .with_max_tokens(EXCERPT_MAX_TOKENS);

        match self
            .call_ai(container, COMPONENT_EXCERPT, &prompt, &options)
            .await
        {
            Ok(raw) => truncate_chars(&strip_wrapping_quotes(&raw), EXCERPT_MAX_CHARS),
            Err(_) => String::new(),
        }
    }

    /// Featured image reference, when the request asks for one. Failures
    /// are recorded as errors and the post is stored without an image.
    async fn generate_featured_image(
        &self,
        container: &mut HistoryContainer,
        request: &GenerationRequest,
    ) -> Option<String> {
        if !request.generate_featured_image() {
            return None;
        }

        let prompt = self.builder.build_image_prompt(request);
        if prompt.is_empty() {
            let message = "Image prompt is required to generate a featured image";
            warn!("{}", message);
            let mut details = Map::new();
            details.insert("component".to_string(), json!(COMPONENT_FEATURED_IMAGE));
            note(
                container.record_error(message, details, None).await,
                "record featured image error",
            );
            return None;
        }

        let options = GenerationOptions {
            model: self.settings.options.model.clone(),
            ..Default::default()
        };
        self.audited_call(
            container,
            COMPONENT_FEATURED_IMAGE,
            &prompt,
            &options,
            AiCall::Image,
        )
        .await
        .ok()
    }

    async fn call_ai(
        &self,
        container: &mut HistoryContainer,
        component: &str,
        prompt: &str,
        options: &GenerationOptions,
    ) -> AiResult<String> {
        self.audited_call(container, component, prompt, options, AiCall::Text)
            .await
    }

    /// One audited backend call: an `ai_request` entry, then either an
    /// `ai_response` or an `error` entry.
    async fn audited_call(
        &self,
        container: &mut HistoryContainer,
        component: &str,
        prompt: &str,
        options: &GenerationOptions,
        call: AiCall,
    ) -> AiResult<String> {
        let mut context = Map::new();
        context.insert("component".to_string(), json!(component));
        let input = json!({ "prompt": prompt, "options": options });

        note(
            container
                .record(
                    LogType::AiRequest,
                    &format!("Requesting AI generation for {}", component),
                    Some(input.clone()),
                    None,
                    context.clone(),
                )
                .await,
            "record AI request",
        );

        let response = match call {
            AiCall::Text => self.ai.generate_text(prompt, options).await,
            AiCall::Image => self.ai.generate_image(prompt, options).await,
        };

        match response {
            Ok(text) => {
                note(
                    container
                        .record(
                            LogType::AiResponse,
                            &format!("AI response received for {}", component),
                            None,
                            Some(json!(text)),
                            context,
                        )
                        .await,
                    "record AI response",
                );
                Ok(text)
            }
            Err(e) => {
                warn!("AI generation failed for {}: {}", component, e);
                let mut details = context;
                details.insert("input".to_string(), input);
                details.insert("error".to_string(), json!(e.message()));
                note(
                    container
                        .record_error(
                            &format!("AI generation failed for {}: {}", component, e.message()),
                            details,
                            Some(&ExternalError::from(&e)),
                        )
                        .await,
                    "record AI error",
                );
                Err(e)
            }
        }
    }

    fn history_metadata(&self, request: &GenerationRequest) -> HistoryMetadata {
        let mut metadata = HistoryMetadata::default()
            .with_creation_method(self.settings.creation_method.clone())
            .with_prompt(request.base_prompt());

        if let Some(template_id) = request.template_id() {
            metadata = metadata.with_template(template_id);
        }
        if let Some(topic_id) = request.topic_id() {
            metadata = metadata.with_topic(topic_id);
        }
        if let Some(author_id) = self.author_id(request) {
            metadata = metadata.with_author(author_id);
        }

        metadata
    }

    fn author_id(&self, request: &GenerationRequest) -> Option<i64> {
        request.post_author().or(self.settings.default_post_author)
    }

    fn new_post(
        &self,
        request: &GenerationRequest,
        title: &str,
        content: &str,
        excerpt: &str,
    ) -> NewPost {
        let status = match request.post_status() {
            "" => self.settings.default_post_status.clone(),
            status => status.to_string(),
        };

        NewPost {
            title: title.to_string(),
            content: content.to_string(),
            excerpt: excerpt.to_string(),
            status,
            author_id: self.author_id(request),
            category: request.post_category().map(str::to_string),
            tags: request.post_tags().map(str::to_string),
            template_id: request.template_id(),
            featured_image: None,
        }
    }
}

fn template_snapshot(request: &GenerationRequest) -> TemplateSnapshot {
    match request {
        GenerationRequest::Template { template, .. } => TemplateSnapshot::from(template),
        GenerationRequest::Context(context) => TemplateSnapshot {
            id: context.template_id(),
            name: context.topic().unwrap_or_default().to_string(),
            prompt_template: context.content_prompt().to_string(),
            title_prompt: context.title_prompt().map(str::to_string),
            image_prompt: context.image_prompt().map(str::to_string),
            post_status: context.post_status().to_string(),
            post_category: context.post_category().map(str::to_string),
            post_tags: context.post_tags().map(str::to_string),
            post_author: context.post_author(),
            post_quantity: 1,
            generate_featured_image: false,
        },
    }
}

async fn record_session_metadata(container: &mut HistoryContainer) {
    let Some(summary) = container.session().map(GenerationSession::to_json) else {
        return;
    };

    note(
        container
            .record(
                LogType::SessionMetadata,
                "Generation session summary",
                None,
                Some(summary),
                Map::new(),
            )
            .await,
        "record session metadata",
    );
}

/// Audit writes never abort a run.
fn note<T>(result: HistoryResult<T>, action: &str) {
    match result {
        Ok(_) => {}
        Err(HistoryError::NotPersisted { .. }) => {
            debug!("Skipped {}: history container not persisted", action)
        }
        Err(e) => warn!("Failed to {}: {}", action, e),
    }
}

