use ps_core::{Template, Voice};

use serde::{Deserialize, Serialize};

/// Where a normalized generation context came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContextKind {
    Template,
    Topic,
}

impl ContextKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Template => "template",
            Self::Topic => "topic",
        }
    }
}

/// An approved author topic plus the author settings that shape its post.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TopicSource {
    pub topic_id: i64,
    pub topic_title: String,
    pub field_niche: String,
    pub article_structure_id: Option<i64>,
    pub post_status: String,
    pub post_author: Option<i64>,
    pub post_category: Option<String>,
    pub post_tags: Option<String>,
    pub generate_featured_image: bool,
}

/// Normalized input for one generation run, independent of whether it was
/// started from a template or from a topic.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GenerationContext {
    kind: ContextKind,
    topic: Option<String>,
    content_prompt: String,
    title_prompt: Option<String>,
    image_prompt: Option<String>,
    article_structure_id: Option<i64>,
    voice: Option<Voice>,
    template_id: Option<i64>,
    topic_id: Option<i64>,
    post_status: String,
    post_author: Option<i64>,
    post_category: Option<String>,
    post_tags: Option<String>,
    generate_featured_image: bool,
}

impl GenerationContext {
    pub fn from_template(template: &Template, voice: Option<Voice>, topic: Option<String>) -> Self {
        Self {
            kind: ContextKind::Template,
            topic: topic.filter(|t| !t.is_empty()),
            content_prompt: template.prompt_template.clone(),
            title_prompt: template.title_prompt.clone(),
            image_prompt: template.image_prompt.clone(),
            article_structure_id: template.article_structure_id,
            voice,
            template_id: Some(template.id),
            topic_id: None,
            post_status: template.post_status.clone(),
            post_author: template.post_author,
            post_category: template.post_category.clone(),
            post_tags: template.post_tags.clone(),
            generate_featured_image: template.generate_featured_image,
        }
    }

    /// Topic contexts ask for a post about the topic title within the
    /// author's niche, optionally followed by researched context.
    pub fn from_topic(source: &TopicSource, expanded_context: Option<&str>) -> Self {
        let mut content_prompt = format!(
            "Write a comprehensive blog post about: {}\n\nField/Niche: {}",
            source.topic_title, source.field_niche
        );
        if let Some(extra) = expanded_context.filter(|c| !c.is_empty()) {
            content_prompt.push_str("\n\n");
            content_prompt.push_str(extra);
        }

        Self {
            kind: ContextKind::Topic,
            topic: Some(source.topic_title.clone()).filter(|t| !t.is_empty()),
            content_prompt,
            title_prompt: Some(source.topic_title.clone()),
            image_prompt: Some(source.topic_title.clone()),
            article_structure_id: source.article_structure_id,
            voice: None,
            template_id: None,
            topic_id: Some(source.topic_id),
            post_status: source.post_status.clone(),
            post_author: source.post_author,
            post_category: source.post_category.clone(),
            post_tags: source.post_tags.clone(),
            generate_featured_image: source.generate_featured_image,
        }
    }

    pub fn kind(&self) -> ContextKind {
        self.kind
    }

    pub fn topic(&self) -> Option<&str> {
        self.topic.as_deref()
    }

    pub fn content_prompt(&self) -> &str {
        &self.content_prompt
    }

    pub fn title_prompt(&self) -> Option<&str> {
        self.title_prompt.as_deref()
    }

    pub fn image_prompt(&self) -> Option<&str> {
        self.image_prompt.as_deref()
    }

    pub fn article_structure_id(&self) -> Option<i64> {
        self.article_structure_id
    }

    pub fn voice_id(&self) -> Option<i64> {
        self.voice.as_ref().map(|v| v.id)
    }

    pub fn voice(&self) -> Option<&Voice> {
        self.voice.as_ref()
    }

    pub fn template_id(&self) -> Option<i64> {
        self.template_id
    }

    pub fn topic_id(&self) -> Option<i64> {
        self.topic_id
    }

    pub fn post_status(&self) -> &str {
        &self.post_status
    }

    pub fn post_author(&self) -> Option<i64> {
        self.post_author
    }

    pub fn post_category(&self) -> Option<&str> {
        self.post_category.as_deref()
    }

    pub fn post_tags(&self) -> Option<&str> {
        self.post_tags.as_deref()
    }

    pub fn generate_featured_image(&self) -> bool {
        self.generate_featured_image
    }

    /// Voice instructions only apply to template-kind contexts.
    pub(crate) fn effective_voice(&self) -> Option<&Voice> {
        match self.kind {
            ContextKind::Template => self.voice.as_ref(),
            ContextKind::Topic => None,
        }
    }
}

/// Input to every [`crate::PromptBuilder`] entry point.
#[derive(Debug, Clone, PartialEq)]
pub enum GenerationRequest {
    Template {
        template: Template,
        topic: Option<String>,
        voice: Option<Voice>,
    },
    Context(GenerationContext),
}

impl GenerationRequest {
    pub fn topic(&self) -> Option<&str> {
        match self {
            Self::Template { topic, .. } => topic.as_deref().filter(|t| !t.is_empty()),
            Self::Context(context) => context.topic(),
        }
    }

    /// The voice whose instructions shape this request's prompts, if any.
    pub fn voice(&self) -> Option<&Voice> {
        match self {
            Self::Template { voice, .. } => voice.as_ref(),
            Self::Context(context) => context.effective_voice(),
        }
    }

    pub fn template_id(&self) -> Option<i64> {
        match self {
            Self::Template { template, .. } => Some(template.id),
            Self::Context(context) => context.template_id(),
        }
    }

    pub fn topic_id(&self) -> Option<i64> {
        match self {
            Self::Template { .. } => None,
            Self::Context(context) => context.topic_id(),
        }
    }

    pub fn title_prompt(&self) -> Option<&str> {
        match self {
            Self::Template { template, .. } => template.title_prompt.as_deref(),
            Self::Context(context) => context.title_prompt(),
        }
    }

    pub fn image_prompt(&self) -> Option<&str> {
        match self {
            Self::Template { template, .. } => template.image_prompt.as_deref(),
            Self::Context(context) => context.image_prompt(),
        }
    }

    pub fn generate_featured_image(&self) -> bool {
        match self {
            Self::Template { template, .. } => template.generate_featured_image,
            Self::Context(context) => context.generate_featured_image(),
        }
    }

    pub fn base_prompt(&self) -> &str {
        match self {
            Self::Template { template, .. } => &template.prompt_template,
            Self::Context(context) => context.content_prompt(),
        }
    }

    pub fn post_status(&self) -> &str {
        match self {
            Self::Template { template, .. } => &template.post_status,
            Self::Context(context) => context.post_status(),
        }
    }

    pub fn post_author(&self) -> Option<i64> {
        match self {
            Self::Template { template, .. } => template.post_author,
            Self::Context(context) => context.post_author(),
        }
    }

    pub fn post_category(&self) -> Option<&str> {
        match self {
            Self::Template { template, .. } => template.post_category.as_deref(),
            Self::Context(context) => context.post_category(),
        }
    }

    pub fn post_tags(&self) -> Option<&str> {
        match self {
            Self::Template { template, .. } => template.post_tags.as_deref(),
            Self::Context(context) => context.post_tags(),
        }
    }
}
