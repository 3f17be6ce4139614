#![allow(dead_code)]

use ps_core::{
    AiBackend, AiError, AiResult, CoreError, GeneratedPost, GenerationOptions, NewPost, PostStore,
    Result as CoreErrorResult,
};

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;

/// Answers by prompt kind; `None` makes that kind fail.
pub struct ScriptedBackend {
    pub content: Option<String>,
    pub ai_variables: Option<String>,
    pub title: Option<String>,
    pub excerpt: Option<String>,
    pub image: Option<String>,
    image_prompts: Mutex<Vec<String>>,
    calls: Mutex<Vec<(String, GenerationOptions)>>,
}

impl ScriptedBackend {
    pub fn new() -> Self {
        Self {
            content: Some("<h2>Why solar</h2><p>Panels turn light into power.</p>".to_string()),
            ai_variables: Some("{\"Hook\": \"sunny savings\"}".to_string()),
            title: Some("\"Solar Made Simple\"".to_string()),
            excerpt: Some("  'A quick tour of home solar.' ".to_string()),
            image: Some("https://img.example/solar.png".to_string()),
            image_prompts: Mutex::new(Vec::new()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<(String, GenerationOptions)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn image_prompts(&self) -> Vec<String> {
        self.image_prompts.lock().unwrap().clone()
    }

    /// Prompt and options of the first call whose prompt starts with `prefix`.
    pub fn call_starting_with(&self, prefix: &str) -> Option<(String, GenerationOptions)> {
        self.calls().into_iter().find(|(p, _)| p.starts_with(prefix))
    }
}

pub const TITLE_PREFIX: &str = "Generate a title";
pub const EXCERPT_PREFIX: &str = "Write an excerpt";
pub const AI_VARIABLES_PREFIX: &str = "Based on the following content context";

#[async_trait]
impl AiBackend for ScriptedBackend {
    async fn generate_text(&self, prompt: &str, options: &GenerationOptions) -> AiResult<String> {
        self.calls
            .lock()
            .unwrap()
            .push((prompt.to_string(), options.clone()));

        let reply = if prompt.starts_with(TITLE_PREFIX) {
            &self.title
        } else if prompt.starts_with(EXCERPT_PREFIX) {
            &self.excerpt
        } else if prompt.starts_with(AI_VARIABLES_PREFIX) {
            &self.ai_variables
        } else {
            &self.content
        };

        reply
            .clone()
            .ok_or_else(|| AiError::request("api_error", "upstream exploded", false))
    }

    async fn generate_image(&self, prompt: &str, _options: &GenerationOptions) -> AiResult<String> {
        self.image_prompts.lock().unwrap().push(prompt.to_string());

        self.image
            .clone()
            .ok_or_else(|| AiError::request("image_error", "no pixels today", false))
    }

    async fn generate_embedding(&self, _text: &str) -> AiResult<Vec<f32>> {
        Ok(Vec::new())
    }

    fn is_available(&self) -> bool {
        true
    }
}

#[derive(Default)]
pub struct MemoryPosts {
    pub fail: bool,
    posts: Mutex<Vec<GeneratedPost>>,
}

impl MemoryPosts {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    pub fn posts(&self) -> Vec<GeneratedPost> {
        self.posts.lock().unwrap().clone()
    }
}

#[async_trait]
impl PostStore for MemoryPosts {
    async fn create_post(&self, post: &NewPost) -> CoreErrorResult<i64> {
        if self.fail {
            return Err(CoreError::store("posts table is locked"));
        }

        let mut posts = self.posts.lock().unwrap();
        let id = posts.len() as i64 + 100;
        posts.push(GeneratedPost {
            id,
            title: post.title.clone(),
            content: post.content.clone(),
            excerpt: post.excerpt.clone(),
            status: post.status.clone(),
            author_id: post.author_id,
            category: post.category.clone(),
            tags: post.tags.clone(),
            template_id: post.template_id,
            featured_image: post.featured_image.clone(),
            created_at: Utc::now(),
        });
        Ok(id)
    }

    async fn get_post(&self, id: i64) -> CoreErrorResult<Option<GeneratedPost>> {
        Ok(self.posts().into_iter().find(|p| p.id == id))
    }
}
