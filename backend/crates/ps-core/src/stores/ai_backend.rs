use crate::{AiResult, GenerationOptions};

use async_trait::async_trait;

/// External text, image and embedding generator.
#[async_trait]
pub trait AiBackend: Send + Sync {
    async fn generate_text(&self, prompt: &str, options: &GenerationOptions) -> AiResult<String>;

    /// Returns a reference (URL or provider id) to the generated image.
    async fn generate_image(&self, prompt: &str, options: &GenerationOptions) -> AiResult<String>;

    async fn generate_embedding(&self, text: &str) -> AiResult<Vec<f32>>;

    fn is_available(&self) -> bool;
}
