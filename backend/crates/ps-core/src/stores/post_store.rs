use crate::{GeneratedPost, NewPost, Result};

use async_trait::async_trait;

#[async_trait]
pub trait PostStore: Send + Sync {
    async fn create_post(&self, post: &NewPost) -> Result<i64>;

    async fn get_post(&self, id: i64) -> Result<Option<GeneratedPost>>;
}
