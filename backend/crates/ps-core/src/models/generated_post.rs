use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GeneratedPost {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub excerpt: String,
    pub status: String,
    pub author_id: Option<i64>,
    pub category: Option<String>,
    pub tags: Option<String>,
    pub template_id: Option<i64>,
    /// Reference returned by the image backend
    pub featured_image: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct NewPost {
    pub title: String,
    pub content: String,
    pub excerpt: String,
    pub status: String,
    pub author_id: Option<i64>,
    pub category: Option<String>,
    pub tags: Option<String>,
    pub template_id: Option<i64>,
    pub featured_image: Option<String>,
}
