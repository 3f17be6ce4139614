pub mod ai_backend;
pub mod history_store;
pub mod post_store;
