pub mod error;
pub mod models;
pub mod stores;

#[cfg(test)]
mod tests;

pub use error::{AiError, AiResult, CoreError, Result};
pub use models::article_structure::{ArticleStructure, StructureData};
pub use models::generated_post::{GeneratedPost, NewPost};
pub use models::generation_options::GenerationOptions;
pub use models::history_log::HistoryLog;
pub use models::history_metadata::HistoryMetadata;
pub use models::history_record::{HistoryRecord, NewHistory};
pub use models::history_status::HistoryStatus;
pub use models::history_type::HistoryType;
pub use models::history_update::HistoryUpdate;
pub use models::log_type::LogType;
pub use models::prompt_section::PromptSection;
pub use models::template::Template;
pub use models::voice::Voice;
pub use stores::ai_backend::AiBackend;
pub use stores::history_store::HistoryStore;
pub use stores::post_store::PostStore;

/// Timestamp format used inside log details and export metadata.
pub const DETAIL_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
