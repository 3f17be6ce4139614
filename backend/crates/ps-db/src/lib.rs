pub mod connection;
pub mod error;
pub mod repositories;

pub use connection::database::{open_pool, run_migrations};
pub use error::{DbError, Result};
pub use repositories::article_structure_repository::ArticleStructureRepository;
pub use repositories::history_repository::{HistoryPage, HistoryQuery, HistoryRepository};
pub use repositories::post_repository::PostRepository;
pub use repositories::prompt_section_repository::PromptSectionRepository;
pub use repositories::template_repository::TemplateRepository;
pub use repositories::voice_repository::VoiceRepository;
