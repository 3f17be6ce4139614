//! Audit trail for generation runs.
//!
//! A [`HistoryContainer`] owns one history row and appends typed log
//! entries to it until the run completes. [`SessionToJson`] replays a
//! container as a self-contained JSON document for export.

pub mod ai_call_groups;
pub mod error;
pub mod generation_session;
pub mod history_container;
pub mod in_memory_store;
pub mod log_details;
pub mod session_document;
pub mod session_to_json;

#[cfg(test)]
mod tests;

pub use ai_call_groups::{AiCallGroup, AiCallGroups, FlatLog};
pub use error::{ExportError, ExportResult, HistoryError, HistoryResult};
pub use generation_session::{GenerationSession, SessionOutcome, TemplateSnapshot};
pub use history_container::{Actor, CompletionResult, ExternalError, HistoryContainer};
pub use in_memory_store::InMemoryHistoryStore;
pub use log_details::{OUTPUT_ENCODE_THRESHOLD, decode_details};
pub use session_document::{
    ContainerDocument, ContainerMetadata, ContainerStatistics, ExportMetadata, HistorySummary,
    LogDocument, SessionDocument,
};
pub use session_to_json::{
    CleanupReport, EXPORT_FILE_PREFIX, ExportFile, ExportSettings, SessionToJson,
    cleanup_old_exports,
};

/// History kind for a post generation run.
pub const POST_GENERATION: &str = "post_generation";
