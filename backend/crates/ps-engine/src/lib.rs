//! End-to-end post generation.
//!
//! [`Generator`] drives one run: content, AI variables, title, excerpt and
//! the stored post, with every AI call audited through a
//! [`ps_history::HistoryContainer`]. AI calls go through
//! [`RetryingBackend`] when retries are enabled.

pub mod catalog;
pub mod error;
pub mod generator;
pub mod retry;
pub mod text;


pub use catalog::{Catalog, resolver_from_config};
pub use error::{EngineError, EngineResult};
pub use generator::{
    AI_VARIABLES_MAX_TOKENS, EXCERPT_MAX_TOKENS, GenerationOutcome, Generator, GeneratorSettings,
    TITLE_MAX_TOKENS,
};
pub use retry::{IsRetryable, RetryPolicy, RetryingBackend, with_retry};
pub use text::{
    EXCERPT_MAX_CHARS, TRUNCATE_SEPARATOR, fallback_title, smart_truncate, strip_wrapping_quotes,
    truncate_chars,
};
