//! Prompt construction for post generation.
//!
//! [`VariableResolver`] expands `{{name}}` placeholders, [`StructureComposer`]
//! stitches prompt sections into article structures, and [`PromptBuilder`]
//! turns a [`GenerationRequest`] into the content, context, title and
//! excerpt prompts sent to the AI backend.

pub mod error;
pub mod generation_request;
pub mod prompt_builder;
pub mod sanitize;
pub mod structure_composer;
pub mod variable_resolver;

#[cfg(test)]
mod tests;

pub use error::{CompositionError, CompositionResult, TemplateError, TemplateResult};
pub use generation_request::{ContextKind, GenerationContext, GenerationRequest, TopicSource};
pub use prompt_builder::{PromptBuilder, PromptFilter, PromptFilters};
pub use structure_composer::{CatalogStructureComposer, StructureComposer};
pub use variable_resolver::{AiValues, SYSTEM_VARIABLES, VariableHook, VariableResolver, VariableSet};
