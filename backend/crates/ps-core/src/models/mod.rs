pub mod article_structure;
pub mod generated_post;
pub mod generation_options;
pub mod history_log;
pub mod history_metadata;
pub mod history_record;
pub mod history_status;
pub mod history_type;
pub mod history_update;
pub mod log_type;
pub mod prompt_section;
pub mod template;
pub mod voice;
