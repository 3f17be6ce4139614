mod article_structure;
mod history_status;
mod history_type;
mod log_type;
mod voice;
