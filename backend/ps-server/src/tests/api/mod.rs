mod error;
mod exports;
mod history_list_query;
