pub mod history;
pub mod history_dto;
pub mod history_list_query;
pub mod history_list_response;
