pub mod template_dto;
pub mod template_list_response;
pub mod templates;
