pub mod export_query;
pub mod session_response;
pub mod sessions;
