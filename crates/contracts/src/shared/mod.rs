pub mod api_response;
pub mod upload;
