pub mod api_error;
pub mod config;
pub mod data;
pub mod format;
pub mod uploads;
