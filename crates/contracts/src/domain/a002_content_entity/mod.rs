pub mod aggregate;
pub mod selector;
