pub mod aggregate;
pub mod editor;
pub mod error;
pub mod reorder;
pub mod save;
