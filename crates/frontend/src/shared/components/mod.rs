pub mod confirm_dialog;
pub mod image_input;
pub mod pagination_controls;
