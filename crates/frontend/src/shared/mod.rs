pub mod api_client;
pub mod api_utils;
pub mod components;
pub mod debounce;
pub mod icons;
pub mod modal_frame;
pub mod modal_stack;
pub mod toast;
pub mod unsaved_guard;
