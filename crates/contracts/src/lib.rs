//! Общие типы и бизнес-логика, разделяемые backend и frontend

pub mod domain;
pub mod enums;
pub mod shared;
pub mod system;
