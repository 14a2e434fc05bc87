//! Shared types, errors and formatting

pub mod errors;
pub mod format;
pub mod i18n;
pub mod traits;
pub mod types;
