//! Navigator Core Library
//!
//! This crate provides the foundational utilities shared by every Navigator crate:
//! - Error handling (`AppError`, `AppResult`)
//! - Logging infrastructure
//! - Layered configuration
//! - Text helpers

pub mod config;
pub mod error;
pub mod logging;
pub mod text;

// Re-export commonly used types
pub use config::AppConfig;
pub use error::{AppError, AppResult};
