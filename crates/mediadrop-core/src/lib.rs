//! Mediadrop Core Library
//!
//! This crate provides the configuration, error taxonomy, shared models and public URL
//! composition used by every Mediadrop component.

pub mod config;
pub mod error;
pub mod models;
pub mod public_url;

// Re-export commonly used types
pub use config::{BaseConfig, Config, LogOutput, LogRotation, LoggingConfig, UploadServerConfig};
pub use error::{AppError, ErrorMetadata, LogLevel, UNKNOWN_CONTENT_TYPE};
pub use models::{SlotStrategy, UploadMode};
pub use public_url::{PublicUrlBuilder, PublicUrlError};
