//! Mediadrop API Library
//!
//! HTTP handlers, the upload pipeline and application setup.

mod api_doc;
mod handlers;
mod services;
mod telemetry;
mod utils;

pub mod error;
pub mod setup;
pub mod state;

pub use error::{ErrorResponse, HttpAppError};
