//! Mediadrop processing
//!
//! Content sniffing from magic bytes and the accepted-type gate.

pub mod sniff;
pub mod validator;

pub use sniff::{sniff_bytes, sniff_file, SniffError, HEAD_LEN};
pub use validator::{sanitize_filename, ContentTypeGate, ValidationError};
