//! Mediadrop storage
//!
//! Slot allocation and file persistence on the local filesystem.

pub mod local;
pub mod names;
pub mod traits;

pub use local::LocalStorage;
pub use names::{random_name, DEFAULT_NAME_LENGTH};
pub use traits::{Slot, Storage, StorageError, StorageResult};
