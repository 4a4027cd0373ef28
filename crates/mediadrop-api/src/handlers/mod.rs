pub mod ping;
pub mod upload;
