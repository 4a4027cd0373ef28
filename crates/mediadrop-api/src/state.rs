//! Application state shared by all handlers.

use mediadrop_core::{Config, PublicUrlBuilder};
use mediadrop_processing::ContentTypeGate;
use mediadrop_storage::Storage;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub storage: Arc<dyn Storage>,
    pub gate: ContentTypeGate,
    pub urls: PublicUrlBuilder,
}

impl AppState {
    pub fn new(config: Config, storage: Arc<dyn Storage>) -> Result<Self, anyhow::Error> {
        let urls = PublicUrlBuilder::new(config.base_url(), config.virtual_directory())?;
        let gate = ContentTypeGate::new(config.accepted_file_types().iter().cloned());

        Ok(Self {
            config,
            storage,
            gate,
            urls,
        })
    }
}
