//! Public URL composition
//!
//! An accepted upload is published as
//! `<base url>/<virtual directory>/<slot>/<original filename>`. Segments are joined
//! through `url::Url`, so empty segments collapse and filenames are percent-encoded.

use url::Url;

#[derive(Debug, thiserror::Error)]
pub enum PublicUrlError {
    #[error("Invalid base URL {url}: {reason}")]
    InvalidBase { url: String, reason: String },
}

/// Builds public URLs for stored files
#[derive(Clone, Debug)]
pub struct PublicUrlBuilder {
    base: Url,
    mount: Vec<String>,
}

impl PublicUrlBuilder {
    /// # Arguments
    /// * `base_url` - Public origin, optionally with a path prefix
    ///   (e.g., "https://cdn.example.com/media")
    /// * `virtual_directory` - Mount path of the static server (e.g., "/download")
    pub fn new(base_url: &str, virtual_directory: &str) -> Result<Self, PublicUrlError> {
        let base = Url::parse(base_url).map_err(|e| PublicUrlError::InvalidBase {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;

        if base.cannot_be_a_base() {
            return Err(PublicUrlError::InvalidBase {
                url: base_url.to_string(),
                reason: "URL cannot carry a path".to_string(),
            });
        }

        Ok(Self {
            base,
            mount: split_segments(virtual_directory),
        })
    }

    /// Compose the URL of `filename` stored in `slot`.
    ///
    /// `slot` may carry a trailing separator; it is ignored.
    pub fn build(&self, slot: &str, filename: &str) -> String {
        let mut url = self.base.clone();
        url.set_query(None);
        url.set_fragment(None);

        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .extend(self.mount.iter().map(String::as_str))
                .extend(split_segments(slot).iter().map(String::as_str))
                .push(filename);
        }

        url.to_string()
    }
}

fn split_segments(path: &str) -> Vec<String> {
    path.split('/')
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
