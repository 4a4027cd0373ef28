use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

/// How the upload endpoint reads and answers a request
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UploadMode {
    /// Any number of `upload` parts, answered with a JSON array of URLs
    Batch,
    /// Exactly one `file` part, answered with a plain-text URL
    Single,
}

impl UploadMode {
    /// Multipart field name carrying the file payloads in this mode
    pub fn field_name(&self) -> &'static str {
        match self {
            UploadMode::Batch => "upload",
            UploadMode::Single => "file",
        }
    }
}

impl FromStr for UploadMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "batch" => Ok(UploadMode::Batch),
            "single" => Ok(UploadMode::Single),
            _ => Err(anyhow::anyhow!("Invalid upload mode: {}", s)),
        }
    }
}

impl Display for UploadMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            UploadMode::Batch => write!(f, "batch"),
            UploadMode::Single => write!(f, "single"),
        }
    }
}

/// When a fresh storage slot is allocated
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SlotStrategy {
    /// Every uploaded file gets its own slot
    PerFile,
    /// All files of one request share a single slot
    PerRequest,
}

impl FromStr for SlotStrategy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "per-file" | "per_file" | "file" => Ok(SlotStrategy::PerFile),
            "per-request" | "per_request" | "request" | "batch" => Ok(SlotStrategy::PerRequest),
            _ => Err(anyhow::anyhow!("Invalid slot strategy: {}", s)),
        }
    }
}

impl Display for SlotStrategy {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            SlotStrategy::PerFile => write!(f, "per-file"),
            SlotStrategy::PerRequest => write!(f, "per-request"),
        }
    }
}
