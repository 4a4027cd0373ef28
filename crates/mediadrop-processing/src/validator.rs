use mediadrop_core::AppError;

/// Validation errors for uploaded files
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("Unaccepted file format {content_type}")]
    UnacceptedContentType { content_type: String },

    #[error("Invalid filename: {0}")]
    InvalidFilename(String),
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        match err {
            ValidationError::UnacceptedContentType { content_type } => {
                AppError::UnacceptedContentType(content_type)
            }
            ValidationError::InvalidFilename(name) => {
                AppError::MalformedRequest(format!("Invalid filename: {}", name))
            }
        }
    }
}

/// Accepted-type whitelist
///
/// Matching is exact and case-sensitive against the sniffed MIME type. An empty list
/// accepts nothing.
#[derive(Clone, Debug, Default)]
pub struct ContentTypeGate {
    accepted: Vec<String>,
}

impl ContentTypeGate {
    pub fn new(accepted: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            accepted: accepted.into_iter().map(Into::into).collect(),
        }
    }

    pub fn is_accepted(&self, content_type: &str) -> bool {
        self.accepted.iter().any(|ct| ct == content_type)
    }

    pub fn check(&self, content_type: &str) -> Result<(), ValidationError> {
        if !self.is_accepted(content_type) {
            return Err(ValidationError::UnacceptedContentType {
                content_type: content_type.to_string(),
            });
        }
        Ok(())
    }
}

/// Reduce a client-supplied filename to its last path component.
///
/// Browsers on some platforms send full paths; both separators are stripped. Names that
/// would not stay inside a slot directory are rejected.
pub fn sanitize_filename(raw: &str) -> Result<String, ValidationError> {
    let name = raw.rsplit(['/', '\\']).next().unwrap_or_default();

    if name.is_empty() || name == "." || name == ".." || name.contains('\0') {
        return Err(ValidationError::InvalidFilename(raw.to_string()));
    }

    Ok(name.to_string())
}
