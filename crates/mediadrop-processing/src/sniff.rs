//! Content sniffing
//!
//! Classifies data by its leading bytes with the `infer` matcher set. Client-declared
//! content types and file extensions are never consulted.

use mediadrop_core::AppError;
use std::path::Path;
use tokio::io::AsyncReadExt;

/// Number of leading bytes inspected
pub const HEAD_LEN: usize = 8192;

#[derive(Debug, thiserror::Error)]
pub enum SniffError {
    #[error("Unknown file type: unknown")]
    Unknown,

    #[error("Failed to read file head: {0}")]
    Io(#[from] std::io::Error),
}

impl From<SniffError> for AppError {
    fn from(err: SniffError) -> Self {
        match err {
            SniffError::Unknown => AppError::UnknownContentType,
            SniffError::Io(e) => AppError::InternalWithSource {
                message: "Failed to inspect stored file".to_string(),
                source: e.into(),
            },
        }
    }
}

/// Classify in-memory bytes. Only the first [`HEAD_LEN`] bytes are considered.
pub fn sniff_bytes(data: &[u8]) -> Result<&'static str, SniffError> {
    let head = &data[..data.len().min(HEAD_LEN)];
    infer::get(head)
        .map(|kind| kind.mime_type())
        .ok_or(SniffError::Unknown)
}

/// Classify a stored file by reading its head.
pub async fn sniff_file(path: &Path) -> Result<&'static str, SniffError> {
    let file = tokio::fs::File::open(path).await?;
    let mut head = Vec::with_capacity(HEAD_LEN);
    file.take(HEAD_LEN as u64).read_to_end(&mut head).await?;

    let result = sniff_bytes(&head);
    let content_type = result
        .as_ref()
        .copied()
        .unwrap_or(mediadrop_core::UNKNOWN_CONTENT_TYPE);
    tracing::debug!(
        path = %path.display(),
        head_bytes = head.len(),
        content_type,
        "Sniffed stored file"
    );
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn padded(prefix: &[u8], len: usize) -> Vec<u8> {
        let mut data = prefix.to_vec();
        data.resize(len.max(prefix.len()), 0);
        data
    }

    #[test]
    fn test_common_images() {
        assert_eq!(
            sniff_bytes(b"\x89PNG\r\n\x1a\n\x00\x00\x00\rIHDR").unwrap(),
            "image/png"
        );
        assert_eq!(
            sniff_bytes(b"\xff\xd8\xff\xe0\x00\x10JFIF\x00").unwrap(),
            "image/jpeg"
        );
        assert_eq!(sniff_bytes(b"GIF89a\x01\x00").unwrap(), "image/gif");
        assert_eq!(
            sniff_bytes(b"RIFF\x24\x00\x00\x00WEBPVP8 ").unwrap(),
            "image/webp"
        );
    }

    #[test]
    fn test_riff_family_is_told_apart() {
        assert_eq!(
            sniff_bytes(b"RIFF\x24\x00\x00\x00WAVEfmt ").unwrap(),
            "audio/x-wav"
        );
        assert_eq!(
            sniff_bytes(b"RIFF\x24\x00\x00\x00AVI LIST").unwrap(),
            "video/x-msvideo"
        );
        assert!(matches!(
            sniff_bytes(b"RIFF\x24\x00\x00\x00XXXX"),
            Err(SniffError::Unknown)
        ));
    }

    #[test]
    fn test_mp4_brand() {
        assert_eq!(
            sniff_bytes(b"\x00\x00\x00\x20ftypisom\x00\x00\x02\x00isomiso2").unwrap(),
            "video/mp4"
        );
    }

    #[test]
    fn test_jpeg_2000() {
        let jp2 = b"\x00\x00\x00\x0cjP  \r\n\x87\n\x00\x00\x00\x14ftypjp2 \x00\x00\x00\x00jp2 ";
        assert_eq!(sniff_bytes(jp2).unwrap(), "image/jp2");
    }

    #[test]
    fn test_canon_raw_wins_over_tiff() {
        let cr2 = padded(b"II*\x00\x10\x00\x00\x00CR\x02\x00", 64);
        assert_eq!(sniff_bytes(&cr2).unwrap(), "image/x-canon-cr2");

        let tiff = padded(b"II*\x00\x08\x00\x00\x00", 64);
        assert_eq!(sniff_bytes(&tiff).unwrap(), "image/tiff");
    }

    #[test]
    fn test_large_input_classified_by_head() {
        let mut data = padded(b"GIF89a\x01\x00", HEAD_LEN * 4);
        data[HEAD_LEN..].fill(b'x');
        assert_eq!(sniff_bytes(&data).unwrap(), "image/gif");
    }

    #[test]
    fn test_unknown_inputs() {
        assert!(matches!(sniff_bytes(b""), Err(SniffError::Unknown)));
        assert!(matches!(sniff_bytes(b"\x89P"), Err(SniffError::Unknown)));
        assert!(matches!(
            sniff_bytes(b"just some plain ascii text\n"),
            Err(SniffError::Unknown)
        ));
    }

    #[test]
    fn test_unknown_maps_to_app_error() {
        let err: AppError = SniffError::Unknown.into();
        assert!(matches!(err, AppError::UnknownContentType));
        assert_eq!(err.to_string(), "Unknown file type: unknown");
    }

    #[tokio::test]
    async fn test_sniff_file_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.png");
        let mut data = b"\x89PNG\r\n\x1a\n".to_vec();
        data.resize(HEAD_LEN * 2, 0xab);
        std::fs::write(&path, &data).unwrap();

        assert_eq!(sniff_file(&path).await.unwrap(), "image/png");
        assert_eq!(sniff_file(&path).await.unwrap(), "image/png");
    }

    #[tokio::test]
    async fn test_sniff_file_missing() {
        let dir = tempfile::tempdir().unwrap();
        let result = sniff_file(&dir.path().join("missing")).await;
        assert!(matches!(result, Err(SniffError::Io(_))));
    }
}
