//! Base64 transport encoding for image bytes.

use crate::error::{GenEditError, Result};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use std::path::Path;

pub fn encode(payload: &[u8]) -> String {
    STANDARD.encode(payload)
}

pub fn decode(data: &str) -> Result<Vec<u8>> {
    STANDARD
        .decode(data.trim())
        .map_err(|e| GenEditError::DecodeError(format!("invalid base64 payload: {}", e)))
}

/// Drops a `data:<mime>;base64,` prefix if there is one.
pub fn strip_data_url(data: &str) -> &str {
    if data.starts_with("data:") {
        if let Some((_, payload)) = data.split_once(',') {
            return payload;
        }
    }
    data
}

pub fn to_data_url(mime: &str, payload: &[u8]) -> String {
    format!("data:{};base64,{}", mime, encode(payload))
}

/// Reads a local file into memory.
pub async fn read_file(path: impl AsRef<Path>) -> Result<Vec<u8>> {
    let path = path.as_ref();
    tokio::fs::read(path)
        .await
        .map_err(|e| GenEditError::ReadError(format!("{}: {}", path.display(), e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn round_trips_arbitrary_bytes() {
        let payloads: Vec<Vec<u8>> = vec![
            vec![],
            vec![0],
            vec![0xff, 0x00, 0x7f],
            (0..=255u8).collect(),
            b"\x89PNG\r\n\x1a\n".to_vec(),
        ];
        for payload in payloads {
            assert_eq!(decode(&encode(&payload)).unwrap(), payload);
        }
    }

    #[test]
    fn rejects_invalid_base64() {
        let err = decode("not base64!!").unwrap_err();
        assert!(matches!(err, GenEditError::DecodeError(_)));
    }

    #[test]
    fn strips_data_url_prefix() {
        assert_eq!(strip_data_url("data:image/png;base64,AAEC"), "AAEC");
        assert_eq!(strip_data_url("AAEC"), "AAEC");
        assert_eq!(strip_data_url("data:broken"), "data:broken");

        let url = to_data_url("image/jpeg", &[1, 2, 3]);
        assert!(url.starts_with("data:image/jpeg;base64,"));
        assert_eq!(decode(strip_data_url(&url)).unwrap(), vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn reads_files_and_reports_missing_ones() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"image bytes").unwrap();

        assert_eq!(read_file(file.path()).await.unwrap(), b"image bytes");

        let dir = tempfile::tempdir().unwrap();
        let err = read_file(dir.path().join("missing.png")).await.unwrap_err();
        assert!(matches!(err, GenEditError::ReadError(_)));
    }
}
