use crate::{
    codec,
    error::{Result, ValidationError},
    models::ImagePayload,
    validation,
};
use std::path::Path;
use uuid::Uuid;

/// Opaque reference to the preview of a selected image. Dropping it releases it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PreviewHandle(Uuid);

impl PreviewHandle {
    fn new() -> Self {
        PreviewHandle(Uuid::new_v4())
    }

    pub fn id(&self) -> Uuid {
        self.0
    }
}

/// A user-selected image. Never mutated; selecting another file replaces it.
#[derive(Debug, Clone)]
pub struct ImageInput {
    file_name: String,
    file_size: u64,
    file_type: String,
    payload: Vec<u8>,
    preview: PreviewHandle,
}

impl ImageInput {
    pub fn new(file_name: impl Into<String>, file_type: impl Into<String>, payload: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            file_size: payload.len() as u64,
            file_type: file_type.into(),
            payload,
            preview: PreviewHandle::new(),
        }
    }

    /// Reads `path` and guesses its MIME type from the extension.
    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let payload = codec::read_file(path).await?;
        let file_type = mime_guess::from_path(path)
            .first_or_octet_stream()
            .essence_str()
            .to_string();
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();

        log::debug!(
            "Loaded {} ({}, {})",
            file_name,
            file_type,
            validation::format_file_size(payload.len() as u64)
        );

        Ok(Self::new(file_name, file_type, payload))
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn file_size(&self) -> u64 {
        self.file_size
    }

    pub fn file_type(&self) -> &str {
        &self.file_type
    }

    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    pub fn preview(&self) -> &PreviewHandle {
        &self.preview
    }

    pub fn validate(&self) -> std::result::Result<(), ValidationError> {
        validation::validate_image(&self.file_type, self.file_size)
    }

    pub fn preview_data_url(&self) -> String {
        codec::to_data_url(&self.file_type, &self.payload)
    }

    /// Wire form with the payload base64 encoded.
    pub fn to_payload(&self) -> ImagePayload {
        ImagePayload {
            file_name: self.file_name.clone(),
            file_size: self.file_size,
            file_type: self.file_type.clone(),
            base64_data: codec::encode(&self.payload),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn size_comes_from_payload() {
        let image = ImageInput::new("dot.png", "image/png", vec![1, 2, 3, 4]);
        assert_eq!(image.file_size(), 4);
        assert!(image.validate().is_ok());
        assert!(image.preview_data_url().starts_with("data:image/png;base64,"));
    }

    #[test]
    fn each_selection_gets_its_own_preview() {
        let a = ImageInput::new("a.png", "image/png", vec![0]);
        let b = ImageInput::new("a.png", "image/png", vec![0]);
        assert_ne!(a.preview(), b.preview());
    }

    #[test]
    fn payload_encodes_losslessly() {
        let bytes: Vec<u8> = (0..=255u8).cycle().take(4096).collect();
        let image = ImageInput::new("noise.jpg", "image/jpeg", bytes.clone());
        let payload = image.to_payload();

        assert_eq!(payload.file_name, "noise.jpg");
        assert_eq!(payload.file_size, 4096);
        assert_eq!(codec::decode(&payload.base64_data).unwrap(), bytes);
    }

    #[tokio::test]
    async fn from_path_guesses_mime_type() {
        let mut file = tempfile::Builder::new().suffix(".png").tempfile().unwrap();
        file.write_all(b"\x89PNG").unwrap();

        let image = ImageInput::from_path(file.path()).await.unwrap();
        assert_eq!(image.file_type(), "image/png");
        assert_eq!(image.payload(), b"\x89PNG");
        assert!(image.file_name().ends_with(".png"));
    }

    #[tokio::test]
    async fn from_path_reports_read_errors() {
        let dir = tempfile::tempdir().unwrap();
        let err = ImageInput::from_path(dir.path().join("gone.jpg"))
            .await
            .unwrap_err();
        assert!(matches!(err, crate::error::GenEditError::ReadError(_)));
    }
}
