use thiserror::Error;

/// Input rejected before any network activity.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Prompt cannot be empty")]
    EmptyPrompt,
    #[error("Invalid file type '{0}'. Please upload a JPG or PNG image.")]
    InvalidFormat(String),
    #[error("File size {size} bytes exceeds the {limit} byte limit")]
    SizeExceeded { size: u64, limit: u64 },
}

#[derive(Debug, Error)]
pub enum GenEditError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
    #[error("Either a prompt or an image is required")]
    MissingInput,
    #[error("Failed to read image file: {0}")]
    ReadError(String),
    #[error("Decode error: {0}")]
    DecodeError(String),
    #[error("Transport error: {0}")]
    TransportError(String),
    #[error("Provider error: {0}")]
    ProviderError(String),
    #[error("Bad request: {0}")]
    BadRequest(String),
    #[error("Configuration error: {0}")]
    ConfigError(String),
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl GenEditError {
    /// Errors caused by the caller's input rather than by the pipeline.
    pub fn is_client_fault(&self) -> bool {
        matches!(
            self,
            GenEditError::Validation(_) | GenEditError::BadRequest(_) | GenEditError::MissingInput
        )
    }
}

pub type Result<T> = std::result::Result<T, GenEditError>;
