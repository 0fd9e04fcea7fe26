use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProcessingStatus {
    Success,
    Error,
}

impl ProcessingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProcessingStatus::Success => "success",
            ProcessingStatus::Error => "error",
        }
    }
}

/// What the generation model is asked to do for one request.
#[derive(Debug, Clone, PartialEq)]
pub enum ModelInput {
    Text {
        prompt: String,
    },
    /// The image goes first, followed by the prompt text.
    Multimodal {
        image: Vec<u8>,
        mime_type: String,
        prompt: String,
    },
}

impl ModelInput {
    pub fn prompt(&self) -> &str {
        match self {
            ModelInput::Text { prompt } | ModelInput::Multimodal { prompt, .. } => prompt,
        }
    }

    pub fn has_image(&self) -> bool {
        matches!(self, ModelInput::Multimodal { .. })
    }
}

/// A model-produced output unit tagged with a media type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaArtifact {
    pub media_type: String,
    pub base64: String,
}

impl MediaArtifact {
    pub fn new(media_type: impl Into<String>, base64: impl Into<String>) -> Self {
        Self {
            media_type: media_type.into(),
            base64: base64.into(),
        }
    }
}

/// Raw model response before normalization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelOutput {
    pub text: Option<String>,
    pub artifacts: Vec<MediaArtifact>,
}
