use crate::{
    codec,
    error::{Result, ValidationError},
    models::{ImageInput, ModelInput, ProcessingStatus},
    validation,
};
use serde::{Deserialize, Deserializer, Serialize};

/// `imageData` on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImagePayload {
    pub file_name: String,
    pub file_size: u64,
    pub file_type: String,
    pub base64_data: String,
}

/// Body of `POST /api/process`. `imageData` is either absent or a full object;
/// an explicit `null` is rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessRequest {
    pub prompt: String,
    #[serde(
        default,
        deserialize_with = "present_image",
        skip_serializing_if = "Option::is_none"
    )]
    pub image_data: Option<ImagePayload>,
}

fn present_image<'de, D>(deserializer: D) -> std::result::Result<Option<ImagePayload>, D::Error>
where
    D: Deserializer<'de>,
{
    ImagePayload::deserialize(deserializer).map(Some)
}

impl ProcessRequest {
    /// Refuses to build a request with a blank prompt.
    pub fn new(prompt: impl Into<String>, image: Option<&ImageInput>) -> Result<Self> {
        let prompt = prompt.into();
        validation::validate_prompt(&prompt)?;

        Ok(Self {
            prompt,
            image_data: image.map(ImageInput::to_payload),
        })
    }

    /// Checks the metadata the sender declared: prompt, image type and image size.
    pub fn validate(&self) -> std::result::Result<(), ValidationError> {
        validation::validate_prompt(&self.prompt)?;
        if let Some(image) = &self.image_data {
            validation::validate_image(&image.file_type, image.file_size)?;
        }
        Ok(())
    }

    /// Decodes the image, if any, and builds the model input. Decoded bytes
    /// are held to the same size limit as the declared size.
    pub fn into_model_input(self) -> Result<ModelInput> {
        match self.image_data {
            Some(image) => {
                let bytes = codec::decode(codec::strip_data_url(&image.base64_data))?;
                validation::validate_image_size(bytes.len() as u64)?;
                Ok(ModelInput::Multimodal {
                    image: bytes,
                    mime_type: image.file_type,
                    prompt: self.prompt,
                })
            }
            None => Ok(ModelInput::Text {
                prompt: self.prompt,
            }),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireGenerationResponse {
    success: bool,
    #[serde(default)]
    output_image: String,
    #[serde(default)]
    output_prompt: String,
    status: ProcessingStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// Response of `POST /api/process`.
///
/// On the wire this is the flat `{success, outputImage, outputPrompt, status, error?}`
/// object. Deserialization rejects bodies where `success`, `status` and `error`
/// disagree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "WireGenerationResponse", into = "WireGenerationResponse")]
pub enum GenerationResponse {
    Success {
        output_image: String,
        output_prompt: String,
    },
    Error {
        message: String,
    },
}

impl GenerationResponse {
    pub fn success(output_image: impl Into<String>, output_prompt: impl Into<String>) -> Self {
        GenerationResponse::Success {
            output_image: output_image.into(),
            output_prompt: output_prompt.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        GenerationResponse::Error {
            message: message.into(),
        }
    }

    pub fn status(&self) -> ProcessingStatus {
        match self {
            GenerationResponse::Success { .. } => ProcessingStatus::Success,
            GenerationResponse::Error { .. } => ProcessingStatus::Error,
        }
    }

    pub fn is_success(&self) -> bool {
        self.status() == ProcessingStatus::Success
    }
}

impl TryFrom<WireGenerationResponse> for GenerationResponse {
    type Error = String;

    fn try_from(wire: WireGenerationResponse) -> std::result::Result<Self, String> {
        match (wire.success, wire.status, wire.error) {
            (true, ProcessingStatus::Success, None) => Ok(GenerationResponse::Success {
                output_image: wire.output_image,
                output_prompt: wire.output_prompt,
            }),
            (false, ProcessingStatus::Error, Some(message)) => {
                Ok(GenerationResponse::Error { message })
            }
            (success, status, error) => Err(format!(
                "inconsistent response: success={} status={} error present={}",
                success,
                status.as_str(),
                error.is_some()
            )),
        }
    }
}

impl From<GenerationResponse> for WireGenerationResponse {
    fn from(response: GenerationResponse) -> Self {
        match response {
            GenerationResponse::Success {
                output_image,
                output_prompt,
            } => WireGenerationResponse {
                success: true,
                output_image,
                output_prompt,
                status: ProcessingStatus::Success,
                error: None,
            },
            GenerationResponse::Error { message } => WireGenerationResponse {
                success: false,
                output_image: String::new(),
                output_prompt: String::new(),
                status: ProcessingStatus::Error,
                error: Some(message),
            },
        }
    }
}
