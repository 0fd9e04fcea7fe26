use crate::models::{GenerationResponse, ModelOutput};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedOutput {
    /// Base64 of the first image artifact, empty when there is none.
    pub output_image: String,
    /// The model's text, verbatim.
    pub output_prompt: String,
}

/// Picks the first `image/*` artifact and the model's text. Later image
/// artifacts are dropped.
pub fn normalize(output: &ModelOutput) -> NormalizedOutput {
    let output_image = output
        .artifacts
        .iter()
        .find(|artifact| artifact.media_type.starts_with("image/"))
        .map(|artifact| artifact.base64.clone())
        .unwrap_or_default();

    NormalizedOutput {
        output_image,
        output_prompt: output.text.clone().unwrap_or_default(),
    }
}

impl From<NormalizedOutput> for GenerationResponse {
    fn from(normalized: NormalizedOutput) -> Self {
        GenerationResponse::success(normalized.output_image, normalized.output_prompt)
    }
}
