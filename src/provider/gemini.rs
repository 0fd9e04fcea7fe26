use crate::{
    codec,
    config::Config,
    error::{GenEditError, Result},
    models::{MediaArtifact, ModelInput, ModelOutput},
    provider::GenerationModel,
};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};

#[derive(Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
    #[serde(rename = "promptFeedback")]
    prompt_feedback: Option<GeminiPromptFeedback>,
}

#[derive(Deserialize)]
struct GeminiPromptFeedback {
    #[serde(rename = "blockReason")]
    block_reason: Option<String>,
}

#[derive(Deserialize)]
struct GeminiCandidate {
    content: Option<GeminiContent>,
    #[serde(rename = "finishReason")]
    finish_reason: Option<String>,
}

#[derive(Deserialize)]
struct GeminiContent {
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

#[derive(Deserialize)]
struct GeminiPart {
    text: Option<String>,
    #[serde(rename = "inlineData")]
    inline_data: Option<GeminiInlineData>,
    #[serde(default)]
    thought: bool,
}

#[derive(Deserialize)]
struct GeminiInlineData {
    #[serde(rename = "mimeType")]
    mime_type: String,
    data: String,
}

/// `generateContent` binding for Gemini image models.
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    api_key: String,
    model_id: String,
    base_url: String,
}

impl GeminiClient {
    pub fn new(config: &Config) -> Self {
        Self {
            client: Client::new(),
            api_key: config.api_key.clone(),
            model_id: config.model_id.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model_id)
    }

    fn build_payload(input: &ModelInput) -> Value {
        let parts = match input {
            ModelInput::Text { prompt } => json!([{ "text": prompt }]),
            ModelInput::Multimodal {
                image,
                mime_type,
                prompt,
            } => json!([
                {
                    "inlineData": {
                        "mimeType": mime_type,
                        "data": codec::encode(image)
                    }
                },
                { "text": prompt }
            ]),
        };

        json!({
            "contents": [{ "role": "user", "parts": parts }],
            "generationConfig": {
                "responseModalities": ["TEXT", "IMAGE"]
            }
        })
    }

    fn parse_response(response: GeminiResponse) -> Result<ModelOutput> {
        let candidate = match response.candidates.into_iter().next() {
            Some(candidate) => candidate,
            None => {
                let reason = response
                    .prompt_feedback
                    .and_then(|feedback| feedback.block_reason)
                    .unwrap_or_else(|| "no candidates returned".to_string());
                return Err(GenEditError::ProviderError(format!(
                    "Gemini returned no output: {}",
                    reason
                )));
            }
        };

        if let Some(reason) = &candidate.finish_reason {
            log::debug!("Gemini finish reason: {}", reason);
        }

        let mut text = String::new();
        let mut artifacts = Vec::new();

        for part in candidate.content.map(|c| c.parts).unwrap_or_default() {
            if part.thought {
                continue;
            }
            if let Some(fragment) = part.text {
                text.push_str(&fragment);
            }
            if let Some(inline) = part.inline_data {
                artifacts.push(MediaArtifact::new(inline.mime_type, inline.data));
            }
        }

        Ok(ModelOutput {
            text: Some(text),
            artifacts,
        })
    }

    fn error_message(status: reqwest::StatusCode, body: &str) -> String {
        let detail = serde_json::from_str::<Value>(body)
            .ok()
            .and_then(|v| v["error"]["message"].as_str().map(String::from))
            .unwrap_or_else(|| body.trim().to_string());

        format!("Gemini API error ({}): {}", status.as_u16(), detail)
    }
}

#[async_trait]
impl GenerationModel for GeminiClient {
    fn model_id(&self) -> &str {
        &self.model_id
    }

    async fn generate(&self, input: ModelInput) -> Result<ModelOutput> {
        let payload = Self::build_payload(&input);

        log::info!(
            "Invoking model: {} ({})",
            self.model_id,
            if input.has_image() { "image + text" } else { "text" }
        );

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|e| GenEditError::ProviderError(format!("request failed: {}", e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| GenEditError::ProviderError(format!("failed to read response: {}", e)))?;

        if !status.is_success() {
            log::error!("Gemini returned HTTP {}", status);
            return Err(GenEditError::ProviderError(Self::error_message(status, &body)));
        }

        let parsed: GeminiResponse = serde_json::from_str(&body)
            .map_err(|e| GenEditError::ProviderError(format!("malformed response: {}", e)))?;

        let output = Self::parse_response(parsed)?;
        log::debug!(
            "Model returned {} chars of text and {} artifact(s)",
            output.text.as_deref().map_or(0, str::len),
            output.artifacts.len()
        );

        Ok(output)
    }
}
