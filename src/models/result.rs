use crate::models::{GenerationResponse, ProcessingStatus};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use uuid::Uuid;

/// Terminal outcome of one submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum Outcome {
    Success {
        #[serde(rename = "outputPrompt")]
        output_prompt: String,
        #[serde(
            rename = "generatedImage",
            default,
            skip_serializing_if = "Option::is_none"
        )]
        image: Option<String>,
    },
    Error {
        #[serde(rename = "errorMessage")]
        message: String,
    },
}

impl From<GenerationResponse> for Outcome {
    fn from(response: GenerationResponse) -> Self {
        match response {
            GenerationResponse::Success {
                output_image,
                output_prompt,
            } => Outcome::Success {
                output_prompt,
                image: Some(output_image).filter(|image| !image.is_empty()),
            },
            GenerationResponse::Error { message } => Outcome::Error { message },
        }
    }
}

/// Client-side view of one submission. Built once and replaced, never merged,
/// by the next submission's result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessingResult {
    id: String,
    input_prompt: String,
    processing_time_ms: u64,
    created_at: DateTime<Utc>,
    #[serde(flatten)]
    outcome: Outcome,
}

impl ProcessingResult {
    fn new(input_prompt: &str, processing_time_ms: u64, outcome: Outcome) -> Self {
        Self {
            id: format!("result-{}", Uuid::new_v4()),
            input_prompt: input_prompt.to_string(),
            processing_time_ms,
            created_at: Utc::now(),
            outcome,
        }
    }

    /// Maps a parsed endpoint response, success or error, keeping the elapsed time.
    pub fn from_response(input_prompt: &str, response: GenerationResponse, elapsed: Duration) -> Self {
        let millis = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX);
        Self::new(input_prompt, millis, response.into())
    }

    /// No server round trip completed, so no time is reported.
    pub fn transport_failure(input_prompt: &str, message: impl Into<String>) -> Self {
        Self::new(
            input_prompt,
            0,
            Outcome::Error {
                message: message.into(),
            },
        )
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn input_prompt(&self) -> &str {
        &self.input_prompt
    }

    pub fn processing_time_ms(&self) -> u64 {
        self.processing_time_ms
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn outcome(&self) -> &Outcome {
        &self.outcome
    }

    pub fn status(&self) -> ProcessingStatus {
        match self.outcome {
            Outcome::Success { .. } => ProcessingStatus::Success,
            Outcome::Error { .. } => ProcessingStatus::Error,
        }
    }

    pub fn is_success(&self) -> bool {
        self.status() == ProcessingStatus::Success
    }

    pub fn output_prompt(&self) -> &str {
        match &self.outcome {
            Outcome::Success { output_prompt, .. } => output_prompt,
            Outcome::Error { .. } => "",
        }
    }

    pub fn generated_image(&self) -> Option<&str> {
        match &self.outcome {
            Outcome::Success { image, .. } => image.as_deref(),
            Outcome::Error { .. } => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match &self.outcome {
            Outcome::Success { .. } => None,
            Outcome::Error { message } => Some(message),
        }
    }
}
