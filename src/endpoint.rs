//! Server side of `POST /api/process`, independent of the HTTP framework.

use crate::{
    error::{GenEditError, Result},
    logger,
    models::{GenerationResponse, ProcessRequest},
    normalize::normalize,
    provider::GenerationModel,
};
use std::sync::Arc;

/// The only statuses the endpoint answers with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyStatus {
    Ok,
    BadRequest,
    InternalError,
}

impl ReplyStatus {
    pub fn as_u16(&self) -> u16 {
        match self {
            ReplyStatus::Ok => 200,
            ReplyStatus::BadRequest => 400,
            ReplyStatus::InternalError => 500,
        }
    }

    fn for_error(error: &GenEditError) -> Self {
        if error.is_client_fault() {
            ReplyStatus::BadRequest
        } else {
            ReplyStatus::InternalError
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EndpointReply {
    pub status: ReplyStatus,
    pub body: GenerationResponse,
}

impl EndpointReply {
    /// Error body plus the status its kind maps to. Also used for requests the
    /// HTTP layer refuses before they reach `handle`.
    pub fn from_error(error: &GenEditError) -> Self {
        let status = ReplyStatus::for_error(error);
        match status {
            ReplyStatus::BadRequest => log::warn!("Rejected request: {}", error),
            _ => log::error!("Error processing prompt: {}", error),
        }
        Self {
            status,
            body: GenerationResponse::error(error.to_string()),
        }
    }
}

/// Stateless: nothing survives between requests except the model handle.
#[derive(Clone)]
pub struct ProcessingEndpoint {
    model: Arc<dyn GenerationModel>,
}

impl ProcessingEndpoint {
    pub fn new(model: Arc<dyn GenerationModel>) -> Self {
        Self { model }
    }

    pub fn model_id(&self) -> &str {
        self.model.model_id()
    }

    /// Never fails: every error becomes an error body with a 400 or 500 status.
    pub async fn handle(&self, body: &[u8]) -> EndpointReply {
        let _timer = logger::timer("process request");

        match self.process(body).await {
            Ok(response) => EndpointReply {
                status: ReplyStatus::Ok,
                body: response,
            },
            Err(e) => EndpointReply::from_error(&e),
        }
    }

    async fn process(&self, body: &[u8]) -> Result<GenerationResponse> {
        let request: ProcessRequest = serde_json::from_slice(body)
            .map_err(|e| GenEditError::BadRequest(format!("invalid request body: {}", e)))?;
        request.validate()?;

        // The decoded image lives only inside `input` and is dropped once the model returns.
        let input = request.into_model_input()?;
        log::info!(
            "Processing prompt ({} chars, image: {})",
            input.prompt().chars().count(),
            input.has_image()
        );

        let output = self.model.generate(input).await?;
        Ok(normalize(&output).into())
    }
}
