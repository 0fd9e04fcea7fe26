use crate::{
    config::ClientConfig,
    error::{GenEditError, Result},
    models::{GenerationResponse, ImageInput, ProcessRequest, ProcessingResult},
    validation,
};
use reqwest::Client;
use std::time::Instant;

/// Client side of `POST /api/process`: validates, encodes, sends once and
/// turns whatever comes back into a `ProcessingResult`.
#[derive(Clone)]
pub struct RequestOrchestrator {
    http: Client,
    config: ClientConfig,
}

impl RequestOrchestrator {
    pub fn new(config: ClientConfig) -> Self {
        Self::with_client(Client::new(), config)
    }

    pub fn with_client(http: Client, config: ClientConfig) -> Self {
        Self { http, config }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Local validation failures are returned as `Err` and nothing is sent.
    /// Once the request is built, every outcome is an `Ok(ProcessingResult)`.
    pub async fn submit(&self, prompt: &str, image: Option<&ImageInput>) -> Result<ProcessingResult> {
        if prompt.trim().is_empty() && image.is_none() {
            return Err(GenEditError::MissingInput);
        }
        validation::validate_prompt(prompt)?;
        if let Some(image) = image {
            image.validate()?;
        }

        let request = ProcessRequest::new(prompt, image)?;
        Ok(self.send(prompt, &request).await)
    }

    async fn send(&self, prompt: &str, request: &ProcessRequest) -> ProcessingResult {
        let url = self.config.process_url();
        log::debug!("Submitting to {} (image: {})", url, request.image_data.is_some());

        let started = Instant::now();
        let response = match self.http.post(&url).json(request).send().await {
            Ok(response) => response,
            Err(e) => return Self::transport_failure(prompt, format!("request failed: {}", e)),
        };

        let status = response.status();
        let body = match response.bytes().await {
            Ok(body) => body,
            Err(e) => {
                return Self::transport_failure(prompt, format!("failed to read response: {}", e))
            }
        };

        match serde_json::from_slice::<GenerationResponse>(&body) {
            Ok(parsed) => {
                let elapsed = started.elapsed();
                log::info!(
                    "Submission finished with {} (HTTP {}) in {}ms",
                    parsed.status().as_str(),
                    status.as_u16(),
                    elapsed.as_millis()
                );
                ProcessingResult::from_response(prompt, parsed, elapsed)
            }
            Err(e) => Self::transport_failure(
                prompt,
                format!("unparseable response (HTTP {}): {}", status.as_u16(), e),
            ),
        }
    }

    fn transport_failure(prompt: &str, detail: String) -> ProcessingResult {
        let error = GenEditError::TransportError(detail);
        log::error!("Error processing prompt: {}", error);
        ProcessingResult::transport_failure(prompt, error.to_string())
    }
}

/// The current image selection and the latest result of one user session.
pub struct Session {
    orchestrator: RequestOrchestrator,
    image: Option<ImageInput>,
    latest: Option<ProcessingResult>,
}

impl Session {
    pub fn new(orchestrator: RequestOrchestrator) -> Self {
        Self {
            orchestrator,
            image: None,
            latest: None,
        }
    }

    /// Replaces the current image only if the new one passes validation.
    pub fn select_image(&mut self, image: ImageInput) -> Result<()> {
        image.validate()?;

        log::debug!(
            "Selected {} ({})",
            image.file_name(),
            validation::format_file_size(image.file_size())
        );
        if let Some(previous) = self.image.replace(image) {
            log::debug!("Released preview {}", previous.preview().id());
        }
        Ok(())
    }

    pub fn clear_image(&mut self) -> Option<ImageInput> {
        self.image.take()
    }

    pub fn image(&self) -> Option<&ImageInput> {
        self.image.as_ref()
    }

    pub fn latest_result(&self) -> Option<&ProcessingResult> {
        self.latest.as_ref()
    }

    /// Submits with the current image. Holding `&mut self` across the call
    /// keeps a second submission from starting while one is in flight.
    pub async fn submit(&mut self, prompt: &str) -> Result<&ProcessingResult> {
        let result = self.orchestrator.submit(prompt, self.image.as_ref()).await?;
        Ok(self.latest.insert(result))
    }
}
