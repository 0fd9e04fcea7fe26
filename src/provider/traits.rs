use crate::{
    error::Result,
    models::{ModelInput, ModelOutput},
};
use async_trait::async_trait;

/// A generative model that accepts text or image + text and answers with text
/// plus zero or more media artifacts.
#[async_trait]
pub trait GenerationModel: Send + Sync {
    fn model_id(&self) -> &str;

    /// One invocation, no retries. Failures come back as `ProviderError`.
    async fn generate(&self, input: ModelInput) -> Result<ModelOutput>;
}
