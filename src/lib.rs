pub mod client;
pub mod codec;
pub mod config;
pub mod endpoint;
pub mod error;
pub mod logger;
pub mod models;
pub mod normalize;
pub mod provider;
#[cfg(feature = "server")]
pub mod server;
pub mod validation;

pub use client::{RequestOrchestrator, Session};
pub use config::{ClientConfig, Config};
pub use endpoint::{EndpointReply, ProcessingEndpoint, ReplyStatus};
pub use error::{GenEditError, Result, ValidationError};
pub use models::*;
pub use normalize::{normalize, NormalizedOutput};
pub use provider::{GeminiClient, GenerationModel};
