use async_trait::async_trait;
use thiserror::Error;

use super::Message;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("The completion endpoint is not reachable: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("The completion endpoint rejected the API key (HTTP {0})")]
    Unauthorized(u16),

    #[error("The completion endpoint is rate limiting requests, try again shortly")]
    RateLimited,

    #[error("The completion endpoint failed with HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("The completion endpoint returned an unexpected response: {0}")]
    MalformedResponse(String),
}

#[async_trait]
pub trait Backend {
    /// Used at startup to verify the endpoint is reachable and accepts the
    /// configured credential.
    async fn health_check(&self) -> Result<(), ServiceError>;

    /// Sends the full conversation to the completion endpoint and returns
    /// the text of the reply. Messages are sent in the order given.
    async fn get_completion<'a>(&self, messages: &'a [Message]) -> Result<String, ServiceError>;
}

pub type BackendBox = Box<dyn Backend + Send + Sync>;
