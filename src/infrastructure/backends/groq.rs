#[cfg(test)]
#[path = "groq_test.rs"]
mod tests;

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use serde::Serialize;

use crate::configuration::Config;
use crate::configuration::ConfigError;
use crate::configuration::ConfigKey;
use crate::domain::models::Backend;
use crate::domain::models::Message;
use crate::domain::models::ServiceError;

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct MessageRequest {
    role: String,
    content: String,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct CompletionRequest {
    model: String,
    messages: Vec<MessageRequest>,
    stream: bool,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct CompletionMessageResponse {
    #[serde(default)]
    role: String,
    content: String,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct CompletionChoiceResponse {
    message: CompletionMessageResponse,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct CompletionResponse {
    choices: Vec<CompletionChoiceResponse>,
}

fn status_error(status: u16, body: String) -> ServiceError {
    if status == 401 || status == 403 {
        return ServiceError::Unauthorized(status);
    }
    if status == 429 {
        return ServiceError::RateLimited;
    }

    return ServiceError::Status { status, body };
}

/// Client for Groq's OpenAI compatible chat completions API. Any other
/// OpenAI compatible endpoint works by changing the URL.
pub struct Groq {
    url: String,
    token: String,
    model: String,
    timeout: u64,
}

impl Groq {
    /// Reads the endpoint settings once at startup. A missing credential
    /// fails here so no request is ever attempted without one.
    pub fn from_config() -> Result<Groq, ConfigError> {
        let token = Config::credential()?;
        let timeout_str = Config::get(ConfigKey::HealthCheckTimeout);
        let timeout = timeout_str
            .parse::<u64>()
            .map_err(|_| {
                return ConfigError::InvalidValue {
                    key: ConfigKey::HealthCheckTimeout.to_string(),
                    value: timeout_str.to_string(),
                };
            })?;

        return Ok(Groq {
            url: Config::get(ConfigKey::ApiUrl),
            token,
            model: Config::get(ConfigKey::Model),
            timeout,
        });
    }
}

#[async_trait]
impl Backend for Groq {
    #[allow(clippy::implicit_return)]
    async fn health_check(&self) -> Result<(), ServiceError> {
        let res = reqwest::Client::new()
            .get(format!("{url}/v1/models", url = self.url))
            .header("Authorization", format!("Bearer {}", self.token))
            .timeout(Duration::from_millis(self.timeout))
            .send()
            .await;

        let res = match res {
            Ok(res) => res,
            Err(err) => {
                tracing::error!(error = ?err, "Completion endpoint is not reachable");
                return Err(ServiceError::Transport(err));
            }
        };

        let status = res.status().as_u16();
        if status >= 400 {
            tracing::error!(status = status, "Completion endpoint health check failed");
            return Err(status_error(status, res.text().await.unwrap_or_default()));
        }

        return Ok(());
    }

    #[allow(clippy::implicit_return)]
    async fn get_completion<'a>(&self, messages: &'a [Message]) -> Result<String, ServiceError> {
        let req = CompletionRequest {
            model: self.model.to_string(),
            messages: messages
                .iter()
                .map(|message| {
                    return MessageRequest {
                        role: message.role().to_string(),
                        content: message.text().to_string(),
                    };
                })
                .collect(),
            stream: false,
        };

        let res = reqwest::Client::new()
            .post(format!("{url}/v1/chat/completions", url = self.url))
            .header("Authorization", format!("Bearer {}", self.token))
            .json(&req)
            .send()
            .await?;

        let status = res.status().as_u16();
        if !res.status().is_success() {
            let body = res.text().await.unwrap_or_default();
            tracing::error!(
                status = status,
                body = %body,
                "Failed to make completion request"
            );
            return Err(status_error(status, body));
        }

        let body = res.text().await?;
        let completion: CompletionResponse = serde_json::from_str(&body).map_err(|err| {
            return ServiceError::MalformedResponse(err.to_string());
        })?;
        tracing::debug!(body = ?completion, "Completion response");

        if completion.choices.is_empty() {
            return Err(ServiceError::MalformedResponse(
                "no choices in completion".to_string(),
            ));
        }

        return Ok(completion.choices[0].message.content.to_string());
    }
}
