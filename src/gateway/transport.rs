use reqwest::{Client, StatusCode};

use crate::{
    config::GatewayConfig,
    error::{Result, RoomGenError},
    models::{ChatCompletionRequest, ChatCompletionResponse},
};

/// Authenticated POSTs to the gateway's chat-completion endpoint.
#[derive(Clone)]
pub struct ChatTransport {
    client: Client,
    endpoint: String,
    api_key: Option<String>,
}

impl ChatTransport {
    pub fn new(config: &GatewayConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| RoomGenError::ClientError(e.to_string()))?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            api_key: config.api_key.clone(),
        })
    }

    pub fn check_configured(&self) -> Result<()> {
        self.api_key().map(|_| ())
    }

    fn api_key(&self) -> Result<&str> {
        self.api_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| {
                log::error!("AI gateway API key is not configured");
                RoomGenError::config("AI service is not configured")
            })
    }

    /// `context` names the phase in logs and error messages.
    pub async fn complete(
        &self,
        request: &ChatCompletionRequest,
        context: &str,
    ) -> Result<ChatCompletionResponse> {
        let api_key = self.api_key()?;

        log::info!("{}: invoking model {}", context, request.model);

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    RoomGenError::RequestError(format!("{} request timed out", context))
                } else {
                    RoomGenError::RequestError(format!("{} request failed: {}", context, e))
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            log::error!("{} API error: {} {}", context, status, error_text);
            return Err(classify_failure(status, context, error_text));
        }

        log::info!("{} response received", context);

        response
            .json::<ChatCompletionResponse>()
            .await
            .map_err(|e| {
                RoomGenError::ResponseError(format!(
                    "{} response was not valid JSON: {}",
                    context, e
                ))
            })
    }
}

/// Maps a non-2xx gateway status onto the error the caller should see.
pub fn classify_failure(status: StatusCode, context: &str, error_text: String) -> RoomGenError {
    match status {
        StatusCode::TOO_MANY_REQUESTS => RoomGenError::RateLimited,
        StatusCode::PAYMENT_REQUIRED => RoomGenError::QuotaExceeded,
        _ => RoomGenError::UpstreamError {
            context: context.to_string(),
            status: status.as_u16(),
            message: if error_text.trim().is_empty() {
                status.to_string()
            } else {
                error_text
            },
        },
    }
}
