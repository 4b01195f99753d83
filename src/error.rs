use actix_web::http::{header::ContentType, StatusCode};
use actix_web::HttpResponse;
use thiserror::Error;

use crate::models::ErrorBody;

#[derive(Debug, Error)]
pub enum RoomGenError {
    #[error("{0}")]
    ConfigError(String),
    #[error("{0}")]
    InputError(String),
    #[error("Rate limit exceeded. Please try again in a moment.")]
    RateLimited,
    #[error("AI usage limit reached. Please add credits to continue.")]
    QuotaExceeded,
    #[error("{context} failed: {message}")]
    UpstreamError {
        context: String,
        status: u16,
        message: String,
    },
    #[error("Failed to parse room analysis")]
    ParseError(#[source] serde_json::Error),
    #[error("Request error: {0}")]
    RequestError(String),
    #[error("Response error: {0}")]
    ResponseError(String),
    #[error("Client error: {0}")]
    ClientError(String),
    #[error("Internal error: {0}")]
    InternalError(String),
}

impl RoomGenError {
    pub fn config(msg: impl Into<String>) -> Self {
        RoomGenError::ConfigError(msg.into())
    }

    pub fn input(msg: impl Into<String>) -> Self {
        RoomGenError::InputError(msg.into())
    }
}

impl actix_web::error::ResponseError for RoomGenError {
    fn status_code(&self) -> StatusCode {
        match self {
            RoomGenError::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            RoomGenError::QuotaExceeded => StatusCode::PAYMENT_REQUIRED,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            RoomGenError::ParseError(source) => {
                log::error!("Request failed: {} ({})", self, source)
            }
            _ => log::error!("Request failed: {}", self),
        }

        HttpResponse::build(self.status_code())
            .insert_header(ContentType::json())
            .json(ErrorBody::new(self.to_string()))
    }
}

pub type Result<T> = std::result::Result<T, RoomGenError>;
