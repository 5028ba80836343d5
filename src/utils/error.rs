use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::models::meme::ErrorReply;

pub const UNREACHABLE_MESSAGE: &str = "Could not connect to the meme API.";
pub const MALFORMED_MESSAGE: &str = "Failed to get a meme URL from the API.";

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Upstream request failed: {0}")]
    UpstreamUnreachable(#[source] reqwest::Error),

    #[error("Upstream returned an unusable meme: {0}")]
    UpstreamMalformed(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    /// 指标标签
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::Config(_) => "config",
            AppError::UpstreamUnreachable(_) => "unreachable",
            AppError::UpstreamMalformed(_) => "malformed",
            AppError::Internal(_) => "internal",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::UpstreamUnreachable(_) => StatusCode::SERVICE_UNAVAILABLE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let error_message = match self {
            AppError::UpstreamUnreachable(_) => UNREACHABLE_MESSAGE,
            AppError::UpstreamMalformed(_) => MALFORMED_MESSAGE,
            AppError::Config(_) => "Configuration error",
            AppError::Internal(_) => "Internal server error",
        };

        let body = Json(ErrorReply {
            error: error_message.to_string(),
        });

        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
