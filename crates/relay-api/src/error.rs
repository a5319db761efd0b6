use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Missing parameter: {0}")]
    MissingParameter(String),
    #[error("Provider denied authorization: {0}")]
    ProviderDenied(String),
    #[error("Invalid state: {0}")]
    InvalidState(String),
    #[error("Token exchange failed: {0}")]
    TokenExchangeFailed(String),
    #[error("Settings update failed: {0}")]
    SettingsUpdateFailed(String),
    #[error("JWT error: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),
    #[error("Internal error: {0}")]
    Internal(String),
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    detail: Option<String>,
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::MissingParameter(_) | Self::ProviderDenied(_) | Self::InvalidState(_) => {
                StatusCode::BAD_REQUEST
            }
            Self::TokenExchangeFailed(_) | Self::SettingsUpdateFailed(_) => StatusCode::BAD_GATEWAY,
            Self::Jwt(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn body(self) -> ErrorBody {
        match self {
            Self::MissingParameter(message) => ErrorBody {
                error: message,
                detail: None,
            },
            Self::ProviderDenied(error) => ErrorBody {
                error,
                detail: None,
            },
            // The reason is only logged, callers get a fixed message
            Self::InvalidState(_) => ErrorBody {
                error: "state inválido".to_string(),
                detail: None,
            },
            Self::TokenExchangeFailed(detail) => ErrorBody {
                error: "token_exchange_failed".to_string(),
                detail: Some(detail),
            },
            Self::SettingsUpdateFailed(detail) => ErrorBody {
                error: "bolt_update_failed".to_string(),
                detail: Some(detail),
            },
            Self::Jwt(_) | Self::Internal(_) => ErrorBody {
                error: "internal_error".to_string(),
                detail: None,
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!(error = %self, status = status.as_u16(), "request failed");
        } else {
            tracing::warn!(error = %self, status = status.as_u16(), "request rejected");
        }

        (status, Json(self.body())).into_response()
    }
}
