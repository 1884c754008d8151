use guess_types::{ApiResponse, GameError};
use warp::http::StatusCode;

use crate::auth::AuthError;

/// Failures surfaced to API callers as `{type: "error", message}`.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    Unauthorized(String),
    #[error("{0}")]
    Forbidden(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    MethodNotAllowed(String),
    #[error("{0}")]
    LengthRequired(String),
    #[error("{0}")]
    PayloadTooLarge(String),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::LengthRequired(_) => StatusCode::LENGTH_REQUIRED,
            ApiError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message safe to return to the client. Internal details stay in the logs.
    pub fn public_message(&self) -> String {
        match self {
            ApiError::Internal(err) => {
                tracing::error!("Internal error while handling request: {:?}", err);
                "Internal server error".to_string()
            }
            other => other.to_string(),
        }
    }

    pub fn to_response(&self) -> ApiResponse {
        ApiResponse::Error {
            message: self.public_message(),
        }
    }
}

impl From<warp::Rejection> for ApiError {
    fn from(rejection: warp::Rejection) -> Self {
        if rejection.is_not_found() {
            ApiError::NotFound("Not found".to_string())
        } else if rejection.find::<warp::reject::PayloadTooLarge>().is_some() {
            ApiError::PayloadTooLarge("Request body is too large".to_string())
        } else if rejection.find::<warp::reject::LengthRequired>().is_some() {
            ApiError::LengthRequired("Content-Length header is required".to_string())
        } else if rejection.find::<warp::reject::InvalidQuery>().is_some() {
            ApiError::BadRequest("Invalid query string".to_string())
        } else if rejection.find::<warp::reject::MethodNotAllowed>().is_some() {
            ApiError::MethodNotAllowed("Method not allowed".to_string())
        } else {
            ApiError::Internal(anyhow::anyhow!("Unhandled rejection: {:?}", rejection))
        }
    }
}

impl From<GameError> for ApiError {
    fn from(err: GameError) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        ApiError::Unauthorized(err.to_string())
    }
}
