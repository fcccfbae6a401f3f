use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::schemas::ErrorResponse;

pub type Result<T> = std::result::Result<T, ApiError>;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Resource not found: {endpoint}")]
    NotFound { endpoint: String },

    #[error("{detail}")]
    Upstream { status: u16, detail: String },

    #[error("Request to {endpoint} timed out")]
    Timeout { endpoint: String },

    #[error("Upstream request failed: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("Malformed upstream payload: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Invalid {name}: {value:?}")]
    InvalidParameter { name: &'static str, value: String },

    /// Request could not be extracted (bad path parameter, malformed body).
    #[error("{detail}")]
    Rejected { status: StatusCode, detail: String },
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::Rejected {
            status: rejection.status(),
            detail: rejection.body_text(),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Rejected {
            status: rejection.status(),
            detail: rejection.body_text(),
        }
    }
}

impl ApiError {
    /// Builds the error for a non-success upstream status.
    pub fn from_status(status: u16, endpoint: &str) -> Self {
        let detail = match status {
            401 => "API key invalid or expired".to_string(),
            403 => "Access forbidden. Check API subscription".to_string(),
            404 => {
                return ApiError::NotFound {
                    endpoint: endpoint.to_string(),
                }
            }
            429 => "Rate limit exceeded".to_string(),
            code => format!("HTTP error {}", code),
        };
        ApiError::Upstream { status, detail }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Upstream { status, .. } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
            }
            ApiError::Timeout { .. } => StatusCode::REQUEST_TIMEOUT,
            ApiError::Transport(_) | ApiError::Decode(_) => StatusCode::BAD_GATEWAY,
            ApiError::Configuration(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::InvalidParameter { .. } => StatusCode::BAD_REQUEST,
            ApiError::Rejected { status, .. } => *status,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), "{}", self);
        } else {
            tracing::warn!(status = status.as_u16(), "{}", self);
        }

        let body = ErrorResponse {
            detail: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_known_statuses_to_details() {
        let err = ApiError::from_status(401, "en/league/hierarchy");
        assert_eq!(err.to_string(), "API key invalid or expired");
        assert_eq!(err.status_code(), StatusCode::UNAUTHORIZED);

        let err = ApiError::from_status(429, "en/league/hierarchy");
        assert_eq!(err.to_string(), "Rate limit exceeded");
        assert_eq!(err.status_code(), StatusCode::TOO_MANY_REQUESTS);
    }

    #[test]
    fn not_found_is_its_own_variant() {
        let err = ApiError::from_status(404, "en/teams/abc/profile");
        assert!(matches!(err, ApiError::NotFound { .. }));
        assert_eq!(err.to_string(), "Resource not found: en/teams/abc/profile");
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn server_errors_pass_status_through() {
        let err = ApiError::from_status(503, "en/league/hierarchy");
        assert_eq!(err.to_string(), "HTTP error 503");
        assert_eq!(err.status_code(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn invalid_parameters_are_bad_requests() {
        let err = ApiError::InvalidParameter {
            name: "team_id",
            value: "../players/p1".to_string(),
        };
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), r#"Invalid team_id: "../players/p1""#);
    }

    #[test]
    fn decode_failures_are_gateway_errors() {
        let err: ApiError = serde_json::from_str::<serde_json::Value>("{not json")
            .unwrap_err()
            .into();
        assert_eq!(err.status_code(), StatusCode::BAD_GATEWAY);
    }
}
