use {
    axum::{
        Json,
        http::StatusCode,
        response::{IntoResponse, Response},
    },
    serde_json::json,
    thiserror::Error,
    tracing::error,
};

/// API-route error taxonomy. Validation failures are the only class that
/// surfaces as a client-facing error code by design of the propagation
/// policy; the webhook route never uses this type.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Malformed or out-of-range request parameters.
    #[error("{0}")]
    Validation(String),

    /// The conversation store is not configured.
    #[error("Database not configured")]
    StoreNotConfigured,

    /// Anything else.
    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, detail) = match &self {
            Self::Validation(message) => (StatusCode::BAD_REQUEST, message.clone()),
            Self::StoreNotConfigured => {
                (StatusCode::SERVICE_UNAVAILABLE, self.to_string())
            },
            Self::Internal(cause) => {
                error!(error = %cause, "unhandled API error");
                (StatusCode::INTERNAL_SERVER_ERROR, self.to_string())
            },
        };
        (status, Json(json!({ "detail": detail }))).into_response()
    }
}
