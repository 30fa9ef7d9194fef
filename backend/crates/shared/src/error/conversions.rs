//! Error conversions
//!
//! Request-body rejections into [`AppError`], and the HTTP rendering of
//! [`AppError`] itself. Both need the `axum` feature.

#[cfg(feature = "axum")]
use super::app_error::AppError;

// ============================================================================
// Axum conversions (feature-gated)
// ============================================================================

/// A JSON body axum could not extract becomes a 400 with a `{message}` body
#[cfg(feature = "axum")]
impl From<axum::extract::rejection::JsonRejection> for AppError {
    fn from(rejection: axum::extract::rejection::JsonRejection) -> Self {
        use axum::extract::rejection::JsonRejection;
        use axum::http::StatusCode;

        let message = match &rejection {
            JsonRejection::MissingJsonContentType(_) => {
                "Expected request with Content-Type: application/json".to_string()
            }
            JsonRejection::JsonSyntaxError(_) => "Malformed JSON body".to_string(),
            JsonRejection::JsonDataError(_) => format!("Invalid JSON body: {}", rejection.body_text()),
            JsonRejection::BytesRejection(_) if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE => {
                "Request body too large".to_string()
            }
            _ => "Failed to read request body".to_string(),
        };

        AppError::bad_request(message).with_source(rejection)
    }
}

#[cfg(feature = "axum")]
impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        use axum::Json;
        use axum::http::StatusCode;

        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        // Clients only ever read `message`; status carries the category.
        let body = serde_json::json!({ "message": self.message() });

        (status, Json(body)).into_response()
    }
}
