use axum::{
    body::Bytes,
    extract::rejection::{BytesRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use pitch_core::{ServiceError, ValidationError};
use serde_json::{json, Value};

#[derive(Debug)]
pub enum AppError {
    ValidationError(Vec<ValidationError>),
    InvalidStatus,
    BookingNotFound,
    RouteNotFound,
    ConflictError,
    MalformedRequest(String),
    MalformedUrl(String),
    PayloadTooLarge,
    InternalServerError(String),
}

impl AppError {
    fn parts(self) -> (StatusCode, Vec<(&'static str, String)>) {
        let one = |code: &'static str, msg: &str| vec![(code, msg.to_string())];
        match self {
            AppError::ValidationError(errors) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                errors.iter().map(|e| (e.code(), e.to_string())).collect(),
            ),
            AppError::InvalidStatus => (
                StatusCode::UNPROCESSABLE_ENTITY,
                one("invalid_status", "Invalid status."),
            ),
            AppError::BookingNotFound => (
                StatusCode::NOT_FOUND,
                one("booking_not_found", "Booking not found."),
            ),
            AppError::RouteNotFound => (
                StatusCode::NOT_FOUND,
                one("route_not_found", "Route not found."),
            ),
            AppError::ConflictError => (
                StatusCode::CONFLICT,
                one("slot_taken", "This slot is already booked."),
            ),
            AppError::MalformedRequest(msg) => {
                tracing::debug!("Malformed request body: {}", msg);
                (
                    StatusCode::BAD_REQUEST,
                    one("malformed_request", "Request body must be valid JSON."),
                )
            }
            AppError::MalformedUrl(msg) => {
                tracing::debug!("Malformed request URL: {}", msg);
                (
                    StatusCode::BAD_REQUEST,
                    one("malformed_request", "Request URL is malformed."),
                )
            }
            AppError::PayloadTooLarge => (
                StatusCode::PAYLOAD_TOO_LARGE,
                one("payload_too_large", "Request body is too large."),
            ),
            AppError::InternalServerError(msg) => {
                tracing::error!("Internal Server Error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, internal())
            }
        }
    }
}

fn internal() -> Vec<(&'static str, String)> {
    vec![("internal_error", "An unexpected server error occurred.".to_string())]
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, errors) = self.parts();
        let (codes, messages): (Vec<_>, Vec<_>) = errors.into_iter().unzip();

        let body = Json(json!({
            "errors": messages,
            "codes": codes,
        }));

        (status, body).into_response()
    }
}

impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Validation(errors) => AppError::ValidationError(errors),
            ServiceError::BookingNotFound(_) => AppError::BookingNotFound,
            ServiceError::SlotTaken { .. } => AppError::ConflictError,
            ServiceError::InvalidStatus(_) => AppError::InvalidStatus,
            ServiceError::Storage(e) => AppError::InternalServerError(e.to_string()),
        }
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::MalformedUrl(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::MalformedUrl(rejection.body_text())
    }
}

/// Parses a raw request body into an untyped payload. An empty body is an
/// empty object.
pub fn parse_payload(body: Result<Bytes, BytesRejection>) -> Result<Value, AppError> {
    let body = body.map_err(|rejection| {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            AppError::PayloadTooLarge
        } else {
            AppError::MalformedRequest(rejection.body_text())
        }
    })?;

    if body.is_empty() {
        return Ok(Value::Object(Default::default()));
    }
    serde_json::from_slice(&body).map_err(|e| AppError::MalformedRequest(e.to_string()))
}
