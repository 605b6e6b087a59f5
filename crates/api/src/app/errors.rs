use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use procura_core::DomainError;

/// Map a domain failure onto the HTTP surface.
///
/// Request-shape problems are 400, missing records 404, state machine and
/// concurrency violations 409, and over-receipt 422: the request was
/// well-formed and the order exists, the quantities just don't fit.
pub fn domain_error_to_response(err: DomainError) -> axum::response::Response {
    match err {
        DomainError::Validation(msg) => json_error(StatusCode::BAD_REQUEST, "validation_error", msg),
        DomainError::InvalidId(msg) => json_error(StatusCode::BAD_REQUEST, "invalid_id", msg),
        DomainError::NotFound(msg) => json_error(StatusCode::NOT_FOUND, "not_found", msg),
        DomainError::InvalidState(msg) => json_error(StatusCode::CONFLICT, "invalid_state", msg),
        DomainError::InvalidTransition(msg) => {
            json_error(StatusCode::CONFLICT, "invalid_transition", msg)
        }
        DomainError::Conflict(msg) => json_error(StatusCode::CONFLICT, "conflict", msg),
        DomainError::OverReceipt(msg) => {
            json_error(StatusCode::UNPROCESSABLE_ENTITY, "over_receipt", msg)
        }
    }
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
