use super::*;

fn error(status: StatusCode, message: &str) -> Response {
    (status, Json(serde_json::json!({"message": message}))).into_response()
}

pub(super) fn unauthorized() -> Response {
    error(StatusCode::UNAUTHORIZED, "unauthorized")
}

pub(super) fn bad_request(msg: &str) -> Response {
    error(StatusCode::BAD_REQUEST, msg)
}

pub(super) fn not_found(what: &str) -> Response {
    error(StatusCode::NOT_FOUND, &format!("{} not found", what))
}

pub(super) fn conflict(msg: &str) -> Response {
    error(StatusCode::CONFLICT, msg)
}

/// Rejects blank reasons the way the platform's validation pipe does.
pub(super) fn require_reason(reason: Option<&str>) -> Result<String, Response> {
    match reason.map(str::trim) {
        Some(r) if !r.is_empty() => Ok(r.to_string()),
        _ => Err(bad_request("reason is required")),
    }
}
