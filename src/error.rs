//! Error taxonomy shared by the console and its front ends.
//!
//! Everything propagates as `anyhow::Error`; the typed errors below ride
//! inside the chain so the banner can pick the right operator-facing text.

use thiserror::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ValidationKind {
    ReasonRequired,
    ConfirmationMismatch,
    PasswordRequired,
    InvalidInput,
}

/// A client-side check failed; no request was sent.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ValidationError {
    pub kind: ValidationKind,
    pub message: String,
}

impl ValidationError {
    pub fn reason_required() -> Self {
        Self {
            kind: ValidationKind::ReasonRequired,
            message: "A reason is required for this action.".to_string(),
        }
    }

    pub fn confirmation_mismatch() -> Self {
        Self {
            kind: ValidationKind::ConfirmationMismatch,
            message: "Confirmation does not match. Type the business ID and DELETE exactly."
                .to_string(),
        }
    }

    pub fn password_required() -> Self {
        Self {
            kind: ValidationKind::PasswordRequired,
            message: "Password is required to delete the business.".to_string(),
        }
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        Self {
            kind: ValidationKind::InvalidInput,
            message: message.into(),
        }
    }
}

/// The backend answered with a non-success status.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("{label}: {message} (HTTP {status})")]
pub struct ApiError {
    pub label: String,
    pub status: u16,
    pub message: String,
}

/// Pulls the most useful operator-facing message out of an error chain.
///
/// Validation and API errors carry text meant for the operator; anything
/// else (transport failures, decode errors) collapses to `fallback`.
pub fn error_message(err: &anyhow::Error, fallback: &str) -> String {
    for cause in err.chain() {
        if let Some(v) = cause.downcast_ref::<ValidationError>() {
            return v.message.clone();
        }
        if let Some(api) = cause.downcast_ref::<ApiError>() {
            if api.message.trim().is_empty() {
                return fallback.to_string();
            }
            return api.message.clone();
        }
    }
    fallback.to_string()
}

pub fn validation_kind(err: &anyhow::Error) -> Option<ValidationKind> {
    err.chain()
        .find_map(|c| c.downcast_ref::<ValidationError>())
        .map(|v| v.kind)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BannerKind {
    Info,
    Success,
    Error,
}

/// The single status line every screen reports into.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Banner {
    pub kind: BannerKind,
    pub text: String,
}

impl Banner {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            kind: BannerKind::Info,
            text: text.into(),
        }
    }

    pub fn success(text: impl Into<String>) -> Self {
        Self {
            kind: BannerKind::Success,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: BannerKind::Error,
            text: text.into(),
        }
    }

    pub fn from_error(err: &anyhow::Error, fallback: &str) -> Self {
        Self::error(error_message(err, fallback))
    }
}

#[cfg(test)]
#[path = "tests/error_tests.rs"]
mod tests;
