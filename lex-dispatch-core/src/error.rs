//! Error types for fetch outcomes and user input
//!
//! Two recoverable kinds exist, and they never mix:
//!
//! - [`ApiError`]: the backend or the network misbehaved. Stored in the
//!   cache slice for the affected key; the rest of the state is untouched.
//! - [`ValidationError`]: user input failed a form check. Surfaced next to
//!   the input; never reaches the network layer.
//!
//! Wiring mistakes (a missing key field, a duplicate action name, an
//! anonymous container asked to emit selection actions) are not errors at
//! all. Those panic with a descriptive message.

use thiserror::Error;

/// A failed fetch, stored per cache key.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The backend rejected the request with 401
    #[error("unauthorized")]
    Unauthorized,

    /// Any other non-2xx status
    #[error("{endpoint}: status {status}")]
    Status { endpoint: String, status: u16 },

    /// The request never produced a response
    #[error("{endpoint}: {message}")]
    Transport { endpoint: String, message: String },

    /// A 2xx response whose body was not the expected shape
    #[error("{endpoint}: malformed response: {message}")]
    Malformed { endpoint: String, message: String },
}

impl ApiError {
    /// Whether this error signals a missing or expired authorization
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized)
    }
}

/// A rejected form field, addressed to the input that caused it.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    /// Name of the offending form field
    pub field: &'static str,
    /// Human-readable description of the problem
    pub message: String,
}

impl ValidationError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unauthorized_is_detected() {
        assert!(ApiError::Unauthorized.is_unauthorized());
        assert!(!ApiError::Status {
            endpoint: "compounds".into(),
            status: 500
        }
        .is_unauthorized());
    }

    #[test]
    fn errors_format_with_endpoint() {
        let err = ApiError::Status {
            endpoint: "conrels".into(),
            status: 503,
        };
        assert_eq!(err.to_string(), "conrels: status 503");
    }

    #[test]
    fn validation_error_names_the_field() {
        let err = ValidationError::new("word", "must not be empty");
        assert_eq!(err.to_string(), "word: must not be empty");
    }
}
