//! Authorization signal derived from fetch outcomes
//!
//! The cache layer owns no credentials and no login flow. It only observes
//! what the backend says: a 401 means authorization is required, any
//! successful response means it is not. Every query outcome classifies
//! into one of those two signals or neither.

use crate::error::ApiError;

/// What a fetch outcome says about authorization state
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuthSignal {
    /// The backend accepted the request
    Authorized,
    /// The backend rejected the request with 401
    Unauthorized,
}

impl AuthSignal {
    /// Classify a fetch outcome.
    ///
    /// Success is evidence of authorization. A 401 is evidence against.
    /// Every other failure says nothing about it.
    pub fn classify<T>(outcome: &Result<T, ApiError>) -> Option<AuthSignal> {
        match outcome {
            Ok(_) => Some(AuthSignal::Authorized),
            Err(err) if err.is_unauthorized() => Some(AuthSignal::Unauthorized),
            Err(_) => None,
        }
    }
}

/// Whether the application currently needs the user to authorize.
///
/// This is the only global flag the cache layer feeds. Entity caches stay
/// keyed and independent; authorization is a property of the session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AuthState {
    /// True after any fetch came back 401 and no fetch succeeded since
    pub required: bool,
}

impl AuthState {
    /// Apply a signal. Returns `true` if the flag flipped.
    pub fn observe(&mut self, signal: AuthSignal) -> bool {
        let required = match signal {
            AuthSignal::Unauthorized => true,
            AuthSignal::Authorized => false,
        };
        if self.required == required {
            false
        } else {
            self.required = required;
            true
        }
    }

    /// Apply an optional signal, ignoring `None`
    pub fn observe_opt(&mut self, signal: Option<AuthSignal>) -> bool {
        match signal {
            Some(signal) => self.observe(signal),
            None => false,
        }
    }
}
