//! Action traits for type-safe state mutations

use std::fmt::Debug;

use crate::params::CacheKey;

/// Marker trait for actions that can be dispatched to the store
///
/// Actions represent intents to change state. They should be:
/// - Clone: Actions may be logged, replayed, or sent to multiple handlers
/// - Debug: For debugging and logging
/// - Send + 'static: For async dispatch across threads
///
/// Use `#[derive(Action)]` from `lex-dispatch-macros` to auto-implement this trait.
pub trait Action: Clone + Debug + Send + 'static {
    /// Get the action name for logging and filtering
    fn name(&self) -> &'static str;
}

/// An action that targets one slice of a keyed cache
///
/// Keyed actions carry the cache key derived from their request parameters,
/// so a by-id reducer can route them to the right slice without inspecting
/// the parameters again.
pub trait KeyedAction: Action {
    /// The cache key this action is addressed to
    fn cache_key(&self) -> &CacheKey;
}
