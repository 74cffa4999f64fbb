//! Test utilities for lex-dispatch applications
//!
//! This module provides helpers for testing stores and query families:
//!
//! - [`RecordingDispatcher`]: captures dispatched actions for assertions
//! - [`StubBackend`]: a [`Backend`] returning canned bodies or errors
//! - [`rows_envelope`]: wrap items in the `{"data": [...]}` response shape
//!
//! # Example
//!
//! ```ignore
//! use lex_dispatch::testing::{RecordingDispatcher, StubBackend, rows_envelope};
//!
//! let backend = StubBackend::ok(rows_envelope(vec![serde_json::json!({"id": "a"})]));
//! let recorder = RecordingDispatcher::new();
//! family.run(&backend, params, recorder.dispatch_fn()).await;
//! assert_eq!(recorder.names(), vec!["QueryRequested", "QueryReturned"]);
//! ```

use std::future::Future;
use std::sync::{Arc, Mutex};

use serde_json::Value;

use crate::action::Action;
use crate::client::Backend;
use crate::error::ApiError;
use crate::params::Params;

/// Captures every action a dispatch closure receives.
///
/// Clone-cheap; all clones share the same recording.
pub struct RecordingDispatcher<A> {
    actions: Arc<Mutex<Vec<A>>>,
}

impl<A> Clone for RecordingDispatcher<A> {
    fn clone(&self) -> Self {
        Self {
            actions: Arc::clone(&self.actions),
        }
    }
}

impl<A> Default for RecordingDispatcher<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A> RecordingDispatcher<A> {
    pub fn new() -> Self {
        Self {
            actions: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Take all recorded actions, clearing the recording
    pub fn drain(&self) -> Vec<A> {
        std::mem::take(&mut self.actions.lock().unwrap())
    }

    /// Number of recorded actions
    pub fn len(&self) -> usize {
        self.actions.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn record(&self, action: A) {
        self.actions.lock().unwrap().push(action);
    }
}

impl<A: Send + 'static> RecordingDispatcher<A> {
    /// A dispatch closure that records into this dispatcher
    pub fn dispatch_fn(&self) -> impl Fn(A) + Send + 'static {
        let recorder = self.clone();
        move |action| recorder.record(action)
    }
}

impl<A: Action> RecordingDispatcher<A> {
    /// Names of all recorded actions, in dispatch order
    pub fn names(&self) -> Vec<&'static str> {
        self.actions.lock().unwrap().iter().map(Action::name).collect()
    }
}

type StubHandler = dyn Fn(&str, &Params) -> Result<Value, ApiError> + Send + Sync;

/// A [`Backend`] serving canned responses.
pub struct StubBackend {
    handler: Box<StubHandler>,
}

impl StubBackend {
    /// Answer every request with the same body
    pub fn ok(body: Value) -> Self {
        Self {
            handler: Box::new(move |_, _| Ok(body.clone())),
        }
    }

    /// Answer every request with the same error
    pub fn fail(error: ApiError) -> Self {
        Self {
            handler: Box::new(move |_, _| Err(error.clone())),
        }
    }

    /// Answer per endpoint and parameters
    pub fn with(
        handler: impl Fn(&str, &Params) -> Result<Value, ApiError> + Send + Sync + 'static,
    ) -> Self {
        Self {
            handler: Box::new(handler),
        }
    }
}

impl Backend for StubBackend {
    fn get(
        &self,
        endpoint: &str,
        params: &Params,
    ) -> impl Future<Output = Result<Value, ApiError>> + Send {
        let result = (self.handler)(endpoint, params);
        async move { result }
    }
}

/// Wrap items in the `{"data": [...]}` envelope row queries expect
pub fn rows_envelope(items: Vec<Value>) -> Value {
    serde_json::json!({ "data": items })
}
