//! Core traits and types for lex-dispatch
//!
//! This crate provides the foundational abstractions for building cached
//! API frontends with centralized state management, following a Redux-inspired
//! architecture.
//!
//! # Core Concepts
//!
//! - **Action**: Events that describe state changes
//! - **Store**: Centralized state container with reducer pattern
//! - **QueryFamily**: Fetch lifecycle for one keyed entity cache
//! - **ById**: Lifts a slice reducer over a map of cache slices
//! - **Container**: Selection-aware views over cached data
//!
//! # Basic Example
//!
//! ```ignore
//! use lex_dispatch_core::prelude::*;
//!
//! #[derive(Action, Clone, Debug)]
//! enum MyAction {
//!     Increment,
//!     Decrement,
//! }
//!
//! #[derive(Default)]
//! struct AppState {
//!     counter: i32,
//! }
//!
//! fn reducer(state: &mut AppState, action: MyAction) -> bool {
//!     match action {
//!         MyAction::Increment => { state.counter += 1; true }
//!         MyAction::Decrement => { state.counter -= 1; true }
//!     }
//! }
//!
//! let mut store = Store::new(AppState::default(), reducer);
//! store.dispatch(MyAction::Increment);
//! ```
//!
//! # Fetch Lifecycle Pattern
//!
//! Every keyed fetch runs in two phases: a `Requested` action marks the
//! slice as fetching, then the spawned task sends exactly one terminal
//! action (`Returned` or `Failed`) back over the channel:
//!
//! ```ignore
//! use std::sync::Arc;
//! use tokio::sync::mpsc;
//! use lex_dispatch_core::{spawn_query, ApiClient, KeySpec, QueryFamily};
//!
//! let family = Arc::new(QueryFamily::new(
//!     "LEX_UNITS",
//!     "lexunits",
//!     KeySpec::Field("synsetId"),
//!     normalize_lex_units,
//! ));
//! let backend = Arc::new(ApiClient::new("http://localhost:8080/api"));
//! let (tx, mut rx) = mpsc::unbounded_channel();
//!
//! spawn_query(family, backend, params, tx, AppAction::LexUnits);
//!
//! // Main loop receives actions from async completions
//! while let Some(action) = rx.recv().await {
//!     store.dispatch(action);
//! }
//! ```
//!
//! All mutation happens on the loop that owns the store; spawned tasks
//! only ever send actions.

pub mod action;
pub mod auth;
pub mod binding;
pub mod client;
pub mod container;
pub mod error;
pub mod history;
pub mod keyed;
pub mod params;
pub mod query;
pub mod registry;
pub mod selection;
pub mod simple;
pub mod store;
pub mod testing;
pub mod tree;

// Core trait exports
pub use action::{Action, KeyedAction};

// Parameter and key exports
pub use params::{CacheKey, ItemId, KeySpec, Params};

// Error exports
pub use error::{ApiError, ValidationError};

// Store exports
pub use store::{
    ComposedMiddleware, LoggingMiddleware, Middleware, NoopMiddleware, Reducer, Store,
    StoreWithMiddleware,
};

// Registry exports
pub use registry::ActionTypes;

// Keyed-cache exports
pub use keyed::{ById, ByIdState};

// Query family exports
pub use query::{
    decode_envelope, query_slice_reducer, spawn_query, Normalize, QueryAction, QueryFamily,
    QuerySlice,
};

// Simple API exports
pub use simple::{
    simple_reducer, spawn_simple, RequestStatus, SimpleAction, SimpleApiState, SimpleFamily,
};

// Backend exports
pub use client::{ApiClient, Backend};

// Auth exports
pub use auth::{AuthSignal, AuthState};

// Binding exports
pub use binding::QueryBinding;

// Selection exports
pub use selection::{
    selections_reducer, ContainerId, SelectionAction, SelectionState, Selections,
};

// Container exports
pub use container::{Decorated, Identified, RowContainer, RowOrder, TreeContainer};

// Tree exports
pub use tree::{DecoratedTree, TreeNode};

// History exports
pub use history::{HistoryEntry, SearchHistory};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::action::{Action, KeyedAction};
    pub use crate::auth::{AuthSignal, AuthState};
    pub use crate::binding::QueryBinding;
    pub use crate::client::{ApiClient, Backend};
    pub use crate::container::{Decorated, Identified, RowContainer, TreeContainer};
    pub use crate::error::{ApiError, ValidationError};
    pub use crate::keyed::{ById, ByIdState};
    pub use crate::params::{CacheKey, ItemId, KeySpec, Params};
    pub use crate::query::{
        query_slice_reducer, spawn_query, QueryAction, QueryFamily, QuerySlice,
    };
    pub use crate::registry::ActionTypes;
    pub use crate::selection::{
        selections_reducer, ContainerId, SelectionAction, Selections,
    };
    pub use crate::simple::{
        simple_reducer, spawn_simple, SimpleAction, SimpleApiState, SimpleFamily,
    };
    pub use crate::store::{
        ComposedMiddleware, LoggingMiddleware, Middleware, NoopMiddleware, Reducer, Store,
        StoreWithMiddleware,
    };
    pub use crate::tree::{DecoratedTree, TreeNode};
}
