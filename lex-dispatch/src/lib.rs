//! lex-dispatch: Centralized state management for cached API frontends
//!
//! Like Redux, but for Rust clients of row-oriented REST backends. All
//! state mutations happen through dispatched actions; fetches run as
//! background tasks that send lifecycle actions back to the store loop.
//!
//! # Example
//! ```ignore
//! use lex_dispatch::prelude::*;
//!
//! #[derive(Action, Clone, Debug)]
//! enum AppAction {
//!     Reset,
//!     Compounds(QueryAction<Compound>),
//! }
//! ```

// Re-export everything from core
pub use lex_dispatch_core::*;

// Re-export derive macros
pub use lex_dispatch_macros::Action;

/// Prelude for convenient imports
pub mod prelude {
    // Traits
    pub use lex_dispatch_core::{Action, Backend, Identified, KeyedAction};

    // Parameters and keys
    pub use lex_dispatch_core::{CacheKey, ItemId, KeySpec, Params};

    // Errors
    pub use lex_dispatch_core::{ApiError, ValidationError};

    // Store
    pub use lex_dispatch_core::{
        ComposedMiddleware, LoggingMiddleware, Middleware, NoopMiddleware, Reducer, Store,
        StoreWithMiddleware,
    };

    // Query caches
    pub use lex_dispatch_core::{
        query_slice_reducer, simple_reducer, spawn_query, spawn_simple, ById, ByIdState,
        QueryAction, QueryBinding, QueryFamily, QuerySlice, SimpleAction, SimpleApiState,
        SimpleFamily,
    };

    // Backend
    pub use lex_dispatch_core::ApiClient;

    // Auth signal
    pub use lex_dispatch_core::{AuthSignal, AuthState};

    // Selections and containers
    pub use lex_dispatch_core::{
        selections_reducer, ContainerId, Decorated, DecoratedTree, RowContainer, SelectionAction,
        Selections, TreeContainer, TreeNode,
    };

    // Search history
    pub use lex_dispatch_core::{HistoryEntry, SearchHistory};

    // Derive macros
    pub use lex_dispatch_macros::Action;
}
