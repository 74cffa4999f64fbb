//! Entity caches for the lexical browser
//!
//! One module per backend entity, each bundling the raw wire shape, the
//! normalized cache item, and the query family that fetches it:
//!
//! - [`compounds`] - compound rows per lexical unit
//! - [`con_rels`] - conceptual relations per synset, plus derived trees
//! - [`lex_units`] - lexical units per synset
//! - [`paths`] - relation paths between two synsets
//! - [`synset_info`] - one descriptive record per synset
//!
//! [`search`] validates the word-search form, and [`app`] ties every
//! cache into the application state with a single routing reducer.
//!
//! # Example
//!
//! ```ignore
//! use lex_dispatch::Store;
//! use lex_dispatch_entities::app::{app_reducer, AppAction, AppState};
//!
//! let mut store = Store::new(AppState::new(), app_reducer);
//! store.dispatch(AppAction::Reset);
//! ```

pub mod app;
pub mod compounds;
pub mod con_rels;
pub mod lex_units;
pub mod paths;
pub mod search;
pub mod synset_info;

pub use app::{app_reducer, AppAction, AppState};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::app::{app_reducer, AppAction, AppState};
    pub use crate::compounds::Compound;
    pub use crate::con_rels::{ConRel, ConRelKind};
    pub use crate::lex_units::LexUnit;
    pub use crate::paths::PathStep;
    pub use crate::search::SearchForm;
    pub use crate::synset_info::SynsetInfo;
}
