//! Relation-path cache between two synsets
//!
//! Paths are addressed by both endpoints at once, so the cache key is the
//! composite `from<a>to<b>`. The backend's path steps carry no id of their
//! own; a synthetic id is minted from the step's synset and its position
//! in the path.

use lex_dispatch::{Identified, ItemId, KeySpec, Params, QueryFamily};
use serde::Deserialize;

/// Raw path step as the backend sends it
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RawPathStep {
    pub synset_id: String,
    #[serde(default)]
    pub all_orth_forms: Vec<String>,
}

/// A normalized path step
#[derive(Clone, Debug, PartialEq)]
pub struct PathStep {
    /// Synthetic identity, unique within one path
    pub id: ItemId,
    pub synset_id: String,
    pub orth_forms: Vec<String>,
}

impl Identified for PathStep {
    fn item_id(&self) -> ItemId {
        self.id.clone()
    }
}

fn normalize(_params: &Params, raw: Vec<RawPathStep>) -> Vec<PathStep> {
    raw.into_iter()
        .enumerate()
        .map(|(index, r)| PathStep {
            id: ItemId::new(format!("{}#{index}", r.synset_id)),
            synset_id: r.synset_id,
            orth_forms: r.all_orth_forms,
        })
        .collect()
}

/// Query family for the path cache
pub fn family() -> QueryFamily<RawPathStep, PathStep> {
    QueryFamily::new(
        "PATHS",
        "paths",
        KeySpec::Composite {
            from: "fromSynsetId",
            to: "toSynsetId",
        },
        normalize,
    )
}
