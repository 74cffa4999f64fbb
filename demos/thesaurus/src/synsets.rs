//! Word-search family, local to the demo
//!
//! The library ships caches for entities addressed by an id. The search
//! results list is addressed by the whole search form instead, so the demo
//! defines its own family with a custom key over every parameter.

use lex_dispatch::{CacheKey, Identified, ItemId, KeySpec, Params, QueryFamily};
use serde::Deserialize;

/// Raw synset row as the search endpoint sends it
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RawSynset {
    pub synset_id: String,
    #[serde(default)]
    pub word_category: Option<String>,
    #[serde(default)]
    pub all_orth_forms: Vec<String>,
}

/// A search result row
#[derive(Clone, Debug, PartialEq)]
pub struct Synset {
    pub id: ItemId,
    pub word_category: Option<String>,
    pub orth_forms: Vec<String>,
}

impl Identified for Synset {
    fn item_id(&self) -> ItemId {
        self.id.clone()
    }
}

fn search_key(params: &Params) -> CacheKey {
    let joined = params
        .iter()
        .map(|(name, value)| format!("{name}={value}"))
        .collect::<Vec<_>>()
        .join("&");
    CacheKey::new(joined)
}

fn normalize(_params: &Params, raw: Vec<RawSynset>) -> Vec<Synset> {
    raw.into_iter()
        .map(|r| Synset {
            id: ItemId::new(r.synset_id),
            word_category: r.word_category,
            orth_forms: r.all_orth_forms,
        })
        .collect()
}

/// Query family for the search results cache
pub fn family() -> QueryFamily<RawSynset, Synset> {
    QueryFamily::new("SYNSETS", "synsets", KeySpec::Custom(search_key), normalize)
}
