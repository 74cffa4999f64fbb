//! Lexical-unit cache, keyed by synset
//!
//! The backend encodes boolean properties as 0/1 integers; normalization
//! turns them into real booleans and renames `lexUnitId` to the generic
//! item id.

use lex_dispatch::{Identified, ItemId, KeySpec, Params, QueryFamily};
use serde::Deserialize;

/// Raw lexical-unit record as the backend sends it
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RawLexUnit {
    pub lex_unit_id: String,
    pub orth_form: String,
    #[serde(default)]
    pub sense: Option<u32>,
    #[serde(default)]
    pub named_entity: Option<i64>,
    #[serde(default)]
    pub artificial: Option<i64>,
    #[serde(default)]
    pub source: Option<String>,
}

/// A normalized lexical unit
#[derive(Clone, Debug, PartialEq)]
pub struct LexUnit {
    pub id: ItemId,
    pub orth_form: String,
    pub sense: Option<u32>,
    pub named_entity: bool,
    pub artificial: bool,
    pub source: Option<String>,
}

impl Identified for LexUnit {
    fn item_id(&self) -> ItemId {
        self.id.clone()
    }
}

fn flag(code: Option<i64>) -> bool {
    code.is_some_and(|c| c != 0)
}

fn normalize(_params: &Params, raw: Vec<RawLexUnit>) -> Vec<LexUnit> {
    raw.into_iter()
        .map(|r| LexUnit {
            id: ItemId::new(r.lex_unit_id),
            orth_form: r.orth_form,
            sense: r.sense,
            named_entity: flag(r.named_entity),
            artificial: flag(r.artificial),
            source: r.source,
        })
        .collect()
}

/// Query family for the lexical-unit cache
pub fn family() -> QueryFamily<RawLexUnit, LexUnit> {
    QueryFamily::new(
        "LEX_UNITS",
        "lexunits",
        KeySpec::Field("synsetId"),
        normalize,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> Params {
        Params::new().with("synsetId", "s7")
    }

    #[test]
    fn numeric_flags_become_booleans() {
        let raw = vec![
            RawLexUnit {
                lex_unit_id: "l1".into(),
                orth_form: "cat".into(),
                sense: Some(1),
                named_entity: Some(0),
                artificial: Some(1),
                source: Some("core".into()),
            },
            RawLexUnit {
                lex_unit_id: "l2".into(),
                orth_form: "Felidae".into(),
                sense: None,
                named_entity: Some(1),
                artificial: None,
                source: None,
            },
        ];
        let items = normalize(&params(), raw);
        assert!(!items[0].named_entity);
        assert!(items[0].artificial);
        assert!(items[1].named_entity);
        assert!(!items[1].artificial);
        assert_eq!(items[0].id, ItemId::new("l1"));
    }

    #[test]
    fn family_keys_by_synset() {
        let family = family();
        assert_eq!(family.cache_key(&params()).as_str(), "s7");
        assert_eq!(family.endpoint(), "lexunits");
    }
}
