//! Compound cache, keyed by lexical unit
//!
//! The backend reports whether a compound splits as a numeric
//! `notSplitted` code. Normalization folds that into a tri-state flag and
//! drops the key field from the items, since the slice they live in
//! already carries it.

use lex_dispatch::{Identified, ItemId, KeySpec, Params, QueryFamily};
use serde::Deserialize;

/// Raw compound record as the backend sends it
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RawCompound {
    pub compound_id: String,
    pub lex_unit_id: String,
    #[serde(default)]
    pub not_splitted: Option<i64>,
    #[serde(default)]
    pub modifier: Option<String>,
    #[serde(default)]
    pub head: Option<String>,
}

/// A normalized compound row
#[derive(Clone, Debug, PartialEq)]
pub struct Compound {
    pub id: ItemId,
    /// Whether the compound splits; `None` when the backend code is unknown
    pub splits: Option<bool>,
    pub modifier: Option<String>,
    pub head: Option<String>,
}

impl Identified for Compound {
    fn item_id(&self) -> ItemId {
        self.id.clone()
    }
}

fn splits_from_code(code: Option<i64>) -> Option<bool> {
    match code {
        Some(2) => Some(true),
        Some(1) => Some(false),
        _ => None,
    }
}

fn normalize(_params: &Params, raw: Vec<RawCompound>) -> Vec<Compound> {
    raw.into_iter()
        .map(|r| Compound {
            id: ItemId::new(r.compound_id),
            splits: splits_from_code(r.not_splitted),
            modifier: r.modifier,
            head: r.head,
        })
        .collect()
}

/// Query family for the compound cache
pub fn family() -> QueryFamily<RawCompound, Compound> {
    QueryFamily::new(
        "COMPOUNDS",
        "compounds",
        KeySpec::Field("lexUnitId"),
        normalize,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use lex_dispatch::decode_envelope;
    use serde_json::json;

    fn params() -> Params {
        Params::new().with("lexUnitId", "l42")
    }

    #[test]
    fn tri_state_split_mapping() {
        assert_eq!(splits_from_code(Some(2)), Some(true));
        assert_eq!(splits_from_code(Some(1)), Some(false));
        assert_eq!(splits_from_code(Some(0)), None);
        assert_eq!(splits_from_code(Some(99)), None);
        assert_eq!(splits_from_code(None), None);
    }

    #[test]
    fn normalization_drops_the_key_field() {
        let raw = vec![RawCompound {
            compound_id: "c1".into(),
            lex_unit_id: "l42".into(),
            not_splitted: Some(2),
            modifier: Some("rain".into()),
            head: Some("coat".into()),
        }];
        let items = normalize(&params(), raw);
        assert_eq!(
            items,
            vec![Compound {
                id: ItemId::new("c1"),
                splits: Some(true),
                modifier: Some("rain".into()),
                head: Some("coat".into()),
            }]
        );
    }

    #[test]
    fn family_keys_by_lex_unit() {
        let family = family();
        assert_eq!(family.cache_key(&params()).as_str(), "l42");
        assert_eq!(family.endpoint(), "compounds");
    }

    #[test]
    fn raw_records_decode_from_the_wire_shape() {
        let raw: Vec<RawCompound> = decode_envelope(
            "compounds",
            json!({"data": [
                {"compoundId": "c1", "lexUnitId": "l42", "notSplitted": 1},
                {"compoundId": "c2", "lexUnitId": "l42", "modifier": "snow", "head": "man"}
            ]}),
        )
        .unwrap();
        assert_eq!(raw.len(), 2);
        assert_eq!(raw[0].not_splitted, Some(1));
        assert_eq!(raw[1].head.as_deref(), Some("man"));
    }
}
