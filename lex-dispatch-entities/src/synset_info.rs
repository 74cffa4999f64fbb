//! Synset info, a single-value entity on the simple API reducer
//!
//! Info responses have no row envelope; the whole body is the record and
//! is stored verbatim under the synset's key.

use lex_dispatch::{KeySpec, SimpleFamily};
use serde::Deserialize;

/// A synset's descriptive record
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SynsetInfo {
    #[serde(default)]
    pub word_category: Option<String>,
    #[serde(default)]
    pub word_class: Option<String>,
    #[serde(default)]
    pub definition: Option<String>,
    #[serde(default)]
    pub all_orth_forms: Vec<String>,
}

/// Simple-API family for synset info
pub fn family() -> SimpleFamily<SynsetInfo> {
    SimpleFamily::new("SYNSET_INFO", "synsets", KeySpec::Field("synsetId"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use lex_dispatch::Params;

    #[test]
    fn family_keys_by_synset() {
        let family = family();
        let params = Params::new().with("synsetId", "s3");
        assert_eq!(family.cache_key(&params).as_str(), "s3");
        assert_eq!(family.endpoint(), "synsets");
    }

    #[test]
    fn record_decodes_from_the_wire_shape() {
        let info: SynsetInfo = serde_json::from_value(serde_json::json!({
            "wordCategory": "nomen",
            "definition": "a small domesticated carnivore",
            "allOrthForms": ["cat", "housecat"]
        }))
        .unwrap();
        assert_eq!(info.word_category.as_deref(), Some("nomen"));
        assert_eq!(info.all_orth_forms.len(), 2);
        assert_eq!(info.word_class, None);
    }
}
