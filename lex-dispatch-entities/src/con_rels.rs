//! Conceptual-relation cache and derived relation trees
//!
//! Relation rows are cached flat, keyed by the synset they were requested
//! for. The raw records name only the synset on the far end, so
//! normalization renames that field to `related_synset_id` and splices the
//! originating synset in from the request parameters.
//!
//! Hypernym and hyponym trees are built on demand from the flat cache:
//! a node's children are its cached relation rows of the matching kind,
//! and a node is expanded only when it is the root or the user selected it
//! in the owning container.

use std::collections::BTreeSet;

use lex_dispatch::{
    ByIdState, CacheKey, Identified, ItemId, KeySpec, Params, QueryFamily, QuerySlice, TreeNode,
};
use serde::Deserialize;

/// Raw relation record as the backend sends it
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RawConRel {
    pub con_rel_id: String,
    /// The synset on the far end of the relation
    pub synset_id: String,
    pub con_rel_type: String,
    #[serde(default)]
    pub all_orth_forms: Vec<String>,
    #[serde(default)]
    pub num_hyponyms: Option<u64>,
}

/// Kind of a conceptual relation
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConRelKind {
    Hypernymy,
    Hyponymy,
    Other(String),
}

impl ConRelKind {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "has_hypernym" => ConRelKind::Hypernymy,
            "has_hyponym" => ConRelKind::Hyponymy,
            other => ConRelKind::Other(other.to_owned()),
        }
    }
}

/// A normalized relation row
#[derive(Clone, Debug, PartialEq)]
pub struct ConRel {
    pub id: ItemId,
    pub kind: ConRelKind,
    /// The synset the relations were requested for
    pub originating_synset_id: String,
    /// The synset on the far end
    pub related_synset_id: String,
    pub related_orth_forms: Vec<String>,
    pub num_hyponyms: Option<u64>,
}

impl Identified for ConRel {
    fn item_id(&self) -> ItemId {
        self.id.clone()
    }
}

fn normalize(params: &Params, raw: Vec<RawConRel>) -> Vec<ConRel> {
    let originating = params.get("synsetId").unwrap_or_default().to_owned();
    raw.into_iter()
        .map(|r| ConRel {
            id: ItemId::new(r.con_rel_id),
            kind: ConRelKind::parse(&r.con_rel_type),
            originating_synset_id: originating.clone(),
            related_synset_id: r.synset_id,
            related_orth_forms: r.all_orth_forms,
            num_hyponyms: r.num_hyponyms,
        })
        .collect()
}

/// Query family for the relation cache
pub fn family() -> QueryFamily<RawConRel, ConRel> {
    QueryFamily::new("CON_RELS", "conrels", KeySpec::Field("synsetId"), normalize)
}

/// Display name for a related synset, falling back to its id
fn node_name(rel: &ConRel) -> String {
    if rel.related_orth_forms.is_empty() {
        rel.related_synset_id.clone()
    } else {
        rel.related_orth_forms.join(", ")
    }
}

/// Build the hypernym tree rooted at a synset
pub fn hypernym_tree(
    cache: &ByIdState<QuerySlice<ConRel>>,
    root_id: &str,
    root_name: &str,
    selected: &BTreeSet<ItemId>,
) -> TreeNode {
    relation_tree(cache, ConRelKind::Hypernymy, root_id, root_name, selected)
}

/// Build the hyponym tree rooted at a synset
pub fn hyponym_tree(
    cache: &ByIdState<QuerySlice<ConRel>>,
    root_id: &str,
    root_name: &str,
    selected: &BTreeSet<ItemId>,
) -> TreeNode {
    relation_tree(cache, ConRelKind::Hyponymy, root_id, root_name, selected)
}

fn relation_tree(
    cache: &ByIdState<QuerySlice<ConRel>>,
    kind: ConRelKind,
    root_id: &str,
    root_name: &str,
    selected: &BTreeSet<ItemId>,
) -> TreeNode {
    let mut path = Vec::new();
    build_node(cache, &kind, root_id, root_name, selected, true, &mut path)
}

fn build_node(
    cache: &ByIdState<QuerySlice<ConRel>>,
    kind: &ConRelKind,
    synset_id: &str,
    name: &str,
    selected: &BTreeSet<ItemId>,
    is_root: bool,
    path: &mut Vec<String>,
) -> TreeNode {
    let id = ItemId::new(synset_id);
    let expand = is_root || selected.contains(&id);
    if !expand {
        return TreeNode::leaf(id, name);
    }
    // A cycle in the relation graph would otherwise recurse forever.
    if path.iter().any(|seen| seen == synset_id) {
        return TreeNode::leaf(id, name);
    }

    path.push(synset_id.to_owned());
    let children = cache
        .rows(&CacheKey::new(synset_id))
        .unwrap_or(&[])
        .iter()
        .filter(|rel| &rel.kind == kind)
        .map(|rel| {
            build_node(
                cache,
                kind,
                &rel.related_synset_id,
                &node_name(rel),
                selected,
                false,
                path,
            )
        })
        .collect();
    path.pop();

    TreeNode::with_children(id, name, children)
}
