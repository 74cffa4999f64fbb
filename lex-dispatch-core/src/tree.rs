//! Derived tree views over cached relation rows
//!
//! Trees are never cached. Selectors build them on demand from the flat
//! relation slices, and children are sorted by id at construction so two
//! builds over the same data compare equal.

use crate::params::ItemId;

/// One node of a derived relation tree
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TreeNode {
    pub id: ItemId,
    pub name: String,
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    /// Node with no children
    pub fn leaf(id: ItemId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            children: Vec::new(),
        }
    }

    /// Node with the given children, sorted by id
    pub fn with_children(
        id: ItemId,
        name: impl Into<String>,
        mut children: Vec<TreeNode>,
    ) -> Self {
        children.sort_by(|a, b| a.id.cmp(&b.id));
        Self {
            id,
            name: name.into(),
            children,
        }
    }

    /// Total node count including this one
    pub fn size(&self) -> usize {
        1 + self.children.iter().map(TreeNode::size).sum::<usize>()
    }
}

/// A tree node annotated with selection flags, leaves included
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DecoratedTree {
    pub id: ItemId,
    pub name: String,
    pub chosen: bool,
    pub selected: bool,
    pub children: Vec<DecoratedTree>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn children_are_sorted_by_id() {
        let node = TreeNode::with_children(
            ItemId::new("root"),
            "root",
            vec![
                TreeNode::leaf(ItemId::new("c"), "third"),
                TreeNode::leaf(ItemId::new("a"), "first"),
                TreeNode::leaf(ItemId::new("b"), "second"),
            ],
        );
        let ids: Vec<&str> = node.children.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[test]
    fn equal_data_builds_equal_trees() {
        let a = TreeNode::with_children(
            ItemId::new("r"),
            "r",
            vec![
                TreeNode::leaf(ItemId::new("y"), "y"),
                TreeNode::leaf(ItemId::new("x"), "x"),
            ],
        );
        let b = TreeNode::with_children(
            ItemId::new("r"),
            "r",
            vec![
                TreeNode::leaf(ItemId::new("x"), "x"),
                TreeNode::leaf(ItemId::new("y"), "y"),
            ],
        );
        assert_eq!(a, b);
    }

    #[test]
    fn size_counts_all_nodes() {
        let node = TreeNode::with_children(
            ItemId::new("r"),
            "r",
            vec![TreeNode::with_children(
                ItemId::new("m"),
                "m",
                vec![TreeNode::leaf(ItemId::new("l"), "l")],
            )],
        );
        assert_eq!(node.size(), 3);
    }
}
