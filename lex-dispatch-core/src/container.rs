//! Containers: selection-aware views over cached data
//!
//! A container pairs a data source with selection metadata and produces
//! decorated output. It renders nothing; callers receive plain rows or a
//! plain tree with `chosen`/`selected` flags attached and present them
//! however they like.
//!
//! Containers that emit selection actions need an id; decoration-only
//! containers may stay anonymous.

use std::cmp::Ordering;

use crate::params::ItemId;
use crate::selection::{ContainerId, SelectionAction, Selections, SelectionState};
use crate::tree::{DecoratedTree, TreeNode};

/// Row types that know their own identity
pub trait Identified {
    fn item_id(&self) -> ItemId;
}

/// A row annotated with selection flags
#[derive(Clone, Debug, PartialEq)]
pub struct Decorated<T> {
    pub item: T,
    pub chosen: bool,
    pub selected: bool,
}

/// Ordering applied to decorated rows, after decoration
pub type RowOrder<T> = fn(&Decorated<&T>, &Decorated<&T>) -> Ordering;

/// Container for flat row data.
pub struct RowContainer<T> {
    id: Option<ContainerId>,
    order: Option<RowOrder<T>>,
}

impl<T: Identified> RowContainer<T> {
    /// Anonymous container: can decorate, cannot emit selection actions
    pub fn new() -> Self {
        Self {
            id: None,
            order: None,
        }
    }

    /// Container with an identity for selection routing
    pub fn named(id: impl Into<ContainerId>) -> Self {
        Self {
            id: Some(id.into()),
            order: None,
        }
    }

    /// Apply an ordering to decorated rows
    pub fn with_order(mut self, order: RowOrder<T>) -> Self {
        self.order = Some(order);
        self
    }

    /// This container's id, if it has one
    pub fn id(&self) -> Option<&ContainerId> {
        self.id.as_ref()
    }

    /// Decorate rows with selection flags, then order them.
    ///
    /// `None` data passes through as `None`: the caller sees that the
    /// underlying fetch has not resolved, distinct from an empty result.
    pub fn view<'a>(
        &self,
        data: Option<&'a [T]>,
        selections: &Selections,
    ) -> Option<Vec<Decorated<&'a T>>> {
        let rows = data?;
        let empty = SelectionState::default();
        let selection = self
            .id
            .as_ref()
            .and_then(|id| selections.get(id))
            .unwrap_or(&empty);

        let mut decorated: Vec<Decorated<&T>> = rows
            .iter()
            .map(|item| {
                let id = item.item_id();
                Decorated {
                    chosen: selection.is_chosen(&id),
                    selected: selection.is_selected(&id),
                    item,
                }
            })
            .collect();

        if let Some(order) = self.order {
            decorated.sort_by(|a, b| order(a, b));
        }
        Some(decorated)
    }

    /// Build a `Choose` action for this container.
    ///
    /// # Panics
    ///
    /// Panics if the container is anonymous.
    pub fn choose(&self, item: Option<ItemId>) -> SelectionAction {
        SelectionAction::Choose {
            container: self.require_id(),
            item,
        }
    }

    /// Build a `Select` action for this container.
    ///
    /// # Panics
    ///
    /// Panics if the container is anonymous.
    pub fn select(&self, item: ItemId) -> SelectionAction {
        SelectionAction::Select {
            container: self.require_id(),
            item,
        }
    }

    /// Build a `Deselect` action for this container.
    ///
    /// # Panics
    ///
    /// Panics if the container is anonymous.
    pub fn deselect(&self, item: ItemId) -> SelectionAction {
        SelectionAction::Deselect {
            container: self.require_id(),
            item,
        }
    }

    fn require_id(&self) -> ContainerId {
        self.id
            .clone()
            .unwrap_or_else(|| panic!("anonymous container cannot emit selection actions"))
    }
}

impl<T: Identified> Default for RowContainer<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Container for derived tree data.
pub struct TreeContainer {
    id: Option<ContainerId>,
}

impl TreeContainer {
    /// Anonymous tree container
    pub fn new() -> Self {
        Self { id: None }
    }

    /// Tree container with an identity for selection routing
    pub fn named(id: impl Into<ContainerId>) -> Self {
        Self {
            id: Some(id.into()),
        }
    }

    /// Decorate a whole tree, leaves included.
    ///
    /// `None` passes through as `None`, same as for rows.
    pub fn view(&self, data: Option<&TreeNode>, selections: &Selections) -> Option<DecoratedTree> {
        let root = data?;
        let empty = SelectionState::default();
        let selection = self
            .id
            .as_ref()
            .and_then(|id| selections.get(id))
            .unwrap_or(&empty);
        Some(decorate_node(root, selection))
    }

    /// Build a `Choose` action for this container.
    ///
    /// # Panics
    ///
    /// Panics if the container is anonymous.
    pub fn choose(&self, item: Option<ItemId>) -> SelectionAction {
        SelectionAction::Choose {
            container: self.require_id(),
            item,
        }
    }

    /// Build a `Select` action for this container.
    ///
    /// # Panics
    ///
    /// Panics if the container is anonymous.
    pub fn select(&self, item: ItemId) -> SelectionAction {
        SelectionAction::Select {
            container: self.require_id(),
            item,
        }
    }

    fn require_id(&self) -> ContainerId {
        self.id
            .clone()
            .unwrap_or_else(|| panic!("anonymous container cannot emit selection actions"))
    }
}

impl Default for TreeContainer {
    fn default() -> Self {
        Self::new()
    }
}

fn decorate_node(node: &TreeNode, selection: &SelectionState) -> DecoratedTree {
    DecoratedTree {
        id: node.id.clone(),
        name: node.name.clone(),
        chosen: selection.is_chosen(&node.id),
        selected: selection.is_selected(&node.id),
        children: node
            .children
            .iter()
            .map(|child| decorate_node(child, selection))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selection::selections_reducer;

    #[derive(Clone, Debug, PartialEq)]
    struct Row {
        id: String,
        label: String,
    }

    impl Identified for Row {
        fn item_id(&self) -> ItemId {
            ItemId::new(self.id.clone())
        }
    }

    fn rows() -> Vec<Row> {
        vec![
            Row {
                id: "b".into(),
                label: "beta".into(),
            },
            Row {
                id: "a".into(),
                label: "alpha".into(),
            },
        ]
    }

    #[test]
    fn unresolved_data_views_as_none() {
        let container = RowContainer::<Row>::named("list");
        let selections = Selections::new();
        assert!(container.view(None, &selections).is_none());
    }

    #[test]
    fn empty_data_views_as_empty() {
        let container = RowContainer::<Row>::named("list");
        let selections = Selections::new();
        let view = container.view(Some(&[]), &selections).unwrap();
        assert!(view.is_empty());
    }

    #[test]
    fn rows_carry_selection_flags() {
        let container = RowContainer::<Row>::named("list");
        let mut selections = Selections::new();
        selections_reducer(&mut selections, container.choose(Some(ItemId::new("a"))));
        selections_reducer(&mut selections, container.select(ItemId::new("b")));

        let data = rows();
        let view = container.view(Some(&data), &selections).unwrap();
        let a = view.iter().find(|d| d.item.id == "a").unwrap();
        let b = view.iter().find(|d| d.item.id == "b").unwrap();
        assert!(a.chosen && !a.selected);
        assert!(!b.chosen && b.selected);
    }

    #[test]
    fn ordering_runs_after_decoration() {
        let container = RowContainer::<Row>::named("list")
            .with_order(|a, b| a.item.label.cmp(&b.item.label));
        let selections = Selections::new();

        let data = rows();
        let view = container.view(Some(&data), &selections).unwrap();
        let labels: Vec<&str> = view.iter().map(|d| d.item.label.as_str()).collect();
        assert_eq!(labels, vec!["alpha", "beta"]);
    }

    #[test]
    fn anonymous_container_still_decorates() {
        let container = RowContainer::<Row>::new();
        let selections = Selections::new();
        let data = rows();
        let view = container.view(Some(&data), &selections).unwrap();
        assert_eq!(view.len(), 2);
        assert!(view.iter().all(|d| !d.chosen && !d.selected));
    }

    #[test]
    #[should_panic(expected = "anonymous container")]
    fn anonymous_container_cannot_choose() {
        let container = RowContainer::<Row>::new();
        container.choose(Some(ItemId::new("a")));
    }

    #[test]
    fn tree_decoration_reaches_leaves() {
        let container = TreeContainer::named("tree");
        let mut selections = Selections::new();
        selections_reducer(&mut selections, container.select(ItemId::new("leaf")));

        let tree = TreeNode::with_children(
            ItemId::new("root"),
            "root",
            vec![TreeNode::leaf(ItemId::new("leaf"), "leaf")],
        );
        let view = container.view(Some(&tree), &selections).unwrap();
        assert!(!view.selected);
        assert!(view.children[0].selected);
    }

    #[test]
    fn tree_unresolved_views_as_none() {
        let container = TreeContainer::named("tree");
        let selections = Selections::new();
        assert!(container.view(None, &selections).is_none());
    }
}
