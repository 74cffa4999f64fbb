//! Selection metadata, keyed by container
//!
//! Which rows the user chose or marked is user-interface state, not entity
//! state. It lives in its own map keyed by container id, outlives the
//! entity caches, and survives a global reset.

use std::collections::{BTreeSet, HashMap};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::action::Action;
use crate::params::ItemId;

/// Identity of one container instance within the application
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContainerId(String);

impl ContainerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContainerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ContainerId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

/// User intent toward one container's selection state
#[derive(Clone, Debug, PartialEq)]
pub enum SelectionAction {
    /// Make this item the single chosen one, or clear the choice
    Choose {
        container: ContainerId,
        item: Option<ItemId>,
    },
    /// Add an item to the multi-selection
    Select {
        container: ContainerId,
        item: ItemId,
    },
    /// Remove an item from the multi-selection
    Deselect {
        container: ContainerId,
        item: ItemId,
    },
    /// Empty the multi-selection
    ClearSelected { container: ContainerId },
}

impl Action for SelectionAction {
    fn name(&self) -> &'static str {
        match self {
            SelectionAction::Choose { .. } => "Choose",
            SelectionAction::Select { .. } => "Select",
            SelectionAction::Deselect { .. } => "Deselect",
            SelectionAction::ClearSelected { .. } => "ClearSelected",
        }
    }
}

impl SelectionAction {
    /// The container this action addresses
    pub fn container(&self) -> &ContainerId {
        match self {
            SelectionAction::Choose { container, .. }
            | SelectionAction::Select { container, .. }
            | SelectionAction::Deselect { container, .. }
            | SelectionAction::ClearSelected { container } => container,
        }
    }
}

/// One container's choice metadata
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SelectionState {
    /// The single highlighted item, if any
    pub chosen: Option<ItemId>,
    /// The set of multi-selected items
    pub selected: BTreeSet<ItemId>,
}

impl SelectionState {
    pub fn is_chosen(&self, item: &ItemId) -> bool {
        self.chosen.as_ref() == Some(item)
    }

    pub fn is_selected(&self, item: &ItemId) -> bool {
        self.selected.contains(item)
    }
}

/// Selection metadata for all containers
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Selections {
    containers: HashMap<ContainerId, SelectionState>,
}

impl Selections {
    pub fn new() -> Self {
        Self::default()
    }

    /// State for a container; empty defaults when no action touched it yet
    pub fn get(&self, container: &ContainerId) -> Option<&SelectionState> {
        self.containers.get(container)
    }

    /// The chosen item in a container, if any
    pub fn chosen(&self, container: &ContainerId) -> Option<&ItemId> {
        self.get(container).and_then(|s| s.chosen.as_ref())
    }

    /// The selected set of a container; empty when untouched
    pub fn selected(&self, container: &ContainerId) -> BTreeSet<ItemId> {
        self.get(container)
            .map(|s| s.selected.clone())
            .unwrap_or_default()
    }
}

/// Reducer over [`Selections`]. Returns `false` for no-op transitions.
pub fn selections_reducer(state: &mut Selections, action: SelectionAction) -> bool {
    let slot = state
        .containers
        .entry(action.container().clone())
        .or_default();
    match action {
        SelectionAction::Choose { item, .. } => {
            if slot.chosen == item {
                false
            } else {
                slot.chosen = item;
                true
            }
        }
        SelectionAction::Select { item, .. } => slot.selected.insert(item),
        SelectionAction::Deselect { item, .. } => slot.selected.remove(&item),
        SelectionAction::ClearSelected { .. } => {
            if slot.selected.is_empty() {
                false
            } else {
                slot.selected.clear();
                true
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn container() -> ContainerId {
        ContainerId::new("compound-list")
    }

    #[test]
    fn choose_replaces_and_clears() {
        let mut state = Selections::new();

        assert!(selections_reducer(
            &mut state,
            SelectionAction::Choose {
                container: container(),
                item: Some(ItemId::new("a")),
            }
        ));
        assert_eq!(state.chosen(&container()), Some(&ItemId::new("a")));

        assert!(selections_reducer(
            &mut state,
            SelectionAction::Choose {
                container: container(),
                item: Some(ItemId::new("b")),
            }
        ));
        assert_eq!(state.chosen(&container()), Some(&ItemId::new("b")));

        assert!(selections_reducer(
            &mut state,
            SelectionAction::Choose {
                container: container(),
                item: None,
            }
        ));
        assert_eq!(state.chosen(&container()), None);
    }

    #[test]
    fn select_and_deselect_maintain_the_set() {
        let mut state = Selections::new();

        assert!(selections_reducer(
            &mut state,
            SelectionAction::Select {
                container: container(),
                item: ItemId::new("a"),
            }
        ));
        // Re-selecting the same item changes nothing.
        assert!(!selections_reducer(
            &mut state,
            SelectionAction::Select {
                container: container(),
                item: ItemId::new("a"),
            }
        ));
        assert!(selections_reducer(
            &mut state,
            SelectionAction::Select {
                container: container(),
                item: ItemId::new("b"),
            }
        ));
        assert_eq!(state.selected(&container()).len(), 2);

        assert!(selections_reducer(
            &mut state,
            SelectionAction::Deselect {
                container: container(),
                item: ItemId::new("a"),
            }
        ));
        assert!(!state
            .get(&container())
            .unwrap()
            .is_selected(&ItemId::new("a")));
    }

    #[test]
    fn containers_are_independent() {
        let mut state = Selections::new();
        let other = ContainerId::new("lex-unit-list");

        selections_reducer(
            &mut state,
            SelectionAction::Select {
                container: container(),
                item: ItemId::new("a"),
            },
        );
        assert!(state.selected(&other).is_empty());
        assert_eq!(state.selected(&container()).len(), 1);
    }

    #[test]
    fn clear_selected_empties_only_the_set() {
        let mut state = Selections::new();
        selections_reducer(
            &mut state,
            SelectionAction::Choose {
                container: container(),
                item: Some(ItemId::new("a")),
            },
        );
        selections_reducer(
            &mut state,
            SelectionAction::Select {
                container: container(),
                item: ItemId::new("b"),
            },
        );

        assert!(selections_reducer(
            &mut state,
            SelectionAction::ClearSelected {
                container: container()
            }
        ));
        assert!(state.selected(&container()).is_empty());
        assert_eq!(state.chosen(&container()), Some(&ItemId::new("a")));

        // Clearing an already-empty set is a no-op.
        assert!(!selections_reducer(
            &mut state,
            SelectionAction::ClearSelected {
                container: container()
            }
        ));
    }
}
