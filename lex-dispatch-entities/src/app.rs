//! Application state and top-level reducer
//!
//! One keyed cache per entity, plus the cross-cutting pieces: selection
//! metadata, the authorization flag, and a global reset. The reducer
//! routes each action variant to exactly one cache; the other caches
//! never see it.
//!
//! Authorization is observed on every fetch outcome before the cache
//! update, so a 401 flips the flag even when the fence drops the
//! terminal action as stale.

use lex_dispatch::{
    query_slice_reducer, selections_reducer, simple_reducer, Action, AuthState, ById, ByIdState,
    QueryAction, QuerySlice, Selections, SelectionAction, SimpleAction, SimpleApiState,
};

use crate::compounds::Compound;
use crate::con_rels::ConRel;
use crate::lex_units::LexUnit;
use crate::paths::PathStep;
use crate::synset_info::SynsetInfo;

/// The whole application state
#[derive(Clone, Debug, Default)]
pub struct AppState {
    pub compounds: ByIdState<QuerySlice<Compound>>,
    pub con_rels: ByIdState<QuerySlice<ConRel>>,
    pub lex_units: ByIdState<QuerySlice<LexUnit>>,
    pub paths: ByIdState<QuerySlice<PathStep>>,
    pub synset_info: SimpleApiState<SynsetInfo>,
    pub selections: Selections,
    pub auth: AuthState,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Every action the application dispatches
#[derive(Action, Clone, Debug)]
pub enum AppAction {
    Compounds(QueryAction<Compound>),
    ConRels(QueryAction<ConRel>),
    LexUnits(QueryAction<LexUnit>),
    Paths(QueryAction<PathStep>),
    SynsetInfo(SimpleAction<SynsetInfo>),
    Selection(SelectionAction),
    /// Drop all entity caches; selections and the auth flag survive
    Reset,
}

/// Top-level reducer; routes each variant to its own cache.
pub fn app_reducer(state: &mut AppState, action: AppAction) -> bool {
    match action {
        AppAction::Compounds(inner) => {
            let auth = state.auth.observe_opt(inner.auth_signal());
            let changed =
                ById::new(query_slice_reducer::<Compound>).reduce(&mut state.compounds, inner);
            auth | changed
        }
        AppAction::ConRels(inner) => {
            let auth = state.auth.observe_opt(inner.auth_signal());
            let changed =
                ById::new(query_slice_reducer::<ConRel>).reduce(&mut state.con_rels, inner);
            auth | changed
        }
        AppAction::LexUnits(inner) => {
            let auth = state.auth.observe_opt(inner.auth_signal());
            let changed =
                ById::new(query_slice_reducer::<LexUnit>).reduce(&mut state.lex_units, inner);
            auth | changed
        }
        AppAction::Paths(inner) => {
            let auth = state.auth.observe_opt(inner.auth_signal());
            let changed =
                ById::new(query_slice_reducer::<PathStep>).reduce(&mut state.paths, inner);
            auth | changed
        }
        AppAction::SynsetInfo(inner) => {
            let auth = state.auth.observe_opt(inner.auth_signal());
            let changed = simple_reducer(&mut state.synset_info, inner);
            auth | changed
        }
        AppAction::Selection(inner) => selections_reducer(&mut state.selections, inner),
        AppAction::Reset => {
            state.compounds = ByIdState::new();
            state.con_rels = ByIdState::new();
            state.lex_units = ByIdState::new();
            state.paths = ByIdState::new();
            state.synset_info = SimpleApiState::new();
            true
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{compounds, con_rels, synset_info};
    use lex_dispatch::{ApiError, CacheKey, ContainerId, ItemId, Params, Store};

    fn compound(id: &str) -> Compound {
        Compound {
            id: ItemId::new(id),
            splits: Some(true),
            modifier: Some("house".into()),
            head: Some("cat".into()),
        }
    }

    fn store() -> Store<AppState, AppAction> {
        Store::new(AppState::new(), app_reducer)
    }

    #[test]
    fn actions_reach_only_their_own_cache() {
        let mut store = store();
        let family = compounds::family();
        let params = Params::new().with("lexUnitId", "l1");
        let ticket = family.ticket();

        store.dispatch(AppAction::Compounds(
            family.requested(params.clone(), ticket),
        ));
        store.dispatch(AppAction::Compounds(family.returned(
            params,
            ticket,
            vec![compound("c1")],
        )));

        let state = store.state();
        let key = CacheKey::new("l1");
        assert_eq!(state.compounds.rows(&key).map(<[Compound]>::len), Some(1));
        assert!(state.con_rels.is_empty());
        assert!(state.lex_units.is_empty());
        assert!(state.paths.is_empty());
    }

    #[test]
    fn reset_drops_caches_but_not_selections() {
        let mut store = store();
        let family = compounds::family();
        let params = Params::new().with("lexUnitId", "l1");
        let ticket = family.ticket();
        store.dispatch(AppAction::Compounds(family.returned(
            params,
            ticket,
            vec![compound("c1")],
        )));

        let container = ContainerId::new("compound-list");
        store.dispatch(AppAction::Selection(SelectionAction::Select {
            container: container.clone(),
            item: ItemId::new("c1"),
        }));
        store
            .state_mut()
            .auth
            .observe(lex_dispatch::AuthSignal::Unauthorized);

        assert!(store.dispatch(AppAction::Reset));

        let state = store.state();
        assert!(state.compounds.is_empty());
        assert_eq!(state.synset_info.data(&CacheKey::new("s1")), None);
        // Selection metadata and the auth flag outlive the caches.
        assert_eq!(state.selections.selected(&container).len(), 1);
        assert!(state.auth.required);
    }

    #[test]
    fn unauthorized_failure_raises_the_auth_flag() {
        let mut store = store();
        let family = con_rels::family();
        let params = Params::new().with("synsetId", "s1");
        let ticket = family.ticket();

        let changed = store.dispatch(AppAction::ConRels(family.failed(
            params,
            ticket,
            ApiError::Unauthorized,
        )));
        assert!(changed);
        assert!(store.state().auth.required);

        // A later success on any family clears it again.
        let info_family = synset_info::family();
        let info_params = Params::new().with("synsetId", "s1");
        store.dispatch(AppAction::SynsetInfo(info_family.returned(
            info_params,
            SynsetInfo {
                word_category: None,
                word_class: None,
                definition: Some("a feline".into()),
                all_orth_forms: vec![],
            },
        )));
        assert!(!store.state().auth.required);
    }

    #[test]
    fn stale_unauthorized_response_still_flips_the_flag() {
        let mut store = store();
        let family = compounds::family();
        let params = Params::new().with("lexUnitId", "l1");

        let t1 = family.ticket();
        let t2 = family.ticket();
        store.dispatch(AppAction::Compounds(
            family.requested(params.clone(), t2),
        ));

        // The fence drops the stale terminal, but the 401 is still evidence.
        let changed = store.dispatch(AppAction::Compounds(family.failed(
            params,
            t1,
            ApiError::Unauthorized,
        )));
        assert!(changed);
        assert!(store.state().auth.required);
        assert!(store
            .state()
            .compounds
            .key_error(&CacheKey::new("l1"))
            .is_none());
    }

    #[test]
    fn action_names_follow_the_variants() {
        let family = compounds::family();
        let action = AppAction::Compounds(family.requested(
            Params::new().with("lexUnitId", "l1"),
            family.ticket(),
        ));
        assert_eq!(action.name(), "Compounds");
        assert_eq!(AppAction::Reset.name(), "Reset");
    }
}
