//! Demo state: the library's application state plus the search cache

use lex_dispatch::{
    query_slice_reducer, Action, ById, ByIdState, QueryAction, QuerySlice, SimpleAction,
};
use lex_dispatch_entities::app::{app_reducer, AppAction, AppState};
use lex_dispatch_entities::prelude::{Compound, ConRel, LexUnit, PathStep, SynsetInfo};

use crate::synsets::Synset;

#[derive(Clone, Debug, Default)]
pub struct DemoState {
    pub synsets: ByIdState<QuerySlice<Synset>>,
    pub app: AppState,
}

#[derive(Action, Clone, Debug)]
pub enum DemoAction {
    Synsets(QueryAction<Synset>),
    App(AppAction),
}

pub fn demo_reducer(state: &mut DemoState, action: DemoAction) -> bool {
    match action {
        DemoAction::Synsets(inner) => {
            let auth = state.app.auth.observe_opt(inner.auth_signal());
            let changed =
                ById::new(query_slice_reducer::<Synset>).reduce(&mut state.synsets, inner);
            auth | changed
        }
        DemoAction::App(inner) => app_reducer(&mut state.app, inner),
    }
}

// fn-pointer lifters for spawn_query / spawn_simple
pub fn lex_units_action(action: QueryAction<LexUnit>) -> DemoAction {
    DemoAction::App(AppAction::LexUnits(action))
}

pub fn con_rels_action(action: QueryAction<ConRel>) -> DemoAction {
    DemoAction::App(AppAction::ConRels(action))
}

pub fn compounds_action(action: QueryAction<Compound>) -> DemoAction {
    DemoAction::App(AppAction::Compounds(action))
}

pub fn paths_action(action: QueryAction<PathStep>) -> DemoAction {
    DemoAction::App(AppAction::Paths(action))
}

pub fn synset_info_action(action: SimpleAction<SynsetInfo>) -> DemoAction {
    DemoAction::App(AppAction::SynsetInfo(action))
}

#[cfg(test)]
mod tests {
    use super::*;
    use lex_dispatch::{ItemId, Params};

    #[test]
    fn search_results_and_entity_caches_stay_separate() {
        let family = crate::synsets::family();
        let mut state = DemoState::default();
        let params = Params::new().with("word", "run");
        let ticket = family.ticket();

        demo_reducer(
            &mut state,
            DemoAction::Synsets(family.returned(
                params.clone(),
                ticket,
                vec![Synset {
                    id: ItemId::new("s1"),
                    word_category: None,
                    orth_forms: vec!["run".into()],
                }],
            )),
        );

        let key = family.cache_key(&params);
        assert_eq!(state.synsets.rows(&key).map(<[Synset]>::len), Some(1));
        assert!(state.app.lex_units.is_empty());
    }

    #[test]
    fn app_actions_route_through_the_library_reducer() {
        let mut state = DemoState::default();
        let changed = demo_reducer(&mut state, DemoAction::App(AppAction::Reset));
        assert!(changed);
    }
}
