//! Integration tests for #[derive(Action)]

use lex_dispatch::{Action, Params, QueryAction};

#[derive(lex_dispatch::Action, Clone, Debug)]
enum AppAction {
    Reset,
    Tick(u32),
    SearchSubmitted { params: Params },
    #[action(name = "AUTH_CHECK")]
    AuthCheck,
}

#[test]
fn unit_variant_uses_its_ident() {
    assert_eq!(AppAction::Reset.name(), "Reset");
}

#[test]
fn tuple_and_struct_variants_work() {
    assert_eq!(AppAction::Tick(3).name(), "Tick");
    assert_eq!(
        AppAction::SearchSubmitted {
            params: Params::new()
        }
        .name(),
        "SearchSubmitted"
    );
}

#[test]
fn name_attribute_overrides_the_ident() {
    assert_eq!(AppAction::AuthCheck.name(), "AUTH_CHECK");
}

#[derive(lex_dispatch::Action, Clone, Debug)]
enum WrappedAction {
    Compounds(QueryAction<String>),
}

#[test]
fn derived_enums_can_wrap_query_actions() {
    let inner = QueryAction::Requested {
        params: Params::new().with("lexUnitId", "l1"),
        key: "l1".into(),
        ticket: 1,
    };
    assert_eq!(WrappedAction::Compounds(inner).name(), "Compounds");
}
