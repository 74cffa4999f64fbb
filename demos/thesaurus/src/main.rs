//! Thesaurus CLI - lex-dispatch example
//!
//! This example demonstrates the full lex-dispatch pattern:
//! 1. Form input validates into request parameters
//! 2. Bindings decide which fetches are due
//! 3. Fetch tasks send lifecycle actions back over the channel
//! 4. The store reduces them into keyed entity caches
//! 5. Containers decorate cached rows and trees for display
//!
//! # Usage
//!
//! ```sh
//! # Search a word and inspect the first hit
//! cargo run -p thesaurus-demo -- run
//!
//! # Pick a synset explicitly and ask for a relation path
//! cargo run -p thesaurus-demo -- run --synset-id s42 --path-to s7
//! ```

mod state;
mod synsets;

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use lex_dispatch::{
    spawn_query, spawn_simple, ApiClient, CacheKey, ContainerId, DecoratedTree, ItemId,
    LoggingMiddleware, Params, QueryBinding, RowContainer, SearchHistory, StoreWithMiddleware,
    TreeContainer,
};
use lex_dispatch_entities::app::AppAction;
use lex_dispatch_entities::prelude::{LexUnit, SearchForm};
use lex_dispatch_entities::{compounds, con_rels, lex_units, paths, synset_info};
use tokio::sync::mpsc;

use crate::state::{demo_reducer, DemoAction, DemoState};
use crate::synsets::Synset;

/// Thesaurus CLI - lex-dispatch framework example
#[derive(Parser, Debug)]
#[command(name = "thesaurus")]
#[command(about = "Browse a lexical-semantic REST backend from the terminal")]
struct Args {
    /// Word to search for
    word: String,

    /// Restrict the search to a word category
    #[arg(long, short)]
    category: Option<String>,

    /// Match case-insensitively
    #[arg(long, short)]
    ignore_case: bool,

    /// Base URL of the REST backend
    #[arg(long, default_value = "http://localhost:8080/api")]
    base_url: String,

    /// Inspect this synset instead of the first search hit
    #[arg(long)]
    synset_id: Option<String>,

    /// Also fetch the relation path from the inspected synset to this one
    #[arg(long)]
    path_to: Option<String>,

    /// Directory for search-history files
    #[arg(long)]
    history_dir: Option<PathBuf>,

    /// Log dispatched actions and fetches
    #[arg(long, short)]
    verbose: bool,
}

type DemoStore = StoreWithMiddleware<DemoState, DemoAction, LoggingMiddleware>;

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    let level = if args.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt().with_max_level(level).init();

    let form = SearchForm {
        word: args.word.clone(),
        category: args.category.clone(),
        ignore_case: args.ignore_case,
    };
    let params = match form.validate() {
        Ok(params) => params,
        Err(err) => {
            eprintln!("invalid search: {err}");
            return ExitCode::from(2);
        }
    };

    let backend = Arc::new(ApiClient::new(&args.base_url));
    let mut store = DemoStore::new(DemoState::default(), demo_reducer, LoggingMiddleware::new());
    let (tx, mut rx) = mpsc::unbounded_channel();

    // ===== Word search =====
    let synsets_family = Arc::new(synsets::family());
    let mut search_binding = QueryBinding::new();
    if let Some(due) = search_binding.sync(&synsets_family, Some(params.clone()), &store.state().synsets)
    {
        let _ = spawn_query(
            synsets_family.clone(),
            backend.clone(),
            due,
            tx.clone(),
            DemoAction::Synsets,
        )
        .await;
    }
    drain(&mut store, &mut rx);

    if store.state().app.auth.required {
        eprintln!("the backend requires authorization");
        return ExitCode::FAILURE;
    }

    let search_key = synsets_family.cache_key(&params);
    if let Some(error) = store.state().synsets.key_error(&search_key) {
        eprintln!("search failed: {error}");
        return ExitCode::FAILURE;
    }
    let results: Vec<Synset> = store
        .state()
        .synsets
        .rows(&search_key)
        .unwrap_or(&[])
        .to_vec();

    record_history(&args, &params, results.len());

    let Some(synset_id) = args
        .synset_id
        .clone()
        .or_else(|| results.first().map(|s| s.id.as_str().to_owned()))
    else {
        println!("no synsets found for {:?}", args.word);
        return ExitCode::SUCCESS;
    };

    let results_container = RowContainer::<Synset>::named("word-search")
        .with_order(|a, b| a.item.orth_forms.cmp(&b.item.orth_forms));
    store.dispatch(DemoAction::App(AppAction::Selection(
        results_container.choose(Some(ItemId::new(synset_id.clone()))),
    )));
    print_search_results(&store, &results_container, &search_key);

    // ===== Entity fetches for the inspected synset =====
    let synset_params = Params::new().with("synsetId", synset_id.clone());
    let lex_units_family = Arc::new(lex_units::family());
    let con_rels_family = Arc::new(con_rels::family());
    let info_family = Arc::new(synset_info::family());
    let paths_family = Arc::new(paths::family());

    let mut handles = Vec::new();
    let mut lex_units_binding = QueryBinding::new();
    if let Some(due) = lex_units_binding.sync(
        &lex_units_family,
        Some(synset_params.clone()),
        &store.state().app.lex_units,
    ) {
        handles.push(spawn_query(
            lex_units_family.clone(),
            backend.clone(),
            due,
            tx.clone(),
            state::lex_units_action,
        ));
    }
    let mut con_rels_binding = QueryBinding::new();
    if let Some(due) = con_rels_binding.sync(
        &con_rels_family,
        Some(synset_params.clone()),
        &store.state().app.con_rels,
    ) {
        handles.push(spawn_query(
            con_rels_family.clone(),
            backend.clone(),
            due,
            tx.clone(),
            state::con_rels_action,
        ));
    }
    handles.push(spawn_simple(
        info_family.clone(),
        backend.clone(),
        synset_params.clone(),
        tx.clone(),
        state::synset_info_action,
    ));

    let path_params = args.path_to.as_ref().map(|to| {
        Params::new()
            .with("fromSynsetId", synset_id.clone())
            .with("toSynsetId", to)
    });
    if let Some(path_params) = &path_params {
        let mut binding = QueryBinding::new();
        if let Some(due) = binding.sync(
            &paths_family,
            Some(path_params.clone()),
            &store.state().app.paths,
        ) {
            handles.push(spawn_query(
                paths_family.clone(),
                backend.clone(),
                due,
                tx.clone(),
                state::paths_action,
            ));
        }
    }
    for handle in handles {
        let _ = handle.await;
    }
    drain(&mut store, &mut rx);

    // ===== Compounds for the synset's first lexical unit =====
    let synset_key = CacheKey::new(synset_id.clone());
    let first_lex_unit = store
        .state()
        .app
        .lex_units
        .rows(&synset_key)
        .and_then(<[LexUnit]>::first)
        .map(|unit| unit.id.as_str().to_owned());
    let compounds_family = Arc::new(compounds::family());
    if let Some(lex_unit_id) = &first_lex_unit {
        let compound_params = Params::new().with("lexUnitId", lex_unit_id.clone());
        let mut binding = QueryBinding::new();
        if let Some(due) = binding.sync(
            &compounds_family,
            Some(compound_params.clone()),
            &store.state().app.compounds,
        ) {
            let _ = spawn_query(
                compounds_family.clone(),
                backend.clone(),
                due,
                tx.clone(),
                state::compounds_action,
            )
            .await;
        }
        drain(&mut store, &mut rx);
    }

    print_report(&store, &synset_id, first_lex_unit.as_deref());
    if let Some(path_params) = &path_params {
        print_path(&store, &paths_family, path_params);
    }

    if store.state().app.auth.required {
        eprintln!("the backend requires authorization");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

/// Dispatch every action the fetch tasks have sent so far.
fn drain(store: &mut DemoStore, rx: &mut mpsc::UnboundedReceiver<DemoAction>) {
    while let Ok(action) = rx.try_recv() {
        store.dispatch(action);
    }
}

fn record_history(args: &Args, params: &Params, num_results: usize) {
    let dir = args
        .history_dir
        .clone()
        .or_else(|| dirs::data_dir().map(|d| d.join("thesaurus")));
    let Some(dir) = dir else {
        return;
    };
    let history = SearchHistory::new(dir, &ContainerId::new("word-search"));
    if let Err(err) = history.record(params.clone(), num_results) {
        tracing::warn!(error = %err, "could not record search history");
    }
}

fn print_search_results(store: &DemoStore, container: &RowContainer<Synset>, key: &CacheKey) {
    let state = store.state();
    let Some(view) = container.view(state.synsets.rows(key), &state.app.selections) else {
        return;
    };
    println!("search results ({}):", view.len());
    for row in view {
        let marker = if row.chosen { ">" } else { " " };
        let category = row.item.word_category.as_deref().unwrap_or("-");
        println!(
            "{marker} {}  [{category}]  {}",
            row.item.id,
            row.item.orth_forms.join(", ")
        );
    }
    println!();
}

fn print_report(store: &DemoStore, synset_id: &str, first_lex_unit: Option<&str>) {
    let state = store.state();
    let synset_key = CacheKey::new(synset_id);

    println!("synset {synset_id}");
    let info = state.app.synset_info.data(&synset_key);
    let root_name = match info {
        Some(info) => {
            if let Some(category) = &info.word_category {
                println!("  category: {category}");
            }
            if let Some(definition) = &info.definition {
                println!("  definition: {definition}");
            }
            if info.all_orth_forms.is_empty() {
                synset_id.to_owned()
            } else {
                info.all_orth_forms.join(", ")
            }
        }
        None => {
            if let Some(error) = state.app.synset_info.error(&synset_key) {
                println!("  info unavailable: {error}");
            }
            synset_id.to_owned()
        }
    };

    let units_container = RowContainer::<LexUnit>::named("lex-units")
        .with_order(|a, b| a.item.orth_form.cmp(&b.item.orth_form));
    match units_container.view(state.app.lex_units.rows(&synset_key), &state.app.selections) {
        Some(view) => {
            println!("  lexical units ({}):", view.len());
            for row in view {
                let mut notes = Vec::new();
                if let Some(sense) = row.item.sense {
                    notes.push(format!("sense {sense}"));
                }
                if row.item.named_entity {
                    notes.push("named entity".to_owned());
                }
                if row.item.artificial {
                    notes.push("artificial".to_owned());
                }
                let notes = if notes.is_empty() {
                    String::new()
                } else {
                    format!("  ({})", notes.join(", "))
                };
                println!("    {}  {}{notes}", row.item.id, row.item.orth_form);
            }
        }
        None => {
            if let Some(error) = state.app.lex_units.key_error(&synset_key) {
                println!("  lexical units unavailable: {error}");
            }
        }
    }

    if let Some(lex_unit_id) = first_lex_unit {
        let compound_key = CacheKey::new(lex_unit_id);
        let container = RowContainer::new();
        if let Some(view) = container.view(state.app.compounds.rows(&compound_key), &state.app.selections)
        {
            println!("  compounds of {lex_unit_id} ({}):", view.len());
            for row in view {
                let modifier = row.item.modifier.as_deref().unwrap_or("?");
                let head = row.item.head.as_deref().unwrap_or("?");
                let splits = match row.item.splits {
                    Some(true) => "splits",
                    Some(false) => "does not split",
                    None => "split unknown",
                };
                println!("    {}  {modifier} + {head}  ({splits})", row.item.id);
            }
        }
    }

    let tree_container = TreeContainer::named("relation-tree");
    let selected = state.app.selections.selected(&ContainerId::new("relation-tree"));
    let hypernyms = con_rels::hypernym_tree(&state.app.con_rels, synset_id, &root_name, &selected);
    if let Some(view) = tree_container.view(Some(&hypernyms), &state.app.selections) {
        println!("  hypernyms:");
        print_tree(&view, 2);
    }
    let hyponyms = con_rels::hyponym_tree(&state.app.con_rels, synset_id, &root_name, &selected);
    if let Some(view) = tree_container.view(Some(&hyponyms), &state.app.selections) {
        println!("  hyponyms:");
        print_tree(&view, 2);
    }
}

fn print_tree(node: &DecoratedTree, depth: usize) {
    let indent = "  ".repeat(depth);
    let marker = if node.selected { "*" } else { " " };
    println!("{indent}{marker} {}  {}", node.id, node.name);
    for child in &node.children {
        print_tree(child, depth + 1);
    }
}

fn print_path(
    store: &DemoStore,
    family: &lex_dispatch::QueryFamily<paths::RawPathStep, paths::PathStep>,
    params: &Params,
) {
    let state = store.state();
    let key = family.cache_key(params);
    match state.app.paths.rows(&key) {
        Some(steps) => {
            println!("  path ({} steps):", steps.len());
            for step in steps {
                println!("    {}  {}", step.synset_id, step.orth_forms.join(", "));
            }
        }
        None => {
            if let Some(error) = state.app.paths.key_error(&key) {
                println!("  path unavailable: {error}");
            }
        }
    }
}
