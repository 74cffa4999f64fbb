//! Query action families for row-oriented entity caches
//!
//! A [`QueryFamily`] bundles everything one entity cache needs to fetch:
//! an endpoint, a key derivation, and a normalization function. Its
//! [`run`](QueryFamily::run) orchestrator dispatches `Requested`, performs
//! exactly one GET, validates the response envelope, and dispatches exactly
//! one of `Returned` or `Failed`.
//!
//! Families never deduplicate requests. Callers that want at-most-one
//! fetch per parameter set put a [`QueryBinding`](crate::binding::QueryBinding)
//! in front.

use std::fmt::Debug;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio::sync::mpsc;

use crate::action::{Action, KeyedAction};
use crate::auth::AuthSignal;
use crate::client::Backend;
use crate::error::ApiError;
use crate::keyed::ByIdState;
use crate::params::{CacheKey, KeySpec, Params};
use crate::registry::ActionTypes;

/// Batch normalization from raw backend records to cache items.
///
/// Runs over the whole response at once so item identity may depend on
/// position or on the request parameters.
pub type Normalize<R, T> = fn(&Params, Vec<R>) -> Vec<T>;

/// Lifecycle action for one keyed fetch.
///
/// All three variants carry the derived cache key and the fetch ticket.
/// Tickets are minted per family in issue order; reducers use them to
/// drop responses that a newer request has already superseded.
#[derive(Clone, Debug, PartialEq)]
pub enum QueryAction<T> {
    /// A fetch for these parameters has started
    Requested {
        params: Params,
        key: CacheKey,
        ticket: u64,
    },
    /// The fetch resolved with normalized items
    Returned {
        params: Params,
        key: CacheKey,
        ticket: u64,
        items: Vec<T>,
    },
    /// The fetch failed
    Failed {
        params: Params,
        key: CacheKey,
        ticket: u64,
        error: ApiError,
    },
}

impl<T: Clone + Debug + Send + 'static> Action for QueryAction<T> {
    fn name(&self) -> &'static str {
        match self {
            QueryAction::Requested { .. } => "QueryRequested",
            QueryAction::Returned { .. } => "QueryReturned",
            QueryAction::Failed { .. } => "QueryFailed",
        }
    }
}

impl<T: Clone + Debug + Send + 'static> KeyedAction for QueryAction<T> {
    fn cache_key(&self) -> &CacheKey {
        match self {
            QueryAction::Requested { key, .. }
            | QueryAction::Returned { key, .. }
            | QueryAction::Failed { key, .. } => key,
        }
    }
}

impl<T> QueryAction<T> {
    /// The ticket minted when this fetch started
    pub fn ticket(&self) -> u64 {
        match self {
            QueryAction::Requested { ticket, .. }
            | QueryAction::Returned { ticket, .. }
            | QueryAction::Failed { ticket, .. } => *ticket,
        }
    }

    /// What this outcome says about authorization, if anything
    pub fn auth_signal(&self) -> Option<AuthSignal> {
        match self {
            QueryAction::Requested { .. } => None,
            QueryAction::Returned { .. } => Some(AuthSignal::Authorized),
            QueryAction::Failed { error, .. } if error.is_unauthorized() => {
                Some(AuthSignal::Unauthorized)
            }
            QueryAction::Failed { .. } => None,
        }
    }
}

/// One entity cache's fetch configuration.
pub struct QueryFamily<R, T> {
    types: ActionTypes,
    endpoint: &'static str,
    key_spec: KeySpec,
    normalize: Normalize<R, T>,
    seq: AtomicU64,
}

impl<R, T> Debug for QueryFamily<R, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryFamily")
            .field("prefix", &self.types.prefix())
            .field("endpoint", &self.endpoint)
            .finish()
    }
}

impl<R, T> QueryFamily<R, T>
where
    R: DeserializeOwned,
    T: Clone + Debug + Send + 'static,
{
    /// Create a family with a unique action-name prefix.
    ///
    /// # Panics
    ///
    /// Panics if the prefix mints duplicate action names, which cannot
    /// happen with the fixed lifecycle name set used here.
    pub fn new(
        prefix: &'static str,
        endpoint: &'static str,
        key_spec: KeySpec,
        normalize: Normalize<R, T>,
    ) -> Self {
        Self {
            types: ActionTypes::new(prefix, &["REQUESTED", "RETURNED", "FAILED"]),
            endpoint,
            key_spec,
            normalize,
            seq: AtomicU64::new(1),
        }
    }

    /// The endpoint this family fetches from
    pub fn endpoint(&self) -> &'static str {
        self.endpoint
    }

    /// Minted action-type names for this family's log output
    pub fn types(&self) -> &ActionTypes {
        &self.types
    }

    /// Derive the cache key these parameters address.
    ///
    /// # Panics
    ///
    /// Panics if a key field is missing, see [`KeySpec::derive`].
    pub fn cache_key(&self, params: &Params) -> CacheKey {
        self.key_spec.derive(params)
    }

    /// Mint the next fetch ticket
    pub fn ticket(&self) -> u64 {
        self.seq.fetch_add(1, Ordering::Relaxed)
    }

    /// Build a `Requested` action for the given fetch
    pub fn requested(&self, params: Params, ticket: u64) -> QueryAction<T> {
        let key = self.cache_key(&params);
        QueryAction::Requested {
            params,
            key,
            ticket,
        }
    }

    /// Build a `Returned` action carrying normalized items
    pub fn returned(&self, params: Params, ticket: u64, items: Vec<T>) -> QueryAction<T> {
        let key = self.cache_key(&params);
        QueryAction::Returned {
            params,
            key,
            ticket,
            items,
        }
    }

    /// Build a `Failed` action carrying the fetch error
    pub fn failed(&self, params: Params, ticket: u64, error: ApiError) -> QueryAction<T> {
        let key = self.cache_key(&params);
        QueryAction::Failed {
            params,
            key,
            ticket,
            error,
        }
    }

    /// Run one fetch to completion.
    ///
    /// `Requested` is dispatched before the first await, so within one call
    /// it always precedes the terminal action. Exactly one of `Returned`
    /// or `Failed` follows.
    pub async fn run<B: Backend>(
        &self,
        backend: &B,
        params: Params,
        dispatch: impl Fn(QueryAction<T>),
    ) {
        let ticket = self.ticket();
        let key = self.cache_key(&params);
        tracing::debug!(
            family = self.types.prefix(),
            key = %key,
            ticket,
            "query requested"
        );
        dispatch(self.requested(params.clone(), ticket));

        match self.fetch(backend, &params).await {
            Ok(items) => {
                tracing::debug!(
                    family = self.types.prefix(),
                    key = %key,
                    ticket,
                    count = items.len(),
                    "query returned"
                );
                dispatch(self.returned(params, ticket, items));
            }
            Err(error) => {
                tracing::warn!(
                    family = self.types.prefix(),
                    key = %key,
                    ticket,
                    error = %error,
                    "query failed"
                );
                dispatch(self.failed(params, ticket, error));
            }
        }
    }

    async fn fetch<B: Backend>(&self, backend: &B, params: &Params) -> Result<Vec<T>, ApiError> {
        let body = backend.get(self.endpoint, params).await?;
        let raw = decode_envelope::<R>(self.endpoint, body)?;
        Ok((self.normalize)(params, raw))
    }
}

/// Extract the `data` array from a response envelope and decode each record.
///
/// A 2xx response whose body is not `{"data": [...]}` counts as a failed
/// fetch; backends that error in-band with 200 still surface as errors.
pub fn decode_envelope<R: DeserializeOwned>(
    endpoint: &str,
    body: Value,
) -> Result<Vec<R>, ApiError> {
    let data = body
        .get("data")
        .and_then(Value::as_array)
        .ok_or_else(|| ApiError::Malformed {
            endpoint: endpoint.to_owned(),
            message: "body has no \"data\" array".into(),
        })?
        .clone();

    data.into_iter()
        .map(|record| {
            serde_json::from_value(record).map_err(|err| ApiError::Malformed {
                endpoint: endpoint.to_owned(),
                message: err.to_string(),
            })
        })
        .collect()
}

/// Spawn a family fetch as a background task.
///
/// Actions travel back over the channel in dispatch order, so the
/// `Requested`/terminal ordering survives the hop across tasks. `wrap`
/// lifts the family's action into the application action type.
pub fn spawn_query<R, T, B, A>(
    family: Arc<QueryFamily<R, T>>,
    backend: Arc<B>,
    params: Params,
    tx: mpsc::UnboundedSender<A>,
    wrap: fn(QueryAction<T>) -> A,
) -> tokio::task::JoinHandle<()>
where
    R: DeserializeOwned + Send + Sync + 'static,
    T: Clone + Debug + Send + Sync + 'static,
    B: Backend + 'static,
    A: Action,
{
    tokio::spawn(async move {
        family
            .run(backend.as_ref(), params, move |action| {
                let _ = tx.send(wrap(action));
            })
            .await;
    })
}

/// Per-key cache slice for row-oriented entities.
///
/// `items == None` means no fetch has resolved yet; `Some(vec![])` means
/// the backend answered with zero rows. Collaborators treat the two the
/// same way they treat an absent key versus an empty slice.
#[derive(Clone, Debug, PartialEq)]
pub struct QuerySlice<T> {
    fetching: bool,
    items: Option<Vec<T>>,
    error: Option<ApiError>,
    last_ticket: u64,
}

impl<T> Default for QuerySlice<T> {
    fn default() -> Self {
        Self {
            fetching: false,
            items: None,
            error: None,
            last_ticket: 0,
        }
    }
}

impl<T> QuerySlice<T> {
    /// Resolved rows, if any fetch has completed
    pub fn rows(&self) -> Option<&[T]> {
        self.items.as_deref()
    }

    /// Whether a fetch is in flight
    pub fn is_fetching(&self) -> bool {
        self.fetching
    }

    /// Error from the most recent failed fetch
    pub fn error(&self) -> Option<&ApiError> {
        self.error.as_ref()
    }
}

/// Reducer for one [`QuerySlice`]; pair with [`ById`](crate::keyed::ById)
/// to serve a whole keyed cache.
///
/// A `Requested` keeps previously resolved rows visible while the refetch
/// runs. Terminal actions whose ticket is older than the newest observed
/// `Requested` are dropped, so a slow stale response cannot overwrite
/// fresher data.
pub fn query_slice_reducer<T: Clone + Debug + Send + 'static>(
    slice: &mut QuerySlice<T>,
    action: QueryAction<T>,
) -> bool {
    match action {
        QueryAction::Requested { ticket, .. } => {
            if ticket < slice.last_ticket {
                return false;
            }
            slice.last_ticket = ticket;
            slice.fetching = true;
            slice.error = None;
            true
        }
        QueryAction::Returned { ticket, items, .. } => {
            if ticket < slice.last_ticket {
                return false;
            }
            slice.fetching = false;
            slice.error = None;
            slice.items = Some(items);
            true
        }
        QueryAction::Failed { ticket, error, .. } => {
            if ticket < slice.last_ticket {
                return false;
            }
            slice.fetching = false;
            slice.error = Some(error);
            true
        }
    }
}

impl<T> ByIdState<QuerySlice<T>> {
    /// Resolved rows under a key, if that fetch has completed
    pub fn rows(&self, key: &CacheKey) -> Option<&[T]> {
        self.get(key).and_then(QuerySlice::rows)
    }

    /// Whether a fetch for the key is in flight
    pub fn is_fetching(&self, key: &CacheKey) -> bool {
        self.get(key).is_some_and(QuerySlice::is_fetching)
    }

    /// Error stored under the key, if the latest fetch failed
    pub fn key_error(&self, key: &CacheKey) -> Option<&ApiError> {
        self.get(key).and_then(QuerySlice::error)
    }
}
