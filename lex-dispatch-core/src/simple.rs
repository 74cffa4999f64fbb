//! Simple API reducer for single-value entities
//!
//! Row caches track items per key; some entities are just one value per
//! key (a synset's info record, for example). The simple reducer stores
//! the whole response body verbatim under the key, with a separate
//! request-status map. The latest response for a key wins, whatever its
//! issue order.

use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use tokio::sync::mpsc;

use crate::action::{Action, KeyedAction};
use crate::auth::AuthSignal;
use crate::client::Backend;
use crate::error::ApiError;
use crate::params::{CacheKey, KeySpec, Params};
use crate::registry::ActionTypes;

/// Lifecycle action for a single-value fetch
#[derive(Clone, Debug, PartialEq)]
pub enum SimpleAction<T> {
    Requested {
        params: Params,
        key: CacheKey,
    },
    Returned {
        params: Params,
        key: CacheKey,
        data: T,
    },
    Failed {
        params: Params,
        key: CacheKey,
        error: ApiError,
    },
}

impl<T: Clone + Debug + Send + 'static> Action for SimpleAction<T> {
    fn name(&self) -> &'static str {
        match self {
            SimpleAction::Requested { .. } => "SimpleRequested",
            SimpleAction::Returned { .. } => "SimpleReturned",
            SimpleAction::Failed { .. } => "SimpleFailed",
        }
    }
}

impl<T: Clone + Debug + Send + 'static> KeyedAction for SimpleAction<T> {
    fn cache_key(&self) -> &CacheKey {
        match self {
            SimpleAction::Requested { key, .. }
            | SimpleAction::Returned { key, .. }
            | SimpleAction::Failed { key, .. } => key,
        }
    }
}

impl<T> SimpleAction<T> {
    /// What this outcome says about authorization, if anything
    pub fn auth_signal(&self) -> Option<AuthSignal> {
        match self {
            SimpleAction::Requested { .. } => None,
            SimpleAction::Returned { .. } => Some(AuthSignal::Authorized),
            SimpleAction::Failed { error, .. } if error.is_unauthorized() => {
                Some(AuthSignal::Unauthorized)
            }
            SimpleAction::Failed { .. } => None,
        }
    }
}

/// Status of the most recent request under a key
#[derive(Clone, Debug, PartialEq)]
pub enum RequestStatus {
    Fetching { params: Params },
    Done,
    Failed { params: Params, error: ApiError },
}

/// Two maps keyed the same way: request status and resolved data.
///
/// Data survives a later failure for the same key; the status map records
/// the failure while the stale value stays readable.
#[derive(Clone, Debug)]
pub struct SimpleApiState<T> {
    requests: HashMap<CacheKey, RequestStatus>,
    data: HashMap<CacheKey, T>,
}

impl<T> Default for SimpleApiState<T> {
    fn default() -> Self {
        Self {
            requests: HashMap::new(),
            data: HashMap::new(),
        }
    }
}

impl<T> SimpleApiState<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolved value under the key, if any fetch ever succeeded
    pub fn data(&self, key: &CacheKey) -> Option<&T> {
        self.data.get(key)
    }

    /// Whether a fetch for the key is in flight
    pub fn is_fetching(&self, key: &CacheKey) -> bool {
        matches!(self.requests.get(key), Some(RequestStatus::Fetching { .. }))
    }

    /// Error under the key, if the most recent fetch failed
    pub fn error(&self, key: &CacheKey) -> Option<&ApiError> {
        match self.requests.get(key) {
            Some(RequestStatus::Failed { error, .. }) => Some(error),
            _ => None,
        }
    }
}

/// Reducer over [`SimpleApiState`]. Latest response for a key wins.
pub fn simple_reducer<T: Clone + Debug + Send + 'static>(
    state: &mut SimpleApiState<T>,
    action: SimpleAction<T>,
) -> bool {
    match action {
        SimpleAction::Requested { params, key } => {
            state
                .requests
                .insert(key, RequestStatus::Fetching { params });
            true
        }
        SimpleAction::Returned { key, data, .. } => {
            state.requests.insert(key.clone(), RequestStatus::Done);
            state.data.insert(key, data);
            true
        }
        SimpleAction::Failed { params, key, error } => {
            state
                .requests
                .insert(key, RequestStatus::Failed { params, error });
            true
        }
    }
}

/// Fetch configuration for a single-value entity.
///
/// Unlike a row family, responses here have no envelope: the whole 2xx
/// body deserializes directly into `T`.
pub struct SimpleFamily<T> {
    types: ActionTypes,
    endpoint: &'static str,
    key_spec: KeySpec,
    _marker: std::marker::PhantomData<fn() -> T>,
}

impl<T> Debug for SimpleFamily<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SimpleFamily")
            .field("prefix", &self.types.prefix())
            .field("endpoint", &self.endpoint)
            .finish()
    }
}

impl<T> SimpleFamily<T>
where
    T: DeserializeOwned + Clone + Debug + Send + 'static,
{
    pub fn new(prefix: &'static str, endpoint: &'static str, key_spec: KeySpec) -> Self {
        Self {
            types: ActionTypes::new(prefix, &["REQUESTED", "RETURNED", "FAILED"]),
            endpoint,
            key_spec,
            _marker: std::marker::PhantomData,
        }
    }

    /// The endpoint this family fetches from
    pub fn endpoint(&self) -> &'static str {
        self.endpoint
    }

    /// Derive the cache key these parameters address.
    ///
    /// # Panics
    ///
    /// Panics if a key field is missing, see [`KeySpec::derive`].
    pub fn cache_key(&self, params: &Params) -> CacheKey {
        self.key_spec.derive(params)
    }

    pub fn requested(&self, params: Params) -> SimpleAction<T> {
        let key = self.cache_key(&params);
        SimpleAction::Requested { params, key }
    }

    pub fn returned(&self, params: Params, data: T) -> SimpleAction<T> {
        let key = self.cache_key(&params);
        SimpleAction::Returned { params, key, data }
    }

    pub fn failed(&self, params: Params, error: ApiError) -> SimpleAction<T> {
        let key = self.cache_key(&params);
        SimpleAction::Failed { params, key, error }
    }

    /// Run one fetch to completion, body stored verbatim.
    pub async fn run<B: Backend>(
        &self,
        backend: &B,
        params: Params,
        dispatch: impl Fn(SimpleAction<T>),
    ) {
        let key = self.cache_key(&params);
        tracing::debug!(family = self.types.prefix(), key = %key, "simple query requested");
        dispatch(self.requested(params.clone()));

        let outcome = match backend.get(self.endpoint, &params).await {
            Ok(body) => serde_json::from_value::<T>(body).map_err(|err| ApiError::Malformed {
                endpoint: self.endpoint.to_owned(),
                message: err.to_string(),
            }),
            Err(error) => Err(error),
        };

        match outcome {
            Ok(data) => {
                tracing::debug!(family = self.types.prefix(), key = %key, "simple query returned");
                dispatch(self.returned(params, data));
            }
            Err(error) => {
                tracing::warn!(
                    family = self.types.prefix(),
                    key = %key,
                    error = %error,
                    "simple query failed"
                );
                dispatch(self.failed(params, error));
            }
        }
    }
}

/// Spawn a simple-family fetch as a background task.
pub fn spawn_simple<T, B, A>(
    family: Arc<SimpleFamily<T>>,
    backend: Arc<B>,
    params: Params,
    tx: mpsc::UnboundedSender<A>,
    wrap: fn(SimpleAction<T>) -> A,
) -> tokio::task::JoinHandle<()>
where
    T: DeserializeOwned + Clone + Debug + Send + Sync + 'static,
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
