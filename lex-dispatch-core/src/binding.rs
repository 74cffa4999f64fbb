//! Data-fetch binding between a parameter source and a query family
//!
//! A [`QueryBinding`] decides when a fetch is due. The caller computes the
//! current parameters from its own state, hands them to
//! [`sync`](QueryBinding::sync) on every transition, and spawns a fetch
//! for whatever comes back. The binding guarantees at most one fetch per
//! distinct parameter set per transition and never retries a failed fetch
//! on its own.

use std::fmt::Debug;

use serde::de::DeserializeOwned;

use crate::keyed::ByIdState;
use crate::params::Params;
use crate::query::{QueryFamily, QuerySlice};

/// Fetch-policy state for one family wired to one parameter source.
#[derive(Clone, Debug, Default)]
pub struct QueryBinding {
    last: Option<Params>,
    mounted: bool,
}

impl QueryBinding {
    pub fn new() -> Self {
        Self::default()
    }

    /// Report the current parameters; get back the fetch that is due.
    ///
    /// On the first call, a fetch is due when parameters are present and
    /// the cache holds no resolved rows for their key. On later calls, a
    /// fetch is due when parameters are present and differ from the
    /// previous call by flat equality. Absent parameters never fetch.
    pub fn sync<R, T>(
        &mut self,
        family: &QueryFamily<R, T>,
        params: Option<Params>,
        cache: &ByIdState<QuerySlice<T>>,
    ) -> Option<Params>
    where
        R: DeserializeOwned,
        T: Clone + Debug + Send + 'static,
    {
        let due = if !self.mounted {
            self.mounted = true;
            match &params {
                Some(p) => cache.rows(&family.cache_key(p)).is_none(),
                None => false,
            }
        } else {
            match &params {
                Some(p) => self.last.as_ref() != Some(p),
                None => false,
            }
        };

        self.last = params.clone();
        if due {
            params
        } else {
            None
        }
    }
}
