//! HTTP backend seam and the reqwest-based client
//!
//! Query families talk to a [`Backend`], not to reqwest. Production code
//! hands them an [`ApiClient`]; tests hand them a stub that returns canned
//! bodies. The client is an explicit handle threaded to every call site,
//! so two stores can point at two different backends in one process.

use std::future::Future;

use serde_json::Value;

use crate::error::ApiError;
use crate::params::Params;

/// Source of raw JSON responses for query families.
pub trait Backend: Send + Sync {
    /// Perform one GET against `endpoint` with the given query parameters.
    ///
    /// Implementations classify every failure into an [`ApiError`]; callers
    /// never see transport-level error types.
    fn get(
        &self,
        endpoint: &str,
        params: &Params,
    ) -> impl Future<Output = Result<Value, ApiError>> + Send;
}

/// HTTP client bound to one REST base URL.
#[derive(Clone, Debug)]
pub struct ApiClient {
    base_url: String,
    http: reqwest::Client,
}

impl ApiClient {
    /// Create a client for the given base URL.
    ///
    /// A trailing slash on the base URL is tolerated.
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            base_url,
            http: reqwest::Client::new(),
        }
    }

    /// The base URL requests are resolved against
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url_for(&self, endpoint: &str) -> String {
        format!("{}/{}", self.base_url, endpoint.trim_start_matches('/'))
    }
}

impl Backend for ApiClient {
    fn get(
        &self,
        endpoint: &str,
        params: &Params,
    ) -> impl Future<Output = Result<Value, ApiError>> + Send {
        let url = self.url_for(endpoint);
        let endpoint = endpoint.to_owned();
        let request = self.http.get(&url).query(&params.to_query());

        async move {
            tracing::debug!(endpoint = %endpoint, url = %url, "GET");

            let response = request.send().await.map_err(|err| ApiError::Transport {
                endpoint: endpoint.clone(),
                message: err.to_string(),
            })?;

            let status = response.status();
            if status.as_u16() == 401 {
                return Err(ApiError::Unauthorized);
            }
            if !status.is_success() {
                return Err(ApiError::Status {
                    endpoint: endpoint.clone(),
                    status: status.as_u16(),
                });
            }

            response.json::<Value>().await.map_err(|err| ApiError::Malformed {
                endpoint: endpoint.clone(),
                message: err.to_string(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_trailing_slash_is_normalized() {
        let client = ApiClient::new("http://localhost:8080/api/");
        assert_eq!(client.base_url(), "http://localhost:8080/api");
        assert_eq!(
            client.url_for("compounds"),
            "http://localhost:8080/api/compounds"
        );
        assert_eq!(
            client.url_for("/compounds"),
            "http://localhost:8080/api/compounds"
        );
    }
}
