//! Hosted backend (Supabase / PostgREST) client.
//!
//! # Architecture
//!
//! - Plain `reqwest` calls against the auto-generated REST endpoint
//!   (`{project}/rest/v1/{table}`)
//! - Every request carries the anonymous key as both `apikey` and bearer token
//! - No local cache: the backend is the source of truth for every page view
//!
//! # Example
//!
//! ```rust,ignore
//! use d2c_market_storefront::supabase::{Order, SupabaseClient};
//!
//! let client = SupabaseClient::new(&config.supabase)?;
//! let products: Vec<Product> = client
//!     .from("products")
//!     .select("*,brand:brands(*),category:categories(*)")
//!     .order("created_at", Order::Desc)
//!     .limit(500)
//!     .fetch()
//!     .await?;
//! ```

mod catalog;
mod query;

pub use query::{Order, TableQuery};

use std::sync::Arc;

use reqwest::{Method, RequestBuilder};
use secrecy::ExposeSecret;
use serde::Deserialize;
use url::Url;

use crate::backend::BackendError;
use crate::config::SupabaseConfig;

/// Client for the backend's REST endpoint.
#[derive(Clone)]
pub struct SupabaseClient {
    inner: Arc<SupabaseClientInner>,
}

struct SupabaseClientInner {
    client: reqwest::Client,
    rest_url: Url,
    anon_key: String,
}

/// Error body PostgREST returns alongside non-2xx statuses.
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

impl SupabaseClient {
    /// Create a new client.
    ///
    /// # Errors
    ///
    /// Returns `BackendError` if the HTTP client cannot be built or the REST
    /// URL cannot be derived from the project URL.
    pub fn new(config: &SupabaseConfig) -> Result<Self, BackendError> {
        let client = reqwest::Client::builder().timeout(config.timeout).build()?;
        let rest_url = config.url.join("rest/v1/")?;

        Ok(Self {
            inner: Arc::new(SupabaseClientInner {
                client,
                rest_url,
                anon_key: config.anon_key.expose_secret().to_string(),
            }),
        })
    }

    /// Start a query against `table`.
    #[must_use]
    pub fn from(&self, table: &str) -> TableQuery<'_> {
        TableQuery::new(self, table)
    }

    /// URL of a table's REST resource.
    fn table_url(&self, table: &str) -> Result<Url, BackendError> {
        Ok(self.inner.rest_url.join(table)?)
    }

    /// Build a request with the authentication headers applied.
    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        self.inner
            .client
            .request(method, url)
            .header("apikey", &self.inner.anon_key)
            .bearer_auth(&self.inner.anon_key)
    }

    /// Send a request and return the response body on success.
    async fn execute(&self, request: RequestBuilder) -> Result<String, BackendError> {
        let response = request.send().await?;
        let status = response.status();

        // Check for rate limiting
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse::<u64>().ok())
                .unwrap_or(1);
            return Err(BackendError::RateLimited(retry_after));
        }

        // Get response body as text first for better error diagnostics
        let response_text = response.text().await?;

        if !status.is_success() {
            tracing::error!(
                status = %status,
                body = %response_text.chars().take(500).collect::<String>(),
                "Backend returned non-success status"
            );
            let body = serde_json::from_str::<ApiErrorBody>(&response_text).ok();
            return Err(BackendError::Api {
                status: status.as_u16(),
                code: body.as_ref().and_then(|b| b.code.clone()),
                message: body.and_then(|b| b.message).unwrap_or_else(|| {
                    response_text.chars().take(200).collect::<String>()
                }),
            });
        }

        Ok(response_text)
    }
}
