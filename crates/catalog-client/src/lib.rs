//! HTTP client for the product catalog API.
//!
//! [`FetchClient`] is a small builder-style wrapper over [`reqwest`] that
//! buffers responses into [`Response`]. [`CatalogClient`] layers the catalog
//! endpoints on top of it, and [`ProductListing`] is the seam the listing
//! controller queries through.
//!
//! # Example
//!
//! ```rust,ignore
//! use catalog_client::CatalogClient;
//! use catalog_core::ListingQuery;
//!
//! let client = CatalogClient::new("http://localhost:5000/api")?;
//! let page = client.list_products(&ListingQuery::new().with_search("chair")).await?;
//! println!("{} products, {} pages", page.len(), page.total_pages);
//! ```

mod api;
mod catalog;
mod error;
mod request;
mod response;

pub use api::ProductListing;
pub use catalog::CatalogClient;
pub use error::FetchError;
pub use request::{Method, RequestBuilder};
pub use response::Response;

use tracing::debug;

/// Thin wrapper over [`reqwest::Client`] that resolves paths against a base
/// URL and stamps every request with a fixed set of headers.
#[derive(Clone)]
pub struct FetchClient {
    http: reqwest::Client,
    base_url: Option<String>,
    default_headers: Vec<(String, String)>,
}

impl FetchClient {
    pub fn with_client(http: reqwest::Client) -> Self {
        Self {
            http,
            base_url: None,
            default_headers: Vec::new(),
        }
    }

    /// Resolve relative paths against `base_url`.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Send `key: value` on every request.
    pub fn with_default_header(
        mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.default_headers.push((key.into(), value.into()));
        self
    }

    pub fn get(&self, url: impl Into<String>) -> ClientRequestBuilder {
        self.request(Method::Get, url)
    }

    pub fn post(&self, url: impl Into<String>) -> ClientRequestBuilder {
        self.request(Method::Post, url)
    }

    pub fn put(&self, url: impl Into<String>) -> ClientRequestBuilder {
        self.request(Method::Put, url)
    }

    pub fn delete(&self, url: impl Into<String>) -> ClientRequestBuilder {
        self.request(Method::Delete, url)
    }

    /// Start a `method` request to `url`, carrying the default headers.
    pub fn request(&self, method: Method, url: impl Into<String>) -> ClientRequestBuilder {
        let builder = self
            .default_headers
            .iter()
            .fold(RequestBuilder::new(method, self.resolve(url.into())), |b, (k, v)| {
                b.header(k.as_str(), v.as_str())
            });

        ClientRequestBuilder {
            http: self.http.clone(),
            builder,
        }
    }

    /// Absolute URLs pass through; anything else is appended to the base.
    fn resolve(&self, url: String) -> String {
        let absolute = url.starts_with("http://") || url.starts_with("https://");
        match self.base_url.as_deref() {
            Some(base) if !absolute => [base.trim_end_matches('/'), url.as_str()].concat(),
            _ => url,
        }
    }
}

/// A [`RequestBuilder`] plus the connection pool that will send it.
pub struct ClientRequestBuilder {
    http: reqwest::Client,
    builder: RequestBuilder,
}

impl ClientRequestBuilder {
    /// Set a header, replacing any earlier value under the same name.
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.builder = self.builder.header(key, value);
        self
    }

    /// Append query-string parameters.
    pub fn query<K, V>(mut self, params: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.builder = self.builder.query(params);
        self
    }

    /// Serialize `value` as the JSON body.
    pub fn json<T: serde::Serialize>(mut self, value: &T) -> Result<Self, FetchError> {
        self.builder = self.builder.json(value)?;
        Ok(self)
    }

    pub fn bearer_auth(mut self, token: impl AsRef<str>) -> Self {
        self.builder = self.builder.bearer_auth(token);
        self
    }

    /// The request as built so far.
    pub fn request(&self) -> &RequestBuilder {
        &self.builder
    }

    /// Send the request and buffer the response.
    ///
    /// Dropping the returned future aborts the request.
    pub async fn send(self) -> Result<Response, FetchError> {
        let url = self.builder.full_url()?;
        debug!(method = self.builder.method.as_str(), %url, "sending request");

        let mut request = self.http.request(self.builder.method.to_http(), url);
        for (key, value) in &self.builder.headers {
            request = request.header(key.as_str(), value.as_str());
        }
        if let Some(body) = self.builder.body {
            request = request.body(body);
        }

        let response = request.send().await?;
        let status = response.status();
        let headers = response
            .headers()
            .iter()
            .map(|(k, v)| (k.as_str().to_string(), v.to_str().unwrap_or("").to_string()))
            .collect();
        let body = response.bytes().await?.to_vec();

        debug!(status = status.as_u16(), bytes = body.len(), "received response");
        Ok(Response::new(status, headers, body))
    }
}

/// Common imports.
pub mod prelude {
    pub use crate::{CatalogClient, FetchClient, FetchError, ProductListing, Response};
}
