//! Catalog API endpoints.

use crate::{ClientRequestBuilder, FetchClient, FetchError};
use catalog_auth::{AuthResponse, AuthSession, LoginRequest, SignupRequest};
use catalog_core::{ListingQuery, Product, ProductDraft, ProductId, ResultPage};
use tracing::{debug, warn};
use url::Url;

/// Client for the product and user endpoints under one API base URL.
///
/// The base URL includes the `/api` prefix, e.g. `http://localhost:5000/api`.
#[derive(Clone)]
pub struct CatalogClient {
    fetch: FetchClient,
    base: Url,
}

impl CatalogClient {
    /// Create a client for `base_url`.
    pub fn new(base_url: &str) -> Result<Self, FetchError> {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    pub fn with_client(http: reqwest::Client, base_url: &str) -> Result<Self, FetchError> {
        let base = parse_base_url(base_url)?;
        let fetch = FetchClient::with_client(http)
            .with_base_url(base.as_str().trim_end_matches('/'))
            .with_default_header("Accept", "application/json");

        Ok(Self { fetch, base })
    }

    /// The API base URL.
    pub fn base_url(&self) -> &str {
        self.base.as_str().trim_end_matches('/')
    }

    /// Build the listing request without sending it.
    pub fn list_request(&self, query: &ListingQuery) -> ClientRequestBuilder {
        self.fetch.get("/products").query(query.to_params())
    }

    /// `GET /products` with the query's parameters.
    pub async fn list_products(&self, query: &ListingQuery) -> Result<ResultPage, FetchError> {
        let page: ResultPage = self
            .list_request(query)
            .send()
            .await?
            .error_for_status()?
            .json()?;

        debug!(
            page = query.page,
            items = page.len(),
            total_pages = page.total_pages,
            "listed products"
        );
        Ok(page)
    }

    /// `GET /products/:id`. No authentication.
    pub async fn get_product(&self, id: &ProductId) -> Result<Product, FetchError> {
        let url = self.product_url(id)?;
        self.fetch.get(url).send().await?.error_for_status()?.json()
    }

    /// `POST /products`.
    pub async fn create_product(
        &self,
        draft: &ProductDraft,
        session: &AuthSession,
    ) -> Result<(), FetchError> {
        let token = session.require_token()?;
        self.fetch
            .post("/products")
            .bearer_auth(token.as_str())
            .json(draft)?
            .send()
            .await?
            .error_for_status()?;

        debug!(name = %draft.name, "created product");
        Ok(())
    }

    /// `PUT /products/:id`.
    pub async fn update_product(
        &self,
        id: &ProductId,
        draft: &ProductDraft,
        session: &AuthSession,
    ) -> Result<(), FetchError> {
        let token = session.require_token()?;
        let url = self.product_url(id)?;
        self.fetch
            .put(url)
            .bearer_auth(token.as_str())
            .json(draft)?
            .send()
            .await?
            .error_for_status()?;

        debug!(%id, "updated product");
        Ok(())
    }

    /// `DELETE /products/:id`.
    pub async fn delete_product(
        &self,
        id: &ProductId,
        session: &AuthSession,
    ) -> Result<(), FetchError> {
        let token = session.require_token()?;
        let url = self.product_url(id)?;
        let response = self
            .fetch
            .delete(url)
            .bearer_auth(token.as_str())
            .send()
            .await?;

        if !response.is_success() {
            warn!(%id, status = response.status.as_u16(), "delete rejected");
        }
        response.error_for_status()?;
        Ok(())
    }

    /// `POST /users/login`.
    pub async fn login(&self, request: &LoginRequest) -> Result<AuthResponse, FetchError> {
        self.fetch
            .post("/users/login")
            .json(request)?
            .send()
            .await?
            .error_for_status()?
            .json()
    }

    /// `POST /users/signup`.
    pub async fn signup(&self, request: &SignupRequest) -> Result<AuthResponse, FetchError> {
        self.fetch
            .post("/users/signup")
            .json(request)?
            .send()
            .await?
            .error_for_status()?
            .json()
    }

    /// `{base}/products/{id}` with the id percent-encoded as a path segment.
    fn product_url(&self, id: &ProductId) -> Result<String, FetchError> {
        if id.is_blank() {
            return Err(FetchError::InvalidUrl("empty product id".to_string()));
        }
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| FetchError::InvalidUrl(self.base.to_string()))?
            .pop_if_empty()
            .extend(["products", id.as_str()]);
        Ok(url.to_string())
    }
}

fn parse_base_url(base_url: &str) -> Result<Url, FetchError> {
    let url = Url::parse(base_url.trim())?;
    match url.scheme() {
        "http" | "https" if url.host_str().is_some() => Ok(url),
        _ => Err(FetchError::InvalidUrl(format!(
            "{} (expected an http or https URL)",
            base_url
        ))),
    }
}
