//! Authenticated HTTP pipeline.
//!
//! Every request goes through the same steps around a single `reqwest`
//! execution:
//!
//! 1. build the request (failures become [`ApiError::RequestSetup`])
//! 2. [`authorize`]: attach `Authorization: Bearer <token>` when the token store has one
//! 3. send once, no retry
//! 4. [`notify_unauthorized`]: a 401 fires the injected [`UnauthorizedHandler`]
//! 5. [`reject_unsuccessful`]: non-2xx statuses become the matching [`ApiError`]
//!
//! The pipeline knows nothing about navigation. What a 401 means for the UI is
//! decided by whoever supplies the handler.

use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{self, HeaderMap, HeaderValue};
use reqwest::{Client, IntoUrl, Method, Request, RequestBuilder, Response, StatusCode};
use tracing::{debug, info};

use crate::auth::TokenStore;

use super::ApiError;

/// HTTP request timeout in seconds.
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Reaction to a 401 response.
///
/// Called synchronously from the response path, so implementations must not
/// block; queue the work instead.
pub trait UnauthorizedHandler: Send + Sync {
    fn on_unauthorized(&self);
}

impl<F> UnauthorizedHandler for F
where
    F: Fn() + Send + Sync,
{
    fn on_unauthorized(&self) {
        self()
    }
}

/// Request middleware: attach the bearer token, if there is one.
pub fn authorize(mut request: Request, tokens: &TokenStore) -> Result<Request, ApiError> {
    if let Some(token) = tokens.access_token() {
        let mut value = HeaderValue::from_str(&format!("Bearer {}", token))
            .map_err(|e| ApiError::RequestSetup(format!("invalid access token: {}", e)))?;
        value.set_sensitive(true);
        request.headers_mut().insert(header::AUTHORIZATION, value);
    }
    Ok(request)
}

/// Response middleware: fire the handler on exactly 401. The response is not touched.
pub fn notify_unauthorized(response: &Response, handler: &dyn UnauthorizedHandler) {
    if response.status() == StatusCode::UNAUTHORIZED {
        info!(url = %response.url(), "Unauthorized response, requesting login");
        handler.on_unauthorized();
    }
}

/// Check if response is successful, returning an error with body if not.
pub async fn reject_unsuccessful(response: Response) -> Result<Response, ApiError> {
    if response.status().is_success() {
        Ok(response)
    } else {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        Err(ApiError::from_status(status, &body))
    }
}

/// HTTP client that authenticates every request from the shared token store.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    tokens: Arc<TokenStore>,
    on_unauthorized: Arc<dyn UnauthorizedHandler>,
}

impl HttpClient {
    pub fn new(
        tokens: Arc<TokenStore>,
        on_unauthorized: Arc<dyn UnauthorizedHandler>,
    ) -> Result<Self, ApiError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );

        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .default_headers(headers)
            .build()
            .map_err(|e| ApiError::RequestSetup(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            tokens,
            on_unauthorized,
        })
    }

    pub fn tokens(&self) -> &Arc<TokenStore> {
        &self.tokens
    }

    pub fn request<U: IntoUrl>(&self, method: Method, url: U) -> RequestBuilder {
        self.client.request(method, url)
    }

    pub fn get<U: IntoUrl>(&self, url: U) -> RequestBuilder {
        self.request(Method::GET, url)
    }

    pub fn post<U: IntoUrl>(&self, url: U) -> RequestBuilder {
        self.request(Method::POST, url)
    }

    /// Run a request through the authenticated pipeline.
    pub async fn send(&self, request: RequestBuilder) -> Result<Response, ApiError> {
        let request = request
            .build()
            .map_err(|e| ApiError::RequestSetup(e.to_string()))?;
        let request = authorize(request, &self.tokens)?;

        debug!(method = %request.method(), url = %request.url(), "Sending request");
        let response = self.client.execute(request).await?;
        debug!(status = %response.status(), "Response received");

        notify_unauthorized(&response, self.on_unauthorized.as_ref());
        reject_unsuccessful(response).await
    }
}
