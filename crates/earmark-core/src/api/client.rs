//! API client for the audio transcript backend.
//!
//! All calls go through [`HttpClient`], so they carry the stored bearer token
//! and a 401 from any endpoint reaches the unauthorized handler.

use reqwest::Url;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::models::{AudioFile, Collection, TokenResponse, Transcript};

use super::{ApiError, HttpClient};

/// Backend API client.
/// Clone is cheap - the inner HttpClient shares its connection pool.
#[derive(Clone)]
pub struct ApiClient {
    http: HttpClient,
    base_url: Url,
}

impl ApiClient {
    pub fn new(http: HttpClient, base_url: &str) -> Result<Self, ApiError> {
        let base_url = Url::parse(base_url)
            .map_err(|e| ApiError::RequestSetup(format!("invalid base URL {}: {}", base_url, e)))?;
        Ok(Self { http, base_url })
    }

    pub fn http(&self) -> &HttpClient {
        &self.http
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Exchange credentials for an access token.
    ///
    /// The token is returned, not stored; storing it is the caller's login action.
    pub async fn login(&self, username: &str, password: &str) -> Result<String, ApiError> {
        let url = self.endpoint(&["api", "token"])?;

        let request = self
            .http
            .post(url.clone())
            .form(&[("username", username), ("password", password)]);
        let response = self.http.send(request).await?;

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| Self::parse_error(&url, e))?;
        debug!(token_type = ?token.token_type, "Token issued");
        Ok(token.access_token)
    }

    pub async fn collections(&self) -> Result<Vec<Collection>, ApiError> {
        let url = self.endpoint(&["api", "collections"])?;
        self.get(url).await
    }

    /// Audio files in a collection, newest first as the backend orders them
    pub async fn audios(&self, folder_id: &str) -> Result<Vec<AudioFile>, ApiError> {
        let url = self.endpoint(&["api", "audios", folder_id])?;
        self.get(url).await
    }

    /// Titles of transcripts matching the query.
    ///
    /// A blank query returns nothing without contacting the backend.
    pub async fn search(&self, query: &str) -> Result<Vec<String>, ApiError> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(Vec::new());
        }

        let mut url = self.endpoint(&["api", "search"])?;
        url.query_pairs_mut().append_pair("query", query);
        self.get(url).await
    }

    pub async fn transcript(&self, title: &str) -> Result<Transcript, ApiError> {
        let url = self.endpoint(&["api", "transcripts", title])?;
        self.get(url).await
    }

    /// Absolute playback URL for an audio file.
    ///
    /// The server-relative path is resolved under the base URL's path, the
    /// same way API endpoints are.
    pub fn media_url(&self, file: &AudioFile) -> Result<String, ApiError> {
        let mut base = self.base_url.clone();
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        base.join(file.url.trim_start_matches('/'))
            .map(String::from)
            .map_err(|e| ApiError::RequestSetup(format!("invalid media path {}: {}", file.url, e)))
    }

    async fn get<T: DeserializeOwned>(&self, url: Url) -> Result<T, ApiError> {
        let response = self.http.send(self.http.get(url.clone())).await?;
        response.json().await.map_err(|e| Self::parse_error(&url, e))
    }

    /// Base URL extended with percent-encoded path segments
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| {
                ApiError::RequestSetup(format!("base URL cannot have a path: {}", self.base_url))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn parse_error(url: &Url, e: reqwest::Error) -> ApiError {
        ApiError::InvalidResponse(format!("Failed to parse JSON response from {}: {}", url, e))
    }
}
