//! GitHub contents API client: the production [`RemoteLister`].
//!
//! One GET per call, no retries. A configured token is sent as a bearer
//! `Authorization` header on every request.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, USER_AGENT};
use reqwest::Client;

use crate::contract::{DirectoryEntry, RemoteLister};
use crate::error::{Result, SyncError};

const GITHUB_JSON: &str = "application/vnd.github+json";

pub struct GithubClient {
    client: Client,
    headers: HeaderMap,
}

impl GithubClient {
    /// Build a client. An empty token is treated as no token.
    pub fn new(token: Option<&str>) -> Result<Self> {
        Self::with_client(Client::new(), token)
    }

    /// Same as [`GithubClient::new`] on top of a preconfigured `reqwest` client.
    pub fn with_client(client: Client, token: Option<&str>) -> Result<Self> {
        let headers = request_headers(token)?;
        tracing::info!(
            token_set = headers.contains_key(AUTHORIZATION),
            "Initialised GitHub client"
        );
        Ok(Self { client, headers })
    }

    async fn get(&self, url: &str, accept: Option<&'static str>) -> Result<reqwest::Response> {
        let mut request = self.client.get(url).headers(self.headers.clone());
        if let Some(accept) = accept {
            request = request.header(ACCEPT, accept);
        }
        request.send().await.map_err(|e| {
            tracing::error!(error = ?e, url = %url, "Request failed");
            SyncError::Network {
                url: url.to_string(),
                source: e,
            }
        })
    }
}

/// Headers attached to every request.
pub fn request_headers(token: Option<&str>) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();
    headers.insert(
        USER_AGENT,
        HeaderValue::from_static(concat!("ghidra-sync/", env!("CARGO_PKG_VERSION"))),
    );
    if let Some(token) = token.map(str::trim).filter(|t| !t.is_empty()) {
        let mut value =
            HeaderValue::from_str(&format!("Bearer {token}")).map_err(|e| SyncError::InvalidToken {
                reason: e.to_string(),
            })?;
        value.set_sensitive(true);
        headers.insert(AUTHORIZATION, value);
    }
    Ok(headers)
}

/// Parse a listing body. Anything but a JSON array of entries is rejected.
pub fn parse_listing(url: &str, body: &[u8]) -> Result<Vec<DirectoryEntry>> {
    serde_json::from_slice(body).map_err(|e| {
        tracing::error!(error = %e, url = %url, "Listing body is not an array of entries");
        SyncError::Parse {
            url: url.to_string(),
            reason: e.to_string(),
        }
    })
}

#[async_trait]
impl RemoteLister for GithubClient {
    async fn list_directory(&self, url: &str) -> Result<Vec<DirectoryEntry>> {
        tracing::info!(url = %url, "Fetching listing");
        let response = self.get(url, Some(GITHUB_JSON)).await?;
        let status = response.status();
        if !status.is_success() {
            tracing::error!(status = %status, url = %url, "Listing request returned error status");
            return Err(SyncError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        let body = response.bytes().await.map_err(|e| SyncError::Network {
            url: url.to_string(),
            source: e,
        })?;
        let entries = parse_listing(url, &body)?;
        tracing::debug!(url = %url, entries = entries.len(), "Parsed listing");
        Ok(entries)
    }

    async fn fetch_content(&self, url: &str) -> Result<Vec<u8>> {
        let response = self.get(url, None).await?;
        let status = response.status();
        if !status.is_success() {
            // The body is still returned and written, whatever it holds.
            tracing::warn!(status = %status, url = %url, "Content download returned error status");
        }
        let body = response.bytes().await.map_err(|e| SyncError::Network {
            url: url.to_string(),
            source: e,
        })?;
        Ok(body.to_vec())
    }
}
