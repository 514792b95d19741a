//! Outbound calls to sibling services.
//!
//! Every request carries a timeout. A 404 from the peer is reported as
//! `Ok(None)` so callers can distinguish "absent" from "unreachable".

use crate::error::ServiceError;
use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use std::time::Duration;

#[derive(Debug, thiserror::Error)]
pub enum PeerError {
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} responded with {status}: {body}")]
    Status {
        url: String,
        status: StatusCode,
        body: String,
    },

    #[error("invalid response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

impl PeerError {
    pub fn is_unreachable(&self) -> bool {
        match self {
            PeerError::Transport { source, .. } => source.is_timeout() || source.is_connect(),
            _ => false,
        }
    }
}

impl From<PeerError> for ServiceError {
    fn from(err: PeerError) -> Self {
        if err.is_unreachable() {
            ServiceError::UpstreamUnavailable(err.to_string())
        } else {
            ServiceError::Upstream(err.to_string())
        }
    }
}

#[derive(Debug, Clone)]
pub struct PeerClient {
    http: Client,
    base_url: String,
    timeout: Duration,
}

impl PeerClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout,
        }
    }

    /// Same peer and connection pool, different deadline.
    pub fn with_timeout(&self, timeout: Duration) -> Self {
        Self {
            http: self.http.clone(),
            base_url: self.base_url.clone(),
            timeout,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<Option<T>, PeerError> {
        self.send(self.request(Method::GET, path), path).await
    }

    pub async fn get_json_with_query<Q, T>(&self, path: &str, query: &Q) -> Result<Option<T>, PeerError>
    where
        Q: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send(self.request(Method::GET, path).query(query), path).await
    }

    pub async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<Option<T>, PeerError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send(self.request(Method::POST, path).json(body), path).await
    }

    /// Returns `false` when the peer reports the resource as already absent.
    pub async fn delete(&self, path: &str) -> Result<bool, PeerError> {
        let deleted: Option<serde_json::Value> = self.send(self.request(Method::DELETE, path), path).await?;
        Ok(deleted.is_some())
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.http.request(method, self.url(path)).timeout(self.timeout)
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder, path: &str) -> Result<Option<T>, PeerError> {
        let url = self.url(path);
        let response = request.send().await.map_err(|source| PeerError::Transport {
            url: url.clone(),
            source,
        })?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(PeerError::Status { url, status, body });
        }

        let value = response
            .json::<T>()
            .await
            .map_err(|source| PeerError::Decode { url, source })?;
        Ok(Some(value))
    }
}
