//! HTTP Client Wrapper
//!
//! Thin wrapper over reqwest that joins endpoint paths onto the API base,
//! attaches JSON/bearer headers and folds every transport-level failure into
//! a single error type. Any received status code is a normal reply.

use anyhow::Result;
use log::debug;
use reqwest::{Method, StatusCode};
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

use crate::config::Config;

/// No response was obtained at all (DNS, refused, timeout, TLS, or the
/// body could not be read). Error-status responses are not transport errors.
#[derive(Debug, Error)]
#[error("request to {url} failed: {source}")]
pub struct TransportError {
    pub url: String,
    #[source]
    pub source: reqwest::Error,
}

/// A received HTTP response, status plus raw body.
#[derive(Debug, Clone)]
pub struct HttpReply {
    pub status: StatusCode,
    pub text: String,
}

impl HttpReply {
    /// Parse the body as JSON. None when the body is not valid JSON.
    pub fn json(&self) -> Option<Value> {
        serde_json::from_str(&self.text).ok()
    }
}

pub struct ApiClient {
    http: reqwest::Client,
    api_base: String,
}

impl ApiClient {
    pub fn new(config: &Config) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            api_base: format!("{}/api", config.base_url.trim_end_matches('/')),
        })
    }

    /// Full URL for an endpoint path, with exactly one separating slash.
    pub fn url_for(&self, endpoint: &str) -> String {
        format!("{}/{}", self.api_base, endpoint.trim_start_matches('/'))
    }

    /// Issue a single request. Bodies are sent as JSON; a bearer token, when
    /// given, goes out as an `Authorization` header. No retries.
    pub async fn request(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<&Value>,
        bearer: Option<&str>,
    ) -> std::result::Result<HttpReply, TransportError> {
        let url = self.url_for(endpoint);
        debug!("{} {}", method, url);

        let mut req = self.http.request(method, &url);
        if let Some(token) = bearer {
            req = req.bearer_auth(token);
        }
        if let Some(json) = body {
            req = req.json(json);
        }

        let response = req.send().await.map_err(|source| TransportError {
            url: url.clone(),
            source,
        })?;

        let status = response.status();
        let text = response.text().await.map_err(|source| TransportError {
            url: url.clone(),
            source,
        })?;

        debug!("{} -> {} ({} bytes)", url, status, text.len());
        Ok(HttpReply { status, text })
    }
}
