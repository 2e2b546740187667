//! HTTP client for the Buho messaging API.
//!
//! # Responsibilities
//! - Own the only transport that skips certificate verification
//! - POST JSON bodies with the bearer token and fixed headers
//! - Read the full response and decode it
//! - Bound every call with connect and request timeouts

use std::time::Duration;

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, USER_AGENT};
use reqwest::{redirect, Client};
use serde::Serialize;
use thiserror::Error;
use url::Url;

use crate::config::{TimeoutConfig, UpstreamConfig};
use crate::upstream::response::{UpstreamBody, UpstreamResponse};

/// Errors raised by the upstream transport.
#[derive(Debug, Error)]
pub enum UpstreamError {
    /// Base URL could not be parsed.
    #[error("invalid upstream URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// The reqwest client could not be constructed.
    #[error("failed to build upstream client: {0}")]
    Build(#[source] reqwest::Error),

    /// Connection, TLS, timeout or body-read failure.
    #[error(transparent)]
    Request(#[from] reqwest::Error),
}

impl UpstreamError {
    /// The error and every underlying cause, joined with `": "`.
    ///
    /// reqwest's own message only names the URL; the cause (refused
    /// connection, timeout, certificate rejection) sits further down the
    /// source chain.
    pub fn detailed_message(&self) -> String {
        let mut message = self.to_string();
        let mut source = std::error::Error::source(self);
        while let Some(cause) = source {
            let text = cause.to_string();
            if !message.ends_with(&text) {
                message.push_str(": ");
                message.push_str(&text);
            }
            source = cause.source();
        }
        message
    }
}

/// Client bound to a single upstream base URL.
///
/// Cloning is cheap; clones share the connection pool.
#[derive(Debug, Clone)]
pub struct UpstreamClient {
    http: Client,
    base_url: String,
    user_agent: String,
}

impl UpstreamClient {
    /// Build the client from upstream and timeout settings.
    pub fn new(upstream: &UpstreamConfig, timeouts: &TimeoutConfig) -> Result<Self, UpstreamError> {
        Url::parse(&upstream.base_url).map_err(|source| UpstreamError::InvalidUrl {
            url: upstream.base_url.clone(),
            source,
        })?;

        if upstream.accept_invalid_certs {
            tracing::warn!(
                base_url = %upstream.base_url,
                "Upstream certificate verification disabled for this client"
            );
        }

        let http = Client::builder()
            .danger_accept_invalid_certs(upstream.accept_invalid_certs)
            .redirect(redirect::Policy::none())
            .connect_timeout(Duration::from_secs(timeouts.connect_secs))
            .timeout(Duration::from_secs(timeouts.request_secs))
            .build()
            .map_err(UpstreamError::Build)?;

        Ok(Self {
            http,
            base_url: upstream.base_url.trim_end_matches('/').to_string(),
            user_agent: upstream.user_agent.clone(),
        })
    }

    /// Full URL for an upstream path.
    pub fn url_for(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// POST `body` as JSON to `path`, authenticated with `token`.
    ///
    /// Any HTTP status is a successful exchange; only transport failures
    /// are errors.
    pub async fn post_json<B>(
        &self,
        path: &str,
        token: &str,
        body: &B,
    ) -> Result<UpstreamResponse, UpstreamError>
    where
        B: Serialize + ?Sized,
    {
        let url = self.url_for(path);
        tracing::debug!(url = %url, "Sending upstream request");

        let response = self
            .http
            .post(&url)
            .header(AUTHORIZATION, format!("Bearer {}", token))
            .header(CONTENT_TYPE, "application/json")
            .header(USER_AGENT, &self.user_agent)
            .json(body)
            .send()
            .await?;

        let status = response.status();
        let bytes = response.bytes().await?;
        let text = String::from_utf8_lossy(&bytes);

        tracing::debug!(
            url = %url,
            status = status.as_u16(),
            body_len = bytes.len(),
            "Upstream responded"
        );

        Ok(UpstreamResponse {
            status,
            body: UpstreamBody::parse(&text),
        })
    }
}
