use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

use crate::error::ViewError;

pub const DEFAULT_API_URL: &str = "http://localhost:8080";

const USER_AGENT: &str = concat!("order-viewer/", env!("CARGO_PKG_VERSION"));

/// Anything that can hand back the raw JSON for an order ID.
///
/// Callers pass an already trimmed, non-empty ID.
#[async_trait]
pub trait OrderSource: Send + Sync {
    async fn fetch_order(&self, id: &str) -> Result<Value, ViewError>;
}

#[derive(Debug, Error)]
pub enum FetcherError {
    #[error("invalid api url: {url}")]
    InvalidBaseUrl { url: String },

    #[error("failed to setup proxy: {proxy}: {source}")]
    ProxySetup {
        proxy: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("failed to build HTTP client: {source}")]
    HttpClientBuild {
        #[source]
        source: reqwest::Error,
    },
}

#[derive(Clone, Debug)]
pub struct FetcherOptions {
    pub base_url: String,
    pub timeout_seconds: Option<u64>,
    pub proxy: Option<String>,
}

impl Default for FetcherOptions {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            timeout_seconds: None,
            proxy: None,
        }
    }
}

#[derive(Clone, Debug)]
pub struct HttpFetcher {
    client: reqwest::Client,
    base_url: reqwest::Url,
}

impl HttpFetcher {
    pub fn new(options: &FetcherOptions) -> Result<Self, FetcherError> {
        let base_url = parse_base_url(&options.base_url)?;
        let client = build_client(options.proxy.as_deref(), options.timeout_seconds)?;
        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &reqwest::Url {
        &self.base_url
    }

    pub fn order_url(&self, id: &str) -> reqwest::Url {
        order_url(&self.base_url, id)
    }
}

#[async_trait]
impl OrderSource for HttpFetcher {
    async fn fetch_order(&self, id: &str) -> Result<Value, ViewError> {
        let url = self.order_url(id);
        tracing::debug!(%url, "requesting order");

        let resp = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| ViewError::Network { source: e })?;

        let status = resp.status();
        if !status.is_success() {
            tracing::debug!(status = status.as_u16(), "order request rejected");
            return Err(ViewError::Fetch {
                status: status.as_u16(),
            });
        }

        let body = resp
            .bytes()
            .await
            .map_err(|e| ViewError::Network { source: e })?;
        tracing::debug!(bytes = body.len(), "order body received");
        serde_json::from_slice(&body).map_err(|e| ViewError::Parse { source: e })
    }
}

fn parse_base_url(raw: &str) -> Result<reqwest::Url, FetcherError> {
    let trimmed = raw.trim();
    let trimmed = if trimmed.is_empty() {
        DEFAULT_API_URL
    } else {
        trimmed
    };
    let url = reqwest::Url::parse(trimmed).map_err(|_| FetcherError::InvalidBaseUrl {
        url: raw.to_string(),
    })?;
    if url.cannot_be_a_base() || !matches!(url.scheme(), "http" | "https") {
        return Err(FetcherError::InvalidBaseUrl {
            url: raw.to_string(),
        });
    }
    Ok(url)
}

/// `{base}/orders/{id}` with `id` kept as one path segment.
pub fn order_url(base: &reqwest::Url, id: &str) -> reqwest::Url {
    let mut url = base.clone();
    if let Ok(mut segments) = url.path_segments_mut() {
        segments.pop_if_empty().push("orders").push(id);
    }
    url
}

fn build_client(
    proxy: Option<&str>,
    timeout_seconds: Option<u64>,
) -> Result<reqwest::Client, FetcherError> {
    let mut headers = reqwest::header::HeaderMap::new();
    headers.insert(
        reqwest::header::USER_AGENT,
        reqwest::header::HeaderValue::from_static(USER_AGENT),
    );
    headers.insert(
        reqwest::header::ACCEPT,
        reqwest::header::HeaderValue::from_static("application/json"),
    );

    let mut builder = reqwest::Client::builder().default_headers(headers);

    if let Some(secs) = timeout_seconds.filter(|s| *s > 0) {
        builder = builder.timeout(Duration::from_secs(secs));
    }

    if let Some(proxy) = proxy.filter(|p| !p.trim().is_empty()) {
        let proxy = reqwest::Proxy::all(proxy).map_err(|e| FetcherError::ProxySetup {
            proxy: proxy.to_string(),
            source: e,
        })?;
        builder = builder.proxy(proxy);
    }

    builder
        .build()
        .map_err(|e| FetcherError::HttpClientBuild { source: e })
}
