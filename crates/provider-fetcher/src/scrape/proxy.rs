use std::time::Duration;

use anyhow::Result;
use reqwest::{Client, StatusCode};
use tracing::{debug, error, info};

use crate::errors::FetchError;

/// Endpoint of the ScrapeOps proxy relay.
pub const DEFAULT_PROXY_URL: &str = "https://proxy.scrapeops.io/v1/";

#[derive(Debug, Clone)]
pub struct ProxyConfig {
    pub host: String,
    pub api_key: String,
}

impl ProxyConfig {
    pub fn new<S: Into<String>>(api_key: S) -> Self {
        Self {
            host: DEFAULT_PROXY_URL.to_string(),
            api_key: api_key.into(),
        }
    }
}

/// Fetches target pages through the scraping proxy. One GET per call, no
/// retries; failures are typed and left to the caller.
pub struct ProxyClient {
    client: Client,
    config: ProxyConfig,
}

impl ProxyClient {
    pub fn new(config: ProxyConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(120))
            .build()?;

        Ok(Self { client, config })
    }

    /// Fetch `url` through the proxy, returning the page markup. `render`
    /// switches client-side rendering on at the proxy. The body is decoded as
    /// UTF-8 regardless of the declared charset.
    pub async fn fetch(&self, url: &str, render: bool) -> Result<String, FetchError> {
        info!(url, render, "fetching page via proxy");

        let response = self
            .client
            .get(&self.config.host)
            .query(&[
                ("api_key", self.config.api_key.as_str()),
                ("url", url),
                ("render_js", if render { "true" } else { "false" }),
                ("residential", "true"),
            ])
            .send()
            .await
            .map_err(|e| categorize(e, url))?;

        let status = response.status();
        if status != StatusCode::OK {
            error!(url, status = status.as_u16(), "proxy fetch failed");
            return Err(FetchError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let bytes = response.bytes().await.map_err(|e| categorize(e, url))?;
        debug!(url, bytes = bytes.len(), "proxy fetch succeeded");
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

fn categorize(error: reqwest::Error, url: &str) -> FetchError {
    if error.is_timeout() {
        FetchError::Timeout {
            url: url.to_string(),
        }
    } else if error.is_redirect() {
        FetchError::TooManyRedirects {
            url: url.to_string(),
        }
    } else {
        FetchError::Transport {
            url: url.to_string(),
            source: error,
        }
    }
}
