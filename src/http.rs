use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::header::CONTENT_TYPE;
use tracing::trace;

use crate::error::FetchError;

/// The only network surface the pipeline sees.
#[allow(async_fn_in_trait)]
pub trait Fetch {
    /// GET `url` and return the body; non-success statuses are errors.
    async fn get(&self, url: &str) -> Result<Vec<u8>, FetchError>;

    /// POST a JSON body once and return the response status.
    async fn post_json(&self, url: &str, body: Vec<u8>) -> Result<u16, FetchError>;
}

/// [`Fetch`] over a shared `reqwest::Client`.
#[derive(Clone)]
pub struct EdgarClient {
    inner: reqwest::Client,
}

impl EdgarClient {
    pub fn new(user_agent: &str, timeout: Duration) -> Result<Self> {
        let inner = reqwest::Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(EdgarClient { inner })
    }
}

impl Fetch for EdgarClient {
    async fn get(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        trace!("GET {url}");
        let transport = |source| FetchError::Transport {
            url: url.to_string(),
            source,
        };

        let response = self.inner.get(url).send().await.map_err(transport)?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        let body = response.bytes().await.map_err(transport)?;
        Ok(body.to_vec())
    }

    async fn post_json(&self, url: &str, body: Vec<u8>) -> Result<u16, FetchError> {
        trace!("POST {url} ({} bytes)", body.len());
        let response = self
            .inner
            .post(url)
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .map_err(|source| FetchError::Transport {
                url: url.to_string(),
                source,
            })?;
        Ok(response.status().as_u16())
    }
}
