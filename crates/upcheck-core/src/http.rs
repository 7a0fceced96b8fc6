use std::sync::{PoisonError, RwLock};
use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use reqwest::header::ACCEPT;

use crate::error::TransportError;

const GITHUB_JSON: &str = "application/vnd.github+json";
const SNIPPET_CHARS: usize = 160;

/// The slice of an HTTP stack the update checker needs.
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// Route subsequent requests through `proxy`, or connect directly when
    /// `None`. Returns whether a proxy is now in use.
    ///
    /// # Errors
    /// Returns [`TransportError::Proxy`] when the address cannot be used; the
    /// previous configuration is left untouched in that case.
    fn configure_proxy(&self, proxy: Option<&str>) -> Result<bool, TransportError>;

    /// Fetch `url` and return the body of a successful response.
    ///
    /// # Errors
    /// Any connection failure or non-2xx status is a [`TransportError`].
    async fn get(&self, url: &str) -> Result<Vec<u8>, TransportError>;
}

pub struct ReqwestClient {
    timeout: Duration,
    user_agent: String,
    inner: RwLock<reqwest::Client>,
}

impl ReqwestClient {
    /// Build a client that honours the system proxy settings until
    /// [`HttpClient::configure_proxy`] is called.
    ///
    /// # Errors
    /// Returns an error when the TLS backend cannot be initialised.
    pub fn new(timeout: Duration, user_agent: impl Into<String>) -> Result<Self, TransportError> {
        let user_agent = user_agent.into();
        let inner = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(user_agent.clone())
            .build()
            .map_err(TransportError::request_from)?;

        Ok(Self {
            timeout,
            user_agent,
            inner: RwLock::new(inner),
        })
    }

    fn current(&self) -> reqwest::Client {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl HttpClient for ReqwestClient {
    fn configure_proxy(&self, proxy: Option<&str>) -> Result<bool, TransportError> {
        let builder = reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent(self.user_agent.clone());

        let (builder, proxied) = match proxy.map(str::trim).filter(|addr| !addr.is_empty()) {
            Some(address) => {
                let proxy = reqwest::Proxy::all(address).map_err(|error| TransportError::Proxy {
                    address: address.to_string(),
                    details: error.to_string(),
                })?;
                (builder.proxy(proxy), true)
            }
            None => (builder.no_proxy(), false),
        };

        let client = builder.build().map_err(TransportError::request_from)?;
        *self.inner.write().unwrap_or_else(PoisonError::into_inner) = client;
        Ok(proxied)
    }

    async fn get(&self, url: &str) -> Result<Vec<u8>, TransportError> {
        debug!("GET {url}");
        let response = self
            .current()
            .get(url)
            .header(ACCEPT, GITHUB_JSON)
            .send()
            .await
            .map_err(TransportError::request_from)?;

        let status = response.status();
        if !status.is_success() {
            let body_snippet = response
                .text()
                .await
                .ok()
                .map(|body| response_snippet(&body, SNIPPET_CHARS))
                .unwrap_or_default();
            return Err(TransportError::HttpStatus {
                status: status.as_u16(),
                body_snippet,
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(TransportError::request_from)?;
        Ok(body.to_vec())
    }
}

fn response_snippet(body: &str, max_chars: usize) -> String {
    let snippet: String = body.trim().chars().take(max_chars).collect();
    if snippet.is_empty() {
        String::new()
    } else {
        format!(": {snippet}")
    }
}
