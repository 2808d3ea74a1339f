use async_trait::async_trait;
use reqwest::header::{CACHE_CONTROL, LOCATION, PRAGMA};
use reqwest::{redirect, Client};
use std::time::Duration;

use crate::resolver::config::ResolverConfig;
use crate::resolver::errors::ResolveError;
use crate::resolver::models::{FetchRequest, FetchResponse};
use crate::resolver::traits::PageFetcher;

const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:122.0) Gecko/20100101 Firefox/122.0";

/// reqwest-backed fetcher.
///
/// reqwest fixes the redirect policy per client, so two clients are built up
/// front and [`FetchRequest::follow_redirects`] picks one.
pub struct HttpPageFetcher {
    direct: Client,
    following: Client,
}

impl HttpPageFetcher {
    pub fn new(config: &ResolverConfig) -> Result<Self, ResolveError> {
        Ok(Self {
            direct: Self::build_client(config, redirect::Policy::none())?,
            following: Self::build_client(config, redirect::Policy::default())?,
        })
    }

    fn build_client(
        config: &ResolverConfig,
        policy: redirect::Policy,
    ) -> Result<Client, ResolveError> {
        let user_agent = config
            .user_agent
            .clone()
            .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string());

        let mut builder = Client::builder()
            .redirect(policy)
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(user_agent);

        if let Some(proxy_url) = config.proxy.as_deref() {
            let proxy = reqwest::Proxy::all(proxy_url).map_err(|e| {
                ResolveError::Config(format!("Invalid proxy URL {}: {}", proxy_url, e))
            })?;
            builder = builder.proxy(proxy);
        } else if !config.use_system_proxy {
            builder = builder.no_proxy();
        }

        builder
            .build()
            .map_err(|e| ResolveError::Config(format!("Failed to build HTTP client: {}", e)))
    }

    fn network_error(url: &str, err: reqwest::Error) -> ResolveError {
        let message = if err.is_timeout() {
            format!("timed out: {}", err)
        } else {
            err.to_string()
        };
        ResolveError::Network {
            url: url.to_string(),
            message,
        }
    }
}

#[async_trait]
impl PageFetcher for HttpPageFetcher {
    fn name(&self) -> &'static str {
        "http"
    }

    async fn fetch(&self, request: &FetchRequest) -> Result<FetchResponse, ResolveError> {
        let client = if request.follow_redirects {
            &self.following
        } else {
            &self.direct
        };

        let mut builder = client.get(&request.url);
        if !request.use_cache {
            builder = builder
                .header(CACHE_CONTROL, "no-cache")
                .header(PRAGMA, "no-cache");
        }

        if request.verbose {
            tracing::debug!(url = %request.url, "GET");
        }

        let response = builder
            .send()
            .await
            .map_err(|e| Self::network_error(&request.url, e))?;

        let status = response.status().as_u16();
        let location = response
            .headers()
            .get(LOCATION)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);

        let body = response
            .text()
            .await
            .map_err(|e| Self::network_error(&request.url, e))?;

        if request.verbose {
            tracing::debug!(status, bytes = body.len(), location = ?location, "Response");
            tracing::debug!(body = %body, "Response body");
        }

        Ok(FetchResponse {
            body,
            status,
            location,
        })
    }
}
