use reqwest::{Client, Response, StatusCode, header::RETRY_AFTER};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use url::Url;

use crate::config::HttpConfig;
use crate::errors::{AppError, AppResult, UpstreamError, UpstreamResult};
use crate::models::Provider;
use crate::utils::url::UrlUtils;

/// Seconds to back off when a 429 carries no usable `Retry-After`
const DEFAULT_RETRY_AFTER_SECS: u64 = 60;

/// JSON client for the video platform APIs
///
/// Every failure is mapped into an [`UpstreamError`] so builders can surface
/// a single error kind for network, auth, rate-limit and non-2xx problems.
#[derive(Clone)]
pub struct UpstreamHttpClient {
    client: Client,
}

impl UpstreamHttpClient {
    pub fn new(config: &HttpConfig) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| AppError::configuration(format!("failed to create HTTP client: {e}")))?;

        Ok(Self { client })
    }

    /// GET a JSON document
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        provider: Provider,
        url: Url,
        headers: &[(&str, &str)],
    ) -> UpstreamResult<T> {
        let safe_url = UrlUtils::obfuscate_credentials(url.as_str());
        debug!("Fetching {} JSON from: {}", provider, safe_url);

        let mut request = self.client.get(url);
        for (name, value) in headers {
            request = request.header(*name, *value);
        }

        let response = request.send().await.map_err(|e| {
            let message = UrlUtils::obfuscate_credentials(&e.to_string());
            if e.is_timeout() {
                UpstreamError::Timeout {
                    url: safe_url.clone(),
                }
            } else {
                UpstreamError::Network { message }
            }
        })?;

        let response = Self::check_status(provider, response, &safe_url).await?;

        let bytes = response.bytes().await.map_err(|e| UpstreamError::Network {
            message: UrlUtils::obfuscate_credentials(&e.to_string()),
        })?;

        serde_json::from_slice(&bytes)
            .map_err(|e| UpstreamError::parse(provider.to_string(), e.to_string()))
    }

    async fn check_status(
        provider: Provider,
        response: Response,
        safe_url: &str,
    ) -> UpstreamResult<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        warn!("{} API returned {} for {}", provider, status, safe_url);

        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                let body = response.text().await.unwrap_or_default();
                Err(UpstreamError::auth_failed(
                    provider.to_string(),
                    format!("{status}: {}", truncate(&body, 200)),
                ))
            }
            StatusCode::TOO_MANY_REQUESTS => {
                let retry_after = response
                    .headers()
                    .get(RETRY_AFTER)
                    .and_then(|value| value.to_str().ok())
                    .and_then(|value| value.trim().parse::<u64>().ok())
                    .unwrap_or(DEFAULT_RETRY_AFTER_SECS);
                Err(UpstreamError::RateLimited {
                    provider: provider.to_string(),
                    retry_after,
                })
            }
            _ => Err(UpstreamError::Http {
                status: status.as_u16(),
                message: format!(
                    "{} - URL: {}",
                    status.canonical_reason().unwrap_or("Unknown"),
                    safe_url
                ),
            }),
        }
    }
}

fn truncate(value: &str, max_chars: usize) -> &str {
    match value.char_indices().nth(max_chars) {
        Some((index, _)) => &value[..index],
        None => value,
    }
}
