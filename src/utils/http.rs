use std::time::Duration;

use log::{info, warn};
use reqwest::Client;

use crate::constants::defaults::{
    DEFAULT_MAX_ATTEMPTS, DEFAULT_RETRY_DELAY_SECS, DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT,
};
use crate::error::{Error, Result};

/// Fixed retry policy for subscription downloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        RetryPolicy {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            delay: Duration::from_secs(DEFAULT_RETRY_DELAY_SECS),
        }
    }
}

/// Build an HTTP client with a per-request timeout and user agent.
pub fn build_client(timeout: Duration, user_agent: &str) -> Result<Client> {
    Client::builder()
        .timeout(timeout)
        .user_agent(user_agent)
        .build()
        .map_err(|e| Error::Network(format!("Failed to build HTTP client: {}", e)))
}

/// Client with the default timeout and browser user agent.
pub fn default_client() -> Result<Client> {
    build_client(
        Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        DEFAULT_USER_AGENT,
    )
}

/// Makes a GET request and returns the body of a 2xx response.
///
/// # Arguments
/// * `client` - Client carrying timeout and user agent
/// * `url` - The URL to request
///
/// # Returns
/// * `Ok(String)` - The response body as a string
/// * `Err(Error)` - Timeout, connection failure or non-success status
pub async fn web_get_async(client: &Client, url: &str) -> Result<String> {
    let response = client.get(url).send().await?;

    let status = response.status();
    if !status.is_success() {
        return Err(Error::Http {
            status: status.as_u16(),
        });
    }

    Ok(response.text().await?)
}

/// Download `url`, retrying failed attempts according to `policy`.
///
/// Returns `None` once every attempt has failed. Timeouts are logged apart
/// from other failures but retried the same way.
pub async fn download_with_retry(
    client: &Client,
    url: &str,
    policy: &RetryPolicy,
) -> Option<String> {
    let attempts = policy.max_attempts.max(1);
    for attempt in 1..=attempts {
        info!("Downloading {} (attempt {}/{})", url, attempt, attempts);
        match web_get_async(client, url).await {
            Ok(body) => {
                info!("Downloaded {} bytes from {}", body.len(), url);
                return Some(body);
            }
            Err(Error::Timeout(_)) => warn!("Download timed out: {}", url),
            Err(e) => warn!("Download failed: {}: {}", url, e),
        }
        if attempt < attempts && !policy.delay.is_zero() {
            tokio::time::sleep(policy.delay).await;
        }
    }
    warn!("Giving up on {} after {} attempts", url, attempts);
    None
}
