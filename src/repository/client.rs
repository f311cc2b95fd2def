//! HTTP client shared foundation
//!
//! This module provides a shared HTTP client with:
//! - Configurable timeout and User-Agent
//! - Exponential backoff retry logic (max 3 retries)
//! - Rate limit error handling

use crate::error::RepositoryError;
use reqwest::Client;
use std::time::Duration;

/// Default timeout for HTTP requests (30 seconds)
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default User-Agent header
const DEFAULT_USER_AGENT: &str = concat!("wrapup/", env!("CARGO_PKG_VERSION"));

/// Maximum number of retry attempts
const MAX_RETRIES: u32 = 3;

/// Base delay for exponential backoff (in milliseconds)
const BASE_DELAY_MS: u64 = 100;

/// HTTP client wrapper with retry logic
#[derive(Clone, Debug)]
pub struct HttpClient {
    client: Client,
    max_retries: u32,
}

impl HttpClient {
    /// Create a new HTTP client with default settings
    pub fn new() -> Result<Self, RepositoryError> {
        Self::with_config(DEFAULT_TIMEOUT, DEFAULT_USER_AGENT)
    }

    /// Create a new HTTP client with custom configuration
    pub fn with_config(timeout: Duration, user_agent: &str) -> Result<Self, RepositoryError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()
            .map_err(|e| {
                RepositoryError::network(
                    "HTTP client",
                    format!("failed to create HTTP client: {}", e),
                )
            })?;

        Ok(Self {
            client,
            max_retries: MAX_RETRIES,
        })
    }

    /// Set the maximum number of retries
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Perform a GET request with retry logic and error context
    async fn get_with_context(
        &self,
        url: &str,
        subject: &str,
        repository: &str,
    ) -> Result<reqwest::Response, RepositoryError> {
        let mut last_error = None;
        let mut delay = BASE_DELAY_MS;

        for attempt in 0..=self.max_retries {
            match self.client.get(url).send().await {
                Ok(response) => {
                    if response.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
                        last_error = Some(RepositoryError::network(
                            repository,
                            format!("rate limit exceeded fetching '{}'", subject),
                        ));

                        if attempt < self.max_retries {
                            tokio::time::sleep(Duration::from_millis(delay)).await;
                            delay *= 2;
                            continue;
                        }
                    }

                    if !response.status().is_success() {
                        let status = response.status();
                        return Err(RepositoryError::network(
                            repository,
                            format!("HTTP {} fetching '{}'", status, subject),
                        ));
                    }

                    return Ok(response);
                }
                Err(e) => {
                    let message = if e.is_timeout() {
                        format!("timeout fetching '{}'", subject)
                    } else {
                        format!("{}", e)
                    };
                    last_error = Some(RepositoryError::network(repository, message));

                    if attempt < self.max_retries {
                        tokio::time::sleep(Duration::from_millis(delay)).await;
                        delay *= 2;
                    }
                }
            }
        }

        Err(last_error
            .unwrap_or_else(|| RepositoryError::network(repository, "unknown error".to_string())))
    }

    /// Perform a GET request and parse the JSON response
    pub async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        url: &str,
        subject: &str,
        repository: &str,
    ) -> Result<T, RepositoryError> {
        let response = self.get_with_context(url, subject, repository).await?;
        response.json::<T>().await.map_err(|e| {
            RepositoryError::network(repository, format!("failed to parse JSON: {}", e))
        })
    }

    /// Perform a GET request and return the raw body bytes
    pub async fn get_bytes(
        &self,
        url: &str,
        subject: &str,
        repository: &str,
    ) -> Result<Vec<u8>, RepositoryError> {
        let response = self.get_with_context(url, subject, repository).await?;
        let bytes = response.bytes().await.map_err(|e| {
            RepositoryError::network(repository, format!("failed to read response body: {}", e))
        })?;
        Ok(bytes.to_vec())
    }
}
