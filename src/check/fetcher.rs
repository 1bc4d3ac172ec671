//! Public address lookup
//!
//! One HTTP GET against an address-echo endpoint returning the caller's
//! address as a plain-text body.

use crate::config::CheckerConfig;
use std::future::Future;
use std::net::IpAddr;
use thiserror::Error;

/// Errors that can occur while fetching the address
///
/// All variants are handled the same way by the poll loop; the display text
/// is shown to the user as-is.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error("Server responded with status {0}")]
    Status(u16),

    #[error("Server returned an empty response")]
    EmptyBody,

    #[error("Server returned an unexpected response: {0:?}")]
    UnexpectedBody(String),

    #[error("Address check did not complete: worker stopped")]
    WorkerGone,
}

/// Source of the current public address
pub trait AddressFetcher {
    /// Perform one lookup and return the trimmed address text
    fn fetch(&self) -> impl Future<Output = Result<String, FetchError>> + Send;
}

/// Fetches the address from a plain-text HTTP endpoint
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpFetcher {
    /// Build a fetcher for the configured endpoint
    pub fn new(config: &CheckerConfig) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.request_timeout())
            .build()?;

        Ok(Self {
            client,
            endpoint: config.endpoint.trim().to_string(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl AddressFetcher for HttpFetcher {
    fn fetch(&self) -> impl Future<Output = Result<String, FetchError>> + Send {
        let client = self.client.clone();
        let endpoint = self.endpoint.clone();

        async move {
            let response = client.get(&endpoint).send().await?;

            let status = response.status();
            if !status.is_success() {
                return Err(FetchError::Status(status.as_u16()));
            }

            let body = response.text().await?;
            parse_address(&body)
        }
    }
}

/// Trim the response body and check it holds a single IP address
pub fn parse_address(body: &str) -> Result<String, FetchError> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return Err(FetchError::EmptyBody);
    }

    trimmed
        .parse::<IpAddr>()
        .map(|_| trimmed.to_string())
        .map_err(|_| FetchError::UnexpectedBody(trimmed.chars().take(64).collect()))
}
