//! The fetch capability and its HTTP implementation.

use std::time::Duration;

use reqwest::blocking::Client;
use tracing::debug;

use crate::error::{RemoteFetchError, Result};

/// Per-request timeout used when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// User agent sent with every request.
pub const DEFAULT_USER_AGENT: &str = concat!("parts-vault/", env!("CARGO_PKG_VERSION"));

/// Something that can retrieve the raw body at a URL.
pub trait Fetch {
    fn fetch(&self, url: &str) -> Result<Vec<u8>>;
}

/// Blocking HTTP fetcher.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Creates a fetcher with the given request timeout.
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(DEFAULT_USER_AGENT)
            .build()?;
        Ok(Self { client })
    }
}

impl Fetch for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        debug!(url, "fetching");
        let response = self.client.get(url).send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(RemoteFetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        Ok(response.bytes()?.to_vec())
    }
}
