//! HTTP source for `http` and `https` URIs.

use std::io::Cursor;

use reqwest::blocking::Client;

use crate::config::HttpConfig;
use crate::error::{DecodeError, Result};
use crate::registry::{ByteStream, Source};

/// Create a configured HTTP client.
///
/// # Returns
/// A `reqwest::blocking::Client` configured with the timeout and user agent from `config`.
pub fn create_client(config: &HttpConfig) -> Result<Client> {
    let client = Client::builder()
        .timeout(config.timeout)
        .user_agent(config.user_agent.as_str())
        .build()?;
    Ok(client)
}

/// Download a response body with a single GET request.
///
/// Non-success statuses are errors. Bodies larger than `max_size` bytes are
/// rejected, both when announced by `Content-Length` and when received.
///
/// # Arguments
/// * `client` - HTTP client to use
/// * `url` - URL to download from
/// * `max_size` - Maximum accepted body size in bytes
///
/// # Returns
/// Raw bytes of the response body
pub fn download_bytes(client: &Client, url: &str, max_size: u64) -> Result<Vec<u8>> {
    let response = client.get(url).send()?.error_for_status()?;

    if let Some(size) = response.content_length() {
        if size > max_size {
            return Err(DecodeError::ResponseTooLarge {
                uri: url.to_string(),
                size,
                limit: max_size,
            });
        }
    }

    let bytes = response.bytes()?;
    let size = bytes.len() as u64;
    if size > max_size {
        return Err(DecodeError::ResponseTooLarge {
            uri: url.to_string(),
            size,
            limit: max_size,
        });
    }

    tracing::debug!(url, bytes = size, "Downloaded response body");
    Ok(bytes.to_vec())
}

/// Source that fetches documents over HTTP(S).
///
/// The body is buffered in full, so the returned stream does not hold the
/// connection open.
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: Client,
    max_response_size: u64,
}

impl HttpSource {
    /// Create a source with default settings.
    pub fn new() -> Result<Self> {
        Self::with_config(&HttpConfig::default())
    }

    /// Create a source from explicit settings.
    pub fn with_config(config: &HttpConfig) -> Result<Self> {
        Ok(Self {
            client: create_client(config)?,
            max_response_size: config.max_response_size,
        })
    }
}

impl Source for HttpSource {
    fn fetch(&self, uri: &str) -> Result<ByteStream> {
        let bytes = download_bytes(&self.client, uri, self.max_response_size)?;
        Ok(Box::new(Cursor::new(bytes)))
    }
}
