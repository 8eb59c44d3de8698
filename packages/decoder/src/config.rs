//! Configuration constants, HTTP settings and URI validation.

use regex::Regex;
use std::sync::LazyLock;
use std::time::Duration;

use crate::error::{DecodeError, Result};

/// Document kind served by the built-in HTML parser.
pub const HTML_KIND: &str = "html";

/// Field annotation that marks a field as not consumed.
pub const SKIP_ANNOTATION: &str = "-";

/// HTTP timeout in seconds.
pub const HTTP_TIMEOUT_SECS: u64 = 30;

/// Default maximum HTTP response size in bytes (100 MB).
///
/// This prevents downloading unexpectedly large documents that could exhaust memory.
pub const DEFAULT_MAX_RESPONSE_SIZE: u64 = 100 * 1024 * 1024;

/// User agent string identifying this decoder.
pub const USER_AGENT: &str = concat!("markup-decoder/", env!("CARGO_PKG_VERSION"));

/// URI scheme pattern (RFC 3986): a letter followed by letters, digits, `+`, `-` or `.`.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static SCHEME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9+.\-]*$").expect("valid regex"));

/// Split a source URI into its scheme and the remainder after the first `:`.
///
/// # Arguments
/// * `uri` - Source URI such as `https://example.org/page`
///
/// # Returns
/// * `Ok((scheme, rest))` if the URI starts with a valid scheme
/// * `Err(DecodeError::InvalidUri)` otherwise
///
/// # Examples
/// ```
/// use markup_decoder::config::split_scheme;
///
/// assert_eq!(split_scheme("https://example.org").unwrap(), ("https", "//example.org"));
/// assert!(split_scheme("example.org").is_err());
/// assert!(split_scheme(":nothing").is_err());
/// ```
pub fn split_scheme(uri: &str) -> Result<(&str, &str)> {
    match uri.split_once(':') {
        Some((scheme, rest)) if SCHEME_PATTERN.is_match(scheme) => Ok((scheme, rest)),
        _ => Err(DecodeError::InvalidUri(uri.to_string())),
    }
}

/// Settings for the built-in HTTP source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpConfig {
    pub timeout: Duration,
    pub max_response_size: u64,
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(HTTP_TIMEOUT_SECS),
            max_response_size: DEFAULT_MAX_RESPONSE_SIZE,
            user_agent: USER_AGENT.to_string(),
        }
    }
}

impl HttpConfig {
    /// Load configuration from environment variables, falling back to defaults.
    ///
    /// Recognized variables:
    /// - `MARKUP_DECODER_HTTP_TIMEOUT_SECS`
    /// - `MARKUP_DECODER_MAX_RESPONSE_SIZE`
    /// - `MARKUP_DECODER_USER_AGENT`
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let timeout = std::env::var("MARKUP_DECODER_HTTP_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .map(Duration::from_secs)
            .unwrap_or(defaults.timeout);

        let max_response_size = std::env::var("MARKUP_DECODER_MAX_RESPONSE_SIZE")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.max_response_size);

        let user_agent =
            std::env::var("MARKUP_DECODER_USER_AGENT").unwrap_or(defaults.user_agent);

        Self {
            timeout,
            max_response_size,
            user_agent,
        }
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    #[must_use]
    pub fn with_max_response_size(mut self, max_response_size: u64) -> Self {
        self.max_response_size = max_response_size;
        self
    }

    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}
