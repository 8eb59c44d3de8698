//! Source registry mapping URI schemes to fetchers.

use std::collections::HashMap;
use std::io::Read;
use std::sync::Arc;

use crate::config::split_scheme;
use crate::error::{DecodeError, Result};

/// Raw byte stream returned by a source.
pub type ByteStream = Box<dyn Read + Send>;

/// Capability that turns a URI into a byte stream.
///
/// Errors are returned to the caller unchanged; sources make a single
/// attempt and do not cache.
pub trait Source: Send + Sync {
    /// Fetch the resource at `uri`. The full URI, scheme included, is passed.
    fn fetch(&self, uri: &str) -> Result<ByteStream>;
}

/// Registry mapping URI schemes to sources.
pub struct SourceRegistry {
    sources: HashMap<String, Arc<dyn Source>>,
}

impl SourceRegistry {
    /// Create a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            sources: HashMap::new(),
        }
    }

    /// Register a source for a URI scheme.
    ///
    /// # Errors
    /// Returns `SourceAlreadyRegistered` if the scheme is taken. The existing
    /// source stays registered.
    pub fn register(&mut self, scheme: impl Into<String>, source: Arc<dyn Source>) -> Result<()> {
        let scheme = scheme.into();
        if self.sources.contains_key(&scheme) {
            return Err(DecodeError::SourceAlreadyRegistered(scheme));
        }

        tracing::debug!(scheme = %scheme, "Registered source");
        self.sources.insert(scheme, source);
        Ok(())
    }

    /// Get the source registered for a scheme.
    #[must_use]
    pub fn get(&self, scheme: &str) -> Option<&dyn Source> {
        self.sources.get(scheme).map(|s| s.as_ref())
    }

    /// Fetch `uri` through the source registered for its scheme.
    ///
    /// # Errors
    /// Returns `InvalidUri` if the URI has no scheme, `UnknownScheme` if no
    /// source serves it, or whatever the source itself reports.
    pub fn fetch(&self, uri: &str) -> Result<ByteStream> {
        let (scheme, _) = split_scheme(uri)?;
        let source = self
            .get(scheme)
            .ok_or_else(|| DecodeError::UnknownScheme(scheme.to_string()))?;

        tracing::debug!(scheme, uri, "Fetching source");
        source.fetch(uri)
    }

    /// Check if a source is registered for a scheme.
    #[must_use]
    pub fn has_scheme(&self, scheme: &str) -> bool {
        self.sources.contains_key(scheme)
    }

    /// Registered schemes in sorted order.
    #[must_use]
    pub fn schemes(&self) -> Vec<&str> {
        let mut schemes: Vec<&str> = self.sources.keys().map(|s| s.as_str()).collect();
        schemes.sort_unstable();
        schemes
    }
}

impl Default for SourceRegistry {
    fn default() -> Self {
        Self::new()
    }
}
