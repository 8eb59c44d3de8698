//! Parser registry mapping document kinds to parsers.

use std::collections::HashMap;
use std::io::Read;
use std::sync::Arc;

use crate::document::Document;
use crate::error::{DecodeError, Result};

/// Capability that turns a byte stream into a document.
pub trait Parser: Send + Sync {
    /// Parse `input` into a document holding its root.
    ///
    /// Structural errors in the input are returned unchanged.
    fn parse(&self, input: &mut dyn Read) -> Result<Box<dyn Document>>;
}

/// Registry mapping document kinds to parsers.
pub struct ParserRegistry {
    parsers: HashMap<String, Arc<dyn Parser>>,
}

impl ParserRegistry {
    /// Create a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            parsers: HashMap::new(),
        }
    }

    /// Register a parser for a document kind.
    ///
    /// # Errors
    /// Returns `ParserAlreadyRegistered` if the kind is taken. The existing
    /// parser stays registered.
    pub fn register(&mut self, kind: impl Into<String>, parser: Arc<dyn Parser>) -> Result<()> {
        let kind = kind.into();
        if self.parsers.contains_key(&kind) {
            return Err(DecodeError::ParserAlreadyRegistered(kind));
        }

        tracing::debug!(kind = %kind, "Registered parser");
        self.parsers.insert(kind, parser);
        Ok(())
    }

    /// Get the parser registered for a kind.
    #[must_use]
    pub fn get(&self, kind: &str) -> Option<&dyn Parser> {
        self.parsers.get(kind).map(|p| p.as_ref())
    }

    /// Parse `input` with the parser registered for `kind`.
    ///
    /// # Errors
    /// Returns `UnknownKind` if no parser serves `kind`, or whatever the
    /// parser itself reports.
    pub fn parse(&self, kind: &str, input: &mut dyn Read) -> Result<Box<dyn Document>> {
        let parser = self
            .get(kind)
            .ok_or_else(|| DecodeError::UnknownKind(kind.to_string()))?;

        tracing::debug!(kind, "Parsing document");
        parser.parse(input)
    }

    /// Check if a parser is registered for a kind.
    #[must_use]
    pub fn has_kind(&self, kind: &str) -> bool {
        self.parsers.contains_key(kind)
    }

    /// Registered kinds in sorted order.
    #[must_use]
    pub fn kinds(&self) -> Vec<&str> {
        let mut kinds: Vec<&str> = self.parsers.keys().map(|s| s.as_str()).collect();
        kinds.sort_unstable();
        kinds
    }
}

impl Default for ParserRegistry {
    fn default() -> Self {
        Self::new()
    }
}
