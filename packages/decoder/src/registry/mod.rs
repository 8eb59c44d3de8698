//! Registries of sources and parsers.
//!
//! Sources turn a URI into a byte stream and are looked up by URI scheme.
//! Parsers turn a byte stream into a [`Document`](crate::document::Document)
//! and are looked up by document kind. Names are unique: registering a name
//! twice fails and keeps the first registration.

mod parser;
mod source;

pub use parser::{Parser, ParserRegistry};
pub use source::{ByteStream, Source, SourceRegistry};
