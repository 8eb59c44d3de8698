//! Markup Decoder - Decode fetched markup documents into annotated Rust records.
//!
//! A source URI is fetched through a registered [`Source`], parsed into a
//! [`Document`] by a registered [`Parser`], and the target record's fields are
//! populated from CSS selectors declared next to them.
//!
//! # Example
//!
//! ```
//! use markup_decoder::{record, Decoder, HTML_KIND};
//!
//! record! {
//!     #[derive(Debug, Default)]
//!     pub struct Item {
//!         pub text: String => "i",
//!     }
//! }
//!
//! record! {
//!     #[derive(Debug, Default)]
//!     pub struct Listing {
//!         pub title: String => "#title",
//!         pub link: String => "a.more/href",
//!         pub items: Vec<Item> => "ul li",
//!         pub count: i64 => ".count",
//!         pub cached: String => "-",
//!     }
//! }
//!
//! let decoder = Decoder::with_defaults().unwrap();
//! let mut listing = Listing::default();
//! decoder
//!     .decode_str(
//!         r#"<h2 id="title">Picks</h2><a class="more" href="/all">more</a>
//!            <ul><li><i>Eenie</i>Nope</li><li><i>Meenie</i>Nope</li></ul>
//!            <span class="count">2 items</span>"#,
//!         &mut listing,
//!         HTML_KIND,
//!     )
//!     .unwrap();
//!
//! assert_eq!(listing.title, "Picks");
//! assert_eq!(listing.link, "/all");
//! assert_eq!(listing.items[1].text, "Meenie");
//! assert_eq!(listing.count, 2);
//! ```
//!
//! # Architecture
//!
//! - [`config`]: Constants, HTTP settings and URI validation
//! - [`error`]: Error types and Result alias
//! - [`registry`]: Source and parser registries
//! - [`document`]: The `Document` contract and the HTML implementation
//! - [`http`]: HTTP(S) source
//! - [`decode`]: Record descriptors, value coercion and the decode engine
//! - [`cli`]: Command-line interface

pub mod cli;
pub mod config;
pub mod decode;
pub mod document;
pub mod error;
pub mod http;
pub mod registry;

// Re-export commonly used items
pub use config::{HttpConfig, HTML_KIND, SKIP_ANNOTATION};
pub use decode::{populate, Decode, Decoder, Field, FieldVisitor, Record};
pub use document::{Document, HtmlDocument, HtmlParser};
pub use error::{DecodeError, Result};
pub use http::HttpSource;
pub use registry::{ByteStream, Parser, ParserRegistry, Source, SourceRegistry};
