//! The decode engine: fetch, parse, then populate a record field by field.

mod coerce;
mod record;

pub use coerce::{float_lexeme, integer_lexeme, parse_float, parse_integer};
pub use record::{Decode, Field, FieldVisitor, Record};

use std::sync::Arc;

use crate::config::{HttpConfig, HTML_KIND};
use crate::document::{Document, HtmlParser};
use crate::error::Result;
use crate::http::HttpSource;
use crate::registry::{ParserRegistry, Source, SourceRegistry};

/// Populate `record` from `document`.
///
/// Fields are visited in declaration order. Each annotated field is
/// decoded from `document.filter(annotation)`; unannotated and `-` fields
/// are skipped. The first failure stops population and is returned wrapped
/// in `DecodeError::Field`. Fields set before the failure keep their new
/// values.
///
/// A record without annotated fields is left unchanged.
pub fn populate(document: &dyn Document, record: &mut dyn Record) -> Result<()> {
    record.visit_fields(&mut |field, slot| {
        let Some(selector) = field.selector() else {
            tracing::trace!(field = field.name(), "Skipping unannotated field");
            return Ok(());
        };

        tracing::trace!(field = field.name(), selector, "Populating field");
        document
            .filter(selector)
            .and_then(|subdoc| slot.decode(subdoc.as_ref()))
            .map_err(|err| err.at_field(field.name(), selector))
    })
}

/// Engine tying sources, parsers and records together.
///
/// Registration takes `&mut self` and lookups take `&self`, so a decoder
/// that is shared between threads (for example in an `Arc`) is read-only.
pub struct Decoder {
    sources: SourceRegistry,
    parsers: ParserRegistry,
}

impl Decoder {
    /// Create a decoder over the given registries.
    #[must_use]
    pub fn new(sources: SourceRegistry, parsers: ParserRegistry) -> Self {
        Self { sources, parsers }
    }

    /// Create a decoder with the built-in `http`/`https` sources and `html` parser.
    pub fn with_defaults() -> Result<Self> {
        Self::with_http_config(&HttpConfig::default())
    }

    /// Like [`Decoder::with_defaults`], with explicit HTTP settings.
    pub fn with_http_config(config: &HttpConfig) -> Result<Self> {
        let http: Arc<dyn Source> = Arc::new(HttpSource::with_config(config)?);

        let mut sources = SourceRegistry::new();
        sources.register("http", Arc::clone(&http))?;
        sources.register("https", http)?;

        let mut parsers = ParserRegistry::new();
        parsers.register(HTML_KIND, Arc::new(HtmlParser))?;

        Ok(Self::new(sources, parsers))
    }

    #[must_use]
    pub fn sources(&self) -> &SourceRegistry {
        &self.sources
    }

    pub fn sources_mut(&mut self) -> &mut SourceRegistry {
        &mut self.sources
    }

    #[must_use]
    pub fn parsers(&self) -> &ParserRegistry {
        &self.parsers
    }

    pub fn parsers_mut(&mut self) -> &mut ParserRegistry {
        &mut self.parsers
    }

    /// Fetch `uri` and parse it as `kind`.
    pub fn load(&self, uri: &str, kind: &str) -> Result<Box<dyn Document>> {
        let mut stream = self.sources.fetch(uri)?;
        self.parsers.parse(kind, &mut stream)
    }

    /// Fetch `uri`, parse it as `kind`, and populate `target` from it.
    ///
    /// On error `target` may be partially populated: fields decoded before
    /// the failing one keep their new values.
    ///
    /// # Examples
    /// Only records can be decoded into:
    /// ```compile_fail
    /// use markup_decoder::Decoder;
    ///
    /// let decoder = Decoder::with_defaults().unwrap();
    /// let mut number: i64 = 0;
    /// decoder.decode("https://example.org", &mut number, "html").unwrap();
    /// ```
    pub fn decode(&self, uri: &str, target: &mut dyn Record, kind: &str) -> Result<()> {
        tracing::debug!(uri, kind, "Decoding document");
        let document = self.load(uri, kind)?;
        populate(document.as_ref(), target)
    }

    /// Parse in-memory `input` as `kind` and populate `target`, without fetching.
    pub fn decode_str(&self, input: &str, target: &mut dyn Record, kind: &str) -> Result<()> {
        let mut bytes = input.as_bytes();
        let document = self.parsers.parse(kind, &mut bytes)?;
        populate(document.as_ref(), target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::HtmlDocument;
    use crate::error::DecodeError;

    crate::record! {
        #[derive(Debug, Default, PartialEq)]
        struct Untouched {
            title: String,
            count: i64,
        }
    }

    crate::record! {
        #[derive(Debug, Default, PartialEq)]
        struct Inner {
            text: String => "i",
        }
    }

    crate::record! {
        #[allow(dead_code)]
        #[derive(Debug, Default, PartialEq)]
        struct Outer {
            heading: String => "h1",
            items: Vec<Inner> => "ul li",
            missing: String => "table",
            after: String => "h1",
        }
    }

    #[test]
    fn test_populate_without_annotations_is_noop() {
        let doc = HtmlDocument::parse("<h1>Title</h1>");
        let mut record = Untouched {
            title: "keep".to_string(),
            count: 3,
        };
        populate(&doc, &mut record).unwrap();
        assert_eq!(
            record,
            Untouched {
                title: "keep".to_string(),
                count: 3,
            }
        );
    }

    #[test]
    fn test_populate_stops_at_first_failure() {
        let doc = HtmlDocument::parse("<h1>Title</h1><ul><li><i>a</i></li><li><i>b</i></li></ul>");
        let mut record = Outer::default();
        let err = populate(&doc, &mut record).unwrap_err();

        assert_eq!(record.heading, "Title");
        assert_eq!(record.items.len(), 2);
        assert_eq!(record.after, "");
        assert_eq!(err.field_path(), Some("missing"));
        assert!(matches!(err.root_cause(), DecodeError::NoMatch { .. }));
    }

    #[test]
    fn test_populate_reports_nested_path() {
        let doc = HtmlDocument::parse("<ul><li><i>a</i></li><li>no italic</li></ul>");
        let mut items: Vec<Inner> = Vec::new();
        let err = items
            .decode(doc.filter("ul li").unwrap().as_ref())
            .unwrap_err();
        assert_eq!(err.field_path(), Some("[1].text"));
    }

    #[test]
    fn test_with_defaults_registrations() {
        let decoder = Decoder::with_defaults().unwrap();
        assert_eq!(decoder.sources().schemes(), vec!["http", "https"]);
        assert_eq!(decoder.parsers().kinds(), vec!["html"]);
    }

    #[test]
    fn test_with_http_config_shares_one_source() {
        let config = HttpConfig::default().with_max_response_size(1024);
        let decoder = Decoder::with_http_config(&config).unwrap();

        let http = decoder.sources().get("http").unwrap() as *const dyn Source;
        let https = decoder.sources().get("https").unwrap() as *const dyn Source;
        assert!(std::ptr::addr_eq(http, https));
    }

    #[test]
    fn test_decode_str() {
        let decoder = Decoder::with_defaults().unwrap();
        let mut inner = Inner::default();
        decoder
            .decode_str("<p><i>italic</i></p>", &mut inner, HTML_KIND)
            .unwrap();
        assert_eq!(inner.text, "italic");
    }

    #[test]
    fn test_decode_unknown_kind() {
        let decoder = Decoder::with_defaults().unwrap();
        let mut inner = Inner::default();
        let err = decoder
            .decode_str("<i>x</i>", &mut inner, "yaml")
            .unwrap_err();
        assert!(matches!(err, DecodeError::UnknownKind(_)));
        assert_eq!(inner, Inner::default());
    }

    #[test]
    fn test_decode_unknown_scheme_before_parse() {
        let decoder = Decoder::with_defaults().unwrap();
        let mut inner = Inner::default();
        let err = decoder
            .decode("gopher://example.org", &mut inner, HTML_KIND)
            .unwrap_err();
        assert!(matches!(err, DecodeError::UnknownScheme(ref s) if s == "gopher"));
    }
}
