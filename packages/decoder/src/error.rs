//! Error types for the decoder.
//!
//! Every failure in the fetch, parse and populate pipeline is a
//! `DecodeError`. Failures raised while decoding a record field are wrapped
//! in `DecodeError::Field`, which carries the path to the failing field.

use thiserror::Error;

/// Boxed error produced by third-party sources and parsers.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Main error type for the decoder library.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// Source URI without a usable scheme.
    #[error("Failed to parse source URI '{0}': expected '<scheme>:<location>'")]
    InvalidUri(String),

    /// No source registered for the URI scheme.
    #[error("Source scheme '{0}' does not match a registered source")]
    UnknownScheme(String),

    /// No parser registered for the document kind.
    #[error("Parser for '{0}' not found")]
    UnknownKind(String),

    /// A source is already registered under this scheme.
    #[error("Source '{0}' already registered, refusing to overwrite")]
    SourceAlreadyRegistered(String),

    /// A parser is already registered under this kind.
    #[error("Parser '{0}' already registered, refusing to overwrite")]
    ParserAlreadyRegistered(String),

    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Response body exceeds the configured size limit.
    #[error("Response from {uri} is {size} bytes, exceeding the limit of {limit} bytes")]
    ResponseTooLarge { uri: String, size: u64, limit: u64 },

    /// Fetch failure reported by a third-party source.
    #[error("Failed to fetch {uri}: {source}")]
    Fetch {
        uri: String,
        #[source]
        source: BoxError,
    },

    /// IO error while reading a byte stream.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    /// Malformed input reported by a third-party parser.
    #[error("Failed to parse '{kind}' document: {message}")]
    Parse { kind: String, message: String },

    /// Selector syntax rejected by the document implementation.
    #[error("Invalid selector '{selector}': {message}")]
    InvalidSelector { selector: String, message: String },

    /// Selector matched nothing.
    #[error("Selector '{selector}' matched no elements")]
    NoMatch { selector: String },

    /// A matched element lacks the requested attribute.
    #[error("Unable to find attribute '{attribute}' for selector '{selector}'")]
    MissingAttribute { attribute: String, selector: String },

    /// Extracted text does not convert to the field type.
    #[error("Cannot convert '{text}' to {target}")]
    Coercion { text: String, target: &'static str },

    /// Failure while decoding a record field.
    #[error("Failed to decode field '{path}' ({annotation}): {source}")]
    Field {
        path: String,
        annotation: String,
        #[source]
        source: Box<DecodeError>,
    },
}

impl DecodeError {
    /// Wrap this error with the record field it was raised for.
    ///
    /// Nested fields extend the path of an existing `Field` error, so the
    /// outermost field ends up first (`items[1].text`). The annotation kept
    /// is the innermost one, which names the selector that failed.
    #[must_use]
    pub fn at_field(self, name: &str, field_annotation: &str) -> Self {
        match self {
            DecodeError::Field {
                path,
                annotation,
                source,
            } => {
                let separator = if path.starts_with('[') { "" } else { "." };
                let annotation = if annotation.is_empty() {
                    field_annotation.to_string()
                } else {
                    annotation
                };
                DecodeError::Field {
                    path: format!("{name}{separator}{path}"),
                    annotation,
                    source,
                }
            }
            other => DecodeError::Field {
                path: name.to_string(),
                annotation: field_annotation.to_string(),
                source: Box::new(other),
            },
        }
    }

    /// Prefix the field path with a sequence index.
    #[must_use]
    pub fn at_index(self, index: usize) -> Self {
        match self {
            DecodeError::Field {
                path,
                annotation,
                source,
            } => {
                let separator = if path.starts_with('[') { "" } else { "." };
                DecodeError::Field {
                    path: format!("[{index}]{separator}{path}"),
                    annotation,
                    source,
                }
            }
            // Scalar element: the enclosing field fills in the annotation.
            other => DecodeError::Field {
                path: format!("[{index}]"),
                annotation: String::new(),
                source: Box::new(other),
            },
        }
    }

    /// The underlying error, with any field context removed.
    #[must_use]
    pub fn root_cause(&self) -> &DecodeError {
        match self {
            DecodeError::Field { source, .. } => source.root_cause(),
            other => other,
        }
    }

    /// Path of the failing field, if the error was raised while populating one.
    #[must_use]
    pub fn field_path(&self) -> Option<&str> {
        match self {
            DecodeError::Field { path, .. } => Some(path),
            _ => None,
        }
    }
}

/// Result type alias for decoder operations.
pub type Result<T> = std::result::Result<T, DecodeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = DecodeError::NoMatch {
            selector: "#missing".to_string(),
        };
        assert_eq!(err.to_string(), "Selector '#missing' matched no elements");
    }

    #[test]
    fn test_field_path_nesting() {
        let err = DecodeError::NoMatch {
            selector: "i".to_string(),
        }
        .at_field("text", "i")
        .at_index(1)
        .at_field("items", "ul li");

        assert_eq!(err.field_path(), Some("items[1].text"));
        assert!(matches!(err.root_cause(), DecodeError::NoMatch { .. }));
        assert_eq!(
            err.to_string(),
            "Failed to decode field 'items[1].text' (i): Selector 'i' matched no elements"
        );
    }

    #[test]
    fn test_index_of_scalar_element() {
        let err = DecodeError::Coercion {
            text: "abc".to_string(),
            target: "i64",
        }
        .at_index(0)
        .at_field("numbers", "li");

        assert_eq!(err.field_path(), Some("numbers[0]"));
        assert!(matches!(err.root_cause(), DecodeError::Coercion { .. }));
        assert_eq!(
            err.to_string(),
            "Failed to decode field 'numbers[0]' (li): Cannot convert 'abc' to i64"
        );
    }

    #[test]
    fn test_root_cause_of_plain_error() {
        let err = DecodeError::UnknownKind("yaml".to_string());
        assert!(matches!(err.root_cause(), DecodeError::UnknownKind(_)));
        assert!(err.field_path().is_none());
    }
}
