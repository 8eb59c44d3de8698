//! Selector expressions with an optional attribute suffix.

use regex::Regex;
use std::sync::LazyLock;

/// Attribute name pattern accepted after the final `/`.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static ATTRIBUTE_NAME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_:][A-Za-z0-9_:.\-]*$").expect("valid regex"));

/// A selector split into its element part and optional attribute name.
///
/// `div a/href` selects `div a` elements and reads their `href` attribute.
/// The split happens at the last `/`, and only when both sides are usable:
/// a non-empty element selector and a valid attribute name. A trailing `/`
/// with nothing after it is dropped. Anything else is passed through whole
/// as an element selector.
///
/// # Examples
/// ```
/// use markup_decoder::document::SelectorExpr;
///
/// let expr = SelectorExpr::parse("div a/href");
/// assert_eq!(expr.element(), "div a");
/// assert_eq!(expr.attribute(), Some("href"));
///
/// let expr = SelectorExpr::parse("#title");
/// assert_eq!(expr.element(), "#title");
/// assert_eq!(expr.attribute(), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectorExpr<'a> {
    element: &'a str,
    attribute: Option<&'a str>,
}

impl<'a> SelectorExpr<'a> {
    #[must_use]
    pub fn parse(expr: &'a str) -> Self {
        if let Some(idx) = expr.rfind('/') {
            let element = expr[..idx].trim();
            let attribute = &expr[idx + 1..];
            if attribute.trim().is_empty() {
                return Self {
                    element,
                    attribute: None,
                };
            }
            if !element.is_empty() && ATTRIBUTE_NAME_PATTERN.is_match(attribute) {
                return Self {
                    element,
                    attribute: Some(attribute),
                };
            }
        }

        Self {
            element: expr,
            attribute: None,
        }
    }

    /// The element selector.
    #[must_use]
    pub fn element(&self) -> &'a str {
        self.element
    }

    /// The requested attribute, if any.
    #[must_use]
    pub fn attribute(&self) -> Option<&'a str> {
        self.attribute
    }
}
