//! HTML documents backed by `scraper`.

use std::io::Read;
use std::rc::Rc;

use ego_tree::{NodeId, NodeRef};
use scraper::error::SelectorErrorKind;
use scraper::{ElementRef, Html, Node, Selector};

use super::selector::SelectorExpr;
use super::Document;
use crate::error::{DecodeError, Result};
use crate::registry::Parser;

/// Parser for HTML input, registered under [`crate::config::HTML_KIND`].
#[derive(Debug, Default, Clone, Copy)]
pub struct HtmlParser;

impl Parser for HtmlParser {
    fn parse(&self, input: &mut dyn Read) -> Result<Box<dyn Document>> {
        let mut bytes = Vec::new();
        input.read_to_end(&mut bytes)?;
        let source = String::from_utf8_lossy(&bytes);
        Ok(Box::new(HtmlDocument::parse(&source)))
    }
}

/// A node held by an `HtmlDocument`.
#[derive(Debug, Clone)]
enum HtmlNode {
    /// A node of the parsed tree.
    Tree(NodeId),
    /// Attribute value standing in for the element it was read from.
    Text(String),
}

/// A set of nodes from one parsed HTML tree.
///
/// Documents derived through `filter` and `decompose` share the tree with
/// the document they came from.
#[derive(Debug, Clone)]
pub struct HtmlDocument {
    html: Rc<Html>,
    nodes: Vec<HtmlNode>,
}

impl HtmlDocument {
    /// Parse a full HTML document. The result holds the document root.
    ///
    /// # Examples
    /// ```
    /// use markup_decoder::document::{Document, HtmlDocument};
    ///
    /// let doc = HtmlDocument::parse("<p>Hello <b>World</b></p>");
    /// assert_eq!(doc.filter("p").unwrap().text(), "Hello World");
    /// ```
    #[must_use]
    pub fn parse(source: &str) -> Self {
        let html = Html::parse_document(source);
        if !html.errors.is_empty() {
            tracing::debug!(
                errors = html.errors.len(),
                "HTML parsed with recoverable errors"
            );
        }

        let root = html.tree.root().id();
        Self {
            html: Rc::new(html),
            nodes: vec![HtmlNode::Tree(root)],
        }
    }

    fn with_nodes(&self, nodes: Vec<HtmlNode>) -> Self {
        Self {
            html: Rc::clone(&self.html),
            nodes,
        }
    }

    fn node_text(&self, node: &HtmlNode) -> String {
        match node {
            HtmlNode::Text(value) => value.clone(),
            HtmlNode::Tree(id) => self.html.tree.get(*id).map(tree_text).unwrap_or_default(),
        }
    }

    /// Elements at or below the held nodes that match `selector`, in document order.
    fn select(&self, selector: &Selector) -> Vec<NodeId> {
        let mut matched = Vec::new();
        for node in &self.nodes {
            let HtmlNode::Tree(id) = node else {
                continue;
            };
            let Some(node_ref) = self.html.tree.get(*id) else {
                continue;
            };
            matched.extend(
                node_ref
                    .descendants()
                    .filter_map(ElementRef::wrap)
                    .filter(|element| selector.matches(element))
                    .map(|element| element.id()),
            );
        }
        matched
    }

    fn attribute_value(&self, id: NodeId, attribute: &str) -> Option<String> {
        self.html
            .tree
            .get(id)
            .and_then(ElementRef::wrap)
            .and_then(|element| element.value().attr(attribute))
            .map(str::to_string)
    }
}

impl Document for HtmlDocument {
    fn filter(&self, selector: &str) -> Result<Box<dyn Document>> {
        let expr = SelectorExpr::parse(selector);
        let compiled =
            Selector::parse(expr.element()).map_err(|e| DecodeError::InvalidSelector {
                selector: expr.element().to_string(),
                message: selector_error_message(&e),
            })?;

        let matched = self.select(&compiled);
        if matched.is_empty() {
            return Err(DecodeError::NoMatch {
                selector: selector.to_string(),
            });
        }

        let nodes = match expr.attribute() {
            None => matched.into_iter().map(HtmlNode::Tree).collect(),
            Some(attribute) => matched
                .into_iter()
                .map(|id| {
                    self.attribute_value(id, attribute)
                        .map(HtmlNode::Text)
                        .ok_or_else(|| DecodeError::MissingAttribute {
                            attribute: attribute.to_string(),
                            selector: expr.element().to_string(),
                        })
                })
                .collect::<Result<Vec<_>>>()?,
        };

        tracing::trace!(selector, matches = nodes.len(), "Filtered HTML document");
        Ok(Box::new(self.with_nodes(nodes)))
    }

    fn decompose(&self) -> Vec<Box<dyn Document>> {
        self.nodes
            .iter()
            .map(|node| Box::new(self.with_nodes(vec![node.clone()])) as Box<dyn Document>)
            .collect()
    }

    fn text(&self) -> String {
        self.nodes.iter().map(|node| self.node_text(node)).collect()
    }

    fn len(&self) -> usize {
        self.nodes.len()
    }
}

/// One-line description of a selector syntax error.
fn selector_error_message(err: &SelectorErrorKind<'_>) -> String {
    match err {
        SelectorErrorKind::UnexpectedToken(token) => format!("unexpected token {token:?}"),
        SelectorErrorKind::EndOfLine => "unexpected end of selector".to_string(),
        SelectorErrorKind::InvalidAtRule(rule) => format!("invalid @-rule '{rule}'"),
        SelectorErrorKind::InvalidAtRuleBody => "invalid @-rule body".to_string(),
        SelectorErrorKind::QualRuleInvalid => "invalid qualified rule".to_string(),
        SelectorErrorKind::ExpectedColonOnPseudoElement(token) => {
            format!("expected ':' before pseudo-element, found {token:?}")
        }
        SelectorErrorKind::ExpectedIdentityOnPseudoElement(token) => {
            format!("expected pseudo-element name, found {token:?}")
        }
        SelectorErrorKind::UnexpectedSelectorParseError(kind) => format!("{kind:?}"),
    }
}

/// Text of a tree node.
///
/// Text nodes yield their data verbatim. Other nodes yield the text of their
/// children, trimmed of surrounding whitespace.
fn tree_text(node: NodeRef<'_, Node>) -> String {
    match node.value() {
        Node::Text(text) => String::from(&**text),
        _ => {
            let joined: String = node.children().map(tree_text).collect();
            joined.trim().to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(doc: &dyn Document) -> Vec<String> {
        doc.decompose().iter().map(|d| d.text()).collect()
    }

    #[test]
    fn test_parser_reads_stream() {
        let mut input: &[u8] = b"<div id=\"hello\">Hello World</div>";
        let doc = HtmlParser.parse(&mut input).unwrap();
        assert_eq!(doc.filter("#hello").unwrap().text(), "Hello World");
    }

    #[test]
    fn test_filter_preserves_document_order() {
        let doc = HtmlDocument::parse("<ul><li>a</li><li>b</li></ul><ol><li>c</li></ol>");
        let items = doc.filter("li").unwrap();
        assert_eq!(items.len(), 3);
        assert_eq!(texts(items.as_ref()), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_filter_no_match_is_error() {
        let doc = HtmlDocument::parse("<p>text</p>");
        let err = doc.filter("table").err().unwrap();
        assert!(matches!(err, DecodeError::NoMatch { selector } if selector == "table"));
    }

    #[test]
    fn test_filter_invalid_selector() {
        let doc = HtmlDocument::parse("<p>text</p>");
        let err = doc.filter("p[").err().unwrap();
        assert!(matches!(err, DecodeError::InvalidSelector { .. }));
    }

    #[test]
    fn test_filter_trailing_slash_selects_elements() {
        let doc = HtmlDocument::parse(r#"<div><a href="/x">link</a></div>"#);
        let links = doc.filter("div a/").unwrap();
        assert_eq!(links.text(), "link");
    }

    #[test]
    fn test_filter_invalid_selector_message_is_one_line() {
        let doc = HtmlDocument::parse("<div><a>x</a></div>");
        for selector in ["a !", "div $ a", "/href", "div / a", "p["] {
            let err = doc.filter(selector).err().unwrap();
            let DecodeError::InvalidSelector { message, .. } = &err else {
                panic!("expected invalid selector error for {selector:?}, got {err:?}");
            };
            assert!(!message.is_empty());
            assert!(!message.contains('\n'), "{selector:?}: {message}");
            assert!(!message.contains("report this"), "{selector:?}: {message}");
        }
    }

    #[test]
    fn test_filter_within_decomposed_nodes() {
        let doc = HtmlDocument::parse(
            "<ul><li><i>Eenie</i>Nope</li><li><i>Meenie</i>Nope Either</li></ul>",
        );
        let items = doc.filter("ul li").unwrap().decompose();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].filter("i").unwrap().text(), "Eenie");
        assert_eq!(items[1].filter("i").unwrap().text(), "Meenie");
    }

    #[test]
    fn test_filter_includes_held_node_itself() {
        let doc = HtmlDocument::parse("<ul><li class=\"x\">one</li></ul>");
        let item = doc.filter("li").unwrap();
        assert_eq!(item.filter(".x").unwrap().text(), "one");
    }

    #[test]
    fn test_attribute_extraction() {
        let doc = HtmlDocument::parse(
            r#"<div><a href="http://deuill.org" target="_blank">Here!</a></div>"#,
        );
        let link = doc.filter("div a/href").unwrap();
        assert_eq!(link.text(), "http://deuill.org");
        assert_eq!(link.len(), 1);
    }

    #[test]
    fn test_attribute_missing_on_any_match_fails() {
        let doc = HtmlDocument::parse(r#"<a href="/one">1</a><a>2</a>"#);
        let err = doc.filter("a/href").err().unwrap();
        assert!(matches!(
            err,
            DecodeError::MissingAttribute { attribute, selector } if attribute == "href" && selector == "a"
        ));
    }

    #[test]
    fn test_attribute_nodes_decompose() {
        let doc = HtmlDocument::parse(r#"<img src="a.png"><img src="b.png">"#);
        let sources = doc.filter("img/src").unwrap();
        assert_eq!(texts(sources.as_ref()), vec!["a.png", "b.png"]);
        assert_eq!(sources.text(), "a.pngb.png");
    }

    #[test]
    fn test_filter_on_attribute_nodes_matches_nothing() {
        let doc = HtmlDocument::parse(r#"<img src="a.png">"#);
        let sources = doc.filter("img/src").unwrap();
        assert!(sources.filter("img").is_err());
    }

    #[test]
    fn test_text_trims_elements_but_keeps_inner_spacing() {
        let doc = HtmlDocument::parse("<p>\n  Hello <b> big </b> World\n</p>");
        assert_eq!(doc.filter("p").unwrap().text(), "Hello big World");
    }

    #[test]
    fn test_text_of_empty_element() {
        let doc = HtmlDocument::parse("<span id=\"empty\"></span>");
        assert_eq!(doc.filter("#empty").unwrap().text(), "");
    }

    #[test]
    fn test_decompose_single_node() {
        let doc = HtmlDocument::parse("<p>only</p>");
        let parts = doc.filter("p").unwrap().decompose();
        assert_eq!(parts.len(), 1);
        assert_eq!(parts[0].text(), "only");
        assert_eq!(parts[0].len(), 1);
        assert!(!parts[0].is_empty());
    }
}
