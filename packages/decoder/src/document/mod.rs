//! The queryable document abstraction produced by parsers.
//!
//! A `Document` is an ordered, non-empty set of nodes from one parsed input.
//! Documents are immutable: `filter` and `decompose` return new documents
//! over the same underlying tree.

mod html;
mod selector;

pub use html::{HtmlDocument, HtmlParser};
pub use selector::SelectorExpr;

use crate::error::Result;

/// Query surface over parsed content.
pub trait Document {
    /// Resolve `selector` against every held node.
    ///
    /// The result holds the union of matches in traversal order. A selector
    /// that matches nothing is an error, never an empty document. Selectors
    /// of the form `path/attribute` replace each matched node by a text node
    /// holding the attribute value, and fail if any match lacks it.
    fn filter(&self, selector: &str) -> Result<Box<dyn Document>>;

    /// Split into one single-node document per held node, preserving order.
    fn decompose(&self) -> Vec<Box<dyn Document>>;

    /// Concatenated text content of all held nodes, in document order.
    fn text(&self) -> String;

    /// Number of nodes held. Always at least one.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
