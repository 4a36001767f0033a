//! Owned, line-annotated XML element tree.
//!
//! `roxmltree` documents borrow their input, so layout nodes could not keep
//! their describing element once the file buffer is dropped. The parsed
//! document is therefore converted once into this owned tree, which nodes
//! share through `Arc`.

use std::sync::Arc;

use roxmltree::{Document, Node};
use thiserror::Error;

use crate::config::MAX_DEPTH;
use crate::error::StructureError;

/// Failure to turn XML text into an element tree.
#[derive(Debug, Error)]
pub enum DocumentError {
    /// The input is not well-formed XML.
    #[error(transparent)]
    Parse(#[from] roxmltree::Error),

    /// The input is well-formed but violates the layout structure.
    #[error(transparent)]
    Structure(#[from] StructureError),
}

/// Child of an element: another element, merged text, or a comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum XmlNode {
    Element(Arc<Element>),
    Text(String),
    Comment(String),
}

impl XmlNode {
    /// The element, if this child is one.
    #[must_use]
    pub fn as_element(&self) -> Option<&Arc<Element>> {
        match self {
            Self::Element(element) => Some(element),
            _ => None,
        }
    }
}

/// An XML element with its attributes, children and source line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    name: String,
    attributes: Vec<(String, String)>,
    line: u32,
    children: Vec<XmlNode>,
}

impl Element {
    /// Create an element without attributes or children.
    #[must_use]
    pub fn new(name: impl Into<String>, line: u32) -> Self {
        Self {
            name: name.into(),
            line,
            ..Self::default()
        }
    }

    /// Add an attribute.
    #[must_use]
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((name.into(), value.into()));
        self
    }

    /// Add a child element.
    #[must_use]
    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(XmlNode::Element(Arc::new(child)));
        self
    }

    /// Add text content, merging with preceding text.
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.push_text(&text.into());
        self
    }

    /// Tag name without namespace prefix.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// 1-based source line of the start tag.
    #[must_use]
    pub fn line(&self) -> u32 {
        self.line
    }

    /// Attribute value by name.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    #[must_use]
    pub fn has_attribute(&self, name: &str) -> bool {
        self.attribute(name).is_some()
    }

    /// All attributes in document order.
    #[must_use]
    pub fn attributes(&self) -> &[(String, String)] {
        &self.attributes
    }

    /// Direct children, including text and comments.
    #[must_use]
    pub fn children(&self) -> &[XmlNode] {
        &self.children
    }

    /// Direct element children.
    pub fn element_children(&self) -> impl Iterator<Item = &Arc<Element>> {
        self.children.iter().filter_map(XmlNode::as_element)
    }

    /// Concatenated text of this element and all its descendants.
    #[must_use]
    pub fn text_content(&self) -> String {
        let mut text = String::new();
        self.collect_text(&mut text);
        text
    }

    fn collect_text(&self, out: &mut String) {
        for child in &self.children {
            match child {
                XmlNode::Element(element) => element.collect_text(out),
                XmlNode::Text(text) => out.push_str(text),
                XmlNode::Comment(_) => {}
            }
        }
    }

    fn push_text(&mut self, text: &str) {
        if let Some(XmlNode::Text(previous)) = self.children.last_mut() {
            previous.push_str(text);
        } else {
            self.children.push(XmlNode::Text(text.to_string()));
        }
    }

    /// Convert a `roxmltree` element (and its subtree) into an owned element.
    ///
    /// Adjacent text nodes are merged; processing instructions are dropped.
    ///
    /// # Errors
    /// Returns `TooDeep` if elements nest more than [`MAX_DEPTH`] levels
    /// below `node`.
    pub fn from_node(doc: &Document<'_>, node: Node<'_, '_>) -> Result<Self, StructureError> {
        Self::convert(doc, node, 1)
    }

    fn convert(doc: &Document<'_>, node: Node<'_, '_>, depth: usize) -> Result<Self, StructureError> {
        let line = line_of(doc, node);
        if depth > MAX_DEPTH {
            return Err(StructureError::TooDeep {
                line,
                limit: MAX_DEPTH,
            });
        }

        let mut element = Element::new(node.tag_name().name(), line);

        element.attributes = node
            .attributes()
            .map(|attr| (attr.name().to_string(), attr.value().to_string()))
            .collect();

        for child in node.children() {
            if child.is_element() {
                let converted = Self::convert(doc, child, depth + 1)?;
                element.children.push(XmlNode::Element(Arc::new(converted)));
            } else if child.is_text() {
                if let Some(text) = child.text() {
                    element.push_text(text);
                }
            } else if child.is_comment() {
                if let Some(text) = child.text() {
                    element.children.push(XmlNode::Comment(text.to_string()));
                }
            }
        }

        Ok(element)
    }
}

/// 1-based line number of a node's start position.
pub fn line_of(doc: &Document<'_>, node: Node<'_, '_>) -> u32 {
    doc.text_pos_at(node.range().start).row
}

/// Parse XML text and return its document element as an owned tree.
///
/// # Errors
/// * `Parse` if the input is not well-formed
/// * `Structure` with `TooDeep` if elements nest deeper than [`MAX_DEPTH`]
pub fn parse_document(xml: &str) -> Result<Arc<Element>, DocumentError> {
    let doc = Document::parse(xml)?;
    Ok(Arc::new(Element::from_node(&doc, doc.root_element())?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_document_lines_and_attributes() {
        let xml = "<layout>\n  <structure>\n    <grid mode=\"fluid\"/>\n  </structure>\n</layout>";
        let root = parse_document(xml).unwrap();

        assert_eq!(root.name(), "layout");
        assert_eq!(root.line(), 1);

        let structure = root.element_children().next().unwrap();
        assert_eq!(structure.name(), "structure");
        assert_eq!(structure.line(), 2);

        let grid = structure.element_children().next().unwrap();
        assert_eq!(grid.line(), 3);
        assert_eq!(grid.attribute("mode"), Some("fluid"));
        assert!(!grid.has_attribute("type"));
    }

    #[test]
    fn test_comments_are_not_elements() {
        let root = parse_document("<structure><!-- note --><row/>text</structure>").unwrap();

        assert_eq!(root.children().len(), 3);
        assert!(matches!(root.children()[0], XmlNode::Comment(_)));
        assert_eq!(root.element_children().count(), 1);
        assert_eq!(root.text_content(), "text");
    }

    #[test]
    fn test_builder_merges_text() {
        let element = Element::new("component", 1).with_text("a").with_text("b");
        assert_eq!(element.children(), &[XmlNode::Text("ab".to_string())]);
    }

    #[test]
    fn test_parse_document_malformed() {
        assert!(matches!(
            parse_document("<structure><row></structure>"),
            Err(DocumentError::Parse(_))
        ));
    }

    fn nested_cells(depth: usize) -> String {
        format!(
            "<structure>\n{}{}</structure>",
            "<cell>".repeat(depth),
            "</cell>".repeat(depth)
        )
    }

    #[test]
    fn test_nesting_at_limit_is_accepted() {
        // structure plus cells reaches exactly the limit
        assert!(parse_document(&nested_cells(MAX_DEPTH - 1)).is_ok());
    }

    #[test]
    fn test_nesting_past_limit_is_rejected() {
        let err = parse_document(&nested_cells(MAX_DEPTH)).unwrap_err();
        match err {
            DocumentError::Structure(StructureError::TooDeep { line, limit }) => {
                assert_eq!(line, 2);
                assert_eq!(limit, MAX_DEPTH);
            }
            other => panic!("expected TooDeep, got {other}"),
        }
    }

    #[test]
    fn test_very_deep_nesting_returns_error() {
        let result = parse_document(&nested_cells(20_000));
        assert!(matches!(
            result,
            Err(DocumentError::Structure(StructureError::TooDeep { .. }))
        ));
    }
}
