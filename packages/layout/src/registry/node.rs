//! Layout node capability and factory definitions.

use std::fmt;
use std::sync::Arc;

use crate::context::PageContext;
use crate::error::Result;
use crate::xml::Element;

/// Arguments every node type is constructed from.
#[derive(Debug, Clone)]
pub struct NodeSpec {
    /// Shared page context, if the host has set one.
    pub context: Option<Arc<PageContext>>,

    /// The element describing this node.
    pub element: Arc<Element>,

    /// Nesting depth used for output indentation.
    pub indent: usize,

    /// CSS classes handed down by the parent.
    pub class: String,
}

impl NodeSpec {
    /// Create constructor arguments without a page context.
    #[must_use]
    pub fn new(element: Arc<Element>, indent: usize, class: impl Into<String>) -> Self {
        Self {
            context: None,
            element,
            indent,
            class: class.into(),
        }
    }

    /// Set the page context.
    #[must_use]
    pub fn with_context(mut self, context: Option<Arc<PageContext>>) -> Self {
        self.context = context;
        self
    }
}

/// Something that can build a node (and its subtree) from an element.
///
/// Node types receive a builder so they can build their structural
/// children with the same registry and modification handling.
pub trait NodeBuilder {
    /// Build the node described by `element`.
    ///
    /// # Errors
    /// Returns an error if the element or any descendant is invalid.
    fn build_node(
        &self,
        element: &Arc<Element>,
        indent: usize,
        class: &str,
    ) -> Result<Box<dyn LayoutNode>>;
}

/// Capability shared by all nodes of a layout tree.
pub trait LayoutNode: fmt::Debug + Send + Sync {
    /// Fully qualified type name, e.g. `Components.Grid`.
    fn type_name(&self) -> &str;

    /// The element describing this node.
    fn element(&self) -> &Arc<Element>;

    /// Nesting depth.
    fn indent(&self) -> usize;

    /// CSS class string of this node.
    fn class(&self) -> &str;

    /// Page context the node was constructed with.
    fn page_context(&self) -> Option<&Arc<PageContext>>;

    /// Child nodes in document order.
    fn children(&self) -> &[Box<dyn LayoutNode>] {
        &[]
    }

    /// Attach a child node.
    ///
    /// Leaf node types ignore children.
    fn add_child(&mut self, child: Box<dyn LayoutNode>) {
        tracing::debug!(
            node = self.type_name(),
            child = child.type_name(),
            "Leaf node ignores child"
        );
    }

    /// Render the node as HTML.
    ///
    /// # Errors
    /// Returns an error if a component lacks data it needs.
    fn render(&self) -> Result<String>;

    /// This node as a modification, if it is one.
    fn as_modification(&self) -> Option<&dyn Modification> {
        None
    }
}

/// A node decorator declared by a `modification` element.
pub trait Modification: LayoutNode {
    /// The wrapped node.
    fn inner(&self) -> &dyn LayoutNode;

    /// The `modification` element describing this decorator.
    fn modification_element(&self) -> &Arc<Element>;
}

/// Constructor of a node type.
pub type NodeFactory = fn(NodeSpec, &dyn NodeBuilder) -> Result<Box<dyn LayoutNode>>;

/// Constructor of a modification type.
pub type ModificationFactory =
    fn(Box<dyn LayoutNode>, Arc<Element>) -> Result<Box<dyn LayoutNode>>;

/// Prefix each line of `html` with `indent` tabs.
pub fn indent_lines(html: &str, indent: usize) -> String {
    let prefix = "\t".repeat(indent);
    html.lines()
        .map(|line| format!("{prefix}{line}\n"))
        .collect()
}

/// Join a parent class string with an element's own `class` attribute.
pub fn join_classes<'a>(parts: impl IntoIterator<Item = &'a str>) -> String {
    parts
        .into_iter()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Escape a value for use inside a double-quoted HTML attribute.
pub fn escape_attribute(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
