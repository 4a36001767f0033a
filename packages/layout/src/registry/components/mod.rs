//! Built-in node types.
//!
//! Structural types (`Structure`, `Container`, `Grid`, `Row`, `Cell`) build
//! their element children recursively. Content types render leaf markup.

mod content;
mod structural;

use std::sync::Arc;

use crate::config::CLASS_ATTRIBUTE;
use crate::context::PageContext;
use crate::registry::node::{join_classes, NodeSpec};
use crate::xml::Element;

pub use content::{Html, MainContent, Silent, CONTENT_KEY};
pub use structural::{Container, ContainerKind};

pub(crate) use content::{html, main_content, silent};
pub(crate) use structural::{cell, container, grid, row, structure};

/// State shared by all built-in node types.
#[derive(Debug, Clone)]
pub(crate) struct NodeBase {
    context: Option<Arc<PageContext>>,
    element: Arc<Element>,
    indent: usize,
    class: String,
}

impl NodeBase {
    /// Take over constructor arguments, appending the element's own classes.
    fn from_spec(spec: NodeSpec) -> Self {
        let class = join_classes([
            spec.class.as_str(),
            spec.element.attribute(CLASS_ATTRIBUTE).unwrap_or_default(),
        ]);

        Self {
            context: spec.context,
            element: spec.element,
            indent: spec.indent,
            class,
        }
    }
}
