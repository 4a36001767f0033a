//! Leaf node types.

use std::sync::Arc;

use super::NodeBase;
use crate::context::PageContext;
use crate::error::{LayoutError, Result};
use crate::registry::node::{indent_lines, LayoutNode, NodeBuilder, NodeSpec};
use crate::xml::Element;

/// Page context key holding the main page content.
pub const CONTENT_KEY: &str = "content";

/// Node that renders nothing.
///
/// `modification` elements show up as silent nodes among their parent's
/// structural children.
#[derive(Debug)]
pub struct Silent {
    base: NodeBase,
}

impl Silent {
    #[must_use]
    pub fn new(spec: NodeSpec) -> Self {
        Self {
            base: NodeBase::from_spec(spec),
        }
    }
}

impl LayoutNode for Silent {
    fn type_name(&self) -> &str {
        "Components.Silent"
    }

    fn element(&self) -> &Arc<Element> {
        &self.base.element
    }

    fn indent(&self) -> usize {
        self.base.indent
    }

    fn class(&self) -> &str {
        &self.base.class
    }

    fn page_context(&self) -> Option<&Arc<PageContext>> {
        self.base.context.as_ref()
    }

    fn render(&self) -> Result<String> {
        Ok(String::new())
    }
}

/// Node rendering the text content of its element verbatim.
#[derive(Debug)]
pub struct Html {
    base: NodeBase,
}

impl LayoutNode for Html {
    fn type_name(&self) -> &str {
        "Components.Html"
    }

    fn element(&self) -> &Arc<Element> {
        &self.base.element
    }

    fn indent(&self) -> usize {
        self.base.indent
    }

    fn class(&self) -> &str {
        &self.base.class
    }

    fn page_context(&self) -> Option<&Arc<PageContext>> {
        self.base.context.as_ref()
    }

    fn render(&self) -> Result<String> {
        let text = self.base.element.text_content();
        Ok(indent_lines(text.trim(), self.base.indent))
    }
}

/// Node rendering the page content supplied through the page context.
#[derive(Debug)]
pub struct MainContent {
    base: NodeBase,
    context: Arc<PageContext>,
}

impl MainContent {
    /// # Errors
    /// Returns `MissingPageContext` if no page context was set.
    pub fn new(spec: NodeSpec) -> Result<Self> {
        let context = spec
            .context
            .clone()
            .ok_or_else(|| LayoutError::MissingPageContext {
                type_name: "Components.MainContent".to_string(),
            })?;

        Ok(Self {
            base: NodeBase::from_spec(spec),
            context,
        })
    }
}

impl LayoutNode for MainContent {
    fn type_name(&self) -> &str {
        "Components.MainContent"
    }

    fn element(&self) -> &Arc<Element> {
        &self.base.element
    }

    fn indent(&self) -> usize {
        self.base.indent
    }

    fn class(&self) -> &str {
        &self.base.class
    }

    fn page_context(&self) -> Option<&Arc<PageContext>> {
        Some(&self.context)
    }

    fn render(&self) -> Result<String> {
        let content = self.context.value(CONTENT_KEY).unwrap_or_default();
        Ok(indent_lines(content, self.base.indent))
    }
}

pub(crate) fn silent(spec: NodeSpec, _builder: &dyn NodeBuilder) -> Result<Box<dyn LayoutNode>> {
    Ok(Box::new(Silent::new(spec)))
}

pub(crate) fn html(spec: NodeSpec, _builder: &dyn NodeBuilder) -> Result<Box<dyn LayoutNode>> {
    Ok(Box::new(Html {
        base: NodeBase::from_spec(spec),
    }))
}

pub(crate) fn main_content(
    spec: NodeSpec,
    _builder: &dyn NodeBuilder,
) -> Result<Box<dyn LayoutNode>> {
    Ok(Box::new(MainContent::new(spec)?))
}
