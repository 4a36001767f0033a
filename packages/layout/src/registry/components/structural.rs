//! Structural node types that contain other nodes.

use std::sync::Arc;

use super::NodeBase;
use crate::context::PageContext;
use crate::error::Result;
use crate::registry::node::{escape_attribute, join_classes, LayoutNode, NodeBuilder, NodeSpec};
use crate::xml::Element;

/// Maximum number of columns a cell can span.
const GRID_COLUMNS: u8 = 12;

/// Flavor of a structural node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerKind {
    /// `<component>` without a type.
    Container,
    /// `<structure>`, the layout root.
    Structure,
    /// `<grid>`.
    Grid,
    /// `<row>` inside a grid.
    Row,
    /// `<cell>` inside a row.
    Cell,
}

impl ContainerKind {
    /// Fully qualified node type name of this kind.
    #[must_use]
    pub fn type_name(self) -> &'static str {
        match self {
            Self::Container => "Components.Container",
            Self::Structure => "Components.Structure",
            Self::Grid => "Components.Grid",
            Self::Row => "Components.Row",
            Self::Cell => "Components.Cell",
        }
    }
}

/// A node rendering its children inside a `div`.
#[derive(Debug)]
pub struct Container {
    kind: ContainerKind,
    base: NodeBase,
    children: Vec<Box<dyn LayoutNode>>,
}

impl Container {
    /// Construct a container and build all its element children.
    ///
    /// Children are built one level deeper. `modification` children become
    /// silent nodes here and are applied as wrappers by the builder.
    ///
    /// # Errors
    /// Returns the first error raised while building a child.
    pub fn build(kind: ContainerKind, spec: NodeSpec, builder: &dyn NodeBuilder) -> Result<Self> {
        let mut container = Self {
            kind,
            base: NodeBase::from_spec(spec),
            children: Vec::new(),
        };

        let element = Arc::clone(&container.base.element);
        for child in element.element_children() {
            let node = builder.build_node(child, container.base.indent + 1, "")?;
            container.add_child(node);
        }

        Ok(container)
    }

    /// Flavor of this container.
    #[must_use]
    pub fn kind(&self) -> ContainerKind {
        self.kind
    }

    /// Classes implied by the container kind.
    fn kind_class(&self) -> String {
        let element = &self.base.element;
        match self.kind {
            ContainerKind::Container | ContainerKind::Structure => String::new(),
            ContainerKind::Grid => match element.attribute("mode") {
                Some("fluid") => "container-fluid".to_string(),
                _ => "container".to_string(),
            },
            ContainerKind::Row => "row".to_string(),
            ContainerKind::Cell => format!("col-{}", cell_span(element)),
        }
    }
}

/// Column span of a cell, defaulting to the full grid width.
fn cell_span(element: &Element) -> u8 {
    match element.attribute("span").map(|s| s.trim().parse::<u8>()) {
        Some(Ok(span)) => span.clamp(1, GRID_COLUMNS),
        Some(Err(_)) => {
            tracing::debug!(line = element.line(), "Invalid cell span, using full width");
            GRID_COLUMNS
        }
        None => GRID_COLUMNS,
    }
}

impl LayoutNode for Container {
    fn type_name(&self) -> &str {
        self.kind.type_name()
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

    fn children(&self) -> &[Box<dyn LayoutNode>] {
        &self.children
    }

    fn add_child(&mut self, child: Box<dyn LayoutNode>) {
        self.children.push(child);
    }

    fn render(&self) -> Result<String> {
        let prefix = "\t".repeat(self.base.indent);
        let class = join_classes([self.kind_class().as_str(), self.base.class.as_str()]);

        let mut html = if class.is_empty() {
            format!("{prefix}<div>\n")
        } else {
            format!("{prefix}<div class=\"{}\">\n", escape_attribute(&class))
        };
        for child in &self.children {
            html.push_str(&child.render()?);
        }
        html.push_str(&format!("{prefix}</div>\n"));

        Ok(html)
    }
}

pub(crate) fn container(spec: NodeSpec, builder: &dyn NodeBuilder) -> Result<Box<dyn LayoutNode>> {
    Ok(Box::new(Container::build(ContainerKind::Container, spec, builder)?))
}

pub(crate) fn structure(spec: NodeSpec, builder: &dyn NodeBuilder) -> Result<Box<dyn LayoutNode>> {
    Ok(Box::new(Container::build(ContainerKind::Structure, spec, builder)?))
}

pub(crate) fn grid(spec: NodeSpec, builder: &dyn NodeBuilder) -> Result<Box<dyn LayoutNode>> {
    Ok(Box::new(Container::build(ContainerKind::Grid, spec, builder)?))
}

pub(crate) fn row(spec: NodeSpec, builder: &dyn NodeBuilder) -> Result<Box<dyn LayoutNode>> {
    Ok(Box::new(Container::build(ContainerKind::Row, spec, builder)?))
}

pub(crate) fn cell(spec: NodeSpec, builder: &dyn NodeBuilder) -> Result<Box<dyn LayoutNode>> {
    Ok(Box::new(Container::build(ContainerKind::Cell, spec, builder)?))
}
