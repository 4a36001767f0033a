//! Built-in modifications.
//!
//! A modification wraps an already built node and changes how it renders
//! without changing the node's structure. Everything except rendering is
//! delegated to the wrapped node.

use std::sync::Arc;

use crate::context::PageContext;
use crate::error::Result;
use crate::registry::node::{LayoutNode, Modification};
use crate::xml::Element;

/// Behavior of a built-in modification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModificationKind {
    /// Hide the node for matching users.
    HideFor {
        groups: Vec<String>,
        permissions: Vec<String>,
    },
    /// Show the node only to matching users.
    ShowOnlyFor {
        groups: Vec<String>,
        permissions: Vec<String>,
    },
    /// Keep the node at the top of the viewport.
    Sticky,
}

impl ModificationKind {
    /// Fully qualified type name of this modification.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::HideFor { .. } => "Components.Modifications.HideFor",
            Self::ShowOnlyFor { .. } => "Components.Modifications.ShowOnlyFor",
            Self::Sticky => "Components.Modifications.Sticky",
        }
    }
}

/// A node wrapped by a built-in modification.
#[derive(Debug)]
pub struct Modified {
    kind: ModificationKind,
    inner: Box<dyn LayoutNode>,
    element: Arc<Element>,
}

impl Modified {
    #[must_use]
    pub fn new(kind: ModificationKind, inner: Box<dyn LayoutNode>, element: Arc<Element>) -> Self {
        Self {
            kind,
            inner,
            element,
        }
    }

    /// Behavior of this modification.
    #[must_use]
    pub fn kind(&self) -> &ModificationKind {
        &self.kind
    }

    /// Whether the page context matches the listed groups or permissions.
    ///
    /// Without a page context nothing matches.
    fn matches(&self, groups: &[String], permissions: &[String]) -> bool {
        self.inner.page_context().is_some_and(|ctx| {
            ctx.matches_any(
                groups.iter().map(String::as_str),
                permissions.iter().map(String::as_str),
            )
        })
    }
}

impl LayoutNode for Modified {
    fn type_name(&self) -> &str {
        self.kind.type_name()
    }

    fn element(&self) -> &Arc<Element> {
        self.inner.element()
    }

    fn indent(&self) -> usize {
        self.inner.indent()
    }

    fn class(&self) -> &str {
        self.inner.class()
    }

    fn page_context(&self) -> Option<&Arc<PageContext>> {
        self.inner.page_context()
    }

    fn children(&self) -> &[Box<dyn LayoutNode>] {
        self.inner.children()
    }

    fn add_child(&mut self, child: Box<dyn LayoutNode>) {
        self.inner.add_child(child);
    }

    fn render(&self) -> Result<String> {
        match &self.kind {
            ModificationKind::HideFor {
                groups,
                permissions,
            } => {
                if self.matches(groups, permissions) {
                    Ok(String::new())
                } else {
                    self.inner.render()
                }
            }
            ModificationKind::ShowOnlyFor {
                groups,
                permissions,
            } => {
                if self.matches(groups, permissions) {
                    self.inner.render()
                } else {
                    Ok(String::new())
                }
            }
            ModificationKind::Sticky => {
                let prefix = "\t".repeat(self.inner.indent());
                Ok(format!(
                    "{prefix}<div class=\"sticky-top\">\n{}{prefix}</div>\n",
                    self.inner.render()?
                ))
            }
        }
    }

    fn as_modification(&self) -> Option<&dyn Modification> {
        Some(self)
    }
}

impl Modification for Modified {
    fn inner(&self) -> &dyn LayoutNode {
        self.inner.as_ref()
    }

    fn modification_element(&self) -> &Arc<Element> {
        &self.element
    }
}

/// Split a comma-separated attribute into its trimmed, non-empty entries.
fn list_attribute(element: &Element, name: &str) -> Vec<String> {
    element
        .attribute(name)
        .map(|value| {
            value
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
                .collect()
        })
        .unwrap_or_default()
}

pub(crate) fn hide_for(
    inner: Box<dyn LayoutNode>,
    element: Arc<Element>,
) -> Result<Box<dyn LayoutNode>> {
    let kind = ModificationKind::HideFor {
        groups: list_attribute(&element, "group"),
        permissions: list_attribute(&element, "permission"),
    };
    Ok(Box::new(Modified::new(kind, inner, element)))
}

pub(crate) fn show_only_for(
    inner: Box<dyn LayoutNode>,
    element: Arc<Element>,
) -> Result<Box<dyn LayoutNode>> {
    let kind = ModificationKind::ShowOnlyFor {
        groups: list_attribute(&element, "group"),
        permissions: list_attribute(&element, "permission"),
    };
    Ok(Box::new(Modified::new(kind, inner, element)))
}

pub(crate) fn sticky(
    inner: Box<dyn LayoutNode>,
    element: Arc<Element>,
) -> Result<Box<dyn LayoutNode>> {
    Ok(Box::new(Modified::new(ModificationKind::Sticky, inner, element)))
}
