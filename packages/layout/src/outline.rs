//! Serializable summary of a built layout tree.

use std::fmt;

use serde::Serialize;

use crate::registry::LayoutNode;

/// Shape of a layout node and its subtree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NodeOutline {
    /// Fully qualified node type name.
    #[serde(rename = "type")]
    pub type_name: String,

    /// Source line of the describing element.
    pub line: u32,

    /// CSS class string.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub class: String,

    /// Wrapped node, for modifications.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wraps: Option<Box<NodeOutline>>,

    /// Child nodes, for everything else.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NodeOutline>,
}

impl NodeOutline {
    /// Summarize a node and its subtree.
    #[must_use]
    pub fn of(node: &dyn LayoutNode) -> Self {
        if let Some(modification) = node.as_modification() {
            return Self {
                type_name: node.type_name().to_string(),
                line: modification.modification_element().line(),
                class: String::new(),
                wraps: Some(Box::new(Self::of(modification.inner()))),
                children: Vec::new(),
            };
        }

        Self {
            type_name: node.type_name().to_string(),
            line: node.element().line(),
            class: node.class().to_string(),
            wraps: None,
            children: node.children().iter().map(|c| Self::of(c.as_ref())).collect(),
        }
    }

    /// Number of nodes in the tree, not counting modification wrappers.
    #[must_use]
    pub fn node_count(&self) -> usize {
        match &self.wraps {
            Some(inner) => inner.node_count(),
            None => 1 + self.children.iter().map(Self::node_count).sum::<usize>(),
        }
    }

    fn write_indented(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
        let pad = "  ".repeat(depth);
        write!(f, "{pad}{} (line {})", self.type_name, self.line)?;
        if !self.class.is_empty() {
            write!(f, " .{}", self.class.replace(' ', "."))?;
        }
        writeln!(f)?;

        if let Some(inner) = &self.wraps {
            inner.write_indented(f, depth + 1)?;
        }
        for child in &self.children {
            child.write_indented(f, depth + 1)?;
        }
        Ok(())
    }
}

impl fmt::Display for NodeOutline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_indented(f, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn leaf(type_name: &str, line: u32) -> NodeOutline {
        NodeOutline {
            type_name: type_name.to_string(),
            line,
            class: String::new(),
            wraps: None,
            children: Vec::new(),
        }
    }

    fn sample() -> NodeOutline {
        let mut row = leaf("Components.Row", 2);
        row.class = "top wide".to_string();
        row.children.push(NodeOutline {
            type_name: "Components.Modifications.Sticky".to_string(),
            line: 4,
            class: String::new(),
            wraps: Some(Box::new(leaf("Components.Cell", 3))),
            children: Vec::new(),
        });

        let mut root = leaf("Components.Structure", 1);
        root.children.push(row);
        root
    }

    #[test]
    fn test_node_count_skips_wrappers() {
        assert_eq!(sample().node_count(), 3);
    }

    #[test]
    fn test_display() {
        assert_eq!(
            sample().to_string(),
            "Components.Structure (line 1)\n\
             \x20\x20Components.Row (line 2) .top.wide\n\
             \x20\x20\x20\x20Components.Modifications.Sticky (line 4)\n\
             \x20\x20\x20\x20\x20\x20Components.Cell (line 3)\n"
        );
    }

    #[test]
    fn test_serialize_skips_empty_fields() {
        let json = serde_json::to_value(leaf("Components.Silent", 7)).unwrap();
        assert_eq!(json, serde_json::json!({ "type": "Components.Silent", "line": 7 }));
    }
}
