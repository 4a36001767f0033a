//! Node type registry and the node capability.
//!
//! Node and modification types are registered under their short names.
//! Elements are resolved to a registered factory by tag name or by their
//! `type` attribute; unknown names are structural errors.

pub mod components;
mod config;
mod core;
pub mod modifications;
mod node;

pub use config::create_default_registry;
pub use core::{ModificationHandle, NodeRegistry, TypeHandle};
pub use node::{
    escape_attribute, indent_lines, join_classes, LayoutNode, Modification, ModificationFactory,
    NodeBuilder, NodeFactory, NodeSpec,
};
