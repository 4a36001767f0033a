//! Chameleon Layout - build component trees from declarative XML layouts.
//!
//! A layout file describes the visual structure of a page with nested
//! `structure`, `grid`, `row`, `cell` and `component` elements. The
//! interpreter resolves every element to a registered node type, builds
//! the tree and wraps nodes in the modifications declared as their
//! `modification` children.
//!
//! # Example
//!
//! ```no_run
//! use chameleon_layout::LayoutInterpreter;
//!
//! let interpreter = LayoutInterpreter::new("skins/default/layout.xml")?;
//! let root = interpreter.get_root_component()?;
//! print!("{}", root.render()?);
//! # Ok::<(), chameleon_layout::LayoutError>(())
//! ```
//!
//! # Architecture
//!
//! - [`config`]: Constants and layout file validation
//! - [`error`]: Error types and Result alias
//! - [`xml`]: Owned XML element tree and helpers
//! - [`context`]: Per-render page context
//! - [`registry`]: Node capability, type registry and built-in types
//! - [`interpreter`]: Parse-and-build pipeline
//! - [`outline`]: Serializable tree summary
//! - [`cli`]: Command-line interface

pub mod cli;
pub mod config;
pub mod context;
pub mod error;
pub mod interpreter;
pub mod outline;
pub mod registry;
pub mod xml;

pub use context::PageContext;
pub use error::{LayoutError, Result, StructureError};
pub use interpreter::LayoutInterpreter;
pub use outline::NodeOutline;
pub use registry::{create_default_registry, LayoutNode, Modification, NodeBuilder, NodeRegistry};
