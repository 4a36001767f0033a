//! Registry configuration with the built-in node and modification types.

use super::components::{cell, container, grid, html, main_content, row, silent, structure};
use super::core::NodeRegistry;
use super::modifications::{hide_for, show_only_for, sticky};

/// Create a registry with all built-in types.
///
/// Hosts add their own component types on top of this registry.
#[must_use]
pub fn create_default_registry() -> NodeRegistry {
    let mut registry = NodeRegistry::new();

    // Structural types, resolved from tag names
    registry.register_component("Structure", structure);
    registry.register_component("Grid", grid);
    registry.register_component("Row", row);
    registry.register_component("Cell", cell);

    // Default for <component> without a type
    registry.register_component("Container", container);

    // <modification> elements seen as structural children
    registry.register_component("Silent", silent);

    // Content components
    registry.register_component("Html", html);
    registry.register_component("MainContent", main_content);

    registry.register_modification("HideFor", hide_for);
    registry.register_modification("ShowOnlyFor", show_only_for);
    registry.register_modification("Sticky", sticky);

    registry
}
