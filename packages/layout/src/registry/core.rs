//! Node type registry mapping names to node and modification factories.

use std::collections::{BTreeSet, HashMap};

use super::node::{ModificationFactory, NodeFactory};
use crate::config::{
    qualified_component_name, qualified_modification_name, BASE_MODIFICATION_TYPE,
    DEFAULT_COMPONENT_TYPE, SILENT_COMPONENT_TYPE, TYPE_ATTRIBUTE,
};
use crate::error::StructureError;
use crate::xml::{lowercase_name, Element};

/// A resolved node type.
#[derive(Clone, Copy)]
pub struct TypeHandle<'r> {
    /// Short type name, e.g. `Grid`.
    pub name: &'r str,

    /// Constructor of the type.
    pub factory: NodeFactory,
}

impl TypeHandle<'_> {
    /// Fully qualified name, e.g. `Components.Grid`.
    #[must_use]
    pub fn qualified_name(&self) -> String {
        qualified_component_name(self.name)
    }
}

/// A resolved modification type.
#[derive(Clone, Copy)]
pub struct ModificationHandle<'r> {
    /// Short type name, e.g. `Sticky`.
    pub name: &'r str,

    /// Constructor of the modification.
    pub factory: ModificationFactory,
}

impl ModificationHandle<'_> {
    /// Fully qualified name, e.g. `Components.Modifications.Sticky`.
    #[must_use]
    pub fn qualified_name(&self) -> String {
        qualified_modification_name(self.name)
    }
}

/// Registry of node and modification types.
///
/// Resolution is a pure lookup; nothing is instantiated.
#[derive(Default)]
pub struct NodeRegistry {
    components: HashMap<String, NodeFactory>,
    modifications: HashMap<String, ModificationFactory>,
}

impl NodeRegistry {
    /// Create a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a node type under the component namespace.
    pub fn register_component(&mut self, name: impl Into<String>, factory: NodeFactory) {
        self.components.insert(name.into(), factory);
    }

    /// Register a modification type under the modification namespace.
    ///
    /// The base name `Modification` is reserved and ignored.
    pub fn register_modification(&mut self, name: impl Into<String>, factory: ModificationFactory) {
        let name = name.into();
        if name == BASE_MODIFICATION_TYPE {
            tracing::warn!(name = %name, "Refusing to register the base modification type");
            return;
        }
        self.modifications.insert(name, factory);
    }

    /// Check if a node type is registered.
    #[must_use]
    pub fn has_component(&self, name: &str) -> bool {
        self.components.contains_key(name)
    }

    /// Check if a modification type is registered.
    #[must_use]
    pub fn has_modification(&self, name: &str) -> bool {
        self.modifications.contains_key(name)
    }

    /// Sorted names of all registered node types.
    #[must_use]
    pub fn component_names(&self) -> BTreeSet<&str> {
        self.components.keys().map(String::as_str).collect()
    }

    /// Sorted names of all registered modification types.
    #[must_use]
    pub fn modification_names(&self) -> BTreeSet<&str> {
        self.modifications.keys().map(String::as_str).collect()
    }

    /// Resolve the node type an element describes.
    ///
    /// # Errors
    /// * `ElementNotAllowed` for names outside the layout vocabulary
    /// * `InvalidComponentType` if the resolved type is not registered
    pub fn resolve_class_name(&self, element: &Element) -> Result<TypeHandle<'_>, StructureError> {
        let tag_name = lowercase_name(element);

        let type_name = match tag_name.as_str() {
            "structure" | "grid" | "row" | "cell" => capitalize(&tag_name),
            "component" => element
                .attribute(TYPE_ATTRIBUTE)
                .unwrap_or(DEFAULT_COMPONENT_TYPE)
                .to_string(),
            "modification" => SILENT_COMPONENT_TYPE.to_string(),
            _ => {
                return Err(StructureError::ElementNotAllowed {
                    line: element.line(),
                    name: element.name().to_string(),
                })
            }
        };

        self.components
            .get_key_value(type_name.as_str())
            .map(|(name, factory)| TypeHandle {
                name: name.as_str(),
                factory: *factory,
            })
            .ok_or(StructureError::InvalidComponentType {
                line: element.line(),
                type_name,
            })
    }

    /// Resolve the modification type a `modification` element names.
    ///
    /// # Errors
    /// * `MissingModificationType` if the element has no `type` attribute
    /// * `InvalidModificationType` if the type is not registered
    pub fn resolve_modification(
        &self,
        element: &Element,
    ) -> Result<ModificationHandle<'_>, StructureError> {
        let type_name = element
            .attribute(TYPE_ATTRIBUTE)
            .ok_or(StructureError::MissingModificationType {
                line: element.line(),
            })?;

        self.modifications
            .get_key_value(type_name)
            .map(|(name, factory)| ModificationHandle {
                name: name.as_str(),
                factory: *factory,
            })
            .ok_or_else(|| StructureError::InvalidModificationType {
                line: element.line(),
                type_name: type_name.to_string(),
            })
    }
}

fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
