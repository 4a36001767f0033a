//! Layout interpreter that builds node trees from layout files.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use once_cell::sync::OnceCell;

use crate::config::{validate_layout_file, ROOT_ELEMENT};
use crate::context::PageContext;
use crate::error::{LayoutError, Result, StructureError};
use crate::registry::{create_default_registry, LayoutNode, NodeBuilder, NodeRegistry, NodeSpec};
use crate::xml::{find_descendant, is_modification, parse_document, DocumentError, Element};

/// Interpreter turning a layout file into a tree of layout nodes.
///
/// The file is parsed lazily on the first call to
/// [`get_root_component`](Self::get_root_component). Both the parsed
/// document and the root node are computed at most once per interpreter
/// (per layout file) and then reused.
pub struct LayoutInterpreter {
    registry: NodeRegistry,
    layout_file: PathBuf,
    context: Option<Arc<PageContext>>,
    document: OnceCell<Arc<Element>>,
    root: OnceCell<Arc<dyn LayoutNode>>,
}

impl LayoutInterpreter {
    /// Create an interpreter with the built-in node types.
    ///
    /// # Errors
    /// Returns `Configuration` if the layout file cannot be read.
    pub fn new(layout_file: &str) -> Result<Self> {
        Self::with_registry(layout_file, create_default_registry())
    }

    /// Create an interpreter resolving node types through `registry`.
    ///
    /// # Errors
    /// Returns `Configuration` if the layout file cannot be read.
    pub fn with_registry(layout_file: &str, registry: NodeRegistry) -> Result<Self> {
        Ok(Self {
            registry,
            layout_file: validate_layout_file(layout_file)?,
            context: None,
            document: OnceCell::new(),
            root: OnceCell::new(),
        })
    }

    /// The sanitized path of the layout file.
    #[must_use]
    pub fn layout_file(&self) -> &Path {
        &self.layout_file
    }

    /// Point the interpreter at another layout file.
    ///
    /// The path is checked immediately. Any document or tree built from the
    /// previous file is discarded.
    ///
    /// # Errors
    /// Returns `Configuration` if the file cannot be read; the previous file
    /// stays in effect.
    pub fn set_layout_file(&mut self, layout_file: &str) -> Result<()> {
        self.layout_file = validate_layout_file(layout_file)?;
        self.document = OnceCell::new();
        self.root = OnceCell::new();
        Ok(())
    }

    /// The page context handed to every node.
    #[must_use]
    pub fn page_context(&self) -> Option<&Arc<PageContext>> {
        self.context.as_ref()
    }

    /// Set the page context handed to every node.
    ///
    /// Must be called before the root component is built; an already
    /// built tree keeps the context it was built with.
    pub fn set_page_context(&mut self, context: Arc<PageContext>) {
        if self.root.get().is_some() {
            tracing::warn!(
                file = %self.layout_file.display(),
                "Page context set after the layout tree was built; tree is not rebuilt"
            );
        }
        self.context = Some(context);
    }

    /// The node registry used for type resolution.
    #[must_use]
    pub fn registry(&self) -> &NodeRegistry {
        &self.registry
    }

    /// Get the root node of the layout, building it on first access.
    ///
    /// Later calls return the same node without parsing again.
    ///
    /// # Errors
    /// * `Io` / `XmlParse` if the file cannot be read or parsed
    /// * `Structure` with `MissingRoot` if there is no `structure` element
    /// * `Structure` for the first invalid element found depth-first
    pub fn get_root_component(&self) -> Result<Arc<dyn LayoutNode>> {
        let root = self.root.get_or_try_init(|| {
            let document = self.document()?;

            let structure = find_descendant(document, ROOT_ELEMENT)
                .ok_or_else(|| self.structure_error(StructureError::MissingRoot))?;

            tracing::debug!(
                file = %self.layout_file.display(),
                line = structure.line(),
                "Building layout tree"
            );

            self.build_node(&structure, 0, "").map(Arc::from)
        })?;

        Ok(Arc::clone(root))
    }

    /// Load and parse the layout file once.
    fn document(&self) -> Result<&Arc<Element>> {
        self.document.get_or_try_init(|| {
            tracing::debug!(file = %self.layout_file.display(), "Parsing layout file");

            let xml = std::fs::read_to_string(&self.layout_file).map_err(|source| {
                LayoutError::Io {
                    path: self.layout_file.clone(),
                    source,
                }
            })?;

            parse_document(&xml).map_err(|err| match err {
                DocumentError::Parse(source) => LayoutError::XmlParse {
                    file: self.layout_file.clone(),
                    source,
                },
                DocumentError::Structure(source) => self.structure_error(source),
            })
        })
    }

    /// Wrap `inner` in the modification a `modification` element declares.
    ///
    /// # Errors
    /// * `MissingModificationType` if the element has no `type`
    /// * `InvalidModificationType` if the type is not a registered modification
    pub fn apply_modification(
        &self,
        element: &Arc<Element>,
        inner: Box<dyn LayoutNode>,
    ) -> Result<Box<dyn LayoutNode>> {
        let handle = self
            .registry
            .resolve_modification(element)
            .map_err(|source| self.structure_error(source))?;

        tracing::debug!(
            modification = %handle.qualified_name(),
            node = inner.type_name(),
            line = element.line(),
            "Applying modification"
        );

        (handle.factory)(inner, Arc::clone(element))
    }

    fn structure_error(&self, source: StructureError) -> LayoutError {
        LayoutError::Structure {
            file: self.layout_file.clone(),
            source,
        }
    }
}

impl NodeBuilder for LayoutInterpreter {
    /// Build the node an element describes, including its structural
    /// children, then wrap it in each `modification` child in document
    /// order. Later modifications wrap earlier ones.
    fn build_node(
        &self,
        element: &Arc<Element>,
        indent: usize,
        class: &str,
    ) -> Result<Box<dyn LayoutNode>> {
        let handle = self
            .registry
            .resolve_class_name(element)
            .map_err(|source| self.structure_error(source))?;

        tracing::trace!(
            node = %handle.qualified_name(),
            line = element.line(),
            indent,
            "Building node"
        );

        let spec = NodeSpec::new(Arc::clone(element), indent, class)
            .with_context(self.context.clone());
        let mut node = (handle.factory)(spec, self)?;

        for child in element.element_children() {
            if is_modification(child) {
                node = self.apply_modification(child, node)?;
            }
        }

        Ok(node)
    }
}

impl fmt::Debug for LayoutInterpreter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LayoutInterpreter")
            .field("layout_file", &self.layout_file)
            .field("has_context", &self.context.is_some())
            .field("parsed", &self.document.get().is_some())
            .field("built", &self.root.get().is_some())
            .finish()
    }
}
