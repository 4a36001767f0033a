//! End-to-end tests for the layout interpreter.
//!
//! Builds node trees from the XML fixtures in `tests/fixtures` and checks
//! tree shape, rendering and error reporting.

use std::path::Path;
use std::sync::Arc;

use chameleon_layout::registry::{LayoutNode, NodeBuilder, NodeSpec};
use chameleon_layout::{
    create_default_registry, LayoutError, LayoutInterpreter, NodeOutline, PageContext,
    StructureError,
};
use pretty_assertions::assert_eq;

/// Path of a fixture file.
fn fixture(name: &str) -> String {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
        .to_string_lossy()
        .to_string()
}

/// Interpreter for a fixture with an empty page context.
fn interpreter(name: &str) -> LayoutInterpreter {
    let mut interpreter = LayoutInterpreter::new(&fixture(name))
        .unwrap_or_else(|e| panic!("Failed to load {name}: {e}"));
    interpreter.set_page_context(Arc::new(PageContext::new()));
    interpreter
}

/// Structural error a fixture fails with.
fn structure_error(name: &str) -> StructureError {
    let err = interpreter(name)
        .get_root_component()
        .expect_err("fixture should not build");
    match err {
        LayoutError::Structure { file, source } => {
            assert!(file.ends_with(name), "error names {}", file.display());
            source
        }
        other => panic!("expected a structure error, got {other}"),
    }
}

fn type_names(nodes: &[Box<dyn LayoutNode>]) -> Vec<&str> {
    nodes.iter().map(|n| n.type_name()).collect()
}

#[test]
fn test_default_layout_shape() {
    let root = interpreter("default.xml").get_root_component().unwrap();

    assert_eq!(root.type_name(), "Components.Structure");
    assert_eq!(root.element().line(), 4);
    assert_eq!(
        type_names(root.children()),
        vec!["Components.Grid", "Components.Grid"]
    );

    let header_row = &root.children()[0].children()[0];
    assert_eq!(
        type_names(header_row.children()),
        vec!["Components.Cell", "Components.Cell"]
    );

    let navigation = &header_row.children()[1].children()[0];
    assert_eq!(navigation.type_name(), "Components.Modifications.Sticky");
    assert_eq!(
        navigation.as_modification().unwrap().inner().type_name(),
        "Components.Html"
    );

    let outline = NodeOutline::of(root.as_ref());
    assert_eq!(outline.node_count(), 14);
}

#[test]
fn test_default_layout_indentation_follows_nesting() {
    let root = interpreter("default.xml").get_root_component().unwrap();

    let grid = &root.children()[1];
    let row = &grid.children()[0];
    let cell = &row.children()[0];
    let content = &cell.children()[0];

    assert_eq!(
        [root.indent(), grid.indent(), row.indent(), cell.indent(), content.indent()],
        [0, 1, 2, 3, 4]
    );
    assert_eq!(grid.class(), "");
    assert_eq!(root.children()[0].class(), "header");
}

#[test]
fn test_default_layout_render() {
    let mut interp = LayoutInterpreter::new(&fixture("default.xml")).unwrap();
    interp.set_page_context(Arc::new(PageContext::new().with_value("content", "Body")));

    let html = interp.get_root_component().unwrap().render().unwrap();

    assert!(html.starts_with("<div>\n\t<div class=\"container header\">\n"));
    assert!(html.contains("\t\t\t<div class=\"col-3\">\n\t\t\t\tLogo\n"));
    assert!(html.contains(
        "\t\t\t\t<div class=\"sticky-top\">\n\t\t\t\tNavigation\n\t\t\t\t</div>\n"
    ));
    assert!(html.contains("\t<div class=\"container-fluid\">\n"));
    assert!(html.contains("\t\t\t<div class=\"col-12\">\n\t\t\t\tBody\n"));
    assert!(!html.contains("Admin tools"));
    assert!(html.ends_with("</div>\n"));
}

#[test]
fn test_show_only_for_matching_group() {
    let mut interp = LayoutInterpreter::new(&fixture("default.xml")).unwrap();
    interp.set_page_context(Arc::new(PageContext::new().with_group("sysop")));

    let html = interp.get_root_component().unwrap().render().unwrap();
    assert!(html.contains("\t\t\t\tAdmin tools\n"));
}

#[test]
fn test_root_component_is_cached() {
    let interp = interpreter("default.xml");

    let first = interp.get_root_component().unwrap();
    let second = interp.get_root_component().unwrap();
    assert!(Arc::ptr_eq(&first, &second));
}

#[test]
fn test_missing_structure_is_file_scoped() {
    let err = structure_error("missing_structure.xml");
    assert_eq!(err, StructureError::MissingRoot);
    assert_eq!(err.line(), None);
}

#[test]
fn test_unknown_element_names_element_and_line() {
    assert_eq!(
        structure_error("unknown_element.xml"),
        StructureError::ElementNotAllowed {
            line: 5,
            name: "banana".to_string()
        }
    );
}

#[test]
fn test_invalid_component_type() {
    assert_eq!(
        structure_error("invalid_component.xml"),
        StructureError::InvalidComponentType {
            line: 3,
            type_name: "DoesNotExist".to_string()
        }
    );
}

#[test]
fn test_invalid_modification_type() {
    assert_eq!(
        structure_error("invalid_modification.xml"),
        StructureError::InvalidModificationType {
            line: 4,
            type_name: "NotAModification".to_string()
        }
    );
}

#[test]
fn test_modification_missing_type() {
    assert_eq!(
        structure_error("untyped_modification.xml"),
        StructureError::MissingModificationType { line: 4 }
    );
}

#[test]
fn test_error_message_locates_markup() {
    let err = interpreter("unknown_element.xml")
        .get_root_component()
        .unwrap_err();
    let message = err.to_string();

    assert!(message.contains("unknown_element.xml"));
    assert!(message.ends_with("line 5: XML element not allowed here: banana"));
}

#[test]
fn test_stacked_modifications_wrap_in_document_order() {
    let root = interpreter("stacked_modifications.xml")
        .get_root_component()
        .unwrap();

    let outer = &root.children()[0];
    assert_eq!(outer.type_name(), "Components.Modifications.HideFor");

    let outer = outer.as_modification().unwrap();
    assert_eq!(outer.modification_element().line(), 5);

    let middle = outer.inner().as_modification().unwrap();
    assert_eq!(middle.type_name(), "Components.Modifications.Sticky");
    assert_eq!(middle.modification_element().line(), 4);
    assert_eq!(middle.inner().type_name(), "Components.Html");
}

#[test]
fn test_stacked_modifications_render() {
    let mut interp = LayoutInterpreter::new(&fixture("stacked_modifications.xml")).unwrap();
    interp.set_page_context(Arc::new(PageContext::new().with_permission("noads")));
    let hidden = interp.get_root_component().unwrap().render().unwrap();
    assert_eq!(hidden, "<div>\n</div>\n");

    let shown = interpreter("stacked_modifications.xml")
        .get_root_component()
        .unwrap()
        .render()
        .unwrap();
    assert_eq!(
        shown,
        "<div>\n\t<div class=\"sticky-top\">\n\tBanner\n\t</div>\n</div>\n"
    );
}

#[test]
fn test_nonexistent_layout_file_fails_immediately() {
    let err = LayoutInterpreter::new(&fixture("does_not_exist.xml")).unwrap_err();
    assert!(matches!(err, LayoutError::Configuration { .. }));
    assert!(err.to_string().contains("does_not_exist.xml"));
}

/// Host component registered on top of the built-ins.
#[derive(Debug)]
struct Foo {
    spec: NodeSpec,
}

impl LayoutNode for Foo {
    fn type_name(&self) -> &str {
        "Components.Foo"
    }

    fn element(&self) -> &Arc<chameleon_layout::xml::Element> {
        &self.spec.element
    }

    fn indent(&self) -> usize {
        self.spec.indent
    }

    fn class(&self) -> &str {
        &self.spec.class
    }

    fn page_context(&self) -> Option<&Arc<PageContext>> {
        self.spec.context.as_ref()
    }

    fn render(&self) -> chameleon_layout::Result<String> {
        Ok(format!("{}<foo/>\n", "\t".repeat(self.spec.indent)))
    }
}

fn foo(spec: NodeSpec, _builder: &dyn NodeBuilder) -> chameleon_layout::Result<Box<dyn LayoutNode>> {
    Ok(Box::new(Foo { spec }))
}

#[test]
fn test_custom_component_type() {
    let path = fixture("custom_component.xml");

    let err = LayoutInterpreter::new(&path)
        .unwrap()
        .get_root_component()
        .unwrap_err();
    assert!(matches!(
        err.as_structure_error(),
        Some(StructureError::InvalidComponentType { .. })
    ));

    let mut registry = create_default_registry();
    registry.register_component("Foo", foo);
    let interp = LayoutInterpreter::with_registry(&path, registry).unwrap();
    let root = interp.get_root_component().unwrap();

    assert_eq!(
        type_names(root.children()),
        vec!["Components.Foo", "Components.Container"]
    );
    assert!(root.children()[1].children().is_empty());
    assert_eq!(root.render().unwrap(), "<div>\n\t<foo/>\n\t<div>\n\t</div>\n</div>\n");
}
