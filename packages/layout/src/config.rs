//! Configuration constants and validation functions for layout files.

use std::fs::File;
use std::path::{PathBuf, MAIN_SEPARATOR};

use crate::error::{LayoutError, Result};

/// Tag name of the element the layout tree is built from.
pub const ROOT_ELEMENT: &str = "structure";

/// Tag name of modification elements.
pub const MODIFICATION_ELEMENT: &str = "modification";

/// Attribute naming the concrete component or modification type.
pub const TYPE_ATTRIBUTE: &str = "type";

/// Attribute holding extra CSS classes for a node.
pub const CLASS_ATTRIBUTE: &str = "class";

/// Namespace built-in node types and named components live in.
pub const COMPONENT_NAMESPACE: &str = "Components";

/// Namespace modification types live in.
pub const MODIFICATION_NAMESPACE: &str = "Components.Modifications";

/// Component type used for a `component` element without a `type`.
pub const DEFAULT_COMPONENT_TYPE: &str = "Container";

/// Node type `modification` elements resolve to as structural children.
pub const SILENT_COMPONENT_TYPE: &str = "Silent";

/// Name of the modification base capability. Never resolvable itself.
pub const BASE_MODIFICATION_TYPE: &str = "Modification";

/// Deepest element nesting accepted in a layout document.
pub const MAX_DEPTH: usize = 256;

/// Replace both `\` and `/` with the platform path separator.
///
/// # Examples
/// ```
/// use chameleon_layout::config::sanitize_file_name;
///
/// let sanitized = sanitize_file_name(r"skins\default/layout.xml");
/// let sep = std::path::MAIN_SEPARATOR;
/// assert_eq!(sanitized, format!("skins{sep}default{sep}layout.xml"));
/// ```
pub fn sanitize_file_name(file_name: &str) -> String {
    file_name
        .chars()
        .map(|c| if c == '\\' || c == '/' { MAIN_SEPARATOR } else { c })
        .collect()
}

/// Sanitize a layout file path and check that it can be read.
///
/// # Returns
/// * `Ok(path)` with the sanitized path if the file can be opened
/// * `Err(LayoutError::Configuration)` otherwise
pub fn validate_layout_file(file_name: &str) -> Result<PathBuf> {
    let path = PathBuf::from(sanitize_file_name(file_name));

    let readable = path.is_file() && File::open(&path).is_ok();
    if !readable {
        return Err(LayoutError::Configuration { path });
    }

    Ok(path)
}

/// Build the fully qualified name of a component type.
#[must_use]
pub fn qualified_component_name(type_name: &str) -> String {
    format!("{COMPONENT_NAMESPACE}.{type_name}")
}

/// Build the fully qualified name of a modification type.
#[must_use]
pub fn qualified_modification_name(type_name: &str) -> String {
    format!("{MODIFICATION_NAMESPACE}.{type_name}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_sanitize_file_name_mixed_separators() {
        let sep = MAIN_SEPARATOR;
        assert_eq!(sanitize_file_name("a/b\\c.xml"), format!("a{sep}b{sep}c.xml"));
        assert_eq!(sanitize_file_name("layout.xml"), "layout.xml");
    }

    #[test]
    fn test_validate_layout_file_missing() {
        let err = validate_layout_file("/nonexistent/dir/layout.xml").unwrap_err();
        assert!(matches!(err, LayoutError::Configuration { .. }));
    }

    #[test]
    fn test_validate_layout_file_directory_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().to_string_lossy().to_string();
        assert!(validate_layout_file(&path).is_err());
    }

    #[test]
    fn test_validate_layout_file_readable() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "<structure/>").unwrap();
        let path = file.path().to_string_lossy().to_string();

        let validated = validate_layout_file(&path).unwrap();
        assert_eq!(validated, PathBuf::from(sanitize_file_name(&path)));
    }

    #[test]
    fn test_qualified_names() {
        assert_eq!(qualified_component_name("Grid"), "Components.Grid");
        assert_eq!(
            qualified_modification_name("Sticky"),
            "Components.Modifications.Sticky"
        );
    }
}
