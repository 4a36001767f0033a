//! Error types for the layout interpreter.
//!
//! `LayoutError` is what library consumers see. Problems with the markup
//! itself are grouped in `StructureError`, which carries the source line
//! of the offending element; `LayoutError::Structure` adds the file.

use std::path::PathBuf;

use thiserror::Error;

/// Malformed-layout conditions detected while interpreting the XML.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StructureError {
    /// The document has no `structure` element at all.
    #[error("XML description is missing an element: structure")]
    MissingRoot,

    /// Element name outside the layout vocabulary.
    #[error("line {line}: XML element not allowed here: {name}")]
    ElementNotAllowed { line: u32, name: String },

    /// Component type name that is not registered.
    #[error("line {line}: Invalid component type: {type_name}")]
    InvalidComponentType { line: u32, type_name: String },

    /// `modification` element without a `type` attribute.
    #[error("line {line}: Modification element missing an attribute: type")]
    MissingModificationType { line: u32 },

    /// Modification type name that is not registered.
    #[error("line {line}: Invalid modification type: {type_name}")]
    InvalidModificationType { line: u32, type_name: String },

    /// Elements nested deeper than the supported limit.
    #[error("line {line}: XML elements nested deeper than {limit} levels")]
    TooDeep { line: u32, limit: usize },
}

impl StructureError {
    /// Source line of the offending element, if the error is line-scoped.
    #[must_use]
    pub fn line(&self) -> Option<u32> {
        match self {
            Self::MissingRoot => None,
            Self::ElementNotAllowed { line, .. }
            | Self::InvalidComponentType { line, .. }
            | Self::MissingModificationType { line }
            | Self::InvalidModificationType { line, .. }
            | Self::TooDeep { line, .. } => Some(*line),
        }
    }
}

/// Main error type for the layout library.
#[derive(Debug, Error)]
pub enum LayoutError {
    /// Layout file missing or unreadable when it was set.
    #[error("Expected an accessible {} layout file", .path.display())]
    Configuration { path: PathBuf },

    /// Layout markup violates the layout structure.
    #[error("{}: {source}", .file.display())]
    Structure {
        file: PathBuf,
        #[source]
        source: StructureError,
    },

    /// Layout file is not well-formed XML.
    #[error("{}: XML parsing failed: {source}", .file.display())]
    XmlParse {
        file: PathBuf,
        #[source]
        source: roxmltree::Error,
    },

    /// Reading the layout file failed.
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Serializing a tree outline failed.
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    /// A component needs the page context but none was set.
    #[error("Component {type_name} requires a page context, but none was set")]
    MissingPageContext { type_name: String },
}

impl LayoutError {
    /// The structural error behind this error, if any.
    #[must_use]
    pub fn as_structure_error(&self) -> Option<&StructureError> {
        match self {
            Self::Structure { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Result type alias for layout operations.
pub type Result<T> = std::result::Result<T, LayoutError>;
