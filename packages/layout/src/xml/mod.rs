//! XML model and navigation helpers.

mod element;
mod utils;

pub use element::{line_of, parse_document, DocumentError, Element, XmlNode};
pub use utils::{find_descendant, has_tag, is_modification, lowercase_name};
