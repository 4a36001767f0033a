//! Utility functions for navigating layout element trees.

use std::sync::Arc;

use super::element::Element;
use crate::config::MODIFICATION_ELEMENT;

/// Tag name normalized to lowercase.
///
/// # Examples
/// ```
/// use chameleon_layout::xml::{lowercase_name, Element};
///
/// assert_eq!(lowercase_name(&Element::new("Grid", 1)), "grid");
/// ```
pub fn lowercase_name(element: &Element) -> String {
    element.name().to_lowercase()
}

/// Check if an element has a specific tag name, ignoring case.
pub fn has_tag(element: &Element, tag: &str) -> bool {
    element.name().eq_ignore_ascii_case(tag)
}

/// Check if an element is a `modification` element, ignoring case.
pub fn is_modification(element: &Element) -> bool {
    has_tag(element, MODIFICATION_ELEMENT)
}

/// Find the first element with the given tag name in document order.
///
/// The search includes `element` itself and matches names exactly.
///
/// # Examples
/// ```
/// use chameleon_layout::xml::{find_descendant, parse_document};
///
/// let root = parse_document("<skin><head/><body><structure/></body></skin>").unwrap();
/// let structure = find_descendant(&root, "structure").unwrap();
/// assert_eq!(structure.name(), "structure");
/// assert!(find_descendant(&root, "missing").is_none());
/// ```
pub fn find_descendant(element: &Arc<Element>, tag: &str) -> Option<Arc<Element>> {
    if element.name() == tag {
        return Some(Arc::clone(element));
    }

    element
        .element_children()
        .find_map(|child| find_descendant(child, tag))
}
