//! XML serialization of mapped records.
//!
//! - [`render_as_xml`] - plain Dublin Core XML, empty elements omitted
//! - [`render_as_rdf`] - Dublin Core in RDF/XML, URL-valued fields as resources
//! - [`render_macrepo`] - the macrepo tree, all three elements always present
//!
//! Rendering is pure: the same record always gives the same bytes.

pub mod dublin_core;
pub mod macrepo;

use std::borrow::Cow;

pub use dublin_core::{render_as_rdf, render_as_xml, DEFAULT_ROOT_TAG};
pub use macrepo::render_macrepo;

/// XML declaration shared by every rendered document.
pub const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;

/// Escape a value for XML text or attribute content.
///
/// All five reserved characters are replaced, so the result is safe in
/// both contexts. Strings without them are returned borrowed.
pub fn escape_xml(raw: &str) -> Cow<'_, str> {
    quick_xml::escape::escape(raw)
}

/// Whether `name` can be used as an XML element name.
///
/// Letters, `_` or `:` first; then also digits, `-`, `.` and `·`.
pub fn is_xml_name(name: &str) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    let is_start = |c: char| c.is_alphabetic() || c == '_' || c == ':';
    is_start(first)
        && chars.all(|c| is_start(c) || c.is_numeric() || matches!(c, '-' | '.' | '\u{b7}'))
}

/// Whether a value is treated as a resource URL rather than a literal.
pub fn is_url(value: &str) -> bool {
    value.starts_with("http://")
}
