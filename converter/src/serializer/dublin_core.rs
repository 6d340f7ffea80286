//! Dublin Core renderers.
//!
//! Both follow the DCMI guidelines: "Guidelines for implementing Dublin Core
//! in XML" for [`render_as_xml`] and "Expressing Simple Dublin Core in
//! RDF/XML" for [`render_as_rdf`]. Elements are written in
//! [`DcElement::ALL`] order and only when they hold a value.

use crate::models::{DcElement, MetadataRecord, APP_NS, DC_NS, RDF_NS, XSI_NS};

use super::{escape_xml, is_url, XML_DECLARATION};

/// Root tag used by [`render_as_xml`] when none is given.
pub const DEFAULT_ROOT_TAG: &str = "metadata";

const RDF_DOCTYPE: &str = r#"<!DOCTYPE rdf:RDF PUBLIC "-//DUBLIN CORE//DCMES DTD 2002/07/31//EN" "http://dublincore.org/documents/2002/07/31/dcmes-xml/dcmes-xml-dtd.dtd">"#;

/// Render a record as a plain Dublin Core XML document.
///
/// `schema_location` goes into `xsi:schemaLocation`; `root_tag` overrides
/// the `metadata` root element. Relation values each get their own
/// `dc:relation` element.
///
/// # Example
/// ```
/// use tsv_convert::models::{MetadataRecord, DC_NS};
/// use tsv_convert::serializer::render_as_xml;
///
/// let record = MetadataRecord {
///     title: "A & B".into(),
///     ..Default::default()
/// };
/// let xml = render_as_xml(&record, DC_NS, None);
/// assert!(xml.contains("<dc:title>A &amp; B</dc:title>"));
/// assert!(!xml.contains("dc:creator"));
/// ```
pub fn render_as_xml(record: &MetadataRecord, schema_location: &str, root_tag: Option<&str>) -> String {
    let root_tag = root_tag.unwrap_or(DEFAULT_ROOT_TAG);

    let mut out = String::new();
    out.push_str(XML_DECLARATION);
    out.push('\n');
    out.push_str(&format!(
        "<{root}\n    xmlns=\"{app}\"\n    xmlns:xsi=\"{xsi}\"\n    xsi:schemaLocation=\"{location}\"\n    xmlns:dc=\"{dc}\">\n",
        root = root_tag,
        app = APP_NS,
        xsi = XSI_NS,
        location = escape_xml(schema_location),
        dc = DC_NS,
    ));

    for element in DcElement::ALL {
        for value in record.values(element) {
            push_text_element(&mut out, "\t", element, value);
        }
    }

    out.push_str(&format!("</{}>\n", root_tag));
    out
}

/// Render a record as Dublin Core in RDF/XML.
///
/// `about` becomes `rdf:about` only when it is an `http://` URL; any other
/// value leaves the description anonymous. A URL-valued `source` is written
/// as an `rdf:resource` reference instead of a literal.
pub fn render_as_rdf(record: &MetadataRecord) -> String {
    let mut out = String::new();
    out.push_str(XML_DECLARATION);
    out.push('\n');
    out.push_str(RDF_DOCTYPE);
    out.push('\n');
    out.push_str(&format!(
        "<rdf:RDF xmlns:rdf=\"{}\" xmlns:dc=\"{}\">\n",
        RDF_NS, DC_NS
    ));

    if is_url(&record.about) {
        out.push_str(&format!(
            "\t<rdf:Description rdf:about=\"{}\">\n",
            escape_xml(&record.about)
        ));
    } else {
        out.push_str("\t<rdf:Description>\n");
    }

    for element in DcElement::ALL {
        for value in record.values(element) {
            if element == DcElement::Source && is_url(value) {
                out.push_str(&format!(
                    "\t\t<{} rdf:resource=\"{}\"/>\n",
                    element.qualified_name(),
                    escape_xml(value)
                ));
            } else {
                push_text_element(&mut out, "\t\t", element, value);
            }
        }
    }

    out.push_str("\t</rdf:Description>\n");
    out.push_str("</rdf:RDF>\n");
    out
}

fn push_text_element(out: &mut String, indent: &str, element: DcElement, value: &str) {
    let tag = element.qualified_name();
    out.push_str(&format!(
        "{indent}<{tag}>{}</{tag}>\n",
        escape_xml(value)
    ));
}
