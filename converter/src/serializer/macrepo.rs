//! Macrepo document writer.

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::error::SerializeResult;
use crate::models::{MacrepoRecord, MACREPO_NS, XSI_NS};

/// Render the macrepo tree, indented with tabs.
///
/// The `metadata` root always carries `macrepo:oldNid`, `macrepo:notes`
/// and `macrepo:scale` in that order. Empty values still produce their
/// element.
pub fn render_macrepo(record: &MacrepoRecord) -> SerializeResult<String> {
    let mut writer = Writer::new_with_indent(Vec::new(), b'\t', 1);

    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

    let mut root = BytesStart::new("metadata");
    root.push_attribute(("xmlns:xsi", XSI_NS));
    root.push_attribute(("xmlns:macrepo", MACREPO_NS));
    writer.write_event(Event::Start(root))?;

    for (tag, value) in record.elements() {
        writer.write_event(Event::Start(BytesStart::new(tag)))?;
        writer.write_event(Event::Text(BytesText::new(value)))?;
        writer.write_event(Event::End(BytesEnd::new(tag)))?;
    }

    writer.write_event(Event::End(BytesEnd::new("metadata")))?;

    let mut xml = String::from_utf8(writer.into_inner())?;
    xml.push('\n');
    Ok(xml)
}
