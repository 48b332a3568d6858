/*!
 * TBX-Min serialization.
 *
 * Renders a [`TbxMin`] document as `<TBX dialect="TBX-Min">` markup.
 * Optional fields that are unset produce no element at all.
 */

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use std::io::{self, Write};

use super::{Entry, LangGroup, TbxMin, TermGroup};

/// Formatting options for the markup writer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlOptions {
    /// Spaces per nesting level; zero writes everything on one line
    pub indent: usize,
    /// Emit the `<?xml ...?>` declaration
    pub declaration: bool,
}

impl Default for XmlOptions {
    fn default() -> Self {
        Self {
            indent: 4,
            declaration: true,
        }
    }
}

/// Serialize into an in-memory string
pub fn to_xml_string(doc: &TbxMin, options: &XmlOptions) -> String {
    let mut buffer = Vec::new();
    // Writing into a Vec cannot fail
    let _ = write_xml(doc, &mut buffer, options);
    String::from_utf8_lossy(&buffer).into_owned()
}

/// Serialize into any byte sink
pub fn write_xml<W: Write>(doc: &TbxMin, out: W, options: &XmlOptions) -> io::Result<()> {
    let mut writer = if options.indent > 0 {
        Writer::new_with_indent(out, b' ', options.indent)
    } else {
        Writer::new(out)
    };

    if options.declaration {
        emit(&mut writer, Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    }

    let root = BytesStart::new("TBX").with_attributes([("dialect", "TBX-Min")]);
    emit(&mut writer, Event::Start(root))?;

    write_header(&mut writer, doc)?;

    emit(&mut writer, Event::Start(BytesStart::new("body")))?;
    for entry in doc.entries() {
        write_entry(&mut writer, entry)?;
    }
    emit(&mut writer, Event::End(BytesEnd::new("body")))?;

    emit(&mut writer, Event::End(BytesEnd::new("TBX")))?;

    let mut out = writer.into_inner();
    out.write_all(b"\n")?;
    out.flush()
}

fn write_header<W: Write>(writer: &mut Writer<W>, doc: &TbxMin) -> io::Result<()> {
    emit(writer, Event::Start(BytesStart::new("header")))?;

    write_optional(writer, "id", doc.id.as_deref())?;
    write_optional(writer, "creator", doc.creator.as_deref())?;
    write_optional(writer, "license", doc.license.as_deref())?;
    write_optional(writer, "directionality", doc.directionality.map(|d| d.as_str()))?;
    write_optional(writer, "description", doc.description.as_deref())?;

    let languages = BytesStart::new("languages")
        .with_attributes([("source", doc.source_lang()), ("target", doc.target_lang())]);
    emit(writer, Event::Empty(languages))?;

    emit(writer, Event::End(BytesEnd::new("header")))
}

fn write_entry<W: Write>(writer: &mut Writer<W>, entry: &Entry) -> io::Result<()> {
    let mut start = BytesStart::new("entry");
    if let Some(id) = entry.id.as_deref() {
        start.push_attribute(("id", id));
    }
    emit(writer, Event::Start(start))?;

    write_optional(writer, "subjectField", entry.subject_field.as_deref())?;
    for group in entry.lang_groups() {
        write_lang_group(writer, group)?;
    }

    emit(writer, Event::End(BytesEnd::new("entry")))
}

fn write_lang_group<W: Write>(writer: &mut Writer<W>, group: &LangGroup) -> io::Result<()> {
    let start = BytesStart::new("langSet").with_attributes([("xml:lang", group.code())]);
    emit(writer, Event::Start(start))?;

    for term_group in group.term_groups() {
        write_term_group(writer, term_group)?;
    }

    emit(writer, Event::End(BytesEnd::new("langSet")))
}

fn write_term_group<W: Write>(writer: &mut Writer<W>, group: &TermGroup) -> io::Result<()> {
    emit(writer, Event::Start(BytesStart::new("termGroup")))?;

    write_text_element(writer, "term", &group.term)?;
    write_optional(writer, "termStatus", group.status.map(|s| s.as_str()))?;
    write_optional(writer, "partOfSpeech", group.part_of_speech.as_deref())?;
    write_optional(writer, "customer", group.customer.as_deref())?;
    write_optional(writer, "note", group.note.as_deref())?;

    emit(writer, Event::End(BytesEnd::new("termGroup")))
}

fn write_optional<W: Write>(
    writer: &mut Writer<W>,
    name: &str,
    value: Option<&str>,
) -> io::Result<()> {
    match value {
        Some(text) => write_text_element(writer, name, text),
        None => Ok(()),
    }
}

fn write_text_element<W: Write>(writer: &mut Writer<W>, name: &str, text: &str) -> io::Result<()> {
    emit(writer, Event::Start(BytesStart::new(name)))?;
    emit(writer, Event::Text(BytesText::new(text)))?;
    emit(writer, Event::End(BytesEnd::new(name)))
}

fn emit<W: Write>(writer: &mut Writer<W>, event: Event<'_>) -> io::Result<()> {
    writer.write_event(event).map_err(io::Error::other)
}
