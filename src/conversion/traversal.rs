/*!
 * Single-pass traversal of a TBX document.
 *
 * The reader is driven forward once. Each start tag is classified and
 * handled in one match: boundaries open entities and push a frame so the
 * matching end tag can close them, leaf constructs consume their subtree as
 * text, and language groups that fail the filter are skipped wholesale
 * before any of their children are read.
 */

use log::debug;
use quick_xml::events::{BytesStart, Event};
use quick_xml::name::QName;
use quick_xml::Reader;
use std::io::BufRead;

use crate::conversion::categories::{self, Boundary, DirectField, HeaderField, NodeKind};
use crate::conversion::context::ConversionContext;
use crate::conversion::diagnostics::DiagnosticKind;
use crate::conversion::language_filter::{self, LanguageDecision};
use crate::conversion::notes;
use crate::errors::ConvertError;

/// Owned copy of a start tag
#[derive(Debug, Clone)]
struct ElementStart {
    qname: Vec<u8>,
    name: String,
    attributes: Vec<(String, String)>,
}

impl ElementStart {
    fn read<R>(start: &BytesStart<'_>, reader: &Reader<R>) -> Result<Self, ConvertError> {
        let position = reader.buffer_position() as u64;
        let mut attributes = Vec::new();

        for attr in start.attributes() {
            let attr = attr.map_err(|e| ConvertError::from_xml(e.into(), position))?;
            let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
            let value = attr
                .unescape_value()
                .map_err(|e| ConvertError::from_xml(e.into(), position))?
                .into_owned();
            attributes.push((key, value));
        }

        Ok(Self {
            qname: start.name().as_ref().to_vec(),
            name: String::from_utf8_lossy(start.local_name().as_ref()).into_owned(),
            attributes,
        })
    }

    fn attr(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// Open element on the traversal stack
#[derive(Debug)]
struct Frame {
    name: String,
    boundary: Option<Boundary>,
}

/// Walks one document, feeding every event into the context
pub struct Traversal<'c, R> {
    reader: Reader<R>,
    ctx: &'c mut ConversionContext,
    stack: Vec<Frame>,
}

impl<'c, R: BufRead> Traversal<'c, R> {
    pub fn new(source: R, ctx: &'c mut ConversionContext) -> Self {
        Self {
            reader: Reader::from_reader(source),
            ctx,
            stack: Vec::new(),
        }
    }

    /// Run the traversal to the end of input
    pub fn run(mut self) -> Result<(), ConvertError> {
        let mut buffer = Vec::new();
        let mut saw_root = false;

        loop {
            buffer.clear();
            let event = self
                .reader
                .read_event_into(&mut buffer)
                .map_err(|e| ConvertError::from_xml(e, self.reader.buffer_position() as u64))?;

            match event {
                Event::Start(start) => {
                    saw_root = true;
                    let element = ElementStart::read(&start, &self.reader)?;
                    self.visit(element, false)?;
                }
                Event::Empty(start) => {
                    saw_root = true;
                    let element = ElementStart::read(&start, &self.reader)?;
                    self.visit(element, true)?;
                }
                Event::End(_) => self.leave()?,
                Event::Eof => break,
                _ => {}
            }
        }

        if let Some(frame) = self.stack.last() {
            return Err(self.malformed(format!("unexpected end of input inside <{}>", frame.name)));
        }
        if !saw_root {
            return Err(self.malformed("document has no root element".to_string()));
        }
        Ok(())
    }

    fn visit(&mut self, element: ElementStart, self_closing: bool) -> Result<(), ConvertError> {
        let parent = self.stack.last().map(|frame| frame.name.clone());
        let kind = categories::classify(
            &element.name,
            element.attr("type"),
            parent.as_deref(),
            self.ctx.scope(),
        );
        let location = self.location_of(&element.name);

        match kind {
            NodeKind::Open(Boundary::Entry) => {
                let id = element.attr("id").map(str::to_string);
                self.ctx.open_entry(id, &location);
                self.enter(element, Some(Boundary::Entry), self_closing);
            }
            NodeKind::Open(Boundary::LangGroup) => {
                let decision = language_filter::decide(
                    element.attr("xml:lang"),
                    self.ctx.source_lang(),
                    self.ctx.target_lang(),
                );
                match decision {
                    LanguageDecision::Keep(code) => {
                        self.ctx.open_lang_group(&code);
                        self.enter(element, Some(Boundary::LangGroup), self_closing);
                    }
                    LanguageDecision::Skip(reason) => {
                        let diagnostics = self.ctx.diagnostics_mut();
                        language_filter::report_skip(&reason, &location, diagnostics);
                        if !self_closing {
                            self.skip_subtree(&element)?;
                        }
                    }
                }
            }
            NodeKind::Open(Boundary::TermGroup) => {
                self.ctx.open_term_group();
                self.enter(element, Some(Boundary::TermGroup), self_closing);
            }
            NodeKind::Header(field) => {
                let text = self.leaf_text(&element, self_closing)?;
                self.apply_header(field, text);
            }
            NodeKind::Direct(field) => {
                let text = self.leaf_text(&element, self_closing)?;
                self.apply_direct(field, text, &location);
            }
            NodeKind::Fallback => {
                let text = self.leaf_text(&element, self_closing)?;
                let text = notes::fallback_text(text, element.attr("target"));
                match self.ctx.term_group_mut() {
                    Some((group, diagnostics)) => {
                        notes::append_fallback(group, &element.name, &text, &location, diagnostics)
                    }
                    None => self.not_converted(&location),
                }
            }
            NodeKind::Unrecognized => {
                self.not_converted(&location);
                self.enter(element, None, self_closing);
            }
        }

        Ok(())
    }

    /// Push a frame, or open and close at once for a self-closing tag
    fn enter(&mut self, element: ElementStart, boundary: Option<Boundary>, self_closing: bool) {
        self.stack.push(Frame {
            name: element.name,
            boundary,
        });
        if self_closing {
            self.close_top();
        }
    }

    fn leave(&mut self) -> Result<(), ConvertError> {
        if self.stack.is_empty() {
            return Err(self.malformed("closing tag without an open element".to_string()));
        }
        self.close_top();
        Ok(())
    }

    fn close_top(&mut self) {
        let location = self.current_location();
        let Some(frame) = self.stack.pop() else {
            return;
        };

        match frame.boundary {
            Some(Boundary::Entry) => self.ctx.close_entry(&location),
            Some(Boundary::LangGroup) => self.ctx.close_lang_group(),
            Some(Boundary::TermGroup) => self.ctx.close_term_group(),
            None => {}
        }
    }

    fn apply_header(&mut self, field: HeaderField, text: String) {
        let document = self.ctx.document_mut();
        match field {
            HeaderField::Title => document.id = Some(text),
            HeaderField::TitleNote | HeaderField::SourceDescription => {
                document.append_description(&text)
            }
        }
    }

    fn apply_direct(&mut self, field: DirectField, text: String, location: &str) {
        if field == DirectField::SubjectField {
            match self.ctx.entry_mut() {
                Some(entry) => entry.subject_field = Some(text),
                None => self.not_converted(location),
            }
            return;
        }

        let Some((group, diagnostics)) = self.ctx.term_group_mut() else {
            self.not_converted(location);
            return;
        };

        match field {
            DirectField::Term => group.term = text,
            DirectField::Status => {
                group.status = categories::status_for(&text);
                if group.status.is_none() {
                    diagnostics.emit(
                        DiagnosticKind::UnknownStatus,
                        location,
                        format!("unrecognized administrative status '{}', status left empty", text),
                    );
                }
            }
            DirectField::PartOfSpeech => group.part_of_speech = Some(text),
            DirectField::Note => group.note = Some(text),
            DirectField::Customer => group.customer = Some(text),
            DirectField::SubjectField => {}
        }
    }

    fn not_converted(&mut self, location: &str) {
        self.ctx
            .diagnostics_mut()
            .emit(DiagnosticKind::NotConverted, location, "element not converted");
    }

    /// Concatenated, trimmed text of a leaf element's whole subtree
    fn leaf_text(
        &mut self,
        element: &ElementStart,
        self_closing: bool,
    ) -> Result<String, ConvertError> {
        if self_closing {
            return Ok(String::new());
        }

        let mut buffer = Vec::new();
        let mut text = String::new();
        let mut depth = 0usize;

        loop {
            buffer.clear();
            let position = self.reader.buffer_position() as u64;
            let event = self
                .reader
                .read_event_into(&mut buffer)
                .map_err(|e| ConvertError::from_xml(e, position))?;

            match event {
                Event::Start(_) => depth += 1,
                Event::End(_) if depth == 0 => break,
                Event::End(_) => depth -= 1,
                Event::Text(content) => {
                    let unescaped = content
                        .unescape()
                        .map_err(|e| ConvertError::from_xml(e.into(), position))?;
                    text.push_str(&unescaped);
                }
                Event::CData(content) => text.push_str(&String::from_utf8_lossy(&content)),
                Event::Eof => {
                    let message = format!("unexpected end of input inside <{}>", element.name);
                    return Err(self.malformed(message));
                }
                _ => {}
            }
        }

        Ok(text.trim().to_string())
    }

    /// Consume a subtree without firing any events for it
    fn skip_subtree(&mut self, element: &ElementStart) -> Result<(), ConvertError> {
        let mut buffer = Vec::new();
        let position = self.reader.buffer_position() as u64;
        self.reader
            .read_to_end_into(QName(element.qname.as_slice()), &mut buffer)
            .map_err(|e| ConvertError::from_xml(e, position))?;
        debug!("Skipped subtree <{}> at byte {}", element.name, position);
        Ok(())
    }

    fn current_location(&self) -> String {
        let mut path = String::new();
        for frame in &self.stack {
            path.push('/');
            path.push_str(&frame.name);
        }
        path
    }

    fn location_of(&self, name: &str) -> String {
        format!("{}/{}", self.current_location(), name)
    }

    fn malformed(&self, message: String) -> ConvertError {
        ConvertError::Malformed {
            position: self.reader.buffer_position() as u64,
            message,
        }
    }
}
