/*!
 * TBX-Min document model.
 *
 * The target dialect is deliberately small: a header, and a body of
 * entries holding exactly the languages declared in the header. Entities
 * are append-only; the converter creates a child, links it, and then fills
 * in its scalar fields as the source stream reveals them.
 */

use serde::{Deserialize, Serialize};
use std::fmt;

pub mod writer;

pub use writer::XmlOptions;

/// Complete TBX-Min document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TbxMin {
    // @field: Document identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    // @field: Free-text description, newline-joined
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    // @field: Creator of the termbase
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creator: Option<String>,

    // @field: License statement
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license: Option<String>,

    // @field: Whether the pair may be read in both directions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub directionality: Option<Directionality>,

    source_lang: String,
    target_lang: String,

    #[serde(default)]
    entries: Vec<Entry>,
}

impl TbxMin {
    /// Create an empty document stamped with its language pair
    pub fn new(source_lang: &str, target_lang: &str) -> Self {
        Self {
            id: None,
            description: None,
            creator: None,
            license: None,
            directionality: None,
            source_lang: source_lang.to_string(),
            target_lang: target_lang.to_string(),
            entries: Vec::new(),
        }
    }

    /// Declared source language
    pub fn source_lang(&self) -> &str {
        &self.source_lang
    }

    /// Declared target language
    pub fn target_lang(&self) -> &str {
        &self.target_lang
    }

    /// Entries in document order
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn add_entry(&mut self, entry: Entry) {
        self.entries.push(entry);
    }

    /// Append a line to the description, creating it if absent
    pub fn append_description(&mut self, text: &str) {
        append_line(&mut self.description, text);
    }

    /// Serialize to TBX-Min markup with default formatting
    pub fn to_xml(&self) -> String {
        writer::to_xml_string(self, &XmlOptions::default())
    }
}

/// Header value describing the usable translation direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Directionality {
    Bidirectional,
    Monodirectional,
}

impl Directionality {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Bidirectional => "bidirectional",
            Self::Monodirectional => "monodirectional",
        }
    }
}

impl fmt::Display for Directionality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One concept with its renderings in the retained languages
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject_field: Option<String>,

    #[serde(default)]
    lang_groups: Vec<LangGroup>,
}

impl Entry {
    pub fn new(id: Option<String>) -> Self {
        Self {
            id,
            ..Self::default()
        }
    }

    pub fn lang_groups(&self) -> &[LangGroup] {
        &self.lang_groups
    }

    pub fn add_lang_group(&mut self, group: LangGroup) {
        self.lang_groups.push(group);
    }

    /// Most recently appended language group, still open for term groups
    pub fn last_lang_group_mut(&mut self) -> Option<&mut LangGroup> {
        self.lang_groups.last_mut()
    }

    pub fn is_empty(&self) -> bool {
        self.lang_groups.is_empty()
    }
}

/// Term groups for one language within an entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LangGroup {
    code: String,

    #[serde(default)]
    term_groups: Vec<TermGroup>,
}

impl LangGroup {
    pub fn new(code: &str) -> Self {
        Self {
            code: code.to_string(),
            term_groups: Vec::new(),
        }
    }

    /// Language code as written in the source
    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn term_groups(&self) -> &[TermGroup] {
        &self.term_groups
    }

    pub fn add_term_group(&mut self, group: TermGroup) {
        self.term_groups.push(group);
    }

    pub fn last_term_group_mut(&mut self) -> Option<&mut TermGroup> {
        self.term_groups.last_mut()
    }
}

/// A single term and its closed set of attributes
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermGroup {
    #[serde(default)]
    pub term: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub part_of_speech: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl TermGroup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a line to the note, keeping what is already there
    pub fn append_note(&mut self, line: &str) {
        append_line(&mut self.note, line);
    }
}

/// Term status values allowed by TBX-Min
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Status {
    Preferred,
    Admitted,
    NotRecommended,
    Obsolete,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Preferred => "preferred",
            Self::Admitted => "admitted",
            Self::NotRecommended => "notRecommended",
            Self::Obsolete => "obsolete",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn append_line(field: &mut Option<String>, line: &str) {
    match field {
        Some(existing) => {
            existing.push('\n');
            existing.push_str(line);
        }
        None => *field = Some(line.to_string()),
    }
}
