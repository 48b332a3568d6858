/*!
 * Category tables and node classification.
 *
 * Every element the traversal visits is classified exactly once into a
 * [`NodeKind`]; the traversal then handles it with a single match. The
 * tables here are pure data: the TBX status spellings understood by the
 * converter and the term-level categories that are kept as note lines.
 */

use std::collections::HashMap;
use std::sync::LazyLock;

use crate::tbx_min::Status;

/// TBX administrative status spellings and their TBX-Min value
static STATUS_TABLE: LazyLock<HashMap<&'static str, Status>> = LazyLock::new(|| {
    let mut m = HashMap::new();
    m.insert("preferredTerm-admn-sts", Status::Preferred);
    m.insert("admittedTerm-admn-sts", Status::Admitted);
    m.insert("deprecatedTerm-admn-sts", Status::NotRecommended);
    m.insert("supersededTerm-admn-sts", Status::Obsolete);
    m
});

/// Term-level categories with no TBX-Min counterpart, kept as note lines
pub const FALLBACK_CATEGORIES: &[&str] = &[
    "admin",
    "adminNote",
    "descrip",
    "descripNote",
    "termNote",
    "transac",
    "transacNote",
    "date",
    "ref",
    "xref",
];

/// Normalize a raw status value; all whitespace is removed before lookup
pub fn status_for(raw: &str) -> Option<Status> {
    let compact: String = raw.chars().filter(|c| !c.is_whitespace()).collect();
    STATUS_TABLE.get(compact.as_str()).copied()
}

/// Which open boundaries enclose the element being classified
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Scope {
    pub in_entry: bool,
    pub in_lang_group: bool,
    pub in_term_group: bool,
}

/// Header values copied into the document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderField {
    Title,
    TitleNote,
    SourceDescription,
}

/// Elements that open an entity in the output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Boundary {
    Entry,
    LangGroup,
    TermGroup,
}

/// Categories with a one-to-one TBX-Min attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectField {
    Term,
    SubjectField,
    Status,
    PartOfSpeech,
    Note,
    Customer,
}

/// Classification of a visited element
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Header(HeaderField),
    Open(Boundary),
    Direct(DirectField),
    Fallback,
    Unrecognized,
}

/// Classify an element by name, `type` attribute, parent and scope
pub fn classify(
    name: &str,
    type_attr: Option<&str>,
    parent: Option<&str>,
    scope: Scope,
) -> NodeKind {
    match (name, parent) {
        ("title", Some("titleStmt")) => return NodeKind::Header(HeaderField::Title),
        ("note", Some("titleStmt")) => return NodeKind::Header(HeaderField::TitleNote),
        ("p", Some("sourceDesc")) => return NodeKind::Header(HeaderField::SourceDescription),
        _ => {}
    }

    match name {
        "termEntry" => return NodeKind::Open(Boundary::Entry),
        "langSet" if scope.in_entry => return NodeKind::Open(Boundary::LangGroup),
        "tig" | "ntig" if scope.in_lang_group && !scope.in_term_group => {
            return NodeKind::Open(Boundary::TermGroup);
        }
        "descrip" if scope.in_entry && type_attr == Some("subjectField") => {
            return NodeKind::Direct(DirectField::SubjectField);
        }
        _ => {}
    }

    if !scope.in_term_group {
        return NodeKind::Unrecognized;
    }

    match (name, type_attr) {
        ("term", _) => NodeKind::Direct(DirectField::Term),
        ("termNote", Some("administrativeStatus")) => NodeKind::Direct(DirectField::Status),
        ("termNote", Some("partOfSpeech")) => NodeKind::Direct(DirectField::PartOfSpeech),
        ("note", _) => NodeKind::Direct(DirectField::Note),
        ("admin", Some("customerSubset")) => NodeKind::Direct(DirectField::Customer),
        (other, _) if FALLBACK_CATEGORIES.contains(&other) => NodeKind::Fallback,
        _ => NodeKind::Unrecognized,
    }
}
