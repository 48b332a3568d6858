use std::collections::BTreeSet;

use crate::conversion::categories::Scope;
use crate::conversion::diagnostics::{Diagnostic, DiagnosticKind, Diagnostics};
use crate::language_utils;
use crate::tbx_min::{Entry, LangGroup, TbxMin, TermGroup};

// @module: Per-conversion build state

/// Working state of one conversion, threaded through every handler
///
/// The entry under construction is owned here until its boundary closes.
/// Language groups and term groups are linked into it as soon as they
/// open; "current" group and term group are always the last ones appended.
#[derive(Debug)]
pub struct ConversionContext {
    document: TbxMin,
    entry: Option<Entry>,
    lang_group_open: bool,
    term_group_open: bool,
    discovered: BTreeSet<String>,
    diagnostics: Diagnostics,
}

impl ConversionContext {
    // @creates: Empty context around a document stamped with the pair
    pub fn new(source_lang: &str, target_lang: &str) -> Self {
        Self {
            document: TbxMin::new(source_lang, target_lang),
            entry: None,
            lang_group_open: false,
            term_group_open: false,
            discovered: BTreeSet::new(),
            diagnostics: Diagnostics::new(),
        }
    }

    pub fn scope(&self) -> Scope {
        Scope {
            in_entry: self.entry.is_some(),
            in_lang_group: self.lang_group_open,
            in_term_group: self.term_group_open,
        }
    }

    pub fn source_lang(&self) -> &str {
        self.document.source_lang()
    }

    pub fn target_lang(&self) -> &str {
        self.document.target_lang()
    }

    pub fn document_mut(&mut self) -> &mut TbxMin {
        &mut self.document
    }

    pub fn entry_mut(&mut self) -> Option<&mut Entry> {
        self.entry.as_mut()
    }

    pub fn diagnostics_mut(&mut self) -> &mut Diagnostics {
        &mut self.diagnostics
    }

    /// The term group currently being filled, along with the diagnostics sink
    pub fn term_group_mut(&mut self) -> Option<(&mut TermGroup, &mut Diagnostics)> {
        if !self.term_group_open {
            return None;
        }
        let group = self.entry.as_mut()?.last_lang_group_mut()?.last_term_group_mut()?;
        Some((group, &mut self.diagnostics))
    }

    pub fn discovered_languages(&self) -> &BTreeSet<String> {
        &self.discovered
    }

    pub fn open_entry(&mut self, id: Option<String>, location: &str) {
        if self.entry.is_some() {
            self.close_entry(location);
        }

        if id.is_none() {
            self.diagnostics.emit(DiagnosticKind::MissingEntryId, location, "entry has no id");
        }
        self.entry = Some(Entry::new(id));
    }

    /// Append the entry if it kept a language group, otherwise discard it
    pub fn close_entry(&mut self, location: &str) {
        self.lang_group_open = false;
        self.term_group_open = false;

        let Some(entry) = self.entry.take() else {
            return;
        };

        if entry.is_empty() {
            let label = entry.id.as_deref().unwrap_or("<no id>");
            self.diagnostics.emit(
                DiagnosticKind::EntryDiscarded,
                location,
                format!("entry {} not converted: no language group retained", label),
            );
        } else {
            self.document.add_entry(entry);
        }
    }

    /// Link a retained language group and record its language
    pub fn open_lang_group(&mut self, code: &str) {
        let Some(entry) = self.entry.as_mut() else {
            return;
        };
        entry.add_lang_group(LangGroup::new(code));
        self.discovered.insert(language_utils::normalize_code(code));
        self.lang_group_open = true;
        self.term_group_open = false;
    }

    pub fn close_lang_group(&mut self) {
        self.lang_group_open = false;
        self.term_group_open = false;
    }

    pub fn open_term_group(&mut self) {
        let group = self.entry.as_mut().and_then(|entry| entry.last_lang_group_mut());
        if let Some(group) = group {
            group.add_term_group(TermGroup::new());
            self.term_group_open = true;
        }
    }

    pub fn close_term_group(&mut self) {
        self.term_group_open = false;
    }

    /// Tear down the context, yielding the document and everything reported
    pub fn finish(self) -> (TbxMin, BTreeSet<String>, Vec<Diagnostic>) {
        (self.document, self.discovered, self.diagnostics.into_events())
    }
}
