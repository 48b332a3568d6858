use crate::conversion::diagnostics::{DiagnosticKind, Diagnostics};
use crate::tbx_min::TermGroup;

// @module: Fallback note composition for unmappable term-level categories

/// Format one note line: `<category>:<text>`
pub fn note_line(category: &str, text: &str) -> String {
    format!("{}:{}", category, text)
}

/// Text carried by a demoted annotation
///
/// Cross-references (`ref`, `xref`) are usually empty elements whose content
/// lives in the `target` attribute; that value is used when there is no text.
pub fn fallback_text(text: String, target: Option<&str>) -> String {
    match target.map(str::trim) {
        Some(target) if text.is_empty() && !target.is_empty() => target.to_string(),
        _ => text,
    }
}

/// Append a demoted annotation to the term group's note
pub fn append_fallback(
    term_group: &mut TermGroup,
    category: &str,
    text: &str,
    location: &str,
    diagnostics: &mut Diagnostics,
) {
    term_group.append_note(&note_line(category, text));
    diagnostics.emit(
        DiagnosticKind::FallbackNote,
        location,
        format!("'{}' has no TBX-Min equivalent, kept in note", category),
    );
}
