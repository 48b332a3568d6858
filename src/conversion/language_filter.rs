/*!
 * Language filtering for language groups.
 *
 * TBX-Min holds exactly two languages, so every language group is checked
 * against the requested pair before the traversal descends into it. After
 * the pass, the languages actually retained are compared with the pair.
 */

use std::collections::BTreeSet;

use crate::conversion::diagnostics::{DiagnosticKind, Diagnostics};
use crate::language_utils;

/// Outcome of checking a language group
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LanguageDecision {
    /// Keep the group; carries the code as written in the source
    Keep(String),
    /// Exclude the whole subtree
    Skip(SkipReason),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// No language code on the group
    Missing,
    /// Code matches neither requested language
    NotRequested(String),
}

/// Decide whether a language group with the given code is retained
pub fn decide(code: Option<&str>, source_lang: &str, target_lang: &str) -> LanguageDecision {
    let code = match code.map(str::trim) {
        Some(code) if !code.is_empty() => code,
        _ => return LanguageDecision::Skip(SkipReason::Missing),
    };

    if language_utils::codes_match(code, source_lang)
        || language_utils::codes_match(code, target_lang)
    {
        LanguageDecision::Keep(code.to_string())
    } else {
        LanguageDecision::Skip(SkipReason::NotRequested(code.to_string()))
    }
}

/// Report a skipped group through the diagnostics channel
pub fn report_skip(reason: &SkipReason, location: &str, diagnostics: &mut Diagnostics) {
    match reason {
        SkipReason::Missing => diagnostics.emit(
            DiagnosticKind::MissingLanguage,
            location,
            "language group has no language code, skipped",
        ),
        SkipReason::NotRequested(code) => diagnostics.emit(
            DiagnosticKind::LanguageSkipped,
            location,
            format!("language '{}' not requested, skipped", code),
        ),
    }
}

/// Requested languages (lower-cased) for which no group was retained
pub fn missing_languages(
    discovered: &BTreeSet<String>,
    source_lang: &str,
    target_lang: &str,
) -> Vec<String> {
    let requested: BTreeSet<String> = [source_lang, target_lang]
        .iter()
        .map(|code| language_utils::normalize_code(code))
        .collect();

    requested.difference(discovered).cloned().collect()
}

/// Post-pass check: warn once, naming every requested language never found
pub fn validate_languages(
    discovered: &BTreeSet<String>,
    source_lang: &str,
    target_lang: &str,
    diagnostics: &mut Diagnostics,
) {
    let missing = missing_languages(discovered, source_lang, target_lang);
    if missing.is_empty() {
        return;
    }

    let names: Vec<String> = missing
        .iter()
        .map(|code| language_utils::language_display_name(code))
        .collect();

    diagnostics.emit(
        DiagnosticKind::LanguageMismatch,
        "/",
        format!("no language group found for: {}", names.join(", ")),
    );
}
