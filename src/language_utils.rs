use isolang::Language;

/// Language utilities for termbase language codes
///
/// Termbases tag language groups with codes such as `en`, `EN` or `en-US`.
/// Matching against the requested pair is a plain case-insensitive
/// comparison; ISO lookups are only used to render readable names.
/// Check if two language codes are the same, ignoring case
pub fn codes_match(code1: &str, code2: &str) -> bool {
    code1.trim().eq_ignore_ascii_case(code2.trim())
}

/// Lower-cased, trimmed form used as a set key
pub fn normalize_code(code: &str) -> String {
    code.trim().to_lowercase()
}

/// Primary language subtag of a code (`en` for `en-US` or `en_GB`)
pub fn primary_subtag(code: &str) -> String {
    normalize_code(code)
        .split(['-', '_'])
        .next()
        .unwrap_or_default()
        .to_string()
}

/// Get the English language name for a code, if ISO 639 knows it
pub fn get_language_name(code: &str) -> Option<String> {
    let primary = primary_subtag(code);

    let lang = match primary.len() {
        2 => Language::from_639_1(&primary),
        3 => Language::from_639_3(&primary),
        _ => None,
    }?;

    Some(lang.to_name().to_string())
}

/// Render a code for messages, e.g. `de (German)`
pub fn language_display_name(code: &str) -> String {
    match get_language_name(code) {
        Some(name) => format!("{} ({})", code, name),
        None => code.to_string(),
    }
}
