/*!
 * TBX to TBX-Min conversion.
 *
 * A conversion reads the source once, keeps only the language groups for
 * the requested pair, maps the categories TBX-Min understands onto term
 * group attributes and keeps the remaining term-level categories as note
 * lines. Soft data issues are reported as [`Diagnostic`]s; only usage,
 * I/O and malformed-markup problems fail the call.
 *
 * All working state lives in a [`ConversionContext`] created per call, so
 * independent conversions can run in parallel.
 */

pub mod categories;
pub mod context;
pub mod diagnostics;
pub mod language_filter;
pub mod notes;
pub mod traversal;

use log::debug;
use std::collections::BTreeSet;

pub use context::ConversionContext;
pub use diagnostics::{Diagnostic, DiagnosticKind, DiagnosticLevel};

use crate::errors::ConvertError;
use crate::file_utils::InputSource;
use crate::tbx_min::TbxMin;
use traversal::Traversal;

/// Result of a conversion together with everything that was reported
#[derive(Debug)]
pub struct Conversion {
    pub document: TbxMin,
    pub diagnostics: Vec<Diagnostic>,
}

impl Conversion {
    /// Diagnostics at warning level
    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| d.level == DiagnosticLevel::Warn)
    }

    /// Number of diagnostics of one kind
    pub fn count(&self, kind: DiagnosticKind) -> usize {
        self.diagnostics.iter().filter(|d| d.kind == kind).count()
    }
}

/// Convert a TBX document into a TBX-Min document for the given pair
pub fn convert(
    input: &InputSource,
    source_lang: &str,
    target_lang: &str,
) -> Result<TbxMin, ConvertError> {
    convert_with_report(input, source_lang, target_lang).map(|conversion| conversion.document)
}

/// Convert and keep the diagnostics
pub fn convert_with_report(
    input: &InputSource,
    source_lang: &str,
    target_lang: &str,
) -> Result<Conversion, ConvertError> {
    let source_lang = require_language("source", source_lang)?;
    let target_lang = require_language("target", target_lang)?;

    let stream = input.open()?;
    debug!("Converting {} from {} to {}", input, source_lang, target_lang);

    let mut ctx = ConversionContext::new(source_lang, target_lang);
    Traversal::new(stream, &mut ctx)
        .run()
        .map_err(|e| e.with_path(input.path()))?;

    let (document, discovered, diagnostics) = finish(ctx);
    debug!(
        "Converted {} entries, languages found: {:?}",
        document.entries().len(),
        discovered
    );

    Ok(Conversion { document, diagnostics })
}

/// Convert markup held in a string
pub fn convert_str(
    xml: &str,
    source_lang: &str,
    target_lang: &str,
) -> Result<TbxMin, ConvertError> {
    convert(&InputSource::from_string(xml), source_lang, target_lang)
}

fn finish(mut ctx: ConversionContext) -> (TbxMin, BTreeSet<String>, Vec<Diagnostic>) {
    let discovered = ctx.discovered_languages().clone();
    let source_lang = ctx.source_lang().to_string();
    let target_lang = ctx.target_lang().to_string();
    language_filter::validate_languages(
        &discovered,
        &source_lang,
        &target_lang,
        ctx.diagnostics_mut(),
    );
    ctx.finish()
}

fn require_language<'a>(role: &str, code: &'a str) -> Result<&'a str, ConvertError> {
    let code = code.trim();
    if code.is_empty() {
        return Err(ConvertError::Usage(format!("{} language code is required", role)));
    }
    Ok(code)
}
