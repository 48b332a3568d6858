/*!
 * Structured diagnostics for soft data issues.
 *
 * Recoveries never fail a conversion. Each one is recorded as a
 * [`Diagnostic`] and forwarded to the `log` facade at its level, so
 * callers can inspect exactly what was demoted, skipped or dropped.
 */

use log::{info, warn};
use serde::Serialize;
use std::fmt;

/// Severity of a diagnostic
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticLevel {
    Info,
    Warn,
}

/// What kind of recovery took place
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum DiagnosticKind {
    /// Element has no handler and produced no output
    NotConverted,
    /// Term-level category demoted to a note line
    FallbackNote,
    /// Entry without an `id`
    MissingEntryId,
    /// Language group without a language code
    MissingLanguage,
    /// Language group for a language that was not requested
    LanguageSkipped,
    /// Entry without any retained language group
    EntryDiscarded,
    /// Administrative status spelling outside the status table
    UnknownStatus,
    /// Requested languages that never appeared
    LanguageMismatch,
}

impl DiagnosticKind {
    pub fn level(&self) -> DiagnosticLevel {
        match self {
            Self::MissingEntryId
            | Self::MissingLanguage
            | Self::LanguageSkipped
            | Self::LanguageMismatch => DiagnosticLevel::Warn,
            Self::NotConverted
            | Self::FallbackNote
            | Self::EntryDiscarded
            | Self::UnknownStatus => DiagnosticLevel::Info,
        }
    }
}

/// One recorded recovery
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub level: DiagnosticLevel,
    pub kind: DiagnosticKind,
    /// Slash-joined element path, e.g. `/martif/text/body/termEntry`
    pub location: String,
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.message, self.location)
    }
}

/// Collector for the diagnostics of one conversion
#[derive(Debug, Default)]
pub struct Diagnostics {
    events: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a diagnostic and forward it to the logger
    pub fn emit(&mut self, kind: DiagnosticKind, location: &str, message: impl Into<String>) {
        let diagnostic = Diagnostic {
            level: kind.level(),
            kind,
            location: location.to_string(),
            message: message.into(),
        };

        match diagnostic.level {
            DiagnosticLevel::Info => info!("{}", diagnostic),
            DiagnosticLevel::Warn => warn!("{}", diagnostic),
        }

        self.events.push(diagnostic);
    }

    pub fn events(&self) -> &[Diagnostic] {
        &self.events
    }

    pub fn into_events(self) -> Vec<Diagnostic> {
        self.events
    }
}
