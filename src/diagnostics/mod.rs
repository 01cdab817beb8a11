//! Structured diagnostics and the reporter interface.
//!
//! The analyzer never panics and never returns a `Result::Err` for an
//! ordinary grammar mismatch; it calls `Reporter::report` with a structured
//! record and keeps going. Rendering (colors, box-drawing, terminal width)
//! is explicitly an external collaborator's job — this module only carries
//! a [`ColorHint`] for that collaborator to act on.

pub mod codes;

pub use codes::DiagnosticCode;

use crate::base::{FileIndex, Position};

/// Severity taxonomy. `Recovery` diagnostics never fail a compilation by
/// themselves; `Error` diagnostics mark the compilation unsuccessful but let
/// the analyzer continue so later diagnostics can still be produced;
/// `Fatal` is never raised through this type (see
/// [`crate::error::CompileError`]) — it exists here only so a caller can
/// render the two together under one severity ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum Severity {
    #[default]
    Recovery,
    Error,
    Fatal,
}

/// A hint for a terminal renderer; the analyzer only ever chooses one of
/// these three, never a concrete color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorHint {
    Error,
    Warning,
    Note,
}

impl From<Severity> for ColorHint {
    fn from(severity: Severity) -> Self {
        match severity {
            Severity::Recovery => ColorHint::Warning,
            Severity::Error | Severity::Fatal => ColorHint::Error,
        }
    }
}

/// One structured diagnostic record.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    pub code: DiagnosticCode,
    pub severity: Severity,
    pub headline: String,
    pub file: FileIndex,
    pub position: Position,
    pub excerpt: Option<String>,
    pub notes: Vec<String>,
    pub suggestion: Option<String>,
    pub color: ColorHint,
}

impl Diagnostic {
    pub fn new(code: DiagnosticCode, file: FileIndex, position: Position) -> Self {
        let severity = Severity::Error;
        Self {
            code,
            severity,
            headline: code.default_headline().to_string(),
            file,
            position,
            excerpt: None,
            notes: Vec::new(),
            suggestion: None,
            color: severity.into(),
        }
    }

    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self.color = severity.into();
        self
    }

    pub fn with_headline(mut self, headline: impl Into<String>) -> Self {
        self.headline = headline.into();
        self
    }

    pub fn with_excerpt(mut self, excerpt: impl Into<String>) -> Self {
        self.excerpt = Some(excerpt.into());
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    pub fn is_error(&self) -> bool {
        matches!(self.severity, Severity::Error | Severity::Fatal)
    }
}

/// The analyzer's view of "somewhere to send diagnostics". Deliberately
/// minimal — `report` plus an error counter — so the analyzer never depends
/// on how (or whether) diagnostics are rendered.
pub trait Reporter {
    fn report(&mut self, diagnostic: Diagnostic);
    fn error_count(&self) -> usize;
}

/// Default in-memory reporter: keeps every diagnostic in analysis order.
#[derive(Debug, Default)]
pub struct CollectingReporter {
    diagnostics: Vec<Diagnostic>,
    error_count: usize,
}

impl CollectingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }
}

impl Reporter for CollectingReporter {
    fn report(&mut self, diagnostic: Diagnostic) {
        tracing::debug!(
            code = diagnostic.code.number(),
            severity = ?diagnostic.severity,
            "diagnostic reported"
        );
        if diagnostic.is_error() {
            self.error_count += 1;
        }
        self.diagnostics.push(diagnostic);
    }

    fn error_count(&self) -> usize {
        self.error_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collecting_reporter_counts_only_errors() {
        let mut reporter = CollectingReporter::new();
        reporter.report(
            Diagnostic::new(
                DiagnosticCode::MissingSeparatorPeriod,
                FileIndex::ENTRY_POINT,
                Position::new(1, 1),
            )
            .with_severity(Severity::Recovery),
        );
        reporter.report(Diagnostic::new(
            DiagnosticCode::DuplicateRootLevelDefinition,
            FileIndex::ENTRY_POINT,
            Position::new(2, 1),
        ));
        assert_eq!(reporter.diagnostics().len(), 2);
        assert_eq!(reporter.error_count(), 1);
    }
}
