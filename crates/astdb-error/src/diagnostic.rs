//! The structured diagnostic wire type (spec.md §6 "Diagnostic wire
//! format", SPEC_FULL.md §3 "Structured diagnostics with suggestions").

use astdb_types::Severity;
use serde::{Deserialize, Serialize};

use crate::AstDbError;

/// The stable diagnostic codes named in spec.md §4.6/§7/§8. Codes are
/// stable across versions (spec.md §7, "User-visible behavior").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DiagnosticCode {
    /// Non-canonical query argument encoding.
    Qe0005,
    /// Query dependency cycle.
    Qe0007,
    /// Impure filesystem access from within a query.
    Q1001,
    /// Impure network access from within a query.
    Q1003,
    /// Impure environment access from within a query.
    Q1005,
}

impl DiagnosticCode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Qe0005 => "QE0005",
            Self::Qe0007 => "QE0007",
            Self::Q1001 => "Q1001",
            Self::Q1003 => "Q1003",
            Self::Q1005 => "Q1005",
        }
    }
}

impl std::fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single diagnostic emitted by the query engine: a code, severity,
/// optional source span, one-line message, location hint, and an
/// actionable suggestion. The exact serialization is host-defined; this
/// field set is the fixed contract (spec.md §6).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub code: DiagnosticCode,
    pub severity: Severity,
    pub span: Option<astdb_types::Span>,
    pub message: String,
    pub location_hint: Option<String>,
    pub suggestion: Option<String>,
}

impl Diagnostic {
    #[must_use]
    pub fn new(code: DiagnosticCode, severity: Severity, message: impl Into<String>) -> Self {
        Self {
            code,
            severity,
            span: None,
            message: message.into(),
            location_hint: None,
            suggestion: None,
        }
    }

    #[must_use]
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    #[must_use]
    pub fn with_location_hint(mut self, hint: impl Into<String>) -> Self {
        self.location_hint = Some(hint.into());
        self
    }

    #[must_use]
    pub fn with_span(mut self, span: astdb_types::Span) -> Self {
        self.span = Some(span);
        self
    }

    /// Build the diagnostic the purity guard emits for filesystem access
    /// (spec.md §4.6 Scenario 5: message containing "file system access",
    /// suggestion containing "Move I/O to dependent query boundary").
    #[must_use]
    pub fn impure_file_system() -> Self {
        Self::new(
            DiagnosticCode::Q1001,
            Severity::Error,
            "query attempted file system access",
        )
        .with_suggestion("Move I/O to dependent query boundary")
    }

    #[must_use]
    pub fn impure_network() -> Self {
        Self::new(
            DiagnosticCode::Q1003,
            Severity::Error,
            "query attempted network access",
        )
        .with_suggestion("Move I/O to dependent query boundary")
    }

    #[must_use]
    pub fn impure_environment() -> Self {
        Self::new(
            DiagnosticCode::Q1005,
            Severity::Error,
            "query attempted environment access",
        )
        .with_suggestion("Move I/O to dependent query boundary")
    }

    #[must_use]
    pub fn cycle(query_description: impl Into<String>) -> Self {
        Self::new(
            DiagnosticCode::Qe0007,
            Severity::Error,
            "query dependency cycle detected",
        )
        .with_location_hint(query_description)
        .with_suggestion("Break the cycle by restructuring the query dependency graph")
    }

    #[must_use]
    pub fn non_canonical_arg(reason: impl Into<String>) -> Self {
        Self::new(
            DiagnosticCode::Qe0005,
            Severity::Error,
            "query argument failed canonical encoding",
        )
        .with_location_hint(reason)
        .with_suggestion("Ensure arguments are valid UTF-8 and CIDs are exactly 32 bytes")
    }
}

impl From<&AstDbError> for Diagnostic {
    fn from(err: &AstDbError) -> Self {
        match err {
            AstDbError::NonCanonicalArg => Self::non_canonical_arg(err.to_string()),
            AstDbError::Cycle => Self::cycle(err.to_string()),
            AstDbError::ImpureFileSystem => Self::impure_file_system(),
            AstDbError::ImpureNetwork => Self::impure_network(),
            AstDbError::ImpureEnvironment => Self::impure_environment(),
            other => Self::new(
                DiagnosticCode::Qe0005,
                Severity::Error,
                other.to_string(),
            ),
        }
    }
}
