//! Diagnostic types and message lookup for the compiler front-end.
//!
//! A diagnostic is a structured `(severity, code, span, arguments)` record.
//! Message templates live in `data.rs` and use `{0}`, `{1}`, … placeholders
//! filled from the ordered argument list.

use crate::span::Span;
use serde::Serialize;

pub mod data;
pub use data::{DIAGNOSTIC_MESSAGES, diagnostic_codes};

/// Diagnostic severity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum DiagnosticSeverity {
    Fatal,
    Error,
    Warning,
    Note,
}

/// A structured diagnostic record.
///
/// The core never formats messages on its own; `message_text()` renders the
/// template for the record's code on demand.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub severity: DiagnosticSeverity,
    pub code: u32,
    pub file: String,
    pub span: Span,
    /// Ordered template arguments.
    pub args: Vec<String>,
}

impl Diagnostic {
    #[must_use]
    pub fn new(
        severity: DiagnosticSeverity,
        code: u32,
        file: impl Into<String>,
        span: Span,
        args: Vec<String>,
    ) -> Self {
        Self {
            severity,
            code,
            file: file.into(),
            span,
            args,
        }
    }

    /// Create an error diagnostic.
    #[must_use]
    pub fn error(code: u32, file: impl Into<String>, span: Span, args: Vec<String>) -> Self {
        Self::new(DiagnosticSeverity::Error, code, file, span, args)
    }

    /// Create a warning diagnostic.
    #[must_use]
    pub fn warning(code: u32, file: impl Into<String>, span: Span, args: Vec<String>) -> Self {
        Self::new(DiagnosticSeverity::Warning, code, file, span, args)
    }

    /// Create a fatal diagnostic (internal failure or driver abort).
    #[must_use]
    pub fn fatal(code: u32, file: impl Into<String>, span: Span, args: Vec<String>) -> Self {
        Self::new(DiagnosticSeverity::Fatal, code, file, span, args)
    }

    /// Render the message template for this record's code.
    #[must_use]
    pub fn message_text(&self) -> String {
        let args: Vec<&str> = self.args.iter().map(String::as_str).collect();
        match get_message_template(self.code) {
            Some(template) => format_message(template, &args),
            None => format!("unknown diagnostic #{}", self.code),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(
            self.severity,
            DiagnosticSeverity::Error | DiagnosticSeverity::Fatal
        )
    }
}

/// A diagnostic message definition with code, severity, and template.
#[derive(Clone, Copy, Debug)]
pub struct DiagnosticMessage {
    pub code: u32,
    pub severity: DiagnosticSeverity,
    pub message: &'static str,
}

/// Look up the message template for a diagnostic code.
#[must_use]
pub fn get_message_template(code: u32) -> Option<&'static str> {
    DIAGNOSTIC_MESSAGES
        .iter()
        .find(|m| m.code == code)
        .map(|m| m.message)
}

/// Format a message template by replacing `{0}`, `{1}`, etc. with arguments.
#[must_use]
pub fn format_message(template: &str, args: &[&str]) -> String {
    let mut result = template.to_string();
    for (i, arg) in args.iter().enumerate() {
        result = result.replace(&format!("{{{i}}}"), arg);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn templates_substitute_ordered_arguments() {
        assert_eq!(
            format_message("'{0}' is not a member type of '{1}'", &["Element", "Box"]),
            "'Element' is not a member type of 'Box'"
        );
    }

    #[test]
    fn every_code_constant_has_a_template() {
        for m in DIAGNOSTIC_MESSAGES {
            assert!(!m.message.is_empty(), "code {} has no template", m.code);
        }
    }

    #[test]
    fn message_text_renders_from_the_table() {
        let d = Diagnostic::error(
            diagnostic_codes::E_USE_OF_UNRESOLVED_IDENTIFIER_1,
            "t.sw",
            Span::new(0, 3),
            vec!["foo".into()],
        );
        assert_eq!(d.message_text(), "use of unresolved identifier 'foo'");
    }
}
