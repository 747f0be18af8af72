mod render;
pub mod span;

pub use termcolor;

use span::Span;

/// A user-facing account of a fatal translation error: a headline message,
/// a short label describing what went wrong, and the source range it points
/// at.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    pub message: String,
    pub label: String,
    pub span: Span,
}

impl Diagnostic {
    pub fn error(message: impl Into<String>, label: impl Into<String>, span: Span) -> Self {
        Self {
            message: message.into(),
            label: label.into(),
            span,
        }
    }
}

/// Conversion of typed errors into their rendered form.
pub trait IntoDiagnostic {
    fn into_diagnostic(self) -> Diagnostic;
}

impl IntoDiagnostic for Diagnostic {
    fn into_diagnostic(self) -> Diagnostic {
        self
    }
}
