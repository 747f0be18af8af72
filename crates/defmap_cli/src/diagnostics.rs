use defmap_diagnostic::termcolor::{ColorChoice, StandardStream};
use defmap_diagnostic::Diagnostic;

/// Renders diagnostics to stderr, colored when the stream supports it.
pub struct PrettyDiagnosticEmitter {
    stream: StandardStream,
}

impl Default for PrettyDiagnosticEmitter {
    fn default() -> Self {
        Self {
            stream: StandardStream::stderr(ColorChoice::Auto),
        }
    }
}

impl PrettyDiagnosticEmitter {
    pub fn emit(&mut self, diagnostic: &Diagnostic, name: &str, source: &str) {
        diagnostic
            .write_to_stream(name, source, &mut self.stream)
            .expect("failed to emit diagnostic");
    }
}
