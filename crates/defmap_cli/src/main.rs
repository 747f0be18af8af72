mod cli;
mod diagnostics;

use std::process::ExitCode;

use clap::Parser as _;
use defmap_diagnostic::IntoDiagnostic;

use crate::cli::Cli;
use crate::diagnostics::PrettyDiagnosticEmitter;

#[derive(thiserror::Error, Debug)]
enum TranslatorError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("error writing JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("errors while translating")]
    HadErrors,
}

type TranslatorResult<T> = Result<T, TranslatorError>;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> TranslatorResult<()> {
    let cli = Cli::parse();

    let source = std::fs::read_to_string(&cli.input)?;

    let env = match defmap_frontend::translate(&source) {
        Ok(env) => env,
        Err(err) => {
            let name = cli.input.display().to_string();
            PrettyDiagnosticEmitter::default().emit(&err.into_diagnostic(), &name, &source);
            return Err(TranslatorError::HadErrors);
        }
    };

    // key order in the document is definition order
    let json = serde_json::to_string_pretty(&env)?;
    std::fs::write(&cli.output, json)?;

    Ok(())
}
