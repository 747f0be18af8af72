#[macro_use]
extern crate macro_rules_attribute;

mod lexer;
mod parser;

pub mod token;
pub mod value;

pub use lexer::{Lexer, LexerError, LexerErrorKind, LexerResult, TokenIter};
pub use parser::{ParseError, ParseErrorKind, ParseResult, Parser};
pub use value::{Environment, Value};

use defmap_diagnostic::{Diagnostic, IntoDiagnostic};

derive_alias! {
    #[derive(Node!)] = #[derive(Debug, Clone, PartialEq, Eq)];
    #[derive(NodeCopy!)] = #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)];
}

#[derive(thiserror::Error, Debug)]
pub enum TranslateError {
    #[error(transparent)]
    Lex(#[from] LexerError),

    #[error(transparent)]
    Parse(#[from] ParseError),
}

impl IntoDiagnostic for TranslateError {
    fn into_diagnostic(self) -> Diagnostic {
        match self {
            Self::Lex(err) => err.into_diagnostic(),
            Self::Parse(err) => err.into_diagnostic(),
        }
    }
}

/// Lex `source` into its full token sequence.
pub fn lex(source: &str) -> Result<TokenIter, LexerError> {
    Lexer::new(source).lex()
}

/// Translate `source` into its resolved constant environment. Lexing,
/// parsing and reference resolution happen in one pass; the first error
/// aborts the whole translation.
pub fn translate(source: &str) -> Result<Environment, TranslateError> {
    let tokens = lex(source)?;
    let env = Parser::new(tokens).parse()?;
    Ok(env)
}
