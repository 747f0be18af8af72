
use defmap_diagnostic::span::Span;
use defmap_diagnostic::{Diagnostic, IntoDiagnostic};
use indexmap::IndexMap;

use crate::lexer::TokenIter;
use crate::token::{Keyword, Token, TokenKind};
use crate::value::{Environment, Value};

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("{kind}")]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub span: Span,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseErrorKind {
    #[error("expected {expected}, found {found}")]
    Expected { expected: String, found: String },

    #[error("undefined constant `{0}`")]
    UndefinedConstant(String),
}

impl IntoDiagnostic for ParseError {
    fn into_diagnostic(self) -> Diagnostic {
        Diagnostic::error("syntax error", self.kind.to_string(), self.span)
    }
}

pub type ParseResult<T> = Result<T, ParseError>;

/// Recognizes the grammar and evaluates it in the same pass.
///
/// Each rule returns the fully resolved value it recognized; constant
/// references are substituted from the environment built so far, so no
/// syntax tree is ever materialized. There is no recovery: the first
/// mismatch aborts the whole translation.
pub struct Parser {
    tokens: TokenIter,
    consts: Environment,
}

impl Parser {
    pub fn new(tokens: TokenIter) -> Self {
        Self {
            tokens,
            consts: Environment::new(),
        }
    }

    pub fn parse(mut self) -> ParseResult<Environment> {
        while !self.tokens.at_end() {
            self.parse_def()?;
        }

        Ok(self.consts)
    }

    /// `'(' 'def' name value ')' ';'`
    fn parse_def(&mut self) -> ParseResult<()> {
        self.expect(TokenKind::LParen)?;
        self.expect(TokenKind::Keyword(Keyword::Def))?;

        let (name, _) = self.parse_ident()?;
        let value = self.parse_value()?;

        self.expect(TokenKind::RParen)?;
        self.expect(TokenKind::Semicolon)?;

        // last definition wins; the entry keeps its original position
        self.consts.insert(name, value);
        Ok(())
    }

    /// A single token of lookahead decides the value class.
    fn parse_value(&mut self) -> ParseResult<Value> {
        match self.tokens.peek() {
            Some(Token {
                kind: TokenKind::Integer(n),
                ..
            }) => {
                self.tokens.next();
                Ok(Value::Integer(n))
            }

            Some(Token {
                kind: TokenKind::Text(text),
                ..
            }) => {
                self.tokens.next();
                Ok(Value::Text(text))
            }

            Some(t) if t.kind == TokenKind::Keyword(Keyword::Struct) => self.parse_struct(),

            Some(t) if t.kind == TokenKind::Dot => self.parse_const_ref(),

            other => Err(self.error_expected("a value", other)),
        }
    }

    /// `'struct' '{' [field (',' field)* [',']] '}'`
    fn parse_struct(&mut self) -> ParseResult<Value> {
        self.expect(TokenKind::Keyword(Keyword::Struct))?;
        self.expect(TokenKind::LBrace)?;

        let mut fields = IndexMap::new();

        if self.eat_kind(TokenKind::RBrace) {
            return Ok(Value::Record(fields));
        }

        loop {
            let (name, _) = self.parse_ident()?;
            self.expect(TokenKind::Assign)?;
            let value = self.parse_value()?;
            fields.insert(name, value);

            if !self.eat_kind(TokenKind::Comma) {
                break;
            }

            // a trailing comma may close the field list
            if matches!(self.tokens.peek(), Some(t) if t.kind == TokenKind::RBrace) {
                break;
            }
        }

        self.expect(TokenKind::RBrace)?;
        Ok(Value::Record(fields))
    }

    /// `'.' '(' name ')' '.'`
    ///
    /// The constant must already be bound. Its value is copied out of the
    /// environment, so redefining the name later leaves this substitution
    /// untouched.
    fn parse_const_ref(&mut self) -> ParseResult<Value> {
        self.expect(TokenKind::Dot)?;
        self.expect(TokenKind::LParen)?;
        let (name, span) = self.parse_ident()?;
        self.expect(TokenKind::RParen)?;
        self.expect(TokenKind::Dot)?;

        match self.consts.get(&name) {
            Some(value) => Ok(value.clone()),
            None => Err(ParseError {
                kind: ParseErrorKind::UndefinedConstant(name),
                span,
            }),
        }
    }

    fn parse_ident(&mut self) -> ParseResult<(String, Span)> {
        match self.tokens.peek() {
            Some(Token {
                kind: TokenKind::Identifier(name),
                span,
            }) => {
                self.tokens.next();
                Ok((name, span))
            }
            other => Err(self.error_expected("an identifier", other)),
        }
    }

    fn expect(&mut self, kind: TokenKind) -> ParseResult<Token> {
        match self.tokens.peek() {
            Some(t) if t.kind == kind => {
                self.tokens.next();
                Ok(t)
            }
            other => Err(self.error_expected(kind.token_name(), other)),
        }
    }

    fn eat_kind(&mut self, kind: TokenKind) -> bool {
        match self.tokens.peek() {
            Some(t) if t.kind == kind => {
                self.tokens.next();
                true
            }
            _ => false,
        }
    }

    fn error_expected(&self, expected: impl Into<String>, found: Option<Token>) -> ParseError {
        match found {
            Some(token) => ParseError {
                kind: ParseErrorKind::Expected {
                    expected: expected.into(),
                    found: token.kind.token_name().to_owned(),
                },
                span: token.span,
            },
            None => ParseError {
                kind: ParseErrorKind::Expected {
                    expected: expected.into(),
                    found: "end of input".to_owned(),
                },
                span: self.tokens.eof_span(),
            },
        }
    }
}
