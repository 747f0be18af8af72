#[cfg(test)]
mod tests;

use std::str::Chars;

use defmap_diagnostic::span::Span;
use defmap_diagnostic::{Diagnostic, IntoDiagnostic};

use crate::token::*;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("{kind}")]
pub struct LexerError {
    pub kind: LexerErrorKind,
    pub span: Span,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum LexerErrorKind {
    #[error("unknown character {0:?}")]
    UnknownChar(char),

    #[error("expected a digit after {0:?}")]
    ExpectedDigit(char),

    #[error("numbers may not start with `0`")]
    LeadingZero,

    #[error("number does not fit in a 64-bit integer")]
    IntegerOverflow,

    #[error("text literal contains a line break")]
    TextLiteralNewline,

    #[error("text literal is not terminated")]
    UnterminatedText,

    #[error("block comment is not terminated")]
    UnterminatedBlockComment,
}

impl IntoDiagnostic for LexerError {
    fn into_diagnostic(self) -> Diagnostic {
        Diagnostic::error("syntax error", self.kind.to_string(), self.span)
    }
}

pub type LexerResult<T> = Result<T, LexerError>;

const LINE_COMMENT: &str = "REM";
const BLOCK_COMMENT_OPEN: &str = "--[[";
const BLOCK_COMMENT_CLOSE: &str = "]]";

/// The characters a line comment marker may directly follow. After
/// anything else (`=`, a quote, identifier text, ...) the marker is
/// ordinary input.
const COMMENT_BOUNDARY: &str = "{}();,.";

pub struct Lexer<'src> {
    all: &'src str,
    chars: Chars<'src>,

    token_start: usize,
}

impl<'src> Lexer<'src> {
    pub fn new(source: &'src str) -> Self {
        Self {
            all: source,
            chars: source.chars(),

            token_start: 0,
        }
    }

    /// Lexes the whole source up front. The sequence is only handed over if
    /// every character was accepted; the first malformed input aborts.
    pub fn lex(mut self) -> LexerResult<TokenIter> {
        let mut tokens = vec![];
        while let Some(token) = self.lex_token()? {
            tokens.push(token);
        }

        Ok(TokenIter {
            tokens: tokens.into_iter(),
            eof_span: Span::empty(self.all.len()),
        })
    }

    fn lex_token(&mut self) -> LexerResult<Option<Token>> {
        loop {
            self.token_start = self.byte_pos();

            let Some(ch) = self.peek() else {
                return Ok(None);
            };

            if ch.is_whitespace() {
                self.chars.next();
                continue;
            }

            if self.rest().starts_with(LINE_COMMENT) && self.at_comment_boundary() {
                self.skip_line_comment();
                continue;
            }

            // checked before number dispatch so `--[[` never lexes as a sign
            if self.rest().starts_with(BLOCK_COMMENT_OPEN) {
                self.skip_block_comment()?;
                continue;
            }

            self.chars.next();

            let kind = match ch {
                '{' => TokenKind::LBrace,
                '}' => TokenKind::RBrace,
                '(' => TokenKind::LParen,
                ')' => TokenKind::RParen,

                '=' => TokenKind::Assign,
                ',' => TokenKind::Comma,
                ';' => TokenKind::Semicolon,
                '.' => TokenKind::Dot,

                '\'' => self.lex_text()?,

                '+' | '-' => match self.peek() {
                    Some('0'..='9') => self.lex_number()?,
                    _ => return Err(self.error(LexerErrorKind::ExpectedDigit(ch))),
                },

                '0'..='9' => self.lex_number()?,

                ch if ch.is_alphabetic() => self.lex_alpha(),

                ch => return Err(self.error(LexerErrorKind::UnknownChar(ch))),
            };

            let token = Token {
                kind,
                span: self.span(),
            };

            return Ok(Some(token));
        }
    }

    /// The sign or first digit has been consumed; the numeral is re-read
    /// from `token_start` once the digits end.
    fn lex_number(&mut self) -> LexerResult<TokenKind> {
        while matches!(self.peek(), Some('0'..='9')) {
            self.chars.next();
        }

        let numeral = &self.all[self.token_start..self.byte_pos()];
        let digits = numeral.strip_prefix(['+', '-']).unwrap_or(numeral);

        // `0` alone is fine; `00` and `01` are not
        if digits.len() > 1 && digits.starts_with('0') {
            return Err(self.error(LexerErrorKind::LeadingZero));
        }

        let n = numeral
            .parse()
            .map_err(|_| self.error(LexerErrorKind::IntegerOverflow))?;

        Ok(TokenKind::Integer(n))
    }

    /// The opening quote has been consumed. The body is copied verbatim,
    /// with no escape processing.
    fn lex_text(&mut self) -> LexerResult<TokenKind> {
        let body_start = self.byte_pos();

        loop {
            match self.chars.next() {
                Some('\'') => break,
                Some('\n') => return Err(self.error(LexerErrorKind::TextLiteralNewline)),
                Some(_) => {}
                None => return Err(self.error(LexerErrorKind::UnterminatedText)),
            }
        }

        let body = &self.all[body_start..self.byte_pos() - 1];
        Ok(TokenKind::Text(body.to_owned()))
    }

    fn lex_alpha(&mut self) -> TokenKind {
        while matches!(self.peek(), Some(ch) if ch.is_alphanumeric()) {
            self.chars.next();
        }

        let s = &self.all[self.token_start..self.byte_pos()];

        match s {
            "def" => TokenKind::Keyword(Keyword::Def),
            "struct" => TokenKind::Keyword(Keyword::Struct),
            _ => TokenKind::Identifier(s.to_owned()),
        }
    }

    fn at_comment_boundary(&self) -> bool {
        match self.all[..self.token_start].chars().next_back() {
            None => true,
            Some(ch) => ch.is_whitespace() || COMMENT_BOUNDARY.contains(ch),
        }
    }

    fn skip_line_comment(&mut self) {
        while !matches!(self.peek(), Some('\n') | None) {
            self.chars.next();
        }
    }

    /// Block comments do not nest: the first terminator ends the comment.
    fn skip_block_comment(&mut self) -> LexerResult<()> {
        let body = &self.rest()[BLOCK_COMMENT_OPEN.len()..];

        match body.find(BLOCK_COMMENT_CLOSE) {
            Some(at) => {
                self.chars = body[at + BLOCK_COMMENT_CLOSE.len()..].chars();
                Ok(())
            }
            None => Err(LexerError {
                kind: LexerErrorKind::UnterminatedBlockComment,
                span: Span::new(self.token_start, self.token_start + BLOCK_COMMENT_OPEN.len()),
            }),
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.clone().next()
    }

    fn rest(&self) -> &'src str {
        self.chars.as_str()
    }

    fn byte_pos(&self) -> usize {
        self.all.len() - self.rest().len()
    }

    fn span(&self) -> Span {
        Span::new(self.token_start, self.byte_pos())
    }

    fn error(&self, kind: LexerErrorKind) -> LexerError {
        LexerError {
            kind,
            span: self.span(),
        }
    }
}

/// Tokens in source order, fully materialized before parsing starts. The
/// parser consumes the sequence exactly once; the position one past the
/// last character is kept around for end-of-input errors.
#[derive(Debug)]
pub struct TokenIter {
    tokens: std::vec::IntoIter<Token>,
    eof_span: Span,
}

impl TokenIter {
    pub fn peek(&self) -> Option<Token> {
        self.tokens.as_slice().first().cloned()
    }

    pub fn at_end(&self) -> bool {
        self.tokens.as_slice().is_empty()
    }

    pub fn eof_span(&self) -> Span {
        self.eof_span
    }
}

impl Iterator for TokenIter {
    type Item = Token;

    fn next(&mut self) -> Option<Self::Item> {
        self.tokens.next()
    }
}
