use defmap_diagnostic::span::Span;

use super::{Lexer, LexerError, LexerErrorKind};
use crate::token::{Keyword, Token, TokenKind};

fn lex(source: &str) -> Result<Vec<Token>, LexerError> {
    Lexer::new(source).lex().map(Iterator::collect)
}

fn kinds(source: &str) -> Vec<TokenKind> {
    lex(source)
        .expect("lexing failed")
        .into_iter()
        .map(|t| t.kind)
        .collect()
}

fn lex_err(source: &str) -> LexerError {
    Lexer::new(source).lex().expect_err("lexing succeeded")
}

fn ident(name: &str) -> TokenKind {
    TokenKind::Identifier(name.to_owned())
}

#[test]
fn symbols() {
    assert_eq!(
        kinds("{}()=,;."),
        vec![
            TokenKind::LBrace,
            TokenKind::RBrace,
            TokenKind::LParen,
            TokenKind::RParen,
            TokenKind::Assign,
            TokenKind::Comma,
            TokenKind::Semicolon,
            TokenKind::Dot,
        ]
    );
}

#[test]
fn keywords_are_exact_matches() {
    assert_eq!(
        kinds("def struct defx Struct"),
        vec![
            TokenKind::Keyword(Keyword::Def),
            TokenKind::Keyword(Keyword::Struct),
            ident("defx"),
            ident("Struct"),
        ]
    );
}

#[test]
fn identifiers_take_trailing_digits() {
    assert_eq!(kinds("a1 b22c"), vec![ident("a1"), ident("b22c")]);
}

#[test]
fn underscore_is_not_identifier_material() {
    assert_eq!(lex_err("a_b").kind, LexerErrorKind::UnknownChar('_'));
}

#[test]
fn numbers() {
    assert_eq!(
        kinds("0 7 +42 -42"),
        vec![
            TokenKind::Integer(0),
            TokenKind::Integer(7),
            TokenKind::Integer(42),
            TokenKind::Integer(-42),
        ]
    );
}

#[test]
fn number_stops_at_letters() {
    // `0x10` is the number zero followed by an identifier
    assert_eq!(kinds("0x10"), vec![TokenKind::Integer(0), ident("x10")]);
}

#[test]
fn leading_zeros_are_rejected() {
    assert_eq!(lex_err("007").kind, LexerErrorKind::LeadingZero);
    assert_eq!(lex_err("-007").kind, LexerErrorKind::LeadingZero);
    assert_eq!(lex_err("+01").kind, LexerErrorKind::LeadingZero);
}

#[test]
fn sign_needs_a_digit() {
    assert_eq!(lex_err("+x").kind, LexerErrorKind::ExpectedDigit('+'));
    assert_eq!(lex_err("-").kind, LexerErrorKind::ExpectedDigit('-'));
}

#[test]
fn i64_range() {
    assert_eq!(
        kinds("-9223372036854775808 9223372036854775807"),
        vec![TokenKind::Integer(i64::MIN), TokenKind::Integer(i64::MAX)]
    );
    assert_eq!(
        lex_err("9223372036854775808").kind,
        LexerErrorKind::IntegerOverflow
    );
}

#[test]
fn text_literals() {
    assert_eq!(
        kinds("'hi' ''"),
        vec![
            TokenKind::Text("hi".to_owned()),
            TokenKind::Text(String::new()),
        ]
    );
}

#[test]
fn text_has_no_escapes() {
    assert_eq!(kinds(r"'a\b'"), vec![TokenKind::Text(r"a\b".to_owned())]);
}

#[test]
fn unterminated_text() {
    assert_eq!(lex_err("'abc").kind, LexerErrorKind::UnterminatedText);
}

#[test]
fn text_may_not_span_lines() {
    assert_eq!(lex_err("'a\nb'").kind, LexerErrorKind::TextLiteralNewline);
}

#[test]
fn line_comment_after_whitespace() {
    assert_eq!(kinds("x REM anything here\ny"), vec![ident("x"), ident("y")]);
}

#[test]
fn line_comment_at_start_of_input() {
    assert_eq!(kinds("REM hi\nx"), vec![ident("x")]);
}

#[test]
fn line_comment_after_delimiter() {
    assert_eq!(
        kinds(";REM hi\nx"),
        vec![TokenKind::Semicolon, ident("x")]
    );
}

#[test]
fn line_comment_needs_a_boundary() {
    // a closing quote does not open a comment...
    assert_eq!(
        kinds("'a'REM hi"),
        vec![TokenKind::Text("a".to_owned()), ident("REM"), ident("hi")]
    );

    // ...and neither does `=`
    assert_eq!(
        kinds("=REM hi"),
        vec![TokenKind::Assign, ident("REM"), ident("hi")]
    );
}

#[test]
fn line_comment_runs_to_end_of_input() {
    assert_eq!(kinds("x REM no newline"), vec![ident("x")]);
}

#[test]
fn block_comment() {
    assert_eq!(kinds("x --[[ a\nb ]] y"), vec![ident("x"), ident("y")]);
}

#[test]
fn block_comments_do_not_nest() {
    // the first `]]` terminates; the rest is ordinary input
    assert_eq!(kinds("--[[ a --[[ b ]] c"), vec![ident("c")]);
}

#[test]
fn unterminated_block_comment() {
    let err = lex_err("--[[ never closed");
    assert_eq!(err.kind, LexerErrorKind::UnterminatedBlockComment);
    assert_eq!(err.span, Span::new(0, 4));
}

#[test]
fn unknown_character() {
    let err = lex_err("  @");
    assert_eq!(err.kind, LexerErrorKind::UnknownChar('@'));
    assert_eq!(err.span, Span::new(2, 3));
}

#[test]
fn token_spans() {
    let tokens = lex("  (def a 'hi');").unwrap();
    let spans: Vec<Span> = tokens.iter().map(|t| t.span).collect();

    assert_eq!(
        spans,
        vec![
            Span::new(2, 3),
            Span::new(3, 6),
            Span::new(7, 8),
            Span::new(9, 13),
            Span::new(13, 14),
            Span::new(14, 15),
        ]
    );
}

#[test]
fn eof_span_sits_past_the_last_character() {
    let iter = Lexer::new("ab ").lex().unwrap();
    assert_eq!(iter.eof_span(), Span::empty(3));
}
