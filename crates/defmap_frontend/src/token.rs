use defmap_diagnostic::span::Span;

use crate::{Node, NodeCopy};

#[derive(Node!)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

#[derive(Node!)]
pub enum TokenKind {
    Keyword(Keyword),
    Identifier(String),
    Integer(i64),
    Text(String),

    LBrace,
    RBrace,
    LParen,
    RParen,

    Assign,
    Comma,
    Semicolon,
    Dot,
}

#[derive(NodeCopy!)]
pub enum Keyword {
    Def,
    Struct,
}

impl TokenKind {
    pub fn token_name(&self) -> &'static str {
        match self {
            TokenKind::Keyword(kw) => match kw {
                Keyword::Def => "keyword `def`",
                Keyword::Struct => "keyword `struct`",
            },
            TokenKind::Identifier(_) => "identifier",
            TokenKind::Integer(_) => "number",
            TokenKind::Text(_) => "text literal",
            TokenKind::LBrace => "`{`",
            TokenKind::RBrace => "`}`",
            TokenKind::LParen => "`(`",
            TokenKind::RParen => "`)`",
            TokenKind::Assign => "`=`",
            TokenKind::Comma => "`,`",
            TokenKind::Semicolon => "`;`",
            TokenKind::Dot => "`.`",
        }
    }
}
