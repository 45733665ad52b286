use std::fmt;

use winnow::combinator::{alt, repeat};
use winnow::error::ModalResult;
use winnow::prelude::*;
use winnow::token::take_while;

use super::error::SyntaxError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum TokenKind {
    Ident(String),
    Star,
    LParen,
    RParen,
    Comma,
    Equals,
    Arrow,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Ident(name) => write!(f, "{name}"),
            TokenKind::Star => write!(f, "*"),
            TokenKind::LParen => write!(f, "("),
            TokenKind::RParen => write!(f, ")"),
            TokenKind::Comma => write!(f, ","),
            TokenKind::Equals => write!(f, "="),
            TokenKind::Arrow => write!(f, "->"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Position {
    pub(crate) line: usize,
    pub(crate) column: usize,
}

impl Position {
    /// Line (1-based) and column (0-based, in chars) of a byte offset.
    fn at(source: &str, offset: usize) -> Self {
        let before = &source[..offset];
        let line_start = before.rfind('\n').map_or(0, |i| i + 1);
        Self {
            line: before.matches('\n').count() + 1,
            column: before[line_start..].chars().count(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Token {
    pub(crate) kind: TokenKind,
    pub(crate) position: Position,
}

#[derive(Debug)]
pub(crate) struct Lexed {
    pub(crate) tokens: Vec<Token>,
    pub(crate) errors: Vec<SyntaxError>,
    /// Position just past the last character, used for end-of-input errors.
    pub(crate) end: Position,
}

// -- Identifiers ------------------------------------------------------------

fn segment<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    take_while(1.., |c: char| c.is_ascii_alphanumeric() || c == '_' || c == '.')
        .parse_next(input)
}

/// Plan names and regions, e.g. `azure_lite`, `cf-eu10`, `eu-west-2`.
/// A `-` only continues an identifier when another segment follows, so
/// `aws->S` lexes as `aws`, `->`, `S`.
fn ident<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    (segment, repeat(0.., ('-', segment)).map(|()| ()))
        .take()
        .parse_next(input)
}

fn token_kind(input: &mut &str) -> ModalResult<TokenKind> {
    alt((
        "->".value(TokenKind::Arrow),
        '('.value(TokenKind::LParen),
        ')'.value(TokenKind::RParen),
        ','.value(TokenKind::Comma),
        '='.value(TokenKind::Equals),
        '*'.value(TokenKind::Star),
        ident.map(|name: &str| TokenKind::Ident(name.to_owned())),
    ))
    .parse_next(input)
}

// -- Token stream -----------------------------------------------------------

/// Split a rule entry into tokens. Unrecognised characters are reported and
/// skipped so that lexing always reaches the end of the input.
pub(crate) fn tokenize(source: &str) -> Lexed {
    let mut input = source;
    let mut tokens = Vec::new();
    let mut errors = Vec::new();

    loop {
        input = input.trim_start();
        let Some(next) = input.chars().next() else {
            break;
        };
        let position = Position::at(source, source.len() - input.len());
        let checkpoint = input;

        match token_kind.parse_next(&mut input) {
            Ok(kind) => tokens.push(Token { kind, position }),
            Err(_) => {
                errors.push(SyntaxError::new(
                    position.line,
                    position.column,
                    format!("token recognition error at: '{next}'"),
                ));
                input = &checkpoint[next.len_utf8()..];
            }
        }
    }

    Lexed {
        tokens,
        errors,
        end: Position::at(source, source.len()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        tokenize(source).tokens.into_iter().map(|t| t.kind).collect()
    }

    fn id(name: &str) -> TokenKind {
        TokenKind::Ident(name.into())
    }

    #[test]
    fn lex_full_entry() {
        assert_eq!(
            kinds("aws(PR=cf-eu10,HR=*)->S,EU"),
            vec![
                id("aws"),
                TokenKind::LParen,
                id("PR"),
                TokenKind::Equals,
                id("cf-eu10"),
                TokenKind::Comma,
                id("HR"),
                TokenKind::Equals,
                TokenKind::Star,
                TokenKind::RParen,
                TokenKind::Arrow,
                id("S"),
                TokenKind::Comma,
                id("EU"),
            ]
        );
    }

    #[test]
    fn arrow_not_swallowed_by_identifier() {
        assert_eq!(
            kinds("azure_lite->EU"),
            vec![id("azure_lite"), TokenKind::Arrow, id("EU")]
        );
    }

    #[test]
    fn whitespace_skipped_and_positions_tracked() {
        let lexed = tokenize("azure( PR = westeurope )");
        assert!(lexed.errors.is_empty());
        let columns: Vec<usize> = lexed.tokens.iter().map(|t| t.position.column).collect();
        assert_eq!(columns, vec![0, 5, 7, 10, 12, 23]);
        assert_eq!(lexed.end.column, 24);
    }

    #[test]
    fn unknown_characters_reported_and_skipped() {
        let lexed = tokenize("aws!(PR=x)#");
        assert_eq!(lexed.errors.len(), 2);
        assert_eq!(lexed.errors[0].column(), 3);
        assert_eq!(lexed.errors[1].column(), 10);
        assert_eq!(lexed.tokens.len(), 6);
    }

    #[test]
    fn dangling_dash_is_an_error() {
        let lexed = tokenize("aws-");
        assert_eq!(lexed.tokens.len(), 1);
        assert_eq!(lexed.errors.len(), 1);
        assert_eq!(lexed.errors[0].column(), 3);
    }

    #[test]
    fn multi_line_positions() {
        let lexed = tokenize("aws\n  (");
        assert_eq!(lexed.tokens[1].position, Position { line: 2, column: 2 });
    }
}
