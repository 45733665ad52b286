//! Grammar-based parser for rule entries.
//!
//! ```text
//! entry       := plan [ "(" inputAttrs ")" ] [ "->" outputAttrs ]
//! inputAttrs  := inputAttr [ "," inputAttrs ]
//! inputAttr   := ("PR" | "HR") "=" val
//! outputAttrs := outputAttr [ "," outputAttrs ]
//! outputAttr  := "S" | "EU"
//! val         := identifier | "*"
//! plan        := identifier
//! ```
//!
//! The entry is tokenized first; the grammar then runs over the token slice.
//! Lexer errors, the first grammar violation and every duplicate attribute
//! are all reported together.

use winnow::combinator::{cut_err, delimited, eof, opt, preceded};
use winnow::error::{ContextError, ErrMode, ModalResult, StrContext, StrContextValue};
use winnow::prelude::*;
use winnow::token::any;

use super::error::{ParseError, SyntaxError};
use super::lexer::{tokenize, Token, TokenKind};
use super::Parser as RuleParser;
use crate::types::WILDCARD;
use crate::{InputAttribute, OutputAttribute, ParsedRule};

type Tokens<'t> = &'t [Token];

/// Entry as written, before attribute semantics are applied.
#[derive(Debug)]
struct Entry {
    plan: String,
    inputs: Vec<(InputAttribute, String)>,
    outputs: Vec<OutputAttribute>,
}

// -- Terminals --------------------------------------------------------------

fn punct<'t>(expected: TokenKind) -> impl Parser<Tokens<'t>, Token, ErrMode<ContextError>> {
    any.verify(move |t: &Token| t.kind == expected)
}

fn identifier(input: &mut Tokens<'_>) -> ModalResult<String> {
    any.verify_map(|t: Token| match t.kind {
        TokenKind::Ident(name) => Some(name),
        _ => None,
    })
    .parse_next(input)
}

fn value(input: &mut Tokens<'_>) -> ModalResult<String> {
    alt_value
        .context(StrContext::Label("value"))
        .context(StrContext::Expected(StrContextValue::Description(
            "region or `*`",
        )))
        .parse_next(input)
}

fn alt_value(input: &mut Tokens<'_>) -> ModalResult<String> {
    if punct(TokenKind::Star).parse_next(input).is_ok() {
        return Ok(WILDCARD.to_owned());
    }
    identifier(input)
}

// -- Attributes -------------------------------------------------------------

fn input_attr(input: &mut Tokens<'_>) -> ModalResult<(InputAttribute, String)> {
    let attribute = any
        .verify_map(|t: Token| match t.kind {
            TokenKind::Ident(name) => InputAttribute::from_keyword(&name),
            _ => None,
        })
        .context(StrContext::Label("input attribute"))
        .context(StrContext::Expected(StrContextValue::StringLiteral("PR")))
        .context(StrContext::Expected(StrContextValue::StringLiteral("HR")))
        .parse_next(input)?;

    cut_err(punct(TokenKind::Equals))
        .context(StrContext::Expected(StrContextValue::CharLiteral('=')))
        .parse_next(input)?;

    let val = cut_err(value).parse_next(input)?;
    Ok((attribute, val))
}

fn output_attr(input: &mut Tokens<'_>) -> ModalResult<OutputAttribute> {
    any.verify_map(|t: Token| match t.kind {
        TokenKind::Ident(name) => OutputAttribute::from_keyword(&name),
        _ => None,
    })
    .context(StrContext::Label("output attribute"))
    .context(StrContext::Expected(StrContextValue::StringLiteral("S")))
    .context(StrContext::Expected(StrContextValue::StringLiteral("EU")))
    .parse_next(input)
}

fn input_attrs(input: &mut Tokens<'_>) -> ModalResult<Vec<(InputAttribute, String)>> {
    delimited(
        punct(TokenKind::LParen),
        cut_err(comma_list(input_attr)),
        cut_err(punct(TokenKind::RParen))
            .context(StrContext::Expected(StrContextValue::CharLiteral(',')))
            .context(StrContext::Expected(StrContextValue::CharLiteral(')'))),
    )
    .parse_next(input)
}

fn output_attrs(input: &mut Tokens<'_>) -> ModalResult<Vec<OutputAttribute>> {
    preceded(punct(TokenKind::Arrow), cut_err(comma_list(output_attr))).parse_next(input)
}

/// `item ( "," item )*`, committing to an item after every comma.
fn comma_list<'t, O>(
    mut item: impl Parser<Tokens<'t>, O, ErrMode<ContextError>>,
) -> impl Parser<Tokens<'t>, Vec<O>, ErrMode<ContextError>> {
    move |input: &mut Tokens<'t>| {
        let first = item.parse_next(input)?;
        let mut items = vec![first];
        while punct(TokenKind::Comma).parse_next(input).is_ok() {
            items.push(cut_err(item.by_ref()).parse_next(input)?);
        }
        Ok(items)
    }
}

// -- Entry ------------------------------------------------------------------

fn entry(input: &mut Tokens<'_>) -> ModalResult<Entry> {
    let plan = identifier
        .context(StrContext::Label("plan"))
        .context(StrContext::Expected(StrContextValue::Description(
            "plan name",
        )))
        .parse_next(input)?;

    let inputs = opt(input_attrs).parse_next(input)?.unwrap_or_default();
    let outputs = opt(output_attrs).parse_next(input)?.unwrap_or_default();

    cut_err(eof)
        .context(StrContext::Expected(StrContextValue::Description(
            "end of rule",
        )))
        .parse_next(input)?;

    Ok(Entry {
        plan,
        inputs,
        outputs,
    })
}

// -- Parser -----------------------------------------------------------------

/// Tokenizes the entry and applies the rule grammar.
///
/// Every syntax error carries the line and column of the offending token.
/// Attributes set twice are reported as
/// [`ParseError::DuplicateAttribute`].
#[derive(Debug, Clone, Copy, Default)]
pub struct GrammarParser;

impl RuleParser for GrammarParser {
    fn parse(&self, source: &str) -> Result<ParsedRule, Vec<ParseError>> {
        let lexed = tokenize(source);
        let mut errors: Vec<ParseError> = lexed.errors.into_iter().map(ParseError::from).collect();

        let mut remaining: Tokens<'_> = &lexed.tokens;
        let parsed = match entry.parse_next(&mut remaining) {
            Ok(parsed) => parsed,
            Err(err) => {
                let position = remaining.first().map_or(lexed.end, |t| t.position);
                let found = remaining
                    .first()
                    .map_or_else(|| "<EOF>".to_owned(), |t| format!("'{}'", t.kind));
                let detail = match err {
                    ErrMode::Backtrack(e) | ErrMode::Cut(e) => e.to_string().replace('\n', ", "),
                    ErrMode::Incomplete(_) => String::new(),
                };
                let message = if detail.is_empty() {
                    format!("mismatched input {found}")
                } else {
                    format!("mismatched input {found}: {detail}")
                };
                errors.push(SyntaxError::new(position.line, position.column, message).into());
                return Err(errors);
            }
        };

        let mut rule = match ParsedRule::new(&parsed.plan) {
            Ok(rule) => rule,
            Err(err) => {
                errors.push(err);
                return Err(errors);
            }
        };
        for (attribute, val) in &parsed.inputs {
            if let Err(err) = rule.set_input(*attribute, val) {
                errors.push(err);
            }
        }
        for attribute in &parsed.outputs {
            if let Err(err) = rule.set_output(*attribute) {
                errors.push(err);
            }
        }

        if errors.is_empty() {
            Ok(rule)
        } else {
            Err(errors)
        }
    }
}
