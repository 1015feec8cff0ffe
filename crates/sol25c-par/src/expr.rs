//! Expression parsing.
//!
//! An expression is a base followed by a message tail. The tail is
//! disambiguated by one token of lookahead: an identifier immediately
//! followed by a colon extends the expression with a keyword send,
//! collecting as many `part: arg` pieces as follow into one selector; a
//! lone identifier is a unary send and can chain. Keyword-send arguments
//! bind as bases only, so a nested keyword send needs parentheses.

use sol25c_lex::{Token, TokenKind};
use sol25c_util::{Diagnostic, Result};

use crate::ast::{Expr, LiteralKind};
use crate::Parser;

impl Parser {
    /// Parse a full expression: base plus message tail.
    pub(crate) fn parse_expr(&mut self) -> Result<Expr> {
        let base = self.parse_expr_base()?;
        self.parse_expr_tail(base)
    }

    /// Parse an expression base: a parenthesized expression, a block
    /// literal, a literal constant, or a variable.
    ///
    /// An identifier classifies by spelling: `true`, `false`, and `nil`
    /// become literals, a capitalized name becomes a class reference,
    /// anything else a variable read.
    pub(crate) fn parse_expr_base(&mut self) -> Result<Expr> {
        let Some(token) = self.peek() else {
            return Err(Diagnostic::syntactic_eof(
                "unexpected end of input in expression",
            ));
        };

        match token.kind {
            TokenKind::LParen => {
                self.advance()?;
                let expr = self.parse_expr()?;
                self.expect(TokenKind::RParen)?;
                Ok(expr)
            },
            TokenKind::LBracket => Ok(Expr::Block(self.parse_block()?)),
            TokenKind::Number => {
                let token = self.advance()?;
                Ok(literal(LiteralKind::Integer, token))
            },
            TokenKind::Str => {
                let token = self.advance()?;
                Ok(literal(LiteralKind::Str, token))
            },
            TokenKind::Ident => {
                let token = self.advance()?;
                let kind = match token.value.as_str() {
                    "true" => Some(LiteralKind::True),
                    "false" => Some(LiteralKind::False),
                    "nil" => Some(LiteralKind::Nil),
                    name if name.starts_with(|c: char| c.is_ascii_uppercase()) => {
                        Some(LiteralKind::Class)
                    },
                    _ => None,
                };
                Ok(match kind {
                    Some(kind) => literal(kind, token),
                    None => Expr::Var {
                        name: token.value,
                        span: token.span,
                    },
                })
            },
            _ => Err(Diagnostic::syntactic(
                format!(
                    "unexpected {} '{}' in expression",
                    token.kind, token.value
                ),
                token.span,
            )),
        }
    }

    /// Extend `base` with unary and keyword message sends.
    fn parse_expr_tail(&mut self, mut base: Expr) -> Result<Expr> {
        loop {
            if self.peek_kind() != Some(TokenKind::Ident) {
                break;
            }

            if self.peek_kind_at(1) == Some(TokenKind::Colon) {
                base = self.parse_keyword_send(base)?;
            } else {
                let selector = self.advance()?;
                let span = base.span().unwrap_or(selector.span);
                base = Expr::Send {
                    selector: selector.value,
                    target: Box::new(base),
                    args: Vec::new(),
                    span,
                };
            }
        }

        Ok(base)
    }

    /// Parse a keyword-send tail: `part: arg (part: arg)*`, folding all
    /// pieces into a single send with a concatenated selector. The caller
    /// has already established that an identifier followed by a colon is
    /// next.
    fn parse_keyword_send(&mut self, base: Expr) -> Result<Expr> {
        let first = self.expect(TokenKind::Ident)?;
        let first_span = first.span;
        self.consume_adjacent_colon(first.span.end)?;

        let mut selector = first.value;
        selector.push(':');
        let mut args = vec![self.parse_expr_base()?];

        while self.peek_kind() == Some(TokenKind::Ident)
            && self.peek_kind_at(1) == Some(TokenKind::Colon)
        {
            let part = self.advance()?;
            self.consume_adjacent_colon(part.span.end)?;
            selector.push_str(&part.value);
            selector.push(':');
            args.push(self.parse_expr_base()?);
        }

        let span = base.span().unwrap_or(first_span);
        Ok(Expr::Send {
            selector,
            target: Box::new(base),
            args,
            span,
        })
    }

    /// Consume the colon that must start exactly at `ident_end`.
    fn consume_adjacent_colon(&mut self, ident_end: usize) -> Result<()> {
        let colon = self.expect(TokenKind::Colon)?;
        if colon.span.start != ident_end {
            return Err(Diagnostic::syntactic(
                "whitespace between identifier and ':' in selector",
                colon.span,
            ));
        }
        Ok(())
    }
}

fn literal(kind: LiteralKind, token: Token) -> Expr {
    Expr::Literal {
        kind,
        value: token.value,
        span: token.span,
    }
}
