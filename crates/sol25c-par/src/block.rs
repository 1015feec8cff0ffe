//! Block literal and statement parsing.

use sol25c_lex::TokenKind;
use sol25c_util::{Diagnostic, Result};

use crate::ast::{Block, Parameter, Stmt};
use crate::{is_reserved, Parser};

impl Parser {
    /// Parse a block literal:
    /// `"[" (":" IDENT)* "|" Statement* "]"` - the pipe is mandatory even
    /// with zero parameters. Every parameter name must start right where
    /// its colon ended.
    pub(crate) fn parse_block(&mut self) -> Result<Block> {
        self.expect(TokenKind::LBracket)?;

        let mut parameters = Vec::new();
        match self.peek_kind() {
            Some(TokenKind::Pipe) => {
                self.advance()?;
            },
            Some(TokenKind::Colon) => {
                let mut order = 1;
                while self.peek_kind() == Some(TokenKind::Colon) {
                    let colon = self.advance()?;
                    parameters.push(self.parse_parameter(colon.span.end, order)?);
                    order += 1;
                }
                self.expect(TokenKind::Pipe)?;
            },
            _ => {
                return Err(self.error_at_current("expected block parameters or '|'"));
            },
        }

        let mut statements = Vec::new();
        let mut order = 1;
        while self.peek_kind().is_some_and(|k| k != TokenKind::RBracket) {
            statements.push(self.parse_statement(order)?);
            order += 1;
        }
        self.expect(TokenKind::RBracket)?;

        Ok(Block {
            parameters,
            statements,
        })
    }

    /// Consume the parameter name that must immediately follow a colon at
    /// offset `colon_end`.
    fn parse_parameter(&mut self, colon_end: usize, order: usize) -> Result<Parameter> {
        let Some(token) = self.peek() else {
            return Err(Diagnostic::syntactic_eof(
                "expected identifier after ':' in block header",
            ));
        };
        if token.kind != TokenKind::Ident {
            return Err(Diagnostic::syntactic(
                format!(
                    "expected identifier after ':' in block header, found {}",
                    token.kind
                ),
                token.span,
            ));
        }
        if token.span.start != colon_end {
            return Err(Diagnostic::syntactic(
                "whitespace between ':' and parameter name",
                token.span,
            ));
        }

        let token = self.advance()?;
        if !token
            .value
            .starts_with(|c: char| c.is_ascii_lowercase() || c == '_')
        {
            return Err(Diagnostic::syntactic(
                format!("invalid parameter identifier '{}'", token.value),
                token.span,
            ));
        }
        if is_reserved(&token.value) {
            return Err(Diagnostic::syntactic(
                format!("reserved identifier '{}' used as parameter", token.value),
                token.span,
            ));
        }

        Ok(Parameter {
            name: token.value,
            order,
        })
    }

    /// Parse one dot-terminated statement. `IDENT ":="` starts an
    /// assignment; anything else is a bare expression statement.
    fn parse_statement(&mut self, order: usize) -> Result<Stmt> {
        if self.peek_kind() == Some(TokenKind::Ident)
            && self.peek_kind_at(1) == Some(TokenKind::Assign)
        {
            let target = self.advance()?;
            if is_reserved(&target.value) {
                return Err(Diagnostic::syntactic(
                    format!("cannot assign to reserved identifier '{}'", target.value),
                    target.span,
                ));
            }
            self.expect(TokenKind::Assign)?;
            let value = self.parse_expr()?;
            self.expect(TokenKind::Dot)?;

            Ok(Stmt::Assign {
                order,
                target: target.value,
                value,
            })
        } else {
            let value = self.parse_expr()?;
            self.expect(TokenKind::Dot)?;
            Ok(Stmt::Expr { order, value })
        }
    }
}
