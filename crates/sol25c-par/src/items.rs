//! Class and method parsing.

use sol25c_lex::TokenKind;
use sol25c_util::{Diagnostic, Result};

use crate::ast::{ClassDecl, Method};
use crate::{is_reserved, Parser};

impl Parser {
    /// Parse one class declaration:
    /// `"class" IDENT ":" IDENT "{" Method* "}"`.
    pub(crate) fn parse_class(&mut self) -> Result<ClassDecl> {
        let keyword = self.expect(TokenKind::Ident)?;
        if keyword.value != "class" {
            return Err(Diagnostic::syntactic(
                format!("expected 'class', found '{}'", keyword.value),
                keyword.span,
            ));
        }

        let name = self.class_name()?;
        self.expect(TokenKind::Colon)?;
        let parent = self.class_name()?;
        self.expect(TokenKind::LBrace)?;

        let mut methods = Vec::new();
        while self.peek_kind().is_some_and(|k| k != TokenKind::RBrace) {
            methods.push(self.parse_method()?);
        }
        self.expect(TokenKind::RBrace)?;

        Ok(ClassDecl {
            name,
            parent,
            methods,
        })
    }

    /// Consume a class or parent name: capitalized, no underscores.
    fn class_name(&mut self) -> Result<String> {
        let token = self.expect(TokenKind::Ident)?;
        let valid = token.value.starts_with(|c: char| c.is_ascii_uppercase())
            && !token.value.contains('_');
        if !valid {
            return Err(Diagnostic::syntactic(
                format!("invalid class identifier '{}'", token.value),
                token.span,
            ));
        }
        Ok(token.value)
    }

    /// Parse one method: a selector followed by its body block.
    pub(crate) fn parse_method(&mut self) -> Result<Method> {
        let selector = self.parse_selector()?;
        let body = self.parse_block()?;
        Ok(Method { selector, body })
    }

    /// Parse a declaration selector: a lowercase identifier, optionally
    /// continued by `":" [IDENT]` pieces. Every colon must start exactly
    /// where the preceding identifier ended, and every continuation
    /// identifier exactly where its colon ended.
    pub(crate) fn parse_selector(&mut self) -> Result<String> {
        let first = self.expect(TokenKind::Ident)?;
        if !first.value.starts_with(|c: char| c.is_ascii_lowercase()) {
            return Err(Diagnostic::syntactic(
                format!("invalid selector identifier '{}'", first.value),
                first.span,
            ));
        }

        let first_span = first.span;
        let mut selector = first.value;

        while self.peek_kind() == Some(TokenKind::Colon) {
            let colon_span = self.peek().map(|t| t.span).unwrap_or_default();
            if colon_span.start != self.last_end() {
                return Err(Diagnostic::syntactic(
                    "whitespace between identifier and ':' in selector",
                    colon_span,
                ));
            }
            self.advance()?;
            selector.push(':');

            if self.peek_kind() == Some(TokenKind::Ident) {
                let part_span = self.peek().map(|t| t.span).unwrap_or_default();
                if part_span.start != self.last_end() {
                    return Err(Diagnostic::syntactic(
                        "whitespace between ':' and identifier in selector",
                        part_span,
                    ));
                }
                let part = self.advance()?;
                selector.push_str(&part.value);
            }
        }

        if !selector.contains(':') && is_reserved(&selector) {
            return Err(Diagnostic::syntactic(
                format!("reserved identifier '{selector}' used as selector"),
                first_span,
            ));
        }

        Ok(selector)
    }
}
