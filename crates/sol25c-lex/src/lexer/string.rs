//! String literal scanning and escape decoding.
//!
//! Scanning and decoding are two steps. The scanner finds the closing quote,
//! treating `\` plus any character as opaque so an escaped quote does not
//! end the literal. The decoder then resolves escape sequences: exactly
//! `\'`, `\n`, and `\\` are valid. A raw character with code point <= 31
//! inside the literal (an actual newline, tab, and so on) is rejected; the
//! escaped forms are the only way to spell those.

use sol25c_util::{Diagnostic, Result, Span};

use crate::token::{Token, TokenKind};
use crate::Lexer;

impl<'a> Lexer<'a> {
    /// Lexes a string literal, cursor on the opening `'`. The returned
    /// token carries the decoded value; its span covers the raw literal.
    pub(crate) fn lex_string(&mut self) -> Result<Token> {
        self.cursor.advance();
        let content_start = self.cursor.position();

        loop {
            if self.cursor.is_at_end() {
                return Err(self.error_at_token_start("unterminated string literal".to_string()));
            }

            match self.cursor.current_char() {
                '\'' => break,
                '\\' => {
                    self.cursor.advance();
                    if self.cursor.is_at_end() {
                        return Err(self
                            .error_at_token_start("unterminated string literal".to_string()));
                    }
                    self.cursor.advance();
                },
                _ => self.cursor.advance(),
            }
        }

        let raw = self.cursor.slice_from(content_start);
        self.cursor.advance();

        let value = decode_string(raw, self.current_span())?;
        Ok(Token::new(TokenKind::Str, value, self.current_span()))
    }
}

/// Decodes the content of a string literal (without the quotes).
///
/// `span` locates the whole literal and is attached to any diagnostic.
pub(crate) fn decode_string(raw: &str, span: Span) -> Result<String> {
    let mut result = String::with_capacity(raw.len());
    let mut chars = raw.chars();

    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.next() {
                Some('\'') => result.push('\''),
                Some('n') => result.push('\n'),
                Some('\\') => result.push('\\'),
                Some(other) => {
                    return Err(Diagnostic::lexical(
                        format!("invalid escape sequence '\\{other}' in string literal"),
                        span,
                    ));
                },
                None => {
                    return Err(Diagnostic::lexical(
                        "string literal ends with a lone '\\'".to_string(),
                        span,
                    ));
                },
            }
        } else {
            if (c as u32) <= 31 {
                return Err(Diagnostic::lexical(
                    format!("control character (code {}) in string literal", c as u32),
                    span,
                ));
            }
            result.push(c);
        }
    }

    Ok(result)
}
