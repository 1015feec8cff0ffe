//! Core lexer implementation.
//!
//! This module contains the main `Lexer` struct and its dispatch loop.

use sol25c_util::{Diagnostic, Result, Span};

use crate::cursor::Cursor;
use crate::token::{Token, TokenKind};

/// Lexer for SOL25 source text.
///
/// Produces tokens on demand. At each position the recognizers are tried in
/// a fixed order: whitespace (skipped), comment, `:=`, signed integer,
/// string literal, identifier, single-character punctuation. Anything else
/// is a lexical error at the offending byte.
pub struct Lexer<'a> {
    /// Character cursor for source traversal.
    pub(crate) cursor: Cursor<'a>,

    /// Starting byte offset of the current token.
    pub(crate) token_start: usize,
}

impl<'a> Lexer<'a> {
    /// Creates a new lexer for the given source code.
    pub fn new(source: &'a str) -> Self {
        Self {
            cursor: Cursor::new(source),
            token_start: 0,
        }
    }

    /// Returns the next token, `Ok(None)` at end of input, or the first
    /// lexical error.
    pub fn next_token(&mut self) -> Result<Option<Token>> {
        self.cursor.skip_whitespace();

        self.token_start = self.cursor.position();

        if self.cursor.is_at_end() {
            return Ok(None);
        }

        let token = match self.cursor.current_char() {
            '"' => self.lex_comment()?,
            '\'' => self.lex_string()?,
            ':' => {
                self.cursor.advance();
                if self.cursor.match_char('=') {
                    self.make_token(TokenKind::Assign)
                } else {
                    self.make_token(TokenKind::Colon)
                }
            },
            '.' => {
                self.cursor.advance();
                self.make_token(TokenKind::Dot)
            },
            '|' => {
                self.cursor.advance();
                self.make_token(TokenKind::Pipe)
            },
            '[' => {
                self.cursor.advance();
                self.make_token(TokenKind::LBracket)
            },
            ']' => {
                self.cursor.advance();
                self.make_token(TokenKind::RBracket)
            },
            '{' => {
                self.cursor.advance();
                self.make_token(TokenKind::LBrace)
            },
            '}' => {
                self.cursor.advance();
                self.make_token(TokenKind::RBrace)
            },
            '(' => {
                self.cursor.advance();
                self.make_token(TokenKind::LParen)
            },
            ')' => {
                self.cursor.advance();
                self.make_token(TokenKind::RParen)
            },
            '+' | '-' => self.lex_number()?,
            c if c.is_ascii_digit() => self.lex_number()?,
            c if c.is_ascii_alphabetic() || c == '_' => self.lex_identifier(),
            c => {
                return Err(self.error_at_token_start(format!("unexpected character {c:?}")));
            },
        };

        Ok(Some(token))
    }

    /// Builds a token covering `token_start..position` with the raw lexeme
    /// as its value.
    pub(crate) fn make_token(&self, kind: TokenKind) -> Token {
        Token::new(
            kind,
            self.cursor.slice_from(self.token_start),
            self.current_span(),
        )
    }

    /// Span from the current token start to the cursor position.
    pub(crate) fn current_span(&self) -> Span {
        Span::new(self.token_start, self.cursor.position())
    }

    /// Lexical error anchored at the start of the current token.
    pub(crate) fn error_at_token_start(&self, message: String) -> Diagnostic {
        Diagnostic::lexical(
            message,
            Span::new(self.token_start, self.cursor.position().max(self.token_start + 1)),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        crate::tokenize(source)
            .unwrap()
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    #[test]
    fn test_punctuation() {
        assert_eq!(
            kinds("[]{}()|.:"),
            vec![
                TokenKind::LBracket,
                TokenKind::RBracket,
                TokenKind::LBrace,
                TokenKind::RBrace,
                TokenKind::LParen,
                TokenKind::RParen,
                TokenKind::Pipe,
                TokenKind::Dot,
                TokenKind::Colon,
            ]
        );
    }

    #[test]
    fn test_assign_vs_colon() {
        assert_eq!(kinds(":="), vec![TokenKind::Assign]);
        // a lone "=" is not a token
        let err = crate::tokenize(": =").unwrap_err();
        assert_eq!(err.span.unwrap().start, 2);
    }

    #[test]
    fn test_colon_colon() {
        assert_eq!(kinds("::"), vec![TokenKind::Colon, TokenKind::Colon]);
        assert_eq!(kinds("::="), vec![TokenKind::Colon, TokenKind::Assign]);
    }

    #[test]
    fn test_spans_cover_lexemes() {
        let tokens = crate::tokenize("x := 42.").unwrap();
        assert_eq!(tokens[0].span, Span::new(0, 1));
        assert_eq!(tokens[1].span, Span::new(2, 4));
        assert_eq!(tokens[2].span, Span::new(5, 7));
        assert_eq!(tokens[3].span, Span::new(7, 8));
    }

    #[test]
    fn test_unknown_character() {
        let err = crate::tokenize("x @ y").unwrap_err();
        assert_eq!(err.span.unwrap().start, 2);
        assert!(err.message.contains('@'));
    }

    #[test]
    fn test_non_ascii_outside_literals() {
        assert!(crate::tokenize("héllo").is_err());
    }
}
