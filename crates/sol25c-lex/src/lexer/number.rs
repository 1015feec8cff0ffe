//! Integer literal scanning.
//!
//! SOL25 integers are decimal with an optional leading sign. The sign is
//! only a number prefix: a `+` or `-` not followed by a digit is a lexical
//! error at the sign's position. The token value keeps the raw text, sign
//! included; the XML emitter writes it through unchanged.

use sol25c_util::Result;

use crate::token::{Token, TokenKind};
use crate::Lexer;

impl<'a> Lexer<'a> {
    /// Lexes an integer literal, cursor on the sign or the first digit.
    pub(crate) fn lex_number(&mut self) -> Result<Token> {
        let c = self.cursor.current_char();
        if c == '+' || c == '-' {
            self.cursor.advance();
            if !self.cursor.current_char().is_ascii_digit() {
                return Err(self.error_at_token_start(format!("unexpected character {c:?}")));
            }
        }

        while self.cursor.current_char().is_ascii_digit() {
            self.cursor.advance();
        }

        Ok(self.make_token(TokenKind::Number))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sol25c_util::Span;

    fn lex_one(source: &str) -> Token {
        let mut lexer = Lexer::new(source);
        lexer.next_token().unwrap().unwrap()
    }

    #[test]
    fn test_plain_number() {
        let token = lex_one("42");
        assert_eq!(token.kind, TokenKind::Number);
        assert_eq!(token.value, "42");
        assert_eq!(token.span, Span::new(0, 2));
    }

    #[test]
    fn test_signed_numbers() {
        assert_eq!(lex_one("+7").value, "+7");
        assert_eq!(lex_one("-123").value, "-123");
    }

    #[test]
    fn test_number_stops_at_dot() {
        let tokens = crate::tokenize("1.").unwrap();
        assert_eq!(tokens[0].value, "1");
        assert_eq!(tokens[1].kind, TokenKind::Dot);
    }

    #[test]
    fn test_adjacent_signed_number() {
        // "1+2" is two literals: "1" and "+2"
        let tokens = crate::tokenize("1+2").unwrap();
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[0].value, "1");
        assert_eq!(tokens[1].value, "+2");
    }

    #[test]
    fn test_bare_sign_is_error() {
        let err = crate::tokenize("x - y").unwrap_err();
        assert_eq!(err.kind, sol25c_util::ErrorKind::Lexical);
        assert_eq!(err.span.unwrap().start, 2);
    }
}
