//! Identifier scanning.
//!
//! Identifiers are ASCII: a letter or underscore followed by letters,
//! digits, and underscores. Keywords and reserved words (`class`, `self`,
//! `true`, ...) are not distinguished here; the parser decides what an
//! identifier means from its position and spelling.

use crate::token::{Token, TokenKind};
use crate::Lexer;

impl<'a> Lexer<'a> {
    /// Lexes an identifier, cursor on its first character.
    pub(crate) fn lex_identifier(&mut self) -> Token {
        while {
            let c = self.cursor.current_char();
            c.is_ascii_alphanumeric() || c == '_'
        } {
            self.cursor.advance();
        }

        self.make_token(TokenKind::Ident)
    }
}
