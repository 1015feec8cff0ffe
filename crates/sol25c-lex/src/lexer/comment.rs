//! Comment scanning.
//!
//! SOL25 comments are double-quoted and non-nested. A backslash escapes the
//! following character, so `\"` does not terminate the comment. The token
//! value keeps the raw text including the quotes: the parser strips them
//! when it promotes the first comment to the program description.

use sol25c_util::Result;

use crate::token::{Token, TokenKind};
use crate::Lexer;

impl<'a> Lexer<'a> {
    /// Lexes a comment, cursor on the opening `"`.
    pub(crate) fn lex_comment(&mut self) -> Result<Token> {
        self.cursor.advance();

        loop {
            if self.cursor.is_at_end() {
                return Err(self.error_at_token_start("unterminated comment".to_string()));
            }

            match self.cursor.current_char() {
                '"' => {
                    self.cursor.advance();
                    break;
                },
                '\\' => {
                    self.cursor.advance();
                    if self.cursor.is_at_end() {
                        return Err(
                            self.error_at_token_start("unterminated comment".to_string())
                        );
                    }
                    self.cursor.advance();
                },
                _ => self.cursor.advance(),
            }
        }

        Ok(self.make_token(TokenKind::Comment))
    }
}
