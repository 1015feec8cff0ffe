//! sol25c-lex - Lexical analyzer for SOL25.
//!
//! The scanner turns raw source text into a stream of [`Token`] values, each
//! carrying its textual value and a byte-offset span. Whitespace is skipped;
//! comments are emitted as tokens because the parser later extracts the
//! first one as the program description. The first lexical error aborts
//! scanning.

pub mod cursor;
mod lexer;
mod token;

pub use cursor::Cursor;
pub use lexer::Lexer;
pub use token::{Token, TokenKind};

use sol25c_util::Result;

/// Scan `source` into a complete token sequence.
///
/// Convenience wrapper over [`Lexer::next_token`] used by the driver; stops
/// at the first lexical error.
pub fn tokenize(source: &str) -> Result<Vec<Token>> {
    let mut lexer = Lexer::new(source);
    let mut tokens = Vec::new();
    while let Some(token) = lexer.next_token()? {
        tokens.push(token);
    }
    Ok(tokens)
}
