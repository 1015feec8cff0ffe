//! Process exit codes.
//!
//! The driver maps every outcome of a `sol25c` run to one of these codes.
//! The values are part of the external contract and must not change.

/// Successful run; the XML document was written to standard output.
pub const OK: i32 = 0;

/// Missing or invalid command-line parameters.
pub const MISSING_PARAM: i32 = 10;

/// Standard input could not be read.
pub const OPEN_INPUT: i32 = 11;

/// Standard output could not be written.
pub const OPEN_OUTPUT: i32 = 12;

/// Lexical error in the source text.
pub const LEXICAL: i32 = 21;

/// Syntactic error in the source text.
pub const SYNTACTIC: i32 = 22;

/// The `Main` class or its `run` method is missing.
pub const MISSING_MAIN: i32 = 31;

/// Use of an undefined variable, class, method, or attribute.
pub const UNDEFINED: i32 = 32;

/// Message or method arity mismatch.
pub const ARITY: i32 = 33;

/// Assignment target collides with a formal parameter.
pub const VAR_COLLISION: i32 = 34;

/// Other semantic error (duplicates, inheritance cycles).
pub const SEMANTIC_OTHER: i32 = 35;

/// Internal invariant violation; a bug, not a user error.
pub const INTERNAL: i32 = 99;
