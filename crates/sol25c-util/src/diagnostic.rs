//! Terminal diagnostics.
//!
//! Every phase of the pipeline reports failure through a single
//! [`Diagnostic`] value. There is no recovery and no aggregation: the first
//! diagnostic aborts the run, the driver prints it to standard error and
//! exits with the code of its [`ErrorKind`].

use std::fmt;

use thiserror::Error;

use crate::codes;
use crate::span::Span;

/// Classification of a failure, one variant per exit code the phases can
/// produce. Parameter and I/O failures are handled directly by the driver
/// and have no kind here.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum ErrorKind {
    /// Invalid character, escape sequence, or unterminated literal.
    #[error("lexical error")]
    Lexical,

    /// Token stream does not match the grammar, or a selector is malformed.
    #[error("syntax error")]
    Syntactic,

    /// No `Main` class with a `run` method.
    #[error("missing Main")]
    MissingMain,

    /// Undefined variable, class, method, or dynamic attribute.
    #[error("undefined symbol")]
    Undefined,

    /// Argument count does not match the receiver's parameter count.
    #[error("arity error")]
    Arity,

    /// Assignment would overwrite a formal parameter or `self`.
    #[error("parameter collision")]
    VarCollision,

    /// Duplicates, inheritance cycles, and other semantic violations.
    #[error("semantic error")]
    SemanticOther,

    /// Invariant violation inside the compiler itself.
    #[error("internal error")]
    Internal,
}

impl ErrorKind {
    /// The process exit code for this kind of failure.
    pub const fn exit_code(self) -> i32 {
        match self {
            ErrorKind::Lexical => codes::LEXICAL,
            ErrorKind::Syntactic => codes::SYNTACTIC,
            ErrorKind::MissingMain => codes::MISSING_MAIN,
            ErrorKind::Undefined => codes::UNDEFINED,
            ErrorKind::Arity => codes::ARITY,
            ErrorKind::VarCollision => codes::VAR_COLLISION,
            ErrorKind::SemanticOther => codes::SEMANTIC_OTHER,
            ErrorKind::Internal => codes::INTERNAL,
        }
    }
}

/// A fatal compiler diagnostic: what went wrong, where, and which exit code
/// the process should terminate with.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Diagnostic {
    /// Failure classification.
    pub kind: ErrorKind,
    /// Human-readable description.
    pub message: String,
    /// Source location, when one is known.
    pub span: Option<Span>,
}

impl Diagnostic {
    /// Create a diagnostic with a known source location.
    pub fn new(kind: ErrorKind, message: impl Into<String>, span: Span) -> Self {
        Self {
            kind,
            message: message.into(),
            span: Some(span),
        }
    }

    /// Create a diagnostic without a source location.
    pub fn without_span(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            span: None,
        }
    }

    /// Lexical error at `span`.
    pub fn lexical(message: impl Into<String>, span: Span) -> Self {
        Self::new(ErrorKind::Lexical, message, span)
    }

    /// Syntax error at `span`.
    pub fn syntactic(message: impl Into<String>, span: Span) -> Self {
        Self::new(ErrorKind::Syntactic, message, span)
    }

    /// Syntax error with no usable location (e.g. unexpected end of input).
    pub fn syntactic_eof(message: impl Into<String>) -> Self {
        Self::without_span(ErrorKind::Syntactic, message)
    }

    /// Missing `Main` class or `run` method.
    pub fn missing_main(message: impl Into<String>) -> Self {
        Self::without_span(ErrorKind::MissingMain, message)
    }

    /// Undefined variable, class, method, or attribute.
    pub fn undefined(message: impl Into<String>) -> Self {
        Self::without_span(ErrorKind::Undefined, message)
    }

    /// Arity mismatch.
    pub fn arity(message: impl Into<String>) -> Self {
        Self::without_span(ErrorKind::Arity, message)
    }

    /// Assignment collides with a formal parameter.
    pub fn var_collision(message: impl Into<String>) -> Self {
        Self::without_span(ErrorKind::VarCollision, message)
    }

    /// Other semantic error.
    pub fn semantic_other(message: impl Into<String>) -> Self {
        Self::without_span(ErrorKind::SemanticOther, message)
    }

    /// Internal invariant violation.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::without_span(ErrorKind::Internal, message)
    }

    /// The process exit code this diagnostic maps to.
    pub fn exit_code(&self) -> i32 {
        self.kind.exit_code()
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.span {
            Some(span) => write!(f, "{}: {} (at {})", self.kind, self.message, span),
            None => write!(f, "{}: {}", self.kind, self.message),
        }
    }
}

impl std::error::Error for Diagnostic {}
