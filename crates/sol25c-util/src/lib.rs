//! sol25c-util - Shared infrastructure for the SOL25 front-end.
//!
//! This crate holds the pieces every phase needs: byte-offset spans,
//! the diagnostic type that every phase returns on failure, and the
//! process exit codes the driver maps diagnostics to.

pub mod codes;
pub mod diagnostic;
pub mod span;

pub use diagnostic::{Diagnostic, ErrorKind};
pub use span::Span;

/// Result type used by every compiler phase.
pub type Result<T> = std::result::Result<T, Diagnostic>;
