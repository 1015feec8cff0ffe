//! sol25c-sem - Semantic analysis for SOL25.
//!
//! The analyzer validates a parsed program without changing it: class and
//! selector uniqueness, presence of `Main` with a parameterless `run`,
//! parent resolution against user-defined and built-in classes,
//! inheritance cycles, variable initialization, message arity against known
//! signatures, and the use of dynamically created per-instance attributes.
//!
//! Dynamic attributes take two traversals: a harvest pass first registers
//! every `self attr: v` setter in the program, then the checking pass
//! validates each use. A single pass would reject a getter that textually
//! precedes its setter.

pub mod builtins;

mod analysis;
mod scope;

pub use analysis::{analyze, SemanticAnalyzer};
