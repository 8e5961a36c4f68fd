//! Route registration errors.

use thiserror::Error;

/// Errors raised while registering a pattern.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InsertError {
    /// A `*name` segment appeared before the end of the pattern.
    #[error("wildcard must be the last segment in pattern '{0}'")]
    WildcardNotLast(String),

    /// A `{}` segment had no parameter name.
    #[error("empty parameter name in pattern '{0}'")]
    EmptyParam(String),

    /// A parameter at this position was already registered under a
    /// different name.
    #[error("pattern '{pattern}' conflicts with existing segment '{existing}'")]
    ConflictingParam {
        /// Pattern being inserted
        pattern: String,
        /// Segment already present at the conflicting position
        existing: String,
    },
}
