use crate::shape::PrimitiveKind;

/// Recoverable failures of a guess run.
///
/// Broken internal invariants (a dangling store hash, a missing root
/// definition) are not represented here; those panic.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("input nests deeper than the configured limit of {limit} levels")]
    DepthLimitExceeded { limit: usize },

    #[error("root value must be an array or an object, found {0}")]
    PrimitiveRoot(PrimitiveKind),

    #[error("no samples were observed")]
    NoSamples,

    #[error("samples do not unify into a single root type ({found} alternatives)")]
    IncompatibleSamples { found: usize },

    #[error("invalid options: {0}")]
    Config(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
