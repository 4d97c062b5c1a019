use thiserror::Error;

/// Errors produced by fold operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FoldError {
    /// Two records in a group disagree on a field that upstream cleaning
    /// guarantees identical. This is a data-integrity bug, not a merge
    /// case; the fold aborts.
    #[error(
        "key '{key}' should be the same in both records but is different \
         (has values '{left}' and '{right}' respectively)"
    )]
    EqualFieldMismatch {
        key: String,
        left: String,
        right: String,
    },

    /// Grouping never produces an empty group; seeing one means an
    /// internal invariant was violated.
    #[error("internal invariant violated: fold encountered an empty group")]
    EmptyGroup,
}
