//! Fold engine for TraceFold.
//!
//! Collapses a sequence of provenance records representing duplicate or
//! fragmentary observations of the same logical entity (e.g. two message
//! fragments from one respondent) into a single record per entity.
//!
//! The engine groups records by a caller-supplied key function, then
//! left-folds each group pairwise under a declarative [`FoldPolicy`]:
//! fields asserted equal, fields concatenated, boolean "matrix" flags
//! OR-ed, and everything else marked `"MERGED"` so no value is ever
//! silently dropped. Every reconciliation decision is appended to the
//! participating records as audited history, and the merged output carries
//! a lineage link to each partner it absorbed.

pub mod engine;
pub mod error;
pub mod group;
pub mod policy;

pub use engine::{FoldEngine, FoldReport, UnresolvedMatrix, MERGED_MARKER};
pub use error::FoldError;
pub use group::group_by;
pub use policy::FoldPolicy;
