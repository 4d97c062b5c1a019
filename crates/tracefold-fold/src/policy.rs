use std::collections::BTreeSet;

use tracefold_types::FieldValue;

/// Declarative per-field reconciliation policy for a fold.
///
/// Every field of the records being folded falls into exactly one
/// category:
///
/// - **equal fields** must already agree on both sides (normalized
///   upstream); disagreement aborts the fold,
/// - **concat fields** present on both sides are joined with
///   `concat_delimiter`,
/// - **matrix fields** are independent `"0"`/`"1"` flags OR-ed together,
/// - everything else is marked `"MERGED"`, recoverable only from history.
///
/// `matrix_unresolved` is the value written when neither side of a matrix
/// field is codable. The default is a written null, which downstream
/// consumers should treat as "needs attention" rather than "no opinion";
/// projects preferring a sentinel such as `"NOT_CODED"` can set it here.
#[derive(Clone, Debug, PartialEq)]
pub struct FoldPolicy {
    pub equal_fields: BTreeSet<String>,
    pub concat_fields: BTreeSet<String>,
    pub matrix_fields: BTreeSet<String>,
    pub concat_delimiter: String,
    pub matrix_unresolved: FieldValue,
}

impl FoldPolicy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_equal_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.equal_fields = fields.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_concat_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.concat_fields = fields.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_matrix_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.matrix_fields = fields.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_concat_delimiter(mut self, delimiter: impl Into<String>) -> Self {
        self.concat_delimiter = delimiter.into();
        self
    }

    pub fn with_matrix_unresolved(mut self, value: FieldValue) -> Self {
        self.matrix_unresolved = value;
        self
    }

    /// Returns `true` if `key` is reconciled by one of the three explicit
    /// strategies (as opposed to falling through to the `"MERGED"` marker).
    pub fn reconciles(&self, key: &str) -> bool {
        self.equal_fields.contains(key)
            || self.concat_fields.contains(key)
            || self.matrix_fields.contains(key)
    }
}

impl Default for FoldPolicy {
    fn default() -> Self {
        Self {
            equal_fields: BTreeSet::new(),
            concat_fields: BTreeSet::new(),
            matrix_fields: BTreeSet::new(),
            concat_delimiter: ";".to_string(),
            matrix_unresolved: FieldValue::Null,
        }
    }
}
