use std::collections::{BTreeMap, BTreeSet};
use std::hash::Hash;

use tracefold_record::Record;
use tracefold_types::{Audit, FieldValue, OriginId};
use tracing::{debug, warn};

use crate::error::FoldError;
use crate::group::group_by;
use crate::policy::FoldPolicy;

/// Marker written to every field the policy does not reconcile.
///
/// After a fold, such a field's per-record value is recoverable only from
/// history, never from the live field — the marker makes that explicit
/// instead of leaving a stale value in place.
pub const MERGED_MARKER: &str = "MERGED";

/// A matrix field neither side of a merge could resolve.
///
/// Non-fatal: the field is written with the policy's unresolved value, but
/// the condition is surfaced here (and logged) so downstream consumers can
/// distinguish "needs attention" from an ordinary null.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnresolvedMatrix {
    pub key: String,
    pub left: OriginId,
    pub right: OriginId,
}

/// Result of a fold run: one record per group, plus diagnostics.
#[derive(Clone, Debug, PartialEq)]
pub struct FoldReport {
    pub records: Vec<Record>,
    pub unresolved: Vec<UnresolvedMatrix>,
}

impl FoldReport {
    /// Returns `true` if every matrix field was resolvable.
    pub fn is_fully_resolved(&self) -> bool {
        self.unresolved.is_empty()
    }
}

/// Policy-driven merge of duplicate provenance records.
///
/// Synchronous and single-threaded: groups are independent, but the fold
/// within a group is left-associative and order-significant, so it must
/// run sequentially.
pub struct FoldEngine;

impl FoldEngine {
    /// Group `records` by `key_fn` and collapse each group to one record.
    ///
    /// Output order is group order (first occurrence of each key in the
    /// input). Singleton groups pass through unmerged and unaudited.
    /// Aborts on the first equal-field mismatch; the input is untouched up
    /// to the offending group.
    pub fn fold<K, F>(
        records: Vec<Record>,
        key_fn: F,
        policy: &FoldPolicy,
        actor: &str,
    ) -> Result<FoldReport, FoldError>
    where
        K: Eq + Hash + Clone,
        F: Fn(&Record) -> K,
    {
        let groups = group_by(records, key_fn);
        let mut folded = Vec::with_capacity(groups.len());
        let mut unresolved = Vec::new();

        for (_, members) in groups {
            let group_size = members.len();
            let merged = Self::fold_group(actor, members, policy, &mut unresolved)?;
            debug!(group_size, "folded group");
            folded.push(merged);
        }

        Ok(FoldReport {
            records: folded,
            unresolved,
        })
    }

    /// Left-fold one group: `fold_pair(r1, r2)`, then `fold_pair(result,
    /// r3)`, and so on, so the merged record's lineage traces through
    /// every member in input order.
    pub fn fold_group(
        actor: &str,
        members: Vec<Record>,
        policy: &FoldPolicy,
        unresolved: &mut Vec<UnresolvedMatrix>,
    ) -> Result<Record, FoldError> {
        let mut iter = members.into_iter();
        let mut acc = iter.next().ok_or(FoldError::EmptyGroup)?;

        for mut next in iter {
            acc = Self::fold_pair(actor, &mut acc, &mut next, policy, unresolved)?;
        }

        Ok(acc)
    }

    /// Merge two records under the policy.
    ///
    /// Reconciled values (concat, matrix) and `"MERGED"` markers are
    /// appended to *both* parents as audited events before the merge, so
    /// each parent's history records the reconciliation it took part in.
    /// The returned record is a branch of `a` carrying one extra
    /// lineage-link event to `b`'s origin; `b` is left for the caller to
    /// inspect or discard.
    pub fn fold_pair(
        actor: &str,
        a: &mut Record,
        b: &mut Record,
        policy: &FoldPolicy,
        unresolved: &mut Vec<UnresolvedMatrix>,
    ) -> Result<Record, FoldError> {
        assert_equal_fields(a, b, &policy.equal_fields)?;

        let concat = concat_writes(a, b, policy);
        if !concat.is_empty() {
            a.append(concat.clone(), Audit::new(actor, stage_location("concat")));
            b.append(concat, Audit::new(actor, stage_location("concat")));
        }

        let matrix = matrix_writes(a, b, policy, unresolved);
        if !matrix.is_empty() {
            a.append(matrix.clone(), Audit::new(actor, stage_location("matrix")));
            b.append(matrix, Audit::new(actor, stage_location("matrix")));
        }

        let markers = merged_markers(a, b, policy);
        if !markers.is_empty() {
            a.append(
                markers.clone(),
                Audit::new(actor, stage_location("merged_markers")),
            );
            b.append(markers, Audit::new(actor, stage_location("merged_markers")));
        }

        let mut merged = a.clone();
        merged.fold_link(b.origin(), Audit::new(actor, stage_location("fold_link")));
        Ok(merged)
    }
}

fn stage_location(stage: &str) -> String {
    format!("{}::fold_pair::{stage}", module_path!())
}

fn display_or_absent(value: Option<&FieldValue>) -> String {
    value.map_or_else(|| "<absent>".to_string(), ToString::to_string)
}

fn assert_equal_fields(
    a: &Record,
    b: &Record,
    equal_fields: &BTreeSet<String>,
) -> Result<(), FoldError> {
    for key in equal_fields {
        let left = a.get(key);
        let right = b.get(key);
        if left != right {
            return Err(FoldError::EqualFieldMismatch {
                key: key.clone(),
                left: display_or_absent(left),
                right: display_or_absent(right),
            });
        }
    }
    Ok(())
}

fn concat_writes(a: &Record, b: &Record, policy: &FoldPolicy) -> BTreeMap<String, FieldValue> {
    let mut writes = BTreeMap::new();
    for key in &policy.concat_fields {
        if let (Some(left), Some(right)) = (a.get(key), b.get(key)) {
            let joined = format!("{left}{}{right}", policy.concat_delimiter);
            writes.insert(key.clone(), FieldValue::from(joined));
        }
    }
    writes
}

/// Matrix fields model independent boolean flags as `"0"`/`"1"` strings.
fn in_matrix_domain(value: &FieldValue) -> bool {
    matches!(value.as_str(), Some("0") | Some("1"))
}

fn is_set(value: &FieldValue) -> bool {
    value.as_str() == Some("1")
}

fn matrix_writes(
    a: &Record,
    b: &Record,
    policy: &FoldPolicy,
    unresolved: &mut Vec<UnresolvedMatrix>,
) -> BTreeMap<String, FieldValue> {
    let mut writes = BTreeMap::new();
    for key in &policy.matrix_fields {
        let left = a.get(key).filter(|v| in_matrix_domain(v));
        let right = b.get(key).filter(|v| in_matrix_domain(v));

        let resolved = match (left, right) {
            (Some(l), Some(r)) => {
                if is_set(l) || is_set(r) {
                    FieldValue::from("1")
                } else {
                    FieldValue::from("0")
                }
            }
            (Some(l), None) => l.clone(),
            (None, Some(r)) => r.clone(),
            (None, None) => {
                warn!(
                    key = %key,
                    left = %display_or_absent(a.get(key)),
                    right = %display_or_absent(b.get(key)),
                    "matrix field unresolvable on both sides"
                );
                unresolved.push(UnresolvedMatrix {
                    key: key.clone(),
                    left: a.origin(),
                    right: b.origin(),
                });
                policy.matrix_unresolved.clone()
            }
        };

        writes.insert(key.clone(), resolved);
    }
    writes
}

fn merged_markers(a: &Record, b: &Record, policy: &FoldPolicy) -> BTreeMap<String, FieldValue> {
    let mut writes = BTreeMap::new();
    for key in a.keys().chain(b.keys()) {
        if !policy.reconciles(key) {
            writes
                .entry(key.to_string())
                .or_insert_with(|| FieldValue::from(MERGED_MARKER));
        }
    }
    writes
}
