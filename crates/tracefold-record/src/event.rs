use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracefold_types::{Audit, FieldValue, OriginId};

/// One atomic batch of field writes in a record's history.
///
/// All keys in `writes` become visible together; there is no partial
/// application. A write may set a key to [`FieldValue::Null`], which is a
/// real value, not a deletion — records never delete.
///
/// `folded_with` is set only on lineage-link events: when two records are
/// merged, the surviving record gains an event referencing the partner's
/// origin. Such events carry no writes of their own.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EditEvent {
    pub audit: Audit,
    pub writes: BTreeMap<String, FieldValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub folded_with: Option<OriginId>,
}

impl EditEvent {
    /// An ordinary write batch.
    pub fn writes(writes: BTreeMap<String, FieldValue>, audit: Audit) -> Self {
        Self {
            audit,
            writes,
            folded_with: None,
        }
    }

    /// A lineage-link event referencing a merge partner's origin.
    pub fn fold_link(partner: OriginId, audit: Audit) -> Self {
        Self {
            audit,
            writes: BTreeMap::new(),
            folded_with: Some(partner),
        }
    }

    /// Returns `true` if this event records a merge link rather than writes.
    pub fn is_fold_link(&self) -> bool {
        self.folded_with.is_some()
    }
}
