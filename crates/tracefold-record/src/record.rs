use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracefold_types::{Audit, FieldValue, OriginId};

use crate::event::EditEvent;

/// Append-only, fully-audited key-value document.
///
/// A record's state is the fold of its history: the current value of a key
/// is the value in the last [`EditEvent`] that wrote it, and a key never
/// written is absent. The `current` index caches that fold so lookups are
/// O(1); history remains the authority.
///
/// Branching is `clone()`: the copy starts with identical fields and
/// history contents and shares no mutable state with the source, so
/// subsequent appends on either side are invisible to the other.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "RecordRepr", into = "RecordRepr")]
pub struct Record {
    origin: OriginId,
    history: Vec<EditEvent>,
    current: BTreeMap<String, FieldValue>,
}

impl Record {
    /// An empty record rooted at `origin`.
    pub fn new(origin: OriginId) -> Self {
        Self {
            origin,
            history: Vec::new(),
            current: BTreeMap::new(),
        }
    }

    /// A freshly-rooted record whose history starts with one write batch.
    ///
    /// This is the importer entry point: one record per raw input row, with
    /// `audit` naming the importing process and call site.
    pub fn from_writes(writes: BTreeMap<String, FieldValue>, audit: Audit) -> Self {
        let mut record = Self::new(OriginId::new());
        record.append(writes, audit);
        record
    }

    /// The lineage-root identifier this record's history traces back to.
    pub fn origin(&self) -> OriginId {
        self.origin
    }

    /// Current value of `key`.
    ///
    /// `Some(&FieldValue::Null)` means the key was explicitly written null;
    /// `None` means it was never written.
    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.current.get(key)
    }

    /// Append one atomic batch of writes.
    ///
    /// Every key in `writes` becomes visible together. History is never
    /// mutated, pruned, or reordered by this or any other operation.
    pub fn append(&mut self, writes: BTreeMap<String, FieldValue>, audit: Audit) {
        for (key, value) in &writes {
            self.current.insert(key.clone(), value.clone());
        }
        self.history.push(EditEvent::writes(writes, audit));
    }

    /// Append a lineage-link event referencing a merge partner's origin.
    pub fn fold_link(&mut self, partner: OriginId, audit: Audit) {
        self.history.push(EditEvent::fold_link(partner, audit));
    }

    /// Keys that have ever been written, null-valued keys included.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.current.keys().map(String::as_str)
    }

    /// Returns `true` if `key` has ever been written.
    pub fn contains_key(&self, key: &str) -> bool {
        self.current.contains_key(key)
    }

    /// The full ordered edit history.
    pub fn history(&self) -> &[EditEvent] {
        &self.history
    }

    /// Every value `key` has taken, in write order, with the audit entry
    /// that wrote it.
    pub fn history_of(&self, key: &str) -> Vec<(&Audit, &FieldValue)> {
        self.history
            .iter()
            .filter_map(|event| event.writes.get(key).map(|value| (&event.audit, value)))
            .collect()
    }

    /// Origins of every record this one has been folded with, in merge
    /// order.
    pub fn lineage(&self) -> Vec<OriginId> {
        self.history
            .iter()
            .filter_map(|event| event.folded_with)
            .collect()
    }
}

/// Serialized form: origin and history only. The last-write-wins index is
/// derived state and is rebuilt on deserialization.
#[derive(Serialize, Deserialize)]
struct RecordRepr {
    origin: OriginId,
    history: Vec<EditEvent>,
}

impl From<Record> for RecordRepr {
    fn from(record: Record) -> Self {
        Self {
            origin: record.origin,
            history: record.history,
        }
    }
}

impl From<RecordRepr> for Record {
    fn from(repr: RecordRepr) -> Self {
        let mut current = BTreeMap::new();
        for event in &repr.history {
            for (key, value) in &event.writes {
                current.insert(key.clone(), value.clone());
            }
        }
        Self {
            origin: repr.origin,
            history: repr.history,
            current,
        }
    }
}
