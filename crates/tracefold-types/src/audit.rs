use serde::{Deserialize, Serialize};

use crate::temporal::EventTime;

/// Audit metadata attached to every edit event.
///
/// `actor` names the agent (user or process) performing the write;
/// `location` names the code path responsible, e.g.
/// `"apply_manual_codes"`. Both are opaque labels — they exist for the
/// audit trail, never for logic.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Audit {
    pub actor: String,
    pub location: String,
    pub timestamp: EventTime,
}

impl Audit {
    /// Stamp an audit entry with the current wall-clock time.
    pub fn new(actor: impl Into<String>, location: impl Into<String>) -> Self {
        Self {
            actor: actor.into(),
            location: location.into(),
            timestamp: EventTime::now(),
        }
    }

    /// Explicit-timestamp constructor, for deterministic tests and adapters
    /// replaying externally recorded edits.
    pub fn at(
        actor: impl Into<String>,
        location: impl Into<String>,
        timestamp: EventTime,
    ) -> Self {
        Self {
            actor: actor.into(),
            location: location.into(),
            timestamp,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_stamps_current_time() {
        let audit = Audit::new("test_user", "audit::tests");
        assert_eq!(audit.actor, "test_user");
        assert_eq!(audit.location, "audit::tests");
        assert!(audit.timestamp.millis() > 0);
    }

    #[test]
    fn at_preserves_explicit_timestamp() {
        let audit = Audit::at("importer", "csv_import", EventTime::from_millis(42));
        assert_eq!(audit.timestamp, EventTime::from_millis(42));
    }

    #[test]
    fn serde_roundtrip() {
        let audit = Audit::at("u", "loc", EventTime::from_millis(7));
        let json = serde_json::to_string(&audit).unwrap();
        let parsed: Audit = serde_json::from_str(&json).unwrap();
        assert_eq!(audit, parsed);
    }
}
