use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::TypeError;

/// Lineage-root identifier for a record.
///
/// Every record is stamped with an `OriginId` at creation. Merged records
/// reference their partner's origin in a lineage-link event, so a folded
/// record can always be traced back to the raw inputs it was built from.
///
/// UUID v7, so origins created by the same process sort roughly by
/// creation time.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OriginId(Uuid);

impl OriginId {
    /// Mint a fresh origin.
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// Parse from a hyphenated UUID string.
    pub fn parse(s: &str) -> Result<Self, TypeError> {
        let s = s.strip_prefix("or:").unwrap_or(s);
        Uuid::parse_str(s)
            .map(Self)
            .map_err(|e| TypeError::InvalidOrigin(e.to_string()))
    }

    /// Full hyphenated form.
    pub fn to_hyphenated(&self) -> String {
        self.0.to_string()
    }

    /// Short identifier (first 8 hex characters).
    pub fn short_id(&self) -> String {
        format!("or:{}", &self.0.simple().to_string()[..8])
    }
}

impl Default for OriginId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for OriginId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "OriginId({})", self.short_id())
    }
}

impl fmt::Display for OriginId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.short_id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_origins_are_unique() {
        assert_ne!(OriginId::new(), OriginId::new());
    }

    #[test]
    fn short_id_format() {
        let id = OriginId::new();
        let short = id.short_id();
        assert!(short.starts_with("or:"));
        assert_eq!(short.len(), 11); // "or:" + 8 hex chars
    }

    #[test]
    fn parse_roundtrip() {
        let id = OriginId::new();
        let parsed = OriginId::parse(&id.to_hyphenated()).unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!(OriginId::parse("not-a-uuid").is_err());
    }

    #[test]
    fn serde_roundtrip() {
        let id = OriginId::new();
        let json = serde_json::to_string(&id).unwrap();
        let parsed: OriginId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, parsed);
    }
}
