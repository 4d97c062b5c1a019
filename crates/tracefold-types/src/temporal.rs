use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

/// Wall-clock audit timestamp.
///
/// Milliseconds since the UNIX epoch. Used only to order and date edit
/// events for audit; no business logic may depend on it.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventTime {
    millis: u64,
}

impl EventTime {
    /// The current wall-clock time.
    pub fn now() -> Self {
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as u64;
        Self { millis }
    }

    /// Construct from explicit milliseconds, for deterministic tests and
    /// adapters importing timestamps recorded elsewhere.
    pub const fn from_millis(millis: u64) -> Self {
        Self { millis }
    }

    /// Milliseconds since the UNIX epoch.
    pub const fn millis(&self) -> u64 {
        self.millis
    }
}

impl fmt::Debug for EventTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EventTime({}ms)", self.millis)
    }
}

impl fmt::Display for EventTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.millis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn now_produces_reasonable_timestamp() {
        let t = EventTime::now();
        // Should be after 2020-01-01 (1577836800000 ms)
        assert!(t.millis() > 1_577_836_800_000);
    }

    #[test]
    fn ordering_follows_millis() {
        let a = EventTime::from_millis(100);
        let b = EventTime::from_millis(200);
        assert!(a < b);
    }

    #[test]
    fn serde_roundtrip() {
        let t = EventTime::from_millis(1234567890);
        let json = serde_json::to_string(&t).unwrap();
        assert_eq!(json, "1234567890");
        let parsed: EventTime = serde_json::from_str(&json).unwrap();
        assert_eq!(t, parsed);
    }
}
