//! Order identifiers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A customer-facing order identifier, e.g. `#SP731842`.
///
/// Derived from the confirmation timestamp: `#SP` followed by the last six
/// digits of the epoch milliseconds. Generated once per confirmed order and
/// stored, so every render of the same receipt shows the same id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(String);

impl OrderId {
    /// Derive an order ID from a confirmation timestamp.
    #[must_use]
    pub fn from_timestamp(at: DateTime<Utc>) -> Self {
        let millis = at.timestamp_millis().unsigned_abs();
        Self(format!("#SP{:06}", millis % 1_000_000))
    }

    /// Returns the order ID as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for OrderId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_last_six_digits_of_millis() {
        let at = Utc.timestamp_millis_opt(1_700_000_731_842).single().expect("valid");
        assert_eq!(OrderId::from_timestamp(at).as_str(), "#SP731842");
    }

    #[test]
    fn test_zero_padded() {
        let at = Utc.timestamp_millis_opt(1_700_000_000_042).single().expect("valid");
        assert_eq!(OrderId::from_timestamp(at).as_str(), "#SP000042");
    }

    #[test]
    fn test_same_timestamp_same_id() {
        let at = Utc.timestamp_millis_opt(1_700_000_123_456).single().expect("valid");
        assert_eq!(OrderId::from_timestamp(at), OrderId::from_timestamp(at));
    }
}
