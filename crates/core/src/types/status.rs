//! Order status as reported by the backend.

use serde::{Deserialize, Deserializer, Serialize};

/// Lifecycle status of a backend order projection.
///
/// The backend owns the status vocabulary; values this tier does not know
/// about deserialize to [`OrderStatus::Unknown`] rather than failing the
/// whole projection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Default)]
pub enum OrderStatus {
    /// Gateway order created, payment not yet confirmed.
    #[default]
    Created,
    /// Payment confirmed.
    Paid,
    /// Being prepared for shipment.
    Processing,
    /// Handed to the carrier.
    Shipped,
    /// A status this tier does not recognize.
    Unknown,
}

impl OrderStatus {
    /// The backend's string form of this status.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Created => "Created",
            Self::Paid => "Paid",
            Self::Processing => "Processing",
            Self::Shipped => "Shipped",
            Self::Unknown => "Unknown",
        }
    }
}

impl<'de> Deserialize<'de> for OrderStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(match s.as_str() {
            "Created" => Self::Created,
            "Paid" => Self::Paid,
            "Processing" => Self::Processing,
            "Shipped" => Self::Shipped,
            _ => Self::Unknown,
        })
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_statuses_round_trip() {
        let status: OrderStatus = serde_json::from_str("\"Shipped\"").unwrap();
        assert_eq!(status, OrderStatus::Shipped);
        assert_eq!(serde_json::to_string(&status).unwrap(), "\"Shipped\"");
    }

    #[test]
    fn unknown_statuses_do_not_fail_deserialization() {
        let status: OrderStatus = serde_json::from_str("\"Archived\"").unwrap();
        assert_eq!(status, OrderStatus::Unknown);
    }
}
