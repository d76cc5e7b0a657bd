//! Order domain types for work items moving through the shop.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Error raised when a category transition is applied to the wrong half
/// of the fresh/returned pairing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum CategoryError {
    #[error("order is already in a returned category: {0}")]
    AlreadyReturned(Priority),

    #[error("order is not in a returned category: {0}")]
    NotReturned(Priority),
}

/// Priority tier of an order, which doubles as its extraction urgency.
///
/// Tiers form a fresh/returned pairing: `Standard`/`Premium` are fresh,
/// `ReturnedStandard`/`ReturnedPremium` are their rework counterparts.
/// Higher rank is extracted first.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    #[default]
    Standard = 1,
    Premium = 2,
    ReturnedStandard = 3,
    ReturnedPremium = 4,
}

impl Priority {
    /// Check whether this tier is in the returned (rework) half.
    pub fn is_returned(&self) -> bool {
        matches!(self, Priority::ReturnedStandard | Priority::ReturnedPremium)
    }

    /// The returned counterpart of a fresh tier.
    ///
    /// Total only on the fresh half; applying it to an already-returned
    /// tier is a caller contract violation.
    pub fn faulty_counterpart(&self) -> Result<Priority, CategoryError> {
        match self {
            Priority::Standard => Ok(Priority::ReturnedStandard),
            Priority::Premium => Ok(Priority::ReturnedPremium),
            other => Err(CategoryError::AlreadyReturned(*other)),
        }
    }

    /// The fresh counterpart of a returned tier. Exact inverse of
    /// [`Priority::faulty_counterpart`].
    pub fn fixed_counterpart(&self) -> Result<Priority, CategoryError> {
        match self {
            Priority::ReturnedStandard => Ok(Priority::Standard),
            Priority::ReturnedPremium => Ok(Priority::Premium),
            other => Err(CategoryError::NotReturned(*other)),
        }
    }

    /// Short code used by the diagnostics rendering.
    pub fn code(&self) -> &'static str {
        match self {
            Priority::Standard => "S",
            Priority::Premium => "P",
            Priority::ReturnedStandard => "RS",
            Priority::ReturnedPremium => "RP",
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Priority::Standard => write!(f, "standard"),
            Priority::Premium => write!(f, "premium"),
            Priority::ReturnedStandard => write!(f, "returned_standard"),
            Priority::ReturnedPremium => write!(f, "returned_premium"),
        }
    }
}

/// Unique identifier for an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(pub u64);

impl OrderId {
    /// Derive an order ID from the consumer identity and its running serial.
    pub fn new(consumer: u64, serial: u64) -> Self {
        Self(10_000 * consumer + serial)
    }
}

impl std::fmt::Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A repair order travelling through the pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    /// Unique identifier for this order.
    pub id: OrderId,
    /// Current priority tier.
    pub priority: Priority,
    /// When the order entered the system.
    pub created_at: DateTime<Utc>,
}

impl Order {
    /// Create a new order stamped with the current time.
    pub fn new(id: OrderId, priority: Priority) -> Self {
        Self {
            id,
            priority,
            created_at: Utc::now(),
        }
    }

    /// Time elapsed since the order was created, recomputed on demand.
    pub fn age(&self) -> Duration {
        (Utc::now() - self.created_at).to_std().unwrap_or_default()
    }

    /// Promote the order to the returned counterpart of its tier after a
    /// failed inspection.
    pub fn mark_faulty(&mut self) -> Result<(), CategoryError> {
        self.priority = self.priority.faulty_counterpart()?;
        Ok(())
    }

    /// Demote the order back to its fresh tier once it has been repaired.
    pub fn mark_fixed(&mut self) -> Result<(), CategoryError> {
        self.priority = self.priority.fixed_counterpart()?;
        Ok(())
    }
}

impl crate::monitor::Prioritized for Order {
    fn priority(&self) -> Priority {
        self.priority
    }
}

impl std::fmt::Display for Order {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.id, self.priority.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_round_trip_restores_fresh_tier() {
        for tier in [Priority::Standard, Priority::Premium] {
            let mut order = Order::new(OrderId::new(1, 0), tier);
            order.mark_faulty().unwrap();
            assert!(order.priority.is_returned());
            order.mark_fixed().unwrap();
            assert_eq!(order.priority, tier);
        }
    }

    #[test]
    fn faulty_on_returned_tier_fails_loudly() {
        let mut order = Order::new(OrderId::new(1, 1), Priority::ReturnedPremium);
        assert_eq!(
            order.mark_faulty(),
            Err(CategoryError::AlreadyReturned(Priority::ReturnedPremium))
        );
        assert_eq!(order.priority, Priority::ReturnedPremium);
    }

    #[test]
    fn fixed_on_fresh_tier_fails_loudly() {
        let mut order = Order::new(OrderId::new(1, 2), Priority::Standard);
        assert_eq!(
            order.mark_fixed(),
            Err(CategoryError::NotReturned(Priority::Standard))
        );
        assert_eq!(order.priority, Priority::Standard);
    }

    #[test]
    fn returned_tiers_outrank_fresh_tiers() {
        assert!(Priority::ReturnedPremium > Priority::ReturnedStandard);
        assert!(Priority::ReturnedStandard > Priority::Premium);
        assert!(Priority::Premium > Priority::Standard);
    }

    #[test]
    fn order_ids_encode_consumer_and_serial() {
        assert_eq!(OrderId::new(2, 7), OrderId(20_007));
        assert_eq!(OrderId::new(11, 0), OrderId(110_000));
    }
}
