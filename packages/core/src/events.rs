//! Event types for the observability side channel.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{OrderId, Priority, ToolKind};

/// Events emitted by the shop as orders move through the pipeline.
///
/// Broadcast over a `tokio::sync::broadcast` channel owned by the shop;
/// purely observational and safe to drop when nobody is listening.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ShopEvent {
    /// A consumer placed a new order.
    OrderPlaced {
        id: OrderId,
        priority: Priority,
        timestamp: DateTime<Utc>,
    },
    /// A worker picked up an order and a tool.
    RepairStarted {
        id: OrderId,
        worker: String,
        tool: ToolKind,
        timestamp: DateTime<Utc>,
    },
    /// A worker finished an order and handed it to the master.
    RepairFinished {
        id: OrderId,
        worker: String,
        timestamp: DateTime<Utc>,
    },
    /// The master accepted an order into products.
    InspectionPassed {
        id: OrderId,
        timestamp: DateTime<Utc>,
    },
    /// The master rejected an order back into the orders queue for rework.
    InspectionFailed {
        id: OrderId,
        priority: Priority,
        timestamp: DateTime<Utc>,
    },
    /// The supervisor noticed a stale backlog and started working.
    SupervisorEscalated {
        age_ms: u64,
        timestamp: DateTime<Utc>,
    },
    /// The supervisor pushed an order straight to products.
    OrderExpedited {
        id: OrderId,
        age_ms: u64,
        timestamp: DateTime<Utc>,
    },
    /// The supervisor's backlog caught up and it went back to watching.
    SupervisorStoodDown { timestamp: DateTime<Utc> },
    /// An order left the shop.
    OrderDelivered {
        id: OrderId,
        latency_ms: u64,
        timestamp: DateTime<Utc>,
    },
}

impl ShopEvent {
    /// Get the timestamp of the event.
    pub fn timestamp(&self) -> DateTime<Utc> {
        match self {
            ShopEvent::OrderPlaced { timestamp, .. } => *timestamp,
            ShopEvent::RepairStarted { timestamp, .. } => *timestamp,
            ShopEvent::RepairFinished { timestamp, .. } => *timestamp,
            ShopEvent::InspectionPassed { timestamp, .. } => *timestamp,
            ShopEvent::InspectionFailed { timestamp, .. } => *timestamp,
            ShopEvent::SupervisorEscalated { timestamp, .. } => *timestamp,
            ShopEvent::OrderExpedited { timestamp, .. } => *timestamp,
            ShopEvent::SupervisorStoodDown { timestamp } => *timestamp,
            ShopEvent::OrderDelivered { timestamp, .. } => *timestamp,
        }
    }

    /// Get the order ID associated with this event, if any.
    pub fn order_id(&self) -> Option<OrderId> {
        match self {
            ShopEvent::OrderPlaced { id, .. } => Some(*id),
            ShopEvent::RepairStarted { id, .. } => Some(*id),
            ShopEvent::RepairFinished { id, .. } => Some(*id),
            ShopEvent::InspectionPassed { id, .. } => Some(*id),
            ShopEvent::InspectionFailed { id, .. } => Some(*id),
            ShopEvent::OrderExpedited { id, .. } => Some(*id),
            ShopEvent::OrderDelivered { id, .. } => Some(*id),
            _ => None,
        }
    }

    /// Get a short description of this event for logging.
    pub fn description(&self) -> String {
        match self {
            ShopEvent::OrderPlaced { id, priority, .. } => {
                format!("Order {} placed ({})", id, priority)
            }
            ShopEvent::RepairStarted {
                id, worker, tool, ..
            } => format!("Order {} picked up by {} with tool {}", id, worker, tool),
            ShopEvent::RepairFinished { id, worker, .. } => {
                format!("Order {} repaired by {}", id, worker)
            }
            ShopEvent::InspectionPassed { id, .. } => format!("Order {} passed inspection", id),
            ShopEvent::InspectionFailed { id, priority, .. } => {
                format!("Order {} sent back for rework ({})", id, priority)
            }
            ShopEvent::SupervisorEscalated { age_ms, .. } => {
                format!("Supervisor escalated, oldest order {}ms stale", age_ms)
            }
            ShopEvent::OrderExpedited { id, age_ms, .. } => {
                format!("Order {} expedited at {}ms", id, age_ms)
            }
            ShopEvent::SupervisorStoodDown { .. } => "Supervisor stood down".to_string(),
            ShopEvent::OrderDelivered { id, latency_ms, .. } => {
                format!("Order {} delivered in {}ms", id, latency_ms)
            }
        }
    }
}
