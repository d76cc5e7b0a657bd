//! Actor system for the repair-shop pipeline.
//!
//! This crate provides the ractor-based actor roster and the `Shop`
//! wiring layer on top of `shop_core`'s queues.
//!
//! # Architecture
//!
//! - `ConsumerActor` ×N - places new orders at randomized intervals
//! - `WorkerActor` ×N - repairs orders using the shared tool pool
//! - `MasterActor` - inspects repaired orders, accepting or requeueing them
//! - `SupervisorActor` - escalates when the order backlog goes stale
//! - `DeliveryActor` - drains products and reports latencies
//! - `DiagnosticsActor` - renders periodic queue snapshots
//!
//! Every actor runs a tick-driven loop; the blocking handoffs happen on
//! the shared [`shop_core::Monitor`] queues, and closing those queues is
//! the shutdown signal.
//!
//! # Usage
//!
//! ```ignore
//! use actors::Shop;
//! use shop_core::SimConfig;
//!
//! let shop = Shop::start(SimConfig::default()).await?;
//! let mut events = shop.subscribe();
//! // ... run ...
//! shop.shutdown().await;
//! ```

mod consumer;
mod delivery;
mod diagnostics;
mod master;
mod messages;
mod shop;
mod supervisor;
mod worker;

pub use consumer::{ConsumerActor, ConsumerArgs};
pub use delivery::{DeliveryActor, DeliveryArgs};
pub use diagnostics::{DiagnosticsActor, DiagnosticsArgs};
pub use master::{MasterActor, MasterArgs};
pub use messages::{ShopError, StageMessage};
pub use shop::Shop;
pub use supervisor::{Phase, SupervisorActor, SupervisorArgs};
pub use worker::{WorkerActor, WorkerArgs};

/// Re-export ractor types for convenience.
pub use ractor::{Actor, ActorRef};
