//! Core domain types for the repair-shop simulation.
//!
//! This crate contains everything the actor system builds on:
//! - Order, Priority, and Tool for the items moving through the pipeline
//! - Monitor, the bounded priority-aware queue shared by all stages
//! - SimConfig for the rates, capacities, and thresholds
//! - ShopEvent for the observability side channel

mod config;
mod events;
mod monitor;
mod order;
mod tool;

pub use config::{ConfigError, SimConfig};
pub use events::ShopEvent;
pub use monitor::{Monitor, MonitorClosed, Prioritized};
pub use order::{CategoryError, Order, OrderId, Priority};
pub use tool::{Tool, ToolKind};
