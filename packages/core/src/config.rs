//! Simulation configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::ToolKind;

/// Error raised by [`SimConfig::validate`] at startup.
///
/// A misconfigured threshold pair or an unusable capacity would wedge or
/// starve the pipeline at runtime, so both are rejected before any actor
/// is spawned.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("catch-up threshold ({catch_up_ms}ms) must be below the staleness trigger ({trigger_ms}ms)")]
    CatchUpNotBelowTrigger { catch_up_ms: u64, trigger_ms: u64 },

    #[error("{queue} queue capacity must be at least 1")]
    ZeroCapacity { queue: &'static str },

    #[error("tools queue capacity ({capacity}) cannot hold one tool of each kind ({kinds})")]
    ToolPoolTooSmall { capacity: usize, kinds: usize },

    #[error("accept ratio must be within 0.0..=1.0, got {0}")]
    AcceptRatioOutOfRange(f64),

    #[error("at least one worker is required")]
    NoWorkers,
}

/// Configuration for the simulation.
///
/// Defaults model a small shop: ten-slot order and product queues, a
/// two-slot tool pool and workbench, a 4s arrival scale, and the 30s/20s
/// supervisor thresholds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Capacity of the orders queue.
    pub orders_capacity: usize,
    /// Capacity of the shared tool pool.
    pub tools_capacity: usize,
    /// Capacity of the master's workbench queue.
    pub workbench_capacity: usize,
    /// Capacity of the products queue.
    pub products_capacity: usize,

    /// Number of standard-tier consumers.
    pub standard_consumers: u32,
    /// Number of premium-tier consumers.
    pub premium_consumers: u32,
    /// Number of workers.
    pub workers: u32,

    /// Scale of the consumer inter-arrival time.
    pub arrival_scale_ms: u64,
    /// Order age that triggers supervisor escalation.
    pub staleness_trigger_ms: u64,
    /// Order age below which the supervisor stands down. Must be below
    /// `staleness_trigger_ms`.
    pub catch_up_ms: u64,

    /// Service time for type A tools.
    pub service_type_a_ms: u64,
    /// Service time for type B tools.
    pub service_type_b_ms: u64,
    /// Rest between worker iterations.
    pub worker_rest_ms: u64,

    /// Master's inspection delay per order.
    pub inspection_delay_ms: u64,
    /// Master's verification delay for accepted orders.
    pub verification_delay_ms: u64,
    /// Probability that the master accepts an inspected order.
    pub accept_ratio: f64,

    /// Supervisor poll interval while watching.
    pub supervisor_poll_ms: u64,
    /// Supervisor's expedited fix time per order.
    pub supervisor_fix_ms: u64,
    /// Rest between supervisor work iterations.
    pub supervisor_rest_ms: u64,

    /// Pacing delay between deliveries.
    pub delivery_pacing_ms: u64,
    /// Interval between diagnostics snapshots.
    pub diagnostics_interval_ms: u64,

    /// Base seed from which every actor's RNG stream is derived.
    pub base_seed: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            orders_capacity: 10,
            tools_capacity: 2,
            workbench_capacity: 2,
            products_capacity: 10,
            standard_consumers: 2,
            premium_consumers: 1,
            workers: 2,
            arrival_scale_ms: 4_000,
            staleness_trigger_ms: 30_000,
            catch_up_ms: 20_000,
            service_type_a_ms: 1_000,
            service_type_b_ms: 2_000,
            worker_rest_ms: 1_000,
            inspection_delay_ms: 500,
            verification_delay_ms: 1_000,
            accept_ratio: 0.9,
            supervisor_poll_ms: 5_000,
            supervisor_fix_ms: 2_000,
            supervisor_rest_ms: 1_000,
            delivery_pacing_ms: 500,
            diagnostics_interval_ms: 500,
            base_seed: 2_137,
        }
    }
}

impl SimConfig {
    /// Validate the configuration before wiring the shop.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (queue, capacity) in [
            ("orders", self.orders_capacity),
            ("tools", self.tools_capacity),
            ("workbench", self.workbench_capacity),
            ("products", self.products_capacity),
        ] {
            if capacity == 0 {
                return Err(ConfigError::ZeroCapacity { queue });
            }
        }
        if self.tools_capacity < ToolKind::ALL.len() {
            return Err(ConfigError::ToolPoolTooSmall {
                capacity: self.tools_capacity,
                kinds: ToolKind::ALL.len(),
            });
        }
        if self.catch_up_ms >= self.staleness_trigger_ms {
            return Err(ConfigError::CatchUpNotBelowTrigger {
                catch_up_ms: self.catch_up_ms,
                trigger_ms: self.staleness_trigger_ms,
            });
        }
        if !(0.0..=1.0).contains(&self.accept_ratio) {
            return Err(ConfigError::AcceptRatioOutOfRange(self.accept_ratio));
        }
        if self.workers == 0 {
            return Err(ConfigError::NoWorkers);
        }
        Ok(())
    }

    /// Fixed service duration implied by a tool kind.
    pub fn service_time(&self, kind: ToolKind) -> Duration {
        match kind {
            ToolKind::TypeA => Duration::from_millis(self.service_type_a_ms),
            ToolKind::TypeB => Duration::from_millis(self.service_type_b_ms),
        }
    }

    pub fn staleness_trigger(&self) -> Duration {
        Duration::from_millis(self.staleness_trigger_ms)
    }

    pub fn catch_up(&self) -> Duration {
        Duration::from_millis(self.catch_up_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert_eq!(SimConfig::default().validate(), Ok(()));
    }

    #[test]
    fn rejects_catch_up_at_or_above_trigger() {
        let mut config = SimConfig::default();
        config.catch_up_ms = config.staleness_trigger_ms;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::CatchUpNotBelowTrigger { .. })
        ));
    }

    #[test]
    fn rejects_zero_capacity() {
        let config = SimConfig {
            products_capacity: 0,
            ..SimConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::ZeroCapacity { queue: "products" })
        );
    }

    #[test]
    fn rejects_tool_pool_smaller_than_kind_set() {
        let config = SimConfig {
            tools_capacity: 1,
            ..SimConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ToolPoolTooSmall { capacity: 1, .. })
        ));
    }

    #[test]
    fn empty_config_deserializes_to_defaults() {
        let config: SimConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, SimConfig::default());
    }
}
