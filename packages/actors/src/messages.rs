//! Message types for actor communication.

/// Message driving every pipeline actor.
///
/// Each actor runs one loop iteration per `Tick` and re-sends itself the
/// next tick, so its mailbox stays responsive between iterations. The
/// actual blocking happens inside the tick, on the shared monitors.
#[derive(Debug)]
pub enum StageMessage {
    /// Run one loop iteration.
    Tick,

    /// Stop after the in-flight iteration completes.
    Shutdown,
}

/// Error type for actor wiring operations.
#[derive(Debug, thiserror::Error)]
pub enum ShopError {
    #[error("invalid configuration: {0}")]
    Config(#[from] shop_core::ConfigError),

    #[error("failed to spawn actor: {0}")]
    Spawn(#[from] ractor::SpawnErr),

    #[error("failed to seed the tool pool: {0}")]
    Seed(#[from] shop_core::MonitorClosed),
}
