//! Supervisor actor: watches order staleness and expedites stale backlogs.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use ractor::{Actor, ActorProcessingErr, ActorRef};
use shop_core::{Monitor, Order, ShopEvent, SimConfig, Tool};
use tokio::sync::broadcast;

use crate::messages::StageMessage;

/// The supervisor's two phases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Polling the orders queue for staleness.
    Watching,
    /// Draining stale orders straight to products.
    Working,
}

/// Arguments for spawning the supervisor.
pub struct SupervisorArgs {
    pub orders: Arc<Monitor<Order>>,
    pub tools: Arc<Monitor<Tool>>,
    pub products: Arc<Monitor<Order>>,
    pub events: broadcast::Sender<ShopEvent>,
    /// Poll interval while watching.
    pub poll: Duration,
    /// Order age that triggers escalation (Y).
    pub staleness_trigger: Duration,
    /// Order age below which the current work burst ends (Z, below Y).
    pub catch_up: Duration,
    /// Expedited fix time per order.
    pub fix_time: Duration,
    /// Rest between work iterations.
    pub rest: Duration,
}

impl SupervisorArgs {
    /// Build supervisor arguments from the simulation config.
    pub fn from_config(
        config: &SimConfig,
        orders: Arc<Monitor<Order>>,
        tools: Arc<Monitor<Tool>>,
        products: Arc<Monitor<Order>>,
        events: broadcast::Sender<ShopEvent>,
    ) -> Self {
        Self {
            orders,
            tools,
            products,
            events,
            poll: Duration::from_millis(config.supervisor_poll_ms),
            staleness_trigger: config.staleness_trigger(),
            catch_up: config.catch_up(),
            fix_time: Duration::from_millis(config.supervisor_fix_ms),
            rest: Duration::from_millis(config.supervisor_rest_ms),
        }
    }
}

/// State for the supervisor actor.
pub struct SupervisorState {
    args: SupervisorArgs,
    phase: Phase,
}

/// Supervisor actor cycling between a watch phase and a work phase.
///
/// While watching it periodically peeks the maximum-priority order and
/// escalates once that order's age crosses the staleness trigger. While
/// working it drains orders straight to products, bypassing the workers,
/// until it pops an order younger than the catch-up threshold.
///
/// The stand-down check deliberately looks at the *currently popped*
/// order's age: because extraction is priority-max rather than
/// oldest-first, one fresh high-priority order can end the burst while
/// older stale orders remain queued. That behavior is intentional and
/// pinned by a regression test.
pub struct SupervisorActor;

impl Actor for SupervisorActor {
    type Msg = StageMessage;
    type State = SupervisorState;
    type Arguments = SupervisorArgs;

    async fn pre_start(
        &self,
        myself: ActorRef<Self::Msg>,
        args: Self::Arguments,
    ) -> Result<Self::State, ActorProcessingErr> {
        tracing::info!("Starting supervisor");
        myself.send_message(StageMessage::Tick)?;
        Ok(SupervisorState {
            args,
            phase: Phase::Watching,
        })
    }

    async fn handle(
        &self,
        myself: ActorRef<Self::Msg>,
        message: Self::Msg,
        state: &mut Self::State,
    ) -> Result<(), ActorProcessingErr> {
        match message {
            StageMessage::Tick => {
                match state.phase {
                    Phase::Watching => {
                        tokio::time::sleep(state.args.poll).await;
                        let Ok(next) = state.args.orders.peek().await else {
                            myself.stop(None);
                            return Ok(());
                        };
                        let age = next.age();
                        if age > state.args.staleness_trigger {
                            tracing::info!(age_ms = age.as_millis() as u64, "Supervisor starts working");
                            state.phase = Phase::Working;
                            let _ = state.args.events.send(ShopEvent::SupervisorEscalated {
                                age_ms: age.as_millis() as u64,
                                timestamp: Utc::now(),
                            });
                        }
                    }

                    Phase::Working => {
                        let Ok(order) = state.args.orders.pop().await else {
                            myself.stop(None);
                            return Ok(());
                        };
                        let age = order.age();
                        // Backlog caught up to "not yet stale": this is the
                        // last iteration of the burst.
                        let last = age < state.args.catch_up;

                        let Ok(tool) = state.args.tools.pop().await else {
                            myself.stop(None);
                            return Ok(());
                        };
                        tokio::time::sleep(state.args.fix_time).await;
                        if state.args.tools.push(tool).await.is_err()
                            || state.args.products.push(order.clone()).await.is_err()
                        {
                            myself.stop(None);
                            return Ok(());
                        }
                        let _ = state.args.events.send(ShopEvent::OrderExpedited {
                            id: order.id,
                            age_ms: age.as_millis() as u64,
                            timestamp: Utc::now(),
                        });

                        tokio::time::sleep(state.args.rest).await;
                        if last {
                            tracing::info!("Supervisor has finished his intervention");
                            state.phase = Phase::Watching;
                            let _ = state.args.events.send(ShopEvent::SupervisorStoodDown {
                                timestamp: Utc::now(),
                            });
                        }
                    }
                }
                myself.send_message(StageMessage::Tick)?;
            }

            StageMessage::Shutdown => {
                tracing::info!("Shutting down supervisor");
                myself.stop(None);
            }
        }
        Ok(())
    }
}
