//! Master actor inspecting repaired orders.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use ractor::{Actor, ActorProcessingErr, ActorRef};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use shop_core::{Monitor, Order, ShopEvent, SimConfig, Tool};
use tokio::sync::broadcast;

use crate::messages::StageMessage;

/// Arguments for spawning the master.
pub struct MasterArgs {
    pub orders: Arc<Monitor<Order>>,
    pub tools: Arc<Monitor<Tool>>,
    pub workbench: Arc<Monitor<Order>>,
    pub products: Arc<Monitor<Order>>,
    pub events: broadcast::Sender<ShopEvent>,
    pub inspection_delay: Duration,
    pub verification_delay: Duration,
    /// Probability of accepting an inspected order.
    pub accept_ratio: f64,
    /// Seed for the accept/reject stream, independent of the consumers'.
    pub seed: u64,
}

impl MasterArgs {
    /// Build master arguments from the simulation config.
    pub fn from_config(
        config: &SimConfig,
        orders: Arc<Monitor<Order>>,
        tools: Arc<Monitor<Tool>>,
        workbench: Arc<Monitor<Order>>,
        products: Arc<Monitor<Order>>,
        events: broadcast::Sender<ShopEvent>,
        seed: u64,
    ) -> Self {
        Self {
            orders,
            tools,
            workbench,
            products,
            events,
            inspection_delay: Duration::from_millis(config.inspection_delay_ms),
            verification_delay: Duration::from_millis(config.verification_delay_ms),
            accept_ratio: config.accept_ratio,
            seed,
        }
    }
}

/// State for the master actor.
pub struct MasterState {
    args: MasterArgs,
    rng: StdRng,
}

/// Master actor: inspects each repaired order and either verifies it into
/// products or marks it faulty and requeues it for rework.
pub struct MasterActor;

impl Actor for MasterActor {
    type Msg = StageMessage;
    type State = MasterState;
    type Arguments = MasterArgs;

    async fn pre_start(
        &self,
        myself: ActorRef<Self::Msg>,
        args: Self::Arguments,
    ) -> Result<Self::State, ActorProcessingErr> {
        tracing::info!("Starting master");
        myself.send_message(StageMessage::Tick)?;
        let rng = StdRng::seed_from_u64(args.seed);
        Ok(MasterState { args, rng })
    }

    async fn handle(
        &self,
        myself: ActorRef<Self::Msg>,
        message: Self::Msg,
        state: &mut Self::State,
    ) -> Result<(), ActorProcessingErr> {
        match message {
            StageMessage::Tick => {
                let Ok(mut order) = state.args.workbench.pop().await else {
                    myself.stop(None);
                    return Ok(());
                };
                tokio::time::sleep(state.args.inspection_delay).await;

                if state.rng.gen_bool(state.args.accept_ratio) {
                    let Ok(tool) = state.args.tools.pop().await else {
                        myself.stop(None);
                        return Ok(());
                    };
                    tokio::time::sleep(state.args.verification_delay).await;
                    if state.args.tools.push(tool).await.is_err()
                        || state.args.products.push(order.clone()).await.is_err()
                    {
                        myself.stop(None);
                        return Ok(());
                    }
                    tracing::debug!(id = %order.id, "Order passed inspection");
                    let _ = state.args.events.send(ShopEvent::InspectionPassed {
                        id: order.id,
                        timestamp: Utc::now(),
                    });
                } else {
                    // Everything on the workbench is in a fresh tier, so a
                    // transition failure here is a wiring bug worth dying on.
                    order.mark_faulty().map_err(ActorProcessingErr::from)?;
                    if state.args.orders.push(order.clone()).await.is_err() {
                        myself.stop(None);
                        return Ok(());
                    }
                    tracing::debug!(id = %order.id, tier = %order.priority, "Order sent back for rework");
                    let _ = state.args.events.send(ShopEvent::InspectionFailed {
                        id: order.id,
                        priority: order.priority,
                        timestamp: Utc::now(),
                    });
                }

                myself.send_message(StageMessage::Tick)?;
            }

            StageMessage::Shutdown => {
                tracing::info!("Shutting down master");
                myself.stop(None);
            }
        }
        Ok(())
    }
}
