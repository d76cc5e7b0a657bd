//! Delivery actor draining finished products.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use ractor::{Actor, ActorProcessingErr, ActorRef};
use shop_core::{Monitor, Order, ShopEvent};
use tokio::sync::broadcast;

use crate::messages::StageMessage;

/// Arguments for spawning the delivery actor.
pub struct DeliveryArgs {
    pub products: Arc<Monitor<Order>>,
    pub events: broadcast::Sender<ShopEvent>,
    /// Pacing delay between deliveries.
    pub pacing: Duration,
}

/// State for the delivery actor.
pub struct DeliveryState {
    args: DeliveryArgs,
}

/// Delivery actor: pops finished products and reports each order's total
/// creation-to-delivery latency.
pub struct DeliveryActor;

impl Actor for DeliveryActor {
    type Msg = StageMessage;
    type State = DeliveryState;
    type Arguments = DeliveryArgs;

    async fn pre_start(
        &self,
        myself: ActorRef<Self::Msg>,
        args: Self::Arguments,
    ) -> Result<Self::State, ActorProcessingErr> {
        tracing::info!("Starting delivery");
        myself.send_message(StageMessage::Tick)?;
        Ok(DeliveryState { args })
    }

    async fn handle(
        &self,
        myself: ActorRef<Self::Msg>,
        message: Self::Msg,
        state: &mut Self::State,
    ) -> Result<(), ActorProcessingErr> {
        match message {
            StageMessage::Tick => {
                let Ok(product) = state.args.products.pop().await else {
                    myself.stop(None);
                    return Ok(());
                };
                let latency_ms = product.age().as_millis() as u64;
                tracing::info!(id = %product.id, latency_ms, "Finished order");
                let _ = state.args.events.send(ShopEvent::OrderDelivered {
                    id: product.id,
                    latency_ms,
                    timestamp: Utc::now(),
                });

                tokio::time::sleep(state.args.pacing).await;
                myself.send_message(StageMessage::Tick)?;
            }

            StageMessage::Shutdown => {
                tracing::info!("Shutting down delivery");
                myself.stop(None);
            }
        }
        Ok(())
    }
}
