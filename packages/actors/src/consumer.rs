//! Consumer actor generating new orders at random intervals.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use ractor::{Actor, ActorProcessingErr, ActorRef};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use shop_core::{Monitor, Order, OrderId, Priority, ShopEvent};
use tokio::sync::broadcast;

use crate::messages::StageMessage;

/// Arguments for spawning a consumer.
pub struct ConsumerArgs {
    /// Numeric identity, also the prefix of every order ID it generates.
    pub consumer: u64,
    /// Priority tier of the generated orders.
    pub tier: Priority,
    pub orders: Arc<Monitor<Order>>,
    pub events: broadcast::Sender<ShopEvent>,
    /// Scale of the randomized inter-arrival sleep.
    pub arrival_scale: Duration,
    /// Seed for this consumer's private RNG stream.
    pub seed: u64,
}

/// State for the consumer actor.
pub struct ConsumerState {
    consumer: u64,
    tier: Priority,
    serial: u64,
    rng: StdRng,
    orders: Arc<Monitor<Order>>,
    events: broadcast::Sender<ShopEvent>,
    arrival_scale: Duration,
}

/// Consumer actor modelling an open arrival process: it places orders
/// forever, pacing itself with seeded random jitter.
pub struct ConsumerActor;

impl Actor for ConsumerActor {
    type Msg = StageMessage;
    type State = ConsumerState;
    type Arguments = ConsumerArgs;

    async fn pre_start(
        &self,
        myself: ActorRef<Self::Msg>,
        args: Self::Arguments,
    ) -> Result<Self::State, ActorProcessingErr> {
        tracing::info!(consumer = args.consumer, tier = %args.tier, "Starting consumer");
        myself.send_message(StageMessage::Tick)?;
        Ok(ConsumerState {
            consumer: args.consumer,
            tier: args.tier,
            serial: 0,
            rng: StdRng::seed_from_u64(args.seed),
            orders: args.orders,
            events: args.events,
            arrival_scale: args.arrival_scale,
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
                let order = Order::new(OrderId::new(state.consumer, state.serial), state.tier);
                state.serial += 1;

                if state.orders.push(order.clone()).await.is_err() {
                    myself.stop(None);
                    return Ok(());
                }
                tracing::debug!(id = %order.id, tier = %order.priority, "Placed order");
                let _ = state.events.send(ShopEvent::OrderPlaced {
                    id: order.id,
                    priority: order.priority,
                    timestamp: Utc::now(),
                });

                // Inter-arrival factor of 0.5x, 1.0x, or 1.5x the scale.
                let factor = (1.0 + state.rng.gen_range(0..3) as f64) / 2.0;
                tokio::time::sleep(state.arrival_scale.mul_f64(factor)).await;
                myself.send_message(StageMessage::Tick)?;
            }

            StageMessage::Shutdown => {
                tracing::info!(consumer = state.consumer, "Shutting down consumer");
                myself.stop(None);
            }
        }
        Ok(())
    }
}
