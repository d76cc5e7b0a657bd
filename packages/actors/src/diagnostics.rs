//! Diagnostics actor rendering periodic queue snapshots.

use std::sync::Arc;
use std::time::Duration;

use ractor::{Actor, ActorProcessingErr, ActorRef};
use shop_core::{Monitor, Order, Tool};

use crate::messages::StageMessage;

/// Arguments for spawning the diagnostics actor.
pub struct DiagnosticsArgs {
    pub orders: Arc<Monitor<Order>>,
    pub tools: Arc<Monitor<Tool>>,
    pub workbench: Arc<Monitor<Order>>,
    pub products: Arc<Monitor<Order>>,
    /// Interval between snapshots.
    pub interval: Duration,
}

/// State for the diagnostics actor.
pub struct DiagnosticsState {
    args: DiagnosticsArgs,
}

/// Diagnostics actor: periodically snapshots all four queues and logs one
/// line per queue. Purely observational; each snapshot is a single short
/// critical section and never suspends on capacity or emptiness.
pub struct DiagnosticsActor;

fn render_orders(items: &[Order]) -> String {
    items
        .iter()
        .map(|order| order.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

fn render_tools(items: &[Tool]) -> String {
    items
        .iter()
        .map(|tool| tool.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

impl Actor for DiagnosticsActor {
    type Msg = StageMessage;
    type State = DiagnosticsState;
    type Arguments = DiagnosticsArgs;

    async fn pre_start(
        &self,
        myself: ActorRef<Self::Msg>,
        args: Self::Arguments,
    ) -> Result<Self::State, ActorProcessingErr> {
        tracing::info!("Starting diagnostics");
        myself.send_message(StageMessage::Tick)?;
        Ok(DiagnosticsState { args })
    }

    async fn handle(
        &self,
        myself: ActorRef<Self::Msg>,
        message: Self::Msg,
        state: &mut Self::State,
    ) -> Result<(), ActorProcessingErr> {
        match message {
            StageMessage::Tick => {
                let args = &state.args;
                if args.orders.is_closed() {
                    myself.stop(None);
                    return Ok(());
                }
                tracing::info!(
                    orders = %render_orders(&args.orders.snapshot()),
                    tools = %render_tools(&args.tools.snapshot()),
                    workbench = %render_orders(&args.workbench.snapshot()),
                    products = %render_orders(&args.products.snapshot()),
                    "Queue snapshot"
                );

                tokio::time::sleep(args.interval).await;
                myself.send_message(StageMessage::Tick)?;
            }

            StageMessage::Shutdown => {
                tracing::info!("Shutting down diagnostics");
                myself.stop(None);
            }
        }
        Ok(())
    }
}
