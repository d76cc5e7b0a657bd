//! Worker actor repairing orders with shared tools.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use ractor::{Actor, ActorProcessingErr, ActorRef};
use shop_core::{Monitor, Order, ShopEvent, SimConfig, Tool, ToolKind};
use tokio::sync::broadcast;

use crate::messages::StageMessage;

/// Arguments for spawning a worker.
pub struct WorkerArgs {
    pub worker_id: String,
    pub orders: Arc<Monitor<Order>>,
    pub tools: Arc<Monitor<Tool>>,
    pub workbench: Arc<Monitor<Order>>,
    pub events: broadcast::Sender<ShopEvent>,
    pub service_type_a: Duration,
    pub service_type_b: Duration,
    pub rest: Duration,
}

impl WorkerArgs {
    /// Build worker arguments from the simulation config.
    pub fn from_config(
        worker_id: impl Into<String>,
        config: &SimConfig,
        orders: Arc<Monitor<Order>>,
        tools: Arc<Monitor<Tool>>,
        workbench: Arc<Monitor<Order>>,
        events: broadcast::Sender<ShopEvent>,
    ) -> Self {
        Self {
            worker_id: worker_id.into(),
            orders,
            tools,
            workbench,
            events,
            service_type_a: config.service_time(ToolKind::TypeA),
            service_type_b: config.service_time(ToolKind::TypeB),
            rest: Duration::from_millis(config.worker_rest_ms),
        }
    }

    fn service_time(&self, kind: ToolKind) -> Duration {
        match kind {
            ToolKind::TypeA => self.service_type_a,
            ToolKind::TypeB => self.service_type_b,
        }
    }
}

/// State for the worker actor.
pub struct WorkerState {
    args: WorkerArgs,
}

/// Worker actor: pops an order and a tool, repairs the order for the
/// tool's service time, returns the tool, and hands the order to the
/// master's workbench.
pub struct WorkerActor;

impl Actor for WorkerActor {
    type Msg = StageMessage;
    type State = WorkerState;
    type Arguments = WorkerArgs;

    async fn pre_start(
        &self,
        myself: ActorRef<Self::Msg>,
        args: Self::Arguments,
    ) -> Result<Self::State, ActorProcessingErr> {
        tracing::info!(worker = %args.worker_id, "Starting worker");
        myself.send_message(StageMessage::Tick)?;
        Ok(WorkerState { args })
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
                let Ok(mut order) = args.orders.pop().await else {
                    myself.stop(None);
                    return Ok(());
                };
                // The tool pop is the backpressure point coupling worker
                // throughput to the tool count.
                let Ok(tool) = args.tools.pop().await else {
                    myself.stop(None);
                    return Ok(());
                };
                let _ = args.events.send(ShopEvent::RepairStarted {
                    id: order.id,
                    worker: args.worker_id.clone(),
                    tool: tool.kind,
                    timestamp: Utc::now(),
                });

                // The repair doubles as the fix for rework orders.
                if order.priority.is_returned() {
                    order.mark_fixed().map_err(ActorProcessingErr::from)?;
                }
                tokio::time::sleep(args.service_time(tool.kind)).await;

                // Return the tool before touching the workbench so no tool
                // is held while suspended on another queue.
                if args.tools.push(tool).await.is_err() {
                    myself.stop(None);
                    return Ok(());
                }
                if args.workbench.push(order.clone()).await.is_err() {
                    myself.stop(None);
                    return Ok(());
                }
                tracing::debug!(worker = %args.worker_id, id = %order.id, "Repaired order");
                let _ = args.events.send(ShopEvent::RepairFinished {
                    id: order.id,
                    worker: args.worker_id.clone(),
                    timestamp: Utc::now(),
                });

                tokio::time::sleep(args.rest).await;
                myself.send_message(StageMessage::Tick)?;
            }

            StageMessage::Shutdown => {
                tracing::info!(worker = %state.args.worker_id, "Shutting down worker");
                myself.stop(None);
            }
        }
        Ok(())
    }
}
