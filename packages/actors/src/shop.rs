//! Shop wiring: builds the queues, seeds the tool pool, and spawns the
//! whole actor roster.

use std::sync::Arc;
use std::time::Duration;

use ractor::{Actor, ActorRef};
use shop_core::{Monitor, Order, Priority, ShopEvent, SimConfig, Tool, ToolKind};
use tokio::sync::broadcast;
use tokio::task::JoinHandle;

use crate::consumer::{ConsumerActor, ConsumerArgs};
use crate::delivery::{DeliveryActor, DeliveryArgs};
use crate::diagnostics::{DiagnosticsActor, DiagnosticsArgs};
use crate::master::{MasterActor, MasterArgs};
use crate::messages::{ShopError, StageMessage};
use crate::supervisor::{SupervisorActor, SupervisorArgs};
use crate::worker::{WorkerActor, WorkerArgs};

/// Identity offset for premium consumers, keeping their order IDs in a
/// distinct range (standard consumers 1.., premium consumers 11..).
const PREMIUM_IDENTITY_OFFSET: u64 = 10;

/// A running shop: the four shared queues plus every spawned actor.
///
/// The queues outlive any single actor and are shared by handle; the shop
/// owns the actor references and join handles so it can be shut down
/// deterministically.
pub struct Shop {
    pub orders: Arc<Monitor<Order>>,
    pub tools: Arc<Monitor<Tool>>,
    pub workbench: Arc<Monitor<Order>>,
    pub products: Arc<Monitor<Order>>,
    events: broadcast::Sender<ShopEvent>,
    actors: Vec<(ActorRef<StageMessage>, JoinHandle<()>)>,
}

impl Shop {
    /// Validate the config, wire the queues, seed the tool pool, and spawn
    /// all actors.
    pub async fn start(config: SimConfig) -> Result<Self, ShopError> {
        config.validate()?;

        let orders = Arc::new(Monitor::new(config.orders_capacity));
        let tools = Arc::new(Monitor::new(config.tools_capacity));
        let workbench = Arc::new(Monitor::new(config.workbench_capacity));
        let products = Arc::new(Monitor::new(config.products_capacity));
        let (events, _) = broadcast::channel(1024);

        // One tool of each kind; the pool capacity was validated to fit.
        for kind in ToolKind::ALL {
            tools.push(Tool::new(kind)).await?;
        }

        let mut shop = Self {
            orders,
            tools,
            workbench,
            products,
            events,
            actors: Vec::new(),
        };

        for i in 1..=u64::from(config.standard_consumers) {
            shop.spawn_consumer(i, Priority::Standard, &config).await?;
        }
        for i in 1..=u64::from(config.premium_consumers) {
            shop.spawn_consumer(PREMIUM_IDENTITY_OFFSET + i, Priority::Premium, &config)
                .await?;
        }

        for i in 1..=config.workers {
            let args = WorkerArgs::from_config(
                format!("worker-{}", i),
                &config,
                shop.orders.clone(),
                shop.tools.clone(),
                shop.workbench.clone(),
                shop.events.clone(),
            );
            let (actor, handle) =
                Actor::spawn(Some(format!("worker-{}", i)), WorkerActor, args).await?;
            shop.actors.push((actor, handle));
        }

        // The master draws from its own stream, seeded apart from every
        // consumer's `base_seed + identity` seed.
        let master_args = MasterArgs::from_config(
            &config,
            shop.orders.clone(),
            shop.tools.clone(),
            shop.workbench.clone(),
            shop.products.clone(),
            shop.events.clone(),
            config.base_seed,
        );
        let (actor, handle) =
            Actor::spawn(Some("master".to_string()), MasterActor, master_args).await?;
        shop.actors.push((actor, handle));

        let supervisor_args = SupervisorArgs::from_config(
            &config,
            shop.orders.clone(),
            shop.tools.clone(),
            shop.products.clone(),
            shop.events.clone(),
        );
        let (actor, handle) = Actor::spawn(
            Some("supervisor".to_string()),
            SupervisorActor,
            supervisor_args,
        )
        .await?;
        shop.actors.push((actor, handle));

        let delivery_args = DeliveryArgs {
            products: shop.products.clone(),
            events: shop.events.clone(),
            pacing: Duration::from_millis(config.delivery_pacing_ms),
        };
        let (actor, handle) =
            Actor::spawn(Some("delivery".to_string()), DeliveryActor, delivery_args).await?;
        shop.actors.push((actor, handle));

        let diagnostics_args = DiagnosticsArgs {
            orders: shop.orders.clone(),
            tools: shop.tools.clone(),
            workbench: shop.workbench.clone(),
            products: shop.products.clone(),
            interval: Duration::from_millis(config.diagnostics_interval_ms),
        };
        let (actor, handle) = Actor::spawn(
            Some("diagnostics".to_string()),
            DiagnosticsActor,
            diagnostics_args,
        )
        .await?;
        shop.actors.push((actor, handle));

        Ok(shop)
    }

    async fn spawn_consumer(
        &mut self,
        identity: u64,
        tier: Priority,
        config: &SimConfig,
    ) -> Result<(), ShopError> {
        let args = ConsumerArgs {
            consumer: identity,
            tier,
            orders: self.orders.clone(),
            events: self.events.clone(),
            arrival_scale: Duration::from_millis(config.arrival_scale_ms),
            seed: config.base_seed + identity,
        };
        let (actor, handle) =
            Actor::spawn(Some(format!("consumer-{}", identity)), ConsumerActor, args).await?;
        self.actors.push((actor, handle));
        Ok(())
    }

    /// Subscribe to the observability side channel.
    pub fn subscribe(&self) -> broadcast::Receiver<ShopEvent> {
        self.events.subscribe()
    }

    /// Shut the shop down deterministically: close every queue so each
    /// suspended actor wakes with `MonitorClosed` and stops, then wait for
    /// all of them. In-flight work sleeps are allowed to finish.
    pub async fn shutdown(self) {
        tracing::info!("Shutting down shop");
        self.orders.close();
        self.tools.close();
        self.workbench.close();
        self.products.close();
        for (actor, _) in &self.actors {
            let _ = actor.send_message(StageMessage::Shutdown);
        }
        for (_, handle) in self.actors {
            let _ = handle.await;
        }
    }
}
