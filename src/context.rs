use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use tokio::sync::mpsc::Sender;

use crate::{CloudEvent, Delivery, FunctionId, Meta, Result};

/// Runtime-provided context for a function to interact with the system.
///
/// Use it to:
/// - `deliver(event)`: re-emit events into the dispatcher tagged with this
///   function's name (the dispatcher never routes a delivery back to its
///   own emitter)
/// - `stop()`: request graceful shutdown of this function
/// - `id()`: retrieve the function's identity for logging
/// - `is_alive()`: check whether the delivery loop should continue running
///
/// See also: [`Delivery`], [`Meta`], [`crate::Runtime`].
#[derive(Clone)]
pub struct Context {
    pub(crate) id: FunctionId,
    pub(crate) sender: Sender<Arc<Delivery>>,
    pub(crate) alive: Arc<AtomicBool>,
}

impl Context {
    pub(crate) fn new(
        id: FunctionId,
        sender: Sender<Arc<Delivery>>,
        alive: Arc<AtomicBool>,
    ) -> Self {
        Self { id, sender, alive }
    }

    /// Inject an event into the dispatcher. The delivery will carry this
    /// function's name as emitter. This awaits channel capacity
    /// (backpressure) to avoid silent drops.
    pub async fn deliver(&self, event: CloudEvent) -> Result<()> {
        self.forward(Delivery {
            meta: Meta::new(self.id.clone()),
            event,
        })
        .await
    }

    #[inline]
    pub async fn forward(&self, delivery: Delivery) -> Result<()> {
        self.sender.send(Arc::new(delivery)).await?;
        Ok(())
    }

    /// Signal this function to stop
    #[inline]
    pub fn stop(&mut self) {
        self.alive.store(false, Ordering::Release);
    }

    /// The function's identity as registered with the runtime.
    #[inline]
    pub fn id(&self) -> &FunctionId {
        &self.id
    }

    /// Whether the function is considered alive by the runtime.
    #[inline]
    pub fn is_alive(&self) -> bool {
        self.alive.load(Ordering::Acquire)
    }
}
