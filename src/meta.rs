use std::time::SystemTime;

use uuid::Uuid;

use crate::{DeliveryId, FunctionId};

/// Delivery-side metadata attached to every [`Delivery`](crate::Delivery).
///
/// - `id`: unique identifier for this delivery (distinct from the event's
///   own `id` attribute, which the producer owns).
/// - `received_at`: injection time in nanoseconds since Unix epoch
///   (truncated to `u64`).
/// - `emitter`: who injected the event - the runtime itself for external
///   deliveries, or the function that re-emitted via its `Context`.
#[derive(Debug, Clone)]
pub struct Meta {
    id: DeliveryId,
    received_at: u64,
    pub(crate) emitter: FunctionId,
}

impl Meta {
    /// Construct metadata for a delivery injected by the given emitter.
    ///
    /// # Panics
    ///
    /// Panics if the system clock is set before the Unix epoch.
    pub fn new(emitter: FunctionId) -> Self {
        Self {
            id: Uuid::new_v4().as_u128(),
            received_at: SystemTime::now()
                .duration_since(SystemTime::UNIX_EPOCH)
                .expect("SystemTime before Unix epoch")
                .as_nanos() as u64,
            emitter,
        }
    }

    /// Unique identifier for this delivery.
    pub fn id(&self) -> DeliveryId {
        self.id
    }

    /// Injection timestamp in nanoseconds since Unix epoch (u64 truncation).
    pub fn received_at(&self) -> u64 {
        self.received_at
    }

    /// Name of the function (or the runtime) that injected the event.
    pub fn emitter(&self) -> &FunctionId {
        &self.emitter
    }
}
