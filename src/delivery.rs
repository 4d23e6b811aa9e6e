use std::sync::Arc;

use crate::{CloudEvent, FunctionId, Meta};

/// Event plus metadata used by the dispatcher for routing.
///
/// - `event`: the inbound [`CloudEvent`].
/// - `meta`: [`Meta`] describing who injected the event and when.
#[derive(Debug, Clone)]
pub struct Delivery {
    pub meta: Meta,
    pub event: CloudEvent,
}

impl Delivery {
    /// Create a new delivery tagging the event with the given emitter name.
    pub fn new<N>(event: CloudEvent, emitter: N) -> Self
    where
        N: Into<Arc<str>>,
    {
        Self {
            meta: Meta::new(FunctionId::new(emitter.into())),
            event,
        }
    }
}

impl From<(&CloudEvent, &Meta)> for Delivery {
    fn from((event, meta): (&CloudEvent, &Meta)) -> Self {
        Delivery {
            meta: meta.clone(),
            event: event.clone(),
        }
    }
}
