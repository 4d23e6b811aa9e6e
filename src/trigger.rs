use std::{hash::Hash, sync::Arc};

use crate::CloudEvent;

/// Maps events to routing triggers.
///
/// Functions subscribe to one or more triggers, and the dispatcher delivers
/// events to matching subscribers. Implement this for your own trigger type
/// when the built-in strategies don't fit (e.g. routing on `source` or
/// `subject` instead of `type`).
///
/// Triggers must be `Send + Sync + 'static` because they are stored in the
/// dispatcher which runs in a spawned task.
pub trait Trigger: Hash + PartialEq + Eq + Clone + Send + Sync + 'static {
    fn from_event(event: &CloudEvent) -> Self
    where
        Self: Sized;
}

/// Default trigger for simple systems that don't need routing.
///
/// Every registered function receives every event. This is the identity
/// strategy and the runtime's default type parameter.
#[derive(Debug, Hash, Eq, PartialEq, Clone)]
pub struct Broadcast;

impl Trigger for Broadcast {
    fn from_event(_event: &CloudEvent) -> Broadcast {
        Broadcast
    }
}

impl std::fmt::Display for Broadcast {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "broadcast")
    }
}

/// Routes on the envelope's `type` attribute.
///
/// This is the named-trigger registration contract: a function registered
/// for `EventType::new("wqi.reading")` receives exactly the events whose
/// `type` is `wqi.reading`.
#[derive(Debug, Hash, Eq, PartialEq, Clone)]
pub struct EventType(Arc<str>);

impl EventType {
    pub fn new<S: AsRef<str>>(ty: S) -> Self {
        Self(Arc::from(ty.as_ref()))
    }
}

impl Trigger for EventType {
    fn from_event(event: &CloudEvent) -> Self {
        Self(Arc::from(event.ty.as_str()))
    }
}

impl std::fmt::Display for EventType {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
