//! Cloudfn - CloudEvent function runtime
//!
//! A tiny event-delivery runtime for Tokio: register named functions for
//! event triggers, inject CloudEvents, and the dispatcher routes each
//! delivery to every matching function.
//!
//! See `demos/wqi.rs`.

mod config;
mod context;
mod delivery;
mod error;
mod event;
mod function_id;
mod handler;
mod meta;
mod payload_log;
mod runtime;
mod trigger;

mod internal;

pub mod testing;

pub use config::Config;
pub use context::Context;
pub use delivery::Delivery;
pub use error::Error;
pub use event::CloudEvent;
pub use function_id::FunctionId;
pub use handler::{FnHandler, Handler};
pub use meta::Meta;
pub use payload_log::PayloadLog;
pub use runtime::Runtime;
pub use trigger::{Broadcast, EventType, Trigger};

pub type Result<T = ()> = std::result::Result<T, Error>;
pub type DeliveryId = u128;
