//! Test support: an in-memory log sink and a recording handler.

mod buffer;
mod collector;

pub use buffer::SharedBuffer;
pub use collector::{Collector, Records};
