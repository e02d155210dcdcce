//! Typed publish/subscribe channel used by systems to notify each other without direct calls.

mod event_bus;

pub use event_bus::*;
