//! [Entities](Entity) are opaque identifiers for logical objects.
//!
//! An [Entity] carries no data by itself; [components](crate::components::Component)
//! are attached to it through an [EcsContext](crate::prelude::EcsContext).

mod entity;
mod entity_registry;

pub use entity::*;
pub use entity_registry::*;
