//! [Systems](System) provide the logic for modifying the state of [Entities](crate::entities::Entity)
//! and their associated [Components](crate::components::Component).
//!
//! A [System] must be manually added to an [EcsContext](crate::context::EcsContext)
//! for it to become active during the execution of the program.
//! Each system declares an interest [mask](crate::data_structures::ComponentMask) and is handed
//! the list of entities currently matching it every frame.

mod commands;
mod system;
mod system_context;
mod system_registry;

pub use commands::*;
pub use system::*;
pub use system_context::*;
pub use system_registry::*;
