extern crate self as kuai_ecs;

#[macro_use]
mod macros;

pub mod data_structures;
pub mod components;
pub mod entities;
pub mod systems;
pub mod events;
pub mod render;
pub mod scene;
pub mod audio;
pub mod assets;
pub mod config;
pub mod app;
pub mod context;

pub use nalgebra_glm as glm;

pub mod prelude {
	pub use crate::systems::{CommandBuffer, System, SystemContext};
	pub use crate::components::{Component, ComponentSet, ComponentStore};
	pub use crate::events::{Event, EventBus, SubscriptionId};
	pub use crate::data_structures::ComponentMask;
	pub use crate::config::{AppConfig, EcsConfig};
	pub use crate::app::{App, AppHandler, Platform, PlatformEvent, WindowClosed, WindowResized};
	pub use crate::context::EcsContext;
	pub use crate::entities::Entity;
	pub use crate::scene::*;
}

#[cfg(test)]
mod tests;
