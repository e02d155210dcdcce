use crate::components::ComponentDirectory;
use crate::systems::SystemContext;
use crate::events::EventBus;
use crate::entities::Entity;
use std::any::Any;

/// It provides the logic for modifying the state of [Entities](crate::entities::Entity)
/// and their associated [Components](crate::components::Component).
pub trait System: 'static {
	/// Called once, when the [System] is registered.
	/// Subscriptions to the [EventBus] are usually made here.
	fn setup(&mut self, _events: &EventBus) {}

	/// Called right after `entity` joined this system's entity list.
	fn on_entity_inserted(&mut self, _entity: Entity, _components: &ComponentDirectory) {}

	/// Called right before `entity` leaves this system's entity list.
	/// The entity's components are still attached at this point.
	fn on_entity_removed(&mut self, _entity: Entity, _components: &ComponentDirectory) {}

	/// Executes the system once per frame over its matching entities.
	fn update(&mut self, dt: f32, entities: &[Entity], ctx: &mut SystemContext<'_>);
}

/// Object-safe view of a [System] that still allows downcasting to the concrete type.
pub(crate) trait SystemObject: System {
	fn as_any(&self) -> &dyn Any;

	fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: System> SystemObject for T {
	fn as_any(&self) -> &dyn Any {
		self
	}

	fn as_any_mut(&mut self) -> &mut dyn Any {
		self
	}
}
