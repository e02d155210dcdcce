use crate::components::{Component, ComponentDirectory, ComponentStore};
use crate::entities::{Entity, EntityRegistry};
use crate::data_structures::ComponentMask;
use crate::systems::CommandBuffer;
use crate::events::{Event, EventBus};

/// What a [System](crate::systems::System) may touch while it runs.
///
/// Component values can be read and written in place, but structural changes
/// (destroying entities, attaching or detaching components) must go through the
/// [CommandBuffer] and take effect once every system has run.
pub struct SystemContext<'a> {
	entities: &'a EntityRegistry,
	components: &'a mut ComponentDirectory,
	events: &'a EventBus,
	commands: &'a mut CommandBuffer,
}

impl<'a> SystemContext<'a> {
	pub(crate) fn new(
		entities: &'a EntityRegistry, components: &'a mut ComponentDirectory, events: &'a EventBus,
		commands: &'a mut CommandBuffer,
	) -> Self {
		Self {
			entities,
			components,
			events,
			commands,
		}
	}

	pub fn is_alive(&self, entity: Entity) -> bool {
		self.entities.is_alive(entity)
	}

	pub fn mask(&self, entity: Entity) -> ComponentMask {
		self.entities.mask(entity)
	}

	pub fn components(&self) -> &ComponentDirectory {
		self.components
	}

	pub fn get<T: Component>(&self, entity: Entity) -> &T {
		self.components.get(entity)
	}

	pub fn get_mut<T: Component>(&mut self, entity: Entity) -> &mut T {
		self.components.get_mut(entity)
	}

	pub fn try_get<T: Component>(&self, entity: Entity) -> Option<&T> {
		self.components.try_get(entity)
	}

	pub fn try_get_mut<T: Component>(&mut self, entity: Entity) -> Option<&mut T> {
		self.components.try_get_mut(entity)
	}

	pub fn has<T: Component>(&self, entity: Entity) -> bool {
		self.components.has::<T>(entity)
	}

	pub fn store<T: Component>(&self) -> &ComponentStore<T> {
		self.components.store()
	}

	pub fn try_store<T: Component>(&self) -> Option<&ComponentStore<T>> {
		self.components.try_store()
	}

	pub fn store_mut<T: Component>(&mut self) -> &mut ComponentStore<T> {
		self.components.store_mut()
	}

	pub fn events(&self) -> &EventBus {
		self.events
	}

	#[inline(always)]
	pub fn notify<E: Event>(&self, event: &E) {
		self.events.notify(event)
	}

	/// Structural changes recorded here are applied after the current frame's systems.
	pub fn commands(&mut self) -> &mut CommandBuffer {
		self.commands
	}
}
