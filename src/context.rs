use crate::components::{Component, ComponentDirectory, ComponentId, ComponentSet, ComponentStore};
use crate::systems::{CommandBuffer, System, SystemContext, SystemRegistry};
use crate::events::{Event, EventBus, SubscriptionId};
use crate::entities::{Entity, EntityRegistry};
use crate::data_structures::ComponentMask;
use crate::config::EcsConfig;

/// A container for [`entities`](Entity), their [`components`](Component) and systems.
///
/// Every structural change goes through this type so that entity masks, component stores
/// and system entity lists never disagree.
pub struct EcsContext {
	entities: EntityRegistry,
	components: ComponentDirectory,
	systems: SystemRegistry,
	events: EventBus,
	commands: CommandBuffer,
}

impl EcsContext {
	pub fn new() -> Self {
		Self::with_config(EcsConfig::default())
	}

	pub fn with_config(config: EcsConfig) -> Self {
		Self {
			entities: EntityRegistry::new(config.max_entities),
			components: ComponentDirectory::new(),
			systems: SystemRegistry::new(),
			events: EventBus::new(),
			commands: CommandBuffer::new(),
		}
	}

	/// Creates a single [entity](Entity) without components.
	pub fn create_entity(&mut self) -> Entity {
		self.entities.create()
	}

	/// Destroys an [entity](Entity) and every component attached to it.
	///
	/// Systems are notified first, while the entity's components are still readable.
	pub fn destroy_entity(&mut self, entity: Entity) {
		assert!(self.entities.is_alive(entity), "Entity {entity} is not alive");
		self.systems.on_entity_destroyed(entity, &self.components);
		self.components.on_entity_destroyed(entity);
		self.entities.destroy(entity);
	}

	pub fn is_alive(&self, entity: Entity) -> bool {
		self.entities.is_alive(entity)
	}

	pub fn entity_count(&self) -> usize {
		self.entities.len()
	}

	pub fn entities(&self) -> &EntityRegistry {
		&self.entities
	}

	pub fn mask(&self, entity: Entity) -> ComponentMask {
		self.entities.mask(entity)
	}

	pub fn register_component<T: Component>(&mut self) -> ComponentId {
		self.components.register::<T>()
	}

	pub fn component_id<T: Component>(&self) -> ComponentId {
		self.components.id_of::<T>()
	}

	/// Combined mask of a tuple of registered component types.
	pub fn mask_of<S: ComponentSet>(&self) -> ComponentMask {
		S::mask(&self.components)
	}

	pub fn components(&self) -> &ComponentDirectory {
		&self.components
	}

	/// Attach `value` to `entity` and update system membership.
	///
	/// # Panics
	/// Panics if `entity` is dead, `T` is unregistered or the entity already owns a `T`.
	pub fn add_component<T: Component>(&mut self, entity: Entity, value: T) {
		let mask = self.entities.mask(entity) | self.components.mask_of::<T>();
		self.components.insert(entity, value);
		self.entities.set_mask(entity, mask);
		self.systems.on_component_mask_changed(entity, mask, &self.components);
	}

	/// Detach the `T` owned by `entity`, update system membership and hand the value back.
	///
	/// Systems that lose the entity observe it with the component still attached. Systems
	/// that gain it observe the reduced mask.
	pub fn remove_component<T: Component>(&mut self, entity: Entity) -> T {
		assert!(
			self.components.has::<T>(entity),
			"Removing {} component that entity {entity} does not have",
			T::NAME
		);

		let mask = self.entities.mask(entity).without(self.components.id_of::<T>().index());
		self.systems.release_unmatched(entity, mask, &self.components);
		let value = self.components.remove::<T>(entity);
		self.entities.set_mask(entity, mask);
		self.systems.enrol_matched(entity, mask, &self.components);
		value
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

	/// Add a new [system](System) to the [EcsContext] and run its setup.
	pub fn register_system<T: System>(&mut self, system: T) -> &mut T {
		let system = self.systems.register(system);
		system.setup(&self.events);
		system
	}

	pub fn register_default_system<T: System + Default>(&mut self) -> &mut T {
		self.register_system(T::default())
	}

	/// Set the interest mask of `T` and enrol the live entities that already match it.
	pub fn set_system_mask<T: System>(&mut self, mask: ComponentMask) {
		self.systems.set_interest_mask::<T>(mask);
		self.reconcile_all();
	}

	/// Let `T` accept entities whose mask merely overlaps its own.
	pub fn accept_subset<T: System>(&mut self, accepts_subset: bool) {
		self.systems.set_accepts_subset::<T>(accepts_subset);
		self.reconcile_all();
	}

	pub fn system<T: System>(&self) -> &T {
		self.systems.get()
	}

	pub fn system_mut<T: System>(&mut self) -> &mut T {
		self.systems.get_mut()
	}

	pub fn system_entities<T: System>(&self) -> &[Entity] {
		self.systems.entities_of::<T>()
	}

	pub fn events(&self) -> &EventBus {
		&self.events
	}

	pub fn subscribe<E: Event>(&self, callback: impl FnMut(&E) + 'static) -> SubscriptionId {
		self.events.subscribe(callback)
	}

	pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
		self.events.unsubscribe(id)
	}

	pub fn notify<E: Event>(&self, event: &E) {
		self.events.notify(event)
	}

	/// Commands recorded outside of a system run, applied at the end of the next [run_systems](Self::run_systems).
	pub fn commands(&mut self) -> &mut CommandBuffer {
		&mut self.commands
	}

	/// Execute all [systems](System), then apply the structural changes they recorded.
	pub fn run_systems(&mut self, dt: f32) {
		let mut ctx = SystemContext::new(&self.entities, &mut self.components, &self.events, &mut self.commands);
		self.systems.update_all(dt, &mut ctx);
		self.apply_commands();
	}

	/// Execute a single [system](System), then apply the structural changes it recorded.
	pub fn run_system<T: System>(&mut self, dt: f32) {
		let mut ctx = SystemContext::new(&self.entities, &mut self.components, &self.events, &mut self.commands);
		self.systems.update::<T>(dt, &mut ctx);
		self.apply_commands();
	}

	fn apply_commands(&mut self) {
		for command in self.commands.take() {
			command.apply(self);
		}
	}

	fn reconcile_all(&mut self) {
		for entity in self.entities.iter() {
			let mask = self.entities.mask(entity);
			self.systems.on_component_mask_changed(entity, mask, &self.components);
		}
	}
}

impl Default for EcsContext {
	fn default() -> Self {
		Self::new()
	}
}
