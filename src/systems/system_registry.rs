use crate::systems::{System, SystemContext, SystemObject};
use crate::components::ComponentDirectory;
use crate::data_structures::ComponentMask;
use std::hash::BuildHasherDefault;
use nohash_hasher::NoHashHasher;
use crate::entities::Entity;
use std::collections::HashMap;
use std::any::TypeId;
use log::info;

type Hasher = BuildHasherDefault<NoHashHasher<u64>>;

struct SystemEntry {
	name: &'static str,
	system: Box<dyn SystemObject>,
	interest: Option<ComponentMask>,
	accepts_subset: bool,
	entities: Vec<Entity>,
}

impl SystemEntry {
	#[inline(always)]
	fn matches(&self, mask: ComponentMask) -> bool {
		match self.interest {
			None => false,
			Some(interest) if self.accepts_subset => mask.intersects(interest),
			Some(interest) => mask == interest,
		}
	}
}

/// Owns every registered [System] and keeps each one's entity list in sync with component masks.
///
/// Systems run in registration order.
#[derive(Default)]
pub struct SystemRegistry {
	indices: HashMap<TypeId, usize, Hasher>,
	entries: Vec<SystemEntry>,
}

impl SystemRegistry {
	pub fn new() -> Self {
		Self::default()
	}

	/// Store `system`. It has no interest mask and therefore matches nothing until one is set.
	///
	/// # Panics
	/// Panics if a system of type `T` was already registered.
	pub fn register<T: System>(&mut self, system: T) -> &mut T {
		let name = std::any::type_name::<T>();
		assert!(
			!self.indices.contains_key(&TypeId::of::<T>()),
			"System {name} was already added to the current context"
		);

		let index = self.entries.len();
		self.indices.insert(TypeId::of::<T>(), index);
		self.entries.push(SystemEntry {
			name,
			system: Box::new(system),
			interest: None,
			accepts_subset: false,
			entities: Vec::new(),
		});

		info!("registered system {name}");
		self.downcast_mut::<T>(index)
	}

	pub fn contains<T: System>(&self) -> bool {
		self.indices.contains_key(&TypeId::of::<T>())
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Declare the component combination `T` operates on.
	///
	/// # Panics
	/// Panics if `T` is not registered or its mask was already set.
	pub fn set_interest_mask<T: System>(&mut self, mask: ComponentMask) {
		let entry = self.entry_mut::<T>();
		assert!(entry.interest.is_none(), "Interest mask of system {} was already set", entry.name);
		entry.interest = Some(mask);
	}

	/// Switch `T` between exact mask equality (the default) and any-overlap matching.
	pub fn set_accepts_subset<T: System>(&mut self, accepts_subset: bool) {
		self.entry_mut::<T>().accepts_subset = accepts_subset;
	}

	pub fn interest_mask<T: System>(&self) -> Option<ComponentMask> {
		self.entry::<T>().interest
	}

	pub fn accepts_subset<T: System>(&self) -> bool {
		self.entry::<T>().accepts_subset
	}

	pub fn get<T: System>(&self) -> &T {
		let index = self.index_of::<T>();
		match self.entries[index].system.as_any().downcast_ref::<T>() {
			Some(system) => system,
			None => unreachable!("system index points at a different type"),
		}
	}

	pub fn get_mut<T: System>(&mut self) -> &mut T {
		let index = self.index_of::<T>();
		self.downcast_mut::<T>(index)
	}

	/// The entities `T` currently operates on, in the order they joined.
	pub fn entities_of<T: System>(&self) -> &[Entity] {
		&self.entry::<T>().entities
	}

	/// Re-evaluate every system's membership of `entity` against its new `mask`.
	///
	/// Removals run before insertions, so no system holds the entity twice in one pass.
	pub fn on_component_mask_changed(
		&mut self, entity: Entity, mask: ComponentMask, components: &ComponentDirectory,
	) {
		self.release_unmatched(entity, mask, components);
		self.enrol_matched(entity, mask, components);
	}

	/// Drop `entity` from every system that no longer matches `mask`.
	///
	/// `components` must still hold whatever is being detached, so that removal hooks can read it.
	pub fn release_unmatched(&mut self, entity: Entity, mask: ComponentMask, components: &ComponentDirectory) {
		for entry in self.entries.iter_mut() {
			if entry.matches(mask) {
				continue;
			}
			if let Some(index) = entry.entities.iter().position(|e| *e == entity) {
				entry.system.on_entity_removed(entity, components);
				entry.entities.remove(index);
			}
		}
	}

	/// Add `entity` to every system that matches `mask` and does not hold it yet.
	///
	/// `components` must already reflect `mask`.
	pub fn enrol_matched(&mut self, entity: Entity, mask: ComponentMask, components: &ComponentDirectory) {
		for entry in self.entries.iter_mut() {
			if entry.matches(mask) && !entry.entities.contains(&entity) {
				entry.entities.push(entity);
				entry.system.on_entity_inserted(entity, components);
			}
		}
	}

	/// Drop `entity` from every system, whatever its mask says.
	pub fn on_entity_destroyed(&mut self, entity: Entity, components: &ComponentDirectory) {
		for entry in self.entries.iter_mut() {
			if let Some(index) = entry.entities.iter().position(|e| *e == entity) {
				entry.system.on_entity_removed(entity, components);
				entry.entities.remove(index);
			}
		}
	}

	/// Execute all [systems](System) in registration order.
	pub fn update_all(&mut self, dt: f32, ctx: &mut SystemContext<'_>) {
		for entry in self.entries.iter_mut() {
			entry.system.update(dt, &entry.entities, ctx);
		}
	}

	/// Execute a single [system](System).
	pub fn update<T: System>(&mut self, dt: f32, ctx: &mut SystemContext<'_>) {
		let index = self.index_of::<T>();
		let entry = &mut self.entries[index];
		entry.system.update(dt, &entry.entities, ctx);
	}

	fn index_of<T: System>(&self) -> usize {
		match self.indices.get(&TypeId::of::<T>()) {
			Some(index) => *index,
			None => panic!("System {} not registered", std::any::type_name::<T>()),
		}
	}

	fn entry<T: System>(&self) -> &SystemEntry {
		&self.entries[self.index_of::<T>()]
	}

	fn entry_mut<T: System>(&mut self) -> &mut SystemEntry {
		let index = self.index_of::<T>();
		&mut self.entries[index]
	}

	fn downcast_mut<T: System>(&mut self, index: usize) -> &mut T {
		match self.entries[index].system.as_any_mut().downcast_mut::<T>() {
			Some(system) => system,
			None => unreachable!("system index points at a different type"),
		}
	}
}
