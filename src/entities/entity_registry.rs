use crate::data_structures::{BitField, ComponentMask};
use crate::entities::Entity;
use log::trace;

/// Owns entity identity, liveness and the per-entity [ComponentMask].
///
/// Ids are handed out from a recycling free list, smallest first on a fresh registry.
/// The number of simultaneously live entities never exceeds the configured maximum.
pub struct EntityRegistry {
	max_entities: usize,
	available: Vec<Entity>,
	alive: BitField,
	masks: Vec<ComponentMask>,
}

impl EntityRegistry {
	/// Create a new [EntityRegistry] able to hold `max_entities` live entities.
	pub fn new(max_entities: usize) -> Self {
		assert!(max_entities > 0, "An entity registry needs room for at least one entity");
		assert!(max_entities <= u32::MAX as usize, "Entity ids are 32 bits wide");

		Self {
			max_entities,
			available: (0..max_entities as u32).rev().map(Entity::from_raw).collect(),
			alive: BitField::with_capacity(max_entities),
			masks: vec![ComponentMask::EMPTY; max_entities],
		}
	}

	/// Creates a single [entity](Entity) with an empty [ComponentMask].
	///
	/// # Panics
	/// Panics if the maximum number of live entities has already been reached.
	pub fn create(&mut self) -> Entity {
		assert!(
			self.len() < self.max_entities,
			"Exceeded maximum number of entities ({})",
			self.max_entities
		);

		let entity = match self.available.pop() {
			Some(entity) => entity,
			None => unreachable!("free list is empty although the registry is not full"),
		};

		self.masks[entity.index()] = ComponentMask::EMPTY;
		self.alive.set(entity.index(), true);
		trace!("created entity {entity}");
		entity
	}

	/// Returns the [entity](Entity) to the free list.
	///
	/// Systems and component stores must have been notified before this call.
	///
	/// # Panics
	/// Panics if the [entity](Entity) is not alive.
	pub fn destroy(&mut self, entity: Entity) {
		self.assert_alive(entity);

		self.masks[entity.index()] = ComponentMask::EMPTY;
		self.alive.set(entity.index(), false);
		self.available.push(entity);
		trace!("destroyed entity {entity}");
	}

	pub fn is_alive(&self, entity: Entity) -> bool {
		entity.index() < self.max_entities && self.alive.get(entity.index())
	}

	/// Get the [ComponentMask] of a live [entity](Entity).
	pub fn mask(&self, entity: Entity) -> ComponentMask {
		self.assert_alive(entity);
		self.masks[entity.index()]
	}

	/// Overwrite the [ComponentMask] of a live [entity](Entity).
	/// Only the component layer should call this, in lockstep with its stores.
	pub(crate) fn set_mask(&mut self, entity: Entity, mask: ComponentMask) {
		self.assert_alive(entity);
		self.masks[entity.index()] = mask;
	}

	/// Number of live entities.
	pub fn len(&self) -> usize {
		self.max_entities - self.available.len()
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	/// Maximum number of simultaneously live entities.
	pub fn capacity(&self) -> usize {
		self.max_entities
	}

	/// Iterate over all live entities in ascending id order.
	pub fn iter(&self) -> impl Iterator<Item = Entity> + '_ {
		self.alive.iter_ones().map(|i| Entity::from_raw(i as u32))
	}

	#[inline(always)]
	fn assert_alive(&self, entity: Entity) {
		assert!(self.is_alive(entity), "Entity {entity} is not alive");
	}
}
