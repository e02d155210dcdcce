use crate::components::Component;
use crate::entities::Entity;
use nohash_hasher::BuildNoHashHasher;
use std::collections::HashMap;
use std::any::Any;

/// Packed storage for every instance of the [Component] type `T`.
///
/// Values are kept contiguous in `0..len()`: removal moves the last value into the vacated slot.
/// Iteration order is therefore unspecified and changes whenever a value is removed.
pub struct ComponentStore<T: Component> {
	values: Vec<T>,
	entities: Vec<Entity>,
	slots: HashMap<Entity, usize, BuildNoHashHasher<Entity>>,
}

impl<T: Component> ComponentStore<T> {
	pub fn new() -> Self {
		Self {
			values: Vec::new(),
			entities: Vec::new(),
			slots: HashMap::default(),
		}
	}

	/// Attach `value` to `entity`.
	///
	/// # Panics
	/// Panics if `entity` already owns a `T`.
	pub fn insert(&mut self, entity: Entity, value: T) {
		assert!(
			!self.slots.contains_key(&entity),
			"Added duplicate {} component to entity {entity}",
			T::NAME
		);

		self.slots.insert(entity, self.values.len());
		self.entities.push(entity);
		self.values.push(value);
	}

	/// Detach the `T` owned by `entity` and hand it back to the caller.
	///
	/// # Panics
	/// Panics if `entity` does not own a `T`.
	pub fn remove(&mut self, entity: Entity) -> T {
		let slot = match self.slots.remove(&entity) {
			Some(slot) => slot,
			None => panic!("Removing {} component that entity {entity} does not have", T::NAME),
		};

		let value = self.values.swap_remove(slot);
		self.entities.swap_remove(slot);

		// The former last value now lives in `slot`
		if let Some(moved) = self.entities.get(slot) {
			self.slots.insert(*moved, slot);
		}

		value
	}

	/// Get a reference to the `T` owned by `entity`.
	///
	/// # Panics
	/// Panics if `entity` does not own a `T`.
	pub fn get(&self, entity: Entity) -> &T {
		match self.try_get(entity) {
			Some(value) => value,
			None => panic!("Retrieving {} component that entity {entity} does not have", T::NAME),
		}
	}

	/// Get a mutable reference to the `T` owned by `entity`.
	///
	/// # Panics
	/// Panics if `entity` does not own a `T`.
	pub fn get_mut(&mut self, entity: Entity) -> &mut T {
		match self.slots.get(&entity) {
			Some(slot) => &mut self.values[*slot],
			None => panic!("Retrieving {} component that entity {entity} does not have", T::NAME),
		}
	}

	pub fn try_get(&self, entity: Entity) -> Option<&T> {
		self.slots.get(&entity).map(|slot| &self.values[*slot])
	}

	pub fn try_get_mut(&mut self, entity: Entity) -> Option<&mut T> {
		match self.slots.get(&entity) {
			Some(slot) => Some(&mut self.values[*slot]),
			None => None,
		}
	}

	#[inline(always)]
	pub fn has(&self, entity: Entity) -> bool {
		self.slots.contains_key(&entity)
	}

	/// Find the [entity](Entity) owning the given value, if it lives in this store.
	pub fn entity_of(&self, value: &T) -> Option<Entity> {
		self.values.iter().position(|v| std::ptr::eq(v, value)).map(|slot| self.entities[slot])
	}

	pub fn len(&self) -> usize {
		self.values.len()
	}

	pub fn is_empty(&self) -> bool {
		self.values.is_empty()
	}

	/// Iterate over the live values in packing order.
	pub fn iter(&self) -> std::slice::Iter<'_, T> {
		self.values.iter()
	}

	pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
		self.values.iter_mut()
	}

	/// The owning [entities](Entity), slot for slot with [iter](Self::iter).
	pub fn entities(&self) -> &[Entity] {
		&self.entities
	}

	/// Iterate over `(owner, value)` pairs in packing order.
	pub fn iter_with_entities(&self) -> impl Iterator<Item = (Entity, &T)> + '_ {
		self.entities.iter().copied().zip(self.values.iter())
	}

	pub fn iter_with_entities_mut(&mut self) -> impl Iterator<Item = (Entity, &mut T)> + '_ {
		self.entities.iter().copied().zip(self.values.iter_mut())
	}
}

impl<T: Component> Default for ComponentStore<T> {
	fn default() -> Self {
		Self::new()
	}
}

impl<'l, T: Component> IntoIterator for &'l ComponentStore<T> {
	type Item = &'l T;
	type IntoIter = std::slice::Iter<'l, T>;

	fn into_iter(self) -> Self::IntoIter {
		self.iter()
	}
}

/// Type-erased view of a [ComponentStore] used by the [ComponentDirectory](crate::components::ComponentDirectory).
pub(crate) trait AnyComponentStore {
	fn component_name(&self) -> &'static str;

	fn has_entity(&self, entity: Entity) -> bool;

	/// Drops the entity's component if present. Entities without one are ignored.
	fn on_entity_destroyed(&mut self, entity: Entity);

	fn len(&self) -> usize;

	fn as_any(&self) -> &dyn Any;

	fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Component> AnyComponentStore for ComponentStore<T> {
	fn component_name(&self) -> &'static str {
		T::NAME
	}

	fn has_entity(&self, entity: Entity) -> bool {
		self.has(entity)
	}

	fn on_entity_destroyed(&mut self, entity: Entity) {
		if self.has(entity) {
			drop(self.remove(entity));
		}
	}

	fn len(&self) -> usize {
		ComponentStore::len(self)
	}

	fn as_any(&self) -> &dyn Any {
		self
	}

	fn as_any_mut(&mut self) -> &mut dyn Any {
		self
	}
}
