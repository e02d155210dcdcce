use crate::components::{AnyComponentStore, Component, ComponentId, ComponentStore};
use crate::data_structures::{ComponentMask, MAX_COMPONENTS};
use crate::entities::Entity;
use std::hash::BuildHasherDefault;
use nohash_hasher::NoHashHasher;
use std::collections::HashMap;
use std::any::TypeId;
use log::info;

type Hasher = BuildHasherDefault<NoHashHasher<u64>>;

/// Routes typed component operations to the [ComponentStore] of each registered type.
///
/// Registration assigns each type the next free bit, starting at 0.
/// That mapping is the single source of truth for [ComponentMask] deltas.
#[derive(Default)]
pub struct ComponentDirectory {
	ids: HashMap<TypeId, ComponentId, Hasher>,
	stores: Vec<Box<dyn AnyComponentStore>>,
}

impl ComponentDirectory {
	pub fn new() -> Self {
		Self::default()
	}

	/// Register the [Component] type `T` and create its store.
	///
	/// # Panics
	/// Panics if `T` is already registered or if [MAX_COMPONENTS] types are already registered.
	pub fn register<T: Component>(&mut self) -> ComponentId {
		let key = TypeId::of::<T>();
		assert!(
			!self.ids.contains_key(&key),
			"Registering component type {} more than once",
			T::NAME
		);
		assert!(
			self.stores.len() < MAX_COMPONENTS,
			"Cannot register {}: at most {MAX_COMPONENTS} component types are supported",
			T::NAME
		);

		let id = ComponentId::new(self.stores.len());
		self.ids.insert(key, id);
		self.stores.push(Box::new(ComponentStore::<T>::new()));

		info!("registered component {} as bit {}", T::NAME, id.index());
		id
	}

	pub fn is_registered<T: Component>(&self) -> bool {
		self.ids.contains_key(&TypeId::of::<T>())
	}

	/// Number of registered component types.
	pub fn len(&self) -> usize {
		self.stores.len()
	}

	pub fn is_empty(&self) -> bool {
		self.stores.is_empty()
	}

	/// # Panics
	/// Panics if `T` is not registered.
	pub fn id_of<T: Component>(&self) -> ComponentId {
		match self.try_id_of::<T>() {
			Some(id) => id,
			None => panic!("Component {} not registered", T::NAME),
		}
	}

	pub fn try_id_of<T: Component>(&self) -> Option<ComponentId> {
		self.ids.get(&TypeId::of::<T>()).copied()
	}

	/// A mask with only the bit of `T` set.
	pub fn mask_of<T: Component>(&self) -> ComponentMask {
		self.id_of::<T>().mask()
	}

	/// The packed store holding every `T`.
	pub fn store<T: Component>(&self) -> &ComponentStore<T> {
		let id = self.id_of::<T>();
		match self.stores[id.index()].as_any().downcast_ref::<ComponentStore<T>>() {
			Some(store) => store,
			None => unreachable!("store of {} has the wrong type", T::NAME),
		}
	}

	pub fn store_mut<T: Component>(&mut self) -> &mut ComponentStore<T> {
		let id = self.id_of::<T>();
		match self.stores[id.index()].as_any_mut().downcast_mut::<ComponentStore<T>>() {
			Some(store) => store,
			None => unreachable!("store of {} has the wrong type", T::NAME),
		}
	}

	/// Like [store](Self::store), but returns `None` for unregistered types.
	pub fn try_store<T: Component>(&self) -> Option<&ComponentStore<T>> {
		let id = self.try_id_of::<T>()?;
		self.stores[id.index()].as_any().downcast_ref::<ComponentStore<T>>()
	}

	pub fn insert<T: Component>(&mut self, entity: Entity, value: T) {
		self.store_mut::<T>().insert(entity, value)
	}

	pub fn remove<T: Component>(&mut self, entity: Entity) -> T {
		self.store_mut::<T>().remove(entity)
	}

	pub fn get<T: Component>(&self, entity: Entity) -> &T {
		self.store::<T>().get(entity)
	}

	pub fn get_mut<T: Component>(&mut self, entity: Entity) -> &mut T {
		self.store_mut::<T>().get_mut(entity)
	}

	/// Returns `None` when `T` is unregistered or `entity` does not own one.
	pub fn try_get<T: Component>(&self, entity: Entity) -> Option<&T> {
		self.try_store::<T>()?.try_get(entity)
	}

	pub fn try_get_mut<T: Component>(&mut self, entity: Entity) -> Option<&mut T> {
		let id = self.try_id_of::<T>()?;
		self.stores[id.index()].as_any_mut().downcast_mut::<ComponentStore<T>>()?.try_get_mut(entity)
	}

	pub fn has<T: Component>(&self, entity: Entity) -> bool {
		self.store::<T>().has(entity)
	}

	/// The mask of every registered component `entity` currently owns, recomputed from the stores.
	pub fn mask_for(&self, entity: Entity) -> ComponentMask {
		self.stores
			.iter()
			.enumerate()
			.filter(|(_, store)| store.has_entity(entity))
			.fold(ComponentMask::EMPTY, |mask, (bit, _)| mask.with(bit))
	}

	/// Names of the registered component types in bit order.
	pub fn component_names(&self) -> impl Iterator<Item = &'static str> + '_ {
		self.stores.iter().map(|store| store.component_name())
	}

	/// Number of values in the store for bit `index`.
	pub fn store_len(&self, id: ComponentId) -> usize {
		self.stores[id.index()].len()
	}

	/// Drop whatever components `entity` owns, in every store.
	pub fn on_entity_destroyed(&mut self, entity: Entity) {
		for store in self.stores.iter_mut() {
			store.on_entity_destroyed(entity);
		}
	}
}
