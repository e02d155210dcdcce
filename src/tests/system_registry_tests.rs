use crate::components::{Component, ComponentDirectory};
use crate::systems::{System, SystemContext, SystemRegistry};
use crate::data_structures::ComponentMask;
use crate::entities::Entity;

#[derive(Component)]
struct Marker;

#[derive(Default)]
struct Recorder {
	inserted: Vec<Entity>,
	removed: Vec<(Entity, bool)>,
}

impl System for Recorder {
	fn on_entity_inserted(&mut self, entity: Entity, _components: &ComponentDirectory) {
		self.inserted.push(entity);
	}

	fn on_entity_removed(&mut self, entity: Entity, components: &ComponentDirectory) {
		self.removed.push((entity, components.has::<Marker>(entity)));
	}

	fn update(&mut self, _dt: f32, _entities: &[Entity], _ctx: &mut SystemContext<'_>) {}
}

#[derive(Default)]
struct Other;

impl System for Other {
	fn update(&mut self, _dt: f32, _entities: &[Entity], _ctx: &mut SystemContext<'_>) {}
}

fn directory() -> ComponentDirectory {
	let mut directory = ComponentDirectory::new();
	directory.register::<Marker>();
	directory
}

const A: ComponentMask = ComponentMask::from_bits(0b001);
const B: ComponentMask = ComponentMask::from_bits(0b010);
const AB: ComponentMask = ComponentMask::from_bits(0b011);

#[test]
pub fn exact_matching_requires_equal_masks() {
	let components = directory();
	let mut systems = SystemRegistry::new();
	systems.register(Recorder::default());
	systems.set_interest_mask::<Recorder>(AB);

	let e = Entity::from_raw(0);
	systems.on_component_mask_changed(e, A, &components);
	assert!(systems.entities_of::<Recorder>().is_empty());

	systems.on_component_mask_changed(e, AB, &components);
	assert_eq!(systems.entities_of::<Recorder>(), &[e]);

	systems.on_component_mask_changed(e, AB.with(2), &components);
	assert!(systems.entities_of::<Recorder>().is_empty());
	assert_eq!(systems.get::<Recorder>().inserted, vec![e]);
	assert_eq!(systems.get::<Recorder>().removed.len(), 1);
}

#[test]
pub fn subset_matching_requires_any_overlap() {
	let components = directory();
	let mut systems = SystemRegistry::new();
	systems.register(Recorder::default());
	systems.set_interest_mask::<Recorder>(AB);
	systems.set_accepts_subset::<Recorder>(true);

	let e = Entity::from_raw(0);
	let f = Entity::from_raw(1);
	systems.on_component_mask_changed(e, B, &components);
	systems.on_component_mask_changed(f, ComponentMask::bit(5), &components);
	assert_eq!(systems.entities_of::<Recorder>(), &[e]);

	// Still overlapping, no duplicate insertion
	systems.on_component_mask_changed(e, AB, &components);
	assert_eq!(systems.get::<Recorder>().inserted, vec![e]);

	systems.on_component_mask_changed(e, ComponentMask::EMPTY, &components);
	assert!(systems.entities_of::<Recorder>().is_empty());
}

#[test]
pub fn systems_without_a_mask_match_nothing() {
	let components = directory();
	let mut systems = SystemRegistry::new();
	systems.register(Recorder::default());

	systems.on_component_mask_changed(Entity::from_raw(0), ComponentMask::EMPTY, &components);
	systems.on_component_mask_changed(Entity::from_raw(1), A, &components);
	assert!(systems.entities_of::<Recorder>().is_empty());
}

#[test]
pub fn removal_keeps_join_order() {
	let components = directory();
	let mut systems = SystemRegistry::new();
	systems.register(Recorder::default());
	systems.set_interest_mask::<Recorder>(A);

	let entities: Vec<_> = (0..4).map(Entity::from_raw).collect();
	for e in &entities {
		systems.on_component_mask_changed(*e, A, &components);
	}
	systems.on_component_mask_changed(entities[1], ComponentMask::EMPTY, &components);

	assert_eq!(systems.entities_of::<Recorder>(), &[entities[0], entities[2], entities[3]]);
}

#[test]
pub fn destruction_removes_regardless_of_mask() {
	let mut components = directory();
	let mut systems = SystemRegistry::new();
	systems.register(Recorder::default());
	systems.register(Other);
	systems.set_interest_mask::<Recorder>(A);
	systems.set_interest_mask::<Other>(A);

	let e = Entity::from_raw(3);
	components.insert(e, Marker);
	systems.on_component_mask_changed(e, A, &components);
	systems.on_entity_destroyed(e, &components);

	assert!(systems.entities_of::<Recorder>().is_empty());
	assert!(systems.entities_of::<Other>().is_empty());
	assert_eq!(systems.get::<Recorder>().removed, vec![(e, true)]);
}

#[test]
#[should_panic(expected = "was already added to the current context")]
pub fn duplicate_registration_panics() {
	let mut systems = SystemRegistry::new();
	systems.register(Other);
	systems.register(Other);
}

#[test]
#[should_panic(expected = "not registered")]
pub fn mask_for_unregistered_system_panics() {
	let mut systems = SystemRegistry::new();
	systems.set_interest_mask::<Other>(A);
}

#[test]
#[should_panic(expected = "was already set")]
pub fn setting_the_mask_twice_panics() {
	let mut systems = SystemRegistry::new();
	systems.register(Other);
	systems.set_interest_mask::<Other>(A);
	systems.set_interest_mask::<Other>(B);
}
