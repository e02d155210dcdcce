use crate::components::{Component, ComponentDirectory};
use crate::systems::{System, SystemContext};
use crate::config::EcsConfig;
use crate::context::EcsContext;
use crate::entities::Entity;
use rand::prelude::SliceRandom;
use rand::{thread_rng, Rng};
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Component, Debug, Default, PartialEq)]
struct Position(i32);

#[derive(Component, Debug, Default, PartialEq)]
struct Velocity(i32);

#[derive(Component, Debug, Default, PartialEq)]
struct Frozen;

/// Moves every entity by its velocity and shares what its hooks observed.
#[derive(Default)]
struct Movement {
	log: Rc<RefCell<Vec<String>>>,
}

impl System for Movement {
	fn on_entity_inserted(&mut self, entity: Entity, _components: &ComponentDirectory) {
		self.log.borrow_mut().push(format!("insert {entity}"));
	}

	fn on_entity_removed(&mut self, entity: Entity, components: &ComponentDirectory) {
		let position = components.try_get::<Position>(entity).map(|p| p.0);
		self.log.borrow_mut().push(format!("remove {entity} at {position:?}"));
	}

	fn update(&mut self, _dt: f32, entities: &[Entity], ctx: &mut SystemContext<'_>) {
		for entity in entities.iter().copied() {
			let velocity = ctx.get::<Velocity>(entity).0;
			ctx.get_mut::<Position>(entity).0 += velocity;
		}
	}
}

/// Freezes, then destroys, entities that went past a limit.
struct Reaper {
	limit: i32,
}

impl System for Reaper {
	fn update(&mut self, _dt: f32, entities: &[Entity], ctx: &mut SystemContext<'_>) {
		for entity in entities.iter().copied() {
			if ctx.get::<Position>(entity).0 <= self.limit {
				continue;
			}

			if ctx.has::<Frozen>(entity) {
				ctx.commands().destroy_entity(entity);
			} else {
				ctx.commands().add_component(entity, Frozen);
				ctx.commands().remove_component::<Velocity>(entity);
			}
		}
	}
}

/// Tracks entities that carry nothing but a velocity.
#[derive(Default)]
struct Drifting {
	saw_position: Rc<RefCell<Vec<bool>>>,
}

impl System for Drifting {
	fn on_entity_inserted(&mut self, entity: Entity, components: &ComponentDirectory) {
		self.saw_position.borrow_mut().push(components.has::<Position>(entity));
	}

	fn update(&mut self, _dt: f32, _entities: &[Entity], _ctx: &mut SystemContext<'_>) {}
}

fn context() -> EcsContext {
	let mut ecs = EcsContext::with_config(EcsConfig::default().with_max_entities(128));
	ecs.register_component::<Position>();
	ecs.register_component::<Velocity>();
	ecs.register_component::<Frozen>();
	ecs
}

fn movement(ecs: &mut EcsContext) -> Rc<RefCell<Vec<String>>> {
	let log = ecs.register_default_system::<Movement>().log.clone();
	ecs.set_system_mask::<Movement>(ecs.mask_of::<(Position, Velocity)>());
	log
}

#[test]
pub fn mask_tracks_attachments() {
	let mut ecs = context();
	let entity = ecs.create_entity();

	ecs.add_component(entity, Position(1));
	ecs.add_component(entity, Velocity(2));
	assert_eq!(ecs.mask(entity), ecs.mask_of::<(Position, Velocity)>());

	assert_eq!(ecs.remove_component::<Position>(entity), Position(1));
	assert_eq!(ecs.mask(entity), ecs.mask_of::<(Velocity,)>());
	assert!(!ecs.has::<Position>(entity));
	assert!(ecs.has::<Velocity>(entity));
}

#[test]
pub fn systems_follow_attach_and_detach() {
	let mut ecs = context();
	let log = movement(&mut ecs);
	let entity = ecs.create_entity();

	ecs.add_component(entity, Position(0));
	assert!(ecs.system_entities::<Movement>().is_empty());

	ecs.add_component(entity, Velocity(1));
	assert_eq!(ecs.system_entities::<Movement>(), &[entity]);

	ecs.remove_component::<Position>(entity);
	assert!(ecs.system_entities::<Movement>().is_empty());
	assert_eq!(*log.borrow(), vec![format!("insert {entity}"), format!("remove {entity} at Some(0)")]);
}

#[test]
pub fn systems_gained_by_a_detach_see_it_completed() {
	let mut ecs = context();
	let log = movement(&mut ecs);
	let saw_position = ecs.register_default_system::<Drifting>().saw_position.clone();
	ecs.set_system_mask::<Drifting>(ecs.mask_of::<(Velocity,)>());

	let entity = ecs.create_entity();
	ecs.add_component(entity, Position(3));
	ecs.add_component(entity, Velocity(1));
	ecs.remove_component::<Position>(entity);

	assert_eq!(*saw_position.borrow(), vec![false]);
	assert_eq!(ecs.system_entities::<Drifting>(), &[entity]);
	assert!(ecs.system_entities::<Movement>().is_empty());
	assert_eq!(log.borrow().last().cloned(), Some(format!("remove {entity} at Some(3)")));
}

#[test]
pub fn systems_see_components_while_the_entity_is_destroyed() {
	let mut ecs = context();
	let log = movement(&mut ecs);
	let entity = ecs.create_entity();
	ecs.add_component(entity, Position(42));
	ecs.add_component(entity, Velocity(1));

	ecs.destroy_entity(entity);

	assert!(!ecs.is_alive(entity));
	assert!(ecs.system_entities::<Movement>().is_empty());
	assert_eq!(ecs.store::<Position>().len(), 0);
	assert_eq!(log.borrow().last().cloned(), Some(format!("remove {entity} at Some(42)")));
}

#[test]
pub fn late_masks_enrol_existing_entities() {
	let mut ecs = context();
	let entity = ecs.create_entity();
	ecs.add_component(entity, Position(0));
	ecs.add_component(entity, Velocity(0));

	movement(&mut ecs);
	assert_eq!(ecs.system_entities::<Movement>(), &[entity]);
}

#[test]
pub fn run_systems_updates_components() {
	let mut ecs = context();
	movement(&mut ecs);
	let entity = ecs.create_entity();
	ecs.add_component(entity, Position(0));
	ecs.add_component(entity, Velocity(3));

	ecs.run_systems(0.016);
	ecs.run_systems(0.016);
	assert_eq!(ecs.get::<Position>(entity), &Position(6));
}

#[test]
pub fn structural_changes_are_deferred_until_systems_ran() {
	let mut ecs = context();
	movement(&mut ecs);
	ecs.register_system(Reaper { limit: 1 });
	ecs.set_system_mask::<Reaper>(ecs.mask_of::<(Position,)>());
	ecs.accept_subset::<Reaper>(true);

	let entity = ecs.create_entity();
	ecs.add_component(entity, Position(0));
	ecs.add_component(entity, Velocity(2));

	ecs.run_systems(1.0);
	assert_eq!(ecs.get::<Position>(entity), &Position(2));
	assert!(ecs.has::<Frozen>(entity));
	assert!(!ecs.has::<Velocity>(entity));
	assert!(ecs.system_entities::<Movement>().is_empty());

	ecs.run_systems(1.0);
	assert!(!ecs.is_alive(entity));
	assert_eq!(ecs.store::<Position>().len(), 0);
	assert!(ecs.commands().is_empty());
}

#[test]
pub fn commands_for_dead_entities_are_skipped() {
	let mut ecs = context();
	let entity = ecs.create_entity();

	ecs.commands().add_component(entity, Position(1));
	ecs.commands().destroy_entity(entity);
	ecs.commands().remove_component::<Position>(entity);
	ecs.commands().destroy_entity(entity);
	ecs.run_systems(0.0);

	assert!(!ecs.is_alive(entity));
	assert_eq!(ecs.entity_count(), 0);
}

#[test]
#[should_panic(expected = "Added duplicate Position component to entity #0")]
pub fn attaching_twice_panics() {
	let mut ecs = context();
	let entity = ecs.create_entity();
	ecs.add_component(entity, Position(0));
	ecs.add_component(entity, Position(1));
}

#[test]
#[should_panic(expected = "Retrieving Position component that entity #0 does not have")]
pub fn getting_a_missing_component_panics() {
	let mut ecs = context();
	let entity = ecs.create_entity();
	ecs.get::<Position>(entity);
}

#[test]
#[should_panic(expected = "is not alive")]
pub fn attaching_to_a_dead_entity_panics() {
	let mut ecs = context();
	let entity = ecs.create_entity();
	ecs.destroy_entity(entity);
	ecs.add_component(entity, Position(0));
}

#[test]
pub fn random_churn_keeps_has_mask_and_membership_in_sync() {
	let mut rng = thread_rng();
	let mut ecs = context();
	movement(&mut ecs);
	let mut live: Vec<Entity> = Vec::new();

	for _ in 0..3000 {
		match rng.gen_range(0..4) {
			0 if live.len() < 128 => live.push(ecs.create_entity()),
			1 if !live.is_empty() => {
				live.shuffle(&mut rng);
				let entity = live.pop().unwrap();
				ecs.destroy_entity(entity);
			},
			2 if !live.is_empty() => {
				let entity = *live.choose(&mut rng).unwrap();
				match ecs.has::<Position>(entity) {
					true => drop(ecs.remove_component::<Position>(entity)),
					false => ecs.add_component(entity, Position(0)),
				}
			},
			3 if !live.is_empty() => {
				let entity = *live.choose(&mut rng).unwrap();
				match ecs.has::<Velocity>(entity) {
					true => drop(ecs.remove_component::<Velocity>(entity)),
					false => ecs.add_component(entity, Velocity(0)),
				}
			},
			_ => {},
		}
	}

	let position = ecs.component_id::<Position>().index();
	let velocity = ecs.component_id::<Velocity>().index();
	let wanted = ecs.mask_of::<(Position, Velocity)>();

	for entity in &live {
		let mask = ecs.mask(*entity);
		assert_eq!(mask.get(position), ecs.has::<Position>(*entity));
		assert_eq!(mask.get(velocity), ecs.has::<Velocity>(*entity));
		assert_eq!(mask, ecs.components().mask_for(*entity));
		assert_eq!(ecs.system_entities::<Movement>().contains(entity), mask == wanted);
	}

	let members = ecs.system_entities::<Movement>();
	assert!(members.iter().all(|e| live.contains(e)));
	assert_eq!(ecs.store::<Position>().len(), live.iter().filter(|e| ecs.has::<Position>(**e)).count());
}
