use crate::components::Component;
use crate::context::EcsContext;
use crate::entities::Entity;
use log::warn;

pub(crate) enum Command {
	Destroy {
		entity: Entity,
	},
	Insert {
		entity: Entity,
		apply: Box<dyn FnOnce(&mut EcsContext)>,
	},
	Remove {
		entity: Entity,
		apply: fn(&mut EcsContext, Entity),
	},
}

/// Structural changes recorded while systems run, applied in recording order afterwards.
///
/// Commands targeting an entity that is no longer alive when they are applied are skipped.
#[derive(Default)]
pub struct CommandBuffer {
	commands: Vec<Command>,
}

impl CommandBuffer {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn destroy_entity(&mut self, entity: Entity) {
		self.commands.push(Command::Destroy { entity });
	}

	pub fn add_component<T: Component>(&mut self, entity: Entity, value: T) {
		self.commands.push(Command::Insert {
			entity,
			apply: Box::new(move |ctx: &mut EcsContext| ctx.add_component(entity, value)),
		});
	}

	pub fn remove_component<T: Component>(&mut self, entity: Entity) {
		self.commands.push(Command::Remove {
			entity,
			apply: remove_component::<T>,
		});
	}

	pub fn len(&self) -> usize {
		self.commands.len()
	}

	pub fn is_empty(&self) -> bool {
		self.commands.is_empty()
	}

	pub(crate) fn take(&mut self) -> Vec<Command> {
		std::mem::take(&mut self.commands)
	}
}

fn remove_component<T: Component>(ctx: &mut EcsContext, entity: Entity) {
	if ctx.has::<T>(entity) {
		drop(ctx.remove_component::<T>(entity));
	} else {
		warn!("skipping deferred removal of {} from entity {entity}: not attached", T::NAME);
	}
}

impl Command {
	pub(crate) fn apply(self, ctx: &mut EcsContext) {
		match self {
			Command::Destroy { entity } if ctx.is_alive(entity) => ctx.destroy_entity(entity),
			Command::Insert { entity, apply } if ctx.is_alive(entity) => apply(ctx),
			Command::Remove { entity, apply } if ctx.is_alive(entity) => apply(ctx, entity),
			Command::Destroy { entity } | Command::Insert { entity, .. } | Command::Remove { entity, .. } => {
				warn!("skipping deferred command for entity {entity}: no longer alive")
			},
		}
	}
}
