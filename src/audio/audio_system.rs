use crate::systems::{System, SystemContext};
use crate::audio::{Listener, SoundSource};
use crate::entities::Entity;
use crate::scene::Transform;

/// Pushes the pose of every [SoundSource] and [Listener] into the audio backend each frame.
#[derive(Default)]
pub struct AudioSystem;

impl AudioSystem {
	pub fn new() -> Self {
		Self
	}
}

impl System for AudioSystem {
	fn update(&mut self, _dt: f32, entities: &[Entity], ctx: &mut SystemContext<'_>) {
		for entity in entities.iter().copied() {
			let transform = match ctx.try_get::<Transform>(entity) {
				Some(transform) => transform,
				None => continue,
			};

			if let Some(source) = ctx.try_get::<SoundSource>(entity) {
				source.set_pose(transform.position(), transform.forward());
			}

			if let Some(listener) = ctx.try_get::<Listener>(entity) {
				listener.device().set_listener_pose(transform.position(), transform.forward(), transform.up());
			}
		}
	}
}
