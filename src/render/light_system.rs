use crate::components::ComponentDirectory;
use crate::scene::{Light, Transform};
use crate::render::SharedBackend;
use crate::systems::{System, SystemContext};
use crate::entities::Entity;
use crate::glm::Vec3;
use log::trace;

/// Shader-side layout of one light.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct LightUniform {
	pub kind: i32,
	pub position: Vec3,
	pub direction: Vec3,
	pub colour: Vec3,
	pub intensity: f32,
	pub linear: f32,
	pub quadratic: f32,
	/// Cosine of the spot cone angle.
	pub cutoff: f32,
}

impl LightUniform {
	pub fn new(light: &Light, transform: Option<&Transform>) -> Self {
		let (position, direction) = match transform {
			Some(transform) => (transform.position(), transform.forward()),
			None => (Vec3::zeros(), Vec3::new(0.0, 0.0, -1.0)),
		};

		Self {
			kind: light.kind().code(),
			position,
			direction,
			colour: light.colour(),
			intensity: light.intensity(),
			linear: light.linear(),
			quadratic: light.quadratic(),
			cutoff: light.angle().to_radians().cos(),
		}
	}
}

/// Uploads every [Light] to the graphics backend, up to a fixed maximum.
pub struct LightSystem {
	backend: SharedBackend,
	max_lights: usize,
	light_count: usize,
}

impl LightSystem {
	pub fn new(backend: SharedBackend, max_lights: usize) -> Self {
		Self {
			backend,
			max_lights,
			light_count: 0,
		}
	}

	/// Number of lights currently uploaded.
	pub fn uploaded_count(&self) -> usize {
		self.light_count.min(self.max_lights)
	}

	fn upload_count(&self) {
		self.backend.borrow_mut().set_light_count(self.uploaded_count());
	}
}

impl System for LightSystem {
	fn on_entity_inserted(&mut self, _entity: Entity, _components: &ComponentDirectory) {
		self.light_count += 1;
		self.upload_count();
	}

	fn on_entity_removed(&mut self, _entity: Entity, _components: &ComponentDirectory) {
		self.light_count -= 1;
		self.upload_count();
	}

	fn update(&mut self, _dt: f32, entities: &[Entity], ctx: &mut SystemContext<'_>) {
		let mut backend = self.backend.borrow_mut();
		let lit = entities.iter().filter_map(|entity| ctx.try_get::<Light>(*entity).map(|light| (*entity, light)));

		for (index, (entity, light)) in lit.take(self.max_lights).enumerate() {
			backend.set_light(index, &LightUniform::new(light, ctx.try_get::<Transform>(entity)));
		}

		trace!("uploaded {} lights", self.uploaded_count());
	}
}
