use crate::render::{BatchAllocator, MeshId, ShaderId, ShaderSource, SharedBackend, TextureId};
use crate::systems::{System, SystemContext};
use crate::components::ComponentDirectory;
use crate::scene::{MeshRenderer, RenderTarget, Transform};
use std::collections::{BTreeSet, HashMap, HashSet};
use std::cell::{Ref, RefCell};
use crate::glm::{Mat4, Vec4};
use crate::app::WindowResized;
use crate::events::EventBus;
use crate::entities::Entity;
use log::{debug, error};
use std::rc::{Rc, Weak};
use rayon::prelude::*;

/// Request to draw every batch from a camera's point of view.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderEvent {
	pub view: Mat4,
	pub projection: Mat4,
	pub target: Option<RenderTarget>,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
struct DrawPart {
	shader: ShaderId,
	mesh: MeshId,
	texture: Option<TextureId>,
}

struct RenderState {
	backend: SharedBackend,
	batches: BatchAllocator,
	parts: HashMap<Entity, Vec<DrawPart>>,
	transforms: HashMap<ShaderId, Vec<Mat4>>,
	models: HashMap<Entity, Mat4>,
	stale: HashSet<ShaderId>,
	viewport: (u32, u32),
	clear_colour: Vec4,
}

impl RenderState {
	fn sync_instances(&mut self, shader: ShaderId) {
		let mut backend = self.backend.borrow_mut();
		backend.resize_instance_buffer(shader, self.batches.instance_count(shader));
		backend.set_indirect_commands(shader, &self.batches.commands(shader));
	}

	/// Lay the cached model matrices out in the instance order of `shader`.
	fn rebuild_transforms(&mut self, shader: ShaderId) {
		let matrices = match self.batches.shader(shader) {
			Some(batch) => batch
				.instance_entities()
				.map(|entity| self.models.get(&entity).copied().unwrap_or_else(Mat4::identity))
				.collect(),
			None => Vec::new(),
		};
		self.transforms.insert(shader, matrices);
	}

	fn textures_of(&self, shader: ShaderId) -> BTreeSet<TextureId> {
		self.parts
			.values()
			.flatten()
			.filter(|part| part.shader == shader)
			.filter_map(|part| part.texture)
			.collect()
	}

	fn render(&mut self, event: &RenderEvent) {
		for shader in std::mem::take(&mut self.stale) {
			self.rebuild_transforms(shader);
		}

		let mut backend = self.backend.borrow_mut();
		let (width, height) = match event.target {
			Some(target) => (target.width, target.height),
			None => self.viewport,
		};

		backend.bind_framebuffer(event.target.map(|t| t.framebuffer));
		backend.set_viewport(width, height);
		backend.clear(&self.clear_colour);
		backend.set_camera(&event.view, &event.projection);

		for (shader, batch) in self.batches.shaders() {
			backend.bind_shader(shader);
			for (slot, texture) in self.textures_of(shader).into_iter().enumerate() {
				backend.bind_texture(slot as u32, texture);
			}

			if batch.data_changed() {
				debug!("re-uploading geometry of shader {shader:?}");
				backend.replace_vertex_buffer(shader, batch.vertices());
				backend.replace_index_buffer(shader, batch.indices());
			}

			let transforms = self.transforms.entry(shader).or_default();
			backend.update_instance_buffer(shader, transforms);
			backend.multi_draw_indirect(shader, batch.batches().len());
		}
		self.batches.clear_data_changed();

		if event.target.is_some() {
			backend.bind_framebuffer(None);
			backend.set_viewport(self.viewport.0, self.viewport.1);
		}
	}
}

/// Mirrors every [MeshRenderer] into a [BatchAllocator] and draws it on each [RenderEvent].
pub struct RenderSystem {
	state: Rc<RefCell<RenderState>>,
}

impl RenderSystem {
	pub fn new(backend: SharedBackend, viewport: (u32, u32), clear_colour: Vec4) -> Self {
		Self {
			state: Rc::new(RefCell::new(RenderState {
				backend,
				batches: BatchAllocator::new(),
				parts: HashMap::new(),
				transforms: HashMap::new(),
				models: HashMap::new(),
				stale: HashSet::new(),
				viewport,
				clear_colour,
			})),
		}
	}

	/// Create a shader, falling back to [ShaderId::DEFAULT] if the backend rejects it.
	pub fn create_shader(&self, source: &ShaderSource) -> ShaderId {
		let state = self.state.borrow();
		let result = state.backend.borrow_mut().create_shader(source);
		match result {
			Ok(shader) => shader,
			Err(err) => {
				error!("shader {} unavailable, using the default shader: {err}", source.name);
				ShaderId::DEFAULT
			},
		}
	}

	pub fn batches(&self) -> Ref<'_, BatchAllocator> {
		Ref::map(self.state.borrow(), |state| &state.batches)
	}

	pub fn viewport(&self) -> (u32, u32) {
		self.state.borrow().viewport
	}

	/// Draw immediately, outside of the event bus.
	pub fn render(&self, event: &RenderEvent) {
		self.state.borrow_mut().render(event);
	}
}

impl System for RenderSystem {
	fn setup(&mut self, events: &EventBus) {
		let state = Rc::downgrade(&self.state);
		events.subscribe(move |event: &RenderEvent| {
			if let Some(state) = Weak::upgrade(&state) {
				state.borrow_mut().render(event);
			}
		});

		let state = Rc::downgrade(&self.state);
		events.subscribe(move |event: &WindowResized| {
			if let Some(state) = Weak::upgrade(&state) {
				state.borrow_mut().viewport = (event.width, event.height);
			}
		});
	}

	fn on_entity_inserted(&mut self, entity: Entity, components: &ComponentDirectory) {
		let renderer = match components.try_get::<MeshRenderer>(entity) {
			Some(renderer) => renderer,
			None => return,
		};

		let model = match components.try_get::<Transform>(entity) {
			Some(transform) => *transform.model_matrix(),
			None => Mat4::identity(),
		};

		let mut state = self.state.borrow_mut();
		state.models.insert(entity, model);
		let mut parts = Vec::with_capacity(renderer.model().parts().len());
		for part in renderer.model().parts() {
			let shader = part.material.shader;
			state.batches.insert(shader, &part.mesh, entity);
			state.sync_instances(shader);
			state.stale.insert(shader);
			parts.push(DrawPart {
				shader,
				mesh: part.mesh.id(),
				texture: part.material.diffuse,
			});
		}
		state.parts.insert(entity, parts);
	}

	fn on_entity_removed(&mut self, entity: Entity, _components: &ComponentDirectory) {
		let mut state = self.state.borrow_mut();
		let parts = match state.parts.remove(&entity) {
			Some(parts) => parts,
			None => return,
		};

		state.models.remove(&entity);
		for part in parts {
			state.batches.remove(part.shader, part.mesh, entity);
			state.sync_instances(part.shader);
			state.stale.insert(part.shader);
		}
	}

	fn update(&mut self, _dt: f32, _entities: &[Entity], ctx: &mut SystemContext<'_>) {
		let transforms = ctx.try_store::<Transform>();
		let mut state = self.state.borrow_mut();
		let state = &mut *state;

		let owners: Vec<Entity> = state.parts.keys().copied().collect();
		state.models = owners
			.par_iter()
			.map(|entity| match transforms.and_then(|store| store.try_get(*entity)) {
				Some(transform) => (*entity, *transform.model_matrix()),
				None => (*entity, Mat4::identity()),
			})
			.collect();

		state.transforms.clear();
		state.stale = state.batches.shaders().map(|(shader, _)| shader).collect();
	}
}
