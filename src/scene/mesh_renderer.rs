use crate::components::Component;
use crate::render::Model;
use std::sync::Arc;

/// Draws a [Model] at the entity's [Transform](crate::scene::Transform).
///
/// The model is captured when the component is attached; swap it by detaching and re-attaching.
#[derive(Component, Clone, Debug)]
pub struct MeshRenderer {
	model: Arc<Model>,
	casts_shadows: bool,
}

impl MeshRenderer {
	pub fn new(model: Arc<Model>) -> Self {
		Self {
			model,
			casts_shadows: true,
		}
	}

	pub fn model(&self) -> &Arc<Model> {
		&self.model
	}

	property!(casts_shadows: bool);
}
