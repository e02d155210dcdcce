use crate::systems::{System, SystemContext};
use crate::scene::{Camera, Transform};
use crate::app::WindowResized;
use crate::render::RenderEvent;
use crate::events::EventBus;
use crate::entities::Entity;
use std::cell::Cell;
use std::rc::Rc;
use log::trace;

/// Keeps camera view matrices in sync with their [Transform] and triggers a [RenderEvent] per camera.
///
/// Cameras with a render target are drawn first, the main camera last.
#[derive(Default)]
pub struct CameraSystem {
	resized: Rc<Cell<Option<(u32, u32)>>>,
}

impl CameraSystem {
	pub fn new() -> Self {
		Self::default()
	}
}

impl System for CameraSystem {
	fn setup(&mut self, events: &EventBus) {
		let resized = self.resized.clone();
		events.subscribe(move |event: &WindowResized| resized.set(Some((event.width, event.height))));
	}

	fn update(&mut self, _dt: f32, entities: &[Entity], ctx: &mut SystemContext<'_>) {
		let resized = self.resized.take().filter(|(width, height)| *width > 0 && *height > 0);

		let mut offscreen = Vec::new();
		let mut main = None;

		for entity in entities.iter().copied() {
			let pose = ctx
				.try_get::<Transform>(entity)
				.map(|transform| (transform.position(), transform.forward(), transform.up()));

			let camera = match ctx.try_get_mut::<Camera>(entity) {
				Some(camera) => camera,
				None => continue,
			};

			if let (Some((width, height)), None) = (resized, camera.target()) {
				camera.set_aspect(width as f32 / height as f32);
			}

			if let Some((eye, forward, up)) = pose {
				camera.look(eye, forward, up);
			}

			let event = RenderEvent {
				view: *camera.view(),
				projection: *camera.projection(),
				target: camera.target(),
			};

			if event.target.is_some() {
				offscreen.push(event);
			} else if camera.is_main() {
				main = Some(event);
			}
		}

		trace!("rendering {} offscreen cameras", offscreen.len());
		for event in offscreen.iter().chain(main.iter()) {
			ctx.notify(event);
		}
	}
}
