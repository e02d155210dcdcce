//! The frame loop tying the ECS to a window, a graphics backend and an audio device.

use crate::render::{CameraSystem, LightSystem, RenderSystem, ShaderId, ShaderSource, SharedBackend};
use crate::audio::{AudioDevice, AudioSystem, Listener, SoundSource};
use crate::scene::{Camera, Light, MeshRenderer, Name, Transform};
use crate::entities::Entity;
use crate::context::EcsContext;
use log::{info, trace, warn};
use crate::config::AppConfig;
use std::time::Instant;

/// What the window layer reports between frames.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum PlatformEvent {
	Resized { width: u32, height: u32 },
	CloseRequested,
}

/// Published on the [EventBus](crate::events::EventBus) whenever the window gets a non-zero size.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct WindowResized {
	pub width: u32,
	pub height: u32,
}

/// Published on the [EventBus](crate::events::EventBus) when the window is asked to close.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct WindowClosed;

/// A window and its event source.
pub trait Platform {
	fn poll_events(&mut self) -> Vec<PlatformEvent>;

	/// Show the frame that was just drawn.
	fn present(&mut self);

	fn size(&self) -> (u32, u32);
}

/// Game logic driven by an [App].
pub trait AppHandler {
	fn start(&mut self, _app: &mut App) {}

	/// Called once per frame before any system runs.
	fn update(&mut self, app: &mut App, dt: f32);

	fn on_event(&mut self, _app: &mut App, _event: &PlatformEvent) {}
}

/// Owns the [EcsContext] with the built-in components and systems registered,
/// plus the main camera.
pub struct App {
	config: AppConfig,
	platform: Box<dyn Platform>,
	backend: SharedBackend,
	audio: AudioDevice,
	ecs: EcsContext,
	main_camera: Entity,
	running: bool,
	minimised: bool,
	last_frame: Instant,
	frames: u64,
}

impl App {
	pub fn new(config: AppConfig, platform: Box<dyn Platform>, backend: SharedBackend, audio: AudioDevice) -> Self {
		let (width, height) = platform.size();
		let mut ecs = EcsContext::with_config(config.ecs());

		ecs.register_component::<Transform>();
		ecs.register_component::<Camera>();
		ecs.register_component::<Light>();
		ecs.register_component::<MeshRenderer>();
		ecs.register_component::<Name>();
		ecs.register_component::<Listener>();
		ecs.register_component::<SoundSource>();

		ecs.register_system(AudioSystem::new());
		ecs.set_system_mask::<AudioSystem>(ecs.mask_of::<(SoundSource, Listener)>());
		ecs.accept_subset::<AudioSystem>(true);

		ecs.register_system(LightSystem::new(backend.clone(), config.max_lights));
		ecs.set_system_mask::<LightSystem>(ecs.mask_of::<(Light,)>());
		ecs.accept_subset::<LightSystem>(true);

		ecs.register_system(RenderSystem::new(backend.clone(), (width, height), config.clear_colour));
		ecs.set_system_mask::<RenderSystem>(ecs.mask_of::<(MeshRenderer,)>());
		ecs.accept_subset::<RenderSystem>(true);

		ecs.register_system(CameraSystem::new());
		ecs.set_system_mask::<CameraSystem>(ecs.mask_of::<(Camera,)>());
		ecs.accept_subset::<CameraSystem>(true);

		backend.borrow_mut().set_viewport(width, height);

		let main_camera = ecs.create_entity();
		ecs.add_component(main_camera, Transform::default());
		let mut camera = Camera::new(60.0, width as f32 / height.max(1) as f32, 0.1, 100.0);
		camera.set_is_main(true);
		ecs.add_component(main_camera, camera);

		info!("created app \"{}\" ({width}x{height})", config.title);

		Self {
			config,
			platform,
			backend,
			audio,
			ecs,
			main_camera,
			running: true,
			minimised: false,
			last_frame: Instant::now(),
			frames: 0,
		}
	}

	pub fn config(&self) -> &AppConfig {
		&self.config
	}

	pub fn ecs(&self) -> &EcsContext {
		&self.ecs
	}

	pub fn ecs_mut(&mut self) -> &mut EcsContext {
		&mut self.ecs
	}

	pub fn backend(&self) -> &SharedBackend {
		&self.backend
	}

	pub fn audio(&self) -> &AudioDevice {
		&self.audio
	}

	/// Create a shader, falling back to the default shader on failure.
	pub fn create_shader(&self, source: &ShaderSource) -> ShaderId {
		self.ecs.system::<RenderSystem>().create_shader(source)
	}

	/// Create an entity. Every entity made through the [App] carries a [Transform].
	pub fn spawn(&mut self) -> Entity {
		let entity = self.ecs.create_entity();
		self.ecs.add_component(entity, Transform::default());
		entity
	}

	/// Look up an entity created through [spawn](Self::spawn) by its raw id.
	pub fn entity(&self, id: u32) -> Option<Entity> {
		let entity = Entity::from_raw(id);
		match self.ecs.is_alive(entity) && self.ecs.has::<Transform>(entity) {
			true => Some(entity),
			false => None,
		}
	}

	/// Destroy an entity created through [spawn](Self::spawn). Other entities are left alone.
	///
	/// The main camera is kept; move it with [set_main_camera](Self::set_main_camera) first.
	pub fn destroy_entity(&mut self, entity: Entity) -> bool {
		if !self.ecs.is_alive(entity) || !self.ecs.has::<Transform>(entity) {
			return false;
		}
		if entity == self.main_camera {
			warn!("refusing to destroy the main camera {entity}");
			return false;
		}
		self.ecs.destroy_entity(entity);
		true
	}

	pub fn main_camera(&self) -> Entity {
		self.main_camera
	}

	/// # Panics
	/// Panics if `entity` has no [Camera].
	pub fn set_main_camera(&mut self, entity: Entity) {
		self.ecs.get_mut::<Camera>(entity).set_is_main(true);
		if entity != self.main_camera {
			if let Some(previous) = self.ecs.try_get_mut::<Camera>(self.main_camera) {
				previous.set_is_main(false);
			}
			self.main_camera = entity;
		}
	}

	pub fn is_running(&self) -> bool {
		self.running
	}

	pub fn is_minimised(&self) -> bool {
		self.minimised
	}

	pub fn frames(&self) -> u64 {
		self.frames
	}

	/// Stop the loop after the current frame.
	pub fn quit(&mut self) {
		self.running = false;
	}

	/// Run frames until the window closes or [quit](Self::quit) is called.
	pub fn run(&mut self, handler: &mut dyn AppHandler) {
		info!("starting \"{}\"", self.config.title);
		handler.start(self);
		self.last_frame = Instant::now();

		while self.running {
			self.frame(handler);
		}

		info!("stopped \"{}\" after {} frames", self.config.title, self.frames);
	}

	/// Run a single frame.
	pub fn frame(&mut self, handler: &mut dyn AppHandler) {
		let now = Instant::now();
		let dt = now.duration_since(self.last_frame).as_secs_f32();
		self.last_frame = now;

		for event in self.platform.poll_events() {
			self.handle_event(&event);
			handler.on_event(self, &event);
		}

		if self.running && !self.minimised {
			handler.update(self, dt);
			self.ecs.run_systems(dt);
			self.frames += 1;
			trace!("frame {} took {dt}s with {} entities", self.frames, self.ecs.entity_count());
		}

		self.platform.present();
	}

	fn handle_event(&mut self, event: &PlatformEvent) {
		match *event {
			PlatformEvent::Resized { width, height } if width == 0 || height == 0 => {
				info!("window minimised");
				self.minimised = true;
			},
			PlatformEvent::Resized { width, height } => {
				info!("window resized to {width}x{height}");
				self.minimised = false;
				self.ecs.notify(&WindowResized { width, height });
			},
			PlatformEvent::CloseRequested => {
				self.running = false;
				self.ecs.notify(&WindowClosed);
			},
		}
	}
}
