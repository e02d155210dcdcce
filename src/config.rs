use crate::glm::Vec4;

/// Default upper bound on simultaneously live entities.
pub const DEFAULT_MAX_ENTITIES: usize = 10_000;

/// Default upper bound on lights uploaded to the graphics backend.
pub const DEFAULT_MAX_LIGHTS: usize = 16;

/// Sizing of an [EcsContext](crate::context::EcsContext).
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct EcsConfig {
	pub max_entities: usize,
}

impl Default for EcsConfig {
	fn default() -> Self {
		Self {
			max_entities: DEFAULT_MAX_ENTITIES,
		}
	}
}

impl EcsConfig {
	pub fn with_max_entities(mut self, max_entities: usize) -> Self {
		assert!(max_entities > 0, "max_entities must be at least 1");
		self.max_entities = max_entities;
		self
	}
}

/// Settings of an [App](crate::app::App).
#[derive(Clone, Debug, PartialEq)]
pub struct AppConfig {
	pub title: String,
	pub width: u32,
	pub height: u32,
	pub max_entities: usize,
	pub max_lights: usize,
	pub clear_colour: Vec4,
}

impl Default for AppConfig {
	fn default() -> Self {
		Self {
			title: String::from("kuai"),
			width: 1280,
			height: 720,
			max_entities: DEFAULT_MAX_ENTITIES,
			max_lights: DEFAULT_MAX_LIGHTS,
			clear_colour: Vec4::new(0.1, 0.1, 0.1, 1.0),
		}
	}
}

impl AppConfig {
	pub fn with_title(mut self, title: impl Into<String>) -> Self {
		self.title = title.into();
		self
	}

	pub fn with_size(mut self, width: u32, height: u32) -> Self {
		assert!(width > 0 && height > 0, "Window size must be non-zero, got {width}x{height}");
		self.width = width;
		self.height = height;
		self
	}

	pub fn with_max_entities(mut self, max_entities: usize) -> Self {
		assert!(max_entities > 0, "max_entities must be at least 1");
		self.max_entities = max_entities;
		self
	}

	pub fn with_max_lights(mut self, max_lights: usize) -> Self {
		self.max_lights = max_lights;
		self
	}

	pub fn with_clear_colour(mut self, colour: Vec4) -> Self {
		self.clear_colour = colour;
		self
	}

	pub fn ecs(&self) -> EcsConfig {
		EcsConfig::default().with_max_entities(self.max_entities)
	}
}
