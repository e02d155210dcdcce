use crate::glm::Vec2;

/// Handle of a shader program created by a [GraphicsBackend](crate::render::GraphicsBackend).
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct ShaderId(pub u32);

impl ShaderId {
	/// Always available; used whenever creating another shader fails.
	pub const DEFAULT: ShaderId = ShaderId(0);
}

impl Default for ShaderId {
	fn default() -> Self {
		Self::DEFAULT
	}
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct TextureId(pub u32);

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct FramebufferId(pub u32);

#[derive(Clone, Debug, PartialEq)]
pub struct Material {
	pub shader: ShaderId,
	pub diffuse: Option<TextureId>,
	pub tiling: Vec2,
}

impl Default for Material {
	fn default() -> Self {
		Self {
			shader: ShaderId::DEFAULT,
			diffuse: None,
			tiling: Vec2::new(1.0, 1.0),
		}
	}
}

impl Material {
	pub fn new(shader: ShaderId) -> Self {
		Self {
			shader,
			..Self::default()
		}
	}

	pub fn with_diffuse(mut self, texture: TextureId) -> Self {
		self.diffuse = Some(texture);
		self
	}

	pub fn with_tiling(mut self, tiling: Vec2) -> Self {
		self.tiling = tiling;
		self
	}
}
