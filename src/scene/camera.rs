use crate::render::FramebufferId;
use crate::components::Component;
use crate::glm::{self, Mat4, Vec3};

/// An offscreen framebuffer a [Camera] renders into instead of the window.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct RenderTarget {
	pub framebuffer: FramebufferId,
	pub width: u32,
	pub height: u32,
}

/// Perspective camera. The view matrix is maintained by the
/// [CameraSystem](crate::render::CameraSystem) from the entity's [Transform](crate::scene::Transform).
#[derive(Component, Clone, Debug, PartialEq)]
pub struct Camera {
	fov: f32,
	aspect: f32,
	near: f32,
	far: f32,
	is_main: bool,
	target: Option<RenderTarget>,
	view: Mat4,
	projection: Mat4,
}

impl Default for Camera {
	fn default() -> Self {
		Self::new(60.0, 16.0 / 9.0, 0.1, 1000.0)
	}
}

impl Camera {
	/// `fov` is the vertical field of view in degrees.
	pub fn new(fov: f32, aspect: f32, near: f32, far: f32) -> Self {
		let mut camera = Self {
			fov,
			aspect,
			near,
			far,
			is_main: false,
			target: None,
			view: Mat4::identity(),
			projection: Mat4::identity(),
		};
		camera.refresh_projection();
		camera
	}

	property!(fov: f32 => refresh_projection);
	property!(aspect: f32 => refresh_projection);
	property!(near: f32 => refresh_projection);
	property!(far: f32 => refresh_projection);
	property!(is_main: bool);
	property!(target: Option<RenderTarget>);

	pub fn view(&self) -> &Mat4 {
		&self.view
	}

	pub fn projection(&self) -> &Mat4 {
		&self.projection
	}

	/// Point the camera from `eye` along `forward`.
	pub fn look(&mut self, eye: Vec3, forward: Vec3, up: Vec3) {
		self.view = glm::look_at(&eye, &(eye + forward), &up);
	}

	fn refresh_projection(&mut self) {
		self.projection = glm::perspective(self.aspect, self.fov.to_radians(), self.near, self.far);
	}
}
