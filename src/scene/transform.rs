use crate::glm::{self, Mat4, Vec3, Vec4};
use crate::components::Component;

/// Position, orientation and scale of an entity.
///
/// Rotation is stored as Euler angles in degrees and applied yaw (Y), then pitch (X), then roll (Z).
/// The model matrix is recomputed whenever a setter runs.
#[derive(Component, Clone, Debug, PartialEq)]
pub struct Transform {
	position: Vec3,
	rotation: Vec3,
	scale: Vec3,
	model: Mat4,
}

impl Default for Transform {
	fn default() -> Self {
		Self::new(Vec3::zeros(), Vec3::zeros(), Vec3::new(1.0, 1.0, 1.0))
	}
}

impl Transform {
	pub fn new(position: Vec3, rotation: Vec3, scale: Vec3) -> Self {
		let mut transform = Self {
			position,
			rotation,
			scale,
			model: Mat4::identity(),
		};
		transform.refresh();
		transform
	}

	pub fn from_position(position: Vec3) -> Self {
		Self {
			position,
			..Self::default()
		}
		.refreshed()
	}

	property!(position: Vec3 => refresh);
	property!(rotation: Vec3 => refresh);
	property!(scale: Vec3 => refresh);

	pub fn translate(&mut self, offset: Vec3) {
		self.set_position(self.position + offset);
	}

	pub fn rotate(&mut self, degrees: Vec3) {
		self.set_rotation(self.rotation + degrees);
	}

	#[inline(always)]
	pub fn model_matrix(&self) -> &Mat4 {
		&self.model
	}

	/// Rotation only, without translation or scale.
	pub fn rotation_matrix(&self) -> Mat4 {
		let m = glm::rotate_y(&Mat4::identity(), self.rotation.y.to_radians());
		let m = glm::rotate_x(&m, self.rotation.x.to_radians());
		glm::rotate_z(&m, self.rotation.z.to_radians())
	}

	/// Direction the entity faces; -Z when unrotated.
	pub fn forward(&self) -> Vec3 {
		self.direction(Vec4::new(0.0, 0.0, -1.0, 0.0))
	}

	pub fn up(&self) -> Vec3 {
		self.direction(Vec4::new(0.0, 1.0, 0.0, 0.0))
	}

	pub fn right(&self) -> Vec3 {
		self.direction(Vec4::new(1.0, 0.0, 0.0, 0.0))
	}

	fn direction(&self, axis: Vec4) -> Vec3 {
		(self.rotation_matrix() * axis).xyz().normalize()
	}

	fn refreshed(mut self) -> Self {
		self.refresh();
		self
	}

	fn refresh(&mut self) {
		let translation = glm::translate(&Mat4::identity(), &self.position);
		self.model = glm::scale(&(translation * self.rotation_matrix()), &self.scale);
	}
}
