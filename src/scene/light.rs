use crate::components::Component;
use crate::glm::Vec3;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum LightKind {
	Directional,
	Point,
	Spot,
}

impl LightKind {
	/// Value written to the shader's light type uniform.
	pub const fn code(&self) -> i32 {
		match self {
			LightKind::Directional => 0,
			LightKind::Point => 1,
			LightKind::Spot => 2,
		}
	}
}

/// A light source positioned and oriented by the entity's [Transform](crate::scene::Transform).
#[derive(Component, Clone, Debug, PartialEq)]
pub struct Light {
	kind: LightKind,
	colour: Vec3,
	intensity: f32,
	linear: f32,
	quadratic: f32,
	/// Spot cone half-angle in degrees.
	angle: f32,
}

impl Light {
	pub fn new(kind: LightKind) -> Self {
		Self {
			kind,
			colour: Vec3::new(1.0, 1.0, 1.0),
			intensity: 1.0,
			linear: 0.1,
			quadratic: 0.025,
			angle: 30.0,
		}
	}

	pub fn directional() -> Self {
		Self::new(LightKind::Directional)
	}

	pub fn point() -> Self {
		Self::new(LightKind::Point)
	}

	pub fn spot(angle: f32) -> Self {
		Self {
			angle,
			..Self::new(LightKind::Spot)
		}
	}

	property!(kind: LightKind);
	property!(colour: Vec3);
	property!(intensity: f32);
	property!(linear: f32);
	property!(quadratic: f32);
	property!(angle: f32);

	pub fn set_attenuation(&mut self, linear: f32, quadratic: f32) {
		self.linear = linear;
		self.quadratic = quadratic;
	}
}

impl Default for Light {
	fn default() -> Self {
		Self::point()
	}
}
