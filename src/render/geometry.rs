use crate::render::{Mesh, Vertex};
use crate::glm::{Vec2, Vec3};
use lazy_static::lazy_static;
use std::sync::Arc;

lazy_static! {
	static ref QUAD: Arc<Mesh> = Arc::new(build_quad());
	static ref CUBE: Arc<Mesh> = Arc::new(build_cube());
}

/// Built-in meshes shared by every user.
pub struct Geometry;

impl Geometry {
	/// Unit quad in the XY plane facing +Z.
	pub fn quad() -> Arc<Mesh> {
		QUAD.clone()
	}

	/// Unit cube centred on the origin, four vertices per face.
	pub fn cube() -> Arc<Mesh> {
		CUBE.clone()
	}
}

fn build_quad() -> Mesh {
	let normal = Vec3::new(0.0, 0.0, 1.0);
	let vertices = vec![
		Vertex::new(Vec3::new(-0.5, -0.5, 0.0), normal, Vec2::new(0.0, 0.0)),
		Vertex::new(Vec3::new(0.5, -0.5, 0.0), normal, Vec2::new(1.0, 0.0)),
		Vertex::new(Vec3::new(0.5, 0.5, 0.0), normal, Vec2::new(1.0, 1.0)),
		Vertex::new(Vec3::new(-0.5, 0.5, 0.0), normal, Vec2::new(0.0, 1.0)),
	];
	Mesh::new(vertices, vec![0, 1, 2, 2, 3, 0])
}

fn build_cube() -> Mesh {
	// (normal, tangent, bitangent) per face
	let faces = [
		(Vec3::new(0.0, 0.0, 1.0), Vec3::new(1.0, 0.0, 0.0), Vec3::new(0.0, 1.0, 0.0)),
		(Vec3::new(0.0, 0.0, -1.0), Vec3::new(-1.0, 0.0, 0.0), Vec3::new(0.0, 1.0, 0.0)),
		(Vec3::new(1.0, 0.0, 0.0), Vec3::new(0.0, 0.0, -1.0), Vec3::new(0.0, 1.0, 0.0)),
		(Vec3::new(-1.0, 0.0, 0.0), Vec3::new(0.0, 0.0, 1.0), Vec3::new(0.0, 1.0, 0.0)),
		(Vec3::new(0.0, 1.0, 0.0), Vec3::new(1.0, 0.0, 0.0), Vec3::new(0.0, 0.0, -1.0)),
		(Vec3::new(0.0, -1.0, 0.0), Vec3::new(1.0, 0.0, 0.0), Vec3::new(0.0, 0.0, 1.0)),
	];
	let corners = [(-0.5, -0.5, 0.0, 0.0), (0.5, -0.5, 1.0, 0.0), (0.5, 0.5, 1.0, 1.0), (-0.5, 0.5, 0.0, 1.0)];

	let mut vertices = Vec::with_capacity(24);
	let mut indices = Vec::with_capacity(36);

	for (normal, tangent, bitangent) in faces {
		let base = vertices.len() as u32;
		for (u, v, s, t) in corners {
			let position = normal * 0.5 + tangent * u + bitangent * v;
			vertices.push(Vertex::new(position, normal, Vec2::new(s, t)));
		}
		indices.extend_from_slice(&[base, base + 1, base + 2, base + 2, base + 3, base]);
	}

	Mesh::new(vertices, indices)
}
