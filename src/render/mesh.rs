use std::sync::atomic::{AtomicU32, Ordering};
use crate::glm::{Vec2, Vec3};
use crate::render::Material;
use std::sync::Arc;

static NEXT_MESH_ID: AtomicU32 = AtomicU32::new(0);

/// Identity of a [Mesh], unique for the lifetime of the process.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct MeshId(u32);

impl MeshId {
	fn next() -> Self {
		Self(NEXT_MESH_ID.fetch_add(1, Ordering::Relaxed))
	}

	pub const fn value(&self) -> u32 {
		self.0
	}
}

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Vertex {
	pub position: Vec3,
	pub normal: Vec3,
	pub tex_coords: Vec2,
}

impl Vertex {
	pub fn new(position: Vec3, normal: Vec3, tex_coords: Vec2) -> Self {
		Self {
			position,
			normal,
			tex_coords,
		}
	}
}

/// Immutable vertex and index data. Indices are relative to the mesh's own vertices.
#[derive(Debug)]
pub struct Mesh {
	id: MeshId,
	vertices: Vec<Vertex>,
	indices: Vec<u32>,
}

impl Mesh {
	/// # Panics
	/// Panics if an index points past the end of `vertices`.
	pub fn new(vertices: Vec<Vertex>, indices: Vec<u32>) -> Self {
		if let Some(index) = indices.iter().find(|i| **i as usize >= vertices.len()) {
			panic!("Mesh index {index} is out of bounds for {} vertices", vertices.len());
		}

		Self {
			id: MeshId::next(),
			vertices,
			indices,
		}
	}

	#[inline(always)]
	pub fn id(&self) -> MeshId {
		self.id
	}

	pub fn vertices(&self) -> &[Vertex] {
		&self.vertices
	}

	pub fn indices(&self) -> &[u32] {
		&self.indices
	}
}

#[derive(Clone, Debug)]
pub struct ModelPart {
	pub mesh: Arc<Mesh>,
	pub material: Arc<Material>,
}

/// A set of meshes drawn together, each with its own [Material].
#[derive(Clone, Debug, Default)]
pub struct Model {
	parts: Vec<ModelPart>,
}

impl Model {
	pub fn new(parts: Vec<ModelPart>) -> Self {
		Self { parts }
	}

	pub fn from_mesh(mesh: Arc<Mesh>, material: Arc<Material>) -> Self {
		Self {
			parts: vec![ModelPart { mesh, material }],
		}
	}

	pub fn parts(&self) -> &[ModelPart] {
		&self.parts
	}

	pub fn push(&mut self, mesh: Arc<Mesh>, material: Arc<Material>) {
		self.parts.push(ModelPart { mesh, material });
	}
}
