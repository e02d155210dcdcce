//! Loading of external textures and models.
//!
//! Loading never fails from the caller's point of view: a missing or broken asset is
//! logged and replaced by a placeholder so the frame can still be drawn.

use crate::render::{Geometry, Material, Mesh, Model, SharedBackend, TextureId, Vertex};
use std::collections::HashMap;
use log::{error, info, warn};
use std::sync::Arc;

#[derive(Debug, thiserror::Error)]
pub enum AssetError {
	#[error("asset not found: {0}")]
	NotFound(String),

	#[error("failed to decode {path}: {reason}")]
	Decode { path: String, reason: String },
}

/// Decoded RGBA8 pixels.
#[derive(Clone, Debug, PartialEq)]
pub struct TextureData {
	pub width: u32,
	pub height: u32,
	pub pixels: Vec<u8>,
}

impl TextureData {
	/// # Panics
	/// Panics if `pixels` does not hold exactly `width * height` RGBA texels.
	pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Self {
		assert_eq!(
			pixels.len(),
			width as usize * height as usize * 4,
			"Texture data does not match its {width}x{height} size"
		);
		Self { width, height, pixels }
	}

	/// A single opaque white texel.
	pub fn placeholder() -> Self {
		Self::new(1, 1, vec![255; 4])
	}
}

#[derive(Clone, Debug, PartialEq)]
pub struct MeshData {
	pub vertices: Vec<Vertex>,
	pub indices: Vec<u32>,
}

/// Where asset bytes come from and how they are decoded.
pub trait AssetSource {
	fn load_texture(&self, path: &str) -> Result<TextureData, AssetError>;

	/// One entry per mesh of the model.
	fn load_model(&self, path: &str) -> Result<Vec<MeshData>, AssetError>;
}

/// An [AssetSource] serving pre-decoded assets from memory.
#[derive(Default)]
pub struct MemoryAssetSource {
	textures: HashMap<String, TextureData>,
	models: HashMap<String, Vec<MeshData>>,
}

impl MemoryAssetSource {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn insert_texture(&mut self, path: impl Into<String>, texture: TextureData) {
		self.textures.insert(path.into(), texture);
	}

	pub fn insert_model(&mut self, path: impl Into<String>, meshes: Vec<MeshData>) {
		self.models.insert(path.into(), meshes);
	}
}

impl AssetSource for MemoryAssetSource {
	fn load_texture(&self, path: &str) -> Result<TextureData, AssetError> {
		self.textures.get(path).cloned().ok_or_else(|| AssetError::NotFound(path.to_owned()))
	}

	fn load_model(&self, path: &str) -> Result<Vec<MeshData>, AssetError> {
		let meshes = self.models.get(path).ok_or_else(|| AssetError::NotFound(path.to_owned()))?;
		if meshes.is_empty() {
			return Err(AssetError::Decode {
				path: path.to_owned(),
				reason: String::from("model contains no meshes"),
			});
		}
		Ok(meshes.clone())
	}
}

/// Caches loaded assets and substitutes placeholders for the ones that fail to load.
pub struct Assets<S: AssetSource> {
	source: S,
	backend: SharedBackend,
	textures: HashMap<String, Option<TextureId>>,
	models: HashMap<String, Arc<Model>>,
	placeholder: Option<Option<TextureId>>,
}

impl<S: AssetSource> Assets<S> {
	pub fn new(source: S, backend: SharedBackend) -> Self {
		Self {
			source,
			backend,
			textures: HashMap::new(),
			models: HashMap::new(),
			placeholder: None,
		}
	}

	pub fn source(&self) -> &S {
		&self.source
	}

	/// Upload the texture at `path`, or the placeholder texture if that fails.
	///
	/// `None` only if the backend cannot create even the placeholder.
	pub fn texture(&mut self, path: &str) -> Option<TextureId> {
		if let Some(texture) = self.textures.get(path) {
			return *texture;
		}

		let texture = match self.source.load_texture(path) {
			Ok(data) => match self.backend.borrow_mut().create_texture(&data) {
				Ok(texture) => {
					info!("loaded texture {path} ({}x{})", data.width, data.height);
					Some(texture)
				},
				Err(err) => {
					error!("failed to upload texture {path}: {err}");
					None
				},
			},
			Err(err) => {
				warn!("using placeholder texture for {path}: {err}");
				None
			},
		};

		let texture = texture.or_else(|| self.placeholder_texture());
		self.textures.insert(path.to_owned(), texture);
		texture
	}

	/// Build the model at `path` with every mesh drawn using `material`.
	/// A model that fails to load becomes a single quad.
	pub fn model(&mut self, path: &str, material: Arc<Material>) -> Arc<Model> {
		if let Some(model) = self.models.get(path) {
			return model.clone();
		}

		let model = match self.source.load_model(path).and_then(|meshes| validate(path, meshes)) {
			Ok(meshes) => {
				let mut model = Model::default();
				for mesh in meshes {
					model.push(Arc::new(Mesh::new(mesh.vertices, mesh.indices)), material.clone());
				}
				info!("loaded model {path} ({} meshes)", model.parts().len());
				model
			},
			Err(err) => {
				warn!("using placeholder model for {path}: {err}");
				Model::from_mesh(Geometry::quad(), material)
			},
		};

		let model = Arc::new(model);
		self.models.insert(path.to_owned(), model.clone());
		model
	}

	fn placeholder_texture(&mut self) -> Option<TextureId> {
		if let Some(placeholder) = self.placeholder {
			return placeholder;
		}

		let placeholder = match self.backend.borrow_mut().create_texture(&TextureData::placeholder()) {
			Ok(texture) => Some(texture),
			Err(err) => {
				error!("failed to create placeholder texture: {err}");
				None
			},
		};
		self.placeholder = Some(placeholder);
		placeholder
	}
}

fn validate(path: &str, meshes: Vec<MeshData>) -> Result<Vec<MeshData>, AssetError> {
	for mesh in &meshes {
		if let Some(index) = mesh.indices.iter().find(|i| **i as usize >= mesh.vertices.len()) {
			return Err(AssetError::Decode {
				path: path.to_owned(),
				reason: format!("index {index} out of bounds for {} vertices", mesh.vertices.len()),
			});
		}
	}
	Ok(meshes)
}
