use crate::render::{IndirectCommand, Mesh, MeshId, ShaderId, Vertex};
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use crate::entities::Entity;
use log::debug;

/// Where one mesh's data and instances live inside its shader's shared buffers.
#[derive(Clone, Debug)]
pub struct MeshBatch {
	mesh: MeshId,
	command: IndirectCommand,
	vertex_count: u32,
	instances: Vec<Entity>,
}

impl MeshBatch {
	pub fn mesh(&self) -> MeshId {
		self.mesh
	}

	pub fn command(&self) -> &IndirectCommand {
		&self.command
	}

	/// Length of this mesh's span in the shader's vertex buffer.
	pub fn vertex_count(&self) -> u32 {
		self.vertex_count
	}

	/// Instance owners in slot order, starting at `command().base_instance`.
	pub fn instances(&self) -> &[Entity] {
		&self.instances
	}
}

/// Packed buffers and draw records of every mesh drawn with one shader.
///
/// Batches are kept in buffer order: each batch's vertex, index and instance ranges
/// directly follow those of the previous one.
#[derive(Clone, Debug, Default)]
pub struct ShaderBatch {
	vertices: Vec<Vertex>,
	indices: Vec<u32>,
	batches: Vec<MeshBatch>,
	instance_count: u32,
	data_changed: bool,
}

impl ShaderBatch {
	pub fn vertices(&self) -> &[Vertex] {
		&self.vertices
	}

	pub fn indices(&self) -> &[u32] {
		&self.indices
	}

	pub fn batches(&self) -> &[MeshBatch] {
		&self.batches
	}

	pub fn batch(&self, mesh: MeshId) -> Option<&MeshBatch> {
		self.batches.iter().find(|b| b.mesh == mesh)
	}

	pub fn instance_count(&self) -> usize {
		self.instance_count as usize
	}

	/// Whether vertex or index data changed since the last [clear](BatchAllocator::clear_data_changed).
	pub fn data_changed(&self) -> bool {
		self.data_changed
	}

	/// The indirect command list, one record per mesh in use.
	pub fn commands(&self) -> Vec<IndirectCommand> {
		self.batches.iter().map(|b| b.command).collect()
	}

	/// Owner of every instance slot, in slot order.
	pub fn instance_entities(&self) -> impl Iterator<Item = Entity> + '_ {
		self.batches.iter().flat_map(|b| b.instances.iter().copied())
	}
}

/// Per-shader instanced-draw bookkeeping.
#[derive(Debug, Default)]
pub struct BatchAllocator {
	shaders: BTreeMap<ShaderId, ShaderBatch>,
}

impl BatchAllocator {
	pub fn new() -> Self {
		Self::default()
	}

	/// Add an instance of `mesh` owned by `entity` under `shader`.
	///
	/// The first instance of a mesh appends its vertex and index data to the shader's buffers.
	/// Returns `true` in that case.
	pub fn insert(&mut self, shader: ShaderId, mesh: &Mesh, entity: Entity) -> bool {
		let target = self.shaders.entry(shader).or_default();

		let created = match target.batches.iter().position(|b| b.mesh == mesh.id()) {
			Some(index) => {
				let batch = &mut target.batches[index];
				batch.instances.push(entity);
				batch.command.instance_count += 1;

				for later in &mut target.batches[index + 1..] {
					later.command.base_instance += 1;
				}
				false
			},
			None => {
				let command = IndirectCommand {
					count: mesh.indices().len() as u32,
					instance_count: 1,
					first_index: target.indices.len() as u32,
					base_vertex: target.vertices.len() as u32,
					base_instance: target.instance_count,
				};

				target.vertices.extend_from_slice(mesh.vertices());
				target.indices.extend_from_slice(mesh.indices());
				target.batches.push(MeshBatch {
					mesh: mesh.id(),
					command,
					vertex_count: mesh.vertices().len() as u32,
					instances: vec![entity],
				});
				target.data_changed = true;

				debug!("created batch for mesh {:?} under shader {:?}", mesh.id(), shader);
				true
			},
		};

		target.instance_count += 1;
		created
	}

	/// Remove one instance of `mesh` owned by `entity` from `shader`.
	///
	/// The last instance of a mesh erases its vertex and index spans, shifting every later
	/// batch down. Returns `true` in that case.
	///
	/// # Panics
	/// Panics if `entity` has no instance of `mesh` under `shader`.
	pub fn remove(&mut self, shader: ShaderId, mesh: MeshId, entity: Entity) -> bool {
		let mut target = match self.shaders.entry(shader) {
			Entry::Occupied(entry) => entry,
			Entry::Vacant(_) => panic!("No batches for shader {shader:?}"),
		};
		let shader_batch = target.get_mut();

		let index = match shader_batch.batches.iter().position(|b| b.mesh == mesh) {
			Some(index) => index,
			None => panic!("No batch for mesh {mesh:?} under shader {shader:?}"),
		};

		let batch = &mut shader_batch.batches[index];
		let slot = match batch.instances.iter().position(|e| *e == entity) {
			Some(slot) => slot,
			None => panic!("Entity {entity} has no instance of mesh {mesh:?} under shader {shader:?}"),
		};

		batch.instances.remove(slot);
		batch.command.instance_count -= 1;

		let evacuated = batch.command.instance_count == 0;
		if evacuated {
			let removed = shader_batch.batches.remove(index);
			let vertices = removed.command.base_vertex as usize..(removed.command.base_vertex + removed.vertex_count) as usize;
			let indices = removed.command.first_index as usize..(removed.command.first_index + removed.command.count) as usize;

			shader_batch.vertices.drain(vertices);
			shader_batch.indices.drain(indices);

			for later in &mut shader_batch.batches[index..] {
				later.command.base_vertex -= removed.vertex_count;
				later.command.first_index -= removed.command.count;
				later.command.base_instance -= 1;
			}

			shader_batch.data_changed = true;
			debug!("evacuated batch for mesh {mesh:?} under shader {shader:?}");
		} else {
			for later in &mut shader_batch.batches[index + 1..] {
				later.command.base_instance -= 1;
			}
		}

		shader_batch.instance_count -= 1;
		if shader_batch.batches.is_empty() {
			target.remove();
		}

		evacuated
	}

	pub fn shader(&self, shader: ShaderId) -> Option<&ShaderBatch> {
		self.shaders.get(&shader)
	}

	/// Every shader with at least one instance, in ascending id order.
	pub fn shaders(&self) -> impl Iterator<Item = (ShaderId, &ShaderBatch)> + '_ {
		self.shaders.iter().map(|(id, batch)| (*id, batch))
	}

	pub fn instance_count(&self, shader: ShaderId) -> usize {
		self.shaders.get(&shader).map(|s| s.instance_count()).unwrap_or(0)
	}

	pub fn commands(&self, shader: ShaderId) -> Vec<IndirectCommand> {
		self.shaders.get(&shader).map(|s| s.commands()).unwrap_or_default()
	}

	pub fn clear_data_changed(&mut self) {
		for shader in self.shaders.values_mut() {
			shader.data_changed = false;
		}
	}

	pub fn is_empty(&self) -> bool {
		self.shaders.is_empty()
	}
}
