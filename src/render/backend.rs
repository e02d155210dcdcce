use crate::render::{FramebufferId, LightUniform, ShaderId, TextureId, Vertex};
use crate::glm::{Mat4, Vec4};
use crate::assets::TextureData;
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Debug, thiserror::Error)]
pub enum GraphicsError {
	#[error("failed to compile {stage} shader: {log}")]
	Compile { stage: &'static str, log: String },

	#[error("failed to link shader program: {0}")]
	Link(String),

	#[error("failed to upload texture: {0}")]
	Texture(String),
}

/// One draw of `instance_count` instances of a mesh living inside a shader's shared buffers.
/// Laid out the way indirect multi-draw expects it.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct IndirectCommand {
	pub count: u32,
	pub instance_count: u32,
	pub first_index: u32,
	pub base_vertex: u32,
	pub base_instance: u32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ShaderSource {
	pub name: String,
	pub vertex: String,
	pub fragment: String,
}

/// The graphics API the render systems drive.
///
/// Buffers are addressed by the shader they belong to; a backend creates them lazily.
pub trait GraphicsBackend {
	fn create_shader(&mut self, source: &ShaderSource) -> Result<ShaderId, GraphicsError>;

	fn create_texture(&mut self, texture: &TextureData) -> Result<TextureId, GraphicsError>;

	/// Replace the whole vertex buffer of `shader`.
	fn replace_vertex_buffer(&mut self, shader: ShaderId, vertices: &[Vertex]);

	/// Replace the whole index buffer of `shader`.
	fn replace_index_buffer(&mut self, shader: ShaderId, indices: &[u32]);

	/// Re-specify the instance transform buffer of `shader` to hold `len` matrices.
	fn resize_instance_buffer(&mut self, shader: ShaderId, len: usize);

	/// Overwrite the instance transform buffer of `shader` from the start.
	fn update_instance_buffer(&mut self, shader: ShaderId, transforms: &[Mat4]);

	fn set_indirect_commands(&mut self, shader: ShaderId, commands: &[IndirectCommand]);

	fn bind_shader(&mut self, shader: ShaderId);

	fn bind_texture(&mut self, slot: u32, texture: TextureId);

	/// Draw the first `command_count` indirect commands of `shader`.
	fn multi_draw_indirect(&mut self, shader: ShaderId, command_count: usize);

	fn set_camera(&mut self, view: &Mat4, projection: &Mat4);

	fn set_viewport(&mut self, width: u32, height: u32);

	fn clear(&mut self, colour: &Vec4);

	/// `None` binds the window's default framebuffer.
	fn bind_framebuffer(&mut self, framebuffer: Option<FramebufferId>);

	fn set_light_count(&mut self, count: usize);

	fn set_light(&mut self, index: usize, light: &LightUniform);
}

pub type SharedBackend = Rc<RefCell<dyn GraphicsBackend>>;
