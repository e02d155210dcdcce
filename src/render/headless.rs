use crate::render::{
	FramebufferId, GraphicsBackend, GraphicsError, IndirectCommand, LightUniform, ShaderId, ShaderSource, TextureId,
	Vertex,
};
use crate::glm::{Mat4, Vec4};
use crate::assets::TextureData;
use std::collections::HashMap;

/// A call received by a [HeadlessBackend], without its bulk payload.
#[derive(Clone, Debug, PartialEq)]
pub enum BackendCall {
	CreateShader(String),
	CreateTexture { width: u32, height: u32 },
	ReplaceVertexBuffer { shader: ShaderId, len: usize },
	ReplaceIndexBuffer { shader: ShaderId, len: usize },
	ResizeInstanceBuffer { shader: ShaderId, len: usize },
	UpdateInstanceBuffer { shader: ShaderId, len: usize },
	SetIndirectCommands { shader: ShaderId, len: usize },
	BindShader(ShaderId),
	BindTexture { slot: u32, texture: TextureId },
	MultiDrawIndirect { shader: ShaderId, command_count: usize },
	SetCamera,
	SetViewport { width: u32, height: u32 },
	Clear,
	BindFramebuffer(Option<FramebufferId>),
	SetLightCount(usize),
	SetLight(usize),
}

/// Per-shader buffer contents as last uploaded.
#[derive(Clone, Debug, Default)]
pub struct HeadlessBuffers {
	pub vertices: Vec<Vertex>,
	pub indices: Vec<u32>,
	pub instances: Vec<Mat4>,
	pub commands: Vec<IndirectCommand>,
}

/// A [GraphicsBackend] that draws nothing and remembers everything it was asked to do.
#[derive(Debug, Default)]
pub struct HeadlessBackend {
	calls: Vec<BackendCall>,
	buffers: HashMap<ShaderId, HeadlessBuffers>,
	lights: Vec<LightUniform>,
	light_count: usize,
	next_shader: u32,
	next_texture: u32,
	fail_shaders: bool,
}

impl HeadlessBackend {
	pub fn new() -> Self {
		Self::default()
	}

	/// Make every subsequent [create_shader](GraphicsBackend::create_shader) call fail.
	pub fn fail_shaders(mut self) -> Self {
		self.fail_shaders = true;
		self
	}

	pub fn calls(&self) -> &[BackendCall] {
		&self.calls
	}

	pub fn clear_calls(&mut self) {
		self.calls.clear();
	}

	pub fn count(&self, predicate: impl Fn(&BackendCall) -> bool) -> usize {
		self.calls.iter().filter(|call| predicate(call)).count()
	}

	pub fn buffers(&self, shader: ShaderId) -> Option<&HeadlessBuffers> {
		self.buffers.get(&shader)
	}

	pub fn light_count(&self) -> usize {
		self.light_count
	}

	pub fn light(&self, index: usize) -> Option<&LightUniform> {
		self.lights.get(index)
	}

	fn buffers_mut(&mut self, shader: ShaderId) -> &mut HeadlessBuffers {
		self.buffers.entry(shader).or_default()
	}
}

impl GraphicsBackend for HeadlessBackend {
	fn create_shader(&mut self, source: &ShaderSource) -> Result<ShaderId, GraphicsError> {
		self.calls.push(BackendCall::CreateShader(source.name.clone()));
		if self.fail_shaders {
			return Err(GraphicsError::Compile {
				stage: "vertex",
				log: format!("{}: headless compilation disabled", source.name),
			});
		}

		self.next_shader += 1;
		Ok(ShaderId(self.next_shader))
	}

	fn create_texture(&mut self, texture: &TextureData) -> Result<TextureId, GraphicsError> {
		self.calls.push(BackendCall::CreateTexture {
			width: texture.width,
			height: texture.height,
		});

		let id = TextureId(self.next_texture);
		self.next_texture += 1;
		Ok(id)
	}

	fn replace_vertex_buffer(&mut self, shader: ShaderId, vertices: &[Vertex]) {
		self.calls.push(BackendCall::ReplaceVertexBuffer {
			shader,
			len: vertices.len(),
		});
		self.buffers_mut(shader).vertices = vertices.to_vec();
	}

	fn replace_index_buffer(&mut self, shader: ShaderId, indices: &[u32]) {
		self.calls.push(BackendCall::ReplaceIndexBuffer {
			shader,
			len: indices.len(),
		});
		self.buffers_mut(shader).indices = indices.to_vec();
	}

	fn resize_instance_buffer(&mut self, shader: ShaderId, len: usize) {
		self.calls.push(BackendCall::ResizeInstanceBuffer { shader, len });
		self.buffers_mut(shader).instances = vec![Mat4::identity(); len];
	}

	fn update_instance_buffer(&mut self, shader: ShaderId, transforms: &[Mat4]) {
		self.calls.push(BackendCall::UpdateInstanceBuffer {
			shader,
			len: transforms.len(),
		});

		let instances = &mut self.buffers_mut(shader).instances;
		let len = transforms.len().min(instances.len());
		instances[..len].copy_from_slice(&transforms[..len]);
	}

	fn set_indirect_commands(&mut self, shader: ShaderId, commands: &[IndirectCommand]) {
		self.calls.push(BackendCall::SetIndirectCommands {
			shader,
			len: commands.len(),
		});
		self.buffers_mut(shader).commands = commands.to_vec();
	}

	fn bind_shader(&mut self, shader: ShaderId) {
		self.calls.push(BackendCall::BindShader(shader));
	}

	fn bind_texture(&mut self, slot: u32, texture: TextureId) {
		self.calls.push(BackendCall::BindTexture { slot, texture });
	}

	fn multi_draw_indirect(&mut self, shader: ShaderId, command_count: usize) {
		self.calls.push(BackendCall::MultiDrawIndirect { shader, command_count });
	}

	fn set_camera(&mut self, _view: &Mat4, _projection: &Mat4) {
		self.calls.push(BackendCall::SetCamera);
	}

	fn set_viewport(&mut self, width: u32, height: u32) {
		self.calls.push(BackendCall::SetViewport { width, height });
	}

	fn clear(&mut self, _colour: &Vec4) {
		self.calls.push(BackendCall::Clear);
	}

	fn bind_framebuffer(&mut self, framebuffer: Option<FramebufferId>) {
		self.calls.push(BackendCall::BindFramebuffer(framebuffer));
	}

	fn set_light_count(&mut self, count: usize) {
		self.calls.push(BackendCall::SetLightCount(count));
		self.light_count = count;
	}

	fn set_light(&mut self, index: usize, light: &LightUniform) {
		self.calls.push(BackendCall::SetLight(index));
		if self.lights.len() <= index {
			self.lights.resize(index + 1, LightUniform::default());
		}
		self.lights[index] = *light;
	}
}
