use crate::render::{
	BackendCall, CameraSystem, FramebufferId, Geometry, HeadlessBackend, Material, Mesh, Model, RenderEvent,
	RenderSystem, ShaderId, ShaderSource, SharedBackend, TextureId,
};
use crate::scene::{Camera, MeshRenderer, RenderTarget, Transform};
use crate::glm::{Mat4, Vec3, Vec4};
use crate::context::EcsContext;
use crate::app::WindowResized;
use crate::entities::Entity;
use std::cell::RefCell;
use std::sync::Arc;
use std::rc::Rc;

fn setup() -> (EcsContext, Rc<RefCell<HeadlessBackend>>) {
	let headless = Rc::new(RefCell::new(HeadlessBackend::new()));
	let backend: SharedBackend = headless.clone();

	let mut ecs = EcsContext::new();
	ecs.register_component::<Transform>();
	ecs.register_component::<Camera>();
	ecs.register_component::<MeshRenderer>();

	ecs.register_system(RenderSystem::new(backend, (800, 600), Vec4::new(0.0, 0.0, 0.0, 1.0)));
	ecs.set_system_mask::<RenderSystem>(ecs.mask_of::<(MeshRenderer,)>());
	ecs.accept_subset::<RenderSystem>(true);
	(ecs, headless)
}

fn model(mesh: Arc<Mesh>, material: Material) -> Arc<Model> {
	Arc::new(Model::from_mesh(mesh, Arc::new(material)))
}

fn spawn(ecs: &mut EcsContext, model: &Arc<Model>, position: Vec3) -> Entity {
	let entity = ecs.create_entity();
	ecs.add_component(entity, Transform::from_position(position));
	ecs.add_component(entity, MeshRenderer::new(model.clone()));
	entity
}

fn window_event() -> RenderEvent {
	RenderEvent {
		view: Mat4::identity(),
		projection: Mat4::identity(),
		target: None,
	}
}

fn uploads(backend: &HeadlessBackend) -> usize {
	backend.count(|call| matches!(call, BackendCall::ReplaceVertexBuffer { .. }))
}

#[test]
pub fn geometry_is_uploaded_only_after_it_changed() {
	let (mut ecs, backend) = setup();
	let cube = model(Geometry::cube(), Material::default());

	spawn(&mut ecs, &cube, Vec3::zeros());
	spawn(&mut ecs, &cube, Vec3::zeros());
	ecs.run_systems(0.0);

	ecs.notify(&window_event());
	ecs.notify(&window_event());
	assert_eq!(uploads(&backend.borrow()), 1);
	assert_eq!(backend.borrow().buffers(ShaderId::DEFAULT).unwrap().vertices.len(), 24);

	spawn(&mut ecs, &model(Geometry::quad(), Material::default()), Vec3::zeros());
	ecs.notify(&window_event());
	assert_eq!(uploads(&backend.borrow()), 2);
	assert_eq!(backend.borrow().buffers(ShaderId::DEFAULT).unwrap().vertices.len(), 28);
	assert_eq!(backend.borrow().buffers(ShaderId::DEFAULT).unwrap().commands.len(), 2);
}

#[test]
pub fn instance_buffers_carry_model_matrices() {
	let (mut ecs, backend) = setup();
	let cube = model(Geometry::cube(), Material::default());
	let near = Vec3::new(1.0, 2.0, 3.0);
	let far = Vec3::new(-4.0, 0.0, 8.0);

	spawn(&mut ecs, &cube, near);
	spawn(&mut ecs, &cube, far);
	ecs.run_systems(0.0);
	ecs.notify(&window_event());

	let backend = backend.borrow();
	let buffers = backend.buffers(ShaderId::DEFAULT).unwrap();
	assert_eq!(buffers.instances.len(), 2);
	assert_eq!(buffers.instances[0], *Transform::from_position(near).model_matrix());
	assert_eq!(buffers.instances[1], *Transform::from_position(far).model_matrix());
	assert_eq!(buffers.commands[0].instance_count, 2);
	assert_eq!(
		backend.calls().last(),
		Some(&BackendCall::MultiDrawIndirect {
			shader: ShaderId::DEFAULT,
			command_count: 1,
		})
	);
}

#[test]
pub fn instance_slots_follow_changes_made_after_the_last_update() {
	let (mut ecs, backend) = setup();
	let cube = model(Geometry::cube(), Material::default());
	let first = spawn(&mut ecs, &cube, Vec3::new(1.0, 0.0, 0.0));
	spawn(&mut ecs, &cube, Vec3::new(2.0, 0.0, 0.0));
	ecs.run_systems(0.0);

	ecs.destroy_entity(first);
	ecs.notify(&window_event());
	{
		let backend = backend.borrow();
		let instances = &backend.buffers(ShaderId::DEFAULT).unwrap().instances;
		assert_eq!(instances.len(), 1);
		assert_eq!(instances[0], *Transform::from_position(Vec3::new(2.0, 0.0, 0.0)).model_matrix());
	}

	spawn(&mut ecs, &cube, Vec3::new(3.0, 0.0, 0.0));
	ecs.system::<RenderSystem>().render(&window_event());
	let backend = backend.borrow();
	let instances = &backend.buffers(ShaderId::DEFAULT).unwrap().instances;
	assert_eq!(instances.len(), 2);
	assert_eq!(instances[1], *Transform::from_position(Vec3::new(3.0, 0.0, 0.0)).model_matrix());
}

#[test]
pub fn destroyed_entities_leave_the_batches() {
	let (mut ecs, backend) = setup();
	let cube = model(Geometry::cube(), Material::default());
	let first = spawn(&mut ecs, &cube, Vec3::zeros());
	let second = spawn(&mut ecs, &cube, Vec3::zeros());

	ecs.destroy_entity(first);
	{
		let batches = ecs.system::<RenderSystem>().batches();
		let batch = batches.shader(ShaderId::DEFAULT).unwrap().batch(cube.parts()[0].mesh.id()).unwrap();
		assert_eq!(batch.instances(), &[second]);
		assert_eq!(batch.command().base_instance, 0);
	}

	ecs.remove_component::<MeshRenderer>(second);
	assert!(ecs.system::<RenderSystem>().batches().is_empty());
	assert_eq!(
		backend.borrow().calls().iter().rev().find(|call| matches!(call, BackendCall::ResizeInstanceBuffer { .. })),
		Some(&BackendCall::ResizeInstanceBuffer {
			shader: ShaderId::DEFAULT,
			len: 0,
		})
	);
}

#[test]
pub fn textures_are_bound_once_per_shader_in_id_order() {
	let (mut ecs, backend) = setup();
	let bricks = model(Geometry::cube(), Material::default().with_diffuse(TextureId(3)));
	let grass = model(Geometry::quad(), Material::default().with_diffuse(TextureId(1)));

	spawn(&mut ecs, &bricks, Vec3::zeros());
	spawn(&mut ecs, &grass, Vec3::zeros());
	spawn(&mut ecs, &bricks, Vec3::zeros());
	backend.borrow_mut().clear_calls();
	ecs.notify(&window_event());

	let bound: Vec<BackendCall> = backend
		.borrow()
		.calls()
		.iter()
		.filter(|call| matches!(call, BackendCall::BindTexture { .. }))
		.cloned()
		.collect();
	assert_eq!(
		bound,
		vec![
			BackendCall::BindTexture {
				slot: 0,
				texture: TextureId(1),
			},
			BackendCall::BindTexture {
				slot: 1,
				texture: TextureId(3),
			},
		]
	);
}

#[test]
pub fn offscreen_targets_restore_the_window_viewport() {
	let (ecs, backend) = setup();
	let target = RenderTarget {
		framebuffer: FramebufferId(7),
		width: 256,
		height: 128,
	};

	ecs.notify(&RenderEvent {
		target: Some(target),
		..window_event()
	});

	let backend = backend.borrow();
	let calls = backend.calls();
	assert_eq!(calls[0], BackendCall::BindFramebuffer(Some(FramebufferId(7))));
	assert_eq!(calls[1], BackendCall::SetViewport { width: 256, height: 128 });
	assert_eq!(
		&calls[calls.len() - 2..],
		&[BackendCall::BindFramebuffer(None), BackendCall::SetViewport { width: 800, height: 600 }]
	);
}

#[test]
pub fn window_resizes_move_the_viewport() {
	let (ecs, backend) = setup();
	ecs.notify(&WindowResized { width: 1024, height: 768 });
	assert_eq!(ecs.system::<RenderSystem>().viewport(), (1024, 768));

	ecs.notify(&window_event());
	assert!(backend.borrow().calls().contains(&BackendCall::SetViewport { width: 1024, height: 768 }));
}

#[test]
pub fn failing_shaders_fall_back_to_the_default() {
	let headless = Rc::new(RefCell::new(HeadlessBackend::new().fail_shaders()));
	let render = RenderSystem::new(headless.clone(), (1, 1), Vec4::zeros());
	let source = ShaderSource {
		name: String::from("toon"),
		vertex: String::new(),
		fragment: String::new(),
	};

	assert_eq!(render.create_shader(&source), ShaderId::DEFAULT);
	assert_eq!(headless.borrow().calls(), &[BackendCall::CreateShader(String::from("toon"))]);

	let working = Rc::new(RefCell::new(HeadlessBackend::new()));
	let render = RenderSystem::new(working, (1, 1), Vec4::zeros());
	assert_eq!(render.create_shader(&source), ShaderId(1));
}

#[test]
pub fn meshes_under_different_shaders_draw_separately() {
	let (mut ecs, backend) = setup();
	spawn(&mut ecs, &model(Geometry::cube(), Material::new(ShaderId(2))), Vec3::zeros());
	spawn(&mut ecs, &model(Geometry::quad(), Material::default()), Vec3::zeros());
	backend.borrow_mut().clear_calls();
	ecs.run_systems(0.0);
	ecs.notify(&window_event());

	let bound: Vec<ShaderId> = backend
		.borrow()
		.calls()
		.iter()
		.filter_map(|call| match call {
			BackendCall::BindShader(shader) => Some(*shader),
			_ => None,
		})
		.collect();
	assert_eq!(bound, vec![ShaderId::DEFAULT, ShaderId(2)]);
}

#[test]
pub fn cameras_render_offscreen_first_and_main_last() {
	let (mut ecs, backend) = setup();
	ecs.register_system(CameraSystem::new());
	ecs.set_system_mask::<CameraSystem>(ecs.mask_of::<(Camera,)>());
	ecs.accept_subset::<CameraSystem>(true);

	let main = ecs.create_entity();
	let mut camera = Camera::default();
	camera.set_is_main(true);
	ecs.add_component(main, Transform::default());
	ecs.add_component(main, camera);

	let mirror = ecs.create_entity();
	let mut camera = Camera::default();
	camera.set_target(Some(RenderTarget {
		framebuffer: FramebufferId(3),
		width: 64,
		height: 64,
	}));
	ecs.add_component(mirror, Transform::default());
	ecs.add_component(mirror, camera);

	let idle = ecs.create_entity();
	ecs.add_component(idle, Camera::default());

	ecs.notify(&WindowResized { width: 1000, height: 500 });
	ecs.run_systems(0.0);

	let framebuffers: Vec<BackendCall> = backend
		.borrow()
		.calls()
		.iter()
		.filter(|call| matches!(call, BackendCall::BindFramebuffer(_)))
		.cloned()
		.collect();
	assert_eq!(
		framebuffers,
		vec![
			BackendCall::BindFramebuffer(Some(FramebufferId(3))),
			BackendCall::BindFramebuffer(None),
			BackendCall::BindFramebuffer(None),
		]
	);
	assert_eq!(backend.borrow().count(|call| *call == BackendCall::Clear), 2);

	assert_eq!(ecs.get::<Camera>(main).aspect(), 2.0);
	assert_eq!(ecs.get::<Camera>(mirror).aspect(), 16.0 / 9.0);
	assert_eq!(ecs.get::<Camera>(idle).aspect(), 2.0);
}
