use criterion::*;
use kuai_ecs::glm::{Mat4, Vec3};
use kuai_ecs::prelude::*;
use kuai_ecs::render::{BatchAllocator, Geometry, ShaderId};

const COUNT: usize = 10000;

#[derive(Default, Component)]
struct Model(Mat4);

#[derive(Default, Component)]
struct Translation(Vec3);

#[derive(Default, Component)]
struct Velocity(Vec3);

struct Movement;

impl System for Movement {
    fn update(&mut self, dt: f32, entities: &[Entity], ctx: &mut SystemContext<'_>) {
        for entity in entities.iter().copied() {
            let velocity = ctx.get::<Velocity>(entity).0;
            let translation = ctx.get_mut::<Translation>(entity);
            translation.0 += velocity * dt;
            let translation = translation.0;
            ctx.get_mut::<Model>(entity).0 = Mat4::new_translation(&translation);
        }
    }
}

fn context() -> EcsContext {
    let mut ecs = EcsContext::with_config(EcsConfig::default().with_max_entities(COUNT));
    ecs.register_component::<Model>();
    ecs.register_component::<Translation>();
    ecs.register_component::<Velocity>();
    ecs
}

fn populate(ecs: &mut EcsContext) -> Vec<Entity> {
    (0..COUNT)
        .map(|_| {
            let entity = ecs.create_entity();
            ecs.add_component(entity, Model::default());
            ecs.add_component(entity, Translation::default());
            ecs.add_component(entity, Velocity(Vec3::new(1.0, 0.0, 0.0)));
            entity
        })
        .collect()
}

fn create_entities(c: &mut Criterion) {
    c.bench_function("Create entities", |b| {
        b.iter_batched(
            context,
            |mut ecs| {
                for _ in 0..COUNT {
                    black_box(ecs.create_entity());
                }
            },
            BatchSize::PerIteration,
        );
    });
}

fn destroy_entities(c: &mut Criterion) {
    c.bench_function("Destroy entities", |b| {
        b.iter_batched(
            || {
                let mut ecs = context();
                let entities = populate(&mut ecs);
                (ecs, entities)
            },
            |(mut ecs, entities)| entities.into_iter().for_each(|e| ecs.destroy_entity(e)),
            BatchSize::PerIteration,
        );
    });
}

fn attach_components(c: &mut Criterion) {
    let mut group = c.benchmark_group("Components");
    group.bench_function("Attach", |b| {
        b.iter_batched(
            context,
            |mut ecs| populate(&mut ecs),
            BatchSize::PerIteration,
        );
    });

    group.bench_function("Detach", |b| {
        b.iter_batched(
            || {
                let mut ecs = context();
                let entities = populate(&mut ecs);
                (ecs, entities)
            },
            |(mut ecs, entities)| {
                for entity in entities {
                    black_box(ecs.remove_component::<Velocity>(entity));
                }
            },
            BatchSize::PerIteration,
        );
    });
    group.finish();
}

fn run_systems(c: &mut Criterion) {
    c.bench_function("Run systems", |b| {
        let mut ecs = context();
        ecs.register_system(Movement);
        ecs.set_system_mask::<Movement>(ecs.mask_of::<(Model, Translation, Velocity)>());
        populate(&mut ecs);

        b.iter(|| ecs.run_systems(1.0 / 60.0));
    });
}

fn batch_instances(c: &mut Criterion) {
    let cube = Geometry::cube();
    let quad = Geometry::quad();

    c.bench_function("Batch instances", |b| {
        b.iter_batched(
            BatchAllocator::new,
            |mut batches| {
                for i in 0..COUNT {
                    let mesh = if i % 2 == 0 { &cube } else { &quad };
                    batches.insert(ShaderId::DEFAULT, mesh, Entity::from_raw(i as u32));
                }
                batches
            },
            BatchSize::PerIteration,
        );
    });
}

criterion_group!(
    benches,
    create_entities,
    destroy_entities,
    attach_components,
    run_systems,
    batch_instances
);
criterion_main!(benches);
