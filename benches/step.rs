//! Benchmarks for the all-pairs world step.

use bonk_rigid::*;
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use glam::Vec2;

fn lcg(seed: &mut u32) -> f32 {
    *seed = seed.wrapping_mul(1664525).wrapping_add(1013904223);
    *seed as f32 / u32::MAX as f32
}

fn mixed_world(n: usize) -> PhysicsWorld {
    let mut world = PhysicsWorld::new(WorldConfig::default().with_bounds(Bounds::new(3.0, 3.0)));
    let mut seed = 7u32;
    for i in 0..n {
        let p = Vec2::new(lcg(&mut seed) * 5.0 - 2.5, lcg(&mut seed) * 5.0 - 2.5);
        let shape = match i % 3 {
            0 => Shape::disc(p, presets::DISC_RADIUS, 1.0),
            1 => Shape::rectangle(p, presets::RECT_WIDTH, presets::RECT_HEIGHT, 1.0),
            _ => ConvexPolygon::pentagon(p, 1.0).into(),
        };
        world.add(shape);
    }
    world
}

fn bench_disc_pair_contact(c: &mut Criterion) {
    let a = Shape::disc(Vec2::new(-0.05, 0.0), 0.1, 1.0);
    let b = Shape::disc(Vec2::new(0.05, 0.0), 0.1, 1.0);
    c.bench_function("disc_disc_contact", |bch| {
        bch.iter(|| black_box(&a).contact(black_box(&b)));
    });
}

fn bench_polygon_sat(c: &mut Criterion) {
    let a = ConvexPolygon::pentagon(Vec2::ZERO, 1.0);
    let b = Shape::rectangle(Vec2::new(0.12, 0.05), 0.2, 0.15, 1.0);
    c.bench_function("pentagon_rect_sat", |bch| {
        bch.iter(|| black_box(&a).intersects(black_box(&b)));
    });
}

fn bench_world_step(c: &mut Criterion) {
    c.bench_function("world_100_mixed_60_steps", |bch| {
        bch.iter(|| {
            let mut world = mixed_world(100);
            for _ in 0..60 {
                world.step(1.0 / 60.0);
            }
            world.debug_stats()
        });
    });
}

criterion_group!(benches, bench_disc_pair_contact, bench_polygon_sat, bench_world_step);
criterion_main!(benches);
