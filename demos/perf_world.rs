use bonk_rigid::*;
use glam::Vec2;
use std::time::Instant;

fn lcg(seed: &mut u32) -> u32 {
    *seed = seed.wrapping_mul(1664525).wrapping_add(1013904223);
    *seed
}

fn unit(seed: &mut u32) -> f32 {
    lcg(seed) as f32 / u32::MAX as f32
}

fn main() {
    let mut world = PhysicsWorld::new(
        WorldConfig::default()
            .with_bounds(Bounds::new(10.0, 10.0))
            .with_timing(true),
    );

    let n = 1_000usize; // all-pairs, so keep this modest
    let mut seed = 1u32;
    for i in 0..n {
        let p = Vec2::new(unit(&mut seed) * 18.0 - 9.0, unit(&mut seed) * 18.0 - 9.0);
        let v = Vec2::new(unit(&mut seed) * 4.0 - 2.0, unit(&mut seed) * 4.0 - 2.0);
        let mut shape = match i % 3 {
            0 => Shape::disc(p, presets::DISC_RADIUS, 1.0),
            1 => Shape::rectangle(p, presets::RECT_WIDTH, presets::RECT_HEIGHT, 1.0),
            _ => ConvexPolygon::pentagon(p, 1.0).into(),
        };
        shape.body_mut().velocity = v;
        world.add(shape);
    }

    let steps = 60;
    let t0 = Instant::now();
    let mut collisions_ms = 0.0;
    for _ in 0..steps {
        world.step(1.0 / 60.0);
        if let Some(t) = world.timing() {
            collisions_ms += t.collisions_ms;
        }
    }
    let total = t0.elapsed();
    let stats = world.debug_stats();
    println!(
        "N={} steps={} total={:?} per_step={:.3}ms collisions={:.3}ms/step pairs={} intersecting={} resolved={}",
        n,
        steps,
        total,
        total.as_secs_f64() * 1000.0 / steps as f64,
        collisions_ms / steps as f64,
        stats.candidate_pairs,
        stats.intersecting_pairs,
        stats.resolved_contacts
    );
}
