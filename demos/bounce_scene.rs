use bonk_rigid::*;
use glam::Vec2;

fn main() {
    tracing_subscriber::fmt::init();

    let mut world = PhysicsWorld::new(WorldConfig::default().with_velocity_vectors(true));

    let left = world.add(Disc::new(Vec2::new(-0.5, 0.0), presets::DISC_RADIUS, 1.0).into());
    let right = world.add(Disc::new(Vec2::new(0.5, 0.0), presets::DISC_RADIUS, 1.0).into());
    let lid = world.add(Shape::rectangle(
        Vec2::new(0.0, 0.5),
        presets::RECT_WIDTH,
        presets::RECT_HEIGHT,
        1.0,
    ));
    for (h, vx) in [(left, 0.5), (right, -0.5)] {
        if let Some(s) = world.shape_mut(h) {
            s.body_mut().velocity = Vec2::new(vx, 0.0);
        }
    }

    // Spawns a click would produce.
    let pentagon = world.add(ConvexPolygon::pentagon(Vec2::new(-0.4, 0.6), 1.0).into());
    let triangle = world.add(
        ConvexPolygon::triangle(Vec2::new(0.4, 0.6), presets::POLYGON_SIZE, 1.0).into(),
    );
    let mut floor = Rectangle::new(Vec2::new(0.0, -0.8), 1.2, 0.1, 10.0);
    floor.body.is_static = true;
    let floor = world.add(floor.into());

    println!(
        "Inserted discs={:?},{:?} lid={:?} pentagon={:?} triangle={:?} floor={:?}",
        left, right, lid, pentagon, triangle, floor
    );

    let dt = 1.0 / 60.0;
    for frame in 0..240 {
        if frame == 60 {
            // Drag from the disc's position a little to the upper right.
            if let Some(p) = world.shape(left).map(|s| s.body().position) {
                if let Err(err) = world.launch(left, p, p + Vec2::new(0.2, 0.3)) {
                    eprintln!("launch failed: {err}");
                }
            }
            if let Some(h) = world.body_at(Vec2::new(0.4, 0.6)) {
                println!("picked {:?} under the cursor", h);
            }
        }
        world.step(dt);
        let stats = world.debug_stats();
        if stats.resolved_contacts > 0 {
            println!(
                "frame {:>3}: {} intersecting, {} resolved, {} clamped",
                frame, stats.intersecting_pairs, stats.resolved_contacts, stats.boundary_clamps
            );
        }
    }

    for (i, s) in world.shapes().iter().enumerate() {
        let b = s.body();
        println!(
            "#{} {:?} pos=({:.3},{:.3}) vel=({:.3},{:.3})",
            i,
            s.kind(),
            b.position.x,
            b.position.y,
            b.velocity.x,
            b.velocity.y
        );
    }
    for (p, v) in world.velocity_vectors() {
        println!("vector ({:.2},{:.2}) -> ({:.2},{:.2})", p.x, p.y, p.x + v.x, p.y + v.y);
    }
}
