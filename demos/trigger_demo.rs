use trigger_lite::*;

fn main() -> Result<()> {
    env_logger::init();

    let mut manager = PhysicsManager::builder()
        .on_trigger_enter(|a, b| println!("enter {a} {b}"))
        .on_trigger_stay(|a, b| println!("stay  {a} {b}"))
        .on_trigger_exit(|a, b| println!("exit  {a} {b}"))
        .build();

    manager.add_collider_shape(1);
    manager.add_collider(Collider::builder().box_shape(1, Vec3::splat(2.0)).build());

    manager.add_collider_shape(2);
    let sphere = manager.add_collider(
        Collider::builder()
            .position(Vec3::new(5.0, 0.0, 0.0))
            .sphere(2, 1.0)
            .build(),
    );

    for x in [5.0, 1.5, 0.0, 5.0] {
        manager.set_collider_transform(sphere, Vec3::new(x, 0.0, 0.0), Quat::IDENTITY)?;
        println!("-- sphere at x = {x}");
        manager.update(1.0 / 60.0);
    }

    let ray = Ray::new(Vec3::new(0.0, 0.0, -5.0), Vec3::Z);
    match manager.raycast(&ray, 10.0) {
        Some(hit) => println!("ray hit shape {} at {:.2}", hit.shape_id, hit.distance),
        None => println!("ray missed"),
    }

    if let Err(err) = manager.set_gravity(Vec3::new(0.0, -9.81, 0.0)) {
        println!("{err}");
    }
    Ok(())
}
