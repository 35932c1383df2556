use approx::assert_relative_eq;
use trigger_lite::*;

fn add_sphere(manager: &mut PhysicsManager, id: ShapeId, position: Vec3, radius: f32) {
    manager.add_collider_shape(id);
    manager.add_collider(
        Collider::builder()
            .position(position)
            .sphere(id, radius)
            .build(),
    );
}

#[test]
fn ray_at_sphere_center_hits_surface() {
    let mut manager = PhysicsManager::default();
    add_sphere(&mut manager, 1, Vec3::new(0.0, 0.0, 8.0), 1.5);

    let hit = manager
        .raycast(&Ray::new(Vec3::ZERO, Vec3::Z), 100.0)
        .expect("ray should hit the sphere");
    assert_eq!(hit.shape_id, 1);
    assert_relative_eq!(hit.distance, 6.5, epsilon = 1e-5);
    assert_relative_eq!(hit.point.z, 6.5, epsilon = 1e-5);
    assert_relative_eq!(hit.normal.z, -1.0, epsilon = 1e-5);
}

#[test]
fn raycast_returns_closest_across_colliders() {
    let mut manager = PhysicsManager::default();
    add_sphere(&mut manager, 1, Vec3::new(0.0, 0.0, 8.0), 0.5);
    add_sphere(&mut manager, 2, Vec3::new(0.0, 0.0, 4.0), 0.5);
    add_sphere(&mut manager, 3, Vec3::new(0.0, 0.0, 12.0), 0.5);

    let hit = manager
        .raycast(&Ray::new(Vec3::ZERO, Vec3::Z), 20.0)
        .expect("ray should hit");
    assert_eq!(hit.shape_id, 2);
    assert_relative_eq!(hit.distance, 3.5, epsilon = 1e-5);
}

#[test]
fn max_distance_is_an_exclusive_bound() {
    let mut manager = PhysicsManager::default();
    add_sphere(&mut manager, 1, Vec3::new(0.0, 0.0, 5.0), 1.0);
    let ray = Ray::new(Vec3::ZERO, Vec3::Z);

    assert!(manager.raycast(&ray, 4.0).is_none());
    assert!(!manager.raycast_any(&ray, 4.0));
    assert!(manager.raycast(&ray, 4.01).is_some());
    assert!(manager.raycast_any(&ray, 4.01));
}

#[test]
fn ray_missing_box_slab_reports_no_hit() {
    let mut manager = PhysicsManager::default();
    manager.add_collider_shape(7);
    manager.add_collider(
        Collider::builder()
            .box_shape(7, Vec3::splat(2.0))
            .build(),
    );

    let above = Ray::new(Vec3::new(-5.0, 1.5, 0.0), Vec3::X);
    assert!(manager.raycast(&above, 100.0).is_none());

    let mut reported = RaycastHit::default();
    let hit = manager.raycast_with(&above, 100.0, |shape_id, distance, point, normal| {
        reported = RaycastHit {
            shape_id,
            distance,
            point,
            normal,
        };
    });
    assert!(!hit);
    assert!(!reported.is_valid());
    assert_eq!(reported.shape_id, INVALID_SHAPE_ID);
}

#[test]
fn rotated_box_hit_reports_world_normal() {
    let mut manager = PhysicsManager::default();
    manager.add_collider_shape(3);
    manager.add_collider(
        Collider::builder()
            .position(Vec3::new(0.0, 0.0, 10.0))
            .rotation(Quat::from_rotation_y(std::f32::consts::FRAC_PI_2))
            .box_shape(3, Vec3::new(4.0, 2.0, 2.0))
            .build(),
    );

    let mut seen = None;
    let hit = manager.raycast_with(&Ray::new(Vec3::ZERO, Vec3::Z), 50.0, |id, distance, _, normal| {
        seen = Some((id, distance, normal));
    });
    assert!(hit);

    // The long local X axis now lies along world Z, so the near face sits at z = 8.
    let (id, distance, normal) = seen.expect("callback should run on hit");
    assert_eq!(id, 3);
    assert_relative_eq!(distance, 8.0, epsilon = 1e-4);
    assert_relative_eq!(normal.z, -1.0, epsilon = 1e-4);
}

#[test]
fn raycast_sees_shapes_regardless_of_registration() {
    let mut manager = PhysicsManager::default();
    manager.add_collider(
        Collider::builder()
            .position(Vec3::new(3.0, 0.0, 0.0))
            .sphere(11, 1.0)
            .build(),
    );
    let hit = manager.raycast(&Ray::new(Vec3::ZERO, Vec3::X), 10.0);
    assert_eq!(hit.map(|hit| hit.shape_id), Some(11));
}
