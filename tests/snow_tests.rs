// Particle field dynamics: respawn/parking at the bounds, edge fading, and
// deterministic wobble.

use glam::Vec3;
use rand::rngs::StdRng;
use rand::SeedableRng;
use room_core::snow::SnowField;

fn single(start: Vec3, seed: f32, half_size: Vec3) -> SnowField {
    SnowField::from_parts(vec![start], vec![seed], half_size)
}

#[test]
fn scatter_stays_inside_the_bounds() {
    let mut rng = StdRng::seed_from_u64(11);
    let half = Vec3::new(4.0, 3.0, 4.0);
    let field = SnowField::new(200, half, &mut rng);
    assert_eq!(field.len(), 200);
    for i in 0..field.len() {
        let p = field.position(i);
        assert!(p.x >= -half.x && p.x <= half.x);
        assert!(p.y >= -half.y && p.y <= half.y);
        assert!(p.z >= -half.z && p.z <= half.z);
    }
}

#[test]
fn particle_below_the_lower_bound_respawns_at_the_top_while_emitting() {
    let mut field = single(Vec3::new(0.0, -2.0, 0.0), 0.0, Vec3::ONE);
    field.update(0.1);
    assert_eq!(field.position(0).y, 1.0);
    assert!(field.is_visible(0));
}

#[test]
fn particle_stays_parked_while_emission_is_off() {
    let mut field = single(Vec3::new(0.0, -2.0, 0.0), 0.0, Vec3::ONE);
    field.is_emitting = false;
    for _ in 0..100 {
        field.update(0.1);
    }
    assert_eq!(field.position(0).y, -2.0);
    assert!(!field.is_visible(0));
    assert_eq!(field.fade(0), 0.0);
}

#[test]
fn field_drains_when_emission_stops() {
    let mut rng = StdRng::seed_from_u64(3);
    let mut field = SnowField::new(50, Vec3::ONE, &mut rng);
    field.is_emitting = false;
    for _ in 0..2000 {
        field.update(0.1);
    }
    for i in 0..field.len() {
        assert!(field.position(i).y <= -1.0, "particle {i} still falling");
        // Nothing ever respawned, so nothing ever became visible.
        assert_eq!(field.fade(i), 0.0);
    }
}

#[test]
fn dormant_particles_are_fully_transparent() {
    // Center of the box, but never respawned: fade must stay zero.
    let mut field = single(Vec3::ZERO, 0.0, Vec3::ONE);
    field.update(0.1);
    assert!(!field.is_visible(0));
    assert_eq!(field.fade(0), 0.0);
}

#[test]
fn fade_is_full_at_the_box_center() {
    let mut field = single(Vec3::new(0.0, -2.0, 0.0), 0.0, Vec3::ONE);
    field.wobble_strength = 0.0;
    field.update(0.2); // respawn at the top
    while field.position(0).y > 0.05 {
        field.update(0.2);
    }
    field.update(0.2); // fade sampled near the center height
    assert!(field.fade(0) > 0.94, "center fade was {}", field.fade(0));
}

#[test]
fn fade_halves_at_half_the_fade_distance_from_a_face() {
    let mut field = single(Vec3::new(0.95, -2.0, 0.0), 0.0, Vec3::ONE);
    field.wobble_strength = 0.0;
    field.fade_distance = 0.1;
    field.update(0.2);
    while field.position(0).y > 0.5 {
        field.update(0.2);
    }
    field.update(0.2); // 0.05 from the +x face, fade distance 0.1
    assert!(
        (field.fade(0) - 0.5).abs() < 0.01,
        "edge fade was {}",
        field.fade(0)
    );
}

#[test]
fn alpha_scales_fade_by_field_opacity() {
    let mut field = single(Vec3::new(0.0, -2.0, 0.0), 0.0, Vec3::ONE);
    field.wobble_strength = 0.0;
    field.opacity = 0.25;
    field.update(0.2);
    while field.position(0).y > 0.5 {
        field.update(0.2);
    }
    field.update(0.2);
    assert!((field.alpha(0) - 0.25 * field.fade(0)).abs() < 1e-6);
}

#[test]
fn wobble_and_fall_follow_the_seeded_formula() {
    let mut field = single(Vec3::ZERO, 0.3, Vec3::splat(10.0));
    let dt = 0.5_f32;
    field.update(dt);

    let sway = 1.0 + 0.3_f32;
    let expected_x = (dt * sway).sin() * sway * field.wobble_strength;
    let expected_z = (1.2 * dt * sway).cos() * sway * field.wobble_strength;
    let expected_y = -0.5 * sway * field.fall_speed * dt;

    let p = field.position(0);
    assert!((p.x - expected_x).abs() < 1e-5);
    assert!((p.z - expected_z).abs() < 1e-5);
    assert!((p.y - expected_y).abs() < 1e-5);
}

#[test]
fn update_is_deterministic_given_the_same_parts() {
    let parts = || {
        (
            vec![
                Vec3::new(0.2, 0.5, -0.3),
                Vec3::new(-0.4, 0.9, 0.1),
                Vec3::new(0.0, -0.8, 0.0),
            ],
            vec![0.1, 0.6, 0.9],
        )
    };
    let (points, seeds) = parts();
    let mut a = SnowField::from_parts(points, seeds, Vec3::ONE);
    let (points, seeds) = parts();
    let mut b = SnowField::from_parts(points, seeds, Vec3::ONE);

    for _ in 0..50 {
        a.update(0.016);
        b.update(0.016);
    }
    for i in 0..a.len() {
        assert_eq!(a.position(i), b.position(i));
        assert_eq!(a.fade(i), b.fade(i));
    }
}
