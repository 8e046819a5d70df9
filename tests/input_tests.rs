// Pure input functions: NDC mapping, click qualification, and the
// AABB picking used for the interact set.

mod common;

use glam::{Vec2, Vec3};
use instant::Instant;
use std::time::Duration;

use room_core::constants::{INTERACTION_CLICK_MAX_MS, INTERACTION_MAX_DRAG_DISTANCE};
use room_core::input::{
    collect_interact_nodes, pick, pointer_ndc, ray_aabb, ClickTracker, Collider,
};

#[test]
fn pointer_ndc_maps_corners_and_center() {
    let size = Vec2::new(800.0, 600.0);
    assert_eq!(pointer_ndc(Vec2::new(0.0, 0.0), size), Vec2::new(-1.0, 1.0));
    assert_eq!(
        pointer_ndc(Vec2::new(800.0, 600.0), size),
        Vec2::new(1.0, -1.0)
    );
    assert_eq!(pointer_ndc(Vec2::new(400.0, 300.0), size), Vec2::ZERO);
}

#[test]
fn quick_still_press_qualifies_as_a_click() {
    let mut clicks = ClickTracker::new();
    let t0 = Instant::now();
    clicks.press(Vec2::ZERO, t0);
    let result = clicks.release(Vec2::ZERO, t0 + Duration::from_millis(100));
    assert_eq!(result, Some(Vec2::ZERO));
    // The press is consumed.
    assert!(!clicks.is_pressed());
}

#[test]
fn slow_press_is_not_a_click() {
    let mut clicks = ClickTracker::new();
    let t0 = Instant::now();
    clicks.press(Vec2::ZERO, t0);
    let late = t0 + Duration::from_millis(INTERACTION_CLICK_MAX_MS + 50);
    assert_eq!(clicks.release(Vec2::ZERO, late), None);
}

#[test]
fn click_window_boundary_is_inclusive() {
    let mut clicks = ClickTracker::new();
    let t0 = Instant::now();
    clicks.press(Vec2::ZERO, t0);
    let at_limit = t0 + Duration::from_millis(INTERACTION_CLICK_MAX_MS);
    assert!(clicks.release(Vec2::ZERO, at_limit).is_some());
}

#[test]
fn dragging_past_the_limit_is_not_a_click() {
    let mut clicks = ClickTracker::new();
    let t0 = Instant::now();
    clicks.press(Vec2::ZERO, t0);
    let dragged = Vec2::new(INTERACTION_MAX_DRAG_DISTANCE * 3.0, 0.0);
    assert_eq!(clicks.release(dragged, t0 + Duration::from_millis(50)), None);

    // Just inside the limit still qualifies.
    clicks.press(Vec2::ZERO, t0);
    let nudged = Vec2::new(INTERACTION_MAX_DRAG_DISTANCE * 0.5, 0.0);
    assert!(clicks
        .release(nudged, t0 + Duration::from_millis(50))
        .is_some());
}

#[test]
fn release_without_press_is_ignored() {
    let mut clicks = ClickTracker::new();
    assert_eq!(clicks.release(Vec2::ZERO, Instant::now()), None);
}

#[test]
fn ray_aabb_hits_and_misses() {
    let min = Vec3::new(-1.0, -1.0, 4.0);
    let max = Vec3::new(1.0, 1.0, 6.0);

    let hit = ray_aabb(Vec3::ZERO, Vec3::Z, min, max);
    assert!(hit.is_some());
    let t = hit.unwrap();
    assert!((t - 4.0).abs() < 1e-5);

    // Ray pointing away from the box.
    assert!(ray_aabb(Vec3::ZERO, Vec3::X, min, max).is_none());
    // Behind the origin.
    assert!(ray_aabb(Vec3::new(0.0, 0.0, 10.0), Vec3::Z, min, max).is_none());
}

#[test]
fn ray_aabb_from_inside_clamps_to_the_origin() {
    let t = ray_aabb(
        Vec3::new(0.0, 0.0, 5.0),
        Vec3::Z,
        Vec3::new(-1.0, -1.0, 4.0),
        Vec3::new(1.0, 1.0, 6.0),
    );
    assert_eq!(t, Some(0.0));
}

#[test]
fn pick_returns_the_nearest_collider() {
    let scene = common::build_room();
    let near = scene.id_of("col-dog").unwrap();
    let far = scene.id_of("col-chair").unwrap();
    let colliders = vec![
        Collider {
            node: far,
            min: Vec3::new(-1.0, -1.0, 8.0),
            max: Vec3::new(1.0, 1.0, 10.0),
        },
        Collider {
            node: near,
            min: Vec3::new(-1.0, -1.0, 2.0),
            max: Vec3::new(1.0, 1.0, 4.0),
        },
    ];
    assert_eq!(pick(Vec3::ZERO, Vec3::Z, &colliders), Some(near));
    assert_eq!(pick(Vec3::ZERO, Vec3::NEG_Z, &colliders), None);
}

#[test]
fn interact_set_contains_every_collision_proxy() {
    let scene = common::build_room();
    let interact = collect_interact_nodes(&scene);
    let names: Vec<&str> = interact
        .iter()
        .map(|id| scene.name(*id).unwrap())
        .collect();
    for expected in [
        "col-chair",
        "col-dog",
        "col-window",
        "col-letter",
        "col-gift",
        "col-present-0",
        "col-cat",
        "col-mac",
    ] {
        assert!(names.contains(&expected), "missing {expected}");
    }
    // Animated bodies are not in the interact set.
    assert!(!names.contains(&"chair"));
    assert!(!names.contains(&"window-handle"));
}
