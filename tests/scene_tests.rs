// Scene-graph mirror: identity, hierarchy lookups, and traversal.

mod common;

use room_core::error::SceneError;
use room_core::scene::SceneGraph;

#[test]
fn names_resolve_to_the_nodes_that_own_them() {
    let scene = common::build_room();
    let chair = scene.id_of("chair").unwrap();
    assert_eq!(scene.name(chair), Some("chair"));
    assert_eq!(scene.id_of("no-such-node"), None);
}

#[test]
fn duplicate_names_are_rejected() {
    let mut scene = SceneGraph::new();
    scene.add("prop", None).unwrap();
    match scene.add("prop", None) {
        Err(SceneError::DuplicateName(name)) => assert_eq!(name, "prop"),
        other => panic!("expected DuplicateName, got {other:?}"),
    }
}

#[test]
fn parent_links_point_one_level_up() {
    let scene = common::build_room();
    let proxy = scene.id_of("col-chair").unwrap();
    let chair = scene.id_of("chair").unwrap();
    let room = scene.id_of("room").unwrap();

    assert_eq!(scene.parent_of(proxy), Some(chair));
    assert_eq!(scene.parent_of(chair), Some(room));
    assert_eq!(scene.parent_of(room), None);
}

#[test]
fn child_suffix_lookup_finds_sub_nodes() {
    let scene = common::build_room();
    let window = scene.id_of("window").unwrap();
    let handle = scene.id_of("window-handle").unwrap();
    assert_eq!(scene.child_suffixed(window, "handle"), Some(handle));
    assert_eq!(scene.child_suffixed(window, "lid"), None);

    let present = scene.id_of("present-1").unwrap();
    let mouth = scene.id_of("present-1-mouth").unwrap();
    assert_eq!(scene.child_suffixed(present, "mouth"), Some(mouth));
}

#[test]
fn nodes_default_to_identity_transforms() {
    let scene = common::build_room();
    let chair = scene.get(scene.id_of("chair").unwrap()).unwrap();
    assert_eq!(chair.position, glam::Vec3::ZERO);
    assert_eq!(chair.rotation, glam::Vec3::ZERO);
    assert_eq!(chair.scale, glam::Vec3::ONE);
    assert_eq!(chair.opacity, 1.0);
    assert!(chair.visible);
}

#[test]
fn traversal_visits_parents_before_children() {
    let scene = common::build_room();
    let mut order = Vec::new();
    scene.traverse(|_, node| order.push(node.name.clone()));

    assert_eq!(scene.len(), order.len());
    let pos = |name: &str| order.iter().position(|n| n == name).unwrap();
    assert!(pos("room") < pos("chair"));
    assert!(pos("chair") < pos("col-chair"));
    assert!(pos("tree") < pos("cat"));
    assert!(pos("cat") < pos("col-cat"));
}
