//! Pointer state, click qualification, and interact-set picking.

use glam::{Vec2, Vec3};
use instant::Instant;

use crate::constants::{INTERACTION_CLICK_MAX_MS, INTERACTION_MAX_DRAG_DISTANCE};
use crate::scene::{NodeId, SceneGraph};

#[derive(Default, Clone, Copy)]
pub struct MouseState {
    pub x: f32,
    pub y: f32,
    pub down: bool,
}

/// Converts pixel coordinates to normalized device coordinates, y up.
#[inline]
pub fn pointer_ndc(px: Vec2, surface_size: Vec2) -> Vec2 {
    let w = surface_size.x.max(1.0);
    let h = surface_size.y.max(1.0);
    Vec2::new(px.x / w * 2.0 - 1.0, px.y / h * -2.0 + 1.0)
}

/// Qualifies clicks synchronously: a press counts only when released within
/// the click window and without dragging past the distance limit. No timers
/// are involved; both measurements happen at release.
#[derive(Default)]
pub struct ClickTracker {
    pressed: Option<(Vec2, Instant)>,
}

impl ClickTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, ndc: Vec2, at: Instant) {
        self.pressed = Some((ndc, at));
    }

    /// Returns the release position when the press qualifies as a click.
    pub fn release(&mut self, ndc: Vec2, at: Instant) -> Option<Vec2> {
        let (start, pressed_at) = self.pressed.take()?;
        let held = at.duration_since(pressed_at);
        if held.as_millis() as u64 > INTERACTION_CLICK_MAX_MS {
            return None;
        }
        if (ndc - start).length() > INTERACTION_MAX_DRAG_DISTANCE {
            return None;
        }
        Some(ndc)
    }

    pub fn is_pressed(&self) -> bool {
        self.pressed.is_some()
    }
}

/// Axis-aligned hit box for one collision node.
#[derive(Clone, Copy, Debug)]
pub struct Collider {
    pub node: NodeId,
    pub min: Vec3,
    pub max: Vec3,
}

/// Slab test; returns the entry distance along the ray, clamped to the ray
/// origin when it starts inside the box.
#[inline]
pub fn ray_aabb(origin: Vec3, dir: Vec3, min: Vec3, max: Vec3) -> Option<f32> {
    let inv = dir.recip();
    let a = (min - origin) * inv;
    let b = (max - origin) * inv;
    let t_near = a.min(b).max_element();
    let t_far = a.max(b).min_element();
    if t_far < t_near.max(0.0) {
        return None;
    }
    Some(t_near.max(0.0))
}

/// First intersected collider along the ray, nearest wins. Only nodes in the
/// explicit interact set are ever tested.
pub fn pick(origin: Vec3, dir: Vec3, colliders: &[Collider]) -> Option<NodeId> {
    let mut best: Option<(NodeId, f32)> = None;
    for collider in colliders {
        if let Some(t) = ray_aabb(origin, dir, collider.min, collider.max) {
            match best {
                Some((_, bt)) if t >= bt => {}
                _ => best = Some((collider.node, t)),
            }
        }
    }
    best.map(|(node, _)| node)
}

/// Gathers the interact set: every node whose name contains `col`, the
/// collision-proxy naming rule of the scene assets.
pub fn collect_interact_nodes(scene: &SceneGraph) -> Vec<NodeId> {
    let mut nodes = Vec::new();
    scene.traverse(|id, node| {
        if node.name.contains("col") {
            nodes.push(id);
        }
    });
    nodes
}
