//! Snow particle field.
//!
//! A fixed set of particles falls inside an axis-aligned box. Each particle
//! wobbles horizontally around its immutable start position, desynchronized
//! by a per-particle seed, and fades by its distance to the nearest box face
//! so there is no pop-in at the edges. Particles park at the lower bound
//! while emission is off and only start falling again from the top.

use glam::Vec3;
use rand::Rng;

use crate::constants::{SNOW_FADE_DISTANCE, SNOW_FALL_SPEED, SNOW_WOBBLE_STRENGTH};

pub struct SnowField {
    start_positions: Vec<Vec3>,
    positions: Vec<Vec3>,
    seeds: Vec<f32>,
    visible: Vec<bool>,
    fades: Vec<f32>,
    bounds_min: Vec3,
    bounds_max: Vec3,
    time_passed: f32,

    pub wobble_strength: f32,
    pub fall_speed: f32,
    pub fade_distance: f32,
    pub is_emitting: bool,
    /// Field-wide opacity, faded by the window handler.
    pub opacity: f32,
}

impl SnowField {
    /// Scatters `count` particles uniformly inside the box spanning
    /// `-half_size..half_size`. Count, start positions, seeds, and bounds are
    /// immutable afterwards.
    pub fn new(count: usize, half_size: Vec3, rng: &mut impl Rng) -> Self {
        let min = -half_size;
        let max = half_size;
        let mut start_positions = Vec::with_capacity(count);
        let mut seeds = Vec::with_capacity(count);
        for _ in 0..count {
            start_positions.push(Vec3::new(
                rng.gen_range(min.x..=max.x),
                rng.gen_range(min.y..=max.y),
                rng.gen_range(min.z..=max.z),
            ));
            seeds.push(rng.gen::<f32>());
        }
        Self::from_parts(start_positions, seeds, half_size)
    }

    /// Deterministic placement: explicit start positions and seeds. `new`
    /// scatters through this.
    pub fn from_parts(start_positions: Vec<Vec3>, seeds: Vec<f32>, half_size: Vec3) -> Self {
        assert_eq!(start_positions.len(), seeds.len());
        let count = start_positions.len();
        Self {
            positions: start_positions.clone(),
            start_positions,
            seeds,
            visible: vec![false; count],
            fades: vec![0.0; count],
            bounds_min: -half_size,
            bounds_max: half_size,
            time_passed: 0.0,
            wobble_strength: SNOW_WOBBLE_STRENGTH,
            fall_speed: SNOW_FALL_SPEED,
            fade_distance: SNOW_FADE_DISTANCE,
            is_emitting: true,
            opacity: 1.0,
        }
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn position(&self, index: usize) -> Vec3 {
        self.positions[index]
    }

    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    /// Per-particle fade factor in [0, 1]; 0 for dormant particles.
    pub fn fade(&self, index: usize) -> f32 {
        self.fades[index]
    }

    pub fn fades(&self) -> &[f32] {
        &self.fades
    }

    /// Fade combined with the field-wide opacity, what the renderer uses as
    /// the particle's alpha.
    pub fn alpha(&self, index: usize) -> f32 {
        self.fades[index] * self.opacity
    }

    pub fn is_visible(&self, index: usize) -> bool {
        self.visible[index]
    }

    pub fn bounds(&self) -> (Vec3, Vec3) {
        (self.bounds_min, self.bounds_max)
    }

    /// Advances every particle by `dt` seconds. A particle at or below the
    /// lower bound respawns at the upper bound while emitting, otherwise it
    /// stays parked; falling particles wobble, descend, and refresh their
    /// edge fade.
    pub fn update(&mut self, dt: f32) {
        self.time_passed += dt;
        for i in 0..self.positions.len() {
            let seed = self.seeds[i];
            let pos = self.positions[i];
            if pos.y <= self.bounds_min.y {
                if self.is_emitting {
                    self.positions[i].y = self.bounds_max.y;
                    self.visible[i] = true;
                }
                continue;
            }
            self.fades[i] = if self.visible[i] {
                self.edge_fade(pos)
            } else {
                0.0
            };
            let sway = 1.0 + seed;
            self.positions[i].x = self.start_positions[i].x
                + (self.time_passed * sway).sin() * sway * self.wobble_strength;
            self.positions[i].z = self.start_positions[i].z
                + (1.2 * self.time_passed * sway).cos() * sway * self.wobble_strength;
            self.positions[i].y -= 0.5 * sway * self.fall_speed * dt;
        }
    }

    /// Minimum distance to any of the six box faces over the fade distance,
    /// clamped to [0, 1].
    fn edge_fade(&self, pos: Vec3) -> f32 {
        let dx = (pos.x - self.bounds_max.x)
            .abs()
            .min((pos.x - self.bounds_min.x).abs());
        let dy = (pos.y - self.bounds_max.y)
            .abs()
            .min((pos.y - self.bounds_min.y).abs());
        let dz = (pos.z - self.bounds_max.z)
            .abs()
            .min((pos.z - self.bounds_min.z).abs());
        (dx.min(dy).min(dz) / self.fade_distance).clamp(0.0, 1.0)
    }
}
