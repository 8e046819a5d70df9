//! Scene assembly configuration.
//!
//! The seasonal variants of the scene share one architecture and differ only
//! in data, so they are expressed as profile records (an asset manifest, a
//! material-rule table, and a camera profile) rather than separate entry
//! points.

use glam::Vec3;

use crate::audio::{CategoryId, SoundSpec};
use crate::constants::{
    CAMERA_AZIMUTH_RANGE, CAMERA_ORTHO_SIZE, CAMERA_POLAR_RANGE, CAMERA_VERTICAL_OFFSET,
    CAMERA_ZOOM_MAX, CAMERA_ZOOM_MIN, DETUNE_SPREAD_CENTS,
};
use crate::state::SessionState;

/// Material classification by node-name prefix. `col-` nodes are invisible
/// hit targets; `e-` nodes keep whatever material the asset shipped with;
/// anything unmatched gets the debug material so it stands out.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MaterialRule {
    Collider,
    Room,
    Carpet,
    Tree,
    Mounted,
    Table,
    Excluded,
    Debug,
}

/// Applies the prefix table to a node name, falling back to the parent's
/// name: meshes inside a named group inherit the group's surface.
pub fn classify(name: &str, parent_name: Option<&str>) -> MaterialRule {
    let matches = |prefix: &str| {
        name.starts_with(prefix) || parent_name.is_some_and(|p| p.starts_with(prefix))
    };
    if matches("col-") {
        MaterialRule::Collider
    } else if matches("r-") {
        MaterialRule::Room
    } else if matches("c-") {
        MaterialRule::Carpet
    } else if matches("tree-") {
        MaterialRule::Tree
    } else if matches("mounted-") {
        MaterialRule::Mounted
    } else if matches("table-") {
        MaterialRule::Table
    } else if matches("e-") {
        MaterialRule::Excluded
    } else {
        MaterialRule::Debug
    }
}

/// Data-driven model entry: the loader resolves the pair of paths and applies
/// materials once both assets arrive. Object kinds are manifest entries, not
/// types.
#[derive(Clone, Copy, Debug)]
pub struct ModelSpec {
    pub model_path: &'static str,
    pub texture_path: Option<&'static str>,
}

#[derive(Clone, Copy, Debug)]
pub struct CameraProfile {
    pub ortho_size: f32,
    pub vertical_offset: f32,
    pub zoom_min: f32,
    pub zoom_max: f32,
    pub azimuth_range: (f32, f32),
    pub polar_range: (f32, f32),
}

impl Default for CameraProfile {
    fn default() -> Self {
        Self {
            ortho_size: CAMERA_ORTHO_SIZE,
            vertical_offset: CAMERA_VERTICAL_OFFSET,
            zoom_min: CAMERA_ZOOM_MIN,
            zoom_max: CAMERA_ZOOM_MAX,
            azimuth_range: CAMERA_AZIMUTH_RANGE,
            polar_range: CAMERA_POLAR_RANGE,
        }
    }
}

/// One seasonal variant of the scene, fully described by data.
#[derive(Clone, Debug)]
pub struct SceneProfile {
    pub name: &'static str,
    pub models: Vec<ModelSpec>,
    pub sounds: Vec<SoundSpec>,
    pub camera: CameraProfile,
    pub snow_count: usize,
    pub snow_half_size: Vec3,
}

impl SceneProfile {
    /// Sanity-checks the manifest before assembly. A broken profile is a
    /// packaging mistake, so this is the one place that errors loudly
    /// instead of degrading.
    pub fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(!self.models.is_empty(), "profile '{}' has no models", self.name);
        anyhow::ensure!(
            self.camera.zoom_min <= self.camera.zoom_max,
            "profile '{}' camera zoom range is inverted",
            self.name
        );
        for i in 0..crate::constants::PRESENT_COUNT {
            anyhow::ensure!(
                self.sounds
                    .iter()
                    .any(|s| s.id == CategoryId::Present(i as u8)),
                "profile '{}' is missing the music track for present {}",
                self.name,
                i
            );
        }
        if self.snow_count > 0 {
            anyhow::ensure!(
                self.snow_half_size.cmpgt(Vec3::ZERO).all(),
                "profile '{}' has a degenerate snow volume",
                self.name
            );
        }
        Ok(())
    }

    pub fn winter() -> Self {
        Self {
            name: "winter",
            models: vec![
                ModelSpec {
                    model_path: "models/room.glb",
                    texture_path: Some("textures/baked/baked_room.jpg"),
                },
                ModelSpec {
                    model_path: "models/curtains.glb",
                    texture_path: None,
                },
                ModelSpec {
                    model_path: "models/letter.glb",
                    texture_path: Some("textures/letter.jpg"),
                },
                ModelSpec {
                    model_path: "models/static.glb",
                    texture_path: None,
                },
            ],
            sounds: standard_sounds(),
            camera: CameraProfile::default(),
            snow_count: 450,
            snow_half_size: Vec3::new(4.0, 3.0, 4.0),
        }
    }

    /// Same scene without snow emission and with the spring props swapped in.
    pub fn springtime() -> Self {
        let mut profile = Self::winter();
        profile.name = "springtime";
        profile.snow_count = 0;
        profile.models.push(ModelSpec {
            model_path: "models/flowers.glb",
            texture_path: None,
        });
        profile
    }
}

fn standard_sounds() -> Vec<SoundSpec> {
    vec![
        SoundSpec {
            id: CategoryId::Bark,
            base_path: "sounds/bark.ogg",
            variants: 3,
            volume: 0.8,
            detune_spread_cents: DETUNE_SPREAD_CENTS,
        },
        SoundSpec {
            id: CategoryId::Squeak,
            base_path: "sounds/squeak.ogg",
            variants: 2,
            volume: 0.7,
            detune_spread_cents: DETUNE_SPREAD_CENTS,
        },
        SoundSpec {
            id: CategoryId::Splash,
            base_path: "sounds/splash.ogg",
            variants: 2,
            volume: 0.6,
            detune_spread_cents: DETUNE_SPREAD_CENTS,
        },
        SoundSpec {
            id: CategoryId::Thud,
            base_path: "sounds/thud.ogg",
            variants: 3,
            volume: 0.9,
            detune_spread_cents: DETUNE_SPREAD_CENTS,
        },
        SoundSpec {
            id: CategoryId::Creak,
            base_path: "sounds/creak.ogg",
            variants: 1,
            volume: 0.7,
            detune_spread_cents: 0.0,
        },
        SoundSpec {
            id: CategoryId::Rustle,
            base_path: "sounds/rustle.ogg",
            variants: 1,
            volume: 0.5,
            detune_spread_cents: 0.0,
        },
        SoundSpec {
            id: CategoryId::Chime,
            base_path: "sounds/chime.ogg",
            variants: 1,
            volume: 0.8,
            detune_spread_cents: 0.0,
        },
        SoundSpec {
            id: CategoryId::Purr,
            base_path: "sounds/purr.ogg",
            variants: 2,
            volume: 0.6,
            detune_spread_cents: DETUNE_SPREAD_CENTS,
        },
        SoundSpec {
            id: CategoryId::Present(0),
            base_path: "sounds/music-box-a.ogg",
            variants: 1,
            volume: 0.7,
            detune_spread_cents: 0.0,
        },
        SoundSpec {
            id: CategoryId::Present(1),
            base_path: "sounds/music-box-b.ogg",
            variants: 1,
            volume: 0.7,
            detune_spread_cents: 0.0,
        },
        SoundSpec {
            id: CategoryId::Present(2),
            base_path: "sounds/music-box-c.ogg",
            variants: 1,
            volume: 0.7,
            detune_spread_cents: 0.0,
        },
    ]
}

/// Seeds the session's camera zoom state from the profile.
pub fn apply_session_defaults(camera: &CameraProfile, session: &mut SessionState) {
    session.zoom = camera.zoom_min;
    session.zoom_min = camera.zoom_min;
    session.zoom_max = camera.zoom_max;
}
