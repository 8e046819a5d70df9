//! Shared session state.
//!
//! A flat record mutated by interaction handlers and read by the frame loop
//! and the renderer. `box_opened` and `letter_dismissed` are one-way latches
//! for the session.

use smallvec::SmallVec;

use crate::constants::{CAMERA_ZOOM_MAX, CAMERA_ZOOM_MIN, PRESENT_COUNT};

/// Per-present toggle state. `started` latches after the lazy first-trigger
/// initialization; `voice` remembers the looping voice bound on that init.
#[derive(Clone, Copy, Debug, Default)]
pub struct PresentState {
    pub active: bool,
    pub started: bool,
    pub voice: Option<usize>,
}

#[derive(Clone, Debug)]
pub struct SessionState {
    pub window_open: bool,
    pub box_opened: bool,
    pub letter_dismissed: bool,
    pub screen_lit: bool,
    pub cat_active: bool,
    /// Outdoor ambience volume, faded by the window handler.
    pub ambient_volume: f32,
    /// Field-wide snow opacity, faded alongside the window.
    pub snow_opacity: f32,
    /// Pace coefficient for the cat spin loop; 0 freezes it.
    pub ambient_ramp: f32,
    pub zoom: f32,
    pub zoom_min: f32,
    pub zoom_max: f32,
    pub presents: SmallVec<[PresentState; 4]>,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            window_open: false,
            box_opened: false,
            letter_dismissed: false,
            screen_lit: false,
            cat_active: false,
            ambient_volume: 0.0,
            snow_opacity: 0.0,
            ambient_ramp: 0.0,
            zoom: CAMERA_ZOOM_MIN,
            zoom_min: CAMERA_ZOOM_MIN,
            zoom_max: CAMERA_ZOOM_MAX,
            presents: (0..PRESENT_COUNT).map(|_| PresentState::default()).collect(),
        }
    }
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }
}
