//! Interaction and effect tuning constants.
//!
//! These express intended behavior (timings, angles, clamp limits) and keep
//! magic numbers out of the handlers.

use std::f32::consts::{FRAC_PI_2, FRAC_PI_3};

// Click qualification
// A press counts as a click only if released within this window and without
// dragging further than this distance (normalized device coordinates).
pub const INTERACTION_CLICK_MAX_MS: u64 = 300;
pub const INTERACTION_MAX_DRAG_DISTANCE: f32 = 0.05;

// Toggle-rotation props (chair, stool)
pub const SPIN_TOGGLE_SECS: f32 = 1.0;

// Jump props: height (world units) and full up-then-down duration
pub const DOG_JUMP_HEIGHT: f32 = 0.5;
pub const DOG_JUMP_SECS: f32 = 1.0;
pub const EGG_JUMP_HEIGHT: f32 = 0.35;
pub const EGG_JUMP_SECS: f32 = 0.8;
pub const FISH_JUMP_HEIGHT: f32 = 0.6;
pub const FISH_JUMP_SECS: f32 = 1.1;
pub const BOOKS_JUMP_HEIGHT: f32 = 0.25;
pub const BOOKS_JUMP_SECS: f32 = 0.7;

// Window: handle turns first, then the body swings
pub const WINDOW_HANDLE_TURN: f32 = -FRAC_PI_2;
pub const WINDOW_HANDLE_SECS: f32 = 0.4;
pub const WINDOW_SWING: f32 = FRAC_PI_3;
pub const WINDOW_SWING_SECS: f32 = 1.2;

// Ambient outdoor loop fades in after the window starts opening
pub const AMBIENT_OPEN_VOLUME: f32 = 0.4;
pub const AMBIENT_FADE_SECS: f32 = 1.5;
pub const AMBIENT_FADE_IN_DELAY: f32 = 0.6;

// Snow becomes visible only while the window is open
pub const SNOW_FADE_SECS: f32 = 1.0;
pub const SNOW_FADE_IN_DELAY: f32 = 0.9;

// Letter overlay
pub const LETTER_FADE_SECS: f32 = 0.8;

// Gift box: lid rise, body fade, and camera zoom-in overlap
pub const GIFT_LID_RISE: f32 = 0.6;
pub const GIFT_LID_SECS: f32 = 0.9;
pub const GIFT_FADE_SECS: f32 = 1.2;
pub const GIFT_FADE_DELAY: f32 = 0.3;
pub const GIFT_ZOOM_TARGET: f32 = 6.0;
pub const GIFT_ZOOM_SECS: f32 = 1.6;
pub const GIFT_ZOOM_DELAY: f32 = 0.5;

// Present music boxes and their mouth feedback
pub const PRESENT_COUNT: usize = 3;
pub const MOUTH_OPEN_SCALE: f32 = 1.35;
pub const MOUTH_OPEN_SECS: f32 = 0.18;
pub const MOUTH_CLOSE_SECS: f32 = 1.1;
pub const MOUTH_SHRINK_SECS: f32 = 0.4;

// Cat on the tree: a persistent spin loop paced by the ambient ramp, plus a
// one-shot tree shake on every trigger
pub const CAT_SPIN_PERIOD_SECS: f32 = 6.0;
pub const CAT_RAMP_SECS: f32 = 0.8;
pub const TREE_SHAKE_ANGLE: f32 = 0.12;
pub const TREE_SHAKE_PULSE_SECS: f32 = 0.09;

// Audio
// Pitch jitter is sampled uniformly in [-spread, +spread] cents.
pub const DETUNE_SPREAD_CENTS: f32 = 100.0;

// Snow field defaults
pub const SNOW_WOBBLE_STRENGTH: f32 = 0.1;
pub const SNOW_FALL_SPEED: f32 = 1.0;
pub const SNOW_FADE_DISTANCE: f32 = 1.0;

// Camera profile
pub const CAMERA_ORTHO_SIZE: f32 = 0.015;
pub const CAMERA_VERTICAL_OFFSET: f32 = 1.5;
pub const CAMERA_ZOOM_MIN: f32 = 2.0;
pub const CAMERA_ZOOM_MAX: f32 = 10.0;
pub const CAMERA_AZIMUTH_RANGE: (f32, f32) = (0.0, FRAC_PI_2);
pub const CAMERA_POLAR_RANGE: (f32, f32) = (0.0, FRAC_PI_2);
