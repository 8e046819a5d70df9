//! Interaction, animation, and particle core for an interactive 3D room
//! diorama.
//!
//! The embedding engine supplies rendering, asset decoding, and a camera;
//! this crate owns the behavior: a registry dispatching clicks on named
//! collision nodes to tweened animations, a grow-only audio voice pool, a
//! snow particle field, and the shared session state they all read and
//! write. Everything is single-threaded and frame-driven.

pub mod audio;
pub mod constants;
pub mod error;
pub mod frame;
pub mod input;
pub mod interactions;
pub mod profile;
pub mod scene;
pub mod snow;
pub mod state;
pub mod tween;

pub use audio::*;
pub use error::*;
pub use frame::*;
pub use input::*;
pub use interactions::*;
pub use profile::*;
pub use scene::*;
pub use snow::*;
pub use state::*;
pub use tween::*;
