//! Per-frame driver and pointer wiring.
//!
//! Single-threaded and cooperative: mutation happens either synchronously in
//! a pointer handler or inside `frame`, once per display refresh. The only
//! mutual-exclusion mechanism anywhere is the handlers' tween-membership
//! guard.

use glam::{Vec2, Vec3};
use instant::Instant;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::audio::{AudioBackend, SoundBank};
use crate::input::{self, ClickTracker, Collider, MouseState};
use crate::interactions::{start_ambient_loops, InteractionCtx, InteractionRegistry};
use crate::profile::{apply_session_defaults, SceneProfile};
use crate::scene::{NodeId, SceneGraph};
use crate::snow::SnowField;
use crate::state::SessionState;
use crate::tween::Tweens;

pub struct FrameContext<B: AudioBackend> {
    pub scene: SceneGraph,
    pub tweens: Tweens,
    pub audio: SoundBank<B>,
    pub backend: B,
    pub session: SessionState,
    pub snow: Vec<SnowField>,
    pub registry: InteractionRegistry<B>,
    pub colliders: Vec<Collider>,
    pub clicks: ClickTracker,
    pub mouse: MouseState,
    pub rng: StdRng,
    last_instant: Instant,
}

impl<B: AudioBackend> FrameContext<B> {
    /// Builds the session: registry, session defaults from the camera
    /// profile, snow field, and the persistent ambient timelines.
    pub fn new(
        scene: SceneGraph,
        audio: SoundBank<B>,
        backend: B,
        profile: &SceneProfile,
        seed: u64,
    ) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut session = SessionState::new();
        apply_session_defaults(&profile.camera, &mut session);
        let mut tweens = Tweens::new();
        start_ambient_loops(&scene, &mut tweens);
        let mut snow = Vec::new();
        if profile.snow_count > 0 {
            snow.push(SnowField::new(
                profile.snow_count,
                profile.snow_half_size,
                &mut rng,
            ));
        }
        Self {
            scene,
            tweens,
            audio,
            backend,
            session,
            snow,
            registry: InteractionRegistry::standard(),
            colliders: Vec::new(),
            clicks: ClickTracker::new(),
            mouse: MouseState::default(),
            rng,
            last_instant: Instant::now(),
        }
    }

    /// The explicit interact set; only these hit boxes are ever ray-tested.
    pub fn set_colliders(&mut self, colliders: Vec<Collider>) {
        self.colliders = colliders;
    }

    pub fn frame(&mut self, now: Instant) {
        let dt = now.duration_since(self.last_instant).as_secs_f32();
        self.last_instant = now;
        self.advance(dt);
    }

    /// Advances animations and particles by `dt` seconds. Snow emission and
    /// opacity follow the window state every frame.
    pub fn advance(&mut self, dt: f32) {
        self.tweens.update(dt, &mut self.scene, &mut self.session);
        for field in &mut self.snow {
            field.is_emitting = self.session.window_open;
            field.opacity = self.session.snow_opacity;
            field.update(dt);
        }
    }

    pub fn pointer_move(&mut self, ndc: Vec2) {
        self.mouse.x = ndc.x;
        self.mouse.y = ndc.y;
    }

    pub fn pointer_down(&mut self, ndc: Vec2, at: Instant) {
        self.mouse.x = ndc.x;
        self.mouse.y = ndc.y;
        self.mouse.down = true;
        self.clicks.press(ndc, at);
    }

    /// Qualifies the release as a click, raycasts the interact set with the
    /// caller-supplied camera ray, and dispatches the nearest hit. Returns
    /// whether an interaction ran.
    pub fn pointer_up(
        &mut self,
        ndc: Vec2,
        at: Instant,
        ray_origin: Vec3,
        ray_dir: Vec3,
    ) -> bool {
        self.mouse.down = false;
        if self.clicks.release(ndc, at).is_none() {
            return false;
        }
        let Some(hit) = input::pick(ray_origin, ray_dir, &self.colliders) else {
            return false;
        };
        self.dispatch(hit);
        true
    }

    pub fn dispatch(&mut self, hit: NodeId) {
        let mut ctx = InteractionCtx {
            scene: &mut self.scene,
            tweens: &mut self.tweens,
            audio: &mut self.audio,
            backend: &mut self.backend,
            session: &mut self.session,
            rng: &mut self.rng,
        };
        self.registry.dispatch(&mut ctx, hit);
    }
}
