//! Interaction dispatch: named collision nodes mapped to behavior handlers.
//!
//! The registry is built once at session start and immutable afterwards.
//! Handlers receive every collaborator through [`InteractionCtx`], with no
//! hidden statics, and each one guards re-entrancy by querying the tween
//! scheduler before starting a new animation: at most one active tween per
//! animated property per node. A trigger that lands mid-animation is
//! silently dropped in favor of the in-flight one; nothing is queued.

use fnv::FnvHashMap;
use rand::rngs::StdRng;
use std::f32::consts::{PI, TAU};

use crate::audio::{AudioBackend, CategoryId, SoundBank};
use crate::constants::*;
use crate::scene::{NodeId, SceneGraph};
use crate::state::SessionState;
use crate::tween::{Channel, Easing, SessionChannel, Target, TweenSpec, Tweens};

/// Everything a handler may touch, injected per dispatch.
pub struct InteractionCtx<'a, B: AudioBackend> {
    pub scene: &'a mut SceneGraph,
    pub tweens: &'a mut Tweens,
    pub audio: &'a mut SoundBank<B>,
    pub backend: &'a mut B,
    pub session: &'a mut SessionState,
    pub rng: &'a mut StdRng,
}

pub type Handler<B> = Box<dyn Fn(&mut InteractionCtx<'_, B>, NodeId)>;

const PRESENT_KEYS: [&str; PRESENT_COUNT] =
    ["col-present-0", "col-present-1", "col-present-2"];

pub struct InteractionRegistry<B: AudioBackend> {
    handlers: FnvHashMap<&'static str, Handler<B>>,
    fallback: Handler<B>,
}

impl<B: AudioBackend> InteractionRegistry<B> {
    /// The full handler set of the room scene.
    pub fn standard() -> Self {
        let mut registry = Self {
            handlers: FnvHashMap::default(),
            fallback: Box::new(|_, _| {}),
        };
        registry.register("col-chair", toggle_spin(SPIN_TOGGLE_SECS));
        registry.register("col-stool", toggle_spin(SPIN_TOGGLE_SECS));
        registry.register(
            "col-dog",
            jump(DOG_JUMP_HEIGHT, DOG_JUMP_SECS, Some(CategoryId::Bark)),
        );
        registry.register(
            "col-egg",
            jump(EGG_JUMP_HEIGHT, EGG_JUMP_SECS, Some(CategoryId::Squeak)),
        );
        registry.register(
            "col-fish",
            jump(FISH_JUMP_HEIGHT, FISH_JUMP_SECS, Some(CategoryId::Splash)),
        );
        registry.register(
            "col-books",
            jump(BOOKS_JUMP_HEIGHT, BOOKS_JUMP_SECS, Some(CategoryId::Thud)),
        );
        registry.register("col-window", window_toggle());
        registry.register("col-letter", letter_dismiss());
        registry.register("col-gift", gift_open());
        for (i, key) in PRESENT_KEYS.into_iter().enumerate() {
            registry.register(key, present_toggle(i));
        }
        registry.register("col-cat", cat_toggle());
        registry.register("col-mac", screen_toggle());
        registry
    }

    fn register(&mut self, key: &'static str, handler: Handler<B>) {
        self.handlers.insert(key, handler);
    }

    pub fn contains(&self, key: &str) -> bool {
        self.handlers.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.handlers.keys().copied()
    }

    /// Looks up the hit node's name and invokes its handler with the node's
    /// parent: the clickable hit target is a collision proxy one level below
    /// the animated object. An unmatched name logs a diagnostic and runs the
    /// no-op fallback once; it never fails the session.
    pub fn dispatch(&self, ctx: &mut InteractionCtx<'_, B>, hit: NodeId) {
        let Some(name) = ctx.scene.name(hit).map(str::to_owned) else {
            log::warn!("[interact] hit node is not in the scene graph");
            return;
        };
        let Some(handler) = self.handlers.get(name.as_str()) else {
            log::warn!("[interact] no handler for '{}'", name);
            (self.fallback)(ctx, hit);
            return;
        };
        let target = ctx.scene.parent_of(hit).unwrap_or(hit);
        log::info!("[interact] '{}'", name);
        handler(ctx, target);
    }
}

/// Schedules the persistent ambient timelines (the cat spin loop, paused by
/// a zero ramp). Called once at session start, after the scene is built.
pub fn start_ambient_loops(scene: &SceneGraph, tweens: &mut Tweens) {
    if let Some(cat) = scene.id_of("cat") {
        let spin = Target::Node(cat, Channel::RotationY);
        if !tweens.is_animating(spin) {
            tweens.schedule_from(
                TweenSpec::to(spin, TAU, CAT_SPIN_PERIOD_SECS)
                    .easing(Easing::Linear)
                    .looped()
                    .paced_by_ramp(),
                0.0,
            );
        }
    } else {
        log::debug!("[interact] no cat node; spin loop not started");
    }
}

/// Idempotent toggle: +π around the vertical axis on every trigger while the
/// channel is idle. No state beyond the transform itself.
fn toggle_spin<B: AudioBackend>(duration_sec: f32) -> Handler<B> {
    Box::new(move |ctx, node| {
        let target = Target::Node(node, Channel::RotationY);
        if ctx.tweens.is_animating(target) {
            return;
        }
        let Some(current) = ctx.scene.get(node).map(|n| n.rotation.y) else {
            log::warn!("[interact] spin target missing");
            return;
        };
        ctx.tweens.schedule(
            TweenSpec::to(target, current + PI, duration_sec).easing(Easing::SmoothInOut),
        );
    })
}

/// One-shot up-then-down hop: eased rise, bounced fall, optional sound.
fn jump<B: AudioBackend>(
    height: f32,
    duration_sec: f32,
    sound: Option<CategoryId>,
) -> Handler<B> {
    Box::new(move |ctx, node| {
        let target = Target::Node(node, Channel::PositionY);
        if ctx.tweens.is_animating(target) {
            return;
        }
        let Some(y) = ctx.scene.get(node).map(|n| n.position.y) else {
            log::warn!("[interact] jump target missing");
            return;
        };
        ctx.tweens.schedule(
            TweenSpec::to(target, y + height, duration_sec * 0.5)
                .easing(Easing::BackOut)
                .then(y, duration_sec * 0.5, Easing::BounceOut),
        );
        if let Some(category) = sound {
            ctx.audio.play(category, ctx.backend, ctx.rng);
        }
    })
}

/// Two-state window. The open/closed flag lives in session state, not the
/// transform: open turns the handle, then swings the body, with the outdoor
/// ambience and the snow fading in on their own offsets; close reverses the
/// ordering and fades both out.
fn window_toggle<B: AudioBackend>() -> Handler<B> {
    Box::new(|ctx, node| {
        let body = Target::Node(node, Channel::RotationY);
        if ctx.tweens.is_animating(body) {
            return;
        }
        let Some(current) = ctx.scene.get(node).map(|n| n.rotation.y) else {
            log::warn!("[interact] window body missing");
            return;
        };
        let handle = ctx.scene.child_suffixed(node, "handle");
        let opening = !ctx.session.window_open;
        ctx.session.window_open = opening;
        if opening {
            if let Some(h) = handle {
                let turn = ctx.scene.get(h).map(|n| n.rotation.z).unwrap_or(0.0);
                ctx.tweens.schedule(
                    TweenSpec::to(
                        Target::Node(h, Channel::RotationZ),
                        turn + WINDOW_HANDLE_TURN,
                        WINDOW_HANDLE_SECS,
                    )
                    .easing(Easing::SmoothInOut),
                );
            }
            ctx.tweens.schedule(
                TweenSpec::to(body, current + WINDOW_SWING, WINDOW_SWING_SECS)
                    .delay(WINDOW_HANDLE_SECS)
                    .easing(Easing::SmoothInOut),
            );
            ctx.tweens.schedule(
                TweenSpec::to(
                    Target::Session(SessionChannel::AmbientVolume),
                    AMBIENT_OPEN_VOLUME,
                    AMBIENT_FADE_SECS,
                )
                .delay(AMBIENT_FADE_IN_DELAY)
                .easing(Easing::Linear),
            );
            ctx.tweens.schedule(
                TweenSpec::to(
                    Target::Session(SessionChannel::SnowOpacity),
                    1.0,
                    SNOW_FADE_SECS,
                )
                .delay(SNOW_FADE_IN_DELAY)
                .easing(Easing::Linear),
            );
        } else {
            ctx.tweens.schedule(
                TweenSpec::to(body, current - WINDOW_SWING, WINDOW_SWING_SECS)
                    .easing(Easing::SmoothInOut),
            );
            if let Some(h) = handle {
                let turn = ctx.scene.get(h).map(|n| n.rotation.z).unwrap_or(0.0);
                ctx.tweens.schedule(
                    TweenSpec::to(
                        Target::Node(h, Channel::RotationZ),
                        turn - WINDOW_HANDLE_TURN,
                        WINDOW_HANDLE_SECS,
                    )
                    .delay(WINDOW_SWING_SECS)
                    .easing(Easing::SmoothInOut),
                );
            }
            ctx.tweens.schedule(
                TweenSpec::to(
                    Target::Session(SessionChannel::AmbientVolume),
                    0.0,
                    AMBIENT_FADE_SECS,
                )
                .easing(Easing::Linear),
            );
            ctx.tweens.schedule(
                TweenSpec::to(
                    Target::Session(SessionChannel::SnowOpacity),
                    0.0,
                    SNOW_FADE_SECS,
                )
                .easing(Easing::Linear),
            );
        }
        ctx.audio.play(CategoryId::Creak, ctx.backend, ctx.rng);
    })
}

/// One-shot latch: fades the letter out and marks it dismissed.
fn letter_dismiss<B: AudioBackend>() -> Handler<B> {
    Box::new(|ctx, node| {
        if ctx.session.letter_dismissed {
            return;
        }
        ctx.session.letter_dismissed = true;
        ctx.tweens.schedule(
            TweenSpec::to(Target::Node(node, Channel::Opacity), 0.0, LETTER_FADE_SECS)
                .easing(Easing::Linear),
        );
        ctx.audio.play(CategoryId::Rustle, ctx.backend, ctx.rng);
    })
}

/// One-shot irreversible gift box: requires the letter to be dismissed first,
/// latches on the first valid trigger, then overlaps the lid rise, the body
/// fade, and the camera zoom retarget as staggered segments of one composite
/// timeline.
fn gift_open<B: AudioBackend>() -> Handler<B> {
    Box::new(|ctx, node| {
        if ctx.session.box_opened || !ctx.session.letter_dismissed {
            return;
        }
        ctx.session.box_opened = true;
        if let Some(lid) = ctx.scene.child_suffixed(node, "lid") {
            let y = ctx.scene.get(lid).map(|n| n.position.y).unwrap_or(0.0);
            ctx.tweens.schedule(
                TweenSpec::to(
                    Target::Node(lid, Channel::PositionY),
                    y + GIFT_LID_RISE,
                    GIFT_LID_SECS,
                )
                .easing(Easing::BackOut),
            );
        }
        ctx.tweens.schedule(
            TweenSpec::to(Target::Node(node, Channel::Opacity), 0.0, GIFT_FADE_SECS)
                .delay(GIFT_FADE_DELAY)
                .easing(Easing::Linear),
        );
        for channel in [
            SessionChannel::ZoomMin,
            SessionChannel::ZoomMax,
            SessionChannel::Zoom,
        ] {
            ctx.tweens.schedule(
                TweenSpec::to(Target::Session(channel), GIFT_ZOOM_TARGET, GIFT_ZOOM_SECS)
                    .delay(GIFT_ZOOM_DELAY)
                    .easing(Easing::SmoothInOut),
            );
        }
        ctx.audio.play(CategoryId::Chime, ctx.backend, ctx.rng);
    })
}

/// Stateful audio-visual toggle for one present music box. First trigger
/// lazily binds a looping voice and starts the mouth feedback timeline; after
/// that, toggling off shrinks the mouth instead of cutting the audio, and
/// toggling on restarts the timeline.
fn present_toggle<B: AudioBackend>(index: usize) -> Handler<B> {
    Box::new(move |ctx, node| {
        let Some(slot) = ctx.session.presents.get(index).copied() else {
            log::warn!("[interact] present slot {} out of range", index);
            return;
        };
        let mouth = ctx.scene.child_suffixed(node, "mouth");
        if !slot.started {
            let voice =
                ctx.audio
                    .play_looped(CategoryId::Present(index as u8), ctx.backend, ctx.rng, 0);
            if let Some(m) = mouth {
                start_mouth_loop(ctx.tweens, m);
            }
            let slot = &mut ctx.session.presents[index];
            slot.started = true;
            slot.active = true;
            slot.voice = voice;
        } else if slot.active {
            if let Some(m) = mouth {
                let target = Target::Node(m, Channel::Scale);
                ctx.tweens.cancel(target);
                ctx.tweens.schedule(
                    TweenSpec::to(target, 1.0, MOUTH_SHRINK_SECS).easing(Easing::SmoothOut),
                );
            }
            ctx.session.presents[index].active = false;
        } else {
            if let Some(m) = mouth {
                ctx.tweens.cancel(Target::Node(m, Channel::Scale));
                start_mouth_loop(ctx.tweens, m);
            }
            ctx.session.presents[index].active = true;
        }
    })
}

/// The mouth timeline: fast elastic open, slow close, repeating with the
/// looping playback.
fn start_mouth_loop(tweens: &mut Tweens, mouth: NodeId) {
    tweens.schedule_from(
        TweenSpec::to(Target::Node(mouth, Channel::Scale), MOUTH_OPEN_SCALE, MOUTH_OPEN_SECS)
            .easing(Easing::ElasticOut)
            .then(1.0, MOUTH_CLOSE_SECS, Easing::Linear)
            .looped(),
        1.0,
    );
}

/// Periodic ambient toggle for the cat on the tree. Each trigger cancels any
/// in-flight ramp and ramps the spin pace toward 1 or 0; a one-shot tree
/// shake (alternating decaying pulses with zero net rotation) fires on
/// every trigger on its own channel so it never collides with the spin.
fn cat_toggle<B: AudioBackend>() -> Handler<B> {
    Box::new(|ctx, node| {
        let ramp = Target::Session(SessionChannel::AmbientRamp);
        ctx.tweens.cancel(ramp);
        ctx.session.cat_active = !ctx.session.cat_active;
        let to = if ctx.session.cat_active { 1.0 } else { 0.0 };
        ctx.tweens
            .schedule(TweenSpec::to(ramp, to, CAT_RAMP_SECS).easing(Easing::Linear));
        if let Some(tree) = ctx.scene.parent_of(node) {
            let sway = Target::Node(tree, Channel::RotationZ);
            if !ctx.tweens.is_animating(sway) {
                let base = ctx.scene.get(tree).map(|n| n.rotation.z).unwrap_or(0.0);
                ctx.tweens.schedule(
                    TweenSpec::to(sway, base + TREE_SHAKE_ANGLE, TREE_SHAKE_PULSE_SECS)
                        .easing(Easing::SmoothInOut)
                        .then(
                            base - TREE_SHAKE_ANGLE * 0.6,
                            TREE_SHAKE_PULSE_SECS,
                            Easing::SmoothInOut,
                        )
                        .then(
                            base + TREE_SHAKE_ANGLE * 0.25,
                            TREE_SHAKE_PULSE_SECS,
                            Easing::SmoothInOut,
                        )
                        .then(base, TREE_SHAKE_PULSE_SECS, Easing::SmoothInOut),
                );
            }
        }
        ctx.audio.play(CategoryId::Purr, ctx.backend, ctx.rng);
    })
}

/// Flips the monitor between lit and dark; the renderer swaps the screen
/// texture off this flag.
fn screen_toggle<B: AudioBackend>() -> Handler<B> {
    Box::new(|ctx, _node| {
        ctx.session.screen_lit = !ctx.session.screen_lit;
        log::info!(
            "[interact] screen {}",
            if ctx.session.screen_lit { "on" } else { "off" }
        );
    })
}
