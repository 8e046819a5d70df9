//! Property tween scheduler.
//!
//! Every interaction animation runs through this module: a tween addresses a
//! single scalar channel (a node transform component, a node's opacity, or a
//! session value such as camera zoom or ambient volume) and interpolates it
//! through one or more eased segments. Handlers guard re-entrancy with
//! [`Tweens::is_animating`]; the scheduler itself never rejects a double
//! schedule, the query is the whole mutual-exclusion mechanism.

use keyframe::{functions, EasingFunction};
use smallvec::{smallvec, SmallVec};
use std::f32::consts::PI;

use crate::scene::{Node, NodeId, SceneGraph};
use crate::state::SessionState;

/// Scalar channels on a scene node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Channel {
    PositionX,
    PositionY,
    PositionZ,
    RotationX,
    RotationY,
    RotationZ,
    ScaleX,
    ScaleY,
    ScaleZ,
    /// Uniform scale: reads `scale.x`, writes all three components.
    Scale,
    Opacity,
}

/// Scalar channels on the shared session record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SessionChannel {
    AmbientVolume,
    SnowOpacity,
    AmbientRamp,
    Zoom,
    ZoomMin,
    ZoomMax,
}

/// Address of one animatable property.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Target {
    Node(NodeId, Channel),
    Session(SessionChannel),
}

/// Easing curves. The standard four delegate to `keyframe`; back, bounce,
/// and elastic are absent from `keyframe::functions` and use the usual
/// Penner forms. All curves fix both endpoints.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Easing {
    Linear,
    SmoothIn,
    SmoothOut,
    SmoothInOut,
    BackOut,
    BounceOut,
    ElasticOut,
}

impl Easing {
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => functions::Linear.y(t as f64) as f32,
            Easing::SmoothIn => functions::EaseIn.y(t as f64) as f32,
            Easing::SmoothOut => functions::EaseOut.y(t as f64) as f32,
            Easing::SmoothInOut => functions::EaseInOut.y(t as f64) as f32,
            Easing::BackOut => {
                let s = 1.70158_f32;
                let u = t - 1.0;
                u * u * ((s + 1.0) * u + s) + 1.0
            }
            Easing::BounceOut => bounce_out(t),
            Easing::ElasticOut => {
                if t <= 0.0 {
                    0.0
                } else if t >= 1.0 {
                    1.0
                } else {
                    let c = (2.0 * PI) / 3.0;
                    (2.0_f32).powf(-10.0 * t) * ((t * 10.0 - 0.75) * c).sin() + 1.0
                }
            }
        }
    }
}

fn bounce_out(t: f32) -> f32 {
    const N1: f32 = 7.5625;
    const D1: f32 = 2.75;
    if t < 1.0 / D1 {
        N1 * t * t
    } else if t < 2.0 / D1 {
        let t = t - 1.5 / D1;
        N1 * t * t + 0.75
    } else if t < 2.5 / D1 {
        let t = t - 2.25 / D1;
        N1 * t * t + 0.9375
    } else {
        let t = t - 2.625 / D1;
        N1 * t * t + 0.984375
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Repeat {
    Once,
    Loop,
}

/// How a tween's clock advances. Looping ambience (the cat spin) is paced by
/// `SessionState::ambient_ramp`, so a ramp of zero freezes it in place.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Pace {
    Uniform,
    AmbientRamp,
}

/// One eased leg of a tween. Segments chain: each starts from the previous
/// segment's end value.
#[derive(Clone, Copy, Debug)]
pub struct Segment {
    pub to: f32,
    pub duration_sec: f32,
    pub easing: Easing,
}

/// Declarative tween description. Built with [`TweenSpec::to`] and chained
/// with [`TweenSpec::then`] for multi-phase timelines.
#[derive(Clone, Debug)]
pub struct TweenSpec {
    pub target: Target,
    pub delay_sec: f32,
    pub repeat: Repeat,
    pub pace: Pace,
    pub segments: SmallVec<[Segment; 4]>,
}

impl TweenSpec {
    pub fn to(target: Target, to: f32, duration_sec: f32) -> Self {
        Self {
            target,
            delay_sec: 0.0,
            repeat: Repeat::Once,
            pace: Pace::Uniform,
            segments: smallvec![Segment {
                to,
                duration_sec,
                easing: Easing::SmoothOut,
            }],
        }
    }

    pub fn then(mut self, to: f32, duration_sec: f32, easing: Easing) -> Self {
        self.segments.push(Segment {
            to,
            duration_sec,
            easing,
        });
        self
    }

    /// Easing of the most recent segment.
    pub fn easing(mut self, easing: Easing) -> Self {
        if let Some(last) = self.segments.last_mut() {
            last.easing = easing;
        }
        self
    }

    pub fn delay(mut self, delay_sec: f32) -> Self {
        self.delay_sec = delay_sec;
        self
    }

    pub fn looped(mut self) -> Self {
        self.repeat = Repeat::Loop;
        self
    }

    pub fn paced_by_ramp(mut self) -> Self {
        self.pace = Pace::AmbientRamp;
        self
    }

    fn total_duration(&self) -> f32 {
        self.segments.iter().map(|s| s.duration_sec).sum()
    }
}

struct Tween {
    spec: TweenSpec,
    /// Start value of segment 0; captured when the delay elapses unless
    /// pinned via [`Tweens::schedule_from`].
    from: Option<f32>,
    clock: f32,
    done: bool,
}

/// The scheduler. One instance per session, updated once per frame.
#[derive(Default)]
pub struct Tweens {
    items: Vec<Tween>,
}

impl Tweens {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, spec: TweenSpec) {
        self.items.push(Tween {
            spec,
            from: None,
            clock: 0.0,
            done: false,
        });
    }

    /// Schedules with an explicit start value instead of sampling the target
    /// at activation.
    pub fn schedule_from(&mut self, spec: TweenSpec, from: f32) {
        self.items.push(Tween {
            spec,
            from: Some(from),
            clock: 0.0,
            done: false,
        });
    }

    /// True while any scheduled tween (delayed, active, or looping)
    /// addresses `target`. This is the re-entrancy guard every handler
    /// queries before starting a new animation.
    pub fn is_animating(&self, target: Target) -> bool {
        self.items
            .iter()
            .any(|t| !t.done && t.spec.target == target)
    }

    /// Removes every tween on `target` without applying further values.
    /// Returns how many were dropped.
    pub fn cancel(&mut self, target: Target) -> usize {
        let before = self.items.len();
        self.items.retain(|t| t.spec.target != target);
        before - self.items.len()
    }

    pub fn active_count(&self) -> usize {
        self.items.len()
    }

    /// Advances all tweens by `dt` seconds and writes eased values through
    /// their targets. Completed one-shots land exactly on their final value
    /// and are retired.
    pub fn update(&mut self, dt: f32, scene: &mut SceneGraph, session: &mut SessionState) {
        // Pacing reads the ramp as it stood at frame start, so a ramp tween
        // updating this same frame cannot half-apply.
        let ramp = session.ambient_ramp;
        for tween in &mut self.items {
            let step = match tween.spec.pace {
                Pace::Uniform => dt,
                Pace::AmbientRamp => dt * ramp,
            };
            tween.clock += step;
            let local = tween.clock - tween.spec.delay_sec;
            if local < 0.0 {
                continue;
            }
            if tween.from.is_none() {
                tween.from = Some(read_target(tween.spec.target, scene, session));
            }
            let from = tween.from.unwrap_or(0.0);
            let total = tween.spec.total_duration();
            let phase = match tween.spec.repeat {
                Repeat::Once => {
                    if local >= total {
                        let last = tween.spec.segments.last().map(|s| s.to).unwrap_or(from);
                        write_target(tween.spec.target, last, scene, session);
                        tween.done = true;
                        continue;
                    }
                    local
                }
                Repeat::Loop => {
                    if total <= f32::EPSILON {
                        continue;
                    }
                    local.rem_euclid(total)
                }
            };
            let value = sample_segments(&tween.spec.segments, from, phase);
            write_target(tween.spec.target, value, scene, session);
        }
        self.items.retain(|t| !t.done);
    }
}

fn sample_segments(segments: &[Segment], from: f32, phase: f32) -> f32 {
    let mut start = 0.0;
    let mut seg_from = from;
    for seg in segments {
        if seg.duration_sec <= f32::EPSILON {
            // Instantaneous step; becomes the next segment's start.
            seg_from = seg.to;
            continue;
        }
        if phase < start + seg.duration_sec {
            let p = (phase - start) / seg.duration_sec;
            return seg_from + (seg.to - seg_from) * seg.easing.apply(p);
        }
        start += seg.duration_sec;
        seg_from = seg.to;
    }
    seg_from
}

fn node_channel(node: &Node, channel: Channel) -> f32 {
    match channel {
        Channel::PositionX => node.position.x,
        Channel::PositionY => node.position.y,
        Channel::PositionZ => node.position.z,
        Channel::RotationX => node.rotation.x,
        Channel::RotationY => node.rotation.y,
        Channel::RotationZ => node.rotation.z,
        Channel::ScaleX => node.scale.x,
        Channel::ScaleY => node.scale.y,
        Channel::ScaleZ => node.scale.z,
        Channel::Scale => node.scale.x,
        Channel::Opacity => node.opacity,
    }
}

fn set_node_channel(node: &mut Node, channel: Channel, value: f32) {
    match channel {
        Channel::PositionX => node.position.x = value,
        Channel::PositionY => node.position.y = value,
        Channel::PositionZ => node.position.z = value,
        Channel::RotationX => node.rotation.x = value,
        Channel::RotationY => node.rotation.y = value,
        Channel::RotationZ => node.rotation.z = value,
        Channel::ScaleX => node.scale.x = value,
        Channel::ScaleY => node.scale.y = value,
        Channel::ScaleZ => node.scale.z = value,
        Channel::Scale => node.scale = glam::Vec3::splat(value),
        Channel::Opacity => node.opacity = value,
    }
}

fn read_target(target: Target, scene: &SceneGraph, session: &SessionState) -> f32 {
    match target {
        Target::Node(id, channel) => scene.get(id).map(|n| node_channel(n, channel)).unwrap_or(0.0),
        Target::Session(channel) => match channel {
            SessionChannel::AmbientVolume => session.ambient_volume,
            SessionChannel::SnowOpacity => session.snow_opacity,
            SessionChannel::AmbientRamp => session.ambient_ramp,
            SessionChannel::Zoom => session.zoom,
            SessionChannel::ZoomMin => session.zoom_min,
            SessionChannel::ZoomMax => session.zoom_max,
        },
    }
}

fn write_target(target: Target, value: f32, scene: &mut SceneGraph, session: &mut SessionState) {
    match target {
        Target::Node(id, channel) => {
            if let Some(node) = scene.get_mut(id) {
                set_node_channel(node, channel, value);
            }
        }
        Target::Session(channel) => match channel {
            SessionChannel::AmbientVolume => session.ambient_volume = value,
            SessionChannel::SnowOpacity => session.snow_opacity = value,
            SessionChannel::AmbientRamp => session.ambient_ramp = value,
            SessionChannel::Zoom => session.zoom = value,
            SessionChannel::ZoomMin => session.zoom_min = value,
            SessionChannel::ZoomMax => session.zoom_max = value,
        },
    }
}
