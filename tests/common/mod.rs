// Shared helpers for the host-side tests: a scripted audio backend and the
// standard room hierarchy.

#![allow(dead_code)]

use room_core::audio::{AudioBackend, PlayParams, SoundBank};
use room_core::profile::SceneProfile;
use room_core::scene::SceneGraph;

/// A voice is an index into the backend's playing table, so tests can finish
/// voices while the pool still holds them.
pub struct FakeVoice(pub usize);

#[derive(Default)]
pub struct FakeAudio {
    pub playing: Vec<bool>,
    /// Every start call: (buffer path, params).
    pub starts: Vec<(String, PlayParams)>,
}

impl FakeAudio {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn finish_all(&mut self) {
        for playing in &mut self.playing {
            *playing = false;
        }
    }

    pub fn playing_count(&self) -> usize {
        self.playing.iter().filter(|p| **p).count()
    }

    pub fn starts_for(&self, path_fragment: &str) -> usize {
        self.starts
            .iter()
            .filter(|(path, _)| path.contains(path_fragment))
            .count()
    }
}

impl AudioBackend for FakeAudio {
    type Buffer = String;
    type Voice = FakeVoice;

    fn create_voice(&mut self) -> FakeVoice {
        self.playing.push(false);
        FakeVoice(self.playing.len() - 1)
    }

    fn start(&mut self, voice: &mut FakeVoice, buffer: &String, params: PlayParams) {
        self.playing[voice.0] = true;
        self.starts.push((buffer.clone(), params));
    }

    fn stop(&mut self, voice: &mut FakeVoice) {
        self.playing[voice.0] = false;
    }

    fn is_playing(&self, voice: &FakeVoice) -> bool {
        self.playing[voice.0]
    }
}

/// Sound bank for the winter profile where every fetch succeeds.
pub fn full_bank() -> SoundBank<FakeAudio> {
    SoundBank::from_specs(&SceneProfile::winter().sounds, |path| {
        Some(path.to_string())
    })
}

/// The standard room: every animated object with its collision proxy one
/// level below, plus the hinge/lid/mouth sub-nodes the handlers look up.
pub fn build_room() -> SceneGraph {
    let mut scene = SceneGraph::new();
    let room = scene.add("room", None).unwrap();

    for prop in ["chair", "stool", "dog", "egg", "fish", "books", "mac"] {
        let node = scene.add(prop, Some(room)).unwrap();
        scene.add(format!("col-{prop}"), Some(node)).unwrap();
    }

    let window = scene.add("window", Some(room)).unwrap();
    scene.add("window-handle", Some(window)).unwrap();
    scene.add("col-window", Some(window)).unwrap();

    let letter = scene.add("letter", Some(room)).unwrap();
    scene.add("col-letter", Some(letter)).unwrap();

    let gift = scene.add("gift", Some(room)).unwrap();
    scene.add("gift-lid", Some(gift)).unwrap();
    scene.add("col-gift", Some(gift)).unwrap();

    for i in 0..3 {
        let present = scene.add(format!("present-{i}"), Some(room)).unwrap();
        scene
            .add(format!("present-{i}-mouth"), Some(present))
            .unwrap();
        scene.add(format!("col-present-{i}"), Some(present)).unwrap();
    }

    let tree = scene.add("tree", Some(room)).unwrap();
    let cat = scene.add("cat", Some(tree)).unwrap();
    scene.add("col-cat", Some(cat)).unwrap();

    scene
}
