//! Voice pooling over an injected audio backend.
//!
//! The engine supplies the actual playback facility through [`AudioBackend`];
//! the core owns the policy: per-category voice pools that grow on demand and
//! never steal an in-flight voice, uniform buffer-variant choice, fixed
//! per-category volume, and uniform pitch jitter in cents.

use fnv::FnvHashMap;
use rand::Rng;
use smallvec::SmallVec;

/// Parameters for one playback start.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlayParams {
    pub volume: f32,
    pub detune_cents: f32,
    pub delay_sec: f32,
    pub looped: bool,
}

/// Playback capability supplied by the embedding engine.
pub trait AudioBackend {
    type Buffer;
    type Voice;

    fn create_voice(&mut self) -> Self::Voice;
    fn start(&mut self, voice: &mut Self::Voice, buffer: &Self::Buffer, params: PlayParams);
    fn stop(&mut self, voice: &mut Self::Voice);
    fn is_playing(&self, voice: &Self::Voice) -> bool;
}

/// The scene's sound identities.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CategoryId {
    Bark,
    Squeak,
    Splash,
    Thud,
    Creak,
    Rustle,
    Chime,
    Purr,
    Present(u8),
}

/// Declarative description of one category's assets and tuning.
#[derive(Clone, Copy, Debug)]
pub struct SoundSpec {
    pub id: CategoryId,
    pub base_path: &'static str,
    pub variants: usize,
    pub volume: f32,
    pub detune_spread_cents: f32,
}

/// One sound category: its decoded buffers and an ordered, grow-only pool of
/// voices.
pub struct SoundCategory<B: AudioBackend> {
    buffers: Vec<B::Buffer>,
    voices: SmallVec<[B::Voice; 4]>,
    volume: f32,
    detune_spread_cents: f32,
}

impl<B: AudioBackend> SoundCategory<B> {
    pub fn new(buffers: Vec<B::Buffer>, volume: f32, detune_spread_cents: f32) -> Self {
        Self {
            buffers,
            voices: SmallVec::new(),
            volume,
            detune_spread_cents,
        }
    }

    pub fn set_volume(&mut self, volume: f32) {
        self.volume = volume;
    }

    pub fn voice_count(&self) -> usize {
        self.voices.len()
    }

    pub fn buffer_count(&self) -> usize {
        self.buffers.len()
    }

    /// Plays a uniformly random buffer variant on an idle voice, growing the
    /// pool if every voice is busy. Never blocks and never interrupts a
    /// playing voice. Returns the voice index used.
    pub fn play(&mut self, backend: &mut B, rng: &mut impl Rng) -> Option<usize> {
        if self.buffers.is_empty() {
            return None;
        }
        let index = rng.gen_range(0..self.buffers.len());
        self.start(backend, rng, index, 0.0, false)
    }

    /// Plays a specific buffer variant, optionally after a delay. Used where
    /// a deterministic variant is required (the present music tracks).
    pub fn play_specific(
        &mut self,
        backend: &mut B,
        rng: &mut impl Rng,
        index: usize,
        delay_sec: f32,
    ) -> Option<usize> {
        if index >= self.buffers.len() {
            log::warn!(
                "[audio] variant {} requested but only {} loaded",
                index,
                self.buffers.len()
            );
            return None;
        }
        self.start(backend, rng, index, delay_sec, false)
    }

    /// Like [`Self::play_specific`] with looping playback.
    pub fn play_looped(
        &mut self,
        backend: &mut B,
        rng: &mut impl Rng,
        index: usize,
    ) -> Option<usize> {
        if index >= self.buffers.len() {
            log::warn!(
                "[audio] variant {} requested but only {} loaded",
                index,
                self.buffers.len()
            );
            return None;
        }
        self.start(backend, rng, index, 0.0, true)
    }

    fn start(
        &mut self,
        backend: &mut B,
        rng: &mut impl Rng,
        index: usize,
        delay_sec: f32,
        looped: bool,
    ) -> Option<usize> {
        let voice_index = self.acquire_idle(backend);
        let spread = self.detune_spread_cents;
        let detune_cents = if spread > 0.0 {
            rng.gen_range(-spread..=spread)
        } else {
            0.0
        };
        backend.start(
            &mut self.voices[voice_index],
            &self.buffers[index],
            PlayParams {
                volume: self.volume,
                detune_cents,
                delay_sec,
                looped,
            },
        );
        Some(voice_index)
    }

    fn acquire_idle(&mut self, backend: &mut B) -> usize {
        if let Some(i) = self.voices.iter().position(|v| !backend.is_playing(v)) {
            return i;
        }
        self.voices.push(backend.create_voice());
        log::debug!("[audio] pool grew to {} voices", self.voices.len());
        self.voices.len() - 1
    }
}

/// All sound categories of the scene, addressed by [`CategoryId`].
pub struct SoundBank<B: AudioBackend> {
    categories: FnvHashMap<CategoryId, SoundCategory<B>>,
}

impl<B: AudioBackend> Default for SoundBank<B> {
    fn default() -> Self {
        Self {
            categories: FnvHashMap::default(),
        }
    }
}

impl<B: AudioBackend> SoundBank<B> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the bank from specs, fetching all buffers ahead of use. A
    /// failed fetch leaves that variant absent; the category simply ends up
    /// with fewer usable variants than declared.
    pub fn from_specs(
        specs: &[SoundSpec],
        mut fetch: impl FnMut(&str) -> Option<B::Buffer>,
    ) -> Self {
        let mut bank = Self::new();
        for spec in specs {
            let buffers = load_variants(spec.base_path, spec.variants, &mut fetch);
            bank.insert(
                spec.id,
                SoundCategory::new(buffers, spec.volume, spec.detune_spread_cents),
            );
        }
        bank
    }

    pub fn insert(&mut self, id: CategoryId, category: SoundCategory<B>) {
        self.categories.insert(id, category);
    }

    pub fn get(&self, id: CategoryId) -> Option<&SoundCategory<B>> {
        self.categories.get(&id)
    }

    pub fn get_mut(&mut self, id: CategoryId) -> Option<&mut SoundCategory<B>> {
        self.categories.get_mut(&id)
    }

    pub fn play(&mut self, id: CategoryId, backend: &mut B, rng: &mut impl Rng) -> Option<usize> {
        match self.categories.get_mut(&id) {
            Some(category) => category.play(backend, rng),
            None => {
                log::debug!("[audio] no category {:?}", id);
                None
            }
        }
    }

    pub fn play_specific(
        &mut self,
        id: CategoryId,
        backend: &mut B,
        rng: &mut impl Rng,
        index: usize,
        delay_sec: f32,
    ) -> Option<usize> {
        match self.categories.get_mut(&id) {
            Some(category) => category.play_specific(backend, rng, index, delay_sec),
            None => {
                log::debug!("[audio] no category {:?}", id);
                None
            }
        }
    }

    pub fn play_looped(
        &mut self,
        id: CategoryId,
        backend: &mut B,
        rng: &mut impl Rng,
        index: usize,
    ) -> Option<usize> {
        match self.categories.get_mut(&id) {
            Some(category) => category.play_looped(backend, rng, index),
            None => {
                log::debug!("[audio] no category {:?}", id);
                None
            }
        }
    }
}

/// Multi-variant asset names follow the `base-001.ext` zero-padded
/// convention, derived by splitting the base name at its extension.
pub fn variant_paths(base_path: &str, count: usize) -> Vec<String> {
    if count <= 1 {
        return vec![base_path.to_string()];
    }
    match base_path.rsplit_once('.') {
        Some((stem, ext)) => (1..=count)
            .map(|i| format!("{stem}-{i:03}.{ext}"))
            .collect(),
        None => (1..=count).map(|i| format!("{base_path}-{i:03}")).collect(),
    }
}

/// Bulk-fetches a category's variants. Missing files are logged and skipped.
pub fn load_variants<T>(
    base_path: &str,
    count: usize,
    mut fetch: impl FnMut(&str) -> Option<T>,
) -> Vec<T> {
    variant_paths(base_path, count)
        .iter()
        .filter_map(|path| {
            let buffer = fetch(path);
            if buffer.is_none() {
                log::warn!("[audio] failed to load '{}'", path);
            }
            buffer
        })
        .collect()
}
