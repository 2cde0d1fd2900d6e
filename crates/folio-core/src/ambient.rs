#![forbid(unsafe_code)]

//! Ambient background audio playlist.
//!
//! Playback waits for two things: the page being "audio ready" (the warning
//! was skipped or acknowledged) and a user gesture, because browsers refuse
//! autoplay without one. After that the playlist runs forever: shuffled once,
//! advancing on every end or load error.

use rand::Rng;
use rand::seq::SliceRandom;

use crate::config::Track;
use crate::event::Effect;

#[derive(Debug, Clone)]
pub struct Ambient {
    tracks: Vec<Track>,
    volume: f64,
    index: usize,
    ready: bool,
    started: bool,
    muted: bool,
}

impl Ambient {
    #[must_use]
    pub fn new(tracks: Vec<Track>, volume: f64) -> Self {
        Self {
            tracks,
            volume,
            index: 0,
            ready: false,
            started: false,
            muted: false,
        }
    }

    /// Allow the next user gesture to start playback.
    pub fn mark_ready(&mut self) {
        self.ready = true;
    }

    #[must_use]
    pub const fn is_ready(&self) -> bool {
        self.ready
    }

    #[must_use]
    pub const fn is_started(&self) -> bool {
        self.started
    }

    #[must_use]
    pub const fn is_muted(&self) -> bool {
        self.muted
    }

    /// Track currently loaded (or about to be).
    #[must_use]
    pub fn current(&self) -> Option<&Track> {
        if self.started {
            self.tracks.get(self.index)
        } else {
            None
        }
    }

    /// Start on a user gesture. Returns `None` when not ready or already started.
    pub fn start<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<Vec<Effect>> {
        if !self.ready || self.started {
            return None;
        }
        self.started = true;
        self.tracks.shuffle(rng);
        self.index = 0;
        tracing::info!(tracks = self.tracks.len(), "starting ambient audio");
        Some(self.load_current())
    }

    /// Move to the next track after the current one ended or failed.
    pub fn advance(&mut self) -> Vec<Effect> {
        if !self.started || self.tracks.is_empty() {
            return Vec::new();
        }
        self.index = (self.index + 1) % self.tracks.len();
        self.load_current()
    }

    pub fn mute(&mut self) -> Vec<Effect> {
        self.muted = true;
        if self.started && !self.tracks.is_empty() {
            vec![Effect::PauseTrack]
        } else {
            Vec::new()
        }
    }

    pub fn unmute(&mut self) -> Vec<Effect> {
        self.muted = false;
        if self.started && !self.tracks.is_empty() {
            vec![Effect::PlayTrack]
        } else {
            Vec::new()
        }
    }

    fn load_current(&self) -> Vec<Effect> {
        let Some(track) = self.tracks.get(self.index) else {
            return Vec::new();
        };
        tracing::debug!(src = %track.src, "loading ambient track");
        let mut effects = vec![Effect::LoadTrack {
            src: track.src.clone(),
            volume: self.volume,
        }];
        if !self.muted {
            effects.push(Effect::PlayTrack);
        }
        effects
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    fn tracks() -> Vec<Track> {
        (1..=3)
            .map(|n| Track {
                src: format!("t{n}.mp3"),
                name: format!("Track {n}"),
            })
            .collect()
    }

    #[test]
    fn waits_for_ready() {
        let mut rng = SmallRng::seed_from_u64(1);
        let mut amb = Ambient::new(tracks(), 0.05);
        assert!(amb.start(&mut rng).is_none());
        amb.mark_ready();
        let effects = amb.start(&mut rng).unwrap();
        assert!(matches!(effects[0], Effect::LoadTrack { volume, .. } if volume == 0.05));
        assert_eq!(effects[1], Effect::PlayTrack);
        assert!(amb.start(&mut rng).is_none());
    }

    #[test]
    fn shuffle_keeps_names_with_tracks() {
        let mut rng = SmallRng::seed_from_u64(7);
        let mut amb = Ambient::new(tracks(), 0.05);
        amb.mark_ready();
        amb.start(&mut rng);
        for _ in 0..3 {
            let t = amb.current().unwrap().clone();
            assert_eq!(
                t.src.trim_start_matches('t').trim_end_matches(".mp3"),
                t.name.trim_start_matches("Track ")
            );
            amb.advance();
        }
    }

    #[test]
    fn advance_wraps() {
        let mut rng = SmallRng::seed_from_u64(3);
        let mut amb = Ambient::new(tracks(), 0.05);
        amb.mark_ready();
        amb.start(&mut rng);
        let first = amb.current().unwrap().clone();
        amb.advance();
        amb.advance();
        amb.advance();
        assert_eq!(amb.current(), Some(&first));
    }

    #[test]
    fn muted_tracks_load_without_playing() {
        let mut rng = SmallRng::seed_from_u64(3);
        let mut amb = Ambient::new(tracks(), 0.05);
        amb.mark_ready();
        amb.start(&mut rng);
        assert_eq!(amb.mute(), vec![Effect::PauseTrack]);
        let effects = amb.advance();
        assert_eq!(effects.len(), 1);
        assert!(matches!(effects[0], Effect::LoadTrack { .. }));
        assert_eq!(amb.unmute(), vec![Effect::PlayTrack]);
    }

    #[test]
    fn mute_before_start_emits_nothing() {
        let mut amb = Ambient::new(tracks(), 0.05);
        assert!(amb.mute().is_empty());
        assert!(amb.is_muted());
        assert!(amb.unmute().is_empty());
    }
}
