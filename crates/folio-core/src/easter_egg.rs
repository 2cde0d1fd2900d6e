#![forbid(unsafe_code)]

//! One-shot easter-egg video, gated by a session flag.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EggState {
    /// Icon visible, video not yet played this tab.
    Armed,
    Playing,
    /// Played (this load or earlier in the tab); icon hidden.
    Spent,
}

#[derive(Debug, Clone)]
pub struct EasterEgg {
    state: EggState,
    video_src: String,
}

impl EasterEgg {
    #[must_use]
    pub fn new(already_played: bool, video_src: impl Into<String>) -> Self {
        Self {
            state: if already_played {
                EggState::Spent
            } else {
                EggState::Armed
            },
            video_src: video_src.into(),
        }
    }

    #[must_use]
    pub const fn state(&self) -> EggState {
        self.state
    }

    #[must_use]
    pub fn video_src(&self) -> &str {
        &self.video_src
    }

    /// Armed → Playing. Returns whether playback should start.
    pub fn trigger(&mut self) -> bool {
        if self.state != EggState::Armed {
            return false;
        }
        self.state = EggState::Playing;
        true
    }

    /// Playing → Spent. Returns whether the video should be torn down.
    pub fn finish(&mut self) -> bool {
        if self.state != EggState::Playing {
            return false;
        }
        self.state = EggState::Spent;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plays_once() {
        let mut egg = EasterEgg::new(false, "v.mp4");
        assert!(egg.trigger());
        assert!(!egg.trigger());
        assert!(egg.finish());
        assert!(!egg.finish());
        assert_eq!(egg.state(), EggState::Spent);
    }

    #[test]
    fn already_played_never_triggers() {
        let mut egg = EasterEgg::new(true, "v.mp4");
        assert!(!egg.trigger());
        assert!(!egg.finish());
    }
}
