#![forbid(unsafe_code)]

//! Decorative effects: typewriter title, cycling name, scroll parallax.
//!
//! These carry no invariants beyond "never panic"; each is a tiny state
//! machine stepped by the controller's scheduled tasks.

use rand::Rng;
use rand::seq::SliceRandom;

/// Retypes a string one character per step.
#[derive(Debug, Clone)]
pub struct Typewriter {
    chars: Vec<char>,
    shown: usize,
}

impl Typewriter {
    #[must_use]
    pub fn new(text: &str) -> Self {
        Self {
            chars: text.chars().collect(),
            shown: 0,
        }
    }

    /// Reveal one more character and return the visible prefix, or `None`
    /// once everything is shown.
    pub fn step(&mut self) -> Option<String> {
        if self.shown >= self.chars.len() {
            return None;
        }
        self.shown += 1;
        Some(self.chars[..self.shown].iter().collect())
    }

    #[must_use]
    pub fn is_done(&self) -> bool {
        self.shown >= self.chars.len()
    }
}

/// Endless round-robin over a shuffled list of names.
#[derive(Debug, Clone)]
pub struct NameCycle {
    names: Vec<String>,
    index: usize,
}

impl NameCycle {
    pub fn shuffled<R: Rng + ?Sized>(mut names: Vec<String>, rng: &mut R) -> Self {
        names.shuffle(rng);
        Self { names, index: 0 }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Next name to display.
    pub fn next_name(&mut self) -> Option<&str> {
        if self.names.is_empty() {
            return None;
        }
        let i = self.index;
        self.index = (self.index + 1) % self.names.len();
        Some(&self.names[i])
    }
}

/// Coalesces scroll events into at most one pending animation frame.
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameThrottle {
    pending: bool,
}

impl FrameThrottle {
    /// Returns `true` when a new frame must be requested.
    pub fn request(&mut self) -> bool {
        !std::mem::replace(&mut self.pending, true)
    }

    pub fn frame_done(&mut self) {
        self.pending = false;
    }

    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.pending
    }
}

/// `transform` for the background video at `scroll_y`.
#[must_use]
pub fn parallax_transform(scroll_y: f64) -> String {
    format!("translateY({}px)", scroll_y * 0.5)
}

/// `transform` for the logo at `scroll_y`.
#[must_use]
pub fn logo_transform(scroll_y: f64) -> String {
    format!("rotate({}deg)", scroll_y * 0.1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    #[test]
    fn typewriter_reveals_prefixes() {
        let mut tw = Typewriter::new("héy");
        assert_eq!(tw.step().as_deref(), Some("h"));
        assert_eq!(tw.step().as_deref(), Some("hé"));
        assert_eq!(tw.step().as_deref(), Some("héy"));
        assert!(tw.is_done());
        assert_eq!(tw.step(), None);
    }

    #[test]
    fn empty_typewriter_is_done() {
        let mut tw = Typewriter::new("");
        assert!(tw.is_done());
        assert_eq!(tw.step(), None);
    }

    #[test]
    fn name_cycle_visits_every_name() {
        let mut rng = SmallRng::seed_from_u64(42);
        let names: Vec<String> = ["a", "b", "c"].into_iter().map(String::from).collect();
        let mut cycle = NameCycle::shuffled(names, &mut rng);
        let mut seen: Vec<String> = (0..3)
            .map(|_| cycle.next_name().unwrap().to_string())
            .collect();
        let wrapped = cycle.next_name().unwrap().to_string();
        assert_eq!(wrapped, seen[0]);
        seen.sort();
        assert_eq!(seen, vec!["a", "b", "c"]);
    }

    #[test]
    fn empty_cycle_yields_nothing() {
        let mut rng = SmallRng::seed_from_u64(0);
        let mut cycle = NameCycle::shuffled(Vec::new(), &mut rng);
        assert!(cycle.next_name().is_none());
    }

    #[test]
    fn throttle_coalesces() {
        let mut t = FrameThrottle::default();
        assert!(t.request());
        assert!(!t.request());
        t.frame_done();
        assert!(t.request());
    }

    #[test]
    fn parallax_values() {
        assert_eq!(parallax_transform(100.0), "translateY(50px)");
        assert_eq!(logo_transform(100.0), "rotate(10deg)");
    }
}
