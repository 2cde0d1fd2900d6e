#![forbid(unsafe_code)]

//! Copy-to-clipboard flow with a legacy fallback.
//!
//! A copy starts with an async clipboard write. If it resolves, the copy is
//! confirmed; if it rejects, the legacy selection-and-copy path runs and the
//! copy is confirmed anyway. Both paths reach the same confirmation state.

use std::fmt;

use crate::event::Effect;

/// Why the async clipboard write did not succeed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClipboardError {
    /// `navigator.clipboard` does not exist (insecure context, old browser).
    Unavailable,
    /// The write promise rejected.
    Rejected(String),
}

impl fmt::Display for ClipboardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unavailable => write!(f, "clipboard API unavailable"),
            Self::Rejected(msg) => write!(f, "clipboard write rejected: {msg}"),
        }
    }
}

impl std::error::Error for ClipboardError {}

/// Which path completed a copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyPath {
    Clipboard,
    Legacy,
}

/// Tracks the one in-flight copy.
#[derive(Debug, Clone, Default)]
pub struct CopyFlow {
    pending: Option<String>,
}

impl CopyFlow {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Start copying `text`. A second request while one is in flight
    /// replaces it.
    pub fn begin(&mut self, text: &str) -> Effect {
        self.pending = Some(text.to_string());
        Effect::WriteClipboard(text.to_string())
    }

    /// The async write resolved.
    pub fn succeeded(&mut self) -> Option<CopyPath> {
        self.pending.take().map(|_| CopyPath::Clipboard)
    }

    /// The async write failed: returns the fallback effect to run.
    pub fn failed(&mut self, err: &ClipboardError) -> Option<(CopyPath, Effect)> {
        let text = self.pending.take()?;
        tracing::warn!(%err, "clipboard write failed, using legacy copy");
        Some((CopyPath::Legacy, Effect::LegacyCopy(text)))
    }
}
