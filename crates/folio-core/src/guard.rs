#![forbid(unsafe_code)]

//! Cosmetic anti-inspection measures.
//!
//! None of this is enforceable: it only suppresses the browser's default
//! handling of a few shortcuts and gestures.

use crate::input::{KeyCode, KeyInput, Modifiers};

/// Decides which default browser actions to suppress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Guard {
    enabled: bool,
}

impl Guard {
    #[must_use]
    pub const fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    /// F12, Ctrl+S, Ctrl+Shift+I and Ctrl+U.
    #[must_use]
    pub fn blocks_key(&self, key: &KeyInput) -> bool {
        if !self.enabled {
            return false;
        }
        let ctrl = key.mods.contains(Modifiers::CTRL);
        let shift = key.mods.contains(Modifiers::SHIFT);
        match key.code {
            KeyCode::F(12) => true,
            KeyCode::Char('s' | 'u') => ctrl,
            KeyCode::Char('I') => ctrl && shift,
            _ => false,
        }
    }

    #[must_use]
    pub const fn blocks_context_menu(&self) -> bool {
        self.enabled
    }

    #[must_use]
    pub const fn blocks_drag(&self) -> bool {
        self.enabled
    }

    /// Text selection is only suppressed when it starts on an image.
    #[must_use]
    pub fn blocks_selection(&self, target_tag: &str) -> bool {
        self.enabled && target_tag.eq_ignore_ascii_case("img")
    }
}
