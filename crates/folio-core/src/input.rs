#![forbid(unsafe_code)]

//! Keyboard input: DOM key normalization and routing.
//!
//! The router has no state of its own beyond a cursor into the keyboard
//! order; whether an overlay intercepts input is a query the caller answers
//! from overlay state and passes in.
//!
//! | Key | No overlay open | Overlay open |
//! |-----|-----------------|--------------|
//! | ArrowLeft / ArrowRight | step the cursor (wrapping), switch, prevent default | ignored |
//! | Digit N (1..=9) | switch to index N-1 if in range, prevent default | ignored |
//! | Escape | close the lightbox if open | close the lightbox if open |
//!
//! Escape only ever targets the lightbox. Other overlays have their own
//! dismissal rules and are not bound to Escape.

use bitflags::bitflags;

bitflags! {
    /// Modifier keys held during a key event.
    #[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        const SHIFT = 0b0001;
        const ALT   = 0b0010;
        const CTRL  = 0b0100;
        const SUPER = 0b1000;
    }
}

/// Normalized key identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum KeyCode {
    Char(char),
    Escape,
    Left,
    Right,
    F(u8),
    Other(Box<str>),
}

impl KeyCode {
    /// Normalize a DOM `KeyboardEvent.key` value.
    #[must_use]
    pub fn from_dom_key(key: &str) -> Self {
        match key {
            "Escape" | "Esc" => Self::Escape,
            "ArrowLeft" | "Left" => Self::Left,
            "ArrowRight" | "Right" => Self::Right,
            _ => {
                if let Some(n) = parse_function_key(key) {
                    return Self::F(n);
                }
                let mut chars = key.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Self::Char(c),
                    _ => Self::Other(key.into()),
                }
            }
        }
    }
}

fn parse_function_key(key: &str) -> Option<u8> {
    let digits = key.strip_prefix('F')?;
    let n: u8 = digits.parse().ok()?;
    (1..=24).contains(&n).then_some(n)
}

/// One key-down event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyInput {
    pub code: KeyCode,
    pub mods: Modifiers,
}

impl KeyInput {
    #[must_use]
    pub fn new(code: KeyCode) -> Self {
        Self {
            code,
            mods: Modifiers::empty(),
        }
    }

    /// Build from a DOM key string and modifier flags.
    #[must_use]
    pub fn from_dom(key: &str, mods: Modifiers) -> Self {
        Self {
            code: KeyCode::from_dom_key(key),
            mods,
        }
    }
}

/// What a key press asks the controller to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAction {
    Switch(String),
    CloseLightbox,
    Ignore,
}

/// Routing decision for one key press.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Routed {
    pub action: KeyAction,
    /// Suppress the browser's default handling (scroll-on-arrow).
    pub prevent_default: bool,
}

impl Routed {
    const IGNORED: Self = Self {
        action: KeyAction::Ignore,
        prevent_default: false,
    };

    fn switch(id: &str) -> Self {
        Self {
            action: KeyAction::Switch(id.to_string()),
            prevent_default: true,
        }
    }
}

/// Maps keys to navigation over a fixed, ordered list of section ids.
#[derive(Debug, Clone)]
pub struct InputRouter {
    order: Vec<String>,
    cursor: usize,
}

impl InputRouter {
    #[must_use]
    pub fn new(order: Vec<String>) -> Self {
        Self { order, cursor: 0 }
    }

    #[must_use]
    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    /// Move the cursor onto `id` if it is in the keyboard order.
    pub fn sync_to(&mut self, id: &str) {
        if let Some(pos) = self.order.iter().position(|s| s == id) {
            self.cursor = pos;
        }
    }

    /// Route one key press. `overlay_active` is true while any overlay is open.
    pub fn route(&mut self, key: &KeyInput, overlay_active: bool) -> Routed {
        match &key.code {
            KeyCode::Escape => Routed {
                action: KeyAction::CloseLightbox,
                prevent_default: false,
            },
            KeyCode::Left | KeyCode::Right if !overlay_active && !self.order.is_empty() => {
                let len = self.order.len();
                self.cursor = if key.code == KeyCode::Left {
                    if self.cursor == 0 {
                        len - 1
                    } else {
                        self.cursor - 1
                    }
                } else if self.cursor + 1 >= len {
                    0
                } else {
                    self.cursor + 1
                };
                Routed::switch(&self.order[self.cursor])
            }
            KeyCode::Char(c @ '1'..='9') if !overlay_active => {
                let index = (*c as usize) - ('1' as usize);
                match self.order.get(index) {
                    Some(id) => {
                        self.cursor = index;
                        Routed::switch(id)
                    }
                    None => Routed::IGNORED,
                }
            }
            _ => Routed::IGNORED,
        }
    }
}
