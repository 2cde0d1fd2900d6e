#![forbid(unsafe_code)]

//! Events pushed in by the host and effects handed back to it.
//!
//! The core mutates the page synchronously through [`Document`]. Anything
//! that is asynchronous in the browser (clipboard, media playback, animation
//! frames) or that creates and destroys elements (ripples, the easter-egg
//! video) is returned as an [`Effect`] for the host to carry out. Completion
//! of asynchronous work comes back as another [`PageEvent`].
//!
//! [`Document`]: crate::document::Document

use crate::clipboard::ClipboardError;
use crate::input::KeyInput;

/// One browser event, already reduced to what the controller needs.
#[derive(Debug, Clone, PartialEq)]
pub enum PageEvent {
    /// Click on a nav button; `section` is its `data-section` value.
    NavClick { section: String },
    /// Pointer entered a nav button.
    NavHover { section: String },
    /// Click on the warning panel's proceed button.
    ProceedClick,
    /// Click on a lightbox-enabled image.
    ImageClick { src: String, caption: String },
    /// Click on the lightbox close button.
    LightboxCloseClick,
    /// Click inside the lightbox container; `on_backdrop` when the target is
    /// the container itself rather than its content.
    LightboxClick { on_backdrop: bool },
    EmailLinkClick,
    EmailTextClick,
    /// The async clipboard write resolved.
    ClipboardWritten,
    /// The async clipboard write rejected or the API is missing.
    ClipboardFailed(ClipboardError),
    Key(KeyInput),
    /// Any click or key press on the page, used to unlock audio.
    UserGesture { target_is_link: bool },
    TrackEnded,
    TrackFailed { reason: String },
    /// `play()` was refused (autoplay policy).
    PlaybackRejected { reason: String },
    EasterEggClick,
    VideoEnded,
    VideoFailed,
    Scroll { scroll_y: f64 },
    /// The animation frame requested by [`Effect::RequestAnimationFrame`].
    AnimationFrame,
    Resize,
    ContextMenu,
    DragStart,
    SelectStart { target_tag: String },
}

/// Work the host performs on the core's behalf.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// `navigator.clipboard.writeText`; report back with
    /// [`PageEvent::ClipboardWritten`] or [`PageEvent::ClipboardFailed`].
    WriteClipboard(String),
    /// Textarea + `execCommand("copy")` fallback. Fire and forget.
    LegacyCopy(String),
    /// Point the ambient audio element at `src` and set its volume.
    LoadTrack { src: String, volume: f64 },
    PlayTrack,
    PauseTrack,
    PlayVideo { src: String },
    RemoveVideo,
    /// Append a ripple element to the first match of `target`.
    AddRipple { target: String, id: u64 },
    RemoveRipple { id: u64 },
    /// Report back with [`PageEvent::AnimationFrame`].
    RequestAnimationFrame,
}

/// Result of handling an event or advancing time.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Outcome {
    /// Call `preventDefault()` on the originating DOM event.
    pub prevent_default: bool,
    pub effects: Vec<Effect>,
}

impl Outcome {
    #[must_use]
    pub fn prevented() -> Self {
        Self {
            prevent_default: true,
            effects: Vec::new(),
        }
    }

    pub fn push(&mut self, effect: Effect) {
        self.effects.push(effect);
    }

    pub fn extend(&mut self, effects: impl IntoIterator<Item = Effect>) {
        self.effects.extend(effects);
    }

    pub fn merge(&mut self, other: Outcome) {
        self.prevent_default |= other.prevent_default;
        self.effects.extend(other.effects);
    }
}
