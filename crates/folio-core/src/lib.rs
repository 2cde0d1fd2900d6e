#![forbid(unsafe_code)]

//! Folio Core
//!
//! Host-agnostic interaction controller for a single-page portfolio: content
//! sections switched by navigation clicks and the keyboard, three overlays
//! (first-visit warning, image lightbox, email panel), tab-lifetime session
//! flags, plus the ambient audio, easter egg and decorative effects around
//! them.
//!
//! # Key Components
//!
//! - [`Folio`] - the controller; feed it [`PageEvent`]s, get [`Outcome`]s back
//! - [`Document`] - the page as seen by the controller (CSS-selector keyed)
//! - [`SessionStore`] - injected tab-lifetime key/value storage
//! - [`Overlay`] - one open/close contract for every transient panel
//! - [`InputRouter`] - keyboard shortcuts to section switches
//! - [`Scheduler`] - deterministic cancellable deferred tasks
//!
//! # Role in Folio
//! `folio-core` holds every rule and state machine. It never touches a
//! browser API: the `folio-web` crate implements [`Document`] and
//! [`SessionStore`] over `web-sys`, translates DOM events into
//! [`PageEvent`]s, executes [`Effect`]s, and reports time.
//!
//! # Determinism
//! There is no wall clock and no ambient entropy. Time is a monotonic
//! [`std::time::Duration`] since initialization supplied by the host, and the
//! shuffle seed is an argument to [`Folio::init`]. Given the same events at the
//! same times, the same page results.

pub mod ambient;
pub mod app;
pub mod clipboard;
pub mod config;
pub mod decor;
pub mod document;
pub mod easter_egg;
pub mod event;
pub mod guard;
pub mod input;
pub mod overlay;
pub mod registry;
pub mod scheduler;
pub mod session;
pub mod switcher;

pub use app::Folio;
pub use clipboard::ClipboardError;
pub use config::{ConfigError, FolioConfig};
pub use document::{Display, Document, MemoryDocument};
pub use event::{Effect, Outcome, PageEvent};
pub use input::{InputRouter, KeyAction, KeyCode, KeyInput, Modifiers};
pub use overlay::{Dismissal, ImagePayload, Overlay, OverlayKind};
pub use scheduler::{Scheduler, TaskId};
pub use session::{MemorySessionStore, SessionFlag, SessionFlags, SessionStore, StorageError};
pub use switcher::SwitchError;
