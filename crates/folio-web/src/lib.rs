#![forbid(unsafe_code)]

//! WASM host for Folio.
//!
//! This crate is intentionally host-specific (web/WASM). It owns everything
//! the core refuses to know about:
//! - the real DOM, behind [`folio_core::Document`],
//! - `window.sessionStorage`, behind [`folio_core::SessionStore`],
//! - listeners that turn DOM events into [`folio_core::PageEvent`]s,
//! - the one browser timer that drives the core scheduler,
//! - clipboard, media and animation-frame [`folio_core::Effect`]s,
//! - a `tracing` layer that writes to the browser console.
//!
//! The pieces that do not need a browser (console formatting, config
//! resolution, time and seed conversion, page decoration assets) compile on
//! every target so they can be unit tested natively.

pub mod boot;
pub mod console;
pub mod decoration;

#[cfg(target_arch = "wasm32")]
mod dom;
#[cfg(target_arch = "wasm32")]
mod storage;
#[cfg(target_arch = "wasm32")]
mod wasm;

#[cfg(target_arch = "wasm32")]
pub use wasm::FolioWeb;

/// Off the browser there is no page to boot, so no controller is ever
/// current and every call is a no-op.
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug)]
pub struct FolioWeb {
    _private: (),
}

#[cfg(not(target_arch = "wasm32"))]
impl FolioWeb {
    pub fn current() -> Option<FolioWeb> {
        None
    }

    pub fn active_section(&self) -> Option<String> {
        None
    }

    pub fn show_section(&self, _id: &str) -> bool {
        false
    }
}
