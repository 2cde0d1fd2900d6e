#![forbid(unsafe_code)]

//! Overlays: transient panels superimposed on the page.
//!
//! The warning splash, the image lightbox and the email panel all share one
//! open/close contract, expressed by [`Overlay`]. What differs between them is
//! data, not code:
//!
//! - the **payload** type presented on open ([`ImagePayload`] for the
//!   lightbox, `()` for the others),
//! - the **dismissal set**: which user actions may close it,
//! - whether it **locks page scroll** while open,
//! - how it **exits**: by dropping the show class, or by fading out and being
//!   concealed afterwards.
//!
//! # Invariants
//!
//! 1. Closed is the initial and rest state.
//! 2. A scroll-locking overlay locks on open and unlocks on every close path.
//! 3. A dismissal action outside the overlay's set never closes it.
//! 4. Closing a closed overlay is a no-op.
//!
//! Deferred work owned by an overlay (auto-close, post-fade conceal) is held
//! as a [`TaskId`]; the owner cancels it through the scheduler when the
//! overlay is re-opened or closed some other way.

use std::time::Duration;

use bitflags::bitflags;

use crate::document::{Display, Document};
use crate::scheduler::TaskId;

bitflags! {
    /// User actions that may close an overlay.
    #[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Dismissal: u8 {
        /// Click on the overlay's close button.
        const CLOSE_BUTTON = 0b0_0001;
        /// Click on the backdrop (not on the content).
        const BACKDROP     = 0b0_0010;
        /// Escape key while open.
        const ESCAPE       = 0b0_0100;
        /// Explicit "proceed" acknowledgement.
        const PROCEED      = 0b0_1000;
        /// Timer-driven close after a completed action.
        const AUTO         = 0b1_0000;
    }
}

/// Which overlay an instance is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OverlayKind {
    Warning,
    Lightbox,
    Email,
}

impl OverlayKind {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Warning => "warning",
            Self::Lightbox => "lightbox",
            Self::Email => "email",
        }
    }
}

/// How an overlay leaves the screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Exit {
    /// Drop the show class immediately.
    Hide,
    /// Add `class`, then conceal (`display: none`) once `after` has elapsed.
    FadeOut { class: String, after: Duration },
}

/// Result of a close or dismissal attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseOutcome {
    /// Not open, or the action is not in the dismissal set.
    Ignored,
    /// Closed and gone from view.
    Closed,
    /// Closed; the caller must call [`Overlay::conceal`] after the delay.
    Fading { conceal_after: Duration },
}

impl CloseOutcome {
    #[must_use]
    pub const fn closed(self) -> bool {
        !matches!(self, Self::Ignored)
    }
}

/// Content presented by an overlay when it opens.
pub trait Payload {
    /// Where the payload is rendered.
    type View;

    fn present<D: Document + ?Sized>(&self, view: &Self::View, doc: &mut D);
}

impl Payload for () {
    type View = ();

    fn present<D: Document + ?Sized>(&self, _view: &(), _doc: &mut D) {}
}

/// Lightbox payload: the enlarged image and its caption.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImagePayload {
    pub src: String,
    pub caption: String,
}

/// Lightbox image and caption elements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageView {
    pub image: String,
    pub caption: String,
}

impl Payload for ImagePayload {
    type View = ImageView;

    fn present<D: Document + ?Sized>(&self, view: &ImageView, doc: &mut D) {
        if !doc.set_attribute(&view.image, "src", &self.src) {
            tracing::debug!(selector = %view.image, "lightbox image element missing");
        }
        doc.set_text(&view.caption, &self.caption);
    }
}

/// Static description of one overlay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverlaySpec {
    pub kind: OverlayKind,
    /// Selector of the overlay container.
    pub container: String,
    pub show_class: String,
    pub dismissal: Dismissal,
    pub locks_scroll: bool,
    pub exit: Exit,
}

/// One overlay instance.
pub struct Overlay<P: Payload> {
    spec: OverlaySpec,
    view: P::View,
    open: bool,
    payload: Option<P>,
    pending: Option<TaskId>,
}

impl<P: Payload> std::fmt::Debug for Overlay<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Overlay")
            .field("kind", &self.spec.kind)
            .field("open", &self.open)
            .field("has_payload", &self.payload.is_some())
            .field("pending", &self.pending)
            .finish()
    }
}

impl<P: Payload> Overlay<P> {
    #[must_use]
    pub fn new(spec: OverlaySpec, view: P::View) -> Self {
        Self {
            spec,
            view,
            open: false,
            payload: None,
            pending: None,
        }
    }

    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.open
    }

    #[must_use]
    pub const fn kind(&self) -> OverlayKind {
        self.spec.kind
    }

    /// Payload presented by the most recent open.
    #[must_use]
    pub fn payload(&self) -> Option<&P> {
        self.payload.as_ref()
    }

    /// Open the overlay, presenting `payload` first if given.
    ///
    /// Opening an open overlay re-presents the new payload. Returns whether
    /// the overlay transitioned from closed to open.
    pub fn open<D: Document + ?Sized>(&mut self, doc: &mut D, payload: Option<P>) -> bool {
        if let Some(payload) = payload {
            payload.present(&self.view, doc);
            self.payload = Some(payload);
        }

        if !doc.add_class(&self.spec.container, &self.spec.show_class) {
            tracing::debug!(overlay = self.spec.kind.name(), selector = %self.spec.container, "overlay container missing");
        }
        if let Exit::FadeOut { class, .. } = &self.spec.exit {
            doc.remove_class(&self.spec.container, class);
        }
        if self.spec.locks_scroll {
            doc.set_scroll_locked(true);
        }

        let opened = !self.open;
        self.open = true;
        if opened {
            tracing::debug!(overlay = self.spec.kind.name(), "overlay opened");
        }
        opened
    }

    /// Close the overlay regardless of the dismissal set.
    pub fn close<D: Document + ?Sized>(&mut self, doc: &mut D) -> CloseOutcome {
        if !self.open {
            return CloseOutcome::Ignored;
        }
        self.open = false;
        if self.spec.locks_scroll {
            doc.set_scroll_locked(false);
        }
        tracing::debug!(overlay = self.spec.kind.name(), "overlay closed");

        match &self.spec.exit {
            Exit::Hide => {
                doc.remove_class(&self.spec.container, &self.spec.show_class);
                CloseOutcome::Closed
            }
            Exit::FadeOut { class, after } => {
                doc.add_class(&self.spec.container, class);
                CloseOutcome::Fading {
                    conceal_after: *after,
                }
            }
        }
    }

    /// Close in response to a user action, if the action is in the set.
    pub fn dismiss<D: Document + ?Sized>(
        &mut self,
        doc: &mut D,
        action: Dismissal,
    ) -> CloseOutcome {
        if !self.spec.dismissal.intersects(action) {
            return CloseOutcome::Ignored;
        }
        self.close(doc)
    }

    /// Remove the container from layout (`display: none`).
    pub fn conceal<D: Document + ?Sized>(&mut self, doc: &mut D) {
        doc.set_display(&self.spec.container, Display::None);
    }

    /// Record the task handle of pending deferred work, returning the
    /// previous one so the caller can cancel it.
    pub fn replace_pending(&mut self, id: TaskId) -> Option<TaskId> {
        self.pending.replace(id)
    }

    pub fn take_pending(&mut self) -> Option<TaskId> {
        self.pending.take()
    }

    /// Forget the pending handle once it has fired.
    pub fn clear_pending_if(&mut self, id: TaskId) {
        if self.pending == Some(id) {
            self.pending = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::MemoryDocument;

    fn lightbox() -> Overlay<ImagePayload> {
        Overlay::new(
            OverlaySpec {
                kind: OverlayKind::Lightbox,
                container: "#imageModal".into(),
                show_class: "show".into(),
                dismissal: Dismissal::CLOSE_BUTTON | Dismissal::BACKDROP | Dismissal::ESCAPE,
                locks_scroll: true,
                exit: Exit::Hide,
            },
            ImageView {
                image: "#modalImage".into(),
                caption: "#modalCaption".into(),
            },
        )
    }

    fn doc() -> MemoryDocument {
        MemoryDocument::new()
            .with_element("#imageModal")
            .with_element("#modalImage")
            .with_element("#modalCaption")
            .with_element("#warningScreen")
    }

    #[test]
    fn open_presents_payload_and_locks_scroll() {
        let mut doc = doc();
        let mut lb = lightbox();
        let payload = ImagePayload {
            src: "a.png".into(),
            caption: "A".into(),
        };
        assert!(lb.open(&mut doc, Some(payload.clone())));
        assert!(lb.is_open());
        assert!(doc.has_class("#imageModal", "show"));
        assert!(doc.is_scroll_locked());
        assert_eq!(doc.attribute("#modalImage", "src"), Some("a.png"));
        assert_eq!(doc.text("#modalCaption").as_deref(), Some("A"));
        assert_eq!(lb.payload(), Some(&payload));
    }

    #[test]
    fn dismissal_outside_set_is_ignored() {
        let mut doc = doc();
        let mut lb = lightbox();
        lb.open(&mut doc, None);
        assert_eq!(lb.dismiss(&mut doc, Dismissal::PROCEED), CloseOutcome::Ignored);
        assert!(lb.is_open());
        assert!(doc.is_scroll_locked());
        assert_eq!(lb.dismiss(&mut doc, Dismissal::BACKDROP), CloseOutcome::Closed);
        assert!(!doc.is_scroll_locked());
        assert!(!doc.has_class("#imageModal", "show"));
    }

    #[test]
    fn closing_closed_overlay_is_noop() {
        let mut doc = doc();
        let mut lb = lightbox();
        assert_eq!(lb.close(&mut doc), CloseOutcome::Ignored);
        assert!(!doc.is_scroll_locked());
    }

    #[test]
    fn fade_exit_requests_conceal() {
        let mut doc = doc();
        let mut warning: Overlay<()> = Overlay::new(
            OverlaySpec {
                kind: OverlayKind::Warning,
                container: "#warningScreen".into(),
                show_class: "show".into(),
                dismissal: Dismissal::PROCEED,
                locks_scroll: false,
                exit: Exit::FadeOut {
                    class: "fade-out".into(),
                    after: Duration::from_millis(2000),
                },
            },
            (),
        );
        warning.open(&mut doc, None);
        assert_eq!(
            warning.dismiss(&mut doc, Dismissal::PROCEED),
            CloseOutcome::Fading {
                conceal_after: Duration::from_millis(2000)
            }
        );
        assert!(doc.has_class("#warningScreen", "fade-out"));
        warning.conceal(&mut doc);
        assert_eq!(doc.style("#warningScreen", "display"), Some("none"));
    }
}
