#![forbid(unsafe_code)]

//! The page controller: one object owning every piece of page state.
//!
//! [`Folio`] is built once on document-ready and then fed [`PageEvent`]s and
//! clock advances by the host. Each call runs synchronously to completion and
//! returns an [`Outcome`]: whether to suppress the browser default, plus the
//! host [`Effect`]s to carry out.
//!
//! # Time
//!
//! The host reports time as a monotonic offset from initialization. Every
//! call first fires the scheduled tasks that have come due, then handles the
//! event. Between events the host keeps one timer armed for
//! [`Folio::next_deadline`] and calls [`Folio::tick`] when it fires.
//!
//! # Invariants
//!
//! 1. After [`Folio::init`] exactly one section is active.
//! 2. Page scroll is locked iff the lightbox is open.
//! 3. The warning panel opens at most once per tab.
//! 4. Escape never closes anything but the lightbox.
//! 5. No handler panics or propagates an error; failures degrade to no-ops.

use std::time::Duration;

use rand::SeedableRng;
use rand::rngs::SmallRng;

use crate::ambient::Ambient;
use crate::clipboard::{ClipboardError, CopyFlow, CopyPath};
use crate::config::{ConfigError, FolioConfig};
use crate::decor::{self, FrameThrottle, NameCycle, Typewriter};
use crate::document::{Display, Document};
use crate::easter_egg::EasterEgg;
use crate::event::{Effect, Outcome, PageEvent};
use crate::guard::Guard;
use crate::input::{InputRouter, KeyAction, KeyInput};
use crate::overlay::{
    CloseOutcome, Dismissal, Exit, ImagePayload, ImageView, Overlay, OverlayKind, OverlaySpec,
};
use crate::registry::ViewRegistry;
use crate::scheduler::{Scheduler, TaskId};
use crate::session::{SessionFlag, SessionFlags, SessionStore};
use crate::switcher::SectionSwitcher;

/// Work deferred on the scheduler.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Deferred {
    ConcealWarning,
    EmailAutoClose,
    TypeNextChar,
    CycleName,
    RevealCard { selector: String, index: usize },
    RemoveRipple { id: u64 },
    RestoreCardTransitions,
}

/// Portfolio page controller.
pub struct Folio<D, S> {
    config: FolioConfig,
    doc: D,
    flags: SessionFlags<S>,
    registry: ViewRegistry,
    switcher: SectionSwitcher,
    router: InputRouter,
    warning: Overlay<()>,
    lightbox: Overlay<ImagePayload>,
    email: Overlay<()>,
    copy: CopyFlow,
    scheduler: Scheduler<Deferred>,
    guard: Guard,
    ambient: Ambient,
    easter_egg: EasterEgg,
    typewriter: Option<Typewriter>,
    names: NameCycle,
    reveals: Vec<TaskId>,
    frame: FrameThrottle,
    scroll_y: f64,
    next_ripple: u64,
    rng: SmallRng,
}

impl<D, S> std::fmt::Debug for Folio<D, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Folio")
            .field("active", &self.switcher.active())
            .field("warning", &self.warning)
            .field("lightbox", &self.lightbox)
            .field("email", &self.email)
            .field("pending_tasks", &self.scheduler.len())
            .finish()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Construction
// ─────────────────────────────────────────────────────────────────────────────

impl<D: Document, S: SessionStore> Folio<D, S> {
    /// Build the controller and apply the initial page state.
    ///
    /// `seed` drives the playlist and name shuffles.
    pub fn init(config: FolioConfig, doc: D, store: S, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;

        let registry = ViewRegistry::new(&config.sections, &config.selectors);
        let sel = &config.selectors;
        let classes = &config.classes;

        let warning = Overlay::new(
            OverlaySpec {
                kind: OverlayKind::Warning,
                container: sel.warning_screen.clone(),
                show_class: classes.show.clone(),
                dismissal: Dismissal::PROCEED,
                locks_scroll: false,
                exit: Exit::FadeOut {
                    class: classes.fade_out.clone(),
                    after: config.timings.warning_fade(),
                },
            },
            (),
        );
        let lightbox = Overlay::new(
            OverlaySpec {
                kind: OverlayKind::Lightbox,
                container: sel.image_modal.clone(),
                show_class: classes.show.clone(),
                dismissal: Dismissal::CLOSE_BUTTON | Dismissal::BACKDROP | Dismissal::ESCAPE,
                locks_scroll: true,
                exit: Exit::Hide,
            },
            ImageView {
                image: sel.modal_image.clone(),
                caption: sel.modal_caption.clone(),
            },
        );
        let email = Overlay::new(
            OverlaySpec {
                kind: OverlayKind::Email,
                container: sel.email_screen.clone(),
                show_class: classes.show.clone(),
                dismissal: Dismissal::AUTO,
                locks_scroll: false,
                exit: Exit::Hide,
            },
            (),
        );

        let flags = SessionFlags::new(store);
        let mut rng = SmallRng::seed_from_u64(seed);
        let names = NameCycle::shuffled(config.names.clone(), &mut rng);
        let easter_egg = EasterEgg::new(
            flags.is_set(SessionFlag::EasterEggPlayed),
            config.easter_egg_video.clone(),
        );

        let mut app = Self {
            switcher: SectionSwitcher::new(classes.active.clone()),
            router: InputRouter::new(config.keyboard_order.clone()),
            guard: Guard::new(config.guard.enabled),
            ambient: Ambient::new(config.audio.tracks.clone(), config.audio.volume),
            registry,
            warning,
            lightbox,
            email,
            copy: CopyFlow::new(),
            scheduler: Scheduler::new(),
            easter_egg,
            typewriter: None,
            names,
            reveals: Vec::new(),
            frame: FrameThrottle::default(),
            scroll_y: 0.0,
            next_ripple: 0,
            rng,
            flags,
            doc,
            config,
        };

        app.setup_warning();
        app.setup_sections();
        app.setup_easter_egg();
        app.setup_typewriter();
        app.setup_name_cycle();

        tracing::info!(
            sections = app.registry.len(),
            active = ?app.switcher.active(),
            "portfolio controller initialized"
        );
        Ok(app)
    }

    fn setup_warning(&mut self) {
        if self.flags.is_set(SessionFlag::WarningShown) {
            tracing::debug!("warning already shown this session");
            self.warning.conceal(&mut self.doc);
            self.ambient.mark_ready();
            return;
        }
        self.warning.open(&mut self.doc, None);
        self.flags.set(SessionFlag::WarningShown);
    }

    fn setup_sections(&mut self) {
        let initial = self.config.initial_section.clone();
        match self.switcher.switch_to(&self.registry, &mut self.doc, &initial) {
            Ok(()) => self.router.sync_to(&initial),
            Err(err) => tracing::warn!(%err, "initial section could not be activated"),
        }
    }

    fn setup_easter_egg(&mut self) {
        if self.flags.is_set(SessionFlag::EasterEggPlayed) {
            self.doc
                .set_display(&self.config.selectors.easter_egg_icon, Display::None);
        }
    }

    fn setup_typewriter(&mut self) {
        let title = &self.config.selectors.title_line;
        let Some(text) = self.doc.text(title) else {
            return;
        };
        self.doc.set_text(title, "");
        self.typewriter = Some(Typewriter::new(&text));
        self.scheduler
            .schedule(self.config.timings.typewriter_start(), Deferred::TypeNextChar);
    }

    fn setup_name_cycle(&mut self) {
        if self.names.is_empty() || !self.doc.exists(&self.config.selectors.name_display) {
            return;
        }
        // Cycling starts at `name_cycle_start`; the first swap is one interval later.
        let timings = &self.config.timings;
        let first = timings.name_cycle_start() + timings.name_cycle_interval();
        self.scheduler.schedule(first, Deferred::CycleName);
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Queries
// ─────────────────────────────────────────────────────────────────────────────

impl<D, S> Folio<D, S> {
    #[must_use]
    pub const fn config(&self) -> &FolioConfig {
        &self.config
    }

    #[must_use]
    pub const fn document(&self) -> &D {
        &self.doc
    }

    /// Active section id (the navigation state).
    #[must_use]
    pub fn active_section(&self) -> Option<&str> {
        self.switcher.active()
    }

    #[must_use]
    pub const fn is_open(&self, kind: OverlayKind) -> bool {
        match kind {
            OverlayKind::Warning => self.warning.is_open(),
            OverlayKind::Lightbox => self.lightbox.is_open(),
            OverlayKind::Email => self.email.is_open(),
        }
    }

    /// Whether any overlay currently intercepts navigation keys.
    #[must_use]
    pub const fn overlay_active(&self) -> bool {
        self.warning.is_open() || self.lightbox.is_open() || self.email.is_open()
    }

    #[must_use]
    pub fn lightbox_payload(&self) -> Option<&ImagePayload> {
        self.lightbox.payload()
    }

    #[must_use]
    pub const fn ambient(&self) -> &Ambient {
        &self.ambient
    }

    #[must_use]
    pub const fn easter_egg(&self) -> &EasterEgg {
        &self.easter_egg
    }

    /// Earliest scheduled deadline; the host arms its timer for it.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Duration> {
        self.scheduler.next_deadline()
    }

    /// Number of pending scheduled tasks.
    #[must_use]
    pub fn pending_tasks(&self) -> usize {
        self.scheduler.len()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Event handling
// ─────────────────────────────────────────────────────────────────────────────

impl<D: Document, S: SessionStore> Folio<D, S> {
    /// Fire every task due at `now`.
    pub fn tick(&mut self, now: Duration) -> Outcome {
        let mut out = Outcome::default();
        while let Some((id, task)) = self.scheduler.pop_due(now) {
            self.run_deferred(id, task, &mut out);
        }
        out
    }

    /// Handle one event at host time `now`.
    pub fn handle(&mut self, now: Duration, event: PageEvent) -> Outcome {
        let mut out = self.tick(now);
        tracing::trace!(?event, "page event");
        out.merge(self.dispatch(event));
        out
    }

    /// Make `id` the active section. Unknown ids are ignored.
    pub fn switch_section(&mut self, id: &str) -> bool {
        match self.switcher.switch_to(&self.registry, &mut self.doc, id) {
            Ok(()) => {
                self.router.sync_to(id);
                self.stagger_cards(id);
                true
            }
            Err(err) => {
                tracing::debug!(%err, "switch ignored");
                false
            }
        }
    }

    fn dispatch(&mut self, event: PageEvent) -> Outcome {
        let mut out = Outcome::default();
        match event {
            PageEvent::NavClick { section } => {
                self.switch_section(&section);
            }
            PageEvent::NavHover { section } => self.ripple(&section, &mut out),
            PageEvent::ProceedClick => self.proceed(),
            PageEvent::ImageClick { src, caption } => {
                self.lightbox
                    .open(&mut self.doc, Some(ImagePayload { src, caption }));
            }
            PageEvent::LightboxCloseClick => self.dismiss_lightbox(Dismissal::CLOSE_BUTTON),
            PageEvent::LightboxClick { on_backdrop } => {
                if on_backdrop {
                    self.dismiss_lightbox(Dismissal::BACKDROP);
                }
            }
            PageEvent::EmailLinkClick => {
                out.prevent_default = true;
                self.open_email();
            }
            PageEvent::EmailTextClick => {
                if self.email.is_open() {
                    out.push(self.copy.begin(&self.config.email_address));
                } else {
                    tracing::debug!("copy request while email panel closed");
                }
            }
            PageEvent::ClipboardWritten => {
                if let Some(path) = self.copy.succeeded() {
                    self.confirm_copy(path);
                }
            }
            PageEvent::ClipboardFailed(err) => self.copy_fallback(&err, &mut out),
            PageEvent::Key(key) => out.merge(self.key(&key)),
            PageEvent::UserGesture { target_is_link } => {
                if !target_is_link {
                    self.start_audio(&mut out);
                }
            }
            PageEvent::TrackEnded => {
                out.extend(self.ambient.advance());
                self.show_track_name();
            }
            PageEvent::TrackFailed { reason } => {
                tracing::warn!(%reason, track = ?self.ambient.current().map(|t| &t.src), "ambient track failed to load");
                out.extend(self.ambient.advance());
                self.show_track_name();
            }
            PageEvent::PlaybackRejected { reason } => {
                tracing::info!(%reason, "playback prevented, waiting for interaction");
            }
            PageEvent::EasterEggClick => self.play_easter_egg(&mut out),
            PageEvent::VideoEnded => self.finish_easter_egg(&mut out),
            PageEvent::VideoFailed => {
                tracing::warn!(src = %self.easter_egg.video_src(), "easter-egg video failed to load");
                self.finish_easter_egg(&mut out);
            }
            PageEvent::Scroll { scroll_y } => {
                self.scroll_y = scroll_y;
                if self.frame.request() {
                    out.push(Effect::RequestAnimationFrame);
                }
            }
            PageEvent::AnimationFrame => self.apply_scroll_effects(),
            PageEvent::Resize => {
                let cards = self.config.selectors.skill_card.clone();
                self.doc.set_style_all(&cards, "transition", "none");
                self.scheduler.schedule(
                    self.config.timings.resize_settle(),
                    Deferred::RestoreCardTransitions,
                );
            }
            PageEvent::ContextMenu => out.prevent_default = self.guard.blocks_context_menu(),
            PageEvent::DragStart => out.prevent_default = self.guard.blocks_drag(),
            PageEvent::SelectStart { target_tag } => {
                out.prevent_default = self.guard.blocks_selection(&target_tag);
            }
        }
        out
    }

    fn key(&mut self, key: &KeyInput) -> Outcome {
        if self.guard.blocks_key(key) {
            return Outcome::prevented();
        }
        let routed = self.router.route(key, self.overlay_active());
        let out = Outcome {
            prevent_default: routed.prevent_default,
            effects: Vec::new(),
        };
        match routed.action {
            KeyAction::Switch(id) => {
                self.switch_section(&id);
            }
            KeyAction::CloseLightbox => self.dismiss_lightbox(Dismissal::ESCAPE),
            KeyAction::Ignore => {}
        }
        out
    }

    // ── overlays ────────────────────────────────────────────────────────────

    fn proceed(&mut self) {
        let outcome = self.warning.dismiss(&mut self.doc, Dismissal::PROCEED);
        if !outcome.closed() {
            return;
        }
        self.ambient.mark_ready();
        if let CloseOutcome::Fading { conceal_after } = outcome {
            let id = self.scheduler.schedule(conceal_after, Deferred::ConcealWarning);
            if let Some(stale) = self.warning.replace_pending(id) {
                self.scheduler.cancel(stale);
            }
        }
    }

    fn dismiss_lightbox(&mut self, action: Dismissal) {
        if !self.lightbox.dismiss(&mut self.doc, action).closed() {
            tracing::trace!(?action, "lightbox dismissal ignored");
        }
    }

    fn open_email(&mut self) {
        if let Some(stale) = self.email.take_pending() {
            self.scheduler.cancel(stale);
            self.doc
                .set_display(&self.config.selectors.copied_text, Display::None);
        }
        self.email.open(&mut self.doc, None);
    }

    fn copy_fallback(&mut self, err: &ClipboardError, out: &mut Outcome) {
        if let Some((path, effect)) = self.copy.failed(err) {
            out.push(effect);
            self.confirm_copy(path);
        }
    }

    fn confirm_copy(&mut self, path: CopyPath) {
        tracing::debug!(?path, "email copied");
        self.doc
            .set_display(&self.config.selectors.copied_text, Display::Block);
        let id = self
            .scheduler
            .schedule(self.config.timings.copy_confirmation(), Deferred::EmailAutoClose);
        if let Some(stale) = self.email.replace_pending(id) {
            self.scheduler.cancel(stale);
        }
    }

    // ── audio and easter egg ────────────────────────────────────────────────

    fn start_audio(&mut self, out: &mut Outcome) {
        let Some(effects) = self.ambient.start(&mut self.rng) else {
            return;
        };
        self.doc
            .add_class(&self.config.selectors.music_tracker, &self.config.classes.show);
        out.extend(effects);
        self.show_track_name();
    }

    fn show_track_name(&mut self) {
        if let Some(track) = self.ambient.current() {
            self.doc
                .set_text(&self.config.selectors.current_track, &track.name);
        }
    }

    fn play_easter_egg(&mut self, out: &mut Outcome) {
        if !self.easter_egg.trigger() {
            return;
        }
        out.extend(self.ambient.mute());
        out.push(Effect::PlayVideo {
            src: self.easter_egg.video_src().to_string(),
        });
        self.doc
            .set_display(&self.config.selectors.easter_egg_icon, Display::None);
        self.flags.set(SessionFlag::EasterEggPlayed);
    }

    fn finish_easter_egg(&mut self, out: &mut Outcome) {
        if self.easter_egg.finish() {
            out.push(Effect::RemoveVideo);
            out.extend(self.ambient.unmute());
        }
    }

    // ── decoration ──────────────────────────────────────────────────────────

    fn stagger_cards(&mut self, section: &str) {
        for stale in self.reveals.drain(..) {
            self.scheduler.cancel(stale);
        }
        let Some(content) = self.registry.get(section).map(|s| s.content.clone()) else {
            return;
        };
        let selector = format!("{content} {}", self.config.selectors.skill_card);
        let step = self.config.timings.card_stagger();
        for index in 0..self.doc.count(&selector) {
            self.doc.set_style(&selector, index, "opacity", "0");
            self.doc
                .set_style(&selector, index, "transform", "translateY(30px)");
            let delay = step.saturating_mul(u32::try_from(index).unwrap_or(u32::MAX));
            let id = self.scheduler.schedule(
                delay,
                Deferred::RevealCard {
                    selector: selector.clone(),
                    index,
                },
            );
            self.reveals.push(id);
        }
    }

    fn ripple(&mut self, section: &str, out: &mut Outcome) {
        let Some(trigger) = self.registry.get(section).map(|s| s.trigger.clone()) else {
            return;
        };
        let id = self.next_ripple;
        self.next_ripple += 1;
        out.push(Effect::AddRipple { target: trigger, id });
        self.scheduler
            .schedule(self.config.timings.ripple(), Deferred::RemoveRipple { id });
    }

    fn apply_scroll_effects(&mut self) {
        self.frame.frame_done();
        let sel = &self.config.selectors;
        self.doc.set_style(
            &sel.video_background,
            0,
            "transform",
            &decor::parallax_transform(self.scroll_y),
        );
        self.doc
            .set_style(&sel.logo, 0, "transform", &decor::logo_transform(self.scroll_y));
    }

    // ── deferred work ───────────────────────────────────────────────────────

    fn run_deferred(&mut self, id: TaskId, task: Deferred, out: &mut Outcome) {
        tracing::trace!(id = id.get(), ?task, "deferred task due");
        match task {
            Deferred::ConcealWarning => {
                self.warning.clear_pending_if(id);
                if !self.warning.is_open() {
                    self.warning.conceal(&mut self.doc);
                }
            }
            Deferred::EmailAutoClose => {
                self.email.clear_pending_if(id);
                self.doc
                    .set_display(&self.config.selectors.copied_text, Display::None);
                self.email.dismiss(&mut self.doc, Dismissal::AUTO);
            }
            Deferred::TypeNextChar => {
                let Some(tw) = self.typewriter.as_mut() else {
                    return;
                };
                if let Some(text) = tw.step() {
                    self.doc.set_text(&self.config.selectors.title_line, &text);
                }
                if tw.is_done() {
                    self.typewriter = None;
                } else {
                    self.scheduler
                        .schedule(self.config.timings.typewriter_char(), Deferred::TypeNextChar);
                }
            }
            Deferred::CycleName => {
                if let Some(name) = self.names.next_name() {
                    self.doc.set_text(&self.config.selectors.name_display, name);
                    self.scheduler.schedule(
                        self.config.timings.name_cycle_interval(),
                        Deferred::CycleName,
                    );
                }
            }
            Deferred::RevealCard { selector, index } => {
                self.reveals.retain(|&r| r != id);
                self.doc
                    .set_style(&selector, index, "transition", "all 0.6s ease");
                self.doc.set_style(&selector, index, "opacity", "1");
                self.doc
                    .set_style(&selector, index, "transform", "translateY(0)");
            }
            Deferred::RemoveRipple { id: ripple } => out.push(Effect::RemoveRipple { id: ripple }),
            Deferred::RestoreCardTransitions => {
                let cards = self.config.selectors.skill_card.clone();
                self.doc
                    .set_style_all(&cards, "transition", "all 0.3s ease");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::MemoryDocument;
    use crate::session::MemorySessionStore;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn page(config: &FolioConfig) -> MemoryDocument {
        let sel = &config.selectors;
        let mut doc = MemoryDocument::new();
        for id in &config.sections {
            doc = doc
                .with_element(&sel.section_trigger(id))
                .with_element(&sel.section_content(id));
        }
        doc.with_element(&sel.warning_screen)
            .with_element(&sel.image_modal)
            .with_element(&sel.modal_image)
            .with_element(&sel.modal_caption)
            .with_element(&sel.email_screen)
            .with_element(&sel.copied_text)
            .with_element(&sel.music_tracker)
            .with_element(&sel.current_track)
            .with_element(&sel.easter_egg_icon)
            .with_element(&sel.name_display)
            .with_element(&sel.video_background)
            .with_element(&sel.logo)
            .with_text(&sel.title_line, "Hi")
    }

    fn app() -> Folio<MemoryDocument, MemorySessionStore> {
        let config = FolioConfig::default();
        let doc = page(&config);
        Folio::init(config, doc, MemorySessionStore::new(), 9).unwrap()
    }

    #[test]
    fn init_activates_initial_section() {
        let app = app();
        assert_eq!(app.active_section(), Some("about"));
        assert!(app.document().has_class("#about", "active"));
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = FolioConfig {
            initial_section: "nowhere".into(),
            ..FolioConfig::default()
        };
        let err = Folio::init(config, MemoryDocument::new(), MemorySessionStore::new(), 0)
            .unwrap_err();
        assert_eq!(err, ConfigError::UnknownSection("nowhere".into()));
    }

    #[test]
    fn proceed_fades_then_conceals_warning() {
        let mut app = app();
        assert!(app.is_open(OverlayKind::Warning));
        app.handle(ms(100), PageEvent::ProceedClick);
        assert!(!app.is_open(OverlayKind::Warning));
        assert!(app.document().has_class("#warningScreen", "fade-out"));
        assert_eq!(app.document().style("#warningScreen", "display"), None);
        app.tick(ms(2100));
        assert_eq!(app.document().style("#warningScreen", "display"), Some("none"));
    }

    #[test]
    fn navigation_keys_blocked_while_warning_open() {
        let mut app = app();
        let out = app.handle(ms(0), PageEvent::Key(KeyInput::from_dom("2", Default::default())));
        assert!(!out.prevent_default);
        assert_eq!(app.active_section(), Some("about"));
    }

    #[test]
    fn typewriter_retypes_title() {
        let mut app = app();
        assert_eq!(app.document().text(".title-line").as_deref(), Some(""));
        app.tick(ms(500));
        assert_eq!(app.document().text(".title-line").as_deref(), Some("H"));
        app.tick(ms(600));
        assert_eq!(app.document().text(".title-line").as_deref(), Some("Hi"));
    }

    #[test]
    fn name_cycle_starts_after_delay() {
        let mut app = app();
        app.tick(ms(2000));
        assert_eq!(app.document().text("#nameDisplay").as_deref(), Some(""));
        app.tick(ms(2999));
        assert_eq!(app.document().text("#nameDisplay").as_deref(), Some(""));
        app.tick(ms(3000));
        assert_eq!(app.document().text("#nameDisplay").as_deref(), Some("Portfolio"));
    }

    #[test]
    fn ripple_is_removed_after_delay() {
        let mut app = app();
        let out = app.handle(ms(0), PageEvent::NavHover { section: "design".into() });
        assert_eq!(
            out.effects,
            vec![Effect::AddRipple {
                target: "[data-section=\"design\"]".into(),
                id: 0
            }]
        );
        let out = app.tick(ms(600));
        assert!(out.effects.contains(&Effect::RemoveRipple { id: 0 }));
    }

    #[test]
    fn scroll_requests_one_frame_and_applies_parallax() {
        let mut app = app();
        let first = app.handle(ms(0), PageEvent::Scroll { scroll_y: 40.0 });
        let second = app.handle(ms(1), PageEvent::Scroll { scroll_y: 80.0 });
        assert_eq!(first.effects, vec![Effect::RequestAnimationFrame]);
        assert!(second.effects.is_empty());
        app.handle(ms(16), PageEvent::AnimationFrame);
        assert_eq!(
            app.document().style(".video-background", "transform"),
            Some("translateY(40px)")
        );
        assert_eq!(app.document().style(".logo", "transform"), Some("rotate(8deg)"));
    }

    #[test]
    fn guard_events_prevent_default() {
        let mut app = app();
        assert!(app.handle(ms(0), PageEvent::ContextMenu).prevent_default);
        assert!(app.handle(ms(0), PageEvent::DragStart).prevent_default);
        assert!(
            app.handle(ms(0), PageEvent::SelectStart { target_tag: "IMG".into() })
                .prevent_default
        );
        assert!(
            !app.handle(ms(0), PageEvent::SelectStart { target_tag: "P".into() })
                .prevent_default
        );
    }

    #[test]
    fn blocked_chord_is_swallowed_before_routing() {
        let mut app = app();
        let before = app.active_section().map(String::from);
        let out = app.handle(ms(0), PageEvent::Key(KeyInput::from_dom("F12", Default::default())));
        assert_eq!(out, Outcome::prevented());
        assert_eq!(app.active_section().map(String::from), before);
    }
}
