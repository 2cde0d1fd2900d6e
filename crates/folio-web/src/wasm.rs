#![forbid(unsafe_code)]

//! Browser entry point: boots the controller and binds it to the page.
//!
//! # Event flow
//!
//! DOM listener → [`PageEvent`] → `Folio::handle` → effects executed here →
//! browser timer re-armed for the next scheduled deadline. Results of async
//! browser work (clipboard promises, `play()` rejections, media events) come
//! back as new page events on a later microtask, never re-entrantly.
//!
//! # Invariants
//!
//! 1. The controller is borrowed only inside [`Host::dispatch`],
//!    [`Host::tick`] and [`Host::rearm`]; effects run after the borrow ends.
//! 2. At most one scheduler timeout is pending at a time.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};
use std::time::Duration;

use folio_core::{ClipboardError, Effect, Folio, FolioConfig, KeyInput, Modifiers, PageEvent};
use tracing::Level;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::{JsFuture, spawn_local};
use web_sys::{
    Element, Event, EventTarget, HtmlAudioElement, HtmlDocument, HtmlElement, HtmlImageElement,
    HtmlTextAreaElement, HtmlVideoElement, IntersectionObserver, IntersectionObserverEntry,
    IntersectionObserverInit, KeyboardEvent, Window,
};

use crate::boot;
use crate::console;
use crate::decoration;
use crate::dom::WebDocument;
use crate::storage::WebSessionStore;

type App = Folio<WebDocument, WebSessionStore>;

thread_local! {
    static HOST: RefCell<Option<Rc<Host>>> = const { RefCell::new(None) };
}

/// Module start: install logging, then boot once the DOM is parsed.
#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console::install(Level::INFO);

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;

    if document.ready_state() != "loading" {
        return launch(window);
    }
    let ready = Closure::once(move || {
        if let Err(err) = launch(window) {
            tracing::error!(?err, "folio failed to start");
        }
    });
    document.add_event_listener_with_callback("DOMContentLoaded", ready.as_ref().unchecked_ref())?;
    ready.forget();
    Ok(())
}

fn launch(window: Window) -> Result<(), JsValue> {
    let host = Host::boot(window)?;
    HOST.with(|slot| *slot.borrow_mut() = Some(host));
    Ok(())
}

/// JS handle to the running page controller.
#[wasm_bindgen]
pub struct FolioWeb {
    host: Rc<Host>,
}

#[wasm_bindgen]
impl FolioWeb {
    /// The controller booted by the module start, if it has booted.
    pub fn current() -> Option<FolioWeb> {
        HOST.with(|slot| slot.borrow().clone()).map(|host| FolioWeb { host })
    }

    #[wasm_bindgen(js_name = activeSection)]
    pub fn active_section(&self) -> Option<String> {
        let app = self.host.app.try_borrow().ok()?;
        app.active_section().map(String::from)
    }

    /// Activate a section as if its nav button were clicked.
    #[wasm_bindgen(js_name = showSection)]
    pub fn show_section(&self, id: &str) -> bool {
        let now = self.host.now();
        let (switched, outcome) = match self.host.app.try_borrow_mut() {
            Ok(mut app) => {
                let outcome = app.tick(now);
                (app.switch_section(id), outcome)
            }
            Err(_) => return false,
        };
        self.host.apply(outcome.effects);
        self.host.rearm();
        switched
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Host
// ─────────────────────────────────────────────────────────────────────────────

struct Host {
    app: RefCell<App>,
    config: FolioConfig,
    window: Window,
    document: web_sys::Document,
    origin_ms: f64,
    audio: HtmlAudioElement,
    video: RefCell<Option<HtmlVideoElement>>,
    timer: Cell<Option<i32>>,
    on_timer: RefCell<Option<Closure<dyn FnMut()>>>,
    on_frame: RefCell<Option<Closure<dyn FnMut(f64)>>>,
}

impl Host {
    fn boot(window: Window) -> Result<Rc<Self>, JsValue> {
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;

        let raw = document
            .get_element_by_id(boot::CONFIG_ELEMENT_ID)
            .and_then(|el| el.text_content());
        let config = boot::resolve_config(raw.as_deref());
        let store = WebSessionStore::new(&window);
        let seed = boot::seed_from(js_sys::Math::random(), js_sys::Math::random());
        let origin_ms = now_ms(&window);

        let app = Folio::init(
            config.clone(),
            WebDocument::new(document.clone()),
            store,
            seed,
        )
        .map_err(|err| JsValue::from_str(&err.to_string()))?;

        let host = Rc::new(Self {
            app: RefCell::new(app),
            config,
            audio: HtmlAudioElement::new()?,
            video: RefCell::new(None),
            timer: Cell::new(None),
            on_timer: RefCell::new(None),
            on_frame: RefCell::new(None),
            origin_ms,
            document,
            window,
        });

        host.install_callbacks();
        host.wire();
        host.decorate();
        host.rearm();
        Ok(host)
    }

    fn now(&self) -> Duration {
        boot::elapsed(self.origin_ms, now_ms(&self.window))
    }

    /// Feed one event to the controller. Returns whether the DOM default
    /// action must be suppressed.
    fn dispatch(self: &Rc<Self>, event: PageEvent) -> bool {
        let now = self.now();
        let outcome = match self.app.try_borrow_mut() {
            Ok(mut app) => app.handle(now, event),
            Err(_) => {
                tracing::warn!(?event, "re-entrant page event dropped");
                return false;
            }
        };
        self.apply(outcome.effects);
        self.rearm();
        outcome.prevent_default
    }

    fn tick(self: &Rc<Self>) {
        self.timer.set(None);
        let now = self.now();
        let outcome = match self.app.try_borrow_mut() {
            Ok(mut app) => app.tick(now),
            Err(_) => return,
        };
        self.apply(outcome.effects);
        self.rearm();
    }

    /// Dispatch `event` on a later microtask.
    fn defer(self: &Rc<Self>, event: PageEvent) {
        let host = Rc::downgrade(self);
        spawn_local(async move {
            if let Some(host) = host.upgrade() {
                host.dispatch(event);
            }
        });
    }

    fn rearm(&self) {
        if let Some(handle) = self.timer.take() {
            self.window.clear_timeout_with_handle(handle);
        }
        let Some(deadline) = self
            .app
            .try_borrow()
            .ok()
            .and_then(|app| app.next_deadline())
        else {
            return;
        };
        let delay = boot::timeout_ms(deadline, self.now());
        let on_timer = self.on_timer.borrow();
        let Some(cb) = on_timer.as_ref() else {
            return;
        };
        match self.window.set_timeout_with_callback_and_timeout_and_arguments_0(
            cb.as_ref().unchecked_ref(),
            delay,
        ) {
            Ok(handle) => self.timer.set(Some(handle)),
            Err(err) => tracing::warn!(?err, "scheduler timer not armed"),
        }
    }

    fn install_callbacks(self: &Rc<Self>) {
        let host = Rc::downgrade(self);
        let on_timer = Closure::wrap(Box::new(move || {
            if let Some(host) = host.upgrade() {
                host.tick();
            }
        }) as Box<dyn FnMut()>);
        *self.on_timer.borrow_mut() = Some(on_timer);

        let host = Rc::downgrade(self);
        let on_frame = Closure::wrap(Box::new(move |_ts: f64| {
            if let Some(host) = host.upgrade() {
                host.dispatch(PageEvent::AnimationFrame);
            }
        }) as Box<dyn FnMut(f64)>);
        *self.on_frame.borrow_mut() = Some(on_frame);
    }

    // ── effects ─────────────────────────────────────────────────────────────

    fn apply(self: &Rc<Self>, effects: Vec<Effect>) {
        for effect in effects {
            tracing::trace!(?effect, "applying effect");
            match effect {
                Effect::WriteClipboard(text) => self.write_clipboard(&text),
                Effect::LegacyCopy(text) => self.legacy_copy(&text),
                Effect::LoadTrack { src, volume } => {
                    self.audio.set_src(&src);
                    self.audio.set_volume(volume);
                }
                Effect::PlayTrack => self.await_playback(self.audio.play(), |reason| {
                    PageEvent::PlaybackRejected { reason }
                }),
                Effect::PauseTrack => {
                    let _ = self.audio.pause();
                }
                Effect::PlayVideo { src } => self.play_video(&src),
                Effect::RemoveVideo => {
                    if let Some(video) = self.video.borrow_mut().take() {
                        video.remove();
                    }
                }
                Effect::AddRipple { target, id } => self.add_ripple(&target, id),
                Effect::RemoveRipple { id } => {
                    if let Ok(Some(ripple)) = self
                        .document
                        .query_selector(&decoration::ripple_selector(id))
                    {
                        ripple.remove();
                    }
                }
                Effect::RequestAnimationFrame => self.request_frame(),
            }
        }
    }

    fn write_clipboard(self: &Rc<Self>, text: &str) {
        let navigator = self.window.navigator();
        let available = js_sys::Reflect::get(&navigator, &JsValue::from_str("clipboard"))
            .is_ok_and(|api| !api.is_undefined() && !api.is_null());
        if !available {
            self.defer(PageEvent::ClipboardFailed(ClipboardError::Unavailable));
            return;
        }

        let pending = JsFuture::from(navigator.clipboard().write_text(text));
        let host = Rc::downgrade(self);
        spawn_local(async move {
            let event = match pending.await {
                Ok(_) => PageEvent::ClipboardWritten,
                Err(err) => {
                    PageEvent::ClipboardFailed(ClipboardError::Rejected(format!("{err:?}")))
                }
            };
            if let Some(host) = host.upgrade() {
                host.dispatch(event);
            }
        });
    }

    fn legacy_copy(&self, text: &str) {
        let Some(body) = self.document.body() else {
            return;
        };
        let Some(area) = create::<HtmlTextAreaElement>(&self.document, "textarea") else {
            return;
        };
        area.set_value(text);
        apply_style(&area, decoration::LEGACY_COPY_STYLE);
        if body.append_child(&area).is_err() {
            return;
        }
        area.select();
        let copied = self
            .document
            .dyn_ref::<HtmlDocument>()
            .map(|doc| doc.exec_command("copy"));
        if !matches!(copied, Some(Ok(true))) {
            tracing::warn!(?copied, "legacy copy not confirmed by the browser");
        }
        area.remove();
    }

    fn await_playback(
        self: &Rc<Self>,
        started: Result<js_sys::Promise, JsValue>,
        rejected: fn(String) -> PageEvent,
    ) {
        let promise = match started {
            Ok(promise) => promise,
            Err(err) => {
                self.defer(rejected(format!("{err:?}")));
                return;
            }
        };
        let host = Rc::downgrade(self);
        spawn_local(async move {
            if let Err(err) = JsFuture::from(promise).await {
                if let Some(host) = host.upgrade() {
                    host.dispatch(rejected(format!("{err:?}")));
                }
            }
        });
    }

    fn play_video(self: &Rc<Self>, src: &str) {
        let Some(video) = create::<HtmlVideoElement>(&self.document, "video") else {
            self.defer(PageEvent::VideoFailed);
            return;
        };
        video.set_src(src);
        video.set_volume(1.0);
        video.set_muted(false);
        video.set_autoplay(true);
        apply_style(&video, decoration::VIDEO_STYLE);
        self.on::<Event, _>(&video, "ended", |_| Some(PageEvent::VideoEnded));
        self.on::<Event, _>(&video, "error", |_| Some(PageEvent::VideoFailed));

        if let Some(body) = self.document.body() {
            let _ = body.append_child(&video);
        }
        let started = video.play();
        *self.video.borrow_mut() = Some(video);
        self.await_playback(started, |_| PageEvent::VideoFailed);
    }

    fn add_ripple(&self, target: &str, id: u64) {
        let Ok(Some(anchor)) = self.document.query_selector(target) else {
            return;
        };
        let Some(ripple) = create::<HtmlElement>(&self.document, "div") else {
            return;
        };
        apply_style(&ripple, decoration::RIPPLE_STYLE);
        let _ = ripple.set_attribute(decoration::RIPPLE_ID_ATTRIBUTE, &id.to_string());
        if let Some(anchor) = anchor.dyn_ref::<HtmlElement>() {
            let _ = anchor.style().set_property("position", "relative");
        }
        let _ = anchor.append_child(&ripple);
    }

    fn request_frame(self: &Rc<Self>) {
        let requested = self
            .on_frame
            .borrow()
            .as_ref()
            .map(|cb| self.window.request_animation_frame(cb.as_ref().unchecked_ref()));
        if !matches!(requested, Some(Ok(_))) {
            tracing::debug!("animation frame unavailable, applying scroll effects now");
            self.defer(PageEvent::AnimationFrame);
        }
    }

    // ── listeners ───────────────────────────────────────────────────────────

    /// Attach a listener translating a DOM event into a page event.
    fn on<E, F>(self: &Rc<Self>, target: &EventTarget, kind: &str, translate: F)
    where
        E: JsCast + 'static,
        F: Fn(&E) -> Option<PageEvent> + 'static,
    {
        let host: Weak<Self> = Rc::downgrade(self);
        listen(target, kind, move |event: Event| {
            let Some(typed) = event.dyn_ref::<E>() else {
                return;
            };
            let Some(page_event) = translate(typed) else {
                return;
            };
            let Some(host) = host.upgrade() else {
                return;
            };
            if host.dispatch(page_event) {
                event.prevent_default();
            }
        });
    }

    /// Attach the same click translation to every element matching `selector`.
    fn on_click_all(self: &Rc<Self>, selector: &str, make: fn() -> PageEvent) {
        for el in self.all(selector) {
            self.on::<Event, _>(&el, "click", move |_| Some(make()));
        }
    }

    fn all(&self, selector: &str) -> Vec<Element> {
        let Ok(list) = self.document.query_selector_all(selector) else {
            tracing::debug!(selector, "selector rejected by the browser");
            return Vec::new();
        };
        (0..list.length())
            .filter_map(|i| list.item(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .collect()
    }

    fn wire(self: &Rc<Self>) {
        let sel = &self.config.selectors;

        let attribute = sel.section_attribute.clone();
        for el in self.all(&format!("[{attribute}]")) {
            let Some(section) = el.get_attribute(&attribute) else {
                continue;
            };
            let hovered = section.clone();
            self.on::<Event, _>(&el, "click", move |_| {
                Some(PageEvent::NavClick {
                    section: section.clone(),
                })
            });
            self.on::<Event, _>(&el, "mouseenter", move |_| {
                Some(PageEvent::NavHover {
                    section: hovered.clone(),
                })
            });
        }

        self.on_click_all(&sel.proceed_button, || PageEvent::ProceedClick);
        self.on_click_all(&sel.modal_close, || PageEvent::LightboxCloseClick);
        self.on_click_all(&sel.email_link, || PageEvent::EmailLinkClick);
        self.on_click_all(&sel.email_text, || PageEvent::EmailTextClick);
        self.on_click_all(&sel.easter_egg_icon, || PageEvent::EasterEggClick);

        for selector in &sel.lightbox_images {
            for el in self.all(selector) {
                self.on::<Event, _>(&el, "click", |e| {
                    let img = e.current_target()?.dyn_into::<HtmlImageElement>().ok()?;
                    Some(PageEvent::ImageClick {
                        src: img.src(),
                        caption: img.alt(),
                    })
                });
            }
        }
        for el in self.all(&sel.image_modal) {
            self.on::<Event, _>(&el, "click", |e| {
                let on_backdrop = match (e.target(), e.current_target()) {
                    (Some(target), Some(current)) => {
                        JsValue::from(target) == JsValue::from(current)
                    }
                    _ => false,
                };
                Some(PageEvent::LightboxClick { on_backdrop })
            });
        }

        let doc: &EventTarget = &self.document;
        self.on::<KeyboardEvent, _>(doc, "keydown", |e| Some(PageEvent::Key(key_input(e))));
        self.on::<Event, _>(doc, "keydown", |_| {
            Some(PageEvent::UserGesture {
                target_is_link: false,
            })
        });
        self.on::<Event, _>(doc, "click", |e| {
            Some(PageEvent::UserGesture {
                target_is_link: target_tag(e).eq_ignore_ascii_case("a"),
            })
        });
        self.on::<Event, _>(doc, "contextmenu", |_| Some(PageEvent::ContextMenu));
        self.on::<Event, _>(doc, "dragstart", |_| Some(PageEvent::DragStart));
        self.on::<Event, _>(doc, "selectstart", |e| {
            Some(PageEvent::SelectStart {
                target_tag: target_tag(e),
            })
        });

        let window = self.window.clone();
        self.on::<Event, _>(&self.window, "scroll", move |_| {
            Some(PageEvent::Scroll {
                scroll_y: window.scroll_y().unwrap_or(0.0),
            })
        });
        self.on::<Event, _>(&self.window, "resize", |_| Some(PageEvent::Resize));

        self.on::<Event, _>(&self.audio, "ended", |_| Some(PageEvent::TrackEnded));
        let audio = self.audio.clone();
        self.on::<Event, _>(&self.audio, "error", move |_| {
            Some(PageEvent::TrackFailed {
                reason: format!("could not load {}", audio.src()),
            })
        });
    }

    // ── decoration ──────────────────────────────────────────────────────────

    fn decorate(&self) {
        self.inject_style(decoration::PAGE_STYLES);

        let document = self.document.clone();
        let loaded = self.config.classes.loaded.clone();
        let mark_loaded = move || {
            if let Some(head) = document.head() {
                if let Some(style) = create::<HtmlElement>(&document, "style") {
                    style.set_text_content(Some(decoration::LOADED_STYLES));
                    let _ = head.append_child(&style);
                }
            }
            if let Some(body) = document.body() {
                let _ = body.class_list().add_1(&loaded);
            }
        };
        if self.document.ready_state() == "complete" {
            mark_loaded();
        } else {
            listen(&self.window, "load", move |_| mark_loaded());
        }

        self.observe_reveals();

        let keyboard_sections = self.config.keyboard_order.len();
        for line in decoration::banner(keyboard_sections) {
            tracing::info!("{line}");
        }
    }

    fn inject_style(&self, css: &str) {
        let Some(head) = self.document.head() else {
            return;
        };
        let Some(style) = create::<HtmlElement>(&self.document, "style") else {
            return;
        };
        style.set_text_content(Some(css));
        if let Err(err) = head.append_child(&style) {
            tracing::debug!(?err, "style injection failed");
        }
    }

    fn observe_reveals(&self) {
        let class = self.config.classes.animate_in.clone();
        let reveal = move |entries: js_sys::Array, _: IntersectionObserver| {
            for entry in entries.iter() {
                let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                    continue;
                };
                if entry.is_intersecting() {
                    let _ = entry.target().class_list().add_1(&class);
                }
            }
        };
        let on_entries =
            Closure::wrap(Box::new(reveal) as Box<dyn FnMut(js_sys::Array, IntersectionObserver)>);

        let options = IntersectionObserverInit::new();
        options.set_threshold(&JsValue::from_f64(decoration::REVEAL_THRESHOLD));
        options.set_root_margin(decoration::REVEAL_ROOT_MARGIN);

        let observer =
            IntersectionObserver::new_with_options(on_entries.as_ref().unchecked_ref(), &options);
        match observer {
            Ok(observer) => {
                let selector = decoration::reveal_selector(&self.config.selectors.reveal_on_scroll);
                for el in self.all(&selector) {
                    observer.observe(&el);
                }
            }
            Err(err) => tracing::debug!(?err, "IntersectionObserver unavailable, reveals skipped"),
        }
        on_entries.forget();
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Helpers
// ─────────────────────────────────────────────────────────────────────────────

fn listen(target: &EventTarget, kind: &str, handler: impl FnMut(Event) + 'static) {
    let cb = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
    if let Err(err) = target.add_event_listener_with_callback(kind, cb.as_ref().unchecked_ref()) {
        tracing::warn!(kind, ?err, "listener not attached");
    }
    cb.forget();
}

fn create<T: JsCast>(document: &web_sys::Document, tag: &str) -> Option<T> {
    document.create_element(tag).ok()?.dyn_into::<T>().ok()
}

fn apply_style(el: &HtmlElement, styles: &[(&str, &str)]) {
    let style = el.style();
    for (property, value) in styles {
        let _ = style.set_property(property, value);
    }
}

fn now_ms(window: &Window) -> f64 {
    window
        .performance()
        .map_or_else(js_sys::Date::now, |perf| perf.now())
}

fn key_input(e: &KeyboardEvent) -> KeyInput {
    let mut mods = Modifiers::empty();
    mods.set(Modifiers::SHIFT, e.shift_key());
    mods.set(Modifiers::ALT, e.alt_key());
    mods.set(Modifiers::CTRL, e.ctrl_key());
    mods.set(Modifiers::SUPER, e.meta_key());
    KeyInput::from_dom(&e.key(), mods)
}

fn target_tag(e: &Event) -> String {
    e.target()
        .and_then(|t| t.dyn_into::<Element>().ok())
        .map(|el| el.tag_name())
        .unwrap_or_default()
}
