//! Tab-lifetime behaviour: the first-visit warning, ambient audio unlocking,
//! the one-shot easter egg and the inspection guard.
//!
//! Two controllers initialized over the same store model two page loads in
//! one tab.

use std::time::Duration;

use folio_core::easter_egg::EggState;
use folio_core::{
    Document, Effect, Folio, FolioConfig, KeyInput, MemoryDocument, MemorySessionStore,
    Modifiers, OverlayKind, PageEvent, SessionStore,
};
use pretty_assertions::assert_eq;

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

fn page(config: &FolioConfig) -> MemoryDocument {
    let sel = &config.selectors;
    let mut doc = MemoryDocument::new()
        .with_element(&sel.warning_screen)
        .with_element(&sel.music_tracker)
        .with_element(&sel.current_track)
        .with_element(&sel.easter_egg_icon);
    for id in &config.sections {
        doc = doc
            .with_element(&sel.section_trigger(id))
            .with_element(&sel.section_content(id));
    }
    doc
}

fn load<S: SessionStore>(store: S) -> Folio<MemoryDocument, S> {
    let config = FolioConfig::default();
    let doc = page(&config);
    Folio::init(config, doc, store, 11).unwrap()
}

fn gesture() -> PageEvent {
    PageEvent::UserGesture {
        target_is_link: false,
    }
}

// ── Warning gating ────────────────────────────────────────────────────

#[test]
fn warning_shows_once_per_tab() {
    let mut store = MemorySessionStore::new();

    let first = load(&mut store);
    assert!(first.is_open(OverlayKind::Warning));
    assert!(first.document().has_class("#warningScreen", "show"));
    drop(first);
    assert_eq!(store.get("warningShown").unwrap().as_deref(), Some("true"));

    let second = load(&mut store);
    assert!(!second.is_open(OverlayKind::Warning));
    assert!(!second.document().has_class("#warningScreen", "show"));
    assert_eq!(
        second.document().style("#warningScreen", "display"),
        Some("none")
    );
}

#[test]
fn flag_is_set_even_without_proceeding() {
    let mut store = MemorySessionStore::new();
    let first = load(&mut store);
    assert!(first.is_open(OverlayKind::Warning));
    drop(first);

    let second = load(&mut store);
    assert!(second.ambient().is_ready());
}

#[test]
fn fresh_tab_sees_warning_again() {
    let mut store = MemorySessionStore::new();
    drop(load(&mut store));
    let other_tab = load(MemorySessionStore::new());
    assert!(other_tab.is_open(OverlayKind::Warning));
}

// ── Ambient audio ─────────────────────────────────────────────────────

#[test]
fn audio_waits_for_warning_acknowledgement() {
    let mut app = load(MemorySessionStore::new());
    let out = app.handle(ms(0), gesture());
    assert!(out.effects.is_empty());
    assert!(!app.ambient().is_started());

    app.handle(ms(10), PageEvent::ProceedClick);
    let out = app.handle(ms(20), gesture());
    assert_eq!(out.effects.len(), 2);
    assert!(matches!(out.effects[0], Effect::LoadTrack { .. }));
    assert_eq!(out.effects[1], Effect::PlayTrack);
}

#[test]
fn link_clicks_do_not_start_audio() {
    let mut store = MemorySessionStore::new();
    store.set("warningShown", "true").unwrap();
    let mut app = load(store);
    let out = app.handle(
        ms(0),
        PageEvent::UserGesture {
            target_is_link: true,
        },
    );
    assert!(out.effects.is_empty());
}

#[test]
fn first_gesture_shows_tracker_with_track_name() {
    let mut store = MemorySessionStore::new();
    store.set("warningShown", "true").unwrap();
    let mut app = load(store);
    let out = app.handle(ms(0), gesture());

    let Effect::LoadTrack { src, volume } = &out.effects[0] else {
        panic!("expected a track load, got {:?}", out.effects);
    };
    let config = app.config();
    assert!((volume - config.audio.volume).abs() < f64::EPSILON);
    let track = config
        .audio
        .tracks
        .iter()
        .find(|t| &t.src == src)
        .unwrap();
    assert!(app.document().has_class(".music-tracker", "show"));
    assert_eq!(
        app.document().text("#currentTrack").as_deref(),
        Some(track.name.as_str())
    );

    assert!(app.handle(ms(5), gesture()).effects.is_empty());
}

#[test]
fn playlist_advances_on_end_and_on_error() {
    let mut store = MemorySessionStore::new();
    store.set("warningShown", "true").unwrap();
    let mut app = load(store);
    app.handle(ms(0), gesture());
    let first = app.ambient().current().unwrap().clone();

    let out = app.handle(ms(1), PageEvent::TrackEnded);
    let second = app.ambient().current().unwrap().clone();
    assert_ne!(first, second);
    assert_eq!(
        out.effects,
        vec![
            Effect::LoadTrack {
                src: second.src.clone(),
                volume: app.config().audio.volume,
            },
            Effect::PlayTrack,
        ]
    );
    assert_eq!(
        app.document().text("#currentTrack").as_deref(),
        Some(second.name.as_str())
    );

    app.handle(
        ms(2),
        PageEvent::TrackFailed {
            reason: "404".into(),
        },
    );
    assert_ne!(app.ambient().current().unwrap(), &second);
}

#[test]
fn rejected_playback_keeps_waiting() {
    let mut store = MemorySessionStore::new();
    store.set("warningShown", "true").unwrap();
    let mut app = load(store);
    app.handle(ms(0), gesture());
    let out = app.handle(
        ms(1),
        PageEvent::PlaybackRejected {
            reason: "NotAllowedError".into(),
        },
    );
    assert!(out.effects.is_empty());
    assert!(app.ambient().is_started());
}

// ── Easter egg ────────────────────────────────────────────────────────

#[test]
fn easter_egg_plays_once_and_ducks_audio() {
    let mut store = MemorySessionStore::new();
    store.set("warningShown", "true").unwrap();
    let mut app = load(&mut store);
    app.handle(ms(0), gesture());

    let out = app.handle(ms(10), PageEvent::EasterEggClick);
    assert_eq!(
        out.effects,
        vec![
            Effect::PauseTrack,
            Effect::PlayVideo {
                src: app.config().easter_egg_video.clone(),
            },
        ]
    );
    assert_eq!(app.document().style("#ratIcon", "display"), Some("none"));
    assert_eq!(app.easter_egg().state(), EggState::Playing);

    assert!(app.handle(ms(11), PageEvent::EasterEggClick).effects.is_empty());

    let out = app.handle(ms(5000), PageEvent::VideoEnded);
    assert_eq!(out.effects, vec![Effect::RemoveVideo, Effect::PlayTrack]);
    assert!(!app.ambient().is_muted());
    drop(app);

    assert_eq!(store.get("easterEggPlayed").unwrap().as_deref(), Some("true"));
    let mut reload = load(&mut store);
    assert_eq!(reload.document().style("#ratIcon", "display"), Some("none"));
    assert!(reload.handle(ms(0), PageEvent::EasterEggClick).effects.is_empty());
}

#[test]
fn failed_video_is_torn_down() {
    let mut app = load(MemorySessionStore::new());
    let out = app.handle(ms(0), PageEvent::EasterEggClick);
    assert_eq!(
        out.effects,
        vec![Effect::PlayVideo {
            src: app.config().easter_egg_video.clone(),
        }]
    );
    let out = app.handle(ms(1), PageEvent::VideoFailed);
    assert_eq!(out.effects, vec![Effect::RemoveVideo]);
    assert_eq!(app.easter_egg().state(), EggState::Spent);
}

// ── Guard ─────────────────────────────────────────────────────────────

#[test]
fn inspection_shortcuts_are_suppressed() {
    let mut app = load(MemorySessionStore::new());
    let blocked = [
        KeyInput::from_dom("F12", Modifiers::empty()),
        KeyInput::from_dom("s", Modifiers::CTRL),
        KeyInput::from_dom("u", Modifiers::CTRL),
        KeyInput::from_dom("I", Modifiers::CTRL | Modifiers::SHIFT),
    ];
    for key in blocked {
        let out = app.handle(ms(0), PageEvent::Key(key.clone()));
        assert!(out.prevent_default, "{key:?}");
    }
    let out = app.handle(ms(0), PageEvent::Key(KeyInput::from_dom("a", Modifiers::empty())));
    assert!(!out.prevent_default);
}

#[test]
fn disabled_guard_lets_everything_through() {
    let mut config = FolioConfig::default();
    config.guard.enabled = false;
    let doc = page(&config);
    let mut app = Folio::init(config, doc, MemorySessionStore::new(), 0).unwrap();
    let out = app.handle(ms(0), PageEvent::Key(KeyInput::from_dom("F12", Modifiers::empty())));
    assert!(!out.prevent_default);
    assert!(!app.handle(ms(0), PageEvent::ContextMenu).prevent_default);
}
