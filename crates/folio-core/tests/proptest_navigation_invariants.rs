//! Property-based invariant tests for section navigation.
//!
//! Verifies:
//! 1. Exclusivity: after any sequence of clicks and keys exactly one section
//!    (trigger and content) carries the active class.
//! 2. A repeated switch to the active section changes nothing.
//! 3. Arrow keys wrap at both ends of the keyboard order.
//! 4. Digit keys index the keyboard order directly; out-of-range digits are
//!    ignored without suppressing the browser default.
//! 5. The controller agrees with a simple cursor model for every sequence.

use std::time::Duration;

use folio_core::{
    Folio, FolioConfig, KeyInput, MemoryDocument, MemorySessionStore, Modifiers, PageEvent,
    SessionStore,
};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

// ── Fixture ───────────────────────────────────────────────────────────

fn page(config: &FolioConfig) -> MemoryDocument {
    let sel = &config.selectors;
    let mut doc = MemoryDocument::new()
        .with_element(&sel.warning_screen)
        .with_element(&sel.image_modal)
        .with_element(&sel.email_screen);
    for id in &config.sections {
        doc = doc
            .with_element(&sel.section_trigger(id))
            .with_element(&sel.section_content(id));
    }
    doc
}

/// A controller whose warning was already acknowledged this tab, so no
/// overlay intercepts navigation.
fn returning_visitor() -> Folio<MemoryDocument, MemorySessionStore> {
    let config = FolioConfig::default();
    let doc = page(&config);
    let mut store = MemorySessionStore::new();
    store.set("warningShown", "true").unwrap();
    Folio::init(config, doc, store, 1).unwrap()
}

fn key(k: &str) -> PageEvent {
    PageEvent::Key(KeyInput::from_dom(k, Modifiers::empty()))
}

fn active_targets(app: &Folio<MemoryDocument, MemorySessionStore>) -> Vec<String> {
    app.document()
        .targets_with_class("active")
        .into_iter()
        .map(String::from)
        .collect()
}

// ── Strategy helpers ──────────────────────────────────────────────────

#[derive(Debug, Clone)]
enum Op {
    Click(String),
    Left,
    Right,
    Digit(u8),
    Escape,
}

fn arb_op() -> impl Strategy<Value = Op> {
    let ids: Vec<String> = FolioConfig::default().sections;
    prop_oneof![
        proptest::sample::select(ids).prop_map(Op::Click),
        "[a-z]{1,8}".prop_map(|s| Op::Click(format!("x-{s}"))),
        Just(Op::Left),
        Just(Op::Right),
        (1u8..=9).prop_map(Op::Digit),
        Just(Op::Escape),
    ]
}

fn event_for(op: &Op) -> PageEvent {
    match op {
        Op::Click(id) => PageEvent::NavClick {
            section: id.clone(),
        },
        Op::Left => key("ArrowLeft"),
        Op::Right => key("ArrowRight"),
        Op::Digit(d) => key(&d.to_string()),
        Op::Escape => key("Escape"),
    }
}

/// Reference model of navigation state.
struct Model {
    order: Vec<String>,
    sections: Vec<String>,
    cursor: usize,
    active: String,
}

impl Model {
    fn new(config: &FolioConfig) -> Self {
        Self {
            order: config.keyboard_order.clone(),
            sections: config.sections.clone(),
            cursor: 0,
            active: config.initial_section.clone(),
        }
    }

    fn activate(&mut self, id: &str) {
        self.active = id.to_string();
        if let Some(pos) = self.order.iter().position(|s| s == id) {
            self.cursor = pos;
        }
    }

    fn apply(&mut self, op: &Op) {
        let len = self.order.len();
        match op {
            Op::Click(id) if self.sections.contains(id) => self.activate(&id.clone()),
            Op::Click(_) | Op::Escape => {}
            Op::Left => {
                let next = (self.cursor + len - 1) % len;
                self.activate(&self.order[next].clone());
            }
            Op::Right => {
                let next = (self.cursor + 1) % len;
                self.activate(&self.order[next].clone());
            }
            Op::Digit(d) => {
                let index = usize::from(*d) - 1;
                if index < len {
                    self.activate(&self.order[index].clone());
                }
            }
        }
    }
}

// ── Properties ────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn exactly_one_section_active(ops in prop::collection::vec(arb_op(), 0..40)) {
        let mut app = returning_visitor();
        for (i, op) in ops.iter().enumerate() {
            app.handle(Duration::from_millis(i as u64 * 10), event_for(op));
            let active = app.active_section().unwrap().to_string();
            let config = app.config();
            let mut expected = vec![
                config.selectors.section_content(&active),
                config.selectors.section_trigger(&active),
            ];
            expected.sort();
            prop_assert_eq!(active_targets(&app), expected);
        }
    }

    #[test]
    fn controller_matches_cursor_model(ops in prop::collection::vec(arb_op(), 0..40)) {
        let mut app = returning_visitor();
        let mut model = Model::new(app.config());
        for (i, op) in ops.iter().enumerate() {
            app.handle(Duration::from_millis(i as u64), event_for(op));
            model.apply(op);
            prop_assert_eq!(app.active_section(), Some(model.active.as_str()));
        }
    }

    #[test]
    fn repeated_switch_is_idempotent(id in proptest::sample::select(FolioConfig::default().sections)) {
        let mut app = returning_visitor();
        app.handle(Duration::ZERO, PageEvent::NavClick { section: id.clone() });
        let once = active_targets(&app);
        app.handle(Duration::ZERO, PageEvent::NavClick { section: id.clone() });
        prop_assert_eq!(active_targets(&app), once);
        prop_assert_eq!(app.active_section(), Some(id.as_str()));
    }

    #[test]
    fn digits_ignore_overlay_free_state(
        ops in prop::collection::vec(arb_op(), 0..20),
        digit in 1u8..=9,
    ) {
        let mut app = returning_visitor();
        for op in &ops {
            app.handle(Duration::ZERO, event_for(op));
        }
        let before = app.active_section().map(String::from);
        let order = app.config().keyboard_order.clone();
        let out = app.handle(Duration::ZERO, key(&digit.to_string()));
        match order.get(usize::from(digit) - 1) {
            Some(id) => {
                prop_assert!(out.prevent_default);
                prop_assert_eq!(app.active_section(), Some(id.as_str()));
            }
            None => {
                prop_assert!(!out.prevent_default);
                prop_assert_eq!(app.active_section().map(String::from), before);
            }
        }
    }
}

// ── Fixed scenarios ───────────────────────────────────────────────────

#[test]
fn arrows_wrap_at_both_ends() {
    let mut app = returning_visitor();
    assert_eq!(app.active_section(), Some("about"));

    let out = app.handle(Duration::ZERO, key("ArrowLeft"));
    assert!(out.prevent_default);
    assert_eq!(app.active_section(), Some("design"));

    app.handle(Duration::ZERO, key("ArrowRight"));
    assert_eq!(app.active_section(), Some("writing"));
}

#[test]
fn arrow_follows_clicked_section() {
    let mut app = returning_visitor();
    app.handle(Duration::ZERO, PageEvent::NavClick { section: "qa-testing".into() });
    app.handle(Duration::ZERO, key("ArrowRight"));
    assert_eq!(app.active_section(), Some("design"));
}

#[test]
fn digit_three_selects_third_keyboard_section() {
    let mut app = returning_visitor();
    app.handle(Duration::ZERO, key("ArrowRight"));
    app.handle(Duration::ZERO, key("3"));
    assert_eq!(app.active_section(), Some("programming"));
}

#[test]
fn digit_six_is_out_of_range() {
    let mut app = returning_visitor();
    let out = app.handle(Duration::ZERO, key("6"));
    assert!(!out.prevent_default);
    assert_eq!(app.active_section(), Some("about"));
}

#[test]
fn unknown_section_click_changes_nothing() {
    let mut app = returning_visitor();
    let before = active_targets(&app);
    app.handle(Duration::ZERO, PageEvent::NavClick { section: "nope".into() });
    assert_eq!(active_targets(&app), before);
}
