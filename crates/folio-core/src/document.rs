#![forbid(unsafe_code)]

//! The page seam: every visual mutation the controller makes goes through
//! [`Document`].
//!
//! Targets are CSS selectors. Single-element operations act on the first
//! match; indexed operations act on the `index`-th match in document order.
//! Every mutating call reports whether a target was found, and a missing
//! target is never an error: the caller logs it and carries on.
//!
//! [`MemoryDocument`] is an in-memory implementation used by tests and by
//! hosts that want to dry-run the controller.

use std::collections::{BTreeMap, BTreeSet, HashMap};

/// CSS `display` values the controller writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Display {
    None,
    Block,
}

impl Display {
    #[must_use]
    pub const fn as_css(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Block => "block",
        }
    }
}

/// Access to the page's elements.
pub trait Document {
    /// Number of elements matching `target`.
    fn count(&self, target: &str) -> usize;

    /// Whether at least one element matches `target`.
    fn exists(&self, target: &str) -> bool {
        self.count(target) > 0
    }

    fn add_class(&mut self, target: &str, class: &str) -> bool;

    fn remove_class(&mut self, target: &str, class: &str) -> bool;

    fn has_class(&self, target: &str, class: &str) -> bool;

    /// Text content of the first match.
    fn text(&self, target: &str) -> Option<String>;

    fn set_text(&mut self, target: &str, text: &str) -> bool;

    fn set_attribute(&mut self, target: &str, name: &str, value: &str) -> bool;

    /// Set an inline style property on the `index`-th match.
    fn set_style(&mut self, target: &str, index: usize, property: &str, value: &str) -> bool;

    /// Suspend (`true`) or restore (`false`) page scrolling.
    fn set_scroll_locked(&mut self, locked: bool);

    fn is_scroll_locked(&self) -> bool;

    /// Set an inline style property on every match. Returns how many were touched.
    fn set_style_all(&mut self, target: &str, property: &str, value: &str) -> usize {
        let total = self.count(target);
        (0..total)
            .filter(|&index| self.set_style(target, index, property, value))
            .count()
    }

    fn set_display(&mut self, target: &str, display: Display) -> bool {
        self.set_style(target, 0, "display", display.as_css())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// In-memory document
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryElement {
    pub classes: BTreeSet<String>,
    pub text: String,
    pub attributes: BTreeMap<String, String>,
    pub styles: BTreeMap<String, String>,
}

/// Selector-keyed element table.
///
/// Selectors are matched literally: the element registered under
/// `"#emailText"` is what `"#emailText"` resolves to. That is enough for the
/// controller, which only ever addresses elements by the selectors it was
/// configured with.
#[derive(Debug, Clone, Default)]
pub struct MemoryDocument {
    elements: HashMap<String, Vec<MemoryElement>>,
    scroll_locked: bool,
}

impl MemoryDocument {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register one element under `target`.
    #[must_use]
    pub fn with_element(mut self, target: &str) -> Self {
        self.insert(target, MemoryElement::default());
        self
    }

    /// Register one element under `target` with initial text.
    #[must_use]
    pub fn with_text(mut self, target: &str, text: &str) -> Self {
        self.insert(
            target,
            MemoryElement {
                text: text.to_string(),
                ..MemoryElement::default()
            },
        );
        self
    }

    /// Register `count` elements under `target`.
    #[must_use]
    pub fn with_elements(mut self, target: &str, count: usize) -> Self {
        for _ in 0..count {
            self.insert(target, MemoryElement::default());
        }
        self
    }

    pub fn insert(&mut self, target: &str, element: MemoryElement) {
        self.elements
            .entry(target.to_string())
            .or_default()
            .push(element);
    }

    /// First element matching `target`.
    #[must_use]
    pub fn element(&self, target: &str) -> Option<&MemoryElement> {
        self.elements.get(target).and_then(|els| els.first())
    }

    /// `index`-th element matching `target`.
    #[must_use]
    pub fn element_at(&self, target: &str, index: usize) -> Option<&MemoryElement> {
        self.elements.get(target).and_then(|els| els.get(index))
    }

    /// Inline style of the first match.
    #[must_use]
    pub fn style(&self, target: &str, property: &str) -> Option<&str> {
        self.element(target)
            .and_then(|el| el.styles.get(property))
            .map(String::as_str)
    }

    #[must_use]
    pub fn attribute(&self, target: &str, name: &str) -> Option<&str> {
        self.element(target)
            .and_then(|el| el.attributes.get(name))
            .map(String::as_str)
    }

    /// Selectors whose first element carries `class`, sorted.
    #[must_use]
    pub fn targets_with_class(&self, class: &str) -> Vec<&str> {
        let mut found: Vec<&str> = self
            .elements
            .iter()
            .filter(|(_, els)| els.first().is_some_and(|el| el.classes.contains(class)))
            .map(|(target, _)| target.as_str())
            .collect();
        found.sort_unstable();
        found
    }

    fn first_mut(&mut self, target: &str) -> Option<&mut MemoryElement> {
        self.elements.get_mut(target).and_then(|els| els.first_mut())
    }
}

impl Document for MemoryDocument {
    fn count(&self, target: &str) -> usize {
        self.elements.get(target).map_or(0, Vec::len)
    }

    fn add_class(&mut self, target: &str, class: &str) -> bool {
        self.first_mut(target)
            .map(|el| {
                el.classes.insert(class.to_string());
            })
            .is_some()
    }

    fn remove_class(&mut self, target: &str, class: &str) -> bool {
        self.first_mut(target)
            .map(|el| {
                el.classes.remove(class);
            })
            .is_some()
    }

    fn has_class(&self, target: &str, class: &str) -> bool {
        self.element(target)
            .is_some_and(|el| el.classes.contains(class))
    }

    fn text(&self, target: &str) -> Option<String> {
        self.element(target).map(|el| el.text.clone())
    }

    fn set_text(&mut self, target: &str, text: &str) -> bool {
        self.first_mut(target)
            .map(|el| el.text = text.to_string())
            .is_some()
    }

    fn set_attribute(&mut self, target: &str, name: &str, value: &str) -> bool {
        self.first_mut(target)
            .map(|el| {
                el.attributes.insert(name.to_string(), value.to_string());
            })
            .is_some()
    }

    fn set_style(&mut self, target: &str, index: usize, property: &str, value: &str) -> bool {
        self.elements
            .get_mut(target)
            .and_then(|els| els.get_mut(index))
            .map(|el| {
                el.styles.insert(property.to_string(), value.to_string());
            })
            .is_some()
    }

    fn set_scroll_locked(&mut self, locked: bool) {
        self.scroll_locked = locked;
    }

    fn is_scroll_locked(&self) -> bool {
        self.scroll_locked
    }
}
