#![forbid(unsafe_code)]

//! The live DOM as a [`folio_core::Document`].
//!
//! Selectors go straight to `querySelector`/`querySelectorAll`. An invalid
//! selector throws in the browser; here it reads as "no match".

use folio_core::Document;
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlElement};

pub struct WebDocument {
    doc: web_sys::Document,
    scroll_locked: bool,
}

impl WebDocument {
    pub fn new(doc: web_sys::Document) -> Self {
        Self {
            doc,
            scroll_locked: false,
        }
    }

    fn first(&self, target: &str) -> Option<Element> {
        self.doc.query_selector(target).ok().flatten()
    }

    fn nth(&self, target: &str, index: usize) -> Option<HtmlElement> {
        let index = u32::try_from(index).ok()?;
        self.doc
            .query_selector_all(target)
            .ok()?
            .item(index)?
            .dyn_into::<HtmlElement>()
            .ok()
    }
}

impl Document for WebDocument {
    fn count(&self, target: &str) -> usize {
        self.doc
            .query_selector_all(target)
            .map_or(0, |list| list.length() as usize)
    }

    fn add_class(&mut self, target: &str, class: &str) -> bool {
        self.first(target)
            .map(|el| {
                let _ = el.class_list().add_1(class);
            })
            .is_some()
    }

    fn remove_class(&mut self, target: &str, class: &str) -> bool {
        self.first(target)
            .map(|el| {
                let _ = el.class_list().remove_1(class);
            })
            .is_some()
    }

    fn has_class(&self, target: &str, class: &str) -> bool {
        self.first(target)
            .is_some_and(|el| el.class_list().contains(class))
    }

    fn text(&self, target: &str) -> Option<String> {
        self.first(target)
            .map(|el| el.text_content().unwrap_or_default())
    }

    fn set_text(&mut self, target: &str, text: &str) -> bool {
        self.first(target)
            .map(|el| el.set_text_content(Some(text)))
            .is_some()
    }

    fn set_attribute(&mut self, target: &str, name: &str, value: &str) -> bool {
        self.first(target)
            .is_some_and(|el| el.set_attribute(name, value).is_ok())
    }

    fn set_style(&mut self, target: &str, index: usize, property: &str, value: &str) -> bool {
        self.nth(target, index)
            .is_some_and(|el| el.style().set_property(property, value).is_ok())
    }

    fn set_scroll_locked(&mut self, locked: bool) {
        self.scroll_locked = locked;
        let Some(body) = self.doc.body() else {
            return;
        };
        let overflow = if locked { "hidden" } else { "auto" };
        if let Err(err) = body.style().set_property("overflow", overflow) {
            tracing::debug!(?err, "body overflow not applied");
        }
    }

    fn is_scroll_locked(&self) -> bool {
        self.scroll_locked
    }
}
