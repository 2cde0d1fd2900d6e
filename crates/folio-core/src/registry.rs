#![forbid(unsafe_code)]

//! View registry: the fixed table of navigable sections.

use crate::config::Selectors;

/// One navigable section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub id: String,
    /// Selector of the nav button.
    pub trigger: String,
    /// Selector of the content pane.
    pub content: String,
}

/// Sections in nav-bar order. Built once, never mutated.
#[derive(Debug, Clone, Default)]
pub struct ViewRegistry {
    sections: Vec<Section>,
}

impl ViewRegistry {
    /// Build the registry for `ids`, deriving each section's selectors.
    ///
    /// Duplicate ids keep their first occurrence.
    #[must_use]
    pub fn new<I, S>(ids: I, selectors: &Selectors) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut sections: Vec<Section> = Vec::new();
        for id in ids {
            let id = id.as_ref();
            if sections.iter().any(|s| s.id == id) {
                continue;
            }
            sections.push(Section {
                id: id.to_string(),
                trigger: selectors.section_trigger(id),
                content: selectors.section_content(id),
            });
        }
        Self { sections }
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.id == id)
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Section> {
        self.sections.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}
