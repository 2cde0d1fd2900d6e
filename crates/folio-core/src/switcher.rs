#![forbid(unsafe_code)]

//! Section switching: exactly one section carries the active marker.
//!
//! # Invariants
//!
//! 1. After a successful switch, the target section's trigger and content are
//!    the only registered elements carrying the active class.
//! 2. A switch to an unregistered id touches nothing and leaves
//!    [`SectionSwitcher::active`] unchanged.
//! 3. Switching to the already-active section reapplies the marker; the
//!    visible result is identical.

use std::fmt;

use crate::document::Document;
use crate::registry::ViewRegistry;

/// Reasons a switch request was refused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SwitchError {
    UnknownSection(String),
}

impl fmt::Display for SwitchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownSection(id) => write!(f, "no section named {id:?}"),
        }
    }
}

impl std::error::Error for SwitchError {}

/// Holds the navigation state (the active section id).
#[derive(Debug, Clone, Default)]
pub struct SectionSwitcher {
    active: Option<String>,
    active_class: String,
}

impl SectionSwitcher {
    #[must_use]
    pub fn new(active_class: impl Into<String>) -> Self {
        Self {
            active: None,
            active_class: active_class.into(),
        }
    }

    /// Currently active section id.
    #[must_use]
    pub fn active(&self) -> Option<&str> {
        self.active.as_deref()
    }

    /// Make `id` the sole active section.
    pub fn switch_to<D: Document + ?Sized>(
        &mut self,
        registry: &ViewRegistry,
        doc: &mut D,
        id: &str,
    ) -> Result<(), SwitchError> {
        let Some(target) = registry.get(id) else {
            return Err(SwitchError::UnknownSection(id.to_string()));
        };

        for section in registry.iter() {
            doc.remove_class(&section.trigger, &self.active_class);
            doc.remove_class(&section.content, &self.active_class);
        }

        if !doc.add_class(&target.trigger, &self.active_class) {
            tracing::debug!(section = id, selector = %target.trigger, "nav trigger missing");
        }
        if !doc.add_class(&target.content, &self.active_class) {
            tracing::debug!(section = id, selector = %target.content, "section content missing");
        }

        tracing::debug!(from = ?self.active, to = id, "section switched");
        self.active = Some(target.id.clone());
        Ok(())
    }
}
