#![forbid(unsafe_code)]

//! Page configuration.
//!
//! Every field has a default matching the stock portfolio markup, so an
//! empty JSON object (or no configuration at all) yields a working setup.
//! Hosts typically embed overrides in the page as
//! `<script type="application/json" id="folio-config">`.
//!
//! # Validation
//!
//! [`FolioConfig::validate`] rejects configurations the controller cannot
//! honour: no sections, duplicate section ids, and a keyboard order or
//! initial section that names an unregistered section.

use std::collections::HashSet;
use std::fmt;
use std::time::Duration;

use serde::Deserialize;

/// Errors produced while loading or validating configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The JSON document could not be parsed.
    Parse(String),
    /// No sections were configured.
    NoSections,
    /// A section id appears more than once.
    DuplicateSection(String),
    /// A keyboard-order entry or the initial section is not a configured section.
    UnknownSection(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(msg) => write!(f, "invalid config JSON: {msg}"),
            Self::NoSections => write!(f, "at least one section is required"),
            Self::DuplicateSection(id) => write!(f, "duplicate section id: {id}"),
            Self::UnknownSection(id) => write!(f, "unknown section id: {id}"),
        }
    }
}

impl std::error::Error for ConfigError {}

/// One ambient audio track.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Track {
    pub src: String,
    pub name: String,
}

impl Track {
    fn new(src: &str, name: &str) -> Self {
        Self {
            src: src.to_string(),
            name: name.to_string(),
        }
    }
}

/// Element selectors the controller addresses.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Selectors {
    /// Attribute carried by nav buttons; its value is the section id.
    pub section_attribute: String,
    pub warning_screen: String,
    pub proceed_button: String,
    pub image_modal: String,
    pub modal_image: String,
    pub modal_caption: String,
    pub modal_close: String,
    pub lightbox_images: Vec<String>,
    pub email_link: String,
    pub email_screen: String,
    pub email_text: String,
    pub copied_text: String,
    pub title_line: String,
    pub name_display: String,
    pub music_tracker: String,
    pub current_track: String,
    pub easter_egg_icon: String,
    pub video_background: String,
    pub logo: String,
    pub skill_card: String,
    pub reveal_on_scroll: Vec<String>,
}

impl Default for Selectors {
    fn default() -> Self {
        Self {
            section_attribute: "data-section".into(),
            warning_screen: "#warningScreen".into(),
            proceed_button: "#proceedBtn".into(),
            image_modal: "#imageModal".into(),
            modal_image: "#modalImage".into(),
            modal_caption: "#modalCaption".into(),
            modal_close: ".close".into(),
            lightbox_images: vec![
                ".website-screenshot img".into(),
                ".design-item img".into(),
                ".game-screenshot img".into(),
            ],
            email_link: "#emailLink".into(),
            email_screen: "#emailScreen".into(),
            email_text: "#emailText".into(),
            copied_text: "#copiedText".into(),
            title_line: ".title-line".into(),
            name_display: "#nameDisplay".into(),
            music_tracker: ".music-tracker".into(),
            current_track: "#currentTrack".into(),
            easter_egg_icon: "#ratIcon".into(),
            video_background: ".video-background".into(),
            logo: ".logo".into(),
            skill_card: ".skill-card".into(),
            reveal_on_scroll: vec![".skill-card".into(), ".contact".into()],
        }
    }
}

impl Selectors {
    /// Selector for the nav button of section `id`.
    #[must_use]
    pub fn section_trigger(&self, id: &str) -> String {
        format!("[{}=\"{id}\"]", self.section_attribute)
    }

    /// Selector for the content pane of section `id`.
    #[must_use]
    pub fn section_content(&self, id: &str) -> String {
        format!("#{id}")
    }
}

/// CSS class names toggled by the controller.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Classes {
    pub active: String,
    pub show: String,
    pub fade_out: String,
    pub animate_in: String,
    pub loaded: String,
}

impl Default for Classes {
    fn default() -> Self {
        Self {
            active: "active".into(),
            show: "show".into(),
            fade_out: "fade-out".into(),
            animate_in: "animate-in".into(),
            loaded: "loaded".into(),
        }
    }
}

/// Delays, all in milliseconds.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Timings {
    pub copy_confirmation_ms: u64,
    pub warning_fade_ms: u64,
    pub typewriter_start_ms: u64,
    pub typewriter_char_ms: u64,
    pub name_cycle_start_ms: u64,
    pub name_cycle_interval_ms: u64,
    pub card_stagger_ms: u64,
    pub ripple_ms: u64,
    pub resize_settle_ms: u64,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            copy_confirmation_ms: 2000,
            warning_fade_ms: 2000,
            typewriter_start_ms: 500,
            typewriter_char_ms: 100,
            name_cycle_start_ms: 2000,
            name_cycle_interval_ms: 1000,
            card_stagger_ms: 150,
            ripple_ms: 600,
            resize_settle_ms: 10,
        }
    }
}

impl Timings {
    #[must_use]
    pub const fn copy_confirmation(&self) -> Duration {
        Duration::from_millis(self.copy_confirmation_ms)
    }

    #[must_use]
    pub const fn warning_fade(&self) -> Duration {
        Duration::from_millis(self.warning_fade_ms)
    }

    #[must_use]
    pub const fn typewriter_start(&self) -> Duration {
        Duration::from_millis(self.typewriter_start_ms)
    }

    #[must_use]
    pub const fn typewriter_char(&self) -> Duration {
        Duration::from_millis(self.typewriter_char_ms)
    }

    #[must_use]
    pub const fn name_cycle_start(&self) -> Duration {
        Duration::from_millis(self.name_cycle_start_ms)
    }

    #[must_use]
    pub const fn name_cycle_interval(&self) -> Duration {
        Duration::from_millis(self.name_cycle_interval_ms)
    }

    #[must_use]
    pub const fn card_stagger(&self) -> Duration {
        Duration::from_millis(self.card_stagger_ms)
    }

    #[must_use]
    pub const fn ripple(&self) -> Duration {
        Duration::from_millis(self.ripple_ms)
    }

    #[must_use]
    pub const fn resize_settle(&self) -> Duration {
        Duration::from_millis(self.resize_settle_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AudioConfig {
    pub tracks: Vec<Track>,
    pub volume: f64,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            tracks: vec![
                Track::new("assets/audio/ambience1.mp3", "Cat Watcher..."),
                Track::new("assets/audio/ambience2.mp3", "Say Cheese!"),
                Track::new("assets/audio/ambience3.mp3", "Lights Out!"),
                Track::new("assets/audio/ambience4.mp3", "Causing Mischief..."),
            ],
            volume: 0.05,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct GuardConfig {
    pub enabled: bool,
}

impl Default for GuardConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct FolioConfig {
    /// Every navigable section, in nav-bar order.
    pub sections: Vec<String>,
    /// Sections reachable by arrow and digit keys, in key order.
    pub keyboard_order: Vec<String>,
    /// Section active after initialization.
    pub initial_section: String,
    pub email_address: String,
    pub names: Vec<String>,
    pub easter_egg_video: String,
    pub selectors: Selectors,
    pub classes: Classes,
    pub timings: Timings,
    pub audio: AudioConfig,
    pub guard: GuardConfig,
}

impl Default for FolioConfig {
    fn default() -> Self {
        let keyboard_order: Vec<String> = [
            "writing",
            "game-dev",
            "programming",
            "qa-testing",
            "design",
        ]
        .into_iter()
        .map(String::from)
        .collect();
        let mut sections = vec!["about".to_string()];
        sections.extend(keyboard_order.iter().cloned());
        Self {
            sections,
            keyboard_order,
            initial_section: "about".into(),
            email_address: "hello@example.com".into(),
            names: vec!["Portfolio".into()],
            easter_egg_video: "assets/scare.mp4".into(),
            selectors: Selectors::default(),
            classes: Classes::default(),
            timings: Timings::default(),
            audio: AudioConfig::default(),
            guard: GuardConfig::default(),
        }
    }
}

impl FolioConfig {
    /// Parse and validate a JSON document. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sections.is_empty() {
            return Err(ConfigError::NoSections);
        }
        let mut seen = HashSet::new();
        for id in &self.sections {
            if !seen.insert(id.as_str()) {
                return Err(ConfigError::DuplicateSection(id.clone()));
            }
        }
        if let Some(id) = self
            .keyboard_order
            .iter()
            .find(|id| !seen.contains(id.as_str()))
        {
            return Err(ConfigError::UnknownSection(id.clone()));
        }
        if !seen.contains(self.initial_section.as_str()) {
            return Err(ConfigError::UnknownSection(self.initial_section.clone()));
        }
        Ok(())
    }
}
