#![forbid(unsafe_code)]

//! Static page decoration: injected styles, inline styles for generated
//! elements, the scroll-reveal observer options and the startup banner.

/// Keyframes and classes injected into `<head>` at startup.
pub const PAGE_STYLES: &str = "\
@keyframes ripple {
    to { transform: scale(4); opacity: 0; }
}
.animate-in {
    animation: slideInUp 0.8s ease forwards;
}
@keyframes slideInUp {
    from { opacity: 0; transform: translateY(30px); }
    to { opacity: 1; transform: translateY(0); }
}
";

/// Fade-in applied once the window `load` event adds the `loaded` class.
pub const LOADED_STYLES: &str = "\
body { opacity: 0; transition: opacity 0.5s ease; }
body.loaded { opacity: 1; }
";

/// Inline style of one hover ripple.
pub const RIPPLE_STYLE: &[(&str, &str)] = &[
    ("position", "absolute"),
    ("border-radius", "50%"),
    ("background", "rgba(255, 255, 255, 0.1)"),
    ("transform", "scale(0)"),
    ("animation", "ripple 0.6s linear"),
    ("left", "50%"),
    ("top", "50%"),
    ("width", "20px"),
    ("height", "20px"),
    ("margin-left", "-10px"),
    ("margin-top", "-10px"),
    ("pointer-events", "none"),
];

/// Attribute tagging a ripple with its id so it can be found for removal.
pub const RIPPLE_ID_ATTRIBUTE: &str = "data-ripple-id";

/// Selector of the ripple with `id`.
#[must_use]
pub fn ripple_selector(id: u64) -> String {
    format!("[{RIPPLE_ID_ATTRIBUTE}=\"{id}\"]")
}

/// Inline style of the full-screen easter-egg video.
pub const VIDEO_STYLE: &[(&str, &str)] = &[
    ("position", "fixed"),
    ("top", "0"),
    ("left", "0"),
    ("width", "100%"),
    ("height", "100%"),
    ("z-index", "9999"),
    ("object-fit", "cover"),
];

/// Off-screen textarea used by the legacy copy path.
pub const LEGACY_COPY_STYLE: &[(&str, &str)] = &[
    ("position", "fixed"),
    ("left", "-9999px"),
    ("opacity", "0"),
];

/// Fraction of a target that must be visible before it animates in.
pub const REVEAL_THRESHOLD: f64 = 0.1;
pub const REVEAL_ROOT_MARGIN: &str = "0px 0px -50px 0px";

/// Startup banner lines; the second names the digit keys actually bound.
#[must_use]
pub fn banner(keyboard_sections: usize) -> [String; 2] {
    let keys = match keyboard_sections.min(9) {
        0 => "arrow keys".to_string(),
        1 => "arrow keys or number key 1".to_string(),
        n => format!("arrow keys or number keys (1-{n})"),
    };
    [
        "Portfolio loaded successfully".to_string(),
        format!("Use {keys} to navigate sections"),
    ]
}

/// Joined selector list for the scroll-reveal targets.
#[must_use]
pub fn reveal_selector(selectors: &[String]) -> String {
    selectors.join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn banner_names_bound_digits() {
        assert_eq!(
            banner(5)[1],
            "Use arrow keys or number keys (1-5) to navigate sections"
        );
        assert_eq!(banner(0)[1], "Use arrow keys to navigate sections");
        assert_eq!(banner(12)[1], "Use arrow keys or number keys (1-9) to navigate sections");
    }

    #[test]
    fn ripple_selector_matches_attribute() {
        assert_eq!(ripple_selector(7), "[data-ripple-id=\"7\"]");
    }

    #[test]
    fn reveal_selector_joins() {
        let sel = vec![".skill-card".to_string(), ".contact".to_string()];
        assert_eq!(reveal_selector(&sel), ".skill-card, .contact");
    }
}
