//! Colour normalisation to `#rrggbb`.

use regex::Regex;
use std::sync::LazyLock;

static RGB_FUNCTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^rgba?\(\s*(\d{1,3})\s*,\s*(\d{1,3})\s*,\s*(\d{1,3})\s*(?:,\s*[0-9.]+%?\s*)?\)$")
        .unwrap()
});

static HEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#(?:[0-9A-Fa-f]{3}|[0-9A-Fa-f]{6})$").unwrap());

/// Normalise a colour value to lower-case `#rrggbb`.
///
/// Accepts `rgb(r, g, b)` / `rgba(r, g, b, a)` (alpha is dropped), `#rgb` and
/// `#rrggbb`. Anything else is returned unchanged.
pub fn normalize_color(raw: &str) -> String {
    let trimmed = raw.trim();

    if let Some(caps) = RGB_FUNCTION.captures(trimmed) {
        let channels: Option<Vec<u8>> = (1..=3).map(|i| caps[i].parse::<u8>().ok()).collect();
        if let Some(c) = channels {
            return format!("#{:02x}{:02x}{:02x}", c[0], c[1], c[2]);
        }
        return raw.to_string();
    }

    if HEX.is_match(trimmed) {
        let digits = &trimmed[1..];
        if digits.len() == 3 {
            let expanded: String = digits.chars().flat_map(|c| [c, c]).collect();
            return format!("#{}", expanded.to_ascii_lowercase());
        }
        return trimmed.to_ascii_lowercase();
    }

    raw.to_string()
}

/// Whether `value` is already in normalised `#rrggbb` form.
pub fn is_normalized_color(value: &str) -> bool {
    value.len() == 7 && HEX.is_match(value) && value == value.to_ascii_lowercase()
}
