//! Theme data model: built-in palettes and resolution from config.
//!
//! Two built-in palettes (dark and light) plus custom color overrides from
//! the config file.

use ratatui::style::Color;

use crate::config::{ThemeColorsConfig, ThemeConfig};

// ── Runtime theme colors ─────────────────────────────────────────────────────

/// All runtime colors used in the UI.
///
/// Constructed from a config-level `ThemeConfig` via `resolve_theme()`.
#[derive(Debug, Clone)]
pub struct ThemeColors {
    // Drive bar
    pub drive_bg: Color,
    pub drive_fg: Color,
    pub drive_active_bg: Color,
    pub drive_active_fg: Color,

    // Entry list
    pub list_selected_bg: Color,
    pub list_selected_fg: Color,
    pub list_dir_fg: Color,
    pub list_file_fg: Color,

    // Preview pane
    pub preview_fg: Color,

    // Status bar
    pub status_bg: Color,
    pub status_fg: Color,

    // Borders
    pub border_fg: Color,

    // Semantic colors (not configurable, consistent across themes)
    pub accent_fg: Color,
    pub dim_fg: Color,
}

// ── Built-in palettes ────────────────────────────────────────────────────────

/// Dark theme using Catppuccin Mocha palette.
pub fn dark_theme() -> ThemeColors {
    ThemeColors {
        drive_bg: Color::Rgb(30, 30, 46),          // #1e1e2e (base)
        drive_fg: Color::Rgb(166, 173, 200),       // #a6adc8 (subtext0)
        drive_active_bg: Color::Rgb(137, 180, 250), // #89b4fa (blue)
        drive_active_fg: Color::Rgb(30, 30, 46),

        list_selected_bg: Color::Rgb(69, 71, 90), // #45475a (surface1)
        list_selected_fg: Color::Rgb(205, 214, 244), // #cdd6f4 (text)
        list_dir_fg: Color::Rgb(137, 180, 250),   // #89b4fa (blue)
        list_file_fg: Color::Rgb(205, 214, 244),

        preview_fg: Color::Rgb(205, 214, 244),

        status_bg: Color::Rgb(30, 30, 46),
        status_fg: Color::Rgb(205, 214, 244),

        border_fg: Color::Rgb(88, 91, 112), // #585b70 (surface2)

        accent_fg: Color::Rgb(203, 166, 247), // #cba6f7 (mauve)
        dim_fg: Color::Rgb(108, 112, 134),   // #6c7086 (overlay0)
    }
}

/// Light theme — complementary light palette.
pub fn light_theme() -> ThemeColors {
    ThemeColors {
        drive_bg: Color::Rgb(239, 241, 245),        // #eff1f5 (base)
        drive_fg: Color::Rgb(108, 111, 133),        // #6c6f85 (subtext0)
        drive_active_bg: Color::Rgb(30, 102, 245),  // #1e66f5 (blue)
        drive_active_fg: Color::Rgb(239, 241, 245),

        list_selected_bg: Color::Rgb(204, 208, 218), // #ccd0da (surface1)
        list_selected_fg: Color::Rgb(76, 79, 105),   // #4c4f69 (text)
        list_dir_fg: Color::Rgb(30, 102, 245),
        list_file_fg: Color::Rgb(76, 79, 105),

        preview_fg: Color::Rgb(76, 79, 105),

        status_bg: Color::Rgb(239, 241, 245),
        status_fg: Color::Rgb(76, 79, 105),

        border_fg: Color::Rgb(172, 176, 190), // #acb0be (surface2)

        accent_fg: Color::Rgb(136, 57, 239), // #8839ef (mauve)
        dim_fg: Color::Rgb(156, 160, 176),   // #9ca0b0 (overlay0)
    }
}

// ── Color parsing ────────────────────────────────────────────────────────────

/// Parse a hex color string like `"#aabbcc"` into a `ratatui::style::Color`.
/// Returns `None` for malformed input.
pub fn parse_hex_color(hex: &str) -> Option<Color> {
    let hex = hex.strip_prefix('#').unwrap_or(hex);
    if hex.len() != 6 {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some(Color::Rgb(r, g, b))
}

// ── Theme resolution ─────────────────────────────────────────────────────────

/// Resolve the final `ThemeColors` from config.
///
/// - `"dark"` (default): dark Catppuccin palette
/// - `"light"`: light Catppuccin palette
/// - `"custom"`: start from dark palette, then override with custom hex values
pub fn resolve_theme(config: &ThemeConfig) -> ThemeColors {
    let scheme = config.scheme.as_deref().unwrap_or("dark");
    match scheme {
        "light" => light_theme(),
        "custom" => {
            let mut theme = dark_theme();
            if let Some(custom) = &config.custom {
                apply_custom_colors(&mut theme, custom);
            }
            theme
        }
        _ => dark_theme(), // "dark" or any unrecognized value
    }
}

/// Apply custom hex color overrides on top of an existing theme.
fn apply_custom_colors(theme: &mut ThemeColors, custom: &ThemeColorsConfig) {
    let overrides = [
        (&custom.drive_bg, &mut theme.drive_bg),
        (&custom.drive_fg, &mut theme.drive_fg),
        (&custom.drive_active_bg, &mut theme.drive_active_bg),
        (&custom.drive_active_fg, &mut theme.drive_active_fg),
        (&custom.list_selected_bg, &mut theme.list_selected_bg),
        (&custom.list_selected_fg, &mut theme.list_selected_fg),
        (&custom.list_dir_fg, &mut theme.list_dir_fg),
        (&custom.list_file_fg, &mut theme.list_file_fg),
        (&custom.preview_fg, &mut theme.preview_fg),
        (&custom.status_bg, &mut theme.status_bg),
        (&custom.status_fg, &mut theme.status_fg),
        (&custom.border_fg, &mut theme.border_fg),
    ];
    for (hex, slot) in overrides {
        if let Some(color) = hex.as_deref().and_then(parse_hex_color) {
            *slot = color;
        }
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_hex_color_valid() {
        assert_eq!(parse_hex_color("#aabbcc"), Some(Color::Rgb(170, 187, 204)));
        assert_eq!(parse_hex_color("aabbcc"), Some(Color::Rgb(170, 187, 204)));
        assert_eq!(parse_hex_color("#000000"), Some(Color::Rgb(0, 0, 0)));
        assert_eq!(parse_hex_color("#FFFFFF"), Some(Color::Rgb(255, 255, 255)));
    }

    #[test]
    fn parse_hex_color_invalid() {
        assert_eq!(parse_hex_color("#abc"), None);
        assert_eq!(parse_hex_color("not-a-color"), None);
        assert_eq!(parse_hex_color(""), None);
        assert_eq!(parse_hex_color("#gggggg"), None);
    }

    #[test]
    fn resolve_default_is_dark() {
        let theme = resolve_theme(&ThemeConfig::default());
        assert_eq!(theme.list_dir_fg, dark_theme().list_dir_fg);
    }

    #[test]
    fn resolve_light_scheme() {
        let config = ThemeConfig {
            scheme: Some("light".into()),
            custom: None,
        };
        let theme = resolve_theme(&config);
        assert_eq!(theme.list_dir_fg, light_theme().list_dir_fg);
    }

    #[test]
    fn resolve_unknown_scheme_falls_back_to_dark() {
        let config = ThemeConfig {
            scheme: Some("solarized".into()),
            custom: None,
        };
        let theme = resolve_theme(&config);
        assert_eq!(theme.status_bg, dark_theme().status_bg);
    }

    #[test]
    fn custom_scheme_applies_overrides() {
        let config = ThemeConfig {
            scheme: Some("custom".into()),
            custom: Some(ThemeColorsConfig {
                list_dir_fg: Some("#ff0000".into()),
                ..Default::default()
            }),
        };
        let theme = resolve_theme(&config);
        assert_eq!(theme.list_dir_fg, Color::Rgb(255, 0, 0));
        // untouched fields keep the dark palette
        assert_eq!(theme.list_file_fg, dark_theme().list_file_fg);
    }

    #[test]
    fn custom_scheme_ignores_malformed_hex() {
        let config = ThemeConfig {
            scheme: Some("custom".into()),
            custom: Some(ThemeColorsConfig {
                status_bg: Some("nope".into()),
                ..Default::default()
            }),
        };
        let theme = resolve_theme(&config);
        assert_eq!(theme.status_bg, dark_theme().status_bg);
    }
}
