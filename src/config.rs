//! Application configuration: TOML file loading, CLI overrides, and defaults.
//!
//! Resolution order (first found wins, values merge/override):
//! 1. CLI flags (`--config`, `--theme`, `--no-preview`, etc.)
//! 2. `$FB_TUI_CONFIG` environment variable (path to config file)
//! 3. Project-local `.fb-tui.toml` in the current working directory
//! 4. Global `~/.config/fb-tui/config.toml`
//! 5. Built-in defaults

use std::path::{Path, PathBuf};

use serde::Deserialize;

// ── Section configs ──────────────────────────────────────────────────────────

/// General application settings.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct GeneralConfig {
    /// Drive index to activate at startup.
    pub start_drive: Option<usize>,
}

/// Preview panel settings.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct PreviewConfig {
    /// Whether the preview panel is enabled.
    pub enabled: Option<bool>,
    /// Maximum file size (bytes) an image fetch will read.
    pub max_bytes: Option<u64>,
}

/// Logging settings.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct LoggingConfig {
    /// Write a log file under the user cache directory.
    pub enabled: Option<bool>,
    /// Log level filter ("error", "warn", "info", "debug", "trace").
    pub level: Option<String>,
}

/// Color settings for a single theme palette.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct ThemeColorsConfig {
    pub drive_bg: Option<String>,
    pub drive_fg: Option<String>,
    pub drive_active_bg: Option<String>,
    pub drive_active_fg: Option<String>,
    pub list_selected_bg: Option<String>,
    pub list_selected_fg: Option<String>,
    pub list_dir_fg: Option<String>,
    pub list_file_fg: Option<String>,
    pub preview_fg: Option<String>,
    pub status_bg: Option<String>,
    pub status_fg: Option<String>,
    pub border_fg: Option<String>,
}

/// Theme configuration section.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct ThemeConfig {
    /// Color scheme: "dark", "light", "custom".
    pub scheme: Option<String>,
    /// Custom color overrides.
    pub custom: Option<ThemeColorsConfig>,
}

// ── Top-level config ─────────────────────────────────────────────────────────

/// Top-level application configuration.
///
/// All fields are optional so that partial configs from different sources
/// can be merged together (CLI overrides file, file overrides defaults).
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub general: GeneralConfig,
    pub preview: PreviewConfig,
    pub logging: LoggingConfig,
    pub theme: ThemeConfig,
}

// ── Default constants ────────────────────────────────────────────────────────

/// Default max file size an image fetch will read (16 MiB).
pub const DEFAULT_MAX_PREVIEW_BYTES: u64 = 16_777_216;

// ── Config file locator ──────────────────────────────────────────────────────

/// Return the list of candidate config file paths in priority order.
///
/// Does NOT include the CLI `--config` path — that is handled separately.
fn candidate_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();

    // 1. $FB_TUI_CONFIG environment variable
    if let Ok(env_path) = std::env::var("FB_TUI_CONFIG") {
        paths.push(PathBuf::from(env_path));
    }

    // 2. Project-local `.fb-tui.toml` in CWD
    if let Ok(cwd) = std::env::current_dir() {
        paths.push(cwd.join(".fb-tui.toml"));
    }

    // 3. Global `~/.config/fb-tui/config.toml`
    if let Some(config_dir) = dirs::config_dir() {
        paths.push(config_dir.join("fb-tui").join("config.toml"));
    }

    paths
}

/// Try to read and parse a TOML config file. Returns `None` if the file
/// doesn't exist or can't be parsed (with a warning printed to stderr).
fn load_file(path: &Path) -> Option<AppConfig> {
    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(_) => return None,
    };
    match toml::from_str::<AppConfig>(&content) {
        Ok(cfg) => Some(cfg),
        Err(e) => {
            eprintln!(
                "Warning: failed to parse config file {}: {}",
                path.display(),
                e
            );
            None
        }
    }
}

// ── Merge logic ──────────────────────────────────────────────────────────────

impl AppConfig {
    /// Merge `other` on top of `self` — `other`'s `Some` values win.
    pub fn merge(self, other: &AppConfig) -> AppConfig {
        AppConfig {
            general: GeneralConfig {
                start_drive: other.general.start_drive.or(self.general.start_drive),
            },
            preview: PreviewConfig {
                enabled: other.preview.enabled.or(self.preview.enabled),
                max_bytes: other.preview.max_bytes.or(self.preview.max_bytes),
            },
            logging: LoggingConfig {
                enabled: other.logging.enabled.or(self.logging.enabled),
                level: other.logging.level.clone().or(self.logging.level),
            },
            theme: ThemeConfig {
                scheme: other.theme.scheme.clone().or(self.theme.scheme),
                custom: match (&self.theme.custom, &other.theme.custom) {
                    (_, Some(o)) => Some(o.clone()),
                    (Some(s), None) => Some(s.clone()),
                    (None, None) => None,
                },
            },
        }
    }

    /// Load the final merged configuration.
    ///
    /// `cli_config_path` is an explicit config file path from `--config`.
    /// `cli_overrides` are partial overrides derived from CLI flags.
    pub fn load(cli_config_path: Option<&Path>, cli_overrides: Option<&AppConfig>) -> AppConfig {
        // Start with built-in defaults (all None — the struct Default).
        let mut config = AppConfig::default();

        // Load from candidate files (lowest priority first so higher overwrites).
        let paths = candidate_paths();
        // Walk in reverse so that highest-priority (env var) overwrites lower.
        for path in paths.iter().rev() {
            if let Some(file_cfg) = load_file(path) {
                config = config.merge(&file_cfg);
            }
        }

        // Explicit --config file has higher priority than candidates.
        if let Some(cli_path) = cli_config_path {
            if let Some(file_cfg) = load_file(cli_path) {
                config = config.merge(&file_cfg);
            }
        }

        // CLI flag overrides are highest priority.
        if let Some(overrides) = cli_overrides {
            config = config.merge(overrides);
        }

        config
    }

    // ── Convenience getters with built-in defaults ──────────────────────────

    /// Drive index activated at startup.
    pub fn start_drive(&self) -> usize {
        self.general.start_drive.unwrap_or(0)
    }

    /// Whether the preview panel is enabled.
    pub fn preview_enabled(&self) -> bool {
        self.preview.enabled.unwrap_or(true)
    }

    /// Max file size in bytes an image fetch will read.
    pub fn max_preview_bytes(&self) -> u64 {
        self.preview.max_bytes.unwrap_or(DEFAULT_MAX_PREVIEW_BYTES)
    }

    /// Whether file logging is enabled.
    pub fn log_enabled(&self) -> bool {
        self.logging.enabled.unwrap_or(true)
    }

    /// Log level filter.
    pub fn log_level(&self) -> &str {
        self.logging.level.as_deref().unwrap_or("info")
    }

    /// Theme scheme: "dark", "light", or "custom".
    pub fn theme_scheme(&self) -> &str {
        self.theme.scheme.as_deref().unwrap_or("dark")
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────
