//! Application-level configuration.
//!
//! Contains the user preferences for note appearance and activation:
//! - Global hotkey chord (opaque string, parsed only at registration time)
//! - Note opacity and font
//! - Optional fixed anchor for the placement stack
//!
//! The config lives as JSON in the OS config directory and is cached in a
//! `parking_lot::RwLock` global for lock-cheap reads from event handlers.

use std::fs;
use std::path::PathBuf;

use lazy_static::lazy_static;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{PinNoteError, PinNoteResult};

/// Fallback hotkey chord, also used when a configured chord fails to register.
pub const DEFAULT_HOTKEY: &str = "ctrl+shift+t";

/// Default note opacity.
pub const DEFAULT_OPACITY: f64 = 0.9;

lazy_static! {
    /// Global app configuration.
    pub static ref APP_CONFIG: RwLock<AppConfig> = RwLock::new(AppConfig::default());
}

/// A configured screen coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../ui/types/generated/")]
pub struct AnchorConfig {
    pub x: i32,
    pub y: i32,
}

/// Font passed through to the note surfaces. The core only reads `size`
/// (for content measurement); `family` goes verbatim to the webview.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../ui/types/generated/")]
pub struct FontConfig {
    pub family: String,
    pub size: u32,
}

impl Default for FontConfig {
    fn default() -> Self {
        Self {
            family: "Segoe UI".to_string(),
            size: 14,
        }
    }
}

/// Application-wide user preferences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase", default)]
#[ts(export, export_to = "../ui/types/generated/")]
pub struct AppConfig {
    /// Global hotkey that opens the text input.
    pub hotkey: String,
    /// Note window opacity in (0, 1].
    pub window_opacity: f64,
    /// Fixed anchor for the first note. Unset means the top-right corner
    /// of the screen, inset by the stack margin.
    pub default_position: Option<AnchorConfig>,
    /// Note font, passed through to the note surface.
    pub font: FontConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            hotkey: DEFAULT_HOTKEY.to_string(),
            window_opacity: DEFAULT_OPACITY,
            default_position: None,
            font: FontConfig::default(),
        }
    }
}

impl AppConfig {
    /// Clamp out-of-range values back to sane defaults.
    ///
    /// Opacity must stay in (0, 1]; a zero font size would collapse content
    /// measurement. Called on every load so a hand-edited file cannot push
    /// invalid values into the core.
    pub fn sanitize(mut self) -> Self {
        if !(self.window_opacity > 0.0 && self.window_opacity <= 1.0) {
            log::warn!(
                "[CONFIG] window_opacity {} out of range, using {}",
                self.window_opacity,
                DEFAULT_OPACITY
            );
            self.window_opacity = DEFAULT_OPACITY;
        }
        if self.font.size == 0 {
            let fallback = FontConfig::default().size;
            log::warn!("[CONFIG] font size 0 is invalid, using {}", fallback);
            self.font.size = fallback;
        }
        if self.hotkey.trim().is_empty() {
            log::warn!("[CONFIG] empty hotkey, using {}", DEFAULT_HOTKEY);
            self.hotkey = DEFAULT_HOTKEY.to_string();
        }
        self
    }
}

/// Path of the persisted config file.
pub fn config_path() -> PinNoteResult<PathBuf> {
    let dir = dirs::config_dir()
        .ok_or_else(|| PinNoteError::Other("no config directory on this platform".to_string()))?;
    Ok(dir.join("PinNote").join("config.json"))
}

/// Load the config file into the global cache, creating it with defaults if
/// it does not exist. A malformed file falls back to defaults with a warning
/// instead of failing startup.
pub fn load() -> PinNoteResult<AppConfig> {
    let path = config_path()?;
    let config = if path.exists() {
        match fs::read_to_string(&path) {
            Ok(raw) => match serde_json::from_str::<AppConfig>(&raw) {
                Ok(parsed) => parsed.sanitize(),
                Err(e) => {
                    log::warn!("[CONFIG] failed to parse {:?}: {}, using defaults", path, e);
                    AppConfig::default()
                }
            },
            Err(e) => {
                log::warn!("[CONFIG] failed to read {:?}: {}, using defaults", path, e);
                AppConfig::default()
            }
        }
    } else {
        let defaults = AppConfig::default();
        save(&defaults)?;
        defaults
    };

    *APP_CONFIG.write() = config.clone();
    Ok(config)
}

/// Persist a config to disk and refresh the global cache.
pub fn save(config: &AppConfig) -> PinNoteResult<()> {
    let path = config_path()?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&path, serde_json::to_string_pretty(config)?)?;
    *APP_CONFIG.write() = config.clone();
    Ok(())
}

/// Snapshot the current configuration.
pub fn current() -> AppConfig {
    APP_CONFIG.read().clone()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.hotkey, "ctrl+shift+t");
        assert_eq!(config.window_opacity, 0.9);
        assert!(config.default_position.is_none());
        assert_eq!(config.font.size, 14);
    }

    #[test]
    fn test_sanitize_opacity() {
        let mut config = AppConfig::default();
        config.window_opacity = 0.0;
        assert_eq!(config.sanitize().window_opacity, DEFAULT_OPACITY);

        let mut config = AppConfig::default();
        config.window_opacity = 1.5;
        assert_eq!(config.sanitize().window_opacity, DEFAULT_OPACITY);

        let mut config = AppConfig::default();
        config.window_opacity = 0.4;
        assert_eq!(config.sanitize().window_opacity, 0.4);
    }

    #[test]
    fn test_sanitize_font_and_hotkey() {
        let mut config = AppConfig::default();
        config.font.size = 0;
        config.hotkey = "  ".to_string();
        let fixed = config.sanitize();
        assert_eq!(fixed.font.size, FontConfig::default().size);
        assert_eq!(fixed.hotkey, DEFAULT_HOTKEY);
    }

    #[test]
    fn test_roundtrip_json() {
        let mut config = AppConfig::default();
        config.default_position = Some(AnchorConfig { x: 40, y: 60 });
        config.window_opacity = 0.75;

        let json = serde_json::to_string(&config).unwrap();
        let parsed: AppConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        // A file written by an older version may miss newer keys.
        let parsed: AppConfig = serde_json::from_str(r#"{"hotkey":"alt+n"}"#).unwrap();
        assert_eq!(parsed.hotkey, "alt+n");
        assert_eq!(parsed.window_opacity, DEFAULT_OPACITY);
        assert_eq!(parsed.font, FontConfig::default());
    }
}
