//! Global hotkey registration.
//!
//! The chord string from the config stays opaque until it reaches this
//! module; parsing and OS registration happen here, through the
//! global-shortcut plugin. Only one chord is ever registered, so the plugin
//! handler does not need to match which shortcut fired.

use tauri::AppHandle;
use tauri_plugin_global_shortcut::{GlobalShortcutExt, Shortcut};

use crate::config::app::DEFAULT_HOTKEY;
use crate::error::{PinNoteError, PinNoteResult};

/// Replace the registered hotkey with `chord`.
pub fn register(app: &AppHandle, chord: &str) -> PinNoteResult<()> {
    let shortcut: Shortcut = chord
        .parse()
        .map_err(|e| PinNoteError::Hotkey(format!("invalid chord '{}': {}", chord, e)))?;

    app.global_shortcut()
        .unregister_all()
        .map_err(|e| PinNoteError::Hotkey(format!("failed to unregister: {}", e)))?;
    app.global_shortcut()
        .register(shortcut)
        .map_err(|e| PinNoteError::Hotkey(format!("failed to register '{}': {}", chord, e)))?;

    log::info!("[HOTKEY] registered {}", chord);
    Ok(())
}

/// Register `chord`, falling back to the default chord when it cannot be
/// parsed or registered (e.g. taken by another application). Registration
/// trouble never takes the app down; worst case the tray still works.
pub fn register_with_fallback(app: &AppHandle, chord: &str) {
    if let Err(e) = register(app, chord) {
        log::error!("[HOTKEY] {}", e);
        if chord != DEFAULT_HOTKEY {
            log::warn!("[HOTKEY] falling back to {}", DEFAULT_HOTKEY);
            if let Err(e) = register(app, DEFAULT_HOTKEY) {
                log::error!("[HOTKEY] fallback failed: {}", e);
            }
        }
    }
}
