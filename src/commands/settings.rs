//! Settings commands: configuration sync, hotkey re-registration, autostart.

use tauri::{command, AppHandle, Manager};

use crate::config::{self, AppConfig};

use super::note::Coordinator;

/// Get the current app configuration.
#[command]
pub fn get_app_config() -> AppConfig {
    config::app::current()
}

/// Persist a new configuration and apply its side effects: the hotkey is
/// re-registered, the coordinator picks up the new defaults, and the tray
/// label refreshes.
#[command]
pub fn set_app_config(app: AppHandle, config: AppConfig) -> Result<(), String> {
    log::debug!("[SETTINGS] set_app_config({:?})", config);
    let config = config.sanitize();
    config::app::save(&config).map_err(|e| e.to_string())?;

    #[cfg(desktop)]
    {
        crate::app::hotkey::register_with_fallback(&app, &config.hotkey);
        if let Some(tray) = app.try_state::<std::sync::Mutex<crate::app::TrayState>>() {
            if let Ok(tray) = tray.lock() {
                let _ = tray.update_new_note_text(&format!("New Note ({})", config.hotkey));
            }
        }
    }

    app.state::<Coordinator>().lock().apply_config(&config);
    Ok(())
}

/// Set autostart enabled/disabled.
#[command]
pub async fn set_autostart(app: AppHandle, enabled: bool) -> Result<(), String> {
    #[cfg(desktop)]
    {
        use tauri_plugin_autostart::ManagerExt;

        let autostart_manager = app.autolaunch();

        if enabled {
            autostart_manager
                .enable()
                .map_err(|e| format!("Failed to enable autostart: {}", e))?;
        } else {
            autostart_manager
                .disable()
                .map_err(|e| format!("Failed to disable autostart: {}", e))?;
        }
    }

    Ok(())
}

/// Check if autostart is enabled.
#[command]
pub async fn is_autostart_enabled(app: AppHandle) -> Result<bool, String> {
    #[cfg(desktop)]
    {
        use tauri_plugin_autostart::ManagerExt;

        let autostart_manager = app.autolaunch();
        autostart_manager
            .is_enabled()
            .map_err(|e| format!("Failed to check autostart status: {}", e))
    }

    #[cfg(not(desktop))]
    Ok(false)
}

/// Open the folder holding the config file in the system file manager.
#[command]
pub async fn open_config_dir() -> Result<(), String> {
    let path = config::app::config_path().map_err(|e| e.to_string())?;
    let dir = path
        .parent()
        .ok_or_else(|| "config path has no parent".to_string())?
        .to_path_buf();

    #[cfg(target_os = "windows")]
    {
        std::process::Command::new("explorer")
            .arg(&dir)
            .spawn()
            .map_err(|e| format!("Failed to open explorer: {}", e))?;
    }

    #[cfg(target_os = "macos")]
    {
        std::process::Command::new("open")
            .arg(&dir)
            .spawn()
            .map_err(|e| format!("Failed to open Finder: {}", e))?;
    }

    #[cfg(target_os = "linux")]
    {
        std::process::Command::new("xdg-open")
            .arg(&dir)
            .spawn()
            .map_err(|e| format!("Failed to open file manager: {}", e))?;
    }

    Ok(())
}
