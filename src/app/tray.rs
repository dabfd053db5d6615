//! System tray setup and event handling.
//!
//! PinNote has no main window; the tray is the app's home. The menu covers
//! the whole lifecycle: new note, close-all, logs, quit.

use std::sync::Mutex;

use tauri::{
    image::Image,
    menu::{Menu, MenuItem, PredefinedMenuItem},
    tray::TrayIconBuilder,
    App, Manager,
};

use crate::commands;
use crate::config;

/// Holds references to tray menu items for dynamic updates.
pub struct TrayState {
    pub new_note: MenuItem<tauri::Wry>,
}

impl TrayState {
    /// Update the "New Note" menu item text (shows the current hotkey).
    pub fn update_new_note_text(&self, text: &str) -> Result<(), tauri::Error> {
        self.new_note.set_text(text)
    }
}

/// Set up the system tray with menu and event handlers.
///
/// Returns a `TrayState` that should be managed by the app for dynamic updates.
pub fn setup_system_tray(app: &App) -> Result<TrayState, Box<dyn std::error::Error>> {
    let hotkey = config::app::current().hotkey;
    let new_note = MenuItem::with_id(
        app,
        "new_note",
        format!("New Note ({})", hotkey),
        true,
        None::<&str>,
    )?;
    let close_all = MenuItem::with_id(app, "close_all", "Close All Notes", true, None::<&str>)?;
    let open_logs = MenuItem::with_id(app, "open_logs", "Open Logs", true, None::<&str>)?;
    let quit = MenuItem::with_id(app, "quit", "Quit PinNote", true, None::<&str>)?;
    let separator = PredefinedMenuItem::separator(app)?;

    let menu = Menu::with_items(
        app,
        &[&new_note, &close_all, &separator, &open_logs, &separator, &quit],
    )?;

    // Load custom tray icon (32x32 is standard for system tray)
    let tray_icon =
        Image::from_bytes(include_bytes!("../../icons/32x32.png")).expect("Failed to load tray icon");

    let _tray = TrayIconBuilder::new()
        .icon(tray_icon)
        .menu(&menu)
        .show_menu_on_left_click(false)
        .on_menu_event(move |app, event| match event.id.as_ref() {
            "new_note" => commands::note::trigger(app),
            "close_all" => commands::note::close_all(app),
            "open_logs" => {
                if let Err(e) = commands::logging::open_log_dir_inner(app) {
                    log::error!("[TRAY] failed to open log directory: {}", e);
                }
            },
            "quit" => {
                // Release every native handle before the process goes away.
                commands::note::shutdown(app);
                app.exit(0);
            },
            _ => {},
        })
        .on_tray_icon_event(|tray, event| {
            if let tauri::tray::TrayIconEvent::Click {
                button: tauri::tray::MouseButton::Left,
                button_state: tauri::tray::MouseButtonState::Up,
                ..
            } = event
            {
                // Left-click starts a new note
                commands::note::trigger(tray.app_handle());
            }
        })
        .build(app)?;

    Ok(TrayState { new_note })
}

/// Initialize the system tray and register it with the app state.
///
/// This is called from the app setup hook.
pub fn init(app: &App) -> Result<(), Box<dyn std::error::Error>> {
    let tray_state = setup_system_tray(app)?;
    app.manage(Mutex::new(tray_state));
    Ok(())
}
