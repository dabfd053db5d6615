use parking_lot::Mutex;
use tauri::Manager;

#[cfg(desktop)]
use tauri_plugin_autostart::MacosLauncher;

mod app;
mod commands;
mod config;
mod error;
mod notes;
mod window;

use notes::WindowCoordinator;

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    let mut builder = tauri::Builder::default()
        .plugin(tauri_plugin_single_instance::init(|app, _args, _cwd| {
            // A second launch asks the running instance for a new note.
            commands::note::trigger(app);
        }))
        .plugin(tauri_plugin_opener::init());

    #[cfg(desktop)]
    {
        use tauri_plugin_global_shortcut::ShortcutState;

        builder = builder
            .plugin(
                tauri_plugin_global_shortcut::Builder::new()
                    .with_handler(|app, _shortcut, event| {
                        // Only one chord is ever registered; fire on press,
                        // not release.
                        if event.state == ShortcutState::Pressed {
                            commands::note::trigger(app);
                        }
                    })
                    .build(),
            )
            .plugin(tauri_plugin_autostart::init(
                MacosLauncher::LaunchAgent,
                Some(vec!["--minimized"]),
            ));
    }

    builder
        .on_window_event(app::events::handle_window_event)
        .invoke_handler(tauri::generate_handler![
            // Note lifecycle
            commands::note::submit_capture,
            commands::note::cancel_capture,
            commands::note::close_note,
            commands::note::note_pointer_down,
            commands::note::note_pointer_move,
            commands::note::note_pointer_up,
            commands::note::list_notes,
            // Settings
            commands::settings::get_app_config,
            commands::settings::set_app_config,
            commands::settings::set_autostart,
            commands::settings::is_autostart_enabled,
            commands::settings::open_config_dir,
            // Logging bridge
            commands::logging::write_log,
            commands::logging::get_log_dir,
            commands::logging::open_log_dir,
        ])
        .setup(|app| {
            if let Err(e) = commands::logging::init_logging(app.handle()) {
                log::warn!("[APP] file logging unavailable: {}", e);
            }

            let config = config::app::load().unwrap_or_else(|e| {
                log::warn!("[APP] config unavailable ({}), using defaults", e);
                config::AppConfig::default()
            });

            // Pre-create the input window so the hotkey shows it instantly.
            window::CaptureInputWindow::ensure_created(app.handle())?;

            let coordinator = WindowCoordinator::new(
                Box::new(window::NoteSurfaceFactory::new(app.handle().clone())),
                Box::new(window::CaptureInputWindow::new(app.handle().clone())),
                &config,
                window::screen_size(app.handle()),
            );
            app.manage(Mutex::new(coordinator));

            #[cfg(desktop)]
            {
                app::tray::init(app)?;
                app::hotkey::register_with_fallback(app.handle(), &config.hotkey);
            }

            Ok(())
        })
        .build(tauri::generate_context!())
        .expect("error while building tauri application")
        .run(|app, event| match event {
            // Tray app: closing the last note must not exit the process.
            tauri::RunEvent::ExitRequested {
                code: None, api, ..
            } => api.prevent_exit(),
            // Release every native handle before the process terminates.
            tauri::RunEvent::Exit => commands::note::shutdown(app),
            _ => {},
        });
}
