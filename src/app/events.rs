//! Window event handlers.
//!
//! Routes window-manager events into the coordinator so no window
//! disappears behind the registry's back.

use tauri::{Manager, Window, WindowEvent};

use crate::commands;
use crate::window::{note_id_from_label, CAPTURE_INPUT_LABEL};

/// Handle window events for the application.
///
/// This is called from the Tauri builder's `on_window_event` hook.
pub fn handle_window_event(window: &Window, event: &WindowEvent) {
    if let WindowEvent::CloseRequested { api, .. } = event {
        let label = window.label();

        if label == CAPTURE_INPUT_LABEL {
            // The input window is pre-created and reused; closing it only
            // cancels the session.
            api.prevent_close();
            commands::note::cancel(window.app_handle());
        } else if let Some(id) = note_id_from_label(label) {
            // A window-manager close (e.g. Alt+F4) must go through the
            // registry like any other close, so no dangling entry remains.
            api.prevent_close();
            commands::note::request_close(window.app_handle(), id);
        }
    }
}
