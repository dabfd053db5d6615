//! Note lifecycle commands.
//!
//! Thin IPC shell over the coordinator: every entry point locks the one
//! coordinator mutex, so events arriving from webviews, the hotkey thread,
//! the tray and the second-instance callback are serialized before they
//! touch core state.

use parking_lot::Mutex;
use tauri::{command, AppHandle, Emitter, Manager};

use crate::notes::types::{NoteInfo, Point};
use crate::notes::{CaptureDelegate, WindowCoordinator};
use crate::window;

/// Managed-state alias for the coordinator.
pub type Coordinator = Mutex<WindowCoordinator>;

/// Start (or refocus) a capture session. Shared by the hotkey handler, the
/// tray menu, the tray icon click and the single-instance callback.
pub fn trigger(app: &AppHandle) {
    // The hotkey or a second instance can fire before setup finishes.
    let Some(state) = app.try_state::<Coordinator>() else {
        log::warn!("[NOTE] trigger before coordinator is ready, ignoring");
        return;
    };
    let mut coordinator = state.lock();
    // The active monitor may have changed since startup.
    coordinator.set_screen_size(window::screen_size(app));
    coordinator.on_trigger();
}

/// Close every note (tray menu).
pub fn close_all(app: &AppHandle) {
    app.state::<Coordinator>().lock().close_all();
}

/// Release all native handles before process exit.
pub fn shutdown(app: &AppHandle) {
    if let Some(state) = app.try_state::<Coordinator>() {
        state.lock().shutdown();
    }
}

/// Route a session cancel from outside the IPC surface (window events).
pub fn cancel(app: &AppHandle) {
    if let Some(state) = app.try_state::<Coordinator>() {
        state.lock().on_capture_cancel();
    }
}

/// Route a close request from outside the IPC surface (window events).
pub fn request_close(app: &AppHandle, id: u64) {
    if let Some(state) = app.try_state::<Coordinator>() {
        state.lock().on_close_requested(id);
    }
}

// ============================================================================
// Tauri Commands
// ============================================================================

/// The capture input submitted its text. Returns the new note's id, or None
/// when nothing was pinned (blank input).
#[command]
pub fn submit_capture(app: AppHandle, text: String) -> Result<Option<u64>, String> {
    let result = app.state::<Coordinator>().lock().on_capture_submit(&text);
    match result {
        Ok(id) => Ok(id),
        Err(e) => {
            log::error!("[NOTE] failed to pin note: {}", e);
            // Surface the failure to the user; registry state is unchanged.
            let _ = app.emit("note-error", e.to_string());
            Err(e.to_string())
        }
    }
}

/// The capture input was dismissed.
#[command]
pub fn cancel_capture(app: AppHandle) {
    cancel(&app);
}

/// The close control of a note was clicked. Idempotent.
#[command]
pub fn close_note(app: AppHandle, id: u64) {
    request_close(&app, id);
}

/// Pointer pressed on a note, in physical screen coordinates.
#[command]
pub fn note_pointer_down(app: AppHandle, id: u64, x: i32, y: i32) {
    app.state::<Coordinator>()
        .lock()
        .pointer_down(id, Point::new(x, y));
}

/// Pointer moved during a drag.
#[command]
pub fn note_pointer_move(app: AppHandle, id: u64, x: i32, y: i32) {
    app.state::<Coordinator>()
        .lock()
        .pointer_move(id, Point::new(x, y));
}

/// Pointer released; the drag gesture ends.
#[command]
pub fn note_pointer_up(app: AppHandle, id: u64) {
    app.state::<Coordinator>().lock().pointer_up(id);
}

/// Snapshot of all live notes, in creation order.
#[command]
pub fn list_notes(app: AppHandle) -> Vec<NoteInfo> {
    app.state::<Coordinator>().lock().notes()
}
