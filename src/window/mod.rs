//! Tauri realization of the note surface primitives.
//!
//! Notes and the capture input are frameless, transparent, always-on-top
//! webview windows. Everything position- or size-related uses physical
//! (pixel) coordinates: pointer events arrive in physical pixels from the
//! note pages, and Tauri's logical coordinates would not match on scaled
//! displays.

use tauri::{AppHandle, Emitter, Manager, WebviewUrl, WebviewWindow, WebviewWindowBuilder};

use crate::config;
use crate::error::{PinNoteError, PinNoteResult};
use crate::notes::surface::{CaptureView, SurfaceFactory, SurfaceHandle};
use crate::notes::types::{Point, Size};

/// Capture input window label.
pub const CAPTURE_INPUT_LABEL: &str = "capture-input";

/// Capture input window size in pixels.
const CAPTURE_INPUT_WIDTH: u32 = 420;
const CAPTURE_INPUT_HEIGHT: u32 = 150;

/// Label of the note window with the given id.
pub fn note_label(id: u64) -> String {
    format!("note-{}", id)
}

/// Parse a note id back out of a window label.
pub fn note_id_from_label(label: &str) -> Option<u64> {
    label.strip_prefix("note-")?.parse().ok()
}

/// Position a window using physical (pixel) coordinates.
fn set_physical_position(window: &WebviewWindow, position: Point) -> PinNoteResult<()> {
    window
        .set_position(tauri::Position::Physical(tauri::PhysicalPosition {
            x: position.x,
            y: position.y,
        }))
        .map_err(|e| PinNoteError::Window(format!("failed to set position: {}", e)))
}

/// Resize a window using physical (pixel) dimensions.
fn set_physical_size(window: &WebviewWindow, size: Size) -> PinNoteResult<()> {
    window
        .set_size(tauri::Size::Physical(tauri::PhysicalSize {
            width: size.width,
            height: size.height,
        }))
        .map_err(|e| PinNoteError::Window(format!("failed to set size: {}", e)))
}

/// Physical size of the primary monitor. Falls back to a common desktop
/// size when no monitor is reported (headless session, early startup).
pub fn screen_size(app: &AppHandle) -> Size {
    match app.primary_monitor() {
        Ok(Some(monitor)) => {
            let size = monitor.size();
            Size::new(size.width, size.height)
        }
        Ok(None) => {
            log::warn!("[WINDOW] no primary monitor reported, assuming 1920x1080");
            Size::new(1920, 1080)
        }
        Err(e) => {
            log::warn!("[WINDOW] monitor query failed ({}), assuming 1920x1080", e);
            Size::new(1920, 1080)
        }
    }
}

// ============================================================================
// Note surfaces
// ============================================================================

/// One note's native window.
pub struct NoteSurface {
    window: WebviewWindow,
}

impl SurfaceHandle for NoteSurface {
    fn show(&self) -> PinNoteResult<()> {
        self.window
            .show()
            .map_err(|e| PinNoteError::Window(format!("failed to show note: {}", e)))
    }

    fn set_position(&self, position: Point) -> PinNoteResult<()> {
        set_physical_position(&self.window, position)
    }

    fn resize(&self, size: Size) -> PinNoteResult<()> {
        set_physical_size(&self.window, size)
    }

    fn set_opacity(&self, opacity: f64) -> PinNoteResult<()> {
        // No cross-platform window alpha in Tauri; the note page applies
        // the value as CSS opacity. Creation passes it in the URL as well,
        // so a not-yet-loaded page cannot miss the event.
        self.window
            .emit_to(self.window.label(), "note-opacity", opacity)
            .map_err(|e| PinNoteError::Window(format!("failed to set opacity: {}", e)))
    }

    fn set_topmost(&self, topmost: bool) -> PinNoteResult<()> {
        self.window
            .set_always_on_top(topmost)
            .map_err(|e| PinNoteError::Window(format!("failed to set topmost: {}", e)))
    }

    fn destroy(&self) -> PinNoteResult<()> {
        self.window
            .destroy()
            .map_err(|e| PinNoteError::Window(format!("failed to destroy note: {}", e)))
    }
}

/// Creates note windows on demand.
pub struct NoteSurfaceFactory {
    app: AppHandle,
}

impl NoteSurfaceFactory {
    pub fn new(app: AppHandle) -> Self {
        Self { app }
    }
}

impl SurfaceFactory for NoteSurfaceFactory {
    fn create(
        &self,
        id: u64,
        text: &str,
        position: Point,
        size: Size,
    ) -> PinNoteResult<Box<dyn SurfaceHandle>> {
        let config = config::app::current();
        let url = WebviewUrl::App(
            format!(
                "note.html?id={}&text={}&family={}&size={}&opacity={}",
                id,
                urlencoding::encode(text),
                urlencoding::encode(&config.font.family),
                config.font.size,
                config.window_opacity,
            )
            .into(),
        );

        let window = WebviewWindowBuilder::new(&self.app, note_label(id), url)
            .title("PinNote")
            .inner_size(size.width as f64, size.height as f64)
            .transparent(true)
            .decorations(false)
            .always_on_top(true)
            .skip_taskbar(true)
            .resizable(false)
            .shadow(false)
            .visible(false) // Start hidden, position first
            .focused(false) // Don't steal focus from user's work
            .build()
            .map_err(|e| PinNoteError::SurfaceCreation(e.to_string()))?;

        let surface = NoteSurface { window };
        surface.set_position(position)?;
        surface.resize(size)?;
        Ok(Box::new(surface))
    }
}

// ============================================================================
// Capture input
// ============================================================================

/// The pre-created text input window.
///
/// Created hidden at startup so the hotkey -> input latency stays low, then
/// shown and hidden per capture session. It also keeps one live window
/// around for the whole tray lifetime of the app.
pub struct CaptureInputWindow {
    app: AppHandle,
}

impl CaptureInputWindow {
    pub fn new(app: AppHandle) -> Self {
        Self { app }
    }

    /// Create the hidden input window unless it already exists.
    pub fn ensure_created(app: &AppHandle) -> PinNoteResult<()> {
        if app.get_webview_window(CAPTURE_INPUT_LABEL).is_some() {
            return Ok(());
        }

        WebviewWindowBuilder::new(
            app,
            CAPTURE_INPUT_LABEL,
            WebviewUrl::App("capture.html".into()),
        )
        .title("New Note")
        .inner_size(CAPTURE_INPUT_WIDTH as f64, CAPTURE_INPUT_HEIGHT as f64)
        .center()
        .transparent(true)
        .decorations(false)
        .always_on_top(true)
        .skip_taskbar(true)
        .resizable(false)
        .visible(false)
        .build()
        .map_err(|e| PinNoteError::SurfaceCreation(e.to_string()))?;

        Ok(())
    }

    fn window(&self) -> PinNoteResult<WebviewWindow> {
        self.app
            .get_webview_window(CAPTURE_INPUT_LABEL)
            .ok_or_else(|| PinNoteError::Window("capture input window missing".to_string()))
    }
}

impl CaptureView for CaptureInputWindow {
    fn show(&self) -> PinNoteResult<()> {
        let window = self.window()?;
        // Clear any text left over from the previous session.
        let _ = window.emit_to(CAPTURE_INPUT_LABEL, "capture-reset", ());
        window.center()?;
        window.show()?;
        window.set_focus()?;
        Ok(())
    }

    fn focus(&self) -> PinNoteResult<()> {
        let window = self.window()?;
        window.show()?;
        window.set_focus()?;
        Ok(())
    }

    fn hide(&self) -> PinNoteResult<()> {
        self.window()?.hide()?;
        Ok(())
    }
}
