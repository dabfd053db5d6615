//! Window coordinator: registry of live notes and entry point for every
//! externally originated event.
//!
//! All state mutation funnels through one coordinator instance, which the
//! Tauri layer keeps behind a single mutex - the hotkey handler, IPC
//! commands, tray menu and window events all lock it before calling in, so
//! the core never runs concurrently with itself and an insert or remove is
//! atomic with respect to id lookup.

use crate::config::AppConfig;
use crate::error::PinNoteResult;

use super::placement::PositionAllocator;
use super::session::{CaptureOutcome, CaptureSession};
use super::surface::{CaptureView, PinnedNote, SurfaceFactory};
use super::types::{NoteInfo, Point, Size};

/// Interface the input-capture collaborator drives when its interaction
/// resolves. Implemented by [`WindowCoordinator`]; the command layer calls
/// through this trait so the contract stays testable in isolation.
pub trait CaptureDelegate {
    /// Text was submitted. Returns the new note's id, or None when the
    /// submit resolved to nothing (blank text, no active session).
    fn on_capture_submit(&mut self, text: &str) -> PinNoteResult<Option<u64>>;

    /// The input was dismissed without submitting.
    fn on_capture_cancel(&mut self);
}

/// Owns every live note and the at-most-one capture session.
pub struct WindowCoordinator {
    factory: Box<dyn SurfaceFactory>,
    capture_view: Box<dyn CaptureView>,
    allocator: PositionAllocator,
    /// Insertion order is creation order.
    notes: Vec<PinnedNote>,
    session: Option<CaptureSession>,
    next_id: u64,
    screen: Size,
    opacity: f64,
    font_size: u32,
}

impl WindowCoordinator {
    pub fn new(
        factory: Box<dyn SurfaceFactory>,
        capture_view: Box<dyn CaptureView>,
        config: &AppConfig,
        screen: Size,
    ) -> Self {
        let anchor = config.default_position.map(|a| Point::new(a.x, a.y));
        Self {
            factory,
            capture_view,
            allocator: PositionAllocator::new(anchor),
            notes: Vec::new(),
            session: None,
            next_id: 1,
            screen,
            opacity: config.window_opacity,
            font_size: config.font.size,
        }
    }

    /// A trigger fired (hotkey, tray, second instance). Starts a capture
    /// session, or refocuses the input surface when one is already open -
    /// re-triggering never stacks a second session.
    pub fn on_trigger(&mut self) {
        if self.session.is_some() {
            log::debug!("[COORD] trigger while capture open, refocusing input");
            if let Err(e) = self.capture_view.focus() {
                log::warn!("[COORD] failed to refocus capture input: {}", e);
            }
            return;
        }

        self.session = Some(CaptureSession::new());
        if let Err(e) = self.capture_view.show() {
            // Without an input surface the session can never resolve.
            log::error!("[COORD] failed to show capture input: {}", e);
            self.session = None;
        }
    }

    /// Close one note by id. Unknown ids are a silent no-op so a double
    /// click on the close control cannot fail the second request.
    pub fn on_close_requested(&mut self, id: u64) {
        let Some(index) = self.notes.iter().position(|n| n.id() == id) else {
            log::debug!("[COORD] close requested for unknown note {}", id);
            return;
        };

        // Remove and destroy in one step so no lookup can observe a
        // registered note without a live handle.
        let mut note = self.notes.remove(index);
        if let Err(e) = note.close() {
            log::warn!("[COORD] destroying note {} failed: {}", id, e);
        }
        log::info!("[COORD] closed note {} ({} remaining)", id, self.notes.len());
    }

    /// Destroy every note, in creation order.
    pub fn close_all(&mut self) {
        for mut note in self.notes.drain(..) {
            if let Err(e) = note.close() {
                log::warn!("[COORD] destroying note {} failed: {}", note.id(), e);
            }
        }
    }

    /// Release everything before process exit: an open session is an
    /// implicit cancel (no callbacks), then each surface is destroyed
    /// best-effort in registry order.
    pub fn shutdown(&mut self) {
        if self.session.take().is_some() {
            let _ = self.capture_view.hide();
        }
        let count = self.notes.len();
        self.close_all();
        log::info!("[COORD] shutdown released {} note(s)", count);
    }

    // ------------------------------------------------------------------
    // Pointer routing
    // ------------------------------------------------------------------

    pub fn pointer_down(&mut self, id: u64, pointer: Point) {
        if let Some(note) = self.note_mut(id) {
            note.pointer_down(pointer);
        }
    }

    pub fn pointer_move(&mut self, id: u64, pointer: Point) {
        if let Some(note) = self.note_mut(id) {
            note.pointer_move(pointer);
        }
    }

    pub fn pointer_up(&mut self, id: u64) {
        if let Some(note) = self.note_mut(id) {
            note.pointer_up();
        }
    }

    // ------------------------------------------------------------------
    // Configuration
    // ------------------------------------------------------------------

    /// Refresh defaults after a config change. Applies to notes created from
    /// now on; existing notes keep their appearance.
    pub fn apply_config(&mut self, config: &AppConfig) {
        self.opacity = config.window_opacity;
        self.font_size = config.font.size;
        self.allocator
            .set_anchor(config.default_position.map(|a| Point::new(a.x, a.y)));
    }

    /// Update the cached screen size (queried from the active monitor before
    /// placement-relevant operations).
    pub fn set_screen_size(&mut self, screen: Size) {
        self.screen = screen;
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    pub fn note_count(&self) -> usize {
        self.notes.len()
    }

    pub fn has_active_session(&self) -> bool {
        self.session.is_some()
    }

    pub fn note(&self, id: u64) -> Option<&PinnedNote> {
        self.notes.iter().find(|n| n.id() == id)
    }

    pub fn notes(&self) -> Vec<NoteInfo> {
        self.notes.iter().map(|n| n.info()).collect()
    }

    fn note_mut(&mut self, id: u64) -> Option<&mut PinnedNote> {
        self.notes.iter_mut().find(|n| n.id() == id)
    }

    // ------------------------------------------------------------------
    // Note creation
    // ------------------------------------------------------------------

    fn pin_note(&mut self, text: String) -> PinNoteResult<u64> {
        let size = super::types::content_size(&text, self.font_size);

        // The allocator advances as it hands out slots; snapshot it so a
        // failed surface creation leaves no hole in the stack.
        let allocator_before = self.allocator.clone();
        let position = self.allocator.next_position(self.screen, size);

        let id = self.next_id;
        let note = match PinnedNote::open(
            self.factory.as_ref(),
            id,
            text,
            position,
            size,
            self.opacity,
        ) {
            Ok(note) => note,
            Err(e) => {
                self.allocator = allocator_before;
                return Err(e);
            }
        };

        self.next_id += 1;
        self.notes.push(note);
        log::info!("[COORD] pinned note {} at {:?}", id, position);
        Ok(id)
    }
}

impl CaptureDelegate for WindowCoordinator {
    fn on_capture_submit(&mut self, text: &str) -> PinNoteResult<Option<u64>> {
        let Some(mut session) = self.session.take() else {
            log::debug!("[COORD] submit with no active capture session");
            return Ok(None);
        };

        if let Err(e) = self.capture_view.hide() {
            log::warn!("[COORD] failed to hide capture input: {}", e);
        }

        match session.submit(text) {
            Some(CaptureOutcome::Submitted(text)) => self.pin_note(text).map(Some),
            // Blank input: resolved, nothing to pin.
            Some(CaptureOutcome::Cancelled) | None => Ok(None),
        }
    }

    fn on_capture_cancel(&mut self) {
        if self.session.take().is_none() {
            log::debug!("[COORD] cancel with no active capture session");
            return;
        }
        if let Err(e) = self.capture_view.hide() {
            log::warn!("[COORD] failed to hide capture input: {}", e);
        }
    }
}
