//! Native-surface capability traits and the pinned note controller.
//!
//! The core never touches a toolkit directly: it drives the primitives
//! below, and `crate::window` implements them with Tauri webview windows.
//! Tests implement them with mocks.

use crate::error::PinNoteResult;

use super::drag::DragGesture;
use super::types::{NoteInfo, Point, Size};

/// Primitives of one native always-on-top window.
///
/// A handle is exclusively owned by the [`PinnedNote`] it backs; no other
/// component ever holds one.
pub trait SurfaceHandle: Send {
    fn show(&self) -> PinNoteResult<()>;
    fn set_position(&self, position: Point) -> PinNoteResult<()>;
    fn resize(&self, size: Size) -> PinNoteResult<()>;
    fn set_opacity(&self, opacity: f64) -> PinNoteResult<()>;
    fn set_topmost(&self, topmost: bool) -> PinNoteResult<()>;
    fn destroy(&self) -> PinNoteResult<()>;
}

/// Creates surface handles for new notes.
pub trait SurfaceFactory: Send {
    /// Create a hidden surface at `position` with the given content.
    fn create(
        &self,
        id: u64,
        text: &str,
        position: Point,
        size: Size,
    ) -> PinNoteResult<Box<dyn SurfaceHandle>>;
}

/// The text-input surface shown on a trigger.
///
/// The view calls exactly one of the coordinator's submit/cancel entry
/// points per showing (through the command layer) and is hidden by the
/// coordinator once the session resolves.
pub trait CaptureView: Send {
    fn show(&self) -> PinNoteResult<()>;
    fn focus(&self) -> PinNoteResult<()>;
    fn hide(&self) -> PinNoteResult<()>;
}

/// One floating note and the surface it owns.
///
/// Lives in the coordinator's registry from creation to close. Position is
/// only mutated by the drag gesture, through a setter that forwards the move
/// to the underlying handle.
pub struct PinnedNote {
    id: u64,
    text: String,
    position: Point,
    opacity: f64,
    /// Empties on close; a note without a handle ignores all events.
    handle: Option<Box<dyn SurfaceHandle>>,
    drag: DragGesture,
}

impl PinnedNote {
    /// Acquire a surface from `factory` and bring it on screen: topmost,
    /// configured opacity, sized to the text (the caller measured it against
    /// the minimum floor), shown.
    pub fn open(
        factory: &dyn SurfaceFactory,
        id: u64,
        text: String,
        position: Point,
        size: Size,
        opacity: f64,
    ) -> PinNoteResult<Self> {
        let handle = factory.create(id, &text, position, size)?;
        handle.set_topmost(true)?;
        handle.set_opacity(opacity)?;
        handle.resize(size)?;
        handle.show()?;

        Ok(Self {
            id,
            text,
            position,
            opacity,
            handle: Some(handle),
            drag: DragGesture::default(),
        })
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn opacity(&self) -> f64 {
        self.opacity
    }

    pub fn info(&self) -> NoteInfo {
        NoteInfo {
            id: self.id,
            text: self.text.clone(),
            x: self.position.x,
            y: self.position.y,
            opacity: self.opacity,
        }
    }

    /// Pointer pressed on the note at `pointer` (screen coordinates).
    pub fn pointer_down(&mut self, pointer: Point) {
        if self.handle.is_some() {
            self.drag.begin(pointer, self.position);
        }
    }

    /// Pointer moved. Applies the new position immediately while a gesture
    /// is active; ignored otherwise.
    pub fn pointer_move(&mut self, pointer: Point) {
        let Some(position) = self.drag.update(pointer) else {
            return;
        };
        self.set_position(position);
    }

    /// Pointer released; the current position stays.
    pub fn pointer_up(&mut self) {
        self.drag.finish();
    }

    /// Move the note, forwarding to the native surface. Only the drag
    /// gesture calls this after creation.
    fn set_position(&mut self, position: Point) {
        let Some(handle) = self.handle.as_ref() else {
            return;
        };
        if let Err(e) = handle.set_position(position) {
            log::warn!("[NOTE] move of note {} failed: {}", self.id, e);
            return;
        }
        self.position = position;
    }

    /// Destroy the surface. Safe to call more than once; a gesture in flight
    /// is aborted and later pointer events are discarded.
    pub fn close(&mut self) -> PinNoteResult<()> {
        self.drag.cancel();
        match self.handle.take() {
            Some(handle) => handle.destroy(),
            None => Ok(()),
        }
    }
}
