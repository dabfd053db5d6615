//! Pointer drag gesture for a single note.
//!
//! Converts raw pointer down/move/up events into window positions. The grab
//! offset (pointer position relative to the note's top-left corner) is
//! recorded once at pointer-down and stays constant for the whole gesture,
//! so the note follows the pointer without snapping its corner to it.

use super::types::Point;

/// Phase of the drag state machine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DragPhase {
    #[default]
    Idle,
    Dragging,
}

/// One note's drag gesture state.
#[derive(Debug, Clone, Copy, Default)]
pub struct DragGesture {
    phase: DragPhase,
    /// Pointer position relative to the note origin at gesture start.
    grab_offset: Point,
}

impl DragGesture {
    /// Pointer pressed at `pointer` (screen coordinates) while the note sits
    /// at `origin`. Starts a gesture; a second down mid-gesture re-grabs.
    pub fn begin(&mut self, pointer: Point, origin: Point) {
        self.phase = DragPhase::Dragging;
        self.grab_offset = Point::new(pointer.x - origin.x, pointer.y - origin.y);
    }

    /// Pointer moved to `pointer`. Returns the new note origin while a
    /// gesture is active; stray moves with no prior down return None.
    pub fn update(&self, pointer: Point) -> Option<Point> {
        match self.phase {
            DragPhase::Dragging => Some(Point::new(
                pointer.x - self.grab_offset.x,
                pointer.y - self.grab_offset.y,
            )),
            DragPhase::Idle => None,
        }
    }

    /// Pointer released. Ends the gesture; stray ups are harmless.
    pub fn finish(&mut self) {
        self.phase = DragPhase::Idle;
    }

    /// Abort the gesture (note closed mid-drag). Subsequent moves are
    /// discarded until the next pointer-down.
    pub fn cancel(&mut self) {
        *self = Self::default();
    }

    pub fn is_dragging(&self) -> bool {
        self.phase == DragPhase::Dragging
    }
}
