//! Unit tests for the note lifecycle core.
//!
//! The coordinator is driven end to end against mock surfaces; every
//! externally observable effect (creation, show, move, destroy, opacity)
//! is recorded in a shared log the assertions read back.

use std::sync::{Arc, Mutex};

use crate::config::AppConfig;
use crate::error::{PinNoteError, PinNoteResult};

use super::coordinator::{CaptureDelegate, WindowCoordinator};
use super::surface::{CaptureView, SurfaceFactory, SurfaceHandle};
use super::types::{Point, Size, MIN_NOTE_HEIGHT, MIN_NOTE_WIDTH, STACK_GAP, STACK_MARGIN};

const SCREEN: Size = Size {
    width: 1920,
    height: 1080,
};

// ============================================================================
// Mocks
// ============================================================================

#[derive(Default)]
struct SurfaceLog {
    created: Vec<u64>,
    shown: Vec<u64>,
    destroyed: Vec<u64>,
    moves: Vec<(u64, Point)>,
    opacities: Vec<(u64, f64)>,
    topmost: Vec<(u64, bool)>,
    /// Number of upcoming create calls that should fail.
    fail_creates: u32,
}

struct MockSurface {
    id: u64,
    log: Arc<Mutex<SurfaceLog>>,
}

impl SurfaceHandle for MockSurface {
    fn show(&self) -> PinNoteResult<()> {
        self.log.lock().unwrap().shown.push(self.id);
        Ok(())
    }

    fn set_position(&self, position: Point) -> PinNoteResult<()> {
        self.log.lock().unwrap().moves.push((self.id, position));
        Ok(())
    }

    fn resize(&self, _size: Size) -> PinNoteResult<()> {
        Ok(())
    }

    fn set_opacity(&self, opacity: f64) -> PinNoteResult<()> {
        self.log.lock().unwrap().opacities.push((self.id, opacity));
        Ok(())
    }

    fn set_topmost(&self, topmost: bool) -> PinNoteResult<()> {
        self.log.lock().unwrap().topmost.push((self.id, topmost));
        Ok(())
    }

    fn destroy(&self) -> PinNoteResult<()> {
        self.log.lock().unwrap().destroyed.push(self.id);
        Ok(())
    }
}

struct MockFactory {
    log: Arc<Mutex<SurfaceLog>>,
}

impl SurfaceFactory for MockFactory {
    fn create(
        &self,
        id: u64,
        _text: &str,
        _position: Point,
        _size: Size,
    ) -> PinNoteResult<Box<dyn SurfaceHandle>> {
        let mut log = self.log.lock().unwrap();
        if log.fail_creates > 0 {
            log.fail_creates -= 1;
            return Err(PinNoteError::SurfaceCreation("no handles left".to_string()));
        }
        log.created.push(id);
        Ok(Box::new(MockSurface {
            id,
            log: self.log.clone(),
        }))
    }
}

#[derive(Default)]
struct ViewLog {
    shows: u32,
    focuses: u32,
    hides: u32,
}

struct MockView {
    log: Arc<Mutex<ViewLog>>,
}

impl CaptureView for MockView {
    fn show(&self) -> PinNoteResult<()> {
        self.log.lock().unwrap().shows += 1;
        Ok(())
    }

    fn focus(&self) -> PinNoteResult<()> {
        self.log.lock().unwrap().focuses += 1;
        Ok(())
    }

    fn hide(&self) -> PinNoteResult<()> {
        self.log.lock().unwrap().hides += 1;
        Ok(())
    }
}

fn harness() -> (WindowCoordinator, Arc<Mutex<SurfaceLog>>, Arc<Mutex<ViewLog>>) {
    let surface_log = Arc::new(Mutex::new(SurfaceLog::default()));
    let view_log = Arc::new(Mutex::new(ViewLog::default()));
    let coordinator = WindowCoordinator::new(
        Box::new(MockFactory {
            log: surface_log.clone(),
        }),
        Box::new(MockView {
            log: view_log.clone(),
        }),
        &AppConfig::default(),
        SCREEN,
    );
    (coordinator, surface_log, view_log)
}

/// Drive one full trigger -> submit cycle, returning the new note id.
fn pin(coordinator: &mut WindowCoordinator, text: &str) -> Option<u64> {
    coordinator.on_trigger();
    coordinator.on_capture_submit(text).unwrap()
}

fn first_slot() -> Point {
    Point::new(
        SCREEN.width as i32 - MIN_NOTE_WIDTH as i32 - STACK_MARGIN,
        STACK_MARGIN,
    )
}

// ============================================================================
// Capture session
// ============================================================================

mod session_tests {
    use super::*;

    #[test]
    fn repeated_triggers_share_one_session() {
        let (mut coordinator, _, view_log) = harness();

        for _ in 0..5 {
            coordinator.on_trigger();
        }

        assert!(coordinator.has_active_session());
        let view = view_log.lock().unwrap();
        // The input shows once; later triggers only refocus it.
        assert_eq!(view.shows, 1);
        assert_eq!(view.focuses, 4);
    }

    #[test]
    fn cancel_discards_session_without_side_effects() {
        let (mut coordinator, surface_log, view_log) = harness();

        coordinator.on_trigger();
        coordinator.on_capture_cancel();

        assert!(!coordinator.has_active_session());
        assert_eq!(coordinator.note_count(), 0);
        assert!(surface_log.lock().unwrap().created.is_empty());
        assert_eq!(view_log.lock().unwrap().hides, 1);
    }

    #[test]
    fn submit_without_session_is_a_noop() {
        let (mut coordinator, surface_log, _) = harness();

        assert_eq!(coordinator.on_capture_submit("orphan").unwrap(), None);
        assert_eq!(coordinator.note_count(), 0);
        assert!(surface_log.lock().unwrap().created.is_empty());
    }

    #[test]
    fn cancel_without_session_is_a_noop() {
        let (mut coordinator, _, view_log) = harness();
        coordinator.on_capture_cancel();
        assert_eq!(view_log.lock().unwrap().hides, 0);
    }

    #[test]
    fn session_reopens_after_resolution() {
        let (mut coordinator, _, view_log) = harness();

        coordinator.on_trigger();
        coordinator.on_capture_cancel();
        coordinator.on_trigger();

        assert!(coordinator.has_active_session());
        assert_eq!(view_log.lock().unwrap().shows, 2);
    }
}

// ============================================================================
// Note creation
// ============================================================================

mod creation_tests {
    use super::*;

    #[test]
    fn blank_submit_never_registers() {
        let (mut coordinator, surface_log, _) = harness();

        assert_eq!(pin(&mut coordinator, ""), None);
        assert_eq!(pin(&mut coordinator, "   \t  "), None);

        assert_eq!(coordinator.note_count(), 0);
        assert!(surface_log.lock().unwrap().created.is_empty());
    }

    #[test]
    fn buy_milk_scenario() {
        let (mut coordinator, surface_log, view_log) = harness();

        let id = pin(&mut coordinator, "Buy milk").unwrap();

        assert_eq!(coordinator.note_count(), 1);
        let note = coordinator.note(id).unwrap();
        assert_eq!(note.text(), "Buy milk");
        assert_eq!(note.opacity(), 0.9);
        assert_eq!(note.position(), first_slot());

        let log = surface_log.lock().unwrap();
        assert_eq!(log.created, vec![id]);
        assert_eq!(log.shown, vec![id]);
        assert_eq!(log.topmost, vec![(id, true)]);
        assert_eq!(log.opacities, vec![(id, 0.9)]);
        assert_eq!(view_log.lock().unwrap().hides, 1);
    }

    #[test]
    fn sequential_submits_stack_below_each_other() {
        let (mut coordinator, _, _) = harness();

        let a = pin(&mut coordinator, "A").unwrap();
        let b = pin(&mut coordinator, "B").unwrap();
        assert_ne!(a, b);

        let pos_a = coordinator.note(a).unwrap().position();
        let pos_b = coordinator.note(b).unwrap().position();
        assert_eq!(pos_b.x, pos_a.x);
        assert_eq!(pos_b.y, pos_a.y + MIN_NOTE_HEIGHT as i32 + STACK_GAP);
    }

    #[test]
    fn ids_stay_unique_across_closes() {
        let (mut coordinator, _, _) = harness();

        let a = pin(&mut coordinator, "first").unwrap();
        coordinator.on_close_requested(a);
        let b = pin(&mut coordinator, "second").unwrap();

        assert_ne!(a, b);
        assert_eq!(coordinator.note_count(), 1);
    }

    #[test]
    fn registry_grows_by_one_per_valid_submit() {
        let (mut coordinator, _, _) = harness();

        let mut seen = Vec::new();
        for i in 0..4 {
            let id = pin(&mut coordinator, &format!("note {}", i)).unwrap();
            assert!(!seen.contains(&id));
            seen.push(id);
            assert_eq!(coordinator.note_count(), i + 1);
        }
    }

    #[test]
    fn failed_creation_leaves_no_trace() {
        let (mut coordinator, surface_log, _) = harness();
        surface_log.lock().unwrap().fail_creates = 1;

        coordinator.on_trigger();
        let result = coordinator.on_capture_submit("doomed");
        assert!(matches!(result, Err(PinNoteError::SurfaceCreation(_))));
        assert_eq!(coordinator.note_count(), 0);

        // The allocator was rolled back: the next note takes the slot the
        // failed one would have occupied.
        let id = pin(&mut coordinator, "survivor").unwrap();
        assert_eq!(coordinator.note(id).unwrap().position(), first_slot());
    }
}

// ============================================================================
// Drag
// ============================================================================

mod drag_tests {
    use super::*;

    #[test]
    fn drag_moves_note_by_pointer_delta() {
        let (mut coordinator, surface_log, _) = harness();
        let id = pin(&mut coordinator, "drag me").unwrap();
        let start = coordinator.note(id).unwrap().position();

        // Grab 5px inside the note, move the pointer to an absolute spot.
        coordinator.pointer_down(id, start.offset(5, 5));
        coordinator.pointer_move(id, Point::new(120, 80));
        coordinator.pointer_up(id);

        let expected = Point::new(115, 75);
        assert_eq!(coordinator.note(id).unwrap().position(), expected);
        assert_eq!(surface_log.lock().unwrap().moves, vec![(id, expected)]);
    }

    #[test]
    fn second_gesture_uses_fresh_offset() {
        let (mut coordinator, _, _) = harness();
        let id = pin(&mut coordinator, "drag me").unwrap();
        let start = coordinator.note(id).unwrap().position();

        coordinator.pointer_down(id, start.offset(5, 5));
        coordinator.pointer_move(id, Point::new(120, 80));
        coordinator.pointer_up(id);

        // New grab at a different offset must not inherit the old one.
        coordinator.pointer_down(id, Point::new(135, 95));
        coordinator.pointer_move(id, Point::new(235, 195));
        coordinator.pointer_up(id);

        assert_eq!(
            coordinator.note(id).unwrap().position(),
            Point::new(215, 175)
        );
    }

    #[test]
    fn stray_pointer_events_are_ignored() {
        let (mut coordinator, surface_log, _) = harness();
        let id = pin(&mut coordinator, "still").unwrap();
        let start = coordinator.note(id).unwrap().position();

        coordinator.pointer_move(id, Point::new(500, 500));
        coordinator.pointer_up(id);
        coordinator.pointer_move(999, Point::new(1, 1));

        assert_eq!(coordinator.note(id).unwrap().position(), start);
        assert!(surface_log.lock().unwrap().moves.is_empty());
    }

    #[test]
    fn close_mid_drag_discards_queued_moves() {
        let (mut coordinator, surface_log, _) = harness();
        let id = pin(&mut coordinator, "closing").unwrap();
        let start = coordinator.note(id).unwrap().position();

        coordinator.pointer_down(id, start.offset(3, 3));
        coordinator.on_close_requested(id);

        // Moves still queued for the dead surface fall through harmlessly.
        coordinator.pointer_move(id, Point::new(400, 400));
        coordinator.pointer_up(id);

        assert_eq!(coordinator.note_count(), 0);
        assert!(surface_log.lock().unwrap().moves.is_empty());
        assert_eq!(surface_log.lock().unwrap().destroyed, vec![id]);
    }
}

// ============================================================================
// Close / shutdown
// ============================================================================

mod close_tests {
    use super::*;

    #[test]
    fn close_removes_and_destroys_in_one_step() {
        let (mut coordinator, surface_log, _) = harness();
        let id = pin(&mut coordinator, "bye").unwrap();

        coordinator.on_close_requested(id);

        assert_eq!(coordinator.note_count(), 0);
        assert!(coordinator.note(id).is_none());
        assert_eq!(surface_log.lock().unwrap().destroyed, vec![id]);
    }

    #[test]
    fn close_is_idempotent() {
        let (mut coordinator, surface_log, _) = harness();
        let id = pin(&mut coordinator, "double click").unwrap();

        coordinator.on_close_requested(id);
        coordinator.on_close_requested(id);

        assert_eq!(coordinator.note_count(), 0);
        // One destroy, no matter how often the close control fires.
        assert_eq!(surface_log.lock().unwrap().destroyed, vec![id]);
    }

    #[test]
    fn close_unknown_id_is_silent() {
        let (mut coordinator, surface_log, _) = harness();
        let id = pin(&mut coordinator, "keep").unwrap();

        coordinator.on_close_requested(424242);

        assert_eq!(coordinator.note_count(), 1);
        assert!(coordinator.note(id).is_some());
        assert!(surface_log.lock().unwrap().destroyed.is_empty());
    }

    #[test]
    fn drag_close_close_scenario() {
        let (mut coordinator, _, _) = harness();
        let id = pin(&mut coordinator, "scenario").unwrap();
        let start = coordinator.note(id).unwrap().position();

        coordinator.pointer_down(id, start.offset(5, 5));
        coordinator.pointer_move(id, Point::new(120, 80));
        coordinator.pointer_up(id);
        assert_eq!(coordinator.note(id).unwrap().position(), Point::new(115, 75));

        coordinator.on_close_requested(id);
        assert_eq!(coordinator.note_count(), 0);
        coordinator.on_close_requested(id);
        assert_eq!(coordinator.note_count(), 0);
    }

    #[test]
    fn shutdown_destroys_in_creation_order() {
        let (mut coordinator, surface_log, _) = harness();
        let a = pin(&mut coordinator, "a").unwrap();
        let b = pin(&mut coordinator, "b").unwrap();
        let c = pin(&mut coordinator, "c").unwrap();

        coordinator.shutdown();

        assert_eq!(coordinator.note_count(), 0);
        assert_eq!(surface_log.lock().unwrap().destroyed, vec![a, b, c]);
    }

    #[test]
    fn shutdown_implicitly_cancels_open_session() {
        let (mut coordinator, _, view_log) = harness();

        coordinator.on_trigger();
        coordinator.shutdown();

        assert!(!coordinator.has_active_session());
        assert_eq!(view_log.lock().unwrap().hides, 1);
    }

    #[test]
    fn close_all_keeps_coordinator_usable() {
        let (mut coordinator, _, _) = harness();
        pin(&mut coordinator, "one");
        pin(&mut coordinator, "two");

        coordinator.close_all();
        assert_eq!(coordinator.note_count(), 0);

        let id = pin(&mut coordinator, "after").unwrap();
        assert!(coordinator.note(id).is_some());
    }
}
