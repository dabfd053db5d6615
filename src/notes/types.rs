//! Type definitions for the note lifecycle core.
//!
//! Geometry primitives, stacking constants and content measurement shared by
//! the allocator, the drag gesture and the coordinator.

use serde::Serialize;
use ts_rs::TS;

// ============================================================================
// Constants
// ============================================================================

/// Minimum note width in pixels.
pub const MIN_NOTE_WIDTH: u32 = 200;

/// Minimum note height in pixels.
pub const MIN_NOTE_HEIGHT: u32 = 50;

/// Maximum note width before text is expected to wrap in the webview.
pub const MAX_NOTE_WIDTH: u32 = 640;

/// Inner padding of the note label in pixels (each side).
pub const NOTE_PADDING: u32 = 12;

/// Inset of the first note from the screen edges in pixels.
pub const STACK_MARGIN: i32 = 20;

/// Vertical gap between stacked notes in pixels.
pub const STACK_GAP: i32 = 10;

// ============================================================================
// Geometry Types
// ============================================================================

/// A point with integer pixel coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Offset the point by dx, dy.
    pub fn offset(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// A pixel size.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

// ============================================================================
// Content Measurement
// ============================================================================

/// Estimate the surface size needed to display `text` at `font_size`,
/// clamped to the minimum note floor.
///
/// The webview lays the text out itself; this estimate only has to be close
/// enough that the window never clips content. Average glyph advance is
/// taken as 0.6em, line height as 1.5em.
pub fn content_size(text: &str, font_size: u32) -> Size {
    let longest_line = text.lines().map(|l| l.chars().count()).max().unwrap_or(0) as u32;
    let line_count = text.lines().count().max(1) as u32;

    let width = (longest_line * font_size * 6 / 10 + 2 * NOTE_PADDING)
        .clamp(MIN_NOTE_WIDTH, MAX_NOTE_WIDTH);
    let height = (line_count * font_size * 3 / 2 + 2 * NOTE_PADDING).max(MIN_NOTE_HEIGHT);

    Size::new(width, height)
}

// ============================================================================
// Frontend Payloads
// ============================================================================

/// Snapshot of one pinned note, sent to the frontend.
#[derive(Debug, Clone, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../ui/types/generated/")]
pub struct NoteInfo {
    pub id: u64,
    pub text: String,
    pub x: i32,
    pub y: i32,
    pub opacity: f64,
}
