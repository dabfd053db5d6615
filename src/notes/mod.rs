//! Note lifecycle core.
//!
//! Everything that turns a trigger (hotkey fire -> text submitted) into a
//! managed, positioned, drag-and-closeable floating label lives here, behind
//! the surface traits in [`surface`]. The module is toolkit-agnostic: the
//! Tauri realization of the traits sits in `crate::window`, and the test
//! suite drives the whole lifecycle against mocks.
//!
//! # Architecture
//!
//! ```text
//! mod.rs (public API)
//!   |
//!   +-- types.rs (geometry, content sizing, stacking constants)
//!   +-- placement.rs (slot allocation for new notes)
//!   +-- drag.rs (per-note pointer drag gesture)
//!   +-- session.rs (one hotkey -> submit/cancel interaction)
//!   +-- surface.rs (native-window capability traits, pinned note)
//!   +-- coordinator.rs (registry of live notes, entry point for all events)
//! ```

pub mod coordinator;
pub mod drag;
pub mod placement;
pub mod session;
pub mod surface;
pub mod types;

#[cfg(test)]
mod tests;

// Re-exports for public API
pub use coordinator::{CaptureDelegate, WindowCoordinator};
pub use types::{Point, Size};
