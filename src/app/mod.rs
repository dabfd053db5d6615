//! Application lifecycle and platform integration.
//!
//! - `tray`: system tray setup and menu handling
//! - `events`: window event handlers
//! - `hotkey`: global hotkey registration

pub mod events;

#[cfg(desktop)]
pub mod hotkey;

#[cfg(desktop)]
pub mod tray;

// Re-export TrayState for external use
#[cfg(desktop)]
pub use tray::TrayState;
