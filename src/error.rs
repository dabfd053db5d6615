//! Central error types for PinNote.
//!
//! This module provides typed errors for better error handling across the codebase.
//! All errors implement `Serialize` for Tauri IPC compatibility.

use serde::Serialize;
use thiserror::Error;

/// Main error type for PinNote operations.
#[derive(Error, Debug)]
pub enum PinNoteError {
    /// Acquiring a native surface for a note failed (e.g. resource exhaustion)
    #[error("Surface creation failed: {0}")]
    SurfaceCreation(String),

    /// Window management error (move/resize/show on an existing surface)
    #[error("Window error: {0}")]
    Window(String),

    /// Configuration file could not be read or written
    #[error("Config error: {0}")]
    Config(#[from] std::io::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Global hotkey could not be parsed or registered
    #[error("Hotkey error: {0}")]
    Hotkey(String),

    /// Generic error with message
    #[error("{0}")]
    Other(String),
}

/// Implement Serialize for Tauri IPC compatibility.
/// Tauri requires errors to be serializable to send to the frontend.
impl Serialize for PinNoteError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        // Serialize as the error message string
        serializer.serialize_str(&self.to_string())
    }
}

impl From<tauri::Error> for PinNoteError {
    fn from(err: tauri::Error) -> Self {
        PinNoteError::Window(err.to_string())
    }
}

impl From<String> for PinNoteError {
    fn from(msg: String) -> Self {
        PinNoteError::Other(msg)
    }
}

impl From<&str> for PinNoteError {
    fn from(msg: &str) -> Self {
        PinNoteError::Other(msg.to_string())
    }
}

/// Type alias for Results using PinNoteError.
pub type PinNoteResult<T> = Result<T, PinNoteError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = PinNoteError::SurfaceCreation("out of window handles".to_string());
        assert_eq!(
            err.to_string(),
            "Surface creation failed: out of window handles"
        );
    }

    #[test]
    fn test_error_serialization() {
        let err = PinNoteError::Hotkey("unknown key".to_string());
        let json = serde_json::to_string(&err).unwrap();
        assert!(json.contains("Hotkey error"));
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: PinNoteError = io_err.into();
        assert!(matches!(err, PinNoteError::Config(_)));
    }

    #[test]
    fn test_from_string() {
        let err: PinNoteError = "test error".into();
        assert!(matches!(err, PinNoteError::Other(_)));
    }

    #[test]
    fn test_window_error_display() {
        let err = PinNoteError::Window("failed to set position".to_string());
        assert_eq!(err.to_string(), "Window error: failed to set position");
    }
}
