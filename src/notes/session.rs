//! Capture session state.
//!
//! One session spans a single hotkey -> text input -> submit/cancel
//! interaction. Exactly one outcome resolves a session, never both and never
//! two of the same: the first submit or cancel consumes it, anything after
//! that is a stray event from the input surface and resolves to nothing.

/// Outcome of a resolved capture session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptureOutcome {
    /// Non-blank text was submitted (already trimmed).
    Submitted(String),
    /// The session was cancelled, or the submitted text was blank.
    Cancelled,
}

/// Transient state for one capture interaction.
#[derive(Debug, Default)]
pub struct CaptureSession {
    resolved: bool,
}

impl CaptureSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve the session with submitted text. Blank-after-trim input
    /// resolves as a cancel: no note is created for empty text.
    pub fn submit(&mut self, text: &str) -> Option<CaptureOutcome> {
        if self.resolved {
            return None;
        }
        self.resolved = true;

        let trimmed = text.trim();
        if trimmed.is_empty() {
            Some(CaptureOutcome::Cancelled)
        } else {
            Some(CaptureOutcome::Submitted(trimmed.to_string()))
        }
    }

    /// Resolve the session as cancelled.
    pub fn cancel(&mut self) -> Option<CaptureOutcome> {
        if self.resolved {
            return None;
        }
        self.resolved = true;
        Some(CaptureOutcome::Cancelled)
    }
}
