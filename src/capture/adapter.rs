//! Speech capture adapter seam
//!
//! A capture adapter wraps the platform's speech-to-text facility. It is
//! started for exactly one utterance per activation and delivers its single
//! outcome, a recognized utterance or an error code, over an mpsc channel.

use tokio::sync::mpsc;
use tracing::info;

/// Asynchronous outcome of one capture attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptureEvent {
    /// One finalized recognized speech result
    Utterance(String),
    /// Recognition failed; carries the recognizer's error code
    Error(String),
}

/// Errors that can occur in a capture adapter
#[derive(Debug, thiserror::Error)]
pub enum CaptureError {
    #[error("no speech recognizer is available on this platform")]
    Unsupported,

    #[error("capture is already in progress")]
    AlreadyCapturing,

    #[error("failed to send capture event to channel")]
    ChannelSend,
}

/// Platform speech-to-text facility behind a start/stop interface.
///
/// Implementations deliver recognized text and recognition errors on the
/// `CaptureEvent` channel handed to them at construction. `start` arms the
/// recognizer for a single utterance; `stop` cancels an in-progress capture.
pub trait SpeechCapture: Send {
    fn start(&mut self) -> Result<(), CaptureError>;
    fn stop(&mut self);
}

/// Probe the platform for a speech recognizer.
///
/// Returns the adapter wired to `event_tx`, or `Unsupported` when the
/// platform offers no recognition facility. Callers surface the failure
/// once at startup; listening stays unavailable for the session.
pub fn detect(
    event_tx: mpsc::Sender<CaptureEvent>,
    language: &str,
) -> Result<Box<dyn SpeechCapture>, CaptureError> {
    // TODO: wire a recognizer backend (whisper.cpp, or the macOS Speech
    // framework) behind the SpeechCapture seam.
    info!(language, "probing platform speech recognition");
    let _ = event_tx;
    Err(CaptureError::Unsupported)
}

/// Adapter used when the platform has no recognizer. Start requests are
/// refused so the listening flag never flips on; stop is ignored.
pub struct UnavailableCapture;

impl SpeechCapture for UnavailableCapture {
    fn start(&mut self) -> Result<(), CaptureError> {
        Err(CaptureError::Unsupported)
    }

    fn stop(&mut self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_reports_unsupported() {
        let (tx, _rx) = mpsc::channel(8);
        let result = detect(tx, "en-US");
        assert!(matches!(result, Err(CaptureError::Unsupported)));
    }

    #[test]
    fn test_unavailable_capture_refuses_start() {
        let mut capture = UnavailableCapture;
        assert!(matches!(capture.start(), Err(CaptureError::Unsupported)));
        capture.stop();
    }
}
