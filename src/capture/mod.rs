//! Capture module: speech-to-text adapter and activation coordination
//!
//! The adapter wraps the platform recognizer behind a start/stop seam; the
//! coordinator owns the listening flag and toggles capture on activation.

mod adapter;
mod coordinator;

pub use adapter::{detect, CaptureError, CaptureEvent, SpeechCapture, UnavailableCapture};
pub use coordinator::CaptureCoordinator;
