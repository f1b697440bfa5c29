//! Capture/activation coordinator
//!
//! Owns the listening flag and mediates between the activation control and
//! the capture adapter: each activation toggles capture on or off. Carries
//! no dialogue semantics.

use tokio::sync::broadcast;
use tracing::{info, warn};

use crate::events::DialogueEvent;

use super::adapter::SpeechCapture;

/// Toggles speech capture in response to activations
pub struct CaptureCoordinator {
    capture: Box<dyn SpeechCapture>,
    /// Whether capture is currently active; flipped only by activations
    listening: bool,
    /// Channel for emitting listening events
    event_tx: broadcast::Sender<DialogueEvent>,
}

impl CaptureCoordinator {
    /// Create a new coordinator, initially not listening
    pub fn new(
        capture: Box<dyn SpeechCapture>,
        event_tx: broadcast::Sender<DialogueEvent>,
    ) -> Self {
        Self {
            capture,
            listening: false,
            event_tx,
        }
    }

    /// Whether capture is currently active
    pub fn is_listening(&self) -> bool {
        self.listening
    }

    /// React to one activation of the toggle control.
    ///
    /// The flag changes only here, never on utterance arrival, so a
    /// single-utterance capture that has already delivered its result
    /// still counts as listening until the user toggles off.
    pub fn handle_activation(&mut self) {
        if self.listening {
            self.capture.stop();
            self.listening = false;
            info!("listening stopped");
            let _ = self.event_tx.send(DialogueEvent::ListeningStopped);
        } else {
            match self.capture.start() {
                Ok(()) => {
                    self.listening = true;
                    info!("listening started");
                    let _ = self.event_tx.send(DialogueEvent::ListeningStarted);
                }
                Err(e) => {
                    warn!(%e, "activation ignored, capture could not start");
                }
            }
        }
    }

    /// Stop capture on daemon shutdown
    pub fn shutdown(&mut self) {
        if self.listening {
            self.capture.stop();
            self.listening = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capture::adapter::{CaptureError, UnavailableCapture};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    /// Capture test double counting start/stop calls
    struct CountingCapture {
        starts: Arc<AtomicUsize>,
        stops: Arc<AtomicUsize>,
    }

    impl SpeechCapture for CountingCapture {
        fn start(&mut self) -> Result<(), CaptureError> {
            self.starts.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }

        fn stop(&mut self) {
            self.stops.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn create_coordinator() -> (
        CaptureCoordinator,
        Arc<AtomicUsize>,
        Arc<AtomicUsize>,
        broadcast::Receiver<DialogueEvent>,
    ) {
        let starts = Arc::new(AtomicUsize::new(0));
        let stops = Arc::new(AtomicUsize::new(0));
        let capture = CountingCapture {
            starts: Arc::clone(&starts),
            stops: Arc::clone(&stops),
        };
        let (tx, rx) = broadcast::channel(16);
        (
            CaptureCoordinator::new(Box::new(capture), tx),
            starts,
            stops,
            rx,
        )
    }

    #[test]
    fn test_initially_not_listening() {
        let (coordinator, ..) = create_coordinator();
        assert!(!coordinator.is_listening());
    }

    #[test]
    fn test_activation_toggles_capture() {
        let (mut coordinator, starts, stops, mut rx) = create_coordinator();

        coordinator.handle_activation();
        assert!(coordinator.is_listening());
        assert_eq!(starts.load(Ordering::SeqCst), 1);
        assert!(matches!(
            rx.try_recv().unwrap(),
            DialogueEvent::ListeningStarted
        ));

        coordinator.handle_activation();
        assert!(!coordinator.is_listening());
        assert_eq!(stops.load(Ordering::SeqCst), 1);
        assert!(matches!(
            rx.try_recv().unwrap(),
            DialogueEvent::ListeningStopped
        ));
    }

    #[test]
    fn test_unsupported_capture_never_starts_listening() {
        let (tx, mut rx) = broadcast::channel(16);
        let mut coordinator = CaptureCoordinator::new(Box::new(UnavailableCapture), tx);

        coordinator.handle_activation();
        assert!(!coordinator.is_listening());
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_shutdown_stops_active_capture() {
        let (mut coordinator, _starts, stops, _rx) = create_coordinator();

        coordinator.handle_activation();
        coordinator.shutdown();
        assert!(!coordinator.is_listening());
        assert_eq!(stops.load(Ordering::SeqCst), 1);
    }
}
