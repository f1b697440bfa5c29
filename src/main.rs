//! voicetask-daemon: Background daemon for voice-driven task capture
//!
//! This daemon provides:
//! - A dialogue engine that turns recognized utterances into task records
//! - A capture coordinator that toggles speech capture on activation
//! - Spoken prompts for the clarification exchange (due date, priority)
//!
//! Speech-to-text and text-to-speech are external collaborators behind the
//! `SpeechCapture` and `Speaker` seams; completed tasks are handed to the
//! task sink and logged, with no persistence in this daemon.

mod activation;
mod capture;
mod config;
mod dialogue;
mod events;
mod lifecycle;
mod speech;

use std::sync::Arc;

use anyhow::Result;
use tokio::sync::{broadcast, mpsc};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use crate::activation::ActivationListener;
use crate::capture::{CaptureCoordinator, SpeechCapture, UnavailableCapture};
use crate::config::Config;
use crate::dialogue::{CompletedTask, DialogueEngine};
use crate::events::DialogueEvent;
use crate::speech::{LogSpeaker, Speaker};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info"))
        )
        .init();

    info!(
        version = env!("CARGO_PKG_VERSION"),
        "voicetask-daemon starting"
    );

    // Load configuration
    let config = Config::load()?;
    info!(language = %config.language, "configuration loaded");

    // Create channels for inter-component communication
    // Capture adapter -> dialogue engine
    let (capture_tx, capture_rx) = mpsc::channel(32);
    // Activation control -> capture coordinator
    let (toggle_tx, mut toggle_rx) = mpsc::channel::<()>(8);
    // Dialogue engine -> task sink
    let (task_tx, mut task_rx) = mpsc::channel::<CompletedTask>(8);
    // Coordinator/engine -> observers (for broadcasting dialogue events)
    let (event_tx, _event_rx) = broadcast::channel::<DialogueEvent>(64);

    // Probe the platform recognizer once at startup
    let capture_adapter: Box<dyn SpeechCapture> =
        match capture::detect(capture_tx.clone(), &config.language) {
            Ok(adapter) => {
                info!("speech capture available");
                adapter
            }
            Err(e) => {
                error!(%e, "speech recognition unavailable for this session");
                Box::new(UnavailableCapture)
            }
        };

    let mut coordinator = CaptureCoordinator::new(capture_adapter, event_tx.clone());
    let mut engine = DialogueEngine::new(event_tx.clone());
    let speaker: Arc<dyn Speaker> = Arc::new(LogSpeaker);

    // Activation control: SIGUSR1 toggles listening
    let activation = ActivationListener::new(toggle_tx);

    // Subscribe to dialogue events for logging
    let mut observer_rx = event_tx.subscribe();

    info!("daemon initialized, entering main loop");

    // Main event loop
    tokio::select! {
        // Run the dialogue engine (processes capture events)
        _ = engine.run(capture_rx, Arc::clone(&speaker), task_tx) => {
            info!("dialogue engine exited");
        }

        // Forward activation toggles to the coordinator
        result = activation.run() => {
            if let Err(e) = result {
                error!(?e, "activation listener error");
            }
        }
        _ = async {
            while toggle_rx.recv().await.is_some() {
                coordinator.handle_activation();
            }
        } => {
            info!("activation channel closed");
        }

        // Task sink: log the finished record and speak a confirmation
        _ = async {
            while let Some(task) = task_rx.recv().await {
                match serde_json::to_string(&task) {
                    Ok(json) => info!(task = %json, "task created"),
                    Err(e) => warn!(?e, "failed to encode completed task"),
                }
                speaker.speak(&format!(
                    "Task \"{}\" with priority {} is created.",
                    task.title, task.priority
                ));
            }
        } => {
            info!("task sink exited");
        }

        // Log dialogue events for observability
        _ = async {
            loop {
                match observer_rx.recv().await {
                    Ok(event) => {
                        info!(%event, "dialogue event");
                    }
                    Err(broadcast::error::RecvError::Lagged(n)) => {
                        warn!(skipped = n, "dialogue event receiver lagged");
                    }
                    Err(broadcast::error::RecvError::Closed) => {
                        break;
                    }
                }
            }
        } => {
            info!("dialogue event handler exited");
        }

        // Wait for shutdown signal
        result = lifecycle::wait_for_shutdown() => {
            result?;
            info!("shutdown signal received");
        }
    }

    // Cleanup
    info!("shutting down...");

    coordinator.shutdown();

    info!("voicetask-daemon stopped");

    Ok(())
}
