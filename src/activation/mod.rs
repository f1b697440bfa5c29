//! Activation control for a headless daemon
//!
//! The activation affordance is a single no-argument callback; here it is
//! SIGUSR1 delivered to the process. Each delivery is forwarded as one
//! toggle to the capture coordinator.

use anyhow::Result;
use tokio::signal::unix::{signal, SignalKind};
use tokio::sync::mpsc;
use tracing::{debug, info};

/// Forwards SIGUSR1 deliveries as activation toggles
pub struct ActivationListener {
    toggle_tx: mpsc::Sender<()>,
}

impl ActivationListener {
    /// Create a new activation listener
    pub fn new(toggle_tx: mpsc::Sender<()>) -> Self {
        Self { toggle_tx }
    }

    /// Run the listener until the toggle channel closes
    pub async fn run(self) -> Result<()> {
        let mut sigusr1 = signal(SignalKind::user_defined1())?;
        info!("activation listener started (SIGUSR1 toggles listening)");

        while sigusr1.recv().await.is_some() {
            debug!("activation signal received");
            if self.toggle_tx.send(()).await.is_err() {
                break;
            }
        }

        Ok(())
    }
}
