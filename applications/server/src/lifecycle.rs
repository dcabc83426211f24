//! Process lifecycle: phase tracking and signal-driven shutdown
//!
//! The process moves through `Initializing → Serving → Draining → Stopped`.
//! The serve loop and the signal watcher run as separate tasks and share a
//! `CancellationToken`: the watcher cancels it on SIGINT/SIGTERM, the serve
//! loop uses it as its graceful-shutdown future.

use std::fmt;
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Lifecycle phase of the server process
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Loading configuration, connecting to the store, binding the listener
    Initializing,
    /// Accepting and dispatching calls
    Serving,
    /// No new calls accepted; in-flight calls are finishing
    Draining,
    /// Store pool released, ready to exit
    Stopped,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Initializing => "initializing",
            Phase::Serving => "serving",
            Phase::Draining => "draining",
            Phase::Stopped => "stopped",
        };
        f.write_str(name)
    }
}

/// Shared handle to the current phase and the shutdown trigger
#[derive(Debug, Clone)]
pub struct Lifecycle {
    phase: Arc<watch::Sender<Phase>>,
    shutdown: CancellationToken,
}

impl Default for Lifecycle {
    fn default() -> Self {
        Self::new()
    }
}

impl Lifecycle {
    pub fn new() -> Self {
        let (phase, _) = watch::channel(Phase::Initializing);
        Self {
            phase: Arc::new(phase),
            shutdown: CancellationToken::new(),
        }
    }

    /// Current phase
    pub fn phase(&self) -> Phase {
        *self.phase.borrow()
    }

    /// Watch phase transitions
    pub fn subscribe(&self) -> watch::Receiver<Phase> {
        self.phase.subscribe()
    }

    /// Move to `next` and log the transition
    pub fn enter(&self, next: Phase) {
        let previous = self.phase.send_replace(next);
        if previous != next {
            tracing::info!("Lifecycle: {} -> {}", previous, next);
        }
    }

    /// Ask the serve loop to stop accepting calls and drain
    pub fn shutdown(&self) {
        self.shutdown.cancel();
    }

    /// Token cancelled once shutdown has been requested
    pub fn shutdown_token(&self) -> CancellationToken {
        self.shutdown.clone()
    }

    /// Spawn the background task that waits for SIGINT/SIGTERM and then
    /// requests shutdown
    pub fn spawn_signal_watcher(&self) -> JoinHandle<()> {
        let lifecycle = self.clone();
        tokio::spawn(async move {
            tokio::select! {
                () = wait_for_signal() => {
                    tracing::info!("Shutting down gRPC server...");
                    lifecycle.shutdown();
                }
                () = lifecycle.shutdown.cancelled() => {}
            }
        })
    }
}

/// Resolve on the first interrupt or termination signal
async fn wait_for_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {}
        () = terminate => {}
    }
}
