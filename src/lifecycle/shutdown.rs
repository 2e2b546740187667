//! Shutdown coordination for the proxy.

use std::future::Future;

use tokio::sync::broadcast;

use crate::lifecycle::signals;

/// Broadcasts a single "stop serving" event.
///
/// `main` ties it to OS signals; tests trigger it by hand.
#[derive(Debug)]
pub struct Shutdown {
    tx: broadcast::Sender<()>,
}

impl Shutdown {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(1);
        Self { tx }
    }

    /// A receiver for `HttpServer::run`.
    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.tx.subscribe()
    }

    pub fn trigger(&self) {
        let _ = self.tx.send(());
    }

    /// Trigger once `stop` resolves, from a background task.
    pub fn trigger_when<F>(self, stop: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        tokio::spawn(async move {
            stop.await;
            self.trigger();
        });
    }

    /// Trigger on Ctrl+C or SIGTERM.
    pub fn trigger_on_signal(self) {
        self.trigger_when(signals::wait_for_signal());
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}
