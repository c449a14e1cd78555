//! Shutdown coordination for the edge router.

use std::future::Future;

use tokio::sync::broadcast;

/// Broadcasts a single stop notice to the HTTP server and any background task.
pub struct Shutdown {
    notify: broadcast::Sender<()>,
}

impl Shutdown {
    pub fn new() -> Self {
        let (notify, _) = broadcast::channel(1);
        Self { notify }
    }

    /// Receiver handed to [`EdgeServer::run`](crate::http::EdgeServer::run).
    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.notify.subscribe()
    }

    /// Send the stop notice. Harmless when nobody listens.
    pub fn trigger(&self) {
        if self.notify.send(()).is_err() {
            tracing::debug!("Shutdown triggered with no listeners");
        }
    }

    /// Wait for `signal`, then trigger. Meant to be spawned.
    pub async fn trigger_on<F>(self, signal: F)
    where
        F: Future<Output = ()>,
    {
        signal.await;
        tracing::info!(listeners = self.listeners(), "Stopping edge router");
        self.trigger();
    }

    /// Receivers still alive.
    pub fn listeners(&self) -> usize {
        self.notify.receiver_count()
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn trigger_reaches_every_subscriber() {
        let shutdown = Shutdown::new();
        let mut server = shutdown.subscribe();
        let mut metrics = shutdown.subscribe();
        assert_eq!(shutdown.listeners(), 2);

        shutdown.trigger();
        assert!(server.recv().await.is_ok());
        assert!(metrics.recv().await.is_ok());
    }

    #[tokio::test]
    async fn trigger_on_waits_for_the_signal() {
        let shutdown = Shutdown::new();
        let mut server = shutdown.subscribe();
        let (tx, rx) = tokio::sync::oneshot::channel::<()>();

        let task = tokio::spawn(shutdown.trigger_on(async move {
            let _ = rx.await;
        }));
        assert!(server.try_recv().is_err());

        tx.send(()).unwrap();
        task.await.unwrap();
        assert!(server.recv().await.is_ok());
    }

    #[test]
    fn trigger_without_subscribers_is_harmless() {
        Shutdown::default().trigger();
    }
}
