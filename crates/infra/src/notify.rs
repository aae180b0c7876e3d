//! Progress notification sinks.
//!
//! The import and export paths emit one line per outbound request so an
//! observing client (a browser session, a CLI spinner) can follow along.
//! Delivery is strictly best-effort.

use async_trait::async_trait;
use tenantshift_core::ports::ProgressSink;
use tenantshift_domain::Result;
use tokio::sync::broadcast;

const DEFAULT_CHANNEL_CAPACITY: usize = 256;

/// One request line mirrored to observers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressLine {
    pub client_id: String,
    pub line: String,
}

/// Fan-out sink backed by a broadcast channel.
///
/// Lines published with no observer subscribed, or past a lagging
/// observer's buffer, are dropped silently.
#[derive(Debug, Clone)]
pub struct BroadcastProgressSink {
    sender: broadcast::Sender<ProgressLine>,
}

impl BroadcastProgressSink {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CHANNEL_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Subscribe an observer to every line published from now on.
    pub fn subscribe(&self) -> broadcast::Receiver<ProgressLine> {
        self.sender.subscribe()
    }
}

impl Default for BroadcastProgressSink {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProgressSink for BroadcastProgressSink {
    async fn publish(&self, client_id: &str, line: &str) -> Result<()> {
        // A send error only means nobody is listening.
        let _ = self
            .sender
            .send(ProgressLine { client_id: client_id.to_string(), line: line.to_string() });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn subscribed_observer_receives_published_lines() {
        let sink = BroadcastProgressSink::new();
        let mut receiver = sink.subscribe();

        sink.publish("client-1", "POST: https://example.test/things").await.unwrap();

        let line = receiver.recv().await.unwrap();
        assert_eq!(line.client_id, "client-1");
        assert_eq!(line.line, "POST: https://example.test/things");
    }

    #[tokio::test]
    async fn publishing_without_observers_is_not_an_error() {
        let sink = BroadcastProgressSink::new();
        assert!(sink.publish("client-1", "GET: https://example.test").await.is_ok());
    }
}
