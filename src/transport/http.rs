//! Network transport bridge.
//!
//! A stateless per-request handler drives the persistent agent loop through
//! three single-slot channels: the inbound request body, the response-writing
//! handle, and a completion signal. Every slot has capacity exactly one, so
//! at most one network cycle is in flight per agent; a second concurrent
//! request blocks until the first cycle's write completes. That backpressure
//! is deliberate - scale comes from running more agent processes, not from
//! intra-process request concurrency.

use anyhow::anyhow;
use async_trait::async_trait;
use tokio::sync::{mpsc, oneshot, Mutex};
use tracing::debug;

use super::Transport;

/// Loop-side half of the bridge.
pub struct HttpTransport {
    request_rx: mpsc::Receiver<String>,
    response_rx: mpsc::Receiver<oneshot::Sender<String>>,
    done_tx: mpsc::Sender<()>,
}

/// Handler-side half of the bridge, shared by the per-request handlers of
/// one agent's listener.
///
/// Each cycle raises exactly one completion signal and each handler consumes
/// exactly one. When two requests overlap, which handler observes a given
/// signal is unspecified; the response handles are per-request, so replies
/// still reach the right caller.
pub struct BridgeHandle {
    request_tx: mpsc::Sender<String>,
    response_tx: mpsc::Sender<oneshot::Sender<String>>,
    done_rx: Mutex<mpsc::Receiver<()>>,
}

/// Create a connected loop-side / handler-side pair.
pub fn bridge() -> (HttpTransport, BridgeHandle) {
    let (request_tx, request_rx) = mpsc::channel(1);
    let (response_tx, response_rx) = mpsc::channel(1);
    let (done_tx, done_rx) = mpsc::channel(1);
    (
        HttpTransport {
            request_rx,
            response_rx,
            done_tx,
        },
        BridgeHandle {
            request_tx,
            response_tx,
            done_rx: Mutex::new(done_rx),
        },
    )
}

impl BridgeHandle {
    /// Run one full request/response cycle against the agent loop: place the
    /// body in the request slot, then the response handle in the response
    /// slot, then block until the loop signals completion.
    ///
    /// Returns `None` when the loop has shut down and can no longer answer.
    /// If the loop is alive but stuck, this blocks indefinitely; the core
    /// defines no deadline and callers are expected to bring their own.
    pub async fn exchange(&self, body: String) -> Option<String> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.request_tx.send(body).await.ok()?;
        self.response_tx.send(reply_tx).await.ok()?;

        debug!("request handed to agent loop, awaiting completion");
        match self.done_rx.lock().await.recv().await {
            Some(()) => reply_rx.await.ok(),
            // Loop dropped mid-cycle; the reply may or may not have been
            // written before it went away.
            None => reply_rx.await.ok(),
        }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn read_input(&mut self) -> anyhow::Result<String> {
        debug!("waiting for inbound request");
        self.request_rx
            .recv()
            .await
            .ok_or_else(|| anyhow!("inbound request channel closed"))
    }

    async fn write_output(&mut self, text: &str) -> anyhow::Result<()> {
        let reply = self
            .response_rx
            .recv()
            .await
            .ok_or_else(|| anyhow!("response channel closed"))?;

        let written = reply.send(text.to_string());

        // The completion signal fires exactly once per cycle, also when the
        // write failed, so the blocked handler never leaks.
        let _ = self.done_tx.send(()).await;

        written.map_err(|_| anyhow!("request handler went away before the response was written"))
    }
}
