//! Transport adapters: the blocking read/write pair the agent loop drives.
//!
//! The loop is transport-agnostic; whether input arrives from an interactive
//! console or from one-shot network requests is decided at agent
//! construction.

mod console;
mod http;

pub use console::ConsoleTransport;
pub use http::{bridge, BridgeHandle, HttpTransport};

use async_trait::async_trait;

/// The pair of blocking operations the agent loop uses for I/O, independent
/// of the underlying channel.
#[async_trait]
pub trait Transport: Send {
    /// Block until the next user input is available. An error here aborts
    /// the loop.
    async fn read_input(&mut self) -> anyhow::Result<String>;

    /// Block until the pending output has been delivered. The outcome is
    /// advisory: the loop reports failures but keeps running.
    async fn write_output(&mut self, text: &str) -> anyhow::Result<()>;
}
