//! tokio-tungstenite transport and event loop.
//!
//! [`WebSocketTransport`] is the command-channel handle handed to the
//! session; [`WebSocketDriver`] is the consuming half that runs the event
//! loop on a tokio task.
//!
//! # Event Loop
//!
//! The loop alternates between two phases:
//!
//! - **Idle**: waits for an `Open` command, then dials the endpoint with the
//!   configured timeout. Dial failure reports `on_error` and returns to
//!   idle.
//! - **Connected**: pumps the socket and the command channel concurrently.
//!   Incoming text goes to `on_text`; a close frame goes to `on_closed`; a
//!   stream error or abrupt end goes to `on_error`. Outbound `SendText`
//!   commands are written to the sink. Any exit from this phase returns to
//!   idle, so the caller can connect again.
//!
//! The task terminates only when every transport handle is dropped.

// ============================================================================
// Imports
// ============================================================================

use std::sync::Arc;
use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tokio::time::timeout;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::tungstenite::protocol::CloseFrame;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};
use tracing::{debug, warn};
use url::Url;

use crate::error::Error;

use super::{Transport, TransportEvents};

// ============================================================================
// Constants
// ============================================================================

/// Close code reported when the remote sends a close frame with no status.
const NO_STATUS_CODE: u16 = 1005;

// ============================================================================
// Types
// ============================================================================

/// WebSocket stream produced by `connect_async`.
type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Commands from transport handles to the event loop.
enum TransportCommand {
    /// Dial the endpoint.
    Open,
    /// Transmit one text frame.
    SendText(String),
    /// Close the socket.
    Close,
}

/// How the connected phase ended.
enum PumpExit {
    /// Socket gone; return to idle and await the next `Open`.
    Disconnected,
    /// Command channel closed; terminate the task.
    Terminated,
}

// ============================================================================
// WebSocketTransport
// ============================================================================

/// Command-channel handle to the WebSocket event loop.
///
/// All methods enqueue a command and return immediately. Once the event loop
/// has terminated the commands go nowhere, which is fine: a dropped loop
/// means the owning session is gone too.
pub struct WebSocketTransport {
    command_tx: mpsc::UnboundedSender<TransportCommand>,
}

impl WebSocketTransport {
    /// Creates the transport handle and its driver.
    ///
    /// The driver must be [spawned](WebSocketDriver::spawn) for any command
    /// to take effect.
    #[must_use]
    pub fn new(endpoint: Url, dial_timeout: Duration) -> (Self, WebSocketDriver) {
        let (command_tx, command_rx) = mpsc::unbounded_channel();

        let transport = Self { command_tx };
        let driver = WebSocketDriver {
            endpoint,
            dial_timeout,
            command_rx,
        };

        (transport, driver)
    }
}

impl Transport for WebSocketTransport {
    fn open(&self) {
        let _ = self.command_tx.send(TransportCommand::Open);
    }

    fn close(&self) {
        let _ = self.command_tx.send(TransportCommand::Close);
    }

    fn send_text(&self, text: String) {
        let _ = self.command_tx.send(TransportCommand::SendText(text));
    }
}

// ============================================================================
// WebSocketDriver
// ============================================================================

/// Consuming half of the transport: runs the event loop.
pub struct WebSocketDriver {
    /// Endpoint to dial on `Open`.
    endpoint: Url,

    /// Maximum time one dial attempt may take.
    dial_timeout: Duration,

    /// Commands from the transport handles.
    command_rx: mpsc::UnboundedReceiver<TransportCommand>,
}

impl WebSocketDriver {
    /// Spawns the event loop onto the current tokio runtime.
    ///
    /// # Panics
    ///
    /// Panics if called outside a tokio runtime.
    pub fn spawn(self, events: Arc<dyn TransportEvents>) {
        tokio::spawn(self.run(events));
    }

    /// Event loop: idle phase, dial, connected phase, repeat.
    async fn run(mut self, events: Arc<dyn TransportEvents>) {
        loop {
            // Idle phase: only Open advances.
            match self.command_rx.recv().await {
                None => break,
                Some(TransportCommand::Open) => {}
                Some(TransportCommand::Close) => continue,
                Some(TransportCommand::SendText(_)) => {
                    warn!("Dropping send while socket is not open");
                    continue;
                }
            }

            debug!(endpoint = %self.endpoint, "Dialing");
            let stream = match timeout(self.dial_timeout, connect_async(self.endpoint.as_str()))
                .await
            {
                Err(_) => {
                    events.on_error(Error::connection_timeout(self.dial_timeout.as_millis() as u64));
                    continue;
                }
                Ok(Err(e)) => {
                    events.on_error(Error::WebSocket(e));
                    continue;
                }
                Ok(Ok((stream, _response))) => stream,
            };

            debug!(endpoint = %self.endpoint, "Socket open");
            events.on_open();

            match self.pump(stream, &events).await {
                PumpExit::Disconnected => continue,
                PumpExit::Terminated => break,
            }
        }

        debug!("Event loop terminated");
    }

    /// Connected phase: pump the socket and the command channel.
    async fn pump(&mut self, stream: WsStream, events: &Arc<dyn TransportEvents>) -> PumpExit {
        let (mut ws_write, mut ws_read) = stream.split();

        loop {
            tokio::select! {
                message = ws_read.next() => {
                    match message {
                        Some(Ok(Message::Text(text))) => {
                            events.on_text(text.to_string());
                        }

                        Some(Ok(Message::Close(frame))) => {
                            let (code, reason) = close_frame_parts(frame);
                            debug!(code, reason, "Socket closed by remote");
                            events.on_closed(reason, code);
                            return PumpExit::Disconnected;
                        }

                        // Binary payloads and ping/pong are not part of the
                        // protocol; tungstenite answers pings itself.
                        Some(Ok(_)) => {}

                        Some(Err(e)) => {
                            events.on_error(Error::WebSocket(e));
                            return PumpExit::Disconnected;
                        }

                        None => {
                            events.on_error(Error::ConnectionClosed);
                            return PumpExit::Disconnected;
                        }
                    }
                }

                command = self.command_rx.recv() => {
                    match command {
                        Some(TransportCommand::SendText(text)) => {
                            if let Err(e) = ws_write.send(Message::Text(text.into())).await {
                                events.on_error(Error::WebSocket(e));
                                return PumpExit::Disconnected;
                            }
                        }

                        Some(TransportCommand::Close) => {
                            // Client-initiated close is optimistic at the
                            // session; no callback here.
                            let _ = ws_write.close().await;
                            return PumpExit::Disconnected;
                        }

                        Some(TransportCommand::Open) => {
                            warn!("Ignoring open while socket is already open");
                        }

                        None => {
                            let _ = ws_write.close().await;
                            return PumpExit::Terminated;
                        }
                    }
                }
            }
        }
    }
}

// ============================================================================
// Helpers
// ============================================================================

/// Extracts (code, reason) from an optional close frame.
fn close_frame_parts(frame: Option<CloseFrame>) -> (u16, String) {
    match frame {
        Some(frame) => (u16::from(frame.code), frame.reason.to_string()),
        None => (NO_STATUS_CODE, String::new()),
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use tokio_tungstenite::tungstenite::protocol::frame::coding::CloseCode;

    fn test_url() -> Url {
        Url::parse("ws://127.0.0.1:9010/wyftws").expect("valid url")
    }

    #[test]
    fn test_commands_enqueue_in_order() {
        let (transport, mut driver) = WebSocketTransport::new(test_url(), Duration::from_secs(5));

        transport.open();
        transport.send_text("CONNECT\n\n\0".to_string());
        transport.close();

        assert!(matches!(
            driver.command_rx.try_recv(),
            Ok(TransportCommand::Open)
        ));
        match driver.command_rx.try_recv() {
            Ok(TransportCommand::SendText(text)) => assert_eq!(text, "CONNECT\n\n\0"),
            other => panic!("expected SendText, got {:?}", std::mem::discriminant(&other)),
        }
        assert!(matches!(
            driver.command_rx.try_recv(),
            Ok(TransportCommand::Close)
        ));
    }

    #[test]
    fn test_send_after_driver_dropped_is_silent() {
        let (transport, driver) = WebSocketTransport::new(test_url(), Duration::from_secs(5));
        drop(driver);

        // Must not panic.
        transport.open();
        transport.send_text("x".to_string());
        transport.close();
    }

    #[test]
    fn test_close_frame_parts() {
        let frame = CloseFrame {
            code: CloseCode::Abnormal,
            reason: "timeout".into(),
        };
        assert_eq!(close_frame_parts(Some(frame)), (1006, "timeout".to_string()));
        assert_eq!(close_frame_parts(None), (1005, String::new()));
    }

    // ========================================================================
    // Async
    // ========================================================================

    /// Events sink that forwards everything to a channel for awaiting.
    struct ChannelEvents {
        tx: mpsc::UnboundedSender<String>,
    }

    impl TransportEvents for ChannelEvents {
        fn on_open(&self) {
            let _ = self.tx.send("open".to_string());
        }

        fn on_text(&self, text: String) {
            let _ = self.tx.send(format!("text:{text}"));
        }

        fn on_closed(&self, reason: String, code: u16) {
            let _ = self.tx.send(format!("closed:{code}:{reason}"));
        }

        fn on_error(&self, error: Error) {
            let _ = self.tx.send(format!("error:{error}"));
        }
    }

    #[tokio::test]
    async fn test_dial_failure_reports_error_and_returns_to_idle() {
        // Nothing listens on port 9; the dial fails fast with refused (or
        // times out on filtered networks); either way an error surfaces.
        let endpoint = Url::parse("ws://127.0.0.1:9/").expect("valid url");
        let (transport, driver) = WebSocketTransport::new(endpoint, Duration::from_millis(500));

        let (tx, mut rx) = mpsc::unbounded_channel();
        driver.spawn(Arc::new(ChannelEvents { tx }));

        transport.open();
        let event = timeout(Duration::from_secs(5), rx.recv())
            .await
            .expect("event within deadline")
            .expect("channel alive");
        assert!(event.starts_with("error:"), "unexpected event: {event}");

        // Loop is back in idle: a second open produces a second error.
        transport.open();
        let event = timeout(Duration::from_secs(5), rx.recv())
            .await
            .expect("event within deadline")
            .expect("channel alive");
        assert!(event.starts_with("error:"), "unexpected event: {event}");
    }
}
