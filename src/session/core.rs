//! STOMP session state machine and frame dispatch.
//!
//! [`StompSession`] owns the connection state, the pending-frame queue and
//! the observer; it bridges transport events to protocol actions. The
//! session itself never blocks: transport I/O is fire-and-forget, and
//! failures surface asynchronously as later disconnect/error callbacks.
//!
//! # Queued Sends
//!
//! SUBSCRIBE/SEND frames requested before the handshake completes are queued
//! as serialized wire text and flushed FIFO exactly once when the CONNECTED
//! frame arrives. The queue survives a disconnect: frames queued before or
//! during an outage go out on the next successful handshake. `disconnect()`
//! does not wait for queued frames to drain before the socket closes.
//!
//! # Locking
//!
//! State and queue live behind one mutex; the transport handle and observer
//! live outside it. Every handler releases the lock before sending frames or
//! invoking the observer, so observer callbacks may re-enter the session.

// ============================================================================
// Imports
// ============================================================================

use std::collections::VecDeque;
use std::sync::Arc;

use parking_lot::Mutex;
use serde::Serialize;
use tracing::{debug, error, trace, warn};

use crate::config::SessionConfig;
use crate::error::{Error, Result};
use crate::gift::GiftEventResponse;
use crate::protocol::codec;
use crate::protocol::frame::FrameCommand;
use crate::transport::{Transport, TransportEvents};

use super::observer::SessionObserver;
use super::state::ConnectionState;

// ============================================================================
// SessionInner
// ============================================================================

/// Mutable session state, exclusively owned behind the session mutex.
struct SessionInner {
    /// Current connection state.
    state: ConnectionState,

    /// Serialized frames awaiting transmission, FIFO.
    pending: VecDeque<String>,
}

// ============================================================================
// StompSession
// ============================================================================

/// A STOMP session over a fire-and-forget transport.
///
/// `StompSession` is a cheaply cloneable handle; clones share the same
/// state, queue, transport and observer. The transport event loop holds one
/// clone and drives the `handle_*` methods; callers hold another for
/// `connect`/`subscribe`/`publish`.
///
/// All transport callbacks arrive on a single sequential path (one event-loop
/// task), so handlers never run concurrently with each other.
#[derive(Clone)]
pub struct StompSession {
    /// Transport handle; all calls return immediately.
    transport: Arc<dyn Transport>,

    /// The single registered observer.
    observer: Arc<dyn SessionObserver>,

    /// Static session configuration.
    config: Arc<SessionConfig>,

    /// State and pending queue.
    inner: Arc<Mutex<SessionInner>>,
}

impl StompSession {
    /// Creates a session over the given transport with the given observer.
    ///
    /// The session starts in [`ConnectionState::Disconnected`]; nothing is
    /// transmitted until [`connect`](Self::connect) is called and the
    /// transport reports the socket open.
    #[must_use]
    pub fn new(
        config: SessionConfig,
        transport: Arc<dyn Transport>,
        observer: Arc<dyn SessionObserver>,
    ) -> Self {
        Self {
            transport,
            observer,
            config: Arc::new(config),
            inner: Arc::new(Mutex::new(SessionInner {
                state: ConnectionState::Disconnected,
                pending: VecDeque::new(),
            })),
        }
    }
}

// ============================================================================
// Public Operations
// ============================================================================

impl StompSession {
    /// Requests the transport to open the socket.
    ///
    /// Side effect only; state does not change until the transport signals
    /// open. May be called again after a disconnect.
    pub fn connect(&self) {
        debug!(endpoint = %self.config.endpoint, "Requesting transport open");
        self.transport.open();
    }

    /// Requests transport close and immediately forces `Disconnected`.
    ///
    /// Optimistic: does not wait for transport acknowledgement and does not
    /// drain the pending queue. Queued frames stay queued and flush on the
    /// next successful handshake.
    pub fn disconnect(&self) {
        self.inner.lock().state = ConnectionState::Disconnected;
        self.transport.close();
        debug!("Client-initiated disconnect");
    }

    /// Subscribes to a destination.
    ///
    /// Sends immediately when the session is ready, otherwise queues. No
    /// dedup is performed: calling twice emits two SUBSCRIBE frames; the
    /// client supports a single active subscription.
    pub fn subscribe(&self, destination: &str) {
        let frame = codec::subscribe(&self.config.subscription_id, destination);
        self.send_or_queue(frame.to_wire(), "SUBSCRIBE");
    }

    /// Publishes a JSON-serialized payload to a destination.
    ///
    /// Sends immediately when the session is ready, otherwise queues.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Json`] if the payload fails to serialize; nothing is
    /// queued or sent in that case.
    pub fn publish<T: Serialize>(&self, destination: &str, payload: &T) -> Result<()> {
        let body = serde_json::to_string(payload)?;
        let frame = codec::send(destination, &body);
        self.send_or_queue(frame.to_wire(), "SEND");
        Ok(())
    }

    /// Returns the current connection state.
    #[inline]
    #[must_use]
    pub fn state(&self) -> ConnectionState {
        self.inner.lock().state
    }

    /// Returns the number of frames awaiting transmission.
    #[inline]
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.inner.lock().pending.len()
    }

    /// Sends a serialized frame now if ready, otherwise queues it.
    fn send_or_queue(&self, wire: String, kind: &'static str) {
        let mut inner = self.inner.lock();
        if inner.state.is_ready() {
            drop(inner);
            trace!(kind, "Sending frame");
            self.transport.send_text(wire);
        } else {
            inner.pending.push_back(wire);
            debug!(kind, pending = inner.pending.len(), "Queued frame until ready");
        }
    }
}

// ============================================================================
// Transport-Event Handlers
// ============================================================================

impl StompSession {
    /// The transport reports a live socket.
    ///
    /// Transitions to `SocketOpen` and sends the CONNECT frame. The
    /// handshake frame is never queued; the transport just reported open.
    pub fn handle_socket_open(&self) {
        self.inner.lock().state = ConnectionState::SocketOpen;

        debug!("Socket open, sending CONNECT");
        let frame = codec::connect(&self.config.accept_versions, &self.config.heartbeat_header());
        self.transport.send_text(frame.to_wire());
    }

    /// The transport delivered a text frame.
    ///
    /// Unparseable frames are logged and discarded with no state change.
    /// CONNECTED drives the handshake; MESSAGE bodies are decoded and
    /// forwarded; everything else (including ERROR) is logged and ignored.
    pub fn handle_text(&self, raw: &str) {
        trace!(len = raw.len(), "Received text");

        let frame = match codec::parse(raw) {
            Ok(frame) => frame,
            Err(e) => {
                warn!(error = %e, "Discarding unparseable frame");
                return;
            }
        };

        match frame.command {
            FrameCommand::Connected => self.handle_connected(),
            FrameCommand::Message => self.handle_message(&frame.body),
            ref other => debug!(command = %other, "Ignoring frame"),
        }
    }

    /// The transport reports the socket closed with a close frame.
    pub fn handle_socket_closed(&self, reason: &str, code: u16) {
        self.inner.lock().state = ConnectionState::Disconnected;

        warn!(code, reason, "Socket closed");
        self.observer
            .on_disconnected(Some(Error::socket_closed(code, reason)));
    }

    /// The transport reports a socket-level failure.
    ///
    /// No automatic reconnect; retry is the caller's responsibility.
    pub fn handle_transport_error(&self, err: Error) {
        self.inner.lock().state = ConnectionState::Disconnected;

        error!(error = %err, "Transport error");
        self.observer.on_disconnected(Some(err));
    }

    /// CONNECTED frame: flip to ready and flush the queue FIFO, exactly once.
    ///
    /// A CONNECTED frame in any state other than `SocketOpen` is a no-op;
    /// the queue is untouched.
    fn handle_connected(&self) {
        let flushed = {
            let mut inner = self.inner.lock();
            if inner.state == ConnectionState::SocketOpen {
                inner.state = ConnectionState::Ready;
                Some(inner.pending.drain(..).collect::<Vec<_>>())
            } else {
                None
            }
        };

        let Some(pending) = flushed else {
            debug!(state = %self.state(), "Ignoring CONNECTED");
            return;
        };

        debug!(flushed = pending.len(), "Handshake acknowledged");
        for wire in pending {
            self.transport.send_text(wire);
        }

        // After the flush, so frames sent from the callback order behind
        // previously queued ones.
        self.observer.on_connected();
    }

    /// MESSAGE frame: decode the body and forward to the observer.
    ///
    /// A body that fails to decode is logged and dropped; the observer is
    /// not invoked and the connection state is unchanged.
    fn handle_message(&self, body: &str) {
        match serde_json::from_str::<GiftEventResponse>(body) {
            Ok(events) => {
                trace!("Forwarding gift events");
                self.observer.on_gift_events(events);
            }
            Err(e) => {
                warn!(error = %e, "Dropping MESSAGE with undecodable body");
            }
        }
    }
}

// ============================================================================
// TransportEvents
// ============================================================================

impl TransportEvents for StompSession {
    fn on_open(&self) {
        self.handle_socket_open();
    }

    fn on_text(&self, text: String) {
        self.handle_text(&text);
    }

    fn on_closed(&self, reason: String, code: u16) {
        self.handle_socket_closed(&reason, code);
    }

    fn on_error(&self, error: Error) {
        self.handle_transport_error(error);
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use crate::gift::GiftEventRequest;

    // ========================================================================
    // Test Doubles
    // ========================================================================

    /// Transport that records every call instead of doing I/O.
    #[derive(Default)]
    struct RecordingTransport {
        opens: Mutex<usize>,
        closes: Mutex<usize>,
        sent: Mutex<Vec<String>>,
    }

    impl RecordingTransport {
        fn sent(&self) -> Vec<String> {
            self.sent.lock().clone()
        }
    }

    impl Transport for RecordingTransport {
        fn open(&self) {
            *self.opens.lock() += 1;
        }

        fn close(&self) {
            *self.closes.lock() += 1;
        }

        fn send_text(&self, text: String) {
            self.sent.lock().push(text);
        }
    }

    /// Observer that records every callback.
    #[derive(Default)]
    struct RecordingObserver {
        connected: Mutex<usize>,
        gift_events: Mutex<Vec<GiftEventResponse>>,
        disconnects: Mutex<Vec<Option<Error>>>,
    }

    impl SessionObserver for RecordingObserver {
        fn on_connected(&self) {
            *self.connected.lock() += 1;
        }

        fn on_gift_events(&self, events: GiftEventResponse) {
            self.gift_events.lock().push(events);
        }

        fn on_disconnected(&self, error: Option<Error>) {
            self.disconnects.lock().push(error);
        }
    }

    fn session() -> (StompSession, Arc<RecordingTransport>, Arc<RecordingObserver>) {
        let transport = Arc::new(RecordingTransport::default());
        let observer = Arc::new(RecordingObserver::default());
        let session = StompSession::new(
            SessionConfig::new("ws://localhost:9010/wyftws"),
            transport.clone(),
            observer.clone(),
        );
        (session, transport, observer)
    }

    const CONNECTED_FRAME: &str = "CONNECTED\nversion:1.1\nheart-beat:0,0\n\n\0";

    const MESSAGE_FRAME: &str = "MESSAGE\ndestination:/topic/gift/events/abc\nsubscription:sub-0\n\n{\"giftCategory\":{\"RECEIVE\":{\"Basket\":{\"no\":[{\"giftName\":\"basket-1\",\"activate\":true,\"insertDate\":\"2024-11-19 12:00:00\",\"giftKey\":3,\"status\":\"READY\"}]}}}}\0";

    // ========================================================================
    // Connect / Handshake
    // ========================================================================

    #[test]
    fn test_connect_requests_transport_open_only() {
        let (session, transport, _) = session();

        session.connect();

        assert_eq!(*transport.opens.lock(), 1);
        assert_eq!(session.state(), ConnectionState::Disconnected);
        assert!(transport.sent().is_empty());
    }

    #[test]
    fn test_socket_open_sends_connect_unconditionally() {
        let (session, transport, _) = session();

        session.handle_socket_open();

        assert_eq!(session.state(), ConnectionState::SocketOpen);
        assert_eq!(
            transport.sent(),
            vec!["CONNECT\naccept-version:1.1,1.0\nheart-beat:10000,10000\n\n\0".to_string()]
        );
    }

    #[test]
    fn test_connected_transitions_to_ready_and_notifies() {
        let (session, _, observer) = session();
        session.handle_socket_open();

        session.handle_text(CONNECTED_FRAME);

        assert_eq!(session.state(), ConnectionState::Ready);
        assert_eq!(*observer.connected.lock(), 1);
    }

    #[test]
    fn test_connected_is_idempotent() {
        let (session, transport, observer) = session();
        session.handle_socket_open();
        session.handle_text(CONNECTED_FRAME);
        let sent_after_first = transport.sent().len();

        session.handle_text(CONNECTED_FRAME);

        assert_eq!(session.state(), ConnectionState::Ready);
        assert_eq!(transport.sent().len(), sent_after_first);
        assert_eq!(*observer.connected.lock(), 1);
    }

    #[test]
    fn test_connected_while_disconnected_is_ignored() {
        let (session, _, observer) = session();

        session.handle_text(CONNECTED_FRAME);

        assert_eq!(session.state(), ConnectionState::Disconnected);
        assert_eq!(*observer.connected.lock(), 0);
    }

    // ========================================================================
    // Queueing / Flush
    // ========================================================================

    #[test]
    fn test_subscribe_before_ready_queues() {
        let (session, transport, _) = session();

        session.subscribe("/topic/gift/events/abc");

        assert_eq!(session.pending_count(), 1);
        assert!(transport.sent().is_empty());
    }

    #[test]
    fn test_queued_frames_flush_fifo_on_ready() {
        let (session, transport, _) = session();

        session.subscribe("/topic/x");
        session
            .publish("/topic/y", &serde_json::json!({"a": 1}))
            .expect("publish");
        assert_eq!(session.pending_count(), 2);

        session.handle_socket_open();
        session.handle_text(CONNECTED_FRAME);

        let sent = transport.sent();
        assert_eq!(sent.len(), 3);
        assert!(sent[0].starts_with("CONNECT\n"));
        assert_eq!(sent[1], "SUBSCRIBE\nid:sub-0\ndestination:/topic/x\n\n\0");
        assert_eq!(
            sent[2],
            "SEND\ndestination:/topic/y\ncontent-length:7\n\n{\"a\":1}\0"
        );
        assert_eq!(session.pending_count(), 0);
        assert_eq!(session.state(), ConnectionState::Ready);
    }

    #[test]
    fn test_subscribe_while_ready_sends_immediately() {
        let (session, transport, _) = session();
        session.handle_socket_open();
        session.handle_text(CONNECTED_FRAME);

        session.subscribe("/topic/gift/events/abc");

        assert_eq!(session.pending_count(), 0);
        assert_eq!(
            transport.sent().last().map(String::as_str),
            Some("SUBSCRIBE\nid:sub-0\ndestination:/topic/gift/events/abc\n\n\0")
        );
    }

    #[test]
    fn test_no_subscribe_dedup() {
        let (session, _, _) = session();

        session.subscribe("/topic/x");
        session.subscribe("/topic/x");

        assert_eq!(session.pending_count(), 2);
    }

    #[test]
    fn test_publish_gift_event_request_body() {
        let (session, transport, _) = session();
        session.handle_socket_open();
        session.handle_text(CONNECTED_FRAME);

        let request = GiftEventRequest::new("abc", "127.01", "37.51");
        session
            .publish("/pub/gift/events/abc", &request)
            .expect("publish");

        let wire = transport.sent().last().cloned().expect("sent frame");
        assert!(wire.starts_with("SEND\ndestination:/pub/gift/events/abc\n"));
        assert!(wire.contains("\"memberUuid\":\"abc\""));
        assert!(wire.contains("\"category\":\"ALL\""));
    }

    #[test]
    fn test_queue_survives_disconnect() {
        let (session, transport, _) = session();

        session.subscribe("/topic/x");
        session.disconnect();
        assert_eq!(session.pending_count(), 1);

        session.handle_socket_open();
        session.handle_text(CONNECTED_FRAME);

        assert_eq!(session.pending_count(), 0);
        assert!(
            transport
                .sent()
                .iter()
                .any(|wire| wire.starts_with("SUBSCRIBE\n"))
        );
    }

    // ========================================================================
    // Message Dispatch
    // ========================================================================

    #[test]
    fn test_message_forwards_decoded_gift_events() {
        let (session, _, observer) = session();
        session.handle_socket_open();
        session.handle_text(CONNECTED_FRAME);

        session.handle_text(MESSAGE_FRAME);

        let events = observer.gift_events.lock();
        assert_eq!(events.len(), 1);
        let receive = events[0].gift_category.receive.as_ref().expect("receive");
        let basket = receive.basket.as_ref().expect("basket");
        let records = basket.no.as_ref().expect("no-shape records");
        assert_eq!(records[0].gift_name, "basket-1");
        assert_eq!(session.state(), ConnectionState::Ready);
    }

    #[test]
    fn test_undecodable_message_body_is_dropped() {
        let (session, _, observer) = session();
        session.handle_socket_open();
        session.handle_text(CONNECTED_FRAME);

        session.handle_text("MESSAGE\ndestination:/topic/x\n\nnot-json\0");

        assert!(observer.gift_events.lock().is_empty());
        assert_eq!(session.state(), ConnectionState::Ready);
    }

    #[test]
    fn test_malformed_frame_is_dropped_without_state_change() {
        let (session, _, observer) = session();
        session.handle_socket_open();

        session.handle_text("garbage with no boundary");

        assert_eq!(session.state(), ConnectionState::SocketOpen);
        assert_eq!(*observer.connected.lock(), 0);
        assert!(observer.disconnects.lock().is_empty());
    }

    #[test]
    fn test_error_frame_is_ignored() {
        let (session, _, observer) = session();
        session.handle_socket_open();
        session.handle_text(CONNECTED_FRAME);

        session.handle_text("ERROR\nmessage:bad destination\n\ndetails\0");

        assert_eq!(session.state(), ConnectionState::Ready);
        assert!(observer.disconnects.lock().is_empty());
    }

    // ========================================================================
    // Disconnect Paths
    // ========================================================================

    #[test]
    fn test_socket_closed_reports_code_and_reason() {
        let (session, _, observer) = session();
        session.handle_socket_open();
        session.handle_text(CONNECTED_FRAME);

        session.handle_socket_closed("timeout", 1006);

        assert_eq!(session.state(), ConnectionState::Disconnected);
        let disconnects = observer.disconnects.lock();
        assert_eq!(disconnects.len(), 1);
        let err = disconnects[0].as_ref().expect("error");
        assert_eq!(err.close_code(), Some(1006));
        assert!(err.to_string().contains("timeout"));
    }

    #[test]
    fn test_transport_error_forces_disconnected() {
        let (session, _, observer) = session();
        session.handle_socket_open();

        session.handle_transport_error(Error::ConnectionClosed);

        assert_eq!(session.state(), ConnectionState::Disconnected);
        let disconnects = observer.disconnects.lock();
        assert!(matches!(
            disconnects[0],
            Some(Error::ConnectionClosed)
        ));
    }

    #[test]
    fn test_disconnect_is_optimistic() {
        let (session, transport, observer) = session();
        session.handle_socket_open();
        session.handle_text(CONNECTED_FRAME);

        session.disconnect();

        assert_eq!(session.state(), ConnectionState::Disconnected);
        assert_eq!(*transport.closes.lock(), 1);
        // Client-initiated disconnect does not notify the observer.
        assert!(observer.disconnects.lock().is_empty());
    }

    #[test]
    fn test_reconnect_after_disconnect() {
        let (session, transport, observer) = session();
        session.handle_socket_open();
        session.handle_text(CONNECTED_FRAME);
        session.handle_socket_closed("going away", 1001);

        session.connect();
        session.handle_socket_open();
        session.handle_text(CONNECTED_FRAME);

        assert_eq!(session.state(), ConnectionState::Ready);
        assert_eq!(*transport.opens.lock(), 1);
        assert_eq!(*observer.connected.lock(), 2);
    }

    // ========================================================================
    // Re-entrancy
    // ========================================================================

    /// Observer that subscribes from inside `on_connected`, the way a UI
    /// layer subscribes as soon as the handshake completes.
    #[derive(Default)]
    struct SubscribingObserver {
        session: Mutex<Option<StompSession>>,
    }

    impl SessionObserver for SubscribingObserver {
        fn on_connected(&self) {
            if let Some(session) = self.session.lock().as_ref() {
                session.subscribe("/topic/gift/events/abc");
            }
        }

        fn on_gift_events(&self, _events: GiftEventResponse) {}
    }

    #[test]
    fn test_observer_may_reenter_session() {
        let transport = Arc::new(RecordingTransport::default());
        let observer = Arc::new(SubscribingObserver::default());
        let session = StompSession::new(
            SessionConfig::new("ws://localhost:9010/wyftws"),
            transport.clone(),
            observer.clone(),
        );
        *observer.session.lock() = Some(session.clone());

        session.subscribe("/topic/queued-first");
        session.handle_socket_open();
        session.handle_text(CONNECTED_FRAME);

        let sent = transport.sent();
        assert_eq!(sent.len(), 3);
        assert!(sent[0].starts_with("CONNECT\n"));
        assert!(sent[1].contains("/topic/queued-first"));
        assert!(sent[2].contains("/topic/gift/events/abc"));
    }
}
