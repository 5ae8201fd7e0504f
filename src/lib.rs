//! Gift STOMP - Minimal STOMP-over-WebSocket client for the gift events feed.
//!
//! This library establishes a STOMP session over a WebSocket transport,
//! subscribes to gift event topics, publishes gift event queries and decodes
//! incoming frames into typed application events.
//!
//! # Architecture
//!
//! The client is layered around one protocol state machine:
//!
//! - **Codec** ([`protocol`]): pure translation between structured frames
//!   and NUL-terminated STOMP wire text
//! - **Session** ([`session`]): connection state, pending-frame queue,
//!   observer dispatch
//! - **Transport** ([`transport`]): fire-and-forget WebSocket handle with a
//!   tokio event-loop task behind it
//!
//! Key design principles:
//!
//! - One session, one observer, one subscription; no pooling, no fan-out
//! - SUBSCRIBE/SEND issued before the handshake completes are queued and
//!   flushed FIFO when the broker's CONNECTED frame arrives
//! - Nothing blocks: sends return immediately, failures surface as later
//!   disconnect callbacks
//! - No automatic reconnect: `connect()` is re-entrant and retry policy
//!   belongs to the caller
//!
//! # Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use gift_stomp::{
//!     GiftEventRequest, GiftEventResponse, GiftEventService, SessionConfig, SessionObserver,
//! };
//!
//! struct PrintObserver;
//!
//! impl SessionObserver for PrintObserver {
//!     fn on_gift_events(&self, events: GiftEventResponse) {
//!         println!("gift events: {events:?}");
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() -> gift_stomp::Result<()> {
//!     let service = GiftEventService::new(
//!         SessionConfig::new("ws://192.168.0.48:9010/wyftws"),
//!         Arc::new(PrintObserver),
//!     )?;
//!
//!     service.connect();
//!     service.subscribe_to_gift_events("hvbkkuDrJDZFP23ZSaguk8rbQBF3");
//!     service.request_gift_events(&GiftEventRequest::new(
//!         "hvbkkuDrJDZFP23ZSaguk8rbQBF3",
//!         "0.0",
//!         "0.0",
//!     ))?;
//!
//!     Ok(())
//! }
//! ```
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`config`] | Session configuration |
//! | [`error`] | Error types and [`Result`] alias |
//! | [`gift`] | Gift event payload schema |
//! | [`protocol`] | STOMP frame types and codec |
//! | [`service`] | Gift event service facade |
//! | [`session`] | Session state machine and observer contract |
//! | [`transport`] | WebSocket transport layer |

// ============================================================================
// Modules
// ============================================================================

/// Session configuration.
///
/// Use [`SessionConfig::new`] and the `with_*` builders.
pub mod config;

/// Error types and result aliases.
///
/// All fallible operations return [`Result<T>`] which uses [`Error`].
pub mod error;

/// Gift event payload schema.
///
/// Request and response shapes carried in SEND and MESSAGE frame bodies.
pub mod gift;

/// STOMP frame types and codec.
///
/// Structured [`Frame`] construction and parsing; no I/O.
pub mod protocol;

/// Gift event service facade.
///
/// Explicitly constructed wiring of config, transport and session.
pub mod service;

/// Session state machine and observer contract.
pub mod session;

/// WebSocket transport layer.
///
/// The fire-and-forget [`Transport`] seam and its tokio-tungstenite
/// implementation.
pub mod transport;

// ============================================================================
// Re-exports
// ============================================================================

// Configuration
pub use config::SessionConfig;

// Error types
pub use error::{Error, Result};

// Gift payloads
pub use gift::{GiftEventRequest, GiftEventResponse, GiftStatus};

// Protocol types
pub use protocol::{Frame, FrameCommand};

// Service facade
pub use service::GiftEventService;

// Session types
pub use session::{ConnectionState, SessionObserver, StompSession};

// Transport types
pub use transport::{Transport, TransportEvents, WebSocketTransport};
