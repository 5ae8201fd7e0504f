//! WebSocket transport layer.
//!
//! This module defines the transport seam the session talks through and the
//! production WebSocket implementation behind it.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────┐                            ┌─────────────────┐
//! │  StompSession    │  Transport (commands)      │  Event loop     │
//! │                  │───────────────────────────►│  (tokio task)   │
//! │  TransportEvents │◄───────────────────────────│                 │
//! │  (callbacks)     │      open/text/closed/err  │  tokio-         │
//! └──────────────────┘                            │  tungstenite    │
//!                                                 └─────────────────┘
//! ```
//!
//! All [`Transport`] calls are fire-and-forget: they return immediately and
//! never block. Success or failure surfaces asynchronously through
//! [`TransportEvents`], which the event loop invokes on a single sequential
//! path; callbacks never overlap.
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `websocket` | tokio-tungstenite transport and event loop |

// ============================================================================
// Submodules
// ============================================================================

/// tokio-tungstenite transport and event loop.
pub mod websocket;

// ============================================================================
// Imports
// ============================================================================

use crate::error::Error;

// ============================================================================
// Transport
// ============================================================================

/// Fire-and-forget transport handle the session sends through.
///
/// All methods return immediately; failures surface later as
/// [`TransportEvents`] callbacks. Implementations must be safe to call from
/// any thread.
pub trait Transport: Send + Sync {
    /// Requests the socket to open.
    fn open(&self);

    /// Requests the socket to close.
    ///
    /// No drain guarantee: text passed to [`send_text`](Self::send_text)
    /// before `close` may or may not be transmitted.
    fn close(&self);

    /// Requests transmission of one text frame.
    fn send_text(&self, text: String);
}

// ============================================================================
// TransportEvents
// ============================================================================

/// Callbacks a transport delivers socket events through.
///
/// Invoked by the event loop on a single sequential path, never
/// concurrently.
pub trait TransportEvents: Send + Sync {
    /// The socket is open and ready for text frames.
    fn on_open(&self);

    /// A text frame arrived.
    fn on_text(&self, text: String);

    /// The remote closed the socket with a close frame.
    fn on_closed(&self, reason: String, code: u16);

    /// The socket failed (dial failure, stream error, abrupt end).
    fn on_error(&self, error: Error);
}

// ============================================================================
// Re-exports
// ============================================================================

pub use websocket::{WebSocketDriver, WebSocketTransport};
