//! Error types for the gift STOMP client.
//!
//! This module defines all error types used throughout the crate.
//!
//! # Usage
//!
//! All fallible operations return [`Result<T>`] which uses [`Error`]:
//!
//! ```ignore
//! use gift_stomp::{Result, Error};
//!
//! fn example(session: &StompSession, request: &GiftEventRequest) -> Result<()> {
//!     session.publish("/pub/gift/events/abc", request)?;
//!     Ok(())
//! }
//! ```
//!
//! # Error Categories
//!
//! | Category | Variants |
//! |----------|----------|
//! | Configuration | [`Error::Config`] |
//! | Protocol | [`Error::MalformedFrame`], [`Error::Json`] |
//! | Transport | [`Error::Connection`], [`Error::ConnectionTimeout`], [`Error::ConnectionClosed`], [`Error::SocketClosed`], [`Error::WebSocket`] |
//!
//! Protocol errors are recovered locally by the session (the offending frame
//! is logged and dropped). Transport errors always force the session to
//! `Disconnected` and are surfaced to the observer via `on_disconnected`.

// ============================================================================
// Imports
// ============================================================================

use std::result::Result as StdResult;

use thiserror::Error;
use tokio_tungstenite::tungstenite::Error as WsError;

// ============================================================================
// Result Alias
// ============================================================================

/// Result type alias using crate [`enum@Error`].
///
/// All fallible operations in this crate return this type.
pub type Result<T> = StdResult<T, Error>;

// ============================================================================
// Error Enum
// ============================================================================

/// Main error type for the crate.
///
/// Each variant includes relevant context for debugging.
#[derive(Error, Debug)]
pub enum Error {
    // ========================================================================
    // Configuration Errors
    // ========================================================================
    /// Configuration error.
    ///
    /// Returned when the session configuration is invalid, e.g. an endpoint
    /// URL that does not parse or uses a non-WebSocket scheme.
    #[error("Configuration error: {message}")]
    Config {
        /// Description of the configuration error.
        message: String,
    },

    // ========================================================================
    // Protocol Errors
    // ========================================================================
    /// Received text is not a valid STOMP frame.
    ///
    /// Raised by the frame parser when no header/body boundary exists or the
    /// command line is empty. The session logs and discards such frames.
    #[error("Malformed frame: {message}")]
    MalformedFrame {
        /// Description of what made the frame unparseable.
        message: String,
    },

    // ========================================================================
    // Transport Errors
    // ========================================================================
    /// WebSocket connection failed.
    ///
    /// Returned when the connection cannot be established or a send fails.
    #[error("Connection failed: {message}")]
    Connection {
        /// Description of the connection error.
        message: String,
    },

    /// Connection timeout while dialing the endpoint.
    #[error("Connection timeout after {timeout_ms}ms")]
    ConnectionTimeout {
        /// Milliseconds waited before timeout.
        timeout_ms: u64,
    },

    /// WebSocket connection closed unexpectedly.
    ///
    /// Returned when the stream ends without a close frame.
    #[error("Connection closed")]
    ConnectionClosed,

    /// Socket closed by the remote with a close frame.
    #[error("Socket closed: {reason} (code {code})")]
    SocketClosed {
        /// WebSocket close code (e.g. 1006 for abnormal closure).
        code: u16,
        /// Close reason reported by the remote.
        reason: String,
    },

    // ========================================================================
    // External Errors
    // ========================================================================
    /// JSON serialization or deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// WebSocket error.
    #[error("WebSocket error: {0}")]
    WebSocket(#[from] WsError),
}

// ============================================================================
// Error Constructors
// ============================================================================

impl Error {
    /// Creates a configuration error.
    #[inline]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Creates a malformed frame error.
    #[inline]
    pub fn malformed_frame(message: impl Into<String>) -> Self {
        Self::MalformedFrame {
            message: message.into(),
        }
    }

    /// Creates a connection error.
    #[inline]
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Creates a connection timeout error.
    #[inline]
    pub fn connection_timeout(timeout_ms: u64) -> Self {
        Self::ConnectionTimeout { timeout_ms }
    }

    /// Creates a socket closed error from a close frame.
    #[inline]
    pub fn socket_closed(code: u16, reason: impl Into<String>) -> Self {
        Self::SocketClosed {
            code,
            reason: reason.into(),
        }
    }
}

// ============================================================================
// Error Predicates
// ============================================================================

impl Error {
    /// Returns `true` if this is a transport-level error.
    ///
    /// Transport errors force the session to `Disconnected` and are surfaced
    /// to the observer.
    #[inline]
    #[must_use]
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Self::Connection { .. }
                | Self::ConnectionTimeout { .. }
                | Self::ConnectionClosed
                | Self::SocketClosed { .. }
                | Self::WebSocket(_)
        )
    }

    /// Returns `true` if this is a protocol-level error.
    ///
    /// Protocol errors are recovered locally: the offending frame is dropped
    /// and the session state is unchanged.
    #[inline]
    #[must_use]
    pub fn is_protocol(&self) -> bool {
        matches!(self, Self::MalformedFrame { .. } | Self::Json(_))
    }

    /// Returns the WebSocket close code, if this error carries one.
    #[inline]
    #[must_use]
    pub fn close_code(&self) -> Option<u16> {
        match self {
            Self::SocketClosed { code, .. } => Some(*code),
            _ => None,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
