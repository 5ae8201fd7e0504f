//! Session connection state.

// ============================================================================
// Imports
// ============================================================================

use std::fmt;

// ============================================================================
// ConnectionState
// ============================================================================

/// Lifecycle state of a STOMP session.
///
/// ```text
/// Disconnected --connect()/transport-open--> SocketOpen
/// SocketOpen --CONNECTED frame parsed--> Ready
/// SocketOpen|Ready --socket closed/error--> Disconnected
/// Ready --disconnect()--> Disconnected
/// ```
///
/// `Disconnected` is both the initial state and the state after any failure;
/// it is re-entrant; `connect()` may be called again from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectionState {
    /// No live transport. Initial state and the state after any close/error.
    #[default]
    Disconnected,

    /// Transport reports a live socket, STOMP handshake not yet acknowledged.
    SocketOpen,

    /// CONNECTED frame received; outbound frames are transmitted immediately.
    Ready,
}

impl ConnectionState {
    /// Returns `true` if outbound frames may be transmitted immediately.
    #[inline]
    #[must_use]
    pub fn is_ready(self) -> bool {
        self == Self::Ready
    }

    /// Returns `true` if no live transport exists.
    #[inline]
    #[must_use]
    pub fn is_disconnected(self) -> bool {
        self == Self::Disconnected
    }
}

impl fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Disconnected => "disconnected",
            Self::SocketOpen => "socket-open",
            Self::Ready => "ready",
        };
        f.write_str(name)
    }
}

// ============================================================================
// Tests
// ============================================================================
