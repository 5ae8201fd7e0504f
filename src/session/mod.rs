//! STOMP session layer.
//!
//! This module owns the protocol state machine: connection state, the
//! pending-frame queue and observer dispatch. The transport delivers raw
//! socket events; the session turns them into protocol actions and decoded
//! application events.
//!
//! # Lifecycle
//!
//! ```text
//! Disconnected --connect()/transport-open--> SocketOpen
//! SocketOpen --CONNECTED frame parsed--> Ready
//! SocketOpen|Ready --socket closed/error--> Disconnected
//! Ready --disconnect()--> Disconnected
//! ```
//!
//! SUBSCRIBE/SEND requests issued before `Ready` are queued and flushed FIFO
//! when the CONNECTED frame arrives. There is no automatic reconnect;
//! `connect()` may be called again from `Disconnected`.
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `state` | Connection state enum |
//! | `observer` | Observer callback contract |
//! | `core` | Session state machine and frame dispatch |

// ============================================================================
// Submodules
// ============================================================================

/// Connection state enum.
pub mod state;

/// Observer callback contract.
pub mod observer;

/// Session state machine and frame dispatch.
pub mod core;

// ============================================================================
// Re-exports
// ============================================================================

pub use self::core::StompSession;
pub use observer::SessionObserver;
pub use state::ConnectionState;
