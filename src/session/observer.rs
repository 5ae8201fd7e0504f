//! Session observer contract.

// ============================================================================
// Imports
// ============================================================================

use crate::error::Error;
use crate::gift::GiftEventResponse;

// ============================================================================
// SessionObserver
// ============================================================================

/// Callbacks a session delivers decoded protocol outcomes to.
///
/// Exactly one observer is registered per session, injected at construction;
/// registering a different observer requires constructing a new session
/// (single-subscriber design).
///
/// Callbacks are invoked on the transport event-loop task, never
/// concurrently with each other, and outside the session's internal lock,
/// so an observer may call back into the session, e.g. `subscribe` from
/// [`on_connected`](Self::on_connected).
pub trait SessionObserver: Send + Sync {
    /// The STOMP handshake completed; queued frames have been flushed.
    fn on_connected(&self) {}

    /// A MESSAGE frame was decoded into gift events.
    fn on_gift_events(&self, events: GiftEventResponse);

    /// The session dropped to disconnected.
    ///
    /// `error` carries the transport failure; it is `None` only when the
    /// transport reports a close with no failure attached.
    fn on_disconnected(&self, error: Option<Error>) {
        let _ = error;
    }
}
