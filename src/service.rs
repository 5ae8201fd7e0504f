//! Gift event service facade.
//!
//! Wires configuration, the WebSocket transport and the STOMP session into
//! one explicitly constructed, caller-owned object, and owns the gift topic
//! naming scheme. Construct one per connection; there is no shared global
//! instance, and lifecycle is entirely caller-controlled.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use gift_stomp::{GiftEventRequest, GiftEventService, SessionConfig};
//!
//! let service = GiftEventService::new(
//!     SessionConfig::new("ws://192.168.0.48:9010/wyftws"),
//!     Arc::new(MyObserver),
//! )?;
//!
//! service.connect();
//! service.subscribe_to_gift_events("hvbkkuDrJDZFP23ZSaguk8rbQBF3");
//! service.request_gift_events(&GiftEventRequest::new(
//!     "hvbkkuDrJDZFP23ZSaguk8rbQBF3",
//!     "0.0",
//!     "0.0",
//! ))?;
//! ```

// ============================================================================
// Imports
// ============================================================================

use std::sync::Arc;

use tracing::debug;

use crate::config::SessionConfig;
use crate::error::Result;
use crate::gift::GiftEventRequest;
use crate::session::{SessionObserver, StompSession};
use crate::transport::WebSocketTransport;

// ============================================================================
// Topic Naming
// ============================================================================

/// Topic prefix gift events are delivered on.
const GIFT_EVENTS_TOPIC_PREFIX: &str = "/topic/gift/events";

/// Destination prefix gift event queries are published to.
const GIFT_EVENTS_PUBLISH_PREFIX: &str = "/pub/gift/events";

/// Returns the broker topic delivering gift events for a member.
#[inline]
#[must_use]
pub fn gift_events_topic(member_uuid: &str) -> String {
    format!("{GIFT_EVENTS_TOPIC_PREFIX}/{member_uuid}")
}

/// Returns the broker destination accepting gift event queries for a member.
#[inline]
#[must_use]
pub fn gift_events_destination(member_uuid: &str) -> String {
    format!("{GIFT_EVENTS_PUBLISH_PREFIX}/{member_uuid}")
}

// ============================================================================
// GiftEventService
// ============================================================================

/// Caller-owned handle to a gift event feed.
///
/// Construction validates the endpoint, spawns the transport event loop and
/// binds the session to the given observer. Dropping the service (and every
/// session clone obtained from it) terminates the event loop.
pub struct GiftEventService {
    session: StompSession,
}

impl GiftEventService {
    /// Builds the service and spawns its transport.
    ///
    /// Must be called within a tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`](crate::Error::Config) if the configured
    /// endpoint is not a valid `ws://`/`wss://` URL.
    pub fn new(config: SessionConfig, observer: Arc<dyn SessionObserver>) -> Result<Self> {
        let endpoint = config.endpoint_url()?;

        let (transport, driver) = WebSocketTransport::new(endpoint, config.dial_timeout);
        let session = StompSession::new(config, Arc::new(transport), observer);
        driver.spawn(Arc::new(session.clone()));

        debug!("Gift event service constructed");
        Ok(Self { session })
    }

    /// Opens the connection.
    pub fn connect(&self) {
        self.session.connect();
    }

    /// Closes the connection.
    pub fn disconnect(&self) {
        self.session.disconnect();
    }

    /// Subscribes to the gift events topic for a member.
    pub fn subscribe_to_gift_events(&self, member_uuid: &str) {
        self.session.subscribe(&gift_events_topic(member_uuid));
    }

    /// Publishes a gift event query.
    ///
    /// The destination is derived from the request's member uuid.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Json`](crate::Error::Json) if the request fails to
    /// serialize.
    pub fn request_gift_events(&self, request: &GiftEventRequest) -> Result<()> {
        self.session
            .publish(&gift_events_destination(&request.member_uuid), request)
    }

    /// Returns the underlying session.
    #[inline]
    #[must_use]
    pub fn session(&self) -> &StompSession {
        &self.session
    }
}

// ============================================================================
// Tests
// ============================================================================
