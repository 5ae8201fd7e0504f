//! Session configuration.
//!
//! Provides a type-safe interface for configuring a STOMP session: endpoint
//! URL, the capabilities declared in the CONNECT frame, the transport dial
//! timeout and the subscription id.
//!
//! All values are static per session instance; there is no runtime
//! renegotiation.
//!
//! # Example
//!
//! ```ignore
//! use gift_stomp::SessionConfig;
//! use std::time::Duration;
//!
//! let config = SessionConfig::new("ws://broker.example:9010/wyftws")
//!     .with_heartbeat(5_000, 5_000)
//!     .with_dial_timeout(Duration::from_secs(3));
//! ```

// ============================================================================
// Imports
// ============================================================================

use std::time::Duration;

use url::Url;

use crate::error::{Error, Result};

// ============================================================================
// Defaults
// ============================================================================

/// Default STOMP versions declared in the CONNECT frame.
pub const DEFAULT_ACCEPT_VERSIONS: &str = "1.1,1.0";

/// Default client heartbeat declaration in milliseconds (outgoing, incoming).
pub const DEFAULT_HEARTBEAT: (u32, u32) = (10_000, 10_000);

/// Default transport dial timeout.
pub const DEFAULT_DIAL_TIMEOUT: Duration = Duration::from_secs(5);

/// Default subscription id.
///
/// The client supports exactly one active subscription, so a single fixed id
/// suffices.
pub const DEFAULT_SUBSCRIPTION_ID: &str = "sub-0";

// ============================================================================
// SessionConfig
// ============================================================================

/// Configuration for a STOMP session.
///
/// Carries the WebSocket endpoint plus the client-declared handshake
/// capabilities. The heartbeat pair is declared in the CONNECT frame only;
/// the client does not negotiate or emit heartbeats beyond that.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    /// WebSocket endpoint URL (`ws://` or `wss://`).
    pub endpoint: String,

    /// STOMP versions offered in the `accept-version` header.
    pub accept_versions: String,

    /// Heartbeat declaration in milliseconds (client-outgoing, client-incoming).
    pub heartbeat: (u32, u32),

    /// Maximum time to wait for the WebSocket dial to complete.
    pub dial_timeout: Duration,

    /// Id used in the SUBSCRIBE frame.
    pub subscription_id: String,
}

// ============================================================================
// Constructors
// ============================================================================

impl SessionConfig {
    /// Creates a configuration for the given endpoint with default settings.
    #[inline]
    #[must_use]
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            accept_versions: DEFAULT_ACCEPT_VERSIONS.to_string(),
            heartbeat: DEFAULT_HEARTBEAT,
            dial_timeout: DEFAULT_DIAL_TIMEOUT,
            subscription_id: DEFAULT_SUBSCRIPTION_ID.to_string(),
        }
    }
}

// ============================================================================
// Builder Methods
// ============================================================================

impl SessionConfig {
    /// Sets the `accept-version` header value.
    #[inline]
    #[must_use]
    pub fn with_accept_versions(mut self, versions: impl Into<String>) -> Self {
        self.accept_versions = versions.into();
        self
    }

    /// Sets the heartbeat declaration in milliseconds.
    #[inline]
    #[must_use]
    pub fn with_heartbeat(mut self, outgoing_ms: u32, incoming_ms: u32) -> Self {
        self.heartbeat = (outgoing_ms, incoming_ms);
        self
    }

    /// Sets the transport dial timeout.
    #[inline]
    #[must_use]
    pub fn with_dial_timeout(mut self, timeout: Duration) -> Self {
        self.dial_timeout = timeout;
        self
    }

    /// Sets the subscription id.
    #[inline]
    #[must_use]
    pub fn with_subscription_id(mut self, id: impl Into<String>) -> Self {
        self.subscription_id = id.into();
        self
    }
}

// ============================================================================
// Conversion Methods
// ============================================================================

impl SessionConfig {
    /// Renders the heartbeat pair as a `heart-beat` header value.
    #[inline]
    #[must_use]
    pub fn heartbeat_header(&self) -> String {
        format!("{},{}", self.heartbeat.0, self.heartbeat.1)
    }

    /// Parses and validates the endpoint URL.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the endpoint does not parse as a URL or
    /// its scheme is not `ws` or `wss`.
    pub fn endpoint_url(&self) -> Result<Url> {
        let url = Url::parse(&self.endpoint)
            .map_err(|e| Error::config(format!("invalid endpoint {:?}: {e}", self.endpoint)))?;

        match url.scheme() {
            "ws" | "wss" => Ok(url),
            scheme => Err(Error::config(format!(
                "endpoint scheme must be ws or wss, got {scheme:?}"
            ))),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
