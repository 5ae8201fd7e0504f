//! Structured frame type and wire serialization.
//!
//! A [`Frame`] is one STOMP protocol unit: a command, ordered header pairs
//! and an optional body. Frames serialize deterministically: headers are
//! written in insertion order and the body is terminated by a single NUL
//! byte, so building the same frame twice yields byte-identical wire text.

// ============================================================================
// Imports
// ============================================================================

use std::fmt;

// ============================================================================
// FrameCommand
// ============================================================================

/// STOMP command token of a frame.
///
/// Unrecognized inbound commands are carried as [`FrameCommand::Other`]
/// rather than rejected; classification is the session's job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrameCommand {
    /// Client handshake request.
    Connect,
    /// Broker handshake acknowledgement.
    Connected,
    /// Client subscription registration.
    Subscribe,
    /// Client payload publication.
    Send,
    /// Broker payload delivery.
    Message,
    /// Broker-reported failure.
    Error,
    /// Any other command token.
    Other(String),
}

impl FrameCommand {
    /// Returns the wire representation of the command.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Connect => "CONNECT",
            Self::Connected => "CONNECTED",
            Self::Subscribe => "SUBSCRIBE",
            Self::Send => "SEND",
            Self::Message => "MESSAGE",
            Self::Error => "ERROR",
            Self::Other(token) => token,
        }
    }
}

impl From<&str> for FrameCommand {
    fn from(token: &str) -> Self {
        match token {
            "CONNECT" => Self::Connect,
            "CONNECTED" => Self::Connected,
            "SUBSCRIBE" => Self::Subscribe,
            "SEND" => Self::Send,
            "MESSAGE" => Self::Message,
            "ERROR" => Self::Error,
            other => Self::Other(other.to_string()),
        }
    }
}

impl fmt::Display for FrameCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Frame
// ============================================================================

/// One STOMP frame: command, ordered headers, body.
///
/// Header keys are unique by construction on the build path; insertion order
/// is preserved for serialization but irrelevant for lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// Frame command.
    pub command: FrameCommand,

    /// Header pairs in insertion order.
    pub headers: Vec<(String, String)>,

    /// Frame body; empty for handshake and subscription frames.
    pub body: String,
}

// ============================================================================
// Constructors
// ============================================================================

impl Frame {
    /// Creates a bodyless frame with no headers.
    #[inline]
    #[must_use]
    pub fn new(command: FrameCommand) -> Self {
        Self {
            command,
            headers: Vec::new(),
            body: String::new(),
        }
    }

    /// Appends a header pair.
    #[inline]
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Sets the frame body.
    #[inline]
    #[must_use]
    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }
}

// ============================================================================
// Accessors
// ============================================================================

impl Frame {
    /// Looks up a header value by name.
    ///
    /// Returns the first match; lookup is insensitive to header order.
    #[inline]
    #[must_use]
    pub fn header_value(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Returns `true` if the frame carries a non-empty body.
    #[inline]
    #[must_use]
    pub fn has_body(&self) -> bool {
        !self.body.is_empty()
    }
}

// ============================================================================
// Wire Serialization
// ============================================================================

impl Frame {
    /// Serializes the frame to NUL-terminated wire text.
    ///
    /// Output is deterministic: command line, headers in insertion order,
    /// blank-line separator, body, single NUL terminator.
    #[must_use]
    pub fn to_wire(&self) -> String {
        let mut wire = String::with_capacity(
            self.command.as_str().len() + self.headers.len() * 16 + self.body.len() + 4,
        );

        wire.push_str(self.command.as_str());
        wire.push('\n');

        for (name, value) in &self.headers {
            wire.push_str(name);
            wire.push(':');
            wire.push_str(value);
            wire.push('\n');
        }

        wire.push('\n');
        wire.push_str(&self.body);
        wire.push('\0');
        wire
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_round_trip() {
        for token in ["CONNECT", "CONNECTED", "SUBSCRIBE", "SEND", "MESSAGE", "ERROR"] {
            let command = FrameCommand::from(token);
            assert_eq!(command.as_str(), token);
            assert!(!matches!(command, FrameCommand::Other(_)));
        }
    }

    #[test]
    fn test_unknown_command() {
        let command = FrameCommand::from("RECEIPT");
        assert_eq!(command, FrameCommand::Other("RECEIPT".to_string()));
        assert_eq!(command.as_str(), "RECEIPT");
    }

    #[test]
    fn test_to_wire_headers_in_insertion_order() {
        let frame = Frame::new(FrameCommand::Subscribe)
            .header("id", "sub-0")
            .header("destination", "/topic/gift/events/abc");

        assert_eq!(
            frame.to_wire(),
            "SUBSCRIBE\nid:sub-0\ndestination:/topic/gift/events/abc\n\n\0"
        );
    }

    #[test]
    fn test_to_wire_with_body() {
        let frame = Frame::new(FrameCommand::Send)
            .header("destination", "/pub/x")
            .body("{\"a\":1}");

        assert_eq!(frame.to_wire(), "SEND\ndestination:/pub/x\n\n{\"a\":1}\0");
    }

    #[test]
    fn test_to_wire_deterministic() {
        let build = || {
            Frame::new(FrameCommand::Connect)
                .header("accept-version", "1.1,1.0")
                .header("heart-beat", "10000,10000")
        };
        assert_eq!(build().to_wire(), build().to_wire());
    }

    #[test]
    fn test_header_lookup() {
        let frame = Frame::new(FrameCommand::Message)
            .header("destination", "/topic/x")
            .header("content-length", "2");

        assert_eq!(frame.header_value("destination"), Some("/topic/x"));
        assert_eq!(frame.header_value("content-length"), Some("2"));
        assert_eq!(frame.header_value("subscription"), None);
    }

    #[test]
    fn test_has_body() {
        assert!(!Frame::new(FrameCommand::Connect).has_body());
        assert!(Frame::new(FrameCommand::Send).body("x").has_body());
    }
}
