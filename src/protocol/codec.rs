//! Frame builders and the frame parser.
//!
//! Pure, stateless translation between structured frame intent and wire
//! text. Builders produce [`Frame`] values ready for [`Frame::to_wire`];
//! [`parse`] splits a raw received blob into command, headers and body.
//!
//! The parser is deliberately lenient: unrecognized commands pass through as
//! [`FrameCommand::Other`], extra headers are kept, and header lines without
//! a colon are skipped. The only hard failures are a missing header/body
//! boundary and an empty command line.

// ============================================================================
// Imports
// ============================================================================

use crate::error::{Error, Result};

use super::frame::{Frame, FrameCommand};

// ============================================================================
// Builders
// ============================================================================

/// Builds a CONNECT frame declaring the client's capabilities.
///
/// `accept_versions` and `heartbeat` are client declarations only; the
/// client does not negotiate further.
#[must_use]
pub fn connect(accept_versions: &str, heartbeat: &str) -> Frame {
    Frame::new(FrameCommand::Connect)
        .header("accept-version", accept_versions)
        .header("heart-beat", heartbeat)
}

/// Builds a SUBSCRIBE frame for a destination.
///
/// `subscription_id` must be unique per logical subscription; this client
/// supports one active subscription and uses a single fixed id.
#[must_use]
pub fn subscribe(subscription_id: &str, destination: &str) -> Frame {
    Frame::new(FrameCommand::Subscribe)
        .header("id", subscription_id)
        .header("destination", destination)
}

/// Builds a SEND frame carrying `body` to a destination.
///
/// The `content-length` header is the UTF-8 byte length of the body, the
/// same encoding the transport transmits, so multi-byte characters never
/// cause a length mismatch.
#[must_use]
pub fn send(destination: &str, body: &str) -> Frame {
    Frame::new(FrameCommand::Send)
        .header("destination", destination)
        .header("content-length", body.len().to_string())
        .body(body)
}

// ============================================================================
// Parser
// ============================================================================

/// Parses a raw received text blob into a [`Frame`].
///
/// Splits on the first blank-line boundary; the first header-block line is
/// the bare command token, remaining lines are `key:value` pairs with the
/// first colon as delimiter (values may contain colons). A trailing NUL
/// terminator is stripped from the body. Lines are tolerant of trailing
/// `\r`.
///
/// # Errors
///
/// Returns [`Error::MalformedFrame`] if no blank-line boundary exists or the
/// command line is empty. Unrecognized commands are not an error at this
/// layer.
pub fn parse(raw: &str) -> Result<Frame> {
    let boundary = raw
        .find("\n\n")
        .ok_or_else(|| Error::malformed_frame("no header/body boundary"))?;

    let header_block = &raw[..boundary];
    let body = raw[boundary + 2..].trim_end_matches('\0').to_string();

    let mut lines = header_block.lines().map(|line| line.trim_end_matches('\r'));

    let command_token = lines.next().unwrap_or_default();
    if command_token.is_empty() {
        return Err(Error::malformed_frame("empty command line"));
    }

    let mut frame = Frame::new(FrameCommand::from(command_token)).body(body);

    for line in lines {
        if let Some((name, value)) = line.split_once(':') {
            frame.headers.push((name.to_string(), value.to_string()));
        }
    }

    Ok(frame)
}

// ============================================================================
// Tests
// ============================================================================


// ============================================================================
// Property Tests
// ============================================================================
