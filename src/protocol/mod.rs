//! STOMP frame protocol types.
//!
//! This module defines the wire format shared by the client and the broker:
//! a structured [`Frame`] type and the pure codec functions that build and
//! parse frames. No I/O happens here; the session layer decides what to do
//! with a parsed frame.
//!
//! # Wire Format
//!
//! Text frames, NUL-terminated per STOMP 1.1 convention:
//!
//! ```text
//! COMMAND
//! header1:value1
//! header2:value2
//!
//! body-bytes\0
//! ```
//!
//! # Commands
//!
//! | Command | Direction | Purpose |
//! |---------|-----------|---------|
//! | `CONNECT` | Client → Broker | Open the STOMP session |
//! | `CONNECTED` | Broker → Client | Handshake acknowledgement |
//! | `SUBSCRIBE` | Client → Broker | Register for a destination |
//! | `SEND` | Client → Broker | Publish a payload |
//! | `MESSAGE` | Broker → Client | Deliver a payload |
//! | `ERROR` | Broker → Client | Broker failure (parsed, not acted on) |
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `frame` | Structured frame type and wire serialization |
//! | `codec` | Frame builders and the frame parser |

// ============================================================================
// Submodules
// ============================================================================

/// Structured frame type and wire serialization.
pub mod frame;

/// Frame builders and the frame parser.
pub mod codec;

// ============================================================================
// Re-exports
// ============================================================================

pub use frame::{Frame, FrameCommand};
