//! Gift event payload schema.
//!
//! JSON payloads carried in SEND and MESSAGE frame bodies. The shapes mirror
//! the broker's wire format exactly; the session treats them as opaque
//! beyond decode-and-forward.
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `request` | Outbound gift event query |
//! | `response` | Inbound gift event tree |

// ============================================================================
// Submodules
// ============================================================================

/// Outbound gift event query.
pub mod request;

/// Inbound gift event tree.
pub mod response;

// ============================================================================
// Re-exports
// ============================================================================

pub use request::GiftEventRequest;
pub use response::{
    GiftCategory, GiftDirectory, GiftEventResponse, GiftShapes, GiftStatus, LocatedGift,
    PeriodGift, PeriodLocatedGift, PlainGift,
};
