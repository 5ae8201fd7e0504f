//! Inbound gift event tree.
//!
//! The broker organizes gifts as a nested tree: event direction
//! (`RECEIVE`/`SEND`) → gift type (`Basket`/`Default`/`Treasure`/`Video`) →
//! shape variant, keyed by which optional attributes the records carry
//! (`no` for neither, `perOnly` for a period, `locOnly` for a location,
//! `both` for both).
//!
//! Every branch is optional: the broker omits absent categories, and the
//! absence of a field or branch is not an error.

// ============================================================================
// Imports
// ============================================================================

use serde::{Deserialize, Serialize};

// ============================================================================
// GiftEventResponse
// ============================================================================

/// Decoded MESSAGE frame body for the gift events topic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GiftEventResponse {
    /// Root of the gift tree.
    pub gift_category: GiftCategory,
}

// ============================================================================
// GiftCategory
// ============================================================================

/// Gifts grouped by event direction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GiftCategory {
    /// Gifts addressed to the member.
    #[serde(rename = "RECEIVE", default, skip_serializing_if = "Option::is_none")]
    pub receive: Option<GiftDirectory>,

    /// Gifts the member sent.
    #[serde(rename = "SEND", default, skip_serializing_if = "Option::is_none")]
    pub send: Option<GiftDirectory>,
}

// ============================================================================
// GiftDirectory
// ============================================================================

/// Gifts of one direction grouped by gift type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GiftDirectory {
    /// Basket gifts.
    #[serde(rename = "Basket", default, skip_serializing_if = "Option::is_none")]
    pub basket: Option<GiftShapes>,

    /// Default gifts.
    #[serde(rename = "Default", default, skip_serializing_if = "Option::is_none")]
    pub default: Option<GiftShapes>,

    /// Treasure gifts.
    #[serde(rename = "Treasure", default, skip_serializing_if = "Option::is_none")]
    pub treasure: Option<GiftShapes>,

    /// Video gifts.
    #[serde(rename = "Video", default, skip_serializing_if = "Option::is_none")]
    pub video: Option<GiftShapes>,
}

// ============================================================================
// GiftShapes
// ============================================================================

/// Gifts of one type grouped by which optional attributes they carry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GiftShapes {
    /// Records with neither period nor location.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub no: Option<Vec<PlainGift>>,

    /// Records with a validity period only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub per_only: Option<Vec<PeriodGift>>,

    /// Records with a location only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub loc_only: Option<Vec<LocatedGift>>,

    /// Records with both period and location.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub both: Option<Vec<PeriodLocatedGift>>,
}

// ============================================================================
// Gift Records
// ============================================================================

/// Gift with neither period nor location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlainGift {
    /// Display name.
    pub gift_name: String,

    /// Whether the gift is currently activated.
    pub activate: bool,

    /// Insertion timestamp, broker-formatted.
    pub insert_date: String,

    /// Numeric gift key.
    pub gift_key: i64,

    /// Lifecycle status.
    pub status: GiftStatus,
}

/// Gift carrying a validity period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodGift {
    /// Display name.
    pub gift_name: String,

    /// Whether the gift is currently activated.
    pub activate: bool,

    /// Insertion timestamp, broker-formatted.
    pub insert_date: String,

    /// Numeric gift key.
    pub gift_key: i64,

    /// Lifecycle status.
    pub status: GiftStatus,

    /// Period start, broker-formatted.
    pub start_date: String,

    /// Period end, broker-formatted.
    pub end_date: String,
}

/// Gift carrying a location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocatedGift {
    /// Display name.
    pub gift_name: String,

    /// Whether the gift is currently activated.
    pub activate: bool,

    /// Insertion timestamp, broker-formatted.
    pub insert_date: String,

    /// Numeric gift key.
    pub gift_key: i64,

    /// Lifecycle status.
    pub status: GiftStatus,

    /// Gift latitude.
    pub latitude: f64,

    /// Gift longitude.
    pub longitude: f64,
}

/// Gift carrying both a validity period and a location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodLocatedGift {
    /// Display name.
    pub gift_name: String,

    /// Whether the gift is currently activated.
    pub activate: bool,

    /// Insertion timestamp, broker-formatted.
    pub insert_date: String,

    /// Numeric gift key.
    pub gift_key: i64,

    /// Lifecycle status.
    pub status: GiftStatus,

    /// Period start, broker-formatted.
    pub start_date: String,

    /// Period end, broker-formatted.
    pub end_date: String,

    /// Gift latitude.
    pub latitude: f64,

    /// Gift longitude.
    pub longitude: f64,
}

// ============================================================================
// GiftStatus
// ============================================================================

/// Gift lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GiftStatus {
    /// Gift is playing.
    #[serde(rename = "PLAY")]
    Play,

    /// Gift is ready.
    #[serde(rename = "READY")]
    Ready,

    /// Gift has been opened.
    #[serde(rename = "OPEN")]
    Open,
}

// ============================================================================
// Tests
// ============================================================================
