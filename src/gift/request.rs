//! Outbound gift event query.

// ============================================================================
// Imports
// ============================================================================

use serde::{Deserialize, Serialize};

// ============================================================================
// Constants
// ============================================================================

/// Category wildcard requesting every gift category.
pub const CATEGORY_ALL: &str = "ALL";

// ============================================================================
// GiftEventRequest
// ============================================================================

/// Query for gift events, published as a SEND frame body.
///
/// All fields are strings on the wire, including the coordinates. An empty
/// `start_date`/`end_date` pair requests events regardless of period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GiftEventRequest {
    /// Member the query is scoped to.
    pub member_uuid: String,

    /// Query longitude.
    pub longitude: String,

    /// Query latitude.
    pub latitude: String,

    /// Gift category filter; [`CATEGORY_ALL`] for no filter.
    pub category: String,

    /// Period filter start; empty for unbounded.
    pub start_date: String,

    /// Period filter end; empty for unbounded.
    pub end_date: String,
}

// ============================================================================
// Constructors
// ============================================================================

impl GiftEventRequest {
    /// Creates a request for every category with an unbounded period.
    #[inline]
    #[must_use]
    pub fn new(
        member_uuid: impl Into<String>,
        longitude: impl Into<String>,
        latitude: impl Into<String>,
    ) -> Self {
        Self {
            member_uuid: member_uuid.into(),
            longitude: longitude.into(),
            latitude: latitude.into(),
            category: CATEGORY_ALL.to_string(),
            start_date: String::new(),
            end_date: String::new(),
        }
    }
}

// ============================================================================
// Builder Methods
// ============================================================================

impl GiftEventRequest {
    /// Sets the category filter.
    #[inline]
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// Sets the period filter.
    #[inline]
    #[must_use]
    pub fn with_period(
        mut self,
        start_date: impl Into<String>,
        end_date: impl Into<String>,
    ) -> Self {
        self.start_date = start_date.into();
        self.end_date = end_date.into();
        self
    }
}

// ============================================================================
// Tests
// ============================================================================
