//! Tri-state open status at arrival.

use serde::Serialize;

/// Whether a station will be open at the estimated arrival time.
///
/// Modeled as an explicit three-way enum rather than an optional bool so
/// the three ranking tiers stay unambiguous.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OpenStatus {
    Open,
    Unknown,
    Closed,
}

impl OpenStatus {
    /// Ranking priority: open sorts before unknown, unknown before closed.
    pub fn priority(&self) -> u8 {
        match self {
            OpenStatus::Open => 0,
            OpenStatus::Unknown => 1,
            OpenStatus::Closed => 2,
        }
    }
}
