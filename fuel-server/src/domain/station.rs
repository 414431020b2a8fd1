//! Fuel station records and identifiers.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::coord::Coord;

/// Opaque station identifier as assigned by the price feed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StationId(String);

impl StationId {
    /// Wrap a raw feed identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Fuel type selectable by the driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FuelType {
    #[serde(rename = "fuel95")]
    Petrol95,
    #[serde(rename = "fuelDiesel")]
    DieselA,
}

/// An immutable station record from the catalog.
///
/// Coordinates and prices are optional: the feed leaves them blank for
/// some stations, and those stations are excluded from geo and price
/// operations rather than rejected at load time.
#[derive(Debug, Clone)]
pub struct Station {
    pub id: StationId,
    /// Brand label as published (e.g. "REPSOL"), may be a placeholder.
    pub name: Option<String>,
    pub address: Option<String>,
    pub municipality: Option<String>,
    pub province: Option<String>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    /// Price of Gasolina 95 E5 in EUR/litre.
    pub fuel95: Option<f64>,
    /// Price of Gasóleo A in EUR/litre.
    pub fuel_diesel: Option<f64>,
    /// Raw weekly opening-hours string, e.g. `"L-V 08:00-22:00"`.
    pub horario: Option<String>,
}

impl Station {
    /// Coordinate pair, when both components are known.
    pub fn coord(&self) -> Option<Coord> {
        match (self.lat, self.lng) {
            (Some(lat), Some(lng)) => Some(Coord::new(lat, lng)),
            _ => None,
        }
    }

    /// Price of the selected fuel, if listed.
    pub fn price_for(&self, fuel: FuelType) -> Option<f64> {
        match fuel {
            FuelType::Petrol95 => self.fuel95,
            FuelType::DieselA => self.fuel_diesel,
        }
    }

    /// Normalized brand label for filtering, or `None` for placeholders.
    pub fn brand(&self) -> Option<String> {
        normalize_brand(self.name.as_deref()?)
    }
}

/// Normalize a brand label: trim, uppercase, collapse internal whitespace.
///
/// The feed's placeholder labels (`(SIN RÓTULO)` and all-asterisk names)
/// yield `None` so they never appear in the selectable brand list.
pub fn normalize_brand(name: &str) -> Option<String> {
    let collapsed = name
        .to_uppercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");

    if collapsed.is_empty() {
        return None;
    }
    if collapsed == "(SIN RÓTULO)" {
        return None;
    }
    if collapsed.chars().all(|c| c == '*') {
        return None;
    }

    Some(collapsed)
}
