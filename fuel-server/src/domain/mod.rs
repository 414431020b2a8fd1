//! Domain types for the fuel-route planner.
//!
//! Core value types representing coordinates, stations, weekly schedules
//! and open status. Parsing enforces invariants at construction time
//! (schedule intervals always have `start < end`), so code receiving
//! these types can trust their validity.

mod coord;
mod open_status;
mod route;
mod schedule;
mod station;

pub use coord::Coord;
pub use open_status::OpenStatus;
pub use route::{GeocodedPlace, Route};
pub use schedule::{ParsedSchedule, TimeInterval, parse_opening_hours};
pub use station::{FuelType, Station, StationId, normalize_brand};
