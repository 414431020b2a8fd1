//! Mapbox routing and geocoding client.
//!
//! The planner's external collaborator for route geometry, travel
//! durations and destination geocoding. Key characteristics:
//! - the full-route lookup uses the `driving-traffic` profile; per-station
//!   duration lookups use plain `driving`;
//! - geocoding is restricted to Spain and takes the single best match;
//! - no retries: a failed per-station lookup is absorbed by the caller as
//!   a soft failure.

mod client;
mod error;
pub mod mock;
mod types;

pub use client::{MapboxClient, MapboxConfig};
pub use error::RoutingError;
pub use types::{DirectionsResponse, FeatureDto, GeocodeResponse, GeometryDto, LegDto, RouteDto};
