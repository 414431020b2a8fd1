//! Station catalog, fed by the Spanish Ministry fuel-price feed.
//!
//! The catalog is the planner's supplier of station records. It is
//! fetched once at startup, refreshed daily in the background, and never
//! mutated in place: each route-calculation request works on a snapshot.

mod client;
mod error;
mod store;

pub use client::{CatalogClient, CatalogClientConfig, StationDto, StationListing, normalize};
pub use error::CatalogError;
pub use store::StationCatalog;
