//! Nearest and cheapest station flows.
//!
//! These are the simpler, route-less flows: annotate the catalog with
//! straight-line distance from the driver, list the closest stations, or
//! pick the cheapest one within a radius and estimate whether it will be
//! open on arrival.

use std::sync::Arc;

use chrono::{DateTime, Duration, Local};

use crate::domain::{Coord, FuelType, OpenStatus, Station, parse_opening_hours};
use crate::geo::haversine_distance;

use super::plan::RoutingProvider;

/// A station annotated with straight-line distance from the driver.
#[derive(Debug, Clone)]
pub struct StationWithDistance {
    pub station: Arc<Station>,
    pub distance_km: f64,
}

/// The cheapest station in range, with arrival annotations.
#[derive(Debug, Clone)]
pub struct CheapestStation {
    pub station: Arc<Station>,
    pub distance_km: f64,
    /// Price of the selected fuel, in EUR/litre.
    pub price: f64,
    /// Estimated arrival instant; `None` when the duration lookup failed.
    pub arrival_time: Option<DateTime<Local>>,
    pub open_at_arrival: OpenStatus,
}

/// Annotate stations with straight-line distance from `origin`, sorted
/// ascending.
///
/// Stations with unknown coordinates, or whose distance cannot be
/// determined, are dropped.
pub fn stations_with_distance(
    stations: &[Arc<Station>],
    origin: Coord,
) -> Vec<StationWithDistance> {
    let mut annotated: Vec<StationWithDistance> = stations
        .iter()
        .filter_map(|station| {
            let coord = station.coord()?;
            let distance_km =
                haversine_distance(origin.lat, origin.lng, coord.lat, coord.lng)?;

            Some(StationWithDistance {
                station: Arc::clone(station),
                distance_km,
            })
        })
        .collect();

    annotated.sort_by(|a, b| a.distance_km.total_cmp(&b.distance_km));
    annotated
}

/// Top stations by straight-line distance, optionally restricted to a
/// normalized brand label.
pub fn nearest_stations(
    stations: &[StationWithDistance],
    brand: Option<&str>,
    limit: usize,
) -> Vec<StationWithDistance> {
    stations
        .iter()
        .filter(|entry| matches_brand(&entry.station, brand))
        .take(limit)
        .cloned()
        .collect()
}

/// Distinct selectable brand labels, sorted.
///
/// Placeholder labels never appear (see [`crate::domain::normalize_brand`]).
pub fn available_brands(stations: &[StationWithDistance]) -> Vec<String> {
    let mut brands: Vec<String> = stations
        .iter()
        .filter_map(|entry| entry.station.brand())
        .collect();

    brands.sort();
    brands.dedup();
    brands
}

/// The cheapest station for `fuel` within `radius_km` of the driver,
/// enriched with a single duration lookup.
///
/// The lookup failure is soft: the station is still returned, with no
/// arrival time and an unknown open status. Returns `None` when no
/// station in range lists a price for the fuel.
pub async fn cheapest_station<R: RoutingProvider>(
    routing: &R,
    stations: &[StationWithDistance],
    origin: Coord,
    fuel: FuelType,
    brand: Option<&str>,
    radius_km: f64,
    now: DateTime<Local>,
) -> Option<CheapestStation> {
    // Keep the first of equally-priced candidates; the input is sorted by
    // distance, so price ties resolve to the nearest station.
    let (entry, price) = stations
        .iter()
        .filter(|entry| matches_brand(&entry.station, brand))
        .filter(|entry| entry.distance_km <= radius_km)
        .filter_map(|entry| entry.station.price_for(fuel).map(|price| (entry, price)))
        .fold(None::<(&StationWithDistance, f64)>, |best, candidate| {
            match best {
                Some((_, best_price)) if best_price <= candidate.1 => best,
                _ => Some(candidate),
            }
        })?;

    let coord = entry.station.coord()?;

    let (arrival_time, open_at_arrival) = match routing.duration_between(origin, coord).await {
        Some(seconds) if seconds.is_finite() => {
            let arrival = now + Duration::milliseconds((seconds * 1000.0) as i64);
            let schedule = parse_opening_hours(entry.station.horario.as_deref());
            (Some(arrival), schedule.status_at(arrival))
        }
        _ => (None, OpenStatus::Unknown),
    };

    Some(CheapestStation {
        station: Arc::clone(&entry.station),
        distance_km: entry.distance_km,
        price,
        arrival_time,
        open_at_arrival,
    })
}

fn matches_brand(station: &Station, brand: Option<&str>) -> bool {
    match brand {
        None => true,
        Some(brand) => station
            .brand()
            .is_some_and(|b| b.eq_ignore_ascii_case(brand.trim())),
    }
}
