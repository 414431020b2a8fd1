//! Corridor filtering of stations against a route polyline.

use std::sync::Arc;

use crate::domain::{Coord, Station};
use crate::geo::distance_point_to_polyline_km;

use super::nearby::StationWithDistance;

/// A station inside the route corridor.
#[derive(Debug, Clone)]
pub struct CorridorStation {
    pub station: Arc<Station>,

    /// Straight-line distance from the driver, in kilometres.
    pub distance_km: f64,

    /// Minimum distance from the station to the route polyline, in
    /// kilometres (the station's deviation).
    pub distance_to_route_km: f64,
}

/// Select stations within `radius_km` of the route polyline.
///
/// The boundary is inclusive: a station exactly at the radius is kept.
/// Stations without coordinates, or whose distance to the route cannot
/// be determined, are excluded. The result is sorted by ascending
/// deviation.
pub fn filter_corridor(
    stations: &[StationWithDistance],
    geometry: &[Coord],
    radius_km: f64,
) -> Vec<CorridorStation> {
    let mut in_corridor: Vec<CorridorStation> = stations
        .iter()
        .filter_map(|entry| {
            let coord = entry.station.coord()?;
            let deviation = distance_point_to_polyline_km(coord, geometry)?;

            if deviation > radius_km {
                return None;
            }

            Some(CorridorStation {
                station: Arc::clone(&entry.station),
                distance_km: entry.distance_km,
                distance_to_route_km: deviation,
            })
        })
        .collect();

    in_corridor.sort_by(|a, b| a.distance_to_route_km.total_cmp(&b.distance_to_route_km));
    in_corridor
}
