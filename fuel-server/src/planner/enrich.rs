//! Arrival enrichment for corridor stations.
//!
//! Fans out one duration lookup per corridor station against the routing
//! collaborator and joins once all of them have settled. A failed lookup
//! degrades that single station (no arrival time, unknown open status)
//! and never aborts the batch.

use std::sync::Arc;

use chrono::{DateTime, Duration, Local};
use futures::future::join_all;
use tracing::debug;

use crate::domain::{Coord, OpenStatus, Station, parse_opening_hours};

use super::corridor::CorridorStation;
use super::plan::RoutingProvider;

/// A corridor station with estimated arrival time and open status.
#[derive(Debug, Clone)]
pub struct RouteStation {
    pub station: Arc<Station>,

    /// Straight-line distance from the driver, in kilometres.
    pub distance_km: f64,

    /// Deviation from the route polyline, in kilometres.
    pub distance_to_route_km: f64,

    /// Estimated arrival instant; `None` when the duration lookup failed.
    pub arrival_time: Option<DateTime<Local>>,

    pub open_at_arrival: OpenStatus,
}

/// Enrich corridor stations with arrival time and open status.
///
/// One `duration_via_waypoint` lookup per station, all issued
/// concurrently with no ordering guarantee among themselves; the
/// returned vector preserves the input order. Each lookup's outcome is
/// folded into its own station only.
pub async fn enrich_arrivals<R: RoutingProvider>(
    routing: &R,
    stations: Vec<CorridorStation>,
    origin: Coord,
    destination: Coord,
    now: DateTime<Local>,
) -> Vec<RouteStation> {
    let lookups = stations.into_iter().map(|entry| async move {
        let duration = match entry.station.coord() {
            Some(coord) => routing
                .duration_via_waypoint(origin, coord, destination)
                .await
                .ok(),
            None => None,
        };
        (entry, duration)
    });

    join_all(lookups)
        .await
        .into_iter()
        .map(|(entry, duration)| {
            let (arrival_time, open_at_arrival) = match duration {
                Some(seconds) if seconds.is_finite() => {
                    let arrival = now + Duration::milliseconds((seconds * 1000.0) as i64);
                    let schedule = parse_opening_hours(entry.station.horario.as_deref());
                    (Some(arrival), schedule.status_at(arrival))
                }
                _ => {
                    debug!(
                        station = %entry.station.id,
                        "duration lookup failed, arrival unknown"
                    );
                    (None, OpenStatus::Unknown)
                }
            };

            RouteStation {
                station: entry.station,
                distance_km: entry.distance_km,
                distance_to_route_km: entry.distance_to_route_km,
                arrival_time,
                open_at_arrival,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::StationId;
    use crate::routing::mock::MockRouting;
    use chrono::TimeZone;

    fn corridor_station(id: &str, lat: f64, lng: f64, horario: Option<&str>) -> CorridorStation {
        CorridorStation {
            station: Arc::new(Station {
                id: StationId::new(id),
                name: None,
                address: None,
                municipality: None,
                province: None,
                lat: Some(lat),
                lng: Some(lng),
                fuel95: None,
                fuel_diesel: None,
                horario: horario.map(str::to_string),
            }),
            distance_km: 1.0,
            distance_to_route_km: 0.5,
        }
    }

    fn origin() -> Coord {
        Coord::new(40.0, -3.0)
    }

    fn destination() -> Coord {
        Coord::new(40.0, -3.5)
    }

    // Monday.
    fn monday_ten() -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 1, 15, 10, 0, 0).unwrap()
    }

    #[tokio::test]
    async fn successful_lookup_sets_arrival_and_status() {
        let open = corridor_station("open", 40.0, -3.1, Some("L-V 08:00-22:00"));
        let closed = corridor_station("closed", 40.0, -3.2, Some("S-D 08:00-14:00"));

        let routing = MockRouting::new()
            .with_duration(Coord::new(40.0, -3.1), 1800.0)
            .with_duration(Coord::new(40.0, -3.2), 1800.0);

        let result =
            enrich_arrivals(&routing, vec![open, closed], origin(), destination(), monday_ten())
                .await;

        assert_eq!(result.len(), 2);
        assert_eq!(
            result[0].arrival_time,
            Some(Local.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap())
        );
        assert_eq!(result[0].open_at_arrival, OpenStatus::Open);
        assert_eq!(result[1].open_at_arrival, OpenStatus::Closed);
    }

    #[tokio::test]
    async fn failed_lookup_degrades_that_station_only() {
        let ok = corridor_station("ok", 40.0, -3.1, Some("24H"));
        let broken = corridor_station("broken", 40.0, -3.2, Some("24H"));

        let routing = MockRouting::new()
            .with_duration(Coord::new(40.0, -3.1), 600.0)
            .with_failing(Coord::new(40.0, -3.2));

        let result =
            enrich_arrivals(&routing, vec![ok, broken], origin(), destination(), monday_ten())
                .await;

        assert_eq!(result[0].open_at_arrival, OpenStatus::Open);
        assert!(result[0].arrival_time.is_some());

        assert_eq!(result[1].open_at_arrival, OpenStatus::Unknown);
        assert_eq!(result[1].arrival_time, None);
    }

    #[tokio::test]
    async fn missing_schedule_is_unknown_even_with_arrival() {
        let station = corridor_station("bare", 40.0, -3.1, None);

        let routing = MockRouting::new().with_duration(Coord::new(40.0, -3.1), 600.0);

        let result =
            enrich_arrivals(&routing, vec![station], origin(), destination(), monday_ten()).await;

        assert!(result[0].arrival_time.is_some());
        assert_eq!(result[0].open_at_arrival, OpenStatus::Unknown);
    }

    #[tokio::test]
    async fn preserves_input_order() {
        let stations: Vec<CorridorStation> = (0..5)
            .map(|i| corridor_station(&format!("s{i}"), 40.0, -3.0 - 0.01 * i as f64, Some("24H")))
            .collect();

        let mut routing = MockRouting::new();
        for i in 0..5 {
            routing = routing.with_duration(Coord::new(40.0, -3.0 - 0.01 * i as f64), 60.0);
        }

        let result =
            enrich_arrivals(&routing, stations, origin(), destination(), monday_ten()).await;

        let ids: Vec<&str> = result.iter().map(|s| s.station.id.as_str()).collect();
        assert_eq!(ids, vec!["s0", "s1", "s2", "s3", "s4"]);
    }
}
