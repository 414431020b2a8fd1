//! Station ranking for route planning results.
//!
//! Orders the enriched corridor stations so the most useful stop comes
//! first.

use std::cmp::Ordering;

use crate::domain::FuelType;

use super::enrich::RouteStation;

/// Rank route stations by preference.
///
/// Stations are ranked by:
/// 1. Open status at arrival (open, then unknown, then closed)
/// 2. Deviation from the route (smaller is better)
/// 3. Price for the selected fuel (cheaper is better, unpriced last)
///
/// Returns stations sorted best-first. The sort is stable, so stations
/// tied on all three keys keep their relative order.
pub fn rank_route_stations(mut stations: Vec<RouteStation>, fuel: FuelType) -> Vec<RouteStation> {
    stations.sort_by(|a, b| compare_stations(a, b, fuel));
    stations
}

fn compare_stations(a: &RouteStation, b: &RouteStation, fuel: FuelType) -> Ordering {
    // Primary: open status
    let status_cmp = a
        .open_at_arrival
        .priority()
        .cmp(&b.open_at_arrival.priority());
    if status_cmp != Ordering::Equal {
        return status_cmp;
    }

    // Secondary: deviation from the route
    let deviation_cmp = deviation_key(a).total_cmp(&deviation_key(b));
    if deviation_cmp != Ordering::Equal {
        return deviation_cmp;
    }

    // Tertiary: fuel price, unpriced stations last
    match (a.station.price_for(fuel), b.station.price_for(fuel)) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(pa), Some(pb)) => pa.total_cmp(&pb),
    }
}

/// Deviation used for ordering. A non-finite deviation sorts after
/// every finite one.
fn deviation_key(station: &RouteStation) -> f64 {
    if station.distance_to_route_km.is_finite() {
        station.distance_to_route_km
    } else {
        f64::INFINITY
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::domain::{OpenStatus, Station, StationId};
    use proptest::prelude::*;
    use std::sync::Arc;

    fn status_strategy() -> impl Strategy<Value = OpenStatus> {
        prop_oneof![
            Just(OpenStatus::Open),
            Just(OpenStatus::Unknown),
            Just(OpenStatus::Closed),
        ]
    }

    fn station_strategy() -> impl Strategy<Value = RouteStation> {
        (
            0u32..1000,
            status_strategy(),
            0.0f64..5.0,
            prop::option::of(1.0f64..2.5),
        )
            .prop_map(|(id, status, deviation, fuel95)| RouteStation {
                station: Arc::new(Station {
                    id: StationId::new(format!("s{id}")),
                    name: None,
                    address: None,
                    municipality: None,
                    province: None,
                    lat: Some(40.0),
                    lng: Some(-3.0),
                    fuel95,
                    fuel_diesel: None,
                    horario: None,
                }),
                distance_km: 1.0,
                distance_to_route_km: deviation,
                arrival_time: None,
                open_at_arrival: status,
            })
    }

    fn stations_strategy() -> impl Strategy<Value = Vec<RouteStation>> {
        prop::collection::vec(station_strategy(), 0..20)
    }

    proptest! {
        #[test]
        fn ranking_is_sorted(stations in stations_strategy()) {
            let ranked = rank_route_stations(stations, FuelType::Petrol95);

            for window in ranked.windows(2) {
                let a = &window[0];
                let b = &window[1];

                let status = a.open_at_arrival.priority().cmp(&b.open_at_arrival.priority());
                prop_assert!(status != std::cmp::Ordering::Greater);
                if status == std::cmp::Ordering::Equal {
                    let deviation = a.distance_to_route_km.total_cmp(&b.distance_to_route_km);
                    prop_assert!(deviation != std::cmp::Ordering::Greater);
                    if deviation == std::cmp::Ordering::Equal {
                        match (
                            a.station.price_for(FuelType::Petrol95),
                            b.station.price_for(FuelType::Petrol95),
                        ) {
                            (None, Some(_)) => prop_assert!(false, "unpriced before priced"),
                            (Some(pa), Some(pb)) => prop_assert!(pa <= pb),
                            _ => {}
                        }
                    }
                }
            }
        }

        #[test]
        fn ranking_preserves_elements(stations in stations_strategy()) {
            let original_len = stations.len();
            let ranked = rank_route_stations(stations, FuelType::Petrol95);

            prop_assert_eq!(ranked.len(), original_len);
        }
    }
}
