//! Metric functions computed over a layout for the analytics report.

use std::collections::BTreeMap;

use seatmap_core::{Price, SeatStatus, SeatType, Zone, ZoneId};
use serde::Serialize;

use crate::AnalyticsInputs;

/// Number of seats owned by the zone.
#[must_use]
pub fn seat_count_by_zone(inputs: &AnalyticsInputs<'_>, zone: ZoneId) -> u32 {
    count(
        inputs
            .seats
            .iter()
            .filter(|seat| seat.zone == Some(zone)),
    )
}

/// Maps every zone price to the number of seats sold at that price.
///
/// Zones sharing a price share a bucket, and a zone without seats still
/// contributes an empty bucket. Orphaned seats have no price and are skipped.
#[must_use]
pub fn price_distribution(inputs: &AnalyticsInputs<'_>) -> BTreeMap<Price, u32> {
    let mut distribution = BTreeMap::new();
    for zone in inputs.zones {
        let bucket = distribution.entry(zone.price).or_insert(0_u32);
        *bucket = bucket.saturating_add(seat_count_by_zone(inputs, zone.id));
    }
    distribution
}

/// Seat-weighted mean zone price as a currency amount.
///
/// Every seat counts towards the divisor, orphaned ones included. An empty
/// layout averages to zero.
#[must_use]
pub fn average_price(inputs: &AnalyticsInputs<'_>) -> f64 {
    let total = total_capacity(inputs);
    if total == 0 {
        return 0.0;
    }

    let weighted_cents: u128 = inputs
        .zones
        .iter()
        .map(|zone| u128::from(zone.price.cents()) * u128::from(seat_count_by_zone(inputs, zone.id)))
        .sum();
    weighted_cents as f64 / f64::from(total) / 100.0
}

/// Occupancy summary of a single zone.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoneUtilization {
    /// Zone the summary describes.
    #[serde(skip)]
    pub zone: ZoneId,
    /// Display name of the zone.
    pub zone_name: String,
    /// Seats owned by the zone.
    pub capacity: u32,
    /// Zone price as a currency amount.
    pub price_point: f64,
    /// Share of the zone's seats that are occupied, in `0.0..=1.0`.
    pub utilization_rate: f64,
}

/// Share of occupied seats per zone, in stored zone order.
#[must_use]
pub fn zone_utilization(inputs: &AnalyticsInputs<'_>) -> Vec<ZoneUtilization> {
    inputs
        .zones
        .iter()
        .map(|zone| utilization_of(inputs, zone))
        .collect()
}

fn utilization_of(inputs: &AnalyticsInputs<'_>, zone: &Zone) -> ZoneUtilization {
    let capacity = seat_count_by_zone(inputs, zone.id);
    let occupied = count(inputs.seats.iter().filter(|seat| {
        seat.zone == Some(zone.id) && seat.status == SeatStatus::Occupied
    }));
    ZoneUtilization {
        zone: zone.id,
        zone_name: zone.name.clone(),
        capacity,
        price_point: zone.price.amount(),
        utilization_rate: f64::from(occupied) / f64::from(capacity.max(1)),
    }
}

/// Seat counts keyed by zone name.
///
/// Zones sharing a name collapse into one entry holding the count of the
/// zone stored last.
#[must_use]
pub fn capacity_by_zone(inputs: &AnalyticsInputs<'_>) -> BTreeMap<String, u32> {
    inputs
        .zones
        .iter()
        .map(|zone| (zone.name.clone(), seat_count_by_zone(inputs, zone.id)))
        .collect()
}

/// Seat counts per seat type. Types without seats are absent.
#[must_use]
pub fn seat_types(inputs: &AnalyticsInputs<'_>) -> BTreeMap<SeatType, u32> {
    let mut types = BTreeMap::new();
    for seat in inputs.seats {
        let entry = types.entry(seat.kind).or_insert(0_u32);
        *entry = entry.saturating_add(1);
    }
    types
}

/// Total number of seats in the layout.
#[must_use]
pub fn total_capacity(inputs: &AnalyticsInputs<'_>) -> u32 {
    count(inputs.seats.iter())
}

fn count<I: Iterator>(iter: I) -> u32 {
    u32::try_from(iter.count()).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use seatmap_core::{GridPoint, RowLabel, Seat, SeatId, ZoneColor};

    fn zone(id: u32, name: &str, cents: u64) -> Zone {
        Zone {
            id: ZoneId::new(id),
            name: name.to_owned(),
            color: ZoneColor::DEFAULT,
            price: Price::from_cents(cents),
            map: None,
        }
    }

    fn seat(id: u32, zone: Option<u32>, status: SeatStatus) -> Seat {
        Seat {
            id: SeatId::new(id),
            position: GridPoint::new(id * 30, 0),
            row: RowLabel::new(1),
            number: id,
            zone: zone.map(ZoneId::new),
            map: None,
            kind: SeatType::Regular,
            status,
        }
    }

    #[test]
    fn empty_layout_averages_to_zero() {
        let inputs = AnalyticsInputs::new(&[], &[]);
        assert_eq!(average_price(&inputs), 0.0);
        assert!(price_distribution(&inputs).is_empty());
        assert_eq!(total_capacity(&inputs), 0);
    }

    #[test]
    fn zones_without_seats_keep_an_empty_price_bucket() {
        let zones = [zone(1, "Floor", 5_000), zone(2, "Balcony", 2_500)];
        let seats = [seat(1, Some(1), SeatStatus::Available)];
        let inputs = AnalyticsInputs::new(&zones, &seats);

        let distribution = price_distribution(&inputs);
        assert_eq!(distribution.get(&Price::from_cents(2_500)), Some(&0));
        assert_eq!(distribution.get(&Price::from_cents(5_000)), Some(&1));
    }

    #[test]
    fn orphaned_seats_dilute_the_average() {
        let zones = [zone(1, "Floor", 6_000)];
        let seats = [
            seat(1, Some(1), SeatStatus::Available),
            seat(2, None, SeatStatus::Available),
        ];
        let inputs = AnalyticsInputs::new(&zones, &seats);
        assert_eq!(average_price(&inputs), 30.0);
    }

    #[test]
    fn utilization_counts_occupied_seats_per_zone() {
        let zones = [zone(1, "Floor", 5_000), zone(2, "Empty", 1_000)];
        let seats = [
            seat(1, Some(1), SeatStatus::Occupied),
            seat(2, Some(1), SeatStatus::Available),
            seat(3, Some(1), SeatStatus::Available),
            seat(4, Some(1), SeatStatus::Occupied),
        ];
        let inputs = AnalyticsInputs::new(&zones, &seats);

        let utilization = zone_utilization(&inputs);
        assert_eq!(utilization[0].capacity, 4);
        assert_eq!(utilization[0].utilization_rate, 0.5);
        assert_eq!(utilization[1].capacity, 0);
        assert_eq!(utilization[1].utilization_rate, 0.0);
    }
}
