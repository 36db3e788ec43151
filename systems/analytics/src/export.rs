//! Denormalised JSON snapshot produced on explicit export.

use chrono::{DateTime, Utc};
use seatmap_core::{
    CanvasDimensions, GridPoint, LayoutSnapshot, Price, RowLabel, SeatId, SeatMapId, SeatMapInfo,
    SeatStatus, SeatType, ZoneColor, ZoneId,
};
use serde::Serialize;

use crate::{metrics, AnalyticsInputs, AnalyticsReport};

/// Format version written into every export.
pub const EXPORT_VERSION: &str = "1.0";

/// Name reported for seats whose zone no longer exists.
pub const UNKNOWN_ZONE_NAME: &str = "Unknown Zone";

/// Export metadata block.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportMetadata {
    /// Persisted map identifier, `null` for unsaved maps.
    pub seat_map_id: Option<SeatMapId>,
    /// Map name.
    pub seat_map_name: String,
    /// Time the export was produced.
    pub export_date: DateTime<Utc>,
    /// Format version, always [`EXPORT_VERSION`].
    pub export_version: &'static str,
    /// Number of seats in the export.
    pub total_seats: u32,
    /// Number of zones in the export.
    pub total_zones: u32,
    /// Canvas dimensions.
    pub dimensions: CanvasDimensions,
}

/// Zone entry with its derived seat count.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportZone {
    /// Zone identifier.
    pub id: ZoneId,
    /// Display name.
    pub name: String,
    /// Display color.
    pub color: ZoneColor,
    /// Price as a currency amount.
    pub price: f64,
    /// Seats owned by the zone.
    pub seat_count: u32,
}

/// Zone fields resolved onto a seat.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ExportSeatZone {
    /// Owning zone, `null` for orphaned seats.
    pub id: Option<ZoneId>,
    /// Zone name, [`UNKNOWN_ZONE_NAME`] when the zone is gone.
    pub name: String,
    /// Zone color, the default zone color when the zone is gone.
    pub color: ZoneColor,
    /// Zone price, zero when the zone is gone.
    pub price: f64,
}

/// Seat entry with its zone denormalised.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportSeat {
    /// Seat identifier.
    pub id: SeatId,
    /// Row label.
    pub row: RowLabel,
    /// Seat number within the row.
    pub number: u32,
    /// Canvas position.
    pub position: GridPoint,
    /// Resolved zone fields.
    pub zone: ExportSeatZone,
    /// Seat type.
    #[serde(rename = "type")]
    pub kind: SeatType,
    /// Sale status.
    pub status: SeatStatus,
    /// Owning map identifier.
    pub map_id: Option<SeatMapId>,
}

/// Complete export document.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ExportDocument {
    /// Map level metadata and totals.
    pub metadata: ExportMetadata,
    /// Zones with derived seat counts.
    pub zones: Vec<ExportZone>,
    /// Seats with zone fields resolved.
    pub seats: Vec<ExportSeat>,
    /// Derived analytics.
    pub analytics: AnalyticsReport,
}

impl ExportDocument {
    /// Builds the export document for the snapshot.
    #[must_use]
    pub fn build(snapshot: &LayoutSnapshot, exported_at: DateTime<Utc>) -> Self {
        let inputs = AnalyticsInputs::from_snapshot(snapshot);

        let zones = snapshot
            .zones
            .iter()
            .map(|zone| ExportZone {
                id: zone.id,
                name: zone.name.clone(),
                color: zone.color,
                price: zone.price.amount(),
                seat_count: metrics::seat_count_by_zone(&inputs, zone.id),
            })
            .collect();

        let seats = snapshot
            .seats
            .iter()
            .map(|seat| {
                let owner = seat.zone.and_then(|zone| snapshot.zone(zone));
                ExportSeat {
                    id: seat.id,
                    row: seat.row,
                    number: seat.number,
                    position: seat.position,
                    zone: ExportSeatZone {
                        id: seat.zone,
                        name: owner.map_or_else(
                            || UNKNOWN_ZONE_NAME.to_owned(),
                            |zone| zone.name.clone(),
                        ),
                        color: owner.map_or(ZoneColor::DEFAULT, |zone| zone.color),
                        price: owner.map_or(Price::ZERO, |zone| zone.price).amount(),
                    },
                    kind: seat.kind,
                    status: seat.status,
                    map_id: seat.map,
                }
            })
            .collect();

        let analytics = AnalyticsReport::compute(&inputs);
        Self {
            metadata: ExportMetadata {
                seat_map_id: snapshot.map.id,
                seat_map_name: snapshot.map.name.clone(),
                export_date: exported_at,
                export_version: EXPORT_VERSION,
                total_seats: analytics.total_capacity,
                total_zones: u32::try_from(snapshot.zones.len()).unwrap_or(u32::MAX),
                dimensions: snapshot.map.dimensions,
            },
            zones,
            seats,
            analytics,
        }
    }

    /// Renders the document as indented JSON.
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Suggested download name, `seat_map_{name}_{YYYY-MM-DD}.json`.
///
/// Blank map names fall back to `export`.
#[must_use]
pub fn file_name(map: &SeatMapInfo, exported_at: DateTime<Utc>) -> String {
    let name = map.name.trim();
    let name = if name.is_empty() { "export" } else { name };
    format!("seat_map_{name}_{}.json", exported_at.format("%Y-%m-%d"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn file_name_uses_the_export_day() {
        let exported_at = Utc
            .with_ymd_and_hms(2024, 11, 2, 23, 59, 0)
            .single()
            .expect("valid timestamp");
        let map = SeatMapInfo::new("Main Hall", exported_at);
        assert_eq!(file_name(&map, exported_at), "seat_map_Main Hall_2024-11-02.json");

        let unnamed = SeatMapInfo::new("  ", exported_at);
        assert_eq!(file_name(&unnamed, exported_at), "seat_map_export_2024-11-02.json");
    }
}
