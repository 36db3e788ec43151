#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Derived seat-map analytics and the JSON export document.
//!
//! Every metric is a pure function over the current zones and seats. The
//! [`Analytics`] system caches the last [`AnalyticsReport`] and recomputes it
//! only after a layout mutation or an explicit refresh request.

use std::collections::BTreeMap;

use seatmap_core::{Command, Event, LayoutSnapshot, Price, Seat, SeatType, Zone};
use serde::{Serialize, Serializer};

pub mod export;
pub mod metrics;

pub use export::ExportDocument;
pub use metrics::ZoneUtilization;

/// Borrowed registries the metrics are computed from.
#[derive(Clone, Copy, Debug)]
pub struct AnalyticsInputs<'a> {
    /// Zones in stored order.
    pub zones: &'a [Zone],
    /// Seats in placement order.
    pub seats: &'a [Seat],
}

impl<'a> AnalyticsInputs<'a> {
    /// Creates a new input view.
    #[must_use]
    pub const fn new(zones: &'a [Zone], seats: &'a [Seat]) -> Self {
        Self { zones, seats }
    }

    /// Borrows the zones and seats of a snapshot.
    #[must_use]
    pub fn from_snapshot(snapshot: &'a LayoutSnapshot) -> Self {
        Self::new(&snapshot.zones, &snapshot.seats)
    }
}

/// Every derived metric bundled for display and export.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsReport {
    /// Seat counts keyed by zone name.
    pub capacity_by_zone: BTreeMap<String, u32>,
    /// Seat counts keyed by zone price.
    #[serde(serialize_with = "serialize_price_keys")]
    pub price_distribution: BTreeMap<Price, u32>,
    /// Total number of seats.
    pub total_capacity: u32,
    /// Seat-weighted mean price as a currency amount.
    pub average_price: f64,
    /// Seat counts per seat type.
    pub seat_types: BTreeMap<SeatType, u32>,
    /// Occupancy summary per zone.
    pub zone_utilization: Vec<ZoneUtilization>,
}

impl AnalyticsReport {
    /// Computes every metric from the provided registries.
    #[must_use]
    pub fn compute(inputs: &AnalyticsInputs<'_>) -> Self {
        Self {
            capacity_by_zone: metrics::capacity_by_zone(inputs),
            price_distribution: metrics::price_distribution(inputs),
            total_capacity: metrics::total_capacity(inputs),
            average_price: metrics::average_price(inputs),
            seat_types: metrics::seat_types(inputs),
            zone_utilization: metrics::zone_utilization(inputs),
        }
    }
}

fn serialize_price_keys<S>(distribution: &BTreeMap<Price, u32>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.collect_map(
        distribution
            .iter()
            .map(|(price, count)| (price.to_string(), count)),
    )
}

/// Analytics system that caches the last report until the layout changes.
#[derive(Debug)]
pub struct Analytics {
    last_report: Option<AnalyticsReport>,
    stale: bool,
}

impl Default for Analytics {
    fn default() -> Self {
        Self {
            last_report: None,
            stale: true,
        }
    }
}

impl Analytics {
    /// Creates a new analytics system that computes on its first call.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the last computed report, if any.
    #[must_use]
    pub fn last_report(&self) -> Option<&AnalyticsReport> {
        self.last_report.as_ref()
    }

    /// Consumes layout events and applied commands, recomputing when stale.
    ///
    /// Returns `true` when a new report was computed on this call.
    pub fn handle(
        &mut self,
        events: &[Event],
        commands: &[Command],
        inputs: AnalyticsInputs<'_>,
    ) -> bool {
        if events.iter().any(Event::affects_analytics)
            || commands
                .iter()
                .any(|command| matches!(command, Command::RequestAnalyticsRefresh))
        {
            self.stale = true;
        }

        if !self.stale {
            return false;
        }

        self.last_report = Some(AnalyticsReport::compute(&inputs));
        self.stale = false;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use seatmap_core::{SeatId, Tool};

    #[test]
    fn first_call_always_computes() {
        let mut analytics = Analytics::new();
        assert!(analytics.last_report().is_none());
        assert!(analytics.handle(&[], &[], AnalyticsInputs::new(&[], &[])));
        assert_eq!(
            analytics.last_report().map(|report| report.total_capacity),
            Some(0)
        );
    }

    #[test]
    fn unrelated_events_keep_the_cache() {
        let mut analytics = Analytics::new();
        let inputs = AnalyticsInputs::new(&[], &[]);
        let _ = analytics.handle(&[], &[], inputs);

        assert!(!analytics.handle(&[Event::ToolChanged { tool: Tool::Delete }], &[], inputs));
        assert!(analytics.handle(
            &[Event::SeatRemoved {
                seat: SeatId::new(1)
            }],
            &[],
            inputs
        ));
        assert!(analytics.handle(&[], &[Command::RequestAnalyticsRefresh], inputs));
    }
}
