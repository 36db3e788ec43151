use chrono::{TimeZone, Utc};
use proptest::prelude::*;
use seatmap_core::{
    Command, Event, GridPoint, Price, SeatMapInfo, ZoneColor, ZoneDraft, ZoneId,
};
use seatmap_layout::{apply, query, Layout};

fn layout_with(zone_count: u32, seat_zones: &[u32]) -> Layout {
    let created_at = Utc
        .with_ymd_and_hms(2024, 1, 1, 0, 0, 0)
        .single()
        .expect("valid timestamp");
    let mut layout = Layout::new(SeatMapInfo::untitled(created_at));
    let mut events = Vec::new();

    for index in 0..zone_count {
        apply(
            &mut layout,
            Command::CreateZone {
                draft: ZoneDraft::new(
                    format!("Zone {index}"),
                    ZoneColor::DEFAULT,
                    Price::from_cents(u64::from(index) * 1_000),
                ),
            },
            &mut events,
        );
    }

    for (index, zone) in seat_zones.iter().enumerate() {
        let x = u32::try_from(index).expect("small index") * 30;
        apply(
            &mut layout,
            Command::SetActiveZone {
                zone: ZoneId::new(zone % zone_count + 1),
            },
            &mut events,
        );
        apply(
            &mut layout,
            Command::PlaceSeat {
                position: GridPoint::new(x, 0),
            },
            &mut events,
        );
    }

    layout
}

proptest! {
    #[test]
    fn deleted_zones_never_remain_referenced(
        zone_count in 1u32..6,
        seat_zones in proptest::collection::vec(0u32..6, 0..24),
        deletions in proptest::collection::vec(0u32..6, 1..6),
    ) {
        let mut layout = layout_with(zone_count, &seat_zones);
        let seat_total = query::seats(&layout).len();

        for deletion in deletions {
            let target = ZoneId::new(deletion % zone_count + 1);
            let before: Vec<Option<ZoneId>> =
                query::seats(&layout).iter().map(|seat| seat.zone).collect();
            let fallback_before = query::zones(&layout)
                .iter()
                .map(|zone| zone.id)
                .find(|id| *id != target);
            let existed = query::zone(&layout, target).is_some();

            let mut events = Vec::new();
            apply(&mut layout, Command::DeleteZone { zone: target }, &mut events);

            prop_assert!(query::zone(&layout, target).is_none());
            prop_assert_eq!(query::seats(&layout).len(), seat_total);
            prop_assert!(query::active_zone(&layout) != Some(target));

            for (seat, previous) in query::seats(&layout).iter().zip(before) {
                if existed && previous == Some(target) {
                    prop_assert_eq!(seat.zone, fallback_before);
                } else {
                    prop_assert_eq!(seat.zone, previous);
                }
            }

            if existed {
                let reassigned = events.iter().any(|event| matches!(
                    event,
                    Event::ZoneRemoved { zone, reassigned_to, .. }
                        if *zone == target && *reassigned_to == fallback_before
                ));
                prop_assert!(reassigned);
            } else {
                prop_assert!(events.iter().all(Event::is_rejection));
            }
        }

        let remaining: Vec<ZoneId> = query::zones(&layout).iter().map(|zone| zone.id).collect();
        for seat in query::seats(&layout) {
            match seat.zone {
                Some(zone) => prop_assert!(remaining.contains(&zone)),
                None => prop_assert!(remaining.is_empty()),
            }
        }
    }
}
