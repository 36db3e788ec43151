use chrono::{TimeZone, Utc};
use seatmap_core::{
    grid::snap_click, AisleDraft, AisleId, CanvasPoint, Command, EntryExitDraft, EntryExitId,
    Event, FixtureError, GridPoint, PlacementError, Price, RowLabel, SeatError, SeatId,
    SeatMapInfo, SeatStatus, SeatType, Tool, ZoneColor, ZoneDraft, ZoneError, ZoneId, ZonePatch,
};
use seatmap_layout::{apply, query, Layout};

fn map() -> SeatMapInfo {
    let created_at = Utc
        .with_ymd_and_hms(2024, 3, 1, 12, 0, 0)
        .single()
        .expect("valid timestamp");
    SeatMapInfo::untitled(created_at)
}

fn run(layout: &mut Layout, command: Command) -> Vec<Event> {
    let mut events = Vec::new();
    apply(layout, command, &mut events);
    events
}

fn zone(name: &str, cents: u64) -> Command {
    Command::CreateZone {
        draft: ZoneDraft::new(name, ZoneColor::DEFAULT, Price::from_cents(cents)),
    }
}

fn place(layout: &mut Layout, x: f32, y: f32) -> SeatId {
    let position = snap_click(CanvasPoint::new(x, y));
    match run(layout, Command::PlaceSeat { position }).as_slice() {
        [Event::SeatPlaced { seat, .. }] => *seat,
        other => panic!("unexpected events {other:?}"),
    }
}

#[test]
fn first_zone_becomes_active_and_later_zones_do_not() {
    let mut layout = Layout::new(map());

    let events = run(&mut layout, zone("General", 5_000));
    assert_eq!(
        events,
        vec![
            Event::ZoneCreated {
                zone: ZoneId::new(1)
            },
            Event::ActiveZoneChanged {
                zone: Some(ZoneId::new(1))
            },
        ]
    );

    let events = run(&mut layout, zone("Balcony", 3_000));
    assert_eq!(
        events,
        vec![Event::ZoneCreated {
            zone: ZoneId::new(2)
        }]
    );
    assert_eq!(query::active_zone(&layout), Some(ZoneId::new(1)));
}

#[test]
fn blank_zone_names_are_rejected() {
    let mut layout = Layout::new(map());

    let events = run(&mut layout, zone("   ", 5_000));
    assert_eq!(
        events,
        vec![Event::ZoneRejected {
            zone: None,
            reason: ZoneError::EmptyName,
        }]
    );
    assert!(query::zones(&layout).is_empty());
}

#[test]
fn zone_names_are_stored_trimmed() {
    let mut layout = Layout::new(map());
    let _ = run(&mut layout, zone("  Floor  ", 5_000));
    assert_eq!(query::zones(&layout)[0].name, "Floor");
}

#[test]
fn editing_a_zone_merges_fields_without_touching_seats() {
    let mut layout = Layout::with_default_zones(map());
    let seat = place(&mut layout, 10.0, 10.0);

    let events = run(
        &mut layout,
        Command::EditZone {
            zone: ZoneId::new(1),
            patch: ZonePatch {
                price: Some(Price::from_cents(7_500)),
                ..ZonePatch::default()
            },
        },
    );
    assert_eq!(
        events,
        vec![Event::ZoneUpdated {
            zone: ZoneId::new(1)
        }]
    );

    let general = query::zone(&layout, ZoneId::new(1)).expect("zone exists");
    assert_eq!(general.name, "General");
    assert_eq!(general.price, Price::from_cents(7_500));

    let stored = query::seats(&layout)
        .iter()
        .find(|candidate| candidate.id == seat)
        .expect("seat survives");
    assert_eq!(stored.zone, Some(ZoneId::new(1)));
}

#[test]
fn editing_with_a_blank_name_is_rejected() {
    let mut layout = Layout::with_default_zones(map());
    let events = run(
        &mut layout,
        Command::EditZone {
            zone: ZoneId::new(2),
            patch: ZonePatch {
                name: Some(" ".to_owned()),
                ..ZonePatch::default()
            },
        },
    );
    assert_eq!(
        events,
        vec![Event::ZoneRejected {
            zone: Some(ZoneId::new(2)),
            reason: ZoneError::EmptyName,
        }]
    );
    assert_eq!(
        query::zone(&layout, ZoneId::new(2)).map(|zone| zone.name.as_str()),
        Some("VIP")
    );
}

#[test]
fn deleting_a_zone_moves_its_seats_to_the_first_remaining_zone() {
    let mut layout = Layout::with_default_zones(map());
    let _ = run(
        &mut layout,
        Command::SetActiveZone {
            zone: ZoneId::new(2),
        },
    );
    let vip_seat = place(&mut layout, 30.0, 30.0);

    let events = run(
        &mut layout,
        Command::DeleteZone {
            zone: ZoneId::new(2),
        },
    );
    assert_eq!(
        events,
        vec![
            Event::ZoneRemoved {
                zone: ZoneId::new(2),
                reassigned_to: Some(ZoneId::new(1)),
                reassigned_seats: 1,
            },
            Event::ActiveZoneChanged {
                zone: Some(ZoneId::new(1))
            },
        ]
    );

    let seat = query::seats(&layout)
        .iter()
        .find(|seat| seat.id == vip_seat)
        .expect("seat survives zone deletion");
    assert_eq!(seat.zone, Some(ZoneId::new(1)));
    assert_eq!(seat.kind, SeatType::Vip, "type is fixed at placement time");
}

#[test]
fn deleting_the_last_zone_orphans_seats_and_blocks_placement() {
    let mut layout = Layout::new(map());
    let _ = run(&mut layout, zone("Only", 1_000));
    let seat = place(&mut layout, 0.0, 0.0);

    let _ = run(
        &mut layout,
        Command::DeleteZone {
            zone: ZoneId::new(1),
        },
    );
    assert!(query::zones(&layout).is_empty());
    assert_eq!(query::active_zone(&layout), None);
    assert!(!query::can_place_seats(&layout));
    assert_eq!(query::seats(&layout)[0].id, seat);
    assert_eq!(query::seats(&layout)[0].zone, None);

    let events = run(
        &mut layout,
        Command::PlaceSeat {
            position: GridPoint::new(60, 60),
        },
    );
    assert_eq!(
        events,
        vec![Event::SeatPlacementRejected {
            reason: PlacementError::NoActiveZone
        }]
    );
    assert_eq!(
        run(&mut layout, Command::GenerateRow),
        vec![Event::SeatPlacementRejected {
            reason: PlacementError::NoActiveZone
        }]
    );
    assert_eq!(query::seats(&layout).len(), 1);
}

#[test]
fn clicks_snap_to_the_thirty_unit_grid_and_derive_rows() {
    let mut layout = Layout::with_default_zones(map());

    let first = run(
        &mut layout,
        Command::PlaceSeat {
            position: snap_click(CanvasPoint::new(44.0, 44.0)),
        },
    );
    assert_eq!(
        first,
        vec![Event::SeatPlaced {
            seat: SeatId::new(1),
            row: RowLabel::new(2),
            number: 1,
        }]
    );
    assert_eq!(query::seats(&layout)[0].position, GridPoint::new(30, 30));

    let second = run(
        &mut layout,
        Command::PlaceSeat {
            position: snap_click(CanvasPoint::new(100.0, 35.0)),
        },
    );
    assert_eq!(
        second,
        vec![Event::SeatPlaced {
            seat: SeatId::new(2),
            row: RowLabel::new(2),
            number: 2,
        }]
    );
}

#[test]
fn seat_numbers_count_row_members_across_zones() {
    let mut layout = Layout::with_default_zones(map());
    let _ = place(&mut layout, 0.0, 0.0);
    let _ = run(
        &mut layout,
        Command::SetActiveZone {
            zone: ZoneId::new(2),
        },
    );
    let _ = place(&mut layout, 60.0, 0.0);

    let seats = query::seats(&layout);
    assert_eq!(seats[1].number, 2);
    assert_eq!(seats[1].kind, SeatType::Vip);
    assert_eq!(seats[1].status, SeatStatus::Available);
}

#[test]
fn generated_rows_follow_the_forty_unit_spacing() {
    let mut layout = Layout::with_default_zones(map());
    let _ = place(&mut layout, 0.0, 90.0);

    let events = run(&mut layout, Command::GenerateRow);
    let expected_ids: Vec<SeatId> = (2..=11).map(SeatId::new).collect();
    assert_eq!(
        events,
        vec![Event::RowGenerated {
            row: RowLabel::new(5),
            seats: expected_ids,
        }]
    );

    let generated: Vec<_> = query::seats(&layout).iter().skip(1).collect();
    assert_eq!(generated.len(), 10);
    for (index, seat) in generated.iter().enumerate() {
        let number = u32::try_from(index).expect("small index") + 1;
        assert_eq!(seat.number, number);
        assert_eq!(seat.row, RowLabel::new(5));
        assert_eq!(seat.position, GridPoint::new(number * 40, 200));
        assert_eq!(seat.zone, Some(ZoneId::new(1)));
    }
}

#[test]
fn first_generated_row_is_row_one() {
    let mut layout = Layout::with_default_zones(map());
    let _ = run(&mut layout, Command::GenerateRow);
    let _ = run(&mut layout, Command::GenerateRow);

    let rows: Vec<u32> = query::seats(&layout)
        .iter()
        .map(|seat| seat.row.number())
        .collect();
    assert_eq!(&rows[..10], &[1; 10]);
    assert_eq!(&rows[10..], &[2; 10]);
}

#[test]
fn repaint_requires_the_paint_tool() {
    let mut layout = Layout::with_default_zones(map());
    let seat = place(&mut layout, 0.0, 0.0);

    let rejected = run(
        &mut layout,
        Command::RepaintSeat {
            seat,
            zone: ZoneId::new(2),
        },
    );
    assert_eq!(
        rejected,
        vec![Event::SeatCommandRejected {
            seat,
            reason: SeatError::InvalidTool,
        }]
    );
    assert_eq!(query::seats(&layout)[0].zone, Some(ZoneId::new(1)));

    let _ = run(
        &mut layout,
        Command::SelectTool {
            tool: Tool::PaintZone,
        },
    );
    let events = run(
        &mut layout,
        Command::RepaintSeat {
            seat,
            zone: ZoneId::new(2),
        },
    );
    assert_eq!(
        events,
        vec![Event::SeatRepainted {
            seat,
            from: Some(ZoneId::new(1)),
            to: ZoneId::new(2),
        }]
    );

    let repainted = &query::seats(&layout)[0];
    assert_eq!(repainted.zone, Some(ZoneId::new(2)));
    assert_eq!(repainted.kind, SeatType::Regular);
    assert_eq!(repainted.position, GridPoint::new(0, 0));
}

#[test]
fn repaint_to_an_unknown_zone_is_rejected() {
    let mut layout = Layout::with_default_zones(map());
    let seat = place(&mut layout, 0.0, 0.0);
    let _ = run(
        &mut layout,
        Command::SelectTool {
            tool: Tool::PaintZone,
        },
    );

    let events = run(
        &mut layout,
        Command::RepaintSeat {
            seat,
            zone: ZoneId::new(99),
        },
    );
    assert_eq!(
        events,
        vec![Event::SeatCommandRejected {
            seat,
            reason: SeatError::MissingZone,
        }]
    );
}

#[test]
fn selection_is_toggled_only_with_the_select_tool_and_cleared_on_switch() {
    let mut layout = Layout::with_default_zones(map());
    let seat = place(&mut layout, 0.0, 0.0);

    assert_eq!(
        run(&mut layout, Command::ToggleSeatSelection { seat }),
        vec![Event::SeatCommandRejected {
            seat,
            reason: SeatError::InvalidTool,
        }]
    );

    let _ = run(&mut layout, Command::SelectTool { tool: Tool::Select });
    assert_eq!(
        run(&mut layout, Command::ToggleSeatSelection { seat }),
        vec![Event::SeatSelectionToggled {
            seat,
            selected: true,
        }]
    );
    assert!(query::is_selected(&layout, seat));

    let events = run(&mut layout, Command::SelectTool { tool: Tool::Delete });
    assert_eq!(
        events,
        vec![
            Event::SelectionCleared,
            Event::ToolChanged { tool: Tool::Delete },
        ]
    );
    assert!(query::selection(&layout).is_empty());
    assert_eq!(query::seats(&layout).len(), 1, "tool switch keeps seats");
}

#[test]
fn selecting_the_active_tool_again_is_silent() {
    let mut layout = Layout::new(map());
    assert!(run(
        &mut layout,
        Command::SelectTool {
            tool: Tool::PlaceSeat
        }
    )
    .is_empty());
}

#[test]
fn removing_a_seat_drops_it_from_the_selection() {
    let mut layout = Layout::with_default_zones(map());
    let seat = place(&mut layout, 0.0, 0.0);
    let _ = run(&mut layout, Command::SelectTool { tool: Tool::Select });
    let _ = run(&mut layout, Command::ToggleSeatSelection { seat });

    assert_eq!(
        run(&mut layout, Command::RemoveSeat { seat }),
        vec![Event::SeatRemoved { seat }]
    );
    assert!(query::selection(&layout).is_empty());
    assert_eq!(
        run(&mut layout, Command::RemoveSeat { seat }),
        vec![Event::SeatCommandRejected {
            seat,
            reason: SeatError::MissingSeat,
        }]
    );
}

#[test]
fn status_changes_are_reported_once() {
    let mut layout = Layout::with_default_zones(map());
    let seat = place(&mut layout, 0.0, 0.0);

    let occupy = Command::SetSeatStatus {
        seat,
        status: SeatStatus::Occupied,
    };
    assert_eq!(
        run(&mut layout, occupy.clone()),
        vec![Event::SeatStatusChanged {
            seat,
            status: SeatStatus::Occupied,
        }]
    );
    assert!(run(&mut layout, occupy).is_empty());
}

#[test]
fn clearing_seats_empties_the_registry_and_selection() {
    let mut layout = Layout::with_default_zones(map());
    let _ = run(&mut layout, Command::GenerateRow);
    let _ = run(&mut layout, Command::SelectTool { tool: Tool::Select });
    let _ = run(
        &mut layout,
        Command::ToggleSeatSelection {
            seat: SeatId::new(3),
        },
    );

    let events = run(&mut layout, Command::ClearSeats);
    assert_eq!(
        events,
        vec![Event::SelectionCleared, Event::SeatsCleared { removed: 10 }]
    );
    assert!(query::seats(&layout).is_empty());
    assert_eq!(query::zones(&layout).len(), 2);
}

#[test]
fn entry_exits_are_created_replaced_and_removed() {
    let mut layout = Layout::new(map());
    let draft = EntryExitDraft::numbered(GridPoint::new(30, 60), 0);
    assert_eq!(draft.name, "Entry 1");
    assert_eq!(draft.capacity, 100);

    assert_eq!(
        run(
            &mut layout,
            Command::SubmitEntryExit {
                target: None,
                draft,
            }
        ),
        vec![Event::EntryExitCreated {
            entry: EntryExitId::new(1)
        }]
    );

    let mut edit = EntryExitDraft::from_entry_exit(&query::entry_exits(&layout)[0]);
    edit.name = "Main Gate".to_owned();
    edit.capacity = 250;
    assert_eq!(
        run(
            &mut layout,
            Command::SubmitEntryExit {
                target: Some(EntryExitId::new(1)),
                draft: edit,
            }
        ),
        vec![Event::EntryExitUpdated {
            entry: EntryExitId::new(1)
        }]
    );
    let stored = &query::entry_exits(&layout)[0];
    assert_eq!(stored.name, "Main Gate");
    assert_eq!(stored.capacity, 250);
    assert_eq!(stored.position, GridPoint::new(30, 60));

    assert_eq!(
        run(
            &mut layout,
            Command::RemoveEntryExit {
                entry: EntryExitId::new(1)
            }
        ),
        vec![Event::EntryExitRemoved {
            entry: EntryExitId::new(1)
        }]
    );
    assert!(query::entry_exits(&layout).is_empty());
}

#[test]
fn entry_exit_validation_rejects_blank_names_and_zero_capacity() {
    let mut layout = Layout::new(map());
    let mut draft = EntryExitDraft::numbered(GridPoint::new(0, 0), 0);
    draft.capacity = 0;
    assert_eq!(
        run(
            &mut layout,
            Command::SubmitEntryExit {
                target: None,
                draft: draft.clone(),
            }
        ),
        vec![Event::EntryExitRejected {
            entry: None,
            reason: FixtureError::ZeroCapacity,
        }]
    );

    draft.capacity = 10;
    draft.name = "\t".to_owned();
    assert_eq!(
        run(
            &mut layout,
            Command::SubmitEntryExit {
                target: None,
                draft,
            }
        ),
        vec![Event::EntryExitRejected {
            entry: None,
            reason: FixtureError::EmptyName,
        }]
    );
    assert!(query::entry_exits(&layout).is_empty());
}

#[test]
fn aisles_follow_the_same_contract() {
    let mut layout = Layout::new(map());
    let _ = run(
        &mut layout,
        Command::SubmitAisle {
            target: None,
            draft: AisleDraft::numbered(GridPoint::new(90, 0), 0),
        },
    );
    let aisle = &query::aisles(&layout)[0];
    assert_eq!(aisle.name, "Aisle 1");
    assert_eq!((aisle.width, aisle.length), (20, 100));

    let next = AisleDraft::numbered(GridPoint::new(0, 0), query::aisles(&layout).len());
    assert_eq!(next.name, "Aisle 2");

    assert_eq!(
        run(
            &mut layout,
            Command::SubmitAisle {
                target: Some(AisleId::new(5)),
                draft: next,
            }
        ),
        vec![Event::AisleRejected {
            aisle: Some(AisleId::new(5)),
            reason: FixtureError::MissingFixture,
        }]
    );
    assert_eq!(
        run(
            &mut layout,
            Command::RemoveAisle {
                aisle: AisleId::new(1)
            }
        ),
        vec![Event::AisleRemoved {
            aisle: AisleId::new(1)
        }]
    );
}

#[test]
fn restored_layouts_continue_identifier_allocation() {
    let mut layout = Layout::with_default_zones(map());
    let _ = place(&mut layout, 0.0, 0.0);
    let _ = place(&mut layout, 30.0, 0.0);

    let mut restored = Layout::restore(query::snapshot(&layout));
    assert_eq!(query::active_zone(&restored), Some(ZoneId::new(1)));
    assert_eq!(place(&mut restored, 60.0, 0.0), SeatId::new(3));
    assert_eq!(query::seats(&restored)[2].number, 3);
}
