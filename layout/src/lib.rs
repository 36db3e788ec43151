#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative seat-map layout state.
//!
//! The [`Layout`] exclusively owns the zone, seat, entry/exit and aisle
//! registries of a single editing session. Every mutation goes through
//! [`apply`], which runs to completion synchronously and reports its outcome
//! as [`Event`] values; rejected commands leave the layout untouched.

use std::collections::BTreeSet;

use seatmap_core::{
    Aisle, AisleId, Command, EntryExit, EntryExitId, Event, LayoutLookup, LayoutSnapshot, Price,
    Seat, SeatId, SeatMapInfo, Tool, Zone, ZoneColor, ZoneDraft, ZoneId,
};

mod fixtures;
mod registry;
mod seats;
mod zones;

use registry::Registry;

/// Zones every new map starts with when created through [`Layout::with_default_zones`].
fn default_zone_drafts() -> [ZoneDraft; 2] {
    [
        ZoneDraft::new("General", ZoneColor::DEFAULT, Price::from_cents(5_000)),
        ZoneDraft::new(
            "VIP",
            ZoneColor::from_rgb(0x8b, 0x5c, 0xf6),
            Price::from_cents(10_000),
        ),
    ]
}

/// Represents the seat map being edited.
#[derive(Clone, Debug)]
pub struct Layout {
    map: SeatMapInfo,
    zones: Registry<Zone>,
    seats: Registry<Seat>,
    entry_exits: Registry<EntryExit>,
    aisles: Registry<Aisle>,
    active_zone: Option<ZoneId>,
    active_tool: Tool,
    selection: BTreeSet<SeatId>,
}

impl Layout {
    /// Creates an empty layout for the provided map.
    #[must_use]
    pub fn new(map: SeatMapInfo) -> Self {
        Self {
            map,
            zones: Registry::new(),
            seats: Registry::new(),
            entry_exits: Registry::new(),
            aisles: Registry::new(),
            active_zone: None,
            active_tool: Tool::default(),
            selection: BTreeSet::new(),
        }
    }

    /// Creates a layout seeded with the `General` and `VIP` zones, `General` active.
    #[must_use]
    pub fn with_default_zones(map: SeatMapInfo) -> Self {
        let mut layout = Self::new(map);
        let mut events = Vec::new();
        for draft in default_zone_drafts() {
            layout.create_zone(draft, &mut events);
        }
        layout
    }

    /// Rebuilds a layout from a loaded or cloned snapshot.
    ///
    /// The first stored zone becomes the active zone.
    #[must_use]
    pub fn restore(snapshot: LayoutSnapshot) -> Self {
        let LayoutSnapshot {
            map,
            zones,
            seats,
            entry_exits,
            aisles,
        } = snapshot;
        let active_zone = zones.first().map(|zone| zone.id);
        Self {
            map,
            zones: Registry::from_entries(zones),
            seats: Registry::from_entries(seats),
            entry_exits: Registry::from_entries(entry_exits),
            aisles: Registry::from_entries(aisles),
            active_zone,
            active_tool: Tool::default(),
            selection: BTreeSet::new(),
        }
    }

    fn select_tool(&mut self, tool: Tool, out_events: &mut Vec<Event>) {
        if self.active_tool == tool {
            return;
        }

        self.active_tool = tool;
        self.clear_selection(out_events);
        out_events.push(Event::ToolChanged { tool });
    }
}

impl LayoutLookup for Layout {
    fn seat(&self, seat: SeatId) -> Option<&Seat> {
        self.seats.get(seat)
    }

    fn entry_exit(&self, entry: EntryExitId) -> Option<&EntryExit> {
        self.entry_exits.get(entry)
    }

    fn aisle(&self, aisle: AisleId) -> Option<&Aisle> {
        self.aisles.get(aisle)
    }

    fn entry_exit_count(&self) -> usize {
        self.entry_exits.len()
    }

    fn aisle_count(&self) -> usize {
        self.aisles.len()
    }
}

/// Applies the provided command to the layout, reporting the outcome as events.
pub fn apply(layout: &mut Layout, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::SelectTool { tool } => layout.select_tool(tool, out_events),
        Command::SetActiveZone { zone } => layout.set_active_zone(zone, out_events),
        Command::CreateZone { draft } => layout.create_zone(draft, out_events),
        Command::EditZone { zone, patch } => layout.edit_zone(zone, patch, out_events),
        Command::DeleteZone { zone } => layout.delete_zone(zone, out_events),
        Command::PlaceSeat { position } => layout.place_seat(position, out_events),
        Command::GenerateRow => layout.generate_row(out_events),
        Command::RepaintSeat { seat, zone } => layout.repaint_seat(seat, zone, out_events),
        Command::RemoveSeat { seat } => layout.remove_seat(seat, out_events),
        Command::ToggleSeatSelection { seat } => layout.toggle_selection(seat, out_events),
        Command::ClearSelection => layout.clear_selection(out_events),
        Command::SetSeatStatus { seat, status } => {
            layout.set_seat_status(seat, status, out_events);
        }
        Command::ClearSeats => layout.clear_seats(out_events),
        Command::SubmitEntryExit { target, draft } => {
            layout.submit_entry_exit(target, draft, out_events);
        }
        Command::RemoveEntryExit { entry } => layout.remove_entry_exit(entry, out_events),
        Command::SubmitAisle { target, draft } => layout.submit_aisle(target, draft, out_events),
        Command::RemoveAisle { aisle } => layout.remove_aisle(aisle, out_events),
        Command::RequestAnalyticsRefresh => {}
    }
}

/// Query functions that provide read-only access to the layout state.
pub mod query {
    use seatmap_core::{
        Aisle, EntryExit, LayoutSnapshot, Seat, SeatId, SeatMapInfo, Tool, Zone, ZoneId,
    };

    use super::Layout;

    /// Metadata of the map being edited.
    #[must_use]
    pub fn map(layout: &Layout) -> &SeatMapInfo {
        &layout.map
    }

    /// Zones in stored order.
    #[must_use]
    pub fn zones(layout: &Layout) -> &[Zone] {
        layout.zones.as_slice()
    }

    /// Seats in placement order.
    #[must_use]
    pub fn seats(layout: &Layout) -> &[Seat] {
        layout.seats.as_slice()
    }

    /// Entry/exits in creation order.
    #[must_use]
    pub fn entry_exits(layout: &Layout) -> &[EntryExit] {
        layout.entry_exits.as_slice()
    }

    /// Aisles in creation order.
    #[must_use]
    pub fn aisles(layout: &Layout) -> &[Aisle] {
        layout.aisles.as_slice()
    }

    /// Looks up a zone by identifier.
    #[must_use]
    pub fn zone(layout: &Layout, zone: ZoneId) -> Option<&Zone> {
        layout.zones.get(zone)
    }

    /// Zone used by seat placement, row generation and repainting.
    #[must_use]
    pub fn active_zone(layout: &Layout) -> Option<ZoneId> {
        layout.active_zone
    }

    /// Currently active tool.
    #[must_use]
    pub fn active_tool(layout: &Layout) -> Tool {
        layout.active_tool
    }

    /// Reports whether seat placement tools have any effect.
    ///
    /// Seats need a zone to belong to, so placement is disabled while no zone
    /// is active.
    #[must_use]
    pub fn can_place_seats(layout: &Layout) -> bool {
        layout.active_zone.is_some()
    }

    /// Selected seats in identifier order.
    #[must_use]
    pub fn selection(layout: &Layout) -> Vec<SeatId> {
        layout.selection.iter().copied().collect()
    }

    /// Reports whether the seat is part of the selection set.
    #[must_use]
    pub fn is_selected(layout: &Layout, seat: SeatId) -> bool {
        layout.selection.contains(&seat)
    }

    /// Captures the map and every child collection for saving or exporting.
    #[must_use]
    pub fn snapshot(layout: &Layout) -> LayoutSnapshot {
        LayoutSnapshot {
            map: layout.map.clone(),
            zones: layout.zones.as_slice().to_vec(),
            seats: layout.seats.as_slice().to_vec(),
            entry_exits: layout.entry_exits.as_slice().to_vec(),
            aisles: layout.aisles.as_slice().to_vec(),
        }
    }
}
