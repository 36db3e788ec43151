//! Seat registry operations: placement, row generation, repainting and selection.

use seatmap_core::{
    grid::{generated_seat_position, row_label_for, SEATS_PER_GENERATED_ROW},
    Event, GridPoint, PlacementError, RowLabel, Seat, SeatError, SeatId, SeatStatus, SeatType,
    Tool, Zone, ZoneId,
};

use crate::Layout;

impl Layout {
    fn active_zone_entry(&self) -> Option<&Zone> {
        self.active_zone.and_then(|zone| self.zones.get(zone))
    }

    fn reject_seat(seat: SeatId, reason: SeatError, out_events: &mut Vec<Event>) {
        out_events.push(Event::SeatCommandRejected { seat, reason });
    }

    /// Places a seat at an already snapped position inside the active zone.
    ///
    /// The row is derived from `y` alone and the seat number counts every
    /// earlier seat of that row regardless of zone.
    pub(crate) fn place_seat(&mut self, position: GridPoint, out_events: &mut Vec<Event>) {
        let Some(zone) = self.active_zone_entry() else {
            out_events.push(Event::SeatPlacementRejected {
                reason: PlacementError::NoActiveZone,
            });
            return;
        };
        let zone_id = zone.id;
        let kind = SeatType::for_zone_name(&zone.name);

        let row = row_label_for(position.y);
        let in_row = self.seats.iter().filter(|seat| seat.row == row).count();
        let number = u32::try_from(in_row).unwrap_or(u32::MAX).saturating_add(1);

        let id = SeatId::new(self.seats.allocate());
        self.seats.push(Seat {
            id,
            position,
            row,
            number,
            zone: Some(zone_id),
            map: self.map.id,
            kind,
            status: SeatStatus::Available,
        });
        out_events.push(Event::SeatPlaced {
            seat: id,
            row,
            number,
        });
    }

    /// Appends ten seats on a new row below the highest existing row number.
    pub(crate) fn generate_row(&mut self, out_events: &mut Vec<Event>) {
        let Some(zone) = self.active_zone_entry() else {
            out_events.push(Event::SeatPlacementRejected {
                reason: PlacementError::NoActiveZone,
            });
            return;
        };
        let zone_id = zone.id;
        let kind = SeatType::for_zone_name(&zone.name);

        let last_row = self
            .seats
            .iter()
            .map(|seat| seat.row.number())
            .max()
            .unwrap_or(0);
        let row_number = last_row.saturating_add(1);
        let row = RowLabel::new(row_number);

        let mut generated = Vec::with_capacity(SEATS_PER_GENERATED_ROW as usize);
        for number in 1..=SEATS_PER_GENERATED_ROW {
            generated.push(Seat {
                id: SeatId::new(self.seats.allocate()),
                position: generated_seat_position(row_number, number),
                row,
                number,
                zone: Some(zone_id),
                map: self.map.id,
                kind,
                status: SeatStatus::Available,
            });
        }

        let seats = generated.iter().map(|seat| seat.id).collect();
        self.seats.extend(generated);
        out_events.push(Event::RowGenerated { row, seats });
    }

    pub(crate) fn repaint_seat(&mut self, id: SeatId, zone: ZoneId, out_events: &mut Vec<Event>) {
        if self.active_tool != Tool::PaintZone {
            Self::reject_seat(id, SeatError::InvalidTool, out_events);
            return;
        }
        if !self.zones.contains(zone) {
            Self::reject_seat(id, SeatError::MissingZone, out_events);
            return;
        }
        let Some(seat) = self.seats.get_mut(id) else {
            Self::reject_seat(id, SeatError::MissingSeat, out_events);
            return;
        };

        let from = seat.zone.replace(zone);
        out_events.push(Event::SeatRepainted {
            seat: id,
            from,
            to: zone,
        });
    }

    pub(crate) fn remove_seat(&mut self, id: SeatId, out_events: &mut Vec<Event>) {
        if self.seats.remove(id).is_none() {
            Self::reject_seat(id, SeatError::MissingSeat, out_events);
            return;
        }

        let _ = self.selection.remove(&id);
        out_events.push(Event::SeatRemoved { seat: id });
    }

    /// Toggles selection membership.
    ///
    /// Occupancy is not checked here; callers decide whether occupied seats
    /// may be picked.
    pub(crate) fn toggle_selection(&mut self, id: SeatId, out_events: &mut Vec<Event>) {
        if self.active_tool != Tool::Select {
            Self::reject_seat(id, SeatError::InvalidTool, out_events);
            return;
        }
        if !self.seats.contains(id) {
            Self::reject_seat(id, SeatError::MissingSeat, out_events);
            return;
        }

        let selected = if self.selection.remove(&id) {
            false
        } else {
            self.selection.insert(id)
        };
        out_events.push(Event::SeatSelectionToggled { seat: id, selected });
    }

    pub(crate) fn clear_selection(&mut self, out_events: &mut Vec<Event>) {
        if self.selection.is_empty() {
            return;
        }

        self.selection.clear();
        out_events.push(Event::SelectionCleared);
    }

    pub(crate) fn set_seat_status(
        &mut self,
        id: SeatId,
        status: SeatStatus,
        out_events: &mut Vec<Event>,
    ) {
        let Some(seat) = self.seats.get_mut(id) else {
            Self::reject_seat(id, SeatError::MissingSeat, out_events);
            return;
        };

        if seat.status != status {
            seat.status = status;
            out_events.push(Event::SeatStatusChanged { seat: id, status });
        }
    }

    pub(crate) fn clear_seats(&mut self, out_events: &mut Vec<Event>) {
        let removed = self.seats.clear();
        self.clear_selection(out_events);
        out_events.push(Event::SeatsCleared {
            removed: u32::try_from(removed).unwrap_or(u32::MAX),
        });
    }
}
