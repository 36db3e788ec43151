//! Zone registry operations, including the cascading reassignment on delete.

use seatmap_core::{Event, Zone, ZoneDraft, ZoneError, ZoneId, ZonePatch};

use crate::Layout;

impl Layout {
    pub(crate) fn create_zone(&mut self, draft: ZoneDraft, out_events: &mut Vec<Event>) {
        let name = draft.name.trim();
        if name.is_empty() {
            out_events.push(Event::ZoneRejected {
                zone: None,
                reason: ZoneError::EmptyName,
            });
            return;
        }

        let id = ZoneId::new(self.zones.allocate());
        self.zones.push(Zone {
            id,
            name: name.to_owned(),
            color: draft.color,
            price: draft.price,
            map: self.map.id,
        });
        out_events.push(Event::ZoneCreated { zone: id });

        if self.active_zone.is_none() {
            self.active_zone = Some(id);
            out_events.push(Event::ActiveZoneChanged { zone: Some(id) });
        }
    }

    pub(crate) fn edit_zone(&mut self, id: ZoneId, patch: ZonePatch, out_events: &mut Vec<Event>) {
        let name = match patch.name.as_deref().map(str::trim) {
            Some("") => {
                out_events.push(Event::ZoneRejected {
                    zone: Some(id),
                    reason: ZoneError::EmptyName,
                });
                return;
            }
            other => other.map(str::to_owned),
        };

        let Some(zone) = self.zones.get_mut(id) else {
            out_events.push(Event::ZoneRejected {
                zone: Some(id),
                reason: ZoneError::MissingZone,
            });
            return;
        };

        if let Some(name) = name {
            zone.name = name;
        }
        if let Some(color) = patch.color {
            zone.color = color;
        }
        if let Some(price) = patch.price {
            zone.price = price;
        }
        out_events.push(Event::ZoneUpdated { zone: id });
    }

    /// Deletes the zone and hands its seats to the first remaining zone.
    ///
    /// When no zone remains the seats are orphaned with a `None` zone.
    pub(crate) fn delete_zone(&mut self, id: ZoneId, out_events: &mut Vec<Event>) {
        if self.zones.remove(id).is_none() {
            out_events.push(Event::ZoneRejected {
                zone: Some(id),
                reason: ZoneError::MissingZone,
            });
            return;
        }

        let fallback = self.zones.first().map(|zone| zone.id);
        let mut reassigned_seats = 0_u32;
        for seat in self.seats.iter_mut() {
            if seat.zone == Some(id) {
                seat.zone = fallback;
                reassigned_seats = reassigned_seats.saturating_add(1);
            }
        }

        out_events.push(Event::ZoneRemoved {
            zone: id,
            reassigned_to: fallback,
            reassigned_seats,
        });

        if self.active_zone == Some(id) {
            self.active_zone = fallback;
            out_events.push(Event::ActiveZoneChanged { zone: fallback });
        }
    }

    pub(crate) fn set_active_zone(&mut self, id: ZoneId, out_events: &mut Vec<Event>) {
        if !self.zones.contains(id) {
            out_events.push(Event::ZoneRejected {
                zone: Some(id),
                reason: ZoneError::MissingZone,
            });
            return;
        }

        if self.active_zone != Some(id) {
            self.active_zone = Some(id);
            out_events.push(Event::ActiveZoneChanged { zone: Some(id) });
        }
    }
}
