//! Serialisable bundle of a seat map and its child collections.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    Aisle, CanvasDimensions, EntryExit, Seat, SeatMapId, VenueId, Zone, ZoneId, UNTITLED_MAP_NAME,
};

/// Metadata describing a seat map.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatMapInfo {
    /// Persisted identifier, `None` until the map is saved for the first time.
    pub id: Option<SeatMapId>,
    /// Display name.
    pub name: String,
    /// Venue the map is bound to; templates are never bound.
    pub venue: Option<VenueId>,
    /// Marks maps reusable as a starting point for new venues.
    pub is_template: bool,
    /// Fixed canvas size.
    pub dimensions: CanvasDimensions,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl SeatMapInfo {
    /// Describes a new, unsaved map with default canvas dimensions.
    #[must_use]
    pub fn new(name: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            id: None,
            name: name.into(),
            venue: None,
            is_template: false,
            dimensions: CanvasDimensions::default(),
            created_at,
        }
    }

    /// Describes an unnamed, unsaved map.
    #[must_use]
    pub fn untitled(created_at: DateTime<Utc>) -> Self {
        Self::new(UNTITLED_MAP_NAME, created_at)
    }
}

/// Seat map together with every zone, seat, entry/exit and aisle it owns.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutSnapshot {
    /// Map metadata.
    pub map: SeatMapInfo,
    /// Zones in stored order.
    pub zones: Vec<Zone>,
    /// Seats in placement order.
    pub seats: Vec<Seat>,
    /// Entry/exits in creation order.
    pub entry_exits: Vec<EntryExit>,
    /// Aisles in creation order.
    pub aisles: Vec<Aisle>,
}

impl LayoutSnapshot {
    /// Creates a snapshot of a map without any children.
    #[must_use]
    pub fn empty(map: SeatMapInfo) -> Self {
        Self {
            map,
            zones: Vec::new(),
            seats: Vec::new(),
            entry_exits: Vec::new(),
            aisles: Vec::new(),
        }
    }

    /// Looks up a zone of the snapshot.
    #[must_use]
    pub fn zone(&self, zone: ZoneId) -> Option<&Zone> {
        self.zones.iter().find(|candidate| candidate.id == zone)
    }

    /// Clones a template into a fresh, unsaved map bound to `venue`.
    ///
    /// Children keep their shape and identifiers but no longer point at the
    /// template's persisted map.
    #[must_use]
    pub fn instantiate_template(
        &self,
        name: impl Into<String>,
        venue: Option<VenueId>,
        created_at: DateTime<Utc>,
    ) -> Self {
        let map = SeatMapInfo {
            id: None,
            name: name.into(),
            venue,
            is_template: false,
            dimensions: self.map.dimensions,
            created_at,
        };

        let mut clone = Self {
            map,
            zones: self.zones.clone(),
            seats: self.seats.clone(),
            entry_exits: self.entry_exits.clone(),
            aisles: self.aisles.clone(),
        };
        clone.assign_map(None);
        clone
    }

    /// Points every child at the provided map.
    pub fn assign_map(&mut self, map: Option<SeatMapId>) {
        self.map.id = map;
        for zone in &mut self.zones {
            zone.map = map;
        }
        for seat in &mut self.seats {
            seat.map = map;
        }
        for entry in &mut self.entry_exits {
            entry.map = map;
        }
        for aisle in &mut self.aisles {
            aisle.map = map;
        }
    }
}
