//! Bulk save and load of seat maps over the injected stores.

use std::{collections::BTreeMap, sync::Arc};

use chrono::{DateTime, Utc};
use seatmap_core::{
    Aisle, EntryExit, EventId, EventRecord, EventStatus, LayoutSnapshot, Price, Seat, SeatMapId,
    SeatMapInfo, SeatMapRecord, Ticket, Venue, VenueId, Zone, ZoneId,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, instrument};

use crate::{
    memory::InMemoryStore,
    record::{Record, RecordId},
    store::{Store, StoreError},
    tickets::TicketLedger,
};

/// Errors raised by multi-step persistence operations.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum PersistenceError {
    /// A store call failed; earlier steps are not rolled back.
    #[error(transparent)]
    Store(#[from] StoreError),
    /// The seat map does not exist.
    #[error("seat map {0} does not exist")]
    MissingSeatMap(SeatMapId),
    /// The event does not exist.
    #[error("event {0} does not exist")]
    MissingEvent(EventId),
}

/// Outcome of a successful bulk save.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SaveReport {
    /// Layout as persisted, carrying the identifiers allocated by the stores.
    pub snapshot: LayoutSnapshot,
    /// Editor zone identifier to persisted zone identifier.
    pub zone_ids: BTreeMap<ZoneId, ZoneId>,
}

impl SaveReport {
    /// Identifier of the saved map.
    #[must_use]
    pub fn map(&self) -> Option<SeatMapId> {
        self.snapshot.map.id
    }
}

/// Every record of every store, used to seed and dump in-memory backends.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataSet {
    /// Seat maps.
    pub seat_maps: Vec<SeatMapRecord>,
    /// Zones.
    pub zones: Vec<Zone>,
    /// Seats.
    pub seats: Vec<Seat>,
    /// Entry/exits.
    pub entry_exits: Vec<EntryExit>,
    /// Aisles.
    pub aisles: Vec<Aisle>,
    /// Venues.
    pub venues: Vec<Venue>,
    /// Events.
    pub events: Vec<EventRecord>,
    /// Tickets.
    pub tickets: Vec<Ticket>,
}

/// Injected store handles, one per record type.
#[derive(Clone)]
pub struct Persistence {
    /// Seat-map metadata.
    pub seat_maps: Arc<dyn Store<SeatMapRecord>>,
    /// Zones.
    pub zones: Arc<dyn Store<Zone>>,
    /// Seats.
    pub seats: Arc<dyn Store<Seat>>,
    /// Entry/exits.
    pub entry_exits: Arc<dyn Store<EntryExit>>,
    /// Aisles.
    pub aisles: Arc<dyn Store<Aisle>>,
    /// Venues.
    pub venues: Arc<dyn Store<Venue>>,
    /// Events.
    pub events: Arc<dyn Store<EventRecord>>,
    /// Tickets with door operations.
    pub tickets: Arc<dyn TicketLedger>,
}

impl std::fmt::Debug for Persistence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Persistence").finish_non_exhaustive()
    }
}

impl Persistence {
    /// Creates empty in-memory stores for every record type.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::from_data_set(DataSet::default())
    }

    /// Creates in-memory stores seeded with the data set.
    #[must_use]
    pub fn from_data_set(data: DataSet) -> Self {
        Self {
            seat_maps: Arc::new(InMemoryStore::seeded(data.seat_maps)),
            zones: Arc::new(InMemoryStore::seeded(data.zones)),
            seats: Arc::new(InMemoryStore::seeded(data.seats)),
            entry_exits: Arc::new(InMemoryStore::seeded(data.entry_exits)),
            aisles: Arc::new(InMemoryStore::seeded(data.aisles)),
            venues: Arc::new(InMemoryStore::seeded(data.venues)),
            events: Arc::new(InMemoryStore::seeded(data.events)),
            tickets: Arc::new(InMemoryStore::seeded(data.tickets)),
        }
    }

    /// Reads every store back into a data set.
    pub async fn data_set(&self) -> Result<DataSet, PersistenceError> {
        let (seat_maps, zones, seats, entry_exits, aisles, venues, events, tickets) = tokio::try_join!(
            self.seat_maps.get_all(),
            self.zones.get_all(),
            self.seats.get_all(),
            self.entry_exits.get_all(),
            self.aisles.get_all(),
            self.venues.get_all(),
            self.events.get_all(),
            self.tickets.get_all(),
        )?;
        Ok(DataSet {
            seat_maps,
            zones,
            seats,
            entry_exits,
            aisles,
            venues,
            events,
            tickets,
        })
    }

    /// Persists the map and replaces every child collection.
    ///
    /// Zones are recreated first so seat zone references can be rewritten to
    /// the new zone identifiers. Entry/exits and aisles are replaced
    /// concurrently. A failing store call aborts the save and leaves earlier
    /// steps applied.
    #[instrument(skip_all, fields(map = ?snapshot.map.id, zones = snapshot.zones.len(), seats = snapshot.seats.len()))]
    pub async fn save_layout(&self, snapshot: &LayoutSnapshot) -> Result<SaveReport, PersistenceError> {
        let map = self.upsert_map(&snapshot.map).await?;
        debug!(map = %map.id, "seat map record stored");

        let _ = self.zones.delete_by_parent(map.id).await?;
        let mut zone_ids = BTreeMap::new();
        let mut zones = Vec::with_capacity(snapshot.zones.len());
        for zone in &snapshot.zones {
            let created = self
                .zones
                .create(Zone {
                    map: Some(map.id),
                    ..zone.clone()
                })
                .await?;
            let _ = zone_ids.insert(zone.id, created.id);
            zones.push(created);
        }
        debug!(count = zones.len(), "zones recreated");

        let _ = self.seats.delete_by_parent(map.id).await?;
        let rewritten = snapshot
            .seats
            .iter()
            .map(|seat| Seat {
                zone: seat.zone.and_then(|zone| zone_ids.get(&zone).copied()),
                map: Some(map.id),
                ..seat.clone()
            })
            .collect();
        let seats = self.seats.create_bulk(rewritten).await?;
        debug!(count = seats.len(), "seats recreated");

        let entry_exits = snapshot
            .entry_exits
            .iter()
            .map(|entry| EntryExit {
                map: Some(map.id),
                ..entry.clone()
            })
            .collect();
        let aisles = snapshot
            .aisles
            .iter()
            .map(|aisle| Aisle {
                map: Some(map.id),
                ..aisle.clone()
            })
            .collect();
        let (entry_exits, aisles) = tokio::try_join!(
            replace_children(self.entry_exits.as_ref(), map.id, entry_exits),
            replace_children(self.aisles.as_ref(), map.id, aisles),
        )?;

        info!(
            map = %map.id,
            zones = zones.len(),
            seats = seats.len(),
            entry_exits = entry_exits.len(),
            aisles = aisles.len(),
            "seat map saved"
        );
        Ok(SaveReport {
            snapshot: LayoutSnapshot {
                map: map.to_info(),
                zones,
                seats,
                entry_exits,
                aisles,
            },
            zone_ids,
        })
    }

    /// Stores the layout as a reusable template bound to no venue.
    pub async fn save_as_template(
        &self,
        snapshot: &LayoutSnapshot,
    ) -> Result<SaveReport, PersistenceError> {
        let mut template = snapshot.clone();
        template.map.is_template = true;
        template.map.venue = None;
        self.save_layout(&template).await
    }

    /// Loads the map together with its four child collections.
    #[instrument(skip(self))]
    pub async fn load_layout(&self, map: SeatMapId) -> Result<LayoutSnapshot, PersistenceError> {
        let record = self
            .seat_maps
            .get_by_id(map)
            .await?
            .ok_or(PersistenceError::MissingSeatMap(map))?;

        let (zones, seats, entry_exits, aisles) = tokio::try_join!(
            self.zones.get_by_parent(map),
            self.seats.get_by_parent(map),
            self.entry_exits.get_by_parent(map),
            self.aisles.get_by_parent(map),
        )?;
        debug!(zones = zones.len(), seats = seats.len(), "seat map loaded");

        Ok(LayoutSnapshot {
            map: record.to_info(),
            zones,
            seats,
            entry_exits,
            aisles,
        })
    }

    /// Every seat map flagged as a template.
    pub async fn templates(&self) -> Result<Vec<SeatMapRecord>, PersistenceError> {
        let mut maps = self.seat_maps.get_all().await?;
        maps.retain(|map| map.is_template);
        Ok(maps)
    }

    /// Loads a template and clones it into a fresh, unsaved map.
    pub async fn instantiate_template(
        &self,
        template: SeatMapId,
        name: &str,
        venue: Option<VenueId>,
        now: DateTime<Utc>,
    ) -> Result<LayoutSnapshot, PersistenceError> {
        let source = self.load_layout(template).await?;
        Ok(source.instantiate_template(name, venue, now))
    }

    /// Seat maps bound to the venue.
    pub async fn seat_maps_for_venue(
        &self,
        venue: VenueId,
    ) -> Result<Vec<SeatMapRecord>, PersistenceError> {
        Ok(self.seat_maps.get_by_parent(venue).await?)
    }

    /// Events starting after `now`, soonest first, at most `limit` of them.
    ///
    /// Cancelled events are skipped.
    pub async fn upcoming_events(
        &self,
        now: DateTime<Utc>,
        limit: usize,
    ) -> Result<Vec<EventRecord>, PersistenceError> {
        let mut events = self.events.get_all().await?;
        events.retain(|event| event.date > now && event.status != EventStatus::Cancelled);
        events.sort_by_key(|event| event.date);
        events.truncate(limit);
        Ok(events)
    }

    /// Stores freshly issued tickets and books them against the event.
    #[instrument(skip(self, tickets), fields(count = tickets.len()))]
    pub async fn record_sale(
        &self,
        event: EventId,
        tickets: Vec<Ticket>,
    ) -> Result<Vec<Ticket>, PersistenceError> {
        let mut record = self
            .events
            .get_by_id(event)
            .await?
            .ok_or(PersistenceError::MissingEvent(event))?;

        let stored = self.tickets.create_bulk(tickets).await?;
        let sold = u32::try_from(stored.len()).unwrap_or(u32::MAX);
        let revenue = stored
            .iter()
            .map(|ticket| ticket.price.cents())
            .fold(record.revenue.cents(), u64::saturating_add);
        record.tickets_sold = record.tickets_sold.saturating_add(sold);
        record.revenue = Price::from_cents(revenue);

        let _ = self
            .events
            .update(record)
            .await?
            .ok_or(PersistenceError::MissingEvent(event))?;
        info!(event = %event, sold, "tickets recorded");
        Ok(stored)
    }

    async fn upsert_map(&self, info: &SeatMapInfo) -> Result<SeatMapRecord, PersistenceError> {
        match info.id {
            None => {
                let draft = SeatMapRecord::from_info(SeatMapId::from_raw(0), info);
                Ok(self.seat_maps.create(draft).await?)
            }
            Some(id) => self
                .seat_maps
                .update(SeatMapRecord::from_info(id, info))
                .await?
                .ok_or(PersistenceError::MissingSeatMap(id)),
        }
    }
}

async fn replace_children<R>(
    store: &dyn Store<R>,
    map: SeatMapId,
    records: Vec<R>,
) -> Result<Vec<R>, StoreError>
where
    R: Record<Parent = SeatMapId>,
{
    let _ = store.delete_by_parent(map).await?;
    let mut created = Vec::with_capacity(records.len());
    for record in records {
        created.push(store.create(record).await?);
    }
    debug!(kind = R::KIND, count = created.len(), "children recreated");
    Ok(created)
}
