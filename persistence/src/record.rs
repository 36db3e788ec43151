//! Records the stores know how to keep.

use std::fmt::{Debug, Display};

use seatmap_core::{
    Aisle, AisleId, EntryExit, EntryExitId, EventId, EventRecord, Seat, SeatId, SeatMapId,
    SeatMapRecord, Ticket, TicketId, Venue, VenueId, Zone, ZoneId,
};

/// Identifier type a store can allocate.
pub trait RecordId: Copy + Ord + Debug + Display + Send + Sync + 'static {
    /// Builds the identifier from its numeric representation.
    fn from_raw(raw: u32) -> Self;

    /// Numeric representation of the identifier.
    fn raw(&self) -> u32;
}

macro_rules! record_id {
    ($($id:ty),* $(,)?) => {
        $(
            impl RecordId for $id {
                fn from_raw(raw: u32) -> Self {
                    Self::new(raw)
                }

                fn raw(&self) -> u32 {
                    self.get()
                }
            }
        )*
    };
}

record_id!(ZoneId, SeatId, EntryExitId, AisleId, SeatMapId, VenueId, EventId, TicketId);

/// Entity persisted through a [`crate::Store`].
pub trait Record: Clone + Debug + Send + Sync + 'static {
    /// Identifier of the record.
    type Id: RecordId;
    /// Identifier of the owner used for filtered fetches.
    type Parent: Copy + Eq + Debug + Send + Sync + 'static;

    /// Name of the record type used in logs and errors.
    const KIND: &'static str;

    /// Identifier of the record.
    fn id(&self) -> Self::Id;

    /// Replaces the identifier with one allocated by the store.
    fn assign_id(&mut self, id: Self::Id);

    /// Owner of the record, if any.
    fn parent(&self) -> Option<Self::Parent>;
}

macro_rules! record {
    ($record:ty, $id:ty, $parent:ty, $kind:literal, |$this:ident| $owner:expr) => {
        impl Record for $record {
            type Id = $id;
            type Parent = $parent;

            const KIND: &'static str = $kind;

            fn id(&self) -> $id {
                self.id
            }

            fn assign_id(&mut self, id: $id) {
                self.id = id;
            }

            fn parent(&self) -> Option<$parent> {
                let $this = self;
                $owner
            }
        }
    };
}

record!(Zone, ZoneId, SeatMapId, "zone", |zone| zone.map);
record!(Seat, SeatId, SeatMapId, "seat", |seat| seat.map);
record!(EntryExit, EntryExitId, SeatMapId, "entry/exit", |entry| entry.map);
record!(Aisle, AisleId, SeatMapId, "aisle", |aisle| aisle.map);
record!(SeatMapRecord, SeatMapId, VenueId, "seat map", |map| map.venue);
record!(Venue, VenueId, SeatMapId, "venue", |venue| venue.seat_map);
record!(EventRecord, EventId, VenueId, "event", |event| event.venue);
record!(Ticket, TicketId, EventId, "ticket", |ticket| Some(ticket.event));
