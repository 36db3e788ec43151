//! Ordered entity storage shared by every layout registry.

use seatmap_core::{Aisle, AisleId, EntryExit, EntryExitId, Seat, SeatId, Zone, ZoneId};

/// Entity that can be stored inside a [`Registry`].
pub(crate) trait Keyed {
    /// Identifier type of the entity.
    type Id: Copy + Eq;

    /// Identifier of the entity.
    fn key(&self) -> Self::Id;

    /// Numeric representation of the identifier used for allocation.
    fn raw_key(&self) -> u32;
}

/// Registry that stores entities in insertion order and allocates identifiers.
///
/// Insertion order is significant: zone deletion falls back to the first
/// remaining zone and seat numbering counts earlier seats of the same row.
#[derive(Clone, Debug)]
pub(crate) struct Registry<T> {
    entries: Vec<T>,
    next_id: u32,
}

impl<T: Keyed> Registry<T> {
    /// Creates an empty registry with identifiers starting at one.
    pub(crate) fn new() -> Self {
        Self {
            entries: Vec::new(),
            next_id: 1,
        }
    }

    /// Adopts existing entities, continuing allocation after the largest identifier.
    pub(crate) fn from_entries(entries: Vec<T>) -> Self {
        let next_id = entries
            .iter()
            .map(Keyed::raw_key)
            .max()
            .map_or(1, |max| max.saturating_add(1));
        Self { entries, next_id }
    }

    /// Reserves the next identifier.
    pub(crate) fn allocate(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id = self.next_id.saturating_add(1);
        id
    }

    pub(crate) fn push(&mut self, entry: T) {
        self.entries.push(entry);
    }

    pub(crate) fn extend(&mut self, entries: impl IntoIterator<Item = T>) {
        self.entries.extend(entries);
    }

    pub(crate) fn get(&self, id: T::Id) -> Option<&T> {
        self.entries.iter().find(|entry| entry.key() == id)
    }

    pub(crate) fn get_mut(&mut self, id: T::Id) -> Option<&mut T> {
        self.entries.iter_mut().find(|entry| entry.key() == id)
    }

    pub(crate) fn contains(&self, id: T::Id) -> bool {
        self.get(id).is_some()
    }

    /// Removes the entity, preserving the order of the remaining entries.
    pub(crate) fn remove(&mut self, id: T::Id) -> Option<T> {
        let index = self.entries.iter().position(|entry| entry.key() == id)?;
        Some(self.entries.remove(index))
    }

    /// Removes every entity and reports how many were dropped.
    pub(crate) fn clear(&mut self) -> usize {
        let removed = self.entries.len();
        self.entries.clear();
        removed
    }

    pub(crate) fn first(&self) -> Option<&T> {
        self.entries.first()
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = &T> {
        self.entries.iter()
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.entries.iter_mut()
    }

    pub(crate) fn as_slice(&self) -> &[T] {
        &self.entries
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}

impl Keyed for Zone {
    type Id = ZoneId;

    fn key(&self) -> ZoneId {
        self.id
    }

    fn raw_key(&self) -> u32 {
        self.id.get()
    }
}

impl Keyed for Seat {
    type Id = SeatId;

    fn key(&self) -> SeatId {
        self.id
    }

    fn raw_key(&self) -> u32 {
        self.id.get()
    }
}

impl Keyed for EntryExit {
    type Id = EntryExitId;

    fn key(&self) -> EntryExitId {
        self.id
    }

    fn raw_key(&self) -> u32 {
        self.id.get()
    }
}

impl Keyed for Aisle {
    type Id = AisleId;

    fn key(&self) -> AisleId {
        self.id
    }

    fn raw_key(&self) -> u32 {
        self.id.get()
    }
}
