//! Entry/exit and aisle registries.

use seatmap_core::{
    Aisle, AisleDraft, AisleId, EntryExit, EntryExitDraft, EntryExitId, Event, FixtureError,
};

use crate::Layout;

fn validate_name(name: &str) -> Result<String, FixtureError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(FixtureError::EmptyName);
    }
    Ok(trimmed.to_owned())
}

impl Layout {
    pub(crate) fn submit_entry_exit(
        &mut self,
        target: Option<EntryExitId>,
        draft: EntryExitDraft,
        out_events: &mut Vec<Event>,
    ) {
        let reject = |reason| Event::EntryExitRejected {
            entry: target,
            reason,
        };

        let name = match validate_name(&draft.name) {
            Ok(name) => name,
            Err(reason) => {
                out_events.push(reject(reason));
                return;
            }
        };
        if draft.capacity == 0 {
            out_events.push(reject(FixtureError::ZeroCapacity));
            return;
        }

        match target {
            None => {
                let id = EntryExitId::new(self.entry_exits.allocate());
                self.entry_exits.push(EntryExit {
                    id,
                    name,
                    position: draft.position,
                    capacity: draft.capacity,
                    map: self.map.id,
                });
                out_events.push(Event::EntryExitCreated { entry: id });
            }
            Some(id) => {
                let Some(entry) = self.entry_exits.get_mut(id) else {
                    out_events.push(reject(FixtureError::MissingFixture));
                    return;
                };
                entry.name = name;
                entry.position = draft.position;
                entry.capacity = draft.capacity;
                out_events.push(Event::EntryExitUpdated { entry: id });
            }
        }
    }

    pub(crate) fn remove_entry_exit(&mut self, id: EntryExitId, out_events: &mut Vec<Event>) {
        if self.entry_exits.remove(id).is_some() {
            out_events.push(Event::EntryExitRemoved { entry: id });
        } else {
            out_events.push(Event::EntryExitRejected {
                entry: Some(id),
                reason: FixtureError::MissingFixture,
            });
        }
    }

    pub(crate) fn submit_aisle(
        &mut self,
        target: Option<AisleId>,
        draft: AisleDraft,
        out_events: &mut Vec<Event>,
    ) {
        let name = match validate_name(&draft.name) {
            Ok(name) => name,
            Err(reason) => {
                out_events.push(Event::AisleRejected {
                    aisle: target,
                    reason,
                });
                return;
            }
        };

        match target {
            None => {
                let id = AisleId::new(self.aisles.allocate());
                self.aisles.push(Aisle {
                    id,
                    name,
                    position: draft.position,
                    width: draft.width,
                    length: draft.length,
                    map: self.map.id,
                });
                out_events.push(Event::AisleCreated { aisle: id });
            }
            Some(id) => {
                let Some(aisle) = self.aisles.get_mut(id) else {
                    out_events.push(Event::AisleRejected {
                        aisle: target,
                        reason: FixtureError::MissingFixture,
                    });
                    return;
                };
                aisle.name = name;
                aisle.position = draft.position;
                aisle.width = draft.width;
                aisle.length = draft.length;
                out_events.push(Event::AisleUpdated { aisle: id });
            }
        }
    }

    pub(crate) fn remove_aisle(&mut self, id: AisleId, out_events: &mut Vec<Event>) {
        if self.aisles.remove(id).is_some() {
            out_events.push(Event::AisleRemoved { aisle: id });
        } else {
            out_events.push(Event::AisleRejected {
                aisle: Some(id),
                reason: FixtureError::MissingFixture,
            });
        }
    }
}
