#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure tool-mode system that turns canvas and entity clicks into layout commands.

use seatmap_core::{
    grid::snap_click, AisleDraft, AisleId, CanvasPoint, Command, EntryExitDraft, EntryExitId,
    Event, LayoutLookup, SeatId, SeatStatus, Tool, ZoneId,
};

/// Single pointer interaction distilled from adapter input.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum BuilderInput {
    /// Click on empty canvas at the raw pointer location.
    CanvasClick(CanvasPoint),
    /// Click on an existing seat.
    SeatClick(SeatId),
    /// Click on an existing entry/exit.
    EntryExitClick(EntryExitId),
    /// Click on an existing aisle.
    AisleClick(AisleId),
}

/// Prefilled form the operator must confirm before anything is committed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FormDraft {
    /// Entry/exit form.
    EntryExit {
        /// Entry/exit being edited, `None` for a new one.
        editing: Option<EntryExitId>,
        /// Current form fields.
        draft: EntryExitDraft,
    },
    /// Aisle form.
    Aisle {
        /// Aisle being edited, `None` for a new one.
        editing: Option<AisleId>,
        /// Current form fields.
        draft: AisleDraft,
    },
}

impl FormDraft {
    /// Converts the confirmed form into the command that commits it.
    #[must_use]
    pub fn submit(self) -> Command {
        match self {
            Self::EntryExit { editing, draft } => Command::SubmitEntryExit {
                target: editing,
                draft,
            },
            Self::Aisle { editing, draft } => Command::SubmitAisle {
                target: editing,
                draft,
            },
        }
    }
}

/// Tool-mode dispatcher mirroring the layout's active tool and zone.
#[derive(Clone, Debug, Default)]
pub struct Builder {
    tool: Tool,
    active_zone: Option<ZoneId>,
    read_only: bool,
}

impl Builder {
    /// Creates a new dispatcher in the default tool mode.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a dispatcher that ignores every input, used for viewing maps.
    #[must_use]
    pub fn read_only() -> Self {
        Self {
            read_only: true,
            ..Self::default()
        }
    }

    /// Seeds the mirrored active zone, used when a session starts from a restored layout.
    #[must_use]
    pub fn with_active_zone(mut self, zone: Option<ZoneId>) -> Self {
        self.active_zone = zone;
        self
    }

    /// Tool the dispatcher currently interprets clicks with.
    #[must_use]
    pub fn tool(&self) -> Tool {
        self.tool
    }

    /// Consumes layout events and a single click, emitting at most one command.
    ///
    /// Clicks that need operator confirmation produce a [`FormDraft`] instead
    /// of a command.
    pub fn handle(
        &mut self,
        events: &[Event],
        input: Option<BuilderInput>,
        lookup: &impl LayoutLookup,
        out: &mut Vec<Command>,
    ) -> Option<FormDraft> {
        for event in events {
            match event {
                Event::ToolChanged { tool } => self.tool = *tool,
                Event::ActiveZoneChanged { zone } => self.active_zone = *zone,
                _ => {}
            }
        }

        if self.read_only {
            return None;
        }

        match input? {
            BuilderInput::CanvasClick(point) => self.canvas_click(point, lookup, out),
            BuilderInput::SeatClick(seat) => {
                self.seat_click(seat, lookup, out);
                None
            }
            BuilderInput::EntryExitClick(entry) => self.entry_exit_click(entry, lookup, out),
            BuilderInput::AisleClick(aisle) => self.aisle_click(aisle, lookup, out),
        }
    }

    fn canvas_click(
        &self,
        point: CanvasPoint,
        lookup: &impl LayoutLookup,
        out: &mut Vec<Command>,
    ) -> Option<FormDraft> {
        let position = snap_click(point);
        match self.tool {
            Tool::PlaceSeat => out.push(Command::PlaceSeat { position }),
            Tool::GenerateRow => out.push(Command::GenerateRow),
            Tool::PlaceEntryExit => {
                return Some(FormDraft::EntryExit {
                    editing: None,
                    draft: EntryExitDraft::numbered(position, lookup.entry_exit_count()),
                });
            }
            Tool::PlaceAisle => {
                return Some(FormDraft::Aisle {
                    editing: None,
                    draft: AisleDraft::numbered(position, lookup.aisle_count()),
                });
            }
            Tool::PaintZone | Tool::Select | Tool::Delete => {}
        }
        None
    }

    fn seat_click(&self, seat: SeatId, lookup: &impl LayoutLookup, out: &mut Vec<Command>) {
        let Some(target) = lookup.seat(seat) else {
            return;
        };

        match self.tool {
            Tool::PaintZone => {
                if let Some(zone) = self.active_zone {
                    out.push(Command::RepaintSeat { seat, zone });
                }
            }
            Tool::Select => {
                if target.status != SeatStatus::Occupied {
                    out.push(Command::ToggleSeatSelection { seat });
                }
            }
            Tool::Delete => out.push(Command::RemoveSeat { seat }),
            Tool::PlaceSeat | Tool::GenerateRow | Tool::PlaceEntryExit | Tool::PlaceAisle => {}
        }
    }

    fn entry_exit_click(
        &self,
        entry: EntryExitId,
        lookup: &impl LayoutLookup,
        out: &mut Vec<Command>,
    ) -> Option<FormDraft> {
        let target = lookup.entry_exit(entry)?;
        match self.tool {
            Tool::Select => Some(FormDraft::EntryExit {
                editing: Some(entry),
                draft: EntryExitDraft::from_entry_exit(target),
            }),
            Tool::Delete => {
                out.push(Command::RemoveEntryExit { entry });
                None
            }
            _ => None,
        }
    }

    fn aisle_click(
        &self,
        aisle: AisleId,
        lookup: &impl LayoutLookup,
        out: &mut Vec<Command>,
    ) -> Option<FormDraft> {
        let target = lookup.aisle(aisle)?;
        match self.tool {
            Tool::Select => Some(FormDraft::Aisle {
                editing: Some(aisle),
                draft: AisleDraft::from_aisle(target),
            }),
            Tool::Delete => {
                out.push(Command::RemoveAisle { aisle });
                None
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct EmptyLayout;

    impl LayoutLookup for EmptyLayout {
        fn seat(&self, _seat: SeatId) -> Option<&seatmap_core::Seat> {
            None
        }

        fn entry_exit(&self, _entry: EntryExitId) -> Option<&seatmap_core::EntryExit> {
            None
        }

        fn aisle(&self, _aisle: AisleId) -> Option<&seatmap_core::Aisle> {
            None
        }

        fn entry_exit_count(&self) -> usize {
            2
        }

        fn aisle_count(&self) -> usize {
            0
        }
    }

    #[test]
    fn events_update_the_mirrored_tool() {
        let mut builder = Builder::new();
        let mut out = Vec::new();
        let _ = builder.handle(
            &[Event::ToolChanged {
                tool: Tool::PlaceEntryExit,
            }],
            None,
            &EmptyLayout,
            &mut out,
        );
        assert_eq!(builder.tool(), Tool::PlaceEntryExit);
        assert!(out.is_empty());
    }

    #[test]
    fn entry_form_is_numbered_after_existing_entries() {
        let mut builder = Builder::new();
        let mut out = Vec::new();
        let form = builder.handle(
            &[Event::ToolChanged {
                tool: Tool::PlaceEntryExit,
            }],
            Some(BuilderInput::CanvasClick(CanvasPoint::new(61.0, 14.0))),
            &EmptyLayout,
            &mut out,
        );

        let Some(FormDraft::EntryExit { editing, draft }) = form else {
            panic!("expected an entry/exit form, got {form:?}");
        };
        assert_eq!(editing, None);
        assert_eq!(draft.name, "Entry 3");
        assert_eq!(draft.position, seatmap_core::GridPoint::new(60, 0));
        assert!(out.is_empty(), "forms wait for confirmation");
    }

    #[test]
    fn clicks_on_unknown_entities_are_ignored() {
        let mut builder = Builder::new();
        let mut out = Vec::new();
        let form = builder.handle(
            &[Event::ToolChanged { tool: Tool::Delete }],
            Some(BuilderInput::AisleClick(AisleId::new(4))),
            &EmptyLayout,
            &mut out,
        );
        assert!(form.is_none());
        assert!(out.is_empty());
    }
}
