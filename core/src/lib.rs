#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the seat-map builder.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative layout, and pure systems. Adapters submit [`Command`] values
//! describing desired mutations, the layout executes those commands via its
//! `apply` entry point, and then broadcasts [`Event`] values for systems to
//! react to. Systems consume event streams, query immutable views, and respond
//! exclusively with new command batches.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod grid;
pub mod records;
pub mod snapshot;

pub use records::{
    CustomerInfo, EventRecord, EventStatus, SeatMapRecord, Ticket, TicketStatus, Venue,
};
pub use snapshot::{LayoutSnapshot, SeatMapInfo};

/// Name given to maps that were never named by the operator.
pub const UNTITLED_MAP_NAME: &str = "Untitled Seat Map";

/// Tools that decide what a canvas or entity click does.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Tool {
    /// Places a single seat at the clicked grid point.
    #[default]
    PlaceSeat,
    /// Appends a full row of generated seats.
    GenerateRow,
    /// Repaints clicked seats with the active zone.
    PaintZone,
    /// Opens an entry/exit form at the clicked grid point.
    PlaceEntryExit,
    /// Opens an aisle form at the clicked grid point.
    PlaceAisle,
    /// Toggles seat selection and opens edit forms for fixtures.
    Select,
    /// Deletes whatever entity is clicked.
    Delete,
}

impl Tool {
    /// Every tool in toolbar order.
    pub const ALL: [Tool; 7] = [
        Tool::PlaceSeat,
        Tool::GenerateRow,
        Tool::PaintZone,
        Tool::PlaceEntryExit,
        Tool::PlaceAisle,
        Tool::Select,
        Tool::Delete,
    ];

    /// Human readable toolbar label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::PlaceSeat => "Add Seat",
            Self::GenerateRow => "Add Row",
            Self::PaintZone => "Zone Paint",
            Self::PlaceEntryExit => "Entry/Exit",
            Self::PlaceAisle => "Aisle",
            Self::Select => "Select",
            Self::Delete => "Delete",
        }
    }
}

/// Commands that express all permissible layout mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Switches the active tool.
    SelectTool {
        /// Tool that should become active.
        tool: Tool,
    },
    /// Picks the zone used for new seats and repainting.
    SetActiveZone {
        /// Zone that should become active.
        zone: ZoneId,
    },
    /// Creates a new pricing zone.
    CreateZone {
        /// Operator supplied zone fields.
        draft: ZoneDraft,
    },
    /// Merges the provided patch into an existing zone.
    EditZone {
        /// Zone being edited.
        zone: ZoneId,
        /// Fields to overwrite.
        patch: ZonePatch,
    },
    /// Deletes a zone, reassigning its seats to the first remaining zone.
    DeleteZone {
        /// Zone targeted for deletion.
        zone: ZoneId,
    },
    /// Places a seat at an already snapped grid point.
    PlaceSeat {
        /// Snapped seat position.
        position: GridPoint,
    },
    /// Appends a generated row of seats below the last row.
    GenerateRow,
    /// Moves a single seat into another zone.
    RepaintSeat {
        /// Seat being repainted.
        seat: SeatId,
        /// Zone the seat should belong to.
        zone: ZoneId,
    },
    /// Removes a seat from the layout.
    RemoveSeat {
        /// Seat targeted for removal.
        seat: SeatId,
    },
    /// Adds the seat to the selection set or removes it when already present.
    ToggleSeatSelection {
        /// Seat being toggled.
        seat: SeatId,
    },
    /// Empties the selection set.
    ClearSelection,
    /// Updates the sale status of a seat.
    SetSeatStatus {
        /// Seat being updated.
        seat: SeatId,
        /// New status.
        status: SeatStatus,
    },
    /// Removes every seat from the layout.
    ClearSeats,
    /// Creates an entry/exit, or replaces one when a target is given.
    SubmitEntryExit {
        /// Entry/exit being edited, `None` to create a new one.
        target: Option<EntryExitId>,
        /// Confirmed form fields.
        draft: EntryExitDraft,
    },
    /// Removes an entry/exit.
    RemoveEntryExit {
        /// Entry/exit targeted for removal.
        entry: EntryExitId,
    },
    /// Creates an aisle, or replaces one when a target is given.
    SubmitAisle {
        /// Aisle being edited, `None` to create a new one.
        target: Option<AisleId>,
        /// Confirmed form fields.
        draft: AisleDraft,
    },
    /// Removes an aisle.
    RemoveAisle {
        /// Aisle targeted for removal.
        aisle: AisleId,
    },
    /// Asks analytics consumers to recompute even without a layout change.
    RequestAnalyticsRefresh,
}

/// Events broadcast by the layout after processing commands.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// Announces that a different tool became active.
    ToolChanged {
        /// Tool that is now active.
        tool: Tool,
    },
    /// Announces a change of the active zone.
    ActiveZoneChanged {
        /// Active zone, `None` when no zone remains.
        zone: Option<ZoneId>,
    },
    /// Confirms that a zone was created.
    ZoneCreated {
        /// Identifier assigned to the zone.
        zone: ZoneId,
    },
    /// Confirms that a zone was edited.
    ZoneUpdated {
        /// Zone that changed.
        zone: ZoneId,
    },
    /// Confirms that a zone was deleted and its seats reassigned.
    ZoneRemoved {
        /// Zone that was deleted.
        zone: ZoneId,
        /// Zone that inherited the seats, `None` when the seats were orphaned.
        reassigned_to: Option<ZoneId>,
        /// Number of seats that changed owner.
        reassigned_seats: u32,
    },
    /// Reports that a zone command was rejected.
    ZoneRejected {
        /// Zone targeted by the command, if any.
        zone: Option<ZoneId>,
        /// Specific reason the command failed.
        reason: ZoneError,
    },
    /// Confirms that a single seat was placed.
    SeatPlaced {
        /// Identifier assigned to the seat.
        seat: SeatId,
        /// Row label derived from the seat position.
        row: RowLabel,
        /// Seat number within the row.
        number: u32,
    },
    /// Confirms that a generated row was appended.
    RowGenerated {
        /// Label of the new row.
        row: RowLabel,
        /// Seats created for the row in seat-number order.
        seats: Vec<SeatId>,
    },
    /// Reports that a seat placement or row generation had no effect.
    SeatPlacementRejected {
        /// Specific reason the placement failed.
        reason: PlacementError,
    },
    /// Confirms that a seat moved to another zone.
    SeatRepainted {
        /// Seat that was repainted.
        seat: SeatId,
        /// Zone that owned the seat before.
        from: Option<ZoneId>,
        /// Zone that owns the seat now.
        to: ZoneId,
    },
    /// Confirms that a seat was removed.
    SeatRemoved {
        /// Seat that was removed.
        seat: SeatId,
    },
    /// Confirms a seat status change.
    SeatStatusChanged {
        /// Seat that changed.
        seat: SeatId,
        /// New status.
        status: SeatStatus,
    },
    /// Confirms a selection toggle.
    SeatSelectionToggled {
        /// Seat that was toggled.
        seat: SeatId,
        /// Whether the seat is selected after the toggle.
        selected: bool,
    },
    /// Confirms that the selection set was emptied.
    SelectionCleared,
    /// Confirms that every seat was removed.
    SeatsCleared {
        /// Number of seats removed.
        removed: u32,
    },
    /// Reports that a seat command was rejected.
    SeatCommandRejected {
        /// Seat targeted by the command.
        seat: SeatId,
        /// Specific reason the command failed.
        reason: SeatError,
    },
    /// Confirms that an entry/exit was created.
    EntryExitCreated {
        /// Identifier assigned to the entry/exit.
        entry: EntryExitId,
    },
    /// Confirms that an entry/exit was replaced.
    EntryExitUpdated {
        /// Entry/exit that changed.
        entry: EntryExitId,
    },
    /// Confirms that an entry/exit was removed.
    EntryExitRemoved {
        /// Entry/exit that was removed.
        entry: EntryExitId,
    },
    /// Reports that an entry/exit command was rejected.
    EntryExitRejected {
        /// Entry/exit targeted by the command, if any.
        entry: Option<EntryExitId>,
        /// Specific reason the command failed.
        reason: FixtureError,
    },
    /// Confirms that an aisle was created.
    AisleCreated {
        /// Identifier assigned to the aisle.
        aisle: AisleId,
    },
    /// Confirms that an aisle was replaced.
    AisleUpdated {
        /// Aisle that changed.
        aisle: AisleId,
    },
    /// Confirms that an aisle was removed.
    AisleRemoved {
        /// Aisle that was removed.
        aisle: AisleId,
    },
    /// Reports that an aisle command was rejected.
    AisleRejected {
        /// Aisle targeted by the command, if any.
        aisle: Option<AisleId>,
        /// Specific reason the command failed.
        reason: FixtureError,
    },
}

impl Event {
    /// Reports whether the event changed zones or seats, invalidating analytics.
    #[must_use]
    pub const fn affects_analytics(&self) -> bool {
        matches!(
            self,
            Self::ZoneCreated { .. }
                | Self::ZoneUpdated { .. }
                | Self::ZoneRemoved { .. }
                | Self::SeatPlaced { .. }
                | Self::RowGenerated { .. }
                | Self::SeatRepainted { .. }
                | Self::SeatRemoved { .. }
                | Self::SeatStatusChanged { .. }
                | Self::SeatsCleared { .. }
        )
    }

    /// Reports whether the event describes a rejected command.
    #[must_use]
    pub const fn is_rejection(&self) -> bool {
        matches!(
            self,
            Self::ZoneRejected { .. }
                | Self::SeatPlacementRejected { .. }
                | Self::SeatCommandRejected { .. }
                | Self::EntryExitRejected { .. }
                | Self::AisleRejected { .. }
        )
    }
}

macro_rules! identifier {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(u32);

        impl $name {
            /// Creates a new identifier with the provided numeric value.
            #[must_use]
            pub const fn new(value: u32) -> Self {
                Self(value)
            }

            /// Retrieves the numeric representation of the identifier.
            #[must_use]
            pub const fn get(&self) -> u32 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

identifier!(
    /// Unique identifier assigned to a pricing zone.
    ZoneId
);
identifier!(
    /// Unique identifier assigned to a seat.
    SeatId
);
identifier!(
    /// Unique identifier assigned to an entry/exit.
    EntryExitId
);
identifier!(
    /// Unique identifier assigned to an aisle.
    AisleId
);
identifier!(
    /// Unique identifier assigned to a persisted seat map.
    SeatMapId
);
identifier!(
    /// Unique identifier assigned to a venue.
    VenueId
);
identifier!(
    /// Unique identifier assigned to a scheduled event.
    EventId
);
identifier!(
    /// Unique identifier assigned to a ticket.
    TicketId
);

/// Raw pointer location relative to the canvas origin.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CanvasPoint {
    /// Horizontal distance from the left canvas edge.
    pub x: f32,
    /// Vertical distance from the top canvas edge.
    pub y: f32,
}

impl CanvasPoint {
    /// Creates a new canvas point.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Integer canvas position that entities are anchored at.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GridPoint {
    /// Horizontal position in canvas units.
    pub x: u32,
    /// Vertical position in canvas units.
    pub y: u32,
}

impl GridPoint {
    /// Creates a new grid point.
    #[must_use]
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

/// Fixed canvas size of a seat map.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CanvasDimensions {
    width: u32,
    height: u32,
}

impl CanvasDimensions {
    /// Creates a new dimension descriptor.
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Canvas width in canvas units.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Canvas height in canvas units.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }
}

impl Default for CanvasDimensions {
    fn default() -> Self {
        Self::new(800, 600)
    }
}

impl fmt::Display for CanvasDimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

impl FromStr for CanvasDimensions {
    type Err = ValueError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let invalid = || ValueError::Dimensions(value.to_owned());
        let (width, height) = value.split_once(['x', 'X']).ok_or_else(invalid)?;
        let width = width.trim().parse::<u32>().map_err(|_| invalid())?;
        let height = height.trim().parse::<u32>().map_err(|_| invalid())?;
        if width == 0 || height == 0 {
            return Err(invalid());
        }
        Ok(Self::new(width, height))
    }
}

impl TryFrom<String> for CanvasDimensions {
    type Error = ValueError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<CanvasDimensions> for String {
    fn from(value: CanvasDimensions) -> Self {
        value.to_string()
    }
}

/// Display color assigned to a zone.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ZoneColor {
    red: u8,
    green: u8,
    blue: u8,
}

impl ZoneColor {
    /// Color used for zones created without an explicit choice.
    pub const DEFAULT: ZoneColor = ZoneColor::from_rgb(0x10, 0xb9, 0x81);

    /// Creates a new zone color from byte RGB components.
    #[must_use]
    pub const fn from_rgb(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Parses a `#rrggbb` hex string.
    pub fn parse_hex(value: &str) -> Result<Self, ValueError> {
        let invalid = || ValueError::Color(value.to_owned());
        let digits = value.trim().strip_prefix('#').ok_or_else(invalid)?;
        if digits.len() != 6 || !digits.is_ascii() {
            return Err(invalid());
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16).map_err(|_| invalid())
        };
        Ok(Self::from_rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }

    /// Renders the color as a lower-case `#rrggbb` string.
    #[must_use]
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.red, self.green, self.blue)
    }

    /// Red component of the color.
    #[must_use]
    pub const fn red(&self) -> u8 {
        self.red
    }

    /// Green component of the color.
    #[must_use]
    pub const fn green(&self) -> u8 {
        self.green
    }

    /// Blue component of the color.
    #[must_use]
    pub const fn blue(&self) -> u8 {
        self.blue
    }
}

impl Default for ZoneColor {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TryFrom<String> for ZoneColor {
    type Error = ValueError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse_hex(&value)
    }
}

impl From<ZoneColor> for String {
    fn from(value: ZoneColor) -> Self {
        value.to_hex()
    }
}

/// Non-negative ticket price stored in cents.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Price {
    cents: u64,
}

impl Price {
    /// Free admission.
    pub const ZERO: Price = Price::from_cents(0);

    /// Creates a price from a whole number of cents.
    #[must_use]
    pub const fn from_cents(cents: u64) -> Self {
        Self { cents }
    }

    /// Creates a price from a currency amount such as `49.99`.
    pub fn from_amount(amount: f64) -> Result<Self, ValueError> {
        if !amount.is_finite() || amount < 0.0 {
            return Err(ValueError::Price(amount.to_string()));
        }
        let cents = (amount * 100.0).round();
        if cents > u64::MAX as f64 {
            return Err(ValueError::Price(amount.to_string()));
        }
        Ok(Self::from_cents(cents as u64))
    }

    /// Whole number of cents.
    #[must_use]
    pub const fn cents(&self) -> u64 {
        self.cents
    }

    /// Currency amount as a floating point number.
    #[must_use]
    pub fn amount(&self) -> f64 {
        self.cents as f64 / 100.0
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let whole = self.cents / 100;
        let fraction = self.cents % 100;
        if fraction == 0 {
            write!(f, "{whole}")
        } else if fraction % 10 == 0 {
            write!(f, "{whole}.{}", fraction / 10)
        } else {
            write!(f, "{whole}.{fraction:02}")
        }
    }
}

/// Row label in the `R<n>` format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RowLabel(u32);

impl RowLabel {
    /// Creates a row label for the provided one-based row number.
    ///
    /// Row numbers start at one, so zero is promoted to the first row.
    #[must_use]
    pub const fn new(number: u32) -> Self {
        if number == 0 {
            Self(1)
        } else {
            Self(number)
        }
    }

    /// One-based row number.
    #[must_use]
    pub const fn number(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for RowLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "R{}", self.0)
    }
}

impl FromStr for RowLabel {
    type Err = ValueError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let number = value
            .strip_prefix('R')
            .and_then(|digits| digits.parse::<u32>().ok())
            .filter(|number| *number > 0)
            .ok_or_else(|| ValueError::RowLabel(value.to_owned()))?;
        Ok(Self(number))
    }
}

impl TryFrom<String> for RowLabel {
    type Error = ValueError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<RowLabel> for String {
    fn from(value: RowLabel) -> Self {
        value.to_string()
    }
}

/// Errors raised while parsing operator supplied values.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ValueError {
    /// Canvas dimensions were not in the `WxH` format with positive sides.
    #[error("could not parse canvas dimensions '{0}'")]
    Dimensions(String),
    /// Color was not a `#rrggbb` hex string.
    #[error("'{0}' is not a #rrggbb color")]
    Color(String),
    /// Price was negative or not a number.
    #[error("'{0}' is not a valid non-negative price")]
    Price(String),
    /// Row label was not in the `R<n>` format.
    #[error("'{0}' is not a valid row label")]
    RowLabel(String),
}

/// Pricing and color region grouping seats.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Zone {
    /// Identifier allocated to the zone.
    pub id: ZoneId,
    /// Display name.
    pub name: String,
    /// Display color.
    pub color: ZoneColor,
    /// Base price of every seat in the zone.
    pub price: Price,
    /// Seat map owning the zone, `None` until saved.
    pub map: Option<SeatMapId>,
}

/// Fields supplied when creating a zone.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ZoneDraft {
    /// Display name, must not be blank.
    pub name: String,
    /// Display color.
    pub color: ZoneColor,
    /// Base price.
    pub price: Price,
}

impl ZoneDraft {
    /// Creates a new zone draft.
    #[must_use]
    pub fn new(name: impl Into<String>, color: ZoneColor, price: Price) -> Self {
        Self {
            name: name.into(),
            color,
            price,
        }
    }
}

/// Partial update merged into an existing zone.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ZonePatch {
    /// Replacement display name.
    pub name: Option<String>,
    /// Replacement color.
    pub color: Option<ZoneColor>,
    /// Replacement base price.
    pub price: Option<Price>,
}

/// Seat category derived from the owning zone name at placement time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeatType {
    /// Standard seat.
    #[default]
    Regular,
    /// Seat placed in a zone whose name mentions VIP.
    Vip,
}

impl SeatType {
    /// Derives the seat type from a zone name.
    #[must_use]
    pub fn for_zone_name(name: &str) -> Self {
        if name.to_lowercase().contains("vip") {
            Self::Vip
        } else {
            Self::Regular
        }
    }

    /// Lower-case name used in exports.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Regular => "regular",
            Self::Vip => "vip",
        }
    }
}

/// Sale status of a seat.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeatStatus {
    /// Seat can be sold.
    #[default]
    Available,
    /// Seat has been sold and can no longer be picked.
    Occupied,
}

/// Single ticket-sellable seat.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Seat {
    /// Identifier allocated to the seat.
    pub id: SeatId,
    /// Canvas position; seats never move once placed.
    pub position: GridPoint,
    /// Row the seat belongs to.
    pub row: RowLabel,
    /// One-based seat number within the row.
    pub number: u32,
    /// Owning zone, `None` only after the last zone was deleted.
    pub zone: Option<ZoneId>,
    /// Seat map owning the seat, `None` until saved.
    pub map: Option<SeatMapId>,
    /// Seat category fixed at placement time.
    #[serde(rename = "type")]
    pub kind: SeatType,
    /// Sale status.
    pub status: SeatStatus,
}

/// Named entry or exit door.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryExit {
    /// Identifier allocated to the entry/exit.
    pub id: EntryExitId,
    /// Display name.
    pub name: String,
    /// Canvas position.
    pub position: GridPoint,
    /// Number of people the door admits.
    pub capacity: u32,
    /// Seat map owning the door, `None` until saved.
    pub map: Option<SeatMapId>,
}

/// Confirmed form fields of an entry/exit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EntryExitDraft {
    /// Display name, must not be blank.
    pub name: String,
    /// Canvas position.
    pub position: GridPoint,
    /// Number of people the door admits, must be positive.
    pub capacity: u32,
}

impl EntryExitDraft {
    /// Capacity suggested for new entry/exits.
    pub const DEFAULT_CAPACITY: u32 = 100;

    /// Prefills a new entry/exit form, numbering it after the `existing` ones.
    #[must_use]
    pub fn numbered(position: GridPoint, existing: usize) -> Self {
        Self {
            name: format!("Entry {}", existing + 1),
            position,
            capacity: Self::DEFAULT_CAPACITY,
        }
    }

    /// Prefills an edit form with the current fields of an entry/exit.
    #[must_use]
    pub fn from_entry_exit(entry: &EntryExit) -> Self {
        Self {
            name: entry.name.clone(),
            position: entry.position,
            capacity: entry.capacity,
        }
    }
}

/// Rectangular walkway drawn on the canvas.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Aisle {
    /// Identifier allocated to the aisle.
    pub id: AisleId,
    /// Display name.
    pub name: String,
    /// Canvas position of the upper-left corner.
    pub position: GridPoint,
    /// Horizontal extent.
    pub width: u32,
    /// Vertical extent.
    pub length: u32,
    /// Seat map owning the aisle, `None` until saved.
    pub map: Option<SeatMapId>,
}

/// Confirmed form fields of an aisle.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AisleDraft {
    /// Display name, must not be blank.
    pub name: String,
    /// Canvas position of the upper-left corner.
    pub position: GridPoint,
    /// Horizontal extent.
    pub width: u32,
    /// Vertical extent.
    pub length: u32,
}

impl AisleDraft {
    /// Width suggested for new aisles.
    pub const DEFAULT_WIDTH: u32 = 20;
    /// Length suggested for new aisles.
    pub const DEFAULT_LENGTH: u32 = 100;

    /// Prefills a new aisle form, numbering it after the `existing` ones.
    #[must_use]
    pub fn numbered(position: GridPoint, existing: usize) -> Self {
        Self {
            name: format!("Aisle {}", existing + 1),
            position,
            width: Self::DEFAULT_WIDTH,
            length: Self::DEFAULT_LENGTH,
        }
    }

    /// Prefills an edit form with the current fields of an aisle.
    #[must_use]
    pub fn from_aisle(aisle: &Aisle) -> Self {
        Self {
            name: aisle.name.clone(),
            position: aisle.position,
            width: aisle.width,
            length: aisle.length,
        }
    }
}

/// Reasons a zone command may be rejected by the layout.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ZoneError {
    /// The zone name was empty or whitespace.
    EmptyName,
    /// No zone with the provided identifier exists.
    MissingZone,
}

/// Reasons a seat placement or row generation may have no effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlacementError {
    /// No zone is active, so seats have nowhere to belong.
    NoActiveZone,
}

/// Reasons a command targeting an existing seat may be rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SeatError {
    /// No seat with the provided identifier exists.
    MissingSeat,
    /// The target zone does not exist.
    MissingZone,
    /// The active tool does not permit the operation.
    InvalidTool,
}

/// Reasons an entry/exit or aisle command may be rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FixtureError {
    /// The name was empty or whitespace.
    EmptyName,
    /// An entry/exit capacity of zero was supplied.
    ZeroCapacity,
    /// No entity with the provided identifier exists.
    MissingFixture,
}

/// Read-only lookups systems need to interpret clicks on existing entities.
pub trait LayoutLookup {
    /// Returns the seat with the provided identifier.
    fn seat(&self, seat: SeatId) -> Option<&Seat>;

    /// Returns the entry/exit with the provided identifier.
    fn entry_exit(&self, entry: EntryExitId) -> Option<&EntryExit>;

    /// Returns the aisle with the provided identifier.
    fn aisle(&self, aisle: AisleId) -> Option<&Aisle>;

    /// Number of entry/exits currently placed.
    fn entry_exit_count(&self) -> usize;

    /// Number of aisles currently placed.
    fn aisle_count(&self) -> usize;
}
