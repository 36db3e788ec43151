//! Records exchanged with the persistence boundary beyond the layout itself.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{CanvasDimensions, EventId, Price, SeatId, SeatMapId, SeatMapInfo, TicketId, VenueId};

/// Persisted seat-map metadata.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatMapRecord {
    /// Identifier allocated by the store.
    pub id: SeatMapId,
    /// Display name.
    pub name: String,
    /// Venue the map is bound to.
    pub venue: Option<VenueId>,
    /// Marks maps reusable as a starting point for new venues.
    pub is_template: bool,
    /// Fixed canvas size.
    pub dimensions: CanvasDimensions,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl SeatMapRecord {
    /// Builds a record from layout metadata under the provided identifier.
    #[must_use]
    pub fn from_info(id: SeatMapId, info: &SeatMapInfo) -> Self {
        Self {
            id,
            name: info.name.clone(),
            venue: info.venue,
            is_template: info.is_template,
            dimensions: info.dimensions,
            created_at: info.created_at,
        }
    }

    /// Converts the record back into layout metadata.
    #[must_use]
    pub fn to_info(&self) -> SeatMapInfo {
        SeatMapInfo {
            id: Some(self.id),
            name: self.name.clone(),
            venue: self.venue,
            is_template: self.is_template,
            dimensions: self.dimensions,
            created_at: self.created_at,
        }
    }
}

/// Physical location hosting events.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Venue {
    /// Identifier allocated by the store.
    pub id: VenueId,
    /// Display name.
    pub name: String,
    /// Street address.
    pub address: String,
    /// Maximum attendance.
    pub capacity: u32,
    /// Listed amenities.
    #[serde(default)]
    pub amenities: Vec<String>,
    /// Seat map used by default for the venue's events.
    pub seat_map: Option<SeatMapId>,
}

/// Publication state of an event.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventStatus {
    /// Not yet on sale.
    #[default]
    Draft,
    /// Tickets can be purchased.
    Published,
    /// Called off.
    Cancelled,
}

/// Scheduled event held at a venue.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    /// Identifier allocated by the store.
    pub id: EventId,
    /// Display name.
    pub name: String,
    /// Start time.
    pub date: DateTime<Utc>,
    /// Hosting venue.
    pub venue: Option<VenueId>,
    /// Seat map tickets are sold against.
    pub seat_map: Option<SeatMapId>,
    /// Maximum attendance.
    pub capacity: u32,
    /// Tickets sold so far.
    #[serde(default)]
    pub tickets_sold: u32,
    /// Revenue collected so far.
    #[serde(default)]
    pub revenue: Price,
    /// Publication state.
    #[serde(default)]
    pub status: EventStatus,
}

/// Validity of a ticket at the door.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TicketStatus {
    /// Ticket admits its holder once.
    #[default]
    Valid,
    /// Ticket was already scanned.
    Used,
}

/// Contact details collected at checkout.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerInfo {
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Contact email.
    pub email: String,
    /// Optional phone number.
    #[serde(default)]
    pub phone: String,
}

/// Admission ticket for a single seat of an event.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ticket {
    /// Identifier allocated by the store.
    pub id: TicketId,
    /// Event the ticket admits to.
    pub event: EventId,
    /// Seat the ticket is sold for.
    pub seat: SeatId,
    /// Payload encoded in the ticket's QR code.
    pub qr_code: String,
    /// Door validity.
    pub status: TicketStatus,
    /// Price paid.
    pub price: Price,
    /// Purchaser.
    pub customer: CustomerInfo,
    /// Purchase time.
    pub purchased_at: DateTime<Utc>,
    /// Time the ticket was scanned at the door.
    pub scanned_at: Option<DateTime<Utc>>,
}
