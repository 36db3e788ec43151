#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Seat selection for purchase and ticket issuance.
//!
//! Payment is simulated: a confirmed purchase turns the selected seats into
//! valid tickets without contacting any processor.

use chrono::{DateTime, Utc};
use seatmap_core::{
    Command, CustomerInfo, EventId, Price, RowLabel, Seat, SeatId, SeatStatus, Ticket, TicketId,
    TicketStatus, Zone, ZoneId,
};
use thiserror::Error;

/// Largest number of seats a single purchase may contain.
pub const MAX_SEATS_PER_PURCHASE: usize = 8;

/// Errors raised while assembling a purchase.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum CheckoutError {
    /// Occupied seats cannot be sold again.
    #[error("seat {0} is already occupied")]
    SeatOccupied(SeatId),
    /// The purchase already holds the maximum number of seats.
    #[error("a purchase may hold at most {limit} seats")]
    SelectionLimit {
        /// Maximum number of seats per purchase.
        limit: usize,
    },
    /// Tickets were requested without any selected seat.
    #[error("no seats are selected")]
    EmptySelection,
    /// A required customer field was blank.
    #[error("customer {0} is required")]
    MissingCustomerField(&'static str),
}

/// Seat paired with the price of its zone at selection time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PricedSeat {
    /// Seat identifier.
    pub seat: SeatId,
    /// Row of the seat.
    pub row: RowLabel,
    /// Seat number within the row.
    pub number: u32,
    /// Owning zone.
    pub zone: Option<ZoneId>,
    /// Zone price, zero for orphaned seats.
    pub price: Price,
    /// Sale status.
    pub status: SeatStatus,
}

impl PricedSeat {
    /// Resolves the seat's price through its zone.
    #[must_use]
    pub fn resolve(seat: &Seat, zones: &[Zone]) -> Self {
        let price = seat
            .zone
            .and_then(|zone| zones.iter().find(|candidate| candidate.id == zone))
            .map_or(Price::ZERO, |zone| zone.price);
        Self {
            seat: seat.id,
            row: seat.row,
            number: seat.number,
            zone: seat.zone,
            price,
            status: seat.status,
        }
    }
}

/// Seats picked for a single purchase, in selection order.
#[derive(Clone, Debug, Default)]
pub struct Checkout {
    selected: Vec<PricedSeat>,
}

impl Checkout {
    /// Creates an empty checkout.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds the seat to the purchase, or removes it when already selected.
    ///
    /// Returns whether the seat is selected afterwards.
    pub fn toggle(&mut self, seat: PricedSeat) -> Result<bool, CheckoutError> {
        if seat.status == SeatStatus::Occupied {
            return Err(CheckoutError::SeatOccupied(seat.seat));
        }

        if let Some(index) = self
            .selected
            .iter()
            .position(|selected| selected.seat == seat.seat)
        {
            let _ = self.selected.remove(index);
            return Ok(false);
        }

        if self.selected.len() >= MAX_SEATS_PER_PURCHASE {
            return Err(CheckoutError::SelectionLimit {
                limit: MAX_SEATS_PER_PURCHASE,
            });
        }

        self.selected.push(seat);
        Ok(true)
    }

    /// Seats currently in the purchase.
    #[must_use]
    pub fn selected(&self) -> &[PricedSeat] {
        &self.selected
    }

    /// Sum of the selected seats' prices.
    #[must_use]
    pub fn total(&self) -> Price {
        Price::from_cents(
            self.selected
                .iter()
                .map(|seat| seat.price.cents())
                .fold(0, u64::saturating_add),
        )
    }

    /// Empties the purchase.
    pub fn clear(&mut self) {
        self.selected.clear();
    }

    /// Issues one valid ticket per selected seat.
    ///
    /// Ticket identifiers are provisional; the ticket store allocates the
    /// persisted ones when the tickets are created.
    pub fn issue_tickets(
        &self,
        event: EventId,
        customer: &CustomerInfo,
        now: DateTime<Utc>,
    ) -> Result<Vec<Ticket>, CheckoutError> {
        if self.selected.is_empty() {
            return Err(CheckoutError::EmptySelection);
        }
        validate_customer(customer)?;

        let millis = now.timestamp_millis();
        Ok(self
            .selected
            .iter()
            .zip(1_u32..)
            .map(|(seat, provisional)| Ticket {
                id: TicketId::new(provisional),
                event,
                seat: seat.seat,
                qr_code: format!("QR_{millis}_{}", seat.seat),
                status: TicketStatus::Valid,
                price: seat.price,
                customer: customer.clone(),
                purchased_at: now,
                scanned_at: None,
            })
            .collect())
    }

    /// Commands marking every selected seat as sold on the layout.
    #[must_use]
    pub fn occupy_commands(&self) -> Vec<Command> {
        self.selected
            .iter()
            .map(|seat| Command::SetSeatStatus {
                seat: seat.seat,
                status: SeatStatus::Occupied,
            })
            .collect()
    }
}

/// Checks that the first name, last name and email are filled in.
pub fn validate_customer(customer: &CustomerInfo) -> Result<(), CheckoutError> {
    let required = [
        ("first name", &customer.first_name),
        ("last name", &customer.last_name),
        ("email", &customer.email),
    ];
    for (field, value) in required {
        if value.trim().is_empty() {
            return Err(CheckoutError::MissingCustomerField(field));
        }
    }
    Ok(())
}
