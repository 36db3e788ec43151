#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Asynchronous persistence boundary of the seat-map builder.
//!
//! Each record type is reached through an injected [`Store`] handle. The
//! [`Persistence`] bundle runs the multi-step bulk save and load of a seat
//! map on top of those handles, and the [`TicketLedger`] adds the door
//! operations for tickets. [`InMemoryStore`] is the reference adapter.

mod memory;
mod record;
mod repository;
mod store;
mod tickets;

pub use memory::InMemoryStore;
pub use record::{Record, RecordId};
pub use repository::{DataSet, Persistence, PersistenceError, SaveReport};
pub use store::{Store, StoreError};
pub use tickets::{
    QrValidation, ScanOutcome, TicketLedger, ALREADY_USED_MESSAGE, INVALID_QR_MESSAGE,
    SCANNED_MESSAGE, VALID_TICKET_MESSAGE,
};
