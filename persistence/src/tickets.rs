//! QR validation and the idempotent door scan.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use seatmap_core::{Ticket, TicketStatus};
use serde::Serialize;
use tracing::{debug, info};

use crate::{
    memory::InMemoryStore,
    store::{Store, StoreError},
};

/// Message reported for codes no ticket carries.
pub const INVALID_QR_MESSAGE: &str = "Invalid QR code";
/// Message reported for tickets that were already scanned.
pub const ALREADY_USED_MESSAGE: &str = "Ticket already used";
/// Message reported when a ticket would be admitted.
pub const VALID_TICKET_MESSAGE: &str = "Valid ticket";
/// Message reported after a successful scan.
pub const SCANNED_MESSAGE: &str = "Ticket scanned successfully";

/// Outcome of a read-only QR check.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct QrValidation {
    /// Whether the ticket would be admitted.
    pub valid: bool,
    /// Operator facing message.
    pub message: &'static str,
    /// Ticket carrying the code, if any.
    pub ticket: Option<Ticket>,
}

/// Outcome of a door scan.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ScanOutcome {
    /// Whether the ticket was consumed by this scan.
    pub success: bool,
    /// Operator facing message.
    pub message: &'static str,
    /// Ticket carrying the code, if any.
    pub ticket: Option<Ticket>,
}

fn validation_of(ticket: Option<Ticket>) -> QrValidation {
    match ticket {
        None => QrValidation {
            valid: false,
            message: INVALID_QR_MESSAGE,
            ticket: None,
        },
        Some(ticket) if ticket.status == TicketStatus::Used => QrValidation {
            valid: false,
            message: ALREADY_USED_MESSAGE,
            ticket: Some(ticket),
        },
        Some(ticket) => QrValidation {
            valid: true,
            message: VALID_TICKET_MESSAGE,
            ticket: Some(ticket),
        },
    }
}

/// Ticket store with door operations.
///
/// Invalid and reused codes are expected traffic, so they are reported as
/// structured outcomes rather than errors.
#[async_trait]
pub trait TicketLedger: Store<Ticket> {
    /// Ticket carrying the QR payload.
    async fn find_by_qr(&self, code: &str) -> Result<Option<Ticket>, StoreError>;

    /// Reports whether the code would be admitted without consuming it.
    async fn validate_qr(&self, code: &str) -> Result<QrValidation, StoreError> {
        let validation = validation_of(self.find_by_qr(code).await?);
        debug!(valid = validation.valid, message = validation.message, "validated QR code");
        Ok(validation)
    }

    /// Consumes a valid ticket, stamping the scan time.
    ///
    /// Implementations must perform the check and the transition atomically so
    /// that a ticket is consumed at most once.
    async fn scan_ticket(&self, code: &str, now: DateTime<Utc>)
        -> Result<ScanOutcome, StoreError>;
}

#[async_trait]
impl TicketLedger for InMemoryStore<Ticket> {
    async fn find_by_qr(&self, code: &str) -> Result<Option<Ticket>, StoreError> {
        Ok(self
            .table
            .read()
            .await
            .records
            .values()
            .find(|ticket| ticket.qr_code == code)
            .cloned())
    }

    async fn scan_ticket(
        &self,
        code: &str,
        now: DateTime<Utc>,
    ) -> Result<ScanOutcome, StoreError> {
        let mut table = self.table.write().await;
        let Some(ticket) = table
            .records
            .values_mut()
            .find(|ticket| ticket.qr_code == code)
        else {
            info!("rejected scan of unknown QR code");
            return Ok(ScanOutcome {
                success: false,
                message: INVALID_QR_MESSAGE,
                ticket: None,
            });
        };

        if ticket.status == TicketStatus::Used {
            info!(ticket = %ticket.id, "rejected repeated scan");
            return Ok(ScanOutcome {
                success: false,
                message: ALREADY_USED_MESSAGE,
                ticket: Some(ticket.clone()),
            });
        }

        ticket.status = TicketStatus::Used;
        ticket.scanned_at = Some(now);
        info!(ticket = %ticket.id, event = %ticket.event, seat = %ticket.seat, "ticket scanned");
        Ok(ScanOutcome {
            success: true,
            message: SCANNED_MESSAGE,
            ticket: Some(ticket.clone()),
        })
    }
}
