use chrono::{TimeZone, Utc};
use seatmap_core::{
    Command, CustomerInfo, EventId, Price, SeatId, SeatMapInfo, SeatStatus, TicketStatus,
};
use seatmap_layout::{apply, query, Layout};
use seatmap_system_checkout::{Checkout, CheckoutError, PricedSeat, MAX_SEATS_PER_PURCHASE};

fn row_of_ten() -> Layout {
    let created_at = Utc
        .with_ymd_and_hms(2024, 9, 1, 10, 0, 0)
        .single()
        .expect("valid timestamp");
    let mut layout = Layout::with_default_zones(SeatMapInfo::new("Club", created_at));
    let mut events = Vec::new();
    apply(&mut layout, Command::GenerateRow, &mut events);
    layout
}

fn priced(layout: &Layout, seat: u32) -> PricedSeat {
    let seat = query::seats(layout)
        .iter()
        .find(|candidate| candidate.id == SeatId::new(seat))
        .expect("seat exists");
    PricedSeat::resolve(seat, query::zones(layout))
}

fn customer() -> CustomerInfo {
    CustomerInfo {
        first_name: "Grace".to_owned(),
        last_name: "Hopper".to_owned(),
        email: "grace@example.com".to_owned(),
        phone: "555-0100".to_owned(),
    }
}

#[test]
fn occupied_seats_are_refused() {
    let mut layout = row_of_ten();
    let mut events = Vec::new();
    apply(
        &mut layout,
        Command::SetSeatStatus {
            seat: SeatId::new(4),
            status: SeatStatus::Occupied,
        },
        &mut events,
    );

    let mut checkout = Checkout::new();
    assert_eq!(
        checkout.toggle(priced(&layout, 4)),
        Err(CheckoutError::SeatOccupied(SeatId::new(4)))
    );
    assert!(checkout.selected().is_empty());
}

#[test]
fn a_ninth_seat_is_refused() {
    let layout = row_of_ten();
    let mut checkout = Checkout::new();
    for seat in 1..=8 {
        assert_eq!(checkout.toggle(priced(&layout, seat)), Ok(true));
    }

    assert_eq!(
        checkout.toggle(priced(&layout, 9)),
        Err(CheckoutError::SelectionLimit {
            limit: MAX_SEATS_PER_PURCHASE
        })
    );
    assert_eq!(checkout.selected().len(), 8);

    assert_eq!(checkout.toggle(priced(&layout, 3)), Ok(false));
    assert_eq!(checkout.toggle(priced(&layout, 9)), Ok(true));
}

#[test]
fn total_sums_zone_prices() {
    let layout = row_of_ten();
    let mut checkout = Checkout::new();
    let _ = checkout.toggle(priced(&layout, 1));
    let _ = checkout.toggle(priced(&layout, 2));
    assert_eq!(checkout.total(), Price::from_cents(10_000));
}

#[test]
fn tickets_carry_qr_payloads_and_prices() {
    let mut layout = row_of_ten();
    let mut checkout = Checkout::new();
    let _ = checkout.toggle(priced(&layout, 2));
    let _ = checkout.toggle(priced(&layout, 7));

    let now = Utc
        .timestamp_millis_opt(1_700_000_000_123)
        .single()
        .expect("valid timestamp");
    let tickets = checkout
        .issue_tickets(EventId::new(12), &customer(), now)
        .expect("tickets issued");

    assert_eq!(tickets.len(), 2);
    assert_eq!(tickets[0].qr_code, "QR_1700000000123_2");
    assert_eq!(tickets[1].qr_code, "QR_1700000000123_7");
    assert!(tickets.iter().all(|ticket| ticket.status == TicketStatus::Valid
        && ticket.price == Price::from_cents(5_000)
        && ticket.event == EventId::new(12)
        && ticket.scanned_at.is_none()));

    let mut events = Vec::new();
    for command in checkout.occupy_commands() {
        apply(&mut layout, command, &mut events);
    }
    assert_eq!(
        query::seats(&layout)
            .iter()
            .filter(|seat| seat.status == SeatStatus::Occupied)
            .count(),
        2
    );
}

#[test]
fn tickets_require_seats_and_customer_details() {
    let layout = row_of_ten();
    let mut checkout = Checkout::new();
    let now = Utc::now();
    assert_eq!(
        checkout.issue_tickets(EventId::new(1), &customer(), now),
        Err(CheckoutError::EmptySelection)
    );

    let _ = checkout.toggle(priced(&layout, 1));
    let anonymous = CustomerInfo {
        first_name: String::new(),
        ..customer()
    };
    assert_eq!(
        checkout.issue_tickets(EventId::new(1), &anonymous, now),
        Err(CheckoutError::MissingCustomerField("first name"))
    );
}
