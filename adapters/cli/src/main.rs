#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that edits seat maps and runs the door.

mod config;
mod data;
mod layout_transfer;
mod session;

use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Context, Result};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use seatmap_core::{CustomerInfo, EventId, LayoutSnapshot, SeatId, SeatMapId, Ticket, VenueId};
use seatmap_persistence::{Persistence, SaveReport};
use seatmap_system_analytics::{
    export::{self, ExportDocument},
    AnalyticsInputs, AnalyticsReport,
};
use seatmap_system_checkout::{Checkout, PricedSeat};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::{
    config::{Config, DEFAULT_CONFIG_PATH},
    session::{Script, Session},
};

#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
#[command(name = "seatmap")]
struct Cli {
    /// Configuration file; `seatmap.toml` is used when present.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Data set file, overriding `[storage] data_path`.
    #[arg(long, global = true)]
    data: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Replays an editing session script and saves the resulting map.
    Session {
        /// TOML script of editor actions.
        script: PathBuf,
        /// Saved map to keep editing instead of starting a new one.
        #[arg(long)]
        map: Option<u32>,
    },
    /// Prints the analytics report of a saved map.
    Analytics {
        /// Seat map identifier.
        map: u32,
    },
    /// Writes the JSON export of a saved map.
    Export {
        /// Seat map identifier.
        map: u32,
        /// Directory the export is written to.
        #[arg(long, default_value = ".")]
        out: PathBuf,
    },
    /// Prints a single-line share string of a saved map.
    Share {
        /// Seat map identifier.
        map: u32,
    },
    /// Saves a shared map as a new map.
    Import {
        /// Share string produced by `share`.
        code: String,
        /// Stores the map as a template.
        #[arg(long)]
        template: bool,
    },
    /// Lists template maps.
    Templates,
    /// Creates a new map from a template.
    Instantiate {
        /// Template map identifier.
        template: u32,
        /// Name of the new map.
        name: String,
        /// Venue the new map is bound to.
        #[arg(long)]
        venue: Option<u32>,
    },
    /// Lists the seat maps of a venue.
    Maps {
        /// Venue identifier.
        venue: u32,
    },
    /// Lists upcoming events, soonest first.
    Events {
        /// Maximum number of events listed.
        #[arg(long, default_value_t = 5)]
        limit: usize,
    },
    /// Sells seats of an event and issues their tickets.
    Purchase {
        /// Event identifier.
        event: u32,
        /// Comma separated seat identifiers.
        #[arg(long, value_delimiter = ',', required = true)]
        seats: Vec<u32>,
        /// Purchaser's given name.
        #[arg(long)]
        first_name: String,
        /// Purchaser's family name.
        #[arg(long)]
        last_name: String,
        /// Purchaser's email.
        #[arg(long)]
        email: String,
        /// Purchaser's phone number.
        #[arg(long, default_value = "")]
        phone: String,
    },
    /// Checks a QR code without consuming the ticket.
    Validate {
        /// QR payload.
        code: String,
    },
    /// Scans a QR code at the door, consuming the ticket.
    Scan {
        /// QR payload.
        code: String,
    },
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SessionSummary<'a> {
    seat_map_id: Option<SeatMapId>,
    rejected_commands: usize,
    analytics: Option<&'a AnalyticsReport>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PurchaseSummary {
    total: String,
    tickets: Vec<Ticket>,
}

/// Entry point for the seat-map command-line interface.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => Config::load(path, true)?,
        None => Config::load(Path::new(DEFAULT_CONFIG_PATH), false)?,
    };
    init_logging(&config);

    let data_path = cli
        .data
        .clone()
        .unwrap_or_else(|| config.storage.data_path.clone());
    let persistence = data::open(&data_path).await?;

    if run(cli.command, &persistence, &config, Utc::now()).await? {
        data::persist(&persistence, &data_path).await?;
    }
    Ok(())
}

fn init_logging(config: &Config) {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.log_filter())),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Executes the command, reporting whether any store was modified.
async fn run(
    command: Commands,
    persistence: &Persistence,
    config: &Config,
    now: DateTime<Utc>,
) -> Result<bool> {
    match command {
        Commands::Session { script, map } => {
            let script = Script::load(&script)?;
            let mut session = match map {
                Some(map) => Session::resume(load(persistence, map).await?),
                None => Session::start(&script, config.canvas.dimensions, now),
            };
            session.run_all(&script.steps)?;

            let saved = save(persistence, &session.snapshot()).await?;
            info!(
                map = ?saved.map(),
                rejected = session.rejections(),
                "session saved"
            );
            print_json(&SessionSummary {
                seat_map_id: saved.map(),
                rejected_commands: session.rejections(),
                analytics: session.report(),
            })?;
            Ok(true)
        }
        Commands::Analytics { map } => {
            let snapshot = load(persistence, map).await?;
            print_json(&AnalyticsReport::compute(&AnalyticsInputs::from_snapshot(
                &snapshot,
            )))?;
            Ok(false)
        }
        Commands::Export { map, out } => {
            let snapshot = load(persistence, map).await?;
            let document = ExportDocument::build(&snapshot, now);
            let json = document
                .to_json_pretty()
                .context("failed to serialise export")?;
            let path = out.join(export::file_name(&snapshot.map, now));
            tokio::fs::write(&path, json)
                .await
                .with_context(|| format!("failed to write export at {}", path.display()))?;
            info!(path = %path.display(), seats = snapshot.seats.len(), "seat map exported");
            println!("{}", path.display());
            Ok(false)
        }
        Commands::Share { map } => {
            let snapshot = load(persistence, map).await?;
            println!("{}", layout_transfer::encode(&snapshot)?);
            Ok(false)
        }
        Commands::Import { code, template } => {
            let mut snapshot = layout_transfer::decode(&code)?;
            snapshot.assign_map(None);
            snapshot.map.is_template = template;
            let saved = save(persistence, &snapshot).await?;
            print_json(&saved.map())?;
            Ok(true)
        }
        Commands::Templates => {
            print_json(&persistence.templates().await?)?;
            Ok(false)
        }
        Commands::Instantiate {
            template,
            name,
            venue,
        } => {
            let snapshot = persistence
                .instantiate_template(
                    SeatMapId::new(template),
                    &name,
                    venue.map(VenueId::new),
                    now,
                )
                .await
                .with_context(|| format!("failed to instantiate template {template}"))?;
            let saved = save(persistence, &snapshot).await?;
            print_json(&saved.map())?;
            Ok(true)
        }
        Commands::Maps { venue } => {
            print_json(
                &persistence
                    .seat_maps_for_venue(VenueId::new(venue))
                    .await?,
            )?;
            Ok(false)
        }
        Commands::Events { limit } => {
            print_json(&persistence.upcoming_events(now, limit).await?)?;
            Ok(false)
        }
        Commands::Purchase {
            event,
            seats,
            first_name,
            last_name,
            email,
            phone,
        } => {
            let customer = CustomerInfo {
                first_name,
                last_name,
                email,
                phone,
            };
            let summary =
                purchase(persistence, EventId::new(event), &seats, &customer, now).await?;
            print_json(&summary)?;
            Ok(true)
        }
        Commands::Validate { code } => {
            print_json(&persistence.tickets.validate_qr(&code).await?)?;
            Ok(false)
        }
        Commands::Scan { code } => {
            let outcome = persistence.tickets.scan_ticket(&code, now).await?;
            print_json(&outcome)?;
            Ok(outcome.success)
        }
    }
}

/// Sells the seats, books the tickets on the event and marks the seats occupied.
async fn purchase(
    persistence: &Persistence,
    event: EventId,
    seats: &[u32],
    customer: &CustomerInfo,
    now: DateTime<Utc>,
) -> Result<PurchaseSummary> {
    let record = persistence
        .events
        .get_by_id(event)
        .await?
        .ok_or_else(|| anyhow!("event {event} does not exist"))?;
    let map = record
        .seat_map
        .ok_or_else(|| anyhow!("event {event} has no seat map"))?;
    let snapshot = load(persistence, map.get()).await?;

    let mut checkout = Checkout::new();
    for &seat in seats {
        let seat = SeatId::new(seat);
        let found = snapshot
            .seats
            .iter()
            .find(|candidate| candidate.id == seat)
            .ok_or_else(|| anyhow!("seat {seat} is not part of seat map {map}"))?;
        if !checkout.toggle(PricedSeat::resolve(found, &snapshot.zones))? {
            bail!("seat {seat} listed twice");
        }
    }
    let tickets = checkout.issue_tickets(event, customer, now)?;
    let tickets = persistence.record_sale(event, tickets).await?;

    let mut session = Session::resume(snapshot);
    session.submit(checkout.occupy_commands());
    let sold = session
        .snapshot()
        .seats
        .into_iter()
        .filter(|seat| checkout.selected().iter().any(|picked| picked.seat == seat.id));
    for seat in sold {
        let id = seat.id;
        let _ = persistence
            .seats
            .update(seat)
            .await?
            .ok_or_else(|| anyhow!("seat {id} disappeared during the purchase"))?;
    }

    info!(event = %event, tickets = tickets.len(), "purchase completed");
    Ok(PurchaseSummary {
        total: checkout.total().to_string(),
        tickets,
    })
}

async fn load(persistence: &Persistence, map: u32) -> Result<LayoutSnapshot> {
    persistence
        .load_layout(SeatMapId::new(map))
        .await
        .with_context(|| format!("failed to load seat map {map}"))
}

async fn save(persistence: &Persistence, snapshot: &LayoutSnapshot) -> Result<SaveReport> {
    let saved = if snapshot.map.is_template {
        persistence.save_as_template(snapshot).await
    } else {
        persistence.save_layout(snapshot).await
    };
    saved.with_context(|| format!("failed to save seat map '{}'", snapshot.map.name))
}

fn print_json(value: &impl Serialize) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("failed to serialise output")?;
    println!("{json}");
    Ok(())
}
