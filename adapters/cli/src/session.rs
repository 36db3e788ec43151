//! Scripted editing sessions replayed through the builder and the layout.

use std::{fs, path::Path};

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};
use seatmap_core::{
    AisleId, CanvasDimensions, CanvasPoint, Command, EntryExitId, Event, LayoutSnapshot, Price,
    SeatId, SeatMapInfo, SeatStatus, Tool, VenueId, ZoneColor, ZoneDraft, ZoneId, ZonePatch,
};
use seatmap_layout::{query, Layout};
use seatmap_system_analytics::{Analytics, AnalyticsInputs, AnalyticsReport};
use seatmap_system_builder::{Builder, BuilderInput, FormDraft};
use serde::Deserialize;
use tracing::{debug, warn};

fn default_zones() -> bool {
    true
}

/// Editing session description read from a TOML file.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct Script {
    pub(crate) name: String,
    #[serde(default)]
    pub(crate) venue: Option<VenueId>,
    #[serde(default)]
    pub(crate) template: bool,
    #[serde(default)]
    pub(crate) dimensions: Option<CanvasDimensions>,
    #[serde(default = "default_zones")]
    pub(crate) default_zones: bool,
    #[serde(default)]
    pub(crate) steps: Vec<Step>,
}

impl Script {
    pub(crate) fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read session script at {}", path.display()))?;
        toml::from_str(&contents)
            .with_context(|| format!("failed to parse session script at {}", path.display()))
    }
}

/// Single operator action of a script.
///
/// Prices are currency amounts such as `49.99`.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(tag = "action", rename_all = "kebab-case")]
pub(crate) enum Step {
    Tool {
        tool: Tool,
    },
    CreateZone {
        name: String,
        #[serde(default)]
        color: ZoneColor,
        price: f64,
    },
    EditZone {
        zone: ZoneId,
        #[serde(default)]
        name: Option<String>,
        #[serde(default)]
        color: Option<ZoneColor>,
        #[serde(default)]
        price: Option<f64>,
    },
    DeleteZone {
        zone: ZoneId,
    },
    ActiveZone {
        zone: ZoneId,
    },
    Click {
        x: f32,
        y: f32,
    },
    SeatClick {
        seat: SeatId,
    },
    EntryClick {
        entry: EntryExitId,
    },
    AisleClick {
        aisle: AisleId,
    },
    /// Confirms the open form, optionally overriding its prefilled fields.
    Confirm {
        #[serde(default)]
        name: Option<String>,
        #[serde(default)]
        capacity: Option<u32>,
        #[serde(default)]
        width: Option<u32>,
        #[serde(default)]
        length: Option<u32>,
    },
    Cancel,
    SeatStatus {
        seat: SeatId,
        status: SeatStatus,
    },
    ClearSelection,
    ClearSeats,
}

/// Editor state driven by script steps.
#[derive(Debug)]
pub(crate) struct Session {
    layout: Layout,
    builder: Builder,
    analytics: Analytics,
    form: Option<FormDraft>,
    rejections: usize,
}

impl Session {
    /// Starts a session on a new, unsaved map described by the script header.
    pub(crate) fn start(script: &Script, fallback: CanvasDimensions, now: DateTime<Utc>) -> Self {
        let mut map = SeatMapInfo::new(script.name.trim(), now);
        map.venue = script.venue;
        map.is_template = script.template;
        map.dimensions = script.dimensions.unwrap_or(fallback);

        let layout = if script.default_zones {
            Layout::with_default_zones(map)
        } else {
            Layout::new(map)
        };
        Self::from_layout(layout)
    }

    /// Resumes editing a saved layout.
    pub(crate) fn resume(snapshot: LayoutSnapshot) -> Self {
        Self::from_layout(Layout::restore(snapshot))
    }

    fn from_layout(layout: Layout) -> Self {
        let builder = Builder::new().with_active_zone(query::active_zone(&layout));
        let mut analytics = Analytics::new();
        let _ = analytics.handle(
            &[],
            &[],
            AnalyticsInputs::new(query::zones(&layout), query::seats(&layout)),
        );
        Self {
            layout,
            builder,
            analytics,
            form: None,
            rejections: 0,
        }
    }

    /// Replays every step in order.
    pub(crate) fn run_all(&mut self, steps: &[Step]) -> Result<()> {
        for (index, step) in steps.iter().enumerate() {
            self.run(step)
                .with_context(|| format!("step {} ({step:?}) failed", index + 1))?;
        }
        Ok(())
    }

    /// Performs a single step.
    pub(crate) fn run(&mut self, step: &Step) -> Result<()> {
        match step {
            Step::Tool { tool } => self.submit(vec![Command::SelectTool { tool: *tool }]),
            Step::CreateZone { name, color, price } => {
                let price = parse_price(*price)?;
                self.submit(vec![Command::CreateZone {
                    draft: ZoneDraft::new(name.clone(), *color, price),
                }]);
            }
            Step::EditZone {
                zone,
                name,
                color,
                price,
            } => {
                let price = price.map(parse_price).transpose()?;
                self.submit(vec![Command::EditZone {
                    zone: *zone,
                    patch: ZonePatch {
                        name: name.clone(),
                        color: *color,
                        price,
                    },
                }]);
            }
            Step::DeleteZone { zone } => self.submit(vec![Command::DeleteZone { zone: *zone }]),
            Step::ActiveZone { zone } => {
                self.submit(vec![Command::SetActiveZone { zone: *zone }]);
            }
            Step::Click { x, y } => {
                self.click(BuilderInput::CanvasClick(CanvasPoint::new(*x, *y)));
            }
            Step::SeatClick { seat } => self.click(BuilderInput::SeatClick(*seat)),
            Step::EntryClick { entry } => self.click(BuilderInput::EntryExitClick(*entry)),
            Step::AisleClick { aisle } => self.click(BuilderInput::AisleClick(*aisle)),
            Step::Confirm {
                name,
                capacity,
                width,
                length,
            } => {
                let Some(mut form) = self.form.take() else {
                    bail!("no form is open to confirm");
                };
                match &mut form {
                    FormDraft::EntryExit { draft, .. } => {
                        if let Some(name) = name {
                            draft.name.clone_from(name);
                        }
                        if let Some(capacity) = capacity {
                            draft.capacity = *capacity;
                        }
                    }
                    FormDraft::Aisle { draft, .. } => {
                        if let Some(name) = name {
                            draft.name.clone_from(name);
                        }
                        if let Some(width) = width {
                            draft.width = *width;
                        }
                        if let Some(length) = length {
                            draft.length = *length;
                        }
                    }
                }
                self.submit(vec![form.submit()]);
            }
            Step::Cancel => {
                if self.form.take().is_none() {
                    bail!("no form is open to cancel");
                }
            }
            Step::SeatStatus { seat, status } => self.submit(vec![Command::SetSeatStatus {
                seat: *seat,
                status: *status,
            }]),
            Step::ClearSelection => self.submit(vec![Command::ClearSelection]),
            Step::ClearSeats => self.submit(vec![Command::ClearSeats]),
        }
        Ok(())
    }

    fn click(&mut self, input: BuilderInput) {
        let mut commands = Vec::new();
        let form = self
            .builder
            .handle(&[], Some(input), &self.layout, &mut commands);
        if form.is_some() {
            debug!(?form, "form opened");
            self.form = form;
        }
        self.submit(commands);
    }

    /// Applies commands to the layout and broadcasts the resulting events.
    pub(crate) fn submit(&mut self, commands: Vec<Command>) {
        if commands.is_empty() {
            return;
        }

        let mut events = Vec::new();
        for command in commands.iter().cloned() {
            seatmap_layout::apply(&mut self.layout, command, &mut events);
        }
        self.observe(&events);

        let mut follow_up = Vec::new();
        let _ = self
            .builder
            .handle(&events, None, &self.layout, &mut follow_up);
        if self.analytics.handle(
            &events,
            &commands,
            AnalyticsInputs::new(query::zones(&self.layout), query::seats(&self.layout)),
        ) {
            debug!("analytics recomputed");
        }
    }

    fn observe(&mut self, events: &[Event]) {
        for event in events.iter().filter(|event| event.is_rejection()) {
            self.rejections += 1;
            warn!(?event, "command rejected");
        }
    }

    /// Number of commands the layout rejected so far.
    pub(crate) fn rejections(&self) -> usize {
        self.rejections
    }

    /// Current analytics report.
    pub(crate) fn report(&self) -> Option<&AnalyticsReport> {
        self.analytics.last_report()
    }

    /// Layout ready to be saved or exported.
    pub(crate) fn snapshot(&self) -> LayoutSnapshot {
        query::snapshot(&self.layout)
    }
}

fn parse_price(amount: f64) -> Result<Price> {
    Price::from_amount(amount).with_context(|| format!("invalid zone price {amount}"))
}
