//! Timed-event command handlers.

use std::sync::Arc;

use tabled::Tabled;

use hearth_core::{Command as CoreCommand, EventId, Hub, TimedEvent};

use crate::cli::{EventsArgs, EventsCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct EventRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Device")]
    device: String,
    #[tabled(rename = "Action")]
    action: String,
    #[tabled(rename = "Time")]
    time: String,
}

impl From<&Arc<TimedEvent>> for EventRow {
    fn from(e: &Arc<TimedEvent>) -> Self {
        Self {
            id: e.id.to_string(),
            device: e.device.to_string(),
            action: e.kind.label().to_owned(),
            time: e.wire_time(),
        }
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(hub: &Hub, args: EventsArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        EventsCommand::List => {
            let snap = hub.events_snapshot();
            let out =
                output::render_list(&global.output, &snap, |e| EventRow::from(e), |e| e.id.to_string());
            output::print_output(&out, global.quiet);
            Ok(())
        }

        EventsCommand::Add { device, kind, time } => {
            let found = util::find_device(hub, &device)?;
            let time = TimedEvent::parse_time(&time).ok_or_else(|| CliError::Validation {
                field: "time".into(),
                reason: format!("expected HH:MM, got '{time}'"),
            })?;

            hub.execute(CoreCommand::AddTimedEvent {
                device: found.id,
                kind: util::kind_from_arg(kind),
                time,
            })
            .await?;
            output::print_output(
                &format!(
                    "scheduled for {} at {}",
                    found.display_name(),
                    time.format("%H:%M")
                ),
                global.quiet,
            );
            Ok(())
        }

        EventsCommand::Remove { event } => {
            let id: EventId = event.parse().map_err(|_| CliError::Validation {
                field: "event".into(),
                reason: format!("not an event id: '{event}'"),
            })?;

            hub.execute(CoreCommand::RemoveEvent { id }).await?;
            output::print_output(&format!("removed event {id}"), global.quiet);
            Ok(())
        }
    }
}
