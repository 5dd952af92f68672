//! Hub status summary.

use owo_colors::OwoColorize;
use serde::Serialize;

use hearth_core::Hub;

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

#[derive(Serialize)]
struct StatusReport {
    hub: String,
    devices: usize,
    events: usize,
    okay: usize,
    errored: usize,
    unpolled: usize,
}

pub fn handle_status(hub: &Hub, global: &GlobalOpts) -> Result<(), CliError> {
    let devices = hub.devices_snapshot();

    let okay = devices.iter().filter(|d| d.health.is_okay()).count();
    let errored = devices.iter().filter(|d| d.health.error().is_some()).count();

    let report = StatusReport {
        hub: hub.config().url.to_string(),
        devices: devices.len(),
        events: hub.store().event_count(),
        okay,
        errored,
        unpolled: devices.len() - okay - errored,
    };

    let color = output::should_color(&global.color);
    let out = output::render_single(
        &global.output,
        &report,
        |r| {
            let health = if color {
                format!("{} okay / {} errored", r.okay.green(), r.errored.red())
            } else {
                format!("{} okay / {} errored", r.okay, r.errored)
            };
            [
                format!("Hub:      {}", r.hub),
                format!("Devices:  {} ({health})", r.devices),
                format!("Events:   {}", r.events),
            ]
            .join("\n")
        },
        |r| r.hub.clone(),
    );
    output::print_output(&out, global.quiet);
    Ok(())
}
