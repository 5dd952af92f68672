//! Device command handlers.

use std::sync::Arc;

use tabled::Tabled;

use hearth_core::{Brightness, Command as CoreCommand, Device, Hub, Position};

use crate::cli::{DevicesArgs, DevicesCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct DeviceRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Role")]
    role: String,
    #[tabled(rename = "Health")]
    health: String,
    #[tabled(rename = "Light")]
    lightness: String,
    #[tabled(rename = "Relay")]
    relay: String,
    #[tabled(rename = "LED")]
    led: String,
}

impl From<&Arc<Device>> for DeviceRow {
    fn from(d: &Arc<Device>) -> Self {
        Self {
            id: d.id.to_string(),
            name: d.display_name(),
            role: d.role.map_or_else(|| "-".into(), |r| r.to_string()),
            health: health_text(d),
            lightness: d
                .telemetry
                .lightness
                .map_or_else(|| "-".into(), |l| l.to_string()),
            relay: d.telemetry.relay.to_string(),
            led: d
                .telemetry
                .led
                .map_or_else(|| "-".into(), |b| b.to_string()),
        }
    }
}

fn health_text(d: &Device) -> String {
    match &d.health {
        hearth_core::DeviceHealth::Unknown => "unknown".into(),
        hearth_core::DeviceHealth::Okay => "okay".into(),
        hearth_core::DeviceHealth::Errored(_) => "errored".into(),
    }
}

fn detail(d: &Arc<Device>) -> String {
    let mut lines = vec![
        format!("ID:        {}", d.id),
        format!("Name:      {}", d.display_name()),
        format!("IP:        {}", d.ip.as_deref().unwrap_or("-")),
        format!(
            "Role:      {}",
            d.role.map_or_else(|| "-".into(), |r| r.to_string())
        ),
        format!("Health:    {}", health_text(d)),
    ];
    if let Some(light) = d.telemetry.lightness {
        lines.push(format!("Light:     {} (raw {})", light.level().label(), light.0));
    }
    lines.push(format!("Relay:     {}", d.telemetry.relay));
    if let Some(led) = d.telemetry.led {
        lines.push(format!("LED:       {} (raw {})", led, led.raw()));
    }
    if let Some(pos) = d.position {
        let (x, y) = pos.rounded();
        lines.push(format!("Position:  {x},{y}"));
    }
    if let Some(err) = d.health.error() {
        lines.push(format!("Error:     {err}"));
    }
    lines.join("\n")
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(hub: &Hub, args: DevicesArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        DevicesCommand::List => {
            let snap = hub.devices_snapshot();
            let out = output::render_list(
                &global.output,
                &snap,
                |d| DeviceRow::from(d),
                |d| d.id.to_string(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        DevicesCommand::Get { device } => {
            let found = util::find_device(hub, &device)?;
            let out = output::render_single(&global.output, &found, detail, |d| d.id.to_string());
            output::print_output(&out, global.quiet);
            Ok(())
        }

        DevicesCommand::Add { name, ip, role } => {
            let result = hub
                .execute(CoreCommand::AddDevice {
                    name,
                    ip,
                    role: util::role_from_arg(role),
                })
                .await?;
            output::print_output(result.message().unwrap_or("device added"), global.quiet);
            Ok(())
        }

        DevicesCommand::Remove { device } => {
            let found = util::find_device(hub, &device)?;
            if !global.yes {
                let confirmed = dialoguer::Confirm::new()
                    .with_prompt(format!("Remove {}?", found.display_name()))
                    .default(false)
                    .interact()
                    .map_err(|e| CliError::Io(std::io::Error::other(e)))?;
                if !confirmed {
                    return Ok(());
                }
            }

            hub.execute(CoreCommand::RemoveDevice { id: found.id }).await?;
            output::print_output(
                &format!("removed {} ({} devices left)", found.display_name(), hub.store().device_count()),
                global.quiet,
            );
            Ok(())
        }

        DevicesCommand::Move { device, x, y } => {
            let found = util::find_device(hub, &device)?;
            // Clamp to the map the same way a drag would.
            let position = hub.config().map.clamp(Position::new(x, y), 0.0, 0.0);
            hub.execute(CoreCommand::SetPosition {
                id: found.id,
                position,
            })
            .await?;
            let (px, py) = position.rounded();
            output::print_output(
                &format!("moved {} to {px},{py}", found.display_name()),
                global.quiet,
            );
            Ok(())
        }

        DevicesCommand::Relay { device } => {
            let found = util::find_device(hub, &device)?;
            hub.execute(CoreCommand::ToggleRelay { id: found.id }).await?;
            output::print_output(
                &format!("relay toggled on {}", found.display_name()),
                global.quiet,
            );
            Ok(())
        }

        DevicesCommand::Led { device, percent } => {
            let found = util::find_device(hub, &device)?;
            let percent = match percent {
                Some(p) => p,
                None => prompt_percent()?,
            };
            // Validated before anything is transmitted.
            let brightness = Brightness::from_percent(percent).map_err(CliError::from)?;

            hub.execute(CoreCommand::SetLed {
                id: found.id,
                brightness,
            })
            .await?;
            output::print_output(
                &format!("LED on {} set to {brightness}", found.display_name()),
                global.quiet,
            );
            Ok(())
        }
    }
}

/// Interactive brightness prompt, re-asking until the input is a valid
/// percentage.
fn prompt_percent() -> Result<u8, CliError> {
    let value: String = dialoguer::Input::new()
        .with_prompt("LED brightness (0-100)")
        .default("50".into())
        .validate_with(|raw: &String| match raw.trim().parse::<u8>() {
            Ok(p) if p <= 100 => Ok(()),
            _ => Err("enter a whole number between 0 and 100"),
        })
        .interact_text()
        .map_err(|e| CliError::Io(std::io::Error::other(e)))?;

    value.trim().parse().map_err(|_| CliError::Validation {
        field: "brightness".into(),
        reason: format!("not a percentage: {value}"),
    })
}
