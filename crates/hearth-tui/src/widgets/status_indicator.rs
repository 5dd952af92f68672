//! Device health indicator span.

use ratatui::style::Style;
use ratatui::text::Span;

use hearth_core::DeviceHealth;

use crate::theme;

/// Render a device's health as a colored dot + word.
pub fn health_span(health: &DeviceHealth) -> Span<'static> {
    match health {
        DeviceHealth::Okay => Span::styled("● okay", Style::default().fg(theme::SUCCESS_GREEN)),
        DeviceHealth::Errored(_) => {
            Span::styled("● errored", Style::default().fg(theme::ERROR_RED))
        }
        DeviceHealth::Unknown => {
            Span::styled("○ unknown", Style::default().fg(theme::BORDER_GRAY))
        }
    }
}
