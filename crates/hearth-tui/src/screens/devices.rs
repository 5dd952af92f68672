//! Devices screen — table of devices with live readings.

use std::sync::Arc;

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Constraint, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Cell as TableCell, Paragraph, Row, Table};
use tokio::sync::mpsc::UnboundedSender;
use tui_input::Input;
use tui_input::backend::crossterm::EventHandler;

use hearth_core::{Brightness, Command, Device};

use crate::action::{Action, Notification};
use crate::component::Component;
use crate::theme;
use crate::widgets::status_indicator;

pub struct DevicesScreen {
    focused: bool,
    devices: Arc<Vec<Arc<Device>>>,
    selected: usize,
    /// Brightness prompt, when open.
    led_input: Option<Input>,
}

impl DevicesScreen {
    pub fn new() -> Self {
        Self {
            focused: false,
            devices: Arc::new(Vec::new()),
            selected: 0,
            led_input: None,
        }
    }

    fn selected_device(&self) -> Option<&Arc<Device>> {
        self.devices.get(self.selected)
    }

    fn led_step(&self, delta: i8) -> Option<Action> {
        let device = self.selected_device()?;
        let current = device.telemetry.led?;
        Some(Action::Dispatch(Command::SetLed {
            id: device.id,
            brightness: current.step_percent(delta),
        }))
    }

    /// Close the prompt, parse its contents, and dispatch -- or surface
    /// a validation toast. Nothing is transmitted on bad input.
    fn submit_led_prompt(&mut self) -> Option<Action> {
        let input = self.led_input.take()?;
        let device = self.selected_device()?;

        let raw = input.value().trim().to_owned();
        let parsed = raw.parse::<u8>().ok().and_then(|p| Brightness::from_percent(p).ok());
        match parsed {
            Some(brightness) => Some(Action::Dispatch(Command::SetLed {
                id: device.id,
                brightness,
            })),
            None => Some(Action::Notify(Notification::error(format!(
                "brightness must be a whole number between 0 and 100, got '{raw}'"
            )))),
        }
    }

    fn device_row<'a>(&self, index: usize, device: &'a Device) -> Row<'a> {
        let style = if index == self.selected && self.focused {
            theme::table_selected()
        } else {
            theme::table_row()
        };

        Row::new(vec![
            TableCell::from(device.id.to_string()),
            TableCell::from(device.display_name()),
            TableCell::from(
                device
                    .role
                    .map_or_else(|| "-".into(), |r| format!("{} {r}", theme::role_glyph(Some(r)))),
            ),
            TableCell::from(Line::from(status_indicator::health_span(&device.health))),
            TableCell::from(
                device
                    .telemetry
                    .lightness
                    .map_or_else(|| "-".into(), |l| l.level().label().to_owned()),
            ),
            TableCell::from(device.telemetry.relay.to_string()),
            TableCell::from(
                device
                    .telemetry
                    .led
                    .map_or_else(|| "-".into(), |b| b.to_string()),
            ),
            TableCell::from(device.health.error().unwrap_or("-").to_owned()),
        ])
        .style(style)
    }

    fn render_led_prompt(&self, frame: &mut Frame, area: Rect, input: &Input) {
        let width = 40u16.min(area.width.saturating_sub(4));
        let x = area.x + (area.width.saturating_sub(width)) / 2;
        let y = area.y + area.height / 2;
        let popup = Rect::new(x, y, width, 3);

        frame.render_widget(
            Block::default().style(Style::default().bg(theme::BG_DARK)),
            popup,
        );
        let block = Block::default()
            .title(" LED brightness (0-100) ")
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_focused());
        let inner = block.inner(popup);
        frame.render_widget(block, popup);
        frame.render_widget(
            Paragraph::new(input.value()).style(Style::default().fg(theme::DIM_WHITE)),
            inner,
        );
    }
}

impl Component for DevicesScreen {
    fn init(&mut self, _action_tx: UnboundedSender<Action>) -> Result<()> {
        Ok(())
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        // Prompt mode swallows everything except Esc/Enter.
        if let Some(input) = &mut self.led_input {
            return match key.code {
                KeyCode::Esc => {
                    self.led_input = None;
                    Ok(None)
                }
                KeyCode::Enter => Ok(self.submit_led_prompt()),
                _ => {
                    input.handle_event(&crossterm::event::Event::Key(key));
                    Ok(None)
                }
            };
        }

        match key.code {
            KeyCode::Char('j') | KeyCode::Down => {
                if !self.devices.is_empty() {
                    self.selected = (self.selected + 1) % self.devices.len();
                }
                Ok(None)
            }
            KeyCode::Char('k') | KeyCode::Up => {
                if !self.devices.is_empty() {
                    self.selected =
                        (self.selected + self.devices.len() - 1) % self.devices.len();
                }
                Ok(None)
            }

            KeyCode::Char('t') => Ok(self
                .selected_device()
                .map(|d| Action::Dispatch(Command::ToggleRelay { id: d.id }))),
            KeyCode::Char('x') => Ok(self
                .selected_device()
                .map(|d| Action::Dispatch(Command::RemoveDevice { id: d.id }))),
            KeyCode::Char('l') => {
                if self.selected_device().is_some() {
                    // Seed with the current level, the way the dashboard
                    // prompt suggested 50.
                    let seed = self
                        .selected_device()
                        .and_then(|d| d.telemetry.led)
                        .map_or_else(|| "50".to_owned(), |b| b.percent().to_string());
                    self.led_input = Some(Input::new(seed));
                }
                Ok(None)
            }
            KeyCode::Char('+') | KeyCode::Char('=') => Ok(self.led_step(5)),
            KeyCode::Char('-') => Ok(self.led_step(-5)),

            _ => Ok(None),
        }
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        if let Action::DevicesUpdated(devices) = action {
            self.devices = Arc::clone(devices);
            if self.selected >= self.devices.len() {
                self.selected = self.devices.len().saturating_sub(1);
            }
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .title(format!(" Devices ({}) ", self.devices.len()))
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(if self.focused {
                theme::border_focused()
            } else {
                theme::border_default()
            });

        let inner = block.inner(area);
        frame.render_widget(block, area);

        let table_area = Rect {
            x: inner.x,
            y: inner.y,
            width: inner.width,
            height: inner.height.saturating_sub(1),
        };
        let hints_area = Rect {
            x: inner.x,
            y: inner.y + inner.height.saturating_sub(1),
            width: inner.width,
            height: 1,
        };

        let header = Row::new(vec![
            "ID", "Name", "Role", "Health", "Light", "Relay", "LED", "Error",
        ])
        .style(theme::table_header());

        let rows: Vec<Row> = self
            .devices
            .iter()
            .enumerate()
            .map(|(i, d)| self.device_row(i, d))
            .collect();

        let table = Table::new(
            rows,
            [
                Constraint::Length(4),
                Constraint::Length(16),
                Constraint::Length(10),
                Constraint::Length(10),
                Constraint::Length(14),
                Constraint::Length(6),
                Constraint::Length(6),
                Constraint::Min(10),
            ],
        )
        .header(header);
        frame.render_widget(table, table_area);

        let hints = Line::from(vec![
            Span::styled("  j/k ", theme::key_hint_key()),
            Span::styled("select  ", theme::key_hint()),
            Span::styled("t ", theme::key_hint_key()),
            Span::styled("relay  ", theme::key_hint()),
            Span::styled("l ", theme::key_hint_key()),
            Span::styled("set led  ", theme::key_hint()),
            Span::styled("+/- ", theme::key_hint_key()),
            Span::styled("nudge led  ", theme::key_hint()),
            Span::styled("x ", theme::key_hint_key()),
            Span::styled("remove", theme::key_hint()),
        ]);
        frame.render_widget(Paragraph::new(hints), hints_area);

        if let Some(input) = &self.led_input {
            self.render_led_prompt(frame, area, input);
        }
    }

    fn capturing_input(&self) -> bool {
        self.led_input.is_some()
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    fn id(&self) -> &str {
        "Devices"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hearth_core::{DeviceHealth, DeviceId, Telemetry};

    fn device(id: i64, led: Option<u8>) -> Arc<Device> {
        Arc::new(Device {
            id: DeviceId(id),
            name: Some(format!("dev{id}")),
            ip: None,
            role: None,
            position: None,
            health: DeviceHealth::Okay,
            telemetry: Telemetry {
                lightness: None,
                relay: hearth_core::RelayState::Off,
                led: led.map(Brightness::from_raw),
            },
            last_update: None,
        })
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, crossterm::event::KeyModifiers::NONE)
    }

    #[test]
    fn led_prompt_rejects_out_of_range_input() {
        let mut screen = DevicesScreen::new();
        screen.devices = Arc::new(vec![device(1, Some(128))]);

        screen.handle_key_event(key(KeyCode::Char('l'))).expect("open");
        assert!(screen.led_input.is_some());

        // Type "150" over the seeded value.
        if let Some(input) = &mut screen.led_input {
            *input = Input::new("150".into());
        }
        let action = screen.handle_key_event(key(KeyCode::Enter)).expect("submit");
        assert!(matches!(action, Some(Action::Notify(_))));
        assert!(screen.led_input.is_none());
    }

    #[test]
    fn led_prompt_dispatches_scaled_brightness() {
        let mut screen = DevicesScreen::new();
        screen.devices = Arc::new(vec![device(1, Some(128))]);

        screen.handle_key_event(key(KeyCode::Char('l'))).expect("open");
        if let Some(input) = &mut screen.led_input {
            *input = Input::new("50".into());
        }
        let action = screen.handle_key_event(key(KeyCode::Enter)).expect("submit");
        match action {
            Some(Action::Dispatch(Command::SetLed { brightness, .. })) => {
                assert_eq!(brightness.raw(), 128);
            }
            other => panic!("expected SetLed dispatch, got {other:?}"),
        }
    }

    #[test]
    fn selection_survives_shrinking_snapshots() {
        let mut screen = DevicesScreen::new();
        screen.devices = Arc::new(vec![device(1, None), device(2, None)]);
        screen.selected = 1;

        screen
            .update(&Action::DevicesUpdated(Arc::new(vec![device(1, None)])))
            .expect("update");
        assert_eq!(screen.selected, 0);
    }
}
