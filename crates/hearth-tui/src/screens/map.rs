//! Map screen — canvas of draggable device markers.
//!
//! The terminal analogue of the dashboard's floor-plan view: one marker
//! per device, positioned in logical map pixels, dragged with the mouse.
//! Dragging runs through an explicit [`DragSession`] owned by this
//! screen; mouse-up tears it down and persists the clamped position.

use std::cell::Cell;
use std::sync::Arc;

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::canvas::{Canvas, Context, Rectangle};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};
use tokio::sync::mpsc::UnboundedSender;

use hearth_core::{Command, Device, MapBounds, Position};

use crate::action::Action;
use crate::component::Component;
use crate::drag::DragSession;
use crate::theme;

/// Marker footprint in logical map pixels.
const MARKER_W: f64 = 120.0;
const MARKER_H: f64 = 60.0;

pub struct MapScreen {
    focused: bool,
    devices: Arc<Vec<Arc<Device>>>,
    bounds: MapBounds,
    selected: usize,
    /// The active drag, if any. Exactly one can exist at a time.
    drag: Option<DragSession>,
    /// Canvas area from the last render, for cell → pixel mapping.
    content_area: Cell<Rect>,
}

impl MapScreen {
    pub fn new(bounds: MapBounds) -> Self {
        Self {
            focused: false,
            devices: Arc::new(Vec::new()),
            bounds,
            selected: 0,
            drag: None,
            content_area: Cell::new(Rect::default()),
        }
    }

    /// Committed marker position: stored position, or a deterministic
    /// grid slot for devices that have never been placed.
    fn marker_position(&self, device: &Device, index: usize) -> Position {
        let pos = device.position.unwrap_or_else(|| self.grid_slot(index));
        self.bounds.clamp(pos, MARKER_W, MARKER_H)
    }

    /// Displayed marker position: the live drag position wins while a
    /// drag is in flight.
    fn display_position(&self, device: &Device, index: usize) -> Position {
        if let Some(drag) = &self.drag {
            if drag.device() == device.id {
                return drag.position();
            }
        }
        self.marker_position(device, index)
    }

    #[allow(clippy::cast_precision_loss, clippy::cast_sign_loss, clippy::cast_possible_truncation)]
    fn grid_slot(&self, index: usize) -> Position {
        let cols = ((self.bounds.width / (MARKER_W * 1.5)).floor().max(1.0)) as usize;
        let col = index % cols;
        let row = index / cols;
        Position::new(
            20.0 + col as f64 * MARKER_W * 1.5,
            20.0 + row as f64 * MARKER_H * 2.0,
        )
    }

    /// Translate a terminal cell to logical map pixels. `None` when the
    /// cursor is outside the canvas.
    fn cursor_to_map(&self, column: u16, row: u16) -> Option<Position> {
        let area = self.content_area.get();
        if area.width == 0
            || area.height == 0
            || column < area.x
            || column >= area.x + area.width
            || row < area.y
            || row >= area.y + area.height
        {
            return None;
        }
        let fx = f64::from(column - area.x) / f64::from(area.width) * self.bounds.width;
        let fy = f64::from(row - area.y) / f64::from(area.height) * self.bounds.height;
        Some(Position::new(fx, fy))
    }

    /// Topmost marker under the cursor, with its index.
    fn hit_test(&self, cursor: Position) -> Option<(usize, Arc<Device>)> {
        self.devices
            .iter()
            .enumerate()
            .rev()
            .find(|(i, d)| {
                let pos = self.display_position(d, *i);
                cursor.x >= pos.x
                    && cursor.x <= pos.x + MARKER_W
                    && cursor.y >= pos.y
                    && cursor.y <= pos.y + MARKER_H
            })
            .map(|(i, d)| (i, Arc::clone(d)))
    }

    fn selected_device(&self) -> Option<&Arc<Device>> {
        self.devices.get(self.selected)
    }

    /// Nudge the selected marker and persist immediately (the keyboard
    /// path commits per keypress; the mouse path commits on release).
    fn nudge_selected(&self, dx: f64, dy: f64) -> Option<Action> {
        let device = self.selected_device()?;
        let pos = self.marker_position(device, self.selected);
        let target = Position::new(pos.x + dx, pos.y + dy);
        let clamped = self.bounds.clamp(target, MARKER_W, MARKER_H);
        Some(Action::Dispatch(Command::SetPosition {
            id: device.id,
            position: clamped,
        }))
    }

    fn led_step(&self, delta: i8) -> Option<Action> {
        let device = self.selected_device()?;
        let current = device.telemetry.led?;
        Some(Action::Dispatch(Command::SetLed {
            id: device.id,
            brightness: current.step_percent(delta),
        }))
    }

    fn paint_marker(&self, ctx: &mut Context<'_>, device: &Device, index: usize) {
        let pos = self.display_position(device, index);
        // Canvas y grows upward; positions grow downward from the top.
        let canvas_y = self.bounds.height - pos.y - MARKER_H;

        let accent = theme::role_color(device.role);
        let color = if device.health.error().is_some() {
            theme::ERROR_RED
        } else {
            accent
        };
        let selected = index == self.selected;

        ctx.draw(&Rectangle {
            x: pos.x,
            y: canvas_y,
            width: MARKER_W,
            height: MARKER_H,
            color: if selected { theme::FLAME_YELLOW } else { color },
        });

        let name: String = device.display_name().chars().take(14).collect();
        let label = format!("{} {}", theme::role_glyph(device.role), name);
        ctx.print(
            pos.x + 4.0,
            canvas_y + MARKER_H - 14.0,
            Span::styled(label, Style::default().fg(color)),
        );

        let mut readout = format!("relay {}", device.telemetry.relay);
        if let Some(led) = device.telemetry.led {
            readout.push_str(&format!("  led {led}"));
        }
        ctx.print(
            pos.x + 4.0,
            canvas_y + 6.0,
            Span::styled(readout, Style::default().fg(theme::DIM_WHITE)),
        );
    }
}

impl Component for MapScreen {
    fn init(&mut self, _action_tx: UnboundedSender<Action>) -> Result<()> {
        Ok(())
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        match key.code {
            // Selection
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

            // Keyboard repositioning (20px steps)
            KeyCode::Char('h') | KeyCode::Left => Ok(self.nudge_selected(-20.0, 0.0)),
            KeyCode::Char('l') | KeyCode::Right => Ok(self.nudge_selected(20.0, 0.0)),
            KeyCode::Char('H') => Ok(self.nudge_selected(0.0, -20.0)),
            KeyCode::Char('L') => Ok(self.nudge_selected(0.0, 20.0)),

            // Poller gate
            KeyCode::Char('u') => Ok(Some(Action::ToggleAutoUpdate)),

            // Device commands
            KeyCode::Char('t') => Ok(self
                .selected_device()
                .map(|d| Action::Dispatch(Command::ToggleRelay { id: d.id }))),
            KeyCode::Char('x') => Ok(self
                .selected_device()
                .map(|d| Action::Dispatch(Command::RemoveDevice { id: d.id }))),
            KeyCode::Char('+') | KeyCode::Char('=') => Ok(self.led_step(5)),
            KeyCode::Char('-') => Ok(self.led_step(-5)),

            _ => Ok(None),
        }
    }

    fn handle_mouse_event(&mut self, mouse: MouseEvent) -> Result<Option<Action>> {
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                let Some(cursor) = self.cursor_to_map(mouse.column, mouse.row) else {
                    return Ok(None);
                };
                if let Some((index, device)) = self.hit_test(cursor) {
                    self.selected = index;
                    let marker = self.marker_position(&device, index);
                    self.drag = Some(DragSession::begin(
                        device.id, marker, cursor, MARKER_W, MARKER_H,
                    ));
                }
                Ok(None)
            }

            MouseEventKind::Drag(MouseButton::Left) => {
                if let Some(cursor) = self.cursor_to_map(mouse.column, mouse.row) {
                    if let Some(drag) = &mut self.drag {
                        drag.update(cursor, &self.bounds);
                    }
                }
                Ok(None)
            }

            MouseEventKind::Up(MouseButton::Left) => {
                // Releases with no active session are ignored.
                let Some(drag) = self.drag.take() else {
                    return Ok(None);
                };
                let (id, position) = drag.finish();
                Ok(Some(Action::Dispatch(Command::SetPosition {
                    id,
                    position,
                })))
            }

            _ => Ok(None),
        }
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        if let Action::DevicesUpdated(devices) = action {
            self.devices = Arc::clone(devices);
            if self.selected >= self.devices.len() {
                self.selected = self.devices.len().saturating_sub(1);
            }
            // Drop a drag whose device vanished mid-gesture.
            if let Some(drag) = &self.drag {
                let device = drag.device();
                if !self.devices.iter().any(|d| d.id == device) {
                    self.drag = None;
                }
            }
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let title = format!(
            " Map  ·  {} device{} ",
            self.devices.len(),
            if self.devices.len() == 1 { "" } else { "s" }
        );
        let block = Block::default()
            .title(title)
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

        let content_area = Rect {
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
        self.content_area.set(content_area);

        let canvas = Canvas::default()
            .x_bounds([0.0, self.bounds.width])
            .y_bounds([0.0, self.bounds.height])
            .paint(|ctx: &mut Context<'_>| {
                for (index, device) in self.devices.iter().enumerate() {
                    self.paint_marker(ctx, device, index);
                }
            });
        frame.render_widget(canvas, content_area);

        let hints = Line::from(vec![
            Span::styled("  drag ", theme::key_hint_key()),
            Span::styled("move  ", theme::key_hint()),
            Span::styled("j/k ", theme::key_hint_key()),
            Span::styled("select  ", theme::key_hint()),
            Span::styled("t ", theme::key_hint_key()),
            Span::styled("relay  ", theme::key_hint()),
            Span::styled("+/- ", theme::key_hint_key()),
            Span::styled("led  ", theme::key_hint()),
            Span::styled("x ", theme::key_hint_key()),
            Span::styled("remove  ", theme::key_hint()),
            Span::styled("u ", theme::key_hint_key()),
            Span::styled("auto-update", theme::key_hint()),
        ]);
        frame.render_widget(Paragraph::new(hints), hints_area);
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    fn id(&self) -> &str {
        "Map"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hearth_core::{DeviceHealth, DeviceId, Telemetry};

    fn device(id: i64, position: Option<Position>) -> Arc<Device> {
        Arc::new(Device {
            id: DeviceId(id),
            name: Some(format!("dev{id}")),
            ip: None,
            role: None,
            position,
            health: DeviceHealth::Okay,
            telemetry: Telemetry::default(),
            last_update: None,
        })
    }

    fn screen_with(devices: Vec<Arc<Device>>) -> MapScreen {
        let mut screen = MapScreen::new(MapBounds::new(500.0, 300.0));
        screen.devices = Arc::new(devices);
        screen.content_area.set(Rect::new(0, 0, 100, 30));
        screen
    }

    #[test]
    fn cursor_maps_into_logical_pixels() {
        let screen = screen_with(vec![]);
        let pos = screen.cursor_to_map(50, 15).expect("inside the canvas");
        assert!((pos.x - 250.0).abs() < 1.0e-9);
        assert!((pos.y - 150.0).abs() < 1.0e-9);
        assert!(screen.cursor_to_map(100, 0).is_none());
    }

    #[test]
    fn hit_test_finds_the_marker() {
        let screen = screen_with(vec![device(1, Some(Position::new(100.0, 100.0)))]);
        let hit = screen.hit_test(Position::new(110.0, 110.0));
        assert_eq!(hit.map(|(_, d)| d.id), Some(DeviceId(1)));
        assert!(screen.hit_test(Position::new(0.0, 0.0)).is_none());
    }

    #[test]
    fn drag_release_dispatches_clamped_position() {
        let mut screen = screen_with(vec![device(1, Some(Position::new(100.0, 100.0)))]);

        // Press inside the marker (cells 0..100 map to 0..500 px).
        screen
            .handle_mouse_event(MouseEvent {
                kind: MouseEventKind::Down(MouseButton::Left),
                column: 22,
                row: 11,
                modifiers: crossterm::event::KeyModifiers::NONE,
            })
            .expect("mouse down");
        assert!(screen.drag.is_some());

        // Drag far past the right edge.
        screen
            .handle_mouse_event(MouseEvent {
                kind: MouseEventKind::Drag(MouseButton::Left),
                column: 99,
                row: 11,
                modifiers: crossterm::event::KeyModifiers::NONE,
            })
            .expect("mouse drag");

        let action = screen
            .handle_mouse_event(MouseEvent {
                kind: MouseEventKind::Up(MouseButton::Left),
                column: 99,
                row: 11,
                modifiers: crossterm::event::KeyModifiers::NONE,
            })
            .expect("mouse up");

        match action {
            Some(Action::Dispatch(Command::SetPosition { id, position })) => {
                assert_eq!(id, DeviceId(1));
                // 500-wide map, 120-wide marker: x pins at 380.
                assert!(position.x <= 380.0 + 1.0e-9);
            }
            other => panic!("expected SetPosition dispatch, got {other:?}"),
        }
        assert!(screen.drag.is_none());
    }

    #[test]
    fn release_without_session_is_ignored() {
        let mut screen = screen_with(vec![]);
        let action = screen
            .handle_mouse_event(MouseEvent {
                kind: MouseEventKind::Up(MouseButton::Left),
                column: 10,
                row: 10,
                modifiers: crossterm::event::KeyModifiers::NONE,
            })
            .expect("mouse up");
        assert!(action.is_none());
    }
}
