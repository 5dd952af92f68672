//! Add-device form with a live preview pane.
//!
//! The preview echoes the name and ip as they are typed and swaps the
//! role glyph as the selector changes -- the terminal rendition of the
//! dashboard form's live labels and icon swap. Submission validates
//! locally before anything is transmitted; the hub's rejection message
//! (duplicate IP and friends) comes back as a toast.

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};
use strum::IntoEnumIterator;
use tokio::sync::mpsc::UnboundedSender;
use tui_input::Input;
use tui_input::backend::crossterm::EventHandler;

use hearth_core::{Command, DeviceRole};

use crate::action::{Action, Notification};
use crate::component::Component;
use crate::theme;

/// Which form field holds focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Name,
    Ip,
    Role,
    Submit,
}

impl Field {
    fn next(self) -> Self {
        match self {
            Self::Name => Self::Ip,
            Self::Ip => Self::Role,
            Self::Role => Self::Submit,
            Self::Submit => Self::Name,
        }
    }

    fn prev(self) -> Self {
        match self {
            Self::Name => Self::Submit,
            Self::Ip => Self::Name,
            Self::Role => Self::Ip,
            Self::Submit => Self::Role,
        }
    }
}

pub struct AddDeviceScreen {
    focused: bool,
    name: Input,
    ip: Input,
    role_idx: usize,
    field: Field,
}

impl AddDeviceScreen {
    pub fn new() -> Self {
        Self {
            focused: false,
            name: Input::default(),
            ip: Input::default(),
            role_idx: 0,
            field: Field::Name,
        }
    }

    fn roles() -> Vec<DeviceRole> {
        DeviceRole::iter().collect()
    }

    fn role(&self) -> DeviceRole {
        Self::roles()[self.role_idx % Self::roles().len()]
    }

    fn cycle_role(&mut self, forward: bool) {
        let len = Self::roles().len();
        self.role_idx = if forward {
            (self.role_idx + 1) % len
        } else {
            (self.role_idx + len - 1) % len
        };
    }

    /// Validate and dispatch. Both checks run before any request: the
    /// dashboard shipped whatever was in the form, this client doesn't.
    fn submit(&self) -> Action {
        let name = self.name.value().trim().to_owned();
        let ip = self.ip.value().trim().to_owned();

        if name.is_empty() {
            return Action::Notify(Notification::error("device name must not be empty"));
        }
        if ip.parse::<std::net::IpAddr>().is_err() {
            return Action::Notify(Notification::error(format!(
                "'{ip}' is not a valid IP address"
            )));
        }

        Action::Dispatch(Command::AddDevice {
            name,
            ip,
            role: self.role(),
        })
    }

    fn field_style(&self, field: Field) -> Style {
        if self.field == field && self.focused {
            theme::border_focused()
        } else {
            theme::border_default()
        }
    }

    fn render_input(&self, frame: &mut Frame, area: Rect, title: &str, input: &Input, field: Field) {
        let block = Block::default()
            .title(title.to_owned())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(self.field_style(field));
        let inner = block.inner(area);
        frame.render_widget(block, area);
        frame.render_widget(
            Paragraph::new(input.value()).style(Style::default().fg(theme::DIM_WHITE)),
            inner,
        );
    }
}

impl Component for AddDeviceScreen {
    fn init(&mut self, _action_tx: UnboundedSender<Action>) -> Result<()> {
        Ok(())
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        match key.code {
            KeyCode::Tab => {
                self.field = self.field.next();
                return Ok(None);
            }
            KeyCode::BackTab => {
                self.field = self.field.prev();
                return Ok(None);
            }
            // Leave the form; the app routes every key here while the
            // form captures text, so back-navigation is ours to emit.
            KeyCode::Esc => return Ok(Some(Action::GoBack)),
            _ => {}
        }

        match self.field {
            Field::Name => {
                if key.code == KeyCode::Enter {
                    self.field = Field::Ip;
                } else {
                    self.name.handle_event(&crossterm::event::Event::Key(key));
                }
                Ok(None)
            }
            Field::Ip => {
                if key.code == KeyCode::Enter {
                    self.field = Field::Role;
                } else {
                    self.ip.handle_event(&crossterm::event::Event::Key(key));
                }
                Ok(None)
            }
            Field::Role => match key.code {
                KeyCode::Left | KeyCode::Char('h') => {
                    self.cycle_role(false);
                    Ok(None)
                }
                KeyCode::Right | KeyCode::Char('l') | KeyCode::Char(' ') => {
                    self.cycle_role(true);
                    Ok(None)
                }
                KeyCode::Enter => {
                    self.field = Field::Submit;
                    Ok(None)
                }
                _ => Ok(None),
            },
            Field::Submit => match key.code {
                KeyCode::Enter => Ok(Some(self.submit())),
                _ => Ok(None),
            },
        }
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .title(" Add Device ")
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

        // Form on the left, live preview on the right.
        let columns =
            Layout::horizontal([Constraint::Percentage(55), Constraint::Percentage(45)])
                .split(inner);

        let form_rows = Layout::vertical([
            Constraint::Length(3), // name
            Constraint::Length(3), // ip
            Constraint::Length(3), // role
            Constraint::Length(3), // submit
            Constraint::Min(0),
        ])
        .split(columns[0]);

        self.render_input(frame, form_rows[0], " Name ", &self.name, Field::Name);
        self.render_input(frame, form_rows[1], " IP address ", &self.ip, Field::Ip);

        let role = self.role();
        let role_block = Block::default()
            .title(" Role (←/→) ")
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(self.field_style(Field::Role));
        let role_inner = role_block.inner(form_rows[2]);
        frame.render_widget(role_block, form_rows[2]);
        frame.render_widget(
            Paragraph::new(Line::from(vec![
                Span::styled(
                    theme::role_glyph(Some(role)),
                    Style::default().fg(theme::role_color(Some(role))),
                ),
                Span::raw(" "),
                Span::styled(role.to_string(), Style::default().fg(theme::DIM_WHITE)),
            ])),
            role_inner,
        );

        let submit_block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(self.field_style(Field::Submit));
        let submit_inner = submit_block.inner(form_rows[3]);
        frame.render_widget(submit_block, form_rows[3]);
        frame.render_widget(
            Paragraph::new(Span::styled(" Add device ⏎ ", theme::title_style()))
                .centered(),
            submit_inner,
        );

        // Live preview: name/ip echo + role glyph, updated per keystroke.
        let preview_block = Block::default()
            .title(" Preview ")
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_default());
        let preview_inner = preview_block.inner(columns[1]);
        frame.render_widget(preview_block, columns[1]);

        let shown_name = if self.name.value().is_empty() {
            "(unnamed)"
        } else {
            self.name.value()
        };
        let shown_ip = if self.ip.value().is_empty() {
            "(no address)"
        } else {
            self.ip.value()
        };
        let preview = vec![
            Line::from(""),
            Line::from(vec![
                Span::raw("   "),
                Span::styled(
                    theme::role_glyph(Some(role)),
                    Style::default().fg(theme::role_color(Some(role))),
                ),
                Span::raw("  "),
                Span::styled(shown_name.to_owned(), theme::title_style()),
            ]),
            Line::from(vec![
                Span::raw("      "),
                Span::styled(shown_ip.to_owned(), Style::default().fg(theme::DIM_WHITE)),
            ]),
            Line::from(vec![
                Span::raw("      "),
                Span::styled(
                    format!("{} · icon {}", role, role.icon_name()),
                    theme::key_hint(),
                ),
            ]),
        ];
        frame.render_widget(Paragraph::new(preview), preview_inner);
    }

    fn capturing_input(&self) -> bool {
        true
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    fn id(&self) -> &str {
        "AddDevice"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, crossterm::event::KeyModifiers::NONE)
    }

    fn filled_screen(name: &str, ip: &str) -> AddDeviceScreen {
        let mut screen = AddDeviceScreen::new();
        screen.name = Input::new(name.into());
        screen.ip = Input::new(ip.into());
        screen.field = Field::Submit;
        screen
    }

    #[test]
    fn submit_validates_before_dispatching() {
        let mut screen = filled_screen("", "192.168.1.60");
        let action = screen.handle_key_event(key(KeyCode::Enter)).expect("submit");
        assert!(matches!(action, Some(Action::Notify(_))));

        let mut screen = filled_screen("Hall lamp", "not-an-ip");
        let action = screen.handle_key_event(key(KeyCode::Enter)).expect("submit");
        assert!(matches!(action, Some(Action::Notify(_))));
    }

    #[test]
    fn submit_dispatches_add_device() {
        let mut screen = filled_screen("Hall lamp", "192.168.1.60");
        let action = screen.handle_key_event(key(KeyCode::Enter)).expect("submit");
        match action {
            Some(Action::Dispatch(Command::AddDevice { name, ip, .. })) => {
                assert_eq!(name, "Hall lamp");
                assert_eq!(ip, "192.168.1.60");
            }
            other => panic!("expected AddDevice dispatch, got {other:?}"),
        }
    }

    #[test]
    fn role_selector_cycles_through_all_roles() {
        let mut screen = AddDeviceScreen::new();
        screen.field = Field::Role;
        let first = screen.role();
        for _ in 0..AddDeviceScreen::roles().len() {
            screen.handle_key_event(key(KeyCode::Right)).expect("cycle");
        }
        assert_eq!(screen.role(), first);
    }
}
