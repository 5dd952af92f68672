//! Events screen — scheduled timed events known to this session.

use std::sync::Arc;

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Constraint, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph, Row, Table};
use tokio::sync::mpsc::UnboundedSender;

use hearth_core::{Command, TimedEvent};

use crate::action::Action;
use crate::component::Component;
use crate::theme;

pub struct EventsScreen {
    focused: bool,
    events: Arc<Vec<Arc<TimedEvent>>>,
    selected: usize,
}

impl EventsScreen {
    pub fn new() -> Self {
        Self {
            focused: false,
            events: Arc::new(Vec::new()),
            selected: 0,
        }
    }

    fn selected_event(&self) -> Option<&Arc<TimedEvent>> {
        self.events.get(self.selected)
    }
}

impl Component for EventsScreen {
    fn init(&mut self, _action_tx: UnboundedSender<Action>) -> Result<()> {
        Ok(())
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => {
                if !self.events.is_empty() {
                    self.selected = (self.selected + 1) % self.events.len();
                }
                Ok(None)
            }
            KeyCode::Char('k') | KeyCode::Up => {
                if !self.events.is_empty() {
                    self.selected = (self.selected + self.events.len() - 1) % self.events.len();
                }
                Ok(None)
            }
            KeyCode::Char('x') => Ok(self
                .selected_event()
                .map(|e| Action::Dispatch(Command::RemoveEvent { id: e.id }))),
            _ => Ok(None),
        }
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        if let Action::EventsUpdated(events) = action {
            self.events = Arc::clone(events);
            if self.selected >= self.events.len() {
                self.selected = self.events.len().saturating_sub(1);
            }
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .title(format!(" Events ({}) ", self.events.len()))
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

        if self.events.is_empty() {
            let empty = Paragraph::new(Line::from(Span::styled(
                "  No timed events scheduled this session.  Schedule one with: hearth events add",
                theme::key_hint(),
            )));
            frame.render_widget(empty, table_area);
        } else {
            let header = Row::new(vec!["ID", "Device", "Action", "Time"])
                .style(theme::table_header());
            let rows: Vec<Row> = self
                .events
                .iter()
                .enumerate()
                .map(|(i, e)| {
                    let style = if i == self.selected && self.focused {
                        theme::table_selected()
                    } else {
                        theme::table_row()
                    };
                    Row::new(vec![
                        e.id.to_string(),
                        e.device.to_string(),
                        e.kind.label().to_owned(),
                        e.wire_time(),
                    ])
                    .style(style)
                })
                .collect();

            let table = Table::new(
                rows,
                [
                    Constraint::Length(10),
                    Constraint::Length(8),
                    Constraint::Length(20),
                    Constraint::Length(7),
                ],
            )
            .header(header);
            frame.render_widget(table, table_area);
        }

        let hints = Line::from(vec![
            Span::styled("  j/k ", theme::key_hint_key()),
            Span::styled("select  ", theme::key_hint()),
            Span::styled("x ", theme::key_hint_key()),
            Span::styled("remove", theme::key_hint()),
        ]);
        frame.render_widget(Paragraph::new(hints), hints_area);
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    fn id(&self) -> &str {
        "Events"
    }
}
