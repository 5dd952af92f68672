//! Application core — event loop, screen management, action dispatch.

use std::collections::HashMap;
use std::time::Duration;

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Tabs},
};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use hearth_core::{Command, Hub, MapBounds};

use crate::action::{Action, Notification, NotificationLevel};
use crate::component::Component;
use crate::data_bridge::spawn_data_bridge;
use crate::event::{Event, EventReader};
use crate::screen::ScreenId;
use crate::screens::create_screens;
use crate::theme;
use crate::tui::Tui;

/// Toast lifetime in ticks (4 Hz ticks → 3 seconds).
const NOTIFICATION_TICKS: u8 = 12;

/// Connection status as seen by the TUI.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ConnectionStatus {
    #[default]
    Disconnected,
    Connecting,
    Connected,
}

/// Top-level application state and event loop.
pub struct App {
    /// Current active screen.
    active_screen: ScreenId,
    /// Previous screen for GoBack.
    previous_screen: Option<ScreenId>,
    /// All screen components, keyed by ScreenId.
    screens: HashMap<ScreenId, Box<dyn Component>>,
    /// Whether the app should keep running.
    running: bool,
    connection_status: ConnectionStatus,
    /// Mirror of the poller's auto-update gate, for the status bar.
    auto_update: bool,
    help_visible: bool,
    /// Active toast and its remaining ticks.
    notification: Option<Notification>,
    notification_ttl: u8,
    device_count: usize,
    event_count: usize,
    terminal_size: (u16, u16),
    /// Action sender — components and tasks dispatch through this.
    action_tx: mpsc::UnboundedSender<Action>,
    /// Action receiver — main loop drains this.
    action_rx: mpsc::UnboundedReceiver<Action>,
    hub: Option<Hub>,
    bridge_cancel: CancellationToken,
}

impl App {
    /// Create a new App. With no hub the UI still runs, permanently
    /// disconnected, so flag mistakes fail visibly rather than at a
    /// blank terminal.
    pub fn new(hub: Option<Hub>) -> Self {
        let (action_tx, action_rx) = mpsc::unbounded_channel();

        let bounds = hub
            .as_ref()
            .map_or_else(MapBounds::default, |h| h.config().map);
        let screens: HashMap<ScreenId, Box<dyn Component>> =
            create_screens(bounds).into_iter().collect();

        Self {
            active_screen: ScreenId::Map,
            previous_screen: None,
            screens,
            running: true,
            connection_status: ConnectionStatus::default(),
            auto_update: true,
            help_visible: false,
            notification: None,
            notification_ttl: 0,
            device_count: 0,
            event_count: 0,
            terminal_size: (0, 0),
            action_tx,
            action_rx,
            hub,
            bridge_cancel: CancellationToken::new(),
        }
    }

    /// Initialize all screen components with the action sender.
    fn init_screens(&mut self) -> Result<()> {
        for screen in self.screens.values_mut() {
            screen.init(self.action_tx.clone())?;
        }
        if let Some(screen) = self.screens.get_mut(&self.active_screen) {
            screen.set_focused(true);
        }
        Ok(())
    }

    /// Run the main event loop. This is the heart of the TUI.
    pub async fn run(&mut self) -> Result<()> {
        let mut tui = Tui::new()?;
        tui.enter()?;
        self.terminal_size = tui.size().unwrap_or((80, 24));
        self.init_screens()?;

        // Bridge hub streams into the action channel.
        if let Some(hub) = &self.hub {
            tokio::spawn(spawn_data_bridge(
                hub.clone(),
                self.action_tx.clone(),
                self.bridge_cancel.clone(),
            ));
        } else {
            let _ = self.action_tx.send(Action::Notify(Notification::error(
                "no hub configured — pass --hub or run `hearth config init`",
            )));
        }

        let mut events = EventReader::new(
            Duration::from_millis(250), // 4 Hz tick
            Duration::from_millis(33),  // ~30 FPS render
        );

        info!("TUI event loop started");

        while self.running {
            // 1. Wait for the next event
            let Some(event) = events.next().await else {
                break;
            };

            // 2. Map event → action(s)
            match event {
                Event::Key(key) => {
                    if let Some(action) = self.handle_key_event(key)? {
                        self.action_tx.send(action)?;
                    }
                }
                Event::Mouse(mouse) => {
                    if let Some(action) = self.handle_mouse_event(mouse)? {
                        self.action_tx.send(action)?;
                    }
                }
                Event::Resize(w, h) => {
                    self.action_tx.send(Action::Resize(w, h))?;
                }
                Event::Tick => {
                    self.action_tx.send(Action::Tick)?;
                }
                Event::Render => {
                    self.action_tx.send(Action::Render)?;
                }
            }

            // 3. Drain and process all queued actions
            while let Ok(action) = self.action_rx.try_recv() {
                self.process_action(&action)?;

                if let Action::Render = action {
                    tui.draw(|frame| self.render(frame))?;
                }
            }
        }

        events.stop();
        self.bridge_cancel.cancel();
        info!("TUI event loop ended");
        Ok(())
    }

    /// Whether the active screen is capturing free-form text (forms and
    /// prompts): global character shortcuts must stand down.
    fn text_capture_active(&self) -> bool {
        self.screens
            .get(&self.active_screen)
            .is_some_and(|s| s.capturing_input())
    }

    /// Map a key event to an action. Global keys are handled here;
    /// screen-specific keys are delegated to the active screen component.
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if self.help_visible {
            return match key.code {
                KeyCode::Esc | KeyCode::Char('?') => Ok(Some(Action::ToggleHelp)),
                _ => Ok(None),
            };
        }

        // Ctrl+C always quits, even mid-form.
        if key.modifiers == KeyModifiers::CONTROL && key.code == KeyCode::Char('c') {
            return Ok(Some(Action::Quit));
        }

        // While a form captures text, every remaining key belongs to the
        // screen (Esc included: the screen decides between closing its
        // prompt and navigating back).
        if self.text_capture_active() {
            if let Some(screen) = self.screens.get_mut(&self.active_screen) {
                return screen.handle_key_event(key);
            }
            return Ok(None);
        }

        // Global keybindings
        match (key.modifiers, key.code) {
            (KeyModifiers::NONE, KeyCode::Char('q')) => return Ok(Some(Action::Quit)),

            (KeyModifiers::NONE | KeyModifiers::SHIFT, KeyCode::Char('?')) => {
                return Ok(Some(Action::ToggleHelp));
            }

            // Screen navigation via number keys
            (KeyModifiers::NONE, KeyCode::Char(c @ '1'..='4')) => {
                let n = c as u8 - b'0';
                if let Some(screen) = ScreenId::from_number(n) {
                    return Ok(Some(Action::SwitchScreen(screen)));
                }
            }

            // Tab / Shift+Tab for screen cycling
            (KeyModifiers::NONE, KeyCode::Tab) => {
                return Ok(Some(Action::SwitchScreen(self.active_screen.next())));
            }
            (KeyModifiers::SHIFT, KeyCode::BackTab) => {
                return Ok(Some(Action::SwitchScreen(self.active_screen.prev())));
            }

            // Esc — context-dependent back
            (KeyModifiers::NONE, KeyCode::Esc) => return Ok(Some(Action::GoBack)),

            _ => {}
        }

        // Delegate to active screen component
        if let Some(screen) = self.screens.get_mut(&self.active_screen) {
            return screen.handle_key_event(key);
        }

        Ok(None)
    }

    /// Handle mouse events (delegate to active screen).
    fn handle_mouse_event(&mut self, mouse: MouseEvent) -> Result<Option<Action>> {
        if let Some(screen) = self.screens.get_mut(&self.active_screen) {
            return screen.handle_mouse_event(mouse);
        }
        Ok(None)
    }

    /// Execute a hub command off the UI thread; the outcome comes back
    /// through the action channel as a toast. Adding a device also
    /// returns to the map on success (the dashboard's redirect).
    fn dispatch_command(&self, cmd: Command) {
        let Some(hub) = self.hub.clone() else {
            let _ = self
                .action_tx
                .send(Action::Notify(Notification::error("not connected to a hub")));
            return;
        };
        let tx = self.action_tx.clone();
        let is_add = matches!(cmd, Command::AddDevice { .. });

        tokio::spawn(async move {
            match hub.execute(cmd).await {
                Ok(result) => {
                    let msg = result.message().unwrap_or("done").to_owned();
                    let _ = tx.send(Action::Notify(Notification::success(msg)));
                    if is_add {
                        let _ = tx.send(Action::SwitchScreen(ScreenId::Map));
                    }
                }
                Err(e) => {
                    let _ = tx.send(Action::Notify(Notification::error(e.to_string())));
                }
            }
        });
    }

    /// Process a single action — update app state and propagate to
    /// components.
    fn process_action(&mut self, action: &Action) -> Result<()> {
        match action {
            Action::Quit => {
                self.running = false;
            }

            Action::Resize(w, h) => {
                self.terminal_size = (*w, *h);
            }

            Action::SwitchScreen(target) => {
                if *target != self.active_screen {
                    debug!("switching screen: {} → {}", self.active_screen, target);
                    if let Some(screen) = self.screens.get_mut(&self.active_screen) {
                        screen.set_focused(false);
                    }
                    self.previous_screen = Some(self.active_screen);
                    self.active_screen = *target;
                    if let Some(screen) = self.screens.get_mut(&self.active_screen) {
                        screen.set_focused(true);
                    }
                }
            }

            Action::GoBack => {
                if let Some(prev) = self.previous_screen.take() {
                    self.action_tx.send(Action::SwitchScreen(prev))?;
                }
            }

            Action::ToggleHelp => {
                self.help_visible = !self.help_visible;
            }

            Action::Connected => {
                self.connection_status = ConnectionStatus::Connected;
            }
            Action::Connecting => {
                self.connection_status = ConnectionStatus::Connecting;
            }
            Action::Disconnected(reason) => {
                self.connection_status = ConnectionStatus::Disconnected;
                self.action_tx
                    .send(Action::Notify(Notification::error(reason.clone())))?;
            }

            Action::ToggleAutoUpdate => {
                if let Some(hub) = &self.hub {
                    let enabled = !hub.auto_update_enabled();
                    hub.set_auto_update(enabled);
                }
            }
            Action::AutoUpdateChanged(enabled) => {
                self.auto_update = *enabled;
            }

            Action::Dispatch(cmd) => {
                self.dispatch_command(cmd.clone());
            }

            Action::Notify(notification) => {
                self.notification = Some(notification.clone());
                self.notification_ttl = NOTIFICATION_TICKS;
            }
            Action::DismissNotification => {
                self.notification = None;
                self.notification_ttl = 0;
            }

            Action::Tick => {
                if self.notification.is_some() {
                    self.notification_ttl = self.notification_ttl.saturating_sub(1);
                    if self.notification_ttl == 0 {
                        self.notification = None;
                    }
                }
            }

            // Data updates go to every screen so none render stale rows.
            Action::DevicesUpdated(devices) => {
                self.device_count = devices.len();
                for screen in self.screens.values_mut() {
                    screen.update(action)?;
                }
            }
            Action::EventsUpdated(events) => {
                self.event_count = events.len();
                for screen in self.screens.values_mut() {
                    screen.update(action)?;
                }
            }

            // Render is handled in the main loop, not here
            Action::Render => {}
        }

        Ok(())
    }

    /// Render the full application frame.
    fn render(&self, frame: &mut Frame) {
        let area = frame.area();

        // Layout: [screen content] [tab bar] [status bar]
        let layout = Layout::vertical([
            Constraint::Min(1),    // Screen content
            Constraint::Length(1), // Tab bar
            Constraint::Length(1), // Status bar
        ])
        .split(area);

        if let Some(screen) = self.screens.get(&self.active_screen) {
            screen.render(frame, layout[0]);
        }

        self.render_tab_bar(frame, layout[1]);
        self.render_status_bar(frame, layout[2]);

        if self.help_visible {
            self.render_help_overlay(frame, area);
        }
    }

    /// Render the bottom tab bar showing all screens.
    fn render_tab_bar(&self, frame: &mut Frame, area: Rect) {
        let titles: Vec<Line> = ScreenId::ALL
            .iter()
            .map(|&id| {
                let style = if id == self.active_screen {
                    theme::tab_active()
                } else {
                    theme::tab_inactive()
                };
                Line::from(Span::styled(
                    format!(" {} {} ", id.number(), id.label()),
                    style,
                ))
            })
            .collect();

        let tabs = Tabs::new(titles)
            .divider(Span::styled(" ", theme::key_hint()))
            .select(
                ScreenId::ALL
                    .iter()
                    .position(|&s| s == self.active_screen)
                    .unwrap_or(0),
            );

        frame.render_widget(tabs, area);
    }

    /// Render the bottom status bar: connection, auto-update gate,
    /// counters, and either the active toast or key hints.
    fn render_status_bar(&self, frame: &mut Frame, area: Rect) {
        let connection_indicator = match &self.connection_status {
            ConnectionStatus::Connected => {
                Span::styled("● connected", Style::default().fg(theme::SUCCESS_GREEN))
            }
            ConnectionStatus::Disconnected => {
                Span::styled("○ disconnected", Style::default().fg(theme::ERROR_RED))
            }
            ConnectionStatus::Connecting => {
                Span::styled("◐ connecting", Style::default().fg(theme::FLAME_YELLOW))
            }
        };

        let auto_indicator = if self.auto_update {
            Span::styled(" ⟳ auto", Style::default().fg(theme::SUCCESS_GREEN))
        } else {
            Span::styled(" ⏸ paused", Style::default().fg(theme::FLAME_YELLOW))
        };

        let counters = Span::styled(
            format!(
                " │ {} device{} · {} event{}",
                self.device_count,
                if self.device_count == 1 { "" } else { "s" },
                self.event_count,
                if self.event_count == 1 { "" } else { "s" },
            ),
            theme::key_hint(),
        );

        let tail = match &self.notification {
            Some(n) => {
                let color = match n.level {
                    NotificationLevel::Success => theme::SUCCESS_GREEN,
                    NotificationLevel::Error => theme::ERROR_RED,
                    NotificationLevel::Info => theme::SKY_BLUE,
                };
                Span::styled(format!(" │ {}", n.message), Style::default().fg(color))
            }
            None => Span::styled(" │ ? help  q quit", theme::key_hint()),
        };

        let line = Line::from(vec![
            Span::raw(" "),
            connection_indicator,
            auto_indicator,
            counters,
            tail,
        ]);

        frame.render_widget(Paragraph::new(line), area);
    }

    /// Render the help overlay centered on screen.
    fn render_help_overlay(&self, frame: &mut Frame, area: Rect) {
        let help_width = 58u16.min(area.width.saturating_sub(4));
        let help_height = 18u16.min(area.height.saturating_sub(4));

        let x = (area.width.saturating_sub(help_width)) / 2;
        let y = (area.height.saturating_sub(help_height)) / 2;
        let help_area = Rect::new(area.x + x, area.y + y, help_width, help_height);

        frame.render_widget(
            Block::default().style(Style::default().bg(theme::BG_DARK)),
            help_area,
        );

        let block = Block::default()
            .title(" Keyboard Shortcuts ")
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_focused());

        let inner = block.inner(help_area);
        frame.render_widget(block, help_area);

        let help_text = vec![
            Line::from(""),
            Line::from(Span::styled("  Navigation", Style::default().fg(theme::EMBER_ORANGE))),
            Line::from(vec![
                Span::styled("  1-4       ", theme::key_hint_key()),
                Span::styled("Jump to screen", theme::key_hint()),
            ]),
            Line::from(vec![
                Span::styled("  Tab       ", theme::key_hint_key()),
                Span::styled("Next screen", theme::key_hint()),
            ]),
            Line::from(vec![
                Span::styled("  j/k ↑/↓   ", theme::key_hint_key()),
                Span::styled("Select device / event", theme::key_hint()),
            ]),
            Line::from(vec![
                Span::styled("  Esc       ", theme::key_hint_key()),
                Span::styled("Back / close", theme::key_hint()),
            ]),
            Line::from(""),
            Line::from(Span::styled("  Devices", Style::default().fg(theme::EMBER_ORANGE))),
            Line::from(vec![
                Span::styled("  drag      ", theme::key_hint_key()),
                Span::styled("Move marker on the map", theme::key_hint()),
            ]),
            Line::from(vec![
                Span::styled("  t         ", theme::key_hint_key()),
                Span::styled("Toggle relay          ", theme::key_hint()),
                Span::styled("x  ", theme::key_hint_key()),
                Span::styled("Remove", theme::key_hint()),
            ]),
            Line::from(vec![
                Span::styled("  l         ", theme::key_hint_key()),
                Span::styled("Set LED brightness    ", theme::key_hint()),
                Span::styled("+/-  ", theme::key_hint_key()),
                Span::styled("Nudge LED", theme::key_hint()),
            ]),
            Line::from(vec![
                Span::styled("  u         ", theme::key_hint_key()),
                Span::styled("Toggle auto-update polling", theme::key_hint()),
            ]),
            Line::from(""),
            Line::from(Span::styled(
                "                        Esc or ? to close",
                theme::key_hint(),
            )),
        ];

        frame.render_widget(Paragraph::new(help_text), inner);
    }
}
