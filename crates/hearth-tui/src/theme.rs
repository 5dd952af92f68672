//! Warm "ember" palette and semantic styling for the TUI.

use ratatui::style::{Color, Modifier, Style};

use hearth_core::DeviceRole;

// ── Core Palette ──────────────────────────────────────────────────────

pub const EMBER_ORANGE: Color = Color::Rgb(255, 140, 66); // #ff8c42
pub const FLAME_YELLOW: Color = Color::Rgb(255, 202, 58); // #ffca3a
pub const SUCCESS_GREEN: Color = Color::Rgb(138, 201, 38); // #8ac926
pub const ERROR_RED: Color = Color::Rgb(255, 89, 94); // #ff595e
pub const SKY_BLUE: Color = Color::Rgb(102, 192, 244); // #66c0f4

// ── Extended Palette ──────────────────────────────────────────────────

pub const DIM_WHITE: Color = Color::Rgb(205, 200, 190); // #cdc8be
pub const BORDER_GRAY: Color = Color::Rgb(110, 104, 96); // #6e6860
pub const BG_HIGHLIGHT: Color = Color::Rgb(48, 42, 38); // #302a26
pub const BG_DARK: Color = Color::Rgb(30, 27, 24); // #1e1b18

// ── Role glyphs ───────────────────────────────────────────────────────

/// Marker glyph per device role; unknown roles get the fallback, the way
/// the hub dashboard falls back to its question-mark icon.
pub fn role_glyph(role: Option<DeviceRole>) -> &'static str {
    match role {
        Some(DeviceRole::Mixed) => "◆",
        Some(DeviceRole::Led) => "✳",
        Some(DeviceRole::Relay) => "⇌",
        Some(DeviceRole::Sensor) => "↗",
        None => "?",
    }
}

/// Accent color per device role.
pub fn role_color(role: Option<DeviceRole>) -> Color {
    match role {
        Some(DeviceRole::Mixed) => EMBER_ORANGE,
        Some(DeviceRole::Led) => FLAME_YELLOW,
        Some(DeviceRole::Relay) => SKY_BLUE,
        Some(DeviceRole::Sensor) => SUCCESS_GREEN,
        None => DIM_WHITE,
    }
}

// ── Semantic Styles ───────────────────────────────────────────────────

/// Title text for blocks/panels.
pub fn title_style() -> Style {
    Style::default()
        .fg(EMBER_ORANGE)
        .add_modifier(Modifier::BOLD)
}

/// Border for a focused panel.
pub fn border_focused() -> Style {
    Style::default().fg(FLAME_YELLOW)
}

/// Border for an unfocused panel.
pub fn border_default() -> Style {
    Style::default().fg(BORDER_GRAY)
}

/// Table header row.
pub fn table_header() -> Style {
    Style::default()
        .fg(EMBER_ORANGE)
        .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
}

/// Normal table row text.
pub fn table_row() -> Style {
    Style::default().fg(DIM_WHITE)
}

/// Selected / highlighted table row.
pub fn table_selected() -> Style {
    Style::default()
        .fg(FLAME_YELLOW)
        .bg(BG_HIGHLIGHT)
        .add_modifier(Modifier::BOLD)
}

/// Active tab in the tab bar.
pub fn tab_active() -> Style {
    Style::default()
        .fg(FLAME_YELLOW)
        .add_modifier(Modifier::BOLD)
}

/// Inactive tab in the tab bar.
pub fn tab_inactive() -> Style {
    Style::default().fg(DIM_WHITE)
}

/// Key hint text (e.g., "q quit  ? help").
pub fn key_hint() -> Style {
    Style::default().fg(BORDER_GRAY)
}

/// Key hint key character.
pub fn key_hint_key() -> Style {
    Style::default()
        .fg(EMBER_ORANGE)
        .add_modifier(Modifier::BOLD)
}
