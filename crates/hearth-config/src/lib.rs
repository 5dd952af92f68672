//! Shared configuration for the hearth CLI and TUI.
//!
//! TOML profiles and translation to `hearth_core::HubConfig`. Both
//! binaries depend on this crate -- the CLI adds flag-aware overrides on
//! top. The hub speaks plain unauthenticated HTTP, so there is no
//! credential chain here: a profile is a URL plus tuning knobs.

use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use hearth_core::model::MapBounds;
use hearth_core::HubConfig;

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration shared by CLI and TUI.
#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    /// Default profile name.
    pub default_profile: Option<String>,

    /// Global defaults.
    #[serde(default)]
    pub defaults: Defaults,

    /// Named hub profiles.
    #[serde(default)]
    pub profiles: HashMap<String, Profile>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_profile: Some("default".into()),
            defaults: Defaults::default(),
            profiles: HashMap::new(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_output")]
    pub output: String,

    #[serde(default = "default_color")]
    pub color: String,

    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            color: default_color(),
            timeout: default_timeout(),
        }
    }
}

fn default_output() -> String {
    "table".into()
}
fn default_color() -> String {
    "auto".into()
}
fn default_timeout() -> u64 {
    10
}

/// A named hub profile.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Profile {
    /// Hub base URL (e.g. "http://192.168.1.50").
    pub hub: String,

    /// Status poll period in seconds.
    #[serde(default = "default_poll_interval")]
    pub poll_interval: u64,

    /// Whether polling starts enabled.
    #[serde(default = "default_auto_update")]
    pub auto_update: bool,

    /// Logical map width in pixels.
    #[serde(default = "default_map_width")]
    pub map_width: f64,

    /// Logical map height in pixels.
    #[serde(default = "default_map_height")]
    pub map_height: f64,

    /// Override request timeout in seconds.
    pub timeout: Option<u64>,
}

fn default_poll_interval() -> u64 {
    3
}
fn default_auto_update() -> bool {
    true
}
fn default_map_width() -> f64 {
    1280.0
}
fn default_map_height() -> f64 {
    720.0
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("io", "hearthlab", "hearth").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("hearth");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    let path = config_path();

    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(&path))
        .merge(Env::prefixed("HEARTH_").split("_"));

    let config: Config = figment.extract()?;
    Ok(config)
}

/// Load config, returning a default if the file doesn't exist.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_default()
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<(), ConfigError> {
    let path = config_path();
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(&path, toml_str)?;
    Ok(())
}

// ── Translation to HubConfig ────────────────────────────────────────

/// Build a `HubConfig` from a profile -- no CLI flag overrides.
///
/// Suitable for the TUI and other non-CLI consumers.
pub fn profile_to_hub_config(profile: &Profile) -> Result<HubConfig, ConfigError> {
    let url: url::Url = profile.hub.parse().map_err(|_| ConfigError::Validation {
        field: "hub".into(),
        reason: format!("invalid URL: {}", profile.hub),
    })?;

    Ok(HubConfig {
        url,
        timeout: Duration::from_secs(profile.timeout.unwrap_or(default_timeout())),
        poll_interval: Duration::from_secs(profile.poll_interval),
        auto_update: profile.auto_update,
        map: MapBounds::new(profile.map_width, profile.map_height),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn profile(hub: &str) -> Profile {
        Profile {
            hub: hub.into(),
            poll_interval: default_poll_interval(),
            auto_update: true,
            map_width: default_map_width(),
            map_height: default_map_height(),
            timeout: None,
        }
    }

    #[test]
    fn profile_translates_with_defaults() {
        let cfg = profile_to_hub_config(&profile("http://192.168.1.50")).unwrap();
        assert_eq!(cfg.poll_interval, Duration::from_secs(3));
        assert_eq!(cfg.timeout, Duration::from_secs(10));
        assert!(cfg.auto_update);
        assert_eq!(cfg.map.width, 1280.0);
    }

    #[test]
    fn bad_url_is_a_validation_error() {
        let err = profile_to_hub_config(&profile("not a url")).unwrap_err();
        assert!(matches!(err, ConfigError::Validation { .. }));
    }

    #[test]
    fn toml_round_trips_a_profile() {
        let mut cfg = Config::default();
        cfg.profiles.insert("home".into(), profile("http://10.0.0.2"));

        let raw = toml::to_string_pretty(&cfg).unwrap();
        let parsed: Config = toml::from_str(&raw).unwrap();
        assert_eq!(parsed.profiles["home"].hub, "http://10.0.0.2");
        assert_eq!(parsed.profiles["home"].poll_interval, 3);
    }
}
