//! Profile resolution with CLI flag overrides.

use std::time::Duration;

use hearth_config::{Config, config_path, load_config_or_default, profile_to_hub_config};
use hearth_core::HubConfig;

use crate::cli::GlobalOpts;
use crate::error::CliError;

/// The profile name in effect: flag > config default > "default".
pub fn active_profile_name(global: &GlobalOpts, cfg: &Config) -> String {
    global
        .profile
        .clone()
        .or_else(|| cfg.default_profile.clone())
        .unwrap_or_else(|| "default".into())
}

/// Build a `HubConfig` from the config file, profile, and CLI overrides.
///
/// Polling is disabled -- every CLI invocation is a one-shot cycle.
pub fn resolve_hub_config(global: &GlobalOpts) -> Result<HubConfig, CliError> {
    let cfg = load_config_or_default();
    let profile_name = active_profile_name(global, &cfg);

    let mut hub_config = if let Some(profile) = cfg.profiles.get(&profile_name) {
        profile_to_hub_config(profile)?
    } else {
        // No profile -- the --hub flag (or env) must carry the URL.
        let url_str = global.hub.as_deref().ok_or_else(|| CliError::NoConfig {
            path: config_path().display().to_string(),
        })?;
        let url = url_str.parse().map_err(|_| CliError::Validation {
            field: "hub".into(),
            reason: format!("invalid URL: {url_str}"),
        })?;
        HubConfig::new(url)
    };

    // Flag overrides beat the profile.
    if let Some(url_str) = global.hub.as_deref() {
        hub_config.url = url_str.parse().map_err(|_| CliError::Validation {
            field: "hub".into(),
            reason: format!("invalid URL: {url_str}"),
        })?;
    }
    hub_config.timeout = Duration::from_secs(global.timeout);
    hub_config.poll_interval = Duration::ZERO;

    Ok(hub_config)
}
