//! Configuration management: profiles and paths. Never touches the hub.

use hearth_config::{Profile, config_path, load_config_or_default, save_config};

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        ConfigCommand::Init { hub, profile } => {
            // Validate before writing anything.
            let _: url::Url = hub.parse().map_err(|_| CliError::Validation {
                field: "hub".into(),
                reason: format!("invalid URL: {hub}"),
            })?;

            let mut cfg = load_config_or_default();
            let name = profile
                .or_else(|| global.profile.clone())
                .unwrap_or_else(|| "default".into());

            cfg.profiles.insert(
                name.clone(),
                Profile {
                    hub,
                    poll_interval: 3,
                    auto_update: true,
                    map_width: 1280.0,
                    map_height: 720.0,
                    timeout: None,
                },
            );
            if cfg.default_profile.is_none() {
                cfg.default_profile = Some(name.clone());
            }
            save_config(&cfg)?;

            output::print_output(
                &format!("profile '{name}' written to {}", config_path().display()),
                global.quiet,
            );
            Ok(())
        }

        ConfigCommand::Show => {
            let cfg = load_config_or_default();
            let rendered = toml::to_string_pretty(&cfg).map_err(|e| CliError::Config {
                message: e.to_string(),
            })?;
            output::print_output(&rendered, global.quiet);
            Ok(())
        }

        ConfigCommand::Path => {
            output::print_output(&config_path().display().to_string(), global.quiet);
            Ok(())
        }
    }
}
