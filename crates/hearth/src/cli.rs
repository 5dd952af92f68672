//! Clap derive structures for the `hearth` CLI.
//!
//! Defines the complete command tree, global flags, and shared types.
//! This file is included by `build.rs` for man-page generation, so it
//! depends on nothing beyond clap + clap_complete.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// hearth -- command-line client for a home-automation hub
#[derive(Debug, Parser)]
#[command(
    name = "hearth",
    version,
    about = "Control a hearth home-automation hub from the command line",
    long_about = "Inspect and control the devices registered on a hearth hub:\n\
        live sensor readings, relay and LED outputs, map positions, and\n\
        scheduled timed events.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Hub profile to use
    #[arg(long, short = 'p', env = "HEARTH_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Hub URL (overrides profile)
    #[arg(long, short = 'H', env = "HEARTH_HUB", global = true)]
    pub hub: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "HEARTH_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Skip confirmation prompts
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,

    /// Request timeout in seconds
    #[arg(long, env = "HEARTH_TIMEOUT", default_value = "10", global = true)]
    pub timeout: u64,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Role / event-kind value enums ────────────────────────────────────
//
// Mirrors of the domain enums; cli.rs cannot depend on hearth-core
// (build.rs constraint), so handlers translate.

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum RoleArg {
    /// Sensor + relay + LED in one package
    Mixed,
    Led,
    Relay,
    Sensor,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum EventKindArg {
    RelayOn,
    RelayOff,
    RelayToggle,
    LedOn,
    LedOff,
    LedToggle,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Inspect and control registered devices
    #[command(alias = "dev", alias = "d")]
    Devices(DevicesArgs),

    /// Manage scheduled timed events
    #[command(alias = "ev")]
    Events(EventsArgs),

    /// Hub reachability and device health summary
    Status,

    /// Dashboard map operations
    Map(MapArgs),

    /// Manage CLI configuration and profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  DEVICES
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct DevicesArgs {
    #[command(subcommand)]
    pub command: DevicesCommand,
}

#[derive(Debug, Subcommand)]
pub enum DevicesCommand {
    /// List devices with their latest readings
    #[command(alias = "ls")]
    List,

    /// Show one device in detail
    Get {
        /// Device id or name
        device: String,
    },

    /// Register a new device on the hub
    Add {
        /// Display name
        #[arg(long, short = 'n')]
        name: String,

        /// Device IP address
        #[arg(long, short = 'i')]
        ip: String,

        /// Device role
        #[arg(long, short = 'r', value_enum)]
        role: RoleArg,
    },

    /// Remove a device from the hub
    #[command(alias = "rm")]
    Remove {
        /// Device id or name
        device: String,
    },

    /// Move a device marker on the dashboard map
    Move {
        /// Device id or name
        device: String,

        /// Target x in map pixels
        #[arg(long, short = 'x', allow_hyphen_values = true)]
        x: f64,

        /// Target y in map pixels
        #[arg(long, allow_hyphen_values = true)]
        y: f64,
    },

    /// Toggle a device's relay output
    Relay {
        /// Device id or name
        device: String,
    },

    /// Set a device's LED brightness
    Led {
        /// Device id or name
        device: String,

        /// Brightness percentage; prompts interactively when omitted
        #[arg(long, value_parser = clap::value_parser!(u8).range(0..=100))]
        percent: Option<u8>,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  EVENTS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct EventsArgs {
    #[command(subcommand)]
    pub command: EventsCommand,
}

#[derive(Debug, Subcommand)]
pub enum EventsCommand {
    /// List timed events known to this session
    #[command(alias = "ls")]
    List,

    /// Schedule a timed event
    Add {
        /// Target device id or name
        #[arg(long, short = 'd')]
        device: String,

        /// What to do when the time comes
        #[arg(long, short = 'k', value_enum)]
        kind: EventKindArg,

        /// Time of day, HH:MM (hub-local)
        #[arg(long, short = 't')]
        time: String,
    },

    /// Remove a timed event by id
    #[command(alias = "rm")]
    Remove {
        /// Event id (as shown by the hub dashboard or `events list`)
        event: String,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  MAP / CONFIG / COMPLETIONS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct MapArgs {
    #[command(subcommand)]
    pub command: MapCommand,
}

#[derive(Debug, Subcommand)]
pub enum MapCommand {
    /// Download the map background image
    Fetch {
        /// Output file (derived from the content type when omitted)
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },
}

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Create or update a profile
    Init {
        /// Hub base URL
        #[arg(long, short = 'H')]
        hub: String,

        /// Profile name (defaults to the active profile)
        #[arg(long, short = 'p')]
        profile: Option<String>,
    },

    /// Print the resolved configuration
    Show,

    /// Print the config file path
    Path,
}

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: clap_complete::Shell,
}
