//! Command handler modules and the top-level dispatcher.

pub mod config_cmd;
pub mod devices;
pub mod events;
pub mod map_cmd;
pub mod system;

mod util;

use hearth_core::Hub;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Route a parsed command to its handler. Config and completions are
/// handled in `main` -- everything that reaches here has a connected hub.
pub async fn dispatch(cmd: Command, hub: &Hub, global: &GlobalOpts) -> Result<(), CliError> {
    match cmd {
        Command::Devices(args) => devices::handle(hub, args, global).await,
        Command::Events(args) => events::handle(hub, args, global).await,
        Command::Status => system::handle_status(hub, global),
        Command::Map(args) => map_cmd::handle(hub, args, global).await,
        Command::Config(_) | Command::Completions(_) => unreachable!("handled in main"),
    }
}
