//! Dashboard map operations.

use std::path::PathBuf;

use hearth_core::Hub;

use crate::cli::{GlobalOpts, MapArgs, MapCommand};
use crate::error::CliError;
use crate::output;

pub async fn handle(hub: &Hub, args: MapArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        MapCommand::Fetch { output: target } => {
            let Some(image) = hub.fetch_map_background().await? else {
                return Err(CliError::NotFound {
                    resource_type: "map background".into(),
                    identifier: "current".into(),
                    list_command: "status".into(),
                });
            };

            let path = target.unwrap_or_else(|| default_name(image.content_type.as_deref()));
            std::fs::write(&path, &image.bytes)?;
            output::print_output(
                &format!("saved {} bytes to {}", image.bytes.len(), path.display()),
                global.quiet,
            );
            Ok(())
        }
    }
}

/// Pick a file name from the content type; the hub serves whatever was
/// uploaded, so fall back to a bare name for unknown types.
fn default_name(content_type: Option<&str>) -> PathBuf {
    let ext = match content_type {
        Some("image/png") => ".png",
        Some("image/jpeg") => ".jpg",
        Some("image/svg+xml") => ".svg",
        Some("image/webp") => ".webp",
        _ => "",
    };
    PathBuf::from(format!("map-background{ext}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_name_follows_content_type() {
        assert_eq!(
            default_name(Some("image/png")),
            PathBuf::from("map-background.png")
        );
        assert_eq!(default_name(None), PathBuf::from("map-background"));
    }
}
