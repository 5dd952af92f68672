// CLI surface tests: argument parsing and the commands that never touch
// the network. Anything needing a live hub is covered by the core crate's
// wiremock tests.

#![allow(clippy::unwrap_used)]

use assert_cmd::Command;
use predicates::prelude::*;

fn hearth() -> Command {
    Command::cargo_bin("hearth").unwrap()
}

#[test]
fn help_lists_the_command_tree() {
    hearth()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("devices"))
        .stdout(predicate::str::contains("events"))
        .stdout(predicate::str::contains("status"));
}

#[test]
fn no_args_shows_usage() {
    hearth().assert().failure().code(2);
}

#[test]
fn led_percent_is_validated_at_parse_time() {
    // Out-of-range brightness never reaches the network layer.
    hearth()
        .args(["devices", "led", "1", "--percent", "150"])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("150"));
}

#[test]
fn completions_generate_without_a_hub() {
    hearth()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("hearth"));
}

#[test]
fn config_path_prints_without_a_hub() {
    hearth()
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.toml"));
}

#[test]
fn unknown_subcommand_is_a_usage_error() {
    hearth().arg("frobnicate").assert().failure().code(2);
}
