//! Error scenario integration tests

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn take_prompter_bin() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_take-prompter"));
    cmd.env_remove("OBS_ADDRESS").env_remove("OBS_PASSWORD");
    cmd
}

/// An address nothing listens on
fn closed_address() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let address = listener.local_addr().unwrap().to_string();
    drop(listener);
    address
}

#[test]
fn unreachable_obs_fails_with_runtime_error() {
    let home = TempDir::new().unwrap();

    take_prompter_bin()
        .env("XDG_CONFIG_HOME", home.path())
        .args(["--obs-address", &closed_address(), "--script", "demo.md"])
        .write_stdin("")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Failed to connect"));
}

#[test]
fn config_get_unknown_key() {
    take_prompter_bin()
        .args(["config", "get", "unknown_key"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Unknown key"));
}

#[test]
fn config_set_unknown_key() {
    take_prompter_bin()
        .args(["config", "set", "unknown_key", "value"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Valid keys"));
}

#[test]
fn config_set_invalid_delay() {
    let home = TempDir::new().unwrap();

    take_prompter_bin()
        .env("XDG_CONFIG_HOME", home.path())
        .args(["config", "set", "settle_delay_ms", "soon"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("settle_delay_ms"));
}

#[test]
fn scripts_in_empty_directory() {
    let scripts = TempDir::new().unwrap();

    take_prompter_bin()
        .arg("--scripts")
        .arg(scripts.path())
        .arg("scripts")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("No scripts found"));
}

#[test]
fn unknown_flag_is_usage_error() {
    take_prompter_bin()
        .arg("--duration")
        .assert()
        .code(2);
}
