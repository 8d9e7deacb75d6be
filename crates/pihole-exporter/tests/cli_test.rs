// Copyright (C) 2026  winnyboy5
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.
//! Binary-level tests for the command-line interface.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

#[allow(deprecated)]
fn exporter() -> Command {
    Command::cargo_bin("pihole-exporter").unwrap()
}

fn write_config(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_help() {
    exporter()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--config"))
        .stdout(predicate::str::contains("--check"));
}

#[test]
fn test_check_valid_config() {
    let dir = TempDir::new().unwrap();
    let path = write_config(
        &dir,
        "config.yaml",
        "pihole_host: 192.168.1.2\npihole_token: supersecret\nport: \"9617\"\npihole_interval: 15\n",
    );

    exporter()
        .arg("--check")
        .arg("-c")
        .arg(&path)
        .env_remove("PIHOLE_EXPORTER_PORT")
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration OK"))
        .stdout(predicate::str::contains("9617"))
        .stdout(predicate::str::contains("supersecret").not());
}

#[test]
fn test_check_applies_env_overrides() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "config.toml", "pihole_host = \"192.168.1.2\"\n");

    exporter()
        .args(["--check", "--config"])
        .arg(&path)
        .env("PIHOLE_EXPORTER_PIHOLE_HOST", "10.0.0.53")
        .assert()
        .success()
        .stdout(predicate::str::contains("10.0.0.53"));
}

#[test]
fn test_missing_config_fails() {
    let dir = TempDir::new().unwrap();

    exporter()
        .arg("-c")
        .arg(dir.path().join("absent.yaml"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load configuration"));
}

#[test]
fn test_invalid_config_fails() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "config.yaml", "pihole_interval: 0\n");

    exporter()
        .arg("--check")
        .arg("-c")
        .arg(&path)
        .env_remove("PIHOLE_EXPORTER_PIHOLE_INTERVAL")
        .assert()
        .failure()
        .stderr(predicate::str::contains("pihole_interval"));
}
