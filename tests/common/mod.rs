//! Common test utilities

#![allow(dead_code)]

use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Create a temporary directory with a config.yml file
pub fn create_test_config(content: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("config.yml");
    fs::write(&config_path, content).unwrap();
    (temp_dir, config_path)
}

/// The plasma binary, uncoloured, reading settings from `config`
pub fn plasma(config: &Path) -> Command {
    let mut cmd = Command::cargo_bin("plasma").unwrap();
    cmd.env("PLASMA_CONFIG", config)
        .env_remove("EDITOR")
        .arg("--no-color");
    cmd
}

/// The plasma binary with an empty config in its own temp dir
pub fn plasma_isolated() -> (TempDir, Command) {
    let (temp_dir, config) = create_test_config("");
    let mut cmd = plasma(&config);
    cmd.current_dir(temp_dir.path());
    (temp_dir, cmd)
}
