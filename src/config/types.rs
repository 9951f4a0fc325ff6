//! Settings types
//!
//! This module defines the data structures that represent a plasma
//! `config.yml` file. Every field is optional in the file.

use crate::runner::Verbosity;
use serde::{Deserialize, Serialize};

/// User settings loaded from `config.yml`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Default output level
    pub verbosity: Verbosity,

    /// Answer yes to confirmation prompts
    pub assume_yes: bool,

    /// Colour mode for terminal output
    pub color: ColorChoice,

    /// Shell config file to edit instead of the one derived from `$SHELL`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shell_config: Option<String>,

    /// Editor for `env:shell edit`; falls back to `$EDITOR`, then nano
    #[serde(skip_serializing_if = "Option::is_none")]
    pub editor: Option<String>,

    /// Packets sent by `ip:ping` when no count is given
    pub ping_count: u32,

    /// Connect timeout for `ip:port`
    pub port_timeout_secs: u64,

    /// How long `server:kill` waits after SIGTERM before SIGKILL
    pub kill_grace_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            verbosity: Verbosity::Normal,
            assume_yes: false,
            color: ColorChoice::Auto,
            shell_config: None,
            editor: None,
            ping_count: 4,
            port_timeout_secs: 3,
            kill_grace_secs: 5,
        }
    }
}

/// When to emit ANSI colours
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorChoice {
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorChoice {
    /// Apply the choice to the global colour switch
    pub fn apply(self) {
        match self {
            ColorChoice::Auto => colored::control::unset_override(),
            ColorChoice::Always => colored::control::set_override(true),
            ColorChoice::Never => colored::control::set_override(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.ping_count, 4);
        assert_eq!(settings.port_timeout_secs, 3);
        assert_eq!(settings.kill_grace_secs, 5);
        assert_eq!(settings.color, ColorChoice::Auto);
        assert!(settings.shell_config.is_none());
    }

    #[test]
    fn test_partial_yaml_fills_defaults() {
        let settings: Settings = serde_yaml::from_str("ping_count: 2\nverbosity: quiet\n").unwrap();
        assert_eq!(settings.ping_count, 2);
        assert_eq!(settings.verbosity, Verbosity::Quiet);
        assert_eq!(settings.kill_grace_secs, 5);
    }

    #[test]
    fn test_unknown_field_rejected() {
        let result: Result<Settings, _> = serde_yaml::from_str("pingcount: 2\n");
        assert!(result.is_err());
    }
}
