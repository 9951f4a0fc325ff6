//! Settings file discovery and parsing

use crate::config::types::Settings;
use crate::error::{ConfigError, ConfigResult, PlasmaError};
use directories::ProjectDirs;
use std::env;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable naming a settings file
pub const CONFIG_ENV_VAR: &str = "PLASMA_CONFIG";

/// File name inside the per-user config directory
pub const CONFIG_FILE_NAME: &str = "config.yml";

/// Per-user default location, e.g. `~/.config/plasma/config.yml`
pub fn default_config_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", crate::TOOL_NAME).map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
}

/// Pick the settings file to read.
///
/// An explicit path wins, then a non-empty `PLASMA_CONFIG`, then the
/// default location. The flag says whether the file must exist.
pub fn config_candidate(
    explicit: Option<&Path>,
    env_value: Option<OsString>,
    default: Option<PathBuf>,
) -> Option<(PathBuf, bool)> {
    if let Some(path) = explicit {
        return Some((path.to_path_buf(), true));
    }
    if let Some(value) = env_value.filter(|v| !v.is_empty()) {
        return Some((PathBuf::from(value), true));
    }
    default.map(|path| (path, false))
}

/// Parse settings from a YAML string; an empty document means defaults
pub fn parse_settings(yaml: &str) -> Result<Settings, PlasmaError> {
    if yaml.trim().is_empty() {
        return Ok(Settings::default());
    }
    let settings: Settings = serde_yaml::from_str(yaml)?;
    validate_settings(&settings)?;
    Ok(settings)
}

/// Parse a settings file from a path
pub fn parse_settings_file(path: &Path) -> Result<Settings, PlasmaError> {
    let contents = fs::read_to_string(path).map_err(|e| ConfigError::Read {
        path: path.to_path_buf(),
        error: e.to_string(),
    })?;

    parse_settings(&contents)
}

/// Load settings with automatic discovery.
///
/// Returns the settings and the file they came from, if any.
pub fn load_settings(explicit: Option<&Path>) -> Result<(Settings, Option<PathBuf>), PlasmaError> {
    match config_candidate(explicit, env::var_os(CONFIG_ENV_VAR), default_config_path()) {
        Some((path, required)) => {
            if path.is_file() {
                let settings = parse_settings_file(&path)?;
                Ok((settings, Some(path)))
            } else if required {
                Err(ConfigError::NotFound(path).into())
            } else {
                Ok((Settings::default(), None))
            }
        }
        None => Ok((Settings::default(), None)),
    }
}

/// Reject values that would make commands misbehave
pub fn validate_settings(settings: &Settings) -> ConfigResult<()> {
    if settings.ping_count == 0 {
        return Err(ConfigError::Invalid("ping_count must be at least 1".to_string()));
    }
    if settings.port_timeout_secs == 0 {
        return Err(ConfigError::Invalid(
            "port_timeout_secs must be at least 1".to_string(),
        ));
    }
    if settings.shell_config.as_deref() == Some("") {
        return Err(ConfigError::Invalid("shell_config must not be empty".to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runner::Verbosity;
    use tempfile::TempDir;

    #[test]
    fn test_candidate_explicit_wins() {
        let picked = config_candidate(
            Some(Path::new("/a.yml")),
            Some(OsString::from("/b.yml")),
            Some(PathBuf::from("/c.yml")),
        );
        assert_eq!(picked, Some((PathBuf::from("/a.yml"), true)));
    }

    #[test]
    fn test_candidate_env_then_default() {
        let picked = config_candidate(None, Some(OsString::from("/b.yml")), Some(PathBuf::from("/c.yml")));
        assert_eq!(picked, Some((PathBuf::from("/b.yml"), true)));

        let picked = config_candidate(None, Some(OsString::new()), Some(PathBuf::from("/c.yml")));
        assert_eq!(picked, Some((PathBuf::from("/c.yml"), false)));

        assert_eq!(config_candidate(None, None, None), None);
    }

    #[test]
    fn test_parse_empty_is_default() {
        assert_eq!(parse_settings("  \n").unwrap(), Settings::default());
    }

    #[test]
    fn test_parse_settings_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.yml");
        fs::write(&path, "verbosity: verbose\nassume_yes: true\nshell_config: /tmp/rc\n").unwrap();

        let settings = parse_settings_file(&path).unwrap();
        assert_eq!(settings.verbosity, Verbosity::Verbose);
        assert!(settings.assume_yes);
        assert_eq!(settings.shell_config.as_deref(), Some("/tmp/rc"));
    }

    #[test]
    fn test_parse_missing_file() {
        let result = parse_settings_file(Path::new("/definitely/not/here.yml"));
        assert!(matches!(result, Err(PlasmaError::Config(ConfigError::Read { .. }))));
    }

    #[test]
    fn test_explicit_missing_is_error() {
        let result = load_settings(Some(Path::new("/definitely/not/here.yml")));
        assert!(matches!(result, Err(PlasmaError::Config(ConfigError::NotFound(_)))));
    }

    #[test]
    fn test_validate_rejects_zero() {
        let settings = Settings {
            ping_count: 0,
            ..Settings::default()
        };
        assert!(validate_settings(&settings).is_err());
        assert!(parse_settings("port_timeout_secs: 0").is_err());
    }

    #[test]
    fn test_invalid_yaml_type() {
        let result = parse_settings("ping_count: lots");
        assert!(matches!(result, Err(PlasmaError::Yaml(_))));
    }
}
