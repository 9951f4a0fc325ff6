//! Locating the user's shell configuration file

use crate::config::Settings;
use crate::utils::{expand_home, home_dir};
use std::env;
use std::path::{Path, PathBuf};

/// Shell name from `$SHELL`, e.g. `zsh`
pub fn current_shell() -> String {
    env::var("SHELL")
        .ok()
        .and_then(|s| s.rsplit('/').next().map(str::to_string))
        .unwrap_or_default()
}

/// Config files tried for a shell, most preferred first
pub fn config_files_for(shell: &str) -> &'static [&'static str] {
    match shell {
        "zsh" => &[".zshrc", ".zprofile"],
        "bash" => &[".bashrc", ".bash_profile"],
        "fish" => &[".config/fish/config.fish"],
        _ => &[".profile"],
    }
}

/// Pick the config file for `shell` under `home`.
///
/// The first existing candidate wins; otherwise the primary candidate is
/// returned so it can be created.
pub fn resolve_shell_config(home: &Path, shell: &str) -> PathBuf {
    let candidates = config_files_for(shell);
    candidates
        .iter()
        .map(|name| home.join(name))
        .find(|path| path.exists())
        .unwrap_or_else(|| home.join(candidates[0]))
}

/// The shell config file commands should edit
pub fn shell_config_file(settings: &Settings) -> Option<PathBuf> {
    if let Some(path) = &settings.shell_config {
        return Some(expand_home(path));
    }
    let home = home_dir()?;
    Some(resolve_shell_config(&home, &current_shell()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_unknown_shell_uses_profile() {
        let home = TempDir::new().unwrap();
        assert_eq!(
            resolve_shell_config(home.path(), "tcsh"),
            home.path().join(".profile")
        );
    }

    #[test]
    fn test_primary_when_nothing_exists() {
        let home = TempDir::new().unwrap();
        assert_eq!(
            resolve_shell_config(home.path(), "zsh"),
            home.path().join(".zshrc")
        );
    }

    #[test]
    fn test_existing_secondary_preferred() {
        let home = TempDir::new().unwrap();
        fs::write(home.path().join(".bash_profile"), "").unwrap();
        assert_eq!(
            resolve_shell_config(home.path(), "bash"),
            home.path().join(".bash_profile")
        );
    }

    #[test]
    fn test_settings_override() {
        let settings = Settings {
            shell_config: Some("/tmp/custom_rc".to_string()),
            ..Settings::default()
        };
        assert_eq!(
            shell_config_file(&settings),
            Some(PathBuf::from("/tmp/custom_rc"))
        );
    }
}
