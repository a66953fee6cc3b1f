//! Tool settings for nptui
//!
//! Parses the optional `/etc/nptui.toml` settings file using serde

use crate::error::{Error, Result};
use crate::theme::Theme;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Default location of the settings file
pub const DEFAULT_SETTINGS_PATH: &str = "/etc/nptui.toml";

/// Load settings from `path`
///
/// A missing file yields the defaults; any other read error is reported.
pub fn load(path: &Path) -> Result<Settings> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "settings file not found, using defaults");
            return Ok(Settings::default());
        }
        Err(e) => {
            return Err(Error::SettingsRead {
                path: path.to_path_buf(),
                source: e,
            });
        }
    };

    let settings: Settings = toml::from_str(&content)?;
    settings.validate()?;

    tracing::debug!(path = %path.display(), "loaded settings");
    Ok(settings)
}

/// Tool settings
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    /// Directory holding netplan YAML files
    #[serde(default = "default_netplan_dir")]
    pub netplan_dir: PathBuf,

    /// File name written inside `netplan_dir`
    #[serde(default = "default_config_file")]
    pub config_file: String,

    /// Renderer for newly created documents
    #[serde(default = "default_renderer")]
    pub renderer: String,

    /// sysfs directory listing network interfaces
    #[serde(default = "default_sysfs_net")]
    pub sysfs_net: PathBuf,

    /// Activation command and arguments
    #[serde(default = "default_apply_command")]
    pub apply_command: Vec<String>,

    /// Seconds to wait for the activation command (0 waits indefinitely)
    #[serde(default)]
    pub apply_timeout: u64,

    /// Presentation settings
    #[serde(default)]
    pub theme: ThemeSettings,
}

/// Console presentation settings
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ThemeSettings {
    /// Emit ANSI colours
    #[serde(default = "default_color")]
    pub color: bool,
}

impl Default for ThemeSettings {
    fn default() -> Self {
        Self {
            color: default_color(),
        }
    }
}

fn default_netplan_dir() -> PathBuf {
    PathBuf::from("/etc/netplan")
}

fn default_config_file() -> String {
    "01-netcfg.yaml".into()
}

fn default_renderer() -> String {
    crate::netplan::document::DEFAULT_RENDERER.into()
}

fn default_sysfs_net() -> PathBuf {
    PathBuf::from("/sys/class/net")
}

fn default_apply_command() -> Vec<String> {
    vec!["netplan".into(), "apply".into()]
}

fn default_color() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            netplan_dir: default_netplan_dir(),
            config_file: default_config_file(),
            renderer: default_renderer(),
            sysfs_net: default_sysfs_net(),
            apply_command: default_apply_command(),
            apply_timeout: 0,
            theme: ThemeSettings::default(),
        }
    }
}

impl Settings {
    /// Validate the settings
    pub fn validate(&self) -> Result<()> {
        if self.apply_command.first().is_none_or(|c| c.is_empty()) {
            return Err(Error::SettingsValidation(
                "apply_command must name a program".into(),
            ));
        }

        let file = Path::new(&self.config_file);
        if file.components().count() != 1 || file.extension().is_none_or(|ext| ext != "yaml") {
            return Err(Error::SettingsValidation(format!(
                "config_file must be a bare *.yaml file name, got '{}'",
                self.config_file
            )));
        }

        if self.renderer.is_empty() {
            return Err(Error::SettingsValidation("renderer must not be empty".into()));
        }

        Ok(())
    }

    /// Apply command-line overrides
    pub fn with_overrides(mut self, netplan_dir: Option<PathBuf>, no_color: bool) -> Self {
        if let Some(dir) = netplan_dir {
            self.netplan_dir = dir;
        }
        if no_color {
            self.theme.color = false;
        }
        self
    }

    /// Presentation theme for the console
    pub fn theme(&self) -> Theme {
        if self.theme.color {
            Theme::ansi()
        } else {
            Theme::plain()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_uses_defaults() {
        let tmp = TempDir::new().unwrap();
        let settings = load(&tmp.path().join("nptui.toml")).unwrap();
        assert_eq!(settings.netplan_dir, PathBuf::from("/etc/netplan"));
        assert_eq!(settings.config_file, "01-netcfg.yaml");
        assert_eq!(settings.apply_command, vec!["netplan", "apply"]);
        assert_eq!(settings.apply_timeout, 0);
        assert!(settings.theme.color);
    }

    #[test]
    fn test_parse_partial_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("nptui.toml");
        fs::write(
            &path,
            r#"
netplan_dir = "/tmp/netplan"
apply_command = ["netplan", "try"]
apply_timeout = 30

[theme]
color = false
"#,
        )
        .unwrap();

        let settings = load(&path).unwrap();
        assert_eq!(settings.netplan_dir, PathBuf::from("/tmp/netplan"));
        assert_eq!(settings.apply_command, vec!["netplan", "try"]);
        assert_eq!(settings.apply_timeout, 30);
        assert_eq!(settings.renderer, "networkd");
        assert!(!settings.theme.color);
    }

    #[test]
    fn test_rejects_empty_apply_command() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("nptui.toml");
        fs::write(&path, "apply_command = []\n").unwrap();

        let err = load(&path).unwrap_err();
        assert!(matches!(err, Error::SettingsValidation(_)));
    }

    #[test]
    fn test_rejects_nested_config_file() {
        let settings = Settings {
            config_file: "../01-netcfg.yaml".into(),
            ..Default::default()
        };
        assert!(settings.validate().is_err());

        let settings = Settings {
            config_file: "01-netcfg.yml".into(),
            ..Default::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_unknown_key_rejected() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("nptui.toml");
        fs::write(&path, "netplan_directory = \"/x\"\n").unwrap();

        assert!(matches!(load(&path).unwrap_err(), Error::SettingsParse(_)));
    }

    #[test]
    fn test_overrides() {
        let settings =
            Settings::default().with_overrides(Some(PathBuf::from("/srv/netplan")), true);
        assert_eq!(settings.netplan_dir, PathBuf::from("/srv/netplan"));
        assert!(!settings.theme.color);
    }
}
