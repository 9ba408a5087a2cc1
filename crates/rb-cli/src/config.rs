//! Configuration loading and management.

use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use rb_core::idle::DEFAULT_IDLE_COMMAND;
use rb_core::{BreakKind, BreakPolicy, CommandIdleSource, PolicyError, PolicySettings};
use serde::{Deserialize, Serialize};

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Path to the rest log.
    pub log_path: PathBuf,

    /// Program that prints the idle time in milliseconds.
    pub idle_command: String,

    /// Arguments passed to `idle_command`.
    #[serde(default)]
    pub idle_args: Vec<String>,

    /// Program used to show desktop notifications (e.g. `notify-send`).
    ///
    /// Notifications are printed to the terminal when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notify_command: Option<String>,

    /// Thresholds for short breaks.
    pub short_break: PolicySettings,

    /// Thresholds for long breaks.
    pub long_break: PolicySettings,
}

impl Default for Config {
    fn default() -> Self {
        let data_dir = dirs_data_path().unwrap_or_else(|| PathBuf::from("."));
        Self {
            log_path: data_dir.join("data.txt"),
            idle_command: DEFAULT_IDLE_COMMAND.to_string(),
            idle_args: Vec::new(),
            notify_command: None,
            short_break: PolicySettings::for_kind(BreakKind::Short),
            long_break: PolicySettings::for_kind(BreakKind::Long),
        }
    }
}

impl Config {
    /// Loads configuration, optionally from a specific file.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, figment::Error> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Load from default config location
        if let Some(config_dir) = dirs_config_path() {
            figment = figment.merge(Toml::file(config_dir.join("config.toml")));
        }

        // Load from specified config file
        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        // Load from environment variables (RB_*, nested keys split on __)
        figment = figment.merge(Env::prefixed("RB_").split("__"));

        figment.extract()
    }

    /// Builds the short and long break policies, in evaluation order.
    pub fn policies(&self) -> Result<[BreakPolicy; 2], PolicyError> {
        Ok([
            BreakPolicy::from_settings(BreakKind::Short, self.short_break)?,
            BreakPolicy::from_settings(BreakKind::Long, self.long_break)?,
        ])
    }

    /// Builds the configured idle source.
    pub fn idle_source(&self) -> CommandIdleSource {
        CommandIdleSource::new(self.idle_command.clone(), self.idle_args.clone())
    }
}

/// Returns the platform-specific config directory for restbreak.
fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("restbreak"))
}

/// Returns the platform-specific data directory for restbreak.
///
/// On Linux: `~/.local/share/restbreak`
pub fn dirs_data_path() -> Option<PathBuf> {
    dirs::data_dir().map(|p| p.join("restbreak"))
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_dirs_data_path_ends_with_restbreak() {
        let path = dirs_data_path().unwrap();
        assert_eq!(path.file_name().unwrap(), "restbreak");
    }

    #[test]
    fn test_default_config_uses_data_dir_for_log() {
        let config = Config::default();
        let data_dir = dirs_data_path().unwrap();
        assert_eq!(config.log_path, data_dir.join("data.txt"));
    }

    #[test]
    fn test_default_thresholds() {
        let config = Config::default();
        assert_eq!(config.idle_command, "xprintidle");
        assert!(config.notify_command.is_none());
        assert_eq!(config.short_break.max_busy_ticks, 180);
        assert_eq!(config.short_break.break_idle_secs, 30);
        assert_eq!(config.long_break.max_busy_ticks, 1800);
        assert_eq!(config.long_break.break_idle_secs, 300);
    }

    #[test]
    fn test_file_overrides_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
log_path = "/var/tmp/rest.txt"
idle_command = "echo"
idle_args = ["0"]
notify_command = "notify-send"

[short_break]
max_busy_ticks = 60
break_idle_secs = 10
"#
        )
        .unwrap();
        file.flush().unwrap();

        let config = Config::load_from(Some(file.path())).unwrap();
        assert_eq!(config.log_path, PathBuf::from("/var/tmp/rest.txt"));
        assert_eq!(config.idle_source(), CommandIdleSource::new("echo", ["0"]));
        assert_eq!(config.notify_command.as_deref(), Some("notify-send"));
        assert_eq!(config.short_break.max_busy_ticks, 60);
        assert_eq!(config.short_break.break_idle_secs, 10);
    }

    #[test]
    fn test_policies_follow_registration_order() {
        let [short, long] = Config::default().policies().unwrap();
        assert_eq!(short.kind(), BreakKind::Short);
        assert_eq!(long.kind(), BreakKind::Long);
        assert_eq!(long.max_busy_ticks(), 1800);
    }

    #[test]
    fn test_zero_threshold_is_rejected() {
        let config = Config {
            long_break: PolicySettings {
                max_busy_ticks: 0,
                break_idle_secs: 300,
            },
            ..Config::default()
        };
        assert!(config.policies().is_err());
    }
}
