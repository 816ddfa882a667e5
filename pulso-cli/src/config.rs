//! Layered CLI configuration: config file first, flags override.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::Args;
use pulso_core::MonitorConfig;
use serde::{Deserialize, Serialize};
use url::Url;

/// On-disk config file contents. Every field is optional; flags fill the
/// gaps and win over the file.
#[derive(Debug, Default, Clone, Serialize, Deserialize, PartialEq)]
pub struct FileConfig {
    pub base_url: Option<Url>,
    pub poll_minutes: Option<u64>,
    pub cooldown_minutes: Option<u64>,
    pub request_timeout_secs: Option<u64>,
    pub data_dir: Option<PathBuf>,
}

impl FileConfig {
    /// Load from the default config path; a missing file is an empty
    /// config.
    pub fn load() -> Result<Self> {
        Self::load_from(&pulso_paths::config_dir().join("config.toml"))
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        toml::from_str(&contents).with_context(|| format!("parsing {}", path.display()))
    }
}

/// Connection flags shared by every subcommand.
#[derive(Debug, Args)]
pub struct ConnectArgs {
    /// Base URL of the scoring service (overrides the config file)
    #[arg(long)]
    pub base_url: Option<Url>,

    /// Minutes between scheduled polls
    #[arg(long)]
    pub interval: Option<u64>,

    /// Minimum minutes between two alerts
    #[arg(long)]
    pub cooldown: Option<u64>,

    /// Request timeout in seconds
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Directory holding the persisted state
    #[arg(long)]
    pub data_dir: Option<PathBuf>,

    /// Alternate config file
    #[arg(long)]
    pub config: Option<PathBuf>,
}

/// Resolved, validated settings ready to build a monitor from.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub monitor: MonitorConfig,
    pub data_dir: PathBuf,
}

impl ConnectArgs {
    /// Merge the config file with the flags and validate the result.
    pub fn resolve(&self) -> Result<Settings> {
        self.resolve_with(self.file_config()?)
    }

    /// Resolve only the data directory. Commands that never touch the
    /// network (like `last`) work without a base URL.
    pub fn resolve_data_dir(&self) -> Result<PathBuf> {
        let file = self.file_config()?;
        Ok(self.merged_data_dir(&file))
    }

    fn file_config(&self) -> Result<FileConfig> {
        match &self.config {
            Some(path) => FileConfig::load_from(path),
            None => FileConfig::load(),
        }
    }

    fn resolve_with(&self, file: FileConfig) -> Result<Settings> {
        let base_url = match self.base_url.clone().or(file.base_url.clone()) {
            Some(url) => url,
            None => {
                bail!("no base URL configured; pass --base-url or set base_url in the config file")
            }
        };

        let mut monitor = MonitorConfig::new(base_url);
        if let Some(minutes) = self.interval.or(file.poll_minutes) {
            monitor.poll_minutes = minutes;
        }
        if let Some(minutes) = self.cooldown.or(file.cooldown_minutes) {
            monitor.cooldown_minutes = minutes;
        }
        if let Some(secs) = self.timeout.or(file.request_timeout_secs) {
            monitor.request_timeout_secs = secs;
        }
        let monitor = monitor.validated()?;

        Ok(Settings {
            monitor,
            data_dir: self.merged_data_dir(&file),
        })
    }

    fn merged_data_dir(&self, file: &FileConfig) -> PathBuf {
        self.data_dir
            .clone()
            .or_else(|| file.data_dir.clone())
            .unwrap_or_else(pulso_paths::data_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bare_args() -> ConnectArgs {
        ConnectArgs {
            base_url: None,
            interval: None,
            cooldown: None,
            timeout: None,
            data_dir: None,
            config: None,
        }
    }

    #[test]
    fn flags_override_file_values() {
        let file = FileConfig {
            base_url: Some("http://file-host:5000/".parse().unwrap()),
            poll_minutes: Some(10),
            cooldown_minutes: Some(30),
            request_timeout_secs: None,
            data_dir: None,
        };
        let args = ConnectArgs {
            base_url: Some("http://flag-host:5000/".parse().unwrap()),
            interval: Some(2),
            ..bare_args()
        };

        let settings = args.resolve_with(file).unwrap();
        assert_eq!(settings.monitor.base_url.host_str(), Some("flag-host"));
        assert_eq!(settings.monitor.poll_minutes, 2);
        // File value survives where no flag was given.
        assert_eq!(settings.monitor.cooldown_minutes, 30);
        // Untouched fields keep their defaults.
        assert_eq!(settings.monitor.request_timeout_secs, 10);
    }

    #[test]
    fn missing_base_url_is_an_error() {
        let error = bare_args().resolve_with(FileConfig::default()).unwrap_err();
        assert!(error.to_string().contains("no base URL configured"));
    }

    #[test]
    fn invalid_interval_from_file_is_fatal() {
        let file = FileConfig {
            base_url: Some("http://localhost:5000/".parse().unwrap()),
            poll_minutes: Some(0),
            ..FileConfig::default()
        };
        assert!(bare_args().resolve_with(file).is_err());
    }

    #[test]
    fn data_dir_falls_back_to_xdg_default() {
        let file = FileConfig {
            base_url: Some("http://localhost:5000/".parse().unwrap()),
            ..FileConfig::default()
        };
        let settings = bare_args().resolve_with(file).unwrap();
        assert!(settings.data_dir.ends_with("pulso"));
    }

    #[test]
    fn load_from_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let config = FileConfig::load_from(&dir.path().join("nope.toml")).unwrap();
        assert_eq!(config, FileConfig::default());
    }

    #[test]
    fn load_from_valid_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "base_url = \"http://localhost:5000/api\"\npoll_minutes = 3\n",
        )
        .unwrap();

        let config = FileConfig::load_from(&path).unwrap();
        assert_eq!(config.poll_minutes, Some(3));
        assert!(config.base_url.is_some());
    }

    #[test]
    fn load_from_invalid_toml_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "this is not toml {{").unwrap();
        assert!(FileConfig::load_from(&path).is_err());
    }
}
