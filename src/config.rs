//! Configuration: a JSON file with per-field defaults, overridable from the command line

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use reqwest::Url;
use serde::{Deserialize, Serialize};

const APP_DIR: &str = "playlist-rs";

#[derive(Parser, Debug, Default)]
#[command(name = "playlist-rs")]
#[command(about = "Browse songs by genre, get similar-sounding recommendations and leave feedback")]
#[command(version)]
pub struct Cli {
    /// Config file (default: <user config dir>/playlist-rs/config.json)
    #[arg(short, long, env = "PLAYLIST_RS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Base URL of the recommendation backend
    #[arg(long, env = "PLAYLIST_RS_API_URL")]
    pub api_url: Option<String>,

    /// Per-request timeout in seconds
    #[arg(short, long)]
    pub timeout: Option<u64>,

    /// Directory for log files
    #[arg(long)]
    pub log_dir: Option<PathBuf>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    #[serde(default = "default_api_url")]
    pub api_url: String,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    #[serde(default = "default_log_dir")]
    pub log_dir: PathBuf,
}

fn default_api_url() -> String {
    "http://127.0.0.1:5001".to_string()
}

fn default_request_timeout() -> u64 {
    30
}

fn default_log_dir() -> PathBuf {
    PathBuf::from(".logs")
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            request_timeout_secs: default_request_timeout(),
            log_dir: default_log_dir(),
        }
    }
}

impl Config {
    /// File config with command-line overrides applied, validated
    pub fn resolve(cli: &Cli) -> Result<Self> {
        let path = match &cli.config {
            Some(path) => path.clone(),
            None => Self::default_path()?,
        };

        let mut config = Self::load(&path)?;
        if let Some(api_url) = &cli.api_url {
            config.api_url = api_url.clone();
        }
        if let Some(timeout) = cli.timeout {
            config.request_timeout_secs = timeout;
        }
        if let Some(log_dir) = &cli.log_dir {
            config.log_dir = log_dir.clone();
        }

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from `path`, writing the defaults there if it does not exist yet
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::info!("Config file not found at {:?}, creating default config", path);
            let config = Self::default();
            config.save(path)?;
            return Ok(config);
        }

        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        let config: Self = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {:?}", path))?;

        tracing::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {:?}", parent))?;
        }

        let contents = serde_json::to_string_pretty(self).context("Failed to serialize config")?;

        std::fs::write(path, contents)
            .with_context(|| format!("Failed to write config file: {:?}", path))?;

        tracing::info!("Saved config to {:?}", path);
        Ok(())
    }

    fn default_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().context("Could not determine the user config directory")?;
        Ok(config_dir.join(APP_DIR).join("config.json"))
    }

    pub fn validate(&self) -> Result<()> {
        if self.api_url.trim().is_empty() {
            return Err(anyhow::anyhow!("api_url cannot be empty"));
        }

        let url = Url::parse(&self.api_url)
            .with_context(|| format!("api_url is not a valid URL: {}", self.api_url))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(anyhow::anyhow!("api_url must be an http or https URL"));
        }

        if self.request_timeout_secs == 0 {
            return Err(anyhow::anyhow!("request_timeout_secs must be at least 1"));
        }

        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn cli_with_config(path: &Path) -> Cli {
        Cli {
            config: Some(path.to_path_buf()),
            ..Cli::default()
        }
    }

    #[test]
    fn missing_file_is_created_with_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.json");

        let config = Config::load(&path).unwrap();

        assert_eq!(config, Config::default());
        assert!(path.exists());
        assert_eq!(Config::load(&path).unwrap(), Config::default());
    }

    #[test]
    fn partial_file_falls_back_to_field_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{ "api_url": "http://10.0.0.5:5001" }"#).unwrap();

        let config = Config::load(&path).unwrap();

        assert_eq!(config.api_url, "http://10.0.0.5:5001");
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
        assert_eq!(config.log_dir, PathBuf::from(".logs"));
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = Config::load(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }

    #[test]
    fn command_line_overrides_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{ "api_url": "http://a:1", "request_timeout_secs": 10 }"#).unwrap();

        let cli = Cli {
            api_url: Some("http://b:2".into()),
            timeout: Some(3),
            ..cli_with_config(&path)
        };
        let config = Config::resolve(&cli).unwrap();

        assert_eq!(config.api_url, "http://b:2");
        assert_eq!(config.request_timeout_secs, 3);
    }

    #[test]
    fn validation_rejects_bad_values() {
        let bad_url = Config {
            api_url: "ftp://example.com".into(),
            ..Config::default()
        };
        assert!(bad_url.validate().is_err());

        let empty_url = Config {
            api_url: "  ".into(),
            ..Config::default()
        };
        assert!(empty_url.validate().is_err());

        let zero_timeout = Config {
            request_timeout_secs: 0,
            ..Config::default()
        };
        assert!(zero_timeout.validate().is_err());

        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn default_path_lives_in_user_config_dir() {
        let path = Config::default_path().unwrap();

        assert!(path.starts_with(dirs::config_dir().unwrap()));
        assert!(path.ends_with(Path::new(APP_DIR).join("config.json")));
    }

    #[test]
    fn resolve_fails_on_invalid_override() {
        let dir = TempDir::new().unwrap();
        let cli = Cli {
            timeout: Some(0),
            ..cli_with_config(&dir.path().join("config.json"))
        };
        assert!(Config::resolve(&cli).is_err());
    }
}
