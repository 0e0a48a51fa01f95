//! User configuration read from `config.toml`.
//!
//! Every field has a default, so a missing file or a partial file is valid.
//! Lookup order: `--config <PATH>`, then
//! `<config dir>/portfolio-tui/config.toml`.

use std::{
    fs, io,
    path::{Path, PathBuf},
    time::Duration,
};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub gallery: GalleryConfig,
    pub contact: ContactConfig,
    pub listing: ListingConfig,
    pub relay: Option<RelayConfig>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GalleryConfig {
    pub interval_ms: u64,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self { interval_ms: 4000 }
    }
}

impl GalleryConfig {
    fn validate(&self) -> Result<()> {
        if self.interval_ms == 0 {
            return Err(Error::InvalidConfig(
                "[gallery] interval_ms must be greater than 0".to_owned(),
            ));
        }
        Ok(())
    }

    pub const fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactConfig {
    pub success_reset_ms: u64,
    /// Recipient name passed to the message template.
    pub to_name: String,
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            success_reset_ms: 5000,
            to_name: crate::catalog::PROFILE.name.to_owned(),
        }
    }
}

impl ContactConfig {
    pub const fn success_reset(&self) -> Duration {
        Duration::from_millis(self.success_reset_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListingConfig {
    pub initial: usize,
    pub increment: usize,
    pub devops_initial: usize,
    pub devops_increment: usize,
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            initial: 6,
            increment: 3,
            devops_initial: 3,
            devops_increment: 3,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelayConfig {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    pub service_id: String,
    pub template_id: String,
    pub public_key: String,
}

fn default_endpoint() -> String {
    "https://api.emailjs.com/api/v1.0/email/send".to_owned()
}

/// Default config file location, if the platform has a config directory.
pub fn default_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join(crate::APP_NAME).join(CONFIG_FILE))
}

/// Load configuration. A missing file yields defaults; an unreadable or
/// malformed one is an error.
pub fn load(path: Option<&Path>) -> Result<Config> {
    let Some(path) = path.map(Path::to_path_buf).or_else(default_path) else {
        return Ok(Config::default());
    };
    match fs::read_to_string(&path) {
        Ok(content) => {
            let config: Config = toml::from_str(&content)?;
            config.gallery.validate()?;
            Ok(config)
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "No config file, using defaults");
            Ok(Config::default())
        }
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config: Config = toml::from_str(
            r#"
            [gallery]
            interval_ms = 2500

            [relay]
            service_id = "svc"
            template_id = "tpl"
            public_key = "key"
            "#,
        )
        .unwrap();

        assert_eq!(config.gallery.interval(), Duration::from_millis(2500));
        assert_eq!(config.contact, ContactConfig::default());
        assert_eq!(config.listing.initial, 6);
        let relay = config.relay.unwrap();
        assert_eq!(relay.endpoint, default_endpoint());
        assert_eq!(relay.service_id, "svc");
    }

    #[test]
    fn test_zero_gallery_interval_is_rejected() {
        let path = std::env::temp_dir().join(format!("portfolio-tui-zero-{}.toml", std::process::id()));
        fs::write(&path, "[gallery]\ninterval_ms = 0\n").unwrap();
        let result = load(Some(&path));
        let _ = fs::remove_file(&path);

        let err = result.unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));
        assert!(err.to_string().contains("interval_ms"));
    }

    #[test]
    fn test_missing_file_is_default() {
        let config = load(Some(Path::new("/nonexistent/portfolio-tui/config.toml"))).unwrap();
        assert_eq!(config, Config::default());
        assert!(config.relay.is_none());
    }

    #[test]
    fn test_malformed_file_is_error() {
        let path = std::env::temp_dir().join(format!("portfolio-tui-bad-{}.toml", std::process::id()));
        fs::write(&path, "[gallery\ninterval_ms = ").unwrap();
        assert!(matches!(load(Some(&path)), Err(crate::error::Error::Toml(_))));
        let _ = fs::remove_file(&path);
    }
}
