use std::fs;
use std::net::{IpAddr, SocketAddr};
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::errors::WikiError;

pub const DEFAULT_TEMPLATE_DIR: &str = "./templates/";
pub const DEFAULT_DATA_DIR: &str = "./data/";
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8080;

/// Application configuration, fixed once the process has started
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    #[serde(alias = "template_directory")]
    pub template_dir: PathBuf,
    #[serde(alias = "data_directory")]
    pub data_dir: PathBuf,
    pub host: String,
    pub port: u16,
}

impl Config {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self {
            template_dir: PathBuf::from(DEFAULT_TEMPLATE_DIR),
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }

    /// Create configuration with custom directories
    pub fn with_dirs(template_dir: PathBuf, data_dir: PathBuf) -> Self {
        Self {
            template_dir,
            data_dir,
            ..Self::new()
        }
    }

    /// Parse a YAML document; missing keys keep their defaults
    pub fn from_yaml(source: &str) -> Result<Self, WikiError> {
        if source.trim().is_empty() {
            return Ok(Self::new());
        }
        Ok(serde_yaml::from_str(source)?)
    }

    /// Load the config file, falling back to defaults when it does not exist
    pub fn load(path: &Path) -> Result<Self, WikiError> {
        if !path.exists() {
            log::warn!("Config file {:?} not found, using defaults", path);
            return Ok(Self::new());
        }
        let source = fs::read_to_string(path)?;
        let config = Self::from_yaml(&source)?;
        log::info!(
            "Loaded config from {:?}: templates={:?} data={:?}",
            path, config.template_dir, config.data_dir
        );
        Ok(config)
    }

    /// Get the socket address for binding
    pub fn socket_addr(&self) -> Result<SocketAddr, WikiError> {
        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|e| WikiError::Config(format!("invalid host {:?}: {}", self.host, e)))?;
        Ok(SocketAddr::new(ip, self.port))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_yields_defaults() {
        let config = Config::from_yaml("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.template_dir, PathBuf::from("./templates/"));
        assert_eq!(config.data_dir, PathBuf::from("./data/"));
    }

    #[test]
    fn partial_document_keeps_other_defaults() {
        let config = Config::from_yaml("data_dir: /srv/wiki/pages\n").unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/srv/wiki/pages"));
        assert_eq!(config.template_dir, PathBuf::from(DEFAULT_TEMPLATE_DIR));
        assert_eq!(config.port, 8080);
    }

    #[test]
    fn long_directory_keys_are_accepted() {
        let yaml = "template_directory: ./tmpl/\ndata_directory: ./pages/\nport: 9000\n";
        let config = Config::from_yaml(yaml).unwrap();
        assert_eq!(config.template_dir, PathBuf::from("./tmpl/"));
        assert_eq!(config.data_dir, PathBuf::from("./pages/"));
        assert_eq!(config.port, 9000);
    }

    #[test]
    fn malformed_document_is_a_config_error() {
        let err = Config::from_yaml("port: [not, a, number]").unwrap_err();
        assert!(matches!(err, WikiError::Config(_)));
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = Config::load(&dir.path().join("absent.yaml")).unwrap();
        assert_eq!(config, Config::new());
    }

    #[test]
    fn socket_addr_rejects_hostnames() {
        let mut config = Config::new();
        assert_eq!(config.socket_addr().unwrap().port(), 8080);
        config.host = "not an ip".to_string();
        assert!(config.socket_addr().is_err());
    }
}
