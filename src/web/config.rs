use serde::Deserialize;
use std::path::PathBuf;
use thiserror::Error;

use crate::predict::{GroundStation, PositionSourceKind, OPEN_NOTIFY_URL};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("Invalid observer coordinates: {0}")]
    InvalidObserver(String),
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub web: WebConfig,
    pub observer: ObserverConfig,
    pub catalog: CatalogConfig,
    pub position: PositionConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WebConfig {
    pub bind: String,
    /// Browser refresh period of the dashboard page.
    pub refresh_seconds: u64,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0:5000".to_string(),
            refresh_seconds: 10,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ObserverConfig {
    pub name: Option<String>,
    pub coordinates: String,
    pub altitude_m: f64,
}

impl Default for ObserverConfig {
    fn default() -> Self {
        let station = GroundStation::default();
        Self {
            name: None,
            coordinates: format!("{}, {}", station.latitude_deg, station.longitude_deg),
            altitude_m: station.altitude_m,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    pub tle_folder: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PositionConfig {
    /// Unset means `sgp4` when a TLE folder is configured and `open_notify`
    /// otherwise.
    pub source: Option<PositionSourceKind>,
    pub open_notify_url: String,
}

impl Default for PositionConfig {
    fn default() -> Self {
        Self {
            source: None,
            open_notify_url: OPEN_NOTIFY_URL.to_string(),
        }
    }
}

impl Config {
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_yaml::from_str(content)?;
        Ok(config)
    }

    pub fn position_source(&self) -> PositionSourceKind {
        match (self.position.source, &self.catalog.tle_folder) {
            (Some(kind), _) => kind,
            (None, Some(_)) => PositionSourceKind::Sgp4,
            (None, None) => PositionSourceKind::OpenNotify,
        }
    }

    pub fn station(&self) -> Result<GroundStation, ConfigError> {
        GroundStation::from_coordinates(
            &self.observer.coordinates,
            Some(self.observer.altitude_m),
        )
        .ok_or_else(|| ConfigError::InvalidObserver(self.observer.coordinates.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_uses_defaults() {
        let config = Config::from_yaml("{}").unwrap();
        assert_eq!(config.web.bind, "0.0.0.0:5000");
        assert_eq!(config.web.refresh_seconds, 10);
        assert_eq!(config.position.source, None);
        assert!(config.catalog.tle_folder.is_none());
        assert_eq!(config.position_source(), PositionSourceKind::OpenNotify);
        assert_eq!(config.station().unwrap(), GroundStation::default());
    }

    #[test]
    fn parses_full_document() {
        let config = Config::from_yaml(
            r#"
web:
  bind: "127.0.0.1:8080"
observer:
  name: Toulouse
  coordinates: "43.6047, 1.4442"
  altitude_m: 150
catalog:
  tle_folder: ./tle
position:
  source: open_notify
"#,
        )
        .unwrap();

        assert_eq!(config.web.bind, "127.0.0.1:8080");
        assert_eq!(config.web.refresh_seconds, 10);
        assert_eq!(config.observer.name.as_deref(), Some("Toulouse"));
        assert_eq!(config.catalog.tle_folder, Some(PathBuf::from("./tle")));
        assert_eq!(config.position_source(), PositionSourceKind::OpenNotify);
        assert_eq!(config.position.open_notify_url, OPEN_NOTIFY_URL);

        let station = config.station().unwrap();
        assert_eq!(station.latitude_deg, 43.6047);
        assert_eq!(station.altitude_m, 150.0);
    }

    #[test]
    fn tle_folder_switches_default_source_to_sgp4() {
        let config = Config::from_yaml("catalog:\n  tle_folder: ./tle\n").unwrap();
        assert_eq!(config.position_source(), PositionSourceKind::Sgp4);

        let config =
            Config::from_yaml("catalog:\n  tle_folder: ./tle\nposition:\n  source: open_notify\n")
                .unwrap();
        assert_eq!(config.position_source(), PositionSourceKind::OpenNotify);

        let config = Config::from_yaml("position:\n  source: sgp4\n").unwrap();
        assert_eq!(config.position_source(), PositionSourceKind::Sgp4);
    }

    #[test]
    fn invalid_observer_is_reported() {
        let config = Config::from_yaml("observer:\n  coordinates: somewhere\n").unwrap();
        assert!(matches!(
            config.station(),
            Err(ConfigError::InvalidObserver(_))
        ));
    }

    #[test]
    fn unknown_source_is_rejected() {
        assert!(matches!(
            Config::from_yaml("position:\n  source: telepathy\n"),
            Err(ConfigError::Yaml(_))
        ));
    }
}
