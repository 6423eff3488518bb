use serde::Deserialize;

use crate::catalog::ISS_NORAD_ID;

/// Catalog entry as the tracker view sees it.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Satellite {
    pub id: u32,
    pub name: String,
    pub norad_id: u32,
    #[serde(default)]
    pub category: String,
}

impl Satellite {
    pub fn is_iss(&self) -> bool {
        self.norad_id == ISS_NORAD_ID
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Position {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub range_km: Option<f64>,
    #[serde(default)]
    pub azimuth: Option<f64>,
    #[serde(default)]
    pub elevation: Option<f64>,
    /// `null` when the server cannot tell; rendered as not visible.
    #[serde(default)]
    pub visible: Option<bool>,
    #[serde(default)]
    pub timestamp: Option<String>,
}

impl Position {
    pub fn is_visible(&self) -> bool {
        self.visible.unwrap_or(false)
    }
}

/// Observer location. Kept for display only: the ISS endpoint ignores it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObserverLocation {
    pub latitude: f64,
    pub longitude: f64,
    pub elevation: i32,
}

impl Default for ObserverLocation {
    fn default() -> Self {
        Self {
            latitude: 48.8566,
            longitude: 2.3522,
            elevation: 35,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct SatellitesEnvelope {
    pub success: bool,
    #[serde(default)]
    pub satellites: Vec<Satellite>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PositionEnvelope {
    pub success: bool,
    #[serde(default)]
    pub position: Option<Position>,
    #[serde(default)]
    pub error: Option<String>,
}
