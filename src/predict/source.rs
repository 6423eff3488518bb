use chrono::{DateTime, TimeDelta, Utc};
use serde::Deserialize;
use tokio::sync::RwLock;

use crate::catalog::Catalog;
use crate::predict::error::PredictError;
use crate::predict::ground_station::GroundStation;
use crate::predict::propagation::{propagate_position, round2};
use crate::predict::types::PositionFix;

pub const OPEN_NOTIFY_URL: &str = "http://api.open-notify.org/iss-now.json";

/// Element sets older (or newer) than this are not propagated.
pub const MAX_ELEMENT_AGE_DAYS: i64 = 14;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, strum_macros::Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum PositionSourceKind {
    Sgp4,
    OpenNotify,
}

/// Where the server gets the current ISS position from.
pub enum PositionSource {
    /// Propagate the catalog TLE locally.
    Sgp4 { station: GroundStation },
    /// Proxy the Open Notify `iss-now` endpoint. Look angles are unknown.
    OpenNotify { client: reqwest::Client, url: String },
}

impl PositionSource {
    pub fn kind(&self) -> PositionSourceKind {
        match self {
            PositionSource::Sgp4 { .. } => PositionSourceKind::Sgp4,
            PositionSource::OpenNotify { .. } => PositionSourceKind::OpenNotify,
        }
    }

    pub async fn current(
        &self,
        catalog: &RwLock<Catalog>,
        norad_id: u32,
    ) -> Result<PositionFix, PredictError> {
        self.at(catalog, norad_id, Utc::now()).await
    }

    pub async fn at(
        &self,
        catalog: &RwLock<Catalog>,
        norad_id: u32,
        timestamp: DateTime<Utc>,
    ) -> Result<PositionFix, PredictError> {
        match self {
            PositionSource::Sgp4 { station } => {
                let catalog = catalog.read().await;
                let entry = catalog
                    .find_by_norad(norad_id)
                    .ok_or(PredictError::NotInCatalog(norad_id))?;
                let tle = entry
                    .tle
                    .as_ref()
                    .ok_or(PredictError::NoElements(norad_id))?;

                let epoch = DateTime::<Utc>::from_naive_utc_and_offset(tle.elements.datetime, Utc);
                let age = timestamp - epoch;
                if age.abs() > TimeDelta::days(MAX_ELEMENT_AGE_DAYS) {
                    return Err(PredictError::StaleElements {
                        norad_id,
                        age_days: age.num_days(),
                    });
                }

                propagate_position(station, &tle.elements, &tle.constants, timestamp)
            }
            PositionSource::OpenNotify { client, url } => {
                let response: OpenNotifyResponse = client
                    .get(url.as_str())
                    .send()
                    .await?
                    .error_for_status()?
                    .json()
                    .await?;
                response.into_fix()
            }
        }
    }
}

#[derive(Debug, Deserialize)]
struct OpenNotifyResponse {
    message: String,
    #[serde(default)]
    timestamp: i64,
    #[serde(default)]
    iss_position: Option<OpenNotifyCoordinates>,
}

// Open Notify sends the coordinates as strings.
#[derive(Debug, Deserialize)]
struct OpenNotifyCoordinates {
    latitude: String,
    longitude: String,
}

impl OpenNotifyResponse {
    fn into_fix(self) -> Result<PositionFix, PredictError> {
        if self.message != "success" {
            return Err(PredictError::Upstream(self.message));
        }
        let coordinates = self
            .iss_position
            .ok_or_else(|| PredictError::Upstream("missing iss_position".into()))?;

        let parse = |value: &str, what: &str| {
            value
                .trim()
                .parse::<f64>()
                .map_err(|_| PredictError::Upstream(format!("invalid {what}: {value}")))
        };
        let latitude = parse(&coordinates.latitude, "latitude")?;
        let longitude = parse(&coordinates.longitude, "longitude")?;
        let timestamp = DateTime::from_timestamp(self.timestamp, 0)
            .ok_or_else(|| PredictError::Upstream(format!("invalid timestamp: {}", self.timestamp)))?;

        Ok(PositionFix {
            latitude: round2(latitude),
            longitude: round2(longitude),
            azimuth: None,
            elevation: None,
            range_km: None,
            visible: None,
            timestamp,
        })
    }
}
