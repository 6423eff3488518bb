use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

/// Where a satellite is at a given instant, as reported by a position
/// source. Look angles are absent when the source cannot provide them.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct PositionFix {
    pub latitude: f64,
    pub longitude: f64,
    pub azimuth: Option<f64>,
    pub elevation: Option<f64>,
    pub range_km: Option<f64>,
    pub visible: Option<bool>,
    pub timestamp: DateTime<Utc>,
}
