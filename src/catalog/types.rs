use chrono::{DateTime, Utc};
use serde::Serialize;
use sgp4::{Constants, Elements};
use utoipa::ToSchema;

pub const ISS_NORAD_ID: u32 = 25544;
pub const ISS_NAME: &str = "ISS (ZARYA)";
pub const DEFAULT_CATEGORY: &str = "Other";

/// A satellite as exposed by the catalog endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Satellite {
    pub id: u32,
    pub name: String,
    pub norad_id: u32,
    pub line1: String,
    pub line2: String,
    pub category: String,
    pub is_active: bool,
    pub last_updated: Option<DateTime<Utc>>,
}

/// Parsed TLE ready to be handed to the propagator.
pub struct TleEntry {
    pub name: String,
    pub line1: String,
    pub line2: String,
    pub elements: Elements,
    pub constants: Constants,
}

impl TleEntry {
    pub fn norad_id(&self) -> u32 {
        self.elements.norad_id as u32
    }
}

/// Built-in catalog entry. The record is kept even when its elements do not
/// parse; only propagation needs them.
pub struct DefaultSatellite {
    pub name: &'static str,
    pub norad_id: u32,
    pub line1: &'static str,
    pub line2: &'static str,
    pub category: &'static str,
}

pub const DEFAULT_SATELLITES: &[DefaultSatellite] = &[DefaultSatellite {
    name: ISS_NAME,
    norad_id: ISS_NORAD_ID,
    line1: "1 25544U 98067A   25258.58667824  .00000862  00000-0  23985-4 0  9995",
    line2: "2 25544  51.6444 177.8408 0007929  67.2999  15.7149 15.50246502358834",
    category: "Space Stations",
}];
