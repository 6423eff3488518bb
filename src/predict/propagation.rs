use chrono::{DateTime, Utc};
use sgp4::{Constants, Elements};

use crate::predict::error::PredictError;
use crate::predict::ground_station::{GroundStation, WGS84_A_KM, WGS84_E2};
use crate::predict::types::PositionFix;

const GEODETIC_ITERATIONS: usize = 5;

/// Geodetic coordinates of the point directly below the satellite.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SubPoint {
    pub latitude_deg: f64,
    pub longitude_deg: f64,
    pub altitude_km: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LookAngles {
    pub azimuth_deg: f64,
    pub elevation_deg: f64,
    pub range_km: f64,
}

/// Propagate to `timestamp` and describe the result as seen from `station`.
pub fn propagate_position(
    station: &GroundStation,
    elements: &Elements,
    constants: &Constants,
    timestamp: DateTime<Utc>,
) -> Result<PositionFix, PredictError> {
    let sat_ecef = propagate_ecef(elements, constants, timestamp)?;
    let sub = ecef_to_geodetic(sat_ecef);
    let look = look_angles(station, sat_ecef);
    let elevation = round2(look.elevation_deg);

    Ok(PositionFix {
        latitude: round2(sub.latitude_deg),
        longitude: round2(sub.longitude_deg),
        azimuth: Some(round2(look.azimuth_deg)),
        elevation: Some(elevation),
        range_km: Some(round2(look.range_km)),
        visible: Some(elevation >= 0.0),
        timestamp,
    })
}

pub fn propagate_ecef(
    elements: &Elements,
    constants: &Constants,
    timestamp: DateTime<Utc>,
) -> Result<[f64; 3], PredictError> {
    let minutes = elements
        .datetime_to_minutes_since_epoch(&timestamp.naive_utc())
        .map_err(|e| PredictError::Propagation(e.to_string()))?;

    let prediction = constants
        .propagate(minutes)
        .map_err(|e| PredictError::Propagation(e.to_string()))?;

    let sidereal =
        sgp4::iau_epoch_to_sidereal_time(sgp4::julian_years_since_j2000(&timestamp.naive_utc()));

    Ok(teme_to_ecef_position(prediction.position, sidereal))
}

pub fn teme_to_ecef_position(pos_teme: [f64; 3], gmst: f64) -> [f64; 3] {
    let cos_gmst = gmst.cos();
    let sin_gmst = gmst.sin();
    [
        pos_teme[0] * cos_gmst + pos_teme[1] * sin_gmst,
        -pos_teme[0] * sin_gmst + pos_teme[1] * cos_gmst,
        pos_teme[2],
    ]
}

/// WGS-84 geodetic coordinates from an ECEF position (km), iterating on the
/// latitude.
pub fn ecef_to_geodetic(ecef: [f64; 3]) -> SubPoint {
    let [x, y, z] = ecef;
    let p = (x * x + y * y).sqrt();
    let longitude = y.atan2(x);

    let mut latitude = z.atan2(p * (1.0 - WGS84_E2));
    let mut altitude = 0.0;
    for _ in 0..GEODETIC_ITERATIONS {
        let sin_lat = latitude.sin();
        let n = WGS84_A_KM / (1.0 - WGS84_E2 * sin_lat * sin_lat).sqrt();
        altitude = if latitude.cos().abs() > 1e-12 {
            p / latitude.cos() - n
        } else {
            z.abs() - n * (1.0 - WGS84_E2)
        };
        latitude = z.atan2(p * (1.0 - WGS84_E2 * n / (n + altitude)));
    }

    SubPoint {
        latitude_deg: latitude.to_degrees(),
        longitude_deg: longitude.to_degrees(),
        altitude_km: altitude,
    }
}

pub fn look_angles(station: &GroundStation, sat_ecef: [f64; 3]) -> LookAngles {
    let sta_ecef = station.position_ecef_km();
    let dr = [
        sat_ecef[0] - sta_ecef[0],
        sat_ecef[1] - sta_ecef[1],
        sat_ecef[2] - sta_ecef[2],
    ];
    let range_km = (dr[0] * dr[0] + dr[1] * dr[1] + dr[2] * dr[2]).sqrt();

    let (east, north, up) = ecef_to_enu(dr, station.lat_rad(), station.lon_rad());
    let azimuth_deg = east.atan2(north).to_degrees().rem_euclid(360.0);
    let elevation_deg = if range_km > 0.0 {
        (up / range_km).asin().to_degrees()
    } else {
        0.0
    };

    LookAngles {
        azimuth_deg,
        elevation_deg,
        range_km,
    }
}

pub fn ecef_to_enu(dr: [f64; 3], lat_rad: f64, lon_rad: f64) -> (f64, f64, f64) {
    let sin_lat = lat_rad.sin();
    let cos_lat = lat_rad.cos();
    let sin_lon = lon_rad.sin();
    let cos_lon = lon_rad.cos();

    let east = -sin_lon * dr[0] + cos_lon * dr[1];
    let north = -sin_lat * cos_lon * dr[0] - sin_lat * sin_lon * dr[1] + cos_lat * dr[2];
    let up = cos_lat * cos_lon * dr[0] + cos_lat * sin_lon * dr[1] + sin_lat * dr[2];
    (east, north, up)
}

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
