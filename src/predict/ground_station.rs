pub const WGS84_A_KM: f64 = 6378.137;
pub const WGS84_E2: f64 = 0.006_694_379_990_14;

/// Observer location used for look angles and visibility.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroundStation {
    pub latitude_deg: f64,
    pub longitude_deg: f64,
    pub altitude_m: f64,
}

impl Default for GroundStation {
    // Paris
    fn default() -> Self {
        Self {
            latitude_deg: 48.8566,
            longitude_deg: 2.3522,
            altitude_m: 35.0,
        }
    }
}

impl GroundStation {
    /// Parse `"lat, lon"`.
    pub fn from_coordinates(coordinates: &str, altitude_m: Option<f64>) -> Option<Self> {
        let parts: Vec<_> = coordinates.split(',').map(|s| s.trim()).collect();
        if parts.len() != 2 {
            return None;
        }
        let latitude_deg: f64 = parts[0].parse().ok()?;
        let longitude_deg: f64 = parts[1].parse().ok()?;
        if !(-90.0..=90.0).contains(&latitude_deg) || !(-180.0..=180.0).contains(&longitude_deg) {
            return None;
        }
        Some(Self {
            latitude_deg,
            longitude_deg,
            altitude_m: altitude_m.unwrap_or(0.0),
        })
    }

    pub fn lat_rad(&self) -> f64 {
        self.latitude_deg.to_radians()
    }

    pub fn lon_rad(&self) -> f64 {
        self.longitude_deg.to_radians()
    }

    pub fn position_ecef_km(&self) -> [f64; 3] {
        let lat = self.lat_rad();
        let lon = self.lon_rad();
        let sin_lat = lat.sin();
        let n = WGS84_A_KM / (1.0 - WGS84_E2 * sin_lat * sin_lat).sqrt();
        let alt_km = self.altitude_m / 1000.0;
        [
            (n + alt_km) * lat.cos() * lon.cos(),
            (n + alt_km) * lat.cos() * lon.sin(),
            (n * (1.0 - WGS84_E2) + alt_km) * sin_lat,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_coordinates() {
        let station = GroundStation::from_coordinates("48.8566, 2.3522", Some(35.0)).unwrap();
        assert_eq!(station, GroundStation::default());
    }

    #[test]
    fn rejects_malformed_coordinates() {
        assert!(GroundStation::from_coordinates("48.8566", None).is_none());
        assert!(GroundStation::from_coordinates("north, east", None).is_none());
        assert!(GroundStation::from_coordinates("91.0, 0.0", None).is_none());
        assert!(GroundStation::from_coordinates("1, 2, 3", None).is_none());
    }

    #[test]
    fn equator_station_sits_on_semi_major_axis() {
        let station = GroundStation::from_coordinates("0, 0", None).unwrap();
        let [x, y, z] = station.position_ecef_km();
        assert!((x - WGS84_A_KM).abs() < 1e-9);
        assert!(y.abs() < 1e-9);
        assert!(z.abs() < 1e-9);
    }
}
