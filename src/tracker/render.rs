use std::fmt::Write;
use std::time::Duration;

use chrono::{DateTime, NaiveDateTime};

use crate::client::{Position, Satellite};

use super::filter::is_selectable;
use super::session::ViewState;

pub fn render_catalog(satellites: &[Satellite], selected: Option<&Satellite>) -> String {
    if satellites.is_empty() {
        return "No satellites available\n".to_string();
    }

    let mut out = String::from("Available satellites\n");
    for sat in satellites {
        let marker = if selected.map(|s| s.id) == Some(sat.id) {
            '*'
        } else {
            ' '
        };
        let _ = write!(out, " {} {} (NORAD: {})", marker, sat.name, sat.norad_id);
        if !is_selectable(sat) {
            out.push_str(" [unavailable]");
        }
        out.push('\n');
    }
    out
}

pub fn render_header(view: &ViewState) -> String {
    let observer = &view.observer;
    let mut out = match &view.selected {
        Some(sat) => format!(
            "{}\nNORAD ID: {} | Category: {}\n",
            sat.name, sat.norad_id, sat.category
        ),
        None => "No satellite selected\n".to_string(),
    };
    let _ = writeln!(
        out,
        "Observer: {}, {} ({} m) [fixed]",
        observer.latitude, observer.longitude, observer.elevation
    );
    out.push_str("Upcoming passes: not available\n");
    out
}

pub fn render_position(view: &ViewState, poll_interval: Duration) -> String {
    let Some(position) = &view.position else {
        return if view.selected.is_some() {
            "Start tracking to see the ISS position\n".to_string()
        } else {
            "Select the ISS to begin\n".to_string()
        };
    };

    let mut out = render_cards(position);
    let _ = writeln!(
        out,
        "Last update: {}",
        format_timestamp(position.timestamp.as_deref())
    );
    if view.tracking {
        let _ = writeln!(
            out,
            "Live tracking active (updates every {}s)",
            poll_interval.as_secs()
        );
    }
    out
}

fn render_cards(position: &Position) -> String {
    let range = position
        .range_km
        .map(|r| r.to_string())
        .unwrap_or_else(|| "N/A".to_string());
    let status = if position.is_visible() {
        "Visible"
    } else {
        "Not visible"
    };

    let mut out = format!(
        "Latitude: {}°  Longitude: {}°  Distance (km): {}  Status: {}\n",
        position.latitude, position.longitude, range, status
    );
    if let (Some(azimuth), Some(elevation)) = (position.azimuth, position.elevation) {
        let _ = writeln!(out, "Azimuth: {}°  Elevation: {}°", azimuth, elevation);
    }
    out
}

/// RFC 3339 and naive ISO timestamps are shown in UTC; anything else is
/// printed as received.
pub fn format_timestamp(timestamp: Option<&str>) -> String {
    let Some(raw) = timestamp.filter(|t| !t.trim().is_empty()) else {
        return "N/A".to_string();
    };

    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return parsed.naive_utc().format("%d/%m/%Y %H:%M:%S UTC").to_string();
    }
    if let Ok(parsed) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return parsed.format("%d/%m/%Y %H:%M:%S").to_string();
    }
    raw.to_string()
}
