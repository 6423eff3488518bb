use crate::client::Satellite;

/// Only the ISS can be picked from the list.
pub fn is_selectable(satellite: &Satellite) -> bool {
    satellite.is_iss()
}

/// Satellites whose name contains `query`, ignoring case. An empty query
/// keeps everything.
pub fn filter_by_name(satellites: &[Satellite], query: &str) -> Vec<Satellite> {
    let needle = query.to_lowercase();
    satellites
        .iter()
        .filter(|sat| sat.name.to_lowercase().contains(&needle))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sat(id: u32, name: &str) -> Satellite {
        Satellite {
            id,
            name: name.to_string(),
            norad_id: 40000 + id,
            category: "Other".to_string(),
        }
    }

    fn names(list: &[Satellite]) -> Vec<&str> {
        list.iter().map(|s| s.name.as_str()).collect()
    }

    #[test]
    fn matches_substrings_ignoring_case() {
        let catalog = vec![sat(1, "ISS (ZARYA)"), sat(2, "NOAA 19"), sat(3, "Noaa 18")];
        assert_eq!(names(&filter_by_name(&catalog, "noaa")), ["NOAA 19", "Noaa 18"]);
        assert_eq!(names(&filter_by_name(&catalog, "ZaRyA")), ["ISS (ZARYA)"]);
    }

    #[test]
    fn empty_query_keeps_everything() {
        let catalog = vec![sat(1, "ISS (ZARYA)"), sat(2, "NOAA 19")];
        assert_eq!(filter_by_name(&catalog, ""), catalog);
    }

    #[test]
    fn only_the_iss_is_selectable() {
        let iss = Satellite {
            norad_id: crate::catalog::ISS_NORAD_ID,
            ..sat(1, "ISS (ZARYA)")
        };
        assert!(is_selectable(&iss));
        assert!(!is_selectable(&sat(2, "NOAA 19")));
    }

    #[test]
    fn no_match_is_empty() {
        let catalog = vec![sat(1, "ISS (ZARYA)")];
        assert!(filter_by_name(&catalog, "hubble").is_empty());
    }
}
