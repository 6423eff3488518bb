use std::collections::HashMap;
use std::path::PathBuf;

use chrono::Utc;

use crate::catalog::error::CatalogError;
use crate::catalog::tle_loader::{parse_tle, TleLoader};
use crate::catalog::types::{
    DefaultSatellite, Satellite, TleEntry, DEFAULT_CATEGORY, DEFAULT_SATELLITES,
};

pub const SEARCH_LIMIT: usize = 20;

pub struct CatalogEntry {
    pub satellite: Satellite,
    /// `None` when the element set did not parse. The record stays listed
    /// but cannot be propagated.
    pub tle: Option<TleEntry>,
}

/// In-memory satellite catalog, seeded from a TLE folder or the built-in
/// defaults.
pub struct Catalog {
    entries: Vec<CatalogEntry>,
    loader: Option<TleLoader>,
    next_id: u32,
}

impl Catalog {
    pub fn new(tle_folder: Option<PathBuf>) -> Self {
        let mut catalog = Self {
            entries: Vec::new(),
            loader: tle_folder.map(TleLoader::new),
            next_id: 1,
        };

        if catalog.loader.is_some() {
            if let Err(e) = catalog.reload() {
                log::warn!("Failed to load TLE folder: {}", e);
            }
        }

        if catalog.entries.is_empty() {
            catalog.seed_defaults();
        }

        log::info!("Catalog ready with {} satellites", catalog.entries.len());
        catalog
    }

    fn seed_defaults(&mut self) {
        for default in DEFAULT_SATELLITES {
            let id = self.allocate_id();
            self.entries.push(default_entry(id, default));
        }
    }

    fn allocate_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Re-read the TLE folder. Records keep their id and category across
    /// reloads when the NORAD id is already known. Built-in satellites
    /// missing from the folder are kept at the front of the list.
    pub fn reload(&mut self) -> Result<usize, CatalogError> {
        let loader = self.loader.as_ref().ok_or(CatalogError::NoTleFolder)?;
        let loaded = loader.load_all()?;
        if loaded.is_empty() {
            return Err(CatalogError::NoSatellites(loader.dir().display().to_string()));
        }

        let mut known: HashMap<u32, (u32, String)> = self
            .entries
            .iter()
            .map(|e| {
                (
                    e.satellite.norad_id,
                    (e.satellite.id, e.satellite.category.clone()),
                )
            })
            .collect();

        let mut entries: Vec<CatalogEntry> = Vec::with_capacity(loaded.len());
        for tle in loaded {
            let norad_id = tle.norad_id();
            if entries.iter().any(|e| e.satellite.norad_id == norad_id) {
                log::debug!("Skipping duplicate TLE for NORAD {}", norad_id);
                continue;
            }
            let (id, category) = match known.remove(&norad_id) {
                Some(existing) => existing,
                None => (self.allocate_id(), DEFAULT_CATEGORY.to_string()),
            };
            entries.push(CatalogEntry {
                satellite: build_record(id, &tle, &category),
                tle: Some(tle),
            });
        }

        let missing: Vec<&DefaultSatellite> = DEFAULT_SATELLITES
            .iter()
            .filter(|d| !entries.iter().any(|e| e.satellite.norad_id == d.norad_id))
            .collect();
        for (position, default) in missing.into_iter().enumerate() {
            log::info!("{} is not in the TLE folder, keeping the built-in entry", default.name);
            let id = match known.remove(&default.norad_id) {
                Some((id, _)) => id,
                None => self.allocate_id(),
            };
            entries.insert(position, default_entry(id, default));
        }

        let count = entries.len();
        self.entries = entries;
        Ok(count)
    }

    pub fn has_tle_folder(&self) -> bool {
        self.loader.is_some()
    }

    pub fn active(&self) -> Vec<Satellite> {
        self.entries
            .iter()
            .filter(|e| e.satellite.is_active)
            .map(|e| e.satellite.clone())
            .collect()
    }

    pub fn find_by_norad(&self, norad_id: u32) -> Option<&CatalogEntry> {
        self.entries
            .iter()
            .find(|e| e.satellite.norad_id == norad_id && e.satellite.is_active)
    }

    pub fn find_by_id(&self, id: u32) -> Option<&CatalogEntry> {
        self.entries.iter().find(|e| e.satellite.id == id)
    }

    /// Hide a satellite from listings and position lookups.
    #[cfg(test)]
    pub fn deactivate(&mut self, norad_id: u32) -> bool {
        match self
            .entries
            .iter_mut()
            .find(|e| e.satellite.norad_id == norad_id)
        {
            Some(entry) => {
                entry.satellite.is_active = false;
                entry.satellite.last_updated = Some(Utc::now());
                true
            }
            None => false,
        }
    }

    /// Case-insensitive name search over active satellites.
    pub fn search(&self, query: &str) -> Result<Vec<Satellite>, CatalogError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(CatalogError::EmptyQuery);
        }
        let needle = query.to_lowercase();

        Ok(self
            .entries
            .iter()
            .filter(|e| e.satellite.is_active)
            .filter(|e| e.satellite.name.to_lowercase().contains(&needle))
            .take(SEARCH_LIMIT)
            .map(|e| e.satellite.clone())
            .collect())
    }
}

fn build_record(id: u32, tle: &TleEntry, category: &str) -> Satellite {
    Satellite {
        id,
        name: tle.name.clone(),
        norad_id: tle.norad_id(),
        line1: tle.line1.clone(),
        line2: tle.line2.clone(),
        category: category.to_string(),
        is_active: true,
        last_updated: Some(Utc::now()),
    }
}

fn default_entry(id: u32, default: &DefaultSatellite) -> CatalogEntry {
    let tle = match parse_tle(
        Some(default.name.to_string()),
        default.line1,
        default.line2,
        "defaults",
    ) {
        Ok(tle) => Some(tle),
        Err(e) => {
            log::warn!("Built-in TLE for {} is invalid: {}", default.name, e);
            None
        }
    };

    CatalogEntry {
        satellite: Satellite {
            id,
            name: default.name.to_string(),
            norad_id: default.norad_id,
            line1: default.line1.to_string(),
            line2: default.line2.to_string(),
            category: default.category.to_string(),
            is_active: true,
            last_updated: Some(Utc::now()),
        },
        tle,
    }
}
