use std::fs;
use std::path::{Path, PathBuf};

use sgp4::{Constants, Elements};

use crate::catalog::error::CatalogError;
use crate::catalog::types::TleEntry;

pub struct TleLoader {
    tle_dir: PathBuf,
}

impl TleLoader {
    pub fn new(tle_dir: PathBuf) -> Self {
        Self { tle_dir }
    }

    pub fn dir(&self) -> &Path {
        &self.tle_dir
    }

    /// Load every `.tle`/`.txt` file of the directory. Files that fail to
    /// parse are skipped with a warning.
    pub fn load_all(&self) -> Result<Vec<TleEntry>, CatalogError> {
        if !self.tle_dir.exists() {
            return Err(CatalogError::DirectoryNotFound(
                self.tle_dir.display().to_string(),
            ));
        }

        let mut paths = Vec::new();
        for entry in fs::read_dir(&self.tle_dir)? {
            let path = entry?.path();
            let is_tle = path
                .extension()
                .map(|ext| ext == "tle" || ext == "txt")
                .unwrap_or(false);
            if path.is_file() && is_tle {
                paths.push(path);
            }
        }
        // read_dir order is platform dependent
        paths.sort();

        let mut loaded = Vec::new();
        for path in paths {
            match parse_tle_file(&path) {
                Ok(entries) => {
                    log::debug!("Loaded {} TLEs from {}", entries.len(), path.display());
                    loaded.extend(entries);
                }
                Err(e) => log::warn!("Failed to parse TLE file {}: {}", path.display(), e),
            }
        }

        Ok(loaded)
    }
}

fn parse_tle_file(path: &Path) -> Result<Vec<TleEntry>, CatalogError> {
    let content = fs::read_to_string(path)?;
    let filename = path
        .file_name()
        .unwrap_or_default()
        .to_string_lossy()
        .to_string();

    parse_multi_tle(&content)
        .into_iter()
        .map(|(name, line1, line2)| parse_tle(name, &line1, &line2, &filename))
        .collect()
}

/// Parse a single element set. `source_name` only shows up in errors.
pub fn parse_tle(
    name: Option<String>,
    line1: &str,
    line2: &str,
    source_name: &str,
) -> Result<TleEntry, CatalogError> {
    let invalid = |message: String| CatalogError::InvalidTle {
        source_name: source_name.to_string(),
        message,
    };

    let elements = Elements::from_tle(name.clone(), line1.as_bytes(), line2.as_bytes())
        .map_err(|e| invalid(e.to_string()))?;
    let constants = Constants::from_elements(&elements).map_err(|e| invalid(e.to_string()))?;

    let name = name.unwrap_or_else(|| format!("NORAD {}", elements.norad_id));

    Ok(TleEntry {
        name,
        line1: line1.to_string(),
        line2: line2.to_string(),
        elements,
        constants,
    })
}

/// Split file content into (name, line1, line2) triples. Both the 2-line and
/// the named 3-line layouts are accepted; anything else is skipped.
pub fn parse_multi_tle(content: &str) -> Vec<(Option<String>, String, String)> {
    let lines: Vec<&str> = content
        .lines()
        .map(|l| l.trim())
        .filter(|l| !l.is_empty())
        .collect();

    let mut result = Vec::new();
    let mut i = 0;

    while i < lines.len() {
        if lines[i].starts_with("1 ") && i + 1 < lines.len() && lines[i + 1].starts_with("2 ") {
            result.push((None, lines[i].to_string(), lines[i + 1].to_string()));
            i += 2;
        } else if i + 2 < lines.len()
            && lines[i + 1].starts_with("1 ")
            && lines[i + 2].starts_with("2 ")
        {
            result.push((
                Some(lines[i].to_string()),
                lines[i + 1].to_string(),
                lines[i + 2].to_string(),
            ));
            i += 3;
        } else {
            i += 1;
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::types::{DEFAULT_SATELLITES, ISS_NORAD_ID};

    #[test]
    fn splits_named_and_unnamed_entries() {
        let iss = &DEFAULT_SATELLITES[0];
        let content = format!(
            "{}\n{}\n{}\n\n{}\n{}\ngarbage line\n",
            iss.name, iss.line1, iss.line2, iss.line1, iss.line2
        );

        let triples = parse_multi_tle(&content);
        assert_eq!(triples.len(), 2);
        assert_eq!(triples[0].0.as_deref(), Some("ISS (ZARYA)"));
        assert_eq!(triples[1].0, None);
        assert_eq!(triples[1].1, iss.line1);
    }

    #[test]
    fn parses_default_iss_elements() {
        let iss = &DEFAULT_SATELLITES[0];
        let entry = parse_tle(Some(iss.name.to_string()), iss.line1, iss.line2, "defaults")
            .expect("default TLE parses");
        assert_eq!(entry.norad_id(), ISS_NORAD_ID);
        assert_eq!(entry.name, "ISS (ZARYA)");
    }

    #[test]
    fn unnamed_entry_gets_norad_name() {
        let iss = &DEFAULT_SATELLITES[0];
        let entry = parse_tle(None, iss.line1, iss.line2, "defaults").unwrap();
        assert_eq!(entry.name, "NORAD 25544");
    }

    #[test]
    fn rejects_broken_lines() {
        let err = parse_tle(None, "1 garbage", "2 garbage", "bad.tle").err().unwrap();
        assert!(matches!(err, CatalogError::InvalidTle { ref source_name, .. } if source_name == "bad.tle"));
    }

    #[test]
    fn missing_directory_is_reported() {
        let loader = TleLoader::new(PathBuf::from("/nonexistent/sat-tracker-tles"));
        assert!(matches!(
            loader.load_all(),
            Err(CatalogError::DirectoryNotFound(_))
        ));
    }
}
