mod error;
mod store;
mod tle_loader;
mod types;

pub use error::CatalogError;
pub use store::Catalog;
pub use types::{Satellite, ISS_NAME, ISS_NORAD_ID};

#[cfg(test)]
pub(crate) mod fixtures {
    use std::path::{Path, PathBuf};

    /// A second valid element set (NORAD 33591) for multi-satellite folders.
    pub const OTHER_LINE1: &str =
        "1 33591U 98067A   25258.58667824  .00000862  00000-0  23985-4 0  9996";
    pub const OTHER_LINE2: &str =
        "2 33591  51.6444 177.8408 0007929  67.2999  15.7149 15.50246502358835";

    /// Empty directory under the system temp dir, unique per test name.
    pub fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "sat-tracker-{}-{}",
            name,
            std::process::id()
        ));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    pub fn write_tle(dir: &Path, file: &str, name: &str, line1: &str, line2: &str) {
        std::fs::write(dir.join(file), format!("{name}\n{line1}\n{line2}\n")).unwrap();
    }
}
