use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use std::{collections::HashMap, fs, path::PathBuf};

use serde::{Deserialize, Serialize};

use crate::model::Location;

/// Top-level configuration: the airfield registry and the location used
/// when a request names none.
///
/// The registry is read once at startup and then passed around by
/// reference; nothing mutates it afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Identifier used when a request carries no `locations` parameter.
    #[serde(default = "default_location_id")]
    pub default_location: String,

    /// Example TOML:
    /// [locations.ESSA]
    /// lon = 17.916
    /// lat = 59.652
    /// runways = [190, 260]
    #[serde(default = "builtin_locations")]
    pub locations: HashMap<String, Location>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_location: default_location_id(),
            locations: builtin_locations(),
        }
    }
}

fn default_location_id() -> String {
    "ESSN".to_string()
}

/// The built-in registry of airfields around lake Mälaren.
fn builtin_locations() -> HashMap<String, Location> {
    fn loc(lon: f64, lat: f64, runways: &[u32]) -> Location {
        Location {
            lon,
            lat,
            runways: runways.to_vec(),
        }
    }

    HashMap::from([
        ("ESSN".to_string(), loc(18.697, 59.733, &[70])), // Norrtälje
        ("ESSU".to_string(), loc(16.708, 59.35, &[180])), // Eskilstuna
        ("ESSB".to_string(), loc(17.912, 59.469, &[120])), // Bromma
        ("ESHR".to_string(), loc(18.251, 59.48, &[])),    // Åkersberga
        ("ESKT".to_string(), loc(17.429, 60.347, &[160])), // Tierp
        ("ESSA".to_string(), loc(17.916, 59.652, &[190, 260])), // Arlanda
        ("GIMO".to_string(), loc(18.097, 60.102, &[50])), // Gimo/Lunda
        ("Frölunda".to_string(), loc(17.708, 59.456, &[160])),
        ("ESOW".to_string(), loc(16.634, 59.59, &[10])), // Västerås
        ("ESSX".to_string(), loc(16.502, 59.578, &[50])), // Johannisberg
    ])
}

impl Config {
    pub fn location(&self, id: &str) -> Option<&Location> {
        self.locations.get(id)
    }

    /// Load config from disk, or return the built-in registry if no config
    /// file exists yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("se", "wxbrief", "wxbrief")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_registry_has_arlanda_with_both_runways() {
        let cfg = Config::default();
        let essa = cfg.location("ESSA").expect("ESSA must be built in");

        assert_eq!(essa.runways, vec![190, 260]);
        assert_eq!(essa.lon, 17.916);
        assert_eq!(essa.lat, 59.652);
    }

    #[test]
    fn fields_without_runways_default_to_empty() {
        let cfg = Config::default();
        let eshr = cfg.location("ESHR").expect("ESHR must be built in");

        assert!(eshr.runways.is_empty());
    }

    #[test]
    fn default_location_is_in_the_registry() {
        let cfg = Config::default();

        assert!(cfg.location(&cfg.default_location).is_some());
    }

    #[test]
    fn unknown_identifier_is_none() {
        let cfg = Config::default();

        assert!(cfg.location("ZZZZ").is_none());
    }

    #[test]
    fn custom_registry_parses_from_toml() {
        let toml = r#"
            default_location = "ESGJ"

            [locations.ESGJ]
            lon = 13.967
            lat = 57.757
            runways = [10]

            [locations.ESMX]
            lon = 14.728
            lat = 56.929
        "#;

        let cfg: Config = toml::from_str(toml).expect("config must parse");

        assert_eq!(cfg.default_location, "ESGJ");
        assert_eq!(cfg.location("ESGJ").unwrap().runways, vec![10]);
        // Missing runways key falls back to an empty list.
        assert!(cfg.location("ESMX").unwrap().runways.is_empty());
    }
}
