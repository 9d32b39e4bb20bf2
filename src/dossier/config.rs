use crate::error::Result;
use crate::id::IdStrategy;
use crate::registry::DEFAULT_DOSSIERS;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const CONFIG_FILENAME: &str = "config.json";
const DEFAULT_THUMBNAIL_SCALE: f32 = 0.45;
const DEFAULT_COVER_SUBTITLE: &str = "Dossier de prensa";

pub const CONFIG_KEYS: [&str; 4] = [
    "default-dossiers",
    "thumbnail-scale",
    "cover-subtitle",
    "id-strategy",
];

/// Configuration for dossier sessions, stored in `<config dir>/config.json`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DossierConfig {
    /// Dossiers created at startup, in order
    #[serde(default = "default_dossiers")]
    pub default_dossiers: Vec<String>,

    /// Scale requested when rendering page thumbnails
    #[serde(default = "default_thumbnail_scale")]
    pub thumbnail_scale: f32,

    /// Line printed under the title on every cover page
    #[serde(default = "default_cover_subtitle")]
    pub cover_subtitle: String,

    #[serde(default)]
    pub id_strategy: IdStrategy,
}

fn default_dossiers() -> Vec<String> {
    DEFAULT_DOSSIERS.iter().map(|s| s.to_string()).collect()
}

fn default_thumbnail_scale() -> f32 {
    DEFAULT_THUMBNAIL_SCALE
}

fn default_cover_subtitle() -> String {
    DEFAULT_COVER_SUBTITLE.to_string()
}

impl Default for DossierConfig {
    fn default() -> Self {
        Self {
            default_dossiers: default_dossiers(),
            thumbnail_scale: DEFAULT_THUMBNAIL_SCALE,
            cover_subtitle: default_cover_subtitle(),
            id_strategy: IdStrategy::default(),
        }
    }
}

impl DossierConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path)?;
        let config: DossierConfig = serde_json::from_str(&content)?;
        tracing::debug!(path = %config_path.display(), "loaded config");
        Ok(config)
    }

    /// Value of a config key, formatted the way `set` accepts it
    pub fn get(&self, key: &str) -> Option<String> {
        let value = match key {
            "default-dossiers" => self.default_dossiers.join(", "),
            "thumbnail-scale" => self.thumbnail_scale.to_string(),
            "cover-subtitle" => self.cover_subtitle.clone(),
            "id-strategy" => match self.id_strategy {
                IdStrategy::Random => "random".to_string(),
                IdStrategy::Timestamp => "timestamp".to_string(),
            },
            _ => return None,
        };
        Some(value)
    }

    pub fn set(&mut self, key: &str, value: &str) -> std::result::Result<(), String> {
        match key {
            "default-dossiers" => {
                self.default_dossiers = value
                    .split(',')
                    .map(str::trim)
                    .filter(|name| !name.is_empty())
                    .map(str::to_string)
                    .collect();
            }
            "thumbnail-scale" => {
                let scale: f32 = value
                    .trim()
                    .parse()
                    .map_err(|_| format!("Not a number: {}", value))?;
                if !(scale > 0.0 && scale <= 1.0) {
                    return Err("thumbnail-scale must be in (0, 1]".to_string());
                }
                self.thumbnail_scale = scale;
            }
            "cover-subtitle" => self.cover_subtitle = value.to_string(),
            "id-strategy" => {
                self.id_strategy = match value.trim() {
                    "random" => IdStrategy::Random,
                    "timestamp" => IdStrategy::Timestamp,
                    other => return Err(format!("Unknown id strategy: {}", other)),
                };
            }
            _ => return Err(format!("Unknown config key: {}", key)),
        }
        Ok(())
    }

    /// Every key with its current value, in display order
    pub fn list_all(&self) -> Vec<(&'static str, String)> {
        CONFIG_KEYS
            .iter()
            .filter_map(|key| self.get(key).map(|value| (*key, value)))
            .collect()
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();
        fs::create_dir_all(config_dir)?;

        let content = serde_json::to_string_pretty(self)?;
        fs::write(config_dir.join(CONFIG_FILENAME), content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = DossierConfig::default();
        assert_eq!(
            config.default_dossiers,
            vec!["Política", "Deportes", "Economía"]
        );
        assert_eq!(config.thumbnail_scale, 0.45);
        assert_eq!(config.id_strategy, IdStrategy::Random);
    }

    #[test]
    fn test_load_missing_config() {
        let temp_dir = TempDir::new().unwrap();
        let config = DossierConfig::load(temp_dir.path()).unwrap();
        assert_eq!(config, DossierConfig::default());
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path().join("nested");

        let config = DossierConfig {
            default_dossiers: vec!["Cultura".to_string()],
            id_strategy: IdStrategy::Timestamp,
            ..DossierConfig::default()
        };
        config.save(&dir).unwrap();

        let loaded = DossierConfig::load(&dir).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(
            temp_dir.path().join(CONFIG_FILENAME),
            r#"{ "thumbnail_scale": 0.3 }"#,
        )
        .unwrap();

        let config = DossierConfig::load(temp_dir.path()).unwrap();
        assert_eq!(config.thumbnail_scale, 0.3);
        assert_eq!(config.cover_subtitle, "Dossier de prensa");
        assert_eq!(config.default_dossiers.len(), 3);
    }

    #[test]
    fn test_get_and_set_keys() {
        let mut config = DossierConfig::default();
        config.set("cover-subtitle", "Resumen  semanal").unwrap();
        config.set("default-dossiers", "Cultura, , Ciencia").unwrap();
        config.set("id-strategy", "timestamp").unwrap();
        config.set("thumbnail-scale", "0.3").unwrap();

        assert_eq!(config.get("cover-subtitle").unwrap(), "Resumen  semanal");
        assert_eq!(config.default_dossiers, vec!["Cultura", "Ciencia"]);
        assert_eq!(config.get("id-strategy").unwrap(), "timestamp");
        assert_eq!(config.thumbnail_scale, 0.3);
        assert_eq!(config.list_all().len(), CONFIG_KEYS.len());
    }

    #[test]
    fn test_set_rejects_bad_values() {
        let mut config = DossierConfig::default();
        assert!(config.set("thumbnail-scale", "big").is_err());
        assert!(config.set("thumbnail-scale", "0").is_err());
        assert!(config.set("id-strategy", "sequential").is_err());
        assert!(config.set("colour", "red").is_err());
        assert_eq!(config, DossierConfig::default());
        assert!(config.get("colour").is_none());
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join(CONFIG_FILENAME), "{ nope").unwrap();
        assert!(DossierConfig::load(temp_dir.path()).is_err());
    }
}
