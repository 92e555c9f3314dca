use crate::constants::*;
use crate::error::{AppError, Result};
use crate::map::ClusterOptions;
use crate::types::LatLng;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::debug;

pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub data: DataConfig,
    pub server: ServerConfig,
    pub map: MapConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// File path or http(s) URL of the JSON array
    pub source: String,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self { source: DEFAULT_DATA_SOURCE.to_string() }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind: String,
    pub assets_dir: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: DEFAULT_BIND.to_string(),
            assets_dir: DEFAULT_ASSETS_DIR.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    pub center: LatLng,
    pub zoom: u8,
    pub locate_zoom: u8,
    pub tile_url: String,
    pub attribution: String,
    pub max_cluster_radius: u32,
    pub disable_clustering_at_zoom: u8,
    pub placeholder_logo: String,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            center: DEFAULT_CENTER.into(),
            zoom: DEFAULT_ZOOM,
            locate_zoom: LOCATE_ZOOM,
            tile_url: DEFAULT_TILE_URL.to_string(),
            attribution: DEFAULT_ATTRIBUTION.to_string(),
            max_cluster_radius: MAX_CLUSTER_RADIUS,
            disable_clustering_at_zoom: DISABLE_CLUSTERING_AT_ZOOM,
            placeholder_logo: PLACEHOLDER_LOGO.to_string(),
        }
    }
}

impl MapConfig {
    pub fn cluster_options(&self) -> ClusterOptions {
        ClusterOptions {
            max_cluster_radius: self.max_cluster_radius,
            disable_clustering_at_zoom: self.disable_clustering_at_zoom,
            spiderfy_on_max_zoom: true,
            show_coverage_on_hover: false,
            zoom_to_bounds_on_click: true,
        }
    }
}

impl Config {
    /// Load `config.toml` (or `path`) if present, then apply environment
    /// overrides. A missing file means defaults.
    pub fn load(path: Option<&str>) -> Result<Self> {
        let config_path = path.unwrap_or(DEFAULT_CONFIG_PATH);
        let mut config = if Path::new(config_path).exists() {
            let config_content = fs::read_to_string(config_path)
                .map_err(|e| AppError::Config(format!("Failed to read config file '{}': {}", config_path, e)))?;
            toml::from_str(&config_content)?
        } else if path.is_some() {
            return Err(AppError::Config(format!("Config file '{}' does not exist", config_path)));
        } else {
            debug!("No {} found, using defaults", config_path);
            Config::default()
        };

        config.apply_env();
        Ok(config)
    }

    fn apply_env(&mut self) {
        if let Ok(source) = std::env::var("CLUB_MAP_DATA") {
            self.data.source = source;
        }
        if let Ok(bind) = std::env::var("CLUB_MAP_BIND") {
            self.server.bind = bind;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.data.source, "data/clubs.json");
        assert_eq!(config.map.locate_zoom, 13);
        assert_eq!(config.map.center, LatLng::new(35.8617, 104.1954));

        let cluster = config.map.cluster_options();
        assert_eq!(cluster.max_cluster_radius, 50);
        assert_eq!(cluster.disable_clustering_at_zoom, 6);
        assert!(!cluster.show_coverage_on_hover);
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[map]\nlocate_zoom = 15\n\n[server]\nassets_dir = \"public\"").unwrap();

        let config = Config::load(file.path().to_str()).unwrap();
        assert_eq!(config.map.locate_zoom, 15);
        assert_eq!(config.map.zoom, 5);
        assert_eq!(config.server.assets_dir, "public");
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[map\nzoom = ").unwrap();
        assert!(matches!(Config::load(file.path().to_str()), Err(AppError::Toml(_))));
    }

    #[test]
    fn test_explicit_missing_path_is_an_error() {
        assert!(matches!(Config::load(Some("/definitely/not/here.toml")), Err(AppError::Config(_))));
    }
}
