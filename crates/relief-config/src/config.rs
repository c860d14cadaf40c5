//! Configuration structs with defaults and RON persistence.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// File name of the configuration inside the config directory.
pub const CONFIG_FILE: &str = "relief.ron";

/// Top-level configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Surfaces that can be built, by name.
    pub surfaces: Vec<SurfaceConfig>,
    /// Surface built when none is requested explicitly.
    pub active_surface: String,
    /// Camera settings derived from surface extents.
    pub camera: CameraConfig,
    /// Worker pool settings.
    pub meshing: MeshingConfig,
    /// Debug/development settings.
    pub debug: DebugConfig,
}

/// Layer files of one surface.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SurfaceConfig {
    pub name: String,
    /// Mandatory elevation grid.
    pub elevation: PathBuf,
    /// Optional thickness overlay; a missing file disables it.
    pub thickness: Option<PathBuf>,
    /// Optional temperature overlay; a missing file disables it.
    pub temperature: Option<PathBuf>,
}

impl SurfaceConfig {
    /// A surface with only an elevation grid.
    pub fn new(name: impl Into<String>, elevation: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            elevation: elevation.into(),
            thickness: None,
            temperature: None,
        }
    }

    fn resolve(&mut self, base: &Path) {
        let join = |p: &mut PathBuf| {
            if p.is_relative() {
                *p = base.join(&*p);
            }
        };
        join(&mut self.elevation);
        if let Some(p) = self.thickness.as_mut() {
            join(p);
        }
        if let Some(p) = self.temperature.as_mut() {
            join(p);
        }
    }
}

/// Camera configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CameraConfig {
    /// Seconds needed to fly across the longer side of a surface.
    pub speed_divisor: f32,
}

/// Worker pool configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct MeshingConfig {
    /// Worker threads (0 = one per CPU).
    pub workers: usize,
    /// Maximum surfaces queued or building at once.
    pub budget: usize,
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
}

// --- Default implementations ---

impl Default for Config {
    fn default() -> Self {
        Self {
            surfaces: vec![
                SurfaceConfig {
                    name: "colata".to_string(),
                    elevation: PathBuf::from("data/altitudes.dat"),
                    thickness: Some(PathBuf::from("data/lava.dat")),
                    temperature: Some(PathBuf::from("data/temperature.dat")),
                },
                SurfaceConfig::new("albano", "data/DEM_Albano.asc"),
                SurfaceConfig::new("curti", "data/DEM_Curti.asc"),
            ],
            active_surface: "colata".to_string(),
            camera: CameraConfig::default(),
            meshing: MeshingConfig::default(),
            debug: DebugConfig::default(),
        }
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self { speed_divisor: 2.0 }
    }
}

impl Default for MeshingConfig {
    fn default() -> Self {
        Self {
            workers: 0,
            budget: 8,
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

// --- Queries ---

impl Config {
    /// Look up a surface by name.
    pub fn surface(&self, name: &str) -> Option<&SurfaceConfig> {
        self.surfaces.iter().find(|s| s.name == name)
    }

    /// The surface named by `active_surface`.
    pub fn active(&self) -> Result<&SurfaceConfig, ConfigError> {
        self.surface(&self.active_surface)
            .ok_or_else(|| ConfigError::UnknownSurface(self.active_surface.clone()))
    }

    /// Make every relative surface path absolute against `base`.
    pub fn resolve(mut self, base: &Path) -> Self {
        for surface in &mut self.surfaces {
            surface.resolve(base);
        }
        self
    }

    /// Check cross-field constraints that serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut names = HashSet::new();
        for surface in &self.surfaces {
            if !names.insert(surface.name.as_str()) {
                return Err(ConfigError::DuplicateSurface(surface.name.clone()));
            }
        }
        if self.camera.speed_divisor.is_nan() || self.camera.speed_divisor <= 0.0 {
            return Err(ConfigError::InvalidValue {
                field: "camera.speed_divisor",
                reason: format!("must be positive, got {}", self.camera.speed_divisor),
            });
        }
        if self.meshing.budget == 0 {
            return Err(ConfigError::InvalidValue {
                field: "meshing.budget",
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

// --- Load / Save / Reload ---

impl Config {
    /// Load config from the given directory, or create a default config file.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join(CONFIG_FILE);

        if config_path.exists() {
            let config = Self::read(&config_path)?;
            log::info!("Loaded config from {}", config_path.display());
            Ok(config)
        } else {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!("Created default config at {}", config_path.display());
            Ok(config)
        }
    }

    /// Save config to the given directory as `relief.ron`.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        let config_path = config_dir.join(CONFIG_FILE);
        std::fs::create_dir_all(config_dir).map_err(|source| ConfigError::WriteError {
            path: config_dir.to_path_buf(),
            source,
        })?;

        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .separate_tuple_members(true)
            .enumerate_arrays(false);
        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::SerializeError)?;

        std::fs::write(&config_path, serialized).map_err(|source| ConfigError::WriteError {
            path: config_path.clone(),
            source,
        })
    }

    /// Hot-reload: returns `Some(new_config)` if the file changed, `None` otherwise.
    pub fn reload(&self, config_dir: &Path) -> Result<Option<Self>, ConfigError> {
        let new_config = Self::read(&config_dir.join(CONFIG_FILE))?;

        if &new_config != self {
            log::info!("Config reloaded with changes");
            Ok(Some(new_config))
        } else {
            Ok(None)
        }
    }

    fn read(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadError {
            path: path.to_path_buf(),
            source,
        })?;
        ron::from_str(&contents).map_err(ConfigError::ParseError)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_serializes() {
        let config = Config::default();
        let ron_str =
            ron::ser::to_string_pretty(&config, ron::ser::PrettyConfig::new().depth_limit(3))
                .unwrap();
        assert!(ron_str.contains("active_surface: \"colata\""));
        assert!(ron_str.contains("DEM_Albano.asc"));
    }

    #[test]
    fn test_config_roundtrip() {
        let config = Config::default();
        let ron_str = ron::to_string(&config).unwrap();
        let deserialized: Config = ron::from_str(&ron_str).unwrap();
        assert_eq!(config, deserialized);
    }

    #[test]
    fn test_default_surfaces() {
        let config = Config::default();
        let colata = config.active().unwrap();
        assert_eq!(colata.name, "colata");
        assert_eq!(colata.thickness, Some(PathBuf::from("data/lava.dat")));
        assert!(config.surface("curti").unwrap().temperature.is_none());
        assert!(config.surface("etna").is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_field_uses_default() {
        let config: Config = ron::from_str("(active_surface: \"albano\")").unwrap();
        assert_eq!(config.camera, CameraConfig::default());
        assert_eq!(config.surfaces.len(), 3);
        assert_eq!(config.active().unwrap().name, "albano");
    }

    #[test]
    fn test_extra_field_ignored() {
        let result: Result<Config, _> = ron::from_str("(future_setting: true)");
        assert!(result.is_ok());
    }

    #[test]
    fn test_surface_list_from_ron() {
        let ron_str = r#"(
            surfaces: [
                (name: "flow", elevation: "dem.asc", thickness: Some("thick.asc")),
            ],
            active_surface: "flow",
        )"#;
        let config: Config = ron::from_str(ron_str).unwrap();
        assert_eq!(config.surfaces.len(), 1);
        let flow = config.active().unwrap();
        assert_eq!(flow.thickness, Some(PathBuf::from("thick.asc")));
        assert_eq!(flow.temperature, None);
    }

    #[test]
    fn test_unknown_active_surface() {
        let config = Config {
            active_surface: "missing".to_string(),
            ..Config::default()
        };
        assert!(matches!(
            config.active(),
            Err(ConfigError::UnknownSurface(name)) if name == "missing"
        ));
    }

    #[test]
    fn test_validate_rejects_duplicates() {
        let mut config = Config::default();
        config
            .surfaces
            .push(SurfaceConfig::new("albano", "other.asc"));
        assert!(matches!(
            config.validate(),
            Err(ConfigError::DuplicateSurface(name)) if name == "albano"
        ));
    }

    #[test]
    fn test_validate_rejects_bad_numbers() {
        let mut config = Config::default();
        config.camera.speed_divisor = 0.0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.meshing.budget = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_resolve_joins_relative_paths() {
        let base = Path::new("/srv/relief");
        let mut config = Config::default();
        config
            .surfaces
            .push(SurfaceConfig::new("abs", "/data/abs.asc"));
        let config = config.resolve(base);

        let colata = config.surface("colata").unwrap();
        assert_eq!(colata.elevation, base.join("data/altitudes.dat"));
        assert_eq!(colata.thickness, Some(base.join("data/lava.dat")));
        assert_eq!(
            config.surface("abs").unwrap().elevation,
            PathBuf::from("/data/abs.asc")
        );
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.active_surface = "curti".to_string();
        config.meshing.workers = 3;

        config.save(dir.path()).unwrap();
        let loaded = Config::load_or_create(dir.path()).unwrap();
        assert_eq!(config, loaded);
    }

    #[test]
    fn test_load_or_create_writes_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_or_create(dir.path()).unwrap();
        assert_eq!(config, Config::default());
        assert!(dir.path().join(CONFIG_FILE).exists());
    }

    #[test]
    fn test_reload_detects_changes() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::default();
        config.save(dir.path()).unwrap();

        let mut modified = config.clone();
        modified.camera.speed_divisor = 4.0;
        modified.save(dir.path()).unwrap();

        let result = config.reload(dir.path()).unwrap();
        assert_eq!(result.unwrap().camera.speed_divisor, 4.0);
    }

    #[test]
    fn test_reload_no_changes() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::default();
        config.save(dir.path()).unwrap();
        assert!(config.reload(dir.path()).unwrap().is_none());
    }

    #[test]
    fn test_invalid_ron_produces_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE), "{{not valid}}").unwrap();
        assert!(matches!(
            Config::load_or_create(dir.path()),
            Err(ConfigError::ParseError(_))
        ));
    }
}
