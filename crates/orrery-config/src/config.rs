//! Configuration structs with sensible defaults and RON persistence.

use std::path::{Path, PathBuf};

use orrery_orbit::{Backdrop, BodyDescriptor, CentralBody, DescriptorError};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Slowest accepted frame rate: one frame every ten minutes.
pub const MIN_FRAME_RATE: f64 = 1.0 / 600.0;

/// Top-level orrery configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// The star system being modeled.
    pub scene: SceneConfig,
    /// Frame driver settings.
    pub driver: DriverConfig,
    /// Theme song settings.
    pub audio: AudioConfig,
    /// Debug/development settings.
    pub debug: DebugConfig,
}

/// The fixed body table, loaded once at startup.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SceneConfig {
    /// Seed for the initial orbital phases. `None` picks a fresh seed per run.
    pub seed: Option<u64>,
    /// The emissive body at the origin.
    pub central: CentralBody,
    /// Scene lights and the star shell.
    pub backdrop: Backdrop,
    /// Orbiting bodies in registration (and draw) order.
    pub bodies: Vec<BodyDescriptor>,
}

/// Settings of the headless frame driver.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DriverConfig {
    /// Frames per second the driver targets.
    pub frame_rate: f64,
    /// Number of frames to run before exiting.
    pub frames: u64,
    /// Take timestamps from the wall clock instead of stepping them.
    pub realtime: bool,
}

/// Theme song configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AudioConfig {
    /// Volume applied when the theme starts playing (0.0 - 1.0).
    pub theme_volume: f32,
    /// Where the audio collaborator fetches the theme from.
    pub theme_source: String,
    /// Start with the theme playing.
    pub autoplay: bool,
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
}

// --- Default implementations ---

fn planet(distance: f64, size: f64, speed: f64, name: &str) -> BodyDescriptor {
    BodyDescriptor::new(distance, size, speed, format!("/textures/2k_{name}.jpg"))
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            seed: None,
            central: CentralBody::default(),
            backdrop: Backdrop::default(),
            bodies: vec![
                planet(5.0, 0.38, 2.0, "mercury"),
                planet(7.0, 0.95, 1.6, "venus"),
                planet(10.0, 1.0, 1.0, "earth"),
                planet(13.0, 0.53, 0.8, "mars"),
                planet(17.0, 11.2, 0.4, "jupiter"),
                planet(21.0, 9.4, 0.3, "saturn").with_ring(),
                planet(29.0, 3.8, 0.1, "neptune"),
            ],
        }
    }
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            frame_rate: 60.0,
            frames: 600,
            realtime: false,
        }
    }
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            theme_volume: 0.5,
            theme_source: "https://ia801208.us.archive.org/0/items/InterstellarMainThemeExtraExtendedSoundtrackByHansZimmer/Interstellar%20Main%20Theme%20-%20Extra%20Extended%20-%20Soundtrack%20by%20Hans%20Zimmer.mp3".to_string(),
            autoplay: false,
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

/// Default directory holding `config.ron`, if the platform has one.
pub fn default_config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("orrery"))
}

// --- Load / Save ---

impl Config {
    /// Load config from the given directory, or create a default config file.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join("config.ron");

        if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path).map_err(ConfigError::ReadError)?;
            let config: Config = ron::from_str(&contents).map_err(ConfigError::ParseError)?;
            config.validate()?;
            log::info!("Loaded config from {}", config_path.display());
            Ok(config)
        } else {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!("Created default config at {}", config_path.display());
            Ok(config)
        }
    }

    /// Save config to the given directory as `config.ron`.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(ConfigError::WriteError)?;

        let config_path = config_dir.join("config.ron");
        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .separate_tuple_members(true)
            .enumerate_arrays(false);

        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::SerializeError)?;

        std::fs::write(&config_path, serialized).map_err(ConfigError::WriteError)?;
        Ok(())
    }

    /// Checks the body table, the backdrop and the driver and audio settings.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.scene
            .central
            .validate()
            .map_err(ConfigError::InvalidScene)?;
        self.scene
            .backdrop
            .validate()
            .map_err(ConfigError::InvalidScene)?;
        for (index, body) in self.scene.bodies.iter().enumerate() {
            body.validate().map_err(|source| {
                ConfigError::InvalidScene(DescriptorError::Body {
                    index,
                    source: Box::new(source),
                })
            })?;
        }

        if !self.driver.frame_rate.is_finite() || self.driver.frame_rate < MIN_FRAME_RATE {
            return Err(ConfigError::InvalidSetting {
                field: "driver.frame_rate",
                reason: format!(
                    "must be finite and at least {MIN_FRAME_RATE}, got {}",
                    self.driver.frame_rate
                ),
            });
        }
        if !(0.0..=1.0).contains(&self.audio.theme_volume) {
            return Err(ConfigError::InvalidSetting {
                field: "audio.theme_volume",
                reason: format!("must be within 0.0..=1.0, got {}", self.audio.theme_volume),
            });
        }
        Ok(())
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
        assert!(!ron_str.is_empty());
        assert!(ron_str.contains("frame_rate: 60.0"));
        assert!(ron_str.contains("/textures/2k_saturn.jpg"));
    }

    #[test]
    fn test_default_table_matches_solar_system() {
        let scene = SceneConfig::default();
        assert_eq!(scene.bodies.len(), 7);
        let ringed: Vec<&str> = scene
            .bodies
            .iter()
            .filter(|b| b.has_ring)
            .map(|b| b.texture_id.as_str())
            .collect();
        assert_eq!(ringed, ["/textures/2k_saturn.jpg"]);
        assert_eq!(scene.bodies[4].angular_speed, 0.4);
        assert_eq!(scene.central.texture_id, "/textures/2k_sun.jpg");
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_config_roundtrip() {
        let mut config = Config::default();
        config.scene.seed = Some(99);
        let ron_str = ron::to_string(&config).unwrap();
        let deserialized: Config = ron::from_str(&ron_str).unwrap();
        assert_eq!(config, deserialized);
    }

    #[test]
    fn test_missing_field_uses_default() {
        // Config missing the `audio` and `scene` sections entirely
        let ron_str = "(driver: (frames: 10), debug: ())";
        let config: Config = ron::from_str(ron_str).unwrap();
        assert_eq!(config.audio, AudioConfig::default());
        assert_eq!(config.scene, SceneConfig::default());
        assert_eq!(config.driver.frames, 10);
        assert_eq!(config.driver.frame_rate, 60.0);
    }

    #[test]
    fn test_body_without_ring_flag_parses() {
        let ron_str = r#"(scene: (bodies: [(distance_from_center: 4.0, visual_size: 0.2, angular_speed: 3.0, texture_id: "/textures/2k_vulcan.jpg")]))"#;
        let config: Config = ron::from_str(ron_str).unwrap();
        assert_eq!(config.scene.bodies.len(), 1);
        assert!(!config.scene.bodies[0].has_ring);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.scene.seed = Some(7);
        config.driver.frames = 120;
        config.scene.bodies.truncate(3);

        config.save(dir.path()).unwrap();
        let loaded = Config::load_or_create(dir.path()).unwrap();
        assert_eq!(config, loaded);
    }

    #[test]
    fn test_load_creates_default_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_or_create(dir.path()).unwrap();
        assert_eq!(config, Config::default());
        assert!(dir.path().join("config.ron").exists());
    }

    #[test]
    fn test_load_rejects_invalid_body() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.scene.bodies[2].angular_speed = 0.0;
        config.save(dir.path()).unwrap();

        let err = Config::load_or_create(dir.path()).unwrap_err();
        match err {
            ConfigError::InvalidScene(DescriptorError::Body { index, .. }) => assert_eq!(index, 2),
            other => panic!("unexpected error {other}"),
        }
    }

    #[test]
    fn test_validate_rejects_bad_settings() {
        let mut config = Config::default();
        config.driver.frame_rate = 0.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidSetting {
                field: "driver.frame_rate",
                ..
            })
        ));

        let mut config = Config::default();
        config.driver.frame_rate = 1e-30;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidSetting {
                field: "driver.frame_rate",
                ..
            })
        ));
        config.driver.frame_rate = MIN_FRAME_RATE;
        assert!(config.validate().is_ok());

        let mut config = Config::default();
        config.audio.theme_volume = 1.5;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidSetting {
                field: "audio.theme_volume",
                ..
            })
        ));
    }

    #[test]
    fn test_body_table_keeps_registration_order() {
        let ron_str = r#"(scene: (bodies: [
            (distance_from_center: 30.0, visual_size: 2.0, angular_speed: 0.1, texture_id: "/textures/2k_outer.jpg"),
            (distance_from_center: 4.0, visual_size: 0.2, angular_speed: 3.0, texture_id: "/textures/2k_inner.jpg", has_ring: true),
        ]))"#;
        let config: Config = ron::from_str(ron_str).unwrap();
        let textures: Vec<&str> = config
            .scene
            .bodies
            .iter()
            .map(|b| b.texture_id.as_str())
            .collect();
        assert_eq!(textures, ["/textures/2k_outer.jpg", "/textures/2k_inner.jpg"]);
        assert!(!config.scene.bodies[0].has_ring);
        assert!(config.scene.bodies[1].has_ring);
        assert_eq!(config.scene.central, CentralBody::default());
    }

    #[test]
    fn test_empty_body_table_is_valid() {
        let config: Config = ron::from_str("(scene: (seed: Some(3), bodies: []))").unwrap();
        assert!(config.scene.bodies.is_empty());
        assert_eq!(config.scene.seed, Some(3));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_body_missing_required_field_fails_to_parse() {
        let ron_str = r#"(scene: (bodies: [(distance_from_center: 4.0, visual_size: 0.2, texture_id: "/textures/2k_vulcan.jpg")]))"#;
        let err = ron::from_str::<Config>(ron_str).unwrap_err();
        assert!(err.to_string().contains("angular_speed"), "{err}");
    }

    #[test]
    fn test_validate_rejects_dark_central_body() {
        let ron_str = "(scene: (central: (light_intensity: -2.0)))";
        let config: Config = ron::from_str(ron_str).unwrap();
        assert_eq!(config.scene.central.visual_size, 3.0);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidScene(DescriptorError::InvalidLight(_)))
        ));
    }

    #[test]
    fn test_backdrop_defaults_and_overrides() {
        let config: Config = ron::from_str("(scene: (backdrop: (stars: (count: 200))))").unwrap();
        let backdrop = &config.scene.backdrop;
        assert_eq!(backdrop.stars.count, 200);
        assert_eq!(backdrop.stars.radius, 100.0);
        assert_eq!(backdrop.ambient_intensity, 0.8);
        assert_eq!(backdrop.directional.intensity, 1.0);
        assert!(config.validate().is_ok());

        let bad: Config = ron::from_str("(scene: (backdrop: (stars: (depth: -1.0))))").unwrap();
        assert!(matches!(
            bad.validate(),
            Err(ConfigError::InvalidScene(DescriptorError::Negative {
                field: "stars.depth",
                ..
            }))
        ));
    }
}
