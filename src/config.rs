//! Application configuration
//!
//! Configuration is loaded from multiple sources with the following priority (lowest to highest):
//! 1. `config/default.toml` (version controlled)
//! 2. `config/user.toml` (gitignored, user overrides)
//! 3. Environment variables (`VRIG_SECTION__KEY`)

use figment::{Figment, providers::{Format, Toml, Env}};
use serde::{Serialize, Deserialize};
use std::path::Path;
use vrig_input::{LocomotionSettings, RigNames};

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Locomotion configuration
    #[serde(default)]
    pub locomotion: LocomotionConfig,
    /// Headless simulation configuration
    #[serde(default)]
    pub simulation: SimulationConfig,
    /// Debug configuration
    #[serde(default)]
    pub debug: DebugConfig,
}

impl AppConfig {
    /// Load configuration from default locations
    ///
    /// Priority (lowest to highest):
    /// 1. `config/default.toml`
    /// 2. `config/user.toml`
    /// 3. Environment variables (`VRIG_*`)
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from a specific config directory
    pub fn load_from<P: AsRef<Path>>(config_dir: P) -> Result<Self, ConfigError> {
        let config_dir = config_dir.as_ref();
        let default_path = config_dir.join("default.toml");
        let user_path = config_dir.join("user.toml");

        let mut figment = Figment::new();

        if default_path.exists() {
            figment = figment.merge(Toml::file(&default_path));
        }

        if user_path.exists() {
            figment = figment.merge(Toml::file(&user_path));
        }

        // VRIG_LOCOMOTION__SPEED=2.5 -> locomotion.speed = 2.5
        figment = figment.merge(Env::prefixed("VRIG_").split("__"));

        figment.extract().map_err(ConfigError::from)
    }
}

/// Locomotion configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LocomotionConfig {
    /// Displacement per second at full stick deflection
    pub speed: f32,
    /// Name of the entity moved by the stick
    pub holder: String,
    /// Name of the head-mounted display entity
    pub hmd: String,
    pub left_aim: String,
    pub left_grip: String,
    pub right_aim: String,
    pub right_grip: String,
}

impl Default for LocomotionConfig {
    fn default() -> Self {
        let names = RigNames::default();
        Self {
            speed: 1.0,
            holder: names.holder,
            hmd: names.hmd,
            left_aim: names.left_aim,
            left_grip: names.left_grip,
            right_aim: names.right_aim,
            right_grip: names.right_grip,
        }
    }
}

impl LocomotionConfig {
    /// Convert to the controller's settings
    pub fn to_locomotion_settings(&self) -> LocomotionSettings {
        LocomotionSettings {
            speed: self.speed,
            names: RigNames {
                left_aim: self.left_aim.clone(),
                left_grip: self.left_grip.clone(),
                right_aim: self.right_aim.clone(),
                right_grip: self.right_grip.clone(),
                hmd: self.hmd.clone(),
                holder: self.holder.clone(),
            },
        }
    }
}

/// Headless simulation configuration for the demo binary
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Scene file to load
    pub scene_path: String,
    /// Entity the locomotion script is attached to
    pub player: String,
    /// Frame timestep in seconds
    pub timestep: f32,
    /// Number of frames to simulate
    pub frames: u32,
    /// Constant left stick deflection [x, y]
    pub stick: [f32; 2],
    /// Head yaw rate in radians per second
    pub head_yaw_rate: f32,
    /// Standing head height reported by the simulated headset
    pub head_height: f32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            scene_path: "scenes/vr_rig.ron".to_string(),
            player: "player".to_string(),
            timestep: 1.0 / 90.0,
            frames: 90,
            stick: [0.0, -1.0],
            head_yaw_rate: 0.0,
            head_height: 1.7,
        }
    }
}

/// Debug configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level (error, warn, info, debug, trace)
    pub log_level: String,
    /// Log the holder translation every N frames (0 disables)
    pub log_every: u32,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_every: 10,
        }
    }
}

/// Configuration error
#[derive(Debug)]
pub struct ConfigError {
    message: String,
}

impl From<figment::Error> for ConfigError {
    fn from(e: figment::Error) -> Self {
        ConfigError {
            message: e.to_string(),
        }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Configuration error: {}", self.message)
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.locomotion.speed, 1.0);
        assert_eq!(config.locomotion.holder, "vrHolder");
        assert_eq!(config.simulation.frames, 90);
        assert_eq!(config.debug.log_level, "info");
    }

    #[test]
    fn test_default_settings_match_controller_defaults() {
        let settings = AppConfig::default().locomotion.to_locomotion_settings();
        assert_eq!(settings, LocomotionSettings::default());
    }

    #[test]
    fn test_custom_names_flow_into_settings() {
        let mut config = LocomotionConfig::default();
        config.hmd = "head".to_string();
        config.speed = 3.0;
        let settings = config.to_locomotion_settings();
        assert_eq!(settings.names.hmd, "head");
        assert_eq!(settings.speed, 3.0);
    }

    #[test]
    fn test_config_serialization() {
        let config = AppConfig::default();
        let toml = toml::to_string(&config).unwrap();
        assert!(toml.contains("scene_path"));
        assert!(toml.contains("speed"));
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: AppConfig = Figment::new()
            .merge(Toml::string("[locomotion]\nspeed = 2.0\n"))
            .extract()
            .unwrap();
        assert_eq!(config.locomotion.speed, 2.0);
        assert_eq!(config.locomotion.hmd, "hmd");
        assert_eq!(config.simulation.scene_path, "scenes/vr_rig.ron");
    }

    #[test]
    fn test_missing_dir_gives_defaults() {
        let config = AppConfig::load_from("no/such/config/dir").unwrap();
        assert_eq!(config.simulation.player, "player");
    }
}
