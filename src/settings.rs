//! Game settings
//!
//! Base values are fixed for the lifetime of the process (optionally
//! overridden from JSON at start-up). The dynamic block is rebuilt from them
//! at the start of every session and scaled up each time a fleet is cleared.

use serde::{Deserialize, Serialize};

use crate::consts::{ALIEN_HEIGHT, ALIEN_WIDTH};
use crate::error::ConfigError;
use crate::platform::Color;

/// Values that scale with difficulty during a session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DynamicSettings {
    /// Ship speed (px/frame)
    pub ship_speed: f32,
    /// Bullet speed (px/frame)
    pub bullet_speed: f32,
    /// Horizontal alien speed (px/frame)
    pub alien_speed: f32,
    /// Vertical drop applied when the fleet touches an edge (px)
    pub fleet_drop_speed: f32,
    /// 1 drifts right, -1 drifts left
    pub fleet_direction: i32,
    /// Points awarded per alien destroyed
    pub alien_points: u64,
}

/// Game settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Screen ===
    pub screen_width: i32,
    pub screen_height: i32,
    pub bg_color: Color,

    // === Ship ===
    pub ship_speed: f32,

    // === Bullets ===
    pub bullet_speed: f32,
    pub bullet_width: i32,
    pub bullet_height: i32,
    pub bullet_color: Color,
    /// Live bullets allowed on screen at once
    pub bullets_allowed: usize,

    // === Aliens ===
    pub alien_speed: f32,
    pub fleet_drop_speed: f32,
    pub alien_points: u64,

    // === Difficulty ===
    /// Multiplier applied to all speeds on each fleet clear
    pub speedup_scale: f32,
    /// Multiplier applied to alien points on each fleet clear
    pub score_scale: f32,

    /// Scaled values for the current session
    #[serde(skip)]
    pub dynamic: DynamicSettings,
}

impl Default for Settings {
    fn default() -> Self {
        let mut settings = Self {
            // Screen
            screen_width: 1100,
            screen_height: 600,
            bg_color: Color::rgb(230, 230, 230),

            // Ship
            ship_speed: 1.5,

            // Bullets
            bullet_speed: 2.0,
            bullet_width: 3,
            bullet_height: 15,
            bullet_color: Color::rgb(60, 60, 60),
            bullets_allowed: 3,

            // Aliens
            alien_speed: 1.0,
            fleet_drop_speed: 10.0,
            alien_points: 50,

            // Difficulty
            speedup_scale: 1.1,
            score_scale: 1.5,

            dynamic: DynamicSettings {
                ship_speed: 0.0,
                bullet_speed: 0.0,
                alien_speed: 0.0,
                fleet_drop_speed: 0.0,
                fleet_direction: 1,
                alien_points: 0,
            },
        };
        settings.initialize_dynamic_settings();
        settings
    }
}

impl Default for DynamicSettings {
    fn default() -> Self {
        Settings::default().dynamic
    }
}

impl Settings {
    /// Reset every scaled value to its base and the fleet to drift right
    pub fn initialize_dynamic_settings(&mut self) {
        self.dynamic = DynamicSettings {
            ship_speed: self.ship_speed,
            bullet_speed: self.bullet_speed,
            alien_speed: self.alien_speed,
            fleet_drop_speed: self.fleet_drop_speed,
            fleet_direction: 1,
            alien_points: self.alien_points,
        };
    }

    /// Escalate difficulty after a fleet clear
    pub fn increase_speed(&mut self) {
        let scale = self.speedup_scale;
        let d = &mut self.dynamic;
        d.ship_speed *= scale;
        d.bullet_speed *= scale;
        d.alien_speed *= scale;
        d.fleet_drop_speed *= scale;
        d.alien_points = (d.alien_points as f64 * self.score_scale as f64) as u64;
    }

    /// Screen bounds as a rect anchored at the origin
    pub fn screen_rect(&self) -> crate::sim::Rect {
        crate::sim::Rect::new(0, 0, self.screen_width, self.screen_height)
    }

    /// Parse a (possibly partial) JSON document; missing fields keep defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let mut settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        settings.initialize_dynamic_settings();
        Ok(settings)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |field, reason| Err(ConfigError::Invalid { field, reason });

        if self.screen_width <= 0 {
            return invalid("screen_width", "must be positive");
        }
        if self.screen_height <= 0 {
            return invalid("screen_height", "must be positive");
        }
        if self.bullets_allowed == 0 {
            return invalid("bullets_allowed", "must be at least 1");
        }
        if self.bullet_width <= 0 || self.bullet_height <= 0 {
            return invalid("bullet_width", "bullet size must be positive");
        }
        if !(self.ship_speed > 0.0) {
            return invalid("ship_speed", "must be positive");
        }
        if !(self.bullet_speed > 0.0) {
            return invalid("bullet_speed", "must be positive");
        }
        if !(self.alien_speed > 0.0) {
            return invalid("alien_speed", "must be positive");
        }
        if !(self.fleet_drop_speed > 0.0) {
            return invalid("fleet_drop_speed", "must be positive");
        }
        if !(self.speedup_scale > 1.0) {
            return invalid("speedup_scale", "must be greater than 1.0");
        }
        if !(self.score_scale >= 1.0) {
            return invalid("score_scale", "must be at least 1.0");
        }
        let fleet = crate::sim::fleet_positions(self.screen_rect(), ALIEN_WIDTH, ALIEN_HEIGHT);
        if fleet.is_empty() {
            return invalid("screen_width", "screen too small to hold a fleet");
        }
        Ok(())
    }

    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "alien_invasion_settings";

    /// Environment variable naming a JSON settings file (native)
    pub const ENV_VAR: &'static str = "ALIEN_INVASION_SETTINGS";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    Err(e) => log::warn!("Ignoring stored settings: {}", e),
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Load settings from the file named by `ALIEN_INVASION_SETTINGS`
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        let Some(path) = std::env::var_os(Self::ENV_VAR) else {
            log::info!("Using default settings");
            return Self::default();
        };

        match Self::load_from_path(std::path::Path::new(&path)) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.to_string_lossy());
                settings
            }
            Err(e) => {
                log::warn!("Ignoring {}: {}", path.to_string_lossy(), e);
                Self::default()
            }
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from_path(path: &std::path::Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_base_values() {
        let settings = Settings::default();
        assert_eq!(settings.screen_width, 1100);
        assert_eq!(settings.screen_height, 600);
        assert_eq!(settings.bullets_allowed, 3);
        assert_eq!(settings.dynamic.ship_speed, 1.5);
        assert_eq!(settings.dynamic.bullet_speed, 2.0);
        assert_eq!(settings.dynamic.alien_speed, 1.0);
        assert_eq!(settings.dynamic.fleet_drop_speed, 10.0);
        assert_eq!(settings.dynamic.fleet_direction, 1);
        assert_eq!(settings.dynamic.alien_points, 50);
    }

    #[test]
    fn test_increase_speed_scales_every_dynamic_value() {
        let mut settings = Settings::default();
        let before = settings.dynamic.clone();
        settings.increase_speed();
        let after = &settings.dynamic;

        assert!(after.ship_speed > before.ship_speed);
        assert!(after.bullet_speed > before.bullet_speed);
        assert!(after.alien_speed > before.alien_speed);
        assert!(after.fleet_drop_speed > before.fleet_drop_speed);
        assert_eq!(after.alien_points, 75);
        assert!((after.alien_speed - 1.1).abs() < 1e-6);
    }

    #[test]
    fn test_initialize_dynamic_settings_resets_scaling_and_direction() {
        let mut settings = Settings::default();
        settings.increase_speed();
        settings.increase_speed();
        settings.dynamic.fleet_direction = -1;

        settings.initialize_dynamic_settings();
        assert_eq!(settings.dynamic, Settings::default().dynamic);
    }

    #[test]
    fn test_from_json_partial_keeps_defaults() {
        let settings = Settings::from_json(r#"{ "bullets_allowed": 5, "alien_speed": 2.5 }"#)
            .expect("valid settings");
        assert_eq!(settings.bullets_allowed, 5);
        assert_eq!(settings.dynamic.alien_speed, 2.5);
        assert_eq!(settings.screen_width, 1100);
    }

    #[test]
    fn test_from_json_rejects_invalid_values() {
        let err = Settings::from_json(r#"{ "bullets_allowed": 0 }"#).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                field: "bullets_allowed",
                ..
            }
        ));

        let err = Settings::from_json(r#"{ "speedup_scale": 1.0 }"#).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                field: "speedup_scale",
                ..
            }
        ));
    }

    #[test]
    fn test_from_json_rejects_malformed_document() {
        let err = Settings::from_json("{ screen_width: ").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_from_json_rejects_screen_without_room_for_fleet() {
        let err = Settings::from_json(r#"{ "screen_width": 150, "screen_height": 150 }"#)
            .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { .. }));
    }
}
