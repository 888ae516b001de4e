//! Game tuning and configuration
//!
//! Every field has a default, so a config file only needs the values it
//! overrides. Loaded once at startup; never mutated by the simulation.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::sim::HazardSize;

/// Errors raised while loading or validating a config
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config value `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Arena rectangle size (world units, origin at bottom-left)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaConfig {
    pub width: f32,
    pub height: f32,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            width: ARENA_WIDTH,
            height: ARENA_HEIGHT,
        }
    }
}

/// Ship handling
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ShipConfig {
    /// Velocity added per thrust call
    pub thrust_power: f32,
    pub terminal_velocity: f32,
    /// Degrees/sec added to angular velocity per rotate call
    pub rotation_step: f32,
    /// Angular velocity clamp (degrees/sec)
    pub max_spin: f32,
    /// Exponential decay rate of velocity when not thrusting (1/sec)
    pub velocity_decay: f32,
    /// Exponential decay rate of angular velocity when not spinning (1/sec)
    pub spin_decay: f32,
    /// Ticks needed to charge a shot
    pub shot_charging_time: u32,
    /// Hull scale
    pub size: f32,
    /// Invulnerability after a respawn (seconds)
    pub respawn_grace: f32,
    pub lives: u8,
}

impl Default for ShipConfig {
    fn default() -> Self {
        Self {
            thrust_power: SHIP_THRUST_POWER,
            terminal_velocity: SHIP_TERMINAL_VELOCITY,
            rotation_step: SHIP_ROTATION_STEP,
            max_spin: SHIP_MAX_SPIN,
            velocity_decay: SHIP_VELOCITY_DECAY,
            spin_decay: SHIP_SPIN_DECAY,
            shot_charging_time: SHIP_SHOT_CHARGING_TIME,
            size: SHIP_SIZE,
            respawn_grace: SHIP_RESPAWN_GRACE,
            lives: SHIP_LIVES,
        }
    }
}

/// Projectile behavior
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectileConfig {
    /// Muzzle speed along the ship heading (added to ship velocity)
    pub speed: f32,
    /// Seconds before a projectile expires
    pub lifetime: f32,
    pub size: f32,
}

impl Default for ProjectileConfig {
    fn default() -> Self {
        Self {
            speed: PROJECTILE_SPEED,
            lifetime: PROJECTILE_LIFETIME,
            size: PROJECTILE_SIZE,
        }
    }
}

/// Per-size-class hazard rule
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HazardRule {
    pub size: HazardSize,
    /// Polygon radius (also the wrap margin)
    pub radius: f32,
    pub speed_min: f32,
    pub speed_max: f32,
    /// Max visual spin (degrees/sec, either direction)
    pub spin_max: f32,
    /// Score awarded on destruction
    pub points: u64,
    /// Size of the children spawned on destruction (None = destroyed outright)
    pub split_into: Option<HazardSize>,
    pub split_count: u32,
}

/// Hazard waves and rule table
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HazardConfig {
    pub initial_count: u32,
    pub per_wave_increase: u32,
    pub max_count: u32,
    /// Minimum spawn distance from the ship at wave start
    pub spawn_clearance: f32,
    pub vertex_count: usize,
    pub rules: Vec<HazardRule>,
}

impl Default for HazardConfig {
    fn default() -> Self {
        Self {
            initial_count: HAZARD_INITIAL_COUNT,
            per_wave_increase: HAZARD_PER_WAVE_INCREASE,
            max_count: HAZARD_MAX_COUNT,
            spawn_clearance: HAZARD_SPAWN_CLEARANCE,
            vertex_count: HAZARD_VERTEX_COUNT,
            rules: vec![
                HazardRule {
                    size: HazardSize::Large,
                    radius: 40.0,
                    speed_min: 20.0,
                    speed_max: 60.0,
                    spin_max: 30.0,
                    points: 20,
                    split_into: Some(HazardSize::Medium),
                    split_count: 2,
                },
                HazardRule {
                    size: HazardSize::Medium,
                    radius: 22.0,
                    speed_min: 40.0,
                    speed_max: 90.0,
                    spin_max: 60.0,
                    points: 50,
                    split_into: Some(HazardSize::Small),
                    split_count: 2,
                },
                HazardRule {
                    size: HazardSize::Small,
                    radius: 11.0,
                    speed_min: 60.0,
                    speed_max: 130.0,
                    spin_max: 90.0,
                    points: 100,
                    split_into: None,
                    split_count: 0,
                },
            ],
        }
    }
}

/// Complete game configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Fixed simulation rate (Hz)
    pub tick_rate: f32,
    pub arena: ArenaConfig,
    pub ship: ShipConfig,
    pub projectile: ProjectileConfig,
    pub hazards: HazardConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            tick_rate: TICK_RATE,
            arena: ArenaConfig::default(),
            ship: ShipConfig::default(),
            projectile: ProjectileConfig::default(),
            hazards: HazardConfig::default(),
        }
    }
}

impl GameConfig {
    /// Parse and validate a JSON config
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let config = Self::from_json_str(&json)?;
        log::info!("Loaded config from {}", path.as_ref().display());
        Ok(config)
    }

    /// Fixed timestep handed to every update
    pub fn sim_dt(&self) -> f32 {
        1.0 / self.tick_rate
    }

    /// Rule for a hazard size class
    pub fn rule_for(&self, size: HazardSize) -> Option<&HazardRule> {
        self.hazards.rules.iter().find(|r| r.size == size)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
            if value.is_finite() && value > 0.0 {
                Ok(())
            } else {
                Err(ConfigError::Invalid {
                    field,
                    reason: format!("must be positive, got {value}"),
                })
            }
        }

        fn non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
            if value.is_finite() && value >= 0.0 {
                Ok(())
            } else {
                Err(ConfigError::Invalid {
                    field,
                    reason: format!("must be finite and >= 0, got {value}"),
                })
            }
        }

        positive("tick_rate", self.tick_rate)?;
        positive("arena.width", self.arena.width)?;
        positive("arena.height", self.arena.height)?;
        positive("ship.terminal_velocity", self.ship.terminal_velocity)?;
        positive("ship.size", self.ship.size)?;
        non_negative("ship.max_spin", self.ship.max_spin)?;
        positive("projectile.lifetime", self.projectile.lifetime)?;

        if self.hazards.initial_count == 0 {
            return Err(ConfigError::Invalid {
                field: "hazards.initial_count",
                reason: "a wave needs at least one hazard".into(),
            });
        }
        if self.hazards.max_count == 0 {
            return Err(ConfigError::Invalid {
                field: "hazards.max_count",
                reason: "a wave needs at least one hazard".into(),
            });
        }

        for size in [HazardSize::Large, HazardSize::Medium, HazardSize::Small] {
            let Some(rule) = self.rule_for(size) else {
                return Err(ConfigError::Invalid {
                    field: "hazards.rules",
                    reason: format!("missing rule for {size:?}"),
                });
            };
            positive("hazards.rules.radius", rule.radius)?;
            non_negative("hazards.rules.speed_min", rule.speed_min)?;
            non_negative("hazards.rules.speed_max", rule.speed_max)?;
            non_negative("hazards.rules.spin_max", rule.spin_max)?;
            if rule.speed_min > rule.speed_max {
                return Err(ConfigError::Invalid {
                    field: "hazards.rules.speed_min",
                    reason: format!("{size:?}: speed_min exceeds speed_max"),
                });
            }
            // Children must be a smaller class so every wave can be cleared
            if let Some(child) = rule.split_into.filter(|&child| child <= size) {
                return Err(ConfigError::Invalid {
                    field: "hazards.rules.split_into",
                    reason: format!("{size:?} can only split into a smaller size, got {child:?}"),
                });
            }
        }
        if self.hazards.vertex_count < 3 {
            return Err(ConfigError::Invalid {
                field: "hazards.vertex_count",
                reason: "hazard polygons need at least 3 vertices".into(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = GameConfig::default();
        assert!(config.validate().is_ok());
        assert!((config.sim_dt() - SIM_DT).abs() < 1e-9);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config =
            GameConfig::from_json_str(r#"{ "ship": { "thrust_power": 12.5 }, "tick_rate": 120 }"#)
                .unwrap();
        assert_eq!(config.ship.thrust_power, 12.5);
        assert_eq!(config.ship.shot_charging_time, SHIP_SHOT_CHARGING_TIME);
        assert_eq!(config.tick_rate, 120.0);
        assert_eq!(config.hazards.rules.len(), 3);
    }

    #[test]
    fn test_rule_table_lookup() {
        let config = GameConfig::default();
        let large = config.rule_for(HazardSize::Large).unwrap();
        assert_eq!(large.split_into, Some(HazardSize::Medium));
        let small = config.rule_for(HazardSize::Small).unwrap();
        assert_eq!(small.split_into, None);
    }

    #[test]
    fn test_rejects_bad_values() {
        let err = GameConfig::from_json_str(r#"{ "tick_rate": 0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "tick_rate", .. }));

        let err = GameConfig::from_json_str(r#"{ "arena": { "width": -5 } }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "arena.width", .. }));

        let err = GameConfig::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_rejects_missing_rule() {
        let mut config = GameConfig::default();
        config.hazards.rules.retain(|r| r.size != HazardSize::Small);
        assert!(config.validate().is_err());
    }

    fn invalid_field(config: &GameConfig) -> Option<&'static str> {
        match config.validate() {
            Err(ConfigError::Invalid { field, .. }) => Some(field),
            _ => None,
        }
    }

    #[test]
    fn test_rejects_bad_max_spin() {
        let err = GameConfig::from_json_str(r#"{ "ship": { "max_spin": -1 } }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "ship.max_spin", .. }));

        let mut config = GameConfig::default();
        config.ship.max_spin = f32::NAN;
        assert_eq!(invalid_field(&config), Some("ship.max_spin"));

        // Zero disables spinning but is still runnable
        config.ship.max_spin = 0.0;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_bad_spin_max() {
        let mut config = GameConfig::default();
        config.hazards.rules[0].spin_max = -5.0;
        assert_eq!(invalid_field(&config), Some("hazards.rules.spin_max"));

        config.hazards.rules[0].spin_max = f32::INFINITY;
        assert_eq!(invalid_field(&config), Some("hazards.rules.spin_max"));
    }

    #[test]
    fn test_rejects_bad_speed_range() {
        let mut config = GameConfig::default();
        config.hazards.rules[1].speed_min = f32::NAN;
        assert_eq!(invalid_field(&config), Some("hazards.rules.speed_min"));

        let mut config = GameConfig::default();
        config.hazards.rules[1].speed_max = f32::NAN;
        assert_eq!(invalid_field(&config), Some("hazards.rules.speed_max"));

        let mut config = GameConfig::default();
        config.hazards.rules[2].speed_min = -1.0;
        assert_eq!(invalid_field(&config), Some("hazards.rules.speed_min"));

        let mut config = GameConfig::default();
        config.hazards.rules[2].speed_min = config.hazards.rules[2].speed_max + 1.0;
        assert_eq!(invalid_field(&config), Some("hazards.rules.speed_min"));
    }

    #[test]
    fn test_rejects_split_cycle() {
        let json = r#"{ "hazards": { "rules": [
            { "size": "Large", "radius": 40, "speed_min": 20, "speed_max": 60, "spin_max": 30,
              "points": 20, "split_into": "Medium", "split_count": 2 },
            { "size": "Medium", "radius": 22, "speed_min": 40, "speed_max": 90, "spin_max": 60,
              "points": 50, "split_into": "Large", "split_count": 2 },
            { "size": "Small", "radius": 11, "speed_min": 60, "speed_max": 130, "spin_max": 90,
              "points": 100, "split_into": null, "split_count": 0 }
        ] } }"#;
        let err = GameConfig::from_json_str(json).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "hazards.rules.split_into", .. }));

        let mut config = GameConfig::default();
        config.hazards.rules[2].split_into = Some(HazardSize::Small);
        assert_eq!(invalid_field(&config), Some("hazards.rules.split_into"));
    }

    #[test]
    fn test_rejects_empty_waves() {
        let mut config = GameConfig::default();
        config.hazards.initial_count = 0;
        assert_eq!(invalid_field(&config), Some("hazards.initial_count"));

        let mut config = GameConfig::default();
        config.hazards.max_count = 0;
        assert_eq!(invalid_field(&config), Some("hazards.max_count"));
    }

    #[test]
    fn test_load_missing_file() {
        let err = GameConfig::load("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
