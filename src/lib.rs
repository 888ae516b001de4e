//! Drift Rocks - a wraparound-arena ship-and-rocks arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, collisions, game state, tick)
//! - `app`: Fixed-step game loop and pause state machine
//! - `platform`: Window, input and frame-pacing seams
//! - `renderer`: Renderer-agnostic draw lists
//! - `config`: Data-driven game tuning
//!
//! World space is y-up. A rotation of 0° points the ship's nose along +y and
//! rotation increases clockwise, like a compass heading.

pub mod app;
pub mod config;
pub mod platform;
pub mod renderer;
pub mod sim;

pub use app::Game;
pub use config::{ConfigError, GameConfig};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation rate (ticks per second)
    pub const TICK_RATE: f32 = 60.0;
    /// Fixed simulation timestep
    pub const SIM_DT: f32 = 1.0 / TICK_RATE;

    /// Arena dimensions
    pub const ARENA_WIDTH: f32 = 800.0;
    pub const ARENA_HEIGHT: f32 = 600.0;

    /// Ship defaults
    pub const SHIP_THRUST_POWER: f32 = 30.0;
    pub const SHIP_TERMINAL_VELOCITY: f32 = 400.0;
    /// Degrees/sec added to angular velocity per rotate call
    pub const SHIP_ROTATION_STEP: f32 = 30.0;
    pub const SHIP_MAX_SPIN: f32 = 360.0;
    /// Exponential decay rates (per second) applied when idle
    pub const SHIP_VELOCITY_DECAY: f32 = 0.8;
    pub const SHIP_SPIN_DECAY: f32 = 6.0;
    /// Ticks needed to charge one shot
    pub const SHIP_SHOT_CHARGING_TIME: u32 = 5;
    pub const SHIP_SIZE: f32 = 12.0;
    pub const SHIP_RESPAWN_GRACE: f32 = 2.0;
    pub const SHIP_LIVES: u8 = 3;

    /// Projectile defaults
    pub const PROJECTILE_SPEED: f32 = 420.0;
    pub const PROJECTILE_LIFETIME: f32 = 1.2;
    pub const PROJECTILE_SIZE: f32 = 2.0;

    /// Hazard defaults
    pub const HAZARD_INITIAL_COUNT: u32 = 4;
    pub const HAZARD_PER_WAVE_INCREASE: u32 = 1;
    pub const HAZARD_MAX_COUNT: u32 = 12;
    pub const HAZARD_SPAWN_CLEARANCE: f32 = 150.0;
    pub const HAZARD_VERTEX_COUNT: usize = 9;
}

/// Convert degrees to radians
#[inline]
pub fn deg_to_rad(deg: f32) -> f32 {
    deg * std::f32::consts::PI / 180.0
}

/// Squared vector length, for cheap comparisons against squared limits
#[inline]
pub fn magnitude_squared(v: Vec2) -> f32 {
    v.x * v.x + v.y * v.y
}

/// Wrap an angle in degrees to [0, 360)
#[inline]
pub fn normalize_degrees(deg: f32) -> f32 {
    let wrapped = deg.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

/// Unit heading for a rotation in degrees.
///
/// The trig pair is phase-shifted 90° from the usual `(cos, sin)` so that
/// 0° points along +y: `(cos(θ - 90°), sin(θ + 90°)) == (sin θ, cos θ)`.
#[inline]
pub fn heading_from_rotation(rotation_deg: f32) -> Vec2 {
    let rad = deg_to_rad(rotation_deg);
    Vec2::new(rad.sin(), rad.cos())
}

/// Rotate a local-space point clockwise by `rotation_deg`, matching
/// [`heading_from_rotation`] (the local +y axis maps onto the heading).
#[inline]
pub fn rotate_point(point: Vec2, rotation_deg: f32) -> Vec2 {
    let (sin, cos) = deg_to_rad(rotation_deg).sin_cos();
    Vec2::new(point.x * cos + point.y * sin, -point.x * sin + point.y * cos)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deg_to_rad() {
        assert!((deg_to_rad(180.0) - std::f32::consts::PI).abs() < 1e-6);
        assert!((deg_to_rad(90.0) - std::f32::consts::FRAC_PI_2).abs() < 1e-6);
        assert_eq!(deg_to_rad(0.0), 0.0);
    }

    #[test]
    fn test_magnitude_squared() {
        assert_eq!(magnitude_squared(Vec2::new(3.0, 4.0)), 25.0);
        assert_eq!(magnitude_squared(Vec2::ZERO), 0.0);
    }

    #[test]
    fn test_normalize_degrees() {
        assert_eq!(normalize_degrees(370.0), 10.0);
        assert_eq!(normalize_degrees(-90.0), 270.0);
        assert_eq!(normalize_degrees(360.0), 0.0);
        let tiny = normalize_degrees(-1e-9);
        assert!((0.0..360.0).contains(&tiny));
    }

    #[test]
    fn test_heading_convention() {
        let up = heading_from_rotation(0.0);
        assert!(up.x.abs() < 1e-6 && (up.y - 1.0).abs() < 1e-6);

        // Clockwise: 90° points along +x
        let right = heading_from_rotation(90.0);
        assert!((right.x - 1.0).abs() < 1e-6 && right.y.abs() < 1e-6);
    }

    #[test]
    fn test_rotate_point_matches_heading() {
        for deg in [0.0, 33.0, 90.0, 180.0, 271.5] {
            let nose = rotate_point(Vec2::Y, deg);
            let heading = heading_from_rotation(deg);
            assert!((nose - heading).length() < 1e-5, "mismatch at {deg}");
        }
    }
}
