//! Projectiles fired by the ship

use glam::Vec2;

use super::entity::{Entity, Pose};
use super::registry::EntityId;
use crate::config::ProjectileConfig;
use crate::renderer::{DrawList, colors};

/// Small diamond, scaled by the projectile size
const DIAMOND: [Vec2; 4] = [
    Vec2::new(0.0, 1.0),
    Vec2::new(1.0, 0.0),
    Vec2::new(0.0, -1.0),
    Vec2::new(-1.0, 0.0),
];

/// Straight-line shot with a finite lifetime
#[derive(Debug, Clone)]
pub struct Projectile {
    pub id: EntityId,
    pose: Pose,
    /// Seconds left before despawn
    remaining: f32,
    size: f32,
}

impl Projectile {
    pub fn new(id: EntityId, pose: Pose, config: &ProjectileConfig) -> Self {
        Self {
            id,
            pose,
            remaining: config.lifetime,
            size: config.size,
        }
    }

    pub fn remaining_lifetime(&self) -> f32 {
        self.remaining
    }

    /// Expired projectiles are removed by the tick, never drawn
    pub fn is_expired(&self) -> bool {
        self.remaining <= 0.0
    }
}

impl Entity for Projectile {
    fn pose(&self) -> &Pose {
        &self.pose
    }

    fn pose_mut(&mut self) -> &mut Pose {
        &mut self.pose
    }

    fn local_shape(&self) -> &[Vec2] {
        &DIAMOND
    }

    fn scale(&self) -> f32 {
        self.size
    }

    fn margin(&self) -> f32 {
        self.size
    }

    fn update(&mut self, dt: f32) {
        self.pose.integrate(dt);
        self.remaining -= dt;
    }

    fn draw(&mut self, list: &mut DrawList) {
        list.filled(self.vertices(), colors::PROJECTILE);
    }
}
