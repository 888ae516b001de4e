//! The player's ship
//!
//! Held-key controls are latched once per tick with [`Ship::set_controls`] and
//! consumed by [`Entity::update`]. Firing goes through a charge gate: the loop
//! only calls [`Ship::shoot`] once `wants_to_shoot` is raised.

use glam::Vec2;

use super::entity::{Entity, Pose, world_vertices};
use super::projectile::Projectile;
use super::registry::{EntityId, Registry};
use crate::config::{ProjectileConfig, ShipConfig};
use crate::renderer::{DrawList, colors};
use crate::{heading_from_rotation, magnitude_squared};

/// Hull in local space (nose along +y), scaled by the ship size
const HULL: [Vec2; 3] = [
    Vec2::new(0.0, 1.0),
    Vec2::new(0.65, -0.8),
    Vec2::new(-0.65, -0.8),
];

/// Exhaust flame drawn behind the hull
const FLAME: [Vec2; 3] = [
    Vec2::new(-0.35, -0.8),
    Vec2::new(0.35, -0.8),
    Vec2::new(0.0, -1.5),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThrustDirection {
    Forward,
    Backward,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotateDirection {
    Left,
    Right,
}

/// Shot charge gate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChargeState {
    /// Ticks accumulated so far
    Charging(u32),
    Charged,
}

impl ChargeState {
    /// One tick of charging
    pub fn advance(self, threshold: u32) -> Self {
        match self {
            ChargeState::Charging(count) => {
                let count = count.saturating_add(1);
                if count >= threshold {
                    ChargeState::Charged
                } else {
                    ChargeState::Charging(count)
                }
            }
            ChargeState::Charged => ChargeState::Charged,
        }
    }

    pub fn is_charged(self) -> bool {
        self == ChargeState::Charged
    }

    /// A zero threshold means the gun never needs charging
    fn advance_if_free(self, threshold: u32) -> Self {
        if threshold == 0 { ChargeState::Charged } else { self }
    }
}

/// Held-key snapshot for one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ShipControls {
    pub thrust: bool,
    pub reverse: bool,
    pub left: bool,
    pub right: bool,
    pub fire: bool,
}

#[derive(Debug, Clone)]
pub struct Ship {
    pose: Pose,
    /// Degrees/sec, positive is clockwise
    pub angular_velocity: f32,
    /// Thrust applied since the last draw
    pub thrust_active: bool,
    /// Rotation applied since the last draw
    pub spin_active: bool,
    charge: ChargeState,
    wants_to_shoot: bool,
    controls: ShipControls,
    /// Seconds of remaining invulnerability after a respawn
    invulnerable_for: f32,
    tuning: ShipConfig,
}

impl Ship {
    pub fn new(position: Vec2, tuning: ShipConfig) -> Self {
        let charge = ChargeState::Charging(0).advance_if_free(tuning.shot_charging_time);
        Self {
            pose: Pose::new(position, 0.0, Vec2::ZERO),
            angular_velocity: 0.0,
            thrust_active: false,
            spin_active: false,
            charge,
            wants_to_shoot: false,
            controls: ShipControls::default(),
            invulnerable_for: 0.0,
            tuning,
        }
    }

    /// Latch this tick's held-key state
    pub fn set_controls(&mut self, controls: ShipControls) {
        self.controls = controls;
    }

    pub fn charge(&self) -> ChargeState {
        self.charge
    }

    pub fn wants_to_shoot(&self) -> bool {
        self.wants_to_shoot
    }

    pub fn is_invulnerable(&self) -> bool {
        self.invulnerable_for > 0.0
    }

    pub fn tuning(&self) -> &ShipConfig {
        &self.tuning
    }

    /// Apply one thrust impulse along (or against) the heading.
    ///
    /// The impulse is only added below terminal velocity, and the result is
    /// clamped so it can never end up above it.
    pub fn thrust(&mut self, direction: ThrustDirection) {
        let heading = heading_from_rotation(self.pose.rotation);
        let delta = match direction {
            ThrustDirection::Forward => heading,
            ThrustDirection::Backward => -heading,
        } * self.tuning.thrust_power;

        let terminal = self.tuning.terminal_velocity;
        if magnitude_squared(self.pose.velocity) < terminal * terminal {
            self.pose.velocity += delta;
        }
        self.pose.velocity = self.pose.velocity.clamp_length_max(terminal);
        self.thrust_active = true;
    }

    /// Add one rotation step to the angular velocity
    pub fn rotate(&mut self, direction: RotateDirection) {
        let step = match direction {
            RotateDirection::Left => -self.tuning.rotation_step,
            RotateDirection::Right => self.tuning.rotation_step,
        };
        let max = self.tuning.max_spin;
        self.angular_velocity = (self.angular_velocity + step).clamp(-max, max);
        self.spin_active = true;
    }

    /// Fire if the charge gate allows it. Returns the new projectile's id;
    /// without a pending shot this is a no-op.
    pub fn shoot(
        &mut self,
        projectiles: &mut Registry<Projectile>,
        config: &ProjectileConfig,
    ) -> Option<EntityId> {
        if !self.wants_to_shoot {
            return None;
        }
        let heading = heading_from_rotation(self.pose.rotation);
        let pose = Pose::new(
            self.pose.position,
            self.pose.rotation,
            self.pose.velocity + heading * config.speed,
        );
        let id = projectiles.insert_with(|id| Projectile::new(id, pose, config));

        self.wants_to_shoot = false;
        self.charge = ChargeState::Charging(0).advance_if_free(self.tuning.shot_charging_time);
        Some(id)
    }

    /// Put the ship back at `position`, at rest, with the grace period running
    pub fn respawn(&mut self, position: Vec2) {
        self.pose = Pose::new(position, 0.0, Vec2::ZERO);
        self.angular_velocity = 0.0;
        self.wants_to_shoot = false;
        self.controls = ShipControls::default();
        self.invulnerable_for = self.tuning.respawn_grace;
    }
}

impl Entity for Ship {
    fn pose(&self) -> &Pose {
        &self.pose
    }

    fn pose_mut(&mut self) -> &mut Pose {
        &mut self.pose
    }

    fn local_shape(&self) -> &[Vec2] {
        &HULL
    }

    fn scale(&self) -> f32 {
        self.tuning.size
    }

    /// Farthest hull vertex, so the whole hull is off screen before a wrap
    fn margin(&self) -> f32 {
        HULL.iter().map(|v| v.length()).fold(0.0, f32::max) * self.tuning.size
    }

    fn update(&mut self, dt: f32) {
        let controls = self.controls;

        // At most one thrust and one rotation per tick; forward and right win
        let thrusted = if controls.thrust {
            self.thrust(ThrustDirection::Forward);
            true
        } else if controls.reverse {
            self.thrust(ThrustDirection::Backward);
            true
        } else {
            false
        };
        let spun = if controls.right {
            self.rotate(RotateDirection::Right);
            true
        } else if controls.left {
            self.rotate(RotateDirection::Left);
            true
        } else {
            false
        };

        self.charge = self.charge.advance(self.tuning.shot_charging_time);
        if controls.fire && self.charge.is_charged() {
            self.wants_to_shoot = true;
        }

        self.pose.integrate(dt);
        self.pose.spin(self.angular_velocity, dt);

        if !thrusted {
            self.pose.velocity *= (-self.tuning.velocity_decay * dt).exp();
        }
        if !spun {
            self.angular_velocity *= (-self.tuning.spin_decay * dt).exp();
        }

        self.invulnerable_for = (self.invulnerable_for - dt).max(0.0);
    }

    fn draw(&mut self, list: &mut DrawList) {
        let color = if self.is_invulnerable() {
            colors::SHIP_GHOST
        } else {
            colors::SHIP
        };
        list.polygon(self.vertices(), color);
        if self.thrust_active {
            list.filled(world_vertices(&FLAME, &self.pose, self.tuning.size), colors::FLAME);
        }
        self.thrust_active = false;
        self.spin_active = false;
    }
}
