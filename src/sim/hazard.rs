//! Drifting rocks
//!
//! Shapes are convex: vertices sit on a circle at jittered angles. What
//! happens on destruction comes from the per-size rule table in the config.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::entity::{Entity, Pose};
use crate::config::{GameConfig, HazardRule};
use crate::renderer::{DrawList, colors};

/// Hazard size class
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum HazardSize {
    Large,
    Medium,
    Small,
}

#[derive(Debug, Clone)]
pub struct Hazard {
    pub size: HazardSize,
    pose: Pose,
    /// Constant visual spin (degrees/sec)
    pub angular_velocity: f32,
    shape: Vec<Vec2>,
    radius: f32,
}

impl Hazard {
    pub fn new(
        size: HazardSize,
        pose: Pose,
        angular_velocity: f32,
        shape: Vec<Vec2>,
        radius: f32,
    ) -> Self {
        Self {
            size,
            pose,
            angular_velocity,
            shape,
            radius,
        }
    }

    /// Random drift, spin and outline for a size class at `position`
    pub fn random<R: Rng>(rule: &HazardRule, position: Vec2, vertex_count: usize, rng: &mut R) -> Self {
        let direction = rng.random_range(0.0..std::f32::consts::TAU);
        let speed = rng.random_range(rule.speed_min..=rule.speed_max);
        let velocity = Vec2::new(direction.cos(), direction.sin()) * speed;
        let spin = rng.random_range(-rule.spin_max..=rule.spin_max);
        let rotation = rng.random_range(0.0..360.0);

        Self::new(
            rule.size,
            Pose::new(position, rotation, velocity),
            spin,
            convex_outline(rule.radius, vertex_count, rng),
            rule.radius,
        )
    }

    /// Children spawned when this hazard is destroyed (empty for the
    /// smallest class, or when the rule table has no entry)
    pub fn split<R: Rng>(&self, config: &GameConfig, rng: &mut R) -> Vec<Hazard> {
        let Some(rule) = config.rule_for(self.size) else {
            return Vec::new();
        };
        let Some(child_rule) = rule.split_into.and_then(|size| config.rule_for(size)) else {
            return Vec::new();
        };
        let vertex_count = config.hazards.vertex_count;
        (0..rule.split_count)
            .map(|_| Hazard::random(child_rule, self.pose.position, vertex_count, rng))
            .collect()
    }
}

/// Vertices on a circle at jittered angles, in angular order
fn convex_outline<R: Rng>(radius: f32, vertex_count: usize, rng: &mut R) -> Vec<Vec2> {
    let count = vertex_count.max(3);
    let step = std::f32::consts::TAU / count as f32;
    (0..count)
        .map(|i| {
            let jitter = rng.random_range(-0.35f32..=0.35) * step;
            let angle = i as f32 * step + jitter;
            Vec2::new(angle.cos(), angle.sin()) * radius
        })
        .collect()
}

impl Entity for Hazard {
    fn pose(&self) -> &Pose {
        &self.pose
    }

    fn pose_mut(&mut self) -> &mut Pose {
        &mut self.pose
    }

    fn local_shape(&self) -> &[Vec2] {
        &self.shape
    }

    fn margin(&self) -> f32 {
        self.radius
    }

    fn update(&mut self, dt: f32) {
        self.pose.integrate(dt);
        self.pose.spin(self.angular_velocity, dt);
    }

    fn draw(&mut self, list: &mut DrawList) {
        list.polygon(self.vertices(), colors::HAZARD);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn rng() -> Pcg32 {
        Pcg32::seed_from_u64(7)
    }

    #[test]
    fn test_random_respects_rule() {
        let config = GameConfig::default();
        let rule = config.rule_for(HazardSize::Medium).unwrap();
        let mut rng = rng();
        for _ in 0..50 {
            let h = Hazard::random(rule, Vec2::new(10.0, 10.0), 8, &mut rng);
            let speed = h.pose().velocity.length();
            assert!(speed >= rule.speed_min - 1e-3 && speed <= rule.speed_max + 1e-3);
            assert!(h.angular_velocity.abs() <= rule.spin_max);
            assert_eq!(h.local_shape().len(), 8);
            for v in h.local_shape() {
                assert!((v.length() - rule.radius).abs() < 1e-3);
            }
        }
    }

    #[test]
    fn test_outline_is_convex() {
        let mut rng = rng();
        let outline = convex_outline(10.0, 9, &mut rng);
        let n = outline.len();
        for i in 0..n {
            let a = outline[i];
            let b = outline[(i + 1) % n];
            let c = outline[(i + 2) % n];
            // Counter-clockwise winding: every turn is a left turn
            assert!((b - a).perp_dot(c - b) > 0.0);
        }
    }

    #[test]
    fn test_split_follows_rule_table() {
        let config = GameConfig::default();
        let mut rng = rng();
        let large = Hazard::random(config.rule_for(HazardSize::Large).unwrap(), Vec2::new(50.0, 60.0), 9, &mut rng);

        let children = large.split(&config, &mut rng);
        assert_eq!(children.len(), 2);
        for child in &children {
            assert_eq!(child.size, HazardSize::Medium);
            assert_eq!(child.pose().position, Vec2::new(50.0, 60.0));
        }

        let small = Hazard::random(config.rule_for(HazardSize::Small).unwrap(), Vec2::ZERO, 9, &mut rng);
        assert!(small.split(&config, &mut rng).is_empty());
    }

    #[test]
    fn test_drift_and_spin() {
        let mut h = Hazard::new(
            HazardSize::Small,
            Pose::new(Vec2::ZERO, 350.0, Vec2::new(10.0, 0.0)),
            20.0,
            vec![Vec2::X, Vec2::Y, Vec2::NEG_X],
            1.0,
        );
        h.update(1.0);
        assert_eq!(h.pose().position, Vec2::new(10.0, 0.0));
        assert!((h.pose().rotation - 10.0).abs() < 1e-4);
        assert_eq!(h.pose().velocity, Vec2::new(10.0, 0.0));
    }
}
