//! Shared entity capabilities
//!
//! Ship, projectiles and hazards all expose a pose, a local-space polygon and
//! the same toroidal wraparound against the arena bounds.

use glam::Vec2;

use crate::renderer::DrawList;
use crate::{normalize_degrees, rotate_point};

/// Arena edge an entity has fully crossed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Up,
    Down,
    Left,
    Right,
}

/// Axis-aligned arena rectangle (y-up)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: Vec2,
    pub max: Vec2,
}

impl Bounds {
    /// Arena anchored at the origin
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            min: Vec2::ZERO,
            max: Vec2::new(width, height),
        }
    }

    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }
}

/// Position, rotation (degrees, [0, 360)) and velocity
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Pose {
    pub position: Vec2,
    pub rotation: f32,
    pub velocity: Vec2,
}

impl Pose {
    pub fn new(position: Vec2, rotation: f32, velocity: Vec2) -> Self {
        Self {
            position,
            rotation: normalize_degrees(rotation),
            velocity,
        }
    }

    /// Straight-line motion: `position += velocity * dt`
    #[inline]
    pub fn integrate(&mut self, dt: f32) {
        self.position += self.velocity * dt;
    }

    /// Advance rotation by `angular_velocity * dt`, keeping it in [0, 360)
    #[inline]
    pub fn spin(&mut self, angular_velocity: f32, dt: f32) {
        self.rotation = normalize_degrees(self.rotation + angular_velocity * dt);
    }
}

/// Transform local-space vertices by scale, rotation and position
pub fn world_vertices(shape: &[Vec2], pose: &Pose, scale: f32) -> Vec<Vec2> {
    shape
        .iter()
        .map(|&p| pose.position + rotate_point(p * scale, pose.rotation))
        .collect()
}

/// Common capability set for everything that lives in the arena
pub trait Entity {
    fn pose(&self) -> &Pose;

    fn pose_mut(&mut self) -> &mut Pose;

    /// Polygon in local space, nose along +y
    fn local_shape(&self) -> &[Vec2];

    fn scale(&self) -> f32 {
        1.0
    }

    /// Bounding radius, used as the wraparound margin
    fn margin(&self) -> f32;

    /// Advance internal kinematic state only
    fn update(&mut self, dt: f32);

    /// Append drawables. Must not touch simulation state beyond
    /// entity-local "recently active" flags.
    fn draw(&mut self, list: &mut DrawList);

    /// World-space polygon, always recomputed from the current pose
    fn vertices(&self) -> Vec<Vec2> {
        world_vertices(self.local_shape(), self.pose(), self.scale())
    }

    /// First edge fully crossed, checked in fixed order: up, down, left, right
    fn out_of_bounds_edge(&self, bounds: &Bounds, margin: f32) -> Option<Edge> {
        let p = self.pose().position;
        if p.y - margin > bounds.max.y {
            Some(Edge::Up)
        } else if p.y + margin < bounds.min.y {
            Some(Edge::Down)
        } else if p.x + margin < bounds.min.x {
            Some(Edge::Left)
        } else if p.x - margin > bounds.max.x {
            Some(Edge::Right)
        } else {
            None
        }
    }

    /// Teleport just outside the opposite edge. The parallel coordinate and
    /// the velocity are untouched.
    fn reset_position(&mut self, edge: Edge, bounds: &Bounds, margin: f32) {
        let p = &mut self.pose_mut().position;
        match edge {
            Edge::Up => p.y = bounds.min.y - margin,
            Edge::Down => p.y = bounds.max.y + margin,
            Edge::Left => p.x = bounds.max.x + margin,
            Edge::Right => p.x = bounds.min.x - margin,
        }
    }

    /// Wrap at most once; returns the edge that was crossed
    fn wrap(&mut self, bounds: &Bounds) -> Option<Edge> {
        let margin = self.margin();
        let edge = self.out_of_bounds_edge(bounds, margin)?;
        self.reset_position(edge, bounds, margin);
        Some(edge)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    /// Minimal entity for exercising the default trait methods
    struct Dot {
        pose: Pose,
        shape: Vec<Vec2>,
        margin: f32,
    }

    impl Dot {
        fn at(position: Vec2, velocity: Vec2, margin: f32) -> Self {
            Self {
                pose: Pose::new(position, 0.0, velocity),
                shape: vec![
                    Vec2::new(-0.5, -0.5),
                    Vec2::new(0.5, -0.5),
                    Vec2::new(0.5, 0.5),
                    Vec2::new(-0.5, 0.5),
                ],
                margin,
            }
        }
    }

    impl Entity for Dot {
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
            self.margin
        }
        fn update(&mut self, dt: f32) {
            self.pose.integrate(dt);
        }
        fn draw(&mut self, _list: &mut DrawList) {}
    }

    #[test]
    fn test_vertices_follow_pose() {
        let mut dot = Dot::at(Vec2::new(10.0, 20.0), Vec2::ZERO, 1.0);
        dot.pose.rotation = 90.0;
        let verts = dot.vertices();
        assert_eq!(verts.len(), 4);
        // (-0.5, -0.5) rotated 90° clockwise is (-0.5, 0.5)
        assert!((verts[0] - Vec2::new(9.5, 20.5)).length() < 1e-5);

        dot.pose.position = Vec2::new(0.0, 0.0);
        let moved = dot.vertices();
        assert!((moved[0] - Vec2::new(-0.5, 0.5)).length() < 1e-5);
    }

    #[test]
    fn test_edge_detection_each_side() {
        let bounds = Bounds::new(100.0, 50.0);
        let cases = [
            (Vec2::new(50.0, 56.0), Some(Edge::Up)),
            (Vec2::new(50.0, -6.0), Some(Edge::Down)),
            (Vec2::new(-6.0, 25.0), Some(Edge::Left)),
            (Vec2::new(106.0, 25.0), Some(Edge::Right)),
            (Vec2::new(50.0, 25.0), None),
            // Partially out is still inside
            (Vec2::new(103.0, 25.0), None),
        ];
        for (pos, expected) in cases {
            let dot = Dot::at(pos, Vec2::ZERO, 5.0);
            assert_eq!(dot.out_of_bounds_edge(&bounds, 5.0), expected, "at {pos}");
        }
    }

    #[test]
    fn test_edge_priority_on_corner() {
        let bounds = Bounds::new(100.0, 100.0);
        let dot = Dot::at(Vec2::new(120.0, 120.0), Vec2::ZERO, 5.0);
        assert_eq!(dot.out_of_bounds_edge(&bounds, 5.0), Some(Edge::Up));
    }

    #[test]
    fn test_wrap_preserves_parallel_axis_and_velocity() {
        let bounds = Bounds::new(100.0, 100.0);
        let vel = Vec2::new(3.0, 7.0);
        let mut dot = Dot::at(Vec2::new(42.0, 110.0), vel, 5.0);

        assert_eq!(dot.wrap(&bounds), Some(Edge::Up));
        assert_eq!(dot.pose.position, Vec2::new(42.0, -5.0));
        assert_eq!(dot.pose.velocity, vel);

        let mut dot = Dot::at(Vec2::new(-10.0, 33.0), vel, 5.0);
        assert_eq!(dot.wrap(&bounds), Some(Edge::Left));
        assert_eq!(dot.pose.position, Vec2::new(105.0, 33.0));
    }

    #[test]
    fn test_wrap_with_oversized_margin_settles() {
        // Margin larger than half the arena must not bounce between edges
        let bounds = Bounds::new(100.0, 100.0);
        let mut dot = Dot::at(Vec2::new(50.0, 171.0), Vec2::ZERO, 70.0);
        assert_eq!(dot.wrap(&bounds), Some(Edge::Up));
        assert_eq!(dot.wrap(&bounds), None);
        assert_eq!(dot.pose.position, Vec2::new(50.0, -70.0));
    }

    #[test]
    fn test_corner_exit_takes_two_wraps() {
        let bounds = Bounds::new(100.0, 100.0);
        let mut dot = Dot::at(Vec2::new(120.0, 120.0), Vec2::ZERO, 5.0);
        assert_eq!(dot.wrap(&bounds), Some(Edge::Up));
        assert_eq!(dot.wrap(&bounds), Some(Edge::Right));
        assert_eq!(dot.wrap(&bounds), None);
        assert_eq!(dot.pose.position, Vec2::new(-5.0, -5.0));
    }

    proptest! {
        #[test]
        fn prop_single_edge_wrap_is_idempotent(
            along in 0.0f32..150.0,
            across in -500.0f32..500.0,
            margin in 0.0f32..80.0,
            vertical in any::<bool>(),
        ) {
            let bounds = Bounds::new(200.0, 150.0);
            // Only one axis can be out: the other coordinate stays inside
            let position = if vertical {
                Vec2::new(along, across)
            } else {
                Vec2::new(across, along)
            };
            let mut dot = Dot::at(position, Vec2::new(1.0, -1.0), margin);
            dot.wrap(&bounds);
            let once = dot.pose;
            prop_assert!(dot.wrap(&bounds).is_none());
            prop_assert_eq!(dot.pose, once);
            prop_assert_eq!(once.velocity, Vec2::new(1.0, -1.0));
        }

        #[test]
        fn prop_any_exit_settles_after_two_wraps(
            x in -500.0f32..500.0,
            y in -500.0f32..500.0,
            margin in 0.0f32..80.0,
        ) {
            let bounds = Bounds::new(200.0, 150.0);
            let mut dot = Dot::at(Vec2::new(x, y), Vec2::new(1.0, -1.0), margin);
            // A corner exit fixes one axis per wrap
            dot.wrap(&bounds);
            dot.wrap(&bounds);
            let settled = dot.pose;
            prop_assert!(dot.wrap(&bounds).is_none());
            prop_assert_eq!(dot.pose, settled);
        }
    }
}
