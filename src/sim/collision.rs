//! Polygon intersection and per-tick contact scan
//!
//! Narrow phase is a separating-axis test over world-space vertex lists.
//! Misses feel unfair, so the test is biased generous: shapes closer than
//! a small tolerance count as touching.

use glam::Vec2;

use super::entity::Entity;
use super::hazard::Hazard;
use super::projectile::Projectile;
use super::registry::{EntityId, Registry};

/// Default contact slack in world units
pub const DEFAULT_TOLERANCE: f32 = 0.5;

/// Pairwise narrow-phase test. Callers only ever ask about one pair at a
/// time, so a broad phase can be layered in front without changing them.
pub trait Collider {
    fn intersects(&self, a: &[Vec2], b: &[Vec2]) -> bool;
}

/// Separating-axis test for convex polygons, points and segments
#[derive(Debug, Clone, Copy)]
pub struct SatCollider {
    pub tolerance: f32,
}

impl Default for SatCollider {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
        }
    }
}

impl Collider for SatCollider {
    fn intersects(&self, a: &[Vec2], b: &[Vec2]) -> bool {
        polygons_intersect(a, b, self.tolerance)
    }
}

/// Edge normals of a polygon (unit length, degenerate edges skipped)
fn edge_normals(poly: &[Vec2]) -> impl Iterator<Item = Vec2> + '_ {
    let n = poly.len();
    let edges = if n == 2 { 1 } else if n > 2 { n } else { 0 };
    (0..edges).filter_map(move |i| {
        let edge = poly[(i + 1) % n] - poly[i];
        let normal = edge.perp().normalize_or_zero();
        (normal != Vec2::ZERO).then_some(normal)
    })
}

/// Min/max of a polygon projected onto an axis
fn project(poly: &[Vec2], axis: Vec2) -> (f32, f32) {
    poly.iter().fold((f32::INFINITY, f32::NEG_INFINITY), |(min, max), p| {
        let d = p.dot(axis);
        (min.min(d), max.max(d))
    })
}

/// True unless some axis separates the two shapes by more than `tolerance`
pub fn polygons_intersect(a: &[Vec2], b: &[Vec2], tolerance: f32) -> bool {
    if a.is_empty() || b.is_empty() {
        return false;
    }

    let mut tested_any = false;
    for axis in edge_normals(a).chain(edge_normals(b)) {
        tested_any = true;
        let (a_min, a_max) = project(a, axis);
        let (b_min, b_max) = project(b, axis);
        if a_max + tolerance < b_min || b_max + tolerance < a_min {
            return false;
        }
    }

    if !tested_any {
        // Two points (or fully degenerate shapes): plain distance check
        return a[0].distance(b[0]) <= tolerance;
    }

    // Point/segment pairs have no axis of their own along the segment
    if a.len() < 3 && b.len() < 3 {
        let axis = (a[0] - b[0]).normalize_or_zero();
        if axis != Vec2::ZERO {
            let (a_min, a_max) = project(a, axis);
            let (b_min, b_max) = project(b, axis);
            if a_max + tolerance < b_min || b_max + tolerance < a_min {
                return false;
            }
        }
    }
    true
}

/// One overlapping pair found during a scan
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Contact {
    ShipHazard { hazard: EntityId },
    ProjectileHazard { projectile: EntityId, hazard: EntityId },
}

/// Test the ship (when given) and every projectile against every hazard.
///
/// Vertices are taken after this tick's updates and wraps. Ship contacts
/// come first, then projectile contacts, both in id order.
pub fn find_contacts<C: Collider>(
    collider: &C,
    ship: Option<&[Vec2]>,
    projectiles: &Registry<Projectile>,
    hazards: &Registry<Hazard>,
) -> Vec<Contact> {
    let hazard_shapes: Vec<(EntityId, Vec<Vec2>)> =
        hazards.iter().map(|(id, h)| (id, h.vertices())).collect();
    let mut contacts = Vec::new();

    if let Some(ship) = ship {
        for (hazard, shape) in &hazard_shapes {
            if collider.intersects(ship, shape) {
                contacts.push(Contact::ShipHazard { hazard: *hazard });
            }
        }
    }

    for (projectile, p) in projectiles.iter() {
        let shot = p.vertices();
        for (hazard, shape) in &hazard_shapes {
            if collider.intersects(&shot, shape) {
                contacts.push(Contact::ProjectileHazard {
                    projectile,
                    hazard: *hazard,
                });
            }
        }
    }

    contacts
}
