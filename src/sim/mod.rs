//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No window or timing dependencies; drawing goes to a [`crate::renderer::DrawList`]

pub mod collision;
pub mod entity;
pub mod hazard;
pub mod projectile;
pub mod registry;
pub mod ship;
pub mod state;
pub mod tick;

pub use collision::{Collider, Contact, SatCollider, find_contacts, polygons_intersect};
pub use entity::{Bounds, Edge, Entity, Pose};
pub use hazard::{Hazard, HazardSize};
pub use projectile::Projectile;
pub use registry::{EntityId, Registry};
pub use ship::{ChargeState, RotateDirection, Ship, ShipControls, ThrustDirection};
pub use state::{GameEvent, GamePhase, GameState};
pub use tick::{TickInput, tick};
