//! Fixed timestep simulation tick
//!
//! Order within a running tick: ship, projectiles and hazards update and wrap,
//! the ship fires if its charge gate allows, expired shots despawn, contacts
//! are resolved on post-wrap geometry, and a cleared wave spawns the next one.

use std::collections::BTreeSet;

use super::collision::{Contact, SatCollider, find_contacts};
use super::entity::Entity;
use super::registry::EntityId;
use super::ship::ShipControls;
use super::state::{GameEvent, GamePhase, GameState};

/// Input commands for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Held keys
    pub controls: ShipControls,
    /// Pause toggle (one per physical press)
    pub pause: bool,
    /// Restart after game over (one per physical press)
    pub restart: bool,
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    state.events.clear();

    if input.pause {
        state.toggle_pause();
    }

    if input.restart && state.phase == GamePhase::GameOver {
        state.restart();
        return;
    }

    // Nothing moves while paused or after game over
    match state.phase {
        GamePhase::Paused | GamePhase::GameOver => return,
        GamePhase::Running => {}
    }

    state.time_ticks += 1;
    let bounds = state.bounds;

    state.ship.set_controls(input.controls);
    state.ship.update(dt);
    state.ship.wrap(&bounds);

    for projectile in state.projectiles.values_mut() {
        projectile.update(dt);
        projectile.wrap(&bounds);
    }
    for hazard in state.hazards.values_mut() {
        hazard.update(dt);
        hazard.wrap(&bounds);
    }

    // No-op unless the charge gate raised wants_to_shoot this tick
    if let Some(id) = state.ship.shoot(&mut state.projectiles, &state.config.projectile) {
        log::debug!("Shot {id} fired at tick {}", state.time_ticks);
        state.events.push(GameEvent::ProjectileSpawned(id));
    }

    let events = &mut state.events;
    state.projectiles.retain(|id, p| {
        if p.is_expired() {
            events.push(GameEvent::ProjectileExpired(id));
            false
        } else {
            true
        }
    });

    resolve_collisions(state);

    if state.phase == GamePhase::Running && state.hazards.is_empty() {
        state.events.push(GameEvent::WaveCleared {
            wave: state.wave_index,
        });
        state.wave_index += 1;
        state.spawn_wave();
    }
}

/// Apply this tick's contacts: each projectile and each hazard is consumed
/// at most once, and the ship can be destroyed at most once.
fn resolve_collisions(state: &mut GameState) {
    let ship_shape = (!state.ship.is_invulnerable()).then(|| state.ship.vertices());
    let contacts = find_contacts(
        &SatCollider::default(),
        ship_shape.as_deref(),
        &state.projectiles,
        &state.hazards,
    );
    if contacts.is_empty() {
        return;
    }

    let mut spent: BTreeSet<EntityId> = BTreeSet::new();
    let mut destroyed: Vec<(EntityId, bool)> = Vec::new();
    let mut ship_hit = false;

    for contact in contacts {
        match contact {
            Contact::ShipHazard { hazard } => {
                if !ship_hit && !destroyed.iter().any(|(h, _)| *h == hazard) {
                    ship_hit = true;
                    destroyed.push((hazard, false));
                }
            }
            Contact::ProjectileHazard { projectile, hazard } => {
                if !spent.contains(&projectile) && !destroyed.iter().any(|(h, _)| *h == hazard) {
                    spent.insert(projectile);
                    destroyed.push((hazard, true));
                }
            }
        }
    }

    for id in spent {
        state.projectiles.remove(id);
    }
    for (id, scored) in destroyed {
        destroy_hazard(state, id, scored);
    }
    if ship_hit {
        lose_life(state);
    }
}

/// Remove a hazard, award its points if it was shot, and spawn its children
fn destroy_hazard(state: &mut GameState, id: EntityId, scored: bool) {
    let Some(hazard) = state.hazards.remove(id) else {
        return;
    };
    if scored {
        state.score += state.config.rule_for(hazard.size).map_or(0, |r| r.points);
    }
    state.events.push(GameEvent::HazardDestroyed {
        id,
        size: hazard.size,
    });

    let children = hazard.split(&state.config, &mut state.rng);
    if !children.is_empty() {
        log::debug!("Hazard {id} ({:?}) split into {}", hazard.size, children.len());
    }
    for child in children {
        let size = child.size;
        let child_id = state.hazards.insert(child);
        state.events.push(GameEvent::HazardSpawned { id: child_id, size });
    }
}

fn lose_life(state: &mut GameState) {
    state.lives = state.lives.saturating_sub(1);
    state.events.push(GameEvent::ShipDestroyed {
        lives_left: state.lives,
    });
    log::info!("Ship destroyed, {} lives left", state.lives);

    if state.lives == 0 {
        state.phase = GamePhase::GameOver;
        state.events.push(GameEvent::GameOver { score: state.score });
        log::info!("Game over: score {} on wave {}", state.score, state.wave_index + 1);
    } else {
        state.ship.respawn(state.bounds.center());
    }
}
