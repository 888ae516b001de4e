//! Game state and lifecycle events
//!
//! Everything the tick mutates lives here, owned directly: the ship singleton,
//! the projectile and hazard registries, the phase and the seeded RNG.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::entity::{Bounds, Entity};
use super::hazard::{Hazard, HazardSize};
use super::projectile::Projectile;
use super::registry::{EntityId, Registry};
use super::ship::Ship;
use crate::config::GameConfig;
use crate::renderer::{DrawList, game_over_overlay, hud_text, paused_overlay};

/// Spawn attempts before falling back to the point opposite the ship
const SPAWN_ATTEMPTS: usize = 16;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Simulation advancing every tick
    Running,
    /// Frozen; only the pause overlay is drawn
    Paused,
    /// Last life lost; waiting for a restart
    GameOver,
}

/// Lifecycle events produced by one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    ProjectileSpawned(EntityId),
    ProjectileExpired(EntityId),
    HazardSpawned { id: EntityId, size: HazardSize },
    HazardDestroyed { id: EntityId, size: HazardSize },
    ShipDestroyed { lives_left: u8 },
    WaveCleared { wave: u32 },
    GameOver { score: u64 },
    Paused,
    Resumed,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    pub config: GameConfig,
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub bounds: Bounds,
    pub phase: GamePhase,
    pub ship: Ship,
    pub projectiles: Registry<Projectile>,
    pub hazards: Registry<Hazard>,
    /// Current wave index (0-based)
    pub wave_index: u32,
    pub score: u64,
    pub lives: u8,
    /// Simulation tick counter (does not advance while paused)
    pub time_ticks: u64,
    /// Events from the most recent tick
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Fresh run: ship at the arena center, first wave spawned
    pub fn new(config: GameConfig, seed: u64) -> Self {
        let bounds = Bounds::new(config.arena.width, config.arena.height);
        let ship = Ship::new(bounds.center(), config.ship.clone());
        let lives = config.ship.lives;
        let mut state = Self {
            config,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            bounds,
            phase: GamePhase::Running,
            ship,
            projectiles: Registry::new(),
            hazards: Registry::new(),
            wave_index: 0,
            score: 0,
            lives,
            time_ticks: 0,
            events: Vec::new(),
        };
        state.spawn_wave();
        state
    }

    /// Throw the run away and start over with the next seed
    pub fn restart(&mut self) {
        let seed = self.seed.wrapping_add(1);
        log::info!("Restarting with seed {seed} (final score {})", self.score);
        *self = Self::new(self.config.clone(), seed);
    }

    /// Number of hazards in the current wave
    pub fn wave_size(&self) -> u32 {
        let h = &self.config.hazards;
        h.initial_count
            .saturating_add(self.wave_index.saturating_mul(h.per_wave_increase))
            .min(h.max_count)
    }

    /// Spawn the current wave of large hazards away from the ship
    pub fn spawn_wave(&mut self) {
        let count = self.wave_size();
        let Some(rule) = self.config.rule_for(HazardSize::Large).cloned() else {
            log::warn!("No rule for large hazards, wave {} left empty", self.wave_index);
            return;
        };
        let vertex_count = self.config.hazards.vertex_count;

        for _ in 0..count {
            let position = self.spawn_point();
            let hazard = Hazard::random(&rule, position, vertex_count, &mut self.rng);
            let id = self.hazards.insert(hazard);
            self.events.push(GameEvent::HazardSpawned {
                id,
                size: HazardSize::Large,
            });
        }
        log::info!("Wave {}: spawned {} hazards", self.wave_index + 1, count);
    }

    /// Random point at least `spawn_clearance` from the ship
    fn spawn_point(&mut self) -> Vec2 {
        let ship = self.ship.pose().position;
        let clearance = self.config.hazards.spawn_clearance;
        let (min, max) = (self.bounds.min, self.bounds.max);

        for _ in 0..SPAWN_ATTEMPTS {
            let p = Vec2::new(
                self.rng.random_range(min.x..=max.x),
                self.rng.random_range(min.y..=max.y),
            );
            if p.distance(ship) >= clearance {
                return p;
            }
        }
        // Farthest point on the torus
        let half = Vec2::new(self.bounds.width(), self.bounds.height()) * 0.5;
        let offset = ship - min + half;
        min + Vec2::new(
            offset.x.rem_euclid(self.bounds.width()),
            offset.y.rem_euclid(self.bounds.height()),
        )
    }

    /// Flip between Running and Paused. No effect after game over.
    pub fn toggle_pause(&mut self) -> GamePhase {
        match self.phase {
            GamePhase::Running => {
                self.phase = GamePhase::Paused;
                self.events.push(GameEvent::Paused);
                log::debug!("Paused at tick {}", self.time_ticks);
            }
            GamePhase::Paused => {
                self.phase = GamePhase::Running;
                self.events.push(GameEvent::Resumed);
                log::debug!("Resumed at tick {}", self.time_ticks);
            }
            GamePhase::GameOver => {}
        }
        self.phase
    }

    /// Collect this frame's drawables
    pub fn draw(&mut self, list: &mut DrawList, window_size: (u32, u32)) {
        match self.phase {
            GamePhase::Paused => list.push(paused_overlay(window_size)),
            GamePhase::GameOver => {
                for hazard in self.hazards.values_mut() {
                    hazard.draw(list);
                }
                list.push(game_over_overlay(window_size, self.score));
            }
            GamePhase::Running => {
                for hazard in self.hazards.values_mut() {
                    hazard.draw(list);
                }
                for projectile in self.projectiles.values_mut() {
                    projectile.draw(list);
                }
                self.ship.draw(list);
                list.push(hud_text(window_size, self.score, self.lives, self.wave_index));
            }
        }
    }
}
