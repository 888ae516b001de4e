//! Game loop
//!
//! One frame: drain window events, tick the simulation once with the fixed
//! step (or not at all while paused), then hand the scene to the window.

use crate::config::GameConfig;
use crate::platform::{EdgeTrigger, Key, Pacer, Window, WindowEvent};
use crate::renderer::{DrawList, colors};
use crate::sim::{GamePhase, GameState, ShipControls, TickInput, tick};

pub struct Game {
    state: GameState,
    pause_key: EdgeTrigger,
    restart_key: EdgeTrigger,
    frame: DrawList,
    pacer: Option<Pacer>,
}

impl Game {
    /// New game, unpaced (frames run back to back)
    pub fn new(config: GameConfig, seed: u64) -> Self {
        Self {
            state: GameState::new(config, seed),
            pause_key: EdgeTrigger::new(),
            restart_key: EdgeTrigger::new(),
            frame: DrawList::new(),
            pacer: None,
        }
    }

    /// Sleep out each frame to hold the configured tick rate
    pub fn with_pacing(mut self, paced: bool) -> Self {
        self.pacer = paced.then(|| Pacer::new(self.state.config.tick_rate));
        self
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Run one frame against `window`.
    ///
    /// A close request is honoured by the caller after this frame completes.
    pub fn frame<W: Window>(&mut self, window: &mut W) {
        let mut pause = false;
        let mut restart = false;

        while let Some(event) = window.poll_event() {
            match event {
                WindowEvent::Closed | WindowEvent::KeyPressed(Key::Escape) => window.close(),
                WindowEvent::KeyPressed(Key::P) => pause |= self.pause_key.observe(true),
                WindowEvent::KeyReleased(Key::P) => {
                    self.pause_key.observe(false);
                }
                WindowEvent::KeyPressed(Key::Enter) => restart |= self.restart_key.observe(true),
                WindowEvent::KeyReleased(Key::Enter) => {
                    self.restart_key.observe(false);
                }
                WindowEvent::KeyPressed(_) | WindowEvent::KeyReleased(_) => {}
            }
        }

        // Held keys only matter while the simulation runs
        let controls = if self.state.phase == GamePhase::Running {
            ShipControls {
                thrust: window.is_key_held(Key::Up),
                reverse: window.is_key_held(Key::Down),
                left: window.is_key_held(Key::Left),
                right: window.is_key_held(Key::Right),
                fire: window.is_key_held(Key::Space),
            }
        } else {
            ShipControls::default()
        };

        let input = TickInput {
            controls,
            pause,
            restart,
        };
        let dt = self.state.config.sim_dt();
        tick(&mut self.state, &input, dt);

        window.clear(colors::BACKGROUND);
        self.frame.clear();
        self.state.draw(&mut self.frame, window.size());
        for drawable in &self.frame {
            window.draw(drawable);
        }
        window.display();

        log::trace!(
            "Tick {} ({:?}): {} hazards, {} projectiles, {} drawables",
            self.state.time_ticks,
            self.state.phase,
            self.state.hazards.len(),
            self.state.projectiles.len(),
            self.frame.len()
        );
    }

    /// Run frames until the window closes. Returns the number of frames run.
    pub fn run<W: Window>(&mut self, window: &mut W) -> u64 {
        log::info!(
            "Game loop starting at {} Hz (seed {})",
            self.state.config.tick_rate,
            self.state.seed
        );

        let mut frames = 0;
        while window.is_open() {
            self.frame(window);
            frames += 1;
            if let Some(pacer) = self.pacer.as_mut() {
                pacer.wait();
            }
        }

        log::info!(
            "Window closed after {frames} frames: score {}, wave {}, {:?}",
            self.state.score,
            self.state.wave_index + 1,
            self.state.phase
        );
        frames
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::{HeadlessWindow, KeySource, ScriptAction};
    use crate::renderer::Drawable;
    use crate::sim::{Entity, GameEvent};

    fn game() -> Game {
        Game::new(GameConfig::default(), 2024)
    }

    fn window() -> HeadlessWindow {
        HeadlessWindow::new((800, 600))
    }

    #[test]
    fn test_runs_until_frame_limit() {
        let mut game = game();
        let mut window = window().with_frame_limit(30);
        assert_eq!(game.run(&mut window), 30);
        assert_eq!(game.state().time_ticks, 30);
        assert_eq!(game.state().phase, GamePhase::Running);
    }

    #[test]
    fn test_pause_shows_overlay_and_freezes() {
        let mut game = game();
        let mut window = window()
            .hold(Key::Up, 0, 100)
            .at(2, ScriptAction::Press(Key::P))
            .with_frame_limit(10);
        game.run(&mut window);

        assert_eq!(game.state().phase, GamePhase::Paused);
        assert_eq!(game.state().time_ticks, 2);
        let frame = window.last_frame();
        assert_eq!(frame.len(), 1);
        assert!(matches!(
            frame.iter().next(),
            Some(Drawable::Text { content, .. }) if content == "Game Paused"
        ));
    }

    #[test]
    fn test_key_repeat_toggles_once() {
        let mut game = game();
        let mut window = window()
            .at(1, ScriptAction::Press(Key::P))
            .at(2, ScriptAction::Press(Key::P))
            .at(3, ScriptAction::Press(Key::P))
            .with_frame_limit(6);
        game.run(&mut window);
        assert_eq!(game.state().phase, GamePhase::Paused);
        assert_eq!(game.state().time_ticks, 1);
    }

    #[test]
    fn test_second_press_resumes() {
        let mut game = game();
        let mut window = window()
            .at(1, ScriptAction::Press(Key::P))
            .at(2, ScriptAction::Release(Key::P))
            .at(3, ScriptAction::Press(Key::P))
            .with_frame_limit(6);
        game.run(&mut window);
        assert_eq!(game.state().phase, GamePhase::Running);
        // Frames 0, 3, 4 and 5 ticked
        assert_eq!(game.state().time_ticks, 4);
    }

    #[test]
    fn test_close_finishes_in_flight_frame() {
        let mut game = game();
        let mut window = window().at(3, ScriptAction::Close);
        assert_eq!(game.run(&mut window), 4);
        assert_eq!(window.frames_presented(), 4);
        assert_eq!(game.state().time_ticks, 4);
    }

    #[test]
    fn test_escape_closes() {
        let mut game = game();
        let mut window = window().at(0, ScriptAction::Press(Key::Escape));
        assert_eq!(game.run(&mut window), 1);
        assert!(!window.is_open());
    }

    #[test]
    fn test_held_thrust_moves_ship() {
        let mut game = game();
        let mut window = window().hold(Key::Up, 0, 10).with_frame_limit(10);
        game.run(&mut window);
        let ship = game.state().ship.pose();
        assert!(ship.velocity.y > 0.0);
        assert!(ship.position.y > game.state().bounds.center().y);
        assert!(!window.is_key_held(Key::Down));
    }

    #[test]
    fn test_held_fire_shoots_after_charge() {
        let mut game = game();
        let threshold = game.state().config.ship.shot_charging_time as u64;
        let mut window = window().hold(Key::Space, 0, 100).with_frame_limit(threshold);
        game.run(&mut window);
        assert!(
            game.state()
                .events
                .iter()
                .any(|e| matches!(e, GameEvent::ProjectileSpawned(_)))
        );
    }

    #[test]
    fn test_enter_restarts_after_game_over() {
        let mut game = game();
        game.state.phase = GamePhase::GameOver;
        game.state.score = 1234;
        let mut window = window()
            .at(1, ScriptAction::Press(Key::Enter))
            .with_frame_limit(2);

        game.frame(&mut window);
        assert_eq!(game.state().phase, GamePhase::GameOver);
        assert!(matches!(
            window.last_frame().iter().last(),
            Some(Drawable::Text { content, .. }) if content.starts_with("Game Over")
        ));

        game.frame(&mut window);
        assert_eq!(game.state().phase, GamePhase::Running);
        assert_eq!(game.state().score, 0);
        assert_eq!(game.state().seed, 2025);
    }

    #[test]
    fn test_enter_ignored_while_running() {
        let mut game = game();
        let mut window = window()
            .at(0, ScriptAction::Press(Key::Enter))
            .with_frame_limit(3);
        game.run(&mut window);
        assert_eq!(game.state().seed, 2024);
        assert_eq!(game.state().time_ticks, 3);
    }
}
