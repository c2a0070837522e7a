use color_eyre::Result;
use rand::Rng;
use std::time::{Duration, Instant};
use tracing::info;

use crate::config::GameConfig;
use crate::entities::GameState;
use crate::input::{InputAction, InputManager};
use crate::renderer::RenderView;
use crate::session::Session;
use crate::shell::Shell;

/// Why a game session stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    HealthDepleted,
    Quit,
}

/// Final numbers of a finished session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSummary {
    pub score: u32,
    pub health: i32,
    pub ticks: u64,
    pub end: SessionEnd,
}

/// Keeps ticks at a fixed rate by sleeping away whatever the tick didn't use
#[derive(Debug, Clone)]
pub struct FramePacer {
    tick: Duration,
    last_tick: Option<Instant>,
}

impl FramePacer {
    pub fn new(tick: Duration) -> Self {
        Self {
            tick,
            last_tick: None,
        }
    }

    /// How long to wait at `now` so the tick that just ran lasts one full period.
    ///
    /// The first call only starts the clock.
    pub fn delay_at(&mut self, now: Instant) -> Duration {
        let delay = match self.last_tick {
            Some(last) => self.tick.saturating_sub(now.saturating_duration_since(last)),
            None => Duration::ZERO,
        };
        self.last_tick = Some(now + delay);
        delay
    }
}

/// The frame controller: owns the run from the start screen to termination
pub struct App<R: Rng> {
    config: GameConfig,
    rng: R,
    game_state: GameState,
    input_manager: InputManager,
}

impl<R: Rng> App<R> {
    /// Construct a new instance of [`App`].
    pub fn new(config: GameConfig, rng: R) -> Self {
        Self {
            config,
            rng,
            game_state: GameState::StartScreen,
            input_manager: InputManager::new(),
        }
    }

    pub fn game_state(&self) -> GameState {
        self.game_state
    }

    /// Runs the start screen and then one session.
    ///
    /// Returns `None` when the player closed the game from the start screen.
    pub fn run<S: Shell>(&mut self, shell: &mut S) -> Result<Option<SessionSummary>> {
        if !self.run_start_screen(shell)? {
            return Ok(None);
        }
        self.run_game_session(shell).map(Some)
    }

    /// Shows the start screen until a click (true) or a quit (false)
    pub fn run_start_screen<S: Shell>(&mut self, shell: &mut S) -> Result<bool> {
        self.game_state = GameState::StartScreen;
        info!("showing start screen");

        loop {
            shell.present_start_screen()?;

            let events = shell.poll_events()?;
            self.input_manager.process_events(&events, self.game_state);
            // Quit wins over a click landing in the same poll
            if self.input_manager.quit_requested() {
                self.game_state = GameState::Terminated;
                info!("closed from start screen");
                return Ok(false);
            }
            if self.input_manager.actions().contains(&InputAction::Start) {
                self.game_state = GameState::Playing;
                return Ok(true);
            }

            shell.delay(self.config.start_screen_delay);
        }
    }

    /// Plays one session at the configured tick rate until health runs out
    /// or the player quits
    pub fn run_game_session<S: Shell>(&mut self, shell: &mut S) -> Result<SessionSummary> {
        self.game_state = GameState::Playing;
        let mut session = Session::new(self.config.clone(), &mut self.rng);
        let mut pacer = FramePacer::new(self.config.tick_duration());
        info!(
            health = session.health,
            tick_rate = self.config.tick_rate,
            "session started"
        );

        let end = loop {
            let events = shell.poll_events()?;
            self.input_manager.process_events(&events, self.game_state);
            if self.input_manager.quit_requested() {
                break SessionEnd::Quit;
            }

            let report = session.step(self.input_manager.actions(), &mut self.rng);
            for cue in &report.cues {
                shell.play(*cue);
            }

            shell.present_session(&RenderView {
                player: &session.player,
                enemy: &session.enemy,
                projectiles: &session.projectiles,
                score: session.score,
                health: session.health,
                field_width: self.config.field_width,
                field_height: self.config.field_height,
            })?;

            if report.terminated {
                break SessionEnd::HealthDepleted;
            }

            shell.delay(pacer.delay_at(Instant::now()));
        };

        self.game_state = GameState::Terminated;
        let summary = SessionSummary {
            score: session.score,
            health: session.health,
            ticks: session.ticks,
            end,
        };
        info!(
            score = summary.score,
            health = summary.health,
            ticks = summary.ticks,
            end = ?summary.end,
            "session finished"
        );
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_tick_only_starts_the_clock() {
        let mut pacer = FramePacer::new(Duration::from_millis(33));
        assert_eq!(pacer.delay_at(Instant::now()), Duration::ZERO);
    }

    #[test]
    fn test_delay_fills_the_rest_of_the_tick() {
        let start = Instant::now();
        let mut pacer = FramePacer::new(Duration::from_millis(33));
        pacer.delay_at(start);

        let delay = pacer.delay_at(start + Duration::from_millis(10));
        assert_eq!(delay, Duration::from_millis(23));
    }

    #[test]
    fn test_slow_tick_gets_no_delay() {
        let start = Instant::now();
        let mut pacer = FramePacer::new(Duration::from_millis(33));
        pacer.delay_at(start);

        let delay = pacer.delay_at(start + Duration::from_millis(50));
        assert_eq!(delay, Duration::ZERO);
    }

    #[test]
    fn test_delay_measured_from_end_of_previous_wait() {
        let start = Instant::now();
        let mut pacer = FramePacer::new(Duration::from_millis(30));
        pacer.delay_at(start);
        // Tick 2 took 10ms and then waited 20ms, so it ended at 30ms
        pacer.delay_at(start + Duration::from_millis(10));

        let delay = pacer.delay_at(start + Duration::from_millis(35));
        assert_eq!(delay, Duration::from_millis(25));
    }
}
