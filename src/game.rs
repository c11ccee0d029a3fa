use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use log::info;

use crate::config::{GameConfig, GameMode};
use crate::input::{InputEvent, is_quit};
use crate::message::PlayerId;
use crate::term::TermManager;
use crate::world::World;

const PAUSE_TEXT: &str = "PAUSE (press P to continue)";

enum RoundEnd {
    Quit,
    Over,
}

/// Frame driver: owns the terminal, paces the steps and draws what the
/// world cannot (status line, banners).
pub struct SnakeGame {
    config: GameConfig,
    term: TermManager,
    scores: Vec<usize>,
}

impl SnakeGame {
    pub fn new(config: GameConfig, mut term: TermManager) -> Self {
        term.set_grid(config.width, config.height);
        let scores = vec![0; config.mode.players() as usize];
        SnakeGame { config, term, scores }
    }

    /// Plays rounds until the player quits. The terminal is restored on
    /// every way out, errors included.
    pub fn run(&mut self) -> Result<()> {
        self.term.setup().context("failed to prepare the terminal")?;
        let result = self.play_rounds();
        let restored = self.term.restore().context("failed to restore the terminal");
        first_error(result, restored)
    }

    ///////////////////////////////////////////////////////////////////////////

    fn play_rounds(&mut self) -> Result<()> {
        if !self.show_intro()? {
            return Ok(());
        }

        loop {
            match self.play()? {
                RoundEnd::Quit => return Ok(()),
                RoundEnd::Over => {
                    if is_quit(&self.term.read_key_blocking()?) {
                        return Ok(());
                    }
                }
            }
        }
    }

    /// Returns false when the player quits from the intro screen.
    fn show_intro(&mut self) -> Result<bool> {
        let steering: &[&str] = match self.config.mode {
            GameMode::SinglePlayer => &["Arrow keys or WASD to move"],
            GameMode::Multiplayer => &["Player 1: arrow keys", "Player 2: WASD"],
        };

        let mut lines = steering.to_vec();
        lines.extend_from_slice(&["P or Esc to pause", "Q or CTRL+C to quit", "", "Press any key to begin"]);
        self.term.show_message(&lines)?;

        let key = self.term.read_key_blocking()?;
        self.term.hide_message()?;
        Ok(!is_quit(&key))
    }

    fn play(&mut self) -> Result<RoundEnd> {
        self.term.clear()?;
        self.scores.iter_mut().for_each(|s| *s = 0);

        let mut world = World::new(&self.config);
        world.populate();
        world.update(&[])?;

        let mut pending: Vec<InputEvent> = vec![];

        while world.running() {
            let frame_start = Instant::now();

            world.update(&pending)?;
            self.draw(&world)?;

            let longest = self.scores.iter().copied().max().unwrap_or(0);
            let fps = self.config.base_fps as f64 * self.config.speed_factor(longest);
            let deadline = frame_start + Duration::from_secs_f64(1.0 / fps);
            pending = self.term.read_events_until(deadline)?;
        }

        let reason = match world.game_over_reason() {
            Some(reason) => reason.to_string(),
            None => return Ok(RoundEnd::Quit),
        };

        info!("round over ({}), scores {:?}", reason, self.scores);
        self.term.show_message(&[
            "GAME OVER",
            reason.as_str(),
            "",
            "Press any key to play again,",
            "or Q / CTRL+C to quit.",
        ])?;

        Ok(RoundEnd::Over)
    }

    fn draw(&mut self, world: &World) -> Result<()> {
        update_scores(&mut self.scores, world);

        world.render(&mut self.term);
        self.term.present()?;
        let status = self.status_line();
        self.term.print_status(&status)?;

        if world.paused() && !self.term.has_message() {
            self.term.show_message(&[PAUSE_TEXT])?;
        } else if !world.paused() && self.term.has_message() {
            self.term.hide_message()?;
        }

        Ok(())
    }

    fn status_line(&self) -> String {
        match self.config.mode {
            GameMode::SinglePlayer => format!(" Snake Length: {}", self.scores[0]),
            GameMode::Multiplayer => format!(
                " PLAYER 1 SCORE: {}    PLAYER 2 SCORE: {}",
                self.scores[0], self.scores[1]
            ),
        }
    }
}

/// Eliminated snakes keep their last score.
fn update_scores(scores: &mut [usize], world: &World) {
    for (i, score) in scores.iter_mut().enumerate() {
        if let Some(snake) = world.snake(i as PlayerId + 1) {
            *score = snake.max_length();
        }
    }
}

/// A failed round is reported over a failed terminal restore.
fn first_error(result: Result<()>, restored: Result<()>) -> Result<()> {
    result.and(restored)
}
