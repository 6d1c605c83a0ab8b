/// GameLoop: the running game as the frontend sees it.
///
/// Owns the world, the tick scheduler, the random source and the high score
/// store. The frontend feeds it `Instant`s and player intent; it answers
/// with the events of each tick it ran.

use std::time::{Duration, Instant};

use rand::Rng;

use crate::config::GameConfig;
use crate::domain::direction::Direction;
use super::event::{CollisionKind, GameEvent};
use super::save::HighScoreStore;
use super::scheduler::TickScheduler;
use super::step;
use super::world::{Phase, WorldState};

pub const WIN_MESSAGE: &str = "You Win! No more space.";
pub const INVALID_NAME_MESSAGE: &str = "Please enter a valid name.";

pub fn game_over_message(score: u32) -> String {
    format!("Game Over! Your final score was: {}", score)
}

pub struct GameLoop<R: Rng, S: HighScoreStore> {
    pub world: WorldState,
    pub scheduler: TickScheduler,
    rng: R,
    store: S,
}

impl<R: Rng, S: HighScoreStore> GameLoop<R, S> {
    /// First run. The high score comes from `store`; the scheduler is armed
    /// unless the board is already full.
    pub fn new(config: &GameConfig, mut rng: R, store: S, now: Instant) -> Self {
        let high_score = store.load().unwrap_or(0);
        let world = WorldState::from_config(config, high_score, &mut rng);
        let scheduler = TickScheduler::new(Duration::from_millis(world.speed_ms));
        let mut game = GameLoop { world, scheduler, rng, store };
        game.arm(now);
        crate::log!(
            "new run: name={:?} obstacles={} color={}",
            game.world.name, game.world.obstacles.len(), game.world.obstacle_color.hex(),
        );
        game
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Run a tick if one is due.
    pub fn update(&mut self, now: Instant) -> Vec<GameEvent> {
        if !self.scheduler.poll(now) {
            return vec![];
        }
        let events = step::step(&mut self.world, &mut self.rng, &mut self.store);

        let mut head = None;
        for ev in &events {
            match ev {
                GameEvent::Moved { head: h } => head = Some(*h),
                GameEvent::FoodEaten { at, score } => {
                    crate::log!("food eaten at ({}, {}), score {}", at.x, at.y, score);
                }
                GameEvent::SpeedChanged { interval_ms } => {
                    self.scheduler.reschedule(Duration::from_millis(*interval_ms), now);
                    crate::log!("tick interval now {} ms", interval_ms);
                }
                GameEvent::HighScore { score } => {
                    crate::log!("new high score {}", score);
                }
                GameEvent::Collided { kind, score } => {
                    let what = match kind {
                        CollisionKind::SelfHit => "itself",
                        CollisionKind::Obstacle => "an obstacle",
                    };
                    let at = head.map_or_else(String::new, |c| format!(" at ({}, {})", c.x, c.y));
                    crate::log!("snake hit {}{} at score {} (length {})", what, at, score, self.world.snake.len());
                    self.world.set_message(&game_over_message(*score), 0);
                    self.restart(now);
                    // Wait for the player before the new run moves.
                    self.set_paused(true, now);
                }
                GameEvent::BoardFull { score } => {
                    self.scheduler.stop();
                    crate::log!("board full at score {}", score);
                    self.world.set_message(WIN_MESSAGE, 0);
                }
            }
        }
        events
    }

    /// New run with the current name. Keeps any message on screen.
    pub fn restart(&mut self, now: Instant) {
        self.world.reset(&mut self.rng);
        self.scheduler = TickScheduler::new(Duration::from_millis(self.world.speed_ms));
        self.arm(now);
    }

    /// Queue a turn. See `WorldState::steer`.
    pub fn steer(&mut self, dir: Direction) -> bool {
        self.world.steer(dir)
    }

    /// Switch to a new name and restart. A blank name is refused and the
    /// current run is left alone. Names longer than the field holds are cut.
    pub fn rename(&mut self, name: &str, now: Instant) -> bool {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            self.world.set_message(INVALID_NAME_MESSAGE, 0);
            return false;
        }
        let capacity = self.world.grid.layout().capacity();
        let name: String = trimmed.chars().take(capacity).collect();
        if name.chars().count() < trimmed.chars().count() {
            crate::log!("name {:?} cut to {:?}", trimmed, name);
        }

        self.world.name = name;
        self.world.clear_message();
        self.restart(now);
        crate::log!("renamed: name={:?} obstacles={}", self.world.name, self.world.obstacles.len());
        true
    }

    pub fn set_paused(&mut self, paused: bool, now: Instant) {
        if self.world.paused == paused {
            return;
        }
        self.world.paused = paused;
        if paused {
            self.scheduler.stop();
        } else {
            if self.world.message_timer == 0 {
                self.world.clear_message();
            }
            self.arm(now);
        }
    }

    pub fn toggle_pause(&mut self, now: Instant) {
        let paused = !self.world.paused;
        self.set_paused(paused, now);
    }

    fn arm(&mut self, now: Instant) {
        match self.world.phase {
            Phase::Running if !self.world.paused => self.scheduler.start(now),
            Phase::Won => {
                self.scheduler.stop();
                self.world.set_message(WIN_MESSAGE, 0);
            }
            _ => self.scheduler.stop(),
        }
    }
}
