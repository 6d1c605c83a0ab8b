/// WorldState: the complete snapshot of a running game.
///
/// Built by `WorldState::start` and rebuilt wholesale by `reset`; nothing
/// reassigns the run fields one by one. Only the name, the high score and
/// the on-screen message survive a reset.
///
/// ## Direction
///
///   - `direction`:         the direction the snake last moved in
///   - `pending_direction`: what the next tick will use
///
/// Input only writes `pending_direction`, and only if it is not the
/// reverse of `direction`. Two presses inside one tick can therefore never
/// fold the snake back onto itself.

use rand::Rng;

use crate::config::{GameConfig, GridConfig, SpeedConfig};
use crate::domain::cell::{Cell, Field};
use crate::domain::color::Rgb;
use crate::domain::direction::Direction;
use crate::domain::layout;
use crate::domain::placement;
use crate::domain::snake::Snake;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Phase {
    Running,
    Collided,
    Resetting,
    Won,
}

#[derive(Clone, Debug)]
pub struct WorldState {
    // ── Field ──
    pub grid: GridConfig,
    pub field: Field,
    pub name: String,
    pub obstacles: Vec<Cell>,
    pub obstacle_color: Rgb,

    // ── Snake / food ──
    pub snake: Snake,
    pub direction: Direction,
    pub pending_direction: Direction,
    pub food: Option<Cell>,

    // ── Score / pace ──
    pub score: u32,
    pub high_score: u32,
    pub speed: SpeedConfig,
    /// Current tick interval.
    pub speed_ms: u64,

    // ── Meta ──
    pub phase: Phase,
    pub tick: u64,
    pub paused: bool,

    // ── UI ──
    pub message: String,
    pub message_timer: u32,
}

// ── Construction ──

impl WorldState {
    /// A fresh run: start snake, obstacles for `name`, then food.
    /// Phase is `Won` if the food has nowhere to go.
    pub fn start<R: Rng + ?Sized>(
        grid: GridConfig,
        speed: SpeedConfig,
        name: String,
        high_score: u32,
        rng: &mut R,
    ) -> Self {
        let field = grid.field();
        let snake = Snake::starting(field.cell_size);

        let mut obstacles = layout::generate(&name, &grid.layout(), rng);
        let before = obstacles.len();
        obstacles.retain(|c| !snake.contains(*c));
        if obstacles.len() != before {
            crate::log!("{} obstacle cells overlapped the start position", before - obstacles.len());
        }

        let obstacle_color = Rgb::random(rng);

        let mut world = WorldState {
            grid,
            field,
            name,
            obstacles,
            obstacle_color,
            snake,
            direction: Direction::Right,
            pending_direction: Direction::Right,
            food: None,
            score: 0,
            high_score,
            speed_ms: speed.initial_ms,
            speed,
            phase: Phase::Running,
            tick: 0,
            paused: false,
            message: String::new(),
            message_timer: 0,
        };
        world.place_food(rng);
        world
    }

    pub fn from_config<R: Rng + ?Sized>(config: &GameConfig, high_score: u32, rng: &mut R) -> Self {
        WorldState::start(
            config.grid.clone(),
            config.speed.clone(),
            config.name.clone(),
            high_score,
            rng,
        )
    }

    /// Full reset: a new run with the current name. Keeps the high score
    /// and any message already on screen.
    pub fn reset<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.phase = Phase::Resetting;
        let name = std::mem::take(&mut self.name);
        let message = std::mem::take(&mut self.message);
        let message_timer = self.message_timer;

        *self = WorldState::start(self.grid.clone(), self.speed.clone(), name, self.high_score, rng);
        self.message = message;
        self.message_timer = message_timer;
    }
}

// ── Queries / small mutations ──

impl WorldState {
    /// Queue a turn for the next tick. Refuses a reversal of the current
    /// travel direction.
    pub fn steer(&mut self, dir: Direction) -> bool {
        if self.direction.accepts(dir) {
            self.pending_direction = dir;
            true
        } else {
            false
        }
    }

    /// Put food on a free cell. With no free cell left the food is gone and
    /// the run is `Won`; returns false in that case.
    pub fn place_food<R: Rng + ?Sized>(&mut self, rng: &mut R) -> bool {
        self.food = placement::find_free_cell(&self.field, &self.snake, &self.obstacles, rng);
        if self.food.is_none() {
            self.phase = Phase::Won;
        }
        self.food.is_some()
    }

    pub fn is_obstacle(&self, c: Cell) -> bool {
        placement::is_occupied(c, &self.obstacles)
    }

    /// Text for the score display.
    pub fn score_line(&self) -> String {
        format!("Score: {} | High Score: {}", self.score, self.high_score)
    }

    /// Show `msg`; `duration` in ticks, 0 = until replaced.
    pub fn set_message(&mut self, msg: &str, duration: u32) {
        self.message = msg.to_string();
        self.message_timer = duration;
    }

    pub fn clear_message(&mut self) {
        self.message.clear();
        self.message_timer = 0;
    }
}
