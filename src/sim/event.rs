/// Events emitted during a simulation step.
/// The game loop consumes these to drive the scheduler and messages.

use crate::domain::cell::Cell;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum CollisionKind {
    SelfHit,
    Obstacle,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GameEvent {
    Moved { head: Cell },
    FoodEaten { at: Cell, score: u32 },
    HighScore { score: u32 },
    SpeedChanged { interval_ms: u64 },
    Collided { kind: CollisionKind, score: u32 },
    BoardFull { score: u32 },
}
