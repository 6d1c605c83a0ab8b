/// The step function: advances the world by one tick.
///
/// Processing order:
///   1. Apply the queued direction
///   2. Move the head (toroidal wrap) and prepend it
///   3. Self collision, then obstacle collision → `Collided`, stop
///   4. Food: score, high score, new food, speed ramp; else drop the tail
///
/// Rendering and the scheduler live outside; the step only reports what
/// happened through `GameEvent`s.

use rand::Rng;

use crate::domain::cell::Cell;
use super::event::{CollisionKind, GameEvent};
use super::save::HighScoreStore;
use super::world::{Phase, WorldState};

// ══════════════════════════════════════════════════════════════
// Main entry point
// ══════════════════════════════════════════════════════════════

pub fn step<R: Rng + ?Sized>(
    world: &mut WorldState,
    rng: &mut R,
    scores: &mut dyn HighScoreStore,
) -> Vec<GameEvent> {
    if world.phase != Phase::Running || world.paused { return vec![]; }

    let mut events: Vec<GameEvent> = Vec::new();
    world.tick += 1;

    if world.message_timer > 0 {
        world.message_timer -= 1;
        if world.message_timer == 0 { world.message.clear(); }
    }

    let head = advance_head(world);
    events.push(GameEvent::Moved { head });

    if resolve_collision(world, &mut events) { return events; }
    resolve_food(world, rng, scores, &mut events);

    events
}

// ══════════════════════════════════════════════════════════════
// Movement
// ══════════════════════════════════════════════════════════════

fn advance_head(world: &mut WorldState) -> Cell {
    world.direction = world.pending_direction;
    let (dx, dy) = world.direction.delta();
    let head = world
        .field
        .wrap(world.snake.head().offset(dx, dy, world.field.cell_size));
    world.snake.push_head(head);
    head
}

// ══════════════════════════════════════════════════════════════
// Collisions
// ══════════════════════════════════════════════════════════════

fn resolve_collision(world: &mut WorldState, events: &mut Vec<GameEvent>) -> bool {
    let kind = if world.snake.head_hits_body() {
        CollisionKind::SelfHit
    } else if world.is_obstacle(world.snake.head()) {
        CollisionKind::Obstacle
    } else {
        return false;
    };

    world.phase = Phase::Collided;
    events.push(GameEvent::Collided { kind, score: world.score });
    true
}

// ══════════════════════════════════════════════════════════════
// Food, score, pace
// ══════════════════════════════════════════════════════════════

fn resolve_food<R: Rng + ?Sized>(
    world: &mut WorldState,
    rng: &mut R,
    scores: &mut dyn HighScoreStore,
    events: &mut Vec<GameEvent>,
) {
    let head = world.snake.head();
    if world.food != Some(head) {
        world.snake.drop_tail();
        return;
    }

    world.score += 1;
    events.push(GameEvent::FoodEaten { at: head, score: world.score });
    record_high_score(world, scores, events);

    let placed = world.place_food(rng);

    if let Some(interval_ms) = ramp_speed(world) {
        events.push(GameEvent::SpeedChanged { interval_ms });
    }

    if !placed {
        events.push(GameEvent::BoardFull { score: world.score });
    }
}

fn record_high_score(world: &mut WorldState, scores: &mut dyn HighScoreStore, events: &mut Vec<GameEvent>) {
    if world.score <= world.high_score { return; }
    world.high_score = world.score;
    events.push(GameEvent::HighScore { score: world.score });
    if let Err(e) = scores.store(world.score) {
        crate::log!("{e}");
        world.set_message("High score could not be saved", 15);
    }
}

/// Every `ramp_every` points, shave `decrement_ms` off the interval until
/// the floor. Returns the new interval if it changed.
fn ramp_speed(world: &mut WorldState) -> Option<u64> {
    let every = world.speed.ramp_every;
    if every == 0 || world.score == 0 || world.score % every != 0 { return None; }
    if world.speed_ms <= world.speed.floor_ms { return None; }

    let next = world
        .speed_ms
        .saturating_sub(world.speed.decrement_ms)
        .max(world.speed.floor_ms);
    if next == world.speed_ms { return None; }
    world.speed_ms = next;
    Some(next)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::domain::direction::Direction;
    use crate::domain::snake::Snake;
    use crate::sim::save::MemoryStore;
    use rand::SeedableRng;
    use rand_chacha::ChaCha12Rng;

    fn setup(name: &str) -> (WorldState, ChaCha12Rng, MemoryStore) {
        let mut config = GameConfig::default();
        config.name = name.to_string();
        let mut rng = ChaCha12Rng::seed_from_u64(0x5EED);
        let world = WorldState::from_config(&config, 0, &mut rng);
        (world, rng, MemoryStore::new())
    }

    fn cells(snake: &Snake) -> Vec<Cell> {
        snake.iter().copied().collect()
    }

    /// Park the food somewhere the snake won't reach this test.
    fn food_far_away(w: &mut WorldState) {
        w.food = Some(Cell::at(0, 19, 20));
    }

    #[test]
    fn plain_move_shifts_right() {
        let (mut w, mut rng, mut store) = setup("AB");
        food_far_away(&mut w);
        let before = cells(&w.snake);

        let events = step(&mut w, &mut rng, &mut store);

        let expected: Vec<Cell> = before.iter().map(|c| c.offset(1, 0, 20)).collect();
        assert_eq!(cells(&w.snake), expected);
        assert_eq!(w.snake.len(), 3);
        assert_eq!(w.score, 0);
        assert_eq!(w.phase, Phase::Running);
        assert_eq!(events, vec![GameEvent::Moved { head: Cell::at(10, 9, 20) }]);
    }

    #[test]
    fn queued_turn_applies_on_tick() {
        let (mut w, mut rng, mut store) = setup("");
        food_far_away(&mut w);
        assert!(w.steer(Direction::Down));
        assert_eq!(w.direction, Direction::Right);
        step(&mut w, &mut rng, &mut store);
        assert_eq!(w.direction, Direction::Down);
        assert_eq!(w.snake.head(), Cell::at(9, 10, 20));
    }

    #[test]
    fn eating_grows_and_scores() {
        let (mut w, mut rng, mut store) = setup("AB");
        w.food = Some(Cell::at(10, 9, 20));

        let events = step(&mut w, &mut rng, &mut store);

        assert_eq!(w.score, 1);
        assert_eq!(w.snake.len(), 4);
        assert_eq!(w.high_score, 1);
        assert_eq!(store.load(), Some(1));
        let food = w.food.unwrap();
        assert!(!w.snake.contains(food));
        assert!(!w.is_obstacle(food));
        assert!(events.contains(&GameEvent::FoodEaten { at: Cell::at(10, 9, 20), score: 1 }));
        assert!(events.contains(&GameEvent::HighScore { score: 1 }));
    }

    #[test]
    fn length_grows_only_when_eating() {
        let (mut w, mut rng, mut store) = setup("");
        for _ in 0..200 {
            let food_before = w.food;
            let len_before = w.snake.len();
            step(&mut w, &mut rng, &mut store);
            if w.phase != Phase::Running { break; }
            let ate = food_before == Some(w.snake.head());
            assert_eq!(w.snake.len(), len_before + ate as usize);
        }
    }

    #[test]
    fn high_score_not_lowered() {
        let (mut w, mut rng, _) = setup("");
        let mut store = MemoryStore::with_score(10);
        w.high_score = 10;
        w.food = Some(Cell::at(10, 9, 20));
        let events = step(&mut w, &mut rng, &mut store);
        assert_eq!(w.high_score, 10);
        assert_eq!(store.load(), Some(10));
        assert!(!events.iter().any(|e| matches!(e, GameEvent::HighScore { .. })));
    }

    #[test]
    fn self_collision() {
        let (mut w, mut rng, mut store) = setup("");
        // Head at (5,5) heading up, body curls so (5,4) is occupied.
        w.snake = Snake::from_cells([
            Cell::at(5, 5, 20),
            Cell::at(6, 5, 20),
            Cell::at(6, 4, 20),
            Cell::at(5, 4, 20),
            Cell::at(4, 4, 20),
        ])
        .unwrap();
        w.direction = Direction::Up;
        w.pending_direction = Direction::Up;
        food_far_away(&mut w);

        let events = step(&mut w, &mut rng, &mut store);

        assert_eq!(w.phase, Phase::Collided);
        assert!(events.contains(&GameEvent::Collided { kind: CollisionKind::SelfHit, score: 0 }));
    }

    #[test]
    fn obstacle_collision() {
        let (mut w, mut rng, mut store) = setup("");
        w.obstacles = vec![Cell::at(10, 9, 20)];
        food_far_away(&mut w);
        let events = step(&mut w, &mut rng, &mut store);
        assert_eq!(w.phase, Phase::Collided);
        assert!(events.contains(&GameEvent::Collided { kind: CollisionKind::Obstacle, score: 0 }));
    }

    #[test]
    fn wraps_through_right_edge() {
        let (mut w, mut rng, mut store) = setup("");
        w.snake = Snake::from_cells([Cell::at(29, 3, 20), Cell::at(28, 3, 20)]).unwrap();
        food_far_away(&mut w);
        step(&mut w, &mut rng, &mut store);
        assert_eq!(w.snake.head(), Cell::new(0, 60));
        assert_eq!(w.phase, Phase::Running);
    }

    #[test]
    fn wraps_through_top_edge() {
        let (mut w, mut rng, mut store) = setup("");
        w.snake = Snake::from_cells([Cell::at(4, 0, 20), Cell::at(4, 1, 20)]).unwrap();
        w.direction = Direction::Up;
        w.pending_direction = Direction::Up;
        food_far_away(&mut w);
        step(&mut w, &mut rng, &mut store);
        assert_eq!(w.snake.head(), Cell::at(4, 19, 20));
    }

    #[test]
    fn fifth_point_ramps_speed() {
        let (mut w, mut rng, mut store) = setup("");
        w.score = 4;
        w.food = Some(Cell::at(10, 9, 20));

        let events = step(&mut w, &mut rng, &mut store);

        assert_eq!(w.score, 5);
        assert_eq!(w.speed_ms, 190);
        assert!(events.contains(&GameEvent::SpeedChanged { interval_ms: 190 }));
    }

    #[test]
    fn non_multiple_does_not_ramp() {
        let (mut w, mut rng, mut store) = setup("");
        w.score = 5;
        w.food = Some(Cell::at(10, 9, 20));
        step(&mut w, &mut rng, &mut store);
        assert_eq!(w.speed_ms, 200);
    }

    #[test]
    fn speed_floor_holds() {
        let (mut w, mut rng, mut store) = setup("");
        w.score = 9;
        w.speed_ms = 50;
        w.food = Some(Cell::at(10, 9, 20));
        let events = step(&mut w, &mut rng, &mut store);
        assert_eq!(w.speed_ms, 50);
        assert!(!events.iter().any(|e| matches!(e, GameEvent::SpeedChanged { .. })));

        w.score = 14;
        w.speed_ms = 55;
        w.food = Some(w.snake.head().offset(1, 0, 20));
        step(&mut w, &mut rng, &mut store);
        assert_eq!(w.speed_ms, 50);
    }

    #[test]
    fn eating_last_free_cell_wins() {
        let (mut w, mut rng, mut store) = setup("");
        // 2×1 field, snake on the left, food on the right.
        w.field = crate::domain::cell::Field::new(40, 20, 20);
        w.snake = Snake::from_cells([Cell::new(0, 0)]).unwrap();
        w.food = Some(Cell::new(20, 0));

        let events = step(&mut w, &mut rng, &mut store);

        assert_eq!(w.phase, Phase::Won);
        assert_eq!(w.food, None);
        assert!(events.contains(&GameEvent::BoardFull { score: 1 }));
    }

    #[test]
    fn idle_unless_running() {
        let (mut w, mut rng, mut store) = setup("");
        w.paused = true;
        assert!(step(&mut w, &mut rng, &mut store).is_empty());
        w.paused = false;
        w.phase = Phase::Won;
        assert!(step(&mut w, &mut rng, &mut store).is_empty());
        assert_eq!(w.tick, 0);
    }

    #[test]
    fn message_expires() {
        let (mut w, mut rng, mut store) = setup("");
        food_far_away(&mut w);
        w.set_message("hi", 2);
        step(&mut w, &mut rng, &mut store);
        assert_eq!(w.message, "hi");
        step(&mut w, &mut rng, &mut store);
        assert!(w.message.is_empty());
    }
}
