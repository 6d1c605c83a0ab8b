/// Painter: turns a `WorldState` into raster primitives.
///
/// Works in surface units. Every object is an inset square of
/// `cell_size - 2`, one unit in from its cell's top-left corner.

use crate::domain::cell::Cell;
use crate::domain::color::Rgb;
use crate::sim::world::WorldState;

/// The two primitives the game draws with.
pub trait Surface {
    fn clear_rect(&mut self, x: i32, y: i32, w: i32, h: i32);
    fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: Rgb);
}

pub fn paint(world: &WorldState, surface: &mut dyn Surface) {
    let field = &world.field;
    surface.clear_rect(0, 0, field.width, field.height);

    let cs = field.cell_size;
    for seg in world.snake.iter() {
        fill_cell(surface, *seg, cs, Rgb::SNAKE);
    }
    if let Some(food) = world.food {
        fill_cell(surface, food, cs, Rgb::FOOD);
    }
    for ob in &world.obstacles {
        fill_cell(surface, *ob, cs, world.obstacle_color);
    }
}

fn fill_cell(surface: &mut dyn Surface, c: Cell, cell_size: i32, color: Rgb) {
    let side = (cell_size - 2).max(1);
    surface.fill_rect(c.x + 1, c.y + 1, side, side, color);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::sim::world::WorldState;
    use rand::SeedableRng;
    use rand_chacha::ChaCha12Rng;

    #[derive(Debug, PartialEq)]
    enum Op {
        Clear(i32, i32, i32, i32),
        Fill(i32, i32, i32, i32, Rgb),
    }

    #[derive(Default)]
    struct RecordingSurface {
        ops: Vec<Op>,
    }

    impl Surface for RecordingSurface {
        fn clear_rect(&mut self, x: i32, y: i32, w: i32, h: i32) {
            self.ops.push(Op::Clear(x, y, w, h));
        }
        fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: Rgb) {
            self.ops.push(Op::Fill(x, y, w, h, color));
        }
    }

    fn world(name: &str) -> WorldState {
        let mut config = GameConfig::default();
        config.name = name.to_string();
        WorldState::from_config(&config, 0, &mut ChaCha12Rng::seed_from_u64(8))
    }

    #[test]
    fn clears_first_then_snake_food_obstacles() {
        let w = world("Jime");
        let mut s = RecordingSurface::default();
        paint(&w, &mut s);

        assert_eq!(s.ops[0], Op::Clear(0, 0, 600, 400));
        assert_eq!(s.ops[1], Op::Fill(181, 181, 18, 18, Rgb::SNAKE));
        assert_eq!(s.ops[2], Op::Fill(161, 181, 18, 18, Rgb::SNAKE));
        assert_eq!(s.ops[3], Op::Fill(141, 181, 18, 18, Rgb::SNAKE));
        let food = w.food.unwrap();
        assert_eq!(s.ops[4], Op::Fill(food.x + 1, food.y + 1, 18, 18, Rgb::FOOD));
        assert_eq!(s.ops.len(), 1 + 3 + 1 + w.obstacles.len());
        assert!(s.ops[5..]
            .iter()
            .all(|op| matches!(op, Op::Fill(_, _, 18, 18, c) if *c == w.obstacle_color)));
    }

    #[test]
    fn no_food_no_food_square() {
        let mut w = world("");
        w.food = None;
        let mut s = RecordingSurface::default();
        paint(&w, &mut s);
        assert_eq!(s.ops.len(), 1 + 3);
        assert!(!s.ops.iter().any(|op| matches!(op, Op::Fill(.., c) if *c == Rgb::FOOD)));
    }
}
