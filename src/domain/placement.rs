/// Food placement by rejection sampling.
///
/// Samples uniform grid cells until one is free of both the snake and the
/// obstacles. Gives up after `MAX_ATTEMPTS` and reports no space; the caller
/// treats that as a full board (a win), never as an error.

use rand::Rng;

use super::cell::{Cell, Field};
use super::snake::Snake;

pub const MAX_ATTEMPTS: u32 = 100;

pub fn is_occupied(cell: Cell, segments: &[Cell]) -> bool {
    segments.contains(&cell)
}

/// A random cell outside `snake` and `obstacles`, or `None` when no free
/// cell turned up within `MAX_ATTEMPTS` samples.
pub fn find_free_cell<R: Rng + ?Sized>(
    field: &Field,
    snake: &Snake,
    obstacles: &[Cell],
    rng: &mut R,
) -> Option<Cell> {
    let cols = field.cols();
    let rows = field.rows();
    if cols <= 0 || rows <= 0 {
        return None;
    }
    for _ in 0..MAX_ATTEMPTS {
        let candidate = Cell::at(
            rng.random_range(0..cols),
            rng.random_range(0..rows),
            field.cell_size,
        );
        if !snake.contains(candidate) && !is_occupied(candidate, obstacles) {
            return Some(candidate);
        }
    }
    None
}
