/// Movement direction: four unit vectors, no diagonals.

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    pub fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// Unit vector in cells. Screen y grows downward.
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    /// Can the snake turn from `self` to `next` in one update?
    /// Only a full reversal is refused.
    pub fn accepts(self, next: Direction) -> bool {
        next != self.opposite()
    }
}

impl Default for Direction {
    fn default() -> Self {
        Direction::Right
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_exactly_the_opposite() {
        for current in Direction::ALL {
            for next in Direction::ALL {
                let rejected = !current.accepts(next);
                assert_eq!(rejected, next == current.opposite(), "{current:?} -> {next:?}");
            }
        }
    }

    #[test]
    fn opposite_is_involution() {
        for d in Direction::ALL {
            assert_eq!(d.opposite().opposite(), d);
            let (dx, dy) = d.delta();
            let (ox, oy) = d.opposite().delta();
            assert_eq!((dx + ox, dy + oy), (0, 0));
        }
    }

    #[test]
    fn starts_rightward() {
        assert_eq!(Direction::default(), Direction::Right);
    }
}
