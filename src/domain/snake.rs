/// The snake body: head first, never empty.

use std::collections::VecDeque;

use super::cell::Cell;

/// Starting layout in grid cells, head first.
const START_CELLS: [(i32, i32); 3] = [(9, 9), (8, 9), (7, 9)];

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Snake {
    body: VecDeque<Cell>,
}

impl Snake {
    /// The fixed 3-segment start, heading right.
    pub fn starting(cell_size: i32) -> Self {
        Snake {
            body: START_CELLS
                .iter()
                .map(|&(col, row)| Cell::at(col, row, cell_size))
                .collect(),
        }
    }

    /// Build from explicit segments, head first. `None` if empty.
    #[cfg(test)]
    pub fn from_cells(cells: impl IntoIterator<Item = Cell>) -> Option<Self> {
        let body: VecDeque<Cell> = cells.into_iter().collect();
        if body.is_empty() {
            None
        } else {
            Some(Snake { body })
        }
    }

    pub fn head(&self) -> Cell {
        self.body[0]
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Cell> {
        self.body.iter()
    }

    pub fn contains(&self, c: Cell) -> bool {
        self.body.contains(&c)
    }

    /// Does the head overlap any other segment?
    pub fn head_hits_body(&self) -> bool {
        let head = self.head();
        self.body.iter().skip(1).any(|&c| c == head)
    }

    pub fn push_head(&mut self, c: Cell) {
        self.body.push_front(c);
    }

    /// Remove the tail segment. The last segment is never removed.
    pub fn drop_tail(&mut self) {
        if self.body.len() > 1 {
            self.body.pop_back();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starting_layout() {
        let s = Snake::starting(20);
        let cells: Vec<Cell> = s.iter().copied().collect();
        assert_eq!(cells, vec![Cell::new(180, 180), Cell::new(160, 180), Cell::new(140, 180)]);
        assert_eq!(s.head(), Cell::new(180, 180));
        assert!(!s.head_hits_body());
    }

    #[test]
    fn empty_body_rejected() {
        assert!(Snake::from_cells(Vec::new()).is_none());
    }

    #[test]
    fn grow_and_shrink() {
        let mut s = Snake::starting(20);
        s.push_head(Cell::new(200, 180));
        assert_eq!(s.len(), 4);
        s.drop_tail();
        assert_eq!(s.len(), 3);
        assert!(!s.contains(Cell::new(140, 180)));
    }

    #[test]
    fn tail_never_removed_below_one() {
        let mut s = Snake::from_cells([Cell::new(0, 0)]).unwrap();
        s.drop_tail();
        assert_eq!(s.len(), 1);
    }

    #[test]
    fn head_overlap_detected() {
        let s = Snake::from_cells([
            Cell::new(20, 20),
            Cell::new(40, 20),
            Cell::new(40, 40),
            Cell::new(20, 40),
            Cell::new(20, 20),
        ])
        .unwrap();
        assert!(s.head_hits_body());
    }
}
