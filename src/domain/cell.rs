/// Grid geometry: cells and the playing field they live on.
///
/// Coordinates are surface units, not cell indices. A cell at column 9 with
/// a cell size of 20 sits at x = 180. Every cell the game produces is a
/// multiple of the cell size; `Field::wrap` keeps it that way at the edges.

/// One grid-aligned square.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub const fn new(x: i32, y: i32) -> Self {
        Cell { x, y }
    }

    /// Cell at grid column/row for the given cell size.
    pub const fn at(col: i32, row: i32, cell_size: i32) -> Self {
        Cell { x: col * cell_size, y: row * cell_size }
    }

    /// Shift by whole cells.
    pub fn offset(self, dx: i32, dy: i32, cell_size: i32) -> Self {
        Cell { x: self.x + dx * cell_size, y: self.y + dy * cell_size }
    }
}

/// The fixed-size playing field.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Field {
    pub width: i32,
    pub height: i32,
    pub cell_size: i32,
}

impl Field {
    pub fn new(width: i32, height: i32, cell_size: i32) -> Self {
        Field { width, height, cell_size }
    }

    pub fn cols(&self) -> i32 {
        self.width / self.cell_size
    }

    pub fn rows(&self) -> i32 {
        self.height / self.cell_size
    }

    pub fn contains(&self, c: Cell) -> bool {
        c.x >= 0 && c.x < self.width && c.y >= 0 && c.y < self.height
    }

    /// Toroidal wrap: a cell that stepped past one edge re-enters from the
    /// opposite edge. There are no walls.
    pub fn wrap(&self, c: Cell) -> Cell {
        let x = if c.x >= self.width {
            0
        } else if c.x < 0 {
            self.width - self.cell_size
        } else {
            c.x
        };
        let y = if c.y >= self.height {
            0
        } else if c.y < 0 {
            self.height - self.cell_size
        } else {
            c.y
        };
        Cell { x, y }
    }
}
